//! User-configurable frontend settings.

use std::{
    net::{Ipv4Addr, SocketAddr},
    path::PathBuf,
    time::Duration,
};

use serde::{Deserialize, Serialize};

use zebra_node_services::rpc_client::{RpcClientError, RpcRequestClient, DEFAULT_REQUEST_TIMEOUT};

use crate::constants::{DEFAULT_NETWORK, DEFAULT_NODE_RPC_PORT};

/// Frontend configuration section.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// The network label returned to wallets in every tree state, for example `main` or `test`.
    ///
    /// This is the chain name reported by the node's `getblockchaininfo` RPC.
    pub network: String,

    /// IP address and port of the node's JSON-RPC server.
    ///
    /// The default ports are:
    /// - Mainnet: 127.0.0.1:8232
    /// - Testnet: 127.0.0.1:18232
    pub node_rpc_addr: SocketAddr,

    /// The node's `rpcuser`, for HTTP basic authentication.
    pub node_rpc_user: Option<String>,

    /// The node's `rpcpassword`, for HTTP basic authentication.
    pub node_rpc_password: Option<String>,

    /// The path to the node's RPC cookie file.
    ///
    /// If set, cookie authentication is used, and the user and password are ignored.
    pub node_rpc_cookie_path: Option<PathBuf>,

    /// The time limit for each node RPC call.
    ///
    /// The frontend does not retry calls that time out.
    #[serde(with = "humantime_serde")]
    pub node_rpc_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: DEFAULT_NETWORK.to_string(),
            node_rpc_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_NODE_RPC_PORT)),
            node_rpc_user: None,
            node_rpc_password: None,
            node_rpc_cookie_path: None,
            node_rpc_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl Config {
    /// Returns a node RPC client using the address, credentials, and timeout in this config.
    ///
    /// Reads the cookie file if cookie authentication is configured.
    pub fn node_rpc_client(&self) -> Result<RpcRequestClient, RpcClientError> {
        let client = RpcRequestClient::new(self.node_rpc_addr).with_timeout(self.node_rpc_timeout);

        if let Some(cookie_path) = &self.node_rpc_cookie_path {
            return client.with_cookie_auth(cookie_path);
        }

        match (&self.node_rpc_user, &self.node_rpc_password) {
            (None, None) => Ok(client),
            (user, password) => Ok(client.with_basic_auth(
                user.clone().unwrap_or_default(),
                password.clone().unwrap_or_default(),
            )),
        }
    }
}
