//! A `lightwalletd` frontend for `zcashd`-compatible nodes.
//!
//! Wallets ask the frontend for chain state using stable request and response types.
//! The frontend fetches that state from a node's JSON-RPC interface, and converts the
//! node's response into those stable types, no matter which node version produced it.

#![doc(html_favicon_url = "https://zfnd.org/wp-content/uploads/2022/03/zebra-favicon-128.png")]
#![doc(html_logo_url = "https://zfnd.org/wp-content/uploads/2022/03/zebra-icon.png")]
#![doc(html_root_url = "https://docs.rs/zebra_lightwalletd")]

use zebra_node_services::rpc_client::{RpcClientError, RpcRequestClient};

pub mod config;
pub mod constants;
pub mod methods;

pub use config::Config;
pub use methods::{
    block_id::BlockId,
    errors::{ErrorKind, TreeStateError},
    trees::{Commitments, GetTreestateResponse, ShieldedPool, TreeSchema, TreeState, Treestate},
    Request, TreeStateRpc,
};

/// Returns the tree state RPC methods, connected to the node in `config`.
///
/// Does not contact the node: connection errors are returned by each RPC call.
pub fn init(config: &Config) -> Result<TreeStateRpc<RpcRequestClient>, RpcClientError> {
    let node = config.node_rpc_client()?;

    tracing::info!(
        network = %config.network,
        node_rpc_addr = %config.node_rpc_addr,
        "initialized tree state RPC methods",
    );

    Ok(TreeStateRpc::new(config.network.clone(), node))
}
