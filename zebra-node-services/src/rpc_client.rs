//! A client for the JSON-RPC interface of `zcashd`-compatible nodes.
//!
//! Used by the `lightwalletd` frontend to fetch chain state, and by tests.

use std::{
    fs, io,
    net::SocketAddr,
    path::Path,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    task::{Context, Poll},
    time::Duration,
};

use futures::{future::BoxFuture, FutureExt};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use tower::Service;

use crate::{
    rpc::{NodeRpcError, RpcRequest, RpcResponse},
    BoxError,
};


/// The default time limit for a single node RPC call, including reading the response.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The user name `zcashd` and `zebrad` expect for cookie authentication.
pub const COOKIE_USER: &str = "__cookie__";

/// An error from a node RPC call made by [`RpcRequestClient`].
#[derive(Debug, thiserror::Error)]
pub enum RpcClientError {
    /// The HTTP request failed, or timed out.
    #[error("node RPC transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The node answered with a JSON-RPC error object.
    #[error("{0}")]
    Node(#[from] NodeRpcError),

    /// The node answered with an HTTP error status and a body that is not JSON-RPC.
    #[error("node RPC server returned HTTP status {0}")]
    Status(u16),

    /// The node answered with a body that is not a JSON-RPC response.
    #[error("invalid node RPC response: {0}")]
    Envelope(#[source] serde_json::Error),

    /// The node answered without an error, and without a result.
    #[error("node RPC response has no result")]
    EmptyResult,

    /// The cookie file could not be read.
    #[error("could not read node RPC cookie file: {0}")]
    Cookie(#[from] io::Error),
}

#[derive(Serialize)]
struct RequestEnvelope<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: &'a [serde_json::Value],
}

#[derive(Deserialize)]
struct ResponseEnvelope {
    #[serde(default)]
    result: Option<Box<RawValue>>,

    #[serde(default)]
    error: Option<NodeRpcError>,
}

/// An HTTP client for the JSON-RPC interface of a `zcashd`-compatible node.
///
/// Cloning the client is cheap: clones share the connection pool and the request id counter.
#[derive(Clone, Debug)]
pub struct RpcRequestClient {
    client: Client,
    url: String,
    credentials: Option<(String, String)>,
    timeout: Duration,
    next_id: Arc<AtomicU64>,
}

impl RpcRequestClient {
    /// Creates a new client for the node RPC server at `rpc_address`, without authentication.
    pub fn new(rpc_address: SocketAddr) -> Self {
        Self {
            client: Client::new(),
            url: format!("http://{rpc_address}/"),
            credentials: None,
            timeout: DEFAULT_REQUEST_TIMEOUT,
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Authenticates with HTTP basic auth, using the node's `rpcuser` and `rpcpassword`.
    pub fn with_basic_auth(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some((user.into(), password.into()));
        self
    }

    /// Authenticates using the token in the node's cookie file.
    pub fn with_cookie_auth(mut self, cookie_path: &Path) -> Result<Self, RpcClientError> {
        let contents = fs::read_to_string(cookie_path)?;
        self.credentials = Some((COOKIE_USER.to_string(), cookie_token(&contents)));

        Ok(self)
    }

    /// Sets the time limit for each call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the URL this client sends requests to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends `request` to the node, and returns the raw `result` of the call.
    ///
    /// Failed calls are not retried.
    pub async fn send(&self, request: RpcRequest) -> Result<RpcResponse, RpcClientError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(method = %request.method, id, "sending node RPC request");

        let mut builder = self
            .client
            .post(&self.url)
            .timeout(self.timeout)
            .json(&RequestEnvelope {
                jsonrpc: "1.0",
                id,
                method: &request.method,
                params: &request.params,
            });

        if let Some((user, password)) = &self.credentials {
            builder = builder.basic_auth(user, Some(password));
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        parse_response(status, &body)
    }
}

/// Extracts the authentication token from the contents of a cookie file.
///
/// The cookie file is formatted as `__cookie__:<token>`, but a bare token is also accepted.
fn cookie_token(contents: &str) -> String {
    let contents = contents.trim();

    contents
        .strip_prefix(COOKIE_USER)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(contents)
        .to_string()
}

/// Parses a node's JSON-RPC response body.
///
/// `zcashd` reports RPC errors with HTTP status 500 and a JSON-RPC body,
/// so the body is checked for an error object before the status.
fn parse_response(status: StatusCode, body: &[u8]) -> Result<RpcResponse, RpcClientError> {
    let envelope: ResponseEnvelope = match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => return Err(RpcClientError::Status(status.as_u16())),
        Err(error) => return Err(RpcClientError::Envelope(error)),
    };

    match (envelope.error, envelope.result) {
        (Some(error), _) => Err(error.into()),
        (None, Some(result)) => Ok(result),
        (None, None) => Err(RpcClientError::EmptyResult),
    }
}

impl Service<RpcRequest> for RpcRequestClient {
    type Response = RpcResponse;
    type Error = BoxError;
    type Future = BoxFuture<'static, Result<RpcResponse, BoxError>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: RpcRequest) -> Self::Future {
        let client = self.clone();

        async move {
            client.send(request).await.map_err(|error| match error {
                // Pass node errors through without the client error wrapper,
                // so callers can downcast them directly.
                RpcClientError::Node(node_error) => node_error.into(),
                error => error.into(),
            })
        }
        .boxed()
    }
}
