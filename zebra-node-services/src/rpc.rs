//! Requests, responses and errors for the JSON-RPC interface of `zcashd`-compatible nodes.
//!
//! - [`NodeRpc`]: a trait alias for `tower::Service`s that execute node RPC calls.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use tower::Service;

use crate::BoxError;


/// A node RPC method call.
///
/// The parameters are sent to the node as an ordered JSON array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RpcRequest {
    /// The name of the RPC method, for example `z_gettreestate`.
    pub method: String,

    /// The positional parameters of the call.
    pub params: Vec<serde_json::Value>,
}

impl RpcRequest {
    /// Returns a new request for `method` with positional `params`.
    pub fn new(method: impl Into<String>, params: Vec<serde_json::Value>) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }
}

/// The undecoded `result` of a successful node RPC call.
///
/// Interpreting the result is up to the caller, because its shape depends on the method
/// and on the node software version.
pub type RpcResponse = Box<RawValue>;

/// An error reported by the node in the `error` field of a JSON-RPC response.
///
/// Displays as the node's message, without any extra context, so it can be passed
/// through to wallet clients unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct NodeRpcError {
    /// The `zcashd` error code, for example `-8` for an invalid parameter.
    pub code: i64,

    /// The error message.
    pub message: String,
}

/// Trait alias for services that execute node RPC calls.
///
/// It adds common bounds like `Clone`, `Send`, and `Sync`,
/// and uses [`BoxError`] as the error type, so transport and node errors can be
/// passed through to callers unchanged.
pub trait NodeRpc:
    Service<RpcRequest, Response = RpcResponse, Error = BoxError, Future: Send + 'static>
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> NodeRpc for T where
    T: Service<RpcRequest, Response = RpcResponse, Error = BoxError, Future: Send + 'static>
        + Clone
        + Send
        + Sync
        + 'static
{
}
