//! The interfaces of the node services used by Zebra's `lightwalletd` frontend.
//!
//! The frontend never talks to a node directly. It sends [`rpc::RpcRequest`]s to any
//! [`rpc::NodeRpc`] service, which can be a real HTTP client, or a stub in tests.

pub mod rpc;

#[cfg(any(test, feature = "rpc-client"))]
pub mod rpc_client;

/// Error type alias to make working with tower traits easier.
///
/// Note: the 'static lifetime bound means that the *type* cannot have any
/// non-'static lifetimes, (e.g., when a type contains a borrow and is
/// parameterized by 'a), *not* that the object itself has 'static lifetime.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
