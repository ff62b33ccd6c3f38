//! Errors returned by the tree state RPC methods.

use thiserror::Error;

use zebra_node_services::BoxError;

use super::trees::ShieldedPool;

/// An error describing why a tree state request failed.
///
/// No tree state is returned alongside an error, and failed requests are not retried.
#[derive(Debug, Error)]
pub enum TreeStateError {
    /// The request had neither a block height nor a block hash.
    ///
    /// Wallets match on this exact message.
    #[error("request for unspecified identifier")]
    UnspecifiedIdentifier,

    /// The request had a block hash with the wrong length.
    #[error("block hash must be 32 bytes, got {0} bytes")]
    InvalidHashLength(usize),

    /// The node RPC call failed, or the node reported an error.
    ///
    /// The underlying error is unchanged, and displays the same way.
    #[error("{0}")]
    Rpc(BoxError),

    /// The node's response is not a tree state.
    #[error("could not decode {method} response: {source}")]
    Decode {
        /// The node RPC method that returned the response.
        method: &'static str,

        /// The JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The node's response has commitments for a pool, but no tree or root for it.
    #[error("{pool} commitments have neither a final state nor a final root")]
    MissingTree {
        /// The pool with the missing tree.
        pool: ShieldedPool,
    },
}

/// The kind of a [`TreeStateError`].
///
/// Lets callers tell a node that is unreachable or failing apart from a node that returned
/// something the frontend can't understand.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// The request didn't identify a block.
    InvalidIdentifier,

    /// The node RPC call failed.
    RpcFailure,

    /// The node's response could not be interpreted.
    DecodeFailure,
}

impl TreeStateError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TreeStateError::UnspecifiedIdentifier | TreeStateError::InvalidHashLength(_) => {
                ErrorKind::InvalidIdentifier
            }
            TreeStateError::Rpc(_) => ErrorKind::RpcFailure,
            TreeStateError::Decode { .. } | TreeStateError::MissingTree { .. } => {
                ErrorKind::DecodeFailure
            }
        }
    }

    /// Returns the node RPC error, if this is an [`ErrorKind::RpcFailure`].
    /// Otherwise, returns this error.
    pub fn into_rpc_error(self) -> Result<BoxError, Self> {
        match self {
            TreeStateError::Rpc(error) => Ok(error),
            error => Err(error),
        }
    }
}
