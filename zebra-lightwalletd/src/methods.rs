//! The tree state methods of the `lightwalletd` frontend.
//!
//! Based on `lightwalletd`'s `GetTreeState` and `GetTreeStateBridge` gRPC methods,
//! backed by the node's [`z_gettreestatelegacy`] and [`z_gettreestate`] RPCs.
//!
//! [`z_gettreestatelegacy`]: crate::constants::TREESTATE_LEGACY_METHOD
//! [`z_gettreestate`]: crate::constants::TREESTATE_BRIDGE_METHOD

use std::task::{Context, Poll};

use futures::{future::BoxFuture, FutureExt};
use tower::{Service, ServiceExt};
use tracing::Instrument;

use zebra_node_services::rpc::{NodeRpc, RpcRequest};

pub mod block_id;
pub mod errors;

// We don't use a types/ module here, because it is redundant.
pub mod trees;


use block_id::BlockId;
use errors::TreeStateError;
use trees::{GetTreestateResponse, TreeSchema, TreeState};

/// A tree state request.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Request {
    /// Get a tree state using the legacy node RPC. The Orchard tree is always empty.
    ///
    /// See [`TreeStateRpc::get_tree_state`].
    TreeState(BlockId),

    /// Get a tree state with bridge trees, including the Orchard tree.
    ///
    /// See [`TreeStateRpc::get_tree_state_bridge`].
    TreeStateBridge(BlockId),
}

/// The tree state methods, backed by a node RPC service.
///
/// Each request makes exactly one node RPC call, and never retries it.
/// There is no caching, and no state shared between requests.
///
/// Requests can be cancelled by dropping their futures, which also drops the node RPC call.
/// Deadlines are set by the caller, for example using a `tower` timeout layer.
#[derive(Clone, Debug)]
pub struct TreeStateRpc<Rpc> {
    /// The network label returned in every tree state.
    network: String,

    /// A handle to the node's JSON-RPC interface.
    node: Rpc,
}

impl<Rpc> TreeStateRpc<Rpc>
where
    Rpc: NodeRpc,
{
    /// Returns the tree state methods for `network`, which call `node`.
    pub fn new(network: impl Into<String>, node: Rpc) -> Self {
        Self {
            network: network.into(),
            node,
        }
    }

    /// Returns the network label of this deployment.
    pub fn network(&self) -> &str {
        &self.network
    }

    /// Returns the tree state of the block identified by `block_id`, using the node's
    /// `z_gettreestatelegacy` RPC.
    ///
    /// The Orchard tree is always empty, because the legacy format has no Orchard pool.
    pub async fn get_tree_state(&self, block_id: BlockId) -> Result<TreeState, TreeStateError> {
        self.clone().tree_state(TreeSchema::Legacy, block_id).await
    }

    /// Returns the tree state of the block identified by `block_id`, using the node's
    /// `z_gettreestate` RPC.
    ///
    /// The Orchard tree is set if the node returned one.
    pub async fn get_tree_state_bridge(
        &self,
        block_id: BlockId,
    ) -> Result<TreeState, TreeStateError> {
        self.clone().tree_state(TreeSchema::Bridge, block_id).await
    }

    /// Fetches and converts a tree state in `schema`'s format.
    async fn tree_state(
        self,
        schema: TreeSchema,
        block_id: BlockId,
    ) -> Result<TreeState, TreeStateError> {
        // Fail unspecified requests before calling the node.
        let param = block_id.to_rpc_param()?;
        let method = schema.rpc_method();

        let span = tracing::debug_span!("tree_state", method, param = %param);

        async move {
            let request = RpcRequest::new(method, vec![serde_json::Value::String(param)]);

            let raw_response = self.node.oneshot(request).await.map_err(|error| {
                tracing::debug!(%error, "node RPC call failed");
                TreeStateError::Rpc(error)
            })?;

            GetTreestateResponse::from_json(schema, raw_response.get())
                .and_then(|response| response.into_tree_state(self.network, schema))
                .inspect_err(|error| tracing::warn!(%error, "invalid node tree state response"))
        }
        .instrument(span)
        .await
    }
}

impl<Rpc> Service<Request> for TreeStateRpc<Rpc>
where
    Rpc: NodeRpc,
{
    type Response = TreeState;
    type Error = TreeStateError;
    type Future = BoxFuture<'static, Result<TreeState, TreeStateError>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        // The node service is checked for readiness when each request is made.
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let (schema, block_id) = match request {
            Request::TreeState(block_id) => (TreeSchema::Legacy, block_id),
            Request::TreeStateBridge(block_id) => (TreeSchema::Bridge, block_id),
        };

        self.clone().tree_state(schema, block_id).boxed()
    }
}
