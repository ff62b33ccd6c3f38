//! Fixed test vectors for the tree state methods.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use color_eyre::eyre::eyre;
use serde_json::{json, value::RawValue};
use tower::{service_fn, ServiceExt};

use zebra_node_services::{
    rpc::{NodeRpc, NodeRpcError, RpcRequest, RpcResponse},
    BoxError,
};
use zebra_test::vectors::*;

use crate::{
    constants::{TREESTATE_BRIDGE_METHOD, TREESTATE_LEGACY_METHOD},
    methods::{
        block_id::BlockId,
        errors::{ErrorKind, TreeStateError},
        trees::ShieldedPool,
        Request, TreeStateRpc,
    },
};

/// The requests received by a stub node.
type RequestLog = Arc<Mutex<Vec<RpcRequest>>>;

/// Returns a stub node that answers every request with `response`,
/// and a log of the requests it received.
fn stub_node(response: &'static str) -> (impl NodeRpc, RequestLog) {
    let requests = RequestLog::default();
    let log = requests.clone();

    let node = service_fn(move |request: RpcRequest| {
        log.lock().expect("lock is not poisoned").push(request);

        async move { Ok::<RpcResponse, BoxError>(RawValue::from_string(response.to_string())?) }
    });

    (node, requests)
}

/// Returns the requests in `log`, as method names and parameters.
fn logged(log: &RequestLog) -> Vec<(String, Vec<serde_json::Value>)> {
    log.lock()
        .expect("lock is not poisoned")
        .iter()
        .map(|request| (request.method.clone(), request.params.clone()))
        .collect()
}

#[tokio::test]
async fn tree_state_uses_final_state() -> color_eyre::Result<()> {
    let _init_guard = zebra_test::init();

    let (node, requests) = stub_node(LEGACY_TREESTATE);
    let rpc = TreeStateRpc::new("main", node);

    let tree_state = rpc
        .get_tree_state(BlockId::from_height(TREESTATE_HEIGHT))
        .await?;

    assert_eq!(tree_state.network, "main");
    assert_eq!(tree_state.height, TREESTATE_HEIGHT);
    assert_eq!(tree_state.hash, TREESTATE_HASH_HEX);
    assert_eq!(tree_state.time, TREESTATE_TIME);
    assert_eq!(tree_state.sprout_tree, SPROUT_STATE);
    assert_eq!(tree_state.sapling_tree, SAPLING_STATE);
    assert_eq!(tree_state.orchard_tree, "");

    // Requesting the same block by hash gets the same tree state
    let by_hash = rpc
        .get_tree_state(BlockId::from_hash(TREESTATE_HASH_BYTES))
        .await?;

    assert_eq!(by_hash, tree_state);

    assert_eq!(
        logged(&requests),
        vec![
            (
                TREESTATE_LEGACY_METHOD.to_string(),
                vec![json!(TREESTATE_HEIGHT.to_string())]
            ),
            (
                TREESTATE_LEGACY_METHOD.to_string(),
                vec![json!(TREESTATE_HASH_HEX)]
            ),
        ]
    );

    Ok(())
}

#[tokio::test]
async fn tree_state_falls_back_to_final_root() -> color_eyre::Result<()> {
    let _init_guard = zebra_test::init();

    let (node, _requests) = stub_node(LEGACY_TREESTATE_ROOTS_ONLY);
    let rpc = TreeStateRpc::new("main", node);

    let tree_state = rpc
        .get_tree_state(BlockId::from_height(TREESTATE_HEIGHT))
        .await?;

    assert_eq!(tree_state.sprout_tree, SPROUT_ROOT);
    assert_eq!(tree_state.sapling_tree, SAPLING_ROOT);
    assert_eq!(tree_state.orchard_tree, "");

    Ok(())
}

#[tokio::test]
async fn legacy_tree_state_ignores_orchard_pool() -> color_eyre::Result<()> {
    let _init_guard = zebra_test::init();

    // A node that wrongly returns an Orchard pool from the legacy RPC
    let (node, _requests) = stub_node(BRIDGE_TREESTATE);
    let rpc = TreeStateRpc::new("main", node);

    let tree_state = rpc
        .get_tree_state(BlockId::from_height(TREESTATE_HEIGHT))
        .await?;

    assert_eq!(tree_state.sapling_tree, SAPLING_STATE);
    assert_eq!(tree_state.orchard_tree, "");

    Ok(())
}

#[tokio::test]
async fn legacy_tree_state_skips_invalid_orchard_pool() -> color_eyre::Result<()> {
    let _init_guard = zebra_test::init();

    let (node, _requests) = stub_node(LEGACY_TREESTATE_INVALID_ORCHARD);
    let rpc = TreeStateRpc::new("main", node);

    let tree_state = rpc
        .get_tree_state(BlockId::from_height(TREESTATE_HEIGHT))
        .await?;

    assert_eq!(tree_state.sprout_tree, "");
    assert_eq!(tree_state.sapling_tree, SAPLING_STATE);
    assert_eq!(tree_state.orchard_tree, "");

    // The bridge format does decode the Orchard pool
    let error = rpc
        .get_tree_state_bridge(BlockId::from_height(TREESTATE_HEIGHT))
        .await
        .expect_err("the Orchard pool is invalid");

    assert!(matches!(
        error,
        TreeStateError::Decode {
            method: TREESTATE_BRIDGE_METHOD,
            ..
        }
    ));
    assert_eq!(error.kind(), ErrorKind::DecodeFailure);

    Ok(())
}

#[tokio::test]
async fn bridge_tree_state_uses_final_state() -> color_eyre::Result<()> {
    let _init_guard = zebra_test::init();

    let (node, requests) = stub_node(BRIDGE_TREESTATE);
    let rpc = TreeStateRpc::new("main", node);

    let tree_state = rpc
        .get_tree_state_bridge(BlockId::from_height(TREESTATE_HEIGHT))
        .await?;

    assert_eq!(tree_state.network, "main");
    assert_eq!(tree_state.height, TREESTATE_HEIGHT);
    assert_eq!(tree_state.hash, TREESTATE_HASH_HEX);
    assert_eq!(tree_state.time, TREESTATE_TIME);
    assert_eq!(tree_state.sprout_tree, SPROUT_STATE);
    assert_eq!(tree_state.sapling_tree, SAPLING_STATE);
    assert_eq!(tree_state.orchard_tree, ORCHARD_STATE);

    let by_hash = rpc
        .get_tree_state_bridge(BlockId::from_hash(TREESTATE_HASH_BYTES))
        .await?;

    assert_eq!(by_hash.height, TREESTATE_HEIGHT);

    assert_eq!(
        logged(&requests),
        vec![
            (
                TREESTATE_BRIDGE_METHOD.to_string(),
                vec![json!(TREESTATE_HEIGHT.to_string())]
            ),
            (
                TREESTATE_BRIDGE_METHOD.to_string(),
                vec![json!(TREESTATE_HASH_HEX)]
            ),
        ]
    );

    Ok(())
}

#[tokio::test]
async fn bridge_tree_state_falls_back_to_final_root() -> color_eyre::Result<()> {
    let _init_guard = zebra_test::init();

    let (node, _requests) = stub_node(BRIDGE_TREESTATE_ROOTS_ONLY);
    let rpc = TreeStateRpc::new("main", node);

    let tree_state = rpc
        .get_tree_state_bridge(BlockId::from_height(TREESTATE_HEIGHT))
        .await?;

    assert_eq!(tree_state.sprout_tree, SPROUT_ROOT);
    assert_eq!(tree_state.sapling_tree, SAPLING_ROOT);
    assert_eq!(tree_state.orchard_tree, ORCHARD_ROOT);

    Ok(())
}

#[tokio::test]
async fn bridge_tree_state_chooses_trees_per_pool() -> color_eyre::Result<()> {
    let _init_guard = zebra_test::init();

    // Sprout is null, Sapling has an empty final state, Orchard has a final state
    let (node, _requests) = stub_node(BRIDGE_TREESTATE_MIXED);
    let rpc = TreeStateRpc::new("main", node);

    let tree_state = rpc
        .get_tree_state_bridge(BlockId::from_height(TREESTATE_HEIGHT))
        .await?;

    assert_eq!(tree_state.sprout_tree, "");
    assert_eq!(tree_state.sapling_tree, SAPLING_ROOT);
    assert_eq!(tree_state.orchard_tree, ORCHARD_STATE);

    Ok(())
}

#[tokio::test]
async fn bridge_tree_state_before_orchard_activation() -> color_eyre::Result<()> {
    let _init_guard = zebra_test::init();

    let (node, _requests) = stub_node(BRIDGE_TREESTATE_BEFORE_ORCHARD);
    let rpc = TreeStateRpc::new("test", node);

    let tree_state = rpc
        .get_tree_state_bridge(BlockId::from_height(TREESTATE_HEIGHT))
        .await?;

    assert_eq!(tree_state.network, "test");
    assert_eq!(tree_state.sprout_tree, "");
    assert_eq!(tree_state.sapling_tree, SAPLING_STATE);
    assert_eq!(tree_state.orchard_tree, "");

    Ok(())
}

#[tokio::test]
async fn unspecified_identifier_fails_without_node_call() {
    let _init_guard = zebra_test::init();

    let (node, requests) = stub_node(BRIDGE_TREESTATE);
    let rpc = TreeStateRpc::new("main", node);

    let error = rpc
        .get_tree_state(BlockId::unspecified())
        .await
        .expect_err("unspecified identifiers are rejected");

    assert_eq!(error.to_string(), "request for unspecified identifier");
    assert_eq!(error.kind(), ErrorKind::InvalidIdentifier);

    let error = rpc
        .get_tree_state_bridge(BlockId::unspecified())
        .await
        .expect_err("unspecified identifiers are rejected");

    assert_eq!(error.to_string(), "request for unspecified identifier");
    assert!(matches!(error, TreeStateError::UnspecifiedIdentifier));

    assert!(logged(&requests).is_empty(), "no node calls were made");
}

#[tokio::test]
async fn height_takes_precedence_over_hash() -> color_eyre::Result<()> {
    let _init_guard = zebra_test::init();

    let (node, requests) = stub_node(BRIDGE_TREESTATE);
    let rpc = TreeStateRpc::new("main", node);

    let block_id = BlockId {
        height: Some(TREESTATE_HEIGHT),
        hash: Some([0xff; 32]),
    };

    rpc.get_tree_state_bridge(block_id).await?;

    assert_eq!(
        logged(&requests),
        vec![(
            TREESTATE_BRIDGE_METHOD.to_string(),
            vec![json!("100200")]
        )]
    );

    Ok(())
}

#[tokio::test]
async fn node_errors_are_passed_through() {
    let _init_guard = zebra_test::init();

    let node = service_fn(|_request: RpcRequest| async move {
        Err::<RpcResponse, BoxError>(
            NodeRpcError {
                code: -8,
                message: "Invalid block height parameter".to_string(),
            }
            .into(),
        )
    });
    let rpc = TreeStateRpc::new("main", node);

    let error = rpc
        .get_tree_state_bridge(BlockId::from_height(u64::MAX))
        .await
        .expect_err("node errors are returned");

    assert_eq!(error.kind(), ErrorKind::RpcFailure);
    assert_eq!(error.to_string(), "Invalid block height parameter");

    let node_error = error
        .into_rpc_error()
        .expect("node errors are RPC failures");
    let node_error = node_error
        .downcast_ref::<NodeRpcError>()
        .expect("node errors are unchanged");

    assert_eq!(node_error.code, -8);
}

#[tokio::test]
async fn malformed_responses_are_decode_failures() {
    let _init_guard = zebra_test::init();

    let (node, _requests) = stub_node(MALFORMED_TREESTATE);
    let rpc = TreeStateRpc::new("main", node);

    let error = rpc
        .get_tree_state(BlockId::from_height(TREESTATE_HEIGHT))
        .await
        .expect_err("malformed responses are rejected");

    assert_eq!(error.kind(), ErrorKind::DecodeFailure);
    assert!(
        error.to_string().contains(TREESTATE_LEGACY_METHOD),
        "decode errors name the node RPC: {error}"
    );
    assert!(error.into_rpc_error().is_err());

    // A JSON array is not a tree state either
    let (node, _requests) = stub_node("[]");
    let rpc = TreeStateRpc::new("main", node);

    let error = rpc
        .get_tree_state_bridge(BlockId::from_height(TREESTATE_HEIGHT))
        .await
        .expect_err("malformed responses are rejected");

    assert!(matches!(
        error,
        TreeStateError::Decode {
            method: TREESTATE_BRIDGE_METHOD,
            ..
        }
    ));
}

#[tokio::test]
async fn empty_commitments_are_decode_failures() {
    let _init_guard = zebra_test::init();

    let (node, _requests) = stub_node(BRIDGE_TREESTATE_EMPTY_COMMITMENTS);
    let rpc = TreeStateRpc::new("main", node);

    let error = rpc
        .get_tree_state_bridge(BlockId::from_height(TREESTATE_HEIGHT))
        .await
        .expect_err("commitments without trees are rejected");

    assert_eq!(error.kind(), ErrorKind::DecodeFailure);
    assert!(matches!(
        error,
        TreeStateError::MissingTree {
            pool: ShieldedPool::Sapling
        }
    ));
}

#[tokio::test]
async fn tree_state_service_dispatches_requests() -> color_eyre::Result<()> {
    let _init_guard = zebra_test::init();

    let (node, requests) = stub_node(BRIDGE_TREESTATE);
    let rpc = TreeStateRpc::new("main", node);

    let legacy = rpc
        .clone()
        .oneshot(Request::TreeState(BlockId::from_height(TREESTATE_HEIGHT)))
        .await?;
    let bridge = rpc
        .oneshot(Request::TreeStateBridge(BlockId::from_hash(
            TREESTATE_HASH_BYTES,
        )))
        .await?;

    assert_eq!(legacy.orchard_tree, "");
    assert_eq!(bridge.orchard_tree, ORCHARD_STATE);

    let methods: Vec<String> = logged(&requests)
        .into_iter()
        .map(|(method, _params)| method)
        .collect();
    assert_eq!(methods, [TREESTATE_LEGACY_METHOD, TREESTATE_BRIDGE_METHOD]);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn cancelled_requests_stop_waiting_for_node() -> color_eyre::Result<()> {
    let _init_guard = zebra_test::init();

    let node = service_fn(|_request: RpcRequest| {
        futures::future::pending::<Result<RpcResponse, BoxError>>()
    });
    let rpc = TreeStateRpc::new("main", node);

    let result = tokio::time::timeout(
        Duration::from_secs(10),
        rpc.get_tree_state_bridge(BlockId::from_height(TREESTATE_HEIGHT)),
    )
    .await;

    result
        .map(|_| ())
        .err()
        .ok_or_else(|| eyre!("a node that never answers should time out"))?;

    Ok(())
}
