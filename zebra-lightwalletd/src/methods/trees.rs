//! Types and functions for the tree state RPCs.
//!
//! Nodes return tree states in different formats, depending on their software version:
//! - `z_gettreestatelegacy` has Sprout and Sapling pools, without `active` fields.
//! - `z_gettreestate` adds `active` fields, and an Orchard pool.
//!
//! Older nodes only return each pool's `finalRoot`, newer nodes also return the serialized
//! tree as `finalState`. Wallets get one tree per pool, no matter which format the node used.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{TREESTATE_BRIDGE_METHOD, TREESTATE_LEGACY_METHOD};

use super::errors::TreeStateError;

/// A shielded pool with a note commitment tree.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ShieldedPool {
    /// The Sprout pool.
    Sprout,

    /// The Sapling pool.
    Sapling,

    /// The Orchard pool.
    Orchard,
}

impl ShieldedPool {
    /// Returns the pool's name, as used in node RPC responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShieldedPool::Sprout => "sprout",
            ShieldedPool::Sapling => "sapling",
            ShieldedPool::Orchard => "orchard",
        }
    }
}

impl fmt::Display for ShieldedPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The node RPC response format for tree states.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TreeSchema {
    /// The `z_gettreestatelegacy` format, which never has Orchard trees.
    Legacy,

    /// The `z_gettreestate` format, with bridge trees for every pool.
    Bridge,
}

impl TreeSchema {
    /// Returns the node RPC method that returns tree states in this format.
    pub fn rpc_method(&self) -> &'static str {
        match self {
            TreeSchema::Legacy => TREESTATE_LEGACY_METHOD,
            TreeSchema::Bridge => TREESTATE_BRIDGE_METHOD,
        }
    }

    /// Returns true if responses in this format can have a tree for `pool`.
    pub fn has_pool(&self, pool: ShieldedPool) -> bool {
        match pool {
            ShieldedPool::Sprout | ShieldedPool::Sapling => true,
            ShieldedPool::Orchard => *self == TreeSchema::Bridge,
        }
    }
}

/// Response to a `z_gettreestate` or `z_gettreestatelegacy` RPC request.
///
/// Contains the block hash, height, and time, and a [`Treestate`] for each shielded pool
/// in the response. A pool that is missing, or `null`, is [`None`].
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct GetTreestateResponse {
    /// The block hash corresponding to the treestate, hex-encoded.
    hash: String,

    /// The block height corresponding to the treestate, numeric.
    height: u64,

    /// Unix time when the block corresponding to the treestate was mined,
    /// numeric.
    ///
    /// UTC seconds since the Unix 1970-01-01 epoch.
    time: u32,

    /// The Sprout treestate.
    sprout: Option<Treestate>,

    /// The Sapling treestate.
    sapling: Option<Treestate>,

    /// The Orchard treestate, only returned by `z_gettreestate`.
    orchard: Option<Treestate>,
}

impl GetTreestateResponse {
    /// Decodes the raw JSON `result` of a tree state RPC in `schema`'s format.
    ///
    /// The legacy format has no Orchard pool, so any `orchard` section is skipped
    /// without being decoded.
    pub fn from_json(schema: TreeSchema, json: &str) -> Result<Self, TreeStateError> {
        let decoded = match schema {
            TreeSchema::Legacy => {
                serde_json::from_str::<LegacyTreestateResponse>(json).map(Self::from)
            }
            TreeSchema::Bridge => serde_json::from_str(json),
        };

        decoded.map_err(|source| TreeStateError::Decode {
            method: schema.rpc_method(),
            source,
        })
    }

    /// Returns the hex-encoded block hash.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Returns the block height.
    pub fn height(&self) -> u64 {
        self.height
    }

    /// Returns the block time.
    pub fn time(&self) -> u32 {
        self.time
    }

    /// Returns the treestate for `pool`, if the response has one.
    pub fn pool(&self, pool: ShieldedPool) -> Option<&Treestate> {
        match pool {
            ShieldedPool::Sprout => self.sprout.as_ref(),
            ShieldedPool::Sapling => self.sapling.as_ref(),
            ShieldedPool::Orchard => self.orchard.as_ref(),
        }
    }

    /// Converts this response into the tree state returned to wallets, labelled with
    /// `network`.
    ///
    /// Each pool's tree is chosen independently using [`Commitments::tree`].
    /// Pools that `schema` doesn't have, or that are missing from the response,
    /// get an empty tree.
    pub fn into_tree_state(
        self,
        network: impl Into<String>,
        schema: TreeSchema,
    ) -> Result<TreeState, TreeStateError> {
        let tree = |pool| match self.pool(pool) {
            Some(treestate) if schema.has_pool(pool) => treestate.tree(pool),
            _ => Ok(String::new()),
        };

        let sprout_tree = tree(ShieldedPool::Sprout)?;
        let sapling_tree = tree(ShieldedPool::Sapling)?;
        let orchard_tree = tree(ShieldedPool::Orchard)?;

        Ok(TreeState {
            network: network.into(),
            height: self.height,
            hash: self.hash,
            time: self.time,
            sprout_tree,
            sapling_tree,
            orchard_tree,
        })
    }
}

/// Response to a `z_gettreestatelegacy` RPC request, which has no Orchard pool.
#[derive(Deserialize)]
struct LegacyTreestateResponse {
    hash: String,
    height: u64,
    time: u32,
    sprout: Option<Treestate>,
    sapling: Option<Treestate>,
}

impl From<LegacyTreestateResponse> for GetTreestateResponse {
    fn from(legacy: LegacyTreestateResponse) -> Self {
        Self {
            hash: legacy.hash,
            height: legacy.height,
            time: legacy.time,
            sprout: legacy.sprout,
            sapling: legacy.sapling,
            orchard: None,
        }
    }
}

/// A treestate that is included in the [`z_gettreestate`][1] RPC response.
///
/// [1]: https://zcash.github.io/rpc/z_gettreestate.html
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Treestate {
    /// Whether the pool's network upgrade is active at this block.
    /// Only returned by `z_gettreestate`.
    active: Option<bool>,

    /// The hash of the most recent block with a stored tree for this pool.
    ///
    /// Nodes return this instead of `commitments` when they don't store the tree for
    /// this block.
    skip_hash: Option<String>,

    /// Contains the pool's commitment tree root and serialized tree.
    commitments: Option<Commitments>,
}

impl Treestate {
    /// Returns the `active` flag, if the node returned one.
    pub fn active(&self) -> Option<bool> {
        self.active
    }

    /// Returns the `skipHash`, if the node returned one.
    pub fn skip_hash(&self) -> Option<&str> {
        self.skip_hash.as_deref()
    }

    /// Returns a reference to the commitments.
    pub fn commitments(&self) -> Option<&Commitments> {
        self.commitments.as_ref()
    }

    /// Returns the tree for `pool` that is sent to wallets.
    ///
    /// Returns an empty tree if there are no commitments.
    fn tree(&self, pool: ShieldedPool) -> Result<String, TreeStateError> {
        let Some(commitments) = &self.commitments else {
            tracing::debug!(%pool, skip_hash = ?self.skip_hash, "treestate has no commitments");
            return Ok(String::new());
        };

        commitments
            .tree()
            .map(str::to_string)
            .ok_or(TreeStateError::MissingTree { pool })
    }
}

/// A pool's note commitment tree root, and its serialized tree.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Commitments {
    /// The note commitment tree root, hex-encoded.
    final_root: Option<String>,

    /// The serialized note commitment tree frontier, hex-encoded.
    ///
    /// Only returned by newer nodes.
    final_state: Option<String>,
}

impl Commitments {
    /// Returns a new instance of [`Commitments`].
    pub fn new(final_root: Option<String>, final_state: Option<String>) -> Self {
        Self {
            final_root,
            final_state,
        }
    }

    /// Returns the tree root, if the node returned one.
    pub fn final_root(&self) -> Option<&str> {
        self.final_root.as_deref()
    }

    /// Returns the serialized tree, if the node returned one.
    pub fn final_state(&self) -> Option<&str> {
        self.final_state.as_deref()
    }

    /// Returns the tree that is sent to wallets: the serialized tree if it is not empty,
    /// otherwise the root if it is not empty.
    ///
    /// Wallets need the serialized tree to extend it and create witnesses, so the root
    /// is only used with nodes that don't return the serialized tree.
    pub fn tree(&self) -> Option<&str> {
        fn non_empty(tree: &Option<String>) -> Option<&str> {
            tree.as_deref().filter(|tree| !tree.is_empty())
        }

        non_empty(&self.final_state).or_else(|| non_empty(&self.final_root))
    }
}

/// The tree state of a block, as returned to wallets.
///
/// Field names match `lightwalletd`'s `TreeState` message.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeState {
    /// The network label of this deployment, for example `main`.
    pub network: String,

    /// The block height.
    pub height: u64,

    /// The hex-encoded block hash.
    pub hash: String,

    /// The block time, in Unix seconds.
    pub time: u32,

    /// The Sprout tree, hex-encoded.
    pub sprout_tree: String,

    /// The Sapling tree, hex-encoded.
    pub sapling_tree: String,

    /// The Orchard tree, hex-encoded. Always empty for legacy tree states.
    pub orchard_tree: String,
}
