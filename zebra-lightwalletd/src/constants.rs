//! Constants for the `lightwalletd` frontend and the node RPCs it calls.

/// The node RPC that returns tree states in the legacy format.
///
/// Legacy responses have no `active` fields, and no Orchard pool.
pub const TREESTATE_LEGACY_METHOD: &str = "z_gettreestatelegacy";

/// The node RPC that returns tree states with bridge trees for every shielded pool.
pub const TREESTATE_BRIDGE_METHOD: &str = "z_gettreestate";

/// The network label reported to wallets by default.
pub const DEFAULT_NETWORK: &str = "main";

/// The default node RPC port on Mainnet.
pub const DEFAULT_NODE_RPC_PORT: u16 = 8232;
