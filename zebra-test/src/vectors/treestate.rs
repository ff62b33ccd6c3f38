//! `z_gettreestate` and `z_gettreestatelegacy` responses, as returned by nodes
//! running different software versions.

/// The height of the block in the tree state vectors.
pub const TREESTATE_HEIGHT: u64 = 100_200;

/// The time of the block in the tree state vectors.
pub const TREESTATE_TIME: u32 = 1_609_459_200;

/// The hex-encoded hash of the block in the tree state vectors.
pub const TREESTATE_HASH_HEX: &str =
    "0000000001234567890123456789012345678901234567890123456789abcdef";

/// The hash of the block in the tree state vectors, in the byte order wallets send it.
pub const TREESTATE_HASH_BYTES: [u8; 32] = [
    0x00, 0x00, 0x00, 0x00, 0x01, 0x23, 0x45, 0x67, 0x89, 0x01, 0x23, 0x45, 0x67, 0x89, 0x01, 0x23,
    0x45, 0x67, 0x89, 0x01, 0x23, 0x45, 0x67, 0x89, 0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef,
];

/// The Sprout commitment tree root in the vectors.
pub const SPROUT_ROOT: &str = "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef";

/// The serialized Sprout commitment tree in the vectors.
pub const SPROUT_STATE: &str = "sprout1234567890abcdef1234567890abcdef1234567890abcdef1234567890ab";

/// The Sapling commitment tree root in the vectors.
pub const SAPLING_ROOT: &str = "abcd1234567890abcdef1234567890abcdef1234567890abcdef1234567890ab";

/// The serialized Sapling commitment tree in the vectors.
pub const SAPLING_STATE: &str =
    "abcdef1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef";

/// The Orchard commitment tree root in the vectors.
pub const ORCHARD_ROOT: &str = "ef123456789abcdef123456789abcdef123456789abcdef123456789abcdef12";

/// The serialized Orchard commitment tree in the vectors.
pub const ORCHARD_STATE: &str =
    "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef1234";

/// A `z_gettreestatelegacy` response with roots and serialized trees.
///
/// The legacy format has no `active` fields and no Orchard pool.
pub const LEGACY_TREESTATE: &str = r#"{
    "hash": "0000000001234567890123456789012345678901234567890123456789abcdef",
    "height": 100200,
    "time": 1609459200,
    "sprout": {
        "commitments": {
            "finalRoot": "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef",
            "finalState": "sprout1234567890abcdef1234567890abcdef1234567890abcdef1234567890ab"
        }
    },
    "sapling": {
        "commitments": {
            "finalRoot": "abcd1234567890abcdef1234567890abcdef1234567890abcdef1234567890ab",
            "finalState": "abcdef1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef"
        }
    }
}"#;

/// A `z_gettreestatelegacy` response from an older node, which only returns roots.
pub const LEGACY_TREESTATE_ROOTS_ONLY: &str = r#"{
    "hash": "0000000001234567890123456789012345678901234567890123456789abcdef",
    "height": 100200,
    "time": 1609459200,
    "sprout": {
        "commitments": {
            "finalRoot": "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef"
        }
    },
    "sapling": {
        "commitments": {
            "finalRoot": "abcd1234567890abcdef1234567890abcdef1234567890abcdef1234567890ab"
        }
    }
}"#;

/// A `z_gettreestatelegacy` response with an Orchard section that is not a valid
/// treestate. Legacy responses never have Orchard trees, so it is skipped.
pub const LEGACY_TREESTATE_INVALID_ORCHARD: &str = r#"{
    "hash": "0000000001234567890123456789012345678901234567890123456789abcdef",
    "height": 100200,
    "time": 1609459200,
    "sapling": {
        "commitments": {
            "finalRoot": "abcd1234567890abcdef1234567890abcdef1234567890abcdef1234567890ab",
            "finalState": "abcdef1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef"
        }
    },
    "orchard": {
        "commitments": {
            "finalRoot": 5
        }
    }
}"#;

/// A `z_gettreestate` response with bridge trees for all three pools.
pub const BRIDGE_TREESTATE: &str = r#"{
    "hash": "0000000001234567890123456789012345678901234567890123456789abcdef",
    "height": 100200,
    "time": 1609459200,
    "sprout": {
        "active": true,
        "commitments": {
            "finalRoot": "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef",
            "finalState": "sprout1234567890abcdef1234567890abcdef1234567890abcdef1234567890ab"
        }
    },
    "sapling": {
        "active": true,
        "commitments": {
            "finalRoot": "abcd1234567890abcdef1234567890abcdef1234567890abcdef1234567890ab",
            "finalState": "abcdef1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef"
        }
    },
    "orchard": {
        "active": true,
        "commitments": {
            "finalRoot": "ef123456789abcdef123456789abcdef123456789abcdef123456789abcdef12",
            "finalState": "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef1234"
        }
    }
}"#;

/// A `z_gettreestate` response with roots but no serialized trees.
pub const BRIDGE_TREESTATE_ROOTS_ONLY: &str = r#"{
    "hash": "0000000001234567890123456789012345678901234567890123456789abcdef",
    "height": 100200,
    "time": 1609459200,
    "sprout": {
        "active": true,
        "commitments": {
            "finalRoot": "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef"
        }
    },
    "sapling": {
        "active": true,
        "commitments": {
            "finalRoot": "abcd1234567890abcdef1234567890abcdef1234567890abcdef1234567890ab"
        }
    },
    "orchard": {
        "active": true,
        "commitments": {
            "finalRoot": "ef123456789abcdef123456789abcdef123456789abcdef123456789abcdef12"
        }
    }
}"#;

/// A `z_gettreestate` response where Sapling only has a root, and an empty serialized
/// tree, but Orchard has a serialized tree.
pub const BRIDGE_TREESTATE_MIXED: &str = r#"{
    "hash": "0000000001234567890123456789012345678901234567890123456789abcdef",
    "height": 100200,
    "time": 1609459200,
    "sprout": null,
    "sapling": {
        "active": true,
        "commitments": {
            "finalRoot": "abcd1234567890abcdef1234567890abcdef1234567890abcdef1234567890ab",
            "finalState": ""
        }
    },
    "orchard": {
        "active": true,
        "commitments": {
            "finalRoot": "ef123456789abcdef123456789abcdef123456789abcdef123456789abcdef12",
            "finalState": "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef1234"
        }
    }
}"#;

/// A `z_gettreestate` response for a block before Orchard activation.
///
/// Pools without stored trees only have a `skipHash` pointing at the block where
/// the tree last changed.
pub const BRIDGE_TREESTATE_BEFORE_ORCHARD: &str = r#"{
    "hash": "0000000001234567890123456789012345678901234567890123456789abcdef",
    "height": 100200,
    "time": 1609459200,
    "sprout": {
        "active": true,
        "skipHash": "00000000008d4f1e0a9c2c8b6b6b4b7b7c1c2c3c4c5c6c7c8c9cacbcccdcecf"
    },
    "sapling": {
        "active": true,
        "commitments": {
            "finalRoot": "abcd1234567890abcdef1234567890abcdef1234567890abcdef1234567890ab",
            "finalState": "abcdef1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef"
        }
    },
    "orchard": {
        "active": false
    }
}"#;

/// A `z_gettreestate` response where the Sapling commitments object is empty.
pub const BRIDGE_TREESTATE_EMPTY_COMMITMENTS: &str = r#"{
    "hash": "0000000001234567890123456789012345678901234567890123456789abcdef",
    "height": 100200,
    "time": 1609459200,
    "sapling": {
        "active": true,
        "commitments": {
            "finalRoot": "",
            "finalState": ""
        }
    }
}"#;

/// A response with the wrong type for the block height.
pub const MALFORMED_TREESTATE: &str = r#"{
    "hash": "0000000001234567890123456789012345678901234567890123456789abcdef",
    "height": "one hundred thousand",
    "time": 1609459200
}"#;
