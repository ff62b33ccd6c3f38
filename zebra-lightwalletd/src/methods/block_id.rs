//! Block identifiers sent by wallets.

use serde::{Deserialize, Serialize};

use super::errors::TreeStateError;

/// A reference to a block, by height or by hash.
///
/// If both are set, the height is used.
#[serde_with::serde_as]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub struct BlockId {
    /// The block height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,

    /// The block hash, hex-encoded in JSON.
    ///
    /// The bytes are sent to the node in the order they are given, without reversing them.
    #[serde_as(as = "Option<serde_with::hex::Hex>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<[u8; 32]>,
}

impl BlockId {
    /// Returns a block identifier for the block at `height`.
    pub fn from_height(height: u64) -> Self {
        Self {
            height: Some(height),
            hash: None,
        }
    }

    /// Returns a block identifier for the block with `hash`.
    pub fn from_hash(hash: [u8; 32]) -> Self {
        Self {
            height: None,
            hash: Some(hash),
        }
    }

    /// Returns a block identifier without a height or hash.
    ///
    /// Requests using this identifier always fail.
    pub fn unspecified() -> Self {
        Self::default()
    }

    /// Converts the fields of a `lightwalletd` protocol `BlockID`.
    ///
    /// In that protocol, a zero height or an empty hash means the field isn't set.
    /// So the genesis block can only be requested by hash.
    pub fn from_wire(height: u64, hash: &[u8]) -> Result<Self, TreeStateError> {
        let hash = match hash.len() {
            0 => None,
            _ => Some(
                <[u8; 32]>::try_from(hash)
                    .map_err(|_| TreeStateError::InvalidHashLength(hash.len()))?,
            ),
        };

        Ok(Self {
            height: (height > 0).then_some(height),
            hash,
        })
    }

    /// Returns the parameter for a node RPC that takes a hash or a height.
    ///
    /// Heights are decimal strings, hashes are lowercase hex strings.
    pub fn to_rpc_param(&self) -> Result<String, TreeStateError> {
        match (self.height, self.hash) {
            (Some(height), _) => Ok(height.to_string()),
            (None, Some(hash)) => Ok(hex::encode(hash)),
            (None, None) => Err(TreeStateError::UnspecifiedIdentifier),
        }
    }
}
