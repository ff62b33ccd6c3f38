//! Node RPC responses for use in tests.

mod treestate;

pub use treestate::*;
