//! Error types produced by shape matching.
//!
//! This module provides the recursive [`ErrorTree`] that mirrors the input's
//! shape, and [`MatchError`] for the single fatal precondition.

mod tree;

pub use tree::{ErrorNode, ErrorTree, MatchError};
