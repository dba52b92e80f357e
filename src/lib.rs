//! # content-index
//!
//! Helpers that a search indexer's expression layer calls while turning content
//! repository nodes into index documents: hierarchical path prefixes, flattened
//! node type names, node collection projections, HTML heading buckets for
//! weighted full-text fields, and asset text extraction.
//!
//! The helpers live in [`indexing`]; [`indexing::IndexingHelper`] bundles them
//! with their injected collaborators and exposes the by-name surface used by
//! the embedding expression runtime.

pub mod indexing;

pub use indexing::{Buckets, HelperMethod, IndexingHelper};
