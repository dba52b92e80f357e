//! Main module for the indexing helpers

pub mod assets;
pub mod cleanup;
pub mod error;
pub mod helper;
pub mod html;
pub mod node_types;
pub mod nodes;
pub mod paths;

#[cfg(test)]
pub(crate) mod testing;

pub use assets::{
    Asset, AssetContent, AssetContentField, AssetExtractor, AssetValue, UnconfiguredExtractor,
};
pub use cleanup::{PresentationCleanup, TextCleaner};
pub use error::{AssetExtractionError, InvocationError};
pub use helper::{Argument, HelperMethod, IndexingHelper};
pub use html::Buckets;
pub use node_types::{extract_node_type_names_and_supertypes, NodeType};
pub use nodes::{
    convert_array_of_nodes_to_array_of_node_identifiers,
    convert_array_of_nodes_to_array_of_node_property, Node,
};
pub use paths::build_all_path_prefixes;
