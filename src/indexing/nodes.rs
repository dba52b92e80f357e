//! Projections over node collections
//!
//! Reference properties are indexed as flat arrays of identifiers, and list
//! fields as flat arrays of one property per referenced node.

use serde_json::Value;

/// Content node as seen by the indexer.
pub trait Node {
    /// Stable node identifier
    fn identifier(&self) -> &str;

    /// Value of a named property, `None` when the node does not carry it
    fn property(&self, name: &str) -> Option<Value>;
}

/// Maps every node to its identifier, keeping iteration order.
///
/// `None` stands for a value that is not a collection and yields an empty list.
pub fn convert_array_of_nodes_to_array_of_node_identifiers<'a, N, I>(
    nodes: Option<I>,
) -> Vec<String>
where
    N: Node + ?Sized + 'a,
    I: IntoIterator<Item = &'a N>,
{
    nodes
        .into_iter()
        .flatten()
        .map(|node| node.identifier().to_string())
        .collect()
}

/// Maps every node to the value of `property_name`, keeping iteration order.
///
/// Nodes without the property contribute `null`, so the output stays aligned
/// with the input.
pub fn convert_array_of_nodes_to_array_of_node_property<'a, N, I>(
    nodes: Option<I>,
    property_name: &str,
) -> Vec<Value>
where
    N: Node + ?Sized + 'a,
    I: IntoIterator<Item = &'a N>,
{
    nodes
        .into_iter()
        .flatten()
        .map(|node| node.property(property_name).unwrap_or(Value::Null))
        .collect()
}
