//! Node type hierarchy flattening
//!
//! Search documents store the node's own type together with every supertype so
//! that filtering on an abstract mixin matches all concrete types using it.

use std::collections::HashSet;

/// Structural type of a content node, owned by the content repository.
///
/// Supertypes form a DAG: the same ancestor may be reachable through more
/// than one declared supertype.
pub trait NodeType {
    /// Fully qualified type name, e.g. `Acme.Site:Document.Page`
    fn name(&self) -> &str;

    /// Directly declared supertypes, in declaration order
    fn declared_super_types(&self) -> Vec<&dyn NodeType>;
}

/// Returns the type's own name followed by all transitive supertype names.
///
/// The walk is depth-first in declaration order; every name appears once, at
/// the position where it was first reached. Types already visited are not
/// descended into again, which also bounds the walk on cyclic input.
pub fn extract_node_type_names_and_supertypes(node_type: &dyn NodeType) -> Vec<String> {
    let mut names = Vec::new();
    let mut seen = HashSet::new();
    collect_type_names(node_type, &mut names, &mut seen);
    names
}

fn collect_type_names<'a>(
    node_type: &'a dyn NodeType,
    names: &mut Vec<String>,
    seen: &mut HashSet<&'a str>,
) {
    if !seen.insert(node_type.name()) {
        return;
    }
    names.push(node_type.name().to_string());

    for super_type in node_type.declared_super_types() {
        collect_type_names(super_type, names, seen);
    }
}
