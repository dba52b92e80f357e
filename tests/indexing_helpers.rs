//! Integration tests for the public helper surface
//!
//! Domain objects are implemented outside the crate, the way an indexer
//! integrates them, and calls go through both the typed API and the by-name
//! surface.

use content_index::indexing::{
    Argument, Asset, AssetContent, AssetExtractionError, AssetExtractor, AssetValue, Node,
    NodeType,
};
use content_index::{HelperMethod, IndexingHelper};
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug)]
struct Document {
    id: String,
}

impl Asset for Document {
    fn identifier(&self) -> &str {
        &self.id
    }
}

/// Extractor keyed on identifiers; `scan` simulates a collaborator failure.
struct InlineExtractor;

impl AssetExtractor for InlineExtractor {
    fn extract(&self, asset: &dyn Asset) -> Result<AssetContent, AssetExtractionError> {
        match asset.identifier() {
            "scan" => Err(AssetExtractionError::Extractor(
                "OCR engine unavailable".to_string(),
            )),
            id => Ok(AssetContent {
                content: format!("text of {id}"),
                name: format!("{id}.pdf"),
                ..AssetContent::default()
            }),
        }
    }
}

fn document(id: &str) -> AssetValue {
    AssetValue::Asset(Arc::new(Document { id: id.to_string() }))
}

struct Type {
    name: &'static str,
    supers: Vec<Arc<Type>>,
}

impl NodeType for Type {
    fn name(&self) -> &str {
        self.name
    }

    fn declared_super_types(&self) -> Vec<&dyn NodeType> {
        self.supers.iter().map(|t| t.as_ref() as &dyn NodeType).collect()
    }
}

struct Entry {
    id: &'static str,
    tags: Value,
}

impl Node for Entry {
    fn identifier(&self) -> &str {
        self.id
    }

    fn property(&self, name: &str) -> Option<Value> {
        (name == "tags").then(|| self.tags.clone())
    }
}

#[test]
fn path_prefixes() {
    let helper = IndexingHelper::new();
    assert!(helper.build_all_path_prefixes("").is_empty());
    assert_eq!(helper.build_all_path_prefixes("/"), vec!["/"]);
    assert_eq!(
        helper.build_all_path_prefixes("/a/b"),
        vec!["/", "/a", "/a/b"]
    );
    assert_eq!(helper.build_all_path_prefixes("a/b"), vec!["a", "a/b"]);
}

#[test]
fn diamond_type_hierarchy() {
    let d = Arc::new(Type {
        name: "D",
        supers: vec![],
    });
    let b = Arc::new(Type {
        name: "B",
        supers: vec![Arc::clone(&d)],
    });
    let c = Arc::new(Type {
        name: "C",
        supers: vec![Arc::clone(&d)],
    });
    let a = Type {
        name: "A",
        supers: vec![b, c],
    };

    let names = IndexingHelper::new().extract_node_type_names_and_supertypes(&a);
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(sorted, vec!["A", "B", "C", "D"]);
    assert_eq!(names[0], "A");
}

#[test]
fn node_projections() {
    let entries = vec![
        Entry {
            id: "e1",
            tags: json!(["news"]),
        },
        Entry {
            id: "e2",
            tags: json!([]),
        },
    ];
    let helper = IndexingHelper::new();

    assert_eq!(
        helper.convert_array_of_nodes_to_array_of_node_identifiers(Some(&entries)),
        vec!["e1", "e2"]
    );
    assert_eq!(
        helper.convert_array_of_nodes_to_array_of_node_property(Some(&entries), "tags"),
        vec![json!(["news"]), json!([])]
    );
    assert!(helper
        .convert_array_of_nodes_to_array_of_node_identifiers(None::<&[Entry]>)
        .is_empty());
}

#[test]
fn heading_buckets_in_both_modes() {
    let html = "<h1>Title</h1>Body text";

    let incremental = IndexingHelper::new().extract_html_tags(html);
    assert_eq!(incremental.get("text").map(String::as_str), Some("Body text"));
    assert_eq!(incremental.get("h1").map(String::as_str), Some("Title"));

    let plain = IndexingHelper::new()
        .with_plain_text(true)
        .extract_html_tags(html);
    assert_eq!(plain.get("text").map(String::as_str), Some("Title Body text"));
    assert_eq!(plain.get("h1").map(String::as_str), Some("Title"));

    assert!(IndexingHelper::new().extract_html_tags("  ").is_empty());
}

#[test]
fn asset_lists_survive_failures() {
    let helper = IndexingHelper::new().with_asset_extractor(InlineExtractor);
    let value = AssetValue::List(vec![document("a"), document("scan"), document("b")]);

    assert_eq!(
        helper.extract_asset_content(&value, None),
        json!(["text of a", null, "text of b"])
    );
    assert_eq!(
        helper.extract_asset_content(&document("a"), Some("name")),
        json!("a.pdf")
    );
    assert_eq!(
        helper.extract_asset_content(&AssetValue::Absent, None),
        Value::Null
    );
    assert_eq!(
        helper.extract_asset_content(&AssetValue::List(Vec::new()), None),
        json!([])
    );
}

#[test]
fn by_name_surface_matches_typed_api() {
    let helper = IndexingHelper::new().with_asset_extractor(InlineExtractor);

    for method in HelperMethod::ALL {
        assert_eq!(
            helper.invoke("allowsCallOfMethod", &[Argument::from(method.name())]),
            Ok(json!(true))
        );
    }

    assert_eq!(
        helper.invoke(
            "extractAssetContent",
            &[Argument::Asset(document("x")), Argument::from("name")]
        ),
        Ok(json!("x.pdf"))
    );
    assert_eq!(
        helper.invoke("extractInto", &[Argument::from("h2"), Argument::from("Lead")]),
        Ok(json!({"h2": "Lead"}))
    );
}
