//! The indexing helper facade
//!
//! [`IndexingHelper`] bundles the helpers with their injected collaborators and
//! is what the indexer registers with its expression runtime. The runtime calls
//! helpers by name through [`IndexingHelper::invoke`]; only names on the static
//! [`HelperMethod`] allow-list can be reached that way.
//!
//! ```ignore
//! let helper = IndexingHelper::from_config(&content_index_config::load_defaults()?);
//! let buckets = helper.invoke("extractHtmlTags", &[Argument::from("<h1>Hi</h1> there")])?;
//! ```

use crate::indexing::assets::{
    self, AssetExtractor, AssetValue, UnconfiguredExtractor, DEFAULT_FIELD,
};
use crate::indexing::cleanup::{PresentationCleanup, TextCleaner};
use crate::indexing::error::InvocationError;
use crate::indexing::html::{self, Buckets};
use crate::indexing::node_types::{self, NodeType};
use crate::indexing::nodes::{self, Node};
use crate::indexing::paths;
use content_index_config::IndexConfig;
use serde_json::Value;
use std::sync::Arc;

/// Operations callable from the expression runtime, by their runtime names.
///
/// Every listed operation is free of side effects apart from logging and is
/// safe to expose to sandboxed expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HelperMethod {
    BuildAllPathPrefixes,
    ExtractNodeTypeNamesAndSupertypes,
    ConvertArrayOfNodesToArrayOfNodeIdentifiers,
    ConvertArrayOfNodesToArrayOfNodeProperty,
    ExtractHtmlTags,
    ExtractInto,
    ExtractAssetContent,
    AllowsCallOfMethod,
}

impl HelperMethod {
    pub const ALL: [HelperMethod; 8] = [
        HelperMethod::BuildAllPathPrefixes,
        HelperMethod::ExtractNodeTypeNamesAndSupertypes,
        HelperMethod::ConvertArrayOfNodesToArrayOfNodeIdentifiers,
        HelperMethod::ConvertArrayOfNodesToArrayOfNodeProperty,
        HelperMethod::ExtractHtmlTags,
        HelperMethod::ExtractInto,
        HelperMethod::ExtractAssetContent,
        HelperMethod::AllowsCallOfMethod,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HelperMethod::BuildAllPathPrefixes => "buildAllPathPrefixes",
            HelperMethod::ExtractNodeTypeNamesAndSupertypes => "extractNodeTypeNamesAndSupertypes",
            HelperMethod::ConvertArrayOfNodesToArrayOfNodeIdentifiers => {
                "convertArrayOfNodesToArrayOfNodeIdentifiers"
            }
            HelperMethod::ConvertArrayOfNodesToArrayOfNodeProperty => {
                "convertArrayOfNodesToArrayOfNodeProperty"
            }
            HelperMethod::ExtractHtmlTags => "extractHtmlTags",
            HelperMethod::ExtractInto => "extractInto",
            HelperMethod::ExtractAssetContent => "extractAssetContent",
            HelperMethod::AllowsCallOfMethod => "allowsCallOfMethod",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        HelperMethod::ALL
            .into_iter()
            .find(|method| method.name() == name)
    }
}

/// Argument passed by the expression runtime.
pub enum Argument<'a> {
    Null,
    /// Scalars, strings and plain JSON structures
    Value(Value),
    Nodes(Vec<&'a dyn Node>),
    NodeType(&'a dyn NodeType),
    Asset(AssetValue),
}

impl From<&str> for Argument<'_> {
    fn from(s: &str) -> Self {
        Argument::Value(Value::from(s))
    }
}

impl From<Value> for Argument<'_> {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Argument::Null,
            other => Argument::Value(other),
        }
    }
}

/// Indexing helpers plus the read-only state they share.
#[derive(Clone)]
pub struct IndexingHelper {
    plain_text: bool,
    cleaner: Arc<dyn TextCleaner>,
    asset_extractor: Arc<dyn AssetExtractor>,
}

impl IndexingHelper {
    /// Helper with plain-text mode off, default cleanup and no asset extractor.
    pub fn new() -> Self {
        Self {
            plain_text: false,
            cleaner: Arc::new(PresentationCleanup::default()),
            asset_extractor: Arc::new(UnconfiguredExtractor),
        }
    }

    pub fn from_config(config: &IndexConfig) -> Self {
        Self::new()
            .with_plain_text(config.fulltext.plain)
            .with_cleaner(PresentationCleanup::from_config(&config.cleanup))
    }

    pub fn with_plain_text(mut self, plain_text: bool) -> Self {
        self.plain_text = plain_text;
        self
    }

    pub fn with_cleaner(mut self, cleaner: impl TextCleaner + 'static) -> Self {
        self.cleaner = Arc::new(cleaner);
        self
    }

    pub fn with_asset_extractor(mut self, extractor: impl AssetExtractor + 'static) -> Self {
        self.asset_extractor = Arc::new(extractor);
        self
    }

    pub fn plain_text(&self) -> bool {
        self.plain_text
    }

    pub fn build_all_path_prefixes(&self, path: &str) -> Vec<String> {
        paths::build_all_path_prefixes(path)
    }

    pub fn extract_node_type_names_and_supertypes(&self, node_type: &dyn NodeType) -> Vec<String> {
        node_types::extract_node_type_names_and_supertypes(node_type)
    }

    pub fn convert_array_of_nodes_to_array_of_node_identifiers<'a, N, I>(
        &self,
        nodes: Option<I>,
    ) -> Vec<String>
    where
        N: Node + ?Sized + 'a,
        I: IntoIterator<Item = &'a N>,
    {
        nodes::convert_array_of_nodes_to_array_of_node_identifiers(nodes)
    }

    pub fn convert_array_of_nodes_to_array_of_node_property<'a, N, I>(
        &self,
        nodes: Option<I>,
        property_name: &str,
    ) -> Vec<Value>
    where
        N: Node + ?Sized + 'a,
        I: IntoIterator<Item = &'a N>,
    {
        nodes::convert_array_of_nodes_to_array_of_node_property(nodes, property_name)
    }

    pub fn extract_html_tags(&self, input: &str) -> Buckets {
        html::extract_html_tags(input, self.cleaner.as_ref(), self.plain_text)
    }

    pub fn extract_into(&self, bucket_name: &str, input: &str) -> Buckets {
        html::extract_into(bucket_name, input, self.cleaner.as_ref(), self.plain_text)
    }

    /// Extracts `field` (default `content`) from an asset or a list of assets.
    pub fn extract_asset_content(&self, value: &AssetValue, field: Option<&str>) -> Value {
        assets::extract_asset_content(
            value,
            field.unwrap_or(DEFAULT_FIELD),
            self.asset_extractor.as_ref(),
        )
    }

    /// Every helper method is safe to call from sandboxed expressions, so this
    /// always answers `true`. Dispatch by name still goes through
    /// [`HelperMethod::from_name`] in [`IndexingHelper::invoke`].
    pub fn allows_call_of_method(&self, _method_name: &str) -> bool {
        true
    }

    /// Calls an allow-listed helper by its runtime name.
    ///
    /// Extra arguments are ignored. Node collection arguments of the wrong shape
    /// yield empty lists rather than errors.
    pub fn invoke(&self, method_name: &str, args: &[Argument<'_>]) -> Result<Value, InvocationError> {
        let method = HelperMethod::from_name(method_name)
            .ok_or_else(|| InvocationError::UnknownMethod(method_name.to_string()))?;
        let name = method.name();

        let result = match method {
            HelperMethod::BuildAllPathPrefixes => {
                Value::from(self.build_all_path_prefixes(string_arg(args, 0, name)?))
            }
            HelperMethod::ExtractNodeTypeNamesAndSupertypes => match arg(args, 0, name)? {
                Argument::NodeType(node_type) => {
                    Value::from(self.extract_node_type_names_and_supertypes(*node_type))
                }
                _ => {
                    return Err(InvocationError::InvalidArgument {
                        method: name,
                        position: 0,
                        expected: "a node type",
                    })
                }
            },
            HelperMethod::ConvertArrayOfNodesToArrayOfNodeIdentifiers => {
                let nodes = node_args(arg(args, 0, name)?);
                Value::from(self.convert_array_of_nodes_to_array_of_node_identifiers(nodes))
            }
            HelperMethod::ConvertArrayOfNodesToArrayOfNodeProperty => {
                let nodes = node_args(arg(args, 0, name)?);
                let property_name = string_arg(args, 1, name)?;
                Value::Array(
                    self.convert_array_of_nodes_to_array_of_node_property(nodes, property_name),
                )
            }
            HelperMethod::ExtractHtmlTags => {
                buckets_to_value(self.extract_html_tags(text_arg(args, 0, name)?))
            }
            HelperMethod::ExtractInto => {
                let bucket_name = string_arg(args, 0, name)?;
                buckets_to_value(self.extract_into(bucket_name, text_arg(args, 1, name)?))
            }
            HelperMethod::ExtractAssetContent => {
                let field = match args.get(1) {
                    None | Some(Argument::Null) | Some(Argument::Value(Value::Null)) => None,
                    Some(_) => Some(string_arg(args, 1, name)?),
                };
                match arg(args, 0, name)? {
                    Argument::Null => self.extract_asset_content(&AssetValue::Absent, field),
                    Argument::Asset(value) => self.extract_asset_content(value, field),
                    Argument::Value(value) => {
                        self.extract_asset_content(&AssetValue::from(value.clone()), field)
                    }
                    Argument::Nodes(_) | Argument::NodeType(_) => {
                        tracing::error!(
                            value_type = "object",
                            value_class = "node",
                            "Value could not be extracted, it is not an asset"
                        );
                        Value::Null
                    }
                }
            }
            HelperMethod::AllowsCallOfMethod => {
                Value::Bool(self.allows_call_of_method(string_arg(args, 0, name)?))
            }
        };
        Ok(result)
    }
}

impl Default for IndexingHelper {
    fn default() -> Self {
        Self::new()
    }
}

fn arg<'s, 'a>(
    args: &'s [Argument<'a>],
    position: usize,
    method: &'static str,
) -> Result<&'s Argument<'a>, InvocationError> {
    args.get(position)
        .ok_or(InvocationError::MissingArgument { method, position })
}

fn string_arg<'s>(
    args: &'s [Argument<'_>],
    position: usize,
    method: &'static str,
) -> Result<&'s str, InvocationError> {
    match arg(args, position, method)? {
        Argument::Value(Value::String(s)) => Ok(s.as_str()),
        _ => Err(InvocationError::InvalidArgument {
            method,
            position,
            expected: "a string",
        }),
    }
}

/// Like [`string_arg`], but `null` reads as the empty string.
fn text_arg<'s>(
    args: &'s [Argument<'_>],
    position: usize,
    method: &'static str,
) -> Result<&'s str, InvocationError> {
    match arg(args, position, method)? {
        Argument::Null | Argument::Value(Value::Null) => Ok(""),
        _ => string_arg(args, position, method),
    }
}

fn node_args<'s, 'a>(
    argument: &'s Argument<'a>,
) -> Option<impl Iterator<Item = &'a dyn Node> + 's> {
    match argument {
        Argument::Nodes(nodes) => Some(nodes.iter().copied()),
        _ => None,
    }
}

fn buckets_to_value(buckets: Buckets) -> Value {
    Value::Object(
        buckets
            .into_iter()
            .map(|(bucket, text)| (bucket, Value::String(text)))
            .collect(),
    )
}
