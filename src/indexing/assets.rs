//! Asset text extraction
//!
//! Binary assets (documents, images with OCR text, ...) are turned into text by
//! an external [`AssetExtractor`]. This module only routes values to it and
//! picks the requested field from the result. Extraction never fails the
//! caller: every problem is logged and turns into `null`, so one broken asset
//! cannot abort indexing of the node that references it.

use crate::indexing::error::AssetExtractionError;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Field read from the extraction result when the caller names none
pub const DEFAULT_FIELD: &str = "content";

/// Binary or rich-media item stored in the content repository.
pub trait Asset: fmt::Debug + Send + Sync {
    fn identifier(&self) -> &str;

    /// Concrete type reported in extraction logs
    fn class_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Structured result of an extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetContent {
    pub content: String,
    pub title: String,
    pub name: String,
    pub author: String,
    pub keywords: String,
    pub date: String,
    pub content_type: String,
    pub content_length: u64,
    pub language: String,
}

/// Fields of [`AssetContent`] addressable from the expression layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetContentField {
    Content,
    Title,
    Name,
    Author,
    Keywords,
    Date,
    ContentType,
    ContentLength,
    Language,
}

impl AssetContentField {
    pub const ALL: [AssetContentField; 9] = [
        AssetContentField::Content,
        AssetContentField::Title,
        AssetContentField::Name,
        AssetContentField::Author,
        AssetContentField::Keywords,
        AssetContentField::Date,
        AssetContentField::ContentType,
        AssetContentField::ContentLength,
        AssetContentField::Language,
    ];

    /// Name used by the expression layer
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetContentField::Content => "content",
            AssetContentField::Title => "title",
            AssetContentField::Name => "name",
            AssetContentField::Author => "author",
            AssetContentField::Keywords => "keywords",
            AssetContentField::Date => "date",
            AssetContentField::ContentType => "contentType",
            AssetContentField::ContentLength => "contentLength",
            AssetContentField::Language => "language",
        }
    }

    pub fn read(&self, content: &AssetContent) -> Value {
        match self {
            AssetContentField::Content => Value::from(content.content.as_str()),
            AssetContentField::Title => Value::from(content.title.as_str()),
            AssetContentField::Name => Value::from(content.name.as_str()),
            AssetContentField::Author => Value::from(content.author.as_str()),
            AssetContentField::Keywords => Value::from(content.keywords.as_str()),
            AssetContentField::Date => Value::from(content.date.as_str()),
            AssetContentField::ContentType => Value::from(content.content_type.as_str()),
            AssetContentField::ContentLength => Value::from(content.content_length),
            AssetContentField::Language => Value::from(content.language.as_str()),
        }
    }
}

impl FromStr for AssetContentField {
    type Err = AssetExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssetContentField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| AssetExtractionError::UnknownField(s.to_string()))
    }
}

impl fmt::Display for AssetContentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// External service turning an asset into text.
pub trait AssetExtractor: Send + Sync {
    fn extract(&self, asset: &dyn Asset) -> Result<AssetContent, AssetExtractionError>;
}

/// Stand-in used until a real extractor is injected; every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredExtractor;

impl AssetExtractor for UnconfiguredExtractor {
    fn extract(&self, _asset: &dyn Asset) -> Result<AssetContent, AssetExtractionError> {
        Err(AssetExtractionError::NotConfigured)
    }
}

/// Value handed to [`extract_asset_content`] by the expression layer.
#[derive(Debug, Clone)]
pub enum AssetValue {
    Absent,
    Asset(Arc<dyn Asset>),
    List(Vec<AssetValue>),
    /// Anything else (strings, numbers, plain objects)
    Other(Value),
}

impl AssetValue {
    /// Values treated as "nothing to extract": absent, `false`, `0`, `""` and `"0"`.
    ///
    /// An empty list is not empty in this sense; it maps to an empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            AssetValue::Absent => true,
            AssetValue::Asset(_) | AssetValue::List(_) => false,
            AssetValue::Other(value) => match value {
                Value::Null => true,
                Value::Bool(b) => !b,
                Value::Number(n) => n.as_f64() == Some(0.0),
                Value::String(s) => s.is_empty() || s == "0",
                Value::Array(_) | Value::Object(_) => false,
            },
        }
    }

    /// Runtime type and class reported when a value cannot be extracted.
    fn describe(&self) -> (&'static str, &'static str) {
        match self {
            AssetValue::Absent => ("null", "-"),
            AssetValue::Asset(asset) => ("object", asset.class_name()),
            AssetValue::List(_) => ("array", "-"),
            AssetValue::Other(value) => match value {
                Value::Null => ("null", "-"),
                Value::Bool(_) => ("boolean", "-"),
                Value::Number(n) if n.is_f64() => ("double", "-"),
                Value::Number(_) => ("integer", "-"),
                Value::String(_) => ("string", "-"),
                Value::Array(_) => ("array", "-"),
                Value::Object(_) => ("object", "serde_json::Map"),
            },
        }
    }
}

impl From<Arc<dyn Asset>> for AssetValue {
    fn from(asset: Arc<dyn Asset>) -> Self {
        AssetValue::Asset(asset)
    }
}

impl From<Vec<AssetValue>> for AssetValue {
    fn from(values: Vec<AssetValue>) -> Self {
        AssetValue::List(values)
    }
}

impl From<Value> for AssetValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => AssetValue::Absent,
            Value::Array(items) => AssetValue::List(items.into_iter().map(Self::from).collect()),
            other => AssetValue::Other(other),
        }
    }
}

/// Extracts `field` from an asset, or from every asset of a (nested) list.
///
/// Lists keep their shape and order; each element that fails becomes `null`
/// while its siblings are still extracted. Failures are logged, never returned.
pub fn extract_asset_content(
    value: &AssetValue,
    field: &str,
    extractor: &dyn AssetExtractor,
) -> Value {
    if value.is_empty() {
        return Value::Null;
    }

    match value {
        AssetValue::List(values) => Value::Array(
            values
                .iter()
                .map(|value| extract_asset_content(value, field, extractor))
                .collect(),
        ),
        AssetValue::Asset(asset) => match extract_field(asset.as_ref(), field, extractor) {
            Ok(content) => content,
            Err(e) => {
                let (value_type, value_class) = value.describe();
                tracing::error!(
                    error = %e,
                    value_type,
                    value_class,
                    asset = asset.identifier(),
                    "Asset content could not be extracted"
                );
                Value::Null
            }
        },
        AssetValue::Absent | AssetValue::Other(_) => {
            let (value_type, value_class) = value.describe();
            tracing::error!(
                value_type,
                value_class,
                "Value could not be extracted, it is not an asset"
            );
            Value::Null
        }
    }
}

fn extract_field(
    asset: &dyn Asset,
    field: &str,
    extractor: &dyn AssetExtractor,
) -> Result<Value, AssetExtractionError> {
    let field: AssetContentField = field.parse()?;
    let content = extractor.extract(asset)?;
    Ok(field.read(&content))
}
