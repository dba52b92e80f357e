//! Error types for the indexing helpers

use std::fmt;

/// Errors raised while turning an asset into indexable text
#[derive(Debug, Clone, PartialEq)]
pub enum AssetExtractionError {
    /// The extraction collaborator failed for this asset
    Extractor(String),
    /// The requested field is not part of the extracted content
    UnknownField(String),
    /// No extractor was injected into the helper
    NotConfigured,
}

impl fmt::Display for AssetExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetExtractionError::Extractor(msg) => write!(f, "Asset extraction failed: {}", msg),
            AssetExtractionError::UnknownField(field) => {
                write!(f, "Unknown asset content field: {}", field)
            }
            AssetExtractionError::NotConfigured => write!(f, "No asset extractor configured"),
        }
    }
}

impl std::error::Error for AssetExtractionError {}

/// Errors raised by by-name invocation from the expression runtime
#[derive(Debug, Clone, PartialEq)]
pub enum InvocationError {
    /// The name is not on the helper's allow-list
    UnknownMethod(String),
    /// A required argument was not supplied
    MissingArgument {
        method: &'static str,
        position: usize,
    },
    /// An argument had a shape the method cannot accept
    InvalidArgument {
        method: &'static str,
        position: usize,
        expected: &'static str,
    },
}

impl fmt::Display for InvocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvocationError::UnknownMethod(name) => {
                write!(f, "Method '{}' is not callable on the indexing helper", name)
            }
            InvocationError::MissingArgument { method, position } => {
                write!(f, "{}() is missing argument {}", method, position + 1)
            }
            InvocationError::InvalidArgument {
                method,
                position,
                expected,
            } => write!(
                f,
                "{}() expects {} as argument {}",
                method,
                expected,
                position + 1
            ),
        }
    }
}

impl std::error::Error for InvocationError {}
