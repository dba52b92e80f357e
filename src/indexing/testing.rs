//! Shared fixtures for unit tests: in-memory assets, an extractor backed by a
//! map, and a log capture for asserting on `tracing` events.

use crate::indexing::assets::{Asset, AssetContent, AssetExtractor};
use crate::indexing::error::AssetExtractionError;
use std::collections::HashMap;
use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

#[derive(Debug)]
pub struct TestAsset {
    id: String,
}

impl TestAsset {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

impl Asset for TestAsset {
    fn identifier(&self) -> &str {
        &self.id
    }
}

/// Extractor answering from a fixed table; unknown assets fail.
#[derive(Default)]
pub struct MapExtractor {
    results: HashMap<String, Result<AssetContent, AssetExtractionError>>,
}

impl MapExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: &str, content: AssetContent) -> Self {
        self.results.insert(id.to_string(), Ok(content));
        self
    }

    pub fn with_content(self, id: &str, text: &str) -> Self {
        self.with(
            id,
            AssetContent {
                content: text.to_string(),
                ..AssetContent::default()
            },
        )
    }

    pub fn with_failure(mut self, id: &str, message: &str) -> Self {
        self.results.insert(
            id.to_string(),
            Err(AssetExtractionError::Extractor(message.to_string())),
        );
        self
    }
}

impl AssetExtractor for MapExtractor {
    fn extract(&self, asset: &dyn Asset) -> Result<AssetContent, AssetExtractionError> {
        self.results
            .get(asset.identifier())
            .cloned()
            .unwrap_or_else(|| {
                Err(AssetExtractionError::Extractor(format!(
                    "no fixture for {}",
                    asset.identifier()
                )))
            })
    }
}

#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    /// `name=value` pairs, space separated, message included
    pub fields: String,
}

#[derive(Clone, Default)]
struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldWriter(String::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            fields: visitor.0,
        });
    }
}

struct FieldWriter(String);

impl Visit for FieldWriter {
    fn record_str(&mut self, field: &Field, value: &str) {
        let _ = write!(self.0, "{}={} ", field.name(), value);
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let _ = write!(self.0, "{}={:?} ", field.name(), value);
    }
}

/// Runs `f` with a thread-local subscriber and returns the events it emitted.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<CapturedEvent>) {
    let layer = CaptureLayer::default();
    let events = Arc::clone(&layer.events);
    let subscriber = tracing_subscriber::registry().with(layer);

    let result = tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    (result, captured)
}
