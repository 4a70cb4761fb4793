//! Application state for the outline server

use parking_lot::RwLock;
use std::sync::Arc;

use crate::config::OutlineConfig;
use crate::error::Result;
use crate::extraction::OutlineExtractor;
use crate::processing::BatchProcessor;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: OutlineConfig,
    /// Batch runner wrapping the extractor
    batch: BatchProcessor,
    /// Ready state
    ready: RwLock<bool>,
}

impl AppState {
    /// Create new application state.
    ///
    /// Loads the process-wide sentence model; failure here means the service
    /// cannot serve any request.
    pub fn new(config: OutlineConfig) -> Result<Self> {
        tracing::info!("Initializing outline application state...");

        let extractor = OutlineExtractor::from_config(&config)?;
        tracing::info!(
            "Outline extractor initialized (model: {})",
            config.sentence_model.model
        );

        Ok(Self::with_extractor(config, extractor))
    }

    /// Create state around a prepared extractor. The state reports not ready
    /// until the server has bound its listener.
    pub fn with_extractor(config: OutlineConfig, extractor: OutlineExtractor) -> Self {
        let batch = BatchProcessor::new(Arc::new(extractor), &config.processing);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                batch,
                ready: RwLock::new(false),
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &OutlineConfig {
        &self.inner.config
    }

    /// Get the batch processor
    pub fn batch(&self) -> &BatchProcessor {
        &self.inner.batch
    }

    /// Check if the server is ready
    pub fn is_ready(&self) -> bool {
        *self.inner.ready.read()
    }

    /// Set ready state
    pub fn set_ready(&self, ready: bool) {
        *self.inner.ready.write() = ready;
    }
}
