//! Application state and startup wiring.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::capabilities_cache::CapabilityCache;
use crate::config::{FeatureBackend, WfsConfig};
use crate::dao::{
    BridgedFeatureDao, CachedCapabilitiesDao, EmptyStoredQueryDao, GetFeatureDao, Handlers,
    InMemoryObservationStore, NativeFeatureDao, ObservationDao, StaticSchemaDao,
    UnsupportedPropertyValueDao,
};
use crate::metrics::MetricsCollector;
use crate::refresh::CapabilitiesRefresher;
use crate::registry::OperatorRegistry;

/// Shared application state.
pub struct AppState {
    pub config: WfsConfig,
    pub cache: Arc<CapabilityCache>,
    pub registry: Arc<OperatorRegistry>,
    pub refresher: Arc<CapabilitiesRefresher>,
    pub metrics: Arc<MetricsCollector>,
}

impl AppState {
    /// Build the state, loading the observation archive named in `config`.
    pub fn new(config: WfsConfig) -> Result<Self> {
        let store = match &config.observations_file {
            Some(path) => InMemoryObservationStore::load_json(path)
                .with_context(|| format!("Failed to load observations from {:?}", path))?,
            None => {
                tracing::warn!("No observations file configured, archive is empty");
                InMemoryObservationStore::default()
            }
        };
        Self::with_observations(config, Arc::new(store))
    }

    /// Build the state over an existing observation backend.
    pub fn with_observations(
        config: WfsConfig,
        observations: Arc<dyn ObservationDao>,
    ) -> Result<Self> {
        let cache = Arc::new(CapabilityCache::new());
        let metrics = Arc::new(MetricsCollector::new());

        let handlers = build_handlers(config.backend, cache.clone(), observations.clone());
        let registry = OperatorRegistry::with_default_operators(handlers)?
            .with_metrics(metrics.clone());

        let refresher = CapabilitiesRefresher::new(
            cache.clone(),
            observations,
            config.clone(),
            registry.operation_names(),
        )
        .with_metrics(metrics.clone());

        info!(backend = ?config.backend, "Application state initialized");

        Ok(Self {
            config,
            cache,
            registry: Arc::new(registry),
            refresher: Arc::new(refresher),
            metrics,
        })
    }
}

/// Pick the backend of every operation.
pub fn build_handlers(
    backend: FeatureBackend,
    cache: Arc<CapabilityCache>,
    observations: Arc<dyn ObservationDao>,
) -> Handlers {
    let get_feature: Arc<dyn GetFeatureDao> = match backend {
        FeatureBackend::Observation => Arc::new(BridgedFeatureDao::new(observations)),
        FeatureBackend::Features => Arc::new(NativeFeatureDao::new(cache.clone())),
    };
    let stored_queries = Arc::new(EmptyStoredQueryDao);

    Handlers {
        capabilities: Arc::new(CachedCapabilitiesDao::new(cache)),
        describe_feature_type: Arc::new(StaticSchemaDao::new()),
        get_feature,
        get_property_value: Arc::new(UnsupportedPropertyValueDao),
        list_stored_queries: stored_queries.clone(),
        describe_stored_queries: stored_queries,
    }
}
