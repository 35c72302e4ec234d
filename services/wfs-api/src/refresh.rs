//! Periodic rebuild of the capability cache.
//!
//! The capabilities document and the known feature set are both derived
//! from the observation archive: every distinct feature of interest becomes
//! a known sampling feature, and their locations bound the advertised
//! feature types.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use wfs_common::namespaces::{SAMPLING_FEATURE_TYPE, SAMS_20};
use wfs_common::protocol::{WFS_SERVICE, WFS_VERSION};
use wfs_common::{Envelope, QualifiedName};
use wfs_protocol::{
    AbstractFeature, Capabilities, OperationMetadata, SamplingFeature, ServiceIdentification,
};

use crate::capabilities_cache::CapabilityCache;
use crate::config::WfsConfig;
use crate::dao::{ObservationDao, ObservationError};
use crate::metrics::MetricsCollector;

pub struct CapabilitiesRefresher {
    cache: Arc<CapabilityCache>,
    observations: Arc<dyn ObservationDao>,
    config: WfsConfig,
    operations: Vec<String>,
    metrics: Option<Arc<MetricsCollector>>,
}

impl CapabilitiesRefresher {
    pub fn new(
        cache: Arc<CapabilityCache>,
        observations: Arc<dyn ObservationDao>,
        config: WfsConfig,
        operations: Vec<String>,
    ) -> Self {
        Self {
            cache,
            observations,
            config,
            operations,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Rebuild both cache entries. Returns the number of known features.
    pub async fn refresh(&self) -> Result<usize, ObservationError> {
        let start = Instant::now();
        let result = self.rebuild().await;

        match &result {
            Ok(count) => info!(
                features = count,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Capabilities refreshed"
            ),
            Err(e) => warn!(error = %e, "Capabilities refresh failed"),
        }
        if let Some(metrics) = &self.metrics {
            metrics.record_refresh(result.is_ok(), result.as_ref().map_or(0, |c| *c));
        }
        result
    }

    async fn rebuild(&self) -> Result<usize, ObservationError> {
        let sampling_features = self.observations.features_of_interest().await?;
        let extent = extent_of(&sampling_features);
        let features: Vec<AbstractFeature> = sampling_features.iter().map(known_feature).collect();
        let count = features.len();

        self.cache.set_features(features).await;
        self.cache.set_capabilities(self.build_capabilities(extent)).await;
        Ok(count)
    }

    fn build_capabilities(&self, extent: Option<Envelope>) -> Capabilities {
        let service = &self.config.service;
        let feature_types = self
            .config
            .feature_types
            .iter()
            .cloned()
            .map(|mut ft| {
                if ft.wgs84_bounding_box.is_none() {
                    ft.wgs84_bounding_box = extent.clone();
                }
                ft
            })
            .collect();

        Capabilities {
            version: WFS_VERSION.to_string(),
            update_sequence: Utc::now(),
            service_identification: ServiceIdentification {
                title: service.title.clone(),
                abstract_: service.abstract_.clone(),
                service_type: WFS_SERVICE.to_string(),
                service_type_versions: vec![WFS_VERSION.to_string()],
            },
            service_provider: service.provider.clone(),
            operations: self
                .operations
                .iter()
                .map(|name| OperationMetadata { name: name.clone() })
                .collect(),
            feature_types,
        }
    }

    /// Refresh on a fixed interval until the task is aborted.
    ///
    /// The first refresh happens one `period` after spawning; run
    /// [`refresh`](Self::refresh) first for an immediate one.
    pub fn spawn(self: Arc<Self>, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await;
            loop {
                interval.tick().await;
                // Failures are logged; the previous generation stays cached.
                let _ = self.refresh().await;
            }
        })
    }
}

fn known_feature(feature: &SamplingFeature) -> AbstractFeature {
    let mut known = AbstractFeature::new(
        feature.identifier.clone(),
        QualifiedName::new(SAMS_20, "sams", SAMPLING_FEATURE_TYPE),
    )
    .with_property("shape", format!("{} {}", feature.shape.x, feature.shape.y));
    if let Some(name) = &feature.name {
        known = known.with_name(name.clone());
    }
    known
}

fn extent_of(features: &[SamplingFeature]) -> Option<Envelope> {
    features
        .iter()
        .map(|f| Envelope::new(f.shape.x, f.shape.y, f.shape.x, f.shape.y))
        .reduce(|acc, e| acc.union(&e))
}
