//! Access to the observation archive that backs the feature store.

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};
use wfs_protocol::{GetObservationRequest, GetObservationResponse, Observation, SamplingFeature};

#[derive(Debug, Error)]
pub enum ObservationError {
    #[error("Observation archive unavailable: {0}")]
    Unavailable(String),

    #[error("Unsupported observation query: {0}")]
    UnsupportedQuery(String),

    #[error("Failed to read observation archive: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid observation archive data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The observation query backend.
///
/// `get_observation` may block on I/O; no timeout is applied by callers.
#[async_trait]
pub trait ObservationDao: Send + Sync {
    async fn get_observation(
        &self,
        request: &GetObservationRequest,
    ) -> Result<GetObservationResponse, ObservationError>;

    /// Distinct features of interest in the archive.
    async fn features_of_interest(&self) -> Result<Vec<SamplingFeature>, ObservationError>;
}

/// An observation archive held in memory.
#[derive(Debug, Default)]
pub struct InMemoryObservationStore {
    observations: Vec<Observation>,
}

impl InMemoryObservationStore {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    /// Load a JSON array of observations.
    pub fn load_json(path: &Path) -> Result<Self, ObservationError> {
        let content = std::fs::read_to_string(path)?;
        let observations: Vec<Observation> = serde_json::from_str(&content)?;
        info!(
            path = %path.display(),
            count = observations.len(),
            "Loaded observation archive"
        );
        Ok(Self::new(observations))
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    fn matches(request: &GetObservationRequest, observation: &Observation) -> bool {
        let listed = |filter: &[String], value: &str| {
            filter.is_empty() || filter.iter().any(|f| f == value)
        };

        if !listed(&request.procedures, &observation.procedure)
            || !listed(&request.observed_properties, &observation.observed_property)
            || !listed(
                &request.features_of_interest,
                &observation.feature_of_interest.identifier,
            )
        {
            return false;
        }

        match &request.spatial_filter {
            Some(filter) => {
                let shape = observation.feature_of_interest.shape;
                filter.envelope.contains_point(shape.x, shape.y)
            }
            None => true,
        }
    }
}

#[async_trait]
impl ObservationDao for InMemoryObservationStore {
    async fn get_observation(
        &self,
        request: &GetObservationRequest,
    ) -> Result<GetObservationResponse, ObservationError> {
        if !request.offerings.is_empty() {
            return Err(ObservationError::UnsupportedQuery(
                "offering filters are not supported by the in-memory archive".to_string(),
            ));
        }

        let observations: Vec<Observation> = self
            .observations
            .iter()
            .filter(|o| Self::matches(request, o))
            .cloned()
            .collect();

        debug!(
            matched = observations.len(),
            total = self.observations.len(),
            "GetObservation evaluated"
        );
        Ok(GetObservationResponse { observations })
    }

    async fn features_of_interest(&self) -> Result<Vec<SamplingFeature>, ObservationError> {
        let mut features = BTreeMap::new();
        for observation in &self.observations {
            let foi = &observation.feature_of_interest;
            features
                .entry(foi.identifier.clone())
                .or_insert_with(|| foi.clone());
        }
        Ok(features.into_values().collect())
    }
}
