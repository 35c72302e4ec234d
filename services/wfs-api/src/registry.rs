//! Lookup table from operation key to request operator.
//!
//! The registry is filled through [`RegistryBuilder`] at startup and is
//! read-only afterwards, so it is shared behind an `Arc` without locking.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info, warn};
use wfs_common::{WfsError, WfsResult};
use wfs_protocol::{OperationKey, WfsRequest, WfsResponse};

use crate::dao::Handlers;
use crate::metrics::MetricsCollector;
use crate::operators::{
    DescribeFeatureTypeOperator, DescribeStoredQueriesOperator, GetCapabilitiesOperator,
    GetFeatureOperator, GetPropertyValueOperator, ListStoredQueriesOperator, RequestOperator,
};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Operator already registered for {0}")]
    Duplicate(OperationKey),
}

#[derive(Default)]
pub struct RegistryBuilder {
    operators: HashMap<OperationKey, Arc<dyn RequestOperator>>,
}

impl RegistryBuilder {
    pub fn register<O>(mut self, operator: O) -> Result<Self, RegistryError>
    where
        O: RequestOperator + 'static,
    {
        let key = operator.key();
        if self.operators.contains_key(&key) {
            return Err(RegistryError::Duplicate(key));
        }
        debug!(key = %key, "Registered operator");
        self.operators.insert(key, Arc::new(operator));
        Ok(self)
    }

    pub fn build(self) -> OperatorRegistry {
        OperatorRegistry {
            operators: self.operators,
            metrics: None,
        }
    }
}

pub struct OperatorRegistry {
    operators: HashMap<OperationKey, Arc<dyn RequestOperator>>,
    metrics: Option<Arc<MetricsCollector>>,
}

impl OperatorRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registry with the six WFS 2.0.0 operators wired to `handlers`.
    pub fn with_default_operators(handlers: Handlers) -> Result<Self, RegistryError> {
        let registry = Self::builder()
            .register(GetCapabilitiesOperator::new(handlers.capabilities))?
            .register(DescribeFeatureTypeOperator::new(handlers.describe_feature_type))?
            .register(GetFeatureOperator::new(handlers.get_feature))?
            .register(GetPropertyValueOperator::new(handlers.get_property_value))?
            .register(ListStoredQueriesOperator::new(handlers.list_stored_queries))?
            .register(DescribeStoredQueriesOperator::new(handlers.describe_stored_queries))?
            .build();
        info!(operators = registry.len(), "Operator registry ready");
        Ok(registry)
    }

    /// Record request outcomes in `metrics`.
    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Find the operator for a (service, version, operation) triple.
    pub fn lookup(
        &self,
        service: &str,
        version: &str,
        operation: &str,
    ) -> WfsResult<Arc<dyn RequestOperator>> {
        self.operators
            .get(&OperationKey::new(service, version, operation))
            .cloned()
            .ok_or_else(|| WfsError::OperationNotSupported(operation.to_string()))
    }

    /// Validate and dispatch one request.
    pub async fn process(&self, request: WfsRequest) -> WfsResult<WfsResponse> {
        let key = request.key();
        let operation = request.operation();
        let start = Instant::now();

        let result = match self.operators.get(&key) {
            Some(operator) => operator.receive(request).await,
            None => Err(WfsError::OperationNotSupported(key.operation.clone())),
        };

        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        match &result {
            Ok(_) => debug!(key = %key, elapsed_ms, "Request completed"),
            Err(e) if e.is_validation() => {
                debug!(key = %key, error = %e, "Request failed validation")
            }
            Err(e) => warn!(key = %key, code = %e.code(), error = %e, "Request failed"),
        }
        if let Some(metrics) = &self.metrics {
            metrics.record_request(operation, &result, elapsed_ms);
        }

        result
    }

    /// Names of the registered operations, sorted.
    pub fn operation_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .operators
            .keys()
            .map(|key| key.operation.clone())
            .collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}
