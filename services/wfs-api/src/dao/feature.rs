//! GetFeature backends.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use wfs_common::{params, WfsError, WfsResult};
use wfs_protocol::{
    AbstractFeature, FeatureCollection, GetFeatureRequest, GetFeatureResponse, Member,
    NumberMatched, WfsOperation,
};

use super::observation::ObservationDao;
use super::GetFeatureDao;
use crate::bridge::{BridgeError, ProtocolBridge};
use crate::capabilities_cache::CapabilityCache;

/// GetFeature answered from the observation archive.
pub struct BridgedFeatureDao {
    observations: Arc<dyn ObservationDao>,
    bridge: ProtocolBridge,
}

impl BridgedFeatureDao {
    pub fn new(observations: Arc<dyn ObservationDao>) -> Self {
        Self {
            observations,
            bridge: ProtocolBridge,
        }
    }
}

#[async_trait]
impl GetFeatureDao for BridgedFeatureDao {
    async fn get_features(&self, request: &GetFeatureRequest) -> WfsResult<GetFeatureResponse> {
        let operation = WfsOperation::GetFeature.name();

        let observation_request = self
            .bridge
            .to_observation_request(request)
            .map_err(|e| WfsError::processing_failed(operation, e))?;

        let result = self
            .observations
            .get_observation(&observation_request)
            .await
            .map_err(|e| WfsError::processing_failed(operation, e))?;

        let collection = self.bridge.to_feature_collection(result);
        debug!(
            members = collection.number_returned(),
            "GetFeature bridged to GetObservation"
        );
        Ok(GetFeatureResponse::new(collection))
    }
}

/// GetFeature answered from the service's known feature set.
///
/// Supports resource-id lookups and type-name selection. Features carry no
/// geometry here, so a bounding box cannot be applied.
pub struct NativeFeatureDao {
    cache: Arc<CapabilityCache>,
}

impl NativeFeatureDao {
    pub fn new(cache: Arc<CapabilityCache>) -> Self {
        Self { cache }
    }

    fn selected(request: &GetFeatureRequest, feature: &AbstractFeature) -> bool {
        if !request.resource_ids.is_empty() {
            return request.resource_ids.contains(&feature.identifier);
        }
        request.queries.is_empty()
            || request
                .queries
                .iter()
                .flat_map(|q| q.type_names.iter())
                .any(|name| name.matches(&feature.type_name))
    }
}

#[async_trait]
impl GetFeatureDao for NativeFeatureDao {
    async fn get_features(&self, request: &GetFeatureRequest) -> WfsResult<GetFeatureResponse> {
        let operation = WfsOperation::GetFeature.name();
        if request.bbox.is_some() {
            return Err(WfsError::processing_failed(
                operation,
                BridgeError::NotYetMapped {
                    field: params::BBOX,
                },
            ));
        }
        if request.queries.iter().any(|q| q.filter.is_some()) {
            return Err(WfsError::processing_failed(
                operation,
                BridgeError::NotYetMapped {
                    field: params::FILTER,
                },
            ));
        }

        let members: Vec<Member> = self
            .cache
            .get_features()
            .await
            .into_iter()
            .filter(|f| Self::selected(request, f))
            .map(Member::Feature)
            .collect();

        let matched = NumberMatched::Known(members.len() as u64);
        Ok(GetFeatureResponse::new(FeatureCollection::new(
            members, matched,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::observation::{InMemoryObservationStore, ObservationError};
    use test_utils::{observation_at, sampling_feature};
    use wfs_common::{Envelope, ExceptionCode, QualifiedName};
    use wfs_protocol::{GetObservationRequest, GetObservationResponse, Query, SamplingFeature};

    struct FailingArchive;

    #[async_trait]
    impl ObservationDao for FailingArchive {
        async fn get_observation(
            &self,
            _request: &GetObservationRequest,
        ) -> Result<GetObservationResponse, ObservationError> {
            Err(ObservationError::Unavailable("connection refused".to_string()))
        }

        async fn features_of_interest(&self) -> Result<Vec<SamplingFeature>, ObservationError> {
            Ok(Vec::new())
        }
    }

    fn bridged() -> BridgedFeatureDao {
        BridgedFeatureDao::new(Arc::new(InMemoryObservationStore::new(vec![
            observation_at("obs-1", "station-a", 1.0, 1.0),
            observation_at("obs-2", "station-a", 2.0, 2.0),
            observation_at("obs-3", "station-b", 3.0, 3.0),
            observation_at("obs-4", "station-c", 40.0, 40.0),
        ])))
    }

    #[tokio::test]
    async fn test_bridged_bbox_query() {
        let request = GetFeatureRequest::new("WFS", "2.0.0")
            .with_bbox(Envelope::new(0.0, 0.0, 10.0, 10.0));

        let response = bridged().get_features(&request).await.unwrap();
        let collection = response.collection;
        assert_eq!(collection.number_returned(), 3);
        assert_eq!(collection.number_matched(), NumberMatched::Unknown);
        assert!(collection
            .members()
            .iter()
            .all(|m| matches!(m, Member::Observation(_))));
    }

    #[tokio::test]
    async fn test_bridged_unmapped_is_processing_failure() {
        let request = GetFeatureRequest::new("WFS", "2.0.0").with_resource_id("obs-1");

        let err = bridged().get_features(&request).await.unwrap_err();
        assert_eq!(err.code(), ExceptionCode::OperationProcessingFailed);
        assert!(err.to_string().contains("resourceId"));
    }

    #[tokio::test]
    async fn test_bridged_backend_failure_keeps_cause() {
        let dao = BridgedFeatureDao::new(Arc::new(FailingArchive));
        let err = dao
            .get_features(&GetFeatureRequest::new("WFS", "2.0.0"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ExceptionCode::OperationProcessingFailed);
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_native_lookup_by_resource_id() {
        let cache = Arc::new(CapabilityCache::new());
        cache
            .set_features(vec![sampling_feature("station-a"), sampling_feature("station-b")])
            .await;
        let dao = NativeFeatureDao::new(cache);

        let request = GetFeatureRequest::new("WFS", "2.0.0").with_resource_id("station-b");
        let collection = dao.get_features(&request).await.unwrap().collection;
        assert_eq!(collection.number_returned(), 1);
        assert_eq!(collection.members()[0].id(), "station-b");
        assert_eq!(collection.number_matched(), NumberMatched::Known(1));
    }

    #[tokio::test]
    async fn test_native_type_name_selection() {
        let cache = Arc::new(CapabilityCache::new());
        cache.set_features(vec![sampling_feature("station-a")]).await;
        let dao = NativeFeatureDao::new(cache);

        let matching = GetFeatureRequest::new("WFS", "2.0.0").with_query(Query::new(vec![
            QualifiedName::local("SF_SpatialSamplingFeature"),
        ]));
        assert_eq!(
            dao.get_features(&matching).await.unwrap().collection.number_returned(),
            1
        );

        let other = GetFeatureRequest::new("WFS", "2.0.0")
            .with_query(Query::new(vec![QualifiedName::local("OM_Observation")]));
        assert_eq!(
            dao.get_features(&other).await.unwrap().collection.number_returned(),
            0
        );
    }

    #[tokio::test]
    async fn test_native_rejects_bbox() {
        let dao = NativeFeatureDao::new(Arc::new(CapabilityCache::new()));
        let request = GetFeatureRequest::new("WFS", "2.0.0")
            .with_bbox(Envelope::new(0.0, 0.0, 1.0, 1.0));
        let err = dao.get_features(&request).await.unwrap_err();
        assert_eq!(err.code(), ExceptionCode::OperationProcessingFailed);
    }
}
