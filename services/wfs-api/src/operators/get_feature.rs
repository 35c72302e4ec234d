use std::sync::Arc;

use async_trait::async_trait;
use wfs_common::namespaces::{OBSERVATION_TYPE, OM_20, SAMPLING_FEATURE_TYPE, SAMS_20};
use wfs_common::{ErrorSet, QualifiedName, WfsResult};
use wfs_protocol::{GetFeatureRequest, GetFeatureResponse};

use super::checks::{check_bbox, check_service, check_type_names, check_version};
use super::Operation;
use crate::dao::GetFeatureDao;

pub struct GetFeatureOperator {
    dao: Arc<dyn GetFeatureDao>,
    accepted_types: Vec<QualifiedName>,
}

impl GetFeatureOperator {
    pub fn new(dao: Arc<dyn GetFeatureDao>) -> Self {
        Self {
            dao,
            accepted_types: vec![
                QualifiedName::new(OM_20, "om", OBSERVATION_TYPE),
                QualifiedName::new(SAMS_20, "sams", SAMPLING_FEATURE_TYPE),
            ],
        }
    }
}

#[async_trait]
impl Operation for GetFeatureOperator {
    type Request = GetFeatureRequest;
    type Response = GetFeatureResponse;

    fn check_parameters(&self, request: &GetFeatureRequest, errors: &mut ErrorSet) {
        errors.check(check_service(&request.service));
        errors.check(check_version(&request.version));
        errors.check(check_bbox(request.bbox.as_ref()));
        if request.is_query_based() {
            check_type_names(&request.queries, &self.accepted_types, errors);
        }
    }

    async fn perform(&self, request: GetFeatureRequest) -> WfsResult<GetFeatureResponse> {
        self.dao.get_features(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::RequestOperator;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wfs_common::{ExceptionCode, WfsError};
    use wfs_protocol::{FeatureCollection, NumberMatched, Query, WfsRequest};

    #[derive(Default)]
    struct CountingDao {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl GetFeatureDao for CountingDao {
        async fn get_features(&self, _request: &GetFeatureRequest) -> WfsResult<GetFeatureResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(GetFeatureResponse::new(FeatureCollection::empty()))
        }
    }

    fn query(local: &str) -> Query {
        Query::new(vec![QualifiedName::local(local)])
    }

    #[tokio::test]
    async fn test_invalid_service_and_type_name_both_reported() {
        let dao = Arc::new(CountingDao::default());
        let operator = GetFeatureOperator::new(dao.clone());

        let request = GetFeatureRequest::new("WMS", "2.0.0").with_query(query("Road"));
        let err = operator.receive(WfsRequest::from(request)).await.unwrap_err();

        let set = match err {
            WfsError::Composite(set) => set,
            other => panic!("expected composite, got {:?}", other),
        };
        let codes: Vec<_> = set.iter().map(|e| e.code()).collect();
        assert_eq!(
            codes,
            vec![
                ExceptionCode::InvalidServiceParameter,
                ExceptionCode::InvalidParameterValue,
            ]
        );
        assert_eq!(dao.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_local_name_fallback_accepted() {
        let dao = Arc::new(CountingDao::default());
        let operator = GetFeatureOperator::new(dao.clone());

        let request = GetFeatureRequest::new("WFS", "2.0.0")
            .with_query(query("OM_Observation"))
            .with_query(Query::new(vec![QualifiedName::new(
                "urn:other",
                "x",
                "SF_SpatialSamplingFeature",
            )]));
        let response = operator.receive(request.into()).await.unwrap();

        assert_eq!(dao.calls.load(Ordering::SeqCst), 1);
        match response {
            wfs_protocol::WfsResponse::GetFeature(r) => {
                assert_eq!(r.collection.number_matched(), NumberMatched::Known(0))
            }
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_type_names_ignored_for_resource_id_requests() {
        let operator = GetFeatureOperator::new(Arc::new(CountingDao::default()));
        let request = GetFeatureRequest::new("WFS", "2.0.0")
            .with_resource_id("station-a")
            .with_query(query("Road"));
        assert!(operator.validate(&request.into()).is_ok());
    }

    #[test]
    fn test_single_failure_is_still_composite() {
        let operator = GetFeatureOperator::new(Arc::new(CountingDao::default()));
        let request = GetFeatureRequest::new("", "2.0.0");
        match operator.check(&request) {
            Err(WfsError::Composite(set)) => assert_eq!(set.len(), 1),
            other => panic!("expected composite, got {:?}", other),
        }
    }
}
