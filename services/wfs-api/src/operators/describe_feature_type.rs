use std::sync::Arc;

use async_trait::async_trait;
use wfs_common::{ErrorSet, WfsResult};
use wfs_protocol::{DescribeFeatureTypeRequest, DescribeFeatureTypeResponse};

use super::checks::{check_service, check_version};
use super::Operation;
use crate::dao::DescribeFeatureTypeDao;

pub struct DescribeFeatureTypeOperator {
    dao: Arc<dyn DescribeFeatureTypeDao>,
}

impl DescribeFeatureTypeOperator {
    pub fn new(dao: Arc<dyn DescribeFeatureTypeDao>) -> Self {
        Self { dao }
    }
}

#[async_trait]
impl Operation for DescribeFeatureTypeOperator {
    type Request = DescribeFeatureTypeRequest;
    type Response = DescribeFeatureTypeResponse;

    fn check_parameters(&self, request: &DescribeFeatureTypeRequest, errors: &mut ErrorSet) {
        errors.check(check_service(&request.service));
        errors.check(check_version(&request.version));
    }

    async fn perform(
        &self,
        request: DescribeFeatureTypeRequest,
    ) -> WfsResult<DescribeFeatureTypeResponse> {
        self.dao.describe_feature_type(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::StaticSchemaDao;
    use crate::operators::RequestOperator;
    use wfs_common::{ExceptionCode, QualifiedName, WfsError};
    use wfs_protocol::WfsRequest;

    fn operator() -> DescribeFeatureTypeOperator {
        DescribeFeatureTypeOperator::new(Arc::new(StaticSchemaDao::new()))
    }

    fn request(service: &str, version: &str, names: Vec<QualifiedName>) -> WfsRequest {
        DescribeFeatureTypeRequest {
            service: service.to_string(),
            version: version.to_string(),
            type_names: names,
        }
        .into()
    }

    #[tokio::test]
    async fn test_missing_service_and_version_both_reported() {
        let err = operator().receive(request("", "", vec![])).await.unwrap_err();
        match err {
            WfsError::Composite(set) => {
                let codes: Vec<_> = set.iter().map(|e| e.code()).collect();
                assert_eq!(
                    codes,
                    vec![
                        ExceptionCode::MissingServiceParameter,
                        ExceptionCode::MissingParameterValue,
                    ]
                );
            }
            other => panic!("expected composite, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_known_type_resolved() {
        let response = operator()
            .receive(request(
                "WFS",
                "2.0.0",
                vec![QualifiedName::local("OM_Observation")],
            ))
            .await
            .unwrap();
        assert_eq!(response.operation().name(), "DescribeFeatureType");
    }

    #[tokio::test]
    async fn test_unknown_type_rejected_at_dispatch() {
        let err = operator()
            .receive(request("WFS", "2.0.0", vec![QualifiedName::local("Road")]))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ExceptionCode::InvalidParameterValue);
        assert_eq!(err.locator(), Some("typeNames"));
    }
}
