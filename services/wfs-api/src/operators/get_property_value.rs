use std::sync::Arc;

use async_trait::async_trait;
use wfs_common::{ErrorSet, WfsError, WfsResult};
use wfs_protocol::{GetPropertyValueRequest, GetPropertyValueResponse, WfsOperation};

use super::Operation;
use crate::dao::GetPropertyValueDao;

/// GetPropertyValue is disabled: every request is rejected before dispatch.
pub struct GetPropertyValueOperator {
    dao: Arc<dyn GetPropertyValueDao>,
}

impl GetPropertyValueOperator {
    pub fn new(dao: Arc<dyn GetPropertyValueDao>) -> Self {
        Self { dao }
    }
}

#[async_trait]
impl Operation for GetPropertyValueOperator {
    type Request = GetPropertyValueRequest;
    type Response = GetPropertyValueResponse;

    fn check_parameters(&self, _request: &GetPropertyValueRequest, _errors: &mut ErrorSet) {}

    fn check(&self, _request: &GetPropertyValueRequest) -> WfsResult<()> {
        Err(WfsError::OperationNotSupported(
            WfsOperation::GetPropertyValue.name().to_string(),
        ))
    }

    async fn perform(
        &self,
        request: GetPropertyValueRequest,
    ) -> WfsResult<GetPropertyValueResponse> {
        self.dao.get_property_value(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::RequestOperator;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wfs_common::ExceptionCode;
    use wfs_protocol::WfsRequest;

    #[derive(Default)]
    struct CountingDao {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl GetPropertyValueDao for CountingDao {
        async fn get_property_value(
            &self,
            _request: &GetPropertyValueRequest,
        ) -> WfsResult<GetPropertyValueResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(GetPropertyValueResponse {
                service: "WFS".to_string(),
                version: "2.0.0".to_string(),
                values: vec![],
            })
        }
    }

    #[tokio::test]
    async fn test_always_unsupported_and_never_dispatched() {
        let dao = Arc::new(CountingDao::default());
        let operator = GetPropertyValueOperator::new(dao.clone());

        let requests = vec![
            GetPropertyValueRequest {
                service: "WFS".to_string(),
                version: "2.0.0".to_string(),
                value_reference: "om:result".to_string(),
                ..Default::default()
            },
            GetPropertyValueRequest::default(),
            GetPropertyValueRequest {
                service: "bogus".to_string(),
                version: "9".to_string(),
                ..Default::default()
            },
        ];

        for request in requests {
            let err = operator.receive(WfsRequest::from(request)).await.unwrap_err();
            assert_eq!(err.code(), ExceptionCode::OperationNotSupported);
        }
        assert_eq!(dao.calls.load(Ordering::SeqCst), 0);
    }
}
