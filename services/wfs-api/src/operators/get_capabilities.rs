use std::sync::Arc;

use async_trait::async_trait;
use wfs_common::{ErrorSet, WfsResult};
use wfs_protocol::{GetCapabilitiesRequest, GetCapabilitiesResponse};

use super::Operation;
use crate::dao::GetCapabilitiesDao;

/// GetCapabilities. The service and version parameters are optional.
pub struct GetCapabilitiesOperator {
    dao: Arc<dyn GetCapabilitiesDao>,
}

impl GetCapabilitiesOperator {
    pub fn new(dao: Arc<dyn GetCapabilitiesDao>) -> Self {
        Self { dao }
    }
}

#[async_trait]
impl Operation for GetCapabilitiesOperator {
    type Request = GetCapabilitiesRequest;
    type Response = GetCapabilitiesResponse;

    fn check_parameters(&self, _request: &GetCapabilitiesRequest, _errors: &mut ErrorSet) {}

    async fn perform(&self, request: GetCapabilitiesRequest) -> WfsResult<GetCapabilitiesResponse> {
        self.dao.get_capabilities(&request).await
    }
}
