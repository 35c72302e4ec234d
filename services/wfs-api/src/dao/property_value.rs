//! GetPropertyValue is disabled in this deployment.

use async_trait::async_trait;
use wfs_common::{WfsError, WfsResult};
use wfs_protocol::{GetPropertyValueRequest, GetPropertyValueResponse, WfsOperation};

use super::GetPropertyValueDao;

#[derive(Debug, Default)]
pub struct UnsupportedPropertyValueDao;

#[async_trait]
impl GetPropertyValueDao for UnsupportedPropertyValueDao {
    async fn get_property_value(
        &self,
        _request: &GetPropertyValueRequest,
    ) -> WfsResult<GetPropertyValueResponse> {
        Err(WfsError::OperationNotSupported(
            WfsOperation::GetPropertyValue.name().to_string(),
        ))
    }
}
