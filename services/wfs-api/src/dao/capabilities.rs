//! GetCapabilities served from the capability cache.

use std::sync::Arc;

use async_trait::async_trait;
use wfs_common::WfsResult;
use wfs_protocol::{GetCapabilitiesRequest, GetCapabilitiesResponse};

use super::GetCapabilitiesDao;
use crate::capabilities_cache::CapabilityCache;

pub struct CachedCapabilitiesDao {
    cache: Arc<CapabilityCache>,
}

impl CachedCapabilitiesDao {
    pub fn new(cache: Arc<CapabilityCache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl GetCapabilitiesDao for CachedCapabilitiesDao {
    async fn get_capabilities(
        &self,
        _request: &GetCapabilitiesRequest,
    ) -> WfsResult<GetCapabilitiesResponse> {
        let capabilities = self.cache.get_capabilities().await?;
        Ok(GetCapabilitiesResponse::new(capabilities))
    }
}
