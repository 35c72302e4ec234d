//! Backend capability interfaces, one per operation.
//!
//! Operators depend only on these traits. Which concrete variant backs each
//! one is decided at startup and handed to the registry as a [`Handlers`]
//! bundle.

pub mod capabilities;
pub mod feature;
pub mod observation;
pub mod property_value;
pub mod schema;
pub mod stored_queries;

use std::sync::Arc;

use async_trait::async_trait;
use wfs_common::WfsResult;
use wfs_protocol::{
    DescribeFeatureTypeRequest, DescribeFeatureTypeResponse, DescribeStoredQueriesRequest,
    DescribeStoredQueriesResponse, GetCapabilitiesRequest, GetCapabilitiesResponse,
    GetFeatureRequest, GetFeatureResponse, GetPropertyValueRequest, GetPropertyValueResponse,
    ListStoredQueriesRequest, ListStoredQueriesResponse,
};

pub use capabilities::CachedCapabilitiesDao;
pub use feature::{BridgedFeatureDao, NativeFeatureDao};
pub use observation::{InMemoryObservationStore, ObservationDao, ObservationError};
pub use property_value::UnsupportedPropertyValueDao;
pub use schema::StaticSchemaDao;
pub use stored_queries::EmptyStoredQueryDao;

#[async_trait]
pub trait GetCapabilitiesDao: Send + Sync {
    async fn get_capabilities(
        &self,
        request: &GetCapabilitiesRequest,
    ) -> WfsResult<GetCapabilitiesResponse>;
}

#[async_trait]
pub trait DescribeFeatureTypeDao: Send + Sync {
    async fn describe_feature_type(
        &self,
        request: &DescribeFeatureTypeRequest,
    ) -> WfsResult<DescribeFeatureTypeResponse>;
}

#[async_trait]
pub trait GetFeatureDao: Send + Sync {
    async fn get_features(&self, request: &GetFeatureRequest) -> WfsResult<GetFeatureResponse>;
}

#[async_trait]
pub trait GetPropertyValueDao: Send + Sync {
    async fn get_property_value(
        &self,
        request: &GetPropertyValueRequest,
    ) -> WfsResult<GetPropertyValueResponse>;
}

#[async_trait]
pub trait ListStoredQueriesDao: Send + Sync {
    async fn list_stored_queries(
        &self,
        request: &ListStoredQueriesRequest,
    ) -> WfsResult<ListStoredQueriesResponse>;
}

#[async_trait]
pub trait DescribeStoredQueriesDao: Send + Sync {
    async fn describe_stored_queries(
        &self,
        request: &DescribeStoredQueriesRequest,
    ) -> WfsResult<DescribeStoredQueriesResponse>;
}

/// The backend for every operation, selected at startup.
#[derive(Clone)]
pub struct Handlers {
    pub capabilities: Arc<dyn GetCapabilitiesDao>,
    pub describe_feature_type: Arc<dyn DescribeFeatureTypeDao>,
    pub get_feature: Arc<dyn GetFeatureDao>,
    pub get_property_value: Arc<dyn GetPropertyValueDao>,
    pub list_stored_queries: Arc<dyn ListStoredQueriesDao>,
    pub describe_stored_queries: Arc<dyn DescribeStoredQueriesDao>,
}
