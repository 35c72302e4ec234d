//! Request operators: validate a request, then hand it to its backend.
//!
//! Each operation implements [`Operation`] against its own request type.
//! The blanket [`RequestOperator`] impl adapts it to the untyped
//! `WfsRequest`/`WfsResponse` surface the registry works with.

pub mod checks;
pub mod describe_feature_type;
pub mod get_capabilities;
pub mod get_feature;
pub mod get_property_value;
pub mod stored_queries;

use async_trait::async_trait;
use tracing::debug;
use wfs_common::{ErrorSet, WfsResult};
use wfs_protocol::{OperationKey, TypedRequest, WfsRequest, WfsResponse};

pub use describe_feature_type::DescribeFeatureTypeOperator;
pub use get_capabilities::GetCapabilitiesOperator;
pub use get_feature::GetFeatureOperator;
pub use get_property_value::GetPropertyValueOperator;
pub use stored_queries::{DescribeStoredQueriesOperator, ListStoredQueriesOperator};

/// One protocol operation.
#[async_trait]
pub trait Operation: Send + Sync + 'static {
    type Request: TypedRequest;
    type Response: Into<WfsResponse> + Send;

    /// Run every parameter check, recording each failure.
    ///
    /// Checks must not stop at the first failure.
    fn check_parameters(&self, request: &Self::Request, errors: &mut ErrorSet);

    /// Validate a request; any recorded failure yields a composite error.
    fn check(&self, request: &Self::Request) -> WfsResult<()> {
        let mut errors = ErrorSet::new();
        self.check_parameters(request, &mut errors);
        errors.into_result()
    }

    /// Produce the response. Only called for requests that passed `check`.
    async fn perform(&self, request: Self::Request) -> WfsResult<Self::Response>;
}

/// Object-safe validate-then-dispatch unit stored in the registry.
#[async_trait]
pub trait RequestOperator: Send + Sync {
    fn key(&self) -> OperationKey;

    fn validate(&self, request: &WfsRequest) -> WfsResult<()>;

    async fn dispatch(&self, request: WfsRequest) -> WfsResult<WfsResponse>;

    /// Validate, and dispatch only if validation passed.
    async fn receive(&self, request: WfsRequest) -> WfsResult<WfsResponse> {
        self.validate(&request)?;
        self.dispatch(request).await
    }
}

#[async_trait]
impl<O: Operation> RequestOperator for O {
    fn key(&self) -> OperationKey {
        OperationKey::wfs(O::Request::OPERATION)
    }

    fn validate(&self, request: &WfsRequest) -> WfsResult<()> {
        let typed = O::Request::from_request_ref(request)?;
        let result = self.check(typed);
        if let Err(err) = &result {
            debug!(
                operation = %O::Request::OPERATION,
                failures = err.exceptions().len(),
                "Request rejected by validation"
            );
        }
        result
    }

    async fn dispatch(&self, request: WfsRequest) -> WfsResult<WfsResponse> {
        let typed = O::Request::from_request(request)?;
        self.perform(typed).await.map(Into::into)
    }
}
