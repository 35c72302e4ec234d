//! OGC Web Feature Service 2.0 protocol types.
//!
//! Requests arrive here already decoded; this crate only models them.
//! The observation types in [`observation`] describe the SOS 2.0
//! GetObservation request and result that GetFeature is bridged to when the
//! feature store is an observation archive.

pub mod capabilities;
pub mod exceptions;
pub mod feature;
pub mod observation;
pub mod operation;
pub mod requests;
pub mod responses;

pub use capabilities::{
    Capabilities, FeatureTypeInfo, OperationMetadata, ServiceIdentification, ServiceProvider,
};
pub use exceptions::{ExceptionReport, OwsException};
pub use feature::{AbstractFeature, FeatureCollection, Member, NumberMatched, ObservationMember};
pub use observation::{
    GetObservationRequest, GetObservationResponse, Observation, ObservationResult, Point,
    SamplingFeature, SpatialFilter,
};
pub use operation::{OperationKey, WfsOperation};
pub use requests::{
    DescribeFeatureTypeRequest, DescribeStoredQueriesRequest, Filter, GetCapabilitiesRequest,
    GetFeatureRequest, GetPropertyValueRequest, ListStoredQueriesRequest, Query, TypedRequest,
    WfsRequest,
};
pub use responses::{
    DescribeFeatureTypeResponse, DescribeStoredQueriesResponse, GetCapabilitiesResponse,
    GetFeatureResponse, GetPropertyValueResponse, ListStoredQueriesResponse, SchemaDescription,
    StoredQueryDescription, StoredQueryListItem, WfsResponse,
};
