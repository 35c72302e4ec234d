//! Decoded WFS requests.
//!
//! `service` and `version` are plain strings on every request: the decoder
//! always fills them, possibly with empty or wrong values, and it is the
//! operators' job to reject those.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use wfs_common::{Envelope, QualifiedName, WfsError, WfsResult};

use crate::operation::{OperationKey, WfsOperation};

/// An FES filter carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    /// Filter language URN, e.g. `urn:ogc:def:queryLanguage:OGC-FES:Filter`.
    #[serde(default)]
    pub language: String,
    pub expression: String,
}

/// One `wfs:Query` of a GetFeature or GetPropertyValue request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    #[serde(default)]
    pub type_names: Vec<QualifiedName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub srs_name: Option<String>,
}

impl Query {
    pub fn new(type_names: Vec<QualifiedName>) -> Self {
        Self {
            type_names,
            ..Default::default()
        }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCapabilitiesRequest {
    #[serde(default)]
    pub service: String,
    /// GetCapabilities may omit the version; an empty string means absent.
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub accept_versions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeFeatureTypeRequest {
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub version: String,
    /// Empty means "all known types".
    #[serde(default)]
    pub type_names: Vec<QualifiedName>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetFeatureRequest {
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub version: String,
    /// Direct lookups by id; used instead of `queries`.
    #[serde(default)]
    pub resource_ids: BTreeSet<String>,
    #[serde(default)]
    pub queries: Vec<Query>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Envelope>,
}

impl GetFeatureRequest {
    pub fn new(service: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            version: version.into(),
            ..Default::default()
        }
    }

    pub fn with_query(mut self, query: Query) -> Self {
        self.queries.push(query);
        self
    }

    pub fn with_resource_id(mut self, id: impl Into<String>) -> Self {
        self.resource_ids.insert(id.into());
        self
    }

    pub fn with_bbox(mut self, bbox: Envelope) -> Self {
        self.bbox = Some(bbox);
        self
    }

    /// Type names are only checked for query-based requests.
    pub fn is_query_based(&self) -> bool {
        self.resource_ids.is_empty() && !self.queries.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPropertyValueRequest {
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub value_reference: String,
    #[serde(default)]
    pub resource_ids: BTreeSet<String>,
    #[serde(default)]
    pub queries: Vec<Query>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Envelope>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStoredQueriesRequest {
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeStoredQueriesRequest {
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub stored_query_ids: BTreeSet<String>,
}

/// Any decoded WFS request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "request")]
pub enum WfsRequest {
    GetCapabilities(GetCapabilitiesRequest),
    DescribeFeatureType(DescribeFeatureTypeRequest),
    GetFeature(GetFeatureRequest),
    GetPropertyValue(GetPropertyValueRequest),
    ListStoredQueries(ListStoredQueriesRequest),
    DescribeStoredQueries(DescribeStoredQueriesRequest),
}

impl WfsRequest {
    pub fn operation(&self) -> WfsOperation {
        match self {
            WfsRequest::GetCapabilities(_) => WfsOperation::GetCapabilities,
            WfsRequest::DescribeFeatureType(_) => WfsOperation::DescribeFeatureType,
            WfsRequest::GetFeature(_) => WfsOperation::GetFeature,
            WfsRequest::GetPropertyValue(_) => WfsOperation::GetPropertyValue,
            WfsRequest::ListStoredQueries(_) => WfsOperation::ListStoredQueries,
            WfsRequest::DescribeStoredQueries(_) => WfsOperation::DescribeStoredQueries,
        }
    }

    pub fn service(&self) -> &str {
        match self {
            WfsRequest::GetCapabilities(r) => &r.service,
            WfsRequest::DescribeFeatureType(r) => &r.service,
            WfsRequest::GetFeature(r) => &r.service,
            WfsRequest::GetPropertyValue(r) => &r.service,
            WfsRequest::ListStoredQueries(r) => &r.service,
            WfsRequest::DescribeStoredQueries(r) => &r.service,
        }
    }

    pub fn version(&self) -> &str {
        match self {
            WfsRequest::GetCapabilities(r) => &r.version,
            WfsRequest::DescribeFeatureType(r) => &r.version,
            WfsRequest::GetFeature(r) => &r.version,
            WfsRequest::GetPropertyValue(r) => &r.version,
            WfsRequest::ListStoredQueries(r) => &r.version,
            WfsRequest::DescribeStoredQueries(r) => &r.version,
        }
    }

    /// The key of the operator that owns this request.
    ///
    /// A `WfsRequest` is by construction a WFS 2.0.0 request; the `service`
    /// and `version` field values are parameters to validate, not routing
    /// information.
    pub fn key(&self) -> OperationKey {
        OperationKey::wfs(self.operation())
    }
}

/// A concrete request type that can be taken out of a [`WfsRequest`].
pub trait TypedRequest: Sized + Send + Sync + 'static {
    const OPERATION: WfsOperation;

    fn from_request(request: WfsRequest) -> WfsResult<Self>;

    fn from_request_ref(request: &WfsRequest) -> WfsResult<&Self>;
}

fn mismatch(expected: WfsOperation, actual: &WfsRequest) -> WfsError {
    WfsError::Internal(format!(
        "expected a {} request, got {}",
        expected,
        actual.operation()
    ))
}

macro_rules! typed_requests {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for WfsRequest {
                fn from(request: $ty) -> Self {
                    WfsRequest::$variant(request)
                }
            }

            impl TypedRequest for $ty {
                const OPERATION: WfsOperation = WfsOperation::$variant;

                fn from_request(request: WfsRequest) -> WfsResult<Self> {
                    match request {
                        WfsRequest::$variant(inner) => Ok(inner),
                        other => Err(mismatch(Self::OPERATION, &other)),
                    }
                }

                fn from_request_ref(request: &WfsRequest) -> WfsResult<&Self> {
                    match request {
                        WfsRequest::$variant(inner) => Ok(inner),
                        other => Err(mismatch(Self::OPERATION, other)),
                    }
                }
            }
        )*
    };
}

typed_requests! {
    GetCapabilities => GetCapabilitiesRequest,
    DescribeFeatureType => DescribeFeatureTypeRequest,
    GetFeature => GetFeatureRequest,
    GetPropertyValue => GetPropertyValueRequest,
    ListStoredQueries => ListStoredQueriesRequest,
    DescribeStoredQueries => DescribeStoredQueriesRequest,
}
