//! WFS responses.
//!
//! The operation name of a response is derived from its type, never stored.

use std::collections::BTreeSet;

use serde::Serialize;
use wfs_common::protocol::{WFS_SERVICE, WFS_VERSION};
use wfs_common::QualifiedName;

use crate::capabilities::Capabilities;
use crate::feature::FeatureCollection;
use crate::operation::WfsOperation;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCapabilitiesResponse {
    pub service: String,
    pub version: String,
    pub capabilities: Capabilities,
}

impl GetCapabilitiesResponse {
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            service: WFS_SERVICE.to_string(),
            version: capabilities.version.clone(),
            capabilities,
        }
    }
}

/// Application schema text for one feature type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDescription {
    pub type_name: QualifiedName,
    pub target_namespace: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeFeatureTypeResponse {
    pub service: String,
    pub version: String,
    pub schemas: Vec<SchemaDescription>,
}

impl DescribeFeatureTypeResponse {
    pub fn new(schemas: Vec<SchemaDescription>) -> Self {
        Self {
            service: WFS_SERVICE.to_string(),
            version: WFS_VERSION.to_string(),
            schemas,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetFeatureResponse {
    pub service: String,
    pub version: String,
    pub collection: FeatureCollection,
}

impl GetFeatureResponse {
    pub fn new(collection: FeatureCollection) -> Self {
        Self {
            service: WFS_SERVICE.to_string(),
            version: WFS_VERSION.to_string(),
            collection,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPropertyValueResponse {
    pub service: String,
    pub version: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredQueryListItem {
    pub id: String,
    pub title: String,
    pub return_feature_types: Vec<QualifiedName>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredQueryDescription {
    pub id: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_: String,
    pub return_feature_types: Vec<QualifiedName>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStoredQueriesResponse {
    pub service: String,
    pub version: String,
    pub stored_queries: BTreeSet<StoredQueryListItem>,
}

impl ListStoredQueriesResponse {
    pub fn empty() -> Self {
        Self {
            service: WFS_SERVICE.to_string(),
            version: WFS_VERSION.to_string(),
            stored_queries: BTreeSet::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeStoredQueriesResponse {
    pub service: String,
    pub version: String,
    pub descriptions: BTreeSet<StoredQueryDescription>,
}

impl DescribeStoredQueriesResponse {
    pub fn empty() -> Self {
        Self {
            service: WFS_SERVICE.to_string(),
            version: WFS_VERSION.to_string(),
            descriptions: BTreeSet::new(),
        }
    }
}

/// Any WFS response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WfsResponse {
    GetCapabilities(GetCapabilitiesResponse),
    DescribeFeatureType(DescribeFeatureTypeResponse),
    GetFeature(GetFeatureResponse),
    GetPropertyValue(GetPropertyValueResponse),
    ListStoredQueries(ListStoredQueriesResponse),
    DescribeStoredQueries(DescribeStoredQueriesResponse),
}

impl WfsResponse {
    pub fn operation(&self) -> WfsOperation {
        match self {
            WfsResponse::GetCapabilities(_) => WfsOperation::GetCapabilities,
            WfsResponse::DescribeFeatureType(_) => WfsOperation::DescribeFeatureType,
            WfsResponse::GetFeature(_) => WfsOperation::GetFeature,
            WfsResponse::GetPropertyValue(_) => WfsOperation::GetPropertyValue,
            WfsResponse::ListStoredQueries(_) => WfsOperation::ListStoredQueries,
            WfsResponse::DescribeStoredQueries(_) => WfsOperation::DescribeStoredQueries,
        }
    }

    pub fn service(&self) -> &str {
        match self {
            WfsResponse::GetCapabilities(r) => &r.service,
            WfsResponse::DescribeFeatureType(r) => &r.service,
            WfsResponse::GetFeature(r) => &r.service,
            WfsResponse::GetPropertyValue(r) => &r.service,
            WfsResponse::ListStoredQueries(r) => &r.service,
            WfsResponse::DescribeStoredQueries(r) => &r.service,
        }
    }

    pub fn version(&self) -> &str {
        match self {
            WfsResponse::GetCapabilities(r) => &r.version,
            WfsResponse::DescribeFeatureType(r) => &r.version,
            WfsResponse::GetFeature(r) => &r.version,
            WfsResponse::GetPropertyValue(r) => &r.version,
            WfsResponse::ListStoredQueries(r) => &r.version,
            WfsResponse::DescribeStoredQueries(r) => &r.version,
        }
    }
}

macro_rules! response_variants {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for WfsResponse {
                fn from(response: $ty) -> Self {
                    WfsResponse::$variant(response)
                }
            }
        )*
    };
}

response_variants! {
    GetCapabilities => GetCapabilitiesResponse,
    DescribeFeatureType => DescribeFeatureTypeResponse,
    GetFeature => GetFeatureResponse,
    GetPropertyValue => GetPropertyValueResponse,
    ListStoredQueries => ListStoredQueriesResponse,
    DescribeStoredQueries => DescribeStoredQueriesResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::NumberMatched;

    #[test]
    fn test_operation_is_derived_from_type() {
        let response: WfsResponse = ListStoredQueriesResponse::empty().into();
        assert_eq!(response.operation(), WfsOperation::ListStoredQueries);
        assert_eq!(response.service(), "WFS");
        assert_eq!(response.version(), "2.0.0");
    }

    #[test]
    fn test_get_feature_response_json() {
        let response = GetFeatureResponse::new(FeatureCollection::new(
            Vec::new(),
            NumberMatched::Unknown,
        ));
        let json = serde_json::to_value(WfsResponse::from(response)).unwrap();
        assert_eq!(json["collection"]["numberMatched"], "unknown");
        assert_eq!(json["collection"]["numberReturned"], 0);
    }
}
