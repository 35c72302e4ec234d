//! Operation identity.

use std::fmt;

use serde::{Deserialize, Serialize};
use wfs_common::protocol::{WFS_SERVICE, WFS_VERSION};

/// The operations of the WFS 2.0 basic conformance class served here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WfsOperation {
    GetCapabilities,
    DescribeFeatureType,
    GetFeature,
    GetPropertyValue,
    ListStoredQueries,
    DescribeStoredQueries,
}

impl WfsOperation {
    pub const ALL: [WfsOperation; 6] = [
        WfsOperation::GetCapabilities,
        WfsOperation::DescribeFeatureType,
        WfsOperation::GetFeature,
        WfsOperation::GetPropertyValue,
        WfsOperation::ListStoredQueries,
        WfsOperation::DescribeStoredQueries,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WfsOperation::GetCapabilities => "GetCapabilities",
            WfsOperation::DescribeFeatureType => "DescribeFeatureType",
            WfsOperation::GetFeature => "GetFeature",
            WfsOperation::GetPropertyValue => "GetPropertyValue",
            WfsOperation::ListStoredQueries => "ListStoredQueries",
            WfsOperation::DescribeStoredQueries => "DescribeStoredQueries",
        }
    }
}

impl fmt::Display for WfsOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Registry key: (service, version, operation name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationKey {
    pub service: String,
    pub version: String,
    pub operation: String,
}

impl OperationKey {
    pub fn new(
        service: impl Into<String>,
        version: impl Into<String>,
        operation: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            version: version.into(),
            operation: operation.into(),
        }
    }

    /// Key of a WFS 2.0.0 operation.
    pub fn wfs(operation: WfsOperation) -> Self {
        Self::new(WFS_SERVICE, WFS_VERSION, operation.name())
    }
}

impl fmt::Display for OperationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.service, self.version, self.operation)
    }
}
