//! The WFS capabilities document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wfs_common::{Envelope, QualifiedName};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceIdentification {
    pub title: String,
    #[serde(rename = "abstract", default)]
    pub abstract_: String,
    pub service_type: String,
    pub service_type_versions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceProvider {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
}

/// One advertised operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationMetadata {
    pub name: String,
}

/// One advertised feature type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureTypeInfo {
    pub name: QualifiedName,
    pub title: String,
    pub default_crs: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wgs84_bounding_box: Option<Envelope>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub version: String,
    pub update_sequence: DateTime<Utc>,
    pub service_identification: ServiceIdentification,
    pub service_provider: ServiceProvider,
    pub operations: Vec<OperationMetadata>,
    pub feature_types: Vec<FeatureTypeInfo>,
}

impl Capabilities {
    /// Names of the advertised operations.
    pub fn operation_names(&self) -> impl Iterator<Item = &str> {
        self.operations.iter().map(|op| op.name.as_str())
    }

    /// Find an advertised feature type, strict match first.
    pub fn feature_type(&self, name: &QualifiedName) -> Option<&FeatureTypeInfo> {
        self.feature_types
            .iter()
            .find(|ft| ft.name.matches_strict(name))
            .or_else(|| self.feature_types.iter().find(|ft| ft.name.matches_local(name)))
    }
}
