//! SOS 2.0 GetObservation request and result types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wfs_common::protocol::{SOS_SERVICE, SOS_VERSION};
use wfs_common::Envelope;

/// Value reference of the sampling geometry targeted by spatial filters.
pub const SAMPLING_SHAPE_REFERENCE: &str = "om:featureOfInterest/*/sams:shape";

/// A BBOX spatial filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpatialFilter {
    pub value_reference: String,
    pub envelope: Envelope,
}

impl SpatialFilter {
    pub fn bbox(envelope: Envelope) -> Self {
        Self {
            value_reference: SAMPLING_SHAPE_REFERENCE.to_string(),
            envelope,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetObservationRequest {
    pub service: String,
    pub version: String,
    #[serde(default)]
    pub offerings: Vec<String>,
    #[serde(default)]
    pub procedures: Vec<String>,
    #[serde(default)]
    pub observed_properties: Vec<String>,
    #[serde(default)]
    pub features_of_interest: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spatial_filter: Option<SpatialFilter>,
}

impl Default for GetObservationRequest {
    fn default() -> Self {
        Self {
            service: SOS_SERVICE.to_string(),
            version: SOS_VERSION.to_string(),
            offerings: Vec::new(),
            procedures: Vec::new(),
            observed_properties: Vec::new(),
            features_of_interest: Vec::new(),
            spatial_filter: None,
        }
    }
}

/// A 2D point geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// The sampling feature an observation was made at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingFeature {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub shape: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ObservationResult {
    Measurement { value: f64, uom: String },
    Count { value: i64 },
    Boolean { value: bool },
    Text { value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    /// Archive identifier; not every observation carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    pub procedure: String,
    pub observed_property: String,
    pub feature_of_interest: SamplingFeature,
    pub phenomenon_time: DateTime<Utc>,
    pub result_time: DateTime<Utc>,
    pub result: ObservationResult,
}

/// Observations in the order the backend returned them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetObservationResponse {
    pub observations: Vec<Observation>,
}
