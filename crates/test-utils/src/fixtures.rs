//! Common fixtures for wfs tests.

use chrono::{DateTime, TimeZone, Utc};
use wfs_common::namespaces::{OBSERVATION_TYPE, OM_20, SAMPLING_FEATURE_TYPE, SAMS_20};
use wfs_common::protocol::{WFS_SERVICE, WFS_VERSION};
use wfs_common::{Envelope, QualifiedName};
use wfs_protocol::{
    AbstractFeature, Capabilities, FeatureTypeInfo, GetFeatureRequest, GetObservationRequest,
    Observation, ObservationResult, OperationMetadata, Point, Query, SamplingFeature,
    ServiceIdentification, ServiceProvider, WfsOperation,
};

/// Common envelopes for testing.
pub mod bbox {
    /// Global bounding box (-180 to 180, -90 to 90)
    pub const GLOBAL: (f64, f64, f64, f64) = (-180.0, -90.0, 180.0, 90.0);

    /// The 0..10 square used by the bridging scenarios
    pub const UNIT_TEN: (f64, f64, f64, f64) = (0.0, 0.0, 10.0, 10.0);

    /// Invalid bbox (min > max)
    pub const INVALID: (f64, f64, f64, f64) = (10.0, 10.0, 5.0, 5.0);
}

pub fn envelope(corners: (f64, f64, f64, f64)) -> Envelope {
    Envelope::new(corners.0, corners.1, corners.2, corners.3)
}

/// Fixed time so generated observations compare equal across calls.
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
}

/// A sampling feature located at (x, y).
pub fn sampling_point(id: &str, x: f64, y: f64) -> SamplingFeature {
    SamplingFeature {
        identifier: id.to_string(),
        name: Some(format!("Station {}", id)),
        shape: Point { x, y },
    }
}

/// An air temperature measurement at a sampling point.
pub fn observation_at(id: &str, foi: &str, x: f64, y: f64) -> Observation {
    Observation {
        identifier: Some(id.to_string()),
        ..observation_without_id(foi, x, y)
    }
}

/// Same as [`observation_at`] but without an archive identifier.
pub fn observation_without_id(foi: &str, x: f64, y: f64) -> Observation {
    Observation {
        identifier: None,
        procedure: "urn:example:sensor:thermometer".to_string(),
        observed_property: "urn:example:property:air_temperature".to_string(),
        feature_of_interest: sampling_point(foi, x, y),
        phenomenon_time: fixed_time(),
        result_time: fixed_time(),
        result: ObservationResult::Measurement {
            value: 21.5,
            uom: "Cel".to_string(),
        },
    }
}

/// An unfiltered SOS GetObservation request.
pub fn sos_request() -> GetObservationRequest {
    GetObservationRequest::default()
}

/// A known feature of the sampling-feature type.
pub fn sampling_feature(id: &str) -> AbstractFeature {
    AbstractFeature::new(
        id,
        QualifiedName::new(SAMS_20, "sams", SAMPLING_FEATURE_TYPE),
    )
}

pub fn observation_type_name() -> QualifiedName {
    QualifiedName::new(OM_20, "om", OBSERVATION_TYPE)
}

/// A GetFeature request that passes validation.
pub fn valid_get_feature() -> GetFeatureRequest {
    GetFeatureRequest::new(WFS_SERVICE, WFS_VERSION)
}

/// A GetFeature request with one query over `local_names`.
pub fn get_feature_for_types(local_names: &[&str]) -> GetFeatureRequest {
    valid_get_feature().with_query(Query::new(
        local_names.iter().map(|n| QualifiedName::local(*n)).collect(),
    ))
}

/// A small but complete capabilities document.
pub fn capabilities_document() -> Capabilities {
    Capabilities {
        version: WFS_VERSION.to_string(),
        update_sequence: fixed_time(),
        service_identification: ServiceIdentification {
            title: "Test WFS".to_string(),
            abstract_: "Fixture capabilities".to_string(),
            service_type: WFS_SERVICE.to_string(),
            service_type_versions: vec![WFS_VERSION.to_string()],
        },
        service_provider: ServiceProvider {
            name: "Test Provider".to_string(),
            site: None,
        },
        operations: WfsOperation::ALL
            .iter()
            .map(|op| OperationMetadata {
                name: op.name().to_string(),
            })
            .collect(),
        feature_types: vec![FeatureTypeInfo {
            name: observation_type_name(),
            title: "Observations".to_string(),
            default_crs: "urn:ogc:def:crs:EPSG::4326".to_string(),
            wgs84_bounding_box: Some(envelope(bbox::GLOBAL)),
        }],
    }
}
