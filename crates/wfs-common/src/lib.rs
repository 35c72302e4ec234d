//! Common types and utilities shared across the WFS service crates.

pub mod bbox;
pub mod error;
pub mod qname;

pub use bbox::Envelope;
pub use error::{ErrorSet, ExceptionCode, WfsError, WfsResult};
pub use qname::QualifiedName;

/// Protocol identity constants.
pub mod protocol {
    /// Service name advertised by this deployment.
    pub const WFS_SERVICE: &str = "WFS";
    /// The single supported WFS version.
    pub const WFS_VERSION: &str = "2.0.0";
    /// Service name of the observation backend protocol.
    pub const SOS_SERVICE: &str = "SOS";
    /// Version of the observation backend protocol.
    pub const SOS_VERSION: &str = "2.0.0";
}

/// Namespaces and type names accepted by the feature store.
pub mod namespaces {
    pub const OM_20: &str = "http://www.opengis.net/om/2.0";
    pub const SAMS_20: &str = "http://www.opengis.net/samplingSpatial/2.0";
    pub const GML_32: &str = "http://www.opengis.net/gml/3.2";

    /// Local name of the observation feature type.
    pub const OBSERVATION_TYPE: &str = "OM_Observation";
    /// Local name of the spatial sampling feature type.
    pub const SAMPLING_FEATURE_TYPE: &str = "SF_SpatialSamplingFeature";
}

/// Request parameter names used as exception locators.
pub mod params {
    pub const SERVICE: &str = "service";
    pub const VERSION: &str = "version";
    pub const TYPE_NAMES: &str = "typeNames";
    pub const RESOURCE_ID: &str = "resourceId";
    pub const FILTER: &str = "filter";
    pub const BBOX: &str = "bbox";
    pub const STORED_QUERY_ID: &str = "storedQueryId";
}
