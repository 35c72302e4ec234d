//! Translation between WFS GetFeature and SOS GetObservation.
//!
//! Only the bounding box of a GetFeature request has an observation-query
//! counterpart so far. Resource ids, query type names and FES filters are
//! reported as [`BridgeError::NotYetMapped`] instead of being dropped.

use std::collections::HashSet;

use thiserror::Error;
use wfs_common::params;
use wfs_protocol::observation::SpatialFilter;
use wfs_protocol::{
    FeatureCollection, GetFeatureRequest, GetObservationRequest, GetObservationResponse, Member,
    NumberMatched, ObservationMember,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BridgeError {
    #[error("GetFeature parameter '{field}' is not yet mapped to an observation query")]
    NotYetMapped { field: &'static str },
}

/// Stateless GetFeature <-> GetObservation translator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtocolBridge;

impl ProtocolBridge {
    /// Build the observation query for a GetFeature request.
    pub fn to_observation_request(
        &self,
        request: &GetFeatureRequest,
    ) -> Result<GetObservationRequest, BridgeError> {
        if !request.resource_ids.is_empty() {
            return Err(BridgeError::NotYetMapped {
                field: params::RESOURCE_ID,
            });
        }
        if request.queries.iter().any(|q| q.filter.is_some()) {
            return Err(BridgeError::NotYetMapped {
                field: params::FILTER,
            });
        }
        if !request.queries.is_empty() {
            return Err(BridgeError::NotYetMapped {
                field: params::TYPE_NAMES,
            });
        }

        Ok(GetObservationRequest {
            spatial_filter: request.bbox.clone().map(SpatialFilter::bbox),
            ..GetObservationRequest::default()
        })
    }

    /// Wrap an observation result as a feature collection.
    ///
    /// Members keep the backend order. The backend does not report a total
    /// count, so `numberMatched` is `unknown`.
    pub fn to_feature_collection(&self, response: GetObservationResponse) -> FeatureCollection {
        let mut ids = MemberIds::default();
        let members = response
            .observations
            .into_iter()
            .map(|observation| {
                let gml_id = ids.next_id(observation.identifier.as_deref());
                Member::Observation(ObservationMember {
                    gml_id,
                    observation,
                })
            })
            .collect();

        FeatureCollection::new(members, NumberMatched::Unknown)
    }
}

/// Hands out member ids that are unique within one collection.
///
/// Ids are derived from the observation identifier so that the same backend
/// result always yields the same ids.
#[derive(Debug, Default)]
struct MemberIds {
    used: HashSet<String>,
}

impl MemberIds {
    fn next_id(&mut self, identifier: Option<&str>) -> String {
        let base = identifier
            .map(to_ncname)
            .unwrap_or_else(|| "observation".to_string());

        let mut candidate = base.clone();
        let mut suffix = 1;
        while self.used.contains(&candidate) {
            suffix += 1;
            candidate = format!("{}.{}", base, suffix);
        }
        self.used.insert(candidate.clone());
        candidate
    }
}

/// Make a string usable as a gml:id (an XML NCName).
fn to_ncname(s: &str) -> String {
    let mut id: String = s
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if !id.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        id.insert_str(0, "o_");
    }
    id
}
