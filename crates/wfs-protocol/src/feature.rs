//! Features and feature collections.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use wfs_common::QualifiedName;

use crate::observation::Observation;

/// A feature known to the service, independent of its backing store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbstractFeature {
    pub identifier: String,
    pub type_name: QualifiedName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl AbstractFeature {
    pub fn new(identifier: impl Into<String>, type_name: QualifiedName) -> Self {
        Self {
            identifier: identifier.into(),
            type_name,
            name: None,
            properties: BTreeMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// `numberMatched` of a collection: a count, or `unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberMatched {
    Known(u64),
    Unknown,
}

impl fmt::Display for NumberMatched {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberMatched::Known(n) => write!(f, "{}", n),
            NumberMatched::Unknown => f.write_str("unknown"),
        }
    }
}

impl Serialize for NumberMatched {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NumberMatched::Known(n) => serializer.serialize_u64(*n),
            NumberMatched::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

impl<'de> Deserialize<'de> for NumberMatched {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Count(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Count(n) => Ok(NumberMatched::Known(n)),
            Raw::Text(s) if s == "unknown" => Ok(NumberMatched::Unknown),
            Raw::Text(s) => Err(serde::de::Error::custom(format!(
                "invalid numberMatched: {}",
                s
            ))),
        }
    }
}

/// An observation wrapped as a collection member.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationMember {
    /// Unique within the enclosing collection.
    pub gml_id: String,
    pub observation: Observation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Member {
    Feature(AbstractFeature),
    Observation(ObservationMember),
}

impl Member {
    /// Identifier of the member within its collection.
    pub fn id(&self) -> &str {
        match self {
            Member::Feature(feature) => &feature.identifier,
            Member::Observation(member) => &member.gml_id,
        }
    }
}

/// A `wfs:FeatureCollection`.
///
/// `number_returned` is derived from the member list at construction and
/// therefore always equals `members().len()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureCollection {
    timestamp: DateTime<Utc>,
    number_matched: NumberMatched,
    number_returned: usize,
    members: Vec<Member>,
}

impl FeatureCollection {
    pub fn new(members: Vec<Member>, number_matched: NumberMatched) -> Self {
        Self::with_timestamp(Utc::now(), members, number_matched)
    }

    pub fn with_timestamp(
        timestamp: DateTime<Utc>,
        members: Vec<Member>,
        number_matched: NumberMatched,
    ) -> Self {
        Self {
            timestamp,
            number_matched,
            number_returned: members.len(),
            members,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), NumberMatched::Known(0))
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn number_matched(&self) -> NumberMatched {
        self.number_matched
    }

    pub fn number_returned(&self) -> usize {
        self.number_returned
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Equality ignoring the timestamp and the order of members.
    pub fn same_content_as(&self, other: &FeatureCollection) -> bool {
        if self.number_matched != other.number_matched
            || self.number_returned != other.number_returned
        {
            return false;
        }

        let mut ours: Vec<&Member> = self.members.iter().collect();
        let mut theirs: Vec<&Member> = other.members.iter().collect();
        ours.sort_by(|a, b| a.id().cmp(b.id()));
        theirs.sort_by(|a, b| a.id().cmp(b.id()));
        ours == theirs
    }
}
