//! Qualified (namespace-aware) names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A namespace-qualified XML name such as `om:OM_Observation`.
///
/// The prefix is carried for display only; equality of two names is decided
/// by namespace URI and local part.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualifiedName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    pub local_part: String,
}

impl QualifiedName {
    pub fn new(namespace: impl Into<String>, prefix: impl Into<String>, local_part: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            prefix: Some(prefix.into()),
            local_part: local_part.into(),
        }
    }

    /// A name without namespace information.
    pub fn local(local_part: impl Into<String>) -> Self {
        Self {
            namespace: None,
            prefix: None,
            local_part: local_part.into(),
        }
    }

    /// Parse a `prefix:local` or bare `local` string. The namespace stays unset.
    pub fn parse_prefixed(s: &str) -> Self {
        match s.split_once(':') {
            Some((prefix, local)) => Self {
                namespace: None,
                prefix: Some(prefix.to_string()),
                local_part: local.to_string(),
            },
            None => Self::local(s),
        }
    }

    /// True when no local part was supplied.
    pub fn is_blank(&self) -> bool {
        self.local_part.trim().is_empty()
    }

    /// Strict equality: same namespace URI and same local part.
    pub fn matches_strict(&self, other: &QualifiedName) -> bool {
        self.namespace == other.namespace && self.local_part == other.local_part
    }

    /// Fallback equality on the local part alone.
    pub fn matches_local(&self, other: &QualifiedName) -> bool {
        self.local_part == other.local_part
    }

    /// Strict match first, local-name match as the fallback.
    pub fn matches(&self, other: &QualifiedName) -> bool {
        self.matches_strict(other) || self.matches_local(other)
    }
}

impl PartialEq for QualifiedName {
    fn eq(&self, other: &Self) -> bool {
        self.matches_strict(other)
    }
}

impl Eq for QualifiedName {}

impl std::hash::Hash for QualifiedName {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.namespace.hash(state);
        self.local_part.hash(state);
    }
}

impl PartialOrd for QualifiedName {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QualifiedName {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (&self.namespace, &self.local_part).cmp(&(&other.namespace, &other.local_part))
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.prefix, &self.namespace) {
            (Some(prefix), _) => write!(f, "{}:{}", prefix, self.local_part),
            (None, Some(ns)) => write!(f, "{{{}}}{}", ns, self.local_part),
            (None, None) => f.write_str(&self.local_part),
        }
    }
}
