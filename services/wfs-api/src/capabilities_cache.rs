//! Capabilities document and known-feature caching.
//!
//! Holds the last computed capabilities document and the set of features the
//! service knows about. Both are rebuilt by the capabilities refresher and
//! read on every GetCapabilities / GetFeature call.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use wfs_common::{WfsError, WfsResult};
use wfs_protocol::{AbstractFeature, Capabilities};

/// Capabilities document with the time it was stored.
struct CachedCapabilities {
    document: Capabilities,
    updated_at: DateTime<Utc>,
}

/// Process-wide cache shared by all operators.
///
/// Reads hand out copies, so callers can never change cached state through
/// a returned value. Writes replace a whole generation under the write lock.
#[derive(Default)]
pub struct CapabilityCache {
    capabilities: RwLock<Option<CachedCapabilities>>,
    features: RwLock<BTreeSet<AbstractFeature>>,
}

impl CapabilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached document, or `CapabilitiesNotComputed` before the first refresh.
    pub async fn get_capabilities(&self) -> WfsResult<Capabilities> {
        let guard = self.capabilities.read().await;
        match guard.as_ref() {
            Some(cached) => Ok(cached.document.clone()),
            None => Err(WfsError::CapabilitiesNotComputed),
        }
    }

    pub async fn set_capabilities(&self, document: Capabilities) {
        let mut guard = self.capabilities.write().await;
        *guard = Some(CachedCapabilities {
            document,
            updated_at: Utc::now(),
        });
        debug!("Capabilities cached");
    }

    /// When the capabilities document was last stored.
    pub async fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.capabilities.read().await.as_ref().map(|c| c.updated_at)
    }

    /// Snapshot of the known features.
    pub async fn get_features(&self) -> BTreeSet<AbstractFeature> {
        self.features.read().await.clone()
    }

    /// Replace the known features with a new generation.
    pub async fn set_features(&self, features: impl IntoIterator<Item = AbstractFeature>) {
        let mut guard = self.features.write().await;
        guard.clear();
        guard.extend(features);
        debug!(count = guard.len(), "Known features replaced");
    }

    /// Drop the capabilities document; the feature set is kept.
    pub async fn invalidate(&self) {
        let mut guard = self.capabilities.write().await;
        *guard = None;
        debug!("Capabilities cache invalidated");
    }
}
