//! Service configuration loaded from a YAML file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use wfs_common::namespaces::{OBSERVATION_TYPE, OM_20, SAMPLING_FEATURE_TYPE, SAMS_20};
use wfs_common::QualifiedName;
use wfs_protocol::{FeatureTypeInfo, ServiceProvider};

const DEFAULT_CRS: &str = "urn:ogc:def:crs:EPSG::4326";

/// Which GetFeature backend serves requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureBackend {
    /// Bridge GetFeature to the observation archive.
    #[default]
    Observation,
    /// Serve the known feature set directly.
    Features,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceMetadata {
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_: String,
    pub provider: ServiceProvider,
}

impl Default for ServiceMetadata {
    fn default() -> Self {
        Self {
            title: "Observation Feature Service".to_string(),
            abstract_: "WFS 2.0 access to an observation archive".to_string(),
            provider: ServiceProvider {
                name: "unknown".to_string(),
                site: None,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WfsConfig {
    pub service: ServiceMetadata,
    pub backend: FeatureBackend,
    /// JSON array of observations loaded into the in-memory archive.
    pub observations_file: Option<PathBuf>,
    pub refresh_interval_secs: u64,
    pub feature_types: Vec<FeatureTypeInfo>,
}

impl Default for WfsConfig {
    fn default() -> Self {
        Self {
            service: ServiceMetadata::default(),
            backend: FeatureBackend::default(),
            observations_file: None,
            refresh_interval_secs: 300,
            feature_types: default_feature_types(),
        }
    }
}

fn default_feature_types() -> Vec<FeatureTypeInfo> {
    vec![
        FeatureTypeInfo {
            name: QualifiedName::new(OM_20, "om", OBSERVATION_TYPE),
            title: "Observations".to_string(),
            default_crs: DEFAULT_CRS.to_string(),
            wgs84_bounding_box: None,
        },
        FeatureTypeInfo {
            name: QualifiedName::new(SAMS_20, "sams", SAMPLING_FEATURE_TYPE),
            title: "Sampling features".to_string(),
            default_crs: DEFAULT_CRS.to_string(),
            wgs84_bounding_box: None,
        },
    ]
}

impl WfsConfig {
    /// Load the configuration file, falling back to defaults when it is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "WFS config file does not exist, using defaults"
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read: {:?}", path))?;
        let config: WfsConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse: {:?}", path))?;

        tracing::info!(
            path = %path.display(),
            backend = ?config.backend,
            feature_types = config.feature_types.len(),
            "Loaded WFS configuration"
        );
        Ok(config)
    }

    /// Apply environment overrides on top of the file contents.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = std::env::var("WFS_OBSERVATIONS_FILE") {
            self.observations_file = Some(PathBuf::from(path));
        }
        if let Some(secs) = std::env::var("WFS_REFRESH_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            self.refresh_interval_secs = secs;
        }
        self
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = WfsConfig::load(Path::new("/nonexistent/wfs.yaml")).unwrap();
        assert_eq!(config.backend, FeatureBackend::Observation);
        assert_eq!(config.feature_types.len(), 2);
        assert_eq!(config.refresh_interval(), Duration::from_secs(300));
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wfs.yaml");
        std::fs::write(
            &path,
            r#"
service:
  title: Test WFS
  provider:
    name: Example Org
backend: features
refresh_interval_secs: 60
"#,
        )
        .unwrap();

        let config = WfsConfig::load(&path).unwrap();
        assert_eq!(config.service.title, "Test WFS");
        assert_eq!(config.service.provider.name, "Example Org");
        assert_eq!(config.backend, FeatureBackend::Features);
        assert_eq!(config.refresh_interval_secs, 60);
        assert_eq!(config.feature_types.len(), 2);
        assert!(config.observations_file.is_none());
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wfs.yaml");
        std::fs::write(&path, "backend: [not, a, backend]").unwrap();
        assert!(WfsConfig::load(&path).is_err());
    }
}
