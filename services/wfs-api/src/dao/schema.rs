//! DescribeFeatureType from schema documents compiled into the binary.

use async_trait::async_trait;
use wfs_common::namespaces::{OBSERVATION_TYPE, OM_20, SAMPLING_FEATURE_TYPE, SAMS_20};
use wfs_common::{params, QualifiedName, WfsError, WfsResult};
use wfs_protocol::{DescribeFeatureTypeRequest, DescribeFeatureTypeResponse, SchemaDescription};

use super::DescribeFeatureTypeDao;

const OM_OBSERVATION_XSD: &str = include_str!("../../schemas/om_observation.xsd");
const SAMS_SAMPLING_FEATURE_XSD: &str = include_str!("../../schemas/sams_sampling_feature.xsd");

/// Fixed schema text keyed by feature type name.
pub struct StaticSchemaDao {
    schemas: Vec<SchemaDescription>,
}

impl StaticSchemaDao {
    pub fn new() -> Self {
        Self {
            schemas: vec![
                SchemaDescription {
                    type_name: QualifiedName::new(OM_20, "om", OBSERVATION_TYPE),
                    target_namespace: OM_20.to_string(),
                    content: OM_OBSERVATION_XSD.to_string(),
                },
                SchemaDescription {
                    type_name: QualifiedName::new(SAMS_20, "sams", SAMPLING_FEATURE_TYPE),
                    target_namespace: SAMS_20.to_string(),
                    content: SAMS_SAMPLING_FEATURE_XSD.to_string(),
                },
            ],
        }
    }

    fn lookup(&self, name: &QualifiedName) -> Option<&SchemaDescription> {
        self.schemas
            .iter()
            .find(|s| s.type_name.matches_strict(name))
            .or_else(|| self.schemas.iter().find(|s| s.type_name.matches_local(name)))
    }
}

impl Default for StaticSchemaDao {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DescribeFeatureTypeDao for StaticSchemaDao {
    async fn describe_feature_type(
        &self,
        request: &DescribeFeatureTypeRequest,
    ) -> WfsResult<DescribeFeatureTypeResponse> {
        if request.type_names.is_empty() {
            return Ok(DescribeFeatureTypeResponse::new(self.schemas.clone()));
        }

        let mut schemas: Vec<SchemaDescription> = Vec::new();
        for name in &request.type_names {
            let schema = self.lookup(name).ok_or_else(|| {
                WfsError::invalid_parameter(
                    params::TYPE_NAMES,
                    format!("Unknown feature type '{}'", name),
                )
            })?;
            if !schemas.contains(schema) {
                schemas.push(schema.clone());
            }
        }
        Ok(DescribeFeatureTypeResponse::new(schemas))
    }
}
