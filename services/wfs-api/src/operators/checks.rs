//! Parameter checks shared by several operators.

use wfs_common::protocol::{WFS_SERVICE, WFS_VERSION};
use wfs_common::{params, Envelope, ErrorSet, QualifiedName, WfsError, WfsResult};
use wfs_protocol::Query;

/// Empty or whitespace-only values count as not supplied.
pub fn is_placeholder(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn check_service(service: &str) -> WfsResult<()> {
    if is_placeholder(service) {
        Err(WfsError::MissingService)
    } else if service != WFS_SERVICE {
        Err(WfsError::InvalidService {
            value: service.to_string(),
            expected: WFS_SERVICE.to_string(),
        })
    } else {
        Ok(())
    }
}

pub fn check_version(version: &str) -> WfsResult<()> {
    if is_placeholder(version) {
        Err(WfsError::MissingParameter(params::VERSION.to_string()))
    } else if version != WFS_VERSION {
        Err(WfsError::invalid_parameter(
            params::VERSION,
            format!("Version '{}' is not supported, expected {}", version, WFS_VERSION),
        ))
    } else {
        Ok(())
    }
}

/// A supplied bounding box must not have its lower corner above the upper one.
pub fn check_bbox(bbox: Option<&Envelope>) -> WfsResult<()> {
    match bbox {
        Some(envelope) if !envelope.is_valid() => Err(WfsError::invalid_parameter(
            params::BBOX,
            format!(
                "Lower corner ({} {}) exceeds upper corner ({} {})",
                envelope.min_x, envelope.min_y, envelope.max_x, envelope.max_y
            ),
        )),
        _ => Ok(()),
    }
}

/// Check every type name of every query against the accepted names.
///
/// A name is accepted on a strict (namespace + local part) match, or failing
/// that on a local-part match.
pub fn check_type_names(queries: &[Query], accepted: &[QualifiedName], errors: &mut ErrorSet) {
    for (index, query) in queries.iter().enumerate() {
        if query.type_names.is_empty() {
            errors.push(WfsError::MissingTypeName { query: index });
            continue;
        }
        for name in &query.type_names {
            errors.check(check_type_name(index, name, accepted));
        }
    }
}

fn check_type_name(query: usize, name: &QualifiedName, accepted: &[QualifiedName]) -> WfsResult<()> {
    if name.is_blank() {
        return Err(WfsError::MissingTypeName { query });
    }

    let known = accepted.iter().any(|a| a.matches_strict(name))
        || accepted.iter().any(|a| a.matches_local(name));
    if known {
        Ok(())
    } else {
        Err(WfsError::invalid_parameter(
            params::TYPE_NAMES,
            format!("Unknown type name '{}'", name),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wfs_common::ExceptionCode;

    fn accepted() -> Vec<QualifiedName> {
        vec![QualifiedName::new(
            "http://www.opengis.net/om/2.0",
            "om",
            "OM_Observation",
        )]
    }

    #[test]
    fn test_service_check() {
        assert!(check_service("WFS").is_ok());
        assert!(matches!(check_service(""), Err(WfsError::MissingService)));
        assert!(matches!(check_service("   "), Err(WfsError::MissingService)));

        match check_service("wfs") {
            Err(WfsError::InvalidService { value, .. }) => assert_eq!(value, "wfs"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_version_check() {
        assert!(check_version("2.0.0").is_ok());
        assert_eq!(
            check_version("").unwrap_err().code(),
            ExceptionCode::MissingParameterValue
        );
        let err = check_version("1.1.0").unwrap_err();
        assert_eq!(err.code(), ExceptionCode::InvalidParameterValue);
        assert_eq!(err.locator(), Some("version"));
    }

    #[test]
    fn test_bbox_check() {
        assert!(check_bbox(None).is_ok());
        assert!(check_bbox(Some(&Envelope::new(0.0, 0.0, 0.0, 0.0))).is_ok());

        let err = check_bbox(Some(&Envelope::new(10.0, 10.0, 5.0, 5.0))).unwrap_err();
        assert_eq!(err.code(), ExceptionCode::InvalidParameterValue);
        assert_eq!(err.locator(), Some("bbox"));
    }

    #[test]
    fn test_type_names_all_reported() {
        let queries = vec![
            Query::new(vec![
                QualifiedName::local("OM_Observation"),
                QualifiedName::local("Road"),
            ]),
            Query::new(vec![QualifiedName::local("")]),
            Query::new(vec![]),
        ];

        let mut errors = ErrorSet::new();
        check_type_names(&queries, &accepted(), &mut errors);

        let codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        assert_eq!(
            codes,
            vec![
                ExceptionCode::InvalidParameterValue,
                ExceptionCode::MissingParameterValue,
                ExceptionCode::MissingParameterValue,
            ]
        );
    }

    #[test]
    fn test_strict_match_with_other_prefix() {
        let name = QualifiedName::new("http://www.opengis.net/om/2.0", "x", "OM_Observation");
        let mut errors = ErrorSet::new();
        check_type_names(&[Query::new(vec![name])], &accepted(), &mut errors);
        assert!(errors.is_empty());
    }
}
