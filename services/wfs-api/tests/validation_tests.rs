//! Validation behaviour of the full operator registry.

use std::sync::Arc;

use test_utils::{bbox, envelope, get_feature_for_types, observation_at, valid_get_feature};
use wfs_api::dao::InMemoryObservationStore;
use wfs_api::{AppState, WfsConfig};
use wfs_common::{ExceptionCode, WfsError};
use wfs_protocol::{
    DescribeFeatureTypeRequest, DescribeStoredQueriesRequest, GetFeatureRequest,
    GetPropertyValueRequest, ListStoredQueriesRequest, WfsRequest, WfsResponse,
};

fn state() -> AppState {
    let store = InMemoryObservationStore::new(vec![observation_at("obs-1", "station-a", 1.0, 1.0)]);
    AppState::with_observations(WfsConfig::default(), Arc::new(store)).unwrap()
}

/// One request per operation that carries a service check.
fn requests_with_service(service: &str) -> Vec<WfsRequest> {
    let service = service.to_string();
    let version = "2.0.0".to_string();
    vec![
        DescribeFeatureTypeRequest {
            service: service.clone(),
            version: version.clone(),
            type_names: vec![],
        }
        .into(),
        GetFeatureRequest::new(service.clone(), version.clone()).into(),
        ListStoredQueriesRequest {
            service: service.clone(),
            version: version.clone(),
        }
        .into(),
        DescribeStoredQueriesRequest {
            service,
            version,
            stored_query_ids: Default::default(),
        }
        .into(),
    ]
}

fn validation_failures(err: &WfsError) -> Vec<(ExceptionCode, Option<String>)> {
    err.exceptions()
        .into_iter()
        .map(|e| (e.code(), e.locator().map(str::to_string)))
        .collect()
}

#[tokio::test]
async fn test_wrong_service_reported_once() {
    let state = state();
    for service in ["WMS", "SOS", "wfs", "W F S"] {
        for request in requests_with_service(service) {
            let operation = request.operation();
            let err = state.registry.process(request).await.unwrap_err();

            let invalid: Vec<&WfsError> = err
                .exceptions()
                .into_iter()
                .filter(|e| e.code() == ExceptionCode::InvalidServiceParameter)
                .collect();
            assert_eq!(invalid.len(), 1, "{} with service {:?}", operation, service);
            match invalid[0] {
                WfsError::InvalidService { value, .. } => assert_eq!(value, service),
                other => panic!("unexpected error {:?}", other),
            }
        }
    }
}

#[tokio::test]
async fn test_placeholder_service_is_missing() {
    let state = state();
    for service in ["", " ", "\t"] {
        for request in requests_with_service(service) {
            let err = state.registry.process(request).await.unwrap_err();
            let failures = validation_failures(&err);
            assert_eq!(
                failures,
                vec![(
                    ExceptionCode::MissingServiceParameter,
                    Some("service".to_string())
                )]
            );
        }
    }
}

#[tokio::test]
async fn test_get_feature_reports_service_then_type_name() {
    let mut request = get_feature_for_types(&["Road"]);
    request.service = "WMS".to_string();

    let err = state().registry.process(request.into()).await.unwrap_err();
    assert!(matches!(err, WfsError::Composite(_)));
    assert_eq!(
        validation_failures(&err),
        vec![
            (
                ExceptionCode::InvalidServiceParameter,
                Some("service".to_string())
            ),
            (
                ExceptionCode::InvalidParameterValue,
                Some("typeNames".to_string())
            ),
        ]
    );
}

#[tokio::test]
async fn test_every_check_runs() {
    let mut request = get_feature_for_types(&["Road", "OM_Observation", ""]);
    request.service = String::new();
    request.version = "1.1.0".to_string();

    let err = state().registry.process(request.into()).await.unwrap_err();
    let codes: Vec<_> = validation_failures(&err).into_iter().map(|(c, _)| c).collect();
    assert_eq!(
        codes,
        vec![
            ExceptionCode::MissingServiceParameter,
            ExceptionCode::InvalidParameterValue,
            ExceptionCode::InvalidParameterValue,
            ExceptionCode::MissingParameterValue,
        ]
    );
}

#[tokio::test]
async fn test_inverted_bbox_rejected() {
    let request = valid_get_feature().with_bbox(envelope(bbox::INVALID));
    let err = state().registry.process(request.into()).await.unwrap_err();

    assert!(matches!(err, WfsError::Composite(_)));
    assert_eq!(
        validation_failures(&err),
        vec![(ExceptionCode::InvalidParameterValue, Some("bbox".to_string()))]
    );
}

#[tokio::test]
async fn test_inverted_bbox_accumulates_with_other_failures() {
    let mut request = get_feature_for_types(&["Road"]).with_bbox(envelope(bbox::INVALID));
    request.service = "WMS".to_string();

    let err = state().registry.process(request.into()).await.unwrap_err();
    let locators: Vec<_> = validation_failures(&err)
        .into_iter()
        .map(|(_, locator)| locator.unwrap())
        .collect();
    assert_eq!(locators, vec!["service", "bbox", "typeNames"]);
}

#[tokio::test]
async fn test_get_property_value_always_unsupported() {
    let state = state();
    let requests = vec![
        GetPropertyValueRequest {
            service: "WFS".to_string(),
            version: "2.0.0".to_string(),
            value_reference: "om:result".to_string(),
            ..Default::default()
        },
        GetPropertyValueRequest::default(),
    ];

    for request in requests {
        let err = state.registry.process(request.into()).await.unwrap_err();
        assert!(matches!(err, WfsError::OperationNotSupported(_)));
        assert_eq!(err.locator(), Some("GetPropertyValue"));
    }

    let snapshot = state.metrics.snapshot();
    assert_eq!(snapshot.unsupported, 2);
    assert_eq!(snapshot.processing_failures, 0);
}

#[tokio::test]
async fn test_describe_stored_queries() {
    let state = state();

    let named = DescribeStoredQueriesRequest {
        service: "WFS".to_string(),
        version: "2.0.0".to_string(),
        stored_query_ids: ["x".to_string()].into_iter().collect(),
    };
    let err = state.registry.process(named.into()).await.unwrap_err();
    assert_eq!(
        validation_failures(&err),
        vec![(
            ExceptionCode::InvalidParameterValue,
            Some("storedQueryId".to_string())
        )]
    );

    let unnamed = DescribeStoredQueriesRequest {
        service: "WFS".to_string(),
        version: "2.0.0".to_string(),
        stored_query_ids: Default::default(),
    };
    match state.registry.process(unnamed.into()).await.unwrap() {
        WfsResponse::DescribeStoredQueries(response) => {
            assert!(response.descriptions.is_empty())
        }
        other => panic!("unexpected response {:?}", other),
    }
}

#[tokio::test]
async fn test_validation_failure_is_counted() {
    let state = state();
    let _ = state
        .registry
        .process(GetFeatureRequest::new("", "").into())
        .await;
    let snapshot = state.metrics.snapshot();
    assert_eq!(snapshot.requests, 1);
    assert_eq!(snapshot.validation_failures, 1);
}
