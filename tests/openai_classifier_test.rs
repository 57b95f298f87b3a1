use anyhow::Result;
use fee_estimator::config::OracleConfig;
use fee_estimator::core::ServiceCatalog;
use fee_estimator::domain::model::RateCatalog;
use fee_estimator::{Classifier, EstimateError, Estimator, OpenAiClassifier, RequesterType, Urgency};
use httpmock::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

const CLASSIFICATION: &str =
    r#"{"is_legal": true, "domain": "Property law", "service": "Lease dispute", "confidence": 0.8}"#;

fn oracle_config(endpoint: String) -> OracleConfig {
    OracleConfig {
        endpoint,
        model: "test-model".to_string(),
        temperature: 0.2,
        max_tokens: 150,
        timeout_seconds: 5,
        ..OracleConfig::default()
    }
}

fn completion(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ],
        "usage": { "prompt_tokens": 120, "completion_tokens": 30, "total_tokens": 150 }
    })
}

#[tokio::test]
async fn test_sample_issues_independent_requests() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .header("authorization", "Bearer test-key")
            .json_body_partial(r#"{"model": "test-model", "max_tokens": 150}"#);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(completion(CLASSIFICATION));
    });

    let classifier = OpenAiClassifier::new(
        &oracle_config(server.url("/v1/chat/completions")),
        "test-key".to_string(),
    )?;

    let responses = classifier.sample("classify this", 3).await?;

    api_mock.assert_hits(3);
    assert_eq!(responses.len(), 3);
    assert!(responses.iter().all(|r| r == CLASSIFICATION));
    Ok(())
}

#[tokio::test]
async fn test_authentication_failure_is_oracle_unavailable() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(401)
            .json_body(serde_json::json!({"error": {"message": "Incorrect API key"}}));
    });

    let classifier = OpenAiClassifier::new(
        &oracle_config(server.url("/v1/chat/completions")),
        "bad-key".to_string(),
    )?;

    let result = classifier.sample("classify this", 3).await;

    // 所有樣本仍會嘗試送出
    api_mock.assert_hits(3);
    assert!(matches!(result, Err(EstimateError::OracleUnavailable { .. })));
    Ok(())
}

#[tokio::test]
async fn test_connection_failure_is_oracle_unavailable() -> Result<()> {
    let classifier = OpenAiClassifier::new(
        &oracle_config("http://127.0.0.1:1/v1/chat/completions".to_string()),
        "test-key".to_string(),
    )?;

    let result = classifier.sample("classify this", 2).await;

    assert!(matches!(result, Err(EstimateError::OracleUnavailable { .. })));
    Ok(())
}

#[tokio::test]
async fn test_server_errors_only_drop_samples() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(500);
    });

    let classifier = OpenAiClassifier::new(
        &oracle_config(server.url("/v1/chat/completions")),
        "test-key".to_string(),
    )?;

    let responses = classifier.sample("classify this", 3).await?;

    api_mock.assert_hits(3);
    assert!(responses.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_missing_content_drops_sample() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"choices": []}));
    });

    let classifier = OpenAiClassifier::new(
        &oracle_config(server.url("/v1/chat/completions")),
        "test-key".to_string(),
    )?;

    let responses = classifier.sample("classify this", 2).await?;
    assert!(responses.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_timeout_counts_as_failed_sample() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200)
            .delay(Duration::from_secs(3))
            .json_body(completion(CLASSIFICATION));
    });

    let config = OracleConfig {
        timeout_seconds: 1,
        ..oracle_config(server.url("/v1/chat/completions"))
    };
    let classifier = OpenAiClassifier::new(&config, "test-key".to_string())?;

    let responses = classifier.sample("classify this", 2).await?;
    assert!(responses.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_estimate_over_http() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .body_contains("Lease dispute");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(completion(CLASSIFICATION));
    });

    let mut property = BTreeMap::new();
    property.insert("Lease dispute".to_string(), 4.0);
    let mut domains = BTreeMap::new();
    domains.insert("Property law".to_string(), property);

    let rates = RateCatalog {
        standard_hourly_rate: 150.0,
        urgency_multiplier: 1.5,
        ..RateCatalog::default()
    };

    let classifier = OpenAiClassifier::new(
        &oracle_config(server.url("/v1/chat/completions")),
        "test-key".to_string(),
    )?;
    let estimator = Estimator::new(
        classifier,
        Arc::new(ServiceCatalog::new(domains)),
        Arc::new(rates),
    );

    let response = estimator
        .estimate(
            "My landlord refuses to return my deposit.",
            RequesterType::Individual,
            Urgency::Urgent,
        )
        .await?;

    api_mock.assert_hits(3);
    assert!(response.is_relevant);
    assert_eq!(response.domain, "Property law");
    // 4h × 150 × 1.5 = 900
    assert_eq!((response.low, response.high), (720, 1080));
    Ok(())
}
