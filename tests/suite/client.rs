//! Request client tests against a mock rephrase server

use quill::catalog::{RewriteStyle, Tone};
use quill::client::{ApiConfig, rephrase};

use crate::common::{
    api_config, mount_rephrase_error, mount_rephrase_error_without_body, mount_rephrase_success,
    received_payload, start_rephrase_mock,
};

#[tokio::test]
async fn success_returns_result_list() {
    let server = start_rephrase_mock().await;
    mount_rephrase_success(&server, &["The dog chased the cat."]).await;
    let config = api_config(&server);

    let results = rephrase(
        &config,
        "The cat was chased by the dog.",
        RewriteStyle::PassiveToActive,
        Tone::Straightforward,
    )
    .await
    .expect("rephrase succeeds");

    assert_eq!(results, ["The dog chased the cat."]);

    let payload = received_payload(&server).await;
    assert_eq!(payload["key"], "test-key");
    assert_eq!(payload["text"], "The cat was chased by the dog.");
    assert_eq!(payload["mapping"], "passive_to_active");
    assert!(
        payload.get("tone_mapping").is_none(),
        "tone only travels for the switch-tone style"
    );
}

#[tokio::test]
async fn switch_tone_includes_tone_mapping() {
    let server = start_rephrase_mock().await;
    mount_rephrase_success(&server, &["I would appreciate this being done soon."]).await;
    let config = api_config(&server);

    rephrase(
        &config,
        "I need this done now.",
        RewriteStyle::SwitchTone,
        Tone::Friendly,
    )
    .await
    .expect("rephrase succeeds");

    let payload = received_payload(&server).await;
    assert_eq!(payload["mapping"], "switch_tone");
    assert_eq!(payload["tone_mapping"], "friendly");
}

#[tokio::test]
async fn empty_result_list_is_a_success() {
    let server = start_rephrase_mock().await;
    mount_rephrase_success(&server, &[]).await;
    let config = api_config(&server);

    let results = rephrase(&config, "hello", RewriteStyle::Paraphrase, Tone::Straightforward)
        .await
        .expect("empty success is still a success");

    assert!(results.is_empty());
}

#[tokio::test]
async fn missing_result_field_is_an_empty_success() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    let server = start_rephrase_mock().await;
    Mock::given(method("POST"))
        .and(path(crate::common::REPHRASE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;
    let config = api_config(&server);

    let results = rephrase(&config, "hello", RewriteStyle::Expand, Tone::Straightforward)
        .await
        .expect("missing field tolerated");

    assert!(results.is_empty());
}

#[tokio::test]
async fn error_status_surfaces_msg_from_body() {
    let server = start_rephrase_mock().await;
    mount_rephrase_error(&server, 400, "Text too short").await;
    let config = api_config(&server);

    let err = rephrase(&config, "hi", RewriteStyle::Paraphrase, Tone::Straightforward)
        .await
        .expect_err("non-success status fails");

    assert_eq!(err.message(), "Text too short");
}

#[tokio::test]
async fn error_status_without_body_gets_generic_message() {
    let server = start_rephrase_mock().await;
    mount_rephrase_error_without_body(&server, 500).await;
    let config = api_config(&server);

    let err = rephrase(&config, "hello", RewriteStyle::Paraphrase, Tone::Straightforward)
        .await
        .expect_err("non-success status fails");

    assert!(err.message().contains("500"), "got: {}", err.message());
}

#[tokio::test]
async fn malformed_success_body_fails_closed() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    let server = start_rephrase_mock().await;
    Mock::given(method("POST"))
        .and(path(crate::common::REPHRASE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("definitely not json"))
        .mount(&server)
        .await;
    let config = api_config(&server);

    let err = rephrase(&config, "hello", RewriteStyle::Paraphrase, Tone::Straightforward)
        .await
        .expect_err("unparseable body fails");

    assert!(!err.message().is_empty());
}

#[tokio::test]
async fn transport_failure_gets_generic_message() {
    // Nothing listens on the discard port.
    let config = ApiConfig::new("test-key", "http://127.0.0.1:9/api/v1/rephrase");

    let err = rephrase(&config, "hello", RewriteStyle::Paraphrase, Tone::Straightforward)
        .await
        .expect_err("unreachable endpoint fails");

    assert!(!err.message().is_empty());
}
