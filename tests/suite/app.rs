//! State controller lifecycle tests against a mock rephrase server

use std::time::Duration;

use quill::app::App;

use crate::common::{
    api_config, mount_rephrase_error, mount_rephrase_success, start_rephrase_mock,
};

fn type_text(app: &mut App, text: &str) {
    app.enter_insert_mode();
    let token = app.insert_token().expect("insert mode");
    let mut insert = app.insert_mode(token);
    for c in text.chars() {
        insert.enter_char(c);
    }
}

/// Drive the controller until the in-flight request resolves.
async fn resolve(app: &mut App) {
    for _ in 0..500 {
        app.process_request_events();
        if !app.is_loading() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("request did not resolve in time");
}

#[tokio::test]
async fn submit_success_lifecycle() {
    let server = start_rephrase_mock().await;
    mount_rephrase_success(&server, &["The dog chased the cat."]).await;
    let mut app = App::with_api(Some(api_config(&server)));

    type_text(&mut app, "The cat was chased by the dog.");
    app.submit();
    assert!(app.is_loading());

    resolve(&mut app).await;

    assert_eq!(app.results(), ["The dog chased the cat."]);
    assert_eq!(app.error(), None);
    // The input survives submission.
    assert_eq!(app.draft_text(), "The cat was chased by the dog.");
}

#[tokio::test]
async fn submit_failure_lifecycle() {
    let server = start_rephrase_mock().await;
    mount_rephrase_error(&server, 400, "Text too short").await;
    let mut app = App::with_api(Some(api_config(&server)));

    type_text(&mut app, "hi");
    app.submit();

    resolve(&mut app).await;

    assert_eq!(app.error(), Some("Text too short"));
    assert!(app.results().is_empty());
}

#[tokio::test]
async fn resubmission_after_failure_recovers() {
    let failing = start_rephrase_mock().await;
    mount_rephrase_error(&failing, 502, "Upstream unavailable").await;
    let mut app = App::with_api(Some(api_config(&failing)));

    type_text(&mut app, "hello there");
    app.submit();
    resolve(&mut app).await;
    assert!(app.error().is_some());

    // Every failure is locally recoverable: the same submit path works once
    // the service does.
    let healthy = start_rephrase_mock().await;
    mount_rephrase_success(&healthy, &["hi there"]).await;
    let mut app = App::with_api(Some(api_config(&healthy)));
    type_text(&mut app, "hello there");
    app.submit();
    resolve(&mut app).await;

    assert_eq!(app.results(), ["hi there"]);
    assert_eq!(app.error(), None);
}

#[tokio::test]
async fn new_submit_clears_previous_results_while_loading() {
    let server = start_rephrase_mock().await;
    mount_rephrase_success(&server, &["first answer"]).await;
    let mut app = App::with_api(Some(api_config(&server)));

    type_text(&mut app, "some text");
    app.submit();
    resolve(&mut app).await;
    assert_eq!(app.results(), ["first answer"]);

    app.submit();

    // Stale results are gone before the new request resolves.
    assert!(app.is_loading());
    assert!(app.results().is_empty());
    assert_eq!(app.error(), None);

    resolve(&mut app).await;
    assert_eq!(app.results(), ["first answer"]);
}

#[tokio::test]
async fn empty_success_is_not_an_error() {
    let server = start_rephrase_mock().await;
    mount_rephrase_success(&server, &[]).await;
    let mut app = App::with_api(Some(api_config(&server)));

    type_text(&mut app, "some text");
    app.submit();
    resolve(&mut app).await;

    assert!(app.results().is_empty());
    assert_eq!(app.error(), None);
    assert_eq!(app.selected_result(), None);
}

#[tokio::test]
async fn blank_submit_issues_no_request() {
    let server = start_rephrase_mock().await;
    mount_rephrase_success(&server, &["unused"]).await;
    let mut app = App::with_api(Some(api_config(&server)));

    type_text(&mut app, "   ");
    app.submit();
    assert!(!app.is_loading());

    // Give a stray task a chance to run before checking the server.
    tokio::time::sleep(Duration::from_millis(50)).await;
    let requests = server
        .received_requests()
        .await
        .expect("request recording enabled");
    assert!(requests.is_empty(), "no outbound call for blank input");
}
