mod support;

use std::time::{Duration, Instant};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use studio_genai::types::http::HttpRetryOptions;
use studio_genai::types::images::GenerationRequest;
use studio_genai::{CancellationToken, Client, Error, ErrorKind};
use support::{image_body, rate_limited, FailThenSucceed, GENERATE_PATH};

#[tokio::test]
async fn per_attempt_timeout_surfaces_as_generation_error() {
    let server = MockServer::start().await;
    let responder = FailThenSucceed::new(
        0,
        ResponseTemplate::new(200),
        ResponseTemplate::new(200)
            .set_body_json(image_body(Some("image/png"), "AQID"))
            .set_delay(Duration::from_secs(5)),
    );
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(responder.clone())
        .mount(&server)
        .await;

    let client = Client::builder()
        .api_key("test-key")
        .base_url(server.uri())
        .timeout(1)
        .build()
        .unwrap();
    let err = client
        .images()
        .generate_image(GenerationRequest::new("a slow sunrise"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Timeout { .. }), "got {err:?}");
    assert_eq!(err.kind(), ErrorKind::Generation);
    assert_eq!(responder.count(), 1);
}

#[tokio::test]
async fn cancelling_during_backoff_stops_retries() {
    let server = MockServer::start().await;
    let responder = FailThenSucceed::new(usize::MAX, rate_limited(), ResponseTemplate::new(200));
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(responder.clone())
        .mount(&server)
        .await;

    let client = Client::builder()
        .api_key("test-key")
        .base_url(server.uri())
        .retry_options(HttpRetryOptions {
            max_retries: Some(3),
            base_delay_ms: Some(30_000),
            max_jitter_ms: Some(0),
        })
        .build()
        .unwrap();

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let err = client
        .images()
        .generate_image_with_cancellation(GenerationRequest::new("a paper crane"), &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Cancelled));
    assert!(started.elapsed() < Duration::from_secs(10));
    assert_eq!(responder.count(), 1);
}

#[tokio::test]
async fn cancelled_token_never_dispatches() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = support::build_client(&server.uri());
    let cancel = CancellationToken::new();
    cancel.cancel();
    let err = client
        .images()
        .generate_image_with_cancellation(GenerationRequest::new("a paper crane"), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Cancelled));
}
