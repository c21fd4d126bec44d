#![allow(dead_code)]

use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use wiremock::{Request, Respond, ResponseTemplate};

use studio_genai::types::http::HttpRetryOptions;
use studio_genai::Client;

pub const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash-image:generateContent";

pub fn build_client(base_url: &str) -> Client {
    Client::builder()
        .api_key("test-key")
        .base_url(base_url)
        .retry_options(no_delay_retry_options())
        .build()
        .unwrap()
}

pub fn no_delay_retry_options() -> HttpRetryOptions {
    HttpRetryOptions {
        max_retries: None,
        base_delay_ms: Some(0),
        max_jitter_ms: Some(0),
    }
}

pub fn image_body(mime_type: Option<&str>, data_base64: &str) -> Value {
    let mut inline = json!({ "data": data_base64 });
    if let Some(mime_type) = mime_type {
        inline["mimeType"] = json!(mime_type);
    }
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [
                    {"text": "Here is your image"},
                    {"inlineData": inline}
                ]
            },
            "finishReason": "STOP"
        }],
        "modelVersion": "gemini-2.5-flash-image"
    })
}

pub fn rate_limited() -> ResponseTemplate {
    ResponseTemplate::new(429).set_body_json(json!({
        "error": {
            "code": 429,
            "message": "Resource has been exhausted (e.g. check quota).",
            "status": "RESOURCE_EXHAUSTED"
        }
    }))
}

/// 前 `failures` 次返回 `failure`，之后返回 `success`。
#[derive(Clone)]
pub struct FailThenSucceed {
    pub calls: Arc<AtomicUsize>,
    pub failures: usize,
    pub failure: ResponseTemplate,
    pub success: ResponseTemplate,
}

impl FailThenSucceed {
    pub fn new(failures: usize, failure: ResponseTemplate, success: ResponseTemplate) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            failures,
            failure,
            success,
        }
    }

    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Respond for FailThenSucceed {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let idx = self.calls.fetch_add(1, Ordering::SeqCst);
        if idx < self.failures {
            self.failure.clone()
        } else {
            self.success.clone()
        }
    }
}
