use crate::client::Client;
use std::sync::Mutex;
use studio_genai_types::http::HttpRetryOptions;

static ENV_LOCK: Mutex<()> = Mutex::new(());

pub fn with_env(vars: &[(&str, Option<&str>)], f: impl FnOnce()) {
    let _guard = ENV_LOCK.lock().unwrap();
    let backup: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(key, _)| ((*key).to_string(), std::env::var(key).ok()))
        .collect();
    for (key, value) in vars {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
    f();
    for (key, value) in backup {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}

/// 指向 mock server、无退避延迟的测试客户端。
pub fn test_client(base_url: &str) -> Client {
    Client::builder()
        .api_key("test-key")
        .base_url(base_url)
        .retry_options(HttpRetryOptions {
            max_retries: None,
            base_delay_ms: Some(0),
            max_jitter_ms: Some(0),
        })
        .build()
        .unwrap()
}
