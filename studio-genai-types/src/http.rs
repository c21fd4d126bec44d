use serde::{Deserialize, Serialize};

/// 重试配置（未设置的字段使用客户端默认值）。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HttpRetryOptions {
    /// 首次请求之后的最大重试次数。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
    /// 指数退避的基础延迟（毫秒）。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_delay_ms: Option<u64>,
    /// 随机抖动上限（毫秒，不含）。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_jitter_ms: Option<u64>,
}

/// 上游错误响应包装：`{"error": {...}}`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

/// 上游错误详情。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// 规范化状态名，例如 `RESOURCE_EXHAUSTED`。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_google_error_envelope() {
        let envelope: ApiErrorEnvelope = serde_json::from_value(json!({
            "error": {
                "code": 429,
                "message": "Resource has been exhausted (e.g. check quota).",
                "status": "RESOURCE_EXHAUSTED",
                "details": []
            }
        }))
        .unwrap();
        assert_eq!(envelope.error.code, Some(429));
        assert_eq!(envelope.error.status.as_deref(), Some("RESOURCE_EXHAUSTED"));
    }

    #[test]
    fn retry_options_skip_unset_fields() {
        let options = HttpRetryOptions {
            max_retries: Some(5),
            ..Default::default()
        };
        let value = serde_json::to_value(options).unwrap();
        assert_eq!(value, json!({"maxRetries": 5}));
    }
}
