//! Error definitions for the client.

use thiserror::Error;

/// 额度 / 计费排查指引，附在 [`Error::QuotaExceeded`] 上。
pub const QUOTA_GUIDANCE: &str = "check your plan, quota and billing at https://aistudio.google.com/ \
(rate limits: https://ai.google.dev/gemini-api/docs/rate-limits)";

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP client error: {source}")]
    HttpClient {
        #[from]
        source: reqwest::Error,
    },

    #[error("API error (status {status}): {message}")]
    ApiError {
        status: u16,
        /// 上游错误包装中的状态名，例如 `RESOURCE_EXHAUSTED`。
        status_name: Option<String>,
        message: String,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Quota exceeded after {attempts} attempts: {message}; {}", QUOTA_GUIDANCE)]
    QuotaExceeded { attempts: u32, message: String },

    #[error("No image in response: {message}")]
    NoImage { message: String },

    #[error("Content blocked: {message}")]
    ContentBlocked { message: String },

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Timeout: {message}")]
    Timeout { message: String },

    #[error("Request cancelled")]
    Cancelled,
}

/// 面向调用方的稳定错误分类。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 凭据缺失或配置无效，仅在构建客户端时出现。
    Configuration,
    /// 限流在重试上限后仍未恢复。
    QuotaExceeded,
    /// 其他所有失败。
    Generation,
}

impl Error {
    /// 错误所属分类。
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConfig { .. } => ErrorKind::Configuration,
            Self::QuotaExceeded { .. } => ErrorKind::QuotaExceeded,
            _ => ErrorKind::Generation,
        }
    }

    /// 传输层错误转换：超时单独归类。
    pub(crate) fn from_transport(source: reqwest::Error) -> Self {
        if source.is_timeout() {
            return Self::Timeout {
                message: source.to_string(),
            };
        }
        Self::HttpClient { source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
