//! Bounded retry with exponential backoff for rate-limited dispatches.
//!
//! Only rate-limit signals (HTTP 429 or a `RESOURCE_EXHAUSTED` envelope) are
//! retried. Every other failure is returned on first occurrence.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use studio_genai_types::http::HttpRetryOptions;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};

/// 默认最大重试次数（不含首次请求）。
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// 默认退避基础延迟。
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(500);
/// 默认抖动上限（不含）。
pub const DEFAULT_MAX_JITTER: Duration = Duration::from_millis(100);

const RATE_LIMIT_STATUS_NAMES: &[&str] = &["RESOURCE_EXHAUSTED", "TOO_MANY_REQUESTS"];

/// 失败分类。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// 限流 / 额度类瞬时失败，可退避重试。
    RateLimited,
    /// 不可重试，直接返回调用方。
    NonRetryable,
}

/// 根据规范化的状态码与状态名对失败分类。
#[must_use]
pub fn classify_failure(status: Option<u16>, status_name: Option<&str>) -> FailureClass {
    if status == Some(429) {
        return FailureClass::RateLimited;
    }
    let named = status_name.is_some_and(|name| {
        let name = name.trim();
        RATE_LIMIT_STATUS_NAMES
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(name))
    });
    if named {
        FailureClass::RateLimited
    } else {
        FailureClass::NonRetryable
    }
}

fn classify_error(err: &Error) -> FailureClass {
    match err {
        Error::ApiError {
            status,
            status_name,
            ..
        } => classify_failure(Some(*status), status_name.as_deref()),
        _ => FailureClass::NonRetryable,
    }
}

/// 重试策略。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
            max_jitter: DEFAULT_MAX_JITTER,
        }
    }
}

impl RetryPolicy {
    /// 用配置覆盖默认值。
    #[must_use]
    pub fn from_options(options: &HttpRetryOptions) -> Self {
        let defaults = Self::default();
        Self {
            max_retries: options.max_retries.unwrap_or(defaults.max_retries),
            base_delay: options
                .base_delay_ms
                .map_or(defaults.base_delay, Duration::from_millis),
            max_jitter: options
                .max_jitter_ms
                .map_or(defaults.max_jitter, Duration::from_millis),
        }
    }

    /// 单次逻辑调用的最大请求次数。
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// 第 `attempt` 次失败后的等待时长：`base_delay * 2^attempt + jitter`。
    #[must_use]
    pub fn backoff_delay(&self, attempt: u32, jitter: Duration) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor).saturating_add(jitter)
    }

    fn sample_jitter(&self) -> Duration {
        let max_ms = u64::try_from(self.max_jitter.as_millis()).unwrap_or(u64::MAX);
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..max_ms))
    }
}

/// 执行 `dispatch`，遇到限流时按策略退避重试。
///
/// `dispatch` 接收从 0 开始的尝试序号。取消信号同时作用于进行中的请求和退避等待，
/// 触发后不再发起新的尝试。
pub(crate) async fn execute_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    cancel: &CancellationToken,
    mut dispatch: F,
) -> Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt: u32 = 0;
    loop {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        tracing::debug!(attempt, "dispatching generation request");
        let outcome = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(Error::Cancelled),
            outcome = dispatch(attempt) => outcome,
        };

        let err = match outcome {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if classify_error(&err) == FailureClass::NonRetryable {
            tracing::debug!(attempt, error = %err, "non-retryable failure");
            return Err(err);
        }

        if attempt >= policy.max_retries {
            let attempts = attempt + 1;
            tracing::error!(attempts, "rate limit persisted past retry bound");
            let message = match err {
                Error::ApiError { message, .. } => message,
                other => other.to_string(),
            };
            return Err(Error::QuotaExceeded { attempts, message });
        }

        let delay = policy.backoff_delay(attempt, policy.sample_jitter());
        tracing::warn!(
            attempt,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "rate limited, retrying after backoff"
        );
        tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(Error::Cancelled),
            () = tokio::time::sleep(delay) => {}
        }
        attempt += 1;
    }
}
