//! Client configuration and transport layer.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client as HttpClient, Proxy};
use studio_genai_types::http::HttpRetryOptions;
use studio_genai_types::models::DEFAULT_IMAGE_MODEL;

use crate::error::{Error, Result};
use crate::retry::RetryPolicy;

/// 单次请求的默认超时（秒）。
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
const DEFAULT_API_VERSION: &str = "v1beta";

/// 图片生成客户端。
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub http: HttpClient,
    pub config: ClientConfig,
    pub api_client: ApiClient,
}

/// 客户端配置（构建后只读）。
#[derive(Clone)]
pub struct ClientConfig {
    /// API 密钥。
    pub api_key: String,
    /// 模型 ID。
    pub model: String,
    /// HTTP 配置。
    pub http_options: HttpOptions,
    /// 限流重试策略。
    pub retry_policy: RetryPolicy,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("http_options", &self.http_options)
            .field("retry_policy", &self.retry_policy)
            .finish()
    }
}

/// HTTP 配置。
#[derive(Debug, Clone, Default)]
pub struct HttpOptions {
    /// 单次请求超时（秒），未设置时为 [`DEFAULT_TIMEOUT_SECS`]。
    pub timeout: Option<u64>,
    pub proxy: Option<String>,
    pub headers: HashMap<String, String>,
    pub base_url: Option<String>,
    pub api_version: Option<String>,
}

impl Client {
    /// 使用 API Key 创建客户端。
    ///
    /// # Errors
    /// 当 API Key 为空或无效时返回 [`Error::InvalidConfig`]。
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// 从环境变量创建客户端。
    ///
    /// 读取 `GEMINI_API_KEY`（回退 `GOOGLE_API_KEY`），以及可选的
    /// `GENAI_BASE_URL`、`GENAI_API_VERSION`、`GENAI_IMAGE_MODEL`。
    ///
    /// # Errors
    /// 当环境变量缺失或构建客户端失败时返回错误。
    pub fn from_env() -> Result<Self> {
        let api_key = non_empty_env("GEMINI_API_KEY")
            .or_else(|| non_empty_env("GOOGLE_API_KEY"))
            .ok_or_else(|| Error::InvalidConfig {
                message: "GEMINI_API_KEY or GOOGLE_API_KEY not found".into(),
            })?;
        let mut builder = Self::builder().api_key(api_key);
        if let Some(base_url) =
            non_empty_env("GENAI_BASE_URL").or_else(|| non_empty_env("GEMINI_BASE_URL"))
        {
            builder = builder.base_url(base_url);
        }
        if let Some(api_version) = non_empty_env("GENAI_API_VERSION") {
            builder = builder.api_version(api_version);
        }
        if let Some(model) = non_empty_env("GENAI_IMAGE_MODEL") {
            builder = builder.model(model);
        }
        builder.build()
    }

    /// 创建 Builder。
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// 访问图片生成 / 编辑 API。
    #[must_use]
    pub fn images(&self) -> crate::images::Images {
        crate::images::Images::new(self.inner.clone())
    }

    /// 当前配置。
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }
}

/// 客户端 Builder。
#[derive(Default)]
pub struct ClientBuilder {
    api_key: Option<String>,
    model: Option<String>,
    http_options: HttpOptions,
    retry_options: HttpRetryOptions,
}

impl ClientBuilder {
    /// 设置 API Key。
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// 设置模型 ID（默认 [`DEFAULT_IMAGE_MODEL`]）。
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// 设置单次请求超时（秒）。
    #[must_use]
    pub const fn timeout(mut self, secs: u64) -> Self {
        self.http_options.timeout = Some(secs);
        self
    }

    /// 设置代理。
    #[must_use]
    pub fn proxy(mut self, url: impl Into<String>) -> Self {
        self.http_options.proxy = Some(url.into());
        self
    }

    /// 增加默认 HTTP 头。
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.http_options.headers.insert(key.into(), value.into());
        self
    }

    /// 设置自定义基础 URL。
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.http_options.base_url = Some(base_url.into());
        self
    }

    /// 设置 API 版本。
    #[must_use]
    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.http_options.api_version = Some(api_version.into());
        self
    }

    /// 设置限流重试参数。
    #[must_use]
    pub const fn retry_options(mut self, options: HttpRetryOptions) -> Self {
        self.retry_options = options;
        self
    }

    /// 构建客户端。
    ///
    /// # Errors
    /// 当缺少 API Key、参数无效或构建 HTTP 客户端失败时返回错误。
    pub fn build(self) -> Result<Client> {
        let Self {
            api_key,
            model,
            http_options,
            retry_options,
        } = self;

        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::InvalidConfig {
                message: "API key required for image generation".into(),
            })?;
        let model = model
            .map(|model| model.trim().to_string())
            .filter(|model| !model.is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string());

        let headers = Self::build_headers(&http_options, &api_key)?;
        let http = Self::build_http_client(&http_options, headers)?;
        let config = ClientConfig {
            api_key,
            model,
            http_options,
            retry_policy: RetryPolicy::from_options(&retry_options),
        };
        let api_client = ApiClient::new(&config);

        Ok(Client {
            inner: Arc::new(ClientInner {
                http,
                config,
                api_client,
            }),
        })
    }

    fn build_headers(http_options: &HttpOptions, api_key: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (key, value) in &http_options.headers {
            let name =
                HeaderName::from_bytes(key.as_bytes()).map_err(|_| Error::InvalidConfig {
                    message: format!("Invalid header name: {key}"),
                })?;
            let value = HeaderValue::from_str(value).map_err(|_| Error::InvalidConfig {
                message: format!("Invalid header value for {key}"),
            })?;
            headers.insert(name, value);
        }

        let header_name = HeaderName::from_static("x-goog-api-key");
        if !headers.contains_key(&header_name) {
            let mut header_value =
                HeaderValue::from_str(api_key).map_err(|_| Error::InvalidConfig {
                    message: "Invalid API key value".into(),
                })?;
            header_value.set_sensitive(true);
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }

    fn build_http_client(http_options: &HttpOptions, headers: HeaderMap) -> Result<HttpClient> {
        let timeout = http_options.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let mut http_builder = HttpClient::builder()
            .timeout(Duration::from_secs(timeout))
            .default_headers(headers);

        if let Some(proxy_url) = &http_options.proxy {
            let proxy = Proxy::all(proxy_url).map_err(|e| Error::InvalidConfig {
                message: format!("Invalid proxy: {e}"),
            })?;
            http_builder = http_builder.proxy(proxy);
        }

        Ok(http_builder.build()?)
    }
}

impl ClientInner {
    /// 发送一次请求；超时单独映射为 [`Error::Timeout`]。
    ///
    /// # Errors
    /// 当请求构建或网络请求失败时返回错误。
    pub async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let request = request.build()?;
        self.http
            .execute(request)
            .await
            .map_err(Error::from_transport)
    }
}

pub(crate) struct ApiClient {
    pub base_url: String,
    pub api_version: String,
}

impl ApiClient {
    /// 创建 API 地址配置。
    pub fn new(config: &ClientConfig) -> Self {
        let base_url = config
            .http_options
            .base_url
            .as_deref()
            .map_or_else(|| DEFAULT_BASE_URL.to_string(), normalize_base_url);
        let api_version = config
            .http_options
            .api_version
            .clone()
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        Self {
            base_url,
            api_version,
        }
    }

    /// `{base}{version}/models/{model}:{method}`。
    pub fn model_method_url(&self, model: &str, method: &str) -> String {
        let model = if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        };
        format!("{}{}/{model}:{method}", self.base_url, self.api_version)
    }
}

fn normalize_base_url(base_url: &str) -> String {
    let mut value = base_url.trim().to_string();
    if !value.ends_with('/') {
        value.push('/');
    }
    value
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
}
