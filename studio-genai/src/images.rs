//! Image generation and editing API surface.

use std::sync::Arc;

use studio_genai_types::content::{Content, Part, Role};
use studio_genai_types::images::{GenerationMode, GenerationRequest, GenerationResult};
use studio_genai_types::models::{GenerateContentRequest, GenerationConfig};
use studio_genai_types::response::GenerateContentResponse;
use tokio_util::sync::CancellationToken;

use crate::client::ClientInner;
use crate::error::{Error, Result};
use crate::http_response::api_error_from_response;
use crate::prompt::{edit_prompt, enhance_prompt};
use crate::retry::execute_with_retry;

#[derive(Clone)]
pub struct Images {
    pub(crate) inner: Arc<ClientInner>,
}

impl Images {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// 文生图。
    ///
    /// # Errors
    /// 提示词为空、请求携带源图、限流超过重试上限（[`Error::QuotaExceeded`]）、
    /// 响应中没有图片或其他请求失败时返回错误。
    pub async fn generate_image(&self, request: GenerationRequest) -> Result<GenerationResult> {
        self.generate_image_with_cancellation(request, &CancellationToken::new())
            .await
    }

    /// 文生图（可取消）。取消后返回 [`Error::Cancelled`]，不会再发起重试。
    ///
    /// # Errors
    /// 同 [`Images::generate_image`]。
    pub async fn generate_image_with_cancellation(
        &self,
        request: GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<GenerationResult> {
        let prompt = validated_prompt(&request)?;
        if request.source_image.is_some() {
            return Err(Error::InvalidRequest {
                message: "request carries a source image; use edit_image instead".into(),
            });
        }

        let enhanced = enhance_prompt(prompt, request.style.as_ref());
        let body = GenerateContentRequest {
            contents: vec![Content::user(enhanced)],
            generation_config: Some(GenerationConfig::image_output(request.aspect_ratio)),
        };
        self.dispatch(GenerationMode::Generate, &body, cancel).await
    }

    /// 图生图：按提示词与风格变换源图片。
    ///
    /// # Errors
    /// 缺少源图或源图为空、提示词为空、限流超过重试上限、响应中没有编辑后的图片
    /// 或其他请求失败时返回错误。
    pub async fn edit_image(&self, request: GenerationRequest) -> Result<GenerationResult> {
        self.edit_image_with_cancellation(request, &CancellationToken::new())
            .await
    }

    /// 图生图（可取消）。
    ///
    /// # Errors
    /// 同 [`Images::edit_image`]。
    pub async fn edit_image_with_cancellation(
        &self,
        request: GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<GenerationResult> {
        let instruction = edit_prompt(validated_prompt(&request)?, request.style.as_ref());
        let Some(source) = request.source_image else {
            return Err(Error::InvalidRequest {
                message: "edit_image requires a source image".into(),
            });
        };
        if source.data.is_empty() {
            return Err(Error::InvalidRequest {
                message: "source image is empty".into(),
            });
        }
        let mime_type = source.mime_type.trim();
        if mime_type.is_empty() {
            return Err(Error::InvalidRequest {
                message: "source image mime type is missing".into(),
            });
        }
        if !mime_type.starts_with("image/") {
            return Err(Error::InvalidRequest {
                message: format!("source is not an image ({mime_type})"),
            });
        }

        let parts = vec![
            Part::text(instruction),
            Part::inline_data(source.data, mime_type),
        ];
        let body = GenerateContentRequest {
            contents: vec![Content::from_parts(parts, Role::User)],
            generation_config: Some(GenerationConfig::image_output(request.aspect_ratio)),
        };
        self.dispatch(GenerationMode::Edit, &body, cancel).await
    }

    async fn dispatch(
        &self,
        mode: GenerationMode,
        body: &GenerateContentRequest,
        cancel: &CancellationToken,
    ) -> Result<GenerationResult> {
        let url = self
            .inner
            .api_client
            .model_method_url(&self.inner.config.model, "generateContent");
        let url = url.as_str();
        let policy = self.inner.config.retry_policy;

        let response = execute_with_retry(&policy, cancel, move |_attempt| async move {
            self.send_once(url, body).await
        })
        .await?;

        let result = decode_image_response(mode, response)?;
        tracing::info!(
            ?mode,
            bytes = result.data.len(),
            mime_type = %result.mime_type,
            "image generated"
        );
        Ok(result)
    }

    async fn send_once(
        &self,
        url: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let request = self.inner.http.post(url).json(body);
        let response = self.inner.send(request).await?;
        if !response.status().is_success() {
            return Err(api_error_from_response(response).await);
        }
        let text = response.text().await.map_err(Error::from_transport)?;
        Ok(serde_json::from_str(&text)?)
    }
}

fn validated_prompt(request: &GenerationRequest) -> Result<&str> {
    request.trimmed_prompt().ok_or_else(|| Error::InvalidRequest {
        message: "prompt must not be empty".into(),
    })
}

/// 从响应中取出第一张图片。
pub(crate) fn decode_image_response(
    mode: GenerationMode,
    response: GenerateContentResponse,
) -> Result<GenerationResult> {
    if let Some(message) = response.block_message() {
        return Err(Error::ContentBlocked { message });
    }

    if let Some(blob) = response.first_inline_data() {
        return Ok(GenerationResult {
            data: blob.data.clone(),
            mime_type: blob.mime_type_or_default().to_string(),
            text: response.text(),
            model_version: response.model_version.clone(),
        });
    }

    if let Some(reason) = response.safety_finish_reason() {
        return Err(Error::ContentBlocked {
            message: format!("Content blocked by safety filter: {reason}"),
        });
    }

    let mut message = match mode {
        GenerationMode::Generate => "no image part in response".to_string(),
        GenerationMode::Edit => "no edited image part in response".to_string(),
    };
    if let Some(text) = response.text() {
        message.push_str(": ");
        message.push_str(&text);
    }
    Err(Error::NoImage { message })
}
