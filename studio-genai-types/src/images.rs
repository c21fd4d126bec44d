use serde::{Deserialize, Serialize};

use crate::style::Style;

/// 请求模式：无源图为生成，有源图为编辑。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    Generate,
    Edit,
}

/// 待编辑的源图片。
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceImage {
    #[serde(with = "crate::base64_serde")]
    pub data: Vec<u8>,
    pub mime_type: String,
}

impl SourceImage {
    /// 从字节和 mime 类型创建。
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
        }
    }
}

impl std::fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceImage")
            .field("bytes", &self.data.len())
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

/// 图片生成/编辑请求。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// 描述期望输出的提示词（去除首尾空白后不可为空）。
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_image: Option<SourceImage>,
    /// 输出宽高比，例如 `1:1`、`16:9`。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
}

impl GenerationRequest {
    /// 创建文生图请求。
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    /// 创建图生图（编辑）请求。
    pub fn edit(prompt: impl Into<String>, source_image: SourceImage) -> Self {
        Self {
            prompt: prompt.into(),
            source_image: Some(source_image),
            ..Default::default()
        }
    }

    /// 设置风格。
    #[must_use]
    pub fn with_style(mut self, style: impl Into<Style>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// 设置宽高比。
    #[must_use]
    pub fn with_aspect_ratio(mut self, aspect_ratio: impl Into<String>) -> Self {
        self.aspect_ratio = Some(aspect_ratio.into());
        self
    }

    /// 请求模式。
    #[must_use]
    pub const fn mode(&self) -> GenerationMode {
        if self.source_image.is_some() {
            GenerationMode::Edit
        } else {
            GenerationMode::Generate
        }
    }

    /// 去除首尾空白后的提示词；为空时返回 `None`。
    #[must_use]
    pub fn trimmed_prompt(&self) -> Option<&str> {
        let prompt = self.prompt.trim();
        (!prompt.is_empty()).then_some(prompt)
    }
}

/// 生成结果（字节 + mime 类型，不做解码）。
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    #[serde(with = "crate::base64_serde")]
    pub data: Vec<u8>,
    pub mime_type: String,
    /// 模型随图片返回的文字说明。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
}

impl GenerationResult {
    /// 根据 mime 类型推断文件扩展名。
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/png" => "png",
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            "image/bmp" => "bmp",
            "image/tiff" => "tiff",
            _ => "bin",
        }
    }
}

impl std::fmt::Debug for GenerationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationResult")
            .field("bytes", &self.data.len())
            .field("mime_type", &self.mime_type)
            .field("text", &self.text)
            .field("model_version", &self.model_version)
            .finish()
    }
}
