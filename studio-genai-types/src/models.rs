use serde::{Deserialize, Serialize};

use crate::content::Content;

/// 默认图片模型。
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// `generateContent` 请求体。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// 生成配置。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<Modality>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
}

impl GenerationConfig {
    /// 图片输出配置：文本 + 图片模态，可选宽高比。
    #[must_use]
    pub fn image_output(aspect_ratio: Option<String>) -> Self {
        Self {
            response_modalities: Some(vec![Modality::Text, Modality::Image]),
            image_config: aspect_ratio.map(|aspect_ratio| ImageConfig {
                aspect_ratio: Some(aspect_ratio),
            }),
        }
    }
}

/// 图片输出配置。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
}

/// Response modalities for generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Modality {
    ModalityUnspecified,
    Text,
    Image,
    Audio,
}
