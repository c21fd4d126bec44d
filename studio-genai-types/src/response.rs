use serde::{Deserialize, Serialize};

use crate::content::{Blob, Content};

/// 触发安全拦截的 finish reason。
pub const SAFETY_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "IMAGE_SAFETY",
    "IMAGE_PROHIBITED_CONTENT",
    "IMAGE_RECITATION",
    "RECITATION",
    "PROHIBITED_CONTENT",
    "BLOCKLIST",
    "SPII",
];

/// 生成内容响应。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<PromptFeedback>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_id: Option<String>,
}

impl GenerateContentResponse {
    /// 按候选顺序、part 顺序查找第一段非空内联数据。
    #[must_use]
    pub fn first_inline_data(&self) -> Option<&Blob> {
        self.candidates
            .iter()
            .filter_map(|candidate| candidate.content.as_ref())
            .find_map(Content::first_inline_data)
    }

    /// 提取第一段文本。
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.candidates
            .iter()
            .filter_map(|candidate| candidate.content.as_ref())
            .find_map(Content::first_text)
            .map(ToString::to_string)
    }

    /// Prompt 被拦截时返回拦截说明。
    #[must_use]
    pub fn block_message(&self) -> Option<String> {
        let feedback = self.prompt_feedback.as_ref()?;
        let reason = feedback.block_reason.as_deref()?;
        Some(
            feedback
                .block_reason_message
                .clone()
                .unwrap_or_else(|| format!("Prompt blocked: {reason}")),
        )
    }

    /// 第一个因安全原因结束的候选的 finish reason。
    #[must_use]
    pub fn safety_finish_reason(&self) -> Option<&str> {
        self.candidates
            .iter()
            .filter_map(|candidate| candidate.finish_reason.as_deref())
            .find(|reason| SAFETY_FINISH_REASONS.contains(reason))
    }
}

/// 响应候选。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,
}

/// Prompt 反馈。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_reason_message: Option<String>,
}

/// 用量统计。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_token_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates_token_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_token_count: Option<i32>,
}
