use crate::base64_serde;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// 上游未声明 mime 类型时使用的通用图片类型。
pub const DEFAULT_IMAGE_MIME_TYPE: &str = "image/png";

/// 对话内容。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// 角色：user/model。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// 消息内容片段（有序）。
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// 创建用户文本消息。
    pub fn user(text: impl Into<String>) -> Self {
        Self::from_parts(vec![Part::text(text)], Role::User)
    }

    /// 从 parts 构建内容。
    #[must_use]
    pub const fn from_parts(parts: Vec<Part>, role: Role) -> Self {
        Self {
            role: Some(role),
            parts,
        }
    }

    /// 提取第一段文本。
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.parts.iter().find_map(Part::text_value)
    }

    /// 提取第一段非空内联数据。
    #[must_use]
    pub fn first_inline_data(&self) -> Option<&Blob> {
        self.parts.iter().find_map(Part::inline_data_ref)
    }
}

/// 内容角色。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// 内容部分。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// 具体内容变体。
    #[serde(flatten)]
    pub kind: PartKind,
    /// 是否为思考内容。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
}

impl Part {
    /// 创建文本 Part。
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: PartKind::Text { text: text.into() },
            thought: None,
        }
    }

    /// 创建内联二进制数据 Part。
    pub fn inline_data(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            kind: PartKind::InlineData {
                inline_data: Blob {
                    mime_type: Some(mime_type.into()),
                    data,
                },
            },
            thought: None,
        }
    }

    /// 获取文本内容（仅当为 Text Part）。
    #[must_use]
    pub const fn text_value(&self) -> Option<&str> {
        match &self.kind {
            PartKind::Text { text } => Some(text.as_str()),
            _ => None,
        }
    }

    /// 获取内联数据（仅当负载非空）。
    #[must_use]
    pub fn inline_data_ref(&self) -> Option<&Blob> {
        match &self.kind {
            PartKind::InlineData { inline_data } if !inline_data.data.is_empty() => {
                Some(inline_data)
            }
            _ => None,
        }
    }
}

/// 内容部分的具体变体。
///
/// `inlineData` 负载无法解码（例如非法 base64）时反序列化失败，不会退化为 [`PartKind::Other`]。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", untagged)]
pub enum PartKind {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: Blob,
    },
    /// 本客户端不处理的其他 part（函数调用、代码执行等），原样保留。
    Other(Map<String, Value>),
}

impl<'de> Deserialize<'de> for PartKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = Map::<String, Value>::deserialize(deserializer)?;
        if let Some(inline_data) = map.remove("inlineData") {
            let inline_data = Blob::deserialize(inline_data).map_err(de::Error::custom)?;
            return Ok(Self::InlineData { inline_data });
        }
        if let Some(Value::String(text)) = map.get("text") {
            return Ok(Self::Text { text: text.clone() });
        }
        Ok(Self::Other(map))
    }
}

/// 二进制数据。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, with = "base64_serde")]
    pub data: Vec<u8>,
}

impl Blob {
    /// 声明的 mime 类型；缺失或为空时回退到 [`DEFAULT_IMAGE_MIME_TYPE`]。
    #[must_use]
    pub fn mime_type_or_default(&self) -> &str {
        self.mime_type
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_IMAGE_MIME_TYPE)
    }
}
