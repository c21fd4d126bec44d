use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// 风格标签。未识别的标签保存在 [`Style::Custom`] 中，不附加增强描述。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Style {
    ActionFigure,
    Superhero,
    Anime,
    Realistic,
    Vintage,
    Cartoon,
    Custom(String),
}

impl Style {
    /// 所有内置风格。
    pub const BUILTIN: [Self; 6] = [
        Self::ActionFigure,
        Self::Superhero,
        Self::Anime,
        Self::Realistic,
        Self::Vintage,
        Self::Cartoon,
    ];

    /// 风格标签（`action-figure` 等）。
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::ActionFigure => "action-figure",
            Self::Superhero => "superhero",
            Self::Anime => "anime",
            Self::Realistic => "realistic",
            Self::Vintage => "vintage",
            Self::Cartoon => "cartoon",
            Self::Custom(tag) => tag.as_str(),
        }
    }

    /// 面向提示词的可读名称。
    #[must_use]
    pub fn label(&self) -> String {
        self.tag().trim().replace('-', " ")
    }

    /// 风格增强描述；自定义风格返回 `None`。
    #[must_use]
    pub const fn enhancement(&self) -> Option<&'static str> {
        match self {
            Self::ActionFigure => Some(
                "as a detailed action figure with articulated joints, dynamic pose, heroic proportions",
            ),
            Self::Superhero => {
                Some("as a superhero with cape, mask, muscular build, dramatic lighting")
            }
            Self::Anime => Some("in anime art style with large eyes, vibrant colors, dynamic hair"),
            Self::Realistic => Some("photorealistic with professional lighting and composition"),
            Self::Vintage => {
                Some("in vintage photography style with sepia tones and classic composition")
            }
            Self::Cartoon => {
                Some("as a cartoon character with exaggerated features and bright colors")
            }
            Self::Custom(_) => None,
        }
    }
}

impl FromStr for Style {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        let style = Self::BUILTIN
            .into_iter()
            .find(|style| style.tag() == normalized)
            .unwrap_or_else(|| Self::Custom(value.to_string()));
        Ok(style)
    }
}

impl From<String> for Style {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(style) => style,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for Style {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Style> for String {
    fn from(style: Style) -> Self {
        match style {
            Style::Custom(tag) => tag,
            builtin => builtin.tag().to_string(),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
