//! Prompt construction for generation and edit requests.

use studio_genai_types::style::Style;

/// 附加在每个提示词末尾的质量描述。
pub const QUALITY_SUFFIX: &str =
    "High quality, highly detailed, sharp focus, professional composition.";

/// 编辑请求未指定风格时使用的风格名称。
pub const DEFAULT_EDIT_STYLE_LABEL: &str = "action figure";

/// 文生图增强提示词：原始提示词 + 风格描述 + 质量后缀。
#[must_use]
pub fn enhance_prompt(prompt: &str, style: Option<&Style>) -> String {
    let mut enhanced = prompt.trim().trim_end_matches('.').to_string();
    if let Some(clause) = style.and_then(Style::enhancement) {
        enhanced.push(' ');
        enhanced.push_str(clause);
    }
    enhanced.push_str(". ");
    enhanced.push_str(QUALITY_SUFFIX);
    enhanced
}

/// 图生图编辑指令：说明变换内容与风格，并要求保留主体特征和光照。
#[must_use]
pub fn edit_prompt(prompt: &str, style: Option<&Style>) -> String {
    let label = style
        .map(Style::label)
        .filter(|label| !label.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_EDIT_STYLE_LABEL.to_string());
    let mut instruction = format!(
        "Transform this image: {}. Style: {label}",
        prompt.trim().trim_end_matches('.')
    );
    if let Some(clause) = style.and_then(Style::enhancement) {
        instruction.push_str(" (");
        instruction.push_str(clause);
        instruction.push(')');
    }
    instruction.push_str(
        ". Preserve the subject's identity, key facial features and pose, \
         and keep the original lighting. ",
    );
    instruction.push_str(QUALITY_SUFFIX);
    instruction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enhance_prompt_appends_clause_and_suffix() {
        let enhanced = enhance_prompt("  a corgi astronaut ", Some(&Style::Anime));
        assert_eq!(
            enhanced,
            "a corgi astronaut in anime art style with large eyes, vibrant colors, dynamic hair. \
             High quality, highly detailed, sharp focus, professional composition."
        );
    }

    #[test]
    fn enhance_prompt_is_deterministic() {
        let first = enhance_prompt("a lighthouse", Some(&Style::Vintage));
        let second = enhance_prompt("a lighthouse", Some(&Style::Vintage));
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_or_missing_style_adds_no_clause() {
        let plain = enhance_prompt("a lighthouse", None);
        assert_eq!(plain, format!("a lighthouse. {QUALITY_SUFFIX}"));
        let custom = enhance_prompt("a lighthouse", Some(&Style::from("watercolor")));
        assert_eq!(custom, plain);
    }

    #[test]
    fn edit_prompt_defaults_to_action_figure_label() {
        let instruction = edit_prompt("turn me into a toy", None);
        assert!(instruction.starts_with("Transform this image: turn me into a toy. Style: action figure."));
        assert!(instruction.contains("Preserve the subject's identity"));
        assert!(instruction.contains("original lighting"));
        assert!(instruction.ends_with(QUALITY_SUFFIX));
    }

    #[test]
    fn blank_style_falls_back_to_action_figure_label() {
        for blank in ["", "   "] {
            let instruction = edit_prompt("turn me into a toy", Some(&Style::from(blank)));
            assert!(
                instruction.starts_with("Transform this image: turn me into a toy. Style: action figure."),
                "{instruction}"
            );
        }
    }

    #[test]
    fn edit_prompt_names_style_and_clause() {
        let instruction = edit_prompt("make it heroic.", Some(&Style::Superhero));
        assert!(instruction.contains("make it heroic. Style: superhero (as a superhero"));
        let custom = edit_prompt("paint it", Some(&Style::from("oil painting")));
        assert!(custom.contains("Style: oil painting. Preserve"));
    }
}
