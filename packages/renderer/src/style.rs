//! Inline style resolution.
//!
//! Container properties default independently of each other. Font
//! properties only apply to Header and Text blocks and default per type.

use pamphlet_schema::{BlockStyle, BlockType, TextAlign};

pub const DEFAULT_BACKGROUND: &str = "transparent";
pub const DEFAULT_PADDING: &str = "16px";
pub const DEFAULT_TEXT_COLOR: &str = "inherit";

/// Resolved container style of a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerStyle {
    pub background_color: String,
    pub padding: String,
    pub color: String,
    pub text_align: TextAlign,
}

impl ContainerStyle {
    pub fn resolve(styles: &BlockStyle) -> Self {
        Self {
            background_color: non_empty(&styles.background_color)
                .unwrap_or(DEFAULT_BACKGROUND)
                .to_string(),
            padding: non_empty(&styles.padding)
                .unwrap_or(DEFAULT_PADDING)
                .to_string(),
            color: non_empty(&styles.text_color)
                .unwrap_or(DEFAULT_TEXT_COLOR)
                .to_string(),
            text_align: styles.text_align.unwrap_or(TextAlign::Left),
        }
    }

    /// CSS declarations in a fixed order
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        vec![
            ("background-color", self.background_color.clone()),
            ("padding", self.padding.clone()),
            ("color", self.color.clone()),
            ("text-align", self.text_align.as_str().to_string()),
        ]
    }
}

/// Resolved font style of a text-bearing block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStyle {
    pub font_size: String,
    pub font_weight: String,
}

impl TextStyle {
    /// `None` for block types without a text body
    pub fn resolve(block_type: BlockType, styles: &BlockStyle) -> Option<Self> {
        let (size, weight) = match block_type {
            BlockType::Header => ("1.5rem", "bold"),
            BlockType::Text => ("1rem", "normal"),
            _ => return None,
        };

        Some(Self {
            font_size: non_empty(&styles.font_size).unwrap_or(size).to_string(),
            font_weight: non_empty(&styles.font_weight).unwrap_or(weight).to_string(),
        })
    }
}

// An empty string is treated like an absent value
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_defaults() {
        let resolved = ContainerStyle::resolve(&BlockStyle::default());
        assert_eq!(resolved.background_color, "transparent");
        assert_eq!(resolved.padding, "16px");
        assert_eq!(resolved.color, "inherit");
        assert_eq!(resolved.text_align, TextAlign::Left);
    }

    #[test]
    fn test_fields_default_independently() {
        let styles = BlockStyle::default()
            .with_background("#eff6ff")
            .with_align(TextAlign::Right);
        let resolved = ContainerStyle::resolve(&styles);
        assert_eq!(resolved.background_color, "#eff6ff");
        assert_eq!(resolved.padding, "16px");
        assert_eq!(resolved.text_align, TextAlign::Right);
    }

    #[test]
    fn test_text_style_per_type() {
        let empty = BlockStyle::default();
        let header = TextStyle::resolve(BlockType::Header, &empty).unwrap();
        let text = TextStyle::resolve(BlockType::Text, &empty).unwrap();
        assert_eq!(header.font_size, "1.5rem");
        assert_eq!(header.font_weight, "bold");
        assert_eq!(text.font_size, "1rem");
        assert_eq!(text.font_weight, "normal");

        assert!(TextStyle::resolve(BlockType::Image, &empty).is_none());
    }

    #[test]
    fn test_text_style_override() {
        let styles = BlockStyle::default().with_font_size("2.25rem");
        let text = TextStyle::resolve(BlockType::Text, &styles).unwrap();
        assert_eq!(text.font_size, "2.25rem");
        assert_eq!(text.font_weight, "normal");
    }
}
