//! Default payloads for freshly added blocks.

use crate::block::*;
use crate::style::{BlockStyle, TextAlign};

impl BlockContent {
    /// Content a new block of `block_type` starts with
    pub fn default_for(block_type: BlockType) -> BlockContent {
        match block_type {
            BlockType::Header => BlockContent::Header(TextContent {
                text: "새로운 제목".to_string(),
            }),
            BlockType::Text => BlockContent::Text(TextContent {
                text: "내용을 입력하세요.".to_string(),
            }),
            BlockType::Image => BlockContent::Image(ImageContent::default()),
            BlockType::Video => BlockContent::Video(VideoContent::default()),
            BlockType::Schedule => BlockContent::Schedule(ScheduleContent {
                title: "일정 제목".to_string(),
                ..Default::default()
            }),
            BlockType::BusinessInfo => BlockContent::BusinessInfo(BusinessInfoContent {
                title: "사업 안내".to_string(),
                description: Some("사업에 대한 자세한 설명을 입력하세요.".to_string()),
                items: vec![
                    BusinessInfoItem {
                        id: "1".to_string(),
                        label: "이용 대상".to_string(),
                        value: "누구나".to_string(),
                    },
                    BusinessInfoItem {
                        id: "2".to_string(),
                        label: "이용료".to_string(),
                        value: "무료".to_string(),
                    },
                ],
            }),
            BlockType::Map => BlockContent::Map(MapContent {
                location_name: "장소명".to_string(),
                address: "주소 입력".to_string(),
            }),
            BlockType::Form => BlockContent::Form(FormContent {
                button_text: "제출하기".to_string(),
                fields: vec![FormField {
                    id: "1".to_string(),
                    label: "이름".to_string(),
                    kind: FormFieldKind::Text,
                }],
            }),
            BlockType::Social => BlockContent::Social(SocialContent {
                links: vec![SocialLink {
                    id: "1".to_string(),
                    platform: SocialPlatform::Website,
                    url: String::new(),
                }],
            }),
            BlockType::Divider => BlockContent::Divider,
        }
    }
}

impl BlockStyle {
    /// Style a new block of `block_type` starts with
    pub fn default_for(block_type: BlockType) -> BlockStyle {
        let base = BlockStyle::default()
            .with_padding("16px")
            .with_background("#ffffff");

        match block_type {
            BlockType::Header => base.with_font_size("1.5rem").with_font_weight("bold"),
            BlockType::Image | BlockType::Map => base.with_padding("0px"),
            BlockType::Social => base.with_align(TextAlign::Center),
            _ => base,
        }
    }
}

impl Block {
    /// New block with the default content and style for its type
    pub fn with_defaults(id: impl Into<String>, block_type: BlockType) -> Block {
        Block::new(
            id,
            BlockContent::default_for(block_type),
            BlockStyle::default_for(block_type),
        )
    }
}
