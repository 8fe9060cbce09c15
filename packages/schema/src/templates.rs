//! Starting block sequences for each template.

use crate::block::*;
use crate::project::TemplateType;
use crate::style::{BlockStyle, TextAlign};

/// Fresh copy of the starting blocks for `template`
pub fn initial_blocks(template: TemplateType) -> Vec<Block> {
    match template {
        TemplateType::Invitation => invitation(),
        TemplateType::Newsletter => newsletter(),
        TemplateType::Promotion => promotion(),
    }
}

fn header(text: &str, styles: BlockStyle) -> Block {
    Block::new(
        "default-header",
        BlockContent::Header(TextContent {
            text: text.to_string(),
        }),
        styles,
    )
}

fn sign_up_form(button_text: &str) -> Block {
    Block::new(
        "default-form",
        BlockContent::Form(FormContent {
            button_text: button_text.to_string(),
            fields: vec![
                FormField {
                    id: "f1".to_string(),
                    label: "성함".to_string(),
                    kind: FormFieldKind::Text,
                },
                FormField {
                    id: "f2".to_string(),
                    label: "연락처".to_string(),
                    kind: FormFieldKind::Tel,
                },
            ],
        }),
        BlockStyle::default()
            .with_padding("20px")
            .with_background("#ffffff"),
    )
}

fn invitation() -> Vec<Block> {
    vec![
        header(
            "2024년 복지관 개관 기념행사",
            BlockStyle::default()
                .with_align(TextAlign::Center)
                .with_font_size("1.5rem")
                .with_font_weight("bold")
                .with_padding("20px")
                .with_background("#ffffff")
                .with_text_color("#1f2937"),
        ),
        Block::new(
            "default-schedule",
            BlockContent::Schedule(ScheduleContent {
                title: "행사 일시".to_string(),
                start_date: "2024-05-20T14:00".to_string(),
                end_date: "2024-05-20T17:00".to_string(),
                location: "복지관 1층 대강당".to_string(),
            }),
            BlockStyle::default()
                .with_padding("16px")
                .with_background("#f9fafb"),
        ),
        Block::new(
            "default-map",
            BlockContent::Map(MapContent {
                location_name: "서울시 행복복지관".to_string(),
                address: "서울시 강남구 테헤란로 123".to_string(),
            }),
            BlockStyle::default().with_padding("0px"),
        ),
        sign_up_form("참석 여부 제출하기"),
    ]
}

fn newsletter() -> Vec<Block> {
    vec![
        header(
            "5월의 복지 소식",
            BlockStyle::default()
                .with_align(TextAlign::Center)
                .with_font_size("1.8rem")
                .with_font_weight("bold")
                .with_padding("30px")
                .with_background("#3b82f6")
                .with_text_color("#ffffff"),
        ),
        Block::new(
            "default-text",
            BlockContent::Text(TextContent {
                text: "안녕하세요. 이번 달 복지관의 다양한 소식을 전해드립니다. 따뜻한 봄날, 행복한 하루 보내세요."
                    .to_string(),
            }),
            BlockStyle::default()
                .with_padding("20px")
                .with_font_size("1rem")
                .with_background("#ffffff"),
        ),
        Block::new(
            "default-image",
            BlockContent::Image(ImageContent {
                url: "https://picsum.photos/600/400".to_string(),
                alt: "활동 사진".to_string(),
                caption: None,
            }),
            BlockStyle::default().with_padding("0px"),
        ),
        Block::new(
            "default-social",
            BlockContent::Social(SocialContent {
                links: vec![
                    SocialLink {
                        id: "s1".to_string(),
                        platform: SocialPlatform::Website,
                        url: "https://welfareone.com".to_string(),
                    },
                    SocialLink {
                        id: "s2".to_string(),
                        platform: SocialPlatform::Youtube,
                        url: "https://youtube.com".to_string(),
                    },
                ],
            }),
            BlockStyle::default()
                .with_padding("16px")
                .with_background("#f3f4f6")
                .with_align(TextAlign::Center),
        ),
    ]
}

fn promotion() -> Vec<Block> {
    let item = |id: &str, label: &str, value: &str| BusinessInfoItem {
        id: id.to_string(),
        label: label.to_string(),
        value: value.to_string(),
    };

    vec![
        header(
            "신규 프로그램 모집",
            BlockStyle::default()
                .with_align(TextAlign::Left)
                .with_font_size("1.5rem")
                .with_font_weight("bold")
                .with_padding("20px")
                .with_background("#ffffff"),
        ),
        Block::new(
            "default-biz",
            BlockContent::BusinessInfo(BusinessInfoContent {
                title: "스마트폰 활용 교육".to_string(),
                description: Some(
                    "어르신들의 디지털 격차 해소를 위한 스마트폰 기초 및 활용 교육 프로그램입니다."
                        .to_string(),
                ),
                items: vec![
                    item("1", "대상", "60세 이상 어르신"),
                    item("2", "이용료", "무료"),
                    item("3", "기간", "5월 ~ 7월 (매주 화)"),
                ],
            }),
            BlockStyle::default()
                .with_padding("16px")
                .with_background("#eff6ff"),
        ),
        sign_up_form("신청하기"),
    ]
}
