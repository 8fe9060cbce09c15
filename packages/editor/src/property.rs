//! # Property Binding
//!
//! Describes the editable fields of a block and turns a single field edit
//! into an `UpdateBlock` patch. Every edit merges one field into the
//! block's current content or style; nested lists are always replaced as a
//! whole array.

use crate::errors::{EditorError, EditorResult};
use crate::mutations::BlockPatch;
use pamphlet_schema::*;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub const PADDING_OPTIONS: &[(&str, &str)] = &[
    ("0px", "없음"),
    ("8px", "좁게"),
    ("16px", "보통"),
    ("32px", "넓게"),
];

pub const FONT_SIZE_OPTIONS: &[(&str, &str)] = &[
    ("0.75rem", "매우 작게 (XS)"),
    ("0.875rem", "작게 (S)"),
    ("1rem", "보통 (M)"),
    ("1.25rem", "중간 (L)"),
    ("1.5rem", "크게 (XL)"),
    ("1.875rem", "더 크게 (2XL)"),
    ("2.25rem", "매우 크게 (3XL)"),
];

pub const FONT_WEIGHT_OPTIONS: &[(&str, &str)] = &[
    ("300", "얇게"),
    ("400", "보통"),
    ("500", "중간"),
    ("700", "굵게"),
];

pub const TEXT_ALIGN_OPTIONS: &[(&str, &str)] = &[
    ("left", "왼쪽"),
    ("center", "가운데"),
    ("right", "오른쪽"),
];

pub const FORM_FIELD_TYPE_OPTIONS: &[(&str, &str)] = &[
    ("text", "문자"),
    ("email", "이메일"),
    ("tel", "전화"),
];

pub const PLATFORM_OPTIONS: &[(&str, &str)] = &[
    ("website", "홈페이지/기타"),
    ("youtube", "유튜브"),
    ("instagram", "인스타그램"),
    ("blog", "네이버 블로그"),
    ("kakao", "카카오톡 채널"),
];

/// How a field is edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInput {
    Text,
    TextArea,
    Url,
    DateTime,
    Color,
    Choice(&'static [(&'static str, &'static str)]),
}

/// One editable field with its current value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub input: FieldInput,
    pub value: String,
}

impl FieldSpec {
    fn new(key: &'static str, label: &'static str, input: FieldInput, value: impl Into<String>) -> Self {
        Self {
            key,
            label,
            input,
            value: value.into(),
        }
    }
}

/// Nested list inside a block's content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    BusinessItems,
    FormFields,
    SocialLinks,
}

impl ListKind {
    pub fn label(&self) -> &'static str {
        match self {
            ListKind::BusinessItems => "상세 항목",
            ListKind::FormFields => "입력 필드",
            ListKind::SocialLinks => "소셜 링크",
        }
    }

    /// List carried by blocks of `block_type`, if any
    pub fn for_type(block_type: BlockType) -> Option<ListKind> {
        match block_type {
            BlockType::BusinessInfo => Some(ListKind::BusinessItems),
            BlockType::Form => Some(ListKind::FormFields),
            BlockType::Social => Some(ListKind::SocialLinks),
            _ => None,
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ListKind::BusinessItems => "items",
            ListKind::FormFields => "fields",
            ListKind::SocialLinks => "links",
        })
    }
}

impl FromStr for ListKind {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "items" => Ok(ListKind::BusinessItems),
            "fields" => Ok(ListKind::FormFields),
            "links" => Ok(ListKind::SocialLinks),
            other => Err(EditorError::Validation(format!("unknown list '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItemView {
    pub id: String,
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSpec {
    pub kind: ListKind,
    pub items: Vec<ListItemView>,
}

/// Editable fields of one block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyForm {
    pub block_id: String,
    pub type_name: String,
    pub content: Vec<FieldSpec>,
    pub list: Option<ListSpec>,
    pub styles: Vec<FieldSpec>,
    /// Header and Text blocks offer AI rewriting
    pub can_enhance: bool,
}

impl PropertyForm {
    pub fn for_block(block: &Block) -> Self {
        let block_type = block.block_type();

        Self {
            block_id: block.id.clone(),
            type_name: block.content.type_name().to_string(),
            content: content_fields(&block.content),
            list: list_spec(&block.content),
            styles: style_fields(block_type, &block.styles),
            can_enhance: block_type.is_some_and(|t| t.is_text_bearing()),
        }
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.content.iter().chain(self.styles.iter()).find(|f| f.key == key)
    }
}

fn content_fields(content: &BlockContent) -> Vec<FieldSpec> {
    use FieldInput::*;

    match content {
        BlockContent::Header(c) | BlockContent::Text(c) => {
            vec![FieldSpec::new("text", "내용", TextArea, c.text.as_str())]
        }
        BlockContent::Image(c) => vec![
            FieldSpec::new("url", "이미지 URL", Url, c.url.as_str()),
            FieldSpec::new("alt", "설명 (Alt Text)", Text, c.alt.as_str()),
            FieldSpec::new("caption", "캡션", Text, c.caption.clone().unwrap_or_default()),
        ],
        BlockContent::Video(c) => vec![FieldSpec::new("url", "YouTube URL", Url, c.url.as_str())],
        BlockContent::Schedule(c) => vec![
            FieldSpec::new("title", "행사명", Text, c.title.as_str()),
            FieldSpec::new("startDate", "시작", DateTime, c.start_date.as_str()),
            FieldSpec::new("endDate", "종료", DateTime, c.end_date.as_str()),
            FieldSpec::new("location", "장소", Text, c.location.as_str()),
        ],
        BlockContent::BusinessInfo(c) => vec![
            FieldSpec::new("title", "사업명", Text, c.title.as_str()),
            FieldSpec::new(
                "description",
                "사업 설명",
                TextArea,
                c.description.clone().unwrap_or_default(),
            ),
        ],
        BlockContent::Map(c) => vec![
            FieldSpec::new("locationName", "장소명", Text, c.location_name.as_str()),
            FieldSpec::new("address", "주소", Text, c.address.as_str()),
        ],
        BlockContent::Form(c) => {
            vec![FieldSpec::new("buttonText", "버튼 텍스트", Text, c.button_text.as_str())]
        }
        BlockContent::Social(_) | BlockContent::Divider | BlockContent::Unknown { .. } => Vec::new(),
    }
}

fn list_spec(content: &BlockContent) -> Option<ListSpec> {
    use FieldInput::*;

    let (kind, items) = match content {
        BlockContent::BusinessInfo(c) => (
            ListKind::BusinessItems,
            c.items
                .iter()
                .map(|item| ListItemView {
                    id: item.id.clone(),
                    fields: vec![
                        FieldSpec::new("label", "라벨", Text, item.label.as_str()),
                        FieldSpec::new("value", "내용", Text, item.value.as_str()),
                    ],
                })
                .collect(),
        ),
        BlockContent::Form(c) => (
            ListKind::FormFields,
            c.fields
                .iter()
                .map(|field| ListItemView {
                    id: field.id.clone(),
                    fields: vec![
                        FieldSpec::new("label", "라벨", Text, field.label.as_str()),
                        FieldSpec::new("type", "유형", Choice(FORM_FIELD_TYPE_OPTIONS), field.kind.as_str()),
                    ],
                })
                .collect(),
        ),
        BlockContent::Social(c) => (
            ListKind::SocialLinks,
            c.links
                .iter()
                .map(|link| ListItemView {
                    id: link.id.clone(),
                    fields: vec![
                        FieldSpec::new("platform", "플랫폼", Choice(PLATFORM_OPTIONS), link.platform.as_str()),
                        FieldSpec::new("url", "URL", Url, link.url.as_str()),
                    ],
                })
                .collect(),
        ),
        _ => return None,
    };

    Some(ListSpec { kind, items })
}

fn style_fields(block_type: Option<BlockType>, styles: &BlockStyle) -> Vec<FieldSpec> {
    let value = |v: &Option<String>| v.clone().unwrap_or_default();

    let mut fields = vec![
        FieldSpec::new("backgroundColor", "배경색", FieldInput::Color, value(&styles.background_color)),
        FieldSpec::new("textColor", "글자색", FieldInput::Color, value(&styles.text_color)),
        FieldSpec::new("padding", "여백 (Padding)", FieldInput::Choice(PADDING_OPTIONS), value(&styles.padding)),
    ];

    if block_type.is_some_and(|t| t.is_text_bearing()) {
        fields.push(FieldSpec::new(
            "textAlign",
            "텍스트 정렬",
            FieldInput::Choice(TEXT_ALIGN_OPTIONS),
            styles.text_align.map(|a| a.as_str().to_string()).unwrap_or_default(),
        ));
        fields.push(FieldSpec::new(
            "fontSize",
            "글자 크기",
            FieldInput::Choice(FONT_SIZE_OPTIONS),
            value(&styles.font_size),
        ));
        fields.push(FieldSpec::new(
            "fontWeight",
            "글자 굵기",
            FieldInput::Choice(FONT_WEIGHT_OPTIONS),
            value(&styles.font_weight),
        ));
    }

    fields
}

/// Style property addressed by an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKey {
    BackgroundColor,
    TextColor,
    Padding,
    TextAlign,
    FontSize,
    FontWeight,
}

impl StyleKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleKey::BackgroundColor => "backgroundColor",
            StyleKey::TextColor => "textColor",
            StyleKey::Padding => "padding",
            StyleKey::TextAlign => "textAlign",
            StyleKey::FontSize => "fontSize",
            StyleKey::FontWeight => "fontWeight",
        }
    }

    fn is_text_only(&self) -> bool {
        matches!(self, StyleKey::TextAlign | StyleKey::FontSize | StyleKey::FontWeight)
    }

    fn options(&self) -> Option<&'static [(&'static str, &'static str)]> {
        match self {
            StyleKey::Padding => Some(PADDING_OPTIONS),
            StyleKey::TextAlign => Some(TEXT_ALIGN_OPTIONS),
            StyleKey::FontSize => Some(FONT_SIZE_OPTIONS),
            StyleKey::FontWeight => Some(FONT_WEIGHT_OPTIONS),
            StyleKey::BackgroundColor | StyleKey::TextColor => None,
        }
    }
}

impl FromStr for StyleKey {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "backgroundColor" | "background" => StyleKey::BackgroundColor,
            "textColor" | "color" => StyleKey::TextColor,
            "padding" => StyleKey::Padding,
            "textAlign" | "align" => StyleKey::TextAlign,
            "fontSize" => StyleKey::FontSize,
            "fontWeight" => StyleKey::FontWeight,
            other => return Err(EditorError::Validation(format!("unknown style property '{}'", other))),
        })
    }
}

/// New value for one content field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentField {
    pub key: String,
    pub value: String,
}

impl ContentField {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// New value for one style property; `None` clears it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleField {
    pub key: StyleKey,
    pub value: Option<String>,
}

impl StyleField {
    pub fn new(key: StyleKey, value: Option<String>) -> Self {
        Self {
            key,
            value: value.filter(|v| !v.is_empty()),
        }
    }
}

/// A single edit made through the property panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyEdit {
    Content(ContentField),
    Style(StyleField),
    AddItem(ListKind),
    EditItem {
        list: ListKind,
        item_id: String,
        field: String,
        value: String,
    },
    RemoveItem {
        list: ListKind,
        item_id: String,
    },
}

impl PropertyEdit {
    /// Patch that applies this edit to `block`
    pub fn to_patch(&self, block: &Block) -> EditorResult<BlockPatch> {
        match self {
            PropertyEdit::Content(field) => {
                Ok(BlockPatch::content(merge_content(block, &field.key, &field.value)?))
            }
            PropertyEdit::Style(field) => Ok(BlockPatch::styles(merge_style(block, field)?)),
            PropertyEdit::AddItem(list) => {
                let mut content = block.content.clone();
                add_item(&mut content, *list, block)?;
                Ok(BlockPatch::content(content))
            }
            PropertyEdit::EditItem {
                list,
                item_id,
                field,
                value,
            } => {
                let mut content = block.content.clone();
                edit_item(&mut content, *list, item_id, field, value, block)?;
                Ok(BlockPatch::content(content))
            }
            PropertyEdit::RemoveItem { list, item_id } => {
                let mut content = block.content.clone();
                remove_item(&mut content, *list, item_id, block)?;
                Ok(BlockPatch::content(content))
            }
        }
    }
}

fn unknown_field(block: &Block, field: &str) -> EditorError {
    EditorError::UnknownField {
        type_name: block.content.type_name().to_string(),
        field: field.to_string(),
    }
}

fn merge_content(block: &Block, key: &str, value: &str) -> EditorResult<BlockContent> {
    if !content_fields(&block.content).iter().any(|f| f.key == key) {
        return Err(unknown_field(block, key));
    }

    let mut json = block.content.to_json();
    let Some(object) = json.as_object_mut() else {
        return Err(unknown_field(block, key));
    };
    object.insert(key.to_string(), Value::String(value.to_string()));

    Ok(BlockContent::from_json(block.content.type_name(), json)?)
}

fn merge_style(block: &Block, field: &StyleField) -> EditorResult<BlockStyle> {
    let text_bearing = block.block_type().is_some_and(|t| t.is_text_bearing());
    if field.key.is_text_only() && !text_bearing {
        return Err(unknown_field(block, field.key.as_str()));
    }

    if let (Some(options), Some(value)) = (field.key.options(), field.value.as_deref()) {
        if !options.iter().any(|(option, _)| *option == value) {
            return Err(SchemaError::invalid_value(field.key.as_str(), value).into());
        }
    }

    let mut styles = block.styles.clone();
    let value = field.value.clone();
    match field.key {
        StyleKey::BackgroundColor => styles.background_color = value,
        StyleKey::TextColor => styles.text_color = value,
        StyleKey::Padding => styles.padding = value,
        StyleKey::TextAlign => {
            styles.text_align = value.as_deref().map(str::parse::<TextAlign>).transpose()?
        }
        StyleKey::FontSize => styles.font_size = value,
        StyleKey::FontWeight => styles.font_weight = value,
    }
    Ok(styles)
}

/// Smallest positive integer id not used by `existing`
fn next_item_id<'a>(existing: impl Iterator<Item = &'a str>) -> String {
    let used: Vec<&str> = existing.collect();
    (1..)
        .map(|n: u32| n.to_string())
        .find(|candidate| !used.contains(&candidate.as_str()))
        .unwrap_or_default()
}

fn list_mismatch(block: &Block, list: ListKind) -> EditorError {
    unknown_field(block, &list.to_string())
}

fn add_item(content: &mut BlockContent, list: ListKind, block: &Block) -> EditorResult<()> {
    match (list, content) {
        (ListKind::BusinessItems, BlockContent::BusinessInfo(c)) => {
            let id = next_item_id(c.items.iter().map(|i| i.id.as_str()));
            c.items.push(BusinessInfoItem {
                id,
                label: "항목".to_string(),
                value: String::new(),
            });
        }
        (ListKind::FormFields, BlockContent::Form(c)) => {
            let id = next_item_id(c.fields.iter().map(|f| f.id.as_str()));
            c.fields.push(FormField {
                id,
                label: "새 항목".to_string(),
                kind: FormFieldKind::Text,
            });
        }
        (ListKind::SocialLinks, BlockContent::Social(c)) => {
            let id = next_item_id(c.links.iter().map(|l| l.id.as_str()));
            c.links.push(SocialLink {
                id,
                platform: SocialPlatform::Website,
                url: String::new(),
            });
        }
        _ => return Err(list_mismatch(block, list)),
    }
    Ok(())
}

fn edit_item(
    content: &mut BlockContent,
    list: ListKind,
    item_id: &str,
    field: &str,
    value: &str,
    block: &Block,
) -> EditorResult<()> {
    let missing = || EditorError::ItemNotFound(item_id.to_string());

    match (list, content) {
        (ListKind::BusinessItems, BlockContent::BusinessInfo(c)) => {
            let item = c.items.iter_mut().find(|i| i.id == item_id).ok_or_else(missing)?;
            match field {
                "label" => item.label = value.to_string(),
                "value" => item.value = value.to_string(),
                _ => return Err(unknown_field(block, field)),
            }
        }
        (ListKind::FormFields, BlockContent::Form(c)) => {
            let item = c.fields.iter_mut().find(|f| f.id == item_id).ok_or_else(missing)?;
            match field {
                "label" => item.label = value.to_string(),
                "type" => item.kind = value.parse()?,
                _ => return Err(unknown_field(block, field)),
            }
        }
        (ListKind::SocialLinks, BlockContent::Social(c)) => {
            let item = c.links.iter_mut().find(|l| l.id == item_id).ok_or_else(missing)?;
            match field {
                "platform" => item.platform = SocialPlatform::from(value.to_string()),
                "url" => item.url = value.to_string(),
                _ => return Err(unknown_field(block, field)),
            }
        }
        _ => return Err(list_mismatch(block, list)),
    }
    Ok(())
}

fn remove_item(content: &mut BlockContent, list: ListKind, item_id: &str, block: &Block) -> EditorResult<()> {
    let removed = match (list, content) {
        (ListKind::BusinessItems, BlockContent::BusinessInfo(c)) => {
            let before = c.items.len();
            c.items.retain(|i| i.id != item_id);
            before != c.items.len()
        }
        (ListKind::FormFields, BlockContent::Form(c)) => {
            let before = c.fields.len();
            c.fields.retain(|f| f.id != item_id);
            before != c.fields.len()
        }
        (ListKind::SocialLinks, BlockContent::Social(c)) => {
            let before = c.links.len();
            c.links.retain(|l| l.id != item_id);
            before != c.links.len()
        }
        _ => return Err(list_mismatch(block, list)),
    };

    if removed {
        Ok(())
    } else {
        Err(EditorError::ItemNotFound(item_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(block: &Block, edit: PropertyEdit) -> Block {
        let patch = edit.to_patch(block).unwrap();
        let mut updated = block.clone();
        if let Some(content) = patch.content {
            updated.content = content;
        }
        if let Some(styles) = patch.styles {
            updated.styles = styles;
        }
        updated
    }

    #[test]
    fn test_form_lists_fields_per_type() {
        let header = PropertyForm::for_block(&Block::with_defaults("h", BlockType::Header));
        assert!(header.can_enhance);
        assert!(header.field("fontSize").is_some());

        let map = PropertyForm::for_block(&Block::with_defaults("m", BlockType::Map));
        assert!(!map.can_enhance);
        assert!(map.field("fontSize").is_none());
        assert_eq!(map.field("address").unwrap().value, "주소 입력");

        let social = PropertyForm::for_block(&Block::with_defaults("s", BlockType::Social));
        assert!(social.content.is_empty());
        assert_eq!(social.list.unwrap().items.len(), 1);
    }

    #[test]
    fn test_content_edit_touches_only_named_field() {
        let schedule = Block::with_defaults("s", BlockType::Schedule);
        let updated = apply(&schedule, PropertyEdit::Content(ContentField::new("location", "강당")));

        let BlockContent::Schedule(c) = &updated.content else {
            panic!("expected schedule");
        };
        assert_eq!(c.location, "강당");
        assert_eq!(c.title, "일정 제목");
        assert_eq!(updated.styles, schedule.styles);
    }

    #[test]
    fn test_unknown_content_field_rejected() {
        let text = Block::with_defaults("t", BlockType::Text);
        let result = PropertyEdit::Content(ContentField::new("url", "x")).to_patch(&text);
        assert!(matches!(result, Err(EditorError::UnknownField { .. })));
    }

    #[test]
    fn test_style_edit_validates_choices() {
        let text = Block::with_defaults("t", BlockType::Text);
        let ok = apply(
            &text,
            PropertyEdit::Style(StyleField::new(StyleKey::Padding, Some("32px".into()))),
        );
        assert_eq!(ok.styles.padding.as_deref(), Some("32px"));
        assert_eq!(ok.styles.background_color.as_deref(), Some("#ffffff"));

        let bad = PropertyEdit::Style(StyleField::new(StyleKey::FontSize, Some("99px".into())));
        assert!(bad.to_patch(&text).is_err());

        let divider = Block::with_defaults("d", BlockType::Divider);
        let align = PropertyEdit::Style(StyleField::new(StyleKey::TextAlign, Some("center".into())));
        assert!(matches!(align.to_patch(&divider), Err(EditorError::UnknownField { .. })));
    }

    #[test]
    fn test_clearing_a_style() {
        let text = Block::with_defaults("t", BlockType::Text);
        let cleared = apply(&text, PropertyEdit::Style(StyleField::new(StyleKey::Padding, Some(String::new()))));
        assert_eq!(cleared.styles.padding, None);
    }

    #[test]
    fn test_list_add_edit_remove() {
        let biz = Block::with_defaults("b", BlockType::BusinessInfo);
        let added = apply(&biz, PropertyEdit::AddItem(ListKind::BusinessItems));
        let BlockContent::BusinessInfo(c) = &added.content else {
            panic!("expected business info");
        };
        assert_eq!(c.items.len(), 3);
        assert_eq!(c.items[2].id, "3");
        assert_eq!(c.items[2].label, "항목");

        let edited = apply(
            &added,
            PropertyEdit::EditItem {
                list: ListKind::BusinessItems,
                item_id: "3".into(),
                field: "value".into(),
                value: "주 3회".into(),
            },
        );
        let removed = apply(
            &edited,
            PropertyEdit::RemoveItem {
                list: ListKind::BusinessItems,
                item_id: "1".into(),
            },
        );
        let BlockContent::BusinessInfo(c) = &removed.content else {
            panic!("expected business info");
        };
        let ids: Vec<_> = c.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
        assert_eq!(c.items[1].value, "주 3회");
    }

    #[test]
    fn test_form_field_type_and_social_platform() {
        let form = Block::with_defaults("f", BlockType::Form);
        let updated = apply(
            &form,
            PropertyEdit::EditItem {
                list: ListKind::FormFields,
                item_id: "1".into(),
                field: "type".into(),
                value: "email".into(),
            },
        );
        let BlockContent::Form(c) = &updated.content else {
            panic!("expected form");
        };
        assert_eq!(c.fields[0].kind, FormFieldKind::Email);

        let social = Block::with_defaults("s", BlockType::Social);
        let updated = apply(
            &social,
            PropertyEdit::EditItem {
                list: ListKind::SocialLinks,
                item_id: "1".into(),
                field: "platform".into(),
                value: "instagram".into(),
            },
        );
        let BlockContent::Social(c) = &updated.content else {
            panic!("expected social");
        };
        assert_eq!(c.links[0].platform, SocialPlatform::Instagram);
    }

    #[test]
    fn test_list_edit_on_wrong_block_type() {
        let text = Block::with_defaults("t", BlockType::Text);
        assert!(PropertyEdit::AddItem(ListKind::SocialLinks).to_patch(&text).is_err());

        let form = Block::with_defaults("f", BlockType::Form);
        let missing = PropertyEdit::RemoveItem {
            list: ListKind::FormFields,
            item_id: "nope".into(),
        };
        assert!(matches!(missing.to_patch(&form), Err(EditorError::ItemNotFound(_))));
    }
}
