//! # Blocks
//!
//! A block is one visual unit of a project page. Its content is a tagged
//! union: the variant decides the block type, so a block can never carry a
//! payload shaped for a different type.
//!
//! ## Wire format
//!
//! ```text
//! { "id": "...", "type": "HEADER", "content": { "text": "..." }, "styles": { ... } }
//! ```
//!
//! Blocks with a `type` tag outside the known set still load, as
//! [`BlockContent::Unknown`], so one foreign block cannot make a whole
//! project unreadable.

use crate::error::SchemaError;
use crate::style::BlockStyle;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Closed set of block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    Header,
    Text,
    Image,
    Video,
    Schedule,
    BusinessInfo,
    Map,
    Form,
    Social,
    Divider,
}

impl BlockType {
    /// All block types in palette order
    pub const ALL: [BlockType; 10] = [
        BlockType::Header,
        BlockType::Text,
        BlockType::Image,
        BlockType::Video,
        BlockType::Schedule,
        BlockType::BusinessInfo,
        BlockType::Map,
        BlockType::Form,
        BlockType::Social,
        BlockType::Divider,
    ];

    /// Wire tag (`BUSINESS_INFO`, ...)
    pub fn tag(&self) -> &'static str {
        match self {
            BlockType::Header => "HEADER",
            BlockType::Text => "TEXT",
            BlockType::Image => "IMAGE",
            BlockType::Video => "VIDEO",
            BlockType::Schedule => "SCHEDULE",
            BlockType::BusinessInfo => "BUSINESS_INFO",
            BlockType::Map => "MAP",
            BlockType::Form => "FORM",
            BlockType::Social => "SOCIAL",
            BlockType::Divider => "DIVIDER",
        }
    }

    /// Palette label shown to editors
    pub fn label(&self) -> &'static str {
        match self {
            BlockType::Header => "헤더 (제목)",
            BlockType::Text => "텍스트",
            BlockType::Image => "이미지",
            BlockType::Video => "동영상",
            BlockType::Schedule => "일정/날짜",
            BlockType::BusinessInfo => "사업 안내",
            BlockType::Map => "지도",
            BlockType::Form => "입력 폼",
            BlockType::Social => "소셜 링크",
            BlockType::Divider => "구분선",
        }
    }

    /// Header and Text are the only types with a free text body
    pub fn is_text_bearing(&self) -> bool {
        matches!(self, BlockType::Header | BlockType::Text)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for BlockType {
    type Err = SchemaError;

    /// Accepts the wire tag in any case, with `-` or `_` separators
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        BlockType::ALL
            .iter()
            .copied()
            .find(|t| t.tag() == normalized)
            .ok_or_else(|| SchemaError::UnknownBlockType(s.to_string()))
    }
}

/// Header / Text body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageContent {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoContent {
    #[serde(default)]
    pub url: String,
}

/// Event schedule; dates are `datetime-local` strings or empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessInfoItem {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessInfoContent {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub items: Vec<BusinessInfoItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapContent {
    #[serde(default)]
    pub location_name: String,
    #[serde(default)]
    pub address: String,
}

/// Input kind of a form field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormFieldKind {
    #[default]
    Text,
    Email,
    Tel,
}

impl FormFieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormFieldKind::Text => "text",
            FormFieldKind::Email => "email",
            FormFieldKind::Tel => "tel",
        }
    }
}

impl FromStr for FormFieldKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(FormFieldKind::Text),
            "email" => Ok(FormFieldKind::Email),
            "tel" => Ok(FormFieldKind::Tel),
            other => Err(SchemaError::invalid_value("field type", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default)]
    pub kind: FormFieldKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormContent {
    #[serde(default)]
    pub button_text: String,
    #[serde(default)]
    pub fields: Vec<FormField>,
}

/// Social network of a link.
///
/// Values outside the known set are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SocialPlatform {
    Youtube,
    Instagram,
    Blog,
    Kakao,
    Website,
    Other(String),
}

impl SocialPlatform {
    pub fn as_str(&self) -> &str {
        match self {
            SocialPlatform::Youtube => "youtube",
            SocialPlatform::Instagram => "instagram",
            SocialPlatform::Blog => "blog",
            SocialPlatform::Kakao => "kakao",
            SocialPlatform::Website => "website",
            SocialPlatform::Other(name) => name,
        }
    }
}

impl From<String> for SocialPlatform {
    fn from(value: String) -> Self {
        match value.as_str() {
            "youtube" => SocialPlatform::Youtube,
            "instagram" => SocialPlatform::Instagram,
            "blog" => SocialPlatform::Blog,
            "kakao" => SocialPlatform::Kakao,
            "website" => SocialPlatform::Website,
            _ => SocialPlatform::Other(value),
        }
    }
}

impl From<SocialPlatform> for String {
    fn from(value: SocialPlatform) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub id: String,
    pub platform: SocialPlatform,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialContent {
    #[serde(default)]
    pub links: Vec<SocialLink>,
}

/// Type-specific block payload
#[derive(Debug, Clone, PartialEq)]
pub enum BlockContent {
    Header(TextContent),
    Text(TextContent),
    Image(ImageContent),
    Video(VideoContent),
    Schedule(ScheduleContent),
    BusinessInfo(BusinessInfoContent),
    Map(MapContent),
    Form(FormContent),
    Social(SocialContent),
    Divider,
    /// Block whose type tag is not recognised; kept verbatim
    Unknown { type_name: String, raw: Value },
}

impl BlockContent {
    /// Block type of this payload (`None` for unknown blocks)
    pub fn block_type(&self) -> Option<BlockType> {
        Some(match self {
            BlockContent::Header(_) => BlockType::Header,
            BlockContent::Text(_) => BlockType::Text,
            BlockContent::Image(_) => BlockType::Image,
            BlockContent::Video(_) => BlockType::Video,
            BlockContent::Schedule(_) => BlockType::Schedule,
            BlockContent::BusinessInfo(_) => BlockType::BusinessInfo,
            BlockContent::Map(_) => BlockType::Map,
            BlockContent::Form(_) => BlockType::Form,
            BlockContent::Social(_) => BlockType::Social,
            BlockContent::Divider => BlockType::Divider,
            BlockContent::Unknown { .. } => return None,
        })
    }

    /// Wire tag, including the original tag of unknown blocks
    pub fn type_name(&self) -> &str {
        match self {
            BlockContent::Unknown { type_name, .. } => type_name,
            other => other.block_type().map(|t| t.tag()).unwrap_or_default(),
        }
    }

    /// Text body of Header / Text blocks
    pub fn text(&self) -> Option<&str> {
        match self {
            BlockContent::Header(c) | BlockContent::Text(c) => Some(&c.text),
            _ => None,
        }
    }

    /// Decode a JSON payload for the given type tag
    pub fn from_json(type_name: &str, raw: Value) -> Result<Self, SchemaError> {
        let block_type = match type_name.parse::<BlockType>() {
            Ok(t) if t.tag() == type_name => t,
            _ => {
                return Ok(BlockContent::Unknown {
                    type_name: type_name.to_string(),
                    raw,
                })
            }
        };

        // Older documents may carry `null` where an empty payload is meant
        let raw = if raw.is_null() {
            Value::Object(Default::default())
        } else {
            raw
        };

        let invalid = |e: serde_json::Error| SchemaError::invalid_content(type_name, e.to_string());

        Ok(match block_type {
            BlockType::Header => BlockContent::Header(serde_json::from_value(raw).map_err(invalid)?),
            BlockType::Text => BlockContent::Text(serde_json::from_value(raw).map_err(invalid)?),
            BlockType::Image => BlockContent::Image(serde_json::from_value(raw).map_err(invalid)?),
            BlockType::Video => BlockContent::Video(serde_json::from_value(raw).map_err(invalid)?),
            BlockType::Schedule => {
                BlockContent::Schedule(serde_json::from_value(raw).map_err(invalid)?)
            }
            BlockType::BusinessInfo => {
                BlockContent::BusinessInfo(serde_json::from_value(raw).map_err(invalid)?)
            }
            BlockType::Map => BlockContent::Map(serde_json::from_value(raw).map_err(invalid)?),
            BlockType::Form => BlockContent::Form(serde_json::from_value(raw).map_err(invalid)?),
            BlockType::Social => BlockContent::Social(serde_json::from_value(raw).map_err(invalid)?),
            BlockType::Divider => BlockContent::Divider,
        })
    }

    /// Decode a stored payload, keeping malformed content verbatim
    ///
    /// Content of a known type that does not fit its record becomes an
    /// `Unknown` block under the same tag, so it renders as an error node
    /// and is written back unchanged.
    pub fn from_stored(type_name: &str, raw: Value) -> Self {
        match Self::from_json(type_name, raw.clone()) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Keeping undecodable block content verbatim: {}", e);
                BlockContent::Unknown {
                    type_name: type_name.to_string(),
                    raw,
                }
            }
        }
    }

    /// Encode the payload as JSON (without the type tag)
    pub fn to_json(&self) -> Value {
        let encoded = match self {
            BlockContent::Header(c) | BlockContent::Text(c) => serde_json::to_value(c),
            BlockContent::Image(c) => serde_json::to_value(c),
            BlockContent::Video(c) => serde_json::to_value(c),
            BlockContent::Schedule(c) => serde_json::to_value(c),
            BlockContent::BusinessInfo(c) => serde_json::to_value(c),
            BlockContent::Map(c) => serde_json::to_value(c),
            BlockContent::Form(c) => serde_json::to_value(c),
            BlockContent::Social(c) => serde_json::to_value(c),
            BlockContent::Divider => Ok(Value::Object(Default::default())),
            BlockContent::Unknown { raw, .. } => Ok(raw.clone()),
        };
        // Content records are plain string/vec structs and always encode
        encoded.unwrap_or(Value::Null)
    }
}

/// One addressable content unit of a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBlock", into = "RawBlock")]
pub struct Block {
    pub id: String,
    pub content: BlockContent,
    pub styles: BlockStyle,
}

impl Block {
    pub fn new(id: impl Into<String>, content: BlockContent, styles: BlockStyle) -> Self {
        Self {
            id: id.into(),
            content,
            styles,
        }
    }

    pub fn block_type(&self) -> Option<BlockType> {
        self.content.block_type()
    }
}

/// Serde shape of a block on the wire
#[derive(Serialize, Deserialize)]
struct RawBlock {
    id: String,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    content: Value,
    #[serde(default)]
    styles: Value,
}

impl From<RawBlock> for Block {
    fn from(raw: RawBlock) -> Self {
        Block {
            content: BlockContent::from_stored(&raw.type_name, raw.content),
            id: raw.id,
            styles: BlockStyle::from_stored(raw.styles),
        }
    }
}

impl From<Block> for RawBlock {
    fn from(block: Block) -> Self {
        RawBlock {
            type_name: block.content.type_name().to_string(),
            content: block.content.to_json(),
            id: block.id,
            styles: serde_json::to_value(&block.styles).unwrap_or(Value::Null),
        }
    }
}
