//! # Block Renderer
//!
//! Pure mapping from a block and a render mode to a virtual DOM tree.
//! Every block type has exactly one rule; the same rule serves the editor
//! canvas and the published page.
//!
//! ## Interactivity
//!
//! Only two rules look at the mode, and they point in opposite directions:
//!
//! | Block | Edit | ReadOnly |
//! |-------|------|----------|
//! | Video | iframe ignores the pointer (drags pass through) | playable |
//! | Form  | inputs disabled | inputs fillable |
//!
//! The form is meant to be filled by the end viewer, never by the editor,
//! while the video must not swallow drag gestures on the canvas.

use crate::links::{extract_video_id, social_badge, video_embed_url, MapProvider};
use crate::style::{ContainerStyle, TextStyle};
use crate::vdom::{VNode, VirtualDomDocument};
use chrono::NaiveDateTime;
use pamphlet_schema::*;

pub const UNKNOWN_BLOCK_NOTICE: &str = "알 수 없는 블록 타입";
pub const IMAGE_PLACEHOLDER: &str = "이미지 없음";
pub const VIDEO_PLACEHOLDER: &str = "동영상 URL을 입력하세요";

/// Editable canvas or viewer-facing output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Edit,
    ReadOnly,
}

impl RenderMode {
    pub fn is_read_only(&self) -> bool {
        matches!(self, RenderMode::ReadOnly)
    }
}

/// Options for rendering
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub mode: RenderMode,
    /// Origin passed to video embeds (e.g. `https://example.org`)
    pub origin: String,
}

impl RenderOptions {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            origin: String::new(),
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }
}

/// Render one block
pub fn render_block(block: &Block, mode: RenderMode) -> VNode {
    render_block_with(block, &RenderOptions::new(mode))
}

/// Render one block with explicit options
pub fn render_block_with(block: &Block, options: &RenderOptions) -> VNode {
    let styles = &block.styles;

    let node = match &block.content {
        BlockContent::Header(c) => render_text_block(BlockType::Header, "h1", c, styles),
        BlockContent::Text(c) => render_text_block(BlockType::Text, "p", c, styles),
        BlockContent::Image(c) => render_image(c, styles),
        BlockContent::Video(c) => render_video(c, styles, options),
        BlockContent::Schedule(c) => render_schedule(c, styles),
        BlockContent::BusinessInfo(c) => render_business_info(c, styles),
        BlockContent::Map(c) => render_map(c, styles),
        BlockContent::Form(c) => render_form(c, styles, options.mode),
        BlockContent::Social(c) => render_social(c, styles),
        BlockContent::Divider => render_divider(),
        BlockContent::Unknown { type_name, .. } => {
            tracing::debug!("Rendering fallback for unknown block type {}", type_name);
            VNode::element("div")
                .with_class("block-error")
                .with_child(VNode::error(UNKNOWN_BLOCK_NOTICE))
        }
    };

    node.with_key(block.id.as_str())
        .with_attr("data-block-id", block.id.as_str())
        .with_attr("data-block-type", block.content.type_name())
}

/// Render every block of a project in order
pub fn render_document(project: &Project, mode: RenderMode) -> VirtualDomDocument {
    render_document_with(project, &RenderOptions::new(mode))
}

pub fn render_document_with(project: &Project, options: &RenderOptions) -> VirtualDomDocument {
    let mut doc = VirtualDomDocument::new(project.title.as_str());
    for block in &project.blocks {
        doc.add_node(render_block_with(block, options));
    }
    doc
}

fn container(styles: &BlockStyle) -> VNode {
    with_container_style(VNode::element("div"), &ContainerStyle::resolve(styles))
}

fn with_container_style(node: VNode, resolved: &ContainerStyle) -> VNode {
    resolved
        .declarations()
        .into_iter()
        .fold(node, |node, (key, value)| node.with_style(key, value))
}

fn render_text_block(
    block_type: BlockType,
    tag: &str,
    content: &TextContent,
    styles: &BlockStyle,
) -> VNode {
    let mut body = VNode::element(tag)
        .with_class("break-words whitespace-pre-wrap")
        .with_text(content.text.as_str());

    if let Some(text_style) = TextStyle::resolve(block_type, styles) {
        body = body
            .with_style("font-size", text_style.font_size)
            .with_style("font-weight", text_style.font_weight);
    }

    container(styles).with_child(body)
}

fn render_image(content: &ImageContent, styles: &BlockStyle) -> VNode {
    let mut resolved = ContainerStyle::resolve(styles);
    if resolved.padding == "0px" {
        resolved.padding = "0".to_string();
    }
    let mut node = with_container_style(VNode::element("div"), &resolved);

    node = if content.url.is_empty() {
        node.with_child(
            VNode::element("div")
                .with_class("image-placeholder")
                .with_child(icon("image"))
                .with_child(VNode::element("span").with_text(IMAGE_PLACEHOLDER)),
        )
    } else {
        node.with_child(
            VNode::element("img")
                .with_attr("src", content.url.as_str())
                .with_attr("alt", content.alt.as_str())
                .with_class("w-full h-auto object-cover block"),
        )
    };

    match content.caption.as_deref() {
        Some(caption) if !caption.is_empty() => node.with_child(
            VNode::element("p")
                .with_class("image-caption")
                .with_text(caption),
        ),
        _ => node,
    }
}

fn render_video(content: &VideoContent, styles: &BlockStyle, options: &RenderOptions) -> VNode {
    let frame = VNode::element("div").with_class("aspect-video");

    let inner = match extract_video_id(&content.url) {
        Some(video_id) => {
            let iframe = VNode::element("iframe")
                .with_attr("src", video_embed_url(&video_id, &options.origin))
                .with_attr("title", "Video")
                .with_attr("frameborder", "0")
                .with_attr(
                    "allow",
                    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture",
                )
                .with_flag("allowfullscreen");

            if options.mode.is_read_only() {
                iframe.with_class("w-full h-full")
            } else {
                iframe
                    .with_class("w-full h-full pointer-events-none")
                    .with_style("pointer-events", "none")
            }
        }
        None => VNode::element("div")
            .with_class("video-placeholder")
            .with_child(icon("video"))
            .with_child(VNode::element("span").with_text(VIDEO_PLACEHOLDER)),
    };

    container(styles).with_child(frame.with_child(inner))
}

/// `2024-05-20T14:00` → `2024-05-20 14:00`; `-` when empty
pub fn format_schedule_date(value: &str) -> String {
    if value.trim().is_empty() {
        return "-".to_string();
    }

    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| value.to_string())
}

fn render_schedule(content: &ScheduleContent, styles: &BlockStyle) -> VNode {
    let range = format!(
        "{} ~ {}",
        format_schedule_date(&content.start_date),
        format_schedule_date(&content.end_date)
    );

    container(styles).with_child(
        VNode::element("div")
            .with_class("schedule-card")
            .with_child(VNode::element("h3").with_text(content.title.as_str()))
            .with_child(
                VNode::element("div")
                    .with_class("schedule-time")
                    .with_child(icon("calendar"))
                    .with_child(VNode::element("span").with_text(range)),
            )
            .with_child(
                VNode::element("div")
                    .with_class("schedule-location")
                    .with_child(icon("map-pin"))
                    .with_child(VNode::element("span").with_text(content.location.as_str())),
            ),
    )
}

fn render_business_info(content: &BusinessInfoContent, styles: &BlockStyle) -> VNode {
    let mut card = VNode::element("div")
        .with_class("business-card")
        .with_child(VNode::element("h3").with_text(content.title.as_str()));

    if let Some(description) = content.description.as_deref().filter(|d| !d.is_empty()) {
        card = card.with_child(
            VNode::element("p")
                .with_class("whitespace-pre-wrap")
                .with_text(description),
        );
    }

    let rows = content
        .items
        .iter()
        .map(|item| {
            VNode::element("div")
                .with_key(item.id.as_str())
                .with_child(VNode::element("dt").with_text(item.label.as_str()))
                .with_child(VNode::element("dd").with_text(item.value.as_str()))
        })
        .collect();

    container(styles).with_child(card.with_child(VNode::element("dl").with_children(rows)))
}

fn render_map(content: &MapContent, styles: &BlockStyle) -> VNode {
    let placeholder = VNode::element("div")
        .with_class("map-placeholder")
        .with_child(icon("map-pin"))
        .with_child(VNode::element("p").with_text(content.location_name.as_str()));

    let address = VNode::element("div")
        .with_class("map-address")
        .with_child(VNode::element("p").with_class("map-address-label").with_text("주소"))
        .with_child(VNode::element("p").with_text(content.address.as_str()));

    let links = MapProvider::ALL
        .iter()
        .map(|provider| {
            VNode::element("a")
                .with_attr("href", provider.search_url(&content.address))
                .with_attr("target", "_blank")
                .with_attr("rel", "noreferrer")
                .with_class(provider.class_name())
                .with_child(icon("map-pin"))
                .with_text(provider.label())
        })
        .collect();

    container(styles)
        .with_child(placeholder)
        .with_child(address)
        .with_child(VNode::element("div").with_class("map-links").with_children(links))
}

fn render_form(content: &FormContent, styles: &BlockStyle, mode: RenderMode) -> VNode {
    let fields = content
        .fields
        .iter()
        .map(|field| {
            let mut input = VNode::element("input")
                .with_attr("type", field.kind.as_str())
                .with_attr("name", field.id.as_str())
                .with_attr("placeholder", format!("{} 입력", field.label));
            // Inverse of the video rule: only viewers fill the form in
            if !mode.is_read_only() {
                input = input.with_flag("disabled");
            }

            VNode::element("div")
                .with_key(field.id.as_str())
                .with_child(VNode::element("label").with_text(field.label.as_str()))
                .with_child(input)
        })
        .collect();

    let form = VNode::element("form")
        .with_class("space-y-3")
        .with_children(fields)
        .with_child(
            VNode::element("button")
                .with_attr("type", "submit")
                .with_text(content.button_text.as_str()),
        );

    container(styles).with_child(form)
}

fn render_social(content: &SocialContent, styles: &BlockStyle) -> VNode {
    let links = content
        .links
        .iter()
        .map(|link| {
            let badge = social_badge(&link.platform);
            VNode::element("a")
                .with_key(link.id.as_str())
                .with_attr("href", link.url.as_str())
                .with_attr("target", "_blank")
                .with_attr("rel", "noreferrer")
                .with_attr("title", badge.label)
                .with_class(format!("social-link {}", badge.color_class))
                .with_child(icon(badge.icon))
        })
        .collect();

    container(styles).with_child(
        VNode::element("div")
            .with_class("social-links")
            .with_children(links),
    )
}

fn render_divider() -> VNode {
    VNode::element("div")
        .with_style("padding", "10px 0")
        .with_child(VNode::element("hr"))
}

fn icon(name: &str) -> VNode {
    VNode::element("span")
        .with_class("icon")
        .with_attr("data-icon", name)
        .with_attr("aria-hidden", "true")
}
