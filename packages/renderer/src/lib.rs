//! # Pamphlet Renderer
//!
//! Turns blocks into a virtual DOM and virtual DOM into HTML.
//!
//! The same pure rules drive the editor canvas (`RenderMode::Edit`) and the
//! published page (`RenderMode::ReadOnly`).

pub mod html;
pub mod links;
pub mod render;
pub mod style;
pub mod vdom;

pub use html::{compile_node_to_html, compile_to_html, render_published_page, CompileOptions, PageOptions};
pub use links::{encode_uri_component, extract_video_id, social_badge, video_embed_url, MapProvider, SocialBadge};
pub use render::{
    format_schedule_date, render_block, render_block_with, render_document, render_document_with,
    RenderMode, RenderOptions, UNKNOWN_BLOCK_NOTICE,
};
pub use style::{ContainerStyle, TextStyle};
pub use vdom::{VNode, VirtualDomDocument};
