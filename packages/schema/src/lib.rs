//! # Pamphlet Schema
//!
//! Data model of a pamphlet project: the closed set of block types, their
//! strongly-typed content records, the shared style record, and the
//! template starting sequences.

pub mod block;
pub mod defaults;
pub mod error;
pub mod id_generator;
pub mod project;
pub mod style;
pub mod templates;

pub use block::*;
pub use error::{SchemaError, SchemaResult};
pub use id_generator::{get_project_seed, IdGenerator};
pub use project::{Project, TemplateType, DEFAULT_THEME_COLOR};
pub use style::{BlockStyle, TextAlign};
pub use templates::initial_blocks;
