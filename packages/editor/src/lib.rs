//! # Pamphlet Editor
//!
//! Editing engine for block-based pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ input: property panel edits, drag gestures  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession + mutations             │
//! │  - Apply mutations with validation          │
//! │  - Track selection and drag state           │
//! │  - Write through to the project store       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer: Project → VDOM → HTML             │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pamphlet_editor::{EditSession, NewProject};
//!
//! let mut session = EditSession::new(store, enhancer);
//! session.create_project(&NewProject::new("5월 소식", TemplateType::Newsletter))?;
//!
//! let (id, _) = session.add_block(BlockType::Map)?;
//! session.edit_property(PropertyEdit::Content(ContentField::new("address", "서울시 중구")))?;
//! ```

mod drag;
mod errors;
mod lifecycle;
mod mutations;
mod property;
mod session;

pub use drag::{DragConfig, DragController, DragEvent, DragOutcome, DragState, Point, DEFAULT_DRAG_THRESHOLD};
pub use errors::{EditorError, EditorResult};
pub use lifecycle::{build_project, delete_project, list_projects, share_url, NewProject, EMPTY_TITLE_MESSAGE};
pub use mutations::{BlockPatch, Direction, Mutation, MutationError, MutationOutcome};
pub use property::{
    ContentField, FieldInput, FieldSpec, ListItemView, ListKind, ListSpec, PropertyEdit, PropertyForm, StyleField,
    StyleKey,
};
pub use session::{EditSession, MutationReport, SessionWarning, TextProposal};
