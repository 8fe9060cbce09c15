//! Error types for the editor

use pamphlet_schema::SchemaError;
use pamphlet_storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Invalid value: {0}")]
    Schema(#[from] SchemaError),

    #[error("{type_name} blocks have no field '{field}'")]
    UnknownField { type_name: String, field: String },

    #[error("List item not found: {0}")]
    ItemNotFound(String),

    #[error("Block not found: {0}")]
    BlockNotFound(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("No block selected")]
    NoSelection,

    #[error("No project is open")]
    NoActiveProject,

    #[error("Block {0} has no text to rewrite")]
    NotTextBearing(String),

    #[error("비밀번호가 일치하지 않습니다.")]
    PasswordMismatch,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl EditorError {
    /// Validation-class failures leave all state unchanged
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EditorError::Validation(_)
                | EditorError::Mutation(_)
                | EditorError::Schema(_)
                | EditorError::UnknownField { .. }
        )
    }
}

pub type EditorResult<T> = Result<T, EditorError>;
