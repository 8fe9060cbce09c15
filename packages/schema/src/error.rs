use thiserror::Error;

pub type SchemaResult<T> = Result<T, SchemaError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    #[error("Unknown template type: {0}")]
    UnknownTemplate(String),

    #[error("Invalid content for {block_type} block: {message}")]
    InvalidContent { block_type: String, message: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

impl SchemaError {
    pub fn invalid_content(block_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidContent {
            block_type: block_type.into(),
            message: message.into(),
        }
    }

    pub fn invalid_value(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
        }
    }
}
