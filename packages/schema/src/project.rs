use crate::block::Block;
use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Starting template of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateType {
    Newsletter,
    Promotion,
    Invitation,
}

impl TemplateType {
    pub const ALL: [TemplateType; 3] = [
        TemplateType::Newsletter,
        TemplateType::Promotion,
        TemplateType::Invitation,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            TemplateType::Newsletter => "NEWSLETTER",
            TemplateType::Promotion => "PROMOTION",
            TemplateType::Invitation => "INVITATION",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TemplateType::Newsletter => "뉴스레터",
            TemplateType::Promotion => "홍보",
            TemplateType::Invitation => "초대장",
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for TemplateType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        TemplateType::ALL
            .iter()
            .copied()
            .find(|t| t.tag() == normalized)
            .ok_or_else(|| SchemaError::UnknownTemplate(s.to_string()))
    }
}

/// Default theme colour of new projects
pub const DEFAULT_THEME_COLOR: &str = "#3b82f6";

/// A page under edit: ordered blocks plus metadata.
///
/// Block order is render order, top to bottom. Block ids are unique
/// within one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub template: TemplateType,
    /// Plaintext deletion guard; not an authentication mechanism
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub blocks: Vec<Block>,
    /// Creation time in epoch milliseconds
    pub created_at: i64,
    #[serde(default = "default_theme_color")]
    pub theme_color: String,
}

fn default_theme_color() -> String {
    DEFAULT_THEME_COLOR.to_string()
}

impl Project {
    pub fn find_block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn find_block_mut(&mut self, id: &str) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }

    pub fn block_ids(&self) -> Vec<&str> {
        self.blocks.iter().map(|b| b.id.as_str()).collect()
    }

    pub fn has_password(&self) -> bool {
        self.password.as_deref().is_some_and(|p| !p.is_empty())
    }

    /// Copy without the deletion password, for viewer-facing output
    pub fn redacted(&self) -> Project {
        Project {
            password: None,
            ..self.clone()
        }
    }
}
