//! # Block Mutations
//!
//! The only way a project's block sequence changes.
//!
//! ## Mutation Semantics
//!
//! ### AddBlock
//! - Appends a block with the default content and style of its type
//! - The id is allocated by the caller and must be unused
//!
//! ### UpdateBlock
//! - Each provided part (content, styles) replaces the block's part wholesale
//! - The block type never changes; content of another type is rejected
//!
//! ### MoveBlock
//! - Swaps with the neighbour above or below
//! - No-op at the boundaries
//!
//! ### Reorder
//! - Array move: the source is removed and inserted at the target's
//!   former index, shifting everything in between by one
//!
//! Referencing an id that does not exist is a no-op, never an error.

use pamphlet_schema::{Block, BlockContent, BlockStyle, BlockType, Project};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Up => "up",
            Direction::Down => "down",
        })
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(format!("unknown direction '{}', expected up or down", other)),
        }
    }
}

/// Replacement parts for a block; `None` leaves the part untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockPatch {
    pub content: Option<BlockContent>,
    pub styles: Option<BlockStyle>,
}

impl BlockPatch {
    pub fn content(content: BlockContent) -> Self {
        Self {
            content: Some(content),
            styles: None,
        }
    }

    pub fn styles(styles: BlockStyle) -> Self {
        Self {
            content: None,
            styles: Some(styles),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.styles.is_none()
    }
}

/// Semantic edits of a project's block sequence
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    AddBlock { id: String, block_type: BlockType },

    UpdateBlock { id: String, patch: BlockPatch },

    DeleteBlock { id: String },

    MoveBlock { id: String, direction: Direction },

    Reorder { source_id: String, target_id: String },
}

/// Whether a mutation changed the project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    Unchanged,
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Block id already in use: {0}")]
    DuplicateId(String),

    #[error("Block {id} is {expected}; cannot take {found} content")]
    ContentTypeMismatch {
        id: String,
        expected: String,
        found: String,
    },
}

impl Mutation {
    /// Id of the block the mutation is about
    pub fn target_id(&self) -> &str {
        match self {
            Mutation::AddBlock { id, .. }
            | Mutation::UpdateBlock { id, .. }
            | Mutation::DeleteBlock { id }
            | Mutation::MoveBlock { id, .. } => id,
            Mutation::Reorder { source_id, .. } => source_id,
        }
    }

    /// Apply mutation to the project with validation
    ///
    /// A failed validation leaves the project untouched.
    pub fn apply(&self, project: &mut Project) -> Result<MutationOutcome, MutationError> {
        self.validate(project)?;

        let outcome = match self {
            Mutation::AddBlock { id, block_type } => {
                project.blocks.push(Block::with_defaults(id.as_str(), *block_type));
                MutationOutcome::Applied
            }

            Mutation::UpdateBlock { id, patch } => Self::apply_update(project, id, patch),

            Mutation::DeleteBlock { id } => match project.index_of(id) {
                Some(index) => {
                    project.blocks.remove(index);
                    MutationOutcome::Applied
                }
                None => MutationOutcome::Unchanged,
            },

            Mutation::MoveBlock { id, direction } => Self::apply_move(project, id, *direction),

            Mutation::Reorder {
                source_id,
                target_id,
            } => Self::apply_reorder(project, source_id, target_id),
        };

        tracing::debug!("{:?} -> {:?}", self, outcome);
        Ok(outcome)
    }

    /// Validate mutation without applying it
    pub fn validate(&self, project: &Project) -> Result<(), MutationError> {
        match self {
            Mutation::AddBlock { id, .. } => {
                if project.find_block(id).is_some() {
                    return Err(MutationError::DuplicateId(id.clone()));
                }
            }

            Mutation::UpdateBlock { id, patch } => {
                let (Some(block), Some(content)) = (project.find_block(id), &patch.content) else {
                    return Ok(());
                };
                if block.content.type_name() != content.type_name() {
                    return Err(MutationError::ContentTypeMismatch {
                        id: id.clone(),
                        expected: block.content.type_name().to_string(),
                        found: content.type_name().to_string(),
                    });
                }
            }

            Mutation::DeleteBlock { .. } | Mutation::MoveBlock { .. } | Mutation::Reorder { .. } => {}
        }

        Ok(())
    }

    fn apply_update(project: &mut Project, id: &str, patch: &BlockPatch) -> MutationOutcome {
        let Some(block) = project.find_block_mut(id) else {
            return MutationOutcome::Unchanged;
        };

        if let Some(content) = &patch.content {
            block.content = content.clone();
        }
        if let Some(styles) = &patch.styles {
            block.styles = styles.clone();
        }

        if patch.is_empty() {
            MutationOutcome::Unchanged
        } else {
            MutationOutcome::Applied
        }
    }

    fn apply_move(project: &mut Project, id: &str, direction: Direction) -> MutationOutcome {
        let Some(index) = project.index_of(id) else {
            return MutationOutcome::Unchanged;
        };

        let neighbour = match direction {
            Direction::Up if index > 0 => index - 1,
            Direction::Down if index + 1 < project.blocks.len() => index + 1,
            _ => return MutationOutcome::Unchanged,
        };

        project.blocks.swap(index, neighbour);
        MutationOutcome::Applied
    }

    fn apply_reorder(project: &mut Project, source_id: &str, target_id: &str) -> MutationOutcome {
        if source_id == target_id {
            return MutationOutcome::Unchanged;
        }

        let (Some(from), Some(to)) = (project.index_of(source_id), project.index_of(target_id)) else {
            return MutationOutcome::Unchanged;
        };

        let block = project.blocks.remove(from);
        project.blocks.insert(to, block);
        MutationOutcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pamphlet_schema::{TemplateType, TextContent};

    fn project(ids: &[&str]) -> Project {
        Project {
            id: "p".to_string(),
            title: "p".to_string(),
            template: TemplateType::Newsletter,
            password: None,
            blocks: ids
                .iter()
                .map(|id| Block::with_defaults(*id, BlockType::Text))
                .collect(),
            created_at: 0,
            theme_color: String::new(),
        }
    }

    fn reorder(source: &str, target: &str) -> Mutation {
        Mutation::Reorder {
            source_id: source.to_string(),
            target_id: target.to_string(),
        }
    }

    #[test]
    fn test_reorder_forward_and_backward() {
        let mut p = project(&["a", "b", "c", "d"]);
        reorder("a", "c").apply(&mut p).unwrap();
        assert_eq!(p.block_ids(), vec!["b", "c", "a", "d"]);

        reorder("d", "b").apply(&mut p).unwrap();
        assert_eq!(p.block_ids(), vec!["d", "b", "c", "a"]);
    }

    #[test]
    fn test_reorder_noops() {
        let mut p = project(&["a", "b"]);
        assert_eq!(reorder("a", "a").apply(&mut p), Ok(MutationOutcome::Unchanged));
        assert_eq!(reorder("a", "zzz").apply(&mut p), Ok(MutationOutcome::Unchanged));
        assert_eq!(p.block_ids(), vec!["a", "b"]);
    }

    #[test]
    fn test_move_at_boundaries() {
        let mut p = project(&["a", "b"]);
        let up = Mutation::MoveBlock {
            id: "a".into(),
            direction: Direction::Up,
        };
        let down = Mutation::MoveBlock {
            id: "b".into(),
            direction: Direction::Down,
        };
        assert_eq!(up.apply(&mut p), Ok(MutationOutcome::Unchanged));
        assert_eq!(down.apply(&mut p), Ok(MutationOutcome::Unchanged));

        let swap = Mutation::MoveBlock {
            id: "a".into(),
            direction: Direction::Down,
        };
        assert_eq!(swap.apply(&mut p), Ok(MutationOutcome::Applied));
        assert_eq!(p.block_ids(), vec!["b", "a"]);
    }

    #[test]
    fn test_update_rejects_other_content_type() {
        let mut p = project(&["a"]);
        let before = p.clone();
        let bad = Mutation::UpdateBlock {
            id: "a".into(),
            patch: BlockPatch::content(BlockContent::Divider),
        };
        assert!(matches!(
            bad.apply(&mut p),
            Err(MutationError::ContentTypeMismatch { .. })
        ));
        assert_eq!(p, before);
    }

    #[test]
    fn test_update_replaces_parts_independently() {
        let mut p = project(&["a"]);
        let styles_before = p.blocks[0].styles.clone();
        let update = Mutation::UpdateBlock {
            id: "a".into(),
            patch: BlockPatch::content(BlockContent::Text(TextContent { text: "new".into() })),
        };
        update.apply(&mut p).unwrap();
        assert_eq!(p.blocks[0].content.text(), Some("new"));
        assert_eq!(p.blocks[0].styles, styles_before);
    }

    #[test]
    fn test_missing_ids_are_unchanged() {
        let mut p = project(&["a"]);
        let delete = Mutation::DeleteBlock { id: "x".into() };
        let update = Mutation::UpdateBlock {
            id: "x".into(),
            patch: BlockPatch::styles(BlockStyle::default()),
        };
        assert_eq!(delete.apply(&mut p), Ok(MutationOutcome::Unchanged));
        assert_eq!(update.apply(&mut p), Ok(MutationOutcome::Unchanged));
        assert_eq!(p.blocks.len(), 1);
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut p = project(&["a"]);
        let add = Mutation::AddBlock {
            id: "a".into(),
            block_type: BlockType::Map,
        };
        assert_eq!(add.apply(&mut p), Err(MutationError::DuplicateId("a".into())));
    }
}
