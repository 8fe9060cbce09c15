use crate::project::Project;
use crc32fast::Hasher;

/// Stable seed derived from a project id using CRC32
pub fn get_project_seed(project_id: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(b"project://");
    hasher.update(project_id.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential block id generator scoped to one project
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generator for `project` whose counter starts past every id it
    /// already issued, so reopened projects never reuse an id
    pub fn for_project(project: &Project) -> Self {
        let seed = get_project_seed(&project.id);
        let prefix = format!("{}-", seed);

        let count = project
            .blocks
            .iter()
            .filter_map(|b| b.id.strip_prefix(&prefix))
            .filter_map(|n| n.parse::<u32>().ok())
            .max()
            .unwrap_or(0);

        Self { seed, count }
    }

    /// Generate next sequential id
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Block, BlockType};
    use crate::project::TemplateType;

    fn project_with(ids: &[&str]) -> Project {
        Project {
            id: "1716000000000".to_string(),
            title: "t".to_string(),
            template: TemplateType::Newsletter,
            password: None,
            blocks: ids
                .iter()
                .map(|id| Block::with_defaults(*id, BlockType::Divider))
                .collect(),
            created_at: 0,
            theme_color: String::new(),
        }
    }

    #[test]
    fn test_seed_is_stable() {
        assert_eq!(get_project_seed("a"), get_project_seed("a"));
        assert_ne!(get_project_seed("a"), get_project_seed("b"));
    }

    #[test]
    fn test_sequential_ids() {
        let mut gen = IdGenerator::from_seed("abc".to_string());
        assert_eq!(gen.new_id(), "abc-1");
        assert_eq!(gen.new_id(), "abc-2");
        assert_eq!(gen.seed(), "abc");
    }

    #[test]
    fn test_resumes_after_existing_ids() {
        let seed = get_project_seed("1716000000000");
        let existing = format!("{}-7", seed);
        let project = project_with(&["default-header", existing.as_str()]);

        let mut gen = IdGenerator::for_project(&project);
        assert_eq!(gen.new_id(), format!("{}-8", seed));
    }
}
