//! Project creation, listing, deletion and sharing.

use crate::errors::{EditorError, EditorResult};
use pamphlet_schema::{initial_blocks, Project, TemplateType, DEFAULT_THEME_COLOR};
use pamphlet_storage::{ProjectStore, StorageResult};

pub const EMPTY_TITLE_MESSAGE: &str = "제목을 입력하세요.";

/// Request to create a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub title: String,
    pub template: TemplateType,
    pub password: Option<String>,
}

impl NewProject {
    pub fn new(title: impl Into<String>, template: TemplateType) -> Self {
        Self {
            title: title.into(),
            template,
            password: None,
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into()).filter(|p| !p.is_empty());
        self
    }
}

/// Build a project from a request
///
/// The id is the creation time in epoch milliseconds, bumped until it is
/// not in `taken`.
pub fn build_project(request: &NewProject, now_millis: i64, taken: &[&str]) -> EditorResult<Project> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(EditorError::Validation(EMPTY_TITLE_MESSAGE.to_string()));
    }

    let mut stamp = now_millis;
    while taken.contains(&stamp.to_string().as_str()) {
        stamp += 1;
    }

    Ok(Project {
        id: stamp.to_string(),
        title: title.to_string(),
        template: request.template,
        password: request.password.clone(),
        blocks: initial_blocks(request.template),
        created_at: now_millis,
        theme_color: DEFAULT_THEME_COLOR.to_string(),
    })
}

/// All stored projects, newest first
pub fn list_projects(store: &dyn ProjectStore) -> StorageResult<Vec<Project>> {
    let mut projects = store.list()?;
    projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(projects)
}

/// Delete a project, checking its password if it has one
///
/// The password is an exact-match guard against accidental deletion.
pub fn delete_project(store: &dyn ProjectStore, id: &str, password: Option<&str>) -> EditorResult<()> {
    let project = store
        .get(id)?
        .ok_or_else(|| EditorError::ProjectNotFound(id.to_string()))?;

    if project.has_password() && project.password.as_deref() != password {
        tracing::warn!("Refused to delete project {}: password mismatch", id);
        return Err(EditorError::PasswordMismatch);
    }

    store.delete(id)?;
    tracing::info!("Deleted project {}", id);
    Ok(())
}

/// Link to the read-only view of a project
pub fn share_url(base: &str, id: &str) -> String {
    let base = base.split('#').next().unwrap_or_default();
    format!("{}/#view/{}", base.trim_end_matches('/'), id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pamphlet_storage::MemoryStore;

    #[test]
    fn test_blank_title_rejected() {
        let request = NewProject::new("   ", TemplateType::Invitation);
        let err = build_project(&request, 1, &[]).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Validation error: 제목을 입력하세요.");
    }

    #[test]
    fn test_build_project_from_template() {
        let request = NewProject::new(" 가정의 달 ", TemplateType::Newsletter).with_password("");
        let project = build_project(&request, 1_716_000_000_000, &[]).unwrap();

        assert_eq!(project.id, "1716000000000");
        assert_eq!(project.title, "가정의 달");
        assert_eq!(project.password, None);
        assert_eq!(project.theme_color, "#3b82f6");
        assert_eq!(project.blocks, initial_blocks(TemplateType::Newsletter));
    }

    #[test]
    fn test_id_collision_bumps_stamp() {
        let request = NewProject::new("t", TemplateType::Promotion);
        let project = build_project(&request, 5, &["5", "6"]).unwrap();
        assert_eq!(project.id, "7");
        assert_eq!(project.created_at, 5);
    }

    #[test]
    fn test_list_newest_first() {
        let store = MemoryStore::new();
        for (title, at) in [("old", 1), ("new", 3), ("mid", 2)] {
            let project = build_project(&NewProject::new(title, TemplateType::Invitation), at, &[]).unwrap();
            store.put(&project).unwrap();
        }
        let titles: Vec<_> = list_projects(&store).unwrap().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_delete_requires_matching_password() {
        let store = MemoryStore::new();
        let request = NewProject::new("t", TemplateType::Invitation).with_password("1234");
        let project = build_project(&request, 1, &[]).unwrap();
        store.put(&project).unwrap();

        assert!(matches!(
            delete_project(&store, "1", Some("12345")),
            Err(EditorError::PasswordMismatch)
        ));
        assert!(matches!(delete_project(&store, "1", None), Err(EditorError::PasswordMismatch)));
        assert_eq!(store.list().unwrap().len(), 1);

        delete_project(&store, "1", Some("1234")).unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_delete_without_password() {
        let store = MemoryStore::new();
        let project = build_project(&NewProject::new("t", TemplateType::Invitation), 1, &[]).unwrap();
        store.put(&project).unwrap();
        delete_project(&store, "1", Some("anything")).unwrap();
        assert!(matches!(delete_project(&store, "1", None), Err(EditorError::ProjectNotFound(_))));
    }

    #[test]
    fn test_share_url() {
        assert_eq!(share_url("https://example.org/", "42"), "https://example.org/#view/42");
        assert_eq!(share_url("https://example.org/app#edit", "42"), "https://example.org/app/#view/42");
    }
}
