//! # Edit Session Management
//!
//! An `EditSession` is one user's editing context: the open project, the
//! selected block, the drag controller and the services it writes to.
//!
//! Every applied mutation is written through to the store. A failed write
//! is reported as a warning on the mutation report and never rolls back
//! the in-memory project.

use crate::drag::{DragConfig, DragController, DragEvent, DragOutcome};
use crate::errors::{EditorError, EditorResult};
use crate::lifecycle::{self, NewProject};
use crate::mutations::{BlockPatch, Direction, Mutation, MutationOutcome};
use crate::property::{ContentField, PropertyEdit, PropertyForm};
use pamphlet_enhance::{enhance_or_original, TextEnhancer, Tone};
use pamphlet_schema::{Block, BlockType, IdGenerator, Project};
use pamphlet_storage::ProjectStore;
use std::sync::Arc;

/// Degraded outcome that did not stop the edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionWarning {
    /// The project changed in memory but could not be saved
    PersistenceFailed(String),
}

/// Result of one edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationReport {
    pub outcome: MutationOutcome,
    pub warning: Option<SessionWarning>,
}

impl MutationReport {
    fn unchanged() -> Self {
        Self {
            outcome: MutationOutcome::Unchanged,
            warning: None,
        }
    }
}

/// Rewrite suggested for a text block; applied only when accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextProposal {
    pub block_id: String,
    pub original: String,
    pub proposal: String,
}

pub struct EditSession {
    store: Arc<dyn ProjectStore>,
    enhancer: Arc<dyn TextEnhancer>,
    drag: DragController,
    active: Option<Project>,
    ids: Option<IdGenerator>,
    selection: Option<String>,
    version: u64,
}

impl EditSession {
    pub fn new(store: Arc<dyn ProjectStore>, enhancer: Arc<dyn TextEnhancer>) -> Self {
        Self::with_drag_config(store, enhancer, DragConfig::default())
    }

    pub fn with_drag_config(
        store: Arc<dyn ProjectStore>,
        enhancer: Arc<dyn TextEnhancer>,
        drag: DragConfig,
    ) -> Self {
        Self {
            store,
            enhancer,
            drag: DragController::new(drag),
            active: None,
            ids: None,
            selection: None,
            version: 0,
        }
    }

    pub fn project(&self) -> Option<&Project> {
        self.active.as_ref()
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Number of applied mutations since the project was opened
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn store(&self) -> &dyn ProjectStore {
        self.store.as_ref()
    }

    // ---- Project lifecycle ----

    /// Create a project from a template, save it and open it
    pub fn create_project(&mut self, request: &NewProject) -> EditorResult<Option<SessionWarning>> {
        let existing = self.store.list().unwrap_or_default();
        let taken: Vec<&str> = existing.iter().map(|p| p.id.as_str()).collect();
        let project = lifecycle::build_project(request, chrono::Utc::now().timestamp_millis(), &taken)?;

        tracing::info!("Created project {} from {} template", project.id, project.template);
        let warning = self.persist(&project);
        self.open(project);
        Ok(warning)
    }

    pub fn open_project(&mut self, id: &str) -> EditorResult<()> {
        let project = self
            .store
            .get(id)?
            .ok_or_else(|| EditorError::ProjectNotFound(id.to_string()))?;
        self.open(project);
        Ok(())
    }

    /// Open an in-memory project without reading the store
    pub fn open(&mut self, project: Project) {
        self.ids = Some(IdGenerator::for_project(&project));
        self.active = Some(project);
        self.selection = None;
        self.version = 0;
        self.drag.handle(DragEvent::Cancel, &[]);
    }

    pub fn close_project(&mut self) -> Option<Project> {
        self.ids = None;
        self.selection = None;
        self.active.take()
    }

    pub fn list_projects(&self) -> EditorResult<Vec<Project>> {
        Ok(lifecycle::list_projects(self.store.as_ref())?)
    }

    /// Delete a stored project; closes it if it is the open one
    pub fn delete_project(&mut self, id: &str, password: Option<&str>) -> EditorResult<()> {
        lifecycle::delete_project(self.store.as_ref(), id, password)?;
        if self.active.as_ref().is_some_and(|p| p.id == id) {
            self.close_project();
        }
        Ok(())
    }

    // ---- Mutations ----

    /// Apply a mutation to the open project and write it through
    pub fn apply(&mut self, mutation: Mutation) -> EditorResult<MutationReport> {
        let Some(project) = self.active.as_mut() else {
            return Ok(MutationReport::unchanged());
        };

        let outcome = mutation.apply(project)?;

        match &mutation {
            Mutation::AddBlock { id, .. } if outcome.is_applied() => {
                self.selection = Some(id.clone());
            }
            Mutation::DeleteBlock { .. } => self.selection = None,
            _ => {}
        }

        if !outcome.is_applied() {
            return Ok(MutationReport::unchanged());
        }

        self.version += 1;
        let warning = match self.active.as_ref() {
            Some(project) => self.persist(project),
            None => None,
        };
        Ok(MutationReport { outcome, warning })
    }

    /// Append a default block of `block_type` and select it
    pub fn add_block(&mut self, block_type: BlockType) -> EditorResult<(Option<String>, MutationReport)> {
        let Some(ids) = self.ids.as_mut() else {
            return Ok((None, MutationReport::unchanged()));
        };
        let id = ids.new_id();
        let report = self.apply(Mutation::AddBlock {
            id: id.clone(),
            block_type,
        })?;
        Ok((Some(id), report))
    }

    pub fn update_block(&mut self, id: &str, patch: BlockPatch) -> EditorResult<MutationReport> {
        self.apply(Mutation::UpdateBlock {
            id: id.to_string(),
            patch,
        })
    }

    pub fn delete_block(&mut self, id: &str) -> EditorResult<MutationReport> {
        self.apply(Mutation::DeleteBlock { id: id.to_string() })
    }

    pub fn move_block(&mut self, id: &str, direction: Direction) -> EditorResult<MutationReport> {
        self.apply(Mutation::MoveBlock {
            id: id.to_string(),
            direction,
        })
    }

    pub fn reorder(&mut self, source_id: &str, target_id: &str) -> EditorResult<MutationReport> {
        self.apply(Mutation::Reorder {
            source_id: source_id.to_string(),
            target_id: target_id.to_string(),
        })
    }

    // ---- Selection and properties ----

    /// Select a block of the open project; unknown ids clear the selection
    pub fn select(&mut self, id: &str) {
        self.selection = self
            .active
            .as_ref()
            .and_then(|p| p.find_block(id))
            .map(|b| b.id.clone());
    }

    /// Select a block of the open project, failing if it does not exist
    pub fn select_block(&mut self, id: &str) -> EditorResult<()> {
        let project = self.active.as_ref().ok_or(EditorError::NoActiveProject)?;
        if project.find_block(id).is_none() {
            return Err(EditorError::BlockNotFound(id.to_string()));
        }
        self.selection = Some(id.to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selected_block(&self) -> Option<&Block> {
        let id = self.selection.as_deref()?;
        self.active.as_ref()?.find_block(id)
    }

    pub fn property_form(&self) -> Option<PropertyForm> {
        self.selected_block().map(PropertyForm::for_block)
    }

    /// Apply a property panel edit to the selected block
    pub fn edit_property(&mut self, edit: PropertyEdit) -> EditorResult<MutationReport> {
        let block = self.selected_block().ok_or(EditorError::NoSelection)?;
        let patch = edit.to_patch(block)?;
        let id = block.id.clone();
        self.update_block(&id, patch)
    }

    // ---- Drag and drop ----

    /// Feed a canvas input event; clicks select and drops reorder
    pub fn handle_drag(&mut self, event: DragEvent) -> EditorResult<(DragOutcome, Option<MutationReport>)> {
        let order: Vec<String> = self
            .active
            .as_ref()
            .map(|p| p.blocks.iter().map(|b| b.id.clone()).collect())
            .unwrap_or_default();
        let order: Vec<&str> = order.iter().map(String::as_str).collect();

        let outcome = self.drag.handle(event, &order);
        let report = match &outcome {
            DragOutcome::Select(id) => {
                self.select(id);
                None
            }
            DragOutcome::Reorder { source, target } => Some(self.reorder(source, target)?),
            DragOutcome::None => None,
        };
        Ok((outcome, report))
    }

    // ---- Text enhancement ----

    /// Ask the enhancer to rewrite the selected Header or Text block
    ///
    /// Enhancer failures yield the original text as the proposal. The
    /// project is not modified.
    pub async fn enhance_selected_text(&self, tone: Tone) -> EditorResult<TextProposal> {
        let block = self.selected_block().ok_or(EditorError::NoSelection)?;
        let original = block
            .content
            .text()
            .ok_or_else(|| EditorError::NotTextBearing(block.id.clone()))?
            .to_string();

        let proposal = enhance_or_original(self.enhancer.as_ref(), &original, tone).await;
        Ok(TextProposal {
            block_id: block.id.clone(),
            original,
            proposal,
        })
    }

    /// Write an accepted proposal into its block
    pub fn accept_proposal(&mut self, proposal: &TextProposal) -> EditorResult<MutationReport> {
        let Some(block) = self.active.as_ref().and_then(|p| p.find_block(&proposal.block_id)) else {
            return Ok(MutationReport::unchanged());
        };
        let edit = PropertyEdit::Content(ContentField::new("text", proposal.proposal.as_str()));
        let patch = edit.to_patch(block)?;
        self.update_block(&proposal.block_id, patch)
    }

    fn persist(&self, project: &Project) -> Option<SessionWarning> {
        match self.store.put(project) {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!("Failed to save project {}: {}", project.id, e);
                Some(SessionWarning::PersistenceFailed(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pamphlet_enhance::{FailingEnhancer, StaticEnhancer};
    use pamphlet_schema::{BlockContent, TemplateType};
    use pamphlet_storage::MemoryStore;

    fn session_with(store: MemoryStore, enhancer: Arc<dyn TextEnhancer>) -> EditSession {
        let mut session = EditSession::new(Arc::new(store), enhancer);
        session
            .create_project(&NewProject::new("테스트", TemplateType::Invitation))
            .unwrap();
        session
    }

    fn session() -> (EditSession, MemoryStore) {
        let store = MemoryStore::new();
        (session_with(store.clone(), Arc::new(StaticEnhancer::new())), store)
    }

    #[test]
    fn test_select_block_reports_missing_targets() {
        let (mut session, _) = session();
        session.select_block("default-map").unwrap();
        assert_eq!(session.selection(), Some("default-map"));

        assert!(matches!(
            session.select_block("nope"),
            Err(EditorError::BlockNotFound(id)) if id == "nope"
        ));
        assert_eq!(session.selection(), Some("default-map"));

        session.close_project();
        assert!(matches!(
            session.select_block("default-map"),
            Err(EditorError::NoActiveProject)
        ));
    }

    #[test]
    fn test_add_selects_new_block_and_persists() {
        let (mut session, store) = session();
        let (id, report) = session.add_block(BlockType::Divider).unwrap();
        let id = id.unwrap();

        assert!(report.outcome.is_applied());
        assert_eq!(session.selection(), Some(id.as_str()));
        assert_eq!(session.version(), 1);

        let saved = store.list().unwrap().remove(0);
        assert_eq!(saved.blocks.last().unwrap().id, id);
    }

    #[test]
    fn test_no_active_project_is_noop() {
        let mut session = EditSession::new(Arc::new(MemoryStore::new()), Arc::new(FailingEnhancer));
        let (id, report) = session.add_block(BlockType::Text).unwrap();
        assert_eq!(id, None);
        assert_eq!(report.outcome, MutationOutcome::Unchanged);
    }

    #[test]
    fn test_delete_clears_selection_move_keeps_it() {
        let (mut session, _) = session();
        session.select("default-map");
        session.move_block("default-map", Direction::Up).unwrap();
        assert_eq!(session.selection(), Some("default-map"));

        session.delete_block("default-header").unwrap();
        assert_eq!(session.selection(), None);
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let store = MemoryStore::new();
        let mut session = session_with(store.clone(), Arc::new(StaticEnhancer::new()));
        store.set_failing(true);

        let report = session.delete_block("default-header").unwrap();
        assert!(matches!(report.warning, Some(SessionWarning::PersistenceFailed(_))));
        assert_eq!(session.project().unwrap().blocks.len(), 3);
        assert_eq!(store.list().unwrap()[0].blocks.len(), 4);
    }

    #[test]
    fn test_click_selects_and_drag_reorders() {
        use crate::drag::Point;

        let (mut session, _) = session();
        let press = |x| DragEvent::PointerDown {
            block: "default-form".into(),
            pos: Point::new(x, 0.0),
        };

        session.handle_drag(press(0.0)).unwrap();
        session.handle_drag(DragEvent::PointerUp { over: None }).unwrap();
        assert_eq!(session.selection(), Some("default-form"));

        session.handle_drag(press(0.0)).unwrap();
        session
            .handle_drag(DragEvent::PointerMove {
                pos: Point::new(0.0, 40.0),
                over: Some("default-header".into()),
            })
            .unwrap();
        let (outcome, report) = session
            .handle_drag(DragEvent::PointerUp {
                over: Some("default-header".into()),
            })
            .unwrap();

        assert!(matches!(outcome, DragOutcome::Reorder { .. }));
        assert!(report.unwrap().outcome.is_applied());
        assert_eq!(session.project().unwrap().blocks[0].id, "default-form");
    }

    #[tokio::test]
    async fn test_enhance_proposal_then_accept() {
        let store = MemoryStore::new();
        let mut session = session_with(store, Arc::new(StaticEnhancer::replying("다듬은 제목")));
        session.select("default-header");

        let proposal = session.enhance_selected_text(Tone::Friendly).await.unwrap();
        assert_eq!(proposal.original, "2024년 복지관 개관 기념행사");
        assert_eq!(session.version(), 0);

        session.accept_proposal(&proposal).unwrap();
        assert_eq!(
            session.project().unwrap().blocks[0].content,
            BlockContent::Header(pamphlet_schema::TextContent {
                text: "다듬은 제목".into()
            })
        );
    }

    #[tokio::test]
    async fn test_enhance_failure_proposes_original() {
        let mut session = session_with(MemoryStore::new(), Arc::new(FailingEnhancer));
        session.select("default-header");
        let proposal = session.enhance_selected_text(Tone::Formal).await.unwrap();
        assert_eq!(proposal.proposal, proposal.original);

        session.select("default-map");
        assert!(matches!(
            session.enhance_selected_text(Tone::Formal).await,
            Err(EditorError::NotTextBearing(_))
        ));
    }
}
