pub mod blocks;
pub mod enhance;
pub mod init;
pub mod project;
pub mod render;
pub mod serve;

pub use blocks::{
    add, drag, move_block, remove, reorder, style, update, AddArgs, DragArgs, MoveArgs, RemoveArgs, ReorderArgs,
    StyleArgs, UpdateArgs,
};
pub use enhance::{enhance, EnhanceArgs};
pub use init::{init, InitArgs};
pub use project::{delete, list, new_project, share, show, DeleteArgs, NewArgs, ShareArgs, ShowArgs};
pub use render::{render, RenderArgs};
pub use serve::{serve, ServeArgs};

use crate::config::Config;
use anyhow::Result;
use colored::Colorize;
use pamphlet_editor::{DragConfig, EditSession, MutationReport, SessionWarning};
use pamphlet_enhance::{GeminiEnhancer, TextEnhancer};
use pamphlet_storage::{JsonFileStore, ProjectStore};
use std::sync::Arc;

pub fn open_store(config: &Config, cwd: &str) -> Arc<dyn ProjectStore> {
    let path = config.get_store_path(cwd);
    tracing::debug!("Using project store {}", path.display());
    Arc::new(JsonFileStore::new(path))
}

pub fn open_enhancer(config: &Config) -> Result<Arc<dyn TextEnhancer>> {
    Ok(Arc::new(GeminiEnhancer::from_env(
        config.enhancer.model.as_str(),
        &config.enhancer.api_key_env,
    )?))
}

/// Session on the configured store, without an open project
pub fn new_session(config: &Config, cwd: &str) -> Result<EditSession> {
    Ok(EditSession::with_drag_config(
        open_store(config, cwd),
        open_enhancer(config)?,
        DragConfig::default().with_threshold(config.drag_threshold),
    ))
}

/// Session with project `id` open
pub fn open_session(config: &Config, cwd: &str, id: &str) -> Result<EditSession> {
    let mut session = new_session(config, cwd)?;
    session.open_project(id)?;
    Ok(session)
}

pub fn print_report(action: &str, report: &MutationReport) {
    if report.outcome.is_applied() {
        println!("  {} {}", "✓".green(), action);
    } else {
        println!("  {} {} (nothing changed)", "-".dimmed(), action);
    }
    print_warning(report.warning.as_ref());
}

pub fn print_warning(warning: Option<&SessionWarning>) {
    if let Some(SessionWarning::PersistenceFailed(message)) = warning {
        println!("  {} Changes kept in memory but not saved: {}", "⚠️".yellow(), message);
    }
}
