use super::open_store;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pamphlet_renderer::{
    compile_to_html, render_document_with, render_published_page, CompileOptions, PageOptions, RenderMode,
    RenderOptions,
};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Project id
    pub project: String,

    /// Render mode (edit, read-only)
    #[arg(short, long, default_value = "read-only")]
    pub mode: String,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Emit only the block markup, without the page shell
    #[arg(long)]
    pub fragment: bool,

    /// Emit compact markup
    #[arg(long)]
    pub compact: bool,

    /// Origin passed to embedded videos
    #[arg(long, default_value = "")]
    pub origin: String,
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mode = parse_mode(&args.mode)?;
    let project = open_store(&config, cwd)
        .get(&args.project)?
        .ok_or_else(|| anyhow!("Project not found: {}", args.project))?;

    let compile = if args.compact {
        CompileOptions::compact()
    } else {
        CompileOptions::default()
    };

    // The full page is the published view, so it is always read-only
    let html = if args.fragment || mode == RenderMode::Edit {
        let options = RenderOptions::new(mode).with_origin(args.origin.as_str());
        compile_to_html(&render_document_with(&project, &options), compile)
    } else {
        render_published_page(
            &project,
            &PageOptions {
                origin: args.origin.clone(),
                compile,
                ..Default::default()
            },
        )
    };

    match args.out {
        Some(path) => {
            fs::write(&path, html)?;
            eprintln!("{} Wrote {}", "✓".green(), path.display());
        }
        None => print!("{}", html),
    }

    Ok(())
}

fn parse_mode(mode: &str) -> Result<RenderMode> {
    match mode.to_ascii_lowercase().as_str() {
        "edit" => Ok(RenderMode::Edit),
        "read-only" | "readonly" | "view" => Ok(RenderMode::ReadOnly),
        other => Err(anyhow!("Unknown render mode: {}. Use: edit or read-only", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode("edit").unwrap(), RenderMode::Edit);
        assert_eq!(parse_mode("READ-ONLY").unwrap(), RenderMode::ReadOnly);
        assert!(parse_mode("preview").is_err());
    }
}
