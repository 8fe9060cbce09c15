mod commands;
mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::*;
use tracing_subscriber::EnvFilter;

/// Pamphlet CLI - Block-based mobile pages
#[derive(Parser, Debug)]
#[command(name = "pamphlet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a pamphlet workspace
    Init(InitArgs),

    /// Create a project from a template
    New(NewArgs),

    /// List projects, newest first
    List,

    /// Show the blocks of a project
    Show(ShowArgs),

    /// Delete a project
    Delete(DeleteArgs),

    /// Append a block
    Add(AddArgs),

    /// Edit a block's content or one of its lists
    Update(UpdateArgs),

    /// Set or clear a style property
    Style(StyleArgs),

    /// Move a block one step up or down
    Move(MoveArgs),

    /// Move a block to another block's position
    Reorder(ReorderArgs),

    /// Replay a pointer drag on the canvas
    Drag(DragArgs),

    /// Remove a block
    Remove(RemoveArgs),

    /// Render a project to HTML
    Render(RenderArgs),

    /// Print the share link of a project
    Share(ShareArgs),

    /// Rewrite a Header or Text block with AI
    Enhance(EnhanceArgs),

    /// Serve published pages over HTTP
    Serve(ServeArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()
        .context("Cannot get current directory")?
        .display()
        .to_string();

    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::New(args) => new_project(args, &cwd),
        Command::List => list(&cwd),
        Command::Show(args) => show(args, &cwd),
        Command::Delete(args) => delete(args, &cwd),
        Command::Add(args) => add(args, &cwd),
        Command::Update(args) => update(args, &cwd),
        Command::Style(args) => style(args, &cwd),
        Command::Move(args) => move_block(args, &cwd),
        Command::Reorder(args) => reorder(args, &cwd),
        Command::Drag(args) => drag(args, &cwd),
        Command::Remove(args) => remove(args, &cwd),
        Command::Render(args) => render(args, &cwd),
        Command::Share(args) => share(args, &cwd),
        Command::Enhance(args) => enhance(args, &cwd).await,
        Command::Serve(args) => serve(args, &cwd).await,
    }
}
