use super::{open_session, print_report};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pamphlet_enhance::Tone;

#[derive(Debug, Args)]
pub struct EnhanceArgs {
    /// Project id
    pub project: String,

    /// Header or Text block to rewrite
    pub block: String,

    /// Tone of the rewrite (formal, friendly, promotional)
    #[arg(short, long, default_value = "friendly")]
    pub tone: String,

    /// Write the proposal into the block
    #[arg(long)]
    pub apply: bool,
}

pub async fn enhance(args: EnhanceArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let tone: Tone = args.tone.parse()?;
    let mut session = open_session(&config, cwd, &args.project)?;

    session.select_block(&args.block)?;

    println!("{} Rewriting in {} tone...", "✨".bright_blue(), tone);
    let proposal = session.enhance_selected_text(tone).await?;

    println!("  {} {}", "before:".dimmed(), proposal.original);
    println!("  {} {}", "after: ".green(), proposal.proposal);

    if proposal.proposal == proposal.original {
        println!("  {} No rewrite available, text left as is", "-".dimmed());
        return Ok(());
    }

    if args.apply {
        let report = session.accept_proposal(&proposal)?;
        print_report(&format!("Applied rewrite to {}", args.block.cyan()), &report);
    } else {
        println!("  Run again with --apply to keep it");
    }

    Ok(())
}
