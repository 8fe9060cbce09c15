use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Project store file
    #[arg(short, long, default_value = ".pamphlet/projects.json")]
    pub store: String,

    /// Base URL for share links
    #[arg(long, default_value = "http://localhost:3030")]
    pub share_base_url: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing pamphlet workspace...".bright_blue().bold());

    let config = Config {
        store_path: args.store.clone(),
        share_base_url: args.share_base_url.clone(),
        ..Config::default()
    };

    if let Some(parent) = config.get_store_path(cwd).parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
            println!("  {} Created {}", "✓".green(), parent.display());
        }
    }

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Workspace initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: pamphlet new \"5월 소식\" --template newsletter");
    println!("  2. Run: pamphlet list");
    println!("  3. Run: pamphlet render <project-id> --out page.html");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_config_once() {
        let dir = tempfile::TempDir::new().unwrap();
        let cwd = dir.path().display().to_string();
        let args = || InitArgs {
            store: "data/projects.json".to_string(),
            share_base_url: "https://pages.example.org".to_string(),
            force: false,
        };

        init(args(), &cwd).unwrap();
        let config = Config::load(&cwd).unwrap();
        assert_eq!(config.store_path, "data/projects.json");
        assert!(dir.path().join("data").is_dir());

        fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{}").unwrap();
        init(args(), &cwd).unwrap();
        assert_eq!(Config::load(&cwd).unwrap(), Config::default());
    }
}
