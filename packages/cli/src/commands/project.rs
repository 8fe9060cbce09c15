use super::{new_session, open_store, print_warning};
use crate::config::Config;
use anyhow::Result;
use chrono::{TimeZone, Utc};
use clap::Args;
use colored::Colorize;
use pamphlet_editor::{list_projects, share_url, EditorError, NewProject, PropertyForm};
use pamphlet_schema::{Project, TemplateType};

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project title
    pub title: String,

    /// Starting template (invitation, newsletter, promotion)
    #[arg(short, long, default_value = "invitation")]
    pub template: String,

    /// Password required to delete the project
    #[arg(short, long)]
    pub password: Option<String>,
}

pub fn new_project(args: NewArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let template: TemplateType = args.template.parse()?;

    let mut request = NewProject::new(args.title, template);
    if let Some(password) = args.password {
        request = request.with_password(password);
    }

    let mut session = new_session(&config, cwd)?;
    let warning = session.create_project(&request)?;
    let project = session
        .project()
        .ok_or(EditorError::NoActiveProject)?;

    println!(
        "{} Created {} {} with {} blocks",
        "✓".green(),
        project.template.label(),
        project.title.bright_white(),
        project.blocks.len()
    );
    println!("  id: {}", project.id.cyan());
    print_warning(warning.as_ref());

    Ok(())
}

pub fn list(cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = open_store(&config, cwd);
    let projects = list_projects(store.as_ref())?;

    if projects.is_empty() {
        println!("{}", "No projects yet. Run: pamphlet new <title>".yellow());
        return Ok(());
    }

    for project in &projects {
        println!(
            "{}  {}  {}  {} blocks{}",
            project.id.cyan(),
            format_created_at(project.created_at).dimmed(),
            project.title.bright_white(),
            project.blocks.len(),
            if project.has_password() { "  🔒" } else { "" }
        );
    }

    Ok(())
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Project id
    pub project: String,

    /// Print the stored JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Also list the editable fields of this block
    #[arg(short, long)]
    pub block: Option<String>,
}

pub fn show(args: ShowArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut session = new_session(&config, cwd)?;
    session.open_project(&args.project)?;

    if let Some(id) = &args.block {
        session.select_block(id)?;
    }

    let project = session
        .project()
        .ok_or(EditorError::NoActiveProject)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&project.redacted())?);
        return Ok(());
    }

    print_project(project);

    if let Some(form) = session.property_form() {
        println!();
        print_form(&form);
    }

    Ok(())
}

fn print_project(project: &Project) {
    println!("{} ({})", project.title.bright_white().bold(), project.template.label());
    println!("  created: {}", format_created_at(project.created_at));
    println!("  theme:   {}", project.theme_color);
    println!();

    for (index, block) in project.blocks.iter().enumerate() {
        let label = block.block_type().map(|t| t.label()).unwrap_or("?");
        let summary = block.content.text().map(|t| truncate(t, 40)).unwrap_or_default();
        println!(
            "  {:>2}. {} {} {}",
            index + 1,
            block.id.cyan(),
            format!("[{} {}]", block.content.type_name(), label).dimmed(),
            summary
        );
    }
}

fn print_form(form: &PropertyForm) {
    println!("{} {}", "Properties of".bright_blue(), form.block_id.cyan());
    for field in form.content.iter().chain(form.styles.iter()) {
        println!("  {:<16} {:<12} {}", field.key, field.label.dimmed(), field.value);
    }

    if let Some(list) = &form.list {
        println!("  {} ({})", list.kind.label(), list.kind);
        for item in &list.items {
            let values: Vec<String> = item.fields.iter().map(|f| format!("{}={}", f.key, f.value)).collect();
            println!("    #{} {}", item.id, values.join(", "));
        }
    }

    if form.can_enhance {
        println!("  {}", "AI rewrite available: pamphlet enhance".dimmed());
    }
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Project id
    pub project: String,

    /// Password the project was created with
    #[arg(short, long)]
    pub password: Option<String>,
}

pub fn delete(args: DeleteArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut session = new_session(&config, cwd)?;
    session.delete_project(&args.project, args.password.as_deref())?;
    println!("{} Deleted project {}", "✓".green(), args.project.cyan());
    Ok(())
}

#[derive(Debug, Args)]
pub struct ShareArgs {
    /// Project id
    pub project: String,
}

pub fn share(args: ShareArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = open_store(&config, cwd);
    if store.get(&args.project)?.is_none() {
        return Err(EditorError::ProjectNotFound(args.project).into());
    }

    println!("{}", share_url(&config.share_base_url, &args.project));
    Ok(())
}

fn format_created_at(millis: i64) -> String {
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| millis.to_string())
}

fn truncate(text: &str, max: usize) -> String {
    let first_line = text.lines().next().unwrap_or_default();
    if first_line.chars().count() > max {
        format!("{}…", first_line.chars().take(max).collect::<String>())
    } else {
        first_line.to_string()
    }
}
