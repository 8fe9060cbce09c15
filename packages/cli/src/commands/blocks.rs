use super::{open_session, print_report};
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pamphlet_editor::{
    ContentField, Direction, DragEvent, DragOutcome, EditSession, EditorError, ListKind, PropertyEdit, Point,
    StyleField, StyleKey,
};
use pamphlet_schema::BlockType;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Project id
    pub project: String,

    /// Block type (header, text, image, video, schedule, map, form, social, ...)
    pub block_type: String,
}

pub fn add(args: AddArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let block_type: BlockType = args.block_type.parse()?;
    let mut session = open_session(&config, cwd, &args.project)?;

    let (id, report) = session.add_block(block_type)?;
    let id = id.ok_or(EditorError::NoActiveProject)?;
    print_report(&format!("Added {} block {}", block_type.label(), id.cyan()), &report);
    Ok(())
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Project id
    pub project: String,

    /// Block id
    pub block: String,

    /// Content field to set
    pub field: Option<String>,

    /// New value
    pub value: Option<String>,

    /// Nested list to edit (items, fields, links)
    #[arg(short, long)]
    pub list: Option<String>,

    /// Append a new item to the list
    #[arg(long, requires = "list")]
    pub add: bool,

    /// Remove the list item with this id
    #[arg(long, requires = "list", conflicts_with = "add")]
    pub remove: Option<String>,

    /// Edit the field of the list item with this id
    #[arg(long, requires = "list", conflicts_with_all = ["add", "remove"])]
    pub item: Option<String>,
}

impl UpdateArgs {
    fn to_edit(&self) -> Result<PropertyEdit> {
        let Some(list) = &self.list else {
            let (field, value) = self.field_and_value()?;
            return Ok(PropertyEdit::Content(ContentField::new(field, value)));
        };
        let list: ListKind = list.parse()?;

        if self.add {
            return Ok(PropertyEdit::AddItem(list));
        }
        if let Some(item_id) = &self.remove {
            return Ok(PropertyEdit::RemoveItem {
                list,
                item_id: item_id.clone(),
            });
        }

        let item_id = self
            .item
            .clone()
            .ok_or_else(|| anyhow!("Use --add, --remove <id> or --item <id> with --list"))?;
        let (field, value) = self.field_and_value()?;
        Ok(PropertyEdit::EditItem {
            list,
            item_id,
            field: field.to_string(),
            value: value.to_string(),
        })
    }

    fn field_and_value(&self) -> Result<(&str, &str)> {
        match (&self.field, &self.value) {
            (Some(field), Some(value)) => Ok((field.as_str(), value.as_str())),
            _ => Err(anyhow!("Expected a field name and a value")),
        }
    }
}

pub fn update(args: UpdateArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let edit = args.to_edit()?;
    let mut session = open_selected(&config, cwd, &args.project, &args.block)?;

    let report = session.edit_property(edit)?;
    print_report(&format!("Updated block {}", args.block.cyan()), &report);
    Ok(())
}

#[derive(Debug, Args)]
pub struct StyleArgs {
    /// Project id
    pub project: String,

    /// Block id
    pub block: String,

    /// Style property (backgroundColor, textColor, padding, textAlign, fontSize, fontWeight)
    pub key: String,

    /// New value; omit to clear the property
    pub value: Option<String>,
}

pub fn style(args: StyleArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let key: StyleKey = args.key.parse()?;
    let mut session = open_selected(&config, cwd, &args.project, &args.block)?;

    let report = session.edit_property(PropertyEdit::Style(StyleField::new(key, args.value)))?;
    print_report(&format!("Set {} on {}", key.as_str(), args.block.cyan()), &report);
    Ok(())
}

#[derive(Debug, Args)]
pub struct MoveArgs {
    /// Project id
    pub project: String,

    /// Block id
    pub block: String,

    /// up or down
    pub direction: String,
}

pub fn move_block(args: MoveArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let direction: Direction = args.direction.parse().map_err(anyhow::Error::msg)?;
    let mut session = open_session(&config, cwd, &args.project)?;

    let report = session.move_block(&args.block, direction)?;
    print_report(&format!("Moved {} {}", args.block.cyan(), direction), &report);
    Ok(())
}

#[derive(Debug, Args)]
pub struct ReorderArgs {
    /// Project id
    pub project: String,

    /// Block to move
    pub source: String,

    /// Block whose position it takes
    pub target: String,
}

pub fn reorder(args: ReorderArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut session = open_session(&config, cwd, &args.project)?;

    let report = session.reorder(&args.source, &args.target)?;
    print_report(
        &format!("Moved {} to the position of {}", args.source.cyan(), args.target.cyan()),
        &report,
    );
    Ok(())
}

#[derive(Debug, Args)]
pub struct DragArgs {
    /// Project id
    pub project: String,

    /// Block to press on
    pub block: String,

    /// Block to release over; omit for a plain click
    #[arg(long)]
    pub to: Option<String>,

    /// Pointer travel in pixels between press and release
    #[arg(long, default_value_t = 40.0)]
    pub distance: f64,
}

/// Replay a press, move and release on the canvas
pub fn drag(args: DragArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut session = open_session(&config, cwd, &args.project)?;

    let events = [
        DragEvent::PointerDown {
            block: args.block.clone(),
            pos: Point::default(),
        },
        DragEvent::PointerMove {
            pos: Point::new(0.0, args.distance),
            over: args.to.clone(),
        },
        DragEvent::PointerUp { over: args.to.clone() },
    ];

    let outcome = replay(&mut session, events)?;
    match outcome {
        DragOutcome::Select(id) => println!("  {} Selected {} (below drag threshold)", "-".dimmed(), id.cyan()),
        DragOutcome::Reorder { .. } => {}
        DragOutcome::None => println!("  {} Nothing to do", "-".dimmed()),
    }
    Ok(())
}

fn replay(session: &mut EditSession, events: impl IntoIterator<Item = DragEvent>) -> Result<DragOutcome> {
    let mut last = DragOutcome::None;
    for event in events {
        let (outcome, report) = session.handle_drag(event)?;
        if let (DragOutcome::Reorder { source, target }, Some(report)) = (&outcome, &report) {
            print_report(&format!("Dropped {} on {}", source.cyan(), target.cyan()), report);
        }
        if outcome != DragOutcome::None {
            last = outcome;
        }
    }
    Ok(last)
}

#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Project id
    pub project: String,

    /// Block id
    pub block: String,
}

pub fn remove(args: RemoveArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut session = open_session(&config, cwd, &args.project)?;

    let report = session.delete_block(&args.block)?;
    print_report(&format!("Removed block {}", args.block.cyan()), &report);
    Ok(())
}

/// Open a project with `block` selected
fn open_selected(config: &Config, cwd: &str, project: &str, block: &str) -> Result<EditSession> {
    let mut session = open_session(config, cwd, project)?;
    session.select_block(block)?;
    Ok(session)
}
