use std::error::Error;
use std::path::PathBuf;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::cli::prompt::StdioInteraction;
use crate::controller::TaskListController;
use crate::io::{config_io, recovery};
use crate::model::config::Config;
use crate::model::task::{Filter, TaskId};
use crate::ops::task_ops;

/// Where a command runs and how it reports
pub struct Context {
    pub data_dir: PathBuf,
    pub config: Config,
    pub json: bool,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cmd: Commands, ctx: &Context) -> Result<(), Box<dyn Error>> {
    match cmd {
        Commands::List(args) => cmd_list(args, ctx),
        Commands::Add(args) => cmd_add(args, ctx),
        Commands::Toggle(args) => cmd_toggle(args, ctx),
        Commands::Edit(args) => cmd_edit(args, ctx),
        Commands::Rm(args) => cmd_rm(args, ctx),
        Commands::Clear(args) => cmd_clear(args, ctx),
        Commands::Config => cmd_config(ctx),
        Commands::Recovery(args) => cmd_recovery(args, ctx),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn open(ctx: &Context, assume_yes: bool) -> TaskListController {
    TaskListController::open(
        &ctx.data_dir,
        &ctx.config,
        Box::new(StdioInteraction::new(assume_yes)),
    )
}

/// The controller keeps going when a save fails; a CLI run must not.
fn ensure_saved(controller: &TaskListController) -> Result<(), Box<dyn Error>> {
    match controller.storage_error() {
        Some(e) => Err(format!("task list was not saved: {}", e).into()),
        None => Ok(()),
    }
}

fn ensure_exists(controller: &TaskListController, id: TaskId) -> Result<(), Box<dyn Error>> {
    if task_ops::find_task(controller.tasks(), id).is_none() {
        return Err(format!("task not found: {}", id).into());
    }
    Ok(())
}

fn print_change(ctx: &Context, id: TaskId, changed: bool, text: String) -> Result<(), Box<dyn Error>> {
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&ChangeJson { id, changed })?);
    } else {
        println!("{}", text);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, ctx: &Context) -> Result<(), Box<dyn Error>> {
    let mut controller = open(ctx, false);
    let filter = Filter::from(args.filter);
    controller.set_filter(filter);

    if ctx.json {
        let out = TaskListJson {
            filter: filter.as_str(),
            tasks: controller.compute_view(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", format_view(&controller.view()));
    }
    Ok(())
}

fn cmd_config(ctx: &Context) -> Result<(), Box<dyn Error>> {
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&ctx.config)?);
    } else {
        print!("{}", config_io::config_to_toml(&ctx.config)?);
    }
    Ok(())
}

fn cmd_recovery(args: RecoveryArgs, ctx: &Context) -> Result<(), Box<dyn Error>> {
    if args.clear {
        let removed = recovery::clear_recovery(&ctx.data_dir)?;
        println!("Removed {} recovery entries", removed);
        return Ok(());
    }

    let entries = recovery::read_recovery_entries(&ctx.data_dir, args.limit);
    if ctx.json {
        let out: Vec<RecoveryEntryJson> = entries.iter().map(recovery_entry_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if entries.is_empty() {
        println!("Recovery log is empty");
    } else {
        for entry in &entries {
            println!("{}", format_recovery_entry(entry));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs, ctx: &Context) -> Result<(), Box<dyn Error>> {
    let mut controller = open(ctx, false);
    let date = match args.date.as_deref() {
        Some(raw) => task_ops::parse_due_date(raw, controller.today())?,
        None => None,
    };
    let task = controller.add(&args.text, date)?;
    ensure_saved(&controller)?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        println!("Added {}", format_task(&task));
    }
    Ok(())
}

fn cmd_toggle(args: IdArgs, ctx: &Context) -> Result<(), Box<dyn Error>> {
    let mut controller = open(ctx, false);
    ensure_exists(&controller, args.id)?;
    controller.toggle_complete(args.id);
    ensure_saved(&controller)?;

    let task = task_ops::find_task(controller.tasks(), args.id)
        .ok_or_else(|| format!("task not found: {}", args.id))?;
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(task)?);
    } else {
        let state = if task.completed { "completed" } else { "pending" };
        println!("{} is now {}", task.id, state);
    }
    Ok(())
}

fn cmd_edit(args: EditArgs, ctx: &Context) -> Result<(), Box<dyn Error>> {
    let mut controller = open(ctx, false);
    ensure_exists(&controller, args.id)?;
    let changed = match &args.text {
        Some(text) => controller.edit_text(args.id, text),
        None => controller.edit(args.id),
    };
    ensure_saved(&controller)?;

    let text = if changed {
        match task_ops::find_task(controller.tasks(), args.id) {
            Some(task) => format!("Updated {}", format_task(task)),
            None => format!("Updated {}", args.id),
        }
    } else {
        format!("{} unchanged", args.id)
    };
    print_change(ctx, args.id, changed, text)
}

fn cmd_rm(args: IdArgs, ctx: &Context) -> Result<(), Box<dyn Error>> {
    let mut controller = open(ctx, false);
    ensure_exists(&controller, args.id)?;
    controller.delete(args.id);
    ensure_saved(&controller)?;
    print_change(ctx, args.id, true, format!("Deleted {}", args.id))
}

fn cmd_clear(args: ClearArgs, ctx: &Context) -> Result<(), Box<dyn Error>> {
    let mut controller = open(ctx, args.yes);
    let count = controller.tasks().len();
    let cleared = controller.delete_all();
    ensure_saved(&controller)?;

    let removed = if cleared { count } else { 0 };
    if ctx.json {
        println!("{}", serde_json::json!({ "removed": removed }));
    } else if cleared {
        println!("Deleted {} tasks", removed);
    } else if count == 0 {
        println!("Nothing to delete");
    } else {
        println!("Cancelled");
    }
    Ok(())
}
