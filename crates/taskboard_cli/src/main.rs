//! Taskboard command-line front end.
//!
//! # Responsibility
//! - Translate CLI arguments into session commands on `taskboard_core`.
//! - Render lists and tasks as plain text.

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{AddArgs, Cli, Command, EditArgs, ListTarget, ShowArgs};
use log::warn;
use taskboard_core::db::open_db;
use taskboard_core::{
    init_logging, parse_due_date, parse_tag_input, AppConfig, KeyValueStore, ListId, NewTask,
    Priority, Session, SortCriteria, SortSpec, SqliteKeyValueStore, StatusFilter, Storage, Task,
    TaskFilter, TaskId, TaskPatch,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::resolve(cli.data_dir.clone(), cli.log_level);
    if let Err(err) = init_logging(config.log_level, &config.log_dir()) {
        eprintln!("warning: logging disabled: {err}");
    }

    if matches!(cli.command, Command::Version) {
        println!("taskboard {}", taskboard_core::core_version());
        return Ok(());
    }

    let db_path = config.db_path();
    let conn = open_db(&db_path)
        .with_context(|| format!("failed to open state database `{}`", db_path.display()))?;
    let store = SqliteKeyValueStore::try_new(&conn)?;
    let mut session = Session::open(Storage::new(store));

    run(&mut session, cli.command)
}

fn run<S: KeyValueStore>(session: &mut Session<S>, command: Command) -> Result<()> {
    match command {
        Command::Lists => {
            for list in session.manager().get_projects() {
                let marker = if session.manager().is_default(list.id()) {
                    " (default)"
                } else {
                    ""
                };
                println!("{}\t{} ({}){}", list.id(), list.name, list.len(), marker);
            }
        }
        Command::AddList { name } => {
            let id = session.create_list(&name)?;
            println!("created list {id}");
        }
        Command::RmList { id } => {
            if session.delete_list(ListId(id))? {
                println!("deleted list {id}");
            } else {
                warn!("event=list_delete module=cli status=skipped list_id={id}");
                println!("list {id} kept (default or unknown)");
            }
        }
        Command::Add(args) => add_task(session, args)?,
        Command::Show(args) => show_tasks(session, args)?,
        Command::Toggle { task_id, target } => {
            select(session, &target)?;
            let completed = session.toggle_task(TaskId(task_id))?;
            println!(
                "task {task_id} is now {}",
                if completed { "completed" } else { "active" }
            );
        }
        Command::Rm { task_id, target } => {
            select(session, &target)?;
            let removed = session.delete_task(TaskId(task_id))?;
            println!("deleted task {} ({})", removed.id(), removed.title);
        }
        Command::Edit(args) => edit_task(session, args)?,
        Command::Version => println!("taskboard {}", taskboard_core::core_version()),
    }
    Ok(())
}

fn select<S: KeyValueStore>(session: &mut Session<S>, target: &ListTarget) -> Result<()> {
    if let Some(id) = target.list {
        if !session.select_list(ListId(id)) {
            bail!("list not found: {id}");
        }
    }
    Ok(())
}

fn add_task<S: KeyValueStore>(session: &mut Session<S>, args: AddArgs) -> Result<()> {
    select(session, &args.target)?;
    let new_task = NewTask {
        title: args.title,
        description: args.description,
        due_date: match args.due.as_deref() {
            Some(text) => due_date_arg(text)?,
            None => None,
        },
        priority: args.priority.parse::<Priority>()?,
        tags: parse_tag_input(&args.tags),
    };
    let id = session.add_task(new_task)?;
    println!("created task {id}");
    Ok(())
}

fn edit_task<S: KeyValueStore>(session: &mut Session<S>, args: EditArgs) -> Result<()> {
    select(session, &args.target)?;
    let patch = TaskPatch {
        title: args.title,
        description: args.description,
        due_date: args.due.as_deref().map(due_date_arg).transpose()?,
        priority: args
            .priority
            .as_deref()
            .map(str::parse::<Priority>)
            .transpose()?,
        completed: None,
        tags: args.tags.as_deref().map(parse_tag_input),
    };
    if patch.is_empty() {
        bail!("nothing to edit; pass at least one field");
    }
    session.edit_task(TaskId(args.task_id), patch)?;
    println!("updated task {}", args.task_id);
    Ok(())
}

fn show_tasks<S: KeyValueStore>(session: &mut Session<S>, args: ShowArgs) -> Result<()> {
    select(session, &args.target)?;
    session.set_search(args.search);
    session.set_filter(TaskFilter {
        status: args
            .status
            .as_deref()
            .map(str::parse::<StatusFilter>)
            .transpose()?,
        priority: args
            .priority
            .as_deref()
            .map(str::parse::<Priority>)
            .transpose()?,
        tags: parse_tag_input(&args.tags),
    });
    let sort = SortSpec::new(SortCriteria::from_name(&args.sort), !args.desc);
    session.set_sort_criteria(sort.criteria);
    if session.view().sort.ascending != sort.ascending {
        session.toggle_sort_direction();
    }

    let list = session.current_list();
    println!("# {} ({})", list.name, list.id());
    for task in session.visible_tasks() {
        println!("{}", render_task(task));
    }
    Ok(())
}

/// Blank clears the date; anything else must parse.
fn due_date_arg(text: &str) -> Result<Option<chrono::NaiveDate>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    match parse_due_date(text) {
        Some(date) => Ok(Some(date)),
        None => bail!("invalid due date `{text}`; expected YYYY-MM-DD"),
    }
}

fn render_task(task: &Task) -> String {
    let check = if task.completed { "[x]" } else { "[ ]" };
    let due = task
        .due_date
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());
    let overdue = if task.is_overdue() { " OVERDUE" } else { "" };
    let mut line = format!(
        "{check} {}\t{}\t{}\tdue {due}{overdue}",
        task.id(), task.priority, task.title
    );
    if !task.description.is_empty() {
        line.push_str(&format!("\n      {}", task.description));
    }
    if !task.tags().is_empty() {
        line.push_str(&format!("\n      tags: {}", task.tags().join(", ")));
    }
    line
}
