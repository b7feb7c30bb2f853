use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

use taskboard::cli::{Cli, Command};
use taskboard::config::Config;
use taskboard::storage::Storage;
use taskboard::{Priority, Query, Status, StoreError, Task, TaskDraft, TaskStore, today};

fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskboard")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Log to file so stdout stays clean for task output
    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("taskboard.log"))
        .context("Failed to open log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(log_filter(verbose, std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .init();

    Ok(())
}

/// `-v` forces debug; otherwise `RUST_LOG` decides, falling back to info
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(store_path) = cli.store_path {
        config.store_path = store_path;
    }

    info!(
        store_path = %config.store_path.display(),
        backend = ?config.backend,
        "taskboard starting"
    );

    let storage = config
        .backend
        .open(&config.store_path)
        .context("Failed to open task storage")?;
    let mut store = TaskStore::initialize_with(storage, config.store_options());

    if let Err(e) = run(&mut store, cli.command) {
        report(&e);
        process::exit(1);
    }

    if store.persist_failures() > 0 {
        eprintln!("{} changes were not saved, see the log for details", "warning:".yellow());
    }

    Ok(())
}

fn run(store: &mut TaskStore<Box<dyn Storage>>, command: Command) -> Result<(), StoreError> {
    match command {
        Command::List {
            search,
            priority,
            status,
            sort,
        } => {
            let query = Query::new()
                .search(search.unwrap_or_default())
                .priority(priority)
                .status(status)
                .order(sort);
            let tasks = store.query(&query);
            if tasks.is_empty() {
                println!("No tasks found");
            } else {
                print_table(&tasks);
            }
        }
        Command::Show { id } => match store.get(&id) {
            Some(task) => print_task(task),
            None => return Err(StoreError::NotFound(id)),
        },
        Command::Add {
            title,
            description,
            due,
            priority,
            status,
        } => {
            let draft = TaskDraft {
                title,
                description,
                due_date: due.unwrap_or_else(today),
                priority,
                status,
            };
            let task = store.create(draft)?;
            println!("{} Added task: {}", "✓".green(), task.id.cyan());
        }
        Command::Edit {
            id,
            title,
            description,
            due,
            priority,
            status,
        } => {
            let mut task = store.get(&id).cloned().ok_or_else(|| StoreError::NotFound(id.clone()))?;
            if let Some(title) = title {
                task.title = title;
            }
            if let Some(description) = description {
                task.description = description;
            }
            if let Some(due) = due {
                task.due_date = due;
            }
            if let Some(priority) = priority {
                task.priority = priority;
            }
            if let Some(status) = status {
                task.status = status;
            }
            store.update(task)?;
            println!("{} Updated task: {}", "✓".green(), id.cyan());
        }
        Command::Priority { id, priority } => {
            store.update_priority(&id, priority)?;
            println!("{} {} priority: {}", "✓".green(), id.cyan(), paint_priority(priority));
        }
        Command::Status { id, status } => {
            store.update_status(&id, status)?;
            println!("{} {} status: {}", "✓".green(), id.cyan(), paint_status(status));
        }
        Command::Delete { id } => match store.delete(&id) {
            Some(task) => println!("{} Deleted task: {} ({})", "✓".green(), id.cyan(), task.title),
            None => println!("No task with id {}", id),
        },
    }

    Ok(())
}

fn report(err: &StoreError) {
    match err {
        StoreError::Validation(errors) => {
            for e in errors.iter() {
                eprintln!("{} {}: {}", "error:".red(), e.field, e.message);
            }
        }
        StoreError::NotFound(_) => eprintln!("{} {}", "error:".red(), err),
    }
}

fn print_table(tasks: &[Task]) {
    let id_width = tasks.iter().map(|t| t.id.len()).max().unwrap_or(2).max(2);
    println!(
        "{:<id_width$}  {:<10}  {:<6}  {:<11}  {}",
        "ID".bold(),
        "DUE".bold(),
        "PRIO".bold(),
        "STATUS".bold(),
        "TITLE".bold(),
    );
    for task in tasks {
        println!(
            "{:<id_width$}  {:<10}  {:<6}  {:<11}  {}",
            task.id.dimmed(),
            task.due_date,
            paint_priority(task.priority),
            paint_status(task.status),
            task.title,
        );
    }
}

fn print_task(task: &Task) {
    println!("{}", task.title.bold());
    println!("  ID:       {}", task.id.dimmed());
    println!("  Due:      {}", task.due_date);
    println!("  Priority: {}", paint_priority(task.priority));
    println!("  Status:   {}", paint_status(task.status));
    println!();
    println!("  {}", task.description);
}

fn paint_priority(priority: Priority) -> ColoredString {
    match priority {
        Priority::High => priority.as_str().red(),
        Priority::Medium => priority.as_str().yellow(),
        Priority::Low => priority.as_str().green(),
    }
}

fn paint_status(status: Status) -> ColoredString {
    match status {
        Status::InProgress => status.as_str().blue(),
        Status::Completed => status.as_str().green(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_respects_rust_log() {
        assert_eq!(log_filter(false, Some("debug")).max_level_hint(), Some(tracing::Level::DEBUG.into()));
        assert_eq!(log_filter(false, Some("warn")).max_level_hint(), Some(tracing::Level::WARN.into()));
    }

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(false, None).max_level_hint(), Some(tracing::Level::INFO.into()));
        assert_eq!(log_filter(false, Some("taskboard=loud")).max_level_hint(), Some(tracing::Level::INFO.into()));
    }

    #[test]
    fn test_log_filter_verbose_wins() {
        assert_eq!(log_filter(true, Some("error")).max_level_hint(), Some(tracing::Level::DEBUG.into()));
    }
}
