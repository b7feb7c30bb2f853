// CLI argument parsing for taskboard

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::filter::Criterion;
use crate::models::{Priority, Status};
use crate::query::SortOrder;

#[derive(Parser, Debug)]
#[command(name = "taskboard")]
#[command(about = "Task list with search, filter and sort")]
#[command(version = env!("GIT_DESCRIBE"))]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the store directory from the config
    #[arg(short, long)]
    pub store_path: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List tasks, optionally searched, filtered and sorted
    List {
        /// Case-insensitive text to find in title or description
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// High, Medium, Low or All
        #[arg(short, long, default_value = "All")]
        priority: Criterion<Priority>,

        /// "In Progress", Completed or All
        #[arg(short = 't', long, default_value = "All")]
        status: Criterion<Status>,

        /// Due-date order: asc or desc
        #[arg(short = 'o', long, default_value = "asc")]
        sort: SortOrder,
    },

    /// Show one task
    Show {
        #[arg(required = true)]
        id: String,
    },

    /// Add a task
    Add {
        #[arg(long)]
        title: String,

        #[arg(short, long)]
        description: String,

        /// Due date, YYYY-MM-DD (default: today)
        #[arg(long)]
        due: Option<String>,

        #[arg(short, long, default_value = "Medium")]
        priority: Priority,

        #[arg(short = 't', long, default_value = "In Progress")]
        status: Status,
    },

    /// Edit fields of an existing task
    Edit {
        #[arg(required = true)]
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long)]
        due: Option<String>,

        #[arg(short, long)]
        priority: Option<Priority>,

        #[arg(short = 't', long)]
        status: Option<Status>,
    },

    /// Change a task's priority
    Priority {
        #[arg(required = true)]
        id: String,

        #[arg(required = true)]
        priority: Priority,
    },

    /// Change a task's status
    Status {
        #[arg(required = true)]
        id: String,

        #[arg(required = true)]
        status: Status,
    },

    /// Delete a task
    Delete {
        #[arg(required = true)]
        id: String,
    },
}
