//! Command-line interface definitions based on clap.
//!
//! Defines the [`Cli`] struct with subcommands [`Command`] and global
//! flags (`--db`, `--log-dir`).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tidytask_core::Priority;

/// TidyTask — minimal todo-list manager.
#[derive(Debug, Parser)]
#[command(name = "tidytask", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the SQLite database file.
    #[arg(long, global = true, default_value = "tidytask.sqlite3")]
    pub db: PathBuf,

    /// Directory for rolling log files. Logging stays off when absent.
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,
}

/// Priority argument accepted by the CLI, mapped to
/// [`Priority`](tidytask_core::Priority) internally.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
    Critical,
}

impl From<PriorityArg> for Priority {
    fn from(value: PriorityArg) -> Self {
        match value {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::High => Priority::High,
            PriorityArg::Critical => Priority::Critical,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Creates a new todo.
    Add {
        /// Title, 1-25 characters.
        title: String,

        /// Priority level for the new todo.
        #[arg(long, value_enum, default_value = "low")]
        priority: PriorityArg,

        /// Deadline as RFC 3339 or epoch milliseconds.
        #[arg(long)]
        deadline: Option<String>,
    },

    /// Lists all todos in canonical order.
    List {
        /// Prints the raw records as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Shows one todo by ID.
    Show {
        id: i64,

        /// Prints the raw record as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Marks a todo as completed.
    Done { id: i64 },

    /// Reopens a completed todo.
    Reopen { id: i64 },

    /// Replaces the title of a todo.
    Title { id: i64, title: String },

    /// Replaces the priority of a todo.
    Priority {
        id: i64,
        #[arg(value_enum)]
        level: PriorityArg,
    },

    /// Sets or clears the deadline of a todo.
    Deadline {
        id: i64,

        /// Deadline as RFC 3339 or epoch milliseconds.
        when: Option<String>,

        /// Clears the deadline instead of setting one.
        #[arg(long, conflicts_with = "when")]
        clear: bool,
    },

    /// Deletes a todo by ID.
    Delete { id: i64 },

    /// Lists todos whose deadline has passed.
    Overdue {
        /// Also includes completed todos with a passed deadline.
        #[arg(long)]
        include_completed: bool,
    },

    /// Lists incomplete todos requiring immediate attention, ranked.
    Urgent,

    /// Prints aggregate statistics for the current list.
    Stats {
        /// Prints the report as JSON.
        #[arg(long)]
        json: bool,
    },
}
