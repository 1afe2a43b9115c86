//! Core domain logic for TidyTask.
//! This crate is the single source of truth for business invariants.

pub mod analysis;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use analysis::task_analyzer::{
    canonical_cmp, completion_rate, overdue_todos, priority_distribution, sort_canonical,
    task_report, urgent_todos, TaskReport, URGENT_WINDOW_MS,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::todo::{
    validate_title, Priority, Todo, TodoDraft, TodoId, TodoValidationError, TITLE_MAX_CHARS,
};
pub use repo::todo_repo::{
    RepoError, RepoResult, SqliteTodoRepository, TodoListQuery, TodoRepository,
};
pub use service::todo_service::{TodoService, TodoUpdate};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
