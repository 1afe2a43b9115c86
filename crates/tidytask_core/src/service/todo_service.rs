//! Todo use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD and reporting entry points for core callers.
//! - Delegate persistence to repository implementations and analysis to
//!   the pure classifier functions.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence
//!   contracts.
//! - The service layer remains storage-agnostic.
//! - Mutating operations stamp `updated_at` with the caller-provided
//!   `now_epoch_ms`; creation stamps `created_at` and never `updated_at`.
//! - Listing is always returned in canonical display order.

use crate::analysis::task_analyzer::{
    overdue_todos, sort_canonical, task_report, urgent_todos, TaskReport,
};
use crate::model::todo::{Priority, Todo, TodoDraft, TodoId};
use crate::repo::todo_repo::{RepoError, RepoResult, TodoListQuery, TodoRepository};
use log::info;

/// Full-update input mirroring the external update contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoUpdate {
    pub title: String,
    pub completed: bool,
    pub priority: Priority,
    pub deadline: Option<i64>,
}

/// Use-case service wrapper for todo CRUD and reporting operations.
pub struct TodoService<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a new todo from a draft.
    ///
    /// # Contract
    /// - `completed` starts as `false`.
    /// - `created_at` is stamped with `now_epoch_ms`; `updated_at` stays
    ///   absent until the first mutation.
    /// - Returns the stored record with its assigned ID.
    pub fn create_todo(&self, draft: &TodoDraft, now_epoch_ms: i64) -> RepoResult<Todo> {
        let todo = self.repo.create_todo(draft, now_epoch_ms)?;
        info!(
            "event=todo_create module=service status=ok id={} priority={}",
            todo.id, todo.priority
        );
        Ok(todo)
    }

    /// Gets one todo by ID, `None` when absent.
    pub fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        self.repo.get_todo(id)
    }

    /// Lists the full snapshot in canonical display order.
    ///
    /// Ordering: priority descending, then deadline ascending with absent
    /// deadlines last, then `created_at` descending.
    pub fn list_todos(&self) -> RepoResult<Vec<Todo>> {
        let mut todos = self.repo.list_todos(&TodoListQuery::default())?;
        sort_canonical(&mut todos);
        Ok(todos)
    }

    /// Replaces all mutable fields of an existing todo.
    ///
    /// Returns `NotFound` when the ID is absent.
    pub fn update_todo(
        &self,
        id: TodoId,
        update: &TodoUpdate,
        now_epoch_ms: i64,
    ) -> RepoResult<Todo> {
        let mut todo = self.fetch_existing(id)?;
        todo.title = update.title.clone();
        todo.completed = update.completed;
        todo.priority = update.priority;
        todo.deadline = update.deadline;
        self.persist_update(todo, now_epoch_ms)
    }

    /// Updates only the title of an existing todo.
    pub fn update_title(
        &self,
        id: TodoId,
        title: impl Into<String>,
        now_epoch_ms: i64,
    ) -> RepoResult<Todo> {
        let mut todo = self.fetch_existing(id)?;
        todo.title = title.into();
        self.persist_update(todo, now_epoch_ms)
    }

    /// Updates only the priority of an existing todo.
    pub fn update_priority(
        &self,
        id: TodoId,
        priority: Priority,
        now_epoch_ms: i64,
    ) -> RepoResult<Todo> {
        let mut todo = self.fetch_existing(id)?;
        todo.priority = priority;
        self.persist_update(todo, now_epoch_ms)
    }

    /// Updates only the deadline of an existing todo.
    ///
    /// Passing `None` clears the deadline.
    pub fn update_deadline(
        &self,
        id: TodoId,
        deadline: Option<i64>,
        now_epoch_ms: i64,
    ) -> RepoResult<Todo> {
        let mut todo = self.fetch_existing(id)?;
        todo.deadline = deadline;
        self.persist_update(todo, now_epoch_ms)
    }

    /// Marks an existing todo as completed or reopens it.
    pub fn set_completed(
        &self,
        id: TodoId,
        completed: bool,
        now_epoch_ms: i64,
    ) -> RepoResult<Todo> {
        let mut todo = self.fetch_existing(id)?;
        todo.completed = completed;
        self.persist_update(todo, now_epoch_ms)
    }

    /// Deletes a todo by ID. Returns `NotFound` when absent.
    pub fn delete_todo(&self, id: TodoId) -> RepoResult<()> {
        self.repo.delete_todo(id)?;
        info!("event=todo_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Returns overdue records from a fresh snapshot.
    ///
    /// See [`overdue_todos`] for the exact inclusion rules.
    pub fn overdue_todos(
        &self,
        now_epoch_ms: i64,
        include_completed: bool,
    ) -> RepoResult<Vec<Todo>> {
        let todos = self.repo.list_todos(&TodoListQuery::default())?;
        Ok(overdue_todos(&todos, now_epoch_ms, include_completed)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Returns the ranked urgent records from a fresh snapshot.
    pub fn urgent_todos(&self, now_epoch_ms: i64) -> RepoResult<Vec<Todo>> {
        let todos = self.repo.list_todos(&TodoListQuery::default())?;
        Ok(urgent_todos(&todos, now_epoch_ms)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Builds the aggregate report over a fresh snapshot.
    pub fn report(&self, now_epoch_ms: i64) -> RepoResult<TaskReport> {
        let todos = self.repo.list_todos(&TodoListQuery::default())?;
        Ok(task_report(&todos, now_epoch_ms))
    }

    fn fetch_existing(&self, id: TodoId) -> RepoResult<Todo> {
        self.repo.get_todo(id)?.ok_or(RepoError::NotFound(id))
    }

    fn persist_update(&self, mut todo: Todo, now_epoch_ms: i64) -> RepoResult<Todo> {
        todo.updated_at = Some(now_epoch_ms);
        self.repo.update_todo(&todo)?;
        info!(
            "event=todo_update module=service status=ok id={}",
            todo.id
        );
        Ok(todo)
    }
}
