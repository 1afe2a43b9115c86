//! Todo domain model.
//!
//! # Responsibility
//! - Define the canonical todo record shared by repository, service and
//!   analysis layers.
//! - Enforce title validation invariants on write paths.
//!
//! # Invariants
//! - `id` is assigned by the store on creation and never reused.
//! - `created_at` is set once at creation and never mutated afterwards.
//! - `updated_at` is set on every mutating update.
//! - A missing `deadline` means "no deadline", never "overdue".

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier assigned by the store on creation.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TodoId = i64;

/// Maximum allowed title length in characters.
pub const TITLE_MAX_CHARS: usize = 25;

/// Ordinal urgency level for a todo.
///
/// Ranked low → critical. Ordering goes through [`Priority::rank`] so the
/// comparison order cannot silently drift from the declared ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Every enumerant in rank order. Used to pre-seed distributions so
    /// zero-count levels still appear.
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Critical,
    ];

    /// Explicit ordinal rank: `Low=0`, `Medium=1`, `High=2`, `Critical=3`.
    pub fn rank(self) -> u8 {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
            Priority::Critical => 3,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Low
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        };
        write!(f, "{name}")
    }
}

/// Validation failure for todo titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
    /// Title exceeds [`TITLE_MAX_CHARS`] characters.
    TitleTooLong { length: usize },
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { length } => write!(
                f,
                "title length {length} exceeds maximum of {TITLE_MAX_CHARS} characters"
            ),
        }
    }
}

impl Error for TodoValidationError {}

/// Validates a title against the shared length rules.
///
/// # Contract
/// - Rejects empty or whitespace-only titles.
/// - Rejects titles longer than [`TITLE_MAX_CHARS`] characters.
pub fn validate_title(title: &str) -> Result<(), TodoValidationError> {
    if title.trim().is_empty() {
        return Err(TodoValidationError::EmptyTitle);
    }
    let length = title.chars().count();
    if length > TITLE_MAX_CHARS {
        return Err(TodoValidationError::TitleTooLong { length });
    }
    Ok(())
}

/// Canonical todo record.
///
/// Serialized as `camelCase` to match external schema naming. All
/// timestamps are Unix epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Store-assigned stable ID.
    pub id: TodoId,
    /// Non-empty, at most [`TITLE_MAX_CHARS`] characters.
    pub title: String,
    /// Completion state, defaults to `false` at creation.
    pub completed: bool,
    pub priority: Priority,
    /// Set once at creation.
    pub created_at: i64,
    /// Set on every mutating update, absent until the first one.
    pub updated_at: Option<i64>,
    /// Absent means "no deadline".
    pub deadline: Option<i64>,
}

impl Todo {
    /// Validates this record against the title rules.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        validate_title(&self.title)
    }

    /// Returns whether the deadline has passed at `now_epoch_ms`.
    ///
    /// A record without a deadline never counts as passed, regardless of
    /// completion state.
    pub fn deadline_passed(&self, now_epoch_ms: i64) -> bool {
        self.deadline.is_some_and(|deadline| deadline < now_epoch_ms)
    }
}

/// Creation input for a new todo.
///
/// The store assigns `id`; the service supplies `created_at` and forces
/// `completed = false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    pub title: String,
    pub priority: Priority,
    /// Optional deadline in epoch milliseconds.
    pub deadline: Option<i64>,
}

impl TodoDraft {
    /// Creates a draft with default priority and no deadline.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            priority: Priority::default(),
            deadline: None,
        }
    }

    /// Validates this draft against the title rules.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        validate_title(&self.title)
    }
}
