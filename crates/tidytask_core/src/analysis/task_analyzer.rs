//! Pure classification and ordering functions over todo snapshots.
//!
//! # Responsibility
//! - Compute overdue subsets, priority histograms, completion rate and
//!   urgency ranking for a read-only snapshot of records.
//! - Define the canonical display ordering used by listing callers.
//!
//! # Invariants
//! - Input slices are treated as immutable snapshots; no input ordering
//!   is assumed.
//! - Records without a deadline are never overdue and never urgent by
//!   deadline (they can still be urgent by priority).
//! - All sorts are stable: ties beyond the stated keys keep input order.

use crate::model::todo::{Priority, Todo};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Window ahead of `now` within which a deadline makes a task urgent.
pub const URGENT_WINDOW_MS: i64 = 2 * 24 * 60 * 60 * 1000;

/// Returns the records whose deadline has passed at `now_epoch_ms`.
///
/// The four-way split:
/// - no deadline → excluded, regardless of completion;
/// - deadline in the future → excluded;
/// - deadline in the past, incomplete → always included;
/// - deadline in the past, completed → included only when
///   `include_completed` is set.
///
/// No ordering is applied to the result.
pub fn overdue_todos<'a>(
    todos: &'a [Todo],
    now_epoch_ms: i64,
    include_completed: bool,
) -> Vec<&'a Todo> {
    todos
        .iter()
        .filter(|todo| todo.deadline_passed(now_epoch_ms))
        .filter(|todo| include_completed || !todo.completed)
        .collect()
}

/// Counts records per priority level.
///
/// All four levels are pre-seeded, so the result always holds exactly
/// four entries even when a level has zero records.
pub fn priority_distribution(todos: &[Todo]) -> BTreeMap<Priority, usize> {
    let mut distribution: BTreeMap<Priority, usize> =
        Priority::ALL.iter().map(|level| (*level, 0)).collect();

    for todo in todos {
        *distribution
            .entry(todo.priority)
            .or_default() += 1;
    }

    distribution
}

/// Percentage (0–100) of completed records.
///
/// Defined as exactly `0.0` for an empty snapshot.
pub fn completion_rate(todos: &[Todo]) -> f64 {
    if todos.is_empty() {
        return 0.0;
    }

    let completed = todos.iter().filter(|todo| todo.completed).count();
    completed as f64 / todos.len() as f64 * 100.0
}

/// Returns the incomplete records requiring immediate attention, ranked.
///
/// A record qualifies when its priority is `High` or `Critical`, or when
/// its deadline falls within [`URGENT_WINDOW_MS`] of `now_epoch_ms`
/// (already-passed deadlines included). The result is sorted by priority
/// descending, then deadline ascending with absent deadlines last.
pub fn urgent_todos<'a>(todos: &'a [Todo], now_epoch_ms: i64) -> Vec<&'a Todo> {
    let cutoff = now_epoch_ms.saturating_add(URGENT_WINDOW_MS);

    let mut urgent: Vec<&Todo> = todos
        .iter()
        .filter(|todo| !todo.completed)
        .filter(|todo| {
            todo.priority >= Priority::High
                || todo.deadline.is_some_and(|deadline| deadline <= cutoff)
        })
        .collect();

    urgent.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| deadline_key(a).cmp(&deadline_key(b)))
    });

    urgent
}

/// Canonical display ordering: priority descending, then deadline
/// ascending with absent deadlines last, then `created_at` descending.
pub fn canonical_cmp(a: &Todo, b: &Todo) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| deadline_key(a).cmp(&deadline_key(b)))
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Sorts a snapshot into canonical display order (stable).
pub fn sort_canonical(todos: &mut [Todo]) {
    todos.sort_by(canonical_cmp);
}

/// Aggregate reporting view over one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskReport {
    pub total: usize,
    pub completed: usize,
    /// Percentage 0–100.
    pub completion_rate: f64,
    pub priority_distribution: BTreeMap<Priority, usize>,
    /// Incomplete records with a passed deadline.
    pub overdue: usize,
    pub urgent: usize,
}

/// Builds the aggregate report for a snapshot at `now_epoch_ms`.
pub fn task_report(todos: &[Todo], now_epoch_ms: i64) -> TaskReport {
    TaskReport {
        total: todos.len(),
        completed: todos.iter().filter(|todo| todo.completed).count(),
        completion_rate: completion_rate(todos),
        priority_distribution: priority_distribution(todos),
        overdue: overdue_todos(todos, now_epoch_ms, false).len(),
        urgent: urgent_todos(todos, now_epoch_ms).len(),
    }
}

// Absent deadlines sort after every concrete deadline.
fn deadline_key(todo: &Todo) -> i64 {
    todo.deadline.unwrap_or(i64::MAX)
}
