//! Reporting and ranking views over todo snapshots.
//!
//! # Responsibility
//! - Derive overdue/urgent subsets, distributions and ordering from an
//!   in-memory snapshot without touching storage.
//!
//! # Invariants
//! - Every function is pure: no mutation of input, no I/O, no ambient
//!   clock reads — `now_epoch_ms` is always an explicit parameter.
//! - An empty snapshot is valid input and yields empty/zero results.

pub mod task_analyzer;
