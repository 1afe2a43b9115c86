//! CLI entry point for TidyTask.
//!
//! # Responsibility
//! - Map subcommands onto `tidytask_core` service calls.
//! - Convert between human-readable deadline forms and the core's epoch
//!   millisecond timestamps.
//!
//! The CLI is the only layer that reads the ambient clock; the captured
//! `now` is passed down explicitly so every core computation stays
//! reproducible.

mod cli;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, LocalResult, SecondsFormat, TimeZone, Utc};
use clap::Parser;
use cli::{Cli, Command};
use tidytask_core::db::open_db;
use tidytask_core::{
    default_log_level, init_logging, SqliteTodoRepository, Todo, TodoDraft, TodoService,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        init_logging(default_log_level(), &log_dir.to_string_lossy()).map_err(|err| anyhow!(err))?;
    }

    let now_epoch_ms = Utc::now().timestamp_millis();
    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open database at `{}`", cli.db.display()))?;
    let repo = SqliteTodoRepository::try_new(&conn)?;
    let service = TodoService::new(repo);

    run(&cli.command, &service, now_epoch_ms)
}

fn run<R: tidytask_core::TodoRepository>(
    command: &Command,
    service: &TodoService<R>,
    now_epoch_ms: i64,
) -> Result<()> {
    match command {
        Command::Add {
            title,
            priority,
            deadline,
        } => {
            let deadline = deadline.as_deref().map(parse_deadline).transpose()?;
            let draft = TodoDraft {
                title: title.clone(),
                priority: (*priority).into(),
                deadline,
            };
            let todo = service.create_todo(&draft, now_epoch_ms)?;
            println!("created todo {}", todo.id);
            print_todos(std::slice::from_ref(&todo));
        }
        Command::List { json } => {
            let todos = service.list_todos()?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&todos)?);
            } else {
                print_todos(&todos);
            }
        }
        Command::Show { id, json } => match service.get_todo(*id)? {
            Some(todo) => {
                if *json {
                    println!("{}", serde_json::to_string_pretty(&todo)?);
                } else {
                    print_todos(std::slice::from_ref(&todo));
                }
            }
            None => bail!("todo {id} not found"),
        },
        Command::Done { id } => {
            let todo = service.set_completed(*id, true, now_epoch_ms)?;
            print_todos(std::slice::from_ref(&todo));
        }
        Command::Reopen { id } => {
            let todo = service.set_completed(*id, false, now_epoch_ms)?;
            print_todos(std::slice::from_ref(&todo));
        }
        Command::Title { id, title } => {
            let todo = service.update_title(*id, title.clone(), now_epoch_ms)?;
            print_todos(std::slice::from_ref(&todo));
        }
        Command::Priority { id, level } => {
            let todo = service.update_priority(*id, (*level).into(), now_epoch_ms)?;
            print_todos(std::slice::from_ref(&todo));
        }
        Command::Deadline { id, when, clear } => {
            let deadline = if *clear {
                None
            } else {
                match when {
                    Some(input) => Some(parse_deadline(input)?),
                    None => bail!("provide a deadline value or --clear"),
                }
            };
            let todo = service.update_deadline(*id, deadline, now_epoch_ms)?;
            print_todos(std::slice::from_ref(&todo));
        }
        Command::Delete { id } => {
            service.delete_todo(*id)?;
            println!("deleted todo {id}");
        }
        Command::Overdue { include_completed } => {
            let todos = service.overdue_todos(now_epoch_ms, *include_completed)?;
            print_todos(&todos);
        }
        Command::Urgent => {
            let todos = service.urgent_todos(now_epoch_ms)?;
            print_todos(&todos);
        }
        Command::Stats { json } => {
            let report = service.report(now_epoch_ms)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("total:      {}", report.total);
                println!(
                    "completed:  {} ({:.1}%)",
                    report.completed, report.completion_rate
                );
                println!("overdue:    {}", report.overdue);
                println!("urgent:     {}", report.urgent);
                for (priority, count) in &report.priority_distribution {
                    println!("{:<9}   {count}", priority.to_string());
                }
            }
        }
    }

    Ok(())
}

fn print_todos(todos: &[Todo]) {
    if todos.is_empty() {
        println!("no todos");
        return;
    }

    for todo in todos {
        let mark = if todo.completed { "x" } else { " " };
        println!(
            "{:>4} [{mark}] {:<8} {:<20} {}",
            todo.id,
            todo.priority.to_string(),
            format_deadline(todo.deadline),
            todo.title
        );
    }
}

/// Accepts RFC 3339 (`2026-08-10T12:00:00Z`) or raw epoch milliseconds.
fn parse_deadline(input: &str) -> Result<i64> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Ok(parsed.timestamp_millis());
    }
    input.parse::<i64>().with_context(|| {
        format!("invalid deadline `{input}`; expected RFC 3339 or epoch milliseconds")
    })
}

fn format_deadline(deadline: Option<i64>) -> String {
    let Some(epoch_ms) = deadline else {
        return "-".to_string();
    };
    match Utc.timestamp_millis_opt(epoch_ms) {
        LocalResult::Single(datetime) => datetime.to_rfc3339_opts(SecondsFormat::Secs, true),
        _ => epoch_ms.to_string(),
    }
}
