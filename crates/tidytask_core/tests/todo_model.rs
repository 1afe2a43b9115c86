use tidytask_core::{
    validate_title, Priority, Todo, TodoDraft, TodoValidationError, TITLE_MAX_CHARS,
};

#[test]
fn draft_new_sets_defaults() {
    let draft = TodoDraft::new("buy milk");

    assert_eq!(draft.title, "buy milk");
    assert_eq!(draft.priority, Priority::Low);
    assert_eq!(draft.deadline, None);
    assert!(draft.validate().is_ok());
}

#[test]
fn validate_title_rejects_empty_and_whitespace() {
    assert_eq!(validate_title(""), Err(TodoValidationError::EmptyTitle));
    assert_eq!(validate_title("   "), Err(TodoValidationError::EmptyTitle));
    assert_eq!(validate_title("\t\n"), Err(TodoValidationError::EmptyTitle));
}

#[test]
fn validate_title_enforces_maximum_length() {
    let at_limit = "a".repeat(TITLE_MAX_CHARS);
    assert!(validate_title(&at_limit).is_ok());

    let over_limit = "a".repeat(TITLE_MAX_CHARS + 1);
    assert_eq!(
        validate_title(&over_limit),
        Err(TodoValidationError::TitleTooLong {
            length: TITLE_MAX_CHARS + 1
        })
    );
}

#[test]
fn priority_orders_by_explicit_rank() {
    assert_eq!(Priority::Low.rank(), 0);
    assert_eq!(Priority::Medium.rank(), 1);
    assert_eq!(Priority::High.rank(), 2);
    assert_eq!(Priority::Critical.rank(), 3);

    assert!(Priority::Low < Priority::Medium);
    assert!(Priority::Medium < Priority::High);
    assert!(Priority::High < Priority::Critical);
    assert_eq!(Priority::ALL.iter().max(), Some(&Priority::Critical));
    assert_eq!(Priority::default(), Priority::Low);
}

#[test]
fn todo_serialization_uses_expected_wire_fields() {
    let todo = Todo {
        id: 7,
        title: "ship release".to_string(),
        completed: false,
        priority: Priority::High,
        created_at: 1_700_000_000_000,
        updated_at: Some(1_700_000_360_000),
        deadline: Some(1_700_086_400_000),
    };

    let json = serde_json::to_value(&todo).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["title"], "ship release");
    assert_eq!(json["completed"], false);
    assert_eq!(json["priority"], "high");
    assert_eq!(json["createdAt"], 1_700_000_000_000_i64);
    assert_eq!(json["updatedAt"], 1_700_000_360_000_i64);
    assert_eq!(json["deadline"], 1_700_086_400_000_i64);

    let decoded: Todo = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, todo);
}

#[test]
fn deadline_passed_ignores_missing_deadline() {
    let now = 1_754_000_000_000;
    let mut todo = Todo {
        id: 1,
        title: "no deadline".to_string(),
        completed: false,
        priority: Priority::Low,
        created_at: now,
        updated_at: None,
        deadline: None,
    };

    assert!(!todo.deadline_passed(now));

    todo.deadline = Some(now - 1);
    assert!(todo.deadline_passed(now));

    todo.deadline = Some(now + 1);
    assert!(!todo.deadline_passed(now));

    // Completion state does not change the deadline check itself.
    todo.completed = true;
    todo.deadline = Some(now - 1);
    assert!(todo.deadline_passed(now));
}
