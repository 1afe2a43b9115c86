use tidytask_core::{
    canonical_cmp, completion_rate, overdue_todos, priority_distribution, sort_canonical,
    task_report, urgent_todos, Priority, Todo, TodoId, URGENT_WINDOW_MS,
};

const NOW: i64 = 1_754_000_000_000;
const DAY_MS: i64 = 24 * 60 * 60 * 1000;

fn todo(id: TodoId, priority: Priority, completed: bool, deadline: Option<i64>) -> Todo {
    Todo {
        id,
        title: format!("todo {id}"),
        completed,
        priority,
        created_at: NOW - 10 * DAY_MS,
        updated_at: None,
        deadline,
    }
}

fn ids(todos: &[&Todo]) -> Vec<TodoId> {
    todos.iter().map(|todo| todo.id).collect()
}

#[test]
fn overdue_applies_four_way_split() {
    let todos = vec![
        todo(1, Priority::Low, false, Some(NOW - DAY_MS)),
        todo(2, Priority::Low, false, Some(NOW + DAY_MS)),
        todo(3, Priority::Low, true, Some(NOW - 2 * DAY_MS)),
        todo(4, Priority::Low, false, None),
    ];

    let open_only = overdue_todos(&todos, NOW, false);
    assert_eq!(ids(&open_only), vec![1]);

    let with_completed = overdue_todos(&todos, NOW, true);
    let mut with_completed_ids = ids(&with_completed);
    with_completed_ids.sort_unstable();
    assert_eq!(with_completed_ids, vec![1, 3]);
}

#[test]
fn overdue_never_includes_records_without_deadline() {
    let todos = vec![
        todo(1, Priority::Critical, false, None),
        todo(2, Priority::Critical, true, None),
    ];

    assert!(overdue_todos(&todos, NOW, false).is_empty());
    assert!(overdue_todos(&todos, NOW, true).is_empty());
}

#[test]
fn overdue_without_completed_is_subset_of_with_completed() {
    let todos = vec![
        todo(1, Priority::Low, false, Some(NOW - DAY_MS)),
        todo(2, Priority::High, true, Some(NOW - DAY_MS)),
        todo(3, Priority::Medium, false, Some(NOW + DAY_MS)),
        todo(4, Priority::Low, true, None),
        todo(5, Priority::Critical, false, Some(NOW - 3 * DAY_MS)),
    ];

    let narrow = ids(&overdue_todos(&todos, NOW, false));
    let wide = ids(&overdue_todos(&todos, NOW, true));

    for id in &narrow {
        assert!(wide.contains(id), "id {id} missing from wider result");
    }
}

#[test]
fn overdue_boundary_is_strictly_before_now() {
    let todos = vec![todo(1, Priority::Low, false, Some(NOW))];
    assert!(overdue_todos(&todos, NOW, false).is_empty());
}

#[test]
fn priority_distribution_counts_every_level() {
    let todos = vec![
        todo(1, Priority::Low, false, None),
        todo(2, Priority::Low, false, None),
        todo(3, Priority::Medium, false, None),
        todo(4, Priority::High, false, None),
        todo(5, Priority::Critical, false, None),
    ];

    let distribution = priority_distribution(&todos);
    assert_eq!(distribution.len(), 4);
    assert_eq!(distribution[&Priority::Low], 2);
    assert_eq!(distribution[&Priority::Medium], 1);
    assert_eq!(distribution[&Priority::High], 1);
    assert_eq!(distribution[&Priority::Critical], 1);
    assert_eq!(distribution.values().sum::<usize>(), todos.len());
}

#[test]
fn priority_distribution_keeps_zero_count_levels() {
    let distribution = priority_distribution(&[]);
    assert_eq!(distribution.len(), 4);
    assert!(distribution.values().all(|count| *count == 0));

    let only_low = vec![todo(1, Priority::Low, false, None)];
    let distribution = priority_distribution(&only_low);
    assert_eq!(distribution.len(), 4);
    assert_eq!(distribution[&Priority::Critical], 0);
}

#[test]
fn completion_rate_scenarios() {
    assert_eq!(completion_rate(&[]), 0.0);

    let half = vec![
        todo(1, Priority::Low, true, None),
        todo(2, Priority::Low, true, None),
        todo(3, Priority::Low, false, None),
        todo(4, Priority::Low, false, None),
    ];
    assert_eq!(completion_rate(&half), 50.0);

    let all_done = vec![
        todo(1, Priority::Low, true, None),
        todo(2, Priority::Low, true, None),
        todo(3, Priority::Low, true, None),
        todo(4, Priority::Low, true, None),
    ];
    assert_eq!(completion_rate(&all_done), 100.0);
}

#[test]
fn urgent_ranks_priority_before_deadline() {
    let todos = vec![
        todo(1, Priority::Low, false, Some(NOW + DAY_MS)),
        todo(2, Priority::Critical, false, Some(NOW + 3 * DAY_MS)),
        todo(3, Priority::Medium, false, Some(NOW + DAY_MS)),
    ];

    let urgent = urgent_todos(&todos, NOW);
    assert_eq!(ids(&urgent), vec![2, 3, 1]);
}

#[test]
fn urgent_excludes_completed_and_calm_records() {
    let todos = vec![
        todo(1, Priority::Critical, true, Some(NOW - DAY_MS)),
        todo(2, Priority::Low, false, Some(NOW + 3 * DAY_MS)),
        todo(3, Priority::Low, false, None),
        todo(4, Priority::High, false, None),
    ];

    let urgent = urgent_todos(&todos, NOW);
    assert_eq!(ids(&urgent), vec![4]);
}

#[test]
fn urgent_deadline_window_is_inclusive() {
    let todos = vec![
        todo(1, Priority::Low, false, Some(NOW + URGENT_WINDOW_MS)),
        todo(2, Priority::Low, false, Some(NOW + URGENT_WINDOW_MS + 1)),
        todo(3, Priority::Low, false, Some(NOW - DAY_MS)),
    ];

    let urgent = urgent_todos(&todos, NOW);
    assert_eq!(ids(&urgent), vec![3, 1]);
}

#[test]
fn urgent_sorts_absent_deadlines_last_within_priority() {
    let todos = vec![
        todo(1, Priority::High, false, None),
        todo(2, Priority::High, false, Some(NOW + DAY_MS)),
        todo(3, Priority::High, false, Some(NOW + 2 * DAY_MS)),
    ];

    let urgent = urgent_todos(&todos, NOW);
    assert_eq!(ids(&urgent), vec![2, 3, 1]);
}

#[test]
fn urgent_output_satisfies_ordering_property() {
    let todos = vec![
        todo(1, Priority::Low, false, Some(NOW + DAY_MS)),
        todo(2, Priority::Critical, false, None),
        todo(3, Priority::High, false, Some(NOW - DAY_MS)),
        todo(4, Priority::High, false, Some(NOW + DAY_MS)),
        todo(5, Priority::Medium, false, Some(NOW)),
        todo(6, Priority::Critical, false, Some(NOW + 5 * DAY_MS)),
    ];

    let urgent = urgent_todos(&todos, NOW);
    for pair in urgent.windows(2) {
        let (left, right) = (pair[0], pair[1]);
        assert!(left.priority >= right.priority);
        if left.priority == right.priority {
            let left_deadline = left.deadline.unwrap_or(i64::MAX);
            let right_deadline = right.deadline.unwrap_or(i64::MAX);
            assert!(left_deadline <= right_deadline);
        }
    }
}

#[test]
fn urgent_keeps_input_order_on_full_ties() {
    let todos = vec![
        todo(9, Priority::High, false, Some(NOW + DAY_MS)),
        todo(4, Priority::High, false, Some(NOW + DAY_MS)),
        todo(7, Priority::High, false, Some(NOW + DAY_MS)),
    ];

    let urgent = urgent_todos(&todos, NOW);
    assert_eq!(ids(&urgent), vec![9, 4, 7]);
}

#[test]
fn canonical_order_uses_three_keys() {
    let mut todos = vec![
        todo(1, Priority::Low, false, Some(NOW + DAY_MS)),
        todo(2, Priority::Critical, false, None),
        todo(3, Priority::Critical, false, Some(NOW + 2 * DAY_MS)),
        todo(4, Priority::Critical, false, Some(NOW + DAY_MS)),
        todo(5, Priority::Low, false, Some(NOW + DAY_MS)),
    ];
    // Same priority and deadline: newer creation wins.
    todos[0].created_at = NOW - 5 * DAY_MS;
    todos[4].created_at = NOW - DAY_MS;

    sort_canonical(&mut todos);

    let order: Vec<TodoId> = todos.iter().map(|todo| todo.id).collect();
    assert_eq!(order, vec![4, 3, 2, 5, 1]);
}

#[test]
fn canonical_cmp_is_deterministic_on_equal_keys() {
    let a = todo(1, Priority::Medium, false, Some(NOW));
    let b = todo(2, Priority::Medium, false, Some(NOW));
    assert_eq!(canonical_cmp(&a, &b), std::cmp::Ordering::Equal);
}

#[test]
fn task_report_aggregates_all_views() {
    let todos = vec![
        todo(1, Priority::Low, true, Some(NOW - DAY_MS)),
        todo(2, Priority::High, false, Some(NOW - DAY_MS)),
        todo(3, Priority::Critical, false, None),
        todo(4, Priority::Low, false, Some(NOW + 10 * DAY_MS)),
    ];

    let report = task_report(&todos, NOW);
    assert_eq!(report.total, 4);
    assert_eq!(report.completed, 1);
    assert_eq!(report.completion_rate, 25.0);
    assert_eq!(report.overdue, 1);
    assert_eq!(report.urgent, 2);
    assert_eq!(report.priority_distribution[&Priority::Low], 2);
    assert_eq!(report.priority_distribution.len(), 4);
}

#[test]
fn empty_snapshot_yields_empty_results_everywhere() {
    let todos: Vec<Todo> = Vec::new();

    assert!(overdue_todos(&todos, NOW, true).is_empty());
    assert!(urgent_todos(&todos, NOW).is_empty());
    assert_eq!(completion_rate(&todos), 0.0);

    let report = task_report(&todos, NOW);
    assert_eq!(report.total, 0);
    assert_eq!(report.completion_rate, 0.0);
    assert_eq!(report.overdue, 0);
    assert_eq!(report.urgent, 0);
}
