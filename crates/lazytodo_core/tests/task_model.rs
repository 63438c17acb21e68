use lazytodo_core::{Task, TaskId, TaskValidationError};

#[test]
fn task_new_sets_defaults_and_trims() {
    let task = Task::new("  water plants \n", 1_700_000_000_000).unwrap();

    assert!(!task.id.as_str().is_empty());
    assert_eq!(task.text, "water plants");
    assert!(!task.done);
    assert!(task.is_open());
    assert_eq!(task.created, 1_700_000_000_000);
}

#[test]
fn task_new_rejects_blank_text() {
    assert_eq!(Task::new(" \t ", 0).unwrap_err(), TaskValidationError::EmptyText);
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let mut task = Task::with_id(TaskId::from("1700000000000-k3j9x"), "ship it", 42).unwrap();
    task.done = true;

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": "1700000000000-k3j9x",
            "text": "ship it",
            "done": true,
            "created": 42
        })
    );

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn validate_catches_records_built_by_hand() {
    let task = Task {
        id: TaskId::from("a"),
        text: "   ".to_string(),
        done: false,
        created: 0,
    };
    assert_eq!(task.validate().unwrap_err(), TaskValidationError::EmptyText);
}
