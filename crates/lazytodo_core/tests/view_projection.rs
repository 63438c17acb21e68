use lazytodo_core::{
    project, remaining_count, remaining_label, FilterMode, Task, TaskId, ViewSettings,
};

fn task(id: &str, done: bool) -> Task {
    let mut task = Task::with_id(TaskId::from(id), id, 1).unwrap();
    task.done = done;
    task
}

fn ids(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.id.as_str()).collect()
}

fn sample() -> Vec<Task> {
    vec![task("T1", false), task("T2", true), task("T3", false)]
}

#[test]
fn active_in_manual_order() {
    assert_eq!(ids(&project(&sample(), FilterMode::Active, false)), ["T1", "T3"]);
}

#[test]
fn all_newest_first_reverses_position() {
    assert_eq!(ids(&project(&sample(), FilterMode::All, true)), ["T3", "T2", "T1"]);
}

#[test]
fn completed_and_combined_modes() {
    let snapshot = sample();
    assert_eq!(ids(&project(&snapshot, FilterMode::Completed, false)), ["T2"]);
    assert_eq!(ids(&project(&snapshot, FilterMode::Active, true)), ["T3", "T1"]);
    assert_eq!(ids(&project(&snapshot, FilterMode::All, false)), ["T1", "T2", "T3"]);
}

#[test]
fn newest_first_ignores_created_timestamps() {
    let mut snapshot = sample();
    snapshot[0].created = 300;
    snapshot[1].created = 200;
    snapshot[2].created = 100;

    assert_eq!(ids(&project(&snapshot, FilterMode::All, true)), ["T3", "T2", "T1"]);
}

#[test]
fn projection_does_not_touch_snapshot() {
    let snapshot = sample();
    let copy = snapshot.clone();

    let _ = project(&snapshot, FilterMode::Completed, true);
    assert_eq!(snapshot, copy);
}

#[test]
fn empty_snapshot_projects_to_empty() {
    assert!(project(&[], FilterMode::All, true).is_empty());
}

#[test]
fn remaining_count_ignores_active_filter() {
    let snapshot = sample();
    for filter in [FilterMode::All, FilterMode::Active, FilterMode::Completed] {
        let _ = project(&snapshot, filter, true);
        assert_eq!(remaining_count(&snapshot), 2);
    }
}

#[test]
fn remaining_label_pluralizes() {
    assert_eq!(remaining_label(0), "0 tasks left");
    assert_eq!(remaining_label(1), "1 task left");
    assert_eq!(remaining_label(7), "7 tasks left");
}

#[test]
fn view_settings_project_uses_its_fields() {
    let settings = ViewSettings {
        filter: FilterMode::Active,
        sort_newest: false,
    };
    assert_eq!(ids(&settings.project(&sample())), ["T1", "T3"]);
}
