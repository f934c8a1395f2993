use chrono::{Duration, Utc};
use taskboard_core::{Priority, Task, TaskId, TaskPatch};

#[test]
fn new_task_sets_defaults() {
    let task = Task::new("write report", "quarterly numbers");

    assert_eq!(task.title, "write report");
    assert_eq!(task.description, "quarterly numbers");
    assert_eq!(task.due_date, None);
    assert_eq!(task.priority, Priority::Medium);
    assert!(!task.completed);
    assert!(task.tags().is_empty());
    assert_eq!(task.edited_at(), None);
}

#[test]
fn fresh_tasks_never_share_ids() {
    let first = Task::new("a", "");
    let second = Task::new("b", "");
    assert_ne!(first.id(), second.id());
}

#[test]
fn edits_never_change_identity() {
    let mut task = Task::with_id(TaskId(11), "draft", "");
    task.edit(TaskPatch {
        title: Some("final".to_string()),
        completed: Some(true),
        tags: Some(vec!["done".to_string()]),
        ..TaskPatch::default()
    });
    task.toggle_complete();

    assert_eq!(task.id(), TaskId(11));
    assert_eq!(task.title, "final");
}

#[test]
fn toggle_twice_restores_completion() {
    for initial in [false, true] {
        let mut task = Task::with_id(TaskId(7), "x", "");
        task.completed = initial;
        task.toggle_complete();
        assert_eq!(task.completed, !initial);
        task.toggle_complete();
        assert_eq!(task.completed, initial);
    }
}

#[test]
fn add_tag_is_idempotent() {
    let mut task = Task::new("x", "").with_tags(["home"]);

    assert!(task.add_tag("work"));
    let once = task.tags().to_vec();
    assert!(!task.add_tag("work"));
    assert_eq!(task.tags(), once.as_slice());
    assert_eq!(task.tags(), ["home".to_string(), "work".to_string()]);
}

#[test]
fn remove_then_add_leaves_exactly_one_copy() {
    let mut task = Task::new("x", "").with_tags(["a", "b"]);

    assert!(task.remove_tag("a"));
    assert!(!task.remove_tag("a"));
    task.add_tag("a");

    let count = task.tags().iter().filter(|tag| *tag == "a").count();
    assert_eq!(count, 1);
}

#[test]
fn remove_tag_uses_exact_match() {
    let mut task = Task::new("x", "").with_tags(["Work"]);
    assert!(!task.remove_tag("work"));
    assert!(task.has_tag("Work"));
}

#[test]
fn edit_stamps_edited_at_after_creation() {
    let mut task = Task::new("x", "");
    task.edit(TaskPatch {
        priority: Some(Priority::High),
        completed: Some(true),
        ..TaskPatch::default()
    });

    assert_eq!(task.priority, Priority::High);
    assert!(task.completed);
    let edited_at = task.edited_at().expect("edit should stamp edited_at");
    assert!(edited_at >= task.created_at());
}

#[test]
fn empty_patch_still_counts_as_an_edit() {
    let mut task = Task::new("x", "");
    let patch = TaskPatch::default();
    assert!(patch.is_empty());
    task.edit(patch);
    assert!(task.edited_at().is_some());
    assert_eq!(task.title, "x");
}

#[test]
fn overdue_scenario_yesterday_vs_tomorrow() {
    let today = Utc::now().date_naive();
    let overdue = Task::new("T1", "")
        .with_priority(Priority::High)
        .with_due_date(Some(today - Duration::days(1)));
    let upcoming = Task::new("T2", "")
        .with_priority(Priority::Low)
        .with_due_date(Some(today + Duration::days(1)));

    assert!(overdue.is_overdue());
    assert!(!upcoming.is_overdue());
}
