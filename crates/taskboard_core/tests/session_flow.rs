use chrono::{Duration, Utc};
use taskboard_core::{
    parse_tag_input, ListId, MemoryKeyValueStore, NewTask, Priority, Session, SessionError,
    SortCriteria, StatusFilter, Storage, TaskFilter, TaskId, TaskPatch,
};

fn open_session(store: &MemoryKeyValueStore) -> Session<&MemoryKeyValueStore> {
    Session::open(Storage::new(store))
}

#[test]
fn fresh_session_selects_default_list() {
    let store = MemoryKeyValueStore::new();
    let session = open_session(&store);

    assert_eq!(
        session.current_list_id(),
        session.manager().default_project().id()
    );
    assert!(session.visible_tasks().is_empty());
}

#[test]
fn default_list_id_is_stable_across_untouched_sessions() {
    let store = MemoryKeyValueStore::new();
    let first = open_session(&store).current_list_id();
    let second = open_session(&store);

    assert_eq!(second.current_list_id(), first);
    assert_eq!(second.manager().default_project().id(), first);
    assert!(second.storage().load().is_some());
}

#[test]
fn mutations_are_persisted_immediately() {
    let store = MemoryKeyValueStore::new();
    let (list_id, task_id) = {
        let mut session = open_session(&store);
        let list_id = session.create_list("  Work  ").unwrap();
        assert!(session.select_list(list_id));
        let task_id = session
            .add_task(NewTask {
                title: "review PR".to_string(),
                priority: Priority::High,
                tags: parse_tag_input("code, review"),
                ..NewTask::default()
            })
            .unwrap();
        assert!(session.toggle_task(task_id).unwrap());
        (list_id, task_id)
    };

    let reopened = open_session(&store);
    let work = reopened.manager().get_project_by_id(list_id).unwrap();
    assert_eq!(work.name, "Work");
    let task = work.get_todo_by_id(task_id).unwrap();
    assert!(task.completed);
    assert_eq!(task.tags(), ["code".to_string(), "review".to_string()]);
}

#[test]
fn blank_list_names_are_rejected() {
    let store = MemoryKeyValueStore::new();
    let mut session = open_session(&store);

    let err = session.create_list("   ").unwrap_err();
    assert!(matches!(err, SessionError::EmptyListName));
    assert_eq!(session.manager().get_projects().len(), 1);
}

#[test]
fn deleting_current_list_falls_back_to_default() {
    let store = MemoryKeyValueStore::new();
    let mut session = open_session(&store);
    let default_id = session.manager().default_project().id();
    let list_id = session.create_list("Temp").unwrap();
    session.select_list(list_id);

    assert!(session.delete_list(list_id).unwrap());
    assert_eq!(session.current_list_id(), default_id);

    assert!(!session.delete_list(default_id).unwrap());
    assert_eq!(session.manager().get_projects().len(), 1);
}

#[test]
fn selecting_unknown_list_keeps_current_selection() {
    let store = MemoryKeyValueStore::new();
    let mut session = open_session(&store);
    let before = session.current_list_id();

    assert!(!session.select_list(ListId(12345)));
    assert_eq!(session.current_list_id(), before);
}

#[test]
fn unknown_task_ids_surface_as_not_found() {
    let store = MemoryKeyValueStore::new();
    let mut session = open_session(&store);

    let err = session.toggle_task(TaskId(1)).unwrap_err();
    assert!(matches!(err, SessionError::TaskNotFound(TaskId(1))));
    let err = session.delete_task(TaskId(1)).unwrap_err();
    assert!(matches!(err, SessionError::TaskNotFound(_)));
    let err = session
        .edit_task(TaskId(1), TaskPatch::default())
        .unwrap_err();
    assert!(matches!(err, SessionError::TaskNotFound(_)));
}

#[test]
fn edit_and_delete_task_round_trip_through_storage() {
    let store = MemoryKeyValueStore::new();
    let mut session = open_session(&store);
    let keep = session.add_task(NewTask::new("keep")).unwrap();
    let discard = session.add_task(NewTask::new("drop")).unwrap();

    session
        .edit_task(
            keep,
            TaskPatch {
                title: Some("kept".to_string()),
                ..TaskPatch::default()
            },
        )
        .unwrap();
    let removed = session.delete_task(discard).unwrap();
    assert_eq!(removed.title, "drop");

    let reopened = open_session(&store);
    let default = reopened.manager().default_project();
    assert_eq!(default.len(), 1);
    assert_eq!(default.get_todo_by_id(keep).unwrap().title, "kept");
}

#[test]
fn view_state_composes_search_filter_and_sort() {
    let store = MemoryKeyValueStore::new();
    let mut session = open_session(&store);
    let today = Utc::now().date_naive();

    session
        .add_task(NewTask {
            title: "pay invoice".to_string(),
            due_date: Some(today - Duration::days(2)),
            priority: Priority::Low,
            ..NewTask::default()
        })
        .unwrap();
    session
        .add_task(NewTask {
            title: "pay rent".to_string(),
            due_date: Some(today - Duration::days(1)),
            priority: Priority::High,
            ..NewTask::default()
        })
        .unwrap();
    session
        .add_task(NewTask {
            title: "pay taxes".to_string(),
            due_date: Some(today + Duration::days(30)),
            ..NewTask::default()
        })
        .unwrap();
    session.add_task(NewTask::new("walk dog")).unwrap();

    session.set_search("PAY");
    session.set_filter(TaskFilter {
        status: Some(StatusFilter::Overdue),
        ..TaskFilter::default()
    });
    session.set_sort_criteria(SortCriteria::Priority);

    let titles: Vec<&str> = session
        .visible_tasks()
        .iter()
        .map(|task| task.title.as_str())
        .collect();
    assert_eq!(titles, vec!["pay rent", "pay invoice"]);

    assert!(!session.toggle_sort_direction());
    let titles: Vec<&str> = session
        .visible_tasks()
        .iter()
        .map(|task| task.title.as_str())
        .collect();
    assert_eq!(titles, vec!["pay invoice", "pay rent"]);
}
