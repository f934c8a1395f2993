use chrono::{NaiveDate, TimeZone, Utc};
use taskboard_core::db::open_db;
use taskboard_core::{
    KeyValueStore, MemoryKeyValueStore, Priority, SqliteKeyValueStore, Storage, Task, TaskId,
    TaskList, TaskListManager, TaskPatch, DEFAULT_LIST_NAME, STORAGE_KEY,
};

fn sample_manager() -> TaskListManager {
    let mut manager = TaskListManager::new();

    let default_id = manager.default_project().id();
    let default = manager.get_project_by_id_mut(default_id).unwrap();
    default.add_todo(
        Task::new("buy milk", "2 liters")
            .with_priority(Priority::Low)
            .with_tags(["home", "errands"]),
    );

    let mut work = TaskList::new("Work");
    let mut shipped = Task::new("ship release", "tag and publish")
        .with_priority(Priority::High)
        .with_due_date(NaiveDate::from_ymd_opt(2024, 3, 1));
    shipped.toggle_complete();
    work.add_todo(shipped);

    let mut edited = Task::new("write notes", "").with_tags(["docs"]);
    edited.edit(TaskPatch {
        description: Some("for the changelog".to_string()),
        ..TaskPatch::default()
    });
    work.add_todo(edited);
    manager.add_project(work);

    manager
}

#[test]
fn save_then_load_reconstructs_identical_graph() {
    let storage = Storage::new(MemoryKeyValueStore::new());
    let manager = sample_manager();

    storage.save(&manager).unwrap();
    let restored = storage.load().expect("saved state should load");

    assert_eq!(restored, manager);
    assert_eq!(restored.get_projects().len(), 2);
    let work = &restored.get_projects()[1];
    assert_eq!(work.name, "Work");
    assert!(work.todos()[0].completed);
    assert_eq!(work.todos()[1].tags(), ["docs".to_string()]);
    assert!(work.todos()[1].edited_at().is_some());
}

#[test]
fn load_returns_none_when_nothing_saved() {
    let storage = Storage::new(MemoryKeyValueStore::new());
    assert!(storage.load().is_none());

    let fresh = storage.load_or_default();
    assert_eq!(fresh.get_projects().len(), 1);
    assert_eq!(fresh.default_project().name, DEFAULT_LIST_NAME);
}

#[test]
fn corrupt_blob_is_treated_as_no_prior_state() {
    let store = MemoryKeyValueStore::new();
    store.put(STORAGE_KEY, "{\"projects\": [ truncated").unwrap();
    let storage = Storage::new(&store);

    assert!(storage.load().is_none());
    assert_eq!(storage.load_or_default().get_projects().len(), 1);
}

#[test]
fn save_overwrites_previous_blob() {
    let storage = Storage::new(MemoryKeyValueStore::new());
    let mut manager = TaskListManager::new();
    storage.save(&manager).unwrap();

    manager.add_project(TaskList::new("Later"));
    storage.save(&manager).unwrap();

    let restored = storage.load().unwrap();
    assert_eq!(restored.get_projects().len(), 2);
}

#[test]
fn blob_uses_browser_compatible_shape() {
    let storage = Storage::new(MemoryKeyValueStore::new());
    storage.save(&sample_manager()).unwrap();

    let blob = storage.store().get(STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
    let work = &value["projects"][1];
    assert_eq!(work["name"], "Work");
    let shipped = &work["todos"][0];
    assert_eq!(shipped["dueDate"], "2024-03-01");
    assert_eq!(shipped["priority"], "high");
    assert_eq!(shipped["completed"], true);
    assert!(shipped["createdAt"].is_string());
    assert!(shipped["editedAt"].is_null());
}

#[test]
fn loads_state_written_by_browser_build() {
    let legacy = serde_json::json!({
        "projects": [
            {
                "id": 1700000000000_u64,
                "name": "Default",
                "todos": [],
                "createdAt": "2023-11-14T22:13:20.000Z"
            },
            {
                "id": 1700000000500_u64,
                "name": "Garden",
                "todos": [
                    {
                        "id": 1700000000900_u64,
                        "title": "plant tomatoes",
                        "description": "",
                        "dueDate": "",
                        "priority": "medium",
                        "completed": false,
                        "tags": ["outside"],
                        "createdAt": "2023-11-14T22:13:21.000Z",
                        "editedAt": null
                    }
                ]
            }
        ]
    });
    let store = MemoryKeyValueStore::new();
    store.put(STORAGE_KEY, &legacy.to_string()).unwrap();

    let restored = Storage::new(&store).load().unwrap();
    let garden = &restored.get_projects()[1];
    let task = garden.get_todo_by_id(TaskId(1_700_000_000_900)).unwrap();
    assert_eq!(task.title, "plant tomatoes");
    assert_eq!(task.due_date, None);
    assert_eq!(task.tags(), ["outside".to_string()]);

    // Ids issued after a restore never collide with restored ones.
    assert!(Task::new("next", "").id().0 > 1_700_000_000_900);
}

#[test]
fn sqlite_store_persists_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state").join("taskboard.sqlite3");
    let manager = sample_manager();

    {
        let conn = open_db(&path).unwrap();
        let storage = Storage::new(SqliteKeyValueStore::try_new(&conn).unwrap());
        storage.save(&manager).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let storage = Storage::new(SqliteKeyValueStore::try_new(&conn).unwrap());
    assert_eq!(storage.load().unwrap(), manager);

    assert!(storage.clear().unwrap());
    assert!(storage.load().is_none());
}

#[test]
fn load_clamps_edit_time_that_precedes_creation() {
    let blob = serde_json::json!({
        "projects": [{
            "id": 1_700_000_001_000_u64,
            "name": "Default",
            "todos": [{
                "id": 1_700_000_001_100_u64,
                "title": "clock skew",
                "createdAt": "2024-01-02T00:00:00Z",
                "editedAt": "2024-01-01T08:30:00Z"
            }]
        }]
    });
    let store = MemoryKeyValueStore::new();
    store.put(STORAGE_KEY, &blob.to_string()).unwrap();

    let restored = Storage::new(&store).load().unwrap();
    let task = restored
        .default_project()
        .get_todo_by_id(TaskId(1_700_000_001_100))
        .unwrap();
    let created = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    assert_eq!(task.created_at(), created);
    assert_eq!(task.edited_at(), Some(created));
}
