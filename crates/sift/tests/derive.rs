//! Tests for `#[derive(Record)]`.

use sift::{select, Evaluate, Field, Fold, Predicate, Record};

#[derive(Debug, Clone, sift_macros::Record)]
struct Task {
    name: String,
    priority: u8,
    tags: Vec<String>,

    #[record(rename = "done")]
    completed: bool,

    #[record(skip)]
    #[allow(dead_code)]
    internal_id: u64,

    r#type: String,
}

fn tasks() -> Vec<Task> {
    vec![
        Task {
            name: "Write docs".into(),
            priority: 3,
            tags: vec!["docs".into()],
            completed: false,
            internal_id: 1,
            r#type: "chore".into(),
        },
        Task {
            name: "Fix bug".into(),
            priority: 5,
            tags: vec!["bug".into(), "urgent".into()],
            completed: true,
            internal_id: 2,
            r#type: "bug".into(),
        },
        Task {
            name: "Ship release".into(),
            priority: 4,
            tags: vec!["urgent".into()],
            completed: false,
            internal_id: 3,
            r#type: "chore".into(),
        },
    ]
}

#[test]
fn generates_typed_descriptors() {
    let name: Field<Task, String> = Task::NAME;
    let priority: Field<Task, u8> = Task::PRIORITY;
    let done: Field<Task, bool> = Task::DONE;

    assert_eq!(name.name(), "name");
    assert_eq!(priority.name(), "priority");
    assert_eq!(done.name(), "done");

    let task = &tasks()[0];
    assert_eq!(Task::NAME.get(task), "Write docs");
    assert_eq!(*Task::PRIORITY.get(task), 3);
    assert!(!*Task::DONE.get(task));
}

#[test]
fn registry_lists_fields_in_order() {
    assert_eq!(Task::FIELDS, &["name", "priority", "tags", "done", "type"]);
    assert!(Task::has_field("done"));
    assert!(!Task::has_field("completed"));
    assert!(!Task::has_field("internal_id"));
}

#[test]
fn raw_identifier_fields_use_plain_names() {
    let chores = select(Task::TYPE).equal_to("chore".to_string());
    assert_eq!(chores.to_string(), "type == $1");
    assert_eq!(chores.count(&tasks()), 2);
}

#[test]
fn renamed_field_in_canonical_text() {
    let open = select(Task::DONE).equal_to(false);
    assert_eq!(open.canonical().text(), "done == $1");
}

#[test]
fn derived_fields_drive_queries() {
    let tasks = tasks();
    let query = select(Task::PRIORITY)
        .greater_or_equal(4)
        .and(select(Task::DONE).equal_to(false))
        .or(select(Task::NAME).contains("DOCS".to_string(), Fold::Case));

    let names: Vec<&str> = query.filter(&tasks).iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Write docs", "Ship release"]);
}

#[test]
fn derived_collection_fields_quantify() {
    let tasks = tasks();
    let urgent: Predicate<Task, String> = Predicate::any(Task::TAGS).equal_to("urgent".to_string());
    let only_urgent: Predicate<Task, String> =
        Predicate::all(Task::TAGS).equal_to("urgent".to_string());

    assert_eq!(urgent.count(&tasks), 2);
    assert_eq!(only_urgent.count(&tasks), 1);
}
