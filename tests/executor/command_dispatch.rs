//! Command dispatch tests: each verb through the Executor.

use crate::common::*;
use sqlnav::{Command, Output, Parameters, Value};

fn create(name: &str, age: i64) -> Command {
    Command::Create {
        path: "/people".into(),
        value: None,
        params: Parameters::new().with("name", name).with("age", age),
    }
}

#[test]
fn get_children_lists_rows_with_paths() {
    let executor = create_people_executor();
    executor.execute(create("Ada", 36)).unwrap();
    executor.execute(create("Grace", 85)).unwrap();

    let output = executor
        .execute(Command::GetChildren {
            path: "/people".into(),
            filter: None,
            recurse: false,
        })
        .unwrap();
    match output {
        Output::Items(items) => {
            let paths: Vec<_> = items.iter().map(|i| i.path.as_str()).collect();
            assert_eq!(paths, vec!["\\people\\1", "\\people\\2"]);
        }
        other => panic!("Expected Items, got {:?}", other),
    }
}

#[test]
fn remove_then_resolve_is_not_found() {
    let executor = create_people_executor();
    executor.execute(create("Ada", 36)).unwrap();

    let removed = executor
        .execute(Command::Remove {
            path: "/people/1".into(),
            filter: None,
            recurse: false,
        })
        .unwrap();
    assert_eq!(removed, Output::Removed(1));

    let err = executor.execute(Command::get("/people/1")).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn remove_table_drops_it() {
    let executor = create_people_executor();
    executor
        .execute(Command::Remove {
            path: "/people".into(),
            filter: None,
            recurse: true,
        })
        .unwrap();
    let names = extract_names(
        executor
            .execute(Command::GetChildNames {
                path: "/".into(),
                filter: None,
            })
            .unwrap(),
    );
    assert!(names.is_empty());
}

#[test]
fn update_with_payload_object() {
    let executor = create_people_executor();
    executor.execute(create("Ada", 36)).unwrap();

    let payload: Value = serde_json::json!({ "age": 37 }).into();
    executor
        .execute(Command::Set {
            path: "/people/1".into(),
            filter: None,
            value: Some(payload),
            params: Parameters::new(),
        })
        .unwrap();

    let rows = extract_rows(
        executor
            .execute(Command::invoke("/", "SELECT name, age FROM people WHERE id = 1"))
            .unwrap(),
    );
    assert_eq!(rows[0].get("name"), Some(&Value::from("Ada")));
    assert_eq!(rows[0].get("age"), Some(&Value::Int(37)));
}

#[test]
fn parameters_override_payload() {
    let executor = create_people_executor();
    let payload: Value = serde_json::json!({ "name": "from payload", "age": 1 }).into();
    let output = executor
        .execute(Command::Create {
            path: "/people".into(),
            value: Some(payload),
            params: Parameters::new().with("name", "from params"),
        })
        .unwrap();
    match output {
        Output::Item(item) => {
            assert_eq!(item.item.get("name"), Some(&Value::from("from params")));
            assert_eq!(item.item.get("age"), Some(&Value::Int(1)));
        }
        other => panic!("Expected Item, got {:?}", other),
    }
}

#[test]
fn explicit_null_is_written() {
    let executor = create_people_executor();
    executor.execute(create("Ada", 36)).unwrap();
    executor
        .execute(Command::Set {
            path: "/people/1".into(),
            filter: None,
            value: None,
            params: Parameters::new().with("age", Value::Null),
        })
        .unwrap();
    let rows = extract_rows(
        executor
            .execute(Command::invoke("/", "SELECT age FROM people"))
            .unwrap(),
    );
    assert_eq!(rows[0].get("age"), Some(&Value::Null));
}

#[test]
fn empty_update_changes_nothing() {
    let executor = create_people_executor();
    executor.execute(create("Ada", 36)).unwrap();
    let output = executor
        .execute(Command::Set {
            path: "/people/1".into(),
            filter: None,
            value: None,
            params: Parameters::new(),
        })
        .unwrap();
    match output {
        Output::Items(items) => {
            assert_eq!(items[0].item.get("name"), Some(&Value::from("Ada")));
            assert_eq!(items[0].item.get("age"), Some(&Value::Int(36)));
        }
        other => panic!("Expected Items, got {:?}", other),
    }
}

#[test]
fn store_prefix_and_separators_are_interchangeable() {
    let executor = create_people_executor();
    executor.execute(create("Ada", 36)).unwrap();
    for path in [
        "/people/1",
        "\\people\\1",
        "people/1",
        "[Data Source=:memory:]\\people\\1",
        "\\\\[Data Source=:memory:]/people/1/",
    ] {
        assert!(
            extract_bool(&executor.execute(Command::Exists { path: path.into() }).unwrap()),
            "{}",
            path
        );
    }
}
