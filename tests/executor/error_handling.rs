//! Error handling tests: every failure is per call and leaves the executor
//! usable.

use crate::common::*;
use sqlnav::{Command, Error, Output, Parameters, Value};

#[test]
fn not_found_names_the_path() {
    let executor = create_people_executor();
    match executor.execute(Command::get("/people/7")) {
        Err(Error::NotFound { path }) => assert_eq!(path, "\\people\\7"),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[test]
fn table_without_primary_key() {
    let executor = create_executor();
    executor
        .execute(Command::invoke("/", "CREATE TABLE logs (line TEXT)"))
        .unwrap();
    executor
        .execute(Command::invoke("/", "INSERT INTO logs VALUES ('boot')"))
        .unwrap();

    let err = executor.execute(Command::get("/logs/1")).unwrap_err();
    assert!(matches!(err, Error::SchemaViolation { ref table, .. } if table == "logs"));

    let err = executor
        .execute(Command::Create {
            path: "/logs".into(),
            value: None,
            params: Parameters::new().with("line", "x"),
        })
        .unwrap_err();
    assert!(matches!(err, Error::SchemaViolation { .. }));

    // Table-level verbs still work.
    let rows = extract_rows(
        executor
            .execute(Command::invoke("/logs", "SELECT line FROM logs"))
            .unwrap(),
    );
    assert_eq!(rows.len(), 1);
}

#[test]
fn composite_primary_key_is_a_schema_violation() {
    let executor = create_executor();
    executor
        .execute(Command::invoke(
            "/",
            "CREATE TABLE pairs (a INTEGER, b INTEGER, PRIMARY KEY (a, b))",
        ))
        .unwrap();
    let err = executor
        .execute(Command::GetChildren {
            path: "/pairs".into(),
            filter: None,
            recurse: false,
        })
        .unwrap_err();
    assert!(matches!(err, Error::SchemaViolation { .. }));
}

#[test]
fn store_errors_leave_executor_usable() {
    let executor = create_people_executor();
    let err = executor
        .execute(Command::Create {
            path: "/people".into(),
            value: Some(Value::Object(Default::default())),
            params: Parameters::new().with("name", Value::Null),
        })
        .unwrap_err();
    assert!(matches!(err, Error::Store { .. }));

    let err = executor
        .execute(Command::invoke("/", "SELEKT nonsense"))
        .unwrap_err();
    assert!(matches!(err, Error::Store { .. }));

    let output = executor
        .execute(Command::Create {
            path: "/people".into(),
            value: None,
            params: Parameters::new().with("name", "Ada"),
        })
        .unwrap();
    assert!(matches!(output, Output::Item(_)));
}

#[test]
fn usage_errors_come_before_statements() {
    let executor = create_executor();
    let err = executor
        .execute(Command::Create {
            path: "/people".into(),
            value: None,
            params: Parameters::new(),
        })
        .unwrap_err();
    match err {
        Error::Usage { reason } => assert!(reason.contains("columns")),
        other => panic!("Expected Usage, got {:?}", other),
    }
    assert!(!extract_bool(
        &executor
            .execute(Command::Exists {
                path: "/people".into()
            })
            .unwrap()
    ));
}

#[test]
fn errors_serialize() {
    let executor = create_executor();
    let err = executor.execute(Command::get("/missing")).unwrap_err();
    let json = serde_json::to_string(&err).unwrap();
    let back: Error = serde_json::from_str(&json).unwrap();
    assert_eq!(back, err);
}
