//! Persistent and transient connection lifetimes on file-backed drives.

use std::sync::Arc;
use std::thread;

use crate::common::*;
use sqlnav::{Command, Drive, DriveConfig, Executor, Parameters, SqlNav};
use tempfile::TempDir;

fn file_executor(dir: &TempDir, persistent: bool) -> Executor {
    init_tracing();
    Executor::open(DriveConfig::file(dir.path().join("nav.db"), persistent))
}

fn setup(executor: &Executor) {
    executor
        .execute(Command::invoke(
            "/",
            "CREATE TABLE people (id INTEGER PRIMARY KEY, name TEXT NOT NULL)",
        ))
        .unwrap();
}

#[test]
fn persistent_drive_keeps_one_connection() {
    let dir = TempDir::new().unwrap();
    let executor = file_executor(&dir, true);
    assert!(!executor.drive().is_connected());

    setup(&executor);
    assert!(executor.drive().is_connected());
    executor
        .execute(Command::Create {
            path: "/people".into(),
            value: None,
            params: Parameters::new().with("name", "Ada"),
        })
        .unwrap();
    assert!(executor.drive().is_connected());

    assert!(executor.close().unwrap());
    assert!(!executor.close().unwrap());
    assert!(!executor.drive().is_connected());

    // Reopens lazily and the data is on disk.
    assert!(extract_bool(
        &executor
            .execute(Command::Exists {
                path: "/people/1".into()
            })
            .unwrap()
    ));
}

#[test]
fn transient_drive_opens_per_command() {
    let dir = TempDir::new().unwrap();
    let executor = file_executor(&dir, false);
    setup(&executor);
    assert!(!executor.drive().is_connected());

    executor
        .execute(Command::Create {
            path: "/people".into(),
            value: None,
            params: Parameters::new().with("name", "Ada"),
        })
        .unwrap();
    assert!(!executor.drive().is_connected());

    let other = file_executor(&dir, false);
    assert!(extract_bool(
        &other
            .execute(Command::Exists {
                path: "/people/1".into()
            })
            .unwrap()
    ));
}

#[test]
fn in_memory_close_discards_everything() {
    let executor = create_people_executor();
    assert!(executor.close().unwrap());
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
fn concurrent_commands_are_serialized() {
    let dir = TempDir::new().unwrap();
    let executor = file_executor(&dir, true);
    setup(&executor);

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let executor = executor.clone();
            thread::spawn(move || {
                for i in 0..10 {
                    executor
                        .execute(Command::Create {
                            path: "/people".into(),
                            value: None,
                            params: Parameters::new().with("name", format!("{}-{}", t, i)),
                        })
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let rows = extract_rows(
        executor
            .execute(Command::invoke("/", "SELECT count(*) AS n FROM people"))
            .unwrap(),
    );
    assert_eq!(rows[0].get("n"), Some(&sqlnav::Value::Int(40)));
}

#[test]
fn racing_close_closes_once() {
    let drive = Arc::new(Drive::open_in_memory());
    drive.session().unwrap();

    let closed: usize = (0..8)
        .map(|_| {
            let drive = Arc::clone(&drive);
            thread::spawn(move || drive.close().unwrap())
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|h| h.join().unwrap() as usize)
        .sum();
    assert_eq!(closed, 1);
}

#[test]
fn config_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("sqlnav.toml");
    let config = DriveConfig::file(dir.path().join("nav.db"), false);
    config.write_to_file(&config_path).unwrap();

    let nav = SqlNav::from_config_file(&config_path).unwrap();
    assert!(!nav.executor().drive().is_persistent());
    nav.create_table("t", "id INTEGER PRIMARY KEY").unwrap();
    assert!(nav.exists("/t").unwrap());
}

