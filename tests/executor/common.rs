//! Common test utilities for executor tests

use sqlnav::{Command, Executor, Output, Record, SqlNav};

/// Install a test-writer subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Create an executor with an in-memory database
pub fn create_executor() -> Executor {
    init_tracing();
    Executor::open_in_memory()
}

/// Create an executor with the `people` table in place
pub fn create_people_executor() -> Executor {
    let executor = create_executor();
    executor
        .execute(Command::invoke(
            "/",
            "CREATE TABLE people (id INTEGER PRIMARY KEY, name TEXT NOT NULL, age integer)",
        ))
        .unwrap();
    executor
}

/// Create a SqlNav wrapper with an in-memory database
pub fn create_nav() -> SqlNav {
    init_tracing();
    SqlNav::open_in_memory()
}

/// Extract bool from Output::Bool
#[allow(dead_code)]
pub fn extract_bool(output: &Output) -> bool {
    match output {
        Output::Bool(b) => *b,
        _ => panic!("Expected Output::Bool, got {:?}", output),
    }
}

/// Extract rows from Output::Rows
#[allow(dead_code)]
pub fn extract_rows(output: Output) -> Vec<Record> {
    match output {
        Output::Rows(rows) => rows,
        _ => panic!("Expected Output::Rows, got {:?}", output),
    }
}

/// Extract names from Output::Names
#[allow(dead_code)]
pub fn extract_names(output: Output) -> Vec<String> {
    match output {
        Output::Names(names) => names,
        _ => panic!("Expected Output::Names, got {:?}", output),
    }
}
