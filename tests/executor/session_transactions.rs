//! Session transaction tests through the public API.

use crate::common::*;
use sqlnav::{Command, Error, Output, Parameters, Value};

fn create(name: &str) -> Command {
    Command::Create {
        path: "/people".into(),
        value: None,
        params: Parameters::new().with("name", name),
    }
}

fn people(executor: &sqlnav::Executor) -> Vec<String> {
    extract_names(
        executor
            .execute(Command::GetChildNames {
                path: "/people".into(),
                filter: None,
            })
            .unwrap(),
    )
}

#[test]
fn commit_makes_verbs_visible() {
    let executor = create_people_executor();
    {
        let mut session = executor.session();
        session.execute(Command::TxnBegin).unwrap();
        session.execute(create("Ada")).unwrap();
        session.execute(create("Grace")).unwrap();
        session
            .execute(Command::Set {
                path: "/people/1".into(),
                filter: None,
                value: None,
                params: Parameters::new().with("age", 36i64),
            })
            .unwrap();
        assert_eq!(session.execute(Command::TxnCommit).unwrap(), Output::TxnCommitted);
    }
    assert_eq!(people(&executor), vec!["1", "2"]);
}

#[test]
fn rollback_undoes_every_verb() {
    let executor = create_people_executor();
    executor.execute(create("Ada")).unwrap();
    {
        let mut session = executor.session();
        session.execute(Command::TxnBegin).unwrap();
        session.execute(create("Grace")).unwrap();
        session
            .execute(Command::Remove {
                path: "/people/1".into(),
                filter: None,
                recurse: false,
            })
            .unwrap();
        let inside = extract_names(
            session
                .execute(Command::GetChildNames {
                    path: "/people".into(),
                    filter: None,
                })
                .unwrap(),
        );
        assert_eq!(inside, vec!["2"]);
        assert_eq!(session.execute(Command::TxnRollback).unwrap(), Output::TxnAborted);
    }
    assert_eq!(people(&executor), vec!["1"]);
}

#[test]
fn dropped_session_rolls_back() {
    let executor = create_people_executor();
    {
        let mut session = executor.session();
        session.execute(Command::TxnBegin).unwrap();
        session.execute(create("Ada")).unwrap();
    }
    assert!(people(&executor).is_empty());
}

#[test]
fn session_without_transaction_autocommits() {
    let executor = create_people_executor();
    {
        let mut session = executor.session();
        session.execute(create("Ada")).unwrap();
        assert!(!extract_bool(&session.execute(Command::TxnIsActive).unwrap()));
    }
    assert_eq!(people(&executor), vec!["1"]);
}

#[test]
fn transaction_state_errors() {
    let executor = create_executor();
    let mut session = executor.session();
    assert_eq!(
        session.execute(Command::TxnRollback).unwrap_err(),
        Error::TransactionNotActive
    );
    session.execute(Command::TxnBegin).unwrap();
    assert_eq!(
        session.execute(Command::TxnBegin).unwrap_err(),
        Error::TransactionAlreadyActive
    );
    session.execute(Command::TxnCommit).unwrap();
    assert_eq!(
        session.execute(Command::TxnCommit).unwrap_err(),
        Error::TransactionNotActive
    );
}

#[test]
fn schema_changes_roll_back_too() {
    let executor = create_executor();
    {
        let mut session = executor.session();
        session.execute(Command::TxnBegin).unwrap();
        session
            .execute(Command::Create {
                path: "/scratch".into(),
                value: Some(Value::from("id INTEGER PRIMARY KEY")),
                params: Parameters::new(),
            })
            .unwrap();
        assert!(extract_bool(
            &session
                .execute(Command::Exists {
                    path: "/scratch".into()
                })
                .unwrap()
        ));
        session.execute(Command::TxnRollback).unwrap();
    }
    assert!(!extract_bool(
        &executor
            .execute(Command::Exists {
                path: "/scratch".into()
            })
            .unwrap()
    ));
}
