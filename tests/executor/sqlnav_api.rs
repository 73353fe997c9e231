//! SqlNav API tests: the typed wrapper end to end.

use crate::common::*;
use sqlnav::{Capability, Error, NodeKind, Parameters, Value, Verb};

#[test]
fn people_scenario() {
    let nav = create_nav();

    let table = nav
        .create_table("people", "id INTEGER PRIMARY KEY, name TEXT NOT NULL")
        .unwrap();
    assert_eq!(table.kind, NodeKind::Table);
    assert_eq!(table.path, "\\people");

    let ada = nav
        .create_row("\\people", Parameters::new().with("name", "Ada"))
        .unwrap();
    assert_eq!(ada.kind, NodeKind::Record);
    assert_eq!(ada.item.get("id"), Some(&Value::Int(1)));
    assert_eq!(ada.item.get("name"), Some(&Value::from("Ada")));

    let updated = nav
        .set(&ada.path, None, Parameters::new().with("name", "Ada L."))
        .unwrap();
    assert_eq!(updated[0].item.get("name"), Some(&Value::from("Ada L.")));
    assert_eq!(updated[0].item.get("id"), Some(&Value::Int(1)));

    assert_eq!(nav.remove(&ada.path).unwrap(), 1);
    assert!(matches!(nav.get(&ada.path), Err(Error::NotFound { .. })));

    let rows = nav.invoke("\\people", "SELECT count(*) FROM people").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].len(), 1);
    assert_eq!(rows[0].iter().next().map(|(_, v)| v.clone()), Some(Value::Int(0)));
}

#[test]
fn created_row_reads_back_with_nulls() {
    let nav = create_nav();
    nav.create_table("people", "id INTEGER PRIMARY KEY, name TEXT NOT NULL, age integer, note")
        .unwrap();
    let grace = nav
        .create_row("/people", Parameters::new().with("name", "Grace").with("age", 85i64))
        .unwrap();

    let read = nav.get(&grace.path).unwrap();
    assert_eq!(read.item.get("name"), Some(&Value::from("Grace")));
    assert_eq!(read.item.get("age"), Some(&Value::Int(85)));
    assert_eq!(read.item.get("note"), Some(&Value::Null));
}

#[test]
fn child_names_are_distinct() {
    let nav = create_nav();
    nav.create_table("t", "id INTEGER PRIMARY KEY, v").unwrap();
    for v in ["a", "a", "b", "a"] {
        nav.create_row("/t", Parameters::new().with("v", v)).unwrap();
    }
    let mut names = nav.child_names("/t").unwrap();
    let total = names.len();
    names.sort();
    names.dedup();
    assert_eq!(total, 4);
    assert_eq!(names.len(), 4);
}

#[test]
fn probes_and_parameters() {
    let nav = create_nav();
    nav.create_table("t", "id INTEGER PRIMARY KEY, v TEXT NOT NULL").unwrap();
    nav.create_row("/t", Parameters::new().with("v", "x")).unwrap();

    assert!(nav.exists("/t/1").unwrap());
    assert!(!nav.exists("/t/2").unwrap());
    assert!(nav.is_container("/t").unwrap());
    assert!(nav.has_children("/").unwrap());

    let specs = nav.parameters("/t", Verb::Create).unwrap();
    assert_eq!(specs.len(), 2);
    assert!(specs.iter().any(|s| s.name == "v" && s.required));

    let root = nav.get("/").unwrap();
    assert_eq!(root.kind, NodeKind::Root);
    assert!(root.supports(Capability::Invocable));
    assert!(!root.supports(Capability::Removable));
}

#[test]
fn rename_copy_move() {
    let nav = create_nav();
    nav.create_table("people", "id INTEGER PRIMARY KEY, name TEXT").unwrap();
    nav.create_table("staging", "id INTEGER PRIMARY KEY, name TEXT").unwrap();
    nav.create_row("/people", Parameters::new().with("name", "Ada")).unwrap();

    let copied = nav.copy("/people/1", "/staging").unwrap();
    assert_eq!(copied[0].path, "\\staging\\1");

    let moved = nav.move_item("/staging/1", "/people/10").unwrap();
    assert_eq!(moved[0].path, "\\people\\10");
    assert!(!nav.exists("/staging/1").unwrap());
    assert_eq!(nav.child_names("/people").unwrap(), vec!["1", "10"]);

    let renamed = nav.rename("/staging", "archive").unwrap();
    assert_eq!(renamed.path, "\\archive");
    assert!(nav.exists("/archive").unwrap());
    assert!(!nav.exists("/staging").unwrap());

    assert!(matches!(
        nav.copy("/people/1", "/"),
        Err(Error::InvalidDestination { .. })
    ));
}

#[test]
fn invoke_with_streams_until_sink_fails() {
    let nav = create_nav();
    nav.create_table("n", "id INTEGER PRIMARY KEY").unwrap();
    nav.invoke("/", "INSERT INTO n (id) VALUES (1), (2), (3), (4)").unwrap();

    let mut seen = Vec::new();
    let result = nav.invoke_with("/n", "SELECT id FROM n ORDER BY id", |row| {
        let id = row.get("id").and_then(Value::as_int).unwrap_or_default();
        if id == 3 {
            return Err(sqlnav::NavError::usage("stop"));
        }
        seen.push(id);
        Ok(())
    });
    assert!(matches!(result, Err(Error::Usage { .. })));
    assert_eq!(seen, vec![1, 2]);
}

#[test]
fn from_root_descriptor() {
    let nav = sqlnav::SqlNav::from_root("[Data Source=:memory:]").unwrap();
    assert_eq!(nav.root(), "[Data Source=:memory:]");
    assert_eq!(nav.get("[Data Source=:memory:]\\").unwrap().kind, NodeKind::Root);

    assert!(matches!(
        sqlnav::SqlNav::from_root("[Mode=ReadOnly]"),
        Err(Error::Config { .. })
    ));
}
