//! Serialization round-trip tests for Command and Output enums.
//!
//! These tests verify that command and output variants survive a trip
//! through JSON without loss of information.

use crate::{Command, NodeKind, NodeValue, Output, ParamSpec, Parameters, Record, Value, ValueKind, Verb};

/// Helper to test round-trip serialization of a Command.
fn test_command_round_trip(cmd: Command) {
    let json = serde_json::to_string(&cmd).expect("Failed to serialize command");
    let restored: Command = serde_json::from_str(&json).expect("Failed to deserialize command");
    assert_eq!(cmd, restored, "Command round-trip failed for: {}", json);
}

/// Helper to test round-trip serialization of an Output.
fn test_output_round_trip(output: Output) {
    let json = serde_json::to_string(&output).expect("Failed to serialize output");
    let restored: Output = serde_json::from_str(&json).expect("Failed to deserialize output");
    assert_eq!(output, restored, "Output round-trip failed for: {}", json);
}

// =============================================================================
// Commands
// =============================================================================

#[test]
fn test_command_create_with_payload_and_params() {
    let mut columns = std::collections::BTreeMap::new();
    columns.insert("name".to_string(), Value::from("TEXT"));
    test_command_round_trip(Command::Create {
        path: "\\people".into(),
        value: Some(Value::Object(columns)),
        params: Parameters::new().with("columns", Value::Array(vec![Value::from("-id")])),
    });
}

#[test]
fn test_command_set_with_filter() {
    test_command_round_trip(Command::Set {
        path: "/people".into(),
        filter: Some("age > 30".into()),
        value: None,
        params: Parameters::new().with("name", Value::Null),
    });
}

#[test]
fn test_command_parameters_names_a_verb() {
    test_command_round_trip(Command::Parameters {
        path: "/people".into(),
        verb: Verb::Create,
    });
}

#[test]
fn test_command_unit_variants() {
    for cmd in [
        Command::TxnBegin,
        Command::TxnCommit,
        Command::TxnRollback,
        Command::TxnIsActive,
    ] {
        test_command_round_trip(cmd);
    }
}

#[test]
fn test_command_optional_fields_default() {
    let cmd: Command = serde_json::from_str(r#"{"GetChildren":{"path":"/people"}}"#).unwrap();
    assert_eq!(
        cmd,
        Command::GetChildren {
            path: "/people".into(),
            filter: None,
            recurse: false,
        }
    );
}

#[test]
fn test_command_rejects_unknown_fields() {
    let result: Result<Command, _> =
        serde_json::from_str(r#"{"Exists":{"path":"/people","recurse":true}}"#);
    assert!(result.is_err());
}

// =============================================================================
// Outputs
// =============================================================================

#[test]
fn test_output_item() {
    test_output_round_trip(Output::Item(NodeValue {
        name: "1".into(),
        path: "\\people\\1".into(),
        kind: NodeKind::Record,
        is_container: false,
        capabilities: vec![],
        item: Record::new().with("id", 1i64).with("name", "Ada"),
    }));
}

#[test]
fn test_output_rows_and_parameters() {
    test_output_round_trip(Output::Rows(vec![Record::new().with("n", 0i64)]));
    test_output_round_trip(Output::Parameters(vec![
        ParamSpec::required("name", ValueKind::String),
        ParamSpec::optional("age", ValueKind::Integer),
    ]));
    test_output_round_trip(Output::Removed(3));
    test_output_round_trip(Output::TxnCommitted);
}
