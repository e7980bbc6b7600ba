//! Integration tests for record schemas

use anyhow::Result;
use serde_json::json;
use zon_schema::prelude::*;
use zon_schema::{IssueKind, UnknownKeys, Value, ZonRecord};

fn input(json: serde_json::Value) -> Value {
    Value::from(json)
}

fn person() -> ZonRecord {
    record([
        ("name", string().min(1).into()),
        ("email", string().email().into()),
        ("age", number().int().non_negative().optional().into()),
    ])
}

#[test]
fn test_valid_record_round_trips() -> Result<()> {
    let value = input(json!({ "name": "Ada", "email": "ada@example.com", "age": 36 }));
    let output = person().validate(&value)?;
    assert_eq!(output, value);
    Ok(())
}

#[test]
fn test_strip_is_the_default() -> Result<()> {
    assert_eq!(person().unknown_keys(), UnknownKeys::Strip);

    let value = input(json!({ "name": "Ada", "email": "ada@example.com", "b": 1 }));
    let output = person().validate(&value)?;
    assert_eq!(
        output,
        input(json!({ "name": "Ada", "email": "ada@example.com" }))
    );
    Ok(())
}

#[test]
fn test_strict_rejects_unknown_keys() {
    let value = input(json!({ "name": "Ada", "email": "ada@example.com", "b": 1, "c": 2 }));
    let err = person().strict().validate(&value).unwrap_err();

    assert_eq!(err.len(), 1);
    let issue = &err.issues()[0];
    assert_eq!(issue.kind, IssueKind::UnrecognizedKeys);
    assert!(issue.message.contains("'b'"));
    assert!(issue.message.contains("'c'"));
    assert!(issue.path.is_empty());
}

#[test]
fn test_strict_still_reports_field_issues() {
    let value = input(json!({ "name": "", "email": "ada@example.com", "b": 1 }));
    let err = person().strict().validate(&value).unwrap_err();

    let kinds: Vec<IssueKind> = err.issues().iter().map(|i| i.kind).collect();
    assert_eq!(
        kinds,
        vec![IssueKind::TooSmall, IssueKind::UnrecognizedKeys]
    );
}

#[test]
fn test_passthrough_keeps_unknown_keys() -> Result<()> {
    let value = input(json!({ "name": "Ada", "email": "ada@example.com", "extra": [1, 2] }));
    assert_eq!(person().passthrough().validate(&value)?, value);
    Ok(())
}

#[test]
fn test_catchall_validates_unknown_keys() {
    let schema = person().catchall(number());

    let ok = input(json!({ "name": "Ada", "email": "ada@example.com", "score": 3 }));
    assert!(schema.validate(&ok).is_ok());

    let bad = input(json!({ "name": "Ada", "email": "ada@example.com", "score": "x" }));
    let err = schema.validate(&bad).unwrap_err();
    assert_eq!(err.issues()[0].path_string(), "score");
}

#[test]
fn test_every_field_is_reported() {
    let err = person()
        .validate(&input(json!({ "name": "", "email": "nope", "age": -1 })))
        .unwrap_err();

    let paths: Vec<String> = err.issues().iter().map(|i| i.path_string()).collect();
    assert_eq!(paths, vec!["name", "email", "age"]);
}

#[test]
fn test_fail_fast_stops_at_first_field() {
    let err = person()
        .fail_fast()
        .validate(&input(json!({ "name": "", "email": "nope", "age": -1 })))
        .unwrap_err();

    assert_eq!(err.len(), 1);
    assert_eq!(err.issues()[0].path_string(), "name");
}

#[test]
fn test_shape_helpers_compose() -> Result<()> {
    let account = person()
        .omit(&["age"])
        .extend([("id", number().int().into())])
        .partial_keys(&["email"]);

    let keys: Vec<&String> = account.shape().keys().collect();
    assert_eq!(keys, vec!["name", "email", "id"]);

    let output = account.validate(&input(json!({ "name": "Ada", "id": 7 })))?;
    assert_eq!(output, input(json!({ "name": "Ada", "id": 7 })));
    Ok(())
}

#[test]
fn test_keyof_lists_fields() {
    let keys = person().keyof();
    assert!(keys.validate(&Value::from("email")).is_ok());
    assert!(keys.validate(&Value::from("b")).is_err());
}

#[test]
fn test_refinement_across_fields() {
    let range = record([("low", number().into()), ("high", number().into())]).refine_with_message(
        |value| {
            let low = value.pointer(&["low".into()]).and_then(Value::as_f64);
            let high = value.pointer(&["high".into()]).and_then(Value::as_f64);
            matches!((low, high), (Some(l), Some(h)) if l <= h)
        },
        "low must not exceed high",
    );

    assert!(range.validate(&input(json!({ "low": 1, "high": 2 }))).is_ok());

    let err = range.validate(&input(json!({ "low": 3, "high": 2 }))).unwrap_err();
    assert_eq!(err.len(), 1);
    assert_eq!(err.issues()[0].kind, IssueKind::Custom);
    assert_eq!(err.issues()[0].message, "low must not exceed high");
}
