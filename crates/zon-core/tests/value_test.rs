//! Integration tests for the value model and issue paths

use anyhow::Result;
use serde_json::json;
use zon_core::{
    IssueKind, PathSegment, ValidationConfig, ValidationContext, Value, format_path, parse_path,
};

#[test]
fn test_json_conversion_keeps_structure() -> Result<()> {
    let json = json!({
        "name": "Ada",
        "age": 36,
        "ratio": 0.5,
        "tags": ["a", null, true]
    });

    let value = Value::from(json.clone());
    assert_eq!(
        value.pointer(&parse_path("tags[2]")?),
        Some(&Value::from(true))
    );
    assert_eq!(
        value.pointer(&parse_path("age")?).map(Value::type_name),
        Some("integer")
    );
    assert_eq!(value.to_json()?, json);
    Ok(())
}

#[test]
fn test_non_finite_float_is_not_representable() {
    let value: Value = [("x", Value::from(f64::NAN))].into_iter().collect();
    assert!(value.to_json().is_err());
}

#[test]
fn test_issue_paths_resolve_in_the_input() -> Result<()> {
    let value = Value::from(json!({ "users": [{ "email": "x" }, { "email": "bad" }] }));
    let mut ctx = ValidationContext::new(ValidationConfig::default());

    ctx.descend("users", |ctx| {
        ctx.descend(1usize, |ctx| {
            ctx.descend("email", |ctx| {
                ctx.add_issue(IssueKind::InvalidFormat, "Invalid email");
                Some(())
            })
        })
    });

    let err = ctx.finish(None).unwrap_err();
    let issue = &err.issues()[0];
    assert_eq!(issue.path_string(), "users[1].email");
    assert_eq!(parse_path(&issue.path_string())?, issue.path);
    assert_eq!(value.pointer(&issue.path), Some(&Value::from("bad")));
    Ok(())
}

#[test]
fn test_format_path_root_is_empty() {
    assert_eq!(format_path(&[]), "");
    assert_eq!(format_path(&[PathSegment::from(0usize)]), "[0]");
}
