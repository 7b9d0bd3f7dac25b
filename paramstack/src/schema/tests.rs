use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::{ParamSpec, ParamSpecSet};
use crate::error::{ParamError, SchemaField};
use crate::value::{Channel, ParamType, ParamValue};

#[fixture]
fn base() -> Value {
    json!({"type": "string", "default": null, "description": "A parameter"})
}

fn with(mut definition: Value, overrides: Value) -> Value {
    if let (Some(target), Some(extra)) = (definition.as_object_mut(), overrides.as_object()) {
        for (key, value) in extra {
            target.insert(key.clone(), value.clone());
        }
    }
    definition
}

fn without(mut definition: Value, key: &str) -> Value {
    if let Some(target) = definition.as_object_mut() {
        target.remove(key);
    }
    definition
}

fn messages(err: &ParamError) -> Vec<String> {
    match err {
        ParamError::Aggregate(inner) => inner.iter().map(ToString::to_string).collect(),
        other => vec![other.to_string()],
    }
}

fn rejection(name: &str, definition: &Value) -> ParamError {
    match ParamSpec::from_value(name, definition) {
        Ok(spec) => panic!("expected {name} to be rejected, got {spec:?}"),
        Err(err) => std::sync::Arc::try_unwrap(err).unwrap_or_else(|_| panic!("shared error")),
    }
}

#[rstest]
fn identifiers_derive_from_the_name(base: Value) {
    let spec = ParamSpec::from_value("Foo_Bar", &base).expect("valid");
    assert_eq!(spec.long(), "foo-bar");
    assert_eq!(spec.short(), 'F');
    assert_eq!(spec.env(), "FOO_BAR");
    assert_eq!(spec.description(), "A parameter");
    assert!(!spec.is_multi());
    assert!(spec.default().is_null());
    for channel in Channel::ALL {
        assert!(spec.accepts(channel), "{channel} enabled by default");
    }
}

#[rstest]
fn explicit_identifiers_win(base: Value) {
    let definition = with(base, json!({"long": "Port-Number", "short": "P", "env": "APP_PORT"}));
    let spec = ParamSpec::from_value("port", &definition).expect("valid");
    assert_eq!(spec.long(), "Port-Number");
    assert_eq!(spec.short(), 'P');
    assert_eq!(spec.env(), "APP_PORT");
}

#[rstest]
#[case("", "Name must not be empty")]
#[case("foo-bar", "Name may contain only alphanumerics and underscores")]
#[case("foo bar", "Name may contain only alphanumerics and underscores")]
fn invalid_names_are_rejected(base: Value, #[case] name: &str, #[case] message: &str) {
    let err = rejection(name, &base);
    assert_eq!(err.schema_field(), Some(SchemaField::Name));
    assert_eq!(messages(&err), vec![format!("Param '{name}': {message}")]);
}

#[rstest]
fn overlong_names_are_rejected(base: Value) {
    let name = "n".repeat(65);
    let err = rejection(&name, &base);
    assert!(messages(&err).contains(&format!(
        "Param '{name}': Name contains more than 64 characters"
    )));
    let longest = "n".repeat(64);
    let long_flag = "l".repeat(64);
    let definition = with(base, json!({"long": long_flag}));
    assert!(ParamSpec::from_value(&longest, &definition).is_ok());
}

#[rstest]
#[case(json!({}), "Description must be supplied")]
#[case(json!({"description": 5}), "Description must be supplied as a string")]
#[case(json!({"description": "  \t"}), "Description must not be blank")]
#[case(json!({"description": "one\ntwo"}), "Description may not include newlines")]
#[case(json!({"type": 3}), "Type must be supplied as a string")]
#[case(
    json!({"type": "decimal"}),
    "Type 'decimal' not recognized - expected one of: boolean, float, integer, string"
)]
#[case(json!({"multi": "yes"}), "Multi must be a boolean")]
#[case(json!({"enabled": "env"}), "Enabled must be an array")]
#[case(json!({"enabled": []}), "Enabled must not be empty")]
#[case(
    json!({"enabled": ["file", "stdin", 3, "argv"]}),
    "Enabled includes unrecognized values: 3, argv, stdin"
)]
#[case(json!({"long": 7}), "Long flag is not a string")]
#[case(json!({"long": "has space"}), "Long flag includes whitespace")]
#[case(json!({"long": "-dash"}), "Long flag must not begin with '-'")]
#[case(json!({"long": "a=b"}), "Long flag must not contain '='")]
#[case(json!({"long": ""}), "Long flag must not be empty")]
#[case(json!({"short": "ab"}), "Short flag must be a single letter or digit")]
#[case(json!({"short": "-"}), "Short flag must be a single letter or digit")]
#[case(json!({"short": true}), "Short flag is not a string")]
#[case(json!({"env": "MY-VAR"}), "ENV name may only contain alphanumerics and underscores")]
#[case(json!({"env": "1VAR"}), "ENV name must begin with a letter")]
#[case(json!({"env": "_VAR"}), "ENV name must begin with a letter")]
#[case(json!({"env": ["A"]}), "ENV name is not a string")]
fn single_violations_name_the_attribute(
    base: Value,
    #[case] overrides: Value,
    #[case] message: &str,
) {
    let definition = if overrides == json!({}) {
        without(base, "description")
    } else {
        with(base, overrides)
    };
    let err = rejection("param", &definition);
    assert_eq!(messages(&err), vec![format!("Param 'param': {message}")]);
}

#[rstest]
fn missing_type_is_reported(base: Value) {
    let err = rejection("param", &without(base, "type"));
    assert_eq!(err.schema_field(), Some(SchemaField::Type));
    assert_eq!(err.to_string(), "Param 'param': Type was not supplied");
}

#[rstest]
fn overlong_identifiers_are_rejected(base: Value) {
    let definition = with(base, json!({"long": "l".repeat(65), "env": "E".repeat(65)}));
    let err = rejection("param", &definition);
    assert_eq!(
        messages(&err),
        vec![
            String::from("Param 'param': Long flag is over 64 characters"),
            String::from("Param 'param': ENV name is over 64 characters"),
        ]
    );
}

#[rstest]
#[case(json!({"type": "integer", "default": 3}), ParamValue::Integer(3))]
#[case(json!({"type": "float", "default": 3}), ParamValue::Float(3.0))]
#[case(json!({"type": "float", "default": 0.5}), ParamValue::Float(0.5))]
#[case(json!({"type": "boolean", "default": false}), ParamValue::Bool(false))]
#[case(json!({"type": "boolean", "default": null}), ParamValue::Null)]
#[case(json!({"type": "string", "multi": true, "default": []}), ParamValue::List(vec![]))]
#[case(
    json!({"type": "float", "multi": true, "default": [1, 2.5]}),
    ParamValue::from(vec![1.0, 2.5])
)]
#[case(json!({"type": "integer", "multi": true, "default": null}), ParamValue::Null)]
fn defaults_match_the_declared_type(
    base: Value,
    #[case] overrides: Value,
    #[case] expected: ParamValue,
) {
    let spec = ParamSpec::from_value("param", &with(base, overrides)).expect("valid");
    assert_eq!(spec.default(), &expected);
}

#[rstest]
#[case(json!({"type": "integer", "default": "3"}), "Default is not an integer")]
#[case(json!({"type": "integer", "default": 2.5}), "Default is not an integer")]
#[case(json!({"type": "boolean", "default": "no"}), "Default is not a boolean")]
#[case(json!({"type": "string", "default": ["a"]}), "Default is not a string")]
#[case(
    json!({"type": "string", "multi": true, "default": "a"}),
    "Multi-valued, but default is not an array"
)]
#[case(
    json!({"type": "integer", "multi": true, "default": [1, "2"]}),
    "Default includes non-integer values"
)]
fn mistyped_defaults_are_rejected(base: Value, #[case] overrides: Value, #[case] message: &str) {
    let err = rejection("param", &with(base, overrides));
    assert_eq!(err.schema_field(), Some(SchemaField::Default));
    assert_eq!(err.to_string(), format!("Param 'param': {message}"));
}

#[rstest]
fn omitted_default_differs_from_null(base: Value) {
    let err = rejection("param", &without(base, "default"));
    assert_eq!(err.to_string(), "Param 'param': Default not supplied");
}

#[rstest]
fn every_independent_violation_is_reported(base: Value) {
    let definition = with(
        base,
        json!({"type": "decimal", "description": "", "short": "xy", "enabled": ["tty"]}),
    );
    let err = rejection("param", &definition);
    assert!(matches!(err, ParamError::Aggregate(_)));
    assert_eq!(
        messages(&err),
        vec![
            String::from("Param 'param': Description must not be blank"),
            String::from(
                "Param 'param': Type 'decimal' not recognized - expected one of: boolean, float, integer, string"
            ),
            String::from("Param 'param': Enabled includes unrecognized values: tty"),
            String::from("Param 'param': Short flag must be a single letter or digit"),
        ]
    );
}

#[rstest]
fn derived_identifiers_are_validated(base: Value) {
    let err = rejection("9lives", &base);
    assert_eq!(err.schema_field(), Some(SchemaField::Env));
    assert_eq!(
        err.to_string(),
        "Param '9lives': ENV name must begin with a letter (derived from the name; supply it explicitly)"
    );

    let fixed = with(base, json!({"env": "NINE_LIVES"}));
    let spec = ParamSpec::from_value("9lives", &fixed).expect("valid");
    assert_eq!(spec.short(), '9');
}

#[rstest]
fn derived_identifiers_are_skipped_for_bad_names(base: Value) {
    let err = rejection("-", &base);
    assert_eq!(messages(&err).len(), 1);
}

#[test]
fn definitions_must_be_mappings() {
    let err = rejection("param", &json!("string"));
    assert_eq!(err.schema_field(), Some(SchemaField::Params));
}

fn schema(params: Value) -> Value {
    json!({"params": params})
}

fn set_rejection(schema: &Value) -> ParamError {
    match ParamSpecSet::from_value(schema) {
        Ok(set) => panic!("expected rejection, got {set:?}"),
        Err(err) => std::sync::Arc::try_unwrap(err).unwrap_or_else(|_| panic!("shared error")),
    }
}

#[test]
fn sets_keep_banner_and_name_order() {
    let set = ParamSpecSet::from_value(&json!({
        "banner": "Usage: demo",
        "params": {
            "zeta": {"type": "string", "default": null, "description": "Last"},
            "alpha": {"type": "integer", "default": 1, "description": "First"}
        }
    }))
    .expect("valid schema");
    assert_eq!(set.banner(), Some("Usage: demo"));
    let names: Vec<&str> = set.iter().map(ParamSpec::name).collect();
    assert_eq!(names, vec!["alpha", "zeta"]);
    assert_eq!(set.get("alpha").map(ParamSpec::param_type), Some(ParamType::Integer));
    assert!(set.get("missing").is_none());
    assert_eq!(set.len(), 2);
    assert!(!set.is_empty());
}

#[rstest]
#[case(json!([]), SchemaField::Params, "Schema must be a mapping")]
#[case(json!({}), SchemaField::Params, "Schema must supply params as a mapping")]
#[case(json!({"params": []}), SchemaField::Params, "Schema must supply params as a mapping")]
#[case(json!({"banner": 1, "params": {}}), SchemaField::Banner, "Banner must be a string")]
fn malformed_schemas_are_rejected(
    #[case] value: Value,
    #[case] field: SchemaField,
    #[case] message: &str,
) {
    let err = set_rejection(&value);
    assert_eq!(err.schema_field(), Some(field));
    assert_eq!(err.to_string(), message);
}

#[test]
fn empty_params_are_allowed() {
    let set = ParamSpecSet::from_value(&schema(json!({}))).expect("valid schema");
    assert!(set.is_empty());
    assert_eq!(set.banner(), None);
}

#[test]
fn shared_short_flags_are_listed_once() {
    let err = set_rejection(&schema(json!({
        "xa": {"type": "string", "default": null, "description": "a"},
        "xb": {"type": "string", "default": null, "description": "b"},
        "xc": {"type": "string", "default": null, "description": "c"},
        "ya": {"type": "string", "default": null, "description": "d", "short": "x"}
    })));
    assert_eq!(err.schema_field(), Some(SchemaField::Short));
    assert_eq!(err.to_string(), "Duplicate short-flags: x");
}

#[test]
fn every_duplicate_kind_is_reported_sorted() {
    let err = set_rejection(&schema(json!({
        "foo": {"type": "string", "default": null, "description": "a", "env": "SAME", "long": "l2", "short": "b"},
        "bar": {"type": "string", "default": null, "description": "b", "env": "SAME", "long": "l2"},
        "baz": {"type": "string", "default": null, "description": "c", "short": "q", "long": "l1"},
        "qux": {"type": "string", "default": null, "description": "d", "long": "l1"}
    })));
    assert_eq!(
        messages(&err),
        vec![
            String::from("Duplicate long-flags: l1, l2"),
            String::from("Duplicate short-flags: b, q"),
            String::from("Duplicate env-names: SAME"),
        ]
    );
}

#[test]
fn parameter_errors_from_several_entries_are_flattened() {
    let err = set_rejection(&schema(json!({
        "a": {"type": "string", "description": "a"},
        "b": {"type": "nope", "default": null, "description": "b"}
    })));
    assert_eq!(
        messages(&err),
        vec![
            String::from("Param 'a': Default not supplied"),
            String::from(
                "Param 'b': Type 'nope' not recognized - expected one of: boolean, float, integer, string"
            ),
        ]
    );
}

#[test]
fn long_flags_must_not_shadow_negated_booleans() {
    let err = set_rejection(&schema(json!({
        "color": {"type": "boolean", "default": false, "description": "a"},
        "plain": {"type": "boolean", "default": false, "description": "b", "long": "no-color"}
    })));
    assert_eq!(
        err.to_string(),
        "Long flags collide with negated boolean flags: no-color"
    );

    let allowed = ParamSpecSet::from_value(&schema(json!({
        "color": {"type": "boolean", "default": false, "description": "a", "enabled": ["env"]},
        "plain": {"type": "boolean", "default": false, "description": "b", "long": "no-color"}
    })));
    assert!(allowed.is_ok());
}

#[test]
fn duplicate_checks_ignore_enabled_channels() {
    let err = set_rejection(&schema(json!({
        "foo": {"type": "string", "default": null, "description": "a", "enabled": ["env"]},
        "fig": {"type": "string", "default": null, "description": "b", "enabled": ["file"]}
    })));
    assert_eq!(err.to_string(), "Duplicate short-flags: f");
}
