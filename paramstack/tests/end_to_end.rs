//! Whole-pipeline resolution over mixed parameter types.

use anyhow::{Result, anyhow, ensure};
use paramstack::{ArgvSource, EnvSource, FileSource, ParamError, ParamValue, resolve};
use rstest::{fixture, rstest};
use serde::Deserialize;
use serde_json::{Value, json};

use test_utils::{expect_resolved, with_jail};

#[fixture]
fn schema() -> Value {
    json!({"params": {
        "foo": {"type": "boolean", "default": false, "description": "Foo switch"},
        "bar": {"type": "string", "multi": true, "default": [], "description": "Bar values"},
        "baz": {"type": "integer", "default": 21, "description": "Baz level", "env": "BAZ", "short": "r"}
    }})
}

#[rstest]
fn flags_environment_and_defaults_combine(schema: Value) -> Result<()> {
    let params = expect_resolved(resolve(
        &schema,
        ArgvSource::from_tokens(["--foo"]),
        EnvSource::from_pairs([("BAZ", "59")]),
        FileSource::None,
    ))?;
    ensure!(
        params.to_json() == json!({"foo": true, "bar": [], "baz": 59}),
        "unexpected resolution {}",
        params.to_json()
    );
    Ok(())
}

#[rstest]
fn multi_environment_values_expand_in_slot_order(schema: Value) -> Result<()> {
    let params = expect_resolved(resolve(
        &schema,
        ArgvSource::from_tokens(Vec::<String>::new()),
        EnvSource::from_pairs([("BAR_9", "z"), ("BAR", "x"), ("BAR_2", "y")]),
        FileSource::None,
    ))?;
    ensure!(
        params.get("bar") == Some(&ParamValue::from(vec!["x", "y", "z"])),
        "unexpected bar {:?}",
        params.get("bar")
    );
    Ok(())
}

#[rstest]
fn repeated_single_valued_flags_fail(schema: Value) -> Result<()> {
    let schema_with_string = {
        let mut extended = schema;
        if let Some(params) = extended.get_mut("params").and_then(Value::as_object_mut) {
            params.insert(
                String::from("name"),
                json!({"type": "string", "default": null, "description": "Name"}),
            );
        }
        extended
    };
    let Err(err) = resolve(
        &schema_with_string,
        ArgvSource::from_tokens(["--name=a", "--name=b"]),
        EnvSource::from_pairs(Vec::<(String, String)>::new()),
        FileSource::None,
    ) else {
        return Err(anyhow!("duplicate flag accepted"));
    };
    ensure!(
        matches!(&*err, ParamError::DuplicateFlag { param } if param == "name"),
        "unexpected error {err:?}"
    );
    Ok(())
}

#[derive(Debug, Deserialize)]
struct Settings {
    foo: bool,
    bar: Vec<String>,
    baz: i64,
}

#[rstest]
fn toml_files_feed_fixed_records(schema: Value) -> Result<()> {
    with_jail(|jail| {
        jail.create_file("settings.toml", "bar = [\"one\", \"two\"]\nbaz = 7\n")?;
        jail.set_env("FOO", "yes");
        let params = expect_resolved(resolve(
            &schema,
            ArgvSource::from_tokens(["-r", "8"]),
            EnvSource::Process,
            FileSource::Path("settings.toml".into()),
        ))?;
        let settings: Settings = params
            .to_record()
            .map_err(|err| anyhow!(err.to_string()))?;
        ensure!(settings.foo, "FOO=yes should enable foo");
        ensure!(settings.bar == ["one", "two"], "bar from file: {:?}", settings.bar);
        ensure!(settings.baz == 8, "short flag wins: {}", settings.baz);
        Ok(())
    })
}

#[rstest]
fn help_requests_are_not_errors(schema: Value) -> Result<()> {
    let outcome = resolve(
        &schema,
        ArgvSource::from_tokens(["--help"]),
        EnvSource::Disabled,
        FileSource::None,
    )
    .map_err(|err| anyhow!(err.to_string()))?;
    let text = outcome
        .help_text()
        .ok_or_else(|| anyhow!("expected help text"))?;
    for expected in ["--foo", "--no-foo", "--bar <BAR>", "-r, --baz <BAZ>", "Baz level"] {
        ensure!(text.contains(expected), "help lacks {expected}:\n{text}");
    }
    Ok(())
}
