//! Channel precedence: command line over environment over file over
//! defaults.

use anyhow::{Result, anyhow, ensure};
use paramstack::{
    ArgvSource, EnvSource, FileSource, ParamSpecSet, ParamValue, Provenance, Resolver, resolve,
};
use rstest::rstest;
use serde_json::{Value, json};

use test_utils::expect_resolved;

fn schema() -> Value {
    json!({"params": {
        "a": {"type": "integer", "default": 1, "description": "Layered value"}
    }})
}

struct Layers {
    file: bool,
    env: bool,
    argv: bool,
}

#[rstest]
#[case(Layers { file: true, env: true, argv: true }, 4, Provenance::Cli)]
#[case(Layers { file: true, env: true, argv: false }, 3, Provenance::Environment)]
#[case(Layers { file: true, env: false, argv: false }, 2, Provenance::File)]
#[case(Layers { file: false, env: false, argv: false }, 1, Provenance::Defaults)]
#[case(Layers { file: false, env: true, argv: false }, 3, Provenance::Environment)]
#[case(Layers { file: true, env: false, argv: true }, 4, Provenance::Cli)]
fn higher_channels_override_lower_ones(
    #[case] layers: Layers,
    #[case] expected: i64,
    #[case] winner: Provenance,
) -> Result<()> {
    let argv = if layers.argv {
        ArgvSource::from_tokens(["--a", "4"])
    } else {
        ArgvSource::from_tokens(Vec::<String>::new())
    };
    let env = if layers.env {
        EnvSource::from_pairs([("A", "3")])
    } else {
        EnvSource::from_pairs(Vec::<(String, String)>::new())
    };
    let file = if layers.file {
        FileSource::Document(json!({"a": 2}))
    } else {
        FileSource::None
    };
    let params = expect_resolved(resolve(&schema(), argv, env, file))?;
    ensure!(
        params.get("a") == Some(&ParamValue::Integer(expected)),
        "expected {expected}, got {:?}",
        params.get("a")
    );
    ensure!(
        params.provenance("a") == Some(winner),
        "expected {winner}, got {:?}",
        params.provenance("a")
    );
    Ok(())
}

#[rstest]
fn disabled_channels_are_skipped_per_parameter() -> Result<()> {
    let schema = json!({"params": {
        "token": {
            "type": "string",
            "default": "none",
            "description": "Only from the file",
            "enabled": ["file"]
        }
    }});
    let params = expect_resolved(resolve(
        &schema,
        ArgvSource::from_tokens(Vec::<String>::new()),
        EnvSource::from_pairs([("TOKEN", "from-env")]),
        FileSource::Document(json!({"token": "from-file"})),
    ))?;
    ensure!(
        params.get("token") == Some(&ParamValue::from("from-file")),
        "environment must not supply a file-only parameter"
    );
    Ok(())
}

#[rstest]
fn files_on_disk_sit_between_defaults_and_environment() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("layers.toml");
    std::fs::write(&path, "a = 2\nlabel = \"from file\"\n")?;
    let schema = json!({"params": {
        "a": {"type": "integer", "default": 1, "description": "Layered value"},
        "label": {"type": "string", "default": null, "description": "Label", "short": "l"}
    }});
    let specs = ParamSpecSet::from_value(&schema)
        .map_err(|err| anyhow!(err.to_string()))?;
    let params = expect_resolved(
        Resolver::new(&specs)
            .argv(ArgvSource::Disabled)
            .env(EnvSource::from_pairs([("A", "3")]))
            .file(path.as_path())
            .resolve(),
    )?;
    ensure!(params.get("a") == Some(&ParamValue::Integer(3)), "env beats file");
    ensure!(
        params.get("label") == Some(&ParamValue::from("from file")),
        "file beats the null default"
    );
    ensure!(params.provenance("label") == Some(Provenance::File), "label provenance");
    Ok(())
}
