//! Document loading by extension, and the edge cases of empty and missing
//! files.

use anyhow::{Result, ensure};
use rstest::rstest;
use serde_json::json;
use std::path::{Path, PathBuf};

use super::{to_anyhow, with_jail};
use crate::ParamError;
use crate::file::{FileSource, load_document};

#[rstest]
fn toml_files_become_documents() -> Result<()> {
    with_jail(|jail| {
        jail.create_file(
            "config.toml",
            "name = \"demo\"\ncount = 3\nratio = 0.5\ntags = [\"a\", \"b\"]\n",
        )?;
        let document = to_anyhow(load_document(Path::new("config.toml")))?;
        ensure!(
            document == json!({"name": "demo", "count": 3, "ratio": 0.5, "tags": ["a", "b"]}),
            "unexpected document {document}"
        );
        Ok(())
    })
}

#[rstest]
#[case("config.toml")]
#[case("config.yaml")]
#[case("config.json")]
fn blank_files_are_null_documents(#[case] name: &str) -> Result<()> {
    with_jail(|jail| {
        jail.create_file(name, "  \n\t\n")?;
        let document = to_anyhow(load_document(Path::new(name)))?;
        ensure!(document.is_null(), "expected null, got {document}");
        Ok(())
    })
}

#[rstest]
fn missing_explicit_paths_are_errors() -> Result<()> {
    with_jail(|_| {
        let Err(err) = FileSource::Path(PathBuf::from("absent.toml")).load() else {
            anyhow::bail!("expected missing file to fail");
        };
        let ParamError::File { path, source } = &*err else {
            anyhow::bail!("expected a file error, got {err:?}");
        };
        ensure!(path == Path::new("absent.toml"), "wrong path {path:?}");
        let io = source.downcast_ref::<std::io::Error>();
        ensure!(
            io.is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound),
            "expected NotFound, got {source}"
        );
        Ok(())
    })
}

#[rstest]
fn malformed_files_name_their_path() -> Result<()> {
    with_jail(|jail| {
        jail.create_file("broken.toml", "count = [")?;
        let err = load_document(Path::new("broken.toml")).expect_err("invalid TOML");
        ensure!(
            err.to_string().starts_with("configuration file error in 'broken.toml'"),
            "unexpected message {err}"
        );
        Ok(())
    })
}

#[rstest]
fn none_and_documents_need_no_io() -> Result<()> {
    ensure!(to_anyhow(FileSource::None.load())?.is_null(), "None is null");
    let document = json!({"a": 1});
    ensure!(
        to_anyhow(FileSource::from(document.clone()).load())? == document,
        "documents pass through"
    );
    Ok(())
}

#[cfg(feature = "yaml")]
#[rstest]
fn yaml_yes_remains_a_string() -> Result<()> {
    with_jail(|jail| {
        jail.create_file("config.yaml", "recipient: yes\nflag: true\n")?;
        let document = to_anyhow(load_document(Path::new("config.yaml")))?;
        ensure!(
            document == json!({"recipient": "yes", "flag": true}),
            "unexpected document {document}"
        );
        Ok(())
    })
}

#[cfg(feature = "yaml")]
#[rstest]
fn yaml_sequences_load_as_documents() -> Result<()> {
    with_jail(|jail| {
        jail.create_file("list.yml", "- a\n- b\n")?;
        let document = to_anyhow(load_document(Path::new("list.yml")))?;
        ensure!(document == json!(["a", "b"]), "unexpected document {document}");
        Ok(())
    })
}

#[cfg(feature = "json5")]
#[rstest]
fn json5_files_allow_comments() -> Result<()> {
    with_jail(|jail| {
        jail.create_file("config.json5", "{ // comment\n count: 3, }")?;
        let document = to_anyhow(load_document(Path::new("config.json5")))?;
        ensure!(document == json!({"count": 3}), "unexpected document {document}");
        Ok(())
    })
}

#[cfg(not(feature = "yaml"))]
#[rstest]
fn disabled_formats_name_the_feature() -> Result<()> {
    with_jail(|jail| {
        jail.create_file("config.yaml", "a: 1")?;
        let err = load_document(Path::new("config.yaml")).expect_err("yaml disabled");
        ensure!(
            err.to_string().contains("enable the 'yaml' feature"),
            "unexpected message {err}"
        );
        Ok(())
    })
}
