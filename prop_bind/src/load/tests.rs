//! Tests for file, inline and environment loading.

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;

use super::Format;
use crate::error::LoadError;
use crate::store::PropertyStore;
use crate::value::Value;

fn with_jail<F>(f: F) -> Result<()>
where
    F: FnOnce(&mut figment::Jail) -> Result<()>,
{
    figment::Jail::try_with(|j| {
        f(j).map_err(|err| {
            // figment::Error only converts from strings, so stringify the source.
            figment::Error::from(err.to_string())
        })
    })
    .map_err(|err| anyhow!(err.to_string()))
}

fn scalar(store: &PropertyStore, key: &str) -> Option<String> {
    store.get(key).and_then(Value::as_scalar).map(str::to_owned)
}

#[rstest]
#[case("app.properties", Some(Format::Properties))]
#[case("app.TOML", Some(Format::Toml))]
#[case("app.yml", Some(Format::Yaml))]
#[case("app.yaml", Some(Format::Yaml))]
#[case("app.json", Some(Format::Json))]
#[case("app.json5", Some(Format::Json5))]
#[case("app.ini", None)]
#[case("app", None)]
fn formats_follow_extensions(#[case] path: &str, #[case] expected: Option<Format>) {
    assert_eq!(Format::from_path(Path::new(path)), expected);
}

#[test]
fn json_numbers_and_booleans_become_text() -> Result<()> {
    let mut store = PropertyStore::new();
    store
        .read_str(
            r#"{"Server": {"Port": 8080, "Tls": true, "Proxy": null}, "ratio": 0.5}"#,
            Format::Json,
        )
        .map_err(|err| anyhow!(err))?;
    ensure!(scalar(&store, "server.port").as_deref() == Some("8080"), "port");
    ensure!(scalar(&store, "server.tls").as_deref() == Some("true"), "tls");
    ensure!(scalar(&store, "ratio").as_deref() == Some("0.5"), "ratio");
    ensure!(store.get("server.proxy").is_none(), "nulls are dropped");
    Ok(())
}

#[test]
fn json_arrays_of_tables_become_sequences_of_mappings() -> Result<()> {
    let mut store = PropertyStore::new();
    store
        .read_str(r#"{"items": [{"Name": "a"}, {"name": "b"}]}"#, Format::Json)
        .map_err(|err| anyhow!(err))?;
    let items = store
        .get("items")
        .and_then(Value::as_sequence)
        .ok_or_else(|| anyhow!("items should be a sequence"))?;
    ensure!(items.len() == 2, "expected two items");
    ensure!(
        items.iter().all(|item| item.as_mapping().is_some()),
        "items should be mappings"
    );
    Ok(())
}

#[test]
fn top_level_must_be_a_mapping() {
    let err = PropertyStore::new()
        .read_str("[1, 2]", Format::Json)
        .expect_err("arrays are not property trees");
    assert!(matches!(err, LoadError::Format { format: "json", .. }), "{err}");
}

#[cfg(feature = "toml")]
#[test]
fn toml_tables_are_flattened() -> Result<()> {
    let mut store = PropertyStore::new();
    store
        .read_str("[database]\nHost = \"db\"\nport = 5432\n", Format::Toml)
        .map_err(|err| anyhow!(err))?;
    ensure!(scalar(&store, "database.host").as_deref() == Some("db"), "host");
    ensure!(scalar(&store, "database.port").as_deref() == Some("5432"), "port");
    Ok(())
}

#[cfg(feature = "toml")]
#[test]
fn invalid_toml_is_a_format_error() {
    let err = PropertyStore::new()
        .read_str("key = ", Format::Toml)
        .expect_err("truncated toml");
    assert!(matches!(err, LoadError::Format { format: "toml", .. }), "{err}");
}

#[cfg(feature = "yaml")]
#[test]
fn yaml_keeps_strict_booleans() -> Result<()> {
    let mut store = PropertyStore::new();
    store
        .read_str("feature:\n  enabled: yes\n  strict: true\n", Format::Yaml)
        .map_err(|err| anyhow!(err))?;
    ensure!(scalar(&store, "feature.enabled").as_deref() == Some("yes"), "yes stays text");
    ensure!(scalar(&store, "feature.strict").as_deref() == Some("true"), "strict");
    Ok(())
}

#[cfg(not(feature = "yaml"))]
#[test]
fn yaml_requires_its_feature() {
    let err = PropertyStore::new()
        .read_str("a: 1", Format::Yaml)
        .expect_err("yaml disabled");
    assert!(err.to_string().contains("yaml feature disabled"), "{err}");
}

#[test]
fn missing_file_reports_its_path() -> Result<()> {
    with_jail(|_| {
        let err = PropertyStore::new()
            .load_file(Path::new("absent.properties"))
            .expect_err("file does not exist");
        ensure!(
            matches!(&err, LoadError::File { path, .. } if path == Path::new("absent.properties")),
            "unexpected error {err}"
        );
        Ok(())
    })
}

#[test]
fn unknown_extension_is_rejected() {
    let err = PropertyStore::new()
        .load_file(Path::new("settings.ini"))
        .expect_err("ini is not supported");
    assert!(matches!(err, LoadError::UnsupportedFormat { .. }), "{err}");
}

#[test]
fn environment_variables_are_nested_on_double_underscore() -> Result<()> {
    with_jail(|jail| {
        jail.set_env("PBTEST_DB__HOST", "db.internal");
        jail.set_env("PBTEST_LOG_LEVEL", "debug");
        jail.set_env("OTHER_DB__HOST", "ignored");
        let mut store = PropertyStore::new();
        store.load_env("PBTEST_").map_err(|err| anyhow!(err))?;
        ensure!(scalar(&store, "db.host").as_deref() == Some("db.internal"), "db.host");
        ensure!(scalar(&store, "log_level").as_deref() == Some("debug"), "log_level");
        ensure!(store.len() == 2, "unexpected keys {store:?}");
        Ok(())
    })
}

#[test]
fn application_profile_overrides_base_file() -> Result<()> {
    with_jail(|jail| {
        jail.create_dir("config")?;
        jail.create_file("config/application.properties", "server.port=8080\nserver.host=base\n")?;
        jail.create_file("config/application-dev.properties", "server.host=dev\n")?;
        jail.create_file("config/application-prod.properties", "server.host=prod\n")?;
        let mut store = PropertyStore::new();
        let loaded = store
            .load_application(&[Path::new("config")], Some("dev"))
            .map_err(|err| anyhow!(err))?;
        ensure!(
            loaded
                == [
                    PathBuf::from("config/application.properties"),
                    PathBuf::from("config/application-dev.properties"),
                ],
            "unexpected load order {loaded:?}"
        );
        ensure!(scalar(&store, "server.host").as_deref() == Some("dev"), "profile wins");
        ensure!(scalar(&store, "server.port").as_deref() == Some("8080"), "base kept");
        Ok(())
    })
}

#[test]
fn application_without_files_loads_nothing() -> Result<()> {
    with_jail(|_| {
        let mut store = PropertyStore::new();
        let loaded = store
            .load_application(&[Path::new("missing")], None)
            .map_err(|err| anyhow!(err))?;
        ensure!(loaded.is_empty() && store.is_empty(), "nothing to load");
        Ok(())
    })
}
