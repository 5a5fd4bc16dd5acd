//! Format-specific parsing into property trees.

use std::collections::BTreeMap;

use figment::Figment;
#[cfg(any(feature = "toml", feature = "json5"))]
use figment::providers::Format as _;
#[cfg(feature = "toml")]
use figment::providers::Toml;
#[cfg(feature = "json5")]
use figment_json5::Json5;
use serde_json::Value as JsonValue;

use super::{Format, mapping_from_json, properties};
use crate::error::{LoadError, LoadResult};
use crate::value::Value;

/// Parses `data` written in `format` into a nested property mapping.
///
/// TOML and JSON5 are validated with their own parsers first so syntax errors
/// carry the parser's message, then read through figment like every other
/// provider-backed source.
pub(super) fn parse(data: &str, format: Format) -> LoadResult<BTreeMap<String, Value>> {
    let json = match format {
        Format::Properties => return properties::parse(data),
        Format::Toml => parse_toml(data)?,
        Format::Yaml => parse_yaml(data)?,
        Format::Json => serde_json::from_str::<JsonValue>(data)
            .map_err(|err| LoadError::format(format.name(), err.to_string()))?,
        Format::Json5 => parse_json5(data)?,
    };
    mapping_from_json(format, json)
}

#[cfg(feature = "toml")]
fn parse_toml(data: &str) -> LoadResult<JsonValue> {
    toml::from_str::<toml::Value>(data)
        .map_err(|err| LoadError::format(Format::Toml.name(), err.to_string()))?;
    extract(Figment::from(Toml::string(data)))
}

#[cfg(not(feature = "toml"))]
fn parse_toml(_data: &str) -> LoadResult<JsonValue> {
    Err(disabled(Format::Toml))
}

#[cfg(feature = "json5")]
fn parse_json5(data: &str) -> LoadResult<JsonValue> {
    json5::from_str::<JsonValue>(data)
        .map_err(|err| LoadError::format(Format::Json5.name(), err.to_string()))?;
    extract(Figment::from(Json5::string(data)))
}

#[cfg(not(feature = "json5"))]
fn parse_json5(_data: &str) -> LoadResult<JsonValue> {
    Err(disabled(Format::Json5))
}

/// YAML is parsed with strict YAML 1.2 booleans, so `yes` stays a string.
#[cfg(feature = "yaml")]
fn parse_yaml(data: &str) -> LoadResult<JsonValue> {
    serde_saphyr::from_str_with_options(
        data,
        serde_saphyr::Options {
            strict_booleans: true,
            ..serde_saphyr::Options::default()
        },
    )
    .map_err(|err| LoadError::format(Format::Yaml.name(), err.to_string()))
}

#[cfg(not(feature = "yaml"))]
fn parse_yaml(_data: &str) -> LoadResult<JsonValue> {
    Err(disabled(Format::Yaml))
}

/// Extracts the merged figment data as a JSON tree.
pub(super) fn extract(figment: Figment) -> LoadResult<JsonValue> {
    figment.extract::<JsonValue>().map_err(LoadError::gathering)
}

#[cfg(any(not(feature = "toml"), not(feature = "yaml"), not(feature = "json5")))]
fn disabled(format: Format) -> LoadError {
    let name = format.name();
    LoadError::format(
        name,
        format!("{name} feature disabled: enable the '{name}' feature to support this format"),
    )
}
