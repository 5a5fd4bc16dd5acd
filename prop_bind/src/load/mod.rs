//! Loading property stores from files, inline text and the environment.
//!
//! Every source is parsed into a nested tree, converted into [`Value`]s and
//! flattened into the store, so later sources overwrite keys set by earlier
//! ones.

mod env;
mod parser;
mod properties;
#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::{LoadError, LoadResult};
use crate::store::PropertyStore;
use crate::value::Value;

/// File extensions tried by [`PropertyStore::load_application`], in order.
const APPLICATION_EXTENSIONS: [&str; 6] = ["properties", "toml", "yaml", "yml", "json", "json5"];

/// Source syntax of a property file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Java-style `key=value` lines.
    Properties,
    /// TOML tables.
    Toml,
    /// YAML 1.2 documents; requires the `yaml` feature.
    Yaml,
    /// Plain JSON.
    Json,
    /// JSON5; requires the `json5` feature.
    Json5,
}

impl Format {
    /// Selects a format from the extension of `path`, ignoring case.
    ///
    /// # Examples
    ///
    /// ```
    /// use prop_bind::Format;
    /// use std::path::Path;
    /// assert_eq!(Format::from_path(Path::new("app.YML")), Some(Format::Yaml));
    /// assert_eq!(Format::from_path(Path::new("app.ini")), None);
    /// ```
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("properties") => Some(Self::Properties),
            Some("toml") => Some(Self::Toml),
            Some("yaml" | "yml") => Some(Self::Yaml),
            Some("json") => Some(Self::Json),
            Some("json5") => Some(Self::Json5),
            _ => None,
        }
    }

    /// Lower-case name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Properties => "properties",
            Self::Toml => "toml",
            Self::Yaml => "yaml",
            Self::Json => "json",
            Self::Json5 => "json5",
        }
    }
}

impl PropertyStore {
    /// Parses `data` as `format` and merges the result into the store.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Format`] when the text does not parse, is not a
    /// mapping at the top level, or needs a disabled feature.
    ///
    /// # Examples
    ///
    /// ```
    /// use prop_bind::{Format, PropertyStore, Value};
    /// let mut store = PropertyStore::new();
    /// store
    ///     .read_str("server.port = 8080\n# comment\nserver.host: example.org", Format::Properties)
    ///     .expect("valid properties");
    /// assert_eq!(store.get("server.host"), Some(&Value::from("example.org")));
    /// ```
    pub fn read_str(&mut self, data: &str, format: Format) -> LoadResult<()> {
        let tree = parser::parse(data, format)?;
        debug!(format = format.name(), keys = tree.len(), "read inline properties");
        self.merge_mapping("", &tree);
        Ok(())
    }

    /// Loads the file at `path`, choosing the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::UnsupportedFormat`] for unknown extensions and
    /// [`LoadError::File`] when the file cannot be read or parsed.
    pub fn load_file(&mut self, path: &Path) -> LoadResult<()> {
        let format = Format::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        let data = std::fs::read_to_string(path).map_err(|err| LoadError::file(path, err))?;
        let tree = parser::parse(&data, format).map_err(|err| LoadError::file(path, err))?;
        debug!(path = %path.display(), format = format.name(), keys = tree.len(), "loaded property file");
        self.merge_mapping("", &tree);
        Ok(())
    }

    /// Imports environment variables whose names start with `prefix`.
    ///
    /// The prefix is stripped, names are lower-cased and `__` separates
    /// nesting levels, so `APP_DB__HOST` with prefix `APP_` becomes `db.host`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Gathering`] when the environment cannot be read
    /// into a mapping.
    pub fn load_env(&mut self, prefix: &str) -> LoadResult<()> {
        let tree = env::gather(prefix)?;
        debug!(prefix, keys = tree.len(), "loaded environment properties");
        self.merge_mapping("", &tree);
        Ok(())
    }

    /// Loads `application.<ext>` and, for a profile, `application-<profile>.<ext>`
    /// from each directory in turn. Missing candidates are skipped.
    ///
    /// Returns the paths that were loaded, in load order.
    ///
    /// # Errors
    ///
    /// Propagates the first [`LoadError`] raised by an existing file.
    pub fn load_application<P: AsRef<Path>>(
        &mut self,
        dirs: &[P],
        profile: Option<&str>,
    ) -> LoadResult<Vec<PathBuf>> {
        let mut stems = vec!["application".to_owned()];
        if let Some(profile) = profile.filter(|p| !p.is_empty()) {
            stems.push(format!("application-{profile}"));
        }
        let mut loaded = Vec::new();
        for dir in dirs {
            for stem in &stems {
                for ext in APPLICATION_EXTENSIONS {
                    let candidate = dir.as_ref().join(format!("{stem}.{ext}"));
                    if !candidate.is_file() {
                        continue;
                    }
                    self.load_file(&candidate)?;
                    loaded.push(candidate);
                }
            }
        }
        if loaded.is_empty() {
            debug!(profile, "no application property files found");
        }
        Ok(loaded)
    }
}

/// Converts a parsed JSON tree into a property mapping.
///
/// Nulls are dropped; booleans and numbers keep their textual form.
fn mapping_from_json(format: Format, json: JsonValue) -> LoadResult<BTreeMap<String, Value>> {
    match json {
        JsonValue::Object(entries) => Ok(entries
            .into_iter()
            .filter_map(|(key, item)| value_from_json(item).map(|value| (key, value)))
            .collect()),
        JsonValue::Null => Ok(BTreeMap::new()),
        other => Err(LoadError::format(
            format.name(),
            format!("expected a mapping at the top level, found {other}"),
        )),
    }
}

fn value_from_json(json: JsonValue) -> Option<Value> {
    match json {
        JsonValue::Null => None,
        JsonValue::Bool(flag) => Some(Value::from(flag)),
        JsonValue::Number(number) => Some(Value::Scalar(number.to_string())),
        JsonValue::String(text) => Some(Value::Scalar(text)),
        JsonValue::Array(items) => Some(Value::Sequence(
            items.into_iter().filter_map(value_from_json).collect(),
        )),
        JsonValue::Object(entries) => Some(Value::Mapping(
            entries
                .into_iter()
                .filter_map(|(key, item)| value_from_json(item).map(|value| (key, value)))
                .collect(),
        )),
    }
}
