//! Environment variable import through figment's `Env` provider.

use std::collections::BTreeMap;

use figment::Figment;
use figment::providers::Env;

use super::{Format, mapping_from_json, parser::extract};
use crate::error::LoadResult;
use crate::value::Value;

/// Nesting separator inside variable names.
const SPLIT: &str = "__";

/// Collects variables starting with `prefix` into a nested mapping.
pub(super) fn gather(prefix: &str) -> LoadResult<BTreeMap<String, Value>> {
    let json = extract(Figment::from(Env::prefixed(prefix).split(SPLIT)))?;
    mapping_from_json(Format::Json, json)
}
