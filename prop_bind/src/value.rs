//! Closed value algebra held by property stores.

use std::collections::BTreeMap;

/// A property value: a scalar, a sequence or a string-keyed mapping.
///
/// Scalars keep their textual form; typed conversion happens at bind time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Scalar in textual form.
    Scalar(String),
    /// Ordered list of values.
    Sequence(Vec<Value>),
    /// String-keyed mapping of values.
    Mapping(BTreeMap<String, Value>),
}

impl Value {
    /// Human-readable name of the variant, used in diagnostics.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "a scalar",
            Self::Sequence(_) => "a sequence",
            Self::Mapping(_) => "a mapping",
        }
    }

    /// Returns the text of a scalar.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the items of a sequence.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries of a mapping.
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Mapping(entries) => Some(entries),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Scalar(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Scalar(text)
    }
}

macro_rules! scalar_from_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::Scalar(value.to_string())
                }
            }
        )*
    };
}

scalar_from_display!(bool, i32, i64, u32, u64, f64);

impl<V: Into<Self>> From<Vec<V>> for Value {
    fn from(items: Vec<V>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<Self>> From<BTreeMap<String, V>> for Value {
    fn from(entries: BTreeMap<String, V>) -> Self {
        Self::Mapping(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<Self>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Mapping(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Joins a dotted key with a child segment.
pub(crate) fn join_key(base: &str, child: &str) -> String {
    if base.is_empty() {
        child.to_owned()
    } else {
        format!("{base}.{child}")
    }
}

/// Flattens nested mappings below `base` into lower-cased dotted keys.
///
/// Sequences and scalars are leaves; empty mappings vanish.
pub(crate) fn flatten_into(base: &str, entries: &BTreeMap<String, Value>, out: &mut BTreeMap<String, Value>) {
    for (key, value) in entries {
        let full = join_key(base, &key.to_lowercase());
        match value {
            Value::Mapping(inner) => flatten_into(&full, inner, out),
            leaf => {
                out.insert(full, leaf.clone());
            }
        }
    }
}
