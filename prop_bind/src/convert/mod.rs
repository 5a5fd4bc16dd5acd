//! Registry of `string -> T` converters keyed by destination type.
//!
//! A converter registered for a type takes priority over structural binding
//! of that type, including derived structs. The registry is configured
//! before binding starts and is only read while a binding call runs.

mod cast;
mod duration;
mod timestamp;

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

pub(crate) use cast::{parse_bool, parse_integer, parse_unsigned, split_list};
pub use duration::parse_duration;
pub use timestamp::parse_timestamp;

type ConvertFn = dyn Fn(&str) -> Result<Box<dyn Any>, String> + Send + Sync;

struct Converter {
    type_name: &'static str,
    convert: Box<ConvertFn>,
}

/// Mapping from destination type to its converter.
///
/// # Examples
///
/// ```
/// use prop_bind::Converters;
/// use std::net::SocketAddr;
///
/// let mut converters = Converters::builtin();
/// converters.register(|raw: &str| raw.parse::<SocketAddr>());
/// assert!(converters.contains::<SocketAddr>());
/// assert!(converters.contains::<std::time::Duration>());
/// ```
pub struct Converters {
    by_type: HashMap<TypeId, Converter>,
}

impl Converters {
    /// Registry without any converter.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            by_type: HashMap::new(),
        }
    }

    /// Registry seeded with the `Duration` and `DateTime<Utc>` converters.
    #[must_use]
    pub fn builtin() -> Self {
        let mut converters = Self::empty();
        converters
            .register::<Duration, _, _>(parse_duration)
            .register::<DateTime<Utc>, _, _>(parse_timestamp);
        converters
    }

    /// Registers `convert` for `T`, replacing any converter already present.
    pub fn register<T, E, F>(&mut self, convert: F) -> &mut Self
    where
        T: Any,
        E: fmt::Display,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    {
        let converter = Converter {
            type_name: type_name::<T>(),
            convert: Box::new(move |raw: &str| {
                convert(raw)
                    .map(|value| Box::new(value) as Box<dyn Any>)
                    .map_err(|err| err.to_string())
            }),
        };
        if self.by_type.insert(TypeId::of::<T>(), converter).is_some() {
            debug!(target_type = type_name::<T>(), "replaced converter");
        }
        self
    }

    /// Whether a converter is registered for `T`.
    #[must_use]
    pub fn contains<T: Any>(&self) -> bool {
        self.by_type.contains_key(&TypeId::of::<T>())
    }

    /// Converts `raw` into `T`; `None` when no converter is registered.
    pub fn convert<T: Any>(&self, raw: &str) -> Option<Result<T, String>> {
        let converter = self.by_type.get(&TypeId::of::<T>())?;
        Some((converter.convert)(raw).and_then(|boxed| {
            boxed.downcast::<T>().map(|value| *value).map_err(|_| {
                format!("converter for {} produced another type", converter.type_name)
            })
        }))
    }

    /// Number of registered converters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    /// Whether no converter is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}

impl Default for Converters {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for Converters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.by_type.values().map(|converter| converter.type_name))
            .finish()
    }
}
