//! Recursive, type-directed binding of property values into destinations.
//!
//! Each destination type reports its [`Shape`]. The binder consults the
//! converter registry first, then dispatches on the shape: scalars are cast,
//! structs recurse field by field, sequences and mappings either cast or
//! convert their elements or bind each element against a temporary store.

mod collections;
mod impls;
#[cfg(test)]
mod tests;

use std::any::{Any, type_name};
use std::borrow::Cow;

use tracing::trace;

use crate::convert::Converters;
use crate::error::{BindError, BindResult};
use crate::scope::Scope;
use crate::store::Properties;
use crate::tag::Directive;
use crate::value::Value;

/// Kind of a scalar destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// Signed integers.
    Signed,
    /// Unsigned integers.
    Unsigned,
    /// Floating point numbers.
    Float,
    /// Strings.
    Text,
    /// Booleans.
    Bool,
}

/// Structural category of a destination type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A scalar cast from text.
    Scalar(ScalarKind),
    /// A struct bound field by field.
    Struct,
    /// A `Vec`.
    Sequence,
    /// A string-keyed map.
    Mapping,
    /// `Box` or `Option`; never a legal binding target.
    Pointer,
    /// A type bound only through a registered converter.
    Opaque,
}

/// A destination the binder can populate.
///
/// Structs implement this trait with `#[derive(Bindable)]`; the crate
/// provides implementations for scalars, `Vec`, string-keyed maps, `Box`,
/// `Option`, [`std::time::Duration`] and `chrono::DateTime<Utc>`.
pub trait Bindable: Any + Default {
    /// Structural category used to select a binding strategy.
    fn shape() -> Shape;

    /// Binds `self` from the property described by `slot`.
    ///
    /// Only called when no converter is registered for `Self`.
    ///
    /// # Errors
    ///
    /// Returns a [`BindError`] when the property is missing or cannot be
    /// turned into `Self`.
    fn bind_structural(&mut self, binding: &Binding<'_>, slot: &Slot<'_>) -> BindResult<()>;

    /// Casts raw text into `Self`. Scalars return `Some`.
    fn cast_scalar(_raw: &str) -> Option<Result<Self, String>> {
        None
    }

    /// Binds each field of a struct within `scope`. Non-struct shapes keep
    /// the default, which binds nothing.
    ///
    /// # Errors
    ///
    /// Returns the first [`BindError`] raised by a field.
    fn bind_fields(&mut self, _binding: &Binding<'_>, _scope: &Scope) -> BindResult<()> {
        Ok(())
    }
}

/// Static description of a struct field, emitted by `#[derive(Bindable)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field identifier.
    pub name: &'static str,
    /// Binding tag, `${name:=default}`.
    pub tag: Option<&'static str>,
    /// Whether the field is `pub`.
    pub public: bool,
}

/// Property location being bound: resolved key, optional default and scope.
#[derive(Debug, Clone)]
pub struct Slot<'s> {
    key: String,
    default: Option<&'s str>,
    scope: Scope,
}

impl<'s> Slot<'s> {
    /// Describes a binding of `key`, falling back to `default`.
    #[must_use]
    pub const fn new(key: String, default: Option<&'s str>, scope: Scope) -> Self {
        Self {
            key,
            default,
            scope,
        }
    }

    /// Resolved lookup key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Raw default literal.
    #[must_use]
    pub const fn default(&self) -> Option<&'s str> {
        self.default
    }

    /// Scope of this binding.
    #[must_use]
    pub const fn scope(&self) -> &Scope {
        &self.scope
    }
}

/// Entry point binding property stores into destinations.
///
/// # Examples
///
/// ```
/// use prop_bind::{Binder, Bindable, PropertyStore};
///
/// #[derive(Debug, Default, Bindable)]
/// struct Server {
///     #[value("${host:=localhost}")]
///     pub host: String,
///     #[value("${port}")]
///     pub port: u16,
/// }
///
/// let store: PropertyStore = [("app.server.port", "8080")].into_iter().collect();
/// let mut server = Server::default();
/// Binder::default()
///     .bind_into(&store, "app.server", &mut server, false)
///     .expect("binding succeeds");
/// assert_eq!(server.host, "localhost");
/// assert_eq!(server.port, 8080);
/// ```
#[derive(Debug, Default)]
pub struct Binder {
    converters: Converters,
}

impl Binder {
    /// Creates a binder using `converters`.
    #[must_use]
    pub const fn new(converters: Converters) -> Self {
        Self { converters }
    }

    /// Converter registry in use.
    #[must_use]
    pub const fn converters(&self) -> &Converters {
        &self.converters
    }

    /// Binds the property at `root_key` into `dest`.
    ///
    /// Fields bound before a failing field keep their new values.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::InvalidTarget`] for pointer-shaped destinations,
    /// before the store is consulted, and otherwise the first error raised
    /// during the traversal.
    pub fn bind_into<T: Bindable>(
        &self,
        props: &dyn Properties,
        root_key: &str,
        dest: &mut T,
        allow_private_fields: bool,
    ) -> BindResult<()> {
        let scope = Scope::root(short_type_name::<T>(), root_key, allow_private_fields);
        if T::shape() == Shape::Pointer {
            return Err(BindError::invalid_target(
                &scope,
                "destination must be a concrete value, not a pointer",
            ));
        }
        let binding = Binding::new(props, &self.converters);
        binding.bind(dest, &Slot::new(root_key.to_owned(), None, scope))
    }

    /// Binds the property at `key` into a fresh `T::default()`.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Binder::bind_into`].
    ///
    /// # Examples
    ///
    /// ```
    /// use prop_bind::{Binder, PropertyStore};
    /// use std::time::Duration;
    ///
    /// let store: PropertyStore = [("timeout", "1m30s"), ("debug", "T")].into_iter().collect();
    /// let binder = Binder::default();
    /// assert_eq!(binder.resolve::<Duration>(&store, "timeout").ok(), Some(Duration::from_secs(90)));
    /// assert_eq!(binder.resolve::<bool>(&store, "debug").ok(), Some(true));
    /// ```
    pub fn resolve<T: Bindable>(&self, props: &dyn Properties, key: &str) -> BindResult<T> {
        let mut value = T::default();
        self.bind_into(props, key, &mut value, false)?;
        Ok(value)
    }
}

/// State shared by every step of one binding call.
pub struct Binding<'a> {
    props: &'a dyn Properties,
    converters: &'a Converters,
}

impl<'a> Binding<'a> {
    pub(crate) fn new(props: &'a dyn Properties, converters: &'a Converters) -> Self {
        Self { props, converters }
    }

    /// Same converters, different property source.
    fn with_properties<'b>(&self, props: &'b dyn Properties) -> Binding<'b>
    where
        'a: 'b,
    {
        Binding {
            props,
            converters: self.converters,
        }
    }

    /// Binds `dest`, preferring a registered converter over its shape.
    ///
    /// # Errors
    ///
    /// Returns the [`BindError`] raised by conversion or structural binding.
    pub fn bind<T: Bindable>(&self, dest: &mut T, slot: &Slot<'_>) -> BindResult<()> {
        if self.converters.contains::<T>() {
            let value = self.effective_value(slot)?;
            let raw = scalar_text(&value, slot.scope())?;
            *dest = self.convert_text::<T>(raw, slot.scope())?;
            return Ok(());
        }
        dest.bind_structural(self, slot)
    }

    /// Looks up the value for `slot`: store, then default literal, then the
    /// entries nested below the key.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::NotConfigured`] when all three are absent.
    pub fn effective_value(&self, slot: &Slot<'_>) -> BindResult<Cow<'a, Value>> {
        let scope = slot.scope();
        if let Some(value) = self.props.get(slot.key()) {
            trace!(property = slot.key(), field = scope.field_path(), source = "store", "resolved property");
            return Ok(Cow::Borrowed(value));
        }
        if let Some(default) = slot.default() {
            trace!(property = slot.key(), field = scope.field_path(), source = "default", "resolved property");
            return Ok(Cow::Owned(Value::from(default)));
        }
        let nested = self.props.get_by_prefix(slot.key());
        if nested.is_empty() {
            return Err(BindError::not_configured(scope));
        }
        trace!(property = slot.key(), field = scope.field_path(), source = "prefix", "resolved property");
        Ok(Cow::Owned(Value::Mapping(nested)))
    }

    /// Casts the effective scalar value into `dest`.
    ///
    /// # Errors
    ///
    /// Fails when the value is missing, not a scalar or does not parse.
    pub fn bind_scalar<T: Bindable>(&self, dest: &mut T, slot: &Slot<'_>) -> BindResult<()> {
        let value = self.effective_value(slot)?;
        *dest = cast_scalar::<T>(scalar_text(&value, slot.scope())?, slot.scope())?;
        Ok(())
    }

    /// Binds the fields of `dest` below the slot's key.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::StructDefault`] when the slot carries a default,
    /// otherwise the first field error.
    pub fn bind_struct<T: Bindable>(&self, dest: &mut T, slot: &Slot<'_>) -> BindResult<()> {
        if slot.default().is_some() {
            return Err(BindError::struct_default(slot.scope()));
        }
        dest.bind_fields(self, &slot.scope().nested(slot.key()))
    }

    /// Binds one struct field described by `field`.
    ///
    /// Tagged fields bind through [`Binding::bind`]. Untagged struct fields
    /// share the enclosing prefix; other untagged fields are skipped, as are
    /// untagged non-`pub` fields unless private access is allowed.
    ///
    /// # Errors
    ///
    /// Fails on malformed tags, pointer or inaccessible targets and any
    /// error from the nested binding.
    pub fn bind_field<T: Bindable>(&self, dest: &mut T, field: &FieldSpec, scope: &Scope) -> BindResult<()> {
        let field_scope = scope.field(field.name);
        let inaccessible = !field.public && !field_scope.allow_private();
        let Some(tag) = field.tag else {
            if inaccessible || T::shape() != Shape::Struct {
                return Ok(());
            }
            return dest.bind_fields(self, &field_scope);
        };
        let directive = Directive::parse(tag, &field_scope)?;
        if T::shape() == Shape::Pointer {
            return Err(BindError::invalid_target(&field_scope, "binding target cannot be a pointer"));
        }
        if inaccessible {
            return Err(BindError::invalid_target(
                &field_scope,
                "non-public field requires private field access",
            ));
        }
        let (key, value_scope) = directive.resolve(&field_scope);
        self.bind(dest, &Slot::new(key, directive.default, value_scope))
    }

    fn convert_text<T: Any>(&self, raw: &str, scope: &Scope) -> BindResult<T> {
        match self.converters.convert::<T>(raw) {
            Some(Ok(value)) => Ok(value),
            Some(Err(message)) => Err(BindError::conversion(scope, short_type_name::<T>(), raw, message)),
            None => Err(BindError::unsupported_type(scope, short_type_name::<T>())),
        }
    }
}

fn cast_scalar<T: Bindable>(raw: &str, scope: &Scope) -> BindResult<T> {
    match T::cast_scalar(raw) {
        Some(Ok(value)) => Ok(value),
        Some(Err(message)) => Err(BindError::conversion(scope, short_type_name::<T>(), raw, message)),
        None => Err(BindError::unsupported_type(scope, short_type_name::<T>())),
    }
}

fn scalar_text<'v>(value: &'v Value, scope: &Scope) -> BindResult<&'v str> {
    value
        .as_scalar()
        .ok_or_else(|| BindError::shape_mismatch(scope, "a scalar", value.describe()))
}

/// `type_name` with module paths removed, e.g. `Vec<Item>`.
pub(crate) fn short_type_name<T: ?Sized>() -> String {
    let full = type_name::<T>();
    let mut short = String::with_capacity(full.len());
    let mut path = String::new();
    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            path.push(c);
        } else {
            short.push_str(last_segment(&path));
            path.clear();
            short.push(c);
        }
    }
    short.push_str(last_segment(&path));
    short
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}
