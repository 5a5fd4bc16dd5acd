//! Sequence and mapping strategies of the binder.

use std::collections::BTreeMap;

use super::{Bindable, Binding, ScalarKind, Shape, Slot, cast_scalar, scalar_text, short_type_name};
use crate::convert::split_list;
use crate::error::{BindError, BindResult};
use crate::scope::Scope;
use crate::store::PropertyStore;
use crate::value::{Value, flatten_into};

impl Binding<'_> {
    /// Builds the elements of a sequence destination.
    ///
    /// Signed integer, string and boolean elements are cast; unsigned and
    /// floating point elements are rejected. Elements with a converter are
    /// converted one by one, and struct elements are bound against each
    /// mapping of the stored sequence under the key `name[index]`.
    ///
    /// # Errors
    ///
    /// Fails on unsupported element types, shape mismatches and element
    /// errors.
    pub fn bind_sequence<E: Bindable>(&self, slot: &Slot<'_>) -> BindResult<Vec<E>> {
        let scope = slot.scope();
        match E::shape() {
            Shape::Scalar(ScalarKind::Unsigned | ScalarKind::Float) => Err(
                BindError::unsupported_element(scope, "sequence", short_type_name::<E>()),
            ),
            Shape::Scalar(_) => {
                let value = self.effective_value(slot)?;
                scalar_items(&value, scope)?
                    .into_iter()
                    .map(|raw| cast_scalar::<E>(raw, scope))
                    .collect()
            }
            _ if self.converters.contains::<E>() => {
                let value = self.effective_value(slot)?;
                scalar_items(&value, scope)?
                    .into_iter()
                    .map(|raw| self.convert_text::<E>(raw, scope))
                    .collect()
            }
            Shape::Struct => self.bind_struct_sequence(slot),
            _ => Err(BindError::unsupported_element(
                scope,
                "sequence",
                short_type_name::<E>(),
            )),
        }
    }

    /// Builds the entries of a string-keyed mapping destination.
    ///
    /// String elements are cast and elements with a converter are converted,
    /// with `key.` stripped from every entry key. Struct elements are grouped
    /// by the first key segment below `key` and bound per group. Numeric and
    /// boolean elements are rejected.
    ///
    /// # Errors
    ///
    /// Fails on unsupported element types, shape mismatches and element
    /// errors.
    pub fn bind_mapping<E: Bindable>(&self, slot: &Slot<'_>) -> BindResult<Vec<(String, E)>> {
        let scope = slot.scope();
        match E::shape() {
            Shape::Scalar(ScalarKind::Text) => self
                .string_entries(slot)?
                .into_iter()
                .map(|(key, raw)| -> BindResult<(String, E)> {
                    Ok((key, cast_scalar::<E>(&raw, scope)?))
                })
                .collect(),
            Shape::Scalar(_) => Err(BindError::unsupported_element(
                scope,
                "mapping",
                short_type_name::<E>(),
            )),
            _ if self.converters.contains::<E>() => self
                .string_entries(slot)?
                .into_iter()
                .map(|(key, raw)| -> BindResult<(String, E)> {
                    Ok((key, self.convert_text::<E>(&raw, scope)?))
                })
                .collect(),
            Shape::Struct => self.bind_struct_mapping(slot),
            _ => Err(BindError::unsupported_element(
                scope,
                "mapping",
                short_type_name::<E>(),
            )),
        }
    }

    fn bind_struct_sequence<E: Bindable>(&self, slot: &Slot<'_>) -> BindResult<Vec<E>> {
        let scope = slot.scope();
        let value = self.effective_value(slot)?;
        let items = value
            .as_sequence()
            .ok_or_else(|| BindError::shape_mismatch(scope, "a sequence of mappings", value.describe()))?;
        items
            .iter()
            .enumerate()
            .map(|(index, item)| -> BindResult<E> {
                let entries = item.as_mapping().ok_or_else(|| {
                    BindError::shape_mismatch(scope, "a sequence of mappings", item.describe())
                })?;
                let name = format!("{}[{index}]", slot.key());
                self.bind_element(entries, &scope.element(name))
            })
            .collect()
    }

    fn bind_struct_mapping<E: Bindable>(&self, slot: &Slot<'_>) -> BindResult<Vec<(String, E)>> {
        let scope = slot.scope();
        let mut groups: BTreeMap<String, BTreeMap<String, Value>> = BTreeMap::new();
        for (key, value) in self.relative_entries(slot, "a mapping of mappings")? {
            let Some((group, rest)) = key.split_once('.') else {
                return Err(BindError::shape_mismatch(scope, "a mapping of mappings", value.describe()));
            };
            groups
                .entry(group.to_owned())
                .or_default()
                .insert(rest.to_owned(), value);
        }
        groups
            .into_iter()
            .map(|(group, entries)| -> BindResult<(String, E)> {
                let name = format!("{}.{group}", slot.key());
                let element = self.bind_element(&entries, &scope.element(name))?;
                Ok((group, element))
            })
            .collect()
    }

    fn string_entries(&self, slot: &Slot<'_>) -> BindResult<Vec<(String, String)>> {
        let scope = slot.scope();
        self.relative_entries(slot, "a mapping of strings")?
            .into_iter()
            .map(|(key, value)| -> BindResult<(String, String)> {
                Ok((key, scalar_text(&value, scope)?.to_owned()))
            })
            .collect()
    }

    /// Flattened entries of the effective mapping with `key.` removed.
    fn relative_entries(&self, slot: &Slot<'_>, expected: &'static str) -> BindResult<Vec<(String, Value)>> {
        let value = self.effective_value(slot)?;
        let entries = value
            .as_mapping()
            .ok_or_else(|| BindError::shape_mismatch(slot.scope(), expected, value.describe()))?;
        let mut flat = BTreeMap::new();
        flatten_into("", entries, &mut flat);
        let prefix = format!("{}.", slot.key().to_lowercase());
        Ok(flat
            .into_iter()
            .map(|(key, item)| {
                let relative = key
                    .strip_prefix(&prefix)
                    .map_or_else(|| key.clone(), str::to_owned);
                (relative, item)
            })
            .collect())
    }

    /// Binds a fresh `E` against `entries` used as a temporary store.
    fn bind_element<E: Bindable>(&self, entries: &BTreeMap<String, Value>, scope: &Scope) -> BindResult<E> {
        let store = PropertyStore::from_mapping(entries);
        let mut element = E::default();
        element.bind_fields(&self.with_properties(&store), scope)?;
        Ok(element)
    }
}

/// Textual items of a value feeding a sequence of scalars.
///
/// A scalar is split on whitespace and commas.
fn scalar_items<'v>(value: &'v Value, scope: &Scope) -> BindResult<Vec<&'v str>> {
    match value {
        Value::Sequence(items) => items.iter().map(|item| scalar_text(item, scope)).collect(),
        Value::Scalar(text) => Ok(split_list(text).collect()),
        Value::Mapping(_) => Err(BindError::shape_mismatch(scope, "a sequence", value.describe())),
    }
}
