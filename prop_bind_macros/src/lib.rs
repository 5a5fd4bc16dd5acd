//! Procedural macros for `prop_bind`.
//!
//! `#[derive(Bindable)]` implements `prop_bind::Bindable` for structs with
//! named fields. The generated code reports the struct shape and visits every
//! field in declaration order, handing each one to the runtime binder together
//! with its name, visibility and optional binding tag.
//!
//! Field attributes:
//!
//! - `#[value("${name}")]` or `#[value("${name:=default}")]` binds the field to
//!   a property relative to the enclosing prefix.
//! - `#[value(skip)]` leaves the field out of binding entirely.
//!
//! Every field that is not skipped is handed to the binder, so its type must
//! implement `Bindable` even when it carries no tag. Untagged scalar and
//! collection fields are ignored at runtime, but a field whose type has no
//! `Bindable` impl at all (a `PathBuf`, a handle, a cache) fails to compile
//! until it is marked `#[value(skip)]`.
//!
//! Struct attributes:
//!
//! - `#[bindable(crate = "path")]` names the runtime crate when it is renamed
//!   in `Cargo.toml`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `prop_bind::Bindable`.
#[proc_macro_derive(Bindable, attributes(value, bindable))]
pub fn derive_bindable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
