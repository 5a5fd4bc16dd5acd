//! Type-directed binding of hierarchical properties into Rust structs.
//!
//! A [`PropertyStore`] holds case-insensitive dotted keys loaded from
//! property, TOML, YAML or JSON files and from the environment. A [`Binder`]
//! walks a destination type and fills it from the store. Struct fields opt in
//! with `#[value("${name:=default}")]`. The derive macro lives in the
//! companion `prop_bind_macros` crate and is re-exported here as
//! [`Bindable`](macro@Bindable).
//!
//! Every field the derive does not skip must have a [`Bindable`] type, tagged
//! or not. Fields of other types are opted out with `#[value(skip)]`:
//!
//! ```compile_fail
//! use std::path::PathBuf;
//! use prop_bind::Bindable;
//!
//! #[derive(Default, Bindable)]
//! struct Paths {
//!     #[value("${name}")]
//!     pub name: String,
//!     pub root: PathBuf,
//! }
//! ```
//!
//! ```
//! use std::path::PathBuf;
//! use prop_bind::Bindable;
//!
//! #[derive(Default, Bindable)]
//! struct Paths {
//!     #[value("${name}")]
//!     pub name: String,
//!     #[value(skip)]
//!     pub root: PathBuf,
//! }
//! ```

extern crate self as prop_bind;

pub use prop_bind_macros::Bindable;

mod bind;
mod convert;
mod error;
mod load;
mod scope;
mod store;
mod tag;
mod value;

pub use bind::{Bindable, Binder, Binding, FieldSpec, ScalarKind, Shape, Slot};
pub use convert::{Converters, parse_duration, parse_timestamp};
pub use error::{BindError, BindErrorKind, BindResult, LoadError, LoadResult};
pub use load::Format;
pub use scope::Scope;
pub use store::{Properties, PropertyStore};
pub use tag::Directive;
pub use value::Value;
