//! Error types produced by the binder and the property loaders.

mod constructors;
mod types;

pub use types::{BindError, BindErrorKind, BindResult, LoadError, LoadResult};

#[cfg(test)]
mod tests;
