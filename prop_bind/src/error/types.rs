//! Primary error enums for binding and loading flows.

use std::path::PathBuf;

use figment::Error as FigmentError;
use thiserror::Error;

/// Errors that abort a binding call.
///
/// Every variant carries `field`, the diagnostic path of the destination
/// (for example `ServerConfig.listen.port`). Variants tied to a property also
/// carry `property`, the human-readable property name composed from the
/// binding tags along that path.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BindError {
    /// A binding tag is not of the form `${name}` or `${name:=default}`.
    #[error("{field}: malformed binding tag '{tag}', expected `${{name}}` or `${{name:=default}}`")]
    TagSyntax {
        /// Field carrying the malformed tag.
        field: String,
        /// The tag text as written.
        tag: String,
    },

    /// The destination cannot receive a value.
    #[error("{field}: invalid binding target: {reason}")]
    InvalidTarget {
        /// Field that was rejected.
        field: String,
        /// Why the target was rejected.
        reason: &'static str,
    },

    /// No stored value, default literal or nested entries exist for a key.
    #[error("{field}: property \"{property}\" is not configured")]
    NotConfigured {
        /// Field that requested the property.
        field: String,
        /// Full property name.
        property: String,
    },

    /// A struct-typed destination was given a default literal.
    #[error("{field}: struct binding \"{property}\" cannot declare a default value")]
    StructDefault {
        /// Field carrying the default.
        field: String,
        /// Full property name.
        property: String,
    },

    /// The stored value does not have the shape the destination needs.
    #[error("{field}: property \"{property}\" should be {expected}, found {found}")]
    ShapeMismatch {
        /// Field being bound.
        field: String,
        /// Full property name.
        property: String,
        /// Shape the destination requires.
        expected: &'static str,
        /// Shape that was found.
        found: &'static str,
    },

    /// A sequence or mapping element type is not supported.
    #[error("{field}: {container} elements of type {element} are not supported")]
    UnsupportedElement {
        /// Field being bound.
        field: String,
        /// `sequence` or `mapping`.
        container: &'static str,
        /// Element type name.
        element: String,
    },

    /// The destination type has no binding strategy.
    #[error("{field}: unsupported destination type {type_name}")]
    UnsupportedType {
        /// Field being bound.
        field: String,
        /// Destination type name.
        type_name: String,
    },

    /// A raw value could not be converted into the destination type.
    #[error("{field}: cannot convert \"{raw}\" of property \"{property}\" into {type_name}: {message}")]
    Conversion {
        /// Field being bound.
        field: String,
        /// Full property name.
        property: String,
        /// Destination type name.
        type_name: String,
        /// Raw text that failed to convert.
        raw: String,
        /// Parser message.
        message: String,
    },
}

/// Fieldless mirror of [`BindError`] variants for matching on the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindErrorKind {
    /// See [`BindError::TagSyntax`].
    TagSyntax,
    /// See [`BindError::InvalidTarget`].
    InvalidTarget,
    /// See [`BindError::NotConfigured`].
    NotConfigured,
    /// See [`BindError::StructDefault`].
    StructDefault,
    /// See [`BindError::ShapeMismatch`].
    ShapeMismatch,
    /// See [`BindError::UnsupportedElement`].
    UnsupportedElement,
    /// See [`BindError::UnsupportedType`].
    UnsupportedType,
    /// See [`BindError::Conversion`].
    Conversion,
}

/// Errors that can occur while loading properties from a source.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// Error originating from a configuration file.
    #[error("Configuration file error in '{path}': {source}")]
    File {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying error reported while reading or parsing.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error while gathering values through a figment provider.
    #[error("Failed to gather properties: {0}")]
    Gathering(#[from] Box<FigmentError>),

    /// Inline source text could not be parsed.
    #[error("Failed to parse {format} properties: {message}")]
    Format {
        /// Format name.
        format: &'static str,
        /// Parser message.
        message: String,
    },

    /// The file extension does not map to a known format.
    #[error("Unsupported property file format: '{path}'")]
    UnsupportedFormat {
        /// Path with the unrecognised extension.
        path: PathBuf,
    },
}

/// Result alias for binding operations.
pub type BindResult<T> = Result<T, BindError>;

/// Result alias for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;
