//! Constructors and classification helpers for `BindError` and `LoadError`.

use std::path::Path;

use figment::Error as FigmentError;

use super::{BindError, BindErrorKind, LoadError};
use crate::scope::Scope;

impl BindError {
    /// Returns the category of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use prop_bind::{BindError, BindErrorKind};
    /// let err = BindError::TagSyntax { field: "Cfg.port".into(), tag: "port".into() };
    /// assert_eq!(err.kind(), BindErrorKind::TagSyntax);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> BindErrorKind {
        match self {
            Self::TagSyntax { .. } => BindErrorKind::TagSyntax,
            Self::InvalidTarget { .. } => BindErrorKind::InvalidTarget,
            Self::NotConfigured { .. } => BindErrorKind::NotConfigured,
            Self::StructDefault { .. } => BindErrorKind::StructDefault,
            Self::ShapeMismatch { .. } => BindErrorKind::ShapeMismatch,
            Self::UnsupportedElement { .. } => BindErrorKind::UnsupportedElement,
            Self::UnsupportedType { .. } => BindErrorKind::UnsupportedType,
            Self::Conversion { .. } => BindErrorKind::Conversion,
        }
    }

    /// Diagnostic path of the destination that failed.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::TagSyntax { field, .. }
            | Self::InvalidTarget { field, .. }
            | Self::NotConfigured { field, .. }
            | Self::StructDefault { field, .. }
            | Self::ShapeMismatch { field, .. }
            | Self::UnsupportedElement { field, .. }
            | Self::UnsupportedType { field, .. }
            | Self::Conversion { field, .. } => field,
        }
    }

    /// Full property name, for variants tied to a property.
    #[must_use]
    pub fn property(&self) -> Option<&str> {
        match self {
            Self::NotConfigured { property, .. }
            | Self::StructDefault { property, .. }
            | Self::ShapeMismatch { property, .. }
            | Self::Conversion { property, .. } => Some(property),
            Self::TagSyntax { .. }
            | Self::InvalidTarget { .. }
            | Self::UnsupportedElement { .. }
            | Self::UnsupportedType { .. } => None,
        }
    }

    pub(crate) fn tag_syntax(scope: &Scope, tag: &str) -> Self {
        Self::TagSyntax {
            field: scope.field_path().to_owned(),
            tag: tag.to_owned(),
        }
    }

    pub(crate) fn invalid_target(scope: &Scope, reason: &'static str) -> Self {
        Self::InvalidTarget {
            field: scope.field_path().to_owned(),
            reason,
        }
    }

    pub(crate) fn not_configured(scope: &Scope) -> Self {
        Self::NotConfigured {
            field: scope.field_path().to_owned(),
            property: scope.full_name().to_owned(),
        }
    }

    pub(crate) fn struct_default(scope: &Scope) -> Self {
        Self::StructDefault {
            field: scope.field_path().to_owned(),
            property: scope.full_name().to_owned(),
        }
    }

    pub(crate) fn shape_mismatch(scope: &Scope, expected: &'static str, found: &'static str) -> Self {
        Self::ShapeMismatch {
            field: scope.field_path().to_owned(),
            property: scope.full_name().to_owned(),
            expected,
            found,
        }
    }

    pub(crate) fn unsupported_element(
        scope: &Scope,
        container: &'static str,
        element: impl Into<String>,
    ) -> Self {
        Self::UnsupportedElement {
            field: scope.field_path().to_owned(),
            container,
            element: element.into(),
        }
    }

    pub(crate) fn unsupported_type(scope: &Scope, type_name: impl Into<String>) -> Self {
        Self::UnsupportedType {
            field: scope.field_path().to_owned(),
            type_name: type_name.into(),
        }
    }

    pub(crate) fn conversion(
        scope: &Scope,
        type_name: impl Into<String>,
        raw: &str,
        message: impl Into<String>,
    ) -> Self {
        Self::Conversion {
            field: scope.field_path().to_owned(),
            property: scope.full_name().to_owned(),
            type_name: type_name.into(),
            raw: raw.to_owned(),
            message: message.into(),
        }
    }
}

impl LoadError {
    /// Construct a [`LoadError::File`] for `path`.
    pub(crate) fn file(
        path: &Path,
        err: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::File {
            path: path.to_path_buf(),
            source: err.into(),
        }
    }

    /// Construct a gathering error from a [`figment::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use prop_bind::LoadError;
    /// let e = LoadError::gathering(figment::Error::from("boom"));
    /// assert!(matches!(e, LoadError::Gathering(_)));
    /// ```
    #[must_use]
    pub fn gathering(source: FigmentError) -> Self {
        Self::Gathering(Box::new(source))
    }

    pub(crate) fn format(format: &'static str, message: impl Into<String>) -> Self {
        Self::Format {
            format,
            message: message.into(),
        }
    }
}

impl From<FigmentError> for LoadError {
    fn from(e: FigmentError) -> Self {
        Self::gathering(e)
    }
}
