//! Binding scope propagated through recursive traversal.
//!
//! A [`Scope`] is never mutated in place: each recursive step derives a new
//! value from its parent plus the current field or element.

/// Immutable context for one step of a binding traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    prefix: String,
    full_name: String,
    field_path: String,
    allow_private: bool,
}

impl Scope {
    /// Root scope for a top-level binding call.
    ///
    /// # Examples
    ///
    /// ```
    /// use prop_bind::Scope;
    /// let scope = Scope::root("AppConfig", "app", false);
    /// assert_eq!(scope.field_path(), "AppConfig");
    /// assert_eq!(scope.full_name(), "app");
    /// assert_eq!(scope.prefix(), "");
    /// ```
    #[must_use]
    pub fn root(field_path: impl Into<String>, full_name: impl Into<String>, allow_private: bool) -> Self {
        Self {
            prefix: String::new(),
            full_name: full_name.into(),
            field_path: field_path.into(),
            allow_private,
        }
    }

    /// Dotted path prepended to relative property names.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Property name composed for diagnostics.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Diagnostic label of the destination field chain.
    #[must_use]
    pub fn field_path(&self) -> &str {
        &self.field_path
    }

    /// Whether non-`pub` fields participate in binding.
    #[must_use]
    pub const fn allow_private(&self) -> bool {
        self.allow_private
    }

    /// Scope for the struct field `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Self {
        Self {
            field_path: format!("{}.{name}", self.field_path),
            ..self.clone()
        }
    }

    /// Scope whose relative names resolve below `prefix`.
    #[must_use]
    pub fn nested(&self, prefix: &str) -> Self {
        Self {
            prefix: prefix.to_owned(),
            ..self.clone()
        }
    }

    /// Scope for a collection element bound against its own temporary store.
    ///
    /// The prefix is cleared because element stores hold relative keys.
    #[must_use]
    pub fn element(&self, synthetic_name: String) -> Self {
        Self {
            prefix: String::new(),
            full_name: synthetic_name,
            field_path: self.field_path.clone(),
            allow_private: self.allow_private,
        }
    }

    /// Scope carrying an updated full property name.
    #[must_use]
    pub fn named(&self, full_name: String) -> Self {
        Self {
            full_name,
            ..self.clone()
        }
    }
}
