//! Parser for `${name:=default}` binding tags.

use crate::error::{BindError, BindResult};
use crate::scope::Scope;

/// Parsed form of a field's binding tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'t> {
    /// Property name, empty to use the enclosing prefix verbatim.
    pub name: &'t str,
    /// Raw default literal, converted lazily by the binder.
    pub default: Option<&'t str>,
}

impl<'t> Directive<'t> {
    /// Parses `tag`, reporting errors against the field in `scope`.
    ///
    /// The text inside `${...}` is split on the first `:=`.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::TagSyntax`] when `tag` is not wrapped in `${` and `}`.
    ///
    /// # Examples
    ///
    /// ```
    /// use prop_bind::{Directive, Scope};
    /// let scope = Scope::root("Cfg", "", false);
    /// let d = Directive::parse("${server.port:=8080}", &scope).expect("valid tag");
    /// assert_eq!(d.name, "server.port");
    /// assert_eq!(d.default, Some("8080"));
    /// ```
    pub fn parse(tag: &'t str, scope: &Scope) -> BindResult<Self> {
        let body = tag
            .strip_prefix("${")
            .and_then(|rest| rest.strip_suffix('}'))
            .ok_or_else(|| BindError::tag_syntax(scope, tag))?;
        Ok(match body.split_once(":=") {
            Some((name, default)) => Self {
                name,
                default: Some(default),
            },
            None => Self {
                name: body,
                default: None,
            },
        })
    }

    /// Resolves the lookup key and the derived scope for this directive.
    ///
    /// The full name accumulates with `.` for diagnostics; the lookup key is
    /// additionally prefixed by the scope's active prefix.
    #[must_use]
    pub fn resolve(&self, scope: &Scope) -> (String, Scope) {
        let full_name = join(scope.full_name(), self.name);
        let key = join(scope.prefix(), self.name);
        (key, scope.named(full_name))
    }
}

fn join(base: &str, name: &str) -> String {
    match (base.is_empty(), name.is_empty()) {
        (true, _) => name.to_owned(),
        (false, true) => base.to_owned(),
        (false, false) => format!("{base}.{name}"),
    }
}
