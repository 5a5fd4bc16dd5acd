//! Crate path resolution for renamed dependencies.

use proc_macro2::TokenStream;
use quote::quote;

/// Path used to reach the runtime crate from generated code.
///
/// Defaults to `::prop_bind`; `#[bindable(crate = "...")]` overrides it.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::prop_bind }, |path| quote! { #path })
}
