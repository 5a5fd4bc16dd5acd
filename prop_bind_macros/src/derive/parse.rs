//! Input parsing for the `Bindable` derive macro.
//!
//! Struct and field attributes are validated here so expansion fails fast
//! with spans pointing at the offending tokens. Tag contents are left to the
//! runtime parser, which reports malformed tags as binding errors.

use syn::ext::IdentExt as _;
use syn::{Attribute, Data, DeriveInput, Fields, Generics, Ident, LitStr, Visibility};

/// Struct-level options from `#[bindable(...)]`.
#[derive(Default)]
pub(crate) struct StructAttrs {
    /// Overrides the generated crate path.
    pub crate_path: Option<syn::Path>,
}

/// Field-level options from `#[value(...)]`.
#[derive(Default)]
pub(crate) struct FieldAttrs {
    pub tag: Option<LitStr>,
    pub skip: bool,
}

/// One named field participating in binding.
pub(crate) struct BindableField {
    pub ident: Ident,
    pub tag: Option<LitStr>,
    pub public: bool,
}

impl BindableField {
    /// Field name without any raw identifier prefix.
    pub(crate) fn name(&self) -> String {
        self.ident.unraw().to_string()
    }
}

/// Everything the generator needs from the derive input.
pub(crate) struct ParsedInput {
    pub ident: Ident,
    pub generics: Generics,
    pub attrs: StructAttrs,
    pub fields: Vec<BindableField>,
}

/// Gathers the struct identifier, generics, attributes and bindable fields.
///
/// Skipped fields are dropped here, so the generator never sees them.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ParsedInput> {
    let attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Bindable requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Bindable can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::new();
    for field in named {
        let field_attrs = parse_field_attrs(&field.attrs)?;
        if field_attrs.skip {
            continue;
        }
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "Bindable requires named fields"));
        };
        fields.push(BindableField {
            ident,
            tag: field_attrs.tag,
            public: matches!(field.vis, Visibility::Public(_)),
        });
    }

    Ok(ParsedInput {
        ident: input.ident.clone(),
        generics: input.generics.clone(),
        attrs,
        fields,
    })
}

fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("bindable")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let lit: LitStr = meta.value()?.parse()?;
                out.crate_path = Some(lit.parse()?);
                Ok(())
            } else {
                Err(meta.error("unsupported bindable option, expected `crate = \"...\"`"))
            }
        })?;
    }
    Ok(out)
}

/// Parses the `#[value(...)]` attributes of one field.
///
/// Accepts either a single tag string or the `skip` flag, never both.
fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("value")) {
        if let Ok(tag) = attr.parse_args::<LitStr>() {
            if out.tag.is_some() {
                return Err(syn::Error::new_spanned(tag, "duplicate binding tag"));
            }
            out.tag = Some(tag);
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                out.skip = true;
                Ok(())
            } else {
                Err(meta.error("expected a binding tag string or `skip`"))
            }
        })?;
    }
    if out.skip
        && let Some(tag) = &out.tag
    {
        return Err(syn::Error::new_spanned(tag, "a skipped field cannot carry a binding tag"));
    }
    Ok(out)
}
