//! Token generation for the `Bindable` implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{GenericParam, parse_quote};

use super::crate_path;
use super::parse::{BindableField, ParsedInput};

/// Builds `impl Bindable for <struct>`.
///
/// Every type parameter gains a `Bindable` bound because the field visitor
/// may hand any of them to the binder.
pub(crate) fn bindable_impl(input: &ParsedInput) -> TokenStream {
    let krate = crate_path::resolve(input.attrs.crate_path.as_ref());
    let ident = &input.ident;

    let mut generics = input.generics.clone();
    let params: Vec<_> = generics
        .params
        .iter()
        .filter_map(|param| match param {
            GenericParam::Type(ty) => Some(ty.ident.clone()),
            _ => None,
        })
        .collect();
    let bounds = generics.make_where_clause();
    for param in params {
        bounds
            .predicates
            .push(parse_quote!(#param: #krate::Bindable));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let bind_fields = field_visitor(&krate, &input.fields);

    quote! {
        impl #impl_generics #krate::Bindable for #ident #ty_generics #where_clause {
            fn shape() -> #krate::Shape {
                #krate::Shape::Struct
            }

            fn bind_structural(
                &mut self,
                binding: &#krate::Binding<'_>,
                slot: &#krate::Slot<'_>,
            ) -> #krate::BindResult<()> {
                binding.bind_struct(self, slot)
            }

            #bind_fields
        }
    }
}

/// Builds `bind_fields`, visiting fields in declaration order.
fn field_visitor(krate: &TokenStream, fields: &[BindableField]) -> TokenStream {
    if fields.is_empty() {
        return quote! {
            fn bind_fields(
                &mut self,
                _binding: &#krate::Binding<'_>,
                _scope: &#krate::Scope,
            ) -> #krate::BindResult<()> {
                ::core::result::Result::Ok(())
            }
        };
    }
    let calls = fields.iter().map(|field| {
        let member = &field.ident;
        let name = field.name();
        let public = field.public;
        let tag = field.tag.as_ref().map_or_else(
            || quote! { ::core::option::Option::None },
            |lit| quote! { ::core::option::Option::Some(#lit) },
        );
        quote! {
            binding.bind_field(
                &mut self.#member,
                &#krate::FieldSpec {
                    name: #name,
                    tag: #tag,
                    public: #public,
                },
                scope,
            )?;
        }
    });
    quote! {
        fn bind_fields(
            &mut self,
            binding: &#krate::Binding<'_>,
            scope: &#krate::Scope,
        ) -> #krate::BindResult<()> {
            #( #calls )*
            ::core::result::Result::Ok(())
        }
    }
}
