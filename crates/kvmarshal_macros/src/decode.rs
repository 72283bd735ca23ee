//! Decode derive macro implementation.
//!
//! Generates `kvmarshal::Decode` and `kvmarshal::AsTarget` implementations
//! from struct definitions. The `AsTarget` impl always exposes the field
//! table through `as_decode`, so a `#[decode(scan)]` struct can still be a
//! decode root.
//!
//! # Note
//!
//! The generated code refers to the runtime crate as `::kvmarshal`. The
//! runtime crate declares `extern crate self as kvmarshal` so the derive also
//! works inside its own tests.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, parse_quote, DeriveInput, Field, Ident, LitStr};

use crate::utils::{type_label, validate_struct_with_named_fields};

/// Main entry point for the Decode derive macro.
pub fn derive_decode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_decode_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// A field carrying at least one tag.
struct TaggedField<'a> {
    ident: &'a Ident,
    ty: &'a syn::Type,
    tags: Vec<(String, LitStr)>,
}

fn derive_decode_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let is_scan = parse_container_attrs(input)?;
    let fields = validate_struct_with_named_fields(input, "Decode")?;

    let mut tagged = Vec::new();
    for field in fields {
        let tags = parse_field_tags(field)?;
        if tags.is_empty() {
            continue;
        }
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected named field"))?;
        tagged.push(TaggedField {
            ident,
            ty: &field.ty,
            tags,
        });
    }

    let descriptors = tagged.iter().map(|field| {
        let field_name = field.ident.to_string();
        let type_name = type_label(field.ty);
        let tags = field.tags.iter().map(|(tag, spec)| quote! { (#tag, #spec) });
        quote! {
            ::kvmarshal::FieldDescriptor::new(#field_name, #type_name, &[#(#tags),*])
        }
    });

    let arms = tagged.iter().enumerate().map(|(index, field)| {
        let ident = field.ident;
        quote! {
            #index => ::core::option::Option::Some(
                ::kvmarshal::AsTarget::as_target(&mut self.#ident)
            ),
        }
    });

    // Generic structs need every tagged field type to be a decode target.
    let mut generics = input.generics.clone();
    if !input.generics.params.is_empty() {
        let where_clause = generics.make_where_clause();
        for field in &tagged {
            let ty = field.ty;
            where_clause
                .predicates
                .push(parse_quote!(#ty: ::kvmarshal::AsTarget));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let as_target = if is_scan {
        quote! { ::kvmarshal::Target::Scan(self) }
    } else {
        quote! { ::kvmarshal::Target::Struct(self) }
    };

    Ok(quote! {
        impl #impl_generics ::kvmarshal::Decode for #name #ty_generics #where_clause {
            fn fields(&self) -> &'static [::kvmarshal::FieldDescriptor] {
                const FIELDS: &[::kvmarshal::FieldDescriptor] = &[#(#descriptors),*];
                FIELDS
            }

            fn field_target(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<::kvmarshal::Target<'_>> {
                match index {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl #impl_generics ::kvmarshal::AsTarget for #name #ty_generics #where_clause {
            fn as_target(&mut self) -> ::kvmarshal::Target<'_> {
                #as_target
            }

            fn as_decode(
                &mut self,
            ) -> ::core::option::Option<&mut dyn ::kvmarshal::Decode> {
                ::core::option::Option::Some(self)
            }
        }
    })
}

/// Parse the struct-level `#[decode(scan)]` attribute.
fn parse_container_attrs(input: &DeriveInput) -> syn::Result<bool> {
    let mut is_scan = false;
    for attr in &input.attrs {
        if !attr.path().is_ident("decode") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("scan") {
                is_scan = true;
                Ok(())
            } else {
                Err(meta.error("unknown struct attribute, expected `scan`"))
            }
        })?;
    }
    Ok(is_scan)
}

/// Parse `#[decode(tag = "spec", ...)]` entries on a field.
fn parse_field_tags(field: &Field) -> syn::Result<Vec<(String, LitStr)>> {
    let mut tags: Vec<(String, LitStr)> = Vec::new();
    for attr in &field.attrs {
        if !attr.path().is_ident("decode") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            let tag = meta
                .path
                .get_ident()
                .ok_or_else(|| meta.error("expected a tag name such as `kv`"))?
                .to_string();
            let spec: LitStr = meta.value()?.parse()?;
            if tags.iter().any(|(existing, _)| *existing == tag) {
                return Err(meta.error(format!("duplicate `{tag}` tag")));
            }
            tags.push((tag, spec));
            Ok(())
        })?;
    }
    Ok(tags)
}
