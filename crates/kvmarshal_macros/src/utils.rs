//! Shared utilities for the derive macros.

use proc_macro2::TokenStream as TokenStream2;
use quote::ToTokens;
use syn::{punctuated::Punctuated, token::Comma, Data, DeriveInput, Field, Fields};

/// Validate that the input is a struct with named fields, returning the fields.
pub fn validate_struct_with_named_fields<'a>(
    input: &'a DeriveInput,
    macro_name: &str,
) -> syn::Result<&'a Punctuated<Field, Comma>> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(&fields.named),
            _ => Err(syn::Error::new_spanned(
                input,
                format!("{macro_name} derive only supports structs with named fields"),
            )),
        },
        _ => Err(syn::Error::new_spanned(
            input,
            format!("{macro_name} derive only supports structs"),
        )),
    }
}

/// Render a type as compact source text for descriptor tables.
///
/// `Option < Box < Logger > >` becomes `Option<Box<Logger>>`.
pub fn type_label(ty: &syn::Type) -> String {
    let tokens: TokenStream2 = ty.to_token_stream();
    tokens
        .to_string()
        .replace(" :: ", "::")
        .replace(":: ", "::")
        .replace(" < ", "<")
        .replace("< ", "<")
        .replace(" <", "<")
        .replace(" >", ">")
        .replace(" ,", ",")
        .replace("& ", "&")
}
