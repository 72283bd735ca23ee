//! `ScanTarget` derive macro implementation.

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Main entry point for the `ScanTarget` derive macro.
///
/// Works on any type; the type must also implement `kvmarshal::Scan`.
pub fn derive_scan_target(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote! {
        impl #impl_generics ::kvmarshal::AsTarget for #name #ty_generics #where_clause {
            fn as_target(&mut self) -> ::kvmarshal::Target<'_> {
                ::kvmarshal::Target::Scan(self)
            }
        }
    }
    .into()
}
