//! Derives a `Debug` impl that prints the error's `Display` message followed
//! by its capture location and the chain of `source()` causes, so that a
//! bare `{:?}` in a log line reads like a stack trace.
//!
//! Place above `#[derive(Snafu)]`; snafu provides `Display`/`Error`, this
//! macro provides `Debug` (left undefined by a bare `#[derive(Snafu)]`) plus
//! a `location()` accessor for any variant carrying a `#[snafu(implicit)]
//! location: Location` field.

use proc_macro::TokenStream;
use quote::quote;
use syn::Data;
use syn::DeriveInput;
use syn::Fields;
use syn::parse_macro_input;

#[proc_macro_attribute]
pub fn stack_trace_debug(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let data_enum = match &input.data {
        Data::Enum(data_enum) => data_enum,
        _ => {
            return syn::Error::new_spanned(&input, "stack_trace_debug only supports enums")
                .to_compile_error()
                .into();
        }
    };

    let location_arms: Vec<_> = data_enum
        .variants
        .iter()
        .map(|variant| {
            let variant_ident = &variant.ident;
            match &variant.fields {
                Fields::Named(fields) => {
                    let has_location = fields
                        .named
                        .iter()
                        .any(|f| f.ident.as_ref().is_some_and(|i| i == "location"));
                    if has_location {
                        quote! { #name::#variant_ident { location, .. } => Some(*location), }
                    } else {
                        quote! { #name::#variant_ident { .. } => None, }
                    }
                }
                Fields::Unnamed(_) => quote! { #name::#variant_ident(..) => None, },
                Fields::Unit => quote! { #name::#variant_ident => None, },
            }
        })
        .collect();

    let expanded = quote! {
        #input

        impl #impl_generics #name #ty_generics #where_clause {
            /// Returns the call-site location captured for this variant, if any.
            pub fn location(&self) -> Option<snafu::Location> {
                match self {
                    #(#location_arms)*
                }
            }
        }

        impl #impl_generics std::fmt::Debug for #name #ty_generics #where_clause {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{self}")?;
                if let Some(location) = self.location() {
                    write!(f, "\n  at {location}")?;
                }
                let mut source = std::error::Error::source(self);
                while let Some(err) = source {
                    write!(f, "\nCaused by:\n  {err}")?;
                    source = err.source();
                }
                Ok(())
            }
        }
    };

    expanded.into()
}
