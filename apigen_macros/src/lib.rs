//! Proc-macro companion for `apigen`.
//!
//! The generator itself parses source text with `syn` and never expands
//! macros, but annotated sources still have to compile on their own. Deriving
//! [`ApiArgs`] on a parameter struct registers the inert `apivalidator` field
//! attribute with rustc so the tags survive compilation untouched.

use proc_macro::TokenStream;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

/// Marker derive for request parameter structs.
///
/// Expands to nothing; its only job is declaring the `apivalidator`
/// attribute. The struct must have named fields, since the generator maps
/// every tag onto a field identifier.
#[proc_macro_derive(ApiArgs, attributes(apivalidator))]
pub fn derive_api_args(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match &input.data {
        Data::Struct(data) if matches!(data.fields, Fields::Named(_)) => TokenStream::new(),
        _ => {
            let err = syn::Error::new_spanned(
                &input.ident,
                "ApiArgs requires a struct with named fields",
            );
            TokenStream::from(err.to_compile_error())
        }
    }
}
