use proc_macro::TokenStream;

mod model;

/// Derive the field-accessor capability for a typed record.
///
/// The struct embeds exactly one `tablemap::binding::Record` (found by type
/// name, or marked `#[model(record)]`). Every other named field becomes an
/// attribute named after the field in upper camel case, unless marked
/// `#[model(skip)]` or renamed with `#[model(rename = "Name")]`.
#[proc_macro_derive(Model, attributes(model))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    model::derive_model(input.into()).into()
}
