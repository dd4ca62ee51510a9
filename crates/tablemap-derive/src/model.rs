use convert_case::{Case, Casing};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Field, Fields, Ident, LitStr, Type};

// derive_model
pub fn derive_model(input: TokenStream) -> TokenStream {
    match expand(input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

///
/// FieldRole
///

enum FieldRole {
    Record,
    Skip,
    Attribute(String),
}

///
/// ModelAttr
///

#[derive(Default)]
struct ModelAttr {
    record: bool,
    skip: bool,
    rename: Option<LitStr>,
}

fn expand(input: TokenStream) -> Result<TokenStream, Error> {
    let input: DeriveInput = syn::parse2(input)?;

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            other => {
                return Err(Error::new_spanned(
                    other,
                    "Model can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(Error::new_spanned(
                ident,
                "Model can only be derived for structs with named fields",
            ));
        }
    };

    let mut record: Option<&Ident> = None;
    let mut attributes: Vec<(&Ident, String)> = Vec::new();

    for field in fields {
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };

        match classify(field)? {
            FieldRole::Record => {
                if record.is_some() {
                    return Err(Error::new_spanned(
                        field,
                        "Model structs embed exactly one Record",
                    ));
                }
                record = Some(field_ident);
            }
            FieldRole::Skip => {}
            FieldRole::Attribute(name) => attributes.push((field_ident, name)),
        }
    }

    let Some(record) = record else {
        return Err(Error::new_spanned(
            ident,
            "Model structs must embed a Record field (or mark one with #[model(record)])",
        ));
    };

    let names = attributes.iter().map(|(_, name)| name);

    let read_arms = attributes.iter().map(|(field, name)| {
        quote! {
            #name => Some(::tablemap::binding::FieldType::to_value(&self.#field)),
        }
    });

    let write_arms = attributes.iter().map(|(field, name)| {
        quote! {
            #name => ::tablemap::binding::write_exact(&mut self.#field, value),
        }
    });

    let bind_arms = attributes.iter().map(|(field, name)| {
        quote! {
            #name => {
                ::tablemap::binding::bind_coerced(&mut self.#field, value);
                true
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::tablemap::binding::FieldAccess for #ident #ty_generics #where_clause {
            fn attribute_names(&self) -> &'static [&'static str] {
                &[#(#names),*]
            }

            fn read_field(&self, attr: &str) -> Option<::tablemap::value::Value> {
                match attr {
                    #(#read_arms)*
                    _ => None,
                }
            }

            fn write_field(&mut self, attr: &str, value: &::tablemap::value::Value) -> bool {
                match attr {
                    #(#write_arms)*
                    _ => false,
                }
            }

            fn bind_field(&mut self, attr: &str, value: &::tablemap::value::Value) -> bool {
                match attr {
                    #(#bind_arms)*
                    _ => false,
                }
            }
        }

        impl #impl_generics ::tablemap::binding::Model for #ident #ty_generics #where_clause {
            fn record(&self) -> &::tablemap::binding::Record {
                &self.#record
            }

            fn record_mut(&mut self) -> &mut ::tablemap::binding::Record {
                &mut self.#record
            }

            fn host(&self) -> Option<&dyn ::tablemap::binding::FieldAccess> {
                Some(self)
            }

            fn host_mut(&mut self) -> Option<&mut dyn ::tablemap::binding::FieldAccess> {
                Some(self)
            }
        }
    })
}

fn classify(field: &Field) -> Result<FieldRole, Error> {
    let attr = parse_model_attr(field)?;

    if attr.record || (!attr.skip && attr.rename.is_none() && is_path_ident(&field.ty, "Record")) {
        return Ok(FieldRole::Record);
    }
    if attr.skip {
        return Ok(FieldRole::Skip);
    }

    let name = match attr.rename {
        Some(lit) => lit.value(),
        None => attribute_name(field),
    };

    Ok(FieldRole::Attribute(name))
}

fn parse_model_attr(field: &Field) -> Result<ModelAttr, Error> {
    let mut out = ModelAttr::default();

    for attr in field.attrs.iter().filter(|a| a.path().is_ident("model")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("record") {
                out.record = true;
            } else if meta.path.is_ident("skip") {
                out.skip = true;
            } else if meta.path.is_ident("rename") {
                out.rename = Some(meta.value()?.parse()?);
            } else {
                return Err(meta.error("expected `record`, `skip`, or `rename = \"...\"`"));
            }

            Ok(())
        })?;
    }

    if out.record && (out.skip || out.rename.is_some()) {
        return Err(Error::new_spanned(
            field,
            "#[model(record)] cannot be combined with skip or rename",
        ));
    }

    Ok(out)
}

// snake_case field → UpperCamel attribute, raw-identifier prefix dropped
fn attribute_name(field: &Field) -> String {
    field
        .ident
        .as_ref()
        .map(|ident| {
            let name = ident.to_string();
            name.strip_prefix("r#").unwrap_or(&name).to_case(Case::Pascal)
        })
        .unwrap_or_default()
}

fn is_path_ident(ty: &Type, ident: &str) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };

    path.path
        .segments
        .last()
        .is_some_and(|segment| segment.ident == ident)
}
