use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr};

struct Rule {
    ident: syn::Ident,
    field: String,
    message: String,
}

pub fn derive_validate(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let rules = match collect_rules(&input) {
        Ok(rules) => rules,
        Err(err) => return err.to_compile_error().into(),
    };

    let checks = rules.iter().map(|rule| {
        let ident = &rule.ident;
        let field = &rule.field;
        let message = &rule.message;
        quote! {
            if self.#ident.is_empty() {
                return ::core::result::Result::Err(
                    ::showcase::ValidationError::new(#field, #message),
                );
            }
        }
    });

    let expanded = quote! {
        impl ::showcase::Validate for #name {
            fn validate(&self) -> ::core::result::Result<(), ::showcase::ValidationError> {
                #(#checks)*
                ::core::result::Result::Ok(())
            }
        }
    };

    TokenStream::from(expanded)
}

fn collect_rules(input: &DeriveInput) -> syn::Result<Vec<Rule>> {
    let Data::Struct(data_struct) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Validate derive: only structs are supported",
        ));
    };
    let Fields::Named(fields) = &data_struct.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Validate derive: only structs with named fields are supported",
        ));
    };

    let mut rules = Vec::new();
    for field in &fields.named {
        let Some(ident) = field.ident.clone() else {
            continue;
        };

        for attr in field.attrs.iter().filter(|a| a.path().is_ident("validate")) {
            let mut non_empty = false;
            let mut message = None;
            let mut wire_name = None;

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("non_empty") {
                    non_empty = true;
                } else if meta.path.is_ident("message") {
                    let value: LitStr = meta.value()?.parse()?;
                    message = Some(value.value());
                } else if meta.path.is_ident("field") {
                    let value: LitStr = meta.value()?.parse()?;
                    wire_name = Some(value.value());
                } else {
                    return Err(meta.error("unsupported validate option"));
                }
                Ok(())
            })?;

            if !non_empty {
                continue;
            }

            let field_name = wire_name.unwrap_or_else(|| to_camel_case(&ident.to_string()));
            let message = message.unwrap_or_else(|| format!("{} is required", field_name));
            rules.push(Rule {
                ident: ident.clone(),
                field: field_name,
                message,
            });
        }
    }

    Ok(rules)
}

fn to_camel_case(s: &str) -> String {
    let mut result = String::new();
    let mut upper_next = false;
    for ch in s.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            result.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            result.push(ch);
        }
    }
    result
}
