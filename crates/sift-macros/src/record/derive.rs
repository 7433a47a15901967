//! Implementation of the `#[derive(Record)]` macro.
//!
//! This macro generates a typed field descriptor constant per field and an
//! implementation of the `Record` trait.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{ext::IdentExt, spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::parse_record_attrs;

/// Main implementation of the Record derive macro.
pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(Error::new(
            input.generics.span(),
            "Record cannot be derived for generic structs",
        ));
    }

    // Ensure we have a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Record can only be derived for structs",
            ))
        }
    };

    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut field_names: Vec<String> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let record_attrs = parse_record_attrs(&field.attrs)?;

        // Skip if marked with #[record(skip)]
        if record_attrs.skip {
            continue;
        }

        // Determine the canonical field name
        let query_name = record_attrs
            .rename
            .unwrap_or_else(|| field_name.unraw().to_string());

        if field_names.contains(&query_name) {
            return Err(Error::new(
                field.span(),
                format!("duplicate record field name: '{}'", query_name),
            ));
        }

        // Generate constant name (SCREAMING_SNAKE_CASE)
        let const_name = format_ident!("{}", to_screaming_snake_case(&query_name));
        let field_ty = &field.ty;
        let doc = format!("Field descriptor for `{}`.", query_name);

        field_constants.push(quote! {
            #[doc = #doc]
            pub const #const_name: ::sift::Field<#struct_name, #field_ty> = {
                fn get(record: &#struct_name) -> &#field_ty {
                    &record.#field_name
                }
                ::sift::Field::new(#query_name, get)
            };
        });

        field_names.push(query_name);
    }

    let expanded = quote! {
        impl #struct_name {
            #(#field_constants)*
        }

        impl ::sift::Record for #struct_name {
            const FIELDS: &'static [&'static str] = &[#(#field_names),*];
        }
    };

    Ok(expanded)
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' || c == ' ' || c == '.' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = true;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screaming_snake_case() {
        assert_eq!(to_screaming_snake_case("name"), "NAME");
        assert_eq!(to_screaming_snake_case("created_at"), "CREATED_AT");
        assert_eq!(to_screaming_snake_case("createdAt"), "CREATED_AT");
        assert_eq!(to_screaming_snake_case("my-field"), "MY_FIELD");
        assert_eq!(to_screaming_snake_case("XMLParser"), "XMLPARSER");
    }

    #[test]
    fn test_generates_descriptors() {
        let input: DeriveInput = syn::parse_quote! {
            struct User {
                name: String,
                #[record(rename = "years")]
                age: u32,
                #[record(skip)]
                secret: String,
            }
        };

        let output = record_derive_impl(input).unwrap().to_string();
        assert!(output.contains("pub const NAME"));
        assert!(output.contains("pub const YEARS"));
        assert!(!output.contains("SECRET"));
        assert!(output.contains("Record for User"));
    }

    #[test]
    fn test_raw_identifier_field() {
        let input: DeriveInput = syn::parse_quote! {
            struct Item {
                r#type: String,
            }
        };

        let output = record_derive_impl(input).unwrap().to_string();
        assert!(output.contains("pub const TYPE"));
        assert!(output.contains("\"type\""));
    }

    #[test]
    fn test_rejects_enum() {
        let input: DeriveInput = syn::parse_quote! {
            enum Status { Open, Closed }
        };

        let err = record_derive_impl(input).unwrap_err();
        assert!(err.to_string().contains("only be derived for structs"));
    }

    #[test]
    fn test_rejects_tuple_struct() {
        let input: DeriveInput = syn::parse_quote! {
            struct Pair(u32, u32);
        };

        assert!(record_derive_impl(input).is_err());
    }

    #[test]
    fn test_rejects_generic_struct() {
        let input: DeriveInput = syn::parse_quote! {
            struct Wrapper<T> { inner: T }
        };

        let err = record_derive_impl(input).unwrap_err();
        assert!(err.to_string().contains("generic"));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let input: DeriveInput = syn::parse_quote! {
            struct User {
                name: String,
                #[record(rename = "name")]
                alias: String,
            }
        };

        let err = record_derive_impl(input).unwrap_err();
        assert!(err.to_string().contains("duplicate record field name"));
    }
}
