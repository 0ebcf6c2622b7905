//! Record derive macro implementation.

mod attrs;

use crate::common::syn_types::{is_channel_type, is_func_type, is_nullable_type};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Result};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let type_name = name.to_string();
    let table_name = attrs::get_table_name(&input)?;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Record can only be derived for structs",
            ));
        }
    };

    let mut metas = Vec::with_capacity(fields.len());
    let mut values = Vec::with_capacity(fields.len());

    for field in fields {
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };
        let field_name = field_ident.to_string();
        let attr = attrs::get_field_attr(field)?;
        let db = &attr.db;

        let mut meta = quote! { ::ormx::FieldMeta::new(#field_name, #db) };
        if !attr.op.is_empty() {
            let op = &attr.op;
            meta = quote! { #meta.with_op(#op) };
        }
        let private = matches!(field.vis, syn::Visibility::Inherited);
        if private {
            meta = quote! { #meta.private() };
        }
        if is_nullable_type(&field.ty) {
            meta = quote! { #meta.nullable() };
        }
        // Never mapped to a column, so the field type need not be `ToValue`.
        let excluded = private || db.split(',').next() == Some("-");

        if is_func_type(&field.ty) {
            metas.push(quote! { #meta.with_kind(::ormx::FieldKind::Func) });
            values.push(quote! { ::ormx::Value::Null });
        } else if is_channel_type(&field.ty) {
            metas.push(quote! { #meta.with_kind(::ormx::FieldKind::Chan) });
            values.push(quote! { ::ormx::Value::Null });
        } else if excluded {
            metas.push(meta);
            values.push(quote! { ::ormx::Value::Null });
        } else {
            metas.push(meta);
            values.push(quote! { ::ormx::ToValue::to_value(&self.#field_ident) });
        }
    }

    let table_fn = table_name.map(|table| {
        quote! {
            fn table() -> ::core::option::Option<::std::string::String> {
                ::core::option::Option::Some(::std::string::String::from(#table))
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::ormx::Record for #name #ty_generics #where_clause {
            const TYPE_NAME: &'static str = #type_name;

            const FIELDS: &'static [::ormx::FieldMeta] = &[#(#metas),*];

            #table_fn

            fn values(&self) -> ::std::vec::Vec<::ormx::Value> {
                ::std::vec![#(#values),*]
            }
        }

        impl #impl_generics ::ormx::ToTable for #name #ty_generics #where_clause {
            fn table_source(&self) -> ::ormx::TableSource<'_> {
                ::ormx::table::record_source::<Self>()
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_expand_emits_both_impls() {
        let input: DeriveInput = parse_quote! {
            #[orm(table = "accounts")]
            pub struct Account {
                #[orm(db = "id")]
                pub id: i64,
                #[orm(db = "email,insert")]
                pub email: Option<String>,
                secret: String,
                pub on_save: fn(i64),
            }
        };
        let out = expand(input).unwrap().to_string();
        assert!(out.contains(":: ormx :: Record for Account"));
        assert!(out.contains(":: ormx :: ToTable for Account"));
        assert!(out.contains("\"accounts\""));
        assert!(out.contains(". nullable ()"));
        assert!(out.contains(". private ()"));
        assert!(out.contains("FieldKind :: Func"));
    }

    #[test]
    fn test_excluded_fields_are_not_converted() {
        let input: DeriveInput = parse_quote! {
            pub struct Job {
                #[orm(db = "id")]
                pub id: i64,
                #[orm(db = "-")]
                pub scratch: HashMap<String, String>,
                cache: Vec<u8>,
            }
        };
        let out = expand(input).unwrap().to_string();
        assert!(out.contains("to_value (& self . id)"));
        assert!(!out.contains("self . scratch"));
        assert!(!out.contains("self . cache"));
    }

    #[test]
    fn test_wrapped_option_is_nullable() {
        let input: DeriveInput = parse_quote! {
            pub struct Patch {
                #[orm(db = "name")]
                pub name: Box<Option<String>>,
                #[orm(db = "age")]
                pub age: i32,
            }
        };
        let out = expand(input).unwrap().to_string();
        assert_eq!(out.matches(". nullable ()").count(), 1);
    }

    #[test]
    fn test_expand_without_table() {
        let input: DeriveInput = parse_quote! {
            pub struct UserAccount {
                #[orm(db = "name", op = "like")]
                pub name: Option<String>,
            }
        };
        let out = expand(input).unwrap().to_string();
        assert!(!out.contains("fn table ()"));
        assert!(out.contains(". with_op (\"like\")"));
    }

    #[test]
    fn test_rejects_tuple_struct() {
        let input: DeriveInput = parse_quote! {
            struct Pair(i64, i64);
        };
        assert!(expand(input).is_err());
    }

    #[test]
    fn test_rejects_enum() {
        let input: DeriveInput = parse_quote! {
            enum Status { Active }
        };
        assert!(expand(input).is_err());
    }
}
