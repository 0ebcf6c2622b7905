//! Attribute parsing for the Record derive macro.
//!
//! Struct level: `#[orm(table = "...")]`.
//! Field level: `#[orm(db = "...", op = "...")]`.

use syn::{DeriveInput, LitStr, Result};

/// Operator tags accepted by `#[orm(op = "...")]`.
const OPERATORS: [&str; 11] = [
    "", "e", "ne", "gt", "gte", "lt", "lte", "in", "notin", "like", "notlike",
];

/// Parsed field-level attributes.
#[derive(Default)]
pub(super) struct FieldAttr {
    /// Raw `db` tag. Missing means the column defaults to the field name.
    pub db: String,
    pub op: String,
}

/// Extract the explicit table name from `#[orm(table = "...")]`, if any.
pub(super) fn get_table_name(input: &DeriveInput) -> Result<Option<String>> {
    let mut table = None;
    for attr in &input.attrs {
        if !attr.path().is_ident("orm") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("table") {
                let value: LitStr = meta.value()?.parse()?;
                table = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported struct attribute, expected `table = \"...\"`"))
            }
        })?;
    }
    Ok(table)
}

/// Parse every `#[orm(...)]` attribute on a field.
pub(super) fn get_field_attr(field: &syn::Field) -> Result<FieldAttr> {
    let mut parsed = FieldAttr::default();
    for attr in &field.attrs {
        if !attr.path().is_ident("orm") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("db") {
                let value: LitStr = meta.value()?.parse()?;
                parsed.db = value.value();
                Ok(())
            } else if meta.path.is_ident("op") {
                let value: LitStr = meta.value()?.parse()?;
                if !OPERATORS.contains(&value.value().as_str()) {
                    return Err(syn::Error::new_spanned(
                        &value,
                        format!(
                            "invalid operator tag '{}', expected one of e|ne|gt|gte|lt|lte|in|notin|like|notlike",
                            value.value()
                        ),
                    ));
                }
                parsed.op = value.value();
                Ok(())
            } else {
                Err(meta.error("unsupported field attribute, expected `db` or `op`"))
            }
        })?;
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn first_field(input: &DeriveInput) -> &syn::Field {
        let syn::Data::Struct(data) = &input.data else {
            panic!("expected struct");
        };
        data.fields.iter().next().expect("one field")
    }

    #[test]
    fn test_table_name() {
        let input: DeriveInput = parse_quote! {
            #[orm(table = "audit_log")]
            struct Audit { id: i64 }
        };
        assert_eq!(get_table_name(&input).unwrap().as_deref(), Some("audit_log"));

        let input: DeriveInput = parse_quote! {
            #[derive(Debug)]
            struct Audit { id: i64 }
        };
        assert_eq!(get_table_name(&input).unwrap(), None);
    }

    #[test]
    fn test_field_attr() {
        let input: DeriveInput = parse_quote! {
            struct Q {
                #[orm(db = "created_at,insert,type:timestamp", op = "gte")]
                since: Option<i64>,
            }
        };
        let attr = get_field_attr(first_field(&input)).unwrap();
        assert_eq!(attr.db, "created_at,insert,type:timestamp");
        assert_eq!(attr.op, "gte");
    }

    #[test]
    fn test_field_without_attr() {
        let input: DeriveInput = parse_quote! {
            struct Q { name: String }
        };
        let attr = get_field_attr(first_field(&input)).unwrap();
        assert_eq!(attr.db, "");
        assert_eq!(attr.op, "");
    }

    #[test]
    fn test_invalid_operator_is_rejected() {
        let input: DeriveInput = parse_quote! {
            struct Q {
                #[orm(db = "age", op = "between")]
                age: i64,
            }
        };
        let err = get_field_attr(first_field(&input)).err().unwrap();
        assert!(err.to_string().contains("invalid operator tag 'between'"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let input: DeriveInput = parse_quote! {
            struct Q {
                #[orm(column = "age")]
                age: i64,
            }
        };
        assert!(get_field_attr(first_field(&input)).is_err());
    }
}
