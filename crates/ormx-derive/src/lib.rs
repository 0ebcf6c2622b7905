//! Derive macros for ormx
//!
//! Provides `#[derive(Record)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod common;
mod record;

/// Derive `ormx::Record` (and `ormx::ToTable`) for a struct.
///
/// # Example
///
/// ```ignore
/// use ormx::Record;
///
/// #[derive(Record)]
/// #[orm(table = "users")]
/// pub struct User {
///     #[orm(db = "id")]
///     pub id: i64,
///     #[orm(db = "name,insert")]
///     pub name: String,
///     #[orm(db = "email", op = "like")]
///     pub email: Option<String>,
/// }
/// ```
///
/// # Attributes
///
/// - `#[orm(table = "name")]` - Explicit table name, used without the configured prefix
/// - `#[orm(db = "column,option:value,...")]` - Column tag; `-` excludes the field,
///   an empty column falls back to the field name
/// - `#[orm(op = "gte")]` - Comparison used when the struct is a filter
///   (`e|ne|gt|gte|lt|lte|in|notin|like|notlike`)
///
/// Private fields, `-` fields, function fields and channel fields are never
/// mapped, and their types need not implement `ToValue`. A field is nullable
/// when its type is `Option<T>`, also behind `Box`, `Rc`, `Arc` or a reference.
#[proc_macro_derive(Record, attributes(orm))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
