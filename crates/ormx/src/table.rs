//! Table name resolution.
//!
//! A name is derived from the shape of whatever the caller hands in:
//!
//! 1. a record type with an explicit name (`#[orm(table = "...")]`) uses it
//!    verbatim, without the configured prefix;
//! 2. a string is used as is;
//! 3. a record type without an explicit name uses its type name in snake_case;
//! 4. a sequence (or `Option`) of records resolves like its element type;
//! 5. anything else is formatted with `Display`.
//!
//! Every path except the first prepends the prefix unless the name already
//! starts with it, so resolving a resolved name again is a no-op.

use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

use heck::ToSnakeCase;

use crate::record::Record;

/// What a value contributes to table name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource<'a> {
    /// Explicit name; never prefixed.
    Named(String),
    Str(Cow<'a, str>),
    /// Declared record type name.
    Struct(&'static str),
    Other(String),
}

/// Anything a table name can be derived from.
///
/// `#[derive(Record)]` implements this for the record type itself.
pub trait ToTable {
    fn table_source(&self) -> TableSource<'_>;
}

/// Table source of a record type, without needing an instance.
pub fn record_source<R: Record>() -> TableSource<'static> {
    match R::table() {
        Some(name) => TableSource::Named(name),
        None => TableSource::Struct(R::TYPE_NAME),
    }
}

/// Resolve the table name of `d` under `prefix`.
pub fn table_name<T: ToTable + ?Sized>(d: &T, prefix: &str) -> String {
    resolve_source(d.table_source(), prefix)
}

/// Resolve the table name of record type `R` under `prefix`.
pub fn record_table<R: Record>(prefix: &str) -> String {
    resolve_source(record_source::<R>(), prefix)
}

pub fn resolve_source(source: TableSource<'_>, prefix: &str) -> String {
    let name = match source {
        TableSource::Named(name) => return name,
        TableSource::Str(s) => s.into_owned(),
        TableSource::Struct(type_name) => type_name.to_snake_case(),
        TableSource::Other(s) => s,
    };
    with_prefix(name, prefix)
}

fn with_prefix(name: String, prefix: &str) -> String {
    if name.starts_with(prefix) {
        name
    } else {
        format!("{prefix}{name}")
    }
}

impl ToTable for str {
    fn table_source(&self) -> TableSource<'_> {
        TableSource::Str(Cow::Borrowed(self))
    }
}

impl ToTable for String {
    fn table_source(&self) -> TableSource<'_> {
        TableSource::Str(Cow::Borrowed(self))
    }
}

impl ToTable for Cow<'_, str> {
    fn table_source(&self) -> TableSource<'_> {
        TableSource::Str(Cow::Borrowed(self))
    }
}

macro_rules! forward_to_table {
    ($($ptr:ty),+ $(,)?) => {
        $(impl<T: ToTable + ?Sized> ToTable for $ptr {
            fn table_source(&self) -> TableSource<'_> {
                (**self).table_source()
            }
        })+
    };
}

forward_to_table!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);

// Element-type resolution: a collection of records names the element's table,
// whether or not it holds any element.
impl<T: Record> ToTable for Option<T> {
    fn table_source(&self) -> TableSource<'_> {
        record_source::<T>()
    }
}

impl<T: Record> ToTable for [T] {
    fn table_source(&self) -> TableSource<'_> {
        record_source::<T>()
    }
}

impl<T: Record, const N: usize> ToTable for [T; N] {
    fn table_source(&self) -> TableSource<'_> {
        record_source::<T>()
    }
}

impl<T: Record> ToTable for Vec<T> {
    fn table_source(&self) -> TableSource<'_> {
        record_source::<T>()
    }
}

macro_rules! display_to_table {
    ($($t:ty),+ $(,)?) => {
        $(impl ToTable for $t {
            fn table_source(&self) -> TableSource<'_> {
                TableSource::Other(self.to_string())
            }
        })+
    };
}

display_to_table!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, char);
