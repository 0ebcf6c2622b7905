//! Column resolution for a single field.

use crate::options::{OptionMap, parse_options};
use crate::record::{FieldKind, FieldMeta};

/// A field resolved against its tag for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub column: String,
    /// Unparsed option string (everything after the first comma).
    pub options: &'static str,
    pub exported: bool,
}

impl FieldDescriptor {
    pub fn option_map(&self) -> OptionMap {
        parse_options(self.options)
    }
}

/// Resolve `meta` to a column.
///
/// Returns `None` for private fields, function/channel fields and tags whose
/// name segment is `-`. An empty name segment falls back to the declared field
/// name.
pub fn resolve(meta: &FieldMeta) -> Option<FieldDescriptor> {
    if !meta.exported || meta.kind != FieldKind::Value {
        return None;
    }
    let (name, rest) = meta.tag.split_once(',').unwrap_or((meta.tag, ""));
    let column = match name {
        "-" => return None,
        "" => meta.name,
        name => name,
    };
    Some(FieldDescriptor {
        name: meta.name,
        column: column.to_string(),
        options: rest,
        exported: meta.exported,
    })
}

/// Column name and raw options, or `("", "")` when the field is excluded.
pub fn column_of(meta: &FieldMeta) -> (String, &'static str) {
    resolve(meta).map_or((String::new(), ""), |d| (d.column, d.options))
}
