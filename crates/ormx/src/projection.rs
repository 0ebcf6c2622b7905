//! Record projections: filter predicates, SELECT columns, INSERT rows and
//! UPDATE assignments.

use crate::condition::{Predicate, append_predicate};
use crate::error::{OrmError, OrmResult};
use crate::field::resolve;
use crate::record::{FieldMeta, Record, RecordView};
use crate::table::record_table;
use crate::value::Value;

/// Value conversion requested by a field's `type` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Conversion {
    #[default]
    None,
    /// Epoch seconds (or a finer unit) to a timestamp.
    Timestamp,
}

impl Conversion {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "timestamp" => Conversion::Timestamp,
            _ => Conversion::None,
        }
    }

    /// Convert `value`, handing it back untouched when conversion fails.
    pub fn apply(self, value: Value) -> Value {
        match self {
            Conversion::None => value,
            Conversion::Timestamp => value.as_timestamp().map_or(value, Value::Timestamp),
        }
    }
}

/// Append one predicate per populated field of `view`.
///
/// `None` fields are skipped and a record that is entirely zero contributes
/// nothing at all. Each field uses its own `op` tag.
pub fn where_from_struct(dst: &mut Vec<Predicate>, view: &RecordView) {
    if view.is_zero() {
        return;
    }
    for (meta, value) in view.iter() {
        if value.is_null() {
            continue;
        }
        let Some(field) = resolve(meta) else {
            continue;
        };
        append_predicate(dst, &field.column, value.clone(), meta.op);
    }
}

fn is_unselected(options: &crate::options::OptionMap) -> bool {
    matches!(options.get("select").map(String::as_str), Some("-" | "false"))
}

/// SELECT column list of a field table. Empty when nothing is selectable.
pub fn select_columns(fields: &[FieldMeta]) -> Vec<String> {
    fields
        .iter()
        .filter_map(resolve)
        .filter(|field| !is_unselected(&field.option_map()))
        .map(|field| field.column)
        .collect()
}

/// `table.column` names of record type `R`.
///
/// With a non-empty `option`, only fields carrying that option key are listed.
pub fn column_names_with_option<R: Record>(prefix: &str, option: &str) -> Vec<String> {
    let table = record_table::<R>(prefix);
    R::FIELDS
        .iter()
        .filter_map(resolve)
        .filter(|field| option.is_empty() || field.option_map().contains_key(option))
        .map(|field| format!("{table}.{}", field.column))
        .collect()
}

/// Column list and value rows for an INSERT.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertProjection {
    pub type_name: &'static str,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl InsertProjection {
    /// Project `records`, taking the columns from the first record's type.
    pub fn of<R: Record>(records: &[R]) -> OrmResult<Self> {
        let views: Vec<RecordView> = records.iter().map(RecordView::of).collect();
        Self::from_views(&views)
    }

    /// Project record snapshots, taking the columns from the first one.
    ///
    /// Only fields with the `insert` option take part. Records that are
    /// entirely zero are skipped.
    pub fn from_views(views: &[RecordView]) -> OrmResult<Self> {
        let first = views.first().ok_or(OrmError::NoData)?;
        let fields = first.fields();

        // (field index, conversion) of every insert column.
        let mut columns = Vec::new();
        let mut picks = Vec::new();
        for (idx, meta) in fields.iter().enumerate() {
            let Some(field) = resolve(meta) else {
                continue;
            };
            let options = field.option_map();
            if !options.contains_key("insert") {
                continue;
            }
            let conversion = options
                .get("type")
                .map_or(Conversion::None, |t| Conversion::from_tag(t));
            columns.push(field.column);
            picks.push((idx, conversion));
        }

        if columns.is_empty() {
            return Err(OrmError::NoInsertField(first.type_name().to_string()));
        }

        let mut rows = Vec::with_capacity(views.len());
        for view in views {
            if view.is_zero() {
                continue;
            }
            let values = view.values();
            let row = picks
                .iter()
                .map(|&(idx, conversion)| {
                    let value = values.get(idx).cloned().unwrap_or(Value::Null);
                    conversion.apply(value)
                })
                .collect();
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(OrmError::NoData);
        }

        Ok(Self {
            type_name: first.type_name(),
            columns,
            rows,
        })
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Append `column` with the same `value` on every row.
    ///
    /// No-op when the column is already present.
    pub fn push_constant(&mut self, column: &str, value: Value) {
        if self.has_column(column) {
            return;
        }
        self.columns.push(column.to_string());
        for row in &mut self.rows {
            row.push(value.clone());
        }
    }
}

/// Assignments for an UPDATE built from a patch record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateProjection {
    pub assignments: Vec<(String, Value)>,
    /// `false` when no field is set; no statement may be issued then.
    pub assigned: bool,
}

impl UpdateProjection {
    pub fn of<R: Record>(patch: &R) -> Self {
        Self::from_view(&RecordView::of(patch))
    }

    /// Only `Option` fields holding `Some` are assigned.
    pub fn from_view(view: &RecordView) -> Self {
        let mut assignments = Vec::new();
        for (meta, value) in view.iter() {
            if !meta.nullable || value.is_null() {
                continue;
            }
            let Some(field) = resolve(meta) else {
                continue;
            };
            let conversion = field
                .option_map()
                .get("type")
                .map_or(Conversion::None, |t| Conversion::from_tag(t));
            assignments.push((field.column, conversion.apply(value.clone())));
        }
        Self {
            assigned: !assignments.is_empty(),
            assignments,
        }
    }
}
