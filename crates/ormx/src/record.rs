//! Per-type field metadata.
//!
//! `#[derive(Record)]` emits one static [`FieldMeta`] per struct field and a
//! `values()` accessor returning the field values in the same order. The
//! runtime never caches anything derived from this table: tags are parsed on
//! every call.
//!
//! ```ignore
//! use ormx::Record;
//!
//! #[derive(Record)]
//! #[orm(table = "users")]
//! pub struct User {
//!     #[orm(db = "id")]
//!     pub id: i64,
//!     #[orm(db = "name,insert")]
//!     pub name: String,
//!     #[orm(db = "created_at,insert,type:timestamp")]
//!     pub created_at: i64,
//! }
//! ```

use crate::value::Value;

/// Broad kind of a field's declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A value that can be turned into a SQL argument.
    Value,
    /// A function pointer or closure. Never mapped to a column.
    Func,
    /// A channel endpoint. Never mapped to a column.
    Chan,
}

/// Static metadata of one struct field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    /// Declared field name.
    pub name: &'static str,
    /// Raw `db` tag: `column[,option[:value]]...`.
    pub tag: &'static str,
    /// Raw operator tag used when the field takes part in a filter.
    pub op: &'static str,
    pub kind: FieldKind,
    /// `false` for private fields.
    pub exported: bool,
    /// The declared type is `Option<_>`.
    pub nullable: bool,
}

impl FieldMeta {
    /// Metadata for a public value field with the given tag.
    pub const fn new(name: &'static str, tag: &'static str) -> Self {
        Self {
            name,
            tag,
            op: "",
            kind: FieldKind::Value,
            exported: true,
            nullable: false,
        }
    }

    pub const fn with_op(mut self, op: &'static str) -> Self {
        self.op = op;
        self
    }

    pub const fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub const fn private(mut self) -> Self {
        self.exported = false;
        self
    }

    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// A struct whose fields map onto table columns.
///
/// Usually derived. Hand-written impls must keep `values()` aligned with
/// `FIELDS`, one entry per field. Function, channel, private and `-` fields
/// may report `Value::Null`; they never reach a column.
pub trait Record {
    /// Declared type name, used for table-name derivation.
    const TYPE_NAME: &'static str;

    /// Field metadata in declaration order.
    const FIELDS: &'static [FieldMeta];

    /// Explicit table name. Returned verbatim, without the configured prefix.
    fn table() -> Option<String> {
        None
    }

    /// Field values in declaration order.
    fn values(&self) -> Vec<Value>;

    /// Whether every field holds its zero value.
    ///
    /// An `Option` field is zero only when it is `None`: `Some(0)` and
    /// `Some(false)` are set values.
    fn is_zero(&self) -> bool {
        fields_are_zero(Self::FIELDS, &self.values())
    }
}

/// Zero test over a field table and its values.
///
/// Nullable fields are zero only when `Null`; other fields when their value
/// is the zero value of its kind.
pub fn fields_are_zero(fields: &[FieldMeta], values: &[Value]) -> bool {
    fields.iter().zip(values).all(|(meta, value)| {
        if meta.nullable {
            value.is_null()
        } else {
            value.is_zero()
        }
    })
}

/// Snapshot of one record instance: its field table and current values.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordView {
    type_name: &'static str,
    fields: &'static [FieldMeta],
    values: Vec<Value>,
    zero: bool,
}

impl RecordView {
    pub fn of<R: Record + ?Sized>(record: &R) -> Self {
        let values = record.values();
        debug_assert_eq!(values.len(), R::FIELDS.len(), "values() out of sync with FIELDS");
        Self {
            type_name: R::TYPE_NAME,
            fields: R::FIELDS,
            zero: record.is_zero(),
            values,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn fields(&self) -> &'static [FieldMeta] {
        self.fields
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Whether the whole record is its type's zero value.
    pub fn is_zero(&self) -> bool {
        self.zero
    }

    /// Pairs of field metadata and value.
    pub fn iter(&self) -> impl Iterator<Item = (&'static FieldMeta, &Value)> + '_ {
        self.fields.iter().zip(self.values.iter())
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn test_view_pairs_fields_with_values() {
        let view = RecordView::of(&UserAccount::sample());
        assert_eq!(view.type_name(), "UserAccount");
        let pairs: Vec<_> = view.iter().map(|(f, v)| (f.name, v.clone())).collect();
        assert_eq!(pairs[0], ("id", Value::Int(1)));
        assert_eq!(pairs[2], ("email", Value::String("alice@example.com".into())));
        assert!(!view.is_zero());
    }

    #[test]
    fn test_zero_record() {
        assert!(UserAccount::zero().is_zero());
        assert!(RecordView::of(&UserFilter::default()).is_zero());
        let filter = UserFilter {
            min_id: Some(0),
            ..Default::default()
        };
        assert!(!filter.is_zero());
        assert!(!RecordView::of(&filter).is_zero());
    }

    #[test]
    fn test_set_option_holding_zero_is_not_zero() {
        let fields = [
            FieldMeta::new("deleted", "deleted").nullable(),
            FieldMeta::new("retries", "retries"),
        ];
        assert!(!fields_are_zero(&fields, &[Value::Bool(false), Value::Int(0)]));
        assert!(!fields_are_zero(&fields, &[Value::String(String::new()), Value::Int(0)]));
        assert!(fields_are_zero(&fields, &[Value::Null, Value::Int(0)]));
        assert!(!fields_are_zero(&fields, &[Value::Null, Value::Int(3)]));
    }

    #[test]
    fn test_field_meta_builders() {
        let meta = FieldMeta::new("a", "b").with_op("gt").private().nullable();
        assert_eq!(meta.op, "gt");
        assert!(!meta.exported);
        assert!(meta.nullable);
        assert_eq!(meta.kind, FieldKind::Value);
    }
}
