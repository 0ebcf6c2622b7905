//! Filter sources and their dispatch to predicates.
//!
//! A filter arrives in one of four shapes:
//!
//! - an ordered key/value list ([`KVs`]), each entry carrying its own operator tag;
//! - a record, whose populated fields become predicates with their `op` tags;
//! - a list of ids, matched with `IN` on the primary key;
//! - a single id, matched with `=` on the primary key.

use uuid::Uuid;

use crate::condition::{Predicate, append_predicate};
use crate::projection::where_from_struct;
use crate::record::{Record, RecordView};
use crate::value::{ToValue, Value};

/// One filter entry: column, value and operator tag.
#[derive(Debug, Clone, PartialEq)]
pub struct KV {
    pub key: String,
    pub value: Value,
    /// Operator tag, `""` when the value's shape decides.
    pub extra: String,
}

impl KV {
    pub fn new(key: impl Into<String>, value: impl ToValue) -> Self {
        Self::with_op(key, value, "")
    }

    pub fn with_op(key: impl Into<String>, value: impl ToValue, op: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.to_value(),
            extra: op.into(),
        }
    }
}

/// Ordered filter list.
pub type KVs = Vec<KV>;

/// Append one entry per map item: `in` for sequence values, `e` for the rest.
pub fn kvs_from_map<K, V>(mut dst: KVs, map: impl IntoIterator<Item = (K, V)>) -> KVs
where
    K: Into<String>,
    V: ToValue,
{
    for (key, value) in map {
        let value = value.to_value();
        let op = if value.kind().is_sequence() { "in" } else { "e" };
        dst.push(KV::with_op(key, value, op));
    }
    dst
}

/// The shapes a filter can take.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    KeyValues(KVs),
    Struct(RecordView),
    Ids(Vec<Value>),
    Id(Value),
}

impl Default for Filter {
    fn default() -> Self {
        Filter::KeyValues(KVs::new())
    }
}

impl Filter {
    pub fn from_record<R: Record>(record: &R) -> Self {
        Filter::Struct(RecordView::of(record))
    }

    /// Ids from any value: sequences become [`Filter::Ids`], the rest [`Filter::Id`].
    pub fn from_value(value: impl ToValue) -> Self {
        match value.to_value() {
            Value::List(ids) => Filter::Ids(ids),
            id => Filter::Id(id),
        }
    }

    /// Derive the predicates of this filter.
    pub fn predicates(&self, primary_key: &str) -> Vec<Predicate> {
        let mut dst = Vec::new();
        where_from(&mut dst, self, primary_key);
        dst
    }
}

/// Append the predicates of `filter` to `dst`.
pub fn where_from(dst: &mut Vec<Predicate>, filter: &Filter, primary_key: &str) {
    match filter {
        Filter::KeyValues(kvs) => where_from_kvs(dst, kvs),
        Filter::Struct(view) => where_from_struct(dst, view),
        Filter::Ids(ids) => where_from_ids(dst, ids, primary_key),
        Filter::Id(id) => where_from_id(dst, id, primary_key),
    }
}

/// One predicate per entry, each with its own operator tag.
pub fn where_from_kvs(dst: &mut Vec<Predicate>, filter: &[KV]) {
    for kv in filter {
        append_predicate(dst, &kv.key, kv.value.clone(), &kv.extra);
    }
}

pub fn where_from_ids(dst: &mut Vec<Predicate>, ids: &[Value], primary_key: &str) {
    dst.push(Predicate::in_list(primary_key, ids.to_vec()));
}

pub fn where_from_id(dst: &mut Vec<Predicate>, id: &Value, primary_key: &str) {
    dst.push(Predicate::eq(primary_key, id.clone()));
}

impl From<KVs> for Filter {
    fn from(kvs: KVs) -> Self {
        Filter::KeyValues(kvs)
    }
}

impl From<KV> for Filter {
    fn from(kv: KV) -> Self {
        Filter::KeyValues(vec![kv])
    }
}

impl From<RecordView> for Filter {
    fn from(view: RecordView) -> Self {
        Filter::Struct(view)
    }
}

impl From<Value> for Filter {
    fn from(value: Value) -> Self {
        Filter::from_value(value)
    }
}

macro_rules! id_filter {
    ($($t:ty),+ $(,)?) => {
        $(
            impl From<$t> for Filter {
                fn from(id: $t) -> Self {
                    Filter::Id(id.to_value())
                }
            }

            impl From<Vec<$t>> for Filter {
                fn from(ids: Vec<$t>) -> Self {
                    Filter::Ids(ids.iter().map(ToValue::to_value).collect())
                }
            }

            impl From<&[$t]> for Filter {
                fn from(ids: &[$t]) -> Self {
                    Filter::Ids(ids.iter().map(ToValue::to_value).collect())
                }
            }
        )+
    };
}

id_filter!(i16, i32, i64, u16, u32, u64, String, &str, Uuid);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Comparison;
    use crate::record::testing::{UserAccount, UserFilter};
    use std::collections::BTreeMap;

    #[test]
    fn test_scalar_id_is_equality_on_primary_key() {
        let preds = Filter::from(7i64).predicates("id");
        assert_eq!(preds, vec![Predicate::eq("id", Value::Int(7))]);
    }

    #[test]
    fn test_id_list_is_one_in() {
        let preds = Filter::from(vec![1i64, 2, 3]).predicates("uid");
        assert_eq!(preds.len(), 1);
        assert_eq!(
            preds[0],
            Predicate::in_list("uid", vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
    }

    #[test]
    fn test_from_value_dispatches_on_shape() {
        assert!(matches!(Filter::from_value(vec!["a", "b"]), Filter::Ids(ids) if ids.len() == 2));
        assert!(matches!(Filter::from_value("a"), Filter::Id(Value::String(_))));
        assert!(matches!(Filter::from(Value::List(vec![])), Filter::Ids(ids) if ids.is_empty()));
    }

    #[test]
    fn test_kvs_use_their_own_operators() {
        let kvs: KVs = vec![
            KV::new("status", "active"),
            KV::with_op("age", 18, "gte"),
            KV::with_op("role", vec![1, 2], "notin"),
            KV::new("team", vec![4, 5]),
        ];
        let preds = Filter::from(kvs).predicates("id");
        assert_eq!(preds.len(), 4);
        assert!(matches!(&preds[1], Predicate::Compare { op: Comparison::Gte, .. }));
        assert!(matches!(&preds[2], Predicate::NotIn { values, .. } if values.len() == 2));
        assert!(matches!(&preds[3], Predicate::In { .. }));
    }

    #[test]
    fn test_unknown_kv_operator_is_skipped() {
        let kvs = vec![KV::with_op("age", 1, "around"), KV::new("name", "x")];
        assert_eq!(Filter::from(kvs).predicates("id").len(), 1);
    }

    #[test]
    fn test_kvs_from_map_tags_by_shape() {
        let mut map = BTreeMap::new();
        map.insert("ids", Value::List(vec![Value::Int(1)]));
        map.insert("name", Value::String("bob".into()));
        let kvs = kvs_from_map(KVs::new(), map);
        assert_eq!(kvs[0].key, "ids");
        assert_eq!(kvs[0].extra, "in");
        assert_eq!(kvs[1].extra, "e");
    }

    #[test]
    fn test_struct_filter_skips_absent_fields() {
        let filter = UserFilter {
            name: Some("bob".into()),
            ..Default::default()
        };
        let preds = Filter::from_record(&filter).predicates("id");
        assert_eq!(preds, vec![Predicate::eq("name", Value::String("bob".into()))]);
    }

    #[test]
    fn test_zero_struct_filter_yields_nothing() {
        assert!(Filter::from_record(&UserFilter::default()).predicates("id").is_empty());
        assert!(Filter::from_record(&UserAccount::zero()).predicates("id").is_empty());
    }

    #[test]
    fn test_default_filter_is_empty() {
        assert!(Filter::default().predicates("id").is_empty());
    }
}
