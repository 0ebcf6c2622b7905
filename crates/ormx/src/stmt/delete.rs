use super::Orm;
use crate::builder::{DeleteBuilder, WhereBuilder};
use crate::context::RequestContext;
use crate::filter::{KVs, where_from_ids, where_from_kvs};
use crate::sql::Statement;
use crate::value::ToValue;

impl Orm {
    /// Delete rows matching every entry of `filter`.
    ///
    /// An empty filter deletes every row in scope.
    pub fn delete_where(&self, ctx: &RequestContext, table: &str, filter: &KVs) -> Statement {
        if filter.is_empty() {
            tracing::warn!(target: "ormx", table, "delete without filter");
        }
        let mut builder = DeleteBuilder::new(table);
        let mut predicates = Vec::new();
        where_from_kvs(&mut predicates, filter);
        builder.push_predicates(predicates);
        self.finish("delete_where", ctx, &mut builder)
    }

    /// Delete rows by primary key. A scalar id is treated as a one-element list.
    pub fn delete_by_id(&self, ctx: &RequestContext, table: &str, ids: impl ToValue) -> Statement {
        let mut builder = DeleteBuilder::new(table);
        let mut predicates = Vec::new();
        where_from_ids(&mut predicates, &ids.to_value().into_list(), &self.config.primary_key);
        builder.push_predicates(predicates);
        self.finish("delete_by_id", ctx, &mut builder)
    }
}
