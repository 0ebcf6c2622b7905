use super::Orm;
use crate::builder::{UpdateBuilder, WhereBuilder};
use crate::context::RequestContext;
use crate::filter::{Filter, where_from};
use crate::projection::UpdateProjection;
use crate::record::Record;
use crate::sql::Statement;
use crate::value::ToValue;

impl Orm {
    /// UPDATE over the `Some` fields of `patch`, or `None` when nothing is set.
    fn patch_builder<R: Record>(&self, table: &str, patch: &R) -> Option<UpdateBuilder> {
        let projection = UpdateProjection::of(patch);
        if !projection.assigned {
            tracing::debug!(target: "ormx", record = R::TYPE_NAME, "patch has no assigned field, skipped");
            return None;
        }
        let table = self.table_for::<R>(table);
        Some(UpdateBuilder::from_projection(&table, projection))
    }

    /// Patch the row with primary key `id`.
    ///
    /// Returns `None` when `patch` sets no field; no statement must run then.
    pub fn patch_by_id<R: Record>(
        &self,
        ctx: &RequestContext,
        table: &str,
        id: impl ToValue,
        patch: &R,
    ) -> Option<Statement> {
        self.patch_where(ctx, table, patch, Filter::from_value(id))
    }

    /// Patch every row matching `filter`.
    ///
    /// Returns `None` when `patch` sets no field; no statement must run then.
    pub fn patch_where<R: Record>(
        &self,
        ctx: &RequestContext,
        table: &str,
        patch: &R,
        filter: impl Into<Filter>,
    ) -> Option<Statement> {
        let mut builder = self.patch_builder(table, patch)?;
        let mut predicates = Vec::new();
        where_from(&mut predicates, &filter.into(), &self.config.primary_key);
        builder.push_predicates(predicates);
        Some(self.finish("patch", ctx, &mut builder))
    }
}
