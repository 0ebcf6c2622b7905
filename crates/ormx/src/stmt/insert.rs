use super::{Orm, log_statement};
use crate::builder::InsertBuilder;
use crate::builder::StatementBuilder;
use crate::context::RequestContext;
use crate::error::OrmResult;
use crate::namespace::inject_insert;
use crate::projection::InsertProjection;
use crate::record::Record;
use crate::sql::Statement;

impl Orm {
    fn insert_builder<R: Record>(
        &self,
        ctx: &RequestContext,
        table: &str,
        data: &[R],
    ) -> OrmResult<InsertBuilder> {
        let table = self.table_for::<R>(table);
        let mut projection = InsertProjection::of(data)?;
        inject_insert(&mut projection, ctx, &self.config);
        Ok(InsertBuilder::from_projection(&table, projection))
    }

    /// Insert one record, returning its primary key.
    pub fn insert_one<R: Record>(
        &self,
        ctx: &RequestContext,
        table: &str,
        data: &R,
    ) -> OrmResult<Statement> {
        let mut builder = self.insert_builder(ctx, table, std::slice::from_ref(data))?;
        builder.returning(&[self.config.primary_key.as_str()]);
        let stmt = builder.build();
        log_statement("insert_one", builder.table(), &stmt);
        Ok(stmt)
    }

    /// Insert every non-zero record in one statement.
    ///
    /// Columns come from the first record; records that are entirely zero
    /// are skipped.
    pub fn insert_many<R: Record>(
        &self,
        ctx: &RequestContext,
        table: &str,
        data: &[R],
    ) -> OrmResult<Statement> {
        let builder = self.insert_builder(ctx, table, data)?;
        let stmt = builder.build();
        log_statement("insert_many", builder.table(), &stmt);
        Ok(stmt)
    }

    /// Like [`Orm::insert_many`], skipping rows that violate a unique constraint.
    pub fn insert_ignore<R: Record>(
        &self,
        ctx: &RequestContext,
        table: &str,
        data: &[R],
    ) -> OrmResult<Statement> {
        let mut builder = self.insert_builder(ctx, table, data)?;
        builder.on_conflict_do_nothing();
        let stmt = builder.build();
        log_statement("insert_ignore", builder.table(), &stmt);
        Ok(stmt)
    }
}
