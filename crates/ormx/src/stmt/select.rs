use super::Orm;
use crate::builder::{ColumnBuilder, SelectBuilder, WhereBuilder};
use crate::context::RequestContext;
use crate::filter::{Filter, KVs, where_from, where_from_kvs};
use crate::projection::select_columns;
use crate::record::Record;
use crate::sql::Statement;
use crate::value::ToValue;

/// `-col` sorts descending, anything else ascending. Empty keys are skipped.
fn order_clause(key: &str) -> Option<String> {
    match key.strip_prefix('-') {
        _ if key.is_empty() => None,
        Some(column) => Some(format!("{} DESC", column.trim_start_matches('-'))),
        None => Some(format!("{key} ASC")),
    }
}

impl Orm {
    /// SELECT of the selectable columns of `R` (`*` when there are none).
    pub fn select_builder<R: Record>(&self, table: &str) -> SelectBuilder {
        let table = self.table_for::<R>(table);
        let mut builder = SelectBuilder::new(&table);
        builder.select(&select_columns(R::FIELDS));
        builder
    }

    fn read_builder<R: Record>(&self, ctx: &RequestContext, table: &str) -> SelectBuilder {
        let mut builder = self.select_builder::<R>(table);
        builder.route(ctx.read_route());
        builder
    }

    fn filtered(&self, builder: &mut SelectBuilder, filter: &Filter) {
        let mut predicates = Vec::new();
        where_from(&mut predicates, filter, &self.config.primary_key);
        builder.push_predicates(predicates);
    }

    /// Read one row by primary key. A sequence of ids reads all of them.
    pub fn get_by_id<R: Record>(
        &self,
        ctx: &RequestContext,
        table: &str,
        id: impl ToValue,
    ) -> Statement {
        let mut builder = self.read_builder::<R>(ctx, table);
        self.filtered(&mut builder, &Filter::from_value(id));
        self.finish("get_by_id", ctx, &mut builder)
    }

    /// Read rows matching `filter`. Non-empty `fields` replace the column list.
    pub fn get_where<R: Record>(
        &self,
        ctx: &RequestContext,
        table: &str,
        fields: &[&str],
        filter: impl Into<Filter>,
    ) -> Statement {
        let mut builder = self.read_builder::<R>(ctx, table);
        if !fields.is_empty() {
            builder.select(fields);
        }
        self.filtered(&mut builder, &filter.into());
        self.finish("get_where", ctx, &mut builder)
    }

    /// Like [`Orm::get_where`], plus ordering and pagination.
    ///
    /// Sort keys prefixed with `-` sort descending. Pagination applies only
    /// when both `page` (1-based) and `page_size` are positive.
    #[allow(clippy::too_many_arguments)]
    pub fn select_where<R: Record>(
        &self,
        ctx: &RequestContext,
        table: &str,
        fields: &[&str],
        filter: impl Into<Filter>,
        sort: &[&str],
        page: i64,
        page_size: i64,
    ) -> Statement {
        let mut builder = self.read_builder::<R>(ctx, table);
        if !fields.is_empty() {
            builder.select(fields);
        }
        self.filtered(&mut builder, &filter.into());
        for clause in sort.iter().filter_map(|key| order_clause(key)) {
            builder.order_by(&clause);
        }
        builder.paginate(page, page_size);
        self.finish("select_where", ctx, &mut builder)
    }

    /// `SELECT COUNT(1) AS total` over rows matching `filter`.
    pub fn count(&self, ctx: &RequestContext, table: &str, filter: impl Into<Filter>) -> Statement {
        let mut builder = SelectBuilder::new(table);
        builder.push_column("COUNT(1) AS total").route(ctx.read_route());
        self.filtered(&mut builder, &filter.into());
        self.finish("count", ctx, &mut builder)
    }

    /// Counts grouped by `group` columns, which are selected alongside `total`.
    pub fn count_by(
        &self,
        ctx: &RequestContext,
        table: &str,
        filter: impl Into<Filter>,
        group: &[&str],
    ) -> Statement {
        let mut builder = SelectBuilder::new(table);
        builder.push_column("COUNT(1) AS total").route(ctx.read_route());
        for column in group {
            builder.push_column(column);
        }
        self.filtered(&mut builder, &filter.into());
        builder.group_by(group);
        self.finish("count_by", ctx, &mut builder)
    }

    /// Distinct values of `column` among rows matching `filter`.
    pub fn distinct(&self, ctx: &RequestContext, table: &str, column: &str, filter: &KVs) -> Statement {
        let mut builder = SelectBuilder::new(table);
        builder
            .push_column(&format!("DISTINCT({column}) AS {column}"))
            .route(ctx.read_route());
        let mut predicates = Vec::new();
        where_from_kvs(&mut predicates, filter);
        builder.push_predicates(predicates);
        self.finish("distinct", ctx, &mut builder)
    }

    /// `SELECT 1 ... LIMIT 1`: any row returned means a match exists.
    pub fn exist(&self, ctx: &RequestContext, table: &str, filter: impl Into<Filter>) -> Statement {
        let mut builder = SelectBuilder::new(table);
        builder.push_column("1").limit(1).route(ctx.read_route());
        self.filtered(&mut builder, &filter.into());
        self.finish("exist", ctx, &mut builder)
    }
}
