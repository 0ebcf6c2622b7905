//! Statement constructors.
//!
//! [`Orm`] turns records and filters into ready-to-run [`Statement`]s: it
//! resolves the table, derives predicates, injects the request namespace and
//! picks the route. Nothing is executed here; hand the statement to any
//! `tokio_postgres` client:
//!
//! ```ignore
//! let stmt = orm.get_by_id::<User>(&ctx, "", 42);
//! let row = client.query_opt(stmt.sql(), &stmt.params_ref()).await?;
//! ```
//!
//! An empty `table` argument means "derive it from the record type".

mod delete;
mod insert;
mod select;
mod update;

use crate::builder::WhereBuilder;
use crate::config::OrmConfig;
use crate::context::RequestContext;
use crate::namespace;
use crate::record::Record;
use crate::sql::Statement;

/// Statement factory bound to one [`OrmConfig`].
#[derive(Debug, Clone, Default)]
pub struct Orm {
    config: OrmConfig,
}

impl Orm {
    pub fn new(config: OrmConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OrmConfig {
        &self.config
    }

    fn table_for<R: Record>(&self, table: &str) -> String {
        if table.is_empty() {
            self.config.record_table::<R>()
        } else {
            table.to_string()
        }
    }

    /// Inject the namespace, render and log.
    fn finish<B: WhereBuilder>(
        &self,
        kind: &'static str,
        ctx: &RequestContext,
        builder: &mut B,
    ) -> Statement {
        let stmt = namespace::build(builder, ctx, &self.config);
        log_statement(kind, builder.table(), &stmt);
        stmt
    }
}

fn log_statement(kind: &'static str, table: &str, stmt: &Statement) {
    tracing::debug!(
        target: "ormx",
        kind,
        table,
        route = ?stmt.route,
        sql = %stmt.sql,
        args = stmt.params.len(),
        "statement built"
    );
}
