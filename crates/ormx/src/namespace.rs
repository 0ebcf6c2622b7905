//! Tenant scoping.
//!
//! When a request carries a namespace, every SELECT, UPDATE and DELETE gets a
//! `namespace_column = value` predicate appended just before rendering, and
//! INSERTs get the column added to each row. The values `""`, `"-"` and
//! `"<nil>"` count as no namespace. [`RequestContext::ignore_namespace`]
//! suppresses injection for one request, and an empty
//! [`OrmConfig::namespace_column`] disables it everywhere.

use crate::builder::WhereBuilder;
use crate::condition::Predicate;
use crate::config::OrmConfig;
use crate::context::RequestContext;
use crate::projection::InsertProjection;
use crate::sql::Statement;
use crate::value::Value;

const ABSENT_SENTINELS: [&str; 3] = ["", "-", "<nil>"];

/// How the namespace of a request resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceState<'a> {
    /// The request carries no namespace.
    NoValue,
    /// The request carries one of the placeholder values.
    Empty,
    /// Injection is suppressed for this request.
    Overridden,
    Inject(&'a str),
}

impl<'a> NamespaceState<'a> {
    pub fn of(ctx: &'a RequestContext) -> Self {
        let Some(namespace) = ctx.namespace() else {
            return NamespaceState::NoValue;
        };
        if ABSENT_SENTINELS.contains(&namespace) {
            return NamespaceState::Empty;
        }
        if ctx.is_namespace_ignored() {
            return NamespaceState::Overridden;
        }
        NamespaceState::Inject(namespace)
    }

    pub fn value(self) -> Option<&'a str> {
        match self {
            NamespaceState::Inject(namespace) => Some(namespace),
            _ => None,
        }
    }
}

/// The namespace to inject for `ctx`, if any.
pub fn namespace_value_for_inject<'a>(
    ctx: &'a RequestContext,
    config: &OrmConfig,
) -> Option<&'a str> {
    if !config.namespace_enabled() {
        return None;
    }
    let state = NamespaceState::of(ctx);
    tracing::trace!(target: "ormx", ?state, "namespace resolved");
    state.value()
}

/// The namespace predicate for `ctx`, if one applies.
pub fn namespace_predicate(ctx: &RequestContext, config: &OrmConfig) -> Option<Predicate> {
    namespace_value_for_inject(ctx, config)
        .map(|ns| Predicate::eq(config.namespace_column.as_str(), Value::String(ns.to_string())))
}

/// Append the namespace predicate to a filtered builder.
pub fn append_namespace_filter<B: WhereBuilder>(
    builder: &mut B,
    ctx: &RequestContext,
    config: &OrmConfig,
) {
    if let Some(predicate) = namespace_predicate(ctx, config) {
        builder.push_predicate(predicate);
    }
}

/// Add the namespace column to an insert unless the record already maps it.
pub fn inject_insert(projection: &mut InsertProjection, ctx: &RequestContext, config: &OrmConfig) {
    if let Some(ns) = namespace_value_for_inject(ctx, config) {
        projection.push_constant(&config.namespace_column, Value::String(ns.to_string()));
    }
}

/// Inject the namespace predicate and render.
pub fn build<B: WhereBuilder>(builder: &mut B, ctx: &RequestContext, config: &OrmConfig) -> Statement {
    append_namespace_filter(builder, ctx, config);
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{DeleteBuilder, SelectBuilder, StatementBuilder, UpdateBuilder};
    use crate::record::testing::UserAccount;

    fn config() -> OrmConfig {
        OrmConfig::default()
    }

    #[test]
    fn test_states() {
        assert_eq!(NamespaceState::of(&RequestContext::new()), NamespaceState::NoValue);
        for sentinel in ["", "-", "<nil>"] {
            let ctx = RequestContext::new().with_namespace(sentinel);
            assert_eq!(NamespaceState::of(&ctx), NamespaceState::Empty);
        }
        let ctx = RequestContext::new().with_namespace("tenant-A");
        assert_eq!(NamespaceState::of(&ctx), NamespaceState::Inject("tenant-A"));
        let ctx = ctx.ignore_namespace();
        assert_eq!(NamespaceState::of(&ctx), NamespaceState::Overridden);
    }

    #[test]
    fn test_select_gets_one_extra_predicate() {
        let ctx = RequestContext::new().with_namespace("tenant-A");
        let mut qb = SelectBuilder::new("users");
        qb.push_predicate(Predicate::eq("id", Value::Int(1)));
        let stmt = build(&mut qb, &ctx, &config());
        assert_eq!(stmt.sql, "SELECT * FROM users WHERE id = $1 AND namespace = $2");
        assert_eq!(stmt.params[1], Value::String("tenant-A".into()));
    }

    #[test]
    fn test_override_suppresses() {
        let ctx = RequestContext::new().with_namespace("tenant-A").ignore_namespace();
        let mut ub = UpdateBuilder::new("users");
        ub.set("name", Value::String("x".into()));
        assert_eq!(build(&mut ub, &ctx, &config()).sql, "UPDATE users SET name = $1");
    }

    #[test]
    fn test_sentinels_are_absent() {
        for sentinel in ["-", "<nil>", ""] {
            let ctx = RequestContext::new().with_namespace(sentinel);
            let mut db = DeleteBuilder::new("users");
            assert_eq!(build(&mut db, &ctx, &config()).sql, "DELETE FROM users");
        }
    }

    #[test]
    fn test_disabled_column() {
        let ctx = RequestContext::new().with_namespace("tenant-A");
        let config = OrmConfig::default().namespace_column("");
        assert!(namespace_predicate(&ctx, &config).is_none());
        let mut qb = SelectBuilder::new("users");
        assert_eq!(build(&mut qb, &ctx, &config).sql,"SELECT * FROM users");
    }

    #[test]
    fn test_custom_column() {
        let ctx = RequestContext::new().with_namespace("t9");
        let config = OrmConfig::default().namespace_column("tenant_id");
        let mut qb = SelectBuilder::new("users");
        append_namespace_filter(&mut qb, &ctx, &config);
        assert_eq!(qb.to_sql(), "SELECT * FROM users WHERE tenant_id = $1");
    }

    #[test]
    fn test_insert_adds_column() {
        let ctx = RequestContext::new().with_namespace("tenant-A");
        let mut proj = InsertProjection::of(&[UserAccount::sample()]).unwrap();
        inject_insert(&mut proj, &ctx, &config());
        assert_eq!(proj.columns.last().map(String::as_str), Some("namespace"));
        assert_eq!(proj.rows[0].last(), Some(&Value::String("tenant-A".into())));
    }

    #[test]
    fn test_insert_does_not_duplicate_mapped_column() {
        let ctx = RequestContext::new().with_namespace("tenant-A");
        // `name` is an insert column of UserAccount.
        let config = OrmConfig::default().namespace_column("name");
        let mut proj = InsertProjection::of(&[UserAccount::sample()]).unwrap();
        inject_insert(&mut proj, &ctx, &config);
        assert_eq!(proj.columns, vec!["name", "email", "created_at"]);
        assert_eq!(proj.rows[0][0], Value::String("alice".into()));
    }
}
