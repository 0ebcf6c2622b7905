//! Placeholder-tracking SQL renderer and the rendered [`Statement`].
//!
//! Builders append raw fragments and bound [`Value`]s to a [`Sql`]; placeholders
//! (`$1, $2, ...`) are numbered only when the text is rendered, so fragments
//! can be composed in any order.
//!
//! ```
//! use ormx::sql::Sql;
//! use ormx::Value;
//!
//! let mut q = Sql::new("SELECT * FROM users WHERE ");
//! q.push("status = ").push_bind(Value::String("active".into()));
//! q.push(" AND id IN (").push_bind_list(vec![Value::Int(1), Value::Int(2)]).push(")");
//! assert_eq!(q.to_sql(), "SELECT * FROM users WHERE status = $1 AND id IN ($2, $3)");
//! ```

use std::fmt::{self, Write};

use tokio_postgres::types::ToSql;

use crate::value::Value;

#[derive(Debug, Clone, PartialEq)]
enum SqlPart {
    Raw(String),
    Param,
}

/// SQL pieces and their parameters, kept apart until rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sql {
    parts: Vec<SqlPart>,
    params: Vec<Value>,
}

impl Sql {
    pub fn new(initial_sql: impl Into<String>) -> Self {
        let mut sql = Self::empty();
        sql.push(&initial_sql.into());
        sql
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Append raw SQL.
    pub fn push(&mut self, sql: &str) -> &mut Self {
        if sql.is_empty() {
            return self;
        }

        match self.parts.last_mut() {
            Some(SqlPart::Raw(last)) => last.push_str(sql),
            _ => self.parts.push(SqlPart::Raw(sql.to_string())),
        }
        self
    }

    /// Append a placeholder and bind its value.
    pub fn push_bind(&mut self, value: Value) -> &mut Self {
        self.parts.push(SqlPart::Param);
        self.params.push(value);
        self
    }

    /// Append comma-separated placeholders, one per value.
    ///
    /// An empty list appends `NULL` so `IN (NULL)` stays valid SQL.
    pub fn push_bind_list(&mut self, values: impl IntoIterator<Item = Value>) -> &mut Self {
        let mut iter = values.into_iter();
        let Some(first) = iter.next() else {
            return self.push("NULL");
        };

        self.push_bind(first);
        for v in iter {
            self.push(", ");
            self.push_bind(v);
        }
        self
    }

    /// Append `items` separated by `sep`, rendering each with `f`.
    pub fn push_joined<T>(
        &mut self,
        items: impl IntoIterator<Item = T>,
        sep: &str,
        mut f: impl FnMut(&mut Self, T),
    ) -> &mut Self {
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.push(sep);
            }
            f(self, item);
        }
        self
    }

    /// Append another fragment, consuming it.
    pub fn push_sql(&mut self, mut other: Sql) -> &mut Self {
        self.parts.append(&mut other.parts);
        self.params.append(&mut other.params);
        self
    }

    /// Render with `$1, $2, ...` placeholders.
    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        let mut idx: usize = 0;

        for part in &self.parts {
            match part {
                SqlPart::Raw(s) => out.push_str(s),
                SqlPart::Param => {
                    idx += 1;
                    let _ = write!(&mut out, "${idx}");
                }
            }
        }
        out
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn into_statement(self, route: Route) -> Statement {
        Statement {
            sql: self.to_sql(),
            params: self.params,
            route,
        }
    }
}

/// Which database instance a statement should run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// The writable primary. Mutations always go here.
    Primary,
    /// Any replica that tolerates some lag.
    #[default]
    Replica,
}

/// A fully rendered statement: text, positional arguments and route.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
    pub route: Route,
}

impl Statement {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Parameter refs for `tokio_postgres` `query`/`execute` calls.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|p| p as &(dyn ToSql + Sync))
            .collect()
    }

    pub fn is_primary(&self) -> bool {
        self.route == Route::Primary
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
