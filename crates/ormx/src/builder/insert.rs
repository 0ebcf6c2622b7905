use super::traits::{ColumnBuilder, StatementBuilder};
use crate::projection::InsertProjection;
use crate::sql::{Route, Sql, Statement};
use crate::value::Value;

/// Multi-row INSERT builder.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertBuilder {
    table: String,
    columns: Vec<String>,
    /// One entry per VALUES tuple, aligned with `columns`
    rows: Vec<Vec<Value>>,
    /// Render `ON CONFLICT DO NOTHING`
    ignore_conflicts: bool,
    returning: Vec<String>,
}

impl InsertBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: Vec::new(),
            rows: Vec::new(),
            ignore_conflicts: false,
            returning: Vec::new(),
        }
    }

    /// Builder over the columns and rows of a projection.
    pub fn from_projection(table: &str, projection: InsertProjection) -> Self {
        let mut builder = Self::new(table);
        builder.columns = projection.columns;
        builder.rows = projection.rows;
        builder
    }

    /// Append one VALUES tuple.
    pub fn push_row(&mut self, row: Vec<Value>) -> &mut Self {
        self.rows.push(row);
        self
    }

    /// Skip rows that hit a unique constraint instead of failing.
    pub fn on_conflict_do_nothing(&mut self) -> &mut Self {
        self.ignore_conflicts = true;
        self
    }

    pub fn returning<S: AsRef<str>>(&mut self, cols: &[S]) -> &mut Self {
        self.returning = cols.iter().map(|c| c.as_ref().to_string()).collect();
        self
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }
}

impl StatementBuilder for InsertBuilder {
    fn table(&self) -> &str {
        &self.table
    }

    fn build(&self) -> Statement {
        let mut sql = Sql::new(format!(
            "INSERT INTO {} ({}) VALUES ",
            self.table,
            self.columns.join(", ")
        ));
        sql.push_joined(&self.rows, ", ", |sql, row| {
            sql.push("(").push_bind_list(row.iter().cloned()).push(")");
        });
        if self.ignore_conflicts {
            sql.push(" ON CONFLICT DO NOTHING");
        }
        if !self.returning.is_empty() {
            sql.push(" RETURNING ").push(&self.returning.join(", "));
        }
        sql.into_statement(Route::Primary)
    }
}

impl ColumnBuilder for InsertBuilder {
    fn push_column(&mut self, column: &str) -> &mut Self {
        self.columns.push(column.to_string());
        self
    }

    fn columns(&self) -> &[String] {
        &self.columns
    }
}
