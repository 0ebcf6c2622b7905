use super::traits::{StatementBuilder, WhereBuilder};
use crate::condition::{Predicate, push_where};
use crate::projection::UpdateProjection;
use crate::sql::{Route, Sql, Statement};
use crate::value::Value;

/// UPDATE builder.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateBuilder {
    table: String,
    /// SET clauses (column, value)
    set_fields: Vec<(String, Value)>,
    predicates: Vec<Predicate>,
}

impl UpdateBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            set_fields: Vec::new(),
            predicates: Vec::new(),
        }
    }

    /// Builder over the assignments of a projection.
    pub fn from_projection(table: &str, projection: UpdateProjection) -> Self {
        let mut builder = Self::new(table);
        builder.set_fields = projection.assignments;
        builder
    }

    /// Set a column.
    pub fn set(&mut self, column: &str, value: Value) -> &mut Self {
        self.set_fields.push((column.to_string(), value));
        self
    }

    pub fn has_set_fields(&self) -> bool {
        !self.set_fields.is_empty()
    }
}

impl StatementBuilder for UpdateBuilder {
    fn table(&self) -> &str {
        &self.table
    }

    fn build(&self) -> Statement {
        let mut sql = Sql::new(format!("UPDATE {} SET ", self.table));
        sql.push_joined(&self.set_fields, ", ", |sql, (column, value)| {
            sql.push(column).push(" = ").push_bind(value.clone());
        });
        push_where(&mut sql, &self.predicates);
        sql.into_statement(Route::Primary)
    }
}

impl WhereBuilder for UpdateBuilder {
    fn push_predicate(&mut self, predicate: Predicate) -> &mut Self {
        self.predicates.push(predicate);
        self
    }

    fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }
}
