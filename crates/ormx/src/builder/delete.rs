use super::traits::{StatementBuilder, WhereBuilder};
use crate::condition::{Predicate, push_where};
use crate::sql::{Route, Sql, Statement};

/// DELETE builder.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteBuilder {
    table: String,
    predicates: Vec<Predicate>,
}

impl DeleteBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            predicates: Vec::new(),
        }
    }
}

impl StatementBuilder for DeleteBuilder {
    fn table(&self) -> &str {
        &self.table
    }

    fn build(&self) -> Statement {
        let mut sql = Sql::new(format!("DELETE FROM {}", self.table));
        push_where(&mut sql, &self.predicates);
        sql.into_statement(Route::Primary)
    }
}

impl WhereBuilder for DeleteBuilder {
    fn push_predicate(&mut self, predicate: Predicate) -> &mut Self {
        self.predicates.push(predicate);
        self
    }

    fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }
}
