use super::traits::{ColumnBuilder, StatementBuilder, WhereBuilder};
use crate::condition::{Predicate, push_where};
use crate::sql::{Route, Sql, Statement};

/// SELECT builder.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectBuilder {
    /// Table expression
    table: String,
    /// SELECT columns; empty renders `*`
    columns: Vec<String>,
    /// WHERE predicates
    predicates: Vec<Predicate>,
    /// GROUP BY columns
    group_by: Vec<String>,
    /// ORDER BY clauses
    order_by: Vec<String>,
    limit: Option<i64>,
    offset: Option<i64>,
    route: Route,
}

impl SelectBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: Vec::new(),
            predicates: Vec::new(),
            group_by: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
            route: Route::Replica,
        }
    }

    /// Replace the column list.
    pub fn select<S: AsRef<str>>(&mut self, cols: &[S]) -> &mut Self {
        self.columns = cols.iter().map(|c| c.as_ref().to_string()).collect();
        self
    }

    /// Add an ORDER BY clause, e.g. `created_at DESC`.
    pub fn order_by(&mut self, clause: &str) -> &mut Self {
        self.order_by.push(clause.to_string());
        self
    }

    pub fn group_by<S: AsRef<str>>(&mut self, cols: &[S]) -> &mut Self {
        self.group_by
            .extend(cols.iter().map(|c| c.as_ref().to_string()));
        self
    }

    pub fn limit(&mut self, limit: i64) -> &mut Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(&mut self, offset: i64) -> &mut Self {
        self.offset = Some(offset);
        self
    }

    /// Pagination helper. `page` is 1-based; nothing happens unless both
    /// arguments are positive.
    pub fn paginate(&mut self, page: i64, page_size: i64) -> &mut Self {
        if page > 0 && page_size > 0 {
            self.limit = Some(page_size);
            self.offset = Some((page - 1) * page_size);
        }
        self
    }

    pub fn route(&mut self, route: Route) -> &mut Self {
        self.route = route;
        self
    }
}

impl StatementBuilder for SelectBuilder {
    fn table(&self) -> &str {
        &self.table
    }

    fn build(&self) -> Statement {
        let mut sql = Sql::new("SELECT ");
        if self.columns.is_empty() {
            sql.push("*");
        } else {
            sql.push(&self.columns.join(", "));
        }
        sql.push(" FROM ").push(&self.table);

        push_where(&mut sql, &self.predicates);

        if !self.group_by.is_empty() {
            sql.push(" GROUP BY ").push(&self.group_by.join(", "));
        }
        if !self.order_by.is_empty() {
            sql.push(" ORDER BY ").push(&self.order_by.join(", "));
        }
        if let Some(limit) = self.limit {
            sql.push(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = self.offset {
            sql.push(&format!(" OFFSET {offset}"));
        }

        sql.into_statement(self.route)
    }
}

impl WhereBuilder for SelectBuilder {
    fn push_predicate(&mut self, predicate: Predicate) -> &mut Self {
        self.predicates.push(predicate);
        self
    }

    fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }
}

impl ColumnBuilder for SelectBuilder {
    fn push_column(&mut self, column: &str) -> &mut Self {
        self.columns.push(column.to_string());
        self
    }

    fn columns(&self) -> &[String] {
        &self.columns
    }
}
