use crate::condition::Predicate;
use crate::sql::Statement;

/// Base trait for statement builders.
pub trait StatementBuilder {
    /// Target table.
    fn table(&self) -> &str;

    /// Render the statement.
    fn build(&self) -> Statement;

    /// Debug helper.
    fn to_sql(&self) -> String {
        self.build().sql
    }
}

/// Builders that take a WHERE clause (SELECT, UPDATE, DELETE).
pub trait WhereBuilder: StatementBuilder {
    fn push_predicate(&mut self, predicate: Predicate) -> &mut Self;

    /// Predicates pushed so far.
    fn predicates(&self) -> &[Predicate];

    fn push_predicates(&mut self, predicates: impl IntoIterator<Item = Predicate>) -> &mut Self
    where
        Self: Sized,
    {
        for predicate in predicates {
            self.push_predicate(predicate);
        }
        self
    }
}

/// Builders with an explicit column list (SELECT, INSERT).
pub trait ColumnBuilder: StatementBuilder {
    fn push_column(&mut self, column: &str) -> &mut Self;

    fn columns(&self) -> &[String];
}
