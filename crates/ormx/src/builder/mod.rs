//! Statement builders.
//!
//! Each builder accumulates columns, values and [`Predicate`]s for one table
//! and renders a [`Statement`] with Postgres placeholders (`$1, $2, ...`).
//! Predicates are ANDed in the order they were pushed.
//!
//! [`Predicate`]: crate::condition::Predicate
//! [`Statement`]: crate::sql::Statement

pub mod delete;
pub mod insert;
pub mod select;
pub mod traits;
pub mod update;

pub use delete::DeleteBuilder;
pub use insert::InsertBuilder;
pub use select::SelectBuilder;
pub use traits::{ColumnBuilder, StatementBuilder, WhereBuilder};
pub use update::UpdateBuilder;
