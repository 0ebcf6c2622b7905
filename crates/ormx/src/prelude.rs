//! Convenient imports for typical `ormx` usage.
//!
//! ```ignore
//! use ormx::prelude::*;
//! ```

pub use crate::{
    Filter, KV, KVs, Operator, Orm, OrmConfig, OrmError, OrmResult, Record, RecordView,
    RequestContext, Statement, ToTable, ToValue, Value,
};

pub use crate::builder::{ColumnBuilder, StatementBuilder, WhereBuilder};
