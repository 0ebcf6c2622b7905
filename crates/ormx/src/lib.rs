//! # ormx
//!
//! Derive SQL column lists, predicates and tenant filters from tagged Rust
//! structs.
//!
//! A struct deriving [`Record`] describes a table. Each field carries an
//! `#[orm(db = "...")]` tag naming its column followed by comma-separated
//! options (`insert`, `type:timestamp`, `select:-`), and optionally an
//! `#[orm(op = "...")]` comparison used when the struct is a filter.
//! [`Orm`] turns records and filters into parameterized [`Statement`]s,
//! appending the request namespace to every statement on the way out.
//!
//! ```ignore
//! use ormx::prelude::*;
//!
//! #[derive(Record)]
//! struct UserAccount {
//!     #[orm(db = "id")]
//!     pub id: i64,
//!     #[orm(db = "name,insert")]
//!     pub name: String,
//!     #[orm(db = "created_at,insert,type:timestamp")]
//!     pub created_at: i64,
//! }
//!
//! #[derive(Record, Default)]
//! struct UserQuery {
//!     #[orm(db = "name", op = "like")]
//!     pub name: Option<String>,
//!     #[orm(db = "id", op = "gte")]
//!     pub min_id: Option<i64>,
//! }
//!
//! let orm = Orm::new(OrmConfig::default().table_prefix("app_"));
//! let ctx = RequestContext::new().with_namespace("tenant-A");
//!
//! let query = UserQuery { min_id: Some(10), ..Default::default() };
//! let stmt = orm.get_where::<UserAccount>(&ctx, "", &[], Filter::from_record(&query));
//! // SELECT id, name, created_at FROM app_user_account
//! //   WHERE id >= $1 AND namespace = $2
//! ```

pub mod builder;
pub mod cache;
pub mod condition;
pub mod config;
pub mod context;
pub mod error;
pub mod field;
pub mod filter;
pub mod namespace;
pub mod normalize;
pub mod options;
pub mod prelude;
pub mod projection;
pub mod record;
pub mod sql;
pub mod stmt;
pub mod table;
pub mod value;

pub use cache::{Cache, MemoryCache};
pub use condition::{Operator, Predicate};
pub use config::OrmConfig;
pub use context::RequestContext;
pub use error::{OrmError, OrmResult};
pub use filter::{Filter, KV, KVs};
pub use record::{FieldKind, FieldMeta, Record, RecordView};
pub use sql::{Route, Sql, Statement};
pub use stmt::Orm;
pub use table::{TableSource, ToTable};
pub use value::{ToValue, Value};

#[cfg(feature = "derive")]
pub use ormx_derive::Record;
