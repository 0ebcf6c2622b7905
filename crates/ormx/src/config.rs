//! Process-wide settings shared by every derivation.

use std::path::Path;

use serde::Deserialize;

use crate::error::{OrmError, OrmResult};
use crate::record::Record;
use crate::table::{ToTable, record_table, table_name};

pub const ENV_TABLE_PREFIX: &str = "ORMX_TABLE_PREFIX";
pub const ENV_NAMESPACE_COLUMN: &str = "ORMX_NAMESPACE_COLUMN";
pub const ENV_PRIMARY_KEY: &str = "ORMX_PRIMARY_KEY";

/// Naming and tenancy settings.
///
/// ```
/// use ormx::OrmConfig;
///
/// let config = OrmConfig::from_toml_str(r#"
///     table_prefix = "app_"
///     namespace_column = "tenant"
/// "#).unwrap();
/// assert_eq!(config.table_prefix, "app_");
/// assert_eq!(config.primary_key, "id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OrmConfig {
    /// Prepended to derived table names.
    pub table_prefix: String,
    /// Column holding the tenant namespace. Empty disables injection.
    pub namespace_column: String,
    /// Column matched by id filters.
    pub primary_key: String,
}

impl Default for OrmConfig {
    fn default() -> Self {
        Self {
            table_prefix: String::new(),
            namespace_column: "namespace".to_string(),
            primary_key: "id".to_string(),
        }
    }
}

impl OrmConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_prefix = prefix.into();
        self
    }

    /// Set the namespace column; an empty name turns namespace injection off.
    pub fn namespace_column(mut self, column: impl Into<String>) -> Self {
        self.namespace_column = column.into();
        self
    }

    /// Set the primary key column. Empty names are ignored.
    pub fn primary_key(mut self, column: impl Into<String>) -> Self {
        let column = column.into();
        if !column.is_empty() {
            self.primary_key = column;
        }
        self
    }

    pub fn from_toml_str(raw: &str) -> OrmResult<Self> {
        toml::from_str(raw).map_err(|e| OrmError::config(format!("failed to parse config: {e}")))
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> OrmResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            OrmError::config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw)
    }

    /// Defaults overridden by `ORMX_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the `ORMX_*` keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(prefix) = lookup(ENV_TABLE_PREFIX) {
            config = config.table_prefix(prefix);
        }
        if let Some(column) = lookup(ENV_NAMESPACE_COLUMN) {
            config = config.namespace_column(column);
        }
        if let Some(pk) = lookup(ENV_PRIMARY_KEY) {
            config = config.primary_key(pk);
        }
        config
    }

    pub fn namespace_enabled(&self) -> bool {
        !self.namespace_column.is_empty()
    }

    /// Table name of `d` under this prefix.
    pub fn table_name<T: ToTable + ?Sized>(&self, d: &T) -> String {
        table_name(d, &self.table_prefix)
    }

    /// Table name of record type `R` under this prefix.
    pub fn record_table<R: Record>(&self) -> String {
        record_table::<R>(&self.table_prefix)
    }
}
