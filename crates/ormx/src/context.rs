//! Request-scoped settings.

use crate::sql::Route;

/// Settings that travel with one request.
///
/// ```
/// use ormx::RequestContext;
///
/// let ctx = RequestContext::new().with_namespace("tenant-a").from_primary();
/// assert_eq!(ctx.namespace(), Some("tenant-a"));
/// assert!(ctx.reads_from_primary());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    namespace: Option<String>,
    ignore_namespace: bool,
    from_primary: bool,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope statements to `namespace`.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Never inject the namespace, even when one is set.
    pub fn ignore_namespace(mut self) -> Self {
        self.ignore_namespace = true;
        self
    }

    /// Route reads to the primary and bypass read caches.
    pub fn from_primary(mut self) -> Self {
        self.from_primary = true;
        self
    }

    pub fn from_replica(mut self) -> Self {
        self.from_primary = false;
        self
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn is_namespace_ignored(&self) -> bool {
        self.ignore_namespace
    }

    pub fn reads_from_primary(&self) -> bool {
        self.from_primary
    }

    /// Route for read statements issued under this context.
    pub fn read_route(&self) -> Route {
        if self.from_primary {
            Route::Primary
        } else {
            Route::Replica
        }
    }
}
