//! Engine configuration
//!
//! The catalog pseudo-relation name is not part of it: that name belongs to
//! [`Catalog`](crate::catalog::Catalog) alone.

/// Default prefix for unnamed projection columns (`col0`, `col1`, ...)
pub const DEFAULT_COLUMN_PREFIX: &str = "col";

/// Default log filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Prefix for projection columns without an alias
    pub column_prefix: String,
    /// `tracing-subscriber` filter directive
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            column_prefix: DEFAULT_COLUMN_PREFIX.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the anonymous column prefix
    pub fn column_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.column_prefix = prefix.into();
        self
    }

    /// Set the log filter
    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Name of the `index`-th select list entry when it has no alias
    pub fn anonymous_column(&self, index: usize) -> String {
        format!("{}{}", self.column_prefix, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::new();
        assert_eq!(config.anonymous_column(0), "col0");
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new()
            .column_prefix("expr_")
            .log_filter("cursordb=debug");
        assert_eq!(config.anonymous_column(3), "expr_3");
        assert_eq!(config.log_filter, "cursordb=debug");
    }
}
