//! CLI configuration

use serde::{Deserialize, Serialize};
use verse_core::DEFAULT_TABLE;
use verse_query::{ResolveOptions, ResolverConfig};

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verse table named in generated statements
    pub table: String,

    /// Match keywords case-sensitively
    pub case_sensitive: bool,

    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,

    /// Ask a local or remote LLM to translate questions
    pub use_network_oracle: bool,

    /// Oracle call timeout in seconds
    pub oracle_timeout_secs: u64,

    /// Accept complete SELECT statements
    pub allow_raw_sql: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
            case_sensitive: false,
            log_level: "warn".to_string(),
            use_network_oracle: true,
            oracle_timeout_secs: 30,
            allow_raw_sql: true,
        }
    }
}

impl CliConfig {
    /// Builder: set table
    pub fn table(mut self, table: &str) -> Self {
        self.table = table.to_string();
        self
    }

    /// Builder: match case
    pub fn case_sensitive(mut self) -> Self {
        self.case_sensitive = true;
        self
    }

    /// Builder: set log level
    pub fn log_level(mut self, level: &str) -> Self {
        self.log_level = level.to_string();
        self
    }

    /// Builder: disable the network oracle
    pub fn offline(mut self) -> Self {
        self.use_network_oracle = false;
        self
    }

    /// Builder: set oracle timeout
    pub fn oracle_timeout_secs(mut self, secs: u64) -> Self {
        self.oracle_timeout_secs = secs;
        self
    }

    /// Builder: reject raw SELECT input
    pub fn without_raw_sql(mut self) -> Self {
        self.allow_raw_sql = false;
        self
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig::default()
            .table(&self.table)
            .oracle_timeout_secs(self.oracle_timeout_secs)
            .allow_raw_sql(self.allow_raw_sql)
    }

    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            case_sensitive: self.case_sensitive,
        }
    }
}
