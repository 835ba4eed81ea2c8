//! VerseDB command line front end
//!
//! Resolves one query and prints the resolution and the statement to run as
//! JSON. With `--highlight`, verse rows piped on stdin are filtered and
//! highlighted against the query.

pub mod app;
pub mod args;
pub mod config;
pub mod error;

pub use app::{build_oracle, build_resolver, execute, parse_rows, to_json, Report};
pub use args::{Cli, Invocation};
pub use config::CliConfig;
pub use error::{CliError, CliResult};
