//! Command line arguments

use crate::config::CliConfig;
use clap::Parser;
use verse_core::{BookSelection, Error, DEFAULT_TABLE};

/// Resolve a verse search into a parameterized SQL statement
#[derive(Parser, Debug, Clone)]
#[command(name = "versedb", version, about)]
pub struct Cli {
    /// Match keywords case-sensitively
    #[arg(long)]
    pub case_sensitive: bool,

    /// Never call an LLM; questions are searched as keywords
    #[arg(long)]
    pub offline: bool,

    /// Reject raw SELECT statements
    #[arg(long)]
    pub no_raw: bool,

    /// Verse table for the generated statement
    #[arg(long, default_value = DEFAULT_TABLE)]
    pub table: String,

    /// Decimal book bitmask (bit i selects book i)
    #[arg(long, value_name = "MASK", value_parser = parse_books)]
    pub books: Option<BookSelection>,

    /// Read tab-separated rows (Book, Chapter, Versecount, verse) from stdin
    /// and print them highlighted
    #[arg(long)]
    pub highlight: bool,

    /// Oracle call timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub oracle_timeout: u64,

    /// Log level when RUST_LOG is unset
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log: String,

    /// The query; words are joined with spaces
    #[arg(required = true)]
    pub query: Vec<String>,
}

fn parse_books(mask: &str) -> Result<BookSelection, Error> {
    if !mask.trim().bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::Configuration(format!(
            "book mask must be a decimal number: {}",
            mask
        )));
    }
    Ok(BookSelection::from_bitmask(mask))
}

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub query: String,
    pub config: CliConfig,
    pub books: BookSelection,
    pub highlight_stdin: bool,
}

impl Cli {
    pub fn into_invocation(self) -> Invocation {
        let mut config = CliConfig::default()
            .table(&self.table)
            .log_level(&self.log)
            .oracle_timeout_secs(self.oracle_timeout);
        if self.case_sensitive {
            config = config.case_sensitive();
        }
        if self.offline {
            config = config.offline();
        }
        if self.no_raw {
            config = config.without_raw_sql();
        }

        Invocation {
            query: self.query.join(" "),
            config,
            books: self.books.unwrap_or_else(BookSelection::all),
            highlight_stdin: self.highlight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Invocation, clap::Error> {
        Cli::try_parse_from(std::iter::once("versedb").chain(args.iter().copied()))
            .map(Cli::into_invocation)
    }

    #[test]
    fn test_query_words_joined() {
        let inv = parse(&["love", "+", "hope"]).unwrap();
        assert_eq!(inv.query, "love + hope");
        assert!(!inv.highlight_stdin);
        assert_eq!(inv.books, BookSelection::all());
        assert_eq!(inv.config, CliConfig::default());
    }

    #[test]
    fn test_flags() {
        let inv = parse(&[
            "--case-sensitive",
            "--offline",
            "--no-raw",
            "--table",
            "kjv",
            "--books",
            "1",
            "--oracle-timeout",
            "5",
            "--log",
            "debug",
            "--highlight",
            "John 3:16",
        ])
        .unwrap();
        assert_eq!(inv.query, "John 3:16");
        assert!(inv.config.case_sensitive);
        assert!(!inv.config.use_network_oracle);
        assert!(!inv.config.allow_raw_sql);
        assert_eq!(inv.config.table, "kjv");
        assert_eq!(inv.config.oracle_timeout_secs, 5);
        assert_eq!(inv.config.log_level, "debug");
        assert_eq!(inv.books.len(), 1);
        assert!(inv.highlight_stdin);
    }

    #[test]
    fn test_oversized_book_mask_accepted() {
        let inv = parse(&["--books", "73786976294838206475", "grace"]).unwrap();
        assert_eq!(inv.books.len(), 3);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse(&[]).unwrap_err().kind(),
            ErrorKind::MissingRequiredArgument
        );
        assert_eq!(
            parse(&["--verbose", "x"]).unwrap_err().kind(),
            ErrorKind::UnknownArgument
        );
        assert!(parse(&["x", "--table"]).is_err());
        assert_eq!(
            parse(&["--books", "abc", "x"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
    }
}
