//! Resolving a command line query into a printable report

use crate::args::Invocation;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use verse_core::{BookCatalog, BookSelection, Statement, VerseRow};
use verse_oracle::{ExpressionOracle, StaticOracle};
use verse_query::{assemble, QueryResolver, RenderedVerse, ResolvedQuery};

/// Everything printed for one query
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub query: ResolvedQuery,
    pub statement: Statement,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub verses: Vec<RenderedVerse>,
}

/// Pick the oracle for `config`.
///
/// Without the network oracle, questions always take the keyword fallback.
pub fn build_oracle(config: &CliConfig) -> Arc<dyn ExpressionOracle> {
    #[cfg(feature = "openai")]
    if config.use_network_oracle {
        let settings = verse_oracle::OracleSettings::from_env();
        info!("Using discovered LLM oracle (remote keys: {})", settings.has_remote());
        return Arc::new(verse_oracle::DiscoveringOracle::new(settings));
    }

    info!(
        "LLM oracle disabled (requested: {})",
        config.use_network_oracle
    );
    Arc::new(StaticOracle::unavailable())
}

pub fn build_resolver(config: &CliConfig, oracle: Arc<dyn ExpressionOracle>) -> QueryResolver {
    QueryResolver::with_config(BookCatalog::canonical(), oracle, config.resolver_config())
}

/// Parse tab-separated `Book, Chapter, Versecount, verse` rows; blank lines
/// are skipped
pub fn parse_rows(input: &str) -> CliResult<Vec<VerseRow>> {
    let mut rows = Vec::new();
    for (index, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let invalid = |reason: &str| CliError::InvalidRow {
            line: index + 1,
            reason: reason.to_string(),
        };

        let mut fields = line.splitn(4, '\t');
        let mut number = |name: &str| -> CliResult<u32> {
            fields
                .next()
                .and_then(|f| f.trim().parse().ok())
                .ok_or_else(|| invalid(&format!("bad {}", name)))
        };
        let book = number("book")?;
        let chapter = number("chapter")?;
        let versecount = number("verse number")?;
        let verse = fields.next().ok_or_else(|| invalid("missing verse text"))?;

        rows.push(VerseRow::new(book, chapter, versecount, verse));
    }
    Ok(rows)
}

/// Resolve the query and, when rows are given, render them
pub async fn execute(
    resolver: &QueryResolver,
    invocation: &Invocation,
    rows: Option<Vec<VerseRow>>,
) -> CliResult<Report> {
    let query = resolver
        .resolve(&invocation.query, invocation.config.resolve_options())
        .await?;
    let statement = resolver.statement(&query);

    let verses = match rows {
        Some(rows) => render(resolver.catalog(), &query, &invocation.books, rows)?,
        None => Vec::new(),
    };

    Ok(Report {
        query,
        statement,
        verses,
    })
}

/// Pretty-printed JSON for `report`
pub fn to_json(report: &Report) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn render(
    catalog: &BookCatalog,
    query: &ResolvedQuery,
    books: &BookSelection,
    rows: Vec<VerseRow>,
) -> CliResult<Vec<RenderedVerse>> {
    let highlighter = query.highlighter()?;
    Ok(assemble(rows, books, catalog, &highlighter))
}
