//! Query resolution
//!
//! [`QueryResolver`] is the single entry point: raw user text in, a
//! [`ResolvedQuery`] out. Resolution runs in a fixed order:
//!
//! 1. verse reference ("John 3:16-21") => fixed `Book/Chapter/Versecount` predicate
//! 2. raw `SELECT ...` => passed through after the forbidden-token filter
//! 3. intent classification
//!    - keyword intent => compile the expression
//!    - oracle intent => translate, then compile the translation; on any oracle
//!      failure compile the user's own text instead
//!
//! Apart from an unsafe raw statement, every input resolves to a valid,
//! fully parameterized predicate (at worst `1=0`).

use crate::compiler::{compile_expression, CompiledExpression};
use crate::highlight::Highlighter;
use crate::intent::{classify_rule, Intent, IntentRule};
use crate::raw::{is_raw_select, validate_raw_sql};
use crate::reference::parse_reference;
use crate::regexp::RegexpFunction;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use verse_core::prefix::{strip_prefix, KEYWORD_PREFIXES, ORACLE_PREFIXES};
use verse_core::{
    BookCatalog, Error, Predicate, Result, Statement, VerseReference, DEFAULT_TABLE, VERSE_COLUMN,
};
use verse_oracle::{ExpressionOracle, OracleError, OracleResult};

/// Resolver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Verse table used when building statements
    pub table: String,
    /// Text column the keyword predicates search
    pub column: String,
    /// Upper bound for a single oracle call
    pub oracle_timeout_secs: u64,
    /// Accept complete `SELECT` statements as input
    pub allow_raw_sql: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
            column: VERSE_COLUMN.to_string(),
            oracle_timeout_secs: 30,
            allow_raw_sql: true,
        }
    }
}

impl ResolverConfig {
    pub fn table(mut self, table: &str) -> Self {
        self.table = table.to_string();
        self
    }

    pub fn column(mut self, column: &str) -> Self {
        self.column = column.to_string();
        self
    }

    pub fn oracle_timeout_secs(mut self, secs: u64) -> Self {
        self.oracle_timeout_secs = secs;
        self
    }

    pub fn allow_raw_sql(mut self, allow: bool) -> Self {
        self.allow_raw_sql = allow;
        self
    }

    pub fn oracle_timeout(&self) -> Duration {
        Duration::from_secs(self.oracle_timeout_secs)
    }
}

/// Per-query options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOptions {
    /// Match keywords case-sensitively in `REGEXP` and highlighting
    pub case_sensitive: bool,
}

impl ResolveOptions {
    pub fn case_sensitive() -> Self {
        Self {
            case_sensitive: true,
        }
    }
}

/// Path a query took through the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMode {
    /// Verse reference
    Reference,
    /// Validated raw `SELECT`
    RawPassthrough,
    /// Keyword expression compiled as typed
    Standard,
    /// Oracle translation compiled
    Translated,
    /// Oracle failed; the user's text compiled as a keyword expression
    Fallback,
}

/// What the store should run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum QueryBody {
    Predicate(Predicate),
    Raw(String),
}

/// Details about how a query was resolved
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Classified intent (absent for references and raw statements)
    pub intent: Option<Intent>,
    pub rule: Option<IntentRule>,
    /// Expression returned by the oracle
    pub generated_expression: Option<String>,
    /// Why the oracle path fell back
    pub oracle_error: Option<String>,
    pub reference: Option<VerseReference>,
    /// Unbalanced parentheses, stray operators or leftover operands
    pub malformed: bool,
    /// Name of the oracle consulted
    pub oracle: Option<String>,
}

/// The outcome of resolving one query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedQuery {
    pub mode: ResolutionMode,
    pub body: QueryBody,
    /// Distinct keywords in first-occurrence order
    pub highlight_terms: Vec<String>,
    pub case_sensitive: bool,
    pub diagnostics: Diagnostics,
}

impl ResolvedQuery {
    fn reference(reference: VerseReference, options: ResolveOptions) -> Self {
        Self {
            mode: ResolutionMode::Reference,
            body: QueryBody::Predicate(reference.predicate()),
            highlight_terms: Vec::new(),
            case_sensitive: options.case_sensitive,
            diagnostics: Diagnostics {
                reference: Some(reference),
                ..Default::default()
            },
        }
    }

    fn raw(sql: &str, options: ResolveOptions) -> Self {
        Self {
            mode: ResolutionMode::RawPassthrough,
            body: QueryBody::Raw(sql.to_string()),
            highlight_terms: Vec::new(),
            case_sensitive: options.case_sensitive,
            diagnostics: Diagnostics::default(),
        }
    }

    fn compiled(
        mode: ResolutionMode,
        compiled: CompiledExpression,
        options: ResolveOptions,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            mode,
            body: QueryBody::Predicate(compiled.predicate),
            highlight_terms: compiled.terms,
            case_sensitive: options.case_sensitive,
            diagnostics: Diagnostics {
                malformed: compiled.malformed,
                ..diagnostics
            },
        }
    }

    /// The predicate, unless this is a raw statement
    pub fn predicate(&self) -> Option<&Predicate> {
        match &self.body {
            QueryBody::Predicate(predicate) => Some(predicate),
            QueryBody::Raw(_) => None,
        }
    }

    /// Full statement against `table`
    pub fn statement(&self, table: &str) -> Statement {
        match &self.body {
            QueryBody::Predicate(predicate) => Statement::select(table, predicate),
            QueryBody::Raw(sql) => Statement::raw(sql.as_str()),
        }
    }

    /// `REGEXP` implementation to register for this query
    pub fn regexp_function(&self) -> RegexpFunction {
        RegexpFunction::new(self.case_sensitive)
    }

    /// Highlighter for result verses
    pub fn highlighter(&self) -> Result<Highlighter> {
        Highlighter::new(&self.highlight_terms, self.case_sensitive)
    }
}

/// Resolves user input into predicates
pub struct QueryResolver {
    catalog: BookCatalog,
    oracle: Arc<dyn ExpressionOracle>,
    config: ResolverConfig,
}

impl QueryResolver {
    /// Resolver over the canonical catalog with default configuration
    pub fn new(oracle: Arc<dyn ExpressionOracle>) -> Self {
        Self::with_config(BookCatalog::canonical(), oracle, ResolverConfig::default())
    }

    pub fn with_config(
        catalog: BookCatalog,
        oracle: Arc<dyn ExpressionOracle>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            catalog,
            oracle,
            config,
        }
    }

    pub fn catalog(&self) -> &BookCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Full statement for `resolved` against the configured table
    pub fn statement(&self, resolved: &ResolvedQuery) -> Statement {
        resolved.statement(&self.config.table)
    }

    /// Resolve `query`.
    ///
    /// Fails only with [`Error::UnsafeRawQuery`] (or `MalformedExpression`
    /// for an empty raw statement); everything else degrades to a predicate.
    pub async fn resolve(&self, query: &str, options: ResolveOptions) -> Result<ResolvedQuery> {
        let query = query.trim();

        if let Some(reference) = parse_reference(query, &self.catalog) {
            debug!("Query {:?} is reference {}", query, reference.label(&self.catalog));
            return Ok(ResolvedQuery::reference(reference, options));
        }

        if self.config.allow_raw_sql && is_raw_select(query) {
            if let Err(e) = validate_raw_sql(query) {
                warn!("Rejected raw statement {:?}: {}", query, e);
                return Err(e);
            }
            debug!("Passing raw statement through");
            return Ok(ResolvedQuery::raw(query, options));
        }

        let rule = classify_rule(query);
        let intent = rule.intent();
        debug!("Query {:?} classified as {:?} by {:?}", query, intent, rule);

        let diagnostics = Diagnostics {
            intent: Some(intent),
            rule: Some(rule),
            ..Default::default()
        };

        match intent {
            Intent::Standard => {
                let expression = strip_prefix(query, &KEYWORD_PREFIXES);
                Ok(ResolvedQuery::compiled(
                    ResolutionMode::Standard,
                    self.compile(expression),
                    options,
                    diagnostics,
                ))
            }
            Intent::Llm => {
                let question = strip_prefix(query, &ORACLE_PREFIXES);
                let diagnostics = Diagnostics {
                    oracle: Some(self.oracle.name().to_string()),
                    ..diagnostics
                };

                match self.translate(question).await {
                    Ok(expression) => {
                        debug!("Oracle expression for {:?}: {:?}", question, expression);
                        let compiled = self.compile(&expression);
                        Ok(ResolvedQuery::compiled(
                            ResolutionMode::Translated,
                            compiled,
                            options,
                            Diagnostics {
                                generated_expression: Some(expression),
                                ..diagnostics
                            },
                        ))
                    }
                    Err(e) => {
                        let error = Error::from(e);
                        debug!("Oracle failed ({}), compiling {:?} directly", error, query);
                        Ok(ResolvedQuery::compiled(
                            ResolutionMode::Fallback,
                            self.compile(query),
                            options,
                            Diagnostics {
                                oracle_error: Some(error.to_string()),
                                ..diagnostics
                            },
                        ))
                    }
                }
            }
        }
    }

    fn compile(&self, expression: &str) -> CompiledExpression {
        compile_expression(expression, &self.config.column)
    }

    async fn translate(&self, question: &str) -> OracleResult<String> {
        let timeout = self.config.oracle_timeout();
        let expression = tokio::time::timeout(timeout, self.oracle.translate(question))
            .await
            .map_err(|_| {
                OracleError::Network(format!("oracle timed out after {:?}", timeout))
            })??;

        let expression = expression.trim();
        if expression.is_empty() {
            return Err(OracleError::Parse("empty expression".to_string()));
        }
        Ok(expression.to_string())
    }
}
