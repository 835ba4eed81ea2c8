//! VerseDB Query Engine
//!
//! Turns what a user types into a parameterized SQL predicate over the verse
//! table, plus the keywords to highlight in the results.
//!
//! # Syntax
//!
//! ```text
//! John 3:16-21             verse reference
//! love + hope              both words (AND also works)
//! love , hope              either word (OR also works)
//! (hope , trust) + love    grouping; AND binds tighter than OR
//! key: ...  search: ...    force keyword search
//! ask: ...  sql: ...       force the natural-language oracle
//! ```
//!
//! Anything else without operators is treated as a question for the oracle.

pub mod compiler;
pub mod highlight;
pub mod intent;
pub mod lexer;
pub mod postfix;
pub mod raw;
pub mod reference;
pub mod regexp;
pub mod resolver;
pub mod results;

pub use compiler::{
    build_predicate, build_sql_from_postfix, compile_expression, word_boundary_pattern,
    BuiltPredicate, CompiledExpression,
};
pub use highlight::{join_spans, HighlightSpan, Highlighter, SpanKind};
pub use intent::{classify, classify_rule, Intent, IntentRule};
pub use lexer::{tokenize, Operator, Token};
pub use postfix::to_postfix;
pub use raw::{is_raw_select, validate_raw_sql, FORBIDDEN_TOKENS};
pub use reference::parse_reference;
pub use regexp::{regexp_check, RegexpFunction};
pub use resolver::{
    Diagnostics, QueryBody, QueryResolver, ResolutionMode, ResolveOptions, ResolvedQuery,
    ResolverConfig,
};
pub use results::{assemble, RenderedVerse};
