//! VerseDB - verse search compiled to parameterized SQL
//!
//! This is the main library crate that re-exports all VerseDB components.

pub use verse_core as core;
pub use verse_oracle as oracle;
pub use verse_query as query;

// Re-export commonly used types
pub use verse_core::{
    BindValue, Book, BookCatalog, BookId, BookSelection, Error, Predicate, Result, Statement,
    VerseReference, VerseRow,
};

pub use verse_oracle::{ChatOracle, ExpressionOracle, OracleError, OracleSettings, StaticOracle};
pub use verse_query::{
    HighlightSpan, Highlighter, QueryResolver, RegexpFunction, RenderedVerse, ResolutionMode,
    ResolveOptions, ResolvedQuery, ResolverConfig,
};
