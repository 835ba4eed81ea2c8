//! Verse reference parsing ("John 3:16-21", "1 John 4", ...)

use regex::{Captures, Regex};
use std::sync::LazyLock;
use verse_core::{BookCatalog, VerseReference};

/// Book, chapter, start verse and optional end verse
static VERSE_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+([0-9]+):([0-9]+)(?:-([0-9]+))?$").unwrap());

/// Book and chapter only
static CHAPTER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.+?)\s+([0-9]+)$").unwrap());

/// Parse `query` as a verse reference.
///
/// The book name must match a catalog entry (ignoring case); otherwise the
/// query is not a reference and `None` is returned.
pub fn parse_reference(query: &str, catalog: &BookCatalog) -> Option<VerseReference> {
    let query = query.trim();

    if let Some(reference) = VERSE_RANGE_RE
        .captures(query)
        .and_then(|caps| verse_range(&caps, catalog))
    {
        return Some(reference);
    }

    let caps = CHAPTER_RE.captures(query)?;
    let book_id = catalog.find_by_name(caps[1].trim())?;
    let chapter = caps[2].parse().ok()?;
    Some(VerseReference::chapter(book_id, chapter))
}

fn verse_range(caps: &Captures<'_>, catalog: &BookCatalog) -> Option<VerseReference> {
    let book_id = catalog.find_by_name(caps[1].trim())?;
    let chapter = caps[2].parse().ok()?;
    let start = caps[3].parse().ok()?;
    let end = match caps.get(4) {
        Some(m) => m.as_str().parse().ok()?,
        None => start,
    };
    Some(VerseReference::verses(book_id, chapter, start, end))
}
