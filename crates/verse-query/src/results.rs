//! Turning store rows into rendered, highlighted verses

use crate::highlight::{HighlightSpan, Highlighter};
use serde::{Deserialize, Serialize};
use verse_core::{BookCatalog, BookId, BookSelection, VerseRow};

/// A verse ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedVerse {
    pub book_id: BookId,
    pub book: String,
    pub chapter: u32,
    pub versecount: u32,
    pub spans: Vec<HighlightSpan>,
}

impl RenderedVerse {
    /// "Book Chapter:Verse"
    pub fn label(&self) -> String {
        format!("{} {}:{}", self.book, self.chapter, self.versecount)
    }

    pub fn match_count(&self) -> usize {
        self.spans.iter().filter(|s| s.is_match()).count()
    }
}

/// Order, filter and highlight store rows.
///
/// Rows are sorted canonically, rows outside `selection` are dropped, and so
/// are rows whose book id the catalog does not know.
pub fn assemble(
    rows: impl IntoIterator<Item = VerseRow>,
    selection: &BookSelection,
    catalog: &BookCatalog,
    highlighter: &Highlighter,
) -> Vec<RenderedVerse> {
    let mut rows: Vec<VerseRow> = rows.into_iter().collect();
    rows.sort_by_key(VerseRow::sort_key);

    rows.into_iter()
        .filter_map(|row| {
            let book_id = BookId::new(row.book).ok()?;
            if !selection.contains(book_id) {
                return None;
            }
            let book = catalog.name_of(book_id)?;
            Some(RenderedVerse {
                book_id,
                book: book.to_string(),
                chapter: row.chapter,
                versecount: row.versecount,
                spans: highlighter.spans(&row.verse),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use verse_core::Testament;

    fn rows() -> Vec<VerseRow> {
        vec![
            VerseRow::new(42, 3, 17, "For God sent not his Son into the world to condemn the world"),
            VerseRow::new(0, 1, 1, "In the beginning God created the heaven and the earth."),
            VerseRow::new(42, 3, 16, "For God so loved the world"),
            VerseRow::new(99, 1, 1, "not a book"),
        ]
    }

    #[test]
    fn test_sorted_and_unknown_books_dropped() {
        let verses = assemble(
            rows(),
            &BookSelection::all(),
            &BookCatalog::canonical(),
            &Highlighter::disabled(),
        );
        let labels: Vec<String> = verses.iter().map(RenderedVerse::label).collect();
        assert_eq!(labels, vec!["Genesis 1:1", "John 3:16", "John 3:17"]);
    }

    #[test]
    fn test_selection_filters_books() {
        let verses = assemble(
            rows(),
            &BookSelection::testament(Testament::New),
            &BookCatalog::canonical(),
            &Highlighter::disabled(),
        );
        assert_eq!(verses.len(), 2);
        assert!(verses.iter().all(|v| v.book == "John"));

        let none = assemble(
            rows(),
            &BookSelection::none(),
            &BookCatalog::canonical(),
            &Highlighter::disabled(),
        );
        assert!(none.is_empty());
    }

    #[test]
    fn test_highlighting_applied() {
        let highlighter = Highlighter::new(&["world"], false).unwrap();
        let verses = assemble(
            rows(),
            &BookSelection::all(),
            &BookCatalog::canonical(),
            &highlighter,
        );
        assert_eq!(verses[0].match_count(), 0);
        assert_eq!(verses[1].match_count(), 1);
        assert_eq!(verses[2].match_count(), 2);
    }
}
