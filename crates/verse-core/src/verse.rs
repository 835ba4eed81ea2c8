//! Verse references and store rows

use crate::book::{BookCatalog, BookId};
use crate::predicate::Predicate;
use serde::{Deserialize, Serialize};

/// A parsed "Book Chapter[:Verse[-Verse]]" reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseReference {
    pub book_id: BookId,
    pub chapter: u32,
    /// `None` selects the whole chapter
    pub start_verse: Option<u32>,
    pub end_verse: Option<u32>,
}

impl VerseReference {
    /// Reference to a whole chapter
    pub fn chapter(book_id: BookId, chapter: u32) -> Self {
        Self {
            book_id,
            chapter,
            start_verse: None,
            end_verse: None,
        }
    }

    /// Reference to a verse range (a single verse when `start == end`)
    pub fn verses(book_id: BookId, chapter: u32, start: u32, end: u32) -> Self {
        Self {
            book_id,
            chapter,
            start_verse: Some(start),
            end_verse: Some(end),
        }
    }

    pub fn is_whole_chapter(&self) -> bool {
        self.start_verse.is_none()
    }

    pub fn is_single_verse(&self) -> bool {
        self.start_verse.is_some() && self.start_verse == self.end_verse
    }

    /// Predicate selecting the referenced rows
    pub fn predicate(&self) -> Predicate {
        let book = ("Book", "=", self.book_id.as_i64());
        let chapter = ("Chapter", "=", self.chapter as i64);

        match (self.start_verse, self.end_verse) {
            (None, _) => Predicate::conjunction([book, chapter]),
            (Some(start), Some(end)) if end != start => Predicate::conjunction([
                book,
                chapter,
                ("Versecount", ">=", start as i64),
                ("Versecount", "<=", end as i64),
            ]),
            (Some(start), _) => {
                Predicate::conjunction([book, chapter, ("Versecount", "=", start as i64)])
            }
        }
    }

    /// Human readable label such as "John 3:16-21"
    pub fn label(&self, catalog: &BookCatalog) -> String {
        let name = catalog.name_of(self.book_id).unwrap_or("?");
        match (self.start_verse, self.end_verse) {
            (None, _) => format!("{} {}", name, self.chapter),
            (Some(start), Some(end)) if end != start => {
                format!("{} {}:{}-{}", name, self.chapter, start, end)
            }
            (Some(start), _) => format!("{} {}:{}", name, self.chapter, start),
        }
    }
}

/// A row of the verse table: `(Book, Chapter, Versecount, verse)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRow {
    #[serde(rename = "Book")]
    pub book: u32,
    #[serde(rename = "Chapter")]
    pub chapter: u32,
    #[serde(rename = "Versecount")]
    pub versecount: u32,
    pub verse: String,
}

impl VerseRow {
    pub fn new(book: u32, chapter: u32, versecount: u32, verse: impl Into<String>) -> Self {
        Self {
            book,
            chapter,
            versecount,
            verse: verse.into(),
        }
    }

    /// Canonical ordering key
    pub fn sort_key(&self) -> (u32, u32, u32) {
        (self.book, self.chapter, self.versecount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::BindValue;

    fn john() -> BookId {
        BookId::new(42).unwrap()
    }

    #[test]
    fn test_whole_chapter_predicate() {
        let p = VerseReference::chapter(john(), 3).predicate();
        assert_eq!(p.sql, "Book = ? AND Chapter = ?");
        assert_eq!(p.values, vec![BindValue::Integer(42), BindValue::Integer(3)]);
    }

    #[test]
    fn test_single_verse_predicate() {
        let r = VerseReference::verses(john(), 3, 16, 16);
        assert!(r.is_single_verse());
        let p = r.predicate();
        assert_eq!(p.sql, "Book = ? AND Chapter = ? AND Versecount = ?");
        assert_eq!(p.values.last(), Some(&BindValue::Integer(16)));
    }

    #[test]
    fn test_range_predicate() {
        let p = VerseReference::verses(john(), 3, 16, 21).predicate();
        assert_eq!(
            p.sql,
            "Book = ? AND Chapter = ? AND Versecount >= ? AND Versecount <= ?"
        );
        assert_eq!(
            p.values,
            vec![
                BindValue::Integer(42),
                BindValue::Integer(3),
                BindValue::Integer(16),
                BindValue::Integer(21)
            ]
        );
        assert!(p.is_consistent());
    }

    #[test]
    fn test_label() {
        let catalog = BookCatalog::canonical();
        assert_eq!(VerseReference::chapter(john(), 3).label(&catalog), "John 3");
        assert_eq!(
            VerseReference::verses(john(), 3, 16, 16).label(&catalog),
            "John 3:16"
        );
        assert_eq!(
            VerseReference::verses(john(), 3, 16, 21).label(&catalog),
            "John 3:16-21"
        );
    }

    #[test]
    fn test_row_serde_column_names() {
        let row = VerseRow::new(42, 3, 16, "For God so loved the world");
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["Book"], 42);
        assert_eq!(json["Versecount"], 16);
        assert_eq!(json["verse"], "For God so loved the world");
    }
}
