//! Canonical book catalog and book selection sets

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Number of books in the canonical catalog
pub const BOOK_COUNT: usize = 66;

/// Zero-based position of a book in the canonical order (Genesis = 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(u8);

impl BookId {
    /// Create a book id, rejecting positions outside the catalog
    pub fn new(id: u32) -> Result<Self> {
        if (id as usize) < BOOK_COUNT {
            Ok(Self(id as u8))
        } else {
            Err(Error::UnknownBookId(id))
        }
    }

    /// Get the raw index
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Value as stored in the `Book` column
    pub fn as_i64(self) -> i64 {
        self.0 as i64
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// Testament a book belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Testament {
    Old,
    New,
}

impl Testament {
    pub fn display_name(self) -> &'static str {
        match self {
            Testament::Old => "Old Testament",
            Testament::New => "New Testament",
        }
    }
}

/// A catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Book {
    pub id: BookId,
    pub name: &'static str,
    pub testament: Testament,
}

const NAMES: [&str; BOOK_COUNT] = [
    // Old Testament
    "Genesis",
    "Exodus",
    "Leviticus",
    "Numbers",
    "Deuteronomy",
    "Joshua",
    "Judges",
    "Ruth",
    "1 Samuel",
    "2 Samuel",
    "1 Kings",
    "2 Kings",
    "1 Chronicles",
    "2 Chronicles",
    "Ezra",
    "Nehemiah",
    "Esther",
    "Job",
    "Psalms",
    "Proverbs",
    "Ecclesiastes",
    "Song of Solomon",
    "Isaiah",
    "Jeremiah",
    "Lamentations",
    "Ezekiel",
    "Daniel",
    "Hosea",
    "Joel",
    "Amos",
    "Obadiah",
    "Jonah",
    "Micah",
    "Nahum",
    "Habakkuk",
    "Zephaniah",
    "Haggai",
    "Zechariah",
    "Malachi",
    // New Testament
    "Matthew",
    "Mark",
    "Luke",
    "John",
    "Acts",
    "Romans",
    "1 Corinthians",
    "2 Corinthians",
    "Galatians",
    "Ephesians",
    "Philippians",
    "Colossians",
    "1 Thessalonians",
    "2 Thessalonians",
    "1 Timothy",
    "2 Timothy",
    "Titus",
    "Philemon",
    "Hebrews",
    "James",
    "1 Peter",
    "2 Peter",
    "1 John",
    "2 John",
    "3 John",
    "Jude",
    "Revelation",
];

/// Index of Matthew, the first New Testament book
const FIRST_NEW_TESTAMENT: usize = 39;

/// The canonical book list, in canonical order
#[derive(Debug, Clone)]
pub struct BookCatalog {
    books: Vec<Book>,
}

impl Default for BookCatalog {
    fn default() -> Self {
        Self::canonical()
    }
}

impl BookCatalog {
    /// The 66-book Protestant canon
    pub fn canonical() -> Self {
        let books = NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| Book {
                id: BookId(i as u8),
                name,
                testament: if i < FIRST_NEW_TESTAMENT {
                    Testament::Old
                } else {
                    Testament::New
                },
            })
            .collect();
        Self { books }
    }

    /// Case-insensitive exact lookup of a book name
    pub fn find_by_name(&self, name: &str) -> Option<BookId> {
        let name = name.to_lowercase();
        self.books
            .iter()
            .find(|b| b.name.to_lowercase() == name)
            .map(|b| b.id)
    }

    /// Look up a book by id
    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.get(id.index())
    }

    /// Display name for a book id
    pub fn name_of(&self, id: BookId) -> Option<&'static str> {
        self.get(id).map(|b| b.name)
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

/// Set of books a search is restricted to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSelection {
    books: BTreeSet<BookId>,
}

impl BookSelection {
    /// Selection containing no books
    pub fn none() -> Self {
        Self::default()
    }

    /// Selection containing every book
    pub fn all() -> Self {
        (0..BOOK_COUNT as u8).map(BookId).collect()
    }

    /// Every book of one testament
    pub fn testament(testament: Testament) -> Self {
        let range = match testament {
            Testament::Old => 0..FIRST_NEW_TESTAMENT,
            Testament::New => FIRST_NEW_TESTAMENT..BOOK_COUNT,
        };
        range.map(|i| BookId(i as u8)).collect()
    }

    /// Decode the packed decimal bitmask used in shareable links.
    ///
    /// Bit `i` (least significant first) selects book `i`. Input that is not
    /// a decimal number selects nothing. Numbers of any length are accepted;
    /// only the low 66 bits are read.
    pub fn from_bitmask(mask: &str) -> Self {
        let mask = mask.trim();
        if mask.is_empty() || !mask.bytes().all(|b| b.is_ascii_digit()) {
            return Self::none();
        }

        // reduce modulo 2^66 while folding so long inputs cannot overflow
        let low_bits = (1u128 << BOOK_COUNT) - 1;
        let bits = mask
            .bytes()
            .fold(0u128, |acc, b| (acc * 10 + u128::from(b - b'0')) & low_bits);

        (0..BOOK_COUNT)
            .filter(|i| bits >> i & 1 == 1)
            .map(|i| BookId(i as u8))
            .collect()
    }

    /// Encode back into the packed bitmask form
    pub fn to_bitmask(&self) -> u128 {
        self.books.iter().fold(0u128, |acc, id| acc | 1 << id.0)
    }

    pub fn contains(&self, id: BookId) -> bool {
        self.books.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = BookId> + '_ {
        self.books.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

impl FromIterator<BookId> for BookSelection {
    fn from_iter<I: IntoIterator<Item = BookId>>(iter: I) -> Self {
        Self {
            books: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order() {
        let catalog = BookCatalog::canonical();
        assert_eq!(catalog.len(), 66);
        assert_eq!(catalog.name_of(BookId::new(0).unwrap()), Some("Genesis"));
        assert_eq!(catalog.name_of(BookId::new(42).unwrap()), Some("John"));
        assert_eq!(catalog.name_of(BookId::new(65).unwrap()), Some("Revelation"));
    }

    #[test]
    fn test_find_by_name_case_insensitive() {
        let catalog = BookCatalog::canonical();
        assert_eq!(catalog.find_by_name("john"), BookId::new(42).ok());
        assert_eq!(catalog.find_by_name("1 JOHN"), BookId::new(61).ok());
        assert_eq!(catalog.find_by_name("song of solomon"), BookId::new(21).ok());
        assert_eq!(catalog.find_by_name("Jn"), None);
    }

    #[test]
    fn test_testaments() {
        let catalog = BookCatalog::canonical();
        let malachi = catalog.get(BookId::new(38).unwrap()).unwrap();
        let matthew = catalog.get(BookId::new(39).unwrap()).unwrap();
        assert_eq!(malachi.testament, Testament::Old);
        assert_eq!(matthew.testament, Testament::New);

        assert_eq!(BookSelection::testament(Testament::Old).len(), 39);
        assert_eq!(BookSelection::testament(Testament::New).len(), 27);
    }

    #[test]
    fn test_book_id_bounds() {
        assert!(BookId::new(65).is_ok());
        assert_eq!(BookId::new(66), Err(Error::UnknownBookId(66)));
        assert_eq!(BookId::new(7).unwrap().to_string(), "07");
    }

    #[test]
    fn test_bitmask_decoding() {
        // 0b1011 -> books 0, 1 and 3
        let selection = BookSelection::from_bitmask("11");
        let ids: Vec<usize> = selection.iter().map(BookId::index).collect();
        assert_eq!(ids, vec![0, 1, 3]);

        let all = (1u128 << 66) - 1;
        assert_eq!(
            BookSelection::from_bitmask(&all.to_string()),
            BookSelection::all()
        );
    }

    #[test]
    fn test_bitmask_non_numeric_selects_nothing() {
        assert!(BookSelection::from_bitmask("").is_empty());
        assert!(BookSelection::from_bitmask("abc").is_empty());
        assert!(BookSelection::from_bitmask("-5").is_empty());
    }

    #[test]
    fn test_bitmask_reads_only_low_bits() {
        // 2^66 + 11
        let selection = BookSelection::from_bitmask("73786976294838206475");
        let ids: Vec<usize> = selection.iter().map(BookId::index).collect();
        assert_eq!(ids, vec![0, 1, 3]);

        // 2^200 has no bits below 66
        let huge = "1606938044258990275541962092341162602522202993782792835301376";
        assert!(BookSelection::from_bitmask(huge).is_empty());

        let long = "9".repeat(500);
        let _ = BookSelection::from_bitmask(&long);
    }

    #[test]
    fn test_bitmask_round_trip() {
        let selection = BookSelection::testament(Testament::New);
        let mask = selection.to_bitmask().to_string();
        assert_eq!(BookSelection::from_bitmask(&mask), selection);
    }

    proptest::proptest! {
        #[test]
        fn prop_bitmask_round_trip(ids in proptest::collection::btree_set(0u32..66, 0..66)) {
            let selection: BookSelection = ids.iter().map(|&i| BookId::new(i).unwrap()).collect();
            let decoded = BookSelection::from_bitmask(&selection.to_bitmask().to_string());
            proptest::prop_assert_eq!(decoded, selection);
        }
    }
}
