//! Book entity and its metadata record.
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Gutenberg book identifier. Always > 0.
pub type BookId = u32;

/// Raw book metadata, as found in the corpus.
///
/// Every field is optional: absent fields are simply not part of the record.
/// Set-valued fields follow the catalogue arity rules checked by [BookMetadata::validate].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BookMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookshelves: Option<BTreeSet<String>>,
}

impl BookMetadata {
    /// Check field arities: exactly one title and language, at least one author.
    /// Bookshelves may be empty.
    pub fn validate(&self) -> Result<(), Error> {
        check_arity("title", &self.title, |n| n == 1)?;
        check_arity("authors", &self.authors, |n| n >= 1)?;
        check_arity("language", &self.language, |n| n == 1)?;
        Ok(())
    }

    /// Get the set held by a named feature.
    ///
    /// `id` is not a feature. Unknown names are rejected.
    pub fn feature(&self, name: &str) -> Result<Option<&BTreeSet<String>>, Error> {
        match name {
            "title" => Ok(self.title.as_ref()),
            "authors" => Ok(self.authors.as_ref()),
            "language" => Ok(self.language.as_ref()),
            "bookshelves" => Ok(self.bookshelves.as_ref()),
            other => Err(Error::InvalidArgument(format!(
                "unknown book feature {:?}, should be one of [\"title\", \"authors\", \"language\", \"bookshelves\"]",
                other
            ))),
        }
    }
}

fn check_arity(
    name: &str,
    field: &Option<BTreeSet<String>>,
    valid: impl Fn(usize) -> bool,
) -> Result<(), Error> {
    match field {
        Some(values) if !valid(values.len()) => Err(Error::InvalidArgument(format!(
            "book {} has {} values",
            name,
            values.len()
        ))),
        _ => Ok(()),
    }
}

/// Takes the sole element of a singleton field.
fn single(name: &str, field: &Option<BTreeSet<String>>) -> Result<String, Error> {
    match field {
        Some(values) if values.len() == 1 => Ok(values.iter().next().cloned().unwrap_or_default()),
        Some(values) => Err(Error::InvalidArgument(format!(
            "book {} should have exactly one value, got {}",
            name,
            values.len()
        ))),
        None => Err(Error::InvalidArgument(format!("book {} is missing", name))),
    }
}

/// A book from the catalogue.
///
/// Books are identified by their id: equality and hashing only look at it.
#[derive(Debug, Clone)]
pub struct Book {
    id: BookId,
    title: String,
    authors: BTreeSet<String>,
    language: String,
    bookshelves: BTreeSet<String>,
}

impl Book {
    /// Build a book from its catalogue id and metadata.
    ///
    /// Fails on a non-positive id, on an id that disagrees with `metadata.id`
    /// or when title/language are not singletons.
    pub fn new(id: i64, metadata: &BookMetadata) -> Result<Self, Error> {
        let id = to_book_id(id)?;
        if let Some(meta_id) = metadata.id {
            if meta_id != i64::from(id) {
                return Err(Error::InvalidArgument(format!(
                    "book id {} does not match metadata id {}",
                    id, meta_id
                )));
            }
        }
        metadata.validate()?;

        Ok(Self {
            id,
            title: single("title", &metadata.title)?,
            authors: metadata.authors.clone().unwrap_or_default(),
            language: single("language", &metadata.language)?,
            bookshelves: metadata.bookshelves.clone().unwrap_or_default(),
        })
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn authors(&self) -> &BTreeSet<String> {
        &self.authors
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn bookshelves(&self) -> &BTreeSet<String> {
        &self.bookshelves
    }

    pub fn add_bookshelf(&mut self, shelf: impl Into<String>) {
        self.bookshelves.insert(shelf.into());
    }

    /// Metadata record of the book.
    ///
    /// Empty authors/bookshelves are left out, so that a record built from
    /// metadata without these fields reads back identical.
    pub fn metadata(&self) -> BookMetadata {
        let non_empty = |set: &BTreeSet<String>| Some(set.clone()).filter(|s| !s.is_empty());
        BookMetadata {
            id: Some(i64::from(self.id)),
            title: Some(BTreeSet::from([self.title.clone()])),
            authors: non_empty(&self.authors),
            language: Some(BTreeSet::from([self.language.clone()])),
            bookshelves: non_empty(&self.bookshelves),
        }
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Book {}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

fn to_book_id(id: i64) -> Result<BookId, Error> {
    BookId::try_from(id)
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            Error::InvalidArgument(format!("book id must be a positive integer, got {}", id))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[&str]) -> Option<BTreeSet<String>> {
        Some(values.iter().map(|v| v.to_string()).collect())
    }

    fn alice() -> BookMetadata {
        BookMetadata {
            id: None,
            title: set(&["Alice's Adventures in Wonderland"]),
            authors: set(&["Carroll, Lewis"]),
            language: set(&["en"]),
            bookshelves: set(&["Children's Literature"]),
        }
    }

    #[test]
    fn new_book() {
        let book = Book::new(11, &alice()).unwrap();
        assert_eq!(book.id(), 11);
        assert_eq!(book.title(), "Alice's Adventures in Wonderland");
        assert_eq!(book.language(), "en");
        assert!(book.authors().contains("Carroll, Lewis"));
    }

    #[test]
    fn non_positive_id() {
        assert!(matches!(
            Book::new(0, &alice()),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Book::new(-3, &alice()),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn mismatching_id() {
        let mut meta = alice();
        meta.id = Some(12);
        assert!(Book::new(11, &meta).is_err());
    }

    #[test]
    fn title_arity() {
        let mut meta = alice();
        meta.title = set(&["Alice", "Through the Looking-Glass"]);
        assert!(matches!(
            Book::new(11, &meta),
            Err(Error::InvalidArgument(_))
        ));

        meta.title = None;
        assert!(Book::new(11, &meta).is_err());
    }

    #[test]
    fn empty_authors_rejected() {
        let mut meta = alice();
        meta.authors = Some(BTreeSet::new());
        assert!(meta.validate().is_err());
    }

    #[test]
    fn add_bookshelf() {
        let mut book = Book::new(11, &alice()).unwrap();
        book.add_bookshelf("Fantasy");
        book.add_bookshelf("Fantasy");
        assert_eq!(book.bookshelves().len(), 2);
        assert!(book.metadata().bookshelves.unwrap().contains("Fantasy"));
    }

    #[test]
    fn metadata_roundtrip() {
        let mut meta = alice();
        meta.id = Some(11);
        let book = Book::new(11, &meta).unwrap();
        assert_eq!(book.metadata(), meta);

        // absent optional fields stay absent
        meta.bookshelves = None;
        let book = Book::new(11, &meta).unwrap();
        assert_eq!(book.metadata(), meta);
    }

    #[test]
    fn equality_by_id() {
        let a = Book::new(11, &alice()).unwrap();
        let mut b = Book::new(11, &alice()).unwrap();
        b.add_bookshelf("Fantasy");
        assert_eq!(a, b);
    }

    #[test]
    fn deserialize() {
        let meta: BookMetadata = serde_json::from_str(
            r#"{"title":["Emma"],"authors":["Austen, Jane"],"language":["en"],"bookshelves":[]}"#,
        )
        .unwrap();
        let book = Book::new(158, &meta).unwrap();
        assert_eq!(book.title(), "Emma");
        assert!(book.bookshelves().is_empty());
    }
}
