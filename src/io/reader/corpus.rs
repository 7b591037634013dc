/*! Corpus loader

Reconstructs books and paragraphs from a corpus directory (see [super]).
!*/
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use log::{info, warn};

use super::source::{load, locate};
use crate::corpus::{
    Book, BookId, BookMetadata, Paragraph, ParagraphId, ParagraphMetadata, ParagraphTable,
    Sentences,
};
use crate::error::Error;

pub const BOOKS_DATA: &str = "books_data.json";
pub const BOOKSHELVES: &str = "books_shelves.json";
pub const PARAGRAPH_METADATA: &str = "paragraph_metadata.json";
pub const PARAGRAPH_DATA: &str = "paragraph_data.json";

/// Book selection for [Corpus::books].
#[derive(Debug, Clone, Default)]
pub enum BookFilter {
    #[default]
    All,
    /// Books whose id is in the set. Unknown ids are ignored.
    Ids(BTreeSet<BookId>),
    /// Books whose metadata contains, for every feature, all the requested values.
    /// e.g. `{"bookshelves": {"Gothic Fiction"}, "language": {"en"}}`
    Features(BTreeMap<String, BTreeSet<String>>),
}

impl BookFilter {
    fn keep(&self, id: i64, metadata: &BookMetadata) -> Result<bool, Error> {
        match self {
            BookFilter::All => Ok(true),
            BookFilter::Ids(ids) => Ok(BookId::try_from(id).map_or(false, |id| ids.contains(&id))),
            BookFilter::Features(features) => {
                for (feature, values) in features {
                    let keep = match metadata.feature(feature)? {
                        Some(present) => values.is_subset(present),
                        None => values.is_empty(),
                    };
                    if !keep {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }
}

/// Corpus located in a directory.
///
/// Nothing is read at creation: every call loads the files it needs.
#[derive(Debug, Clone)]
pub struct Corpus {
    src: PathBuf,
}

impl Corpus {
    pub fn new(src: &Path) -> Self {
        Self {
            src: src.to_path_buf(),
        }
    }

    /// Get a reference to the corpus location.
    pub fn src(&self) -> &Path {
        &self.src
    }

    fn required(&self, name: &str) -> Result<PathBuf, Error> {
        locate(&self.src, name).ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no {} (or {}.gz) in {:?}", name, name, self.src),
            ))
        })
    }

    /// Raw metadata of the books matching `filter`.
    ///
    /// A corpus without book file has no books.
    pub fn books_metadata(
        &self,
        filter: &BookFilter,
    ) -> Result<BTreeMap<i64, BookMetadata>, Error> {
        let metadata: BTreeMap<i64, BookMetadata> = match locate(&self.src, BOOKS_DATA) {
            Some(path) => load(&path)?,
            None => {
                warn!("no book data in {:?}", self.src());
                BTreeMap::new()
            }
        };

        let mut kept = BTreeMap::new();
        for (id, meta) in metadata {
            if filter.keep(id, &meta)? {
                kept.insert(id, meta);
            }
        }
        Ok(kept)
    }

    /// Books matching `filter`.
    pub fn books(&self, filter: &BookFilter) -> Result<BTreeMap<BookId, Book>, Error> {
        build_books(self.books_metadata(filter)?)
    }

    /// Bookshelves and the ids of their books.
    ///
    /// `names` restricts the result to these shelves (unknown names are ignored).
    pub fn bookshelves(
        &self,
        names: Option<&BTreeSet<String>>,
    ) -> Result<BTreeMap<String, BTreeSet<BookId>>, Error> {
        let shelves: BTreeMap<String, BTreeSet<BookId>> = match locate(&self.src, BOOKSHELVES) {
            Some(path) => load(&path)?,
            None => {
                warn!("no bookshelves in {:?}", self.src());
                BTreeMap::new()
            }
        };

        Ok(match names {
            Some(names) => shelves
                .into_iter()
                .filter(|(name, _)| names.contains(name))
                .collect(),
            None => shelves,
        })
    }

    /// Load the whole paragraph table.
    pub fn paragraphs(&self) -> Result<ParagraphTable, Error> {
        let metadata: BTreeMap<i64, ParagraphMetadata> = load(&self.required(PARAGRAPH_METADATA)?)?;
        let text: BTreeMap<i64, Sentences> = load(&self.required(PARAGRAPH_DATA)?)?;

        let table = build_paragraphs(metadata, text)?;
        info!("loaded {} paragraphs from {:?}", table.len(), self.src());
        Ok(table)
    }
}

/// Build books from their metadata, keyed by id.
pub fn build_books(metadata: BTreeMap<i64, BookMetadata>) -> Result<BTreeMap<BookId, Book>, Error> {
    metadata
        .iter()
        .map(|(id, meta)| Book::new(*id, meta).map(|book| (book.id(), book)))
        .collect()
}

/// Build the paragraph table from metadata and text sharing the same keys.
pub fn build_paragraphs(
    metadata: BTreeMap<i64, ParagraphMetadata>,
    mut text: BTreeMap<i64, Sentences>,
) -> Result<ParagraphTable, Error> {
    if !metadata.keys().eq(text.keys()) {
        let meta_keys: BTreeSet<&i64> = metadata.keys().collect();
        let text_keys: BTreeSet<&i64> = text.keys().collect();
        return Err(Error::Contract(format!(
            "paragraph metadata and text keys differ ({} keys without text, {} keys without metadata)",
            meta_keys.difference(&text_keys).count(),
            text_keys.difference(&meta_keys).count()
        )));
    }

    metadata
        .into_iter()
        .map(|(key, meta)| -> Result<(ParagraphId, Paragraph), Error> {
            let key = ParagraphId::try_from(key)
                .ok()
                .filter(|key| *key > 0)
                .ok_or_else(|| {
                    Error::InvalidArgument(format!(
                        "paragraph key must be a positive integer, got {}",
                        key
                    ))
                })?;
            let sentences = text.remove(&i64::from(key)).unwrap_or_default();
            Ok((key, Paragraph::from_metadata(sentences, &meta)?))
        })
        .collect()
}
