/*! Paragraph selection

Selects paragraphs from a [ParagraphTable] and assembles chains of consecutive ones.

A query combines optional selectors:
- an explicit set of paragraph ids, exclusive with the two others,
- a set of books (given by id or by [Book]),
- a list of tag groups: a paragraph has to intersect *every* group.

```
use parorder::corpus::Tag;
use parorder::query::{ParagraphQuery, TagSelector};
use std::collections::BTreeSet;

// paragraphs of book 1 tagged PARAGRAPH and (SHORT or MEDIUM), by pairs
let query = ParagraphQuery::new()
    .books([1u32])
    .tags([
        TagSelector::from(Tag::Paragraph),
        TagSelector::from(BTreeSet::from([Tag::Short.code(), Tag::Medium.code()])),
    ])
    .num_sequential(2);
```
!*/
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use log::debug;

use crate::corpus::{
    Book, BookId, Paragraph, ParagraphId, ParagraphTable, Rendered, Tag, TagCode, TextFormat,
};
use crate::error::Error;

/// A run of consecutive paragraphs, each one being the `next_id` of the previous.
pub type Chain<'t> = Vec<&'t Paragraph>;

/// A book designated either by its id or by the book itself.
#[derive(Debug, Clone, Copy)]
pub enum BookSelector<'a> {
    Id(BookId),
    Book(&'a Book),
}

impl BookSelector<'_> {
    pub fn id(&self) -> BookId {
        match self {
            BookSelector::Id(id) => *id,
            BookSelector::Book(book) => book.id(),
        }
    }
}

impl From<BookId> for BookSelector<'_> {
    fn from(id: BookId) -> Self {
        BookSelector::Id(id)
    }
}

impl<'a> From<&'a Book> for BookSelector<'a> {
    fn from(book: &'a Book) -> Self {
        BookSelector::Book(book)
    }
}

/// One required tag group: a single tag, or "at least one of" several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagSelector {
    Single(TagCode),
    AnyOf(BTreeSet<TagCode>),
}

impl TagSelector {
    /// Does the tag set satisfy this group?
    pub fn matches(&self, tags: &BTreeSet<TagCode>) -> bool {
        match self {
            TagSelector::Single(tag) => tags.contains(tag),
            TagSelector::AnyOf(group) => !tags.is_disjoint(group),
        }
    }
}

impl From<TagCode> for TagSelector {
    fn from(tag: TagCode) -> Self {
        TagSelector::Single(tag)
    }
}

impl From<Tag> for TagSelector {
    fn from(tag: Tag) -> Self {
        TagSelector::Single(tag.code())
    }
}

impl From<BTreeSet<TagCode>> for TagSelector {
    fn from(group: BTreeSet<TagCode>) -> Self {
        TagSelector::AnyOf(group)
    }
}

impl FromStr for TagSelector {
    type Err = Error;

    /// Parses a comma separated list of tag codes or names.
    /// A single element gives a [TagSelector::Single].
    ///
    /// `8`, `paragraph`, `0,1,2` and `short,medium` are valid.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let codes = s
            .split(',')
            .map(|part| match part.trim().parse::<TagCode>() {
                Ok(code) => Ok(code),
                Err(_) => Tag::from_str(part).map(|tag| tag.code()),
            })
            .collect::<Result<Vec<TagCode>, Error>>()?;

        match codes.as_slice() {
            [code] => Ok(TagSelector::Single(*code)),
            _ => Ok(TagSelector::AnyOf(codes.into_iter().collect())),
        }
    }
}

/// Paragraph query. Build it with the selector methods, then run it
/// with [ParagraphQuery::select] or [ParagraphQuery::chains].
#[derive(Debug, Clone)]
pub struct ParagraphQuery<'a> {
    paragraph_ids: Option<BTreeSet<ParagraphId>>,
    books: Option<Vec<BookSelector<'a>>>,
    tags: Option<Vec<TagSelector>>,
    num_sequential: usize,
}

impl Default for ParagraphQuery<'_> {
    fn default() -> Self {
        Self {
            paragraph_ids: None,
            books: None,
            tags: None,
            num_sequential: 1,
        }
    }
}

impl<'a> ParagraphQuery<'a> {
    /// Empty query: selects everything, no chaining.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paragraph_ids(mut self, ids: impl IntoIterator<Item = ParagraphId>) -> Self {
        self.paragraph_ids = Some(ids.into_iter().collect());
        self
    }

    pub fn books<B>(mut self, books: impl IntoIterator<Item = B>) -> Self
    where
        B: Into<BookSelector<'a>>,
    {
        self.books = Some(books.into_iter().map(Into::into).collect());
        self
    }

    pub fn tags<T>(mut self, tags: impl IntoIterator<Item = T>) -> Self
    where
        T: Into<TagSelector>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn num_sequential(mut self, num_sequential: usize) -> Self {
        self.num_sequential = num_sequential;
        self
    }

    fn validate(&self) -> Result<(), Error> {
        if self.paragraph_ids.is_some() && (self.books.is_some() || self.tags.is_some()) {
            return Err(Error::InvalidArgument(
                "if paragraph ids are given, books and tags can't be accepted".to_string(),
            ));
        }
        if self.num_sequential == 0 {
            return Err(Error::InvalidArgument(
                "num_sequential must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply the id/book/tag selectors to the table.
    pub fn select<'t>(
        &self,
        table: &'t ParagraphTable,
    ) -> Result<BTreeMap<ParagraphId, &'t Paragraph>, Error> {
        self.validate()?;

        let books: Option<BTreeSet<BookId>> = self
            .books
            .as_ref()
            .map(|books| books.iter().map(BookSelector::id).collect());
        debug!(
            "selecting paragraphs: ids={:?} books={:?} tags={:?}",
            self.paragraph_ids, books, self.tags
        );

        let selected = table
            .iter()
            .filter(|(_, par)| match &self.paragraph_ids {
                Some(ids) => par.id().map_or(false, |id| ids.contains(&id)),
                None => true,
            })
            .filter(|(_, par)| match &books {
                Some(books) => par.book_id().map_or(false, |id| books.contains(&id)),
                None => true,
            })
            .filter(|(_, par)| match &self.tags {
                Some(groups) => groups.iter().all(|group| group.matches(par.tags())),
                None => true,
            })
            .map(|(key, par)| (*key, par))
            .collect();

        Ok(selected)
    }

    /// Select paragraphs, then build every chain of `num_sequential` consecutive ones.
    ///
    /// Links are followed inside the *selected* paragraphs only:
    /// a chain whose next link is missing from the selection is dropped.
    /// Chains come in table order of their first paragraph.
    pub fn chains<'t>(&self, table: &'t ParagraphTable) -> Result<Vec<Chain<'t>>, Error> {
        let selected = self.select(table)?;

        if self.num_sequential == 1 {
            return Ok(selected.into_values().map(|par| vec![par]).collect());
        }

        let chains: Vec<Chain<'t>> = selected
            .values()
            .filter_map(|first| {
                let mut chain = Vec::with_capacity(self.num_sequential);
                chain.push(*first);
                let mut current = *first;
                for _ in 1..self.num_sequential {
                    current = current.next_id().and_then(|id| selected.get(&id)).copied()?;
                    chain.push(current);
                }
                Some(chain)
            })
            .collect();

        debug!(
            "{} chains of {} out of {} selected paragraphs",
            chains.len(),
            self.num_sequential,
            selected.len()
        );
        Ok(chains)
    }
}

/// Render every paragraph of the chains in the requested format.
pub fn render_chains(
    chains: &[Chain<'_>],
    format: TextFormat,
    lowercase: bool,
) -> Vec<Vec<Rendered>> {
    chains
        .iter()
        .map(|chain| chain.iter().map(|par| par.text(format, lowercase)).collect())
        .collect()
}
