//! Paragraph entity.
//!
//! Paragraphs of a same book form a doubly linked chain through [Paragraph::next_id]
//! and [Paragraph::prev_id]. Links are plain ids, resolved against a
//! [ParagraphTable](super::ParagraphTable) by whoever walks them: an id that is absent from the table just means that the chain stops there.
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::book::BookId;
use super::tags::TagCode;
use crate::error::Error;

/// Paragraph identifier. Always > 0.
pub type ParagraphId = u32;

/// Paragraph text: sentences of word tokens.
pub type Sentences = Vec<Vec<String>>;

/// Raw paragraph metadata, as found in the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ParagraphMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeSet<TagCode>>,
}

/// Text rendering formats, see [Paragraph::text].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    /// sentences of tokens
    Sentences,
    /// flat list of tokens
    Words,
    /// tokens joined by spaces
    Text,
}

impl FromStr for TextFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sentences" => Ok(TextFormat::Sentences),
            "words" => Ok(TextFormat::Words),
            "text" => Ok(TextFormat::Text),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for TextFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TextFormat::Sentences => "sentences",
            TextFormat::Words => "words",
            TextFormat::Text => "text",
        };
        f.write_str(name)
    }
}

/// Paragraph text rendered in a given [TextFormat].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Rendered {
    Sentences(Sentences),
    Words(Vec<String>),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    id: Option<ParagraphId>,
    book_id: Option<BookId>,
    next_id: Option<ParagraphId>,
    prev_id: Option<ParagraphId>,
    tags: BTreeSet<TagCode>,
    text: Sentences,
}

impl Paragraph {
    /// Create a paragraph with no identity, book, links or tags.
    pub fn new(text: Sentences) -> Self {
        Self {
            id: None,
            book_id: None,
            next_id: None,
            prev_id: None,
            tags: BTreeSet::new(),
            text,
        }
    }

    /// Create a paragraph from its text and metadata.
    ///
    /// Every id-like field that is present has to be a positive integer.
    pub fn from_metadata(text: Sentences, metadata: &ParagraphMetadata) -> Result<Self, Error> {
        Ok(Self {
            id: positive("id", metadata.id)?,
            book_id: positive("book_id", metadata.book_id)?,
            next_id: positive("next_id", metadata.next_id)?,
            prev_id: positive("prev_id", metadata.prev_id)?,
            tags: metadata.tags.clone().unwrap_or_default(),
            text,
        })
    }

    pub fn id(&self) -> Option<ParagraphId> {
        self.id
    }

    pub fn has_book(&self) -> bool {
        self.book_id.is_some()
    }

    pub fn book_id(&self) -> Option<BookId> {
        self.book_id
    }

    pub fn next_id(&self) -> Option<ParagraphId> {
        self.next_id
    }

    pub fn prev_id(&self) -> Option<ParagraphId> {
        self.prev_id
    }

    /// Set the next paragraph id. `None` leaves the current link untouched.
    pub fn set_next_id(&mut self, next_id: Option<i64>) -> Result<(), Error> {
        if let Some(id) = positive("next_id", next_id)? {
            self.next_id = Some(id);
        }
        Ok(())
    }

    /// Set the previous paragraph id. `None` leaves the current link untouched.
    pub fn set_prev_id(&mut self, prev_id: Option<i64>) -> Result<(), Error> {
        if let Some(id) = positive("prev_id", prev_id)? {
            self.prev_id = Some(id);
        }
        Ok(())
    }

    pub fn tags(&self) -> &BTreeSet<TagCode> {
        &self.tags
    }

    pub fn add_tag(&mut self, tag: impl Into<TagCode>) {
        self.tags.insert(tag.into());
    }

    pub fn add_tags<I, T>(&mut self, tags: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<TagCode>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
    }

    /// Metadata record of the paragraph. Absent fields (and an empty tag set) are left out.
    pub fn metadata(&self) -> ParagraphMetadata {
        ParagraphMetadata {
            id: self.id.map(i64::from),
            book_id: self.book_id.map(i64::from),
            prev_id: self.prev_id.map(i64::from),
            next_id: self.next_id.map(i64::from),
            tags: Some(self.tags.clone()).filter(|tags| !tags.is_empty()),
        }
    }

    pub fn sentences(&self) -> &Sentences {
        &self.text
    }

    /// Flattened tokens.
    pub fn words(&self) -> Vec<String> {
        self.text.iter().flatten().cloned().collect()
    }

    pub fn word_count(&self) -> usize {
        self.text.iter().map(Vec::len).sum()
    }

    pub fn sentence_count(&self) -> usize {
        self.text.len()
    }

    /// Render the paragraph text in the requested format, optionally lowercased.
    pub fn text(&self, format: TextFormat, lowercase: bool) -> Rendered {
        let case = |word: &String| {
            if lowercase {
                word.to_lowercase()
            } else {
                word.clone()
            }
        };

        match format {
            TextFormat::Sentences => Rendered::Sentences(
                self.text
                    .iter()
                    .map(|sentence| sentence.iter().map(case).collect())
                    .collect(),
            ),
            TextFormat::Words => Rendered::Words(self.text.iter().flatten().map(case).collect()),
            TextFormat::Text => Rendered::Text(self.text.iter().flatten().map(case).join(" ")),
        }
    }
}

fn positive(name: &str, id: Option<i64>) -> Result<Option<u32>, Error> {
    match id {
        None => Ok(None),
        Some(id) => u32::try_from(id)
            .ok()
            .filter(|id| *id > 0)
            .map(Some)
            .ok_or_else(|| {
                Error::InvalidArgument(format!("{} must be a positive integer, got {}", name, id))
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Tag;

    fn sentences(text: &str) -> Sentences {
        text.split(". ")
            .map(|s| s.split_whitespace().map(String::from).collect())
            .collect()
    }

    #[test]
    fn from_metadata() {
        let meta = ParagraphMetadata {
            id: Some(3),
            book_id: Some(1),
            prev_id: Some(2),
            next_id: Some(4),
            tags: Some(BTreeSet::from([8])),
        };
        let p =
            Paragraph::from_metadata(sentences("Call me Ishmael. Some years ago"), &meta).unwrap();
        assert_eq!(p.id(), Some(3));
        assert!(p.has_book());
        assert_eq!(p.next_id(), Some(4));
        assert_eq!(p.prev_id(), Some(2));
        assert!(p.tags().contains(&Tag::Paragraph.code()));
    }

    #[test]
    fn non_positive_ids() {
        let meta = ParagraphMetadata {
            book_id: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            Paragraph::from_metadata(Vec::new(), &meta),
            Err(Error::InvalidArgument(_))
        ));

        let meta = ParagraphMetadata {
            next_id: Some(-1),
            ..Default::default()
        };
        assert!(Paragraph::from_metadata(Vec::new(), &meta).is_err());
    }

    #[test]
    fn bookless() {
        let p = Paragraph::new(sentences("a b c"));
        assert!(!p.has_book());
        assert_eq!(p.id(), None);
    }

    #[test]
    fn links() {
        let mut p = Paragraph::new(Vec::new());
        p.set_next_id(Some(5)).unwrap();
        p.set_next_id(None).unwrap();
        assert_eq!(p.next_id(), Some(5));
        assert!(p.set_prev_id(Some(0)).is_err());
        assert_eq!(p.prev_id(), None);
    }

    #[test]
    fn add_tags() {
        let mut p = Paragraph::new(Vec::new());
        p.add_tag(Tag::Short);
        p.add_tags([4u8, 5]);
        p.add_tags(vec![Tag::Short]);
        assert_eq!(p.tags(), &BTreeSet::from([0, 4, 5]));
    }

    #[test]
    fn counts() {
        let p = Paragraph::new(sentences("one two three. four five. six"));
        assert_eq!(p.word_count(), 6);
        assert_eq!(p.sentence_count(), 3);
        assert_eq!(p.words().len(), 6);
    }

    #[test]
    fn render() {
        let p = Paragraph::new(sentences("It was. The Best"));
        assert_eq!(
            p.text(TextFormat::Text, true),
            Rendered::Text("it was the best".to_string())
        );
        assert_eq!(
            p.text(TextFormat::Words, false),
            Rendered::Words(vec!["It".into(), "was".into(), "The".into(), "Best".into()])
        );
        match p.text(TextFormat::Sentences, false) {
            Rendered::Sentences(s) => assert_eq!(s.len(), 2),
            other => panic!("unexpected rendering {:?}", other),
        }
    }

    #[test]
    fn unsupported_format() {
        assert!(matches!(
            "html".parse::<TextFormat>(),
            Err(Error::UnsupportedFormat(_))
        ));
        assert_eq!("words".parse::<TextFormat>().unwrap(), TextFormat::Words);
    }

    #[test]
    fn metadata_roundtrip() {
        let meta = ParagraphMetadata {
            id: Some(10),
            book_id: Some(2),
            next_id: Some(11),
            ..Default::default()
        };
        let p = Paragraph::from_metadata(Vec::new(), &meta).unwrap();
        assert_eq!(p.metadata(), meta);

        let json = serde_json::to_string(&p.metadata()).unwrap();
        assert_eq!(json, r#"{"id":10,"book_id":2,"next_id":11}"#);
    }
}
