//! Paragraph-level classification tags.
//!
//! Paragraphs carry their tags as raw codes ([TagCode]).
//! Selection never interprets them: [Tag] only exists to give names to the codes.
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Raw tag code as stored on a paragraph.
pub type TagCode = u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    Short,
    Medium,
    Long,
    WholeDialogue,
    WithDialogue,
    WithoutDialogue,
    NotParagraph,
    TooLong,
    Paragraph,
}

impl Tag {
    pub const ALL: [Tag; 9] = [
        Tag::Short,
        Tag::Medium,
        Tag::Long,
        Tag::WholeDialogue,
        Tag::WithDialogue,
        Tag::WithoutDialogue,
        Tag::NotParagraph,
        Tag::TooLong,
        Tag::Paragraph,
    ];

    pub fn code(&self) -> TagCode {
        match self {
            Tag::Short => 0,
            Tag::Medium => 1,
            Tag::Long => 2,
            Tag::WholeDialogue => 3,
            Tag::WithDialogue => 4,
            Tag::WithoutDialogue => 5,
            Tag::NotParagraph => 6,
            Tag::TooLong => 7,
            Tag::Paragraph => 8,
        }
    }

    pub fn from_code(code: TagCode) -> Option<Tag> {
        Tag::ALL.iter().find(|tag| tag.code() == code).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tag::Short => "SHORT",
            Tag::Medium => "MEDIUM",
            Tag::Long => "LONG",
            Tag::WholeDialogue => "WHOLE_DIALOGUE",
            Tag::WithDialogue => "WITH_DIALOGUE",
            Tag::WithoutDialogue => "WITHOUT_DIALOGUE",
            Tag::NotParagraph => "NOT_PARAGRAPH",
            Tag::TooLong => "TOO_LONG",
            Tag::Paragraph => "PARAGRAPH",
        }
    }
}

impl From<Tag> for TagCode {
    fn from(tag: Tag) -> TagCode {
        tag.code()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tag {
    type Err = Error;

    /// Parses a tag name (case insensitive, `-` accepted for `_`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace('-', "_");
        Tag::ALL
            .iter()
            .find(|tag| tag.name() == normalized)
            .copied()
            .ok_or_else(|| Error::InvalidArgument(format!("unknown tag {:?}", s)))
    }
}
