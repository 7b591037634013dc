/*! Corpus entities

Books and paragraphs, as provided by the corpus loader ([crate::io::reader::Corpus]).

Paragraphs are held in a [ParagraphTable], keyed by their corpus key.
Paragraph links ([Paragraph::next_id]) are resolved against such a table.
!*/
mod book;
mod paragraph;
mod tags;

use std::collections::BTreeMap;

pub use book::{Book, BookId, BookMetadata};
pub use paragraph::{Paragraph, ParagraphId, ParagraphMetadata, Rendered, Sentences, TextFormat};
pub use tags::{Tag, TagCode};

/// Paragraphs keyed by id.
pub type ParagraphTable = BTreeMap<ParagraphId, Paragraph>;
