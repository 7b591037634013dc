//! Paragraph order dataset construction.
//!
//! - [corpus]: books, paragraphs and tags,
//! - [io::reader]: corpus loading, [io::writer]: TSV writing,
//! - [query]: paragraph selection and chaining,
//! - [filtering]: word/sentence count bounds,
//! - [pairs]: labelled example building, shuffling and splitting,
//! - [pipeline]: everything above, end to end.
pub mod corpus;
pub mod error;
pub mod filtering;
pub mod io;
pub mod pairs;
pub mod pipeline;
pub mod query;
