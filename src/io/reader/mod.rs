/*! Corpus reading utilities

A corpus is a directory holding four JSON documents, each of them possibly gzipped (`.json.gz`):

| file                      | content                             |
|---------------------------|-------------------------------------|
| `books_data.json`         | `{book_id: BookMetadata}`           |
| `books_shelves.json`      | `{shelf_name: [book_id]}`           |
| `paragraph_metadata.json` | `{key: ParagraphMetadata}`          |
| `paragraph_data.json`     | `{key: [[token]]}`                  |

[Corpus] reads them on demand.
!*/
pub mod corpus;
mod source;

pub use corpus::{BookFilter, Corpus};
