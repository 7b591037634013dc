use std::collections::BTreeSet;
use std::fs::File;
use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;
use parorder::corpus::{Book, Rendered, Tag, TextFormat};
use parorder::io::reader::{BookFilter, Corpus};
use parorder::query::{render_chains, BookSelector, ParagraphQuery};

fn gzip(path: &std::path::Path, content: &str) {
    let mut gz = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    gz.write_all(content.as_bytes()).unwrap();
    gz.finish().unwrap();
}

#[test]
fn gzipped_corpus() {
    let dir = tempfile::tempdir().unwrap();
    gzip(
        &dir.path().join("books_data.json.gz"),
        r#"{"84": {"title": ["Frankenstein"], "authors": ["Shelley, Mary"], "language": ["en"], "bookshelves": ["Gothic Fiction"]}}"#,
    );
    gzip(
        &dir.path().join("paragraph_metadata.json.gz"),
        r#"{"10": {"id": 10, "book_id": 84, "next_id": 11, "tags": [8, 5]}, "11": {"id": 11, "book_id": 84, "prev_id": 10, "tags": [8, 4]}}"#,
    );
    gzip(
        &dir.path().join("paragraph_data.json.gz"),
        r#"{"10": [["You", "will", "rejoice"]], "11": [["I", "am", "already"], ["far", "north"]]}"#,
    );

    let corpus = Corpus::new(dir.path());
    let books = corpus.books(&BookFilter::All).unwrap();
    let frankenstein: &Book = &books[&84];
    assert_eq!(frankenstein.title(), "Frankenstein");

    let table = corpus.paragraphs().unwrap();
    let chains = ParagraphQuery::new()
        .books([BookSelector::from(frankenstein)])
        .tags([Tag::Paragraph])
        .num_sequential(2)
        .chains(&table)
        .unwrap();
    assert_eq!(chains.len(), 1);

    let rendered = render_chains(&chains, TextFormat::Text, true);
    assert_eq!(
        rendered[0],
        vec![
            Rendered::Text("you will rejoice".to_string()),
            Rendered::Text("i am already far north".to_string())
        ]
    );
}

#[test]
fn metadata_and_text_disagree() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("paragraph_metadata.json"),
        r#"{"1": {"id": 1}, "2": {"id": 2}}"#,
    )
    .unwrap();
    std::fs::write(dir.path().join("paragraph_data.json"), r#"{"1": [["a"]]}"#).unwrap();

    let res = Corpus::new(dir.path()).paragraphs();
    assert!(matches!(res, Err(parorder::error::Error::Contract(_))));
}

#[test]
fn book_metadata_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let json = r#"{"id":1342,"title":["Pride and Prejudice"],"authors":["Austen, Jane"],"language":["en"]}"#;
    std::fs::write(
        dir.path().join("books_data.json"),
        format!(r#"{{"1342": {}}}"#, json),
    )
    .unwrap();

    let corpus = Corpus::new(dir.path());
    let raw = corpus.books_metadata(&BookFilter::All).unwrap();
    let books = corpus.books(&BookFilter::All).unwrap();

    assert_eq!(books[&1342].metadata(), raw[&1342]);
    assert_eq!(serde_json::to_string(&books[&1342].metadata()).unwrap(), json);

    let books = corpus
        .books(&BookFilter::Ids(BTreeSet::from([7])))
        .unwrap();
    assert!(books.is_empty());
}
