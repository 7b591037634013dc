//! # parorder
//!
//! Builds a self-supervised paragraph order dataset from a corpus of books segmented into
//! paragraphs.
//!
//! Pairs of consecutive paragraphs are selected (by book, tags, length), then turned into
//! labelled examples: `1` when the pair is in reading order, `0` when it has been swapped.
//!
//! ## Getting started
//!
//! ```sh
//! parorder 0.1.0
//! paragraph order dataset builder.
//!
//! USAGE:
//!     parorder <SUBCOMMAND>
//!
//! SUBCOMMANDS:
//!     books         List books as JSON lines
//!     help          Prints this message or the help of the given subcommand(s)
//!     pairs         Build the paragraph order dataset (train.tsv, dev.tsv)
//!     paragraphs    Print selected paragraph chains as JSON lines
//!     schema        Print the JSON schemas of book and paragraph metadata
//!     shelves       List bookshelves and their number of books
//! ```
use std::collections::BTreeSet;
use std::io::Write;

use parorder::corpus::{BookMetadata, ParagraphId, ParagraphMetadata, Rendered};
use parorder::error::Error;
use parorder::io::reader::Corpus;
use parorder::pipeline::PairPipeline;
use parorder::query::render_chains;
use serde::Serialize;
use structopt::StructOpt;

#[macro_use]
extern crate log;

mod cli;

/// A chain of paragraphs, as printed by the `paragraphs` command.
#[derive(Serialize)]
struct ChainRecord {
    ids: Vec<Option<ParagraphId>>,
    paragraphs: Vec<Rendered>,
}

fn paragraphs(p: cli::Paragraphs) -> Result<(), Error> {
    let table = Corpus::new(&p.src).paragraphs()?;
    let mut chains = p
        .selection
        .query()
        .num_sequential(p.num_sequential)
        .chains(&table)?;
    if let Some(limit) = p.limit {
        chains.truncate(limit);
    }

    let rendered = render_chains(&chains, p.format, p.lowercase);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for (chain, paragraphs) in chains.iter().zip(rendered) {
        let record = ChainRecord {
            ids: chain.iter().map(|par| par.id()).collect(),
            paragraphs,
        };
        serde_json::to_writer(&mut out, &record)?;
        writeln!(out)?;
    }
    Ok(())
}

fn books(b: cli::Books) -> Result<(), Error> {
    let books = Corpus::new(&b.src).books(&b.filter()?)?;
    info!("{} books", books.len());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for book in books.values() {
        serde_json::to_writer(&mut out, &book.metadata())?;
        writeln!(out)?;
    }
    Ok(())
}

fn shelves(s: cli::Shelves) -> Result<(), Error> {
    let names: Option<BTreeSet<String>> = if s.names.is_empty() {
        None
    } else {
        Some(s.names.into_iter().collect())
    };
    let shelves = Corpus::new(&s.src).bookshelves(names.as_ref())?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for (name, ids) in shelves {
        writeln!(out, "{}\t{}", name, ids.len())?;
    }
    Ok(())
}

fn schema() -> Result<(), Error> {
    let book = schemars::schema_for!(BookMetadata);
    let paragraph = schemars::schema_for!(ParagraphMetadata);
    println!("{}", serde_json::to_string_pretty(&book)?);
    println!("{}", serde_json::to_string_pretty(&paragraph)?);
    Ok(())
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Parorder::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::Parorder::Pairs(p) => {
            let options = p.options();
            let p = PairPipeline::new(p.src, p.dst, options);
            p.run()?;
        }
        cli::Parorder::Books(b) => books(b)?,
        cli::Parorder::Shelves(s) => shelves(s)?,
        cli::Parorder::Paragraphs(p) => paragraphs(p)?,
        cli::Parorder::Schema(_) => schema()?,
    };
    Ok(())
}
