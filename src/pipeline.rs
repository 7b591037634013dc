/*! Paragraph order dataset pipeline

1. load the paragraph table of the corpus,
2. select pairs of consecutive paragraphs ([crate::query]),
3. drop pairs with a paragraph out of bounds ([crate::filtering]),
4. build ordered/swapped examples, shuffle and split them ([crate::pairs]),
5. write `train.tsv` and `dev.tsv` ([crate::io::writer]).
!*/
use std::path::PathBuf;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::corpus::{BookId, ParagraphId, ParagraphTable};
use crate::error::Error;
use crate::filtering::{filter_chains, Bounds};
use crate::io::reader::Corpus;
use crate::io::writer::write_tsv;
use crate::pairs::{make_pair_dataset, PairExample};
use crate::query::{ParagraphQuery, TagSelector};

pub const TRAIN_FILE: &str = "train.tsv";
pub const DEV_FILE: &str = "dev.tsv";

/// Words of every chain of `query` that passes `bounds`.
///
/// Chains are shuffled when `shuffle` is set, otherwise they stay in table order.
pub fn paragraph_words<R>(
    table: &ParagraphTable,
    query: &ParagraphQuery<'_>,
    bounds: &Bounds,
    shuffle: bool,
    rng: &mut R,
) -> Result<Vec<Vec<Vec<String>>>, Error>
where
    R: Rng + ?Sized,
{
    let chains = query.chains(table)?;
    info!("{} chains selected", chains.len());

    let mut words: Vec<Vec<Vec<String>>> = filter_chains(chains, bounds)
        .into_iter()
        .map(|chain| chain.iter().map(|par| par.words()).collect())
        .collect();

    if shuffle {
        words.shuffle(rng);
    }
    Ok(words)
}

/// Dataset parameters.
#[derive(Debug, Clone)]
pub struct PairOptions {
    /// Explicit paragraph ids, exclusive with `books` and `tags`.
    pub paragraph_ids: Option<Vec<ParagraphId>>,
    pub books: Option<Vec<BookId>>,
    pub tags: Option<Vec<TagSelector>>,
    pub bounds: Bounds,
    /// Token budget of each side of an example. `None` keeps whole paragraphs.
    pub num_tokens: Option<usize>,
    pub validation_split: f64,
    /// Shuffle pairs before building examples. Examples are always shuffled.
    pub shuffle: bool,
    /// Seed of the shuffling RNG. Seeded from entropy when absent.
    pub seed: Option<u64>,
}

impl Default for PairOptions {
    fn default() -> Self {
        Self {
            paragraph_ids: None,
            books: None,
            tags: None,
            bounds: Bounds::default(),
            num_tokens: None,
            validation_split: 0.1,
            shuffle: true,
            seed: None,
        }
    }
}

impl PairOptions {
    fn query(&self) -> ParagraphQuery<'static> {
        let mut query = ParagraphQuery::new().num_sequential(2);
        if let Some(ids) = &self.paragraph_ids {
            query = query.paragraph_ids(ids.iter().copied());
        }
        if let Some(books) = &self.books {
            query = query.books(books.iter().copied());
        }
        if let Some(tags) = &self.tags {
            query = query.tags(tags.iter().cloned());
        }
        query
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

pub struct PairPipeline {
    src: PathBuf,
    dst: PathBuf,
    options: PairOptions,
}

impl PairPipeline {
    pub fn new(src: PathBuf, dst: PathBuf, options: PairOptions) -> Self {
        Self { src, dst, options }
    }

    /// Build the (training, validation) examples without writing them.
    pub fn dataset(&self) -> Result<(Vec<PairExample>, Vec<PairExample>), Error> {
        debug!("pair options: {:#?}", self.options);
        let table = Corpus::new(&self.src).paragraphs()?;
        let mut rng = self.options.rng();

        let pairs = paragraph_words(
            &table,
            &self.options.query(),
            &self.options.bounds,
            self.options.shuffle,
            &mut rng,
        )?;

        make_pair_dataset(
            &pairs,
            self.options.num_tokens,
            self.options.validation_split,
            &mut rng,
        )
    }

    /// Build the dataset and write it into the destination folder.
    pub fn run(&self) -> Result<(), Error> {
        let (train, validation) = self.dataset()?;

        std::fs::create_dir_all(&self.dst)?;
        write_tsv(&train, &self.dst.join(TRAIN_FILE))?;
        write_tsv(&validation, &self.dst.join(DEV_FILE))?;

        info!(
            "dataset written to {:?}: {} training, {} validation examples",
            self.dst,
            train.len(),
            validation.len()
        );
        Ok(())
    }
}
