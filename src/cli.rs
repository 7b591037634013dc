//! Command line arguments and parameters management/parsing.
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use parorder::corpus::{BookId, ParagraphId, Tag, TextFormat};
use parorder::error::Error;
use parorder::filtering::Bounds;
use parorder::io::reader::BookFilter;
use parorder::pipeline::PairOptions;
use parorder::query::{ParagraphQuery, TagSelector};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "parorder", about = "paragraph order dataset builder.")]
/// Holds every command that is callable by the `parorder` command.
pub enum Parorder {
    #[structopt(about = "Build the paragraph order dataset (train.tsv, dev.tsv)")]
    Pairs(Pairs),
    #[structopt(about = "List books as JSON lines")]
    Books(Books),
    #[structopt(about = "List bookshelves and their number of books")]
    Shelves(Shelves),
    #[structopt(about = "Print selected paragraph chains as JSON lines")]
    Paragraphs(Paragraphs),
    #[structopt(about = "Print the JSON schemas of book and paragraph metadata")]
    Schema(Schema),
}

#[derive(Debug, StructOpt)]
/// Paragraph selectors, shared by commands that query paragraphs.
pub struct Selection {
    #[structopt(
        long = "paragraph-ids",
        use_delimiter = true,
        help = "comma separated paragraph ids. Can't be used with --books or --tags"
    )]
    pub paragraph_ids: Option<Vec<ParagraphId>>,
    #[structopt(long = "books", use_delimiter = true, help = "comma separated book ids")]
    pub books: Option<Vec<BookId>>,
    #[structopt(
        long = "tags",
        number_of_values = 1,
        help = "required tag group, repeatable. A group is a tag (8, paragraph) or a comma separated list of alternatives (0,1,2 or short,medium)"
    )]
    pub tags: Option<Vec<TagSelector>>,
}

impl Selection {
    pub fn query(&self) -> ParagraphQuery<'static> {
        let mut query = ParagraphQuery::new();
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
}

#[derive(Debug, StructOpt)]
/// Pairs command and parameters.
///
/// When neither --paragraph-ids nor --tags is given, paragraphs have to be tagged
/// SHORT, MEDIUM or LONG (use --any-tag to disable this).
pub struct Pairs {
    #[structopt(parse(from_os_str), help = "corpus location")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "dataset destination")]
    pub dst: PathBuf,
    #[structopt(flatten)]
    pub selection: Selection,
    #[structopt(long = "any-tag", help = "do not restrict paragraphs to SHORT/MEDIUM/LONG")]
    pub any_tag: bool,
    #[structopt(
        long = "min-len",
        default_value = "20",
        help = "minimum number of words in a paragraph"
    )]
    pub min_len: usize,
    #[structopt(
        long = "max-len",
        default_value = "500",
        help = "maximum number of words in a paragraph"
    )]
    pub max_len: usize,
    #[structopt(
        long = "min-sent",
        default_value = "3",
        help = "minimum number of sentences in a paragraph"
    )]
    pub min_sent: usize,
    #[structopt(
        long = "max-sent",
        default_value = "60",
        help = "maximum number of sentences in a paragraph"
    )]
    pub max_sent: usize,
    #[structopt(
        long = "num-tokens",
        default_value = "128",
        help = "tokens kept at the end of the first and the start of the second paragraph"
    )]
    pub num_tokens: usize,
    #[structopt(long = "no-truncate", help = "keep whole paragraphs")]
    pub no_truncate: bool,
    #[structopt(
        long = "validation-split",
        default_value = "0.1",
        help = "fraction of examples used for validation"
    )]
    pub validation_split: f64,
    #[structopt(long = "no-shuffle", help = "keep pairs in corpus order before building examples")]
    pub no_shuffle: bool,
    #[structopt(long = "seed", help = "seed for reproducible shuffling")]
    pub seed: Option<u64>,
}

impl Pairs {
    pub fn options(&self) -> PairOptions {
        let tags = match (&self.selection.tags, &self.selection.paragraph_ids) {
            (Some(tags), _) => Some(tags.clone()),
            (None, None) if !self.any_tag => Some(vec![TagSelector::AnyOf(
                [Tag::Short, Tag::Medium, Tag::Long]
                    .iter()
                    .map(Tag::code)
                    .collect(),
            )]),
            _ => None,
        };

        PairOptions {
            paragraph_ids: self.selection.paragraph_ids.clone(),
            books: self.selection.books.clone(),
            tags,
            bounds: Bounds::new(self.min_len, self.max_len, self.min_sent, self.max_sent),
            num_tokens: if self.no_truncate {
                None
            } else {
                Some(self.num_tokens)
            },
            validation_split: self.validation_split,
            shuffle: !self.no_shuffle,
            seed: self.seed,
        }
    }
}

#[derive(Debug, StructOpt)]
/// Books command and parameters.
pub struct Books {
    #[structopt(parse(from_os_str), help = "corpus location")]
    pub src: PathBuf,
    #[structopt(long = "ids", use_delimiter = true, help = "comma separated book ids")]
    pub ids: Option<Vec<BookId>>,
    #[structopt(long = "shelf", number_of_values = 1, help = "required bookshelf, repeatable")]
    pub shelves: Vec<String>,
    #[structopt(long = "language", help = "required language")]
    pub language: Option<String>,
}

impl Books {
    /// Ids and features are exclusive.
    pub fn filter(&self) -> Result<BookFilter, Error> {
        let mut features = BTreeMap::new();
        if !self.shelves.is_empty() {
            features.insert(
                "bookshelves".to_string(),
                self.shelves.iter().cloned().collect::<BTreeSet<_>>(),
            );
        }
        if let Some(language) = &self.language {
            features.insert("language".to_string(), BTreeSet::from([language.clone()]));
        }

        match (&self.ids, features.is_empty()) {
            (Some(_), false) => Err(Error::InvalidArgument(
                "only one of ids and features (shelf, language) should be given".to_string(),
            )),
            (Some(ids), true) => Ok(BookFilter::Ids(ids.iter().copied().collect())),
            (None, false) => Ok(BookFilter::Features(features)),
            (None, true) => Ok(BookFilter::All),
        }
    }
}

#[derive(Debug, StructOpt)]
/// Shelves command and parameters.
pub struct Shelves {
    #[structopt(parse(from_os_str), help = "corpus location")]
    pub src: PathBuf,
    #[structopt(help = "restrict to these bookshelves")]
    pub names: Vec<String>,
}

#[derive(Debug, StructOpt)]
/// Paragraphs command and parameters.
pub struct Paragraphs {
    #[structopt(parse(from_os_str), help = "corpus location")]
    pub src: PathBuf,
    #[structopt(flatten)]
    pub selection: Selection,
    #[structopt(
        long = "num-sequential",
        default_value = "1",
        help = "number of consecutive paragraphs per chain"
    )]
    pub num_sequential: usize,
    #[structopt(long = "format", default_value = "text", help = "one of sentences, words, text")]
    pub format: TextFormat,
    #[structopt(long = "lowercase", help = "lowercase the output")]
    pub lowercase: bool,
    #[structopt(long = "limit", help = "maximum number of chains to print")]
    pub limit: Option<usize>,
}

#[derive(Debug, StructOpt)]
/// Schema command.
pub struct Schema {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_defaults() {
        let opt = Parorder::from_iter(["parorder", "pairs", "corpus/", "out/"]);
        let options = match opt {
            Parorder::Pairs(p) => p.options(),
            other => panic!("unexpected command {:?}", other),
        };
        assert_eq!(options.bounds, Bounds::new(20, 500, 3, 60));
        assert_eq!(options.num_tokens, Some(128));
        assert_eq!(
            options.tags,
            Some(vec![TagSelector::AnyOf(BTreeSet::from([0, 1, 2]))])
        );
        assert!(options.shuffle);
    }

    #[test]
    fn pairs_with_ids_have_no_default_tags() {
        let opt = Parorder::from_iter([
            "parorder",
            "pairs",
            "corpus/",
            "out/",
            "--paragraph-ids",
            "1,2,3",
            "--no-truncate",
        ]);
        let options = match opt {
            Parorder::Pairs(p) => p.options(),
            other => panic!("unexpected command {:?}", other),
        };
        assert_eq!(options.paragraph_ids, Some(vec![1, 2, 3]));
        assert_eq!(options.tags, None);
        assert_eq!(options.num_tokens, None);
    }

    #[test]
    fn tag_groups() {
        let opt = Parorder::from_iter([
            "parorder",
            "paragraphs",
            "corpus/",
            "--tags",
            "paragraph",
            "--tags",
            "4,5",
            "--format",
            "words",
        ]);
        match opt {
            Parorder::Paragraphs(p) => {
                assert_eq!(
                    p.selection.tags,
                    Some(vec![
                        TagSelector::Single(8),
                        TagSelector::AnyOf(BTreeSet::from([4, 5]))
                    ])
                );
                assert_eq!(p.format, TextFormat::Words);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn bad_format() {
        let res =
            Parorder::from_iter_safe(["parorder", "paragraphs", "corpus/", "--format", "html"]);
        assert!(res.is_err());
    }

    #[test]
    fn books_exclusive_filters() {
        let opt = Parorder::from_iter([
            "parorder",
            "books",
            "corpus/",
            "--ids",
            "1",
            "--language",
            "en",
        ]);
        match opt {
            Parorder::Books(b) => assert!(b.filter().is_err()),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
