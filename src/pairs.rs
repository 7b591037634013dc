/*! Paragraph order examples

Turns pairs of consecutive paragraphs into labelled examples.

For a pair `(x, y)` at position `i` among `num` pairs, two examples are built:

| label | first index | second index | first text        | second text      |
|-------|-------------|--------------|-------------------|------------------|
| `1`   | `i`         | `i + num`    | end of `x`        | start of `y`     |
| `0`   | `i + num`   | `i`          | end of `y`        | start of `x`     |

"end"/"start" are the last/first `num_tokens` tokens when a budget is set,
the whole paragraph otherwise.
!*/
use itertools::Itertools;
use log::info;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::error::Error;

/// Whether the two texts of an example are in reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Label {
    #[serde(rename = "0")]
    Swapped,
    #[serde(rename = "1")]
    Ordered,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Swapped => "0",
            Label::Ordered => "1",
        }
    }
}

/// One labelled example. Serializes as a 5 fields record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairExample {
    pub label: Label,
    pub first_index: usize,
    pub second_index: usize,
    pub first_text: String,
    pub second_text: String,
}

impl PairExample {
    /// Fields as strings, in record order.
    pub fn to_record(&self) -> [String; 5] {
        [
            self.label.as_str().to_string(),
            self.first_index.to_string(),
            self.second_index.to_string(),
            self.first_text.clone(),
            self.second_text.clone(),
        ]
    }
}

/// last `num_tokens` tokens, space joined
fn tail(words: &[String], num_tokens: Option<usize>) -> String {
    let start = num_tokens.map_or(0, |n| words.len().saturating_sub(n));
    words[start..].iter().join(" ")
}

/// first `num_tokens` tokens, space joined
fn head(words: &[String], num_tokens: Option<usize>) -> String {
    let end = num_tokens.map_or(words.len(), |n| n.min(words.len()));
    words[..end].iter().join(" ")
}

/// Build the ordered and swapped examples of every pair, in pair order.
///
/// Each element of `pairs` holds the words of two consecutive paragraphs.
pub fn pair_examples(
    pairs: &[Vec<Vec<String>>],
    num_tokens: Option<usize>,
) -> Result<Vec<PairExample>, Error> {
    let num = pairs.len();
    let mut examples = Vec::with_capacity(2 * num);

    for (i, pair) in pairs.iter().enumerate() {
        let (x, y) = match pair.as_slice() {
            [x, y] => (x, y),
            other => {
                return Err(Error::InvalidArgument(format!(
                    "pair {} holds {} paragraphs instead of 2",
                    i,
                    other.len()
                )))
            }
        };

        examples.push(PairExample {
            label: Label::Ordered,
            first_index: i,
            second_index: i + num,
            first_text: tail(x, num_tokens),
            second_text: head(y, num_tokens),
        });
        examples.push(PairExample {
            label: Label::Swapped,
            first_index: num + i,
            second_index: i,
            first_text: tail(y, num_tokens),
            second_text: head(x, num_tokens),
        });
    }

    Ok(examples)
}

/// Shuffle `examples`, then split them into training and validation sets.
///
/// The training set holds the first `round((1 - validation_split) * len)` shuffled examples,
/// halves rounding to even (`4.5` gives 4, `7.5` gives 8).
pub fn shuffle_split<T, R>(
    mut examples: Vec<T>,
    validation_split: f64,
    rng: &mut R,
) -> Result<(Vec<T>, Vec<T>), Error>
where
    R: Rng + ?Sized,
{
    if !(0.0..=1.0).contains(&validation_split) {
        return Err(Error::InvalidArgument(format!(
            "validation split must be within [0, 1], got {}",
            validation_split
        )));
    }

    examples.shuffle(rng);

    let total = examples.len();
    let split_at = ((total as f64) * (1.0 - validation_split)).round_ties_even() as usize;
    let validation = examples.split_off(split_at.min(total));

    info!(
        "split {} examples: {} training, {} validation",
        total,
        examples.len(),
        validation.len()
    );
    Ok((examples, validation))
}

/// Build the whole dataset: examples of every pair, shuffled, then split.
pub fn make_pair_dataset<R>(
    pairs: &[Vec<Vec<String>>],
    num_tokens: Option<usize>,
    validation_split: f64,
    rng: &mut R,
) -> Result<(Vec<PairExample>, Vec<PairExample>), Error>
where
    R: Rng + ?Sized,
{
    let examples = pair_examples(pairs, num_tokens)?;
    shuffle_split(examples, validation_split, rng)
}
