//! Word/sentence count filtering.
use std::ops::RangeInclusive;

use log::info;

use super::Filter;
use crate::corpus::Paragraph;
use crate::query::Chain;

/// Inclusive bounds on the number of words and sentences of a paragraph.
///
/// Defaults to 10..=512 words and 3..=60 sentences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bounds {
    words: RangeInclusive<usize>,
    sentences: RangeInclusive<usize>,
}

impl Bounds {
    pub fn new(min_len: usize, max_len: usize, min_sent: usize, max_sent: usize) -> Self {
        Self {
            words: min_len..=max_len,
            sentences: min_sent..=max_sent,
        }
    }

    /// Get a reference to the word count bounds.
    pub fn words(&self) -> &RangeInclusive<usize> {
        &self.words
    }

    /// Get a reference to the sentence count bounds.
    pub fn sentences(&self) -> &RangeInclusive<usize> {
        &self.sentences
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(10, 512, 3, 60)
    }
}

impl Filter<&Paragraph> for Bounds {
    fn detect(&self, paragraph: &Paragraph) -> bool {
        self.words.contains(&paragraph.word_count())
            && self.sentences.contains(&paragraph.sentence_count())
    }
}

/// A chain is kept only if every paragraph of it is.
impl Filter<&[&Paragraph]> for Bounds {
    fn detect(&self, chain: &[&Paragraph]) -> bool {
        chain
            .iter()
            .all(|paragraph| Filter::<&Paragraph>::detect(self, paragraph))
    }
}

/// Remove chains having at least one paragraph out of `bounds`.
pub fn filter_chains<'t>(chains: Vec<Chain<'t>>, bounds: &Bounds) -> Vec<Chain<'t>> {
    let nb_chains = chains.len();
    let kept: Vec<Chain<'t>> = chains
        .into_iter()
        .filter(|chain| bounds.detect(chain.as_slice()))
        .collect();

    info!(
        "kept {}/{} chains (words: {:?}, sentences: {:?})",
        kept.len(),
        nb_chains,
        bounds.words(),
        bounds.sentences()
    );
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Sentences;

    /// `nb_sentences` sentences holding `nb_words` words overall.
    fn paragraph(nb_words: usize, nb_sentences: usize) -> Paragraph {
        let mut text: Sentences = vec![Vec::new(); nb_sentences];
        for i in 0..nb_words {
            text[i % nb_sentences].push(format!("w{}", i));
        }
        Paragraph::new(text)
    }

    #[test]
    fn defaults() {
        let b = Bounds::default();
        assert_eq!(b.words(), &(10..=512));
        assert_eq!(b.sentences(), &(3..=60));
    }

    #[test]
    fn inclusive_bounds() {
        let b = Bounds::default();
        assert!(b.detect(&paragraph(10, 3)));
        assert!(b.detect(&paragraph(512, 60)));
        assert!(!b.detect(&paragraph(9, 3)));
        assert!(!b.detect(&paragraph(513, 3)));
        assert!(!b.detect(&paragraph(100, 2)));
        assert!(!b.detect(&paragraph(100, 61)));
    }

    #[test]
    fn chain_conjunction() {
        let b = Bounds::default();
        let short = paragraph(15, 3);
        let long = paragraph(600, 10);
        let medium = paragraph(100, 5);

        let chains = vec![vec![&short, &long], vec![&short, &medium]];
        let kept = filter_chains(chains, &b);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0][1].word_count(), 100);
    }

    #[test]
    fn sentence_bound_removes_chain() {
        let b = Bounds::new(1, 1000, 3, 4);
        let ok = paragraph(20, 3);
        let too_many = paragraph(20, 5);
        assert!(filter_chains(vec![vec![&ok, &too_many]], &b).is_empty());
        assert_eq!(filter_chains(vec![vec![&ok, &ok]], &b).len(), 1);
    }
}
