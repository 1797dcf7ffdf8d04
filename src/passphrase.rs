use serde::Serialize;
use std::fmt;

use crate::catalog::Template;
use crate::pos::PartOfSpeech;

/// Words produced from a single template.
#[derive(Clone, Debug)]
pub struct UnitPassphrase {
    pub words: Vec<String>,
    pub word_count: usize,
    pub template: Template,
    /// Wordlist size behind each slot of `template`, in order.
    pub slot_sizes: Vec<usize>,
}

impl UnitPassphrase {
    /// Number of distinct phrases this template could have produced.
    pub fn one_of(&self) -> Option<u128> {
        checked_product(&self.slot_sizes)
    }
}

/// A generated passphrase with its metadata.
#[derive(Clone, Debug)]
pub struct Passphrase {
    pub words: Vec<String>,
    pub word_count: usize,
    pub separator: String,
    pub capitalize: bool,
    /// Template of every sub-phrase, with `[conjunction]` entries between them.
    pub sub_combinations: Vec<Template>,
    /// Wordlist size behind each flattened slot of `sub_combinations`.
    pub slot_sizes: Vec<usize>,
}

impl Passphrase {
    pub(crate) fn from_unit(unit: UnitPassphrase, separator: &str, capitalize: bool) -> Self {
        Self {
            words: unit.words,
            word_count: unit.word_count,
            separator: separator.to_string(),
            capitalize,
            sub_combinations: vec![unit.template],
            slot_sizes: unit.slot_sizes,
        }
    }

    /// The words joined by the separator.
    pub fn passphrase(&self) -> String {
        self.words.join(&self.separator)
    }

    /// All parts of speech, flattened across sub-phrases.
    pub fn combination(&self) -> Vec<PartOfSpeech> {
        self.sub_combinations
            .iter()
            .flat_map(|t| t.slots().iter().copied())
            .collect()
    }

    /// How many passphrases the same combination of wordlists can produce.
    /// `None` when the count does not fit in a `u128`.
    pub fn one_of(&self) -> Option<u128> {
        checked_product(&self.slot_sizes)
    }

    /// Chance of drawing exactly this passphrase again from the same combination.
    ///
    /// Floored at `f64::MIN_POSITIVE` so very long phrases never report zero;
    /// use [`Passphrase::wordlist_entropy_bits`] for the exact magnitude.
    pub fn wordlist_probability(&self) -> f64 {
        floor_probability(self.slot_sizes.iter().map(|&n| 1.0 / n as f64).product())
    }

    pub fn wordlist_entropy_bits(&self) -> f64 {
        self.slot_sizes.iter().map(|&n| (n as f64).log2()).sum()
    }

    /// Chance of guessing the passphrase character by character, treating
    /// letters as one of 26 and digits as one of 10. Separators are ignored.
    /// Floored like [`Passphrase::wordlist_probability`].
    pub fn character_probability(&self) -> f64 {
        floor_probability(
            self.words
                .iter()
                .flat_map(|w| w.chars())
                .map(|c| 1.0 / char_space(c))
                .product(),
        )
    }

    pub fn character_entropy_bits(&self) -> f64 {
        self.words
            .iter()
            .flat_map(|w| w.chars())
            .map(|c| char_space(c).log2())
            .sum()
    }

    /// Number of conjunctions inserted between sub-phrases.
    pub fn conjunction_count(&self) -> usize {
        self.sub_combinations.len().saturating_sub(1) / 2
    }

    pub fn report(&self) -> PassphraseReport {
        PassphraseReport {
            passphrase: self.passphrase(),
            word_count: self.word_count,
            wordlist_probability: self.wordlist_probability(),
            character_probability: self.character_probability(),
            wordlist_entropy_bits: self.wordlist_entropy_bits(),
            character_entropy_bits: self.character_entropy_bits(),
            parts_of_speech: self
                .sub_combinations
                .iter()
                .map(|t| t.slots().to_vec())
                .collect(),
        }
    }
}

impl fmt::Display for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.passphrase())
    }
}

/// Serializable summary of a [`Passphrase`].
#[derive(Clone, Debug, Serialize)]
pub struct PassphraseReport {
    pub passphrase: String,
    pub word_count: usize,
    pub wordlist_probability: f64,
    pub character_probability: f64,
    pub wordlist_entropy_bits: f64,
    pub character_entropy_bits: f64,
    pub parts_of_speech: Vec<Vec<PartOfSpeech>>,
}

/// Smallest normal `f64`; products that underflow below it report this instead of zero.
fn floor_probability(p: f64) -> f64 {
    p.max(f64::MIN_POSITIVE)
}

fn char_space(c: char) -> f64 {
    if c.is_alphabetic() {
        26.0
    } else if c.is_ascii_digit() {
        10.0
    } else {
        1.0
    }
}

fn checked_product(sizes: &[usize]) -> Option<u128> {
    sizes
        .iter()
        .try_fold(1u128, |acc, &n| acc.checked_mul(n as u128))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pos::PartOfSpeech::*;

    fn sample() -> Passphrase {
        Passphrase {
            words: vec!["The".into(), "Fox".into(), "And".into(), "Owl".into(), "Ran".into()],
            word_count: 5,
            separator: "-".into(),
            capitalize: true,
            sub_combinations: vec![
                Template::new([Determiner, SubjectNoun]),
                Template::conjunction(),
                Template::new([ObjectNoun, Verb]),
            ],
            slot_sizes: vec![2, 4, 5, 8, 10],
        }
    }

    #[test]
    fn test_passphrase_joins_with_separator() {
        let phrase = sample();
        assert_eq!(phrase.passphrase(), "The-Fox-And-Owl-Ran");
        assert_eq!(phrase.to_string(), "The-Fox-And-Owl-Ran");
    }

    #[test]
    fn test_combination_is_flattened() {
        let phrase = sample();
        assert_eq!(
            phrase.combination(),
            vec![Determiner, SubjectNoun, Conjunction, ObjectNoun, Verb]
        );
        assert_eq!(phrase.conjunction_count(), 1);
    }

    #[test]
    fn test_wordlist_metrics() {
        let phrase = sample();
        assert_eq!(phrase.one_of(), Some(3200));
        assert!((phrase.wordlist_probability() - 1.0 / 3200.0).abs() < 1e-15);
        assert!((phrase.wordlist_entropy_bits() - 3200f64.log2()).abs() < 1e-9);
    }

    #[test]
    fn test_character_metrics_ignore_separator() {
        let mut phrase = sample();
        phrase.words = vec!["ab".into(), "7".into(), "'".into()];
        assert!((phrase.character_probability() - 1.0 / 6760.0).abs() < 1e-15);
        assert!((phrase.character_entropy_bits() - 6760f64.log2()).abs() < 1e-9);
    }

    #[test]
    fn test_one_of_overflow_is_none() {
        let mut phrase = sample();
        phrase.slot_sizes = vec![usize::MAX; 4];
        assert_eq!(phrase.one_of(), None);
        assert!(phrase.wordlist_probability() > 0.0);
    }

    #[test]
    fn test_probabilities_never_underflow_to_zero() {
        let mut phrase = sample();
        phrase.slot_sizes = vec![100; 400];
        phrase.words = vec!["abcdefghij".into(); 400];

        assert_eq!(phrase.wordlist_probability(), f64::MIN_POSITIVE);
        assert_eq!(phrase.character_probability(), f64::MIN_POSITIVE);
        assert!((phrase.wordlist_entropy_bits() - 400.0 * 100f64.log2()).abs() < 1e-6);
    }

    #[test]
    fn test_report_serializes() {
        let json = serde_json::to_value(sample().report()).unwrap();
        assert_eq!(json["passphrase"], "The-Fox-And-Owl-Ran");
        assert_eq!(json["word_count"], 5);
        assert_eq!(json["parts_of_speech"][1][0], "conjunction");
    }
}
