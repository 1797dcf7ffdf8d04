use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use crate::error::{PassphraseError, PassphraseResult};
use crate::pos::PartOfSpeech;

/// Ordered parts of speech making up one phrase skeleton.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Template(Vec<PartOfSpeech>);

impl Template {
    pub fn new(slots: impl Into<Vec<PartOfSpeech>>) -> Self {
        Self(slots.into())
    }

    /// The single-slot skeleton used between chained sub-phrases.
    pub fn conjunction() -> Self {
        Self(vec![PartOfSpeech::Conjunction])
    }

    pub fn slots(&self) -> &[PartOfSpeech] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(|pos| pos.name()).collect();
        f.write_str(&names.join(", "))
    }
}

/// Templates grouped by word count.
#[derive(Clone, Debug)]
pub struct TemplateCatalog {
    by_length: BTreeMap<usize, Vec<Template>>,
    lengths: Vec<usize>,
}

impl TemplateCatalog {
    /// Build a catalog, checking that every bucket is non-empty, every template
    /// matches its bucket length and no bucket is shorter than two words
    /// (single words are reserved for conjunctions).
    pub fn new(entries: impl IntoIterator<Item = (usize, Vec<Template>)>) -> PassphraseResult<Self> {
        let mut by_length: BTreeMap<usize, Vec<Template>> = BTreeMap::new();
        for (length, templates) in entries {
            by_length.entry(length).or_default().extend(templates);
        }

        if by_length.is_empty() {
            return Err(invalid("catalog has no lengths"));
        }
        for (&length, templates) in &by_length {
            if length < 2 {
                return Err(invalid(format!("length {} is reserved for conjunctions", length)));
            }
            if templates.is_empty() {
                return Err(invalid(format!("length {} has no templates", length)));
            }
            if let Some(bad) = templates.iter().find(|t| t.len() != length) {
                return Err(invalid(format!(
                    "template [{}] has {} slots but is listed under length {}",
                    bad,
                    bad.len(),
                    length
                )));
            }
        }

        let lengths = by_length.keys().copied().collect();
        Ok(Self { by_length, lengths })
    }

    /// Curated English templates for phrases of three to eight words.
    pub fn builtin() -> &'static TemplateCatalog {
        static BUILTIN: OnceLock<TemplateCatalog> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            let tables: [(usize, &[&[PartOfSpeech]]); 6] = [
                (3, LENGTH_3),
                (4, LENGTH_4),
                (5, LENGTH_5),
                (6, LENGTH_6),
                (7, LENGTH_7),
                (8, LENGTH_8),
            ];
            let by_length = tables
                .iter()
                .map(|(length, rows)| (*length, rows.iter().map(|row| Template::new(*row)).collect()))
                .collect::<BTreeMap<usize, Vec<Template>>>();
            let lengths = by_length.keys().copied().collect();
            TemplateCatalog { by_length, lengths }
        })
    }

    pub fn templates_for_length(&self, length: usize) -> PassphraseResult<&[Template]> {
        self.by_length
            .get(&length)
            .map(Vec::as_slice)
            .ok_or(PassphraseError::UnsupportedLength { length })
    }

    pub fn contains(&self, length: usize) -> bool {
        self.by_length.contains_key(&length)
    }

    /// Catalog lengths, ascending.
    pub fn sorted_lengths(&self) -> &[usize] {
        &self.lengths
    }

    pub fn min_length(&self) -> usize {
        self.lengths[0]
    }

    pub fn max_length(&self) -> usize {
        self.lengths[self.lengths.len() - 1]
    }
}

fn invalid(reason: impl Into<String>) -> PassphraseError {
    PassphraseError::InvalidCatalog {
        reason: reason.into(),
    }
}

use PartOfSpeech::*;

const LENGTH_3: &[&[PartOfSpeech]] = &[
    &[Determiner, Adjective, SubjectNoun],
    &[Determiner, Adjective, ObjectNoun],
    &[Determiner, SubjectNoun, Verb],
    &[Determiner, ObjectNoun, Verb],
    &[Adjective, SubjectNoun, Adverb],
    &[Adjective, ObjectNoun, Adverb],
    &[SubjectNoun, Verb, Adverb],
    &[ObjectNoun, Verb, Adverb],
    &[Verb, Determiner, ObjectNoun],
    &[Verb, Determiner, SubjectNoun],
    &[Adverb, Preposition, Determiner],
    &[Preposition, Determiner, Adjective],
    &[Preposition, Determiner, SubjectNoun],
];

const LENGTH_4: &[&[PartOfSpeech]] = &[
    &[Determiner, Adjective, SubjectNoun, Verb],
    &[Determiner, ObjectNoun, Adverb, Verb],
    &[Adjective, SubjectNoun, Verb, Adverb],
    &[Determiner, SubjectNoun, Verb, Preposition],
    &[Determiner, ObjectNoun, Verb, Adverb],
    &[SubjectNoun, ObjectNoun, Verb, Adverb],
    &[SubjectNoun, Verb, Determiner, ObjectNoun],
    &[Determiner, ObjectNoun, Conjunction, SubjectNoun],
    &[ObjectNoun, Conjunction, Determiner, SubjectNoun],
    &[ObjectNoun, Adverb, Verb, SubjectNoun],
    &[SubjectNoun, Conjunction, Determiner, ObjectNoun],
    &[Determiner, SubjectNoun, Conjunction, ObjectNoun],
    &[ObjectNoun, Verb, Determiner, SubjectNoun],
    &[Determiner, Adjective, ObjectNoun, Verb],
    &[Adjective, SubjectNoun, Verb, ObjectNoun],
    &[Determiner, SubjectNoun, Adverb, Verb],
    &[Determiner, ObjectNoun, Verb, SubjectNoun],
    &[ObjectNoun, Verb, Adverb, Preposition],
];

const LENGTH_5: &[&[PartOfSpeech]] = &[
    &[Determiner, Adjective, SubjectNoun, Verb, Adverb],
    &[Determiner, ObjectNoun, Verb, Adjective, SubjectNoun],
    &[SubjectNoun, Verb, Determiner, Adjective, ObjectNoun],
    &[Determiner, Adjective, ObjectNoun, Verb, Adverb],
    &[Determiner, SubjectNoun, Verb, Determiner, ObjectNoun],
    &[Determiner, ObjectNoun, Adverb, Verb, SubjectNoun],
    &[SubjectNoun, Verb, Determiner, ObjectNoun, Adverb],
    &[SubjectNoun, Verb, Adjective, ObjectNoun, Preposition],
    &[Determiner, Adjective, SubjectNoun, Conjunction, ObjectNoun],
    &[Adjective, SubjectNoun, Conjunction, Determiner, ObjectNoun],
    &[ObjectNoun, Verb, Determiner, Adjective, SubjectNoun],
    &[Adjective, ObjectNoun, Verb, Determiner, SubjectNoun],
    &[Determiner, SubjectNoun, Conjunction, Determiner, ObjectNoun],
    &[Adverb, Determiner, ObjectNoun, Verb, Preposition],
    &[Adjective, SubjectNoun, Verb, Determiner, ObjectNoun],
    &[Determiner, ObjectNoun, Verb, Adverb, Preposition],
    &[SubjectNoun, Verb, Adjective, ObjectNoun, Adverb],
    &[Determiner, SubjectNoun, Conjunction, Adjective, ObjectNoun],
];

const LENGTH_6: &[&[PartOfSpeech]] = &[
    &[Determiner, Adjective, SubjectNoun, Verb, Determiner, ObjectNoun],
    &[Determiner, SubjectNoun, Adverb, Verb, Determiner, ObjectNoun],
    &[Adjective, SubjectNoun, Verb, Determiner, ObjectNoun, Adverb],
    &[Determiner, ObjectNoun, Adverb, Verb, Determiner, SubjectNoun],
    &[Adverb, Preposition, Determiner, Adjective, SubjectNoun, Verb],
    &[Determiner, SubjectNoun, Verb, Determiner, ObjectNoun, Adverb],
    &[Determiner, Adjective, ObjectNoun, Verb, Adverb, Preposition],
    &[SubjectNoun, Conjunction, Determiner, ObjectNoun, Verb, Adverb],
    &[ObjectNoun, Verb, Determiner, Adjective, SubjectNoun, Adverb],
    &[Adjective, SubjectNoun, Conjunction, Determiner, ObjectNoun, Verb],
    &[Determiner, Adjective, SubjectNoun, Conjunction, Determiner, ObjectNoun],
    &[Adverb, Preposition, Determiner, Adjective, ObjectNoun, Verb],
    &[Determiner, ObjectNoun, Verb, Determiner, Adjective, SubjectNoun],
    &[ObjectNoun, Verb, Adverb, Preposition, Determiner, SubjectNoun],
    &[Determiner, SubjectNoun, ObjectNoun, Verb, Adverb, Preposition],
];

const LENGTH_7: &[&[PartOfSpeech]] = &[
    &[Determiner, ObjectNoun, Conjunction, Determiner, SubjectNoun, Verb, Adverb],
    &[Determiner, SubjectNoun, ObjectNoun, Verb, Adjective, Conjunction, Adverb],
    &[SubjectNoun, Verb, Determiner, ObjectNoun, Adjective, Conjunction, Adverb],
    &[Determiner, Adjective, ObjectNoun, Verb, Determiner, SubjectNoun, Adverb],
    &[Determiner, SubjectNoun, Verb, Determiner, Adjective, ObjectNoun, Adverb],
    &[Adjective, SubjectNoun, Verb, Preposition, Determiner, ObjectNoun, Adverb],
    &[Determiner, SubjectNoun, Conjunction, ObjectNoun, Verb, Preposition, Adverb],
    &[Determiner, Adjective, SubjectNoun, Preposition, Determiner, ObjectNoun, Verb],
    &[SubjectNoun, Verb, Adverb, Preposition, Determiner, Adjective, ObjectNoun],
    &[Determiner, ObjectNoun, Verb, Determiner, Adjective, SubjectNoun, Adverb],
    &[ObjectNoun, Verb, Preposition, Determiner, Adjective, SubjectNoun, Adverb],
    &[Determiner, Adjective, SubjectNoun, Verb, Determiner, ObjectNoun, Adverb],
    &[Determiner, Adjective, ObjectNoun, Conjunction, Determiner, SubjectNoun, Verb],
];

const LENGTH_8: &[&[PartOfSpeech]] = &[
    &[Determiner, ObjectNoun, Adverb, Verb, Preposition, Determiner, Adjective, SubjectNoun],
    &[Determiner, ObjectNoun, Verb, Adverb, Preposition, Determiner, Adjective, SubjectNoun],
    &[Determiner, Adjective, SubjectNoun, Verb, Preposition, Determiner, ObjectNoun, Adverb],
    &[Determiner, ObjectNoun, Verb, Preposition, Determiner, Adjective, SubjectNoun, Adverb],
    &[Determiner, SubjectNoun, Verb, Preposition, Determiner, Adjective, ObjectNoun, Adverb],
    &[Determiner, SubjectNoun, ObjectNoun, Verb, Preposition, Adjective, Conjunction, Adverb],
    &[Determiner, SubjectNoun, Conjunction, Determiner, Adjective, ObjectNoun, Verb, Adverb],
    &[Determiner, Adjective, ObjectNoun, Verb, Preposition, Determiner, SubjectNoun, Adverb],
];
