use serde::{Deserialize, Serialize};
use std::fmt;

/// Grammatical role of a slot in a template. Each role is backed by one wordlist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    Adjective,
    SubjectNoun,
    Verb,
    Preposition,
    Determiner,
    ObjectNoun,
    Adverb,
    Conjunction,
}

impl PartOfSpeech {
    pub const COUNT: usize = 8;

    pub const ALL: [PartOfSpeech; Self::COUNT] = [
        PartOfSpeech::Adjective,
        PartOfSpeech::SubjectNoun,
        PartOfSpeech::Verb,
        PartOfSpeech::Preposition,
        PartOfSpeech::Determiner,
        PartOfSpeech::ObjectNoun,
        PartOfSpeech::Adverb,
        PartOfSpeech::Conjunction,
    ];

    /// Position in `ALL`, used to index per-category tables.
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Name of the wordlist file for this category
    pub fn file_name(self) -> &'static str {
        match self {
            PartOfSpeech::Adjective => "adjectives.txt",
            PartOfSpeech::SubjectNoun => "sub_nouns.txt",
            PartOfSpeech::Verb => "verbs.txt",
            PartOfSpeech::Preposition => "prepositions.txt",
            PartOfSpeech::Determiner => "determiners.txt",
            PartOfSpeech::ObjectNoun => "obj_nouns.txt",
            PartOfSpeech::Adverb => "adverbs.txt",
            PartOfSpeech::Conjunction => "conjunctions.txt",
        }
    }

    /// Wordlist compiled into the binary.
    pub(crate) fn embedded_words(self) -> &'static str {
        match self {
            PartOfSpeech::Adjective => include_str!("../wordlists/adjectives.txt"),
            PartOfSpeech::SubjectNoun => include_str!("../wordlists/sub_nouns.txt"),
            PartOfSpeech::Verb => include_str!("../wordlists/verbs.txt"),
            PartOfSpeech::Preposition => include_str!("../wordlists/prepositions.txt"),
            PartOfSpeech::Determiner => include_str!("../wordlists/determiners.txt"),
            PartOfSpeech::ObjectNoun => include_str!("../wordlists/obj_nouns.txt"),
            PartOfSpeech::Adverb => include_str!("../wordlists/adverbs.txt"),
            PartOfSpeech::Conjunction => include_str!("../wordlists/conjunctions.txt"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::SubjectNoun => "subject_noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Preposition => "preposition",
            PartOfSpeech::Determiner => "determiner",
            PartOfSpeech::ObjectNoun => "object_noun",
            PartOfSpeech::Adverb => "adverb",
            PartOfSpeech::Conjunction => "conjunction",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
