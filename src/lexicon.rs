use log::{debug, warn};
use rand::{seq::SliceRandom, Rng};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::{PassphraseError, PassphraseResult};
use crate::pos::PartOfSpeech;

/// Where a lexicon reads its wordlists from.
#[derive(Clone, Debug)]
enum WordSource {
    /// Lists compiled into the binary.
    Embedded,
    /// One `<category>.txt` file per category.
    Directory(PathBuf),
    /// Lists supplied by the caller; categories without a list are empty.
    Memory(HashMap<PartOfSpeech, Vec<String>>),
}

/// Wordlists by part of speech.
///
/// Each category is loaded on first access and cached for the lifetime of the
/// lexicon. The cache cells are `OnceLock`s, so a lexicon can be shared across
/// threads without further locking.
#[derive(Debug)]
pub struct Lexicon {
    source: WordSource,
    lists: [OnceLock<Vec<String>>; PartOfSpeech::COUNT],
}

impl Lexicon {
    fn with_source(source: WordSource) -> Self {
        Self {
            source,
            lists: Default::default(),
        }
    }

    /// Lexicon backed by the wordlists shipped with the crate.
    pub fn embedded() -> Self {
        Self::with_source(WordSource::Embedded)
    }

    /// Lexicon reading `<dir>/<category file name>` for each category.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self::with_source(WordSource::Directory(dir.into()))
    }

    /// Empty in-memory lexicon, filled with [`Lexicon::with_words`].
    pub fn in_memory() -> Self {
        Self::with_source(WordSource::Memory(HashMap::new()))
    }

    /// Process-wide lexicon over the embedded wordlists.
    pub fn builtin() -> &'static Lexicon {
        static BUILTIN: OnceLock<Lexicon> = OnceLock::new();
        BUILTIN.get_or_init(Lexicon::embedded)
    }

    /// Add words for a category. Only meaningful for in-memory lexicons; any
    /// other source is switched to in-memory, dropping what it would have loaded.
    /// The category's cache is cleared so the new words are seen by later reads.
    pub fn with_words(mut self, pos: PartOfSpeech, words: &[&str]) -> Self {
        if !matches!(self.source, WordSource::Memory(_)) {
            self.source = WordSource::Memory(HashMap::new());
            self.lists = Default::default();
        }
        if let WordSource::Memory(by_pos) = &mut self.source {
            by_pos
                .entry(pos)
                .or_insert_with(Vec::new)
                .extend(
                    words
                        .iter()
                        .map(|w| w.trim())
                        .filter(|w| !w.is_empty())
                        .map(str::to_string),
                );
        }
        self.lists[pos.index()] = OnceLock::new();
        self
    }

    /// All words for a category, loading them on first use.
    pub fn words(&self, pos: PartOfSpeech) -> &[String] {
        self.lists[pos.index()].get_or_init(|| self.load(pos))
    }

    pub fn word_count(&self, pos: PartOfSpeech) -> usize {
        self.words(pos).len()
    }

    /// One uniformly random word from the category.
    pub fn random_word<R: Rng + ?Sized>(&self, rng: &mut R, pos: PartOfSpeech) -> PassphraseResult<&str> {
        self.words(pos)
            .choose(rng)
            .map(String::as_str)
            .ok_or(PassphraseError::EmptyLexicon { category: pos })
    }

    /// `n` independent draws, with replacement.
    pub fn random_words<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        pos: PartOfSpeech,
        n: usize,
    ) -> PassphraseResult<Vec<&str>> {
        (0..n).map(|_| self.random_word(rng, pos)).collect()
    }

    fn load(&self, pos: PartOfSpeech) -> Vec<String> {
        let words = match &self.source {
            WordSource::Embedded => parse_wordlist(pos.embedded_words()),
            WordSource::Directory(dir) => read_wordlist_file(&dir.join(pos.file_name()), pos),
            WordSource::Memory(by_pos) => by_pos.get(&pos).cloned().unwrap_or_default(),
        };
        debug!("Loaded {} words for {}", words.len(), pos);
        words
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::embedded()
    }
}

/// Split a wordlist resource into words: one per line, trimmed, blanks skipped.
pub fn parse_wordlist(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

fn read_wordlist_file(path: &Path, pos: PartOfSpeech) -> Vec<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => parse_wordlist(&text),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No wordlist for {} at {:?}", pos, path);
            Vec::new()
        }
        Err(e) => {
            warn!("Failed to read wordlist for {} from {:?}: {}", pos, path, e);
            Vec::new()
        }
    }
}
