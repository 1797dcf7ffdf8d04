use log::debug;
use rand::{seq::SliceRandom, Rng};

use crate::catalog::{Template, TemplateCatalog};
use crate::decompose::{split_length, DEFAULT_BUFFER, MIN_BUFFER};
use crate::error::{PassphraseError, PassphraseResult};
use crate::lexicon::Lexicon;
use crate::passphrase::{Passphrase, UnitPassphrase};
use crate::pos::PartOfSpeech;

/// Tunables for phrase composition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComposerSettings {
    /// Words a chained phrase may run past the requested length. Values below
    /// [`MIN_BUFFER`] are raised to it.
    pub buffer: usize,
}

impl Default for ComposerSettings {
    fn default() -> Self {
        Self {
            buffer: DEFAULT_BUFFER,
        }
    }
}

/// Builds passphrases from a lexicon and a template catalog.
///
/// Lengths found in the catalog are produced from a single template. Longer
/// lengths are split into several catalog lengths, each composed on its own and
/// joined with a random conjunction.
#[derive(Clone, Copy, Debug)]
pub struct PhraseComposer<'a> {
    lexicon: &'a Lexicon,
    catalog: &'a TemplateCatalog,
    settings: ComposerSettings,
}

impl<'a> PhraseComposer<'a> {
    pub fn new(lexicon: &'a Lexicon, catalog: &'a TemplateCatalog) -> Self {
        Self {
            lexicon,
            catalog,
            settings: ComposerSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ComposerSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn lexicon(&self) -> &'a Lexicon {
        self.lexicon
    }

    pub fn catalog(&self) -> &'a TemplateCatalog {
        self.catalog
    }

    /// Effective buffer after clamping.
    pub fn buffer(&self) -> usize {
        self.settings.buffer.max(MIN_BUFFER)
    }

    /// Fill one uniformly chosen template of exactly `length` words.
    pub fn unit_phrase<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        length: usize,
        capitalize: bool,
    ) -> PassphraseResult<UnitPassphrase> {
        let templates = self.catalog.templates_for_length(length)?;
        let template = templates
            .choose(rng)
            .ok_or(PassphraseError::UnsupportedLength { length })?;
        debug!("Length {} uses template [{}]", length, template);

        let mut words = Vec::with_capacity(template.len());
        let mut slot_sizes = Vec::with_capacity(template.len());
        for &pos in template.slots() {
            words.push(self.draw(rng, pos, capitalize)?);
            slot_sizes.push(self.lexicon.word_count(pos));
        }

        Ok(UnitPassphrase {
            words,
            word_count: length,
            template: template.clone(),
            slot_sizes,
        })
    }

    /// Compose a passphrase of `length` words, or slightly more when the length
    /// has to be chained from several sub-phrases.
    pub fn compose<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        length: usize,
        separator: &str,
        capitalize: bool,
    ) -> PassphraseResult<Passphrase> {
        if self.catalog.contains(length) {
            let unit = self.unit_phrase(rng, length, capitalize)?;
            return Ok(Passphrase::from_unit(unit, separator, capitalize));
        }
        if length <= self.catalog.max_length() {
            return Err(PassphraseError::UnsupportedLength { length });
        }

        let lengths = split_length(rng, self.catalog, length, self.buffer())?;

        let mut words: Vec<String> = Vec::new();
        let mut sub_combinations: Vec<Template> = Vec::new();
        let mut slot_sizes: Vec<usize> = Vec::new();

        for (index, &sub_length) in lengths.iter().enumerate() {
            if index > 0 {
                words.push(self.draw(rng, PartOfSpeech::Conjunction, capitalize)?);
                sub_combinations.push(Template::conjunction());
                slot_sizes.push(self.lexicon.word_count(PartOfSpeech::Conjunction));
            }
            let sub_phrase = self.compose(rng, sub_length, separator, capitalize)?;
            words.extend(sub_phrase.words);
            sub_combinations.extend(sub_phrase.sub_combinations);
            slot_sizes.extend(sub_phrase.slot_sizes);
        }

        let word_count = lengths.iter().sum::<usize>() + lengths.len() - 1;
        debug_assert_eq!(word_count, words.len());

        Ok(Passphrase {
            words,
            word_count,
            separator: separator.to_string(),
            capitalize,
            sub_combinations,
            slot_sizes,
        })
    }

    fn draw<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        pos: PartOfSpeech,
        capitalize: bool,
    ) -> PassphraseResult<String> {
        let word = self.lexicon.random_word(rng, pos)?;
        Ok(if capitalize {
            capitalize_first(word)
        } else {
            word.to_string()
        })
    }
}

/// Upper-case the first character, leaving the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
