//! Memorable passphrases built from part-of-speech wordlists.
//!
//! A passphrase of a catalog length comes from one grammatical template; longer
//! passphrases are chained from several templates joined by conjunctions.

pub mod batch;
pub mod catalog;
pub mod composer;
pub mod decompose;
pub mod error;
pub mod lexicon;
pub mod passphrase;
pub mod pos;

// Re-export commonly used types
pub use batch::{generate_batch, BatchOutcome, BatchSettings};
pub use catalog::{Template, TemplateCatalog};
pub use composer::{ComposerSettings, PhraseComposer};
pub use decompose::{DEFAULT_BUFFER, MIN_BUFFER};
pub use error::{PassphraseError, PassphraseResult};
pub use lexicon::Lexicon;
pub use passphrase::{Passphrase, PassphraseReport, UnitPassphrase};
pub use pos::PartOfSpeech;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Generate a passphrase from the built-in wordlists and templates, using an
/// RNG seeded from the operating system.
pub fn generate_phrase(length: usize, separator: &str, capitalize: bool) -> PassphraseResult<Passphrase> {
    let mut rng = StdRng::from_entropy();
    PhraseComposer::new(Lexicon::builtin(), TemplateCatalog::builtin())
        .compose(&mut rng, length, separator, capitalize)
}
