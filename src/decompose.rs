use log::debug;
use rand::Rng;

use crate::catalog::TemplateCatalog;
use crate::error::{PassphraseError, PassphraseResult};

/// Smallest overshoot that still guarantees the split can land in range.
pub const MIN_BUFFER: usize = 3;

/// Default overshoot allowed past the requested word count.
pub const DEFAULT_BUFFER: usize = 3;

/// Draws allowed before giving up on a split.
pub const MAX_DECOMPOSE_ATTEMPTS: usize = 10_000;

/// Placeholder for the conjunction that joins two sub-phrases.
const CONJUNCTION_SLOT: usize = 1;

/// Split `length` into catalog lengths joined by single-word conjunctions.
///
/// The returned lengths, plus one conjunction between each consecutive pair,
/// add up to a total in `length..=length + buffer`. `buffer` is raised to
/// [`MIN_BUFFER`] when smaller.
///
/// The split is greedy: whenever the gap left (minus the joining conjunction)
/// is itself a catalog length it is taken, otherwise a random catalog length
/// is drawn and dropped again if it overshoots the buffer.
pub fn split_length<R: Rng + ?Sized>(
    rng: &mut R,
    catalog: &TemplateCatalog,
    length: usize,
    buffer: usize,
) -> PassphraseResult<Vec<usize>> {
    let buffer = buffer.max(MIN_BUFFER);
    let options: Vec<usize> = catalog
        .sorted_lengths()
        .iter()
        .copied()
        .filter(|&l| l != CONJUNCTION_SLOT)
        .collect();
    if options.is_empty() {
        return Err(PassphraseError::UnsupportedLength { length });
    }

    // Sub-phrase lengths with a conjunction slot after each one.
    let mut slots: Vec<usize> = Vec::new();
    let mut attempts = 0;

    while committed(&slots) < length {
        attempts += 1;
        if attempts > MAX_DECOMPOSE_ATTEMPTS {
            return Err(PassphraseError::DecompositionStalled {
                length,
                buffer,
                attempts: MAX_DECOMPOSE_ATTEMPTS,
            });
        }

        let remaining = length - committed(&slots) - 1;
        let sub_length = if options.contains(&remaining) {
            remaining
        } else {
            options[rng.gen_range(0..options.len())]
        };

        slots.push(sub_length);
        if slots.iter().sum::<usize>() > length + buffer {
            slots.pop();
            continue;
        }
        slots.push(CONJUNCTION_SLOT);
    }

    let lengths: Vec<usize> = slots
        .into_iter()
        .filter(|&slot| slot != CONJUNCTION_SLOT)
        .collect();
    debug!(
        "Split length {} into {:?} after {} draws",
        length, lengths, attempts
    );
    Ok(lengths)
}

/// Words covered so far, ignoring the trailing conjunction slot.
fn committed(slots: &[usize]) -> usize {
    match slots.split_last() {
        Some((_, rest)) => rest.iter().sum(),
        None => 0,
    }
}

/// Total word count of a split, conjunctions included.
pub fn joined_length(lengths: &[usize]) -> usize {
    lengths.iter().sum::<usize>() + lengths.len().saturating_sub(1)
}
