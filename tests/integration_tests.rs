use better_passphrase::{
    generate_batch, generate_phrase, BatchSettings, Lexicon, PartOfSpeech, PassphraseError,
    PhraseComposer, TemplateCatalog, DEFAULT_BUFFER,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::process::Command;

/// Count words that start with an uppercase letter followed by lowercase ones
fn count_capitalized(text: &str, sep: char) -> usize {
    text.split(sep)
        .filter(|w| {
            let mut chars = w.chars();
            matches!(chars.next(), Some(c) if c.is_uppercase()) && chars.all(|c| c.is_lowercase())
        })
        .count()
}

#[test]
fn test_every_catalog_length_yields_exact_word_count() {
    let catalog = TemplateCatalog::builtin();
    for &length in catalog.sorted_lengths() {
        let phrase = generate_phrase(length, " ", true).unwrap();
        assert_eq!(phrase.word_count, length);
        assert_eq!(phrase.passphrase().split(' ').count(), length);
        assert_eq!(count_capitalized(&phrase.passphrase(), ' '), length);
    }
}

#[test]
fn test_separator_splits_words() {
    let phrase = generate_phrase(4, "-", false).unwrap();
    assert_eq!(phrase.passphrase().split('-').count(), 4);
    assert!(phrase
        .words
        .iter()
        .all(|w| w.chars().next().map_or(false, |c| c.is_lowercase())));
}

#[test]
fn test_lengths_below_minimum_fail() {
    let min = TemplateCatalog::builtin().min_length();
    for length in 0..min {
        match generate_phrase(length, "-", true) {
            Err(PassphraseError::UnsupportedLength { length: l }) => assert_eq!(l, length),
            other => panic!("expected UnsupportedLength for {}, got {:?}", length, other),
        }
    }
}

#[test]
fn test_long_phrases_stay_within_buffer() {
    let max = TemplateCatalog::builtin().max_length();
    for length in [max + 1, max + DEFAULT_BUFFER, 25, 40] {
        let phrase = generate_phrase(length, "-", true).unwrap();
        assert!(phrase.word_count >= length);
        assert!(phrase.word_count <= length + DEFAULT_BUFFER);
        assert_eq!(phrase.word_count, phrase.words.len());
        assert_eq!(phrase.passphrase().split('-').count(), phrase.word_count);

        let sub_phrases = phrase
            .sub_combinations
            .iter()
            .enumerate()
            .filter(|(i, _)| i % 2 == 0)
            .count();
        assert_eq!(phrase.conjunction_count(), sub_phrases - 1);
    }
}

#[test]
fn test_wordlist_probability_matches_lexicon_sizes() {
    let lexicon = Lexicon::builtin();
    let phrase = generate_phrase(12, "-", false).unwrap();
    let expected: f64 = phrase
        .combination()
        .iter()
        .map(|&pos| 1.0 / lexicon.word_count(pos) as f64)
        .product();
    let probability = phrase.wordlist_probability();
    assert!(probability > 0.0 && probability <= 1.0);
    assert!((probability - expected).abs() <= expected * 1e-9);

    let one_of: u128 = phrase
        .combination()
        .iter()
        .map(|&pos| lexicon.word_count(pos) as u128)
        .product();
    assert_eq!(phrase.one_of(), Some(one_of));
}

#[test]
fn test_very_long_phrase_keeps_positive_probabilities() {
    let composer = PhraseComposer::new(Lexicon::builtin(), TemplateCatalog::builtin());
    let phrase = composer
        .compose(&mut StdRng::seed_from_u64(1), 300, "-", true)
        .unwrap();
    assert!(phrase.word_count >= 300 && phrase.word_count <= 300 + DEFAULT_BUFFER);

    let wordlist = phrase.wordlist_probability();
    let character = phrase.character_probability();
    assert!(wordlist > 0.0 && wordlist <= 1.0);
    assert!(character > 0.0 && character <= 1.0);
    assert!(phrase.wordlist_entropy_bits().is_finite());

    let report = phrase.report();
    assert!(report.wordlist_probability > 0.0);
    assert!(report.character_probability > 0.0);
}

#[test]
fn test_seeded_pipeline_is_reproducible() {
    let composer = PhraseComposer::new(Lexicon::builtin(), TemplateCatalog::builtin());
    for length in [3, 8, 9, 30] {
        let a = composer
            .compose(&mut StdRng::seed_from_u64(99), length, "-", true)
            .unwrap();
        let b = composer
            .compose(&mut StdRng::seed_from_u64(99), length, "-", true)
            .unwrap();
        assert_eq!(a.passphrase(), b.passphrase());
    }
}

#[test]
fn test_directory_lexicon() {
    let dir = tempfile::tempdir().unwrap();
    for (pos, words) in [
        (PartOfSpeech::Determiner, "the\n"),
        (PartOfSpeech::Adjective, "quick\n\n"),
        (PartOfSpeech::SubjectNoun, "  fox  \n"),
    ] {
        std::fs::write(dir.path().join(pos.file_name()), words).unwrap();
    }
    let lexicon = Lexicon::from_dir(dir.path());
    let catalog = TemplateCatalog::new(vec![(
        3,
        vec![better_passphrase::Template::new([
            PartOfSpeech::Determiner,
            PartOfSpeech::Adjective,
            PartOfSpeech::SubjectNoun,
        ])],
    )])
    .unwrap();
    let composer = PhraseComposer::new(&lexicon, &catalog);

    let phrase = composer
        .compose(&mut StdRng::seed_from_u64(1), 3, "-", true)
        .unwrap();
    assert_eq!(phrase.passphrase(), "The-Quick-Fox");
    assert_eq!(phrase.wordlist_probability(), 1.0);
    assert_eq!(lexicon.word_count(PartOfSpeech::Verb), 0);
}

#[test]
fn test_batch_reports_failures_alongside_successes() {
    let composer = PhraseComposer::new(Lexicon::builtin(), TemplateCatalog::builtin());
    let outcomes = generate_batch(
        &composer,
        &[6, 2, 15],
        "-",
        true,
        BatchSettings {
            workers: 2,
            seed: None,
        },
    )
    .unwrap();

    assert!(outcomes[0].result.is_ok());
    assert!(outcomes[1].result.is_err());
    assert!(outcomes[2].result.is_ok());
}

#[test]
fn test_cli_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("phrases.txt");
    let max = TemplateCatalog::builtin().max_length();
    let length = max + DEFAULT_BUFFER;
    let length_arg = length.to_string();

    let status = Command::new(env!("CARGO_BIN_EXE_better-passphrase"))
        .args(["-l", length_arg.as_str(), "-s", "-", "-c", "-n", "3", "--seed", "5"])
        .arg("-o")
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());

    let content = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    for line in lines {
        let words = line.split('-').count();
        assert!(words >= length && words <= length + DEFAULT_BUFFER);
        assert_eq!(count_capitalized(line, '-'), words);
    }
}

#[test]
fn test_cli_json_output() {
    let output = Command::new(env!("CARGO_BIN_EXE_better-passphrase"))
        .args(["-l", "5", "--json", "--seed", "3"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let report: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(report["word_count"], 5);
    assert_eq!(report["parts_of_speech"].as_array().unwrap().len(), 1);
}

#[test]
fn test_cli_fails_on_unsupported_length() {
    let output = Command::new(env!("CARGO_BIN_EXE_better-passphrase"))
        .args(["-l", "2"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Cannot generate phrase of length 2"));
}
