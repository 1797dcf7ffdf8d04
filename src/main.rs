mod config;

use anyhow::{bail, Context, Result};
use better_passphrase::{generate_batch, Lexicon, Passphrase, PhraseComposer, TemplateCatalog};
use clap::Parser;
use config::Config;
use log::{info, warn};
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() -> Result<()> {
    let config = Config::parse();

    // Logs go to stderr so stdout only carries passphrases
    env_logger::Builder::from_default_env()
        .filter_level(config.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .target(env_logger::Target::Stderr)
        .init();

    info!("Configuration: {:?}", config);

    if config.num_phrases == 0 {
        bail!("Invalid number of phrases to generate: must be at least 1");
    }

    let dir_lexicon;
    let lexicon = match &config.wordlist_dir {
        Some(dir) => {
            info!("Loading wordlists from {:?}", dir);
            dir_lexicon = Lexicon::from_dir(dir);
            &dir_lexicon
        }
        None => Lexicon::builtin(),
    };
    let composer = PhraseComposer::new(lexicon, TemplateCatalog::builtin())
        .with_settings(config.composer_settings());

    let lengths = vec![config.length; config.num_phrases];
    let outcomes = generate_batch(
        &composer,
        &lengths,
        &config.sep,
        config.capitalize,
        config.batch_settings(),
    )?;

    let mut phrases: Vec<Passphrase> = Vec::with_capacity(outcomes.len());
    let mut failures = 0;
    for outcome in outcomes {
        match outcome.result {
            Ok(phrase) => phrases.push(phrase),
            Err(e) => {
                failures += 1;
                eprintln!("Error: phrase {} (length {}): {}", outcome.index + 1, outcome.length, e);
            }
        }
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for phrase in &phrases {
        print_phrase(&mut out, phrase, &config)?;
    }
    out.flush()?;

    if let Some(path) = &config.output {
        let file = File::create(path).with_context(|| format!("Failed to open output file {:?}", path))?;
        let mut writer = BufWriter::new(file);
        for phrase in &phrases {
            writeln!(writer, "{}", phrase.passphrase())?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to write output file {:?}", path))?;
        info!("Wrote {} phrases to {:?}", phrases.len(), path);
    }

    if failures > 0 {
        warn!("{} of {} phrases failed", failures, lengths.len());
        bail!("{} of {} phrases could not be generated", failures, lengths.len());
    }
    Ok(())
}

fn print_phrase(out: &mut impl Write, phrase: &Passphrase, config: &Config) -> Result<()> {
    if config.json {
        writeln!(out, "{}", serde_json::to_string(&phrase.report())?)?;
        return Ok(());
    }

    match config.verbosity {
        0 => writeln!(out, "{}", phrase.passphrase())?,
        1 => {
            writeln!(out)?;
            writeln!(out, "Generated phrase: {}", phrase.passphrase())?;
            writeln!(out, "Word count:       {}", phrase.word_count)?;
        }
        _ => {
            let parts = phrase
                .sub_combinations
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join("\n                        ");
            writeln!(out)?;
            writeln!(out, "Generated phrase:       {}", phrase.passphrase())?;
            writeln!(out, "Word count:             {}", phrase.word_count)?;
            writeln!(out, "Wordlist Probability:   {:.2e}", phrase.wordlist_probability())?;
            writeln!(out, "Character Probability:  {:.2e}", phrase.character_probability())?;
            writeln!(out, "Wordlist Entropy:       {:.1} bits", phrase.wordlist_entropy_bits())?;
            writeln!(out, "Character Entropy:      {:.1} bits", phrase.character_entropy_bits())?;
            writeln!(out, "Parts of speech:        {}", parts)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
