use clap::Parser;
use std::path::PathBuf;

use better_passphrase::{BatchSettings, ComposerSettings, DEFAULT_BUFFER};

/// Command line configuration
#[derive(Debug, Clone, Parser)]
#[command(name = "better-passphrase")]
#[command(about = "Generate a phrase based on the specified options.")]
pub struct Config {
    /// Number of words in the phrase
    #[arg(short, long, default_value = "6")]
    pub length: usize,

    /// Separator between words
    #[arg(short, long, default_value = "-", allow_hyphen_values = true)]
    pub sep: String,

    /// Capitalize every word
    #[arg(short, long)]
    pub capitalize: bool,

    /// File to write the phrases to, one per line
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of phrases to generate
    #[arg(short, long, default_value = "1")]
    pub num_phrases: usize,

    /// 0 for passphrase only, 1 for basic info, 2 for detailed info
    #[arg(short, long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..=2))]
    pub verbosity: u8,

    /// Seed for deterministic generation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Words a chained phrase may run past the requested length (minimum 3)
    #[arg(long, default_value_t = DEFAULT_BUFFER)]
    pub buffer: usize,

    /// Directory holding the part-of-speech wordlists (defaults to the built-in lists)
    #[arg(long)]
    pub wordlist_dir: Option<PathBuf>,

    /// Worker threads used when generating several phrases
    #[arg(long)]
    pub workers: Option<usize>,

    /// Print one JSON object per phrase instead of text
    #[arg(long)]
    pub json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Config {
    pub fn composer_settings(&self) -> ComposerSettings {
        ComposerSettings {
            buffer: self.buffer,
        }
    }

    pub fn batch_settings(&self) -> BatchSettings {
        let defaults = BatchSettings::default();
        BatchSettings {
            workers: self.workers.unwrap_or(defaults.workers),
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::parse_from(["better-passphrase"]);
        assert_eq!(config.length, 6);
        assert_eq!(config.sep, "-");
        assert!(!config.capitalize);
        assert_eq!(config.num_phrases, 1);
        assert_eq!(config.verbosity, 0);
        assert_eq!(config.buffer, DEFAULT_BUFFER);
        assert_eq!(config.log_level, "warn");
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_config_flags() {
        let config = Config::parse_from([
            "better-passphrase",
            "-l",
            "14",
            "-s",
            "_",
            "-c",
            "-n",
            "3",
            "-v",
            "2",
            "--seed",
            "7",
            "--workers",
            "2",
        ]);
        assert_eq!(config.length, 14);
        assert_eq!(config.sep, "_");
        assert!(config.capitalize);
        assert_eq!(config.num_phrases, 3);
        assert_eq!(config.verbosity, 2);
        assert_eq!(config.batch_settings().workers, 2);
        assert_eq!(config.batch_settings().seed, Some(7));
    }

    #[test]
    fn test_verbosity_out_of_range_is_rejected() {
        assert!(Config::try_parse_from(["better-passphrase", "-v", "3"]).is_err());
    }
}
