//! # Command-Line Interface Module
//!
//! Clap derive definitions for the `camelot-mixer` binary.
//!
//! ## Commands
//!
//! - `mix`: Order a JSON track list into a harmonic / tempo aware set
//! - `classify`: Show the mix type between two Camelot keys
//! - `completion`: Print a shell completion script
//!
//! ## Examples
//!
//! ```bash
//! camelot-mixer mix --input tracks.json
//! camelot-mixer mix --input tracks.json --strategy bpm-first --output sets/friday.json
//! camelot-mixer classify 8A 9A
//! ```

use crate::strategy::StrategyKind;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Ordering strategy selectable on the command line
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum StrategyArg {
    /// Tempo continuity first; harmony breaks ties between close tempos
    BpmFirst,
    /// Harmonic compatibility first; small penalty for tempo jumps
    HarmonicFirst,
}

impl From<StrategyArg> for StrategyKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::BpmFirst => StrategyKind::BpmFirst,
            StrategyArg::HarmonicFirst => StrategyKind::HarmonicFirst,
        }
    }
}

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "camelot-mixer")]
#[command(about = "Order a DJ set by Camelot key compatibility and BPM continuity")]
#[command(version)]
pub struct Args {
    /// Config file to use instead of the platform default location
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of all available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a mix from a JSON list of tracks
    ///
    /// Tracks without a BPM or a valid Camelot key are skipped and reported.
    /// The output contains only title, artist, bpm and key for each track.
    Mix {
        /// Input JSON file (array of {title|song, artist, bpm, key})
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        input: PathBuf,

        /// Output JSON file
        ///
        /// Defaults to `<input>_mixed.json` (harmonic-first) or
        /// `<input>_mixed_bpm_first.json` (bpm-first).
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,

        /// Ordering strategy (defaults to the config file, then harmonic-first)
        #[arg(short, long, value_enum, env = "CAMELOT_MIXER_STRATEGY")]
        strategy: Option<StrategyArg>,

        /// Override the strategy's BPM weight
        #[arg(long, env = "CAMELOT_MIXER_WEIGHT_BPM")]
        weight_bpm: Option<f64>,

        /// Print every transition with its mix type and score
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show the harmonic mix type from one Camelot key to another
    Classify {
        /// Key of the outgoing track, e.g. 8A
        from: String,
        /// Key of the incoming track, e.g. 9A
        to: String,
    },

    /// Generate shell completions
    ///
    /// Usage: camelot-mixer completion bash > camelot-mixer.bash
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}
