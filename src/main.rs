//! # camelot-mixer
//!
//! Orders a JSON list of tracks into a DJ set that respects Camelot key
//! compatibility and BPM continuity.
//!
//! ## Usage
//!
//! ```bash
//! # Harmonic-first mix, written to tracks_mixed.json
//! camelot-mixer mix --input tracks.json
//!
//! # BPM-first mix with a heavier tempo weight
//! camelot-mixer mix --input tracks.json --strategy bpm-first --weight-bpm 0.6
//!
//! # Inspect a single transition
//! camelot-mixer classify 9A 8B
//! ```

use anyhow::{Context, Result};
use camelot_mixer::cli::{self, Command};
use camelot_mixer::config::MixerConfig;
use camelot_mixer::{classifier, completion, key, library, output, MixPath, PathMode, StrategyKind};
use clap::Parser;
use log::{info, warn};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Main entry point.
///
/// # Logging
///
/// Initializes environment logger which can be controlled via `RUST_LOG`:
/// - `RUST_LOG=debug camelot-mixer mix -i tracks.json` - Enable debug logging
/// - `RUST_LOG=camelot_mixer::library=warn camelot-mixer mix ...` - Show skipped tracks
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    match args.command {
        Command::Mix { input, output, strategy, weight_bpm, verbose } => {
            let config = MixerConfig::load(args.config.as_deref())?;
            let request = MixRequest {
                input,
                output,
                kind: strategy.map(StrategyKind::from),
                weight_bpm,
                verbose,
            };
            run_mix(&config, request)?;
        }
        Command::Classify { from, to } => {
            run_classify(&from, &to)?;
        }
        Command::Completion { shell } => {
            completion::print_completions(shell);
        }
    }

    Ok(())
}

struct MixRequest {
    input: PathBuf,
    output: Option<PathBuf>,
    kind: Option<StrategyKind>,
    weight_bpm: Option<f64>,
    verbose: bool,
}

fn run_mix(config: &MixerConfig, request: MixRequest) -> Result<()> {
    let strategy = config
        .strategy(request.kind, request.weight_bpm)
        .context("Invalid strategy settings")?;
    let input = display_path(&request.input);
    info!(
        "Mixing {} with {} strategy (weight_bpm = {})",
        input.display(),
        strategy.kind,
        strategy.weight_bpm
    );

    let library = library::load_tracks(&request.input)?;
    println!("Loaded {} tracks.", library.total());
    println!("  Using {} tracks with BPM and key.", library.usable.len());
    if !library.skipped.is_empty() {
        println!("  {} tracks skipped (missing BPM or key).", library.skipped.len());
    }

    let path = config.path_builder().build(&library.usable, &strategy)?;
    if path.mode == PathMode::NoKeyedStart {
        warn!("No track has a usable key; falling back to plain BPM order");
    }
    if request.verbose {
        print_transitions(&path);
    }

    let records = output::project(&path.tracks);
    let output_path = match request.output {
        Some(path) => path,
        None => library::default_output_path(
            &request.input,
            strategy.kind,
            config.output_dir.as_deref(),
        )?,
    };
    library::write_mix(&output_path, &records)?;

    println!();
    println!("{} mix saved to {}", strategy.kind, display_path(&output_path).display());
    println!("Tracks in mix: {}", records.len());
    Ok(())
}

fn print_transitions(path: &MixPath<'_>) {
    for (index, track) in path.tracks.iter().enumerate() {
        let bpm = track.bpm.map_or_else(|| "?".to_string(), |bpm| format!("{bpm:.1}"));
        let key = track.key.as_deref().unwrap_or("?");
        println!("{:>4}. [{bpm:>6} {key:>3}] {} - {}", index + 1, track.artist, track.title);
        if let Some(transition) = path.transitions.get(index) {
            println!("        -> {} ({:.2})", transition.mix_type, transition.score);
        }
    }
    println!("Total transition score: {:.2}", path.total_score());
}

fn run_classify(from: &str, to: &str) -> Result<()> {
    let from_key = key::decode(from.trim())?;
    let to_key = key::decode(to.trim())?;
    let mix_type = classifier::classify_keys(from_key, to_key);
    let score = classifier::MixScoreTable::default().score(mix_type);
    println!("{from_key} -> {to_key}: {mix_type} (score {score:.1})");
    Ok(())
}

/// Absolute form of `path` for messages, falling back to the path as given
fn display_path(path: &Path) -> PathBuf {
    path.absolutize()
        .map(|p| p.into_owned())
        .unwrap_or_else(|_| path.to_path_buf())
}
