//! Harmonic DJ set ordering from track metadata.
//!
//! Given tracks with a BPM and a Camelot key, builds a play order that keeps
//! neighbouring tracks harmonically compatible and close in tempo.
//!
//! ### Core Modules
//!
//! - [`key`] - Camelot key decoding and wheel arithmetic
//! - [`classifier`] - Harmonic mix type classification
//! - [`strategy`] - Transition scoring (BPM-first, harmonic-first)
//! - [`path`] - Greedy path construction
//! - [`output`] - Projection to the public record shape
//!
//! ### Supporting Modules
//!
//! - [`track`] - Track records
//! - [`library`] - JSON loading, filtering and writing
//! - [`config`] - User defaults from the config file
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//!
//! ## Quick Start Example
//!
//! ```
//! use camelot_mixer::{output, PathBuilder, Strategy, Track};
//!
//! let tracks = vec![
//!     Track::new("Opener", "Artist", Some(122.0), Some("8A")),
//!     Track::new("Peak", "Artist", Some(128.0), Some("10A")),
//!     Track::new("Lift", "Artist", Some(124.0), Some("9A")),
//! ];
//!
//! let path = PathBuilder::default().build(&tracks, &Strategy::harmonic_first())?;
//! for (pair, transition) in path.tracks.windows(2).zip(&path.transitions) {
//!     println!("{} -> {}: {}", pair[0].title, pair[1].title, transition.mix_type);
//! }
//!
//! let records = output::project(&path.tracks);
//! assert_eq!(records[0].title, "Opener");
//! # Ok::<(), camelot_mixer::Error>(())
//! ```
//!
//! ## Mix Types
//!
//! | Mix type     | Score | Example   |
//! |--------------|-------|-----------|
//! | perfect mix  | 5     | 8A -> 8A  |
//! | +1 mix       | 4     | 8A -> 9A  |
//! | -1 mix       | 4     | 9A -> 8A  |
//! | energy boost | 3     | 8A -> 10A |
//! | scale change | 3     | 8A -> 8B  |
//! | diagonal mix | 2     | 9A -> 8B  |
//! | mood shifter | 2     | 1B -> 4A  |
//! | jaws mix     | 1     | 1A -> 8A  |
//! | non-harmonic | 0     | 8A -> 3B  |
//! | unknown      | 0     | missing key |
//!
//! ## Error Handling
//!
//! The ordering core returns [`Error`] and never logs. Malformed keys are
//! reported as [`Error::InvalidKeyFormat`] rather than classified. The
//! [`library`] and [`config`] layers use `anyhow::Result` with context.

pub mod classifier;
pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod key;
pub mod library;
pub mod output;
pub mod path;
pub mod strategy;
pub mod track;

pub use classifier::{classify, MixScoreTable, MixType};
pub use error::{Error, Result};
pub use key::CamelotKey;
pub use output::MixRecord;
pub use path::{MixPath, PathBuilder, PathMode};
pub use strategy::{Strategy, StrategyKind, Transition, TransitionScorer};
pub use track::Track;
