//! Projection of an ordered mix down to the public record shape.

use crate::track::Track;
use serde::{Deserialize, Serialize};

/// A track as written to the mix file: exactly title, artist, BPM and key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixRecord {
    pub title: String,
    pub artist: String,
    pub bpm: Option<f64>,
    pub key: Option<String>,
}

impl From<&Track> for MixRecord {
    fn from(track: &Track) -> Self {
        Self {
            title: track.title.clone(),
            artist: track.artist.clone(),
            bpm: track.bpm,
            key: track.key.clone(),
        }
    }
}

/// Strip every working or unknown field, preserving order.
#[must_use]
pub fn project(ordered: &[&Track]) -> Vec<MixRecord> {
    ordered.iter().map(|&track| MixRecord::from(track)).collect()
}
