//! # Track Library I/O
//!
//! Loads track metadata from JSON, filters it down to what the mixer can
//! order, and writes finished mixes back out.
//!
//! ## Input format
//!
//! A JSON array of objects:
//!
//! ```json
//! [
//!   {"title": "Track", "artist": "Artist", "bpm": 126, "key": "8A"},
//!   {"song": "Older export", "artist": "Artist", "bpm": 124, "key": "7A", "url": "..."}
//! ]
//! ```
//!
//! A track is usable when it has a positive BPM and a key that decodes as
//! Camelot notation. Unusable tracks are reported in
//! [`LoadedLibrary::skipped`], never passed to the path builder.

use crate::key;
use crate::output::MixRecord;
use crate::strategy::StrategyKind;
use crate::track::Track;
use anyhow::{anyhow, bail, Context, Result};
use log::{debug, warn};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Why a track was left out of the mix
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingBpm,
    MissingKey,
    InvalidKey(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBpm => f.write_str("missing or non-positive BPM"),
            Self::MissingKey => f.write_str("missing key"),
            Self::InvalidKey(detail) => write!(f, "{detail}"),
        }
    }
}

/// Result of loading a library file
#[derive(Debug, Default)]
pub struct LoadedLibrary {
    /// Tracks ready for mixing, in file order
    pub usable: Vec<Track>,
    pub skipped: Vec<(Track, SkipReason)>,
}

impl LoadedLibrary {
    #[must_use]
    pub fn total(&self) -> usize {
        self.usable.len() + self.skipped.len()
    }
}

/// Load and filter a JSON track list.
///
/// # Errors
///
/// Returns an error if the file does not exist, cannot be read, or is not a
/// JSON array of track objects.
pub fn load_tracks(path: &Path) -> Result<LoadedLibrary> {
    if !path.exists() {
        bail!("Input file not found: {}", path.display());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read track list {}", path.display()))?;
    let tracks: Vec<Track> = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not a JSON array of tracks", path.display()))?;

    debug!("Parsed {} tracks from {}", tracks.len(), path.display());
    Ok(partition_usable(tracks))
}

/// Split tracks into mixable and skipped, normalising keys on the way.
#[must_use]
pub fn partition_usable(tracks: Vec<Track>) -> LoadedLibrary {
    let mut library = LoadedLibrary::default();

    for mut track in tracks {
        match check_usable(&mut track) {
            Ok(()) => library.usable.push(track),
            Err(reason) => {
                warn!("Skipping `{}' by `{}': {reason}", track.title, track.artist);
                library.skipped.push((track, reason));
            }
        }
    }

    library
}

fn check_usable(track: &mut Track) -> std::result::Result<(), SkipReason> {
    if !track.bpm.is_some_and(|bpm| bpm.is_finite() && bpm > 0.0) {
        return Err(SkipReason::MissingBpm);
    }

    let raw = match track.key.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => raw.to_string(),
        _ => return Err(SkipReason::MissingKey),
    };
    key::decode(&raw).map_err(|e| SkipReason::InvalidKey(e.to_string()))?;

    track.key = Some(raw);
    Ok(())
}

/// Write a finished mix as pretty-printed JSON, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be written.
pub fn write_mix(path: &Path, records: &[MixRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(records).context("Failed to serialise mix")?;
    fs::write(path, json + "\n")
        .with_context(|| format!("Failed to write mix to {}", path.display()))?;
    Ok(())
}

/// Output file name used when none is given on the command line.
///
/// `<stem>_mixed.json` for harmonic-first and `<stem>_mixed_bpm_first.json`
/// for BPM-first, placed in `output_dir` or else the current directory.
///
/// # Errors
///
/// Returns an error if the input path has no file name.
pub fn default_output_path(
    input: &Path,
    kind: StrategyKind,
    output_dir: Option<&Path>,
) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .ok_or_else(|| anyhow!("Input path {} has no file name", input.display()))?
        .to_string_lossy();

    let file_name = match kind {
        StrategyKind::HarmonicFirst => format!("{stem}_mixed.json"),
        StrategyKind::BpmFirst => format!("{stem}_mixed_bpm_first.json"),
    };

    Ok(match output_dir {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partition_usable() {
        let tracks = vec![
            Track::new("Good", "A", Some(124.0), Some(" 8a ")),
            Track::new("NoBpm", "A", None, Some("8A")),
            Track::new("ZeroBpm", "A", Some(0.0), Some("8A")),
            Track::new("NoKey", "A", Some(124.0), None),
            Track::new("BlankKey", "A", Some(124.0), Some("  ")),
            Track::new("BadKey", "A", Some(124.0), Some("14A")),
        ];

        let library = partition_usable(tracks);
        assert_eq!(library.total(), 6);
        assert_eq!(library.usable.len(), 1);
        assert_eq!(library.usable[0].key.as_deref(), Some("8a"), "Key should be trimmed");

        let reasons: Vec<&SkipReason> = library.skipped.iter().map(|(_, r)| r).collect();
        assert_eq!(reasons[0], &SkipReason::MissingBpm);
        assert_eq!(reasons[1], &SkipReason::MissingBpm);
        assert_eq!(reasons[2], &SkipReason::MissingKey);
        assert_eq!(reasons[3], &SkipReason::MissingKey);
        assert!(matches!(reasons[4], SkipReason::InvalidKey(detail) if detail.contains("14A")));
    }

    #[test]
    fn test_load_tracks_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_tracks(&temp_dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("Input file not found"));
    }

    #[test]
    fn test_load_tracks_rejects_non_array() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("object.json");
        fs::write(&path, r#"{"title": "Not a list"}"#).unwrap();
        assert!(load_tracks(&path).is_err());
    }

    #[test]
    fn test_write_mix_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/dir/mix.json");
        let records = vec![MixRecord {
            title: "Title".to_string(),
            artist: "Artist".to_string(),
            bpm: Some(128.0),
            key: Some("8A".to_string()),
        }];

        write_mix(&path, &records).unwrap();
        let written: Vec<MixRecord> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, records);
    }

    #[test]
    fn test_default_output_path() {
        let input = Path::new("/music/sets/friday.json");
        assert_eq!(
            default_output_path(input, StrategyKind::HarmonicFirst, None).unwrap(),
            PathBuf::from("friday_mixed.json")
        );
        assert_eq!(
            default_output_path(input, StrategyKind::BpmFirst, Some(Path::new("/tmp/out")))
                .unwrap(),
            PathBuf::from("/tmp/out/friday_mixed_bpm_first.json")
        );
    }
}
