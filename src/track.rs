//! Track records as supplied by the library loader.

use crate::error::Result;
use crate::key::{self, CamelotKey};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One track's metadata.
///
/// The core only reorders references to tracks; it never mutates them.
/// Fields the mixer does not understand (a streaming URL, OCR confidence,
/// ...) are kept in `extra` and dropped again at projection time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Older exports call this field `song`
    #[serde(default, alias = "song")]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub bpm: Option<f64>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Track {
    #[must_use]
    pub fn new(title: &str, artist: &str, bpm: Option<f64>, key: Option<&str>) -> Self {
        Self {
            title: title.to_string(),
            artist: artist.to_string(),
            bpm,
            key: key.map(str::to_string),
            extra: Map::new(),
        }
    }

    /// Decode this track's key, if it has one.
    ///
    /// An empty or all-whitespace key counts as no key, the same as the
    /// loader's usability filter.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidKeyFormat`] for a present but malformed key.
    pub fn camelot_key(&self) -> Result<Option<CamelotKey>> {
        self.key
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(key::decode)
            .transpose()
    }
}
