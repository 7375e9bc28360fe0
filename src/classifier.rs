//! # Harmonic Mix Classification
//!
//! Decides which harmonic transition category links two Camelot keys.
//!
//! The categories overlap by construction, so classification walks a fixed
//! priority chain ([`RULES`]) and the first matching rule wins:
//!
//! | # | Mix type       | Rule                                   |
//! |---|----------------|----------------------------------------|
//! | 1 | perfect mix    | identical keys                         |
//! | 2 | +1 mix         | same scale, one step clockwise         |
//! | 3 | -1 mix         | same scale, one step anticlockwise     |
//! | 4 | energy boost   | same scale, two steps clockwise        |
//! | 5 | scale change   | same position, other scale             |
//! | 6 | diagonal mix   | other scale, one step anticlockwise    |
//! | 7 | mood shifter   | other scale, three steps clockwise     |
//! | 8 | jaws mix       | same scale, five steps anticlockwise   |
//!
//! Anything else is `non-harmonic`; a missing key on either side is `unknown`.

use crate::error::Result;
use crate::key::{self, CamelotKey};
use serde::{Serialize, Serializer};
use std::fmt;

const MIX_TYPE_COUNT: usize = 10;

/// Named harmonic relationship between two keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MixType {
    Perfect,
    PlusOne,
    MinusOne,
    EnergyBoost,
    ScaleChange,
    Diagonal,
    MoodShifter,
    Jaws,
    NonHarmonic,
    Unknown,
}

impl MixType {
    /// Every mix type, in score-table order
    pub const ALL: [MixType; MIX_TYPE_COUNT] = [
        MixType::Perfect,
        MixType::PlusOne,
        MixType::MinusOne,
        MixType::EnergyBoost,
        MixType::ScaleChange,
        MixType::Diagonal,
        MixType::MoodShifter,
        MixType::Jaws,
        MixType::NonHarmonic,
        MixType::Unknown,
    ];

    /// Human-readable label, also used in JSON output
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Perfect => "perfect mix",
            Self::PlusOne => "+1 mix",
            Self::MinusOne => "-1 mix",
            Self::EnergyBoost => "energy boost",
            Self::ScaleChange => "scale change",
            Self::Diagonal => "diagonal mix",
            Self::MoodShifter => "mood shifter",
            Self::Jaws => "jaws mix",
            Self::NonHarmonic => "non-harmonic",
            Self::Unknown => "unknown",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for MixType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for MixType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Compatibility weight for each [`MixType`].
///
/// Carried by value inside each scoring strategy so alternative tables can
/// be swapped in without touching the path builder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixScoreTable {
    scores: [f64; MIX_TYPE_COUNT],
}

impl Default for MixScoreTable {
    fn default() -> Self {
        Self {
            scores: [5.0, 4.0, 4.0, 3.0, 3.0, 2.0, 2.0, 1.0, 0.0, 0.0],
        }
    }
}

impl MixScoreTable {
    #[must_use]
    pub fn score(&self, mix_type: MixType) -> f64 {
        self.scores[mix_type.index()]
    }

    /// Copy of this table with one entry replaced
    #[must_use]
    pub fn with_score(mut self, mix_type: MixType, score: f64) -> Self {
        self.scores[mix_type.index()] = score;
        self
    }
}

type Rule = fn(CamelotKey, CamelotKey) -> bool;

fn same_scale_step(a: CamelotKey, b: CamelotKey, step: i32) -> bool {
    a.scale() == b.scale() && b.position() == key::increment(a.position(), step)
}

fn cross_scale_step(a: CamelotKey, b: CamelotKey, step: i32) -> bool {
    a.scale() != b.scale() && b.position() == key::increment(a.position(), step)
}

fn is_perfect(a: CamelotKey, b: CamelotKey) -> bool {
    a == b
}

fn is_plus_one(a: CamelotKey, b: CamelotKey) -> bool {
    same_scale_step(a, b, 1)
}

fn is_minus_one(a: CamelotKey, b: CamelotKey) -> bool {
    same_scale_step(a, b, -1)
}

fn is_energy_boost(a: CamelotKey, b: CamelotKey) -> bool {
    same_scale_step(a, b, 2)
}

fn is_scale_change(a: CamelotKey, b: CamelotKey) -> bool {
    cross_scale_step(a, b, 0)
}

/// One step anticlockwise while switching scale, e.g. 9A -> 8B
fn is_diagonal(a: CamelotKey, b: CamelotKey) -> bool {
    cross_scale_step(a, b, -1)
}

/// Three steps clockwise while switching scale, e.g. 1B -> 4A
fn is_mood_shifter(a: CamelotKey, b: CamelotKey) -> bool {
    cross_scale_step(a, b, 3)
}

/// Five steps anticlockwise on the same scale, e.g. 1A -> 8A
fn is_jaws(a: CamelotKey, b: CamelotKey) -> bool {
    same_scale_step(a, b, -5)
}

/// Priority chain, evaluated top to bottom. Order is the tie-break.
pub const RULES: [(MixType, Rule); 8] = [
    (MixType::Perfect, is_perfect),
    (MixType::PlusOne, is_plus_one),
    (MixType::MinusOne, is_minus_one),
    (MixType::EnergyBoost, is_energy_boost),
    (MixType::ScaleChange, is_scale_change),
    (MixType::Diagonal, is_diagonal),
    (MixType::MoodShifter, is_mood_shifter),
    (MixType::Jaws, is_jaws),
];

/// Classify a transition between two decoded keys. Total.
#[must_use]
pub fn classify_keys(from: CamelotKey, to: CamelotKey) -> MixType {
    RULES
        .iter()
        .find(|(_, rule)| rule(from, to))
        .map_or(MixType::NonHarmonic, |&(mix_type, _)| mix_type)
}

/// Classify a transition between two optional key strings.
///
/// A missing key on either side yields [`MixType::Unknown`].
///
/// # Errors
///
/// Returns [`crate::Error::InvalidKeyFormat`] if a present key cannot be
/// decoded; classification is never attempted on malformed input.
///
/// # Examples
///
/// ```
/// use camelot_mixer::classifier::{classify, MixType};
///
/// assert_eq!(classify(Some("8A"), Some("9A"))?, MixType::PlusOne);
/// assert_eq!(classify(None, Some("8A"))?, MixType::Unknown);
/// assert!(classify(Some("8A"), Some("8X")).is_err());
/// # Ok::<(), camelot_mixer::Error>(())
/// ```
pub fn classify(from: Option<&str>, to: Option<&str>) -> Result<MixType> {
    let from = from.map(key::decode).transpose()?;
    let to = to.map(key::decode).transpose()?;
    Ok(classify_decoded(from, to))
}

/// Classify already-decoded optional keys
#[must_use]
pub fn classify_decoded(from: Option<CamelotKey>, to: Option<CamelotKey>) -> MixType {
    match (from, to) {
        (Some(from), Some(to)) => classify_keys(from, to),
        _ => MixType::Unknown,
    }
}
