//! # Transition Scoring Strategies
//!
//! Scores a candidate transition `A -> B` by combining the harmonic weight
//! of the pair's [`MixType`] with a BPM-closeness term.
//!
//! Two presets ship with the mixer:
//!
//! ```text
//! BPM-first       (weight_bpm = 0.40)
//!   bpm_score = max(0, 10 - |bpm_b - bpm_a|)
//!   score     = bpm_score * w + table[mix] * (1 - w)
//!
//! Harmonic-first  (weight_bpm = 0.15)
//!   score     = table[mix] * 10 - |bpm_b - bpm_a| * w
//! ```
//!
//! A missing BPM on either side contributes nothing: no BPM score for the
//! blend formula, no penalty for the penalty formula.
//!
//! Every constant is a field of [`Strategy`], so alternative weightings can be
//! built and handed to the path builder without code changes.

use crate::classifier::{self, MixScoreTable, MixType};
use crate::error::{Error, Result};
use crate::key::CamelotKey;
use crate::track::Track;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The named strategy presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Tempo continuity first, harmony refines
    BpmFirst,
    /// Harmony first, small penalty for tempo jumps
    #[default]
    HarmonicFirst,
}

impl StrategyKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BpmFirst => "bpm-first",
            Self::HarmonicFirst => "harmonic-first",
        }
    }

    /// The preset strategy for this kind
    #[must_use]
    pub fn preset(self) -> Strategy {
        match self {
            Self::BpmFirst => Strategy::bpm_first(),
            Self::HarmonicFirst => Strategy::harmonic_first(),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How harmonic weight and BPM distance combine into one score
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreFormula {
    /// `max(0, bpm_window - diff) * w + harmonic * (1 - w)`
    Blend { bpm_window: f64 },
    /// `harmonic * harmonic_gain - diff * w`
    Penalty { harmonic_gain: f64 },
}

/// How the first track of a path is chosen from the BPM-sorted input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartRule {
    /// The globally slowest track, key or not
    LowestBpm,
    /// The slowest track that has a key; none keyed means no greedy pass
    FirstKeyed,
}

/// A complete scoring configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strategy {
    pub kind: StrategyKind,
    pub weight_bpm: f64,
    pub formula: ScoreFormula,
    pub start: StartRule,
    pub table: MixScoreTable,
}

impl Default for Strategy {
    fn default() -> Self {
        StrategyKind::default().preset()
    }
}

impl Strategy {
    pub const BPM_FIRST_WEIGHT: f64 = 0.40;
    pub const HARMONIC_FIRST_WEIGHT: f64 = 0.15;

    #[must_use]
    pub fn bpm_first() -> Self {
        Self {
            kind: StrategyKind::BpmFirst,
            weight_bpm: Self::BPM_FIRST_WEIGHT,
            formula: ScoreFormula::Blend { bpm_window: 10.0 },
            start: StartRule::LowestBpm,
            table: MixScoreTable::default(),
        }
    }

    #[must_use]
    pub fn harmonic_first() -> Self {
        Self {
            kind: StrategyKind::HarmonicFirst,
            weight_bpm: Self::HARMONIC_FIRST_WEIGHT,
            formula: ScoreFormula::Penalty { harmonic_gain: 10.0 },
            start: StartRule::FirstKeyed,
            table: MixScoreTable::default(),
        }
    }

    /// Replace the BPM weight.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWeight`] if `weight` is not finite, is
    /// negative, or exceeds 1 under the blend formula (where `1 - w` would
    /// turn the harmonic term negative).
    pub fn with_weight_bpm(mut self, weight: f64) -> Result<Self> {
        if !weight.is_finite() {
            return Err(Error::InvalidWeight { weight, reason: "weight must be finite" });
        }
        if weight < 0.0 {
            return Err(Error::InvalidWeight { weight, reason: "weight must not be negative" });
        }
        if matches!(self.formula, ScoreFormula::Blend { .. }) && weight > 1.0 {
            return Err(Error::InvalidWeight {
                weight,
                reason: "blend weight must lie between 0 and 1",
            });
        }
        self.weight_bpm = weight;
        Ok(self)
    }

    #[must_use]
    pub fn with_table(mut self, table: MixScoreTable) -> Self {
        self.table = table;
        self
    }
}

/// What scoring needs to know about one track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixPoint {
    pub bpm: Option<f64>,
    pub key: Option<CamelotKey>,
}

impl MixPoint {
    /// Decode a track once for repeated scoring.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKeyFormat`] for a malformed key.
    pub fn from_track(track: &Track) -> Result<Self> {
        Ok(Self {
            bpm: track.bpm,
            key: track.camelot_key()?,
        })
    }

    fn bpm_distance(self, other: Self) -> Option<f64> {
        match (self.bpm, other.bpm) {
            (Some(a), Some(b)) => Some((b - a).abs()),
            _ => None,
        }
    }
}

/// Score and category of one candidate transition
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transition {
    pub mix_type: MixType,
    pub score: f64,
}

/// Scores transitions for the path builder.
///
/// Implementations must be pure: the same pair always yields the same
/// transition.
pub trait TransitionScorer {
    /// Score `from -> to` on pre-decoded tracks
    fn score_points(&self, from: MixPoint, to: MixPoint) -> Transition;

    /// How the path builder picks the first track
    fn start_rule(&self) -> StartRule;

    /// Score `from -> to` on raw tracks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKeyFormat`] if either key is malformed.
    fn score(&self, from: &Track, to: &Track) -> Result<Transition> {
        Ok(self.score_points(MixPoint::from_track(from)?, MixPoint::from_track(to)?))
    }
}

impl TransitionScorer for Strategy {
    fn score_points(&self, from: MixPoint, to: MixPoint) -> Transition {
        let mix_type = classifier::classify_decoded(from.key, to.key);
        let harmonic = self.table.score(mix_type);
        let distance = from.bpm_distance(to);

        let score = match self.formula {
            ScoreFormula::Blend { bpm_window } => {
                let bpm_score = distance.map_or(0.0, |d| (bpm_window - d).max(0.0));
                bpm_score * self.weight_bpm + harmonic * (1.0 - self.weight_bpm)
            }
            ScoreFormula::Penalty { harmonic_gain } => {
                let penalty = distance.map_or(0.0, |d| d * self.weight_bpm);
                harmonic * harmonic_gain - penalty
            }
        };

        Transition { mix_type, score }
    }

    fn start_rule(&self) -> StartRule {
        self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn track(bpm: Option<f64>, key: Option<&str>) -> Track {
        Track::new("Test", "Test", bpm, key)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < EPSILON, "Expected {expected}, got {actual}");
    }

    #[test]
    fn test_bpm_first_formula() {
        let strategy = Strategy::bpm_first();
        let t = strategy
            .score(&track(Some(126.0), Some("8B")), &track(Some(128.0), Some("8A")))
            .unwrap();
        assert_eq!(t.mix_type, MixType::ScaleChange);
        // 8 * 0.4 + 3 * 0.6
        assert_close(t.score, 5.0);

        let t = strategy
            .score(&track(Some(126.0), Some("8B")), &track(Some(130.0), Some("9A")))
            .unwrap();
        assert_eq!(t.mix_type, MixType::NonHarmonic);
        assert_close(t.score, 2.4);
    }

    #[test]
    fn test_bpm_first_clamps_far_tempos() {
        let strategy = Strategy::bpm_first();
        let t = strategy
            .score(&track(Some(100.0), Some("8A")), &track(Some(140.0), Some("8A")))
            .unwrap();
        assert_close(t.score, 5.0 * 0.6);
    }

    #[test]
    fn test_harmonic_first_formula() {
        let strategy = Strategy::harmonic_first();
        let t = strategy
            .score(&track(Some(120.0), Some("8A")), &track(Some(130.0), Some("9A")))
            .unwrap();
        assert_eq!(t.mix_type, MixType::PlusOne);
        assert_close(t.score, 40.0 - 1.5);

        let t = strategy
            .score(&track(Some(130.0), Some("9A")), &track(Some(120.0), Some("3B")))
            .unwrap();
        assert_close(t.score, -1.5);
    }

    #[test]
    fn test_missing_bpm_contributes_nothing() {
        let bpm_first = Strategy::bpm_first();
        let t = bpm_first
            .score(&track(None, Some("8A")), &track(Some(128.0), Some("8A")))
            .unwrap();
        assert_close(t.score, 5.0 * 0.6);

        let harmonic_first = Strategy::harmonic_first();
        let t = harmonic_first
            .score(&track(Some(90.0), Some("8A")), &track(None, Some("8A")))
            .unwrap();
        assert_close(t.score, 50.0);
    }

    #[test]
    fn test_missing_key_is_unknown() {
        let t = Strategy::harmonic_first()
            .score(&track(Some(120.0), None), &track(Some(121.0), Some("8A")))
            .unwrap();
        assert_eq!(t.mix_type, MixType::Unknown);
        assert_close(t.score, -0.15);
    }

    #[test]
    fn test_malformed_key_fails_scoring() {
        let result = Strategy::bpm_first()
            .score(&track(Some(120.0), Some("8A")), &track(Some(121.0), Some("A8")));
        assert!(matches!(result, Err(Error::InvalidKeyFormat { .. })));
    }

    #[test]
    fn test_scores_decrease_with_bpm_distance() {
        for strategy in [Strategy::bpm_first(), Strategy::harmonic_first()] {
            let from = track(Some(120.0), Some("8A"));
            let scores: Vec<f64> = [0.0, 0.5, 1.0, 3.0, 7.5, 9.9]
                .iter()
                .map(|d| strategy.score(&from, &track(Some(120.0 + d), Some("9A"))).unwrap().score)
                .collect();
            for pair in scores.windows(2) {
                assert!(
                    pair[0] > pair[1],
                    "{} score must fall as BPM distance grows",
                    strategy.kind
                );
            }
        }
    }

    #[test]
    fn test_harmonic_first_penalty_is_affine() {
        let strategy = Strategy::harmonic_first();
        let from = track(Some(120.0), Some("8A"));
        let at = |d: f64| strategy.score(&from, &track(Some(120.0 + d), Some("8A"))).unwrap().score;
        let slope = at(1.0) - at(0.0);
        assert_close(slope, -Strategy::HARMONIC_FIRST_WEIGHT);
        assert_close(at(20.0) - at(10.0), slope * 10.0);
    }

    #[test]
    fn test_with_weight_bpm_validation() {
        assert!(Strategy::bpm_first().with_weight_bpm(0.8).is_ok());
        assert!(Strategy::bpm_first().with_weight_bpm(1.2).is_err());
        assert!(Strategy::harmonic_first().with_weight_bpm(1.2).is_ok());
        assert!(Strategy::harmonic_first().with_weight_bpm(-0.1).is_err());
        assert!(Strategy::harmonic_first().with_weight_bpm(f64::NAN).is_err());

        let heavier = Strategy::harmonic_first().with_weight_bpm(1.0).unwrap();
        let t = heavier
            .score(&track(Some(120.0), Some("8A")), &track(Some(125.0), Some("8A")))
            .unwrap();
        assert_close(t.score, 45.0);
    }

    #[test]
    fn test_custom_table_changes_harmonic_term() {
        let table = MixScoreTable::default().with_score(MixType::NonHarmonic, 1.0);
        let strategy = Strategy::harmonic_first().with_table(table);
        let t = strategy
            .score(&track(Some(120.0), Some("8A")), &track(Some(120.0), Some("3B")))
            .unwrap();
        assert_close(t.score, 10.0);
    }

    #[test]
    fn test_presets_by_kind() {
        assert_eq!(StrategyKind::BpmFirst.preset(), Strategy::bpm_first());
        assert_eq!(StrategyKind::HarmonicFirst.preset(), Strategy::harmonic_first());
        assert_eq!(Strategy::default().kind, StrategyKind::HarmonicFirst);
        assert_eq!(StrategyKind::BpmFirst.to_string(), "bpm-first");

        let kind: StrategyKind = serde_json::from_str("\"bpm-first\"").unwrap();
        assert_eq!(kind, StrategyKind::BpmFirst);
    }
}
