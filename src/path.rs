//! # Greedy Mix Path Construction
//!
//! Orders a track collection into a DJ set by nearest-neighbour search:
//!
//! 1. Stable-sort all tracks by ascending BPM (tracks without BPM last).
//! 2. Pick the start track according to the scorer's [`StartRule`].
//! 3. Repeatedly append the remaining track with the strictly highest
//!    transition score from the current tail. Ties go to the candidate
//!    that comes first in the BPM-sorted pool.
//!
//! This is an `O(n²)` heuristic with one step of lookahead and no
//! backtracking. It is fully deterministic for a given input order and
//! scorer.
//!
//! ## Parallel scoring
//!
//! Once the remaining pool reaches [`PathBuilder::parallel_threshold`]
//! candidates, each step scores the pool with rayon. Scores are collected
//! in pool order and the arg-max is taken sequentially, so the tie-break is
//! identical to the sequential scan.

use crate::error::Result;
use crate::strategy::{MixPoint, StartRule, Transition, TransitionScorer};
use crate::track::Track;
use rayon::prelude::*;
use std::cmp::Ordering;

/// How the returned ordering was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMode {
    /// Greedy transition-by-transition selection
    Greedy,
    /// No track had a key to start from; the result is plain BPM order
    NoKeyedStart,
}

/// An ordered set, borrowing the caller's tracks
#[derive(Debug, Clone, PartialEq)]
pub struct MixPath<'a> {
    pub tracks: Vec<&'a Track>,
    /// `transitions[i]` scores `tracks[i] -> tracks[i + 1]`; empty for [`PathMode::NoKeyedStart`]
    pub transitions: Vec<Transition>,
    pub mode: PathMode,
}

impl<'a> MixPath<'a> {
    fn empty() -> Self {
        Self {
            tracks: Vec::new(),
            transitions: Vec::new(),
            mode: PathMode::Greedy,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Sum of all transition scores
    #[must_use]
    pub fn total_score(&self) -> f64 {
        self.transitions.iter().map(|t| t.score).sum()
    }
}

/// Greedy path builder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathBuilder {
    /// Pool size at which candidate scoring switches to rayon
    pub parallel_threshold: usize,
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self {
            parallel_threshold: 512,
        }
    }
}

impl PathBuilder {
    #[must_use]
    pub fn new(parallel_threshold: usize) -> Self {
        Self { parallel_threshold }
    }

    /// Order `tracks` into a mix path.
    ///
    /// The result is a permutation of `tracks`. Tracks are expected to carry
    /// a BPM and a decodable key; filtering is the loader's job. A blank key
    /// string is treated as no key.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidKeyFormat`] if any track carries a
    /// malformed key. Keys are decoded before ordering starts.
    ///
    /// # Examples
    ///
    /// ```
    /// use camelot_mixer::{PathBuilder, Strategy, Track};
    ///
    /// let tracks = vec![
    ///     Track::new("One", "A", Some(128.0), Some("8A")),
    ///     Track::new("Two", "B", Some(130.0), Some("9A")),
    ///     Track::new("Three", "C", Some(126.0), Some("8B")),
    /// ];
    /// let path = PathBuilder::default().build(&tracks, &Strategy::bpm_first())?;
    /// let titles: Vec<&str> = path.tracks.iter().map(|t| t.title.as_str()).collect();
    /// assert_eq!(titles, ["Three", "One", "Two"]);
    /// # Ok::<(), camelot_mixer::Error>(())
    /// ```
    pub fn build<'a, S>(&self, tracks: &'a [Track], scorer: &S) -> Result<MixPath<'a>>
    where
        S: TransitionScorer + Sync,
    {
        if tracks.is_empty() {
            return Ok(MixPath::empty());
        }

        let sorted = sort_by_bpm(tracks);
        let points = sorted
            .iter()
            .map(|track| MixPoint::from_track(track))
            .collect::<Result<Vec<_>>>()?;

        let start = match scorer.start_rule() {
            StartRule::LowestBpm => Some(0),
            StartRule::FirstKeyed => points.iter().position(|p| p.key.is_some()),
        };
        let Some(start) = start else {
            return Ok(MixPath {
                tracks: sorted,
                transitions: Vec::new(),
                mode: PathMode::NoKeyedStart,
            });
        };

        let mut order = Vec::with_capacity(sorted.len());
        let mut transitions = Vec::with_capacity(sorted.len().saturating_sub(1));
        let mut remaining: Vec<usize> = (0..sorted.len()).filter(|&i| i != start).collect();
        order.push(start);

        let mut tail = start;
        while !remaining.is_empty() {
            let scored = self.score_pool(scorer, points[tail], &remaining, &points);
            let (slot, transition) = best_candidate(&scored);
            tail = remaining.remove(slot);
            order.push(tail);
            transitions.push(transition);
        }

        Ok(MixPath {
            tracks: order.into_iter().map(|i| sorted[i]).collect(),
            transitions,
            mode: PathMode::Greedy,
        })
    }

    fn score_pool<S>(
        &self,
        scorer: &S,
        tail: MixPoint,
        pool: &[usize],
        points: &[MixPoint],
    ) -> Vec<Transition>
    where
        S: TransitionScorer + Sync,
    {
        if pool.len() >= self.parallel_threshold {
            pool.par_iter()
                .map(|&i| scorer.score_points(tail, points[i]))
                .collect()
        } else {
            pool.iter()
                .map(|&i| scorer.score_points(tail, points[i]))
                .collect()
        }
    }
}

/// Stable ascending BPM order; tracks without BPM go last.
fn sort_by_bpm(tracks: &[Track]) -> Vec<&Track> {
    let mut sorted: Vec<&Track> = tracks.iter().collect();
    sorted.sort_by(|a, b| match (a.bpm, b.bpm) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted
}

/// First strictly-greatest score in pool order. `scored` is never empty.
fn best_candidate(scored: &[Transition]) -> (usize, Transition) {
    let mut best = (0, scored[0]);
    for (slot, &transition) in scored.iter().enumerate().skip(1) {
        if transition.score > best.1.score {
            best = (slot, transition);
        }
    }
    best
}
