//! Note estimator
//!
//! Scores the twelve pitch classes from a magnitude spectrum whose index is
//! approximately its frequency in Hz, and reports the strongest ones.

use thiserror::Error;
use tracing::{debug, trace};

use crate::notes::{NoteTable, PitchClass, SEMITONES, SEMITONE_RATIO};

/// Tolerance used when none is given.
pub const DEFAULT_TOLERANCE: f64 = 0.5;

/// Errors returned by the estimator configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EstimateError {
    /// An estimator parameter is out of range.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Builder for a [`NoteEstimator`].
pub struct NoteEstimatorBuilder {
    tolerance: f64,
    lowest_octave: usize,
    highest_octave: usize,
    window: f64,
    max_notes: usize,
}

impl NoteEstimatorBuilder {
    /// Start with default parameters:
    /// tolerance = 0.5, octaves = 2..=5, window = 0.956, max_notes = 5.
    pub fn new() -> Self {
        NoteEstimatorBuilder {
            tolerance: DEFAULT_TOLERANCE,
            lowest_octave: 2,
            highest_octave: 5,
            window: 0.956,
            max_notes: 5,
        }
    }

    /// Default tolerance, 1.0 is the strictest and 0.0 the most permissive.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Inclusive range of octaves summed into each pitch class score.
    pub fn octaves(mut self, lowest: usize, highest: usize) -> Self {
        self.lowest_octave = lowest;
        self.highest_octave = highest;
        self
    }

    /// Fraction of a semitone searched on each side of a note frequency.
    pub fn window(mut self, window: f64) -> Self {
        self.window = window;
        self
    }

    /// Results with more qualifying pitch classes are rejected as noise.
    pub fn max_notes(mut self, max_notes: usize) -> Self {
        self.max_notes = max_notes;
        self
    }

    /// Finalize and create the estimator.
    pub fn build(self) -> Result<NoteEstimator, EstimateError> {
        if self.lowest_octave > self.highest_octave {
            return Err(EstimateError::Configuration(format!(
                "lowest octave {} is above highest octave {}",
                self.lowest_octave, self.highest_octave
            )));
        }
        if self.highest_octave > 9 {
            return Err(EstimateError::Configuration(
                "octaves above 9 have no note name".into(),
            ));
        }
        if self.window.is_nan() || self.window <= 0.0 {
            return Err(EstimateError::Configuration("window must be positive".into()));
        }
        if self.max_notes == 0 {
            return Err(EstimateError::Configuration("max_notes cannot be zero".into()));
        }

        Ok(NoteEstimator {
            tolerance: self.tolerance,
            spread: SEMITONE_RATIO * self.window,
            max_notes: self.max_notes,
            references: reference_frequencies(self.lowest_octave, self.highest_octave),
        })
    }
}

impl Default for NoteEstimatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Pitch class estimator over a Hz-indexed magnitude spectrum.
#[derive(Debug, Clone)]
pub struct NoteEstimator {
    tolerance: f64,
    spread: f64,
    max_notes: usize,
    references: Vec<[f64; SEMITONES]>,
}

impl NoteEstimator {
    /// Start customizing with a builder.
    pub fn builder() -> NoteEstimatorBuilder {
        NoteEstimatorBuilder::new()
    }

    /// Estimator with default parameters.
    pub fn new() -> Self {
        NoteEstimator {
            tolerance: DEFAULT_TOLERANCE,
            spread: SEMITONE_RATIO * 0.956,
            max_notes: 5,
            references: reference_frequencies(2, 5),
        }
    }

    /// The tolerance used by [`NoteEstimator::estimate`].
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Score of every pitch class, indexed by [`PitchClass::index`].
    ///
    /// Each score sums, over the configured octaves, the peak magnitude
    /// within `[freq / spread, freq * spread)` of that octave's note.
    pub fn scores(&self, magnitudes: &[f64]) -> [f64; SEMITONES] {
        let mut scores = [0.0; SEMITONES];
        for row in &self.references {
            for (score, &freq) in scores.iter_mut().zip(row) {
                let start = (freq / self.spread) as usize;
                let end = ((freq * self.spread) as usize).min(magnitudes.len());
                let peak = magnitudes
                    .get(start..end)
                    .unwrap_or(&[])
                    .iter()
                    .fold(0.0_f64, |m, &v| m.max(v));
                *score += peak;
            }
        }
        scores
    }

    /// Estimate with the configured tolerance.
    pub fn estimate(&self, magnitudes: &[f64]) -> Option<Vec<PitchClass>> {
        self.estimate_with(magnitudes, self.tolerance)
    }

    /// Pitch classes scoring above `max * tolerance`, in ascending order.
    /// The top scoring class always qualifies, so a tolerance of 1.0 keeps
    /// only the loudest one.
    ///
    /// `tolerance` is clamped to `min(1, |tolerance|)`. Returns `None` when
    /// nothing qualifies, or when more than `max_notes` classes qualify,
    /// which means noise rather than a note.
    pub fn estimate_with(&self, magnitudes: &[f64], tolerance: f64) -> Option<Vec<PitchClass>> {
        let scores = self.scores(magnitudes);
        let max = scores.iter().fold(0.0_f64, |m, &s| m.max(s));
        let threshold = max * tolerance.abs().min(1.0);
        trace!(?scores, threshold, "pitch class scores");

        let notes: Vec<PitchClass> = PitchClass::ALL
            .into_iter()
            .zip(scores)
            .filter(|&(_, score)| score > threshold || (score == max && max > 0.0))
            .map(|(class, _)| class)
            .collect();

        if notes.is_empty() {
            return None;
        }
        if notes.len() > self.max_notes {
            debug!(count = notes.len(), "too many pitch classes, treating as noise");
            return None;
        }
        Some(notes)
    }
}

/// Note frequencies of every pitch class, one row per octave.
fn reference_frequencies(lowest: usize, highest: usize) -> Vec<[f64; SEMITONES]> {
    let mut table = NoteTable::with_octaves(highest + 1);
    (lowest..=highest)
        .map(|octave| {
            let mut row = [0.0; SEMITONES];
            for (class, freq) in PitchClass::ALL.iter().zip(row.iter_mut()) {
                *freq = table.frequency(class.pitch(octave));
            }
            row
        })
        .collect()
}

impl Default for NoteEstimator {
    fn default() -> Self {
        NoteEstimator::new()
    }
}
