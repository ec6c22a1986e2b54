//! Note Detector
//!
//! End-to-end note detection over a buffer of time domain samples:
//! normalize, high-pass, low-pass, normalize, transform, take magnitudes,
//! stretch to one bin per Hz and score the pitch classes.

use std::{sync::Arc, time::Instant};
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    array::{magnitudes, stretch},
    estimate::{EstimateError, NoteEstimator},
    filter::{average_amplitude, high_pass, low_pass, normalize},
    notes::{NoteError, NoteTable, PitchClass},
    transform::{Algorithm, Transform},
};

/// Default sampling rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Mean absolute amplitude below which a buffer counts as silence.
pub const SILENCE_THRESHOLD: f64 = 0.005;

/// Errors when running detection.
#[derive(Debug, Error)]
pub enum DetectError {
    /// No transform strategy is configured.
    #[error("invalid frequency domain algorithm: {0}")]
    InvalidAlgorithm(String),

    /// Detection was run before any samples were given.
    #[error("no samples given as an input")]
    MissingSamples,

    /// A configured note name is invalid.
    #[error(transparent)]
    Note(#[from] NoteError),

    /// The estimator configuration is invalid.
    #[error(transparent)]
    Estimate(#[from] EstimateError),

    /// Any other detector parameter is out of range.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Cutoff note and resonance of one of the pre-transform filters.
#[derive(Debug, Clone, PartialEq)]
struct FilterSpec {
    note: String,
    resonance: f64,
}

/// Builder for a [`NoteDetector`].
pub struct NoteDetectorBuilder {
    samples: Option<Vec<f64>>,
    sample_rate: u32,
    algorithm: Algorithm,
    silence_threshold: f64,
    high_pass: FilterSpec,
    low_pass: FilterSpec,
    estimator: Option<NoteEstimator>,
}

impl NoteDetectorBuilder {
    /// Start with default parameters:
    /// sample_rate = 44_100, algorithm = Iterative, silence_threshold = 0.005,
    /// high_pass = (C3, 1.4), low_pass = (C4, 0.5), default estimator.
    pub fn new() -> Self {
        NoteDetectorBuilder {
            samples: None,
            sample_rate: DEFAULT_SAMPLE_RATE,
            algorithm: Algorithm::default(),
            silence_threshold: SILENCE_THRESHOLD,
            high_pass: FilterSpec {
                note: "C3".into(),
                resonance: 1.4,
            },
            low_pass: FilterSpec {
                note: "C4".into(),
                resonance: 0.5,
            },
            estimator: None,
        }
    }

    /// Set the time domain samples to analyze.
    pub fn samples(mut self, samples: Vec<f64>) -> Self {
        self.samples = Some(samples);
        self
    }

    /// Set the sampling rate of the samples.
    pub fn sample_rate(mut self, rate: u32) -> Self {
        self.sample_rate = rate;
        self
    }

    /// Set the frequency transform strategy.
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the mean absolute amplitude treated as silence.
    pub fn silence_threshold(mut self, threshold: f64) -> Self {
        self.silence_threshold = threshold;
        self
    }

    /// Set the high-pass cutoff note (e.g. `"C3"`) and resonance.
    pub fn high_pass(mut self, note: &str, resonance: f64) -> Self {
        self.high_pass = FilterSpec {
            note: note.into(),
            resonance,
        };
        self
    }

    /// Set the low-pass cutoff note (e.g. `"C4"`) and resonance.
    pub fn low_pass(mut self, note: &str, resonance: f64) -> Self {
        self.low_pass = FilterSpec {
            note: note.into(),
            resonance,
        };
        self
    }

    /// Set the pitch class estimator.
    pub fn estimator(mut self, estimator: NoteEstimator) -> Self {
        self.estimator = Some(estimator);
        self
    }

    /// Finalize and create the detector.
    pub fn build(self) -> Result<NoteDetector, DetectError> {
        if self.sample_rate == 0 {
            return Err(DetectError::Configuration("sample_rate cannot be zero".into()));
        }

        let mut table = NoteTable::new();
        let high_cut = table.frequency_of(&self.high_pass.note)?;
        let low_cut = table.frequency_of(&self.low_pass.note)?;

        Ok(NoteDetector {
            transform: Some(self.algorithm.build()),
            samples: self.samples,
            sample_rate: self.sample_rate,
            silence_threshold: self.silence_threshold,
            high_cut,
            high_resonance: self.high_pass.resonance,
            low_cut,
            low_resonance: self.low_pass.resonance,
            estimator: self.estimator.unwrap_or_default(),
            spectrum: None,
        })
    }
}

impl Default for NoteDetectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Detects the most probable notes played in a buffer of samples.
pub struct NoteDetector {
    transform: Option<Arc<dyn Transform>>,
    samples: Option<Vec<f64>>,
    sample_rate: u32,
    silence_threshold: f64,
    high_cut: f64,
    high_resonance: f64,
    low_cut: f64,
    low_resonance: f64,
    estimator: NoteEstimator,
    spectrum: Option<Vec<f64>>,
}

impl NoteDetector {
    /// Start customizing with a builder.
    pub fn builder() -> NoteDetectorBuilder {
        NoteDetectorBuilder::new()
    }

    /// Detector over `samples` at 44.1 kHz with default settings.
    pub fn new(samples: Vec<f64>) -> Self {
        Self::with_sample_rate(samples, DEFAULT_SAMPLE_RATE)
    }

    /// Detector over `samples` at `sample_rate` Hz with default settings.
    pub fn with_sample_rate(samples: Vec<f64>, sample_rate: u32) -> Self {
        let mut table = NoteTable::new();
        NoteDetector {
            transform: Some(Algorithm::default().build()),
            samples: Some(samples),
            sample_rate,
            silence_threshold: SILENCE_THRESHOLD,
            high_cut: table.frequency(PitchClass::C.pitch(3)),
            high_resonance: 1.4,
            low_cut: table.frequency(PitchClass::C.pitch(4)),
            low_resonance: 0.5,
            estimator: NoteEstimator::new(),
            spectrum: None,
        }
    }

    /// Detector over single precision samples.
    pub fn from_f32(samples: &[f32], sample_rate: u32) -> Self {
        Self::with_sample_rate(samples.iter().map(|&s| f64::from(s)).collect(), sample_rate)
    }

    /// Replace the samples, dropping any cached spectrum.
    pub fn set_samples(&mut self, samples: Vec<f64>) {
        self.samples = Some(samples);
        self.spectrum = None;
    }

    /// Replace the samples with single precision ones.
    pub fn set_samples_f32(&mut self, samples: &[f32]) {
        self.set_samples(samples.iter().map(|&s| f64::from(s)).collect());
    }

    /// Change the sampling rate, dropping any cached spectrum.
    pub fn set_sample_rate(&mut self, sample_rate: u32) {
        self.sample_rate = sample_rate;
        self.spectrum = None;
    }

    /// Sampling rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Select one of the built-in transform strategies.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.transform = Some(algorithm.build());
        self.spectrum = None;
    }

    /// Use a custom transform strategy.
    pub fn set_transform<T: Transform + 'static>(&mut self, transform: T) {
        self.transform = Some(Arc::new(transform));
        self.spectrum = None;
    }

    /// Remove the transform strategy; [`NoteDetector::run`] fails until one is set.
    pub fn clear_transform(&mut self) {
        self.transform = None;
    }

    /// Name of the configured transform strategy.
    pub fn transform_name(&self) -> Option<&'static str> {
        self.transform.as_ref().map(|t| t.name())
    }

    /// The cached Hz-indexed magnitude spectrum, once [`NoteDetector::run`] computed it.
    pub fn spectrum(&self) -> Option<&[f64]> {
        self.spectrum.as_deref()
    }

    /// Run detection with the estimator's default tolerance.
    pub fn run(&mut self) -> Result<Option<Vec<PitchClass>>, DetectError> {
        let tolerance = self.estimator.tolerance();
        self.run_with(tolerance)
    }

    /// Most probable pitch classes played, or `None` for silence and noise.
    ///
    /// `tolerance` ranges from 1.0 (strictest) to 0.0 (most permissive).
    pub fn run_with(&mut self, tolerance: f64) -> Result<Option<Vec<PitchClass>>, DetectError> {
        let transform = self.transform.as_ref().ok_or_else(|| {
            DetectError::InvalidAlgorithm("no frequency domain algorithm chosen".into())
        })?;
        let samples = self.samples.as_ref().ok_or(DetectError::MissingSamples)?;

        if self.spectrum.is_none() {
            let level = average_amplitude(samples);
            if level < self.silence_threshold {
                debug!(level, "input is silent");
                return Ok(None);
            }

            let mut filtered = samples.clone();
            normalize(&mut filtered);
            let filtered = high_pass(
                &filtered,
                self.high_cut,
                self.high_resonance,
                self.sample_rate,
            );
            let mut filtered =
                low_pass(&filtered, self.low_cut, self.low_resonance, self.sample_rate);
            normalize(&mut filtered);

            let started = Instant::now();
            let bins = transform.transform(&filtered);
            debug!(
                algorithm = transform.name(),
                bins = bins.len(),
                elapsed_us = started.elapsed().as_micros() as u64,
                "transformed samples"
            );

            self.spectrum = Some(stretch(&magnitudes(&bins), self.sample_rate as usize));
        } else {
            trace!("using cached spectrum");
        }

        let spectrum = self.spectrum.as_deref().unwrap_or_default();
        Ok(self.estimator.estimate_with(spectrum, tolerance))
    }
}
