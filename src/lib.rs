//! # note_detect
//!
//! Estimate the notes played in a short monophonic clip: filter and
//! normalize the samples, transform them with a radix-2 FFT and score the
//! twelve pitch classes.
//!
//! ## Example
//! ```rust
//! use note_detect::{Algorithm, NoteDetector, PitchClass};
//!
//! fn run() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1) A4 sine, 4096 samples at 44.1 kHz
//!     let samples: Vec<f64> = (0..4096)
//!         .map(|i| (2.0 * std::f64::consts::PI * 440.0 * i as f64 / 44_100.0).sin())
//!         .collect();
//!
//!     // 2) Build a detector
//!     let mut detector = NoteDetector::builder()
//!         .samples(samples)
//!         .sample_rate(44_100)
//!         .algorithm(Algorithm::Iterative)
//!         .build()?;
//!
//!     // 3) Strictest tolerance keeps only the loudest pitch class
//!     let notes = detector.run_with(1.0)?;
//!     assert_eq!(notes, Some(vec![PitchClass::A]));
//!
//!     Ok(())
//! }
//! # run().unwrap();
//! ```
//!
//! Every stage is also usable on its own: [`transform`], [`filter`],
//! [`notes`], [`array`] and [`estimate`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rust_2018_idioms)]
#![deny(clippy::all)]

/// High-level detector API.
pub use detector::{DetectError, NoteDetector, NoteDetectorBuilder};

/// Pitch class scoring.
pub use estimate::{EstimateError, NoteEstimator, NoteEstimatorBuilder};

/// Note names and frequencies.
pub use notes::{NoteError, NoteTable, PitchClass};

/// Frequency transform strategies.
pub use transform::{Algorithm, Transform};

/// Complex arithmetic.
pub mod complex;

/// Frequency transform strategies.
pub mod transform;

/// Amplitude and frequency filters.
pub mod filter;

/// Note lookup table.
pub mod notes;

/// Array utilities.
pub mod array;

/// Note estimation.
pub mod estimate;

/// End-to-end note detection.
pub mod detector;
