//! End-to-end detection on synthetic tones.

use lazy_static::lazy_static;
use note_detect::{
    Algorithm, DetectError, NoteDetector, NoteError, NoteEstimator, NoteTable, PitchClass,
    Transform,
};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use std::f64::consts::PI;
use std::sync::{Arc, Mutex};

const SAMPLE_RATE: u32 = 44_100;
const TONE_LEN: usize = 8_192;

fn tone(freq: f64, len: usize, amplitude: f64) -> Vec<f64> {
    (0..len)
        .map(|i| amplitude * (2.0 * PI * freq * i as f64 / SAMPLE_RATE as f64).sin())
        .collect()
}

/// A test tone parsed from a note name like "F#4"
#[derive(Debug, Clone)]
struct TestTone {
    name: &'static str,
    class: PitchClass,
    freq: f64,
}

impl TestTone {
    fn from_name(name: &'static str) -> Self {
        let mut table = NoteTable::new();
        TestTone {
            name,
            class: name[..name.len() - 1].parse().unwrap(),
            freq: table.frequency_of(name).unwrap(),
        }
    }
}

lazy_static! {
    static ref TEST_TONES: Vec<TestTone> = [
        "C4", "C#4", "D4", "D#4", "E4", "F4", "F#4", "G4", "G#4", "A4", "A#4", "B4", "A3",
        "E3", "C5", "G5",
    ]
    .into_iter()
    .map(TestTone::from_name)
    .collect();
}

#[test]
fn test_detects_pure_tones() {
    let failures = Arc::new(Mutex::new(Vec::<String>::new()));

    TEST_TONES.par_iter().for_each(|tt| {
        let mut detector = NoteDetector::new(tone(tt.freq, TONE_LEN, 0.8));
        let notes = detector.run().unwrap();

        let top = detector.spectrum().map(|spectrum| {
            let scores = NoteEstimator::new().scores(spectrum);
            let best = (0..scores.len())
                .max_by(|&a, &b| scores[a].total_cmp(&scores[b]))
                .unwrap();
            PitchClass::from_index(best)
        });

        let found = notes.as_ref().is_some_and(|n| n.contains(&tt.class));
        if !found || top != Some(tt.class) {
            failures.lock().unwrap().push(format!(
                "{}: expected {}, got {:?} (top {:?})",
                tt.name, tt.class, notes, top
            ));
        }
    });

    let failures = Arc::try_unwrap(failures).unwrap().into_inner().unwrap();
    assert!(
        failures.is_empty(),
        "{} tones failed:\n{}",
        failures.len(),
        failures.join("\n")
    );
}

#[test]
fn test_every_algorithm_detects_a4() {
    for algorithm in [Algorithm::Iterative, Algorithm::Recursive, Algorithm::Planned] {
        let mut detector = NoteDetector::builder()
            .samples(tone(440.0, 4_096, 0.5))
            .algorithm(algorithm)
            .build()
            .unwrap();
        assert_eq!(
            detector.run_with(1.0).unwrap(),
            Some(vec![PitchClass::A]),
            "{algorithm}"
        );
    }
}

#[test]
fn test_direct_matches_fast_path() {
    let samples = tone(523.25, 1_024, 0.5);
    let mut direct = NoteDetector::builder()
        .samples(samples.clone())
        .algorithm(Algorithm::Direct)
        .build()
        .unwrap();
    let mut fast = NoteDetector::new(samples);

    assert_eq!(direct.run().unwrap(), fast.run().unwrap());
    let (a, b) = (direct.spectrum().unwrap(), fast.spectrum().unwrap());
    assert_eq!(a.len(), SAMPLE_RATE as usize);
    for (x, y) in a.iter().zip(b) {
        assert!((x - y).abs() < 1e-6);
    }
}

#[test]
fn test_silence_is_not_detected() {
    for samples in [vec![0.0; TONE_LEN], tone(440.0, TONE_LEN, 0.001), Vec::new()] {
        let mut detector = NoteDetector::new(samples);
        for tolerance in [0.0, 0.5, 1.0] {
            assert_eq!(detector.run_with(tolerance).unwrap(), None);
        }
        assert!(detector.spectrum().is_none());
    }
}

#[test]
fn test_missing_samples() {
    let mut detector = NoteDetector::builder().build().unwrap();
    assert!(matches!(detector.run(), Err(DetectError::MissingSamples)));

    detector.set_samples(tone(440.0, 4_096, 0.5));
    assert!(detector.run().unwrap().is_some());
}

#[test]
fn test_missing_transform() {
    let mut detector = NoteDetector::new(tone(440.0, 4_096, 0.5));
    detector.clear_transform();
    assert_eq!(detector.transform_name(), None);
    assert!(matches!(detector.run(), Err(DetectError::InvalidAlgorithm(_))));

    detector.set_algorithm(Algorithm::Recursive);
    assert_eq!(detector.transform_name(), Some("recursive"));
    assert!(detector.run().is_ok());
}

#[test]
fn test_algorithm_checked_before_samples() {
    let mut detector = NoteDetector::builder().build().unwrap();
    detector.clear_transform();
    assert!(matches!(detector.run(), Err(DetectError::InvalidAlgorithm(_))));
}

#[test]
fn test_new_samples_invalidate_cache() {
    let mut detector = NoteDetector::new(tone(440.0, 4_096, 0.5));
    assert_eq!(detector.run_with(1.0).unwrap(), Some(vec![PitchClass::A]));
    assert!(detector.spectrum().is_some());

    // cached result is reused for another tolerance
    let cached = detector.spectrum().unwrap().to_vec();
    detector.run_with(0.2).unwrap();
    assert_eq!(detector.spectrum().unwrap(), cached.as_slice());

    detector.set_samples(tone(329.63, 4_096, 0.5));
    assert!(detector.spectrum().is_none());
    assert_eq!(detector.run_with(1.0).unwrap(), Some(vec![PitchClass::E]));

    detector.set_samples_f32(&vec![0.0_f32; 4_096]);
    assert_eq!(detector.run().unwrap(), None);
}

#[test]
fn test_sample_rate_changes() {
    let rate = 22_050;
    let samples: Vec<f32> = (0..4_096)
        .map(|i| (2.0 * std::f32::consts::PI * 392.0 * i as f32 / rate as f32).sin())
        .collect();
    let mut detector = NoteDetector::from_f32(&samples, rate);
    assert_eq!(detector.sample_rate(), rate);
    assert_eq!(detector.run_with(1.0).unwrap(), Some(vec![PitchClass::G]));
    assert_eq!(detector.spectrum().unwrap().len(), rate as usize);

    detector.set_sample_rate(44_100);
    assert!(detector.spectrum().is_none());
}

#[test]
fn test_builder_validation() {
    let bad_note = NoteDetector::builder().high_pass("H3", 1.4).build();
    assert!(matches!(
        bad_note,
        Err(DetectError::Note(NoteError::InvalidName(ref n))) if n == "H3"
    ));
    assert!(matches!(
        NoteDetector::builder().sample_rate(0).build(),
        Err(DetectError::Configuration(_))
    ));
}

#[test]
fn test_estimator_errors_convert() {
    fn configure() -> Result<NoteDetector, DetectError> {
        let estimator = NoteEstimator::builder().max_notes(0).build()?;
        NoteDetector::builder().estimator(estimator).build()
    }
    assert!(matches!(configure(), Err(DetectError::Estimate(_))));
}

/// Transform that reports an empty spectrum.
struct Deaf;

impl Transform for Deaf {
    fn transform(&self, samples: &[f64]) -> Vec<note_detect::complex::Complex64> {
        vec![note_detect::complex::ZERO; samples.len().next_power_of_two()]
    }

    fn name(&self) -> &'static str {
        "deaf"
    }
}

#[test]
fn test_custom_transform() {
    let mut detector = NoteDetector::new(tone(440.0, 4_096, 0.5));
    detector.set_transform(Deaf);
    assert_eq!(detector.transform_name(), Some("deaf"));
    assert_eq!(detector.run().unwrap(), None);
}
