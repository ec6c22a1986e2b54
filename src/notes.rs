//! Notes
//!
//! Equal-tempered note names, pitch indices and frequencies.
//!
//! Pitch 0 is `C0` at 16.35 Hz and every following pitch is one semitone
//! higher, so a note name maps to `octave * 12 + letter`.

use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// Number of pitch classes in an octave.
pub const SEMITONES: usize = 12;

/// Frequency of pitch 0 (`C0`) in Hz.
pub const C0_FREQUENCY: f64 = 16.35;

/// Frequency ratio between adjacent semitones, `2^(1/12)`.
pub const SEMITONE_RATIO: f64 = 1.059_463_094_359_295;

/// Errors raised when parsing or converting notes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NoteError {
    /// The string is not a letter (optionally sharp) followed by one octave digit.
    #[error("`{0}` is not a note, expected a letter, an optional `#` and an octave digit (e.g. `C#4`)")]
    InvalidName(String),

    /// A negative pitch index has no note name.
    #[error("negative pitch {0} has no note name")]
    NegativePitch(i32),
}

/// Twelve chromatic pitch classes
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PitchClass {
    /// C
    C,
    /// C sharp
    Cs,
    /// D
    D,
    /// D sharp
    Ds,
    /// E
    E,
    /// F
    F,
    /// F sharp
    Fs,
    /// G
    G,
    /// G sharp
    Gs,
    /// A
    A,
    /// A sharp
    As,
    /// B
    B,
}

impl PitchClass {
    /// All pitch classes in ascending order starting at C.
    pub const ALL: [PitchClass; SEMITONES] = [
        PitchClass::C,
        PitchClass::Cs,
        PitchClass::D,
        PitchClass::Ds,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Fs,
        PitchClass::G,
        PitchClass::Gs,
        PitchClass::A,
        PitchClass::As,
        PitchClass::B,
    ];

    /// Semitones above C.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Pitch class at `idx % 12` semitones above C.
    pub const fn from_index(idx: usize) -> PitchClass {
        Self::ALL[idx % SEMITONES]
    }

    /// Letter with sharp sign, e.g. `"C#"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::Cs => "C#",
            PitchClass::D => "D",
            PitchClass::Ds => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::Fs => "F#",
            PitchClass::G => "G",
            PitchClass::Gs => "G#",
            PitchClass::A => "A",
            PitchClass::As => "A#",
            PitchClass::B => "B",
        }
    }

    /// Pitch index of this class in `octave`.
    pub const fn pitch(self, octave: usize) -> usize {
        octave * SEMITONES + self.index()
    }
}

impl Display for PitchClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PitchClass {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| NoteError::InvalidName(s.to_string()))
    }
}

/// Split a note name into pitch class and octave.
///
/// Accepts `([ACDFG]#?|[BE])\d` only; `E#` and `B#` are rejected.
fn parse(note: &str) -> Option<(PitchClass, usize)> {
    let mut chars = note.chars();
    let octave = chars.next_back()?.to_digit(10)? as usize;
    let class = chars.as_str().parse::<PitchClass>().ok()?;
    Some((class, octave))
}

/// Whether `note` is a valid note name such as `A4` or `F#2`.
pub fn is_note(note: &str) -> bool {
    parse(note).is_some()
}

/// Pitch index of a note name: `octave * 12 + letter`.
pub fn pitch_of(note: &str) -> Result<usize, NoteError> {
    parse(note)
        .map(|(class, octave)| class.pitch(octave))
        .ok_or_else(|| NoteError::InvalidName(note.to_string()))
}

/// Note name of a pitch index, the inverse of [`pitch_of`].
pub fn note_name(pitch: i32) -> Result<String, NoteError> {
    let pitch = usize::try_from(pitch).map_err(|_| NoteError::NegativePitch(pitch))?;
    Ok(format!(
        "{}{}",
        PitchClass::from_index(pitch),
        pitch / SEMITONES
    ))
}

/// Lazily grown lookup of note names and frequencies by pitch index.
///
/// Entries are appended on demand and never change once computed; entry
/// `i + 1` is entry `i` times [`SEMITONE_RATIO`].
#[derive(Debug, Clone)]
pub struct NoteTable {
    names: Vec<String>,
    frequencies: Vec<f64>,
}

impl NoteTable {
    /// Empty table.
    pub fn new() -> Self {
        NoteTable {
            names: Vec::new(),
            frequencies: Vec::new(),
        }
    }

    /// Table with the first `octaves` octaves already computed.
    pub fn with_octaves(octaves: usize) -> Self {
        let mut table = Self::new();
        table.extend_to(octaves * SEMITONES);
        table
    }

    /// Number of computed entries.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Whether nothing has been computed yet.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    fn extend_to(&mut self, len: usize) {
        for pitch in self.names.len()..len {
            self.names.push(format!(
                "{}{}",
                PitchClass::from_index(pitch),
                pitch / SEMITONES
            ));
        }
        for pitch in self.frequencies.len()..len {
            let freq = match pitch {
                0 => C0_FREQUENCY,
                _ => self.frequencies[pitch - 1] * SEMITONE_RATIO,
            };
            self.frequencies.push(freq);
        }
    }

    /// Frequency in Hz of `pitch`, computing missing entries first.
    pub fn frequency(&mut self, pitch: usize) -> f64 {
        if pitch >= self.frequencies.len() {
            self.extend_to(pitch + 1);
        }
        self.frequencies[pitch]
    }

    /// Frequency in Hz of a note name such as `A4`.
    pub fn frequency_of(&mut self, note: &str) -> Result<f64, NoteError> {
        let pitch = pitch_of(note)?;
        Ok(self.frequency(pitch))
    }

    /// Cached note name of `pitch`.
    pub fn name(&mut self, pitch: i32) -> Result<&str, NoteError> {
        let idx = usize::try_from(pitch).map_err(|_| NoteError::NegativePitch(pitch))?;
        if idx >= self.names.len() {
            self.extend_to(idx + 1);
        }
        Ok(&self.names[idx])
    }
}

impl Default for NoteTable {
    fn default() -> Self {
        Self::new()
    }
}
