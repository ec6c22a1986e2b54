//! Filter
//!
//! Amplitude normalization and resonant second-order IIR filters.
//!
//! Filter coefficients follow the resonant low/high-pass recipe by Patrice
//! Tarrabia (musicdsp.org archive #38).

use std::f64::consts::PI;

/// Scale `samples` in place so the largest absolute value becomes 1.0.
///
/// An all-zero buffer is left as is.
pub fn normalize(samples: &mut [f64]) {
    let max = samples.iter().fold(0.0_f64, |m, s| m.max(s.abs()));
    if max == 0.0 {
        return;
    }
    let factor = 1.0 / max;
    samples.iter_mut().for_each(|s| *s *= factor);
}

/// Mean absolute amplitude, 0.0 for an empty buffer.
pub fn average_amplitude(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|s| s.abs()).sum::<f64>() / samples.len() as f64
}

/// Coefficients of a biquad section:
/// `y[i] = a1 x[i] + a2 x[i-1] + a3 x[i-2] - b1 y[i-1] - b2 y[i-2]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Biquad {
    /// Feed-forward gain of the current input.
    pub a1: f64,
    /// Feed-forward gain of the previous input.
    pub a2: f64,
    /// Feed-forward gain of the input two samples back.
    pub a3: f64,
    /// Feedback gain of the previous output.
    pub b1: f64,
    /// Feedback gain of the output two samples back.
    pub b2: f64,
}

impl Biquad {
    /// Resonant low-pass with cutoff `frequency` Hz.
    ///
    /// `resonance` ranges from about `sqrt(2)` (no peak) down to 0.1 (sharp
    /// peak at the cutoff).
    pub fn low_pass(frequency: f64, resonance: f64, sample_rate: u32) -> Self {
        let c = 1.0 / (PI * frequency / sample_rate as f64).tan();
        let a1 = 1.0 / (1.0 + resonance * c + c * c);
        Biquad {
            a1,
            a2: 2.0 * a1,
            a3: a1,
            b1: 2.0 * (1.0 - c * c) * a1,
            b2: (1.0 - resonance * c + c * c) * a1,
        }
    }

    /// Resonant high-pass with cutoff `frequency` Hz.
    pub fn high_pass(frequency: f64, resonance: f64, sample_rate: u32) -> Self {
        let c = (PI * frequency / sample_rate as f64).tan();
        let a1 = 1.0 / (1.0 + resonance * c + c * c);
        Biquad {
            a1,
            a2: -2.0 * a1,
            a3: a1,
            b1: 2.0 * (c * c - 1.0) * a1,
            b2: (1.0 - resonance * c + c * c) * a1,
        }
    }

    /// Run the filter over `input`.
    ///
    /// The first two outputs copy the first two inputs since there is no
    /// history yet.
    pub fn apply(&self, input: &[f64]) -> Vec<f64> {
        let mut output = Vec::with_capacity(input.len());
        output.extend(input.iter().take(2));
        if input.len() < 3 {
            return output;
        }

        let (mut x1, mut x2) = (input[1], input[0]);
        let (mut y1, mut y2) = (output[1], output[0]);
        for &x0 in &input[2..] {
            let y0 = self.a1 * x0 + self.a2 * x1 + self.a3 * x2 - self.b1 * y1 - self.b2 * y2;
            x2 = x1; x1 = x0;
            y2 = y1; y1 = y0;
            output.push(y0);
        }
        output
    }
}

/// Remove content above `cutoff` Hz.
pub fn low_pass(input: &[f64], cutoff: f64, resonance: f64, sample_rate: u32) -> Vec<f64> {
    Biquad::low_pass(cutoff, resonance, sample_rate).apply(input)
}

/// Remove content below `cutoff` Hz.
pub fn high_pass(input: &[f64], cutoff: f64, resonance: f64, sample_rate: u32) -> Vec<f64> {
    Biquad::high_pass(cutoff, resonance, sample_rate).apply(input)
}
