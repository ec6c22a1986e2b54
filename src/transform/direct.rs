use std::f64::consts::PI;

use super::{to_complex, Transform};
use crate::complex::{cexp, Complex64, ZERO};

/// Textbook DFT, every bin summed independently over all samples.
#[derive(Debug, Copy, Clone, Default)]
pub struct DirectDft;

impl Transform for DirectDft {
    fn transform(&self, samples: &[f64]) -> Vec<Complex64> {
        let input = to_complex(samples);
        let n = input.len();
        let step = -2.0 * PI / n as f64;

        (0..n)
            .map(|k| {
                input.iter().enumerate().fold(ZERO, |acc, (j, &x)| {
                    // k * j can exceed n^2, wrap it first to keep the phase small
                    let phase = ((k * j) % n) as f64 * step;
                    acc + x * cexp(Complex64::new(0.0, phase))
                })
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "direct"
    }
}
