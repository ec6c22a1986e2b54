//! Array utilities
//!
//! Resampling of magnitude spectra and complex to magnitude conversion.

use crate::complex::Complex64;

/// Linearly resample `array` to `target_len` values.
///
/// Index `i` of the output samples the source at
/// `x = i * (n - 1) / (target_len - 1)`. Positions at or beyond either end
/// take the first or last source value. An empty source yields zeros.
pub fn stretch(array: &[f64], target_len: usize) -> Vec<f64> {
    let n = array.len();
    if n == 0 {
        return vec![0.0; target_len];
    }
    if target_len == 1 {
        return vec![array[0]];
    }

    let last = (n - 1) as f64;
    let scale = last / (target_len.saturating_sub(1)) as f64;
    (0..target_len)
        .map(|i| {
            let x = i as f64 * scale;
            if x <= 0.0 {
                array[0]
            } else if x >= last {
                array[n - 1]
            } else {
                let x1 = x.floor() as usize;
                let (y1, y2) = (array[x1], array[x1 + 1]);
                y1 + (x - x1 as f64) * (y2 - y1)
            }
        })
        .collect()
}

/// Modulus of every bin of a spectrum.
pub fn magnitudes(spectrum: &[Complex64]) -> Vec<f64> {
    spectrum.iter().map(|c| c.norm()).collect()
}
