//! Complex
//!
//! Complex arithmetic used by the transform strategies.
//!
//! The value type itself is `num_complex::Complex<f64>` as re-exported by
//! `rustfft`, which gives immutable add/sub/mul and a `hypot` based
//! `norm()`. This module adds the exponential and the FFT twiddle
//! factor on top of it.

use std::f64::consts::PI;

pub use rustfft::num_complex::Complex64;

/// The complex zero, used for padding.
pub const ZERO: Complex64 = Complex64 { re: 0.0, im: 0.0 };

/// Complex exponential: for `z = x + iy` returns `e^x (cos y + i sin y)`.
#[inline]
pub fn cexp(z: Complex64) -> Complex64 {
    let scale = z.re.exp();
    let (sin, cos) = z.im.sin_cos();
    Complex64::new(scale * cos, scale * sin)
}

/// Twiddle factor `e^(-i 2 pi k / n)`.
#[inline]
pub fn twiddle(k: usize, n: usize) -> Complex64 {
    cexp(Complex64::new(0.0, -2.0 * PI * k as f64 / n as f64))
}
