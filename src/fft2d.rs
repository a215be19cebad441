// Copyright (c) 2026 Fourveil contributors
// SPDX-License-Identifier: GPL-3.0-only

//! 2D FFT/IFFT over per-channel pixel grids.
//!
//! - Radix-2 Cooley-Tukey for power-of-2 sizes
//! - Bluestein's chirp-z transform for arbitrary sizes, with precomputed
//!   plans reused across all rows/columns of the same length
//!
//! The forward transform is unnormalized; the inverse applies the
//! `1/(width*height)` factor. All twiddle factors come from
//! [`det_sincos`](crate::det_math::det_sincos) so spectra are bit-identical
//! across platforms.
//!
//! Coefficients are stored row-major and addressed as `(row, col)`; the
//! `[x][y]` convention exists only at the [`Image`](crate::image::Image)
//! boundary.

use crate::det_math::det_sincos;
use num_complex::Complex;
use std::f64::consts::PI;

/// Complex coefficient type used throughout the codec.
pub type Complex64 = Complex<f64>;

/// 2D complex spectrum of one image channel.
#[derive(Clone, Debug)]
pub struct Spectrum {
    data: Vec<Complex64>,
    width: usize,
    height: usize,
}

impl Spectrum {
    /// Width of the spectrum (columns).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the spectrum (rows).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Coefficient at `(row, col)`.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> Complex64 {
        self.data[row * self.width + col]
    }

    /// Overwrite the coefficient at `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: Complex64) {
        self.data[row * self.width + col] = value;
    }

    /// Conjugate-mirror coordinate: `((H - row) % H, (W - col) % W)`.
    ///
    /// For a spectrum of a real-valued signal, the coefficient here equals
    /// the complex conjugate of the one at `(row, col)`.
    #[inline]
    pub fn mirror(&self, row: usize, col: usize) -> (usize, usize) {
        (
            (self.height - row) % self.height,
            (self.width - col) % self.width,
        )
    }

    /// Raw row-major coefficient slice.
    pub fn coefficients(&self) -> &[Complex64] {
        &self.data
    }
}

// ──────────────────────────────────────────────────────────────────────────
// Bluestein plan: precomputed chirp factors for reuse
// ──────────────────────────────────────────────────────────────────────────

/// Precomputed Bluestein chirp factors and FFT(b) for a given (n, sign).
///
/// Avoids recomputing the chirp and its FFT for every row or column of the
/// same length.
struct BluesteinPlan {
    n: usize,
    m: usize, // next_pow2(2*n - 1)
    chirp: Vec<Complex64>,
    b_hat: Vec<Complex64>,
}

impl BluesteinPlan {
    fn new(n: usize, sign: f64) -> Self {
        let m = next_pow2(2 * n - 1);

        // Chirp factors: w_k = exp(sign * i * pi * k^2 / n)
        let mut chirp = vec![Complex64::new(0.0, 0.0); n];
        for k in 0..n {
            let angle = sign * PI * (k as f64 * k as f64) / n as f64;
            let (s, c) = det_sincos(angle);
            chirp[k] = Complex64::new(c, s);
        }

        // b[k] = conj(chirp[k]) with wrap-around for negative indices,
        // zero-padded to the convolution length
        let mut b = vec![Complex64::new(0.0, 0.0); m];
        b[0] = chirp[0].conj();
        for k in 1..n {
            b[k] = chirp[k].conj();
            b[m - k] = chirp[k].conj();
        }
        fft_radix2(&mut b, -1.0);

        BluesteinPlan { n, m, chirp, b_hat: b }
    }

    fn execute(&self, input: &[Complex64]) -> Vec<Complex64> {
        debug_assert_eq!(input.len(), self.n);

        // a[k] = x[k] * chirp[k], zero-padded to length m
        let mut a = vec![Complex64::new(0.0, 0.0); self.m];
        for k in 0..self.n {
            a[k] = input[k] * self.chirp[k];
        }

        // Convolve: A = FFT(a), C = IFFT(A * B_hat)
        fft_radix2(&mut a, -1.0);
        for i in 0..self.m {
            a[i] *= self.b_hat[i];
        }
        fft_radix2(&mut a, 1.0);

        // Normalize the radix-2 inverse and apply the outer chirp
        let inv_m = 1.0 / self.m as f64;
        let mut result = vec![Complex64::new(0.0, 0.0); self.n];
        for k in 0..self.n {
            result[k] = a[k] * inv_m * self.chirp[k];
        }

        result
    }
}

// ──────────────────────────────────────────────────────────────────────────
// 1D primitives
// ──────────────────────────────────────────────────────────────────────────

/// Next power of 2 >= n.
fn next_pow2(n: usize) -> usize {
    let mut p = 1;
    while p < n {
        p <<= 1;
    }
    p
}

/// In-place radix-2 Cooley-Tukey FFT. `data.len()` must be a power of 2.
/// `sign`: -1.0 for forward, +1.0 for inverse (unnormalized).
fn fft_radix2(data: &mut [Complex64], sign: f64) {
    let n = data.len();
    debug_assert!(n.is_power_of_two());
    if n <= 1 {
        return;
    }

    // Bit-reversal permutation
    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j ^= bit;
        if i < j {
            data.swap(i, j);
        }
    }

    // Butterfly stages
    let mut len = 2;
    while len <= n {
        let half = len / 2;
        let angle_step = sign * PI / half as f64;
        for start in (0..n).step_by(len) {
            for k in 0..half {
                let (s, c) = det_sincos(angle_step * k as f64);
                let w = Complex64::new(c, s);
                let u = data[start + k];
                let v = data[start + k + half] * w;
                data[start + k] = u + v;
                data[start + k + half] = u - v;
            }
        }
        len <<= 1;
    }
}

/// 1D FFT for arbitrary length. `sign`: -1.0 forward, +1.0 inverse.
/// Uses the supplied Bluestein plan for non-power-of-2 lengths.
fn fft1d_with_plan(input: &[Complex64], sign: f64, plan: Option<&BluesteinPlan>) -> Vec<Complex64> {
    let n = input.len();
    if n <= 1 {
        return input.to_vec();
    }
    if n.is_power_of_two() {
        let mut buf = input.to_vec();
        fft_radix2(&mut buf, sign);
        return buf;
    }

    if let Some(p) = plan {
        debug_assert_eq!(p.n, n);
        return p.execute(input);
    }

    BluesteinPlan::new(n, sign).execute(input)
}

// ──────────────────────────────────────────────────────────────────────────
// 2D FFT / IFFT — public API
// ──────────────────────────────────────────────────────────────────────────

/// Row/column pass over the whole grid, in place.
fn transform2d(data: &mut [Complex64], width: usize, height: usize, sign: f64) {
    let row_plan = if !width.is_power_of_two() && width > 1 {
        Some(BluesteinPlan::new(width, sign))
    } else {
        None
    };
    let col_plan = if !height.is_power_of_two() && height > 1 {
        Some(BluesteinPlan::new(height, sign))
    } else {
        None
    };

    for row in 0..height {
        let start = row * width;
        let transformed = fft1d_with_plan(&data[start..start + width], sign, row_plan.as_ref());
        data[start..start + width].copy_from_slice(&transformed);
    }

    // Columns via gather-FFT-scatter with a single column buffer
    let mut col_buf = vec![Complex64::new(0.0, 0.0); height];
    for col in 0..width {
        for r in 0..height {
            col_buf[r] = data[r * width + col];
        }
        let transformed = fft1d_with_plan(&col_buf, sign, col_plan.as_ref());
        for r in 0..height {
            data[r * width + col] = transformed[r];
        }
    }
}

/// Real-valued channel grid (row-major, `width * height`) -> 2D spectrum.
///
/// # Panics
/// Panics if `width` or `height` is zero or `pixels.len() != width * height`.
pub fn fft2d(pixels: &[f64], width: usize, height: usize) -> Spectrum {
    assert!(width > 0 && height > 0, "transform requires non-empty grid");
    assert_eq!(pixels.len(), width * height);

    let mut data: Vec<Complex64> = pixels.iter().map(|&v| Complex64::new(v, 0.0)).collect();
    transform2d(&mut data, width, height, -1.0);

    Spectrum { data, width, height }
}

/// 2D spectrum -> real-valued channel grid.
///
/// Takes the real parts after the inverse transform, normalized by
/// `1/(width*height)`. Any imaginary residue (a non-Hermitian spectrum)
/// is discarded here; use [`ifft2d_complex`] to inspect it.
pub fn ifft2d(spectrum: &Spectrum) -> Vec<f64> {
    ifft2d_complex(spectrum).into_iter().map(|c| c.re).collect()
}

/// 2D spectrum -> complex grid, normalized by `1/(width*height)`.
///
/// Retains the imaginary component so callers can verify that a repaired
/// spectrum really inverts to a real signal.
pub fn ifft2d_complex(spectrum: &Spectrum) -> Vec<Complex64> {
    let width = spectrum.width;
    let height = spectrum.height;
    let mut data = spectrum.data.clone();

    transform2d(&mut data, width, height, 1.0);

    let norm = 1.0 / (width * height) as f64;
    for c in data.iter_mut() {
        *c *= norm;
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fft_ifft_roundtrip_pow2() {
        let width = 16;
        let height = 16;
        let pixels: Vec<f64> = (0..width * height).map(|i| (i as f64) * 0.1 + 50.0).collect();

        let spectrum = fft2d(&pixels, width, height);
        let recovered = ifft2d(&spectrum);

        for i in 0..pixels.len() {
            assert!(
                (pixels[i] - recovered[i]).abs() < 1e-9,
                "mismatch at {i}: expected {}, got {}",
                pixels[i],
                recovered[i]
            );
        }
    }

    #[test]
    fn fft_ifft_roundtrip_bluestein() {
        // Non-power-of-2 dimensions take the chirp-z path
        let width = 12;
        let height = 10;
        let pixels: Vec<f64> = (0..width * height).map(|i| (i as f64) * 0.3 + 20.0).collect();

        let spectrum = fft2d(&pixels, width, height);
        let recovered = ifft2d(&spectrum);

        for i in 0..pixels.len() {
            assert!(
                (pixels[i] - recovered[i]).abs() < 1e-8,
                "mismatch at {i}: expected {}, got {}",
                pixels[i],
                recovered[i]
            );
        }
    }

    #[test]
    fn parseval_theorem() {
        let width = 8;
        let height = 8;
        let pixels: Vec<f64> = (0..width * height).map(|i| ((i * 7 + 3) % 256) as f64).collect();

        let spatial_energy: f64 = pixels.iter().map(|v| v * v).sum();

        let spectrum = fft2d(&pixels, width, height);
        let freq_energy: f64 = spectrum
            .coefficients()
            .iter()
            .map(|c| c.re * c.re + c.im * c.im)
            .sum();

        let n = (width * height) as f64;
        assert!(
            (spatial_energy - freq_energy / n).abs() < 1e-6,
            "Parseval violated: spatial={spatial_energy}, freq/N={}",
            freq_energy / n
        );
    }

    #[test]
    fn dc_component_is_sum() {
        let width = 4;
        let height = 4;
        let pixels: Vec<f64> = (1..=16).map(|v| v as f64).collect();

        let spectrum = fft2d(&pixels, width, height);

        let expected_dc: f64 = pixels.iter().sum();
        assert!(
            (spectrum.at(0, 0).re - expected_dc).abs() < 1e-9,
            "DC should be the pixel sum: expected {expected_dc}, got {}",
            spectrum.at(0, 0).re
        );
        assert!(spectrum.at(0, 0).im.abs() < 1e-9);
    }

    #[test]
    fn real_input_spectrum_is_hermitian() {
        let width = 8;
        let height = 6;
        let pixels: Vec<f64> = (0..width * height).map(|i| ((i * 13 + 5) % 251) as f64).collect();

        let spectrum = fft2d(&pixels, width, height);
        for row in 0..height {
            for col in 0..width {
                let (mr, mc) = spectrum.mirror(row, col);
                let a = spectrum.at(row, col);
                let b = spectrum.at(mr, mc);
                assert!(
                    (a.re - b.re).abs() < 1e-8 && (a.im + b.im).abs() < 1e-8,
                    "not conjugate-symmetric at ({row},{col})"
                );
            }
        }
    }

    #[test]
    fn mirror_coordinates() {
        let pixels = vec![0.0; 8 * 4];
        let spectrum = fft2d(&pixels, 8, 4);
        assert_eq!(spectrum.mirror(0, 0), (0, 0));
        assert_eq!(spectrum.mirror(1, 1), (3, 7));
        assert_eq!(spectrum.mirror(2, 4), (2, 4)); // self-conjugate
        assert_eq!(spectrum.mirror(0, 3), (0, 5));
    }

    #[test]
    #[should_panic(expected = "non-empty grid")]
    fn zero_dimension_rejected() {
        fft2d(&[], 0, 4);
    }
}
