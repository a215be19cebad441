// Copyright (c) 2026 Fourveil contributors
// SPDX-License-Identifier: GPL-3.0-only

//! Conjugate-symmetry repair for edited spectra.
//!
//! An inverse FFT produces a real signal only if the spectrum is Hermitian:
//! `S[r][c] == conj(S[mirror(r)][mirror(c)])` with `mirror(i) = (N-i) % N`.
//! Embedding edits coefficients one at a time and breaks this, so the
//! repaired spectrum must be fixed up before inversion.
//!
//! Repair is deterministic: for each conjugate pair, the lexicographically
//! smaller `(row, col)` coordinate is the source of truth and its conjugate
//! is copied to the mirror. Self-conjugate bins (where a coordinate is its
//! own mirror) get their imaginary part zeroed.

use crate::fft2d::Spectrum;

/// Overwrite mirror coefficients so the spectrum inverts to a real signal.
pub fn enforce_conjugate_symmetry(spectrum: &mut Spectrum) {
    let height = spectrum.height();
    let width = spectrum.width();

    for row in 0..height {
        for col in 0..width {
            let (mirror_row, mirror_col) = spectrum.mirror(row, col);

            if (row, col) == (mirror_row, mirror_col) {
                // Self-conjugate: must equal its own conjugate
                let mut value = spectrum.at(row, col);
                value.im = 0.0;
                spectrum.set(row, col, value);
            } else if (row, col) < (mirror_row, mirror_col) {
                let value = spectrum.at(row, col);
                spectrum.set(mirror_row, mirror_col, value.conj());
            }
        }
    }
}

/// Whether the spectrum already satisfies conjugate symmetry to within
/// `tolerance` per component.
pub fn is_hermitian(spectrum: &Spectrum, tolerance: f64) -> bool {
    let height = spectrum.height();
    let width = spectrum.width();

    for row in 0..height {
        for col in 0..width {
            let (mirror_row, mirror_col) = spectrum.mirror(row, col);
            let a = spectrum.at(row, col);
            let b = spectrum.at(mirror_row, mirror_col);
            if (a.re - b.re).abs() > tolerance || (a.im + b.im).abs() > tolerance {
                return false;
            }
        }
    }
    true
}
