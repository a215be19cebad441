// Copyright (c) 2026 Fourveil contributors
// SPDX-License-Identifier: GPL-3.0-only

//! Additive bit-nudge strategy, blind.
//!
//! Walks eligible coefficients row-major and pushes each one's real part by
//! `+delta` for a 1 bit, `-delta` for a 0 bit. The scan does not respect
//! conjugate pairing, so the edited spectrum is not Hermitian; the inverse
//! transform's imaginary residue is discarded when the stego image is built.
//! Extraction re-runs the identical scan and reads the sign of the real
//! part, so it needs no carrier data, only the payload dimensions.

use crate::codec::region::EmbeddingRegion;
use crate::fft2d::Spectrum;

/// Nudge the real parts of eligible coefficients by `±delta` per bit.
///
/// Stops once `bits` is exhausted; the caller has already verified the
/// region holds at least `bits.len()` coefficients.
pub fn embed_bits(spectrum: &mut Spectrum, bits: &[bool], region: &EmbeddingRegion, delta: f64) {
    let height = spectrum.height();
    let width = spectrum.width();
    let mut next = 0;

    'scan: for row in 0..height {
        for col in 0..width {
            if !region.contains(row, col, height, width) {
                continue;
            }
            if next >= bits.len() {
                break 'scan;
            }
            let mut value = spectrum.at(row, col);
            value.re += if bits[next] { delta } else { -delta };
            spectrum.set(row, col, value);
            next += 1;
        }
    }
}

/// Read back `count` bits from the signs of eligible coefficients, in the
/// same scan order as [`embed_bits`].
pub fn extract_bits(spectrum: &Spectrum, region: &EmbeddingRegion, count: usize) -> Vec<bool> {
    let height = spectrum.height();
    let width = spectrum.width();
    let mut bits = Vec::with_capacity(count);

    'scan: for row in 0..height {
        for col in 0..width {
            if !region.contains(row, col, height, width) {
                continue;
            }
            if bits.len() >= count {
                break 'scan;
            }
            bits.push(spectrum.at(row, col).re > 0.0);
        }
    }

    bits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fft2d::fft2d;

    #[test]
    fn embed_then_extract_on_same_spectrum() {
        let pixels = vec![128.0; 16 * 16];
        let mut spectrum = fft2d(&pixels, 16, 16);

        let bits = vec![true, false, true, true, false, false, true, false];
        let region = EmbeddingRegion::MarginFrom(1);
        embed_bits(&mut spectrum, &bits, &region, 12_500.0);

        assert_eq!(extract_bits(&spectrum, &region, bits.len()), bits);
    }

    #[test]
    fn embedding_stops_at_bit_count() {
        let pixels = vec![50.0; 8 * 8];
        let mut spectrum = fft2d(&pixels, 8, 8);
        let untouched = spectrum.at(0, 5);

        let region = EmbeddingRegion::MarginFrom(0);
        embed_bits(&mut spectrum, &[true, false, true], &region, 1000.0);

        // Fourth coefficient in scan order is (0, 3); (0, 5) is beyond it
        assert_eq!(spectrum.at(0, 5), untouched);
        assert_ne!(spectrum.at(0, 1), untouched);
    }

    #[test]
    fn margin_region_skips_low_frequencies() {
        let pixels = vec![128.0; 8 * 8];
        let mut spectrum = fft2d(&pixels, 8, 8);
        let dc = spectrum.at(0, 0);

        let region = EmbeddingRegion::MarginFrom(1);
        embed_bits(&mut spectrum, &[true; 4], &region, 500.0);

        // DC and the whole first row/column stay untouched
        assert_eq!(spectrum.at(0, 0), dc);
        assert_eq!(spectrum.at(0, 3).re, 0.0);
        assert_eq!(spectrum.at(3, 0).re, 0.0);
        // First eligible coefficient is (1, 1)
        assert_eq!(spectrum.at(1, 1).re, 500.0);
    }
}
