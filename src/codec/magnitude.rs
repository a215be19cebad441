// Copyright (c) 2026 Fourveil contributors
// SPDX-License-Identifier: GPL-3.0-only

//! Magnitude-substitution strategy, blind and phase-preserving.
//!
//! Every eligible coefficient's magnitude is replaced by a blend of a scaled
//! payload sample and the original magnitude; its phase is kept. The payload
//! sample for a coordinate is chosen by conjugate-fold mapping: the
//! coordinate is folded into the non-redundant quadrant
//! (`rf = min(r, (H-r) % H)`, `cf = min(c, (W-c) % W)`) and the payload grid
//! is stretched over that quadrant by nearest-neighbor. A coordinate and its
//! conjugate mirror fold to the same payload pixel, so they receive the same
//! target magnitude and the subsequent symmetry repair cannot destroy data.
//!
//! Extraction reads one representative coordinate per payload pixel: the
//! smallest folded coordinate of its preimage, which is lexicographically at
//! or before its mirror and therefore survives repair unchanged.

use crate::codec::error::CodecError;
use crate::codec::region::EmbeddingRegion;
use crate::det_math::{det_atan2, det_hypot, det_sincos};
use crate::fft2d::{Complex64, Spectrum};

/// Coefficients below this magnitude carry no meaningful phase. The chirp-z
/// path leaves ~1e-10 arithmetic noise where the radix-2 path produces exact
/// zeros; substituting into those arbitrary phases makes the embedded
/// spectrum depend on the transform path, so they are snapped to phase 0.
const PHASE_EPSILON: f64 = 1e-6;

/// Folded-quadrant dimensions for a `height x width` spectrum:
/// `(W/2 + 1, H/2 + 1)` distinct fold slots per axis.
pub fn folded_dims(width: usize, height: usize) -> (usize, usize) {
    (width / 2 + 1, height / 2 + 1)
}

/// Fold `(row, col)` into the non-redundant quadrant. A coordinate and its
/// conjugate mirror fold to the same point.
#[inline]
fn fold(row: usize, col: usize, height: usize, width: usize) -> (usize, usize) {
    let rf = row.min((height - row) % height);
    let cf = col.min((width - col) % width);
    (rf, cf)
}

/// Payload dimensions must resolve inside the folded quadrant, otherwise
/// distinct payload pixels would share a fold slot and extraction could not
/// separate them.
pub fn check_payload_fits(
    spectrum_width: usize,
    spectrum_height: usize,
    payload_width: usize,
    payload_height: usize,
) -> Result<(), CodecError> {
    let (fold_w, fold_h) = folded_dims(spectrum_width, spectrum_height);
    if payload_width > fold_w || payload_height > fold_h {
        return Err(CodecError::CapacityExceeded {
            required: payload_width * payload_height,
            available: fold_w * fold_h,
        });
    }
    Ok(())
}

/// Payload pixel addressed by folded coordinate `(rf, cf)`: nearest-neighbor
/// stretch of the payload grid over the folded quadrant.
#[inline]
fn payload_coords(
    rf: usize,
    cf: usize,
    fold_w: usize,
    fold_h: usize,
    payload_width: usize,
    payload_height: usize,
) -> (usize, usize) {
    (rf * payload_height / fold_h, cf * payload_width / fold_w)
}

/// Smallest folded coordinate that maps to payload row/col `p` on an axis
/// with `fold_n` slots and `payload_n` payload pixels.
#[inline]
fn representative(p: usize, fold_n: usize, payload_n: usize) -> usize {
    (p * fold_n + payload_n - 1) / payload_n
}

/// Rewrite every eligible coefficient's magnitude from the payload plane,
/// preserving phase.
pub fn embed_samples(
    spectrum: &mut Spectrum,
    plane: &[u8],
    payload_width: usize,
    payload_height: usize,
    region: &EmbeddingRegion,
    alpha: f64,
    mag_scale: f64,
) {
    let height = spectrum.height();
    let width = spectrum.width();
    let (fold_w, fold_h) = folded_dims(width, height);

    for row in 0..height {
        for col in 0..width {
            if !region.contains(row, col, height, width) {
                continue;
            }

            let (rf, cf) = fold(row, col, height, width);
            let (py, px) = payload_coords(rf, cf, fold_w, fold_h, payload_width, payload_height);
            let sample = plane[py * payload_width + px] as f64;

            let value = spectrum.at(row, col);
            let original_magnitude = det_hypot(value.re, value.im);
            let theta = if original_magnitude < PHASE_EPSILON {
                0.0
            } else {
                det_atan2(value.im, value.re)
            };
            let magnitude = alpha * (sample * mag_scale) + (1.0 - alpha) * original_magnitude;

            let (sin_t, cos_t) = det_sincos(theta);
            spectrum.set(row, col, Complex64::new(magnitude * cos_t, magnitude * sin_t));
        }
    }
}

/// Recover the payload plane from the magnitudes of one representative
/// coefficient per pixel.
///
/// Representatives outside the region yield 0; samples are rounded and
/// clamped to `0..=255`.
pub fn extract_samples(
    spectrum: &Spectrum,
    payload_width: usize,
    payload_height: usize,
    region: &EmbeddingRegion,
    alpha: f64,
    mag_scale: f64,
) -> Vec<u8> {
    let height = spectrum.height();
    let width = spectrum.width();
    let (fold_w, fold_h) = folded_dims(width, height);

    let mut plane = Vec::with_capacity(payload_width * payload_height);
    for py in 0..payload_height {
        let row = representative(py, fold_h, payload_height);
        for px in 0..payload_width {
            let col = representative(px, fold_w, payload_width);

            if !region.contains(row, col, height, width) {
                plane.push(0);
                continue;
            }

            let value = spectrum.at(row, col);
            let magnitude = det_hypot(value.re, value.im);
            let sample = (magnitude / (alpha * mag_scale)).round().clamp(0.0, 255.0);
            plane.push(sample as u8);
        }
    }

    plane
}
