// Copyright (c) 2026 Fourveil contributors
// SPDX-License-Identifier: GPL-3.0-only

//! Spectral-blend strategy, non-blind.
//!
//! Carrier and payload spectra are mixed linearly inside the region. Both
//! inputs are spectra of real images, so the blend is Hermitian by
//! construction and needs no symmetry repair. Decoding must subtract the
//! carrier's contribution, which requires the original carrier spectra from
//! encode time; [`CarrierState`] carries them explicitly between the two
//! calls.

use crate::codec::region::EmbeddingRegion;
use crate::fft2d::{Complex64, Spectrum};
use crate::image::CHANNELS;

/// The carrier's original, unmodified channel spectra, returned by a blend
/// encode and required by the matching decode.
#[derive(Clone, Debug)]
pub struct CarrierState {
    spectra: [Spectrum; CHANNELS],
}

impl CarrierState {
    pub(crate) fn new(spectra: [Spectrum; CHANNELS]) -> Self {
        CarrierState { spectra }
    }

    pub(crate) fn spectrum(&self, channel: usize) -> &Spectrum {
        &self.spectra[channel]
    }

    /// Dimensions of the carrier the state was captured from.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.spectra[0].width(), self.spectra[0].height())
    }
}

/// Mix the payload spectrum into the carrier spectrum:
/// `carrier <- (1-factor)*carrier + factor*payload` on eligible coefficients.
pub fn blend_into(
    carrier: &mut Spectrum,
    payload: &Spectrum,
    region: &EmbeddingRegion,
    factor: f64,
) {
    let height = carrier.height();
    let width = carrier.width();

    for row in 0..height {
        for col in 0..width {
            if !region.contains(row, col, height, width) {
                continue;
            }
            let c = carrier.at(row, col);
            let p = payload.at(row, col);
            carrier.set(row, col, c * (1.0 - factor) + p * factor);
        }
    }
}

/// Invert the blend: `payload = (stego - (1-factor)*original) / factor` on
/// eligible coefficients, zero elsewhere.
pub fn unblend(
    stego: &Spectrum,
    original: &Spectrum,
    region: &EmbeddingRegion,
    factor: f64,
) -> Spectrum {
    let height = stego.height();
    let width = stego.width();
    let mut payload = stego.clone();

    for row in 0..height {
        for col in 0..width {
            let value = if region.contains(row, col, height, width) {
                let s = stego.at(row, col);
                let o = original.at(row, col);
                (s - o * (1.0 - factor)) / factor
            } else {
                Complex64::new(0.0, 0.0)
            };
            payload.set(row, col, value);
        }
    }

    payload
}
