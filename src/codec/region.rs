// Copyright (c) 2026 Fourveil contributors
// SPDX-License-Identifier: GPL-3.0-only

//! Spectral region selection.
//!
//! Each strategy embeds only into a subset of the spectrum. Membership is a
//! pure function of coordinates and dimensions, so encoder and decoder
//! always agree on which coefficients carry data.

use crate::det_math::det_hypot;

/// Which spectral coefficients a strategy may touch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EmbeddingRegion {
    /// Coefficients whose distance from the spectrum center exceeds
    /// `threshold * max_radius`, with `threshold` in `[0, 1]`.
    RadiusAbove(f64),
    /// Coefficients with `row >= margin && col >= margin`. A margin of 0
    /// selects the whole spectrum.
    MarginFrom(usize),
}

impl EmbeddingRegion {
    /// Whether `(row, col)` belongs to the region for a `height x width`
    /// spectrum.
    #[inline]
    pub fn contains(&self, row: usize, col: usize, height: usize, width: usize) -> bool {
        match *self {
            EmbeddingRegion::MarginFrom(margin) => row >= margin && col >= margin,
            EmbeddingRegion::RadiusAbove(threshold) => {
                let cy = height as f64 / 2.0;
                let cx = width as f64 / 2.0;
                let max_radius = det_hypot(cx, cy);
                let dist = det_hypot(col as f64 - cx, row as f64 - cy);
                dist > threshold * max_radius
            }
        }
    }

    /// Number of coefficients in the region for a `height x width` spectrum.
    pub fn capacity(&self, width: usize, height: usize) -> usize {
        match *self {
            // Closed form for the rectangular case
            EmbeddingRegion::MarginFrom(margin) => {
                let rows = height.saturating_sub(margin);
                let cols = width.saturating_sub(margin);
                rows * cols
            }
            EmbeddingRegion::RadiusAbove(_) => {
                let mut count = 0;
                for row in 0..height {
                    for col in 0..width {
                        if self.contains(row, col, height, width) {
                            count += 1;
                        }
                    }
                }
                count
            }
        }
    }
}
