// Copyright (c) 2026 Fourveil contributors
// SPDX-License-Identifier: GPL-3.0-only

//! Capacity planning: how much payload fits, and shrinking payloads to fit.

use crate::codec::error::CodecError;
use crate::codec::region::EmbeddingRegion;
use crate::image::Image;

/// Embedding slots available in a `width x height` carrier for `region`.
pub fn capacity(region: &EmbeddingRegion, width: usize, height: usize) -> usize {
    region.capacity(width, height)
}

/// Error out if `required` slots exceed what the region offers.
pub fn check_fits(
    region: &EmbeddingRegion,
    carrier_width: usize,
    carrier_height: usize,
    required: usize,
) -> Result<(), CodecError> {
    let available = capacity(region, carrier_width, carrier_height);
    if required > available {
        return Err(CodecError::CapacityExceeded { required, available });
    }
    Ok(())
}

/// Shrink the payload by `payload_scale` with nearest-neighbor sampling.
///
/// Target dimensions are `floor(dim * payload_scale)`. Nearest-neighbor
/// keeps every output pixel an exact copy of a source pixel, so sample
/// values are not smeared before embedding. A scale of 1 returns the
/// payload unchanged.
pub fn resize_payload(payload: &Image, payload_scale: f64) -> Result<Image, CodecError> {
    if payload_scale == 1.0 {
        return Ok(payload.clone());
    }

    let new_width = (payload.width() as f64 * payload_scale).floor() as usize;
    let new_height = (payload.height() as f64 * payload_scale).floor() as usize;
    if new_width == 0 || new_height == 0 {
        return Err(CodecError::InvalidConfig(
            "payload scale shrinks the payload to zero size",
        ));
    }

    Ok(payload.downsample_nearest(new_width, new_height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_exactly_at_capacity() {
        let region = EmbeddingRegion::MarginFrom(0);
        assert!(check_fits(&region, 8, 8, 64).is_ok());
    }

    #[test]
    fn one_over_capacity_fails() {
        let region = EmbeddingRegion::MarginFrom(0);
        let err = check_fits(&region, 8, 8, 65).unwrap_err();
        assert_eq!(
            err,
            CodecError::CapacityExceeded { required: 65, available: 64 }
        );
    }

    #[test]
    fn unit_scale_is_identity() {
        let img = Image::uniform(6, 4, 42);
        let resized = resize_payload(&img, 1.0).unwrap();
        assert_eq!(resized, img);
    }

    #[test]
    fn half_scale_floors_dimensions() {
        let img = Image::uniform(7, 5, 10);
        let resized = resize_payload(&img, 0.5).unwrap();
        assert_eq!(resized.width(), 3);
        assert_eq!(resized.height(), 2);
    }

    #[test]
    fn vanishing_scale_rejected() {
        let img = Image::uniform(4, 4, 0);
        assert!(matches!(
            resize_payload(&img, 0.1),
            Err(CodecError::InvalidConfig(_))
        ));
    }
}
