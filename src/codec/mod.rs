// Copyright (c) 2026 Fourveil contributors
// SPDX-License-Identifier: GPL-3.0-only

//! Frequency-domain steganographic codec.
//!
//! The two entry points are [`encode`] and [`decode`]. Encoding forward
//! transforms each carrier channel, applies the configured strategy, and
//! inverse transforms into the stego image. Decoding mirrors the channel
//! loop with the matching extractor.
//!
//! The additive and magnitude strategies are blind: decode needs only the
//! stego image, the config, and the payload dimensions. The blend strategy
//! is non-blind: encode returns a [`CarrierState`] that the caller must keep
//! and hand back to decode.

pub mod additive;
pub mod bits;
pub mod blend;
pub mod capacity;
pub mod config;
pub mod error;
pub mod magnitude;
pub mod region;
pub mod symmetry;

pub use blend::CarrierState;
pub use config::{Strategy, StrategyConfig};
pub use error::CodecError;
pub use region::EmbeddingRegion;

use crate::fft2d::{fft2d, ifft2d, Spectrum};
use crate::image::{Image, CHANNELS};

/// Decode-side inputs that cannot be derived from the stego image.
#[derive(Clone, Debug)]
pub enum Recovery {
    /// Payload dimensions used at encode time (blind strategies).
    PayloadDims { width: usize, height: usize },
    /// Carrier spectra saved from the encode call (blend strategy).
    Carrier(CarrierState),
}

/// Run `f` once per channel, fanning out across threads when the
/// `parallel` feature is enabled.
fn map_channels<R, F>(f: F) -> [R; CHANNELS]
where
    F: Fn(usize) -> R + Sync,
    R: Send,
{
    #[cfg(feature = "parallel")]
    {
        let (a, (b, c)) = rayon::join(|| f(0), || rayon::join(|| f(1), || f(2)));
        [a, b, c]
    }
    #[cfg(not(feature = "parallel"))]
    {
        std::array::from_fn(|ch| f(ch))
    }
}

/// Conceal `payload` inside `carrier`.
///
/// Validates the config and capacity before touching any spectrum. The
/// second element of the result is `Some` only for the blend strategy; the
/// caller must retain it to decode later.
pub fn encode(
    carrier: &Image,
    payload: &Image,
    config: &StrategyConfig,
) -> Result<(Image, Option<CarrierState>), CodecError> {
    config.validate()?;

    let payload = capacity::resize_payload(payload, config.payload_scale)?;
    let (carrier_w, carrier_h) = (carrier.width(), carrier.height());
    let (payload_w, payload_h) = (payload.width(), payload.height());

    match config.strategy {
        Strategy::Additive { delta, margin } => {
            let region = EmbeddingRegion::MarginFrom(margin);
            let required = bits::bit_len(payload_w, payload_h);
            capacity::check_fits(&region, carrier_w, carrier_h, required)?;

            let planes = map_channels(|ch| {
                let mut spectrum = fft2d(&carrier.plane_f64(ch), carrier_w, carrier_h);
                let stream = bits::serialize_bits(payload.plane(ch));
                additive::embed_bits(&mut spectrum, &stream, &region, delta);
                ifft2d(&spectrum)
            });

            Ok((Image::from_real_planes(carrier_w, carrier_h, planes), None))
        }

        Strategy::MagnitudeSub { alpha, mag_scale, threshold } => {
            let region = EmbeddingRegion::RadiusAbove(threshold);
            magnitude::check_payload_fits(carrier_w, carrier_h, payload_w, payload_h)?;
            capacity::check_fits(&region, carrier_w, carrier_h, payload_w * payload_h)?;

            let planes = map_channels(|ch| {
                let mut spectrum = fft2d(&carrier.plane_f64(ch), carrier_w, carrier_h);
                magnitude::embed_samples(
                    &mut spectrum,
                    payload.plane(ch),
                    payload_w,
                    payload_h,
                    &region,
                    alpha,
                    mag_scale,
                );
                symmetry::enforce_conjugate_symmetry(&mut spectrum);
                ifft2d(&spectrum)
            });

            Ok((Image::from_real_planes(carrier_w, carrier_h, planes), None))
        }

        Strategy::Blend { factor, threshold } => {
            if (carrier_w, carrier_h) != (payload_w, payload_h) {
                return Err(CodecError::DimensionMismatch {
                    expected: (carrier_w, carrier_h),
                    actual: (payload_w, payload_h),
                });
            }
            let region = EmbeddingRegion::RadiusAbove(threshold);

            let results: [(Vec<f64>, Spectrum); CHANNELS] = map_channels(|ch| {
                let original = fft2d(&carrier.plane_f64(ch), carrier_w, carrier_h);
                let payload_spec = fft2d(&payload.plane_f64(ch), carrier_w, carrier_h);

                let mut stego_spec = original.clone();
                blend::blend_into(&mut stego_spec, &payload_spec, &region, factor);

                (ifft2d(&stego_spec), original)
            });

            let [(p0, s0), (p1, s1), (p2, s2)] = results;
            let stego = Image::from_real_planes(carrier_w, carrier_h, [p0, p1, p2]);
            Ok((stego, Some(CarrierState::new([s0, s1, s2]))))
        }
    }
}

/// Recover the payload approximation from a stego image.
///
/// `recovery` must match the strategy: payload dimensions for the blind
/// strategies, the saved [`CarrierState`] for blend.
pub fn decode(
    stego: &Image,
    config: &StrategyConfig,
    recovery: &Recovery,
) -> Result<Image, CodecError> {
    config.validate()?;

    let (stego_w, stego_h) = (stego.width(), stego.height());

    match (config.strategy, recovery) {
        (Strategy::Additive { margin, .. }, Recovery::PayloadDims { width, height }) => {
            let (payload_w, payload_h) = (*width, *height);
            let region = EmbeddingRegion::MarginFrom(margin);
            let required = bits::bit_len(payload_w, payload_h);
            capacity::check_fits(&region, stego_w, stego_h, required)?;

            let planes = map_channels(|ch| {
                let spectrum = fft2d(&stego.plane_f64(ch), stego_w, stego_h);
                let stream = additive::extract_bits(&spectrum, &region, required);
                bits::deserialize_bits(&stream, payload_w, payload_h)
            });

            Ok(Image::from_planes(payload_w, payload_h, planes))
        }

        (
            Strategy::MagnitudeSub { alpha, mag_scale, threshold },
            Recovery::PayloadDims { width, height },
        ) => {
            let (payload_w, payload_h) = (*width, *height);
            let region = EmbeddingRegion::RadiusAbove(threshold);
            magnitude::check_payload_fits(stego_w, stego_h, payload_w, payload_h)?;

            let planes = map_channels(|ch| {
                let spectrum = fft2d(&stego.plane_f64(ch), stego_w, stego_h);
                magnitude::extract_samples(&spectrum, payload_w, payload_h, &region, alpha, mag_scale)
            });

            Ok(Image::from_planes(payload_w, payload_h, planes))
        }

        (Strategy::Blend { factor, threshold }, Recovery::Carrier(state)) => {
            if state.dimensions() != (stego_w, stego_h) {
                return Err(CodecError::DimensionMismatch {
                    expected: state.dimensions(),
                    actual: (stego_w, stego_h),
                });
            }
            let region = EmbeddingRegion::RadiusAbove(threshold);

            let planes = map_channels(|ch| {
                let stego_spec = fft2d(&stego.plane_f64(ch), stego_w, stego_h);
                let payload_spec = blend::unblend(&stego_spec, state.spectrum(ch), &region, factor);
                ifft2d(&payload_spec)
            });

            Ok(Image::from_real_planes(stego_w, stego_h, planes))
        }

        (Strategy::Blend { .. }, Recovery::PayloadDims { .. }) => {
            Err(CodecError::MissingCarrierState)
        }

        (_, Recovery::Carrier(_)) => Err(CodecError::InvalidConfig(
            "blind strategies take payload dimensions, not carrier state",
        )),
    }
}
