// Copyright (c) 2026 Fourveil contributors
// SPDX-License-Identifier: GPL-3.0-only

//! # fourveil
//!
//! Frequency-domain image-in-image steganography. Hides the pixel data of a
//! payload image inside a carrier image by editing the carrier's 2D Fourier
//! spectrum, and recovers an approximation of the payload from the stego
//! image. Three embedding strategies are provided:
//!
//! - **Additive** (blind): nudges coefficient real parts by a fixed delta
//!   per payload bit; decode reads the signs back.
//! - **MagnitudeSub** (blind): replaces coefficient magnitudes with scaled
//!   payload samples, preserving phase and conjugate symmetry.
//! - **Blend** (non-blind): mixes carrier and payload spectra; decode needs
//!   the carrier spectra saved at encode time.
//!
//! All processing is in-memory and purely computational; image file codecs
//! and persistence are the caller's concern.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use fourveil::{encode, decode, Image, Recovery, Strategy, StrategyConfig};
//!
//! let carrier = Image::from_planes(64, 64, carrier_planes);
//! let payload = Image::from_planes(16, 16, payload_planes);
//! let config = StrategyConfig::new(Strategy::magnitude_sub());
//!
//! let (stego, _) = encode(&carrier, &payload, &config).unwrap();
//! let recovered = decode(&stego, &config, &Recovery::PayloadDims { width: 16, height: 16 }).unwrap();
//! ```

pub mod codec;
pub mod det_math;
pub mod fft2d;
pub mod image;

pub use codec::{decode, encode, CarrierState, CodecError, EmbeddingRegion, Recovery, Strategy, StrategyConfig};
pub use fft2d::{fft2d, ifft2d, ifft2d_complex, Complex64, Spectrum};
pub use image::{Image, CHANNELS};
