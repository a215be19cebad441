// Copyright (c) 2026 Fourveil contributors
// SPDX-License-Identifier: GPL-3.0-only

//! Payload bit serialization for the additive strategy.
//!
//! Pixels are walked row-major; each byte is emitted least-significant bit
//! first, 8 bits per pixel. The decoder reassembles bytes in the same
//! order, so serialize/deserialize are exact inverses.

/// Serialize one row-major `u8` plane into a flat bit stream, LSB first.
pub fn serialize_bits(plane: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(plane.len() * 8);
    for &byte in plane {
        for shift in 0..8 {
            bits.push((byte >> shift) & 1 == 1);
        }
    }
    bits
}

/// Reassemble a row-major `u8` plane from a bit stream produced by
/// [`serialize_bits`].
///
/// # Panics
/// Panics if `bits.len() != width * height * 8`.
pub fn deserialize_bits(bits: &[bool], width: usize, height: usize) -> Vec<u8> {
    assert_eq!(bits.len(), width * height * 8, "bit stream length mismatch");

    let mut plane = Vec::with_capacity(width * height);
    for chunk in bits.chunks_exact(8) {
        let mut byte = 0u8;
        for (shift, &bit) in chunk.iter().enumerate() {
            if bit {
                byte |= 1 << shift;
            }
        }
        plane.push(byte);
    }
    plane
}

/// Bits needed to carry a `width x height` plane.
pub fn bit_len(width: usize, height: usize) -> usize {
    width * height * 8
}
