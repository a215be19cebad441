// Copyright (c) 2026 Fourveil contributors
// SPDX-License-Identifier: GPL-3.0-only

//! Error types for encoding and decoding.

use std::error::Error;
use std::fmt;

/// Errors surfaced by the codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Carrier and payload (or carrier and stego) dimensions are incompatible
    /// for the selected strategy.
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// The payload does not fit in the carrier's embedding region.
    CapacityExceeded { required: usize, available: usize },
    /// Non-blind decoding was requested without the carrier state produced
    /// at encode time.
    MissingCarrierState,
    /// A configuration parameter is out of range or inconsistent.
    InvalidConfig(&'static str),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::DimensionMismatch { expected, actual } => write!(
                f,
                "dimension mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            CodecError::CapacityExceeded { required, available } => write!(
                f,
                "payload needs {required} embedding slots but the carrier region has {available}"
            ),
            CodecError::MissingCarrierState => {
                write!(f, "non-blind decoding requires the carrier state saved at encode time")
            }
            CodecError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl Error for CodecError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = CodecError::DimensionMismatch {
            expected: (64, 48),
            actual: (32, 32),
        };
        assert_eq!(err.to_string(), "dimension mismatch: expected 64x48, got 32x32");

        let err = CodecError::CapacityExceeded {
            required: 2048,
            available: 1024,
        };
        assert!(err.to_string().contains("2048"));
        assert!(err.to_string().contains("1024"));

        assert!(CodecError::MissingCarrierState.to_string().contains("carrier state"));

        let err = CodecError::InvalidConfig("payload scale must be in (0, 1]");
        assert!(err.to_string().contains("payload scale"));
    }
}
