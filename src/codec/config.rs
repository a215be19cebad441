// Copyright (c) 2026 Fourveil contributors
// SPDX-License-Identifier: GPL-3.0-only

//! Strategy selection and tuning parameters.

use crate::codec::error::CodecError;

/// Default additive nudge amplitude, in spectrum units.
pub const DEFAULT_DELTA: f64 = 12_500.0;

/// Default magnitude-substitution sample gain.
pub const DEFAULT_MAG_SCALE: f64 = 60.0;

/// Default blend weight given to the payload spectrum.
pub const DEFAULT_BLEND_FACTOR: f64 = 0.5;

/// Default radius threshold for the blend region, as a fraction of the
/// maximum spectral radius.
pub const DEFAULT_BLEND_THRESHOLD: f64 = 0.5;

/// Embedding strategy plus its tuning knobs.
///
/// Each variant carries exactly the parameters that strategy consumes, so an
/// `Additive` embed can never silently read a blend factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Strategy {
    /// Blind 1-bit-per-coefficient embedding: the real part of each selected
    /// coefficient is nudged by `+delta` or `-delta` and the bit is read back
    /// from its sign. `margin` skips the lowest `margin` rows and columns of
    /// the spectrum (0 embeds everywhere, including DC).
    Additive { delta: f64, margin: usize },
    /// Blind sample embedding: coefficient magnitudes in the region are
    /// replaced by a blend of the scaled payload sample and the original
    /// magnitude, with phase preserved. `alpha` is the substitution weight,
    /// `threshold` the radial cutoff as a fraction of the maximum radius.
    MagnitudeSub { alpha: f64, mag_scale: f64, threshold: f64 },
    /// Non-blind blend: carrier and payload spectra are mixed inside the
    /// region with weight `factor` on the payload. Decoding requires the
    /// carrier state captured at encode time.
    Blend { factor: f64, threshold: f64 },
}

impl Strategy {
    /// Additive strategy with the default amplitude, skipping spectrum row
    /// and column 0. The DC coefficient of any bright carrier dwarfs the
    /// nudge amplitude and would swallow the bit embedded there; margin 1
    /// keeps the scan clear of it. Pass `margin: 0` explicitly for a
    /// whole-spectrum scan.
    pub fn additive() -> Self {
        Strategy::Additive { delta: DEFAULT_DELTA, margin: 1 }
    }

    /// Magnitude substitution with full replacement and the default gain,
    /// over the whole spectrum.
    pub fn magnitude_sub() -> Self {
        Strategy::MagnitudeSub {
            alpha: 1.0,
            mag_scale: DEFAULT_MAG_SCALE,
            threshold: 0.0,
        }
    }

    /// Equal-weight blend restricted to the outer half of the spectrum.
    pub fn blend() -> Self {
        Strategy::Blend {
            factor: DEFAULT_BLEND_FACTOR,
            threshold: DEFAULT_BLEND_THRESHOLD,
        }
    }
}

/// Full codec configuration: strategy plus the payload pre-scale factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrategyConfig {
    pub strategy: Strategy,
    /// Payload dimensions are multiplied by this before embedding,
    /// `0 < payload_scale <= 1`. The blend strategy requires exactly 1.
    pub payload_scale: f64,
}

impl StrategyConfig {
    pub fn new(strategy: Strategy) -> Self {
        StrategyConfig { strategy, payload_scale: 1.0 }
    }

    pub fn with_payload_scale(mut self, payload_scale: f64) -> Self {
        self.payload_scale = payload_scale;
        self
    }

    /// Reject out-of-range parameters before any transform work happens.
    pub fn validate(&self) -> Result<(), CodecError> {
        if !(self.payload_scale > 0.0 && self.payload_scale <= 1.0) {
            return Err(CodecError::InvalidConfig("payload scale must be in (0, 1]"));
        }

        match self.strategy {
            Strategy::Additive { delta, .. } => {
                if !(delta > 0.0) {
                    return Err(CodecError::InvalidConfig("additive delta must be positive"));
                }
            }
            Strategy::MagnitudeSub { alpha, mag_scale, threshold } => {
                if !(alpha > 0.0 && alpha <= 1.0) {
                    return Err(CodecError::InvalidConfig("alpha must be in (0, 1]"));
                }
                if !(mag_scale > 0.0) {
                    return Err(CodecError::InvalidConfig("magnitude scale must be positive"));
                }
                if !(0.0..=1.0).contains(&threshold) {
                    return Err(CodecError::InvalidConfig("radius threshold must be in [0, 1]"));
                }
            }
            Strategy::Blend { factor, threshold } => {
                if !(factor > 0.0 && factor <= 1.0) {
                    return Err(CodecError::InvalidConfig("blend factor must be in (0, 1]"));
                }
                if !(0.0..=1.0).contains(&threshold) {
                    return Err(CodecError::InvalidConfig("radius threshold must be in [0, 1]"));
                }
                if self.payload_scale != 1.0 {
                    return Err(CodecError::InvalidConfig(
                        "blend strategy requires payload scale 1",
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(StrategyConfig::new(Strategy::additive()).validate().is_ok());
        assert!(StrategyConfig::new(Strategy::magnitude_sub()).validate().is_ok());
        assert!(StrategyConfig::new(Strategy::blend()).validate().is_ok());
    }

    #[test]
    fn rejects_bad_payload_scale() {
        let cfg = StrategyConfig::new(Strategy::additive()).with_payload_scale(0.0);
        assert!(matches!(cfg.validate(), Err(CodecError::InvalidConfig(_))));

        let cfg = StrategyConfig::new(Strategy::additive()).with_payload_scale(1.5);
        assert!(matches!(cfg.validate(), Err(CodecError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_nonpositive_delta() {
        let cfg = StrategyConfig::new(Strategy::Additive { delta: 0.0, margin: 0 });
        assert!(matches!(cfg.validate(), Err(CodecError::InvalidConfig(_))));

        let cfg = StrategyConfig::new(Strategy::Additive { delta: -1.0, margin: 0 });
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let cfg = StrategyConfig::new(Strategy::MagnitudeSub {
            alpha: 1.0,
            mag_scale: 60.0,
            threshold: 1.2,
        });
        assert!(cfg.validate().is_err());

        let cfg = StrategyConfig::new(Strategy::Blend { factor: 0.5, threshold: -0.1 });
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn blend_requires_unit_payload_scale() {
        let cfg = StrategyConfig::new(Strategy::blend()).with_payload_scale(0.5);
        assert!(matches!(
            cfg.validate(),
            Err(CodecError::InvalidConfig("blend strategy requires payload scale 1"))
        ));
    }
}
