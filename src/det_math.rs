// Copyright (c) 2026 Fourveil contributors
// SPDX-License-Identifier: GPL-3.0-only

//! Deterministic math kernels for reproducible embedding.
//!
//! Identical inputs must yield byte-identical stego images, so every phase
//! angle, magnitude, and twiddle factor in the codec goes through these
//! functions instead of the platform libm. Only IEEE 754 operations with a
//! single correct result are used (add, sub, mul, div, floor, sqrt, abs).
//!
//! Algorithms and coefficients from FDLIBM (Freely Distributable LIBM),
//! which guarantees < 1 ULP error.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

// Extended-precision π/2 for Cody-Waite range reduction.
// PIO2_HI + PIO2_LO = π/2 to ~70 bits.
const PIO2_HI: f64 = f64::from_bits(0x3FF921FB54442D18); // 1.5707963267948966
const PIO2_LO: f64 = f64::from_bits(0x3C91A62633145C07); // 6.123233995736766e-17

// Sin kernel coefficients (FDLIBM k_sin.c), valid for |x| ≤ π/4.
const S1: f64 = f64::from_bits(0xBFC5555555555549);
const S2: f64 = f64::from_bits(0x3F8111111110F8A6);
const S3: f64 = f64::from_bits(0xBF2A01A019C161D5);
const S4: f64 = f64::from_bits(0x3EC71DE357B1FE7D);
const S5: f64 = f64::from_bits(0xBE5AE5E68A2B9CEB);
const S6: f64 = f64::from_bits(0x3DE5D93A5ACFD57C);

// Cos kernel coefficients (FDLIBM k_cos.c).
const C1: f64 = f64::from_bits(0x3FA5555555555549);
const C2: f64 = f64::from_bits(0xBF56C16C16C15177);
const C3: f64 = f64::from_bits(0x3EFA01A019CB1590);
const C4: f64 = f64::from_bits(0xBE927E4F809C52AD);
const C5: f64 = f64::from_bits(0x3E21EE9EBDB4B1C4);
const C6: f64 = f64::from_bits(0xBDA8FAE9BE8838D4);

// Atan coefficients (FDLIBM s_atan.c).
const AT: [f64; 11] = [
    f64::from_bits(0x3FD555555555550D),
    f64::from_bits(0xBFC999999998EBC4),
    f64::from_bits(0x3FC24924920083FF),
    f64::from_bits(0xBFBC71C6FE231671),
    f64::from_bits(0x3FB745CDC54C206E),
    f64::from_bits(0xBFB3B0F2AF749A6D),
    f64::from_bits(0x3FB10D66A0D03D51),
    f64::from_bits(0xBFADDE2D52DEFD9A),
    f64::from_bits(0x3FA97B4B24760DEB),
    f64::from_bits(0xBFA2B4442C6A6C2F),
    f64::from_bits(0x3F90AD3AE322DA11),
];

/// atan reference values: atan(0.5), atan(1.0), atan(1.5), atan(∞).
const ATAN_REF: [f64; 4] = [
    4.636476090008061e-01,
    FRAC_PI_4,
    9.827937232473290e-01,
    FRAC_PI_2,
];

/// Evaluate sin polynomial for |x| ≤ π/4 (FDLIBM __kernel_sin).
#[inline]
fn sin_kern(x: f64) -> f64 {
    let z = x * x;
    let v = z * x;
    let r = S2 + z * (S3 + z * (S4 + z * (S5 + z * S6)));
    x + v * (S1 + z * r)
}

/// Evaluate cos polynomial for |x| ≤ π/4 (FDLIBM __kernel_cos).
#[inline]
fn cos_kern(x: f64) -> f64 {
    let z = x * x;
    let r = z * (C1 + z * (C2 + z * (C3 + z * (C4 + z * (C5 + z * C6)))));
    let hz = 0.5 * z;
    1.0 - (hz - z * r)
}

/// Cody-Waite range reduction: x → r in [-π/4, π/4], quadrant n mod 4.
#[inline]
fn reduce(x: f64) -> (f64, i32) {
    let n = (x * (2.0 / PI) + 0.5).floor();
    let r = (x - n * PIO2_HI) - n * PIO2_LO;
    (r, (n as i64 & 3) as i32)
}

/// Deterministic sin and cos computed together (shared range reduction).
pub fn det_sincos(x: f64) -> (f64, f64) {
    if x.is_nan() || x.is_infinite() {
        return (f64::NAN, f64::NAN);
    }
    let (r, q) = reduce(x);
    let s = sin_kern(r);
    let c = cos_kern(r);
    match q {
        0 => (s, c),
        1 => (c, -s),
        2 => (-s, -c),
        3 => (-c, s),
        _ => unreachable!(),
    }
}

/// Deterministic atan(x) using FDLIBM argument reduction + polynomial.
fn det_atan(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    let neg = x < 0.0;
    let mut xa = x.abs();

    // Argument reduction into 5 ranges
    let id: i32;
    if xa < 0.4375 {
        if xa < 1e-29 {
            return x; // tiny x
        }
        id = -1;
    } else if xa < 1.1875 {
        if xa < 0.6875 {
            id = 0;
            xa = (2.0 * xa - 1.0) / (2.0 + xa);
        } else {
            id = 1;
            xa = (xa - 1.0) / (xa + 1.0);
        }
    } else if xa < 2.4375 {
        id = 2;
        xa = (xa - 1.5) / (1.0 + 1.5 * xa);
    } else {
        id = 3;
        xa = -1.0 / xa;
    }

    // Polynomial split into odd and even parts for accuracy
    let z = xa * xa;
    let w = z * z;
    let s1 = z * (AT[0] + w * (AT[2] + w * (AT[4] + w * (AT[6] + w * (AT[8] + w * AT[10])))));
    let s2 = w * (AT[1] + w * (AT[3] + w * (AT[5] + w * (AT[7] + w * AT[9]))));

    let result = if id < 0 {
        xa - xa * (s1 + s2)
    } else {
        ATAN_REF[id as usize] + (xa - xa * (s1 + s2))
    };

    if neg { -result } else { result }
}

/// Deterministic atan2(y, x).
pub fn det_atan2(y: f64, x: f64) -> f64 {
    if y.is_nan() || x.is_nan() {
        return f64::NAN;
    }

    if y == 0.0 {
        if x > 0.0 || (x == 0.0 && x.is_sign_positive()) {
            return y; // ±0
        } else {
            return if y.is_sign_negative() { -PI } else { PI };
        }
    }

    if x == 0.0 {
        return if y > 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 };
    }

    if y.is_infinite() {
        if x.is_infinite() {
            return if x > 0.0 {
                if y > 0.0 { FRAC_PI_4 } else { -FRAC_PI_4 }
            } else {
                if y > 0.0 { 3.0 * FRAC_PI_4 } else { -3.0 * FRAC_PI_4 }
            };
        }
        return if y > 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 };
    }

    if x.is_infinite() {
        return if x > 0.0 {
            if y.is_sign_negative() { -0.0 } else { 0.0 }
        } else {
            if y.is_sign_negative() { -PI } else { PI }
        };
    }

    let a = det_atan((y / x).abs());

    if x > 0.0 {
        if y >= 0.0 { a } else { -a }
    } else {
        if y >= 0.0 { PI - a } else { -(PI - a) }
    }
}

/// Deterministic hypot(x, y) = sqrt(x² + y²).
///
/// Scales by the larger magnitude to avoid overflow/underflow.
pub fn det_hypot(x: f64, y: f64) -> f64 {
    let xa = x.abs();
    let ya = y.abs();
    let (big, small) = if xa >= ya { (xa, ya) } else { (ya, xa) };
    if big == 0.0 {
        return 0.0;
    }
    let ratio = small / big;
    big * (1.0 + ratio * ratio).sqrt()
}
