//! Standard normal distribution functions
//!
//! `cdf` uses Hart's double-precision rational approximation (as popularised
//! by Graeme West), accurate to roughly 1e-14 across the real line and
//! computed from the tail so small probabilities keep their relative
//! precision. `inverse_cdf` uses Acklam's rational approximation followed by
//! one Halley refinement step against `cdf`.

use crate::error::{GrowthError, Result};

const SQRT_2PI: f64 = 2.506_628_274_631_000_5;

/// Standard normal cumulative distribution function Φ(z)
///
/// The upper tail is returned as `1 - tail`, so Φ(z) rounds to exactly 1.0
/// once the tail drops below f64 resolution near 1 (z ≈ 8.3). The lower tail
/// keeps its relative precision down to z = -37, below which it is 0.
pub fn cdf(z: f64) -> f64 {
    let x = z.abs();

    let tail = if x > 37.0 {
        0.0
    } else {
        let e = (-x * x / 2.0).exp();
        if x < 7.071_067_811_865_47 {
            let mut n = 3.526_249_659_989_11e-2 * x + 0.700_383_064_443_688;
            n = n * x + 6.373_962_203_531_65;
            n = n * x + 33.912_866_078_383;
            n = n * x + 112.079_291_497_871;
            n = n * x + 221.213_596_169_931;
            n = n * x + 220.206_867_912_376;

            let mut d = 8.838_834_764_831_84e-2 * x + 1.755_667_163_182_64;
            d = d * x + 16.064_177_579_207;
            d = d * x + 86.780_732_202_946_1;
            d = d * x + 296.564_248_779_674;
            d = d * x + 637.333_633_378_831;
            d = d * x + 793.826_512_519_948;
            d = d * x + 440.413_735_824_752;

            e * n / d
        } else {
            // Continued fraction for the far tail
            let mut b = x + 0.65;
            b = x + 4.0 / b;
            b = x + 3.0 / b;
            b = x + 2.0 / b;
            b = x + 1.0 / b;
            e / b / SQRT_2PI
        }
    };

    if z > 0.0 {
        1.0 - tail
    } else {
        tail
    }
}

// Acklam's coefficients
const A: [f64; 6] = [
    -3.969_683_028_665_376e1,
    2.209_460_984_245_205e2,
    -2.759_285_104_469_687e2,
    1.383_577_518_672_69e2,
    -3.066_479_806_614_716e1,
    2.506_628_277_459_239,
];
const B: [f64; 5] = [
    -5.447_609_879_822_406e1,
    1.615_858_368_580_409e2,
    -1.556_989_798_598_866e2,
    6.680_131_188_771_972e1,
    -1.328_068_155_288_572e1,
];
const C: [f64; 6] = [
    -7.784_894_002_430_293e-3,
    -3.223_964_580_411_365e-1,
    -2.400_758_277_161_838,
    -2.549_732_539_343_734,
    4.374_664_141_464_968,
    2.938_163_982_698_783,
];
const D: [f64; 4] = [
    7.784_695_709_041_462e-3,
    3.224_671_290_700_398e-1,
    2.445_134_137_142_996,
    3.754_408_661_907_416,
];
const P_LOW: f64 = 0.02425;

/// Inverse of Φ: the z-score below which a fraction `p` of the population lies
///
/// Fails with [`GrowthError::InvalidConfig`] unless `0 < p < 1`.
pub fn inverse_cdf(p: f64) -> Result<f64> {
    if !(p > 0.0 && p < 1.0) {
        return Err(GrowthError::InvalidConfig(format!(
            "probability must lie strictly between 0 and 1, got {}",
            p
        )));
    }

    let x = if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    };

    // Halley step
    let e = cdf(x) - p;
    let u = e * SQRT_2PI * (x * x / 2.0).exp();
    Ok(x - u / (1.0 + x * u / 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// erf by its Maclaurin series; converges well for |x| <= 3.6
    fn erf_series(x: f64) -> f64 {
        let mut sum = 0.0;
        let mut power = x; // x^(2n+1) / n!
        for n in 0..200 {
            let sign = if n % 2 == 0 { 1.0 } else { -1.0 };
            sum += sign * power / (2 * n + 1) as f64;
            power *= x * x / (n + 1) as f64;
        }
        2.0 / std::f64::consts::PI.sqrt() * sum
    }

    fn reference_cdf(z: f64) -> f64 {
        0.5 * (1.0 + erf_series(z / std::f64::consts::SQRT_2))
    }

    #[test]
    fn test_cdf_matches_erf_reference() {
        let mut z = -5.0;
        while z <= 5.0 {
            let diff = (cdf(z) - reference_cdf(z)).abs();
            assert!(diff < 1e-6, "z = {}: diff {}", z, diff);
            z += 0.01;
        }
    }

    #[test]
    fn test_cdf_known_values() {
        assert_eq!(cdf(0.0), 0.5);
        assert!((cdf(1.0) - 0.841_344_746_068_542_9).abs() < 1e-12);
        assert!((cdf(1.96) - 0.975_002_104_851_779_5).abs() < 1e-12);
        assert!((cdf(-2.0) - 0.022_750_131_948_179_2).abs() < 1e-12);
        assert!((cdf(-5.0) - 2.866_515_718_791_939e-7).abs() < 1e-15);
    }

    #[test]
    fn test_cdf_extreme_tails() {
        assert_eq!(cdf(-40.0), 0.0);
        assert_eq!(cdf(40.0), 1.0);
        assert!(cdf(-8.0) > 0.0);
        assert_eq!(cdf(9.0), 1.0);
        assert!(cdf(-9.0) > 0.0);
        assert!(cdf(8.0) < 1.0);
    }

    #[test]
    fn test_inverse_known_values() {
        assert!(inverse_cdf(0.5).unwrap().abs() < 1e-12);
        assert!((inverse_cdf(0.97).unwrap() - 1.880_793_608_151_251).abs() < 1e-9);
        assert!((inverse_cdf(0.03).unwrap() + 1.880_793_608_151_251).abs() < 1e-9);
        assert!((inverse_cdf(0.85).unwrap() - 1.036_433_389_493_79).abs() < 1e-9);
        assert!((inverse_cdf(0.001).unwrap() + 3.090_232_306_167_813).abs() < 1e-9);
    }

    #[test]
    fn test_inverse_rejects_bounds() {
        assert!(inverse_cdf(0.0).is_err());
        assert!(inverse_cdf(1.0).is_err());
        assert!(inverse_cdf(-0.1).is_err());
        assert!(inverse_cdf(f64::NAN).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Φ(z) + Φ(-z) = 1
        #[test]
        fn test_cdf_symmetry(z in -8.0f64..8.0) {
            prop_assert!((cdf(z) + cdf(-z) - 1.0).abs() < 1e-14);
        }

        /// Property: Φ is non-decreasing
        #[test]
        fn test_cdf_monotone(a in -8.0f64..8.0, b in -8.0f64..8.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(cdf(lo) <= cdf(hi));
        }

        /// Property: inverse_cdf undoes cdf
        #[test]
        fn test_inverse_round_trip(z in -6.0f64..6.0) {
            let p = cdf(z);
            let back = inverse_cdf(p).unwrap();
            prop_assert!((back - z).abs() < 1e-7, "z = {}, back = {}", z, back);
        }
    }
}
