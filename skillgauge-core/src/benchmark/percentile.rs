//! Normal-distribution percentile estimation.

/// Lowest percentile ever reported.
pub const MIN_PERCENTILE: f64 = 1.0;
/// Highest percentile ever reported.
pub const MAX_PERCENTILE: f64 = 99.0;

/// Error function, Abramowitz & Stegun formula 7.1.26 (|error| < 1.5e-7).
#[must_use]
pub fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254_829_592;
    const A2: f64 = -0.284_496_736;
    const A3: f64 = 1.421_413_741;
    const A4: f64 = -1.453_152_027;
    const A5: f64 = 1.061_405_429;
    const P: f64 = 0.327_591_1;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;
    sign * (1.0 - poly * (-x * x).exp())
}

/// Standard normal cumulative distribution function.
#[must_use]
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

/// Percentile rank of `score` in a normal distribution, clamped to 1-99.
///
/// A non-positive standard deviation is treated as a point mass at `mean`.
#[must_use]
pub fn percentile(score: f64, mean: f64, std_dev: f64) -> f64 {
    if !score.is_finite() || !mean.is_finite() {
        return 50.0;
    }
    if !std_dev.is_finite() || std_dev <= 0.0 {
        return if score > mean {
            MAX_PERCENTILE
        } else if score < mean {
            MIN_PERCENTILE
        } else {
            50.0
        };
    }
    let z = (score - mean) / std_dev;
    (100.0 * normal_cdf(z)).clamp(MIN_PERCENTILE, MAX_PERCENTILE)
}
