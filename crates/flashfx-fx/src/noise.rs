//! Hash-based value noise and the octave compositor.
//!
//! A smoothly interpolated pseudo-random scalar field built from hashed
//! integer lattice points, plus the standard layered-noise sum that stacks
//! frequencies for naturalistic jitter. Both are pure functions: no state,
//! no external randomness, same inputs always give the same output. That
//! determinism is what makes the border's "organic" motion reproducible as
//! `time` advances smoothly.

/// Hash one lattice index into `[0, 1)`.
///
/// The classic shader one-liner `fract(sin(n * 12.9898) * 43758.5453)`.
/// `rem_euclid` keeps the result non-negative where a plain `%` would
/// follow the sign of the sine.
#[inline]
#[must_use]
pub fn lattice_hash(n: f64) -> f64 {
    ((n * 12.9898).sin() * 43758.5453).rem_euclid(1.0)
}

/// Sample the value-noise field at `(x, y)`.
///
/// Hashes the four lattice corners around the point and blends them
/// bilinearly with smoothstep weights (`3u² − 2u³`), which gives the field
/// a continuous first derivative across cell boundaries. At integer lattice
/// points the blend weight collapses to a single corner, so the result is
/// exactly [`lattice_hash`] of that corner.
///
/// Domain is unrestricted; range is `[0, 1]`.
#[must_use]
pub fn value_noise(x: f64, y: f64) -> f64 {
    let i = x.floor();
    let j = y.floor();
    let fx = x - i;
    let fy = y - j;

    let a = lattice_hash(i + j * 57.0);
    let b = lattice_hash(i + 1.0 + j * 57.0);
    let c = lattice_hash(i + (j + 1.0) * 57.0);
    let d = lattice_hash(i + 1.0 + (j + 1.0) * 57.0);

    let ux = fx * fx * (3.0 - 2.0 * fx);
    let uy = fy * fy * (3.0 - 2.0 * fy);

    a * (1.0 - ux) * (1.0 - uy) + b * ux * (1.0 - uy) + c * (1.0 - ux) * uy + d * ux * uy
}

/// Layer parameters for [`fractal_noise`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OctaveParams {
    /// Number of layers to sum.
    pub octaves: u32,
    /// Frequency multiplier between layers.
    pub lacunarity: f64,
    /// Amplitude multiplier between layers.
    pub gain: f64,
    /// Amplitude of the first layer.
    pub amplitude: f64,
    /// Frequency of the first layer.
    pub frequency: f64,
}

/// Sum `octaves` noise layers along a 1D track through the 2D field.
///
/// Each layer samples `value_noise(freq * x + seed * 100, time * freq * 0.3)`,
/// then scales frequency by `lacunarity` and amplitude by `gain`. The
/// `seed * 100` offset shifts the whole track; two calls with seeds 0 and 1
/// give decorrelated signals for the x and y displacement axes.
#[must_use]
pub fn fractal_noise(x: f64, params: OctaveParams, time: f64, seed: u32) -> f64 {
    let mut freq = params.frequency;
    let mut amp = params.amplitude;
    let mut sum = 0.0;
    for _ in 0..params.octaves {
        sum += amp * value_noise(freq * x + f64::from(seed) * 100.0, time * freq * 0.3);
        freq *= params.lacunarity;
        amp *= params.gain;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PARAMS: OctaveParams = OctaveParams {
        octaves: 3,
        lacunarity: 2.0,
        gain: 0.5,
        amplitude: 0.08,
        frequency: 12.0,
    };

    #[test]
    fn lattice_hash_stays_in_unit_interval() {
        for n in -1000..1000 {
            let v = lattice_hash(n as f64 * 0.37);
            assert!((0.0..1.0).contains(&v), "hash({n}) = {v}");
        }
    }

    #[test]
    fn noise_at_lattice_points_equals_corner_hash() {
        for i in -20..20 {
            for j in -20..20 {
                let (x, y) = (i as f64, j as f64);
                let expected = lattice_hash(x + y * 57.0);
                let got = value_noise(x, y);
                assert!(
                    (got - expected).abs() < 1e-12,
                    "noise({i}, {j}) = {got}, corner hash = {expected}"
                );
            }
        }
    }

    #[test]
    fn fractal_noise_is_deterministic() {
        let a = fractal_noise(0.42, PARAMS, 3.7, 0);
        let b = fractal_noise(0.42, PARAMS, 3.7, 0);
        assert_eq!(a, b);
    }

    #[test]
    fn seeds_decorrelate_axes() {
        let x_axis = fractal_noise(0.42, PARAMS, 3.7, 0);
        let y_axis = fractal_noise(0.42, PARAMS, 3.7, 1);
        assert_ne!(x_axis, y_axis);
    }

    #[test]
    fn zero_octaves_sum_to_zero() {
        let p = OctaveParams { octaves: 0, ..PARAMS };
        assert_eq!(fractal_noise(1.0, p, 1.0, 0), 0.0);
    }

    proptest! {
        #[test]
        fn noise_in_unit_range(x in -1e4f64..1e4, y in -1e4f64..1e4) {
            let v = value_noise(x, y);
            prop_assert!((0.0..=1.0).contains(&v), "noise({x}, {y}) = {v}");
        }

        #[test]
        fn noise_is_deterministic(x in -1e4f64..1e4, y in -1e4f64..1e4) {
            prop_assert_eq!(value_noise(x, y), value_noise(x, y));
        }

        #[test]
        fn fractal_sum_bounded_by_geometric_series(x in -100.0f64..100.0, t in 0.0f64..100.0) {
            // amp * (1 + gain + gain^2) with noise in [0, 1].
            let bound = PARAMS.amplitude * (1.0 + PARAMS.gain + PARAMS.gain * PARAMS.gain);
            let v = fractal_noise(x, PARAMS, t, 0);
            prop_assert!(v >= 0.0 && v <= bound + 1e-12, "fractal({x}, {t}) = {v}");
        }
    }
}
