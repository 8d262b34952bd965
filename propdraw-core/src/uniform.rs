//! Uniform values in a closed range.
//!
//! Thin wrappers over `rand`'s uniform distribution. The plain functions use
//! the process-default [`SharedSource`]; the `_with` variants take any `Rng`.

use rand::Rng;
use thiserror::Error;

use crate::source::SharedSource;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UniformError {
    #[error("invalid range [{min}, {max}]")]
    InvalidRange { min: String, max: String },
}

impl UniformError {
    fn range<T: std::fmt::Display>(min: T, max: T) -> Self {
        UniformError::InvalidRange {
            min: min.to_string(),
            max: max.to_string(),
        }
    }
}

/// Random integer in `[min, max]`.
pub fn uniform_int(min: i32, max: i32) -> Result<i32, UniformError> {
    uniform_int_with(&mut SharedSource::process_default(), min, max)
}

/// Random `f32` in `[min, max]`.
pub fn uniform_float(min: f32, max: f32) -> Result<f32, UniformError> {
    uniform_float_with(&mut SharedSource::process_default(), min, max)
}

/// Random `f64` in `[min, max]`.
pub fn uniform_double(min: f64, max: f64) -> Result<f64, UniformError> {
    uniform_double_with(&mut SharedSource::process_default(), min, max)
}

pub fn uniform_int_with<R: Rng + ?Sized>(
    rng: &mut R,
    min: i32,
    max: i32,
) -> Result<i32, UniformError> {
    if min > max {
        return Err(UniformError::range(min, max));
    }
    Ok(rng.gen_range(min..=max))
}

pub fn uniform_float_with<R: Rng + ?Sized>(
    rng: &mut R,
    min: f32,
    max: f32,
) -> Result<f32, UniformError> {
    if !min.is_finite() || !max.is_finite() || min > max {
        return Err(UniformError::range(min, max));
    }
    if max - min <= f32::MAX / 2.0 {
        return Ok(rng.gen_range(min..=max));
    }
    // `gen_range` overflows on spans this wide; interpolate instead.
    let u: f32 = rng.gen_range(0.0..=1.0);
    Ok((min * (1.0 - u) + max * u).clamp(min, max))
}

pub fn uniform_double_with<R: Rng + ?Sized>(
    rng: &mut R,
    min: f64,
    max: f64,
) -> Result<f64, UniformError> {
    if !min.is_finite() || !max.is_finite() || min > max {
        return Err(UniformError::range(min, max));
    }
    if max - min <= f64::MAX / 2.0 {
        return Ok(rng.gen_range(min..=max));
    }
    // `gen_range` overflows on spans this wide; interpolate instead.
    let u: f64 = rng.gen_range(0.0..=1.0);
    Ok((min * (1.0 - u) + max * u).clamp(min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn int_stays_in_closed_range() {
        for (min, max) in [(0, 1), (1, 10), (-10, -1)] {
            for _ in 0..1000 {
                let chosen = uniform_int(min, max).unwrap();
                assert!(chosen >= min && chosen <= max, "{chosen} outside [{min}, {max}]");
            }
        }
    }

    #[test]
    fn int_zero_one_hits_both_ends() {
        let mut rng = StdRng::seed_from_u64(42);
        let draws: Vec<i32> = (0..200)
            .map(|_| uniform_int_with(&mut rng, 0, 1).unwrap())
            .collect();
        assert!(draws.contains(&0));
        assert!(draws.contains(&1));
        assert!(draws.iter().all(|&d| d == 0 || d == 1));
    }

    #[test]
    fn degenerate_range_returns_the_bound() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(uniform_int_with(&mut rng, 7, 7).unwrap(), 7);
        assert_eq!(uniform_double_with(&mut rng, 2.5, 2.5).unwrap(), 2.5);
    }

    #[test]
    fn float_stays_in_closed_range() {
        for (min, max) in [(0.0f32, 1.0f32), (1.0, 10.0), (-10.0, -1.0)] {
            for _ in 0..1000 {
                let chosen = uniform_float(min, max).unwrap();
                assert!(chosen >= min && chosen <= max, "{chosen} outside [{min}, {max}]");
            }
        }
    }

    #[test]
    fn double_stays_in_closed_range() {
        for (min, max) in [(0.0, 1.0), (1.0, 10.0), (-10.0, -1.0)] {
            for _ in 0..1000 {
                let chosen = uniform_double(min, max).unwrap();
                assert!(chosen >= min && chosen <= max, "{chosen} outside [{min}, {max}]");
            }
        }
    }

    #[test]
    fn inverted_ranges_are_rejected() {
        assert!(uniform_int(5, 4).is_err());
        assert!(uniform_float(1.0, 0.0).is_err());
        assert_eq!(
            uniform_double(-1.0, -10.0).unwrap_err(),
            UniformError::InvalidRange {
                min: "-1".into(),
                max: "-10".into()
            }
        );
    }

    #[test]
    fn non_finite_bounds_are_rejected() {
        assert!(uniform_double(f64::NAN, 1.0).is_err());
        assert!(uniform_double(0.0, f64::INFINITY).is_err());
        assert!(uniform_float(f32::NEG_INFINITY, 0.0).is_err());
    }

    #[test]
    fn full_double_range_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let chosen = uniform_double_with(&mut rng, -f64::MAX, f64::MAX).unwrap();
            assert!(chosen.is_finite());
        }
        let chosen = uniform_double_with(&mut rng, f64::MIN, 0.0).unwrap();
        assert!(chosen <= 0.0);
    }

    #[test]
    fn full_float_range_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..1000 {
            let chosen = uniform_float_with(&mut rng, f32::MIN, f32::MAX).unwrap();
            assert!(chosen.is_finite());
        }
    }

    #[test]
    fn seeded_values_are_reproducible() {
        let mut rng1 = StdRng::seed_from_u64(77);
        let mut rng2 = StdRng::seed_from_u64(77);
        for _ in 0..20 {
            assert_eq!(
                uniform_double_with(&mut rng1, -3.0, 3.0).unwrap(),
                uniform_double_with(&mut rng2, -3.0, 3.0).unwrap()
            );
        }
    }
}
