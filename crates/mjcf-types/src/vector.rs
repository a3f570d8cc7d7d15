//! Coercion of raw numeric sequences into fixed-arity vectors.
//!
//! Callers hand over any `Vec<f64>`-convertible sequence; the checks
//! here enforce exact arity and optional per-component bounds before a
//! typed `nalgebra` vector is produced.

use crate::error::ValueError;
use crate::{Vec2, Vec3, Vec4, Vec5, Vec6};
use nalgebra::SVector;

/// Exact-arity coercion into a fixed vector.
pub fn fixed<const N: usize>(
    field: &'static str,
    raw: &[f64],
) -> Result<SVector<f64, N>, ValueError> {
    if raw.len() != N {
        return Err(ValueError::ArityMismatch {
            field,
            expected: N,
            actual: raw.len(),
        });
    }
    Ok(SVector::<f64, N>::from_column_slice(raw))
}

pub fn vec2(field: &'static str, raw: &[f64]) -> Result<Vec2, ValueError> {
    fixed::<2>(field, raw)
}

pub fn vec3(field: &'static str, raw: &[f64]) -> Result<Vec3, ValueError> {
    fixed::<3>(field, raw)
}

pub fn vec4(field: &'static str, raw: &[f64]) -> Result<Vec4, ValueError> {
    fixed::<4>(field, raw)
}

pub fn vec5(field: &'static str, raw: &[f64]) -> Result<Vec5, ValueError> {
    fixed::<5>(field, raw)
}

pub fn vec6(field: &'static str, raw: &[f64]) -> Result<Vec6, ValueError> {
    fixed::<6>(field, raw)
}

/// Fixed vector with every component inside `[lo, hi]`.
pub fn within<const N: usize>(
    field: &'static str,
    raw: &[f64],
    lo: f64,
    hi: f64,
) -> Result<SVector<f64, N>, ValueError> {
    let v = fixed::<N>(field, raw)?;
    for &c in v.iter() {
        if !(c >= lo && c <= hi) {
            return Err(ValueError::OutOfRange {
                field,
                value: c,
                bound: format!("every component must be in [{lo}, {hi}]"),
            });
        }
    }
    Ok(v)
}

/// RGBA color: four components, each in `[0, 1]`.
pub fn rgba(field: &'static str, raw: &[f64]) -> Result<Vec4, ValueError> {
    within::<4>(field, raw, 0.0, 1.0)
}

/// Fixed vector with every component non-negative.
pub fn non_negative<const N: usize>(
    field: &'static str,
    raw: &[f64],
) -> Result<SVector<f64, N>, ValueError> {
    let v = fixed::<N>(field, raw)?;
    for &c in v.iter() {
        if c < 0.0 {
            return Err(ValueError::OutOfRange {
                field,
                value: c,
                bound: "every component must be >= 0".to_string(),
            });
        }
    }
    Ok(v)
}

/// Fixed vector with every component strictly positive.
pub fn positive<const N: usize>(
    field: &'static str,
    raw: &[f64],
) -> Result<SVector<f64, N>, ValueError> {
    let v = fixed::<N>(field, raw)?;
    for &c in v.iter() {
        if c <= 0.0 {
            return Err(ValueError::OutOfRange {
                field,
                value: c,
                bound: "every component must be > 0".to_string(),
            });
        }
    }
    Ok(v)
}

/// Component check on an arbitrary-length slice (no arity constraint).
pub fn check_non_negative(field: &'static str, raw: &[f64]) -> Result<(), ValueError> {
    for &c in raw {
        if c < 0.0 {
            return Err(ValueError::OutOfRange {
                field,
                value: c,
                bound: "every component must be >= 0".to_string(),
            });
        }
    }
    Ok(())
}

/// Direction vector: exact arity, nonzero norm, normalized to unit length.
pub fn unit<const N: usize>(
    field: &'static str,
    raw: &[f64],
) -> Result<SVector<f64, N>, ValueError> {
    let v = fixed::<N>(field, raw)?;
    let norm = v.norm();
    if norm <= 1e-14 {
        return Err(ValueError::OutOfRange {
            field,
            value: norm,
            bound: "vector norm must be > 0".to_string(),
        });
    }
    Ok(v / norm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exact_arity() {
        let v = vec3("pos", &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(v, Vec3::new(1.0, 2.0, 3.0));

        let err = vec4("rgba", &[1.0, 0.0, 0.0]).unwrap_err();
        assert_eq!(
            err,
            ValueError::ArityMismatch {
                field: "rgba",
                expected: 4,
                actual: 3,
            }
        );
    }

    #[test]
    fn test_rgba_component_bounds() {
        assert!(rgba("rgba", &[0.5, 0.5, 0.5, 1.0]).is_ok());
        let err = rgba("rgba", &[0.5, 1.5, 0.5, 1.0]).unwrap_err();
        assert!(matches!(err, ValueError::OutOfRange { field: "rgba", .. }));
    }

    #[test]
    fn test_unit_normalizes() {
        let v = unit::<3>("axis", &[0.0, 0.0, 2.0]).unwrap();
        assert_relative_eq!(v.norm(), 1.0);
        assert_relative_eq!(v.z, 1.0);
        assert!(unit::<3>("axis", &[0.0, 0.0, 0.0]).is_err());
    }
}
