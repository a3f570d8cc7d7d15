//! Bounded-scalar checks.
//!
//! Each check either returns the value unchanged or fails with
//! [`ValueError::OutOfRange`] naming the field and the violated bound.

use crate::error::ValueError;

/// Value within the inclusive range `[lo, hi]`.
pub fn within(field: &'static str, value: f64, lo: f64, hi: f64) -> Result<f64, ValueError> {
    if value >= lo && value <= hi {
        Ok(value)
    } else {
        Err(ValueError::OutOfRange {
            field,
            value,
            bound: format!("must be in [{lo}, {hi}]"),
        })
    }
}

/// Value in the unit interval `[0, 1]`.
pub fn unit(field: &'static str, value: f64) -> Result<f64, ValueError> {
    within(field, value, 0.0, 1.0)
}

/// Value greater than or equal to `lo`.
pub fn at_least(field: &'static str, value: f64, lo: f64) -> Result<f64, ValueError> {
    if value >= lo {
        Ok(value)
    } else {
        Err(ValueError::OutOfRange {
            field,
            value,
            bound: format!("must be >= {lo}"),
        })
    }
}

/// Non-negative value.
pub fn non_negative(field: &'static str, value: f64) -> Result<f64, ValueError> {
    at_least(field, value, 0.0)
}

/// Strictly positive value (exclusive lower bound).
pub fn positive(field: &'static str, value: f64) -> Result<f64, ValueError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ValueError::OutOfRange {
            field,
            value,
            bound: "must be > 0".to_string(),
        })
    }
}

/// Finite (not NaN or infinite) value.
pub fn finite(field: &'static str, value: f64) -> Result<f64, ValueError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValueError::OutOfRange {
            field,
            value,
            bound: "must be finite".to_string(),
        })
    }
}

/// Integer within the inclusive range `[lo, hi]`.
pub fn int_within(field: &'static str, value: i64, lo: i64, hi: i64) -> Result<i64, ValueError> {
    if value >= lo && value <= hi {
        Ok(value)
    } else {
        Err(ValueError::OutOfRange {
            field,
            value: value as f64,
            bound: format!("must be in [{lo}, {hi}]"),
        })
    }
}

/// Integer greater than or equal to `lo`.
pub fn int_at_least(field: &'static str, value: i64, lo: i64) -> Result<i64, ValueError> {
    if value >= lo {
        Ok(value)
    } else {
        Err(ValueError::OutOfRange {
            field,
            value: value as f64,
            bound: format!("must be >= {lo}"),
        })
    }
}

/// Group index as used by geoms, sites and actuator groups.
pub fn group(field: &'static str, value: i64) -> Result<i64, ValueError> {
    int_within(field, value, 0, 30)
}

/// Contact dimensionality: one of 1, 3, 4 or 6.
pub fn condim(field: &'static str, value: i64) -> Result<i64, ValueError> {
    match value {
        1 | 3 | 4 | 6 => Ok(value),
        _ => Err(ValueError::InvalidChoice {
            field,
            value: value.to_string(),
            expected: &["1", "3", "4", "6"],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_bounds() {
        assert_eq!(unit("specular", 0.5).unwrap(), 0.5);
        assert_eq!(unit("specular", 0.0).unwrap(), 0.0);
        assert_eq!(unit("specular", 1.0).unwrap(), 1.0);
        let err = unit("specular", 1.5).unwrap_err();
        assert!(matches!(
            err,
            ValueError::OutOfRange {
                field: "specular",
                ..
            }
        ));
    }

    #[test]
    fn test_positive_excludes_zero() {
        assert!(positive("extent", 0.0).is_err());
        assert!(positive("extent", 1e-9).is_ok());
    }

    #[test]
    fn test_finite() {
        assert!(finite("mass", f64::NAN).is_err());
        assert!(finite("mass", f64::INFINITY).is_err());
        assert!(finite("mass", 2.5).is_ok());
    }

    #[test]
    fn test_group_range() {
        assert!(group("group", 0).is_ok());
        assert!(group("group", 30).is_ok());
        assert!(group("group", 31).is_err());
        assert!(group("group", -1).is_err());
    }

    #[test]
    fn test_condim_choices() {
        assert!(condim("condim", 3).is_ok());
        let err = condim("condim", 2).unwrap_err();
        assert!(matches!(err, ValueError::InvalidChoice { field: "condim", .. }));
    }
}
