//! Element-level validation errors.
//!
//! Builders validate every supplied field and report all violations of
//! one construction call together, so a caller fixing a model sees the
//! full list at once instead of one error per attempt.

use mjcf_types::ValueError;
use thiserror::Error;

/// A single problem found while building an element.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    /// A field value failed its constraint.
    #[error(transparent)]
    Value(#[from] ValueError),

    /// A child element of a kind the parent does not accept.
    #[error("<{child}> is not a permitted child of <{parent}>")]
    InvalidChildType {
        parent: &'static str,
        child: &'static str,
    },
}

/// Everything that went wrong in one element construction call.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid <{tag}> element: {}", summarize(.violations))]
pub struct ElementError {
    /// Tag of the element that failed to build.
    pub tag: &'static str,
    /// Each violation, in the order the fields were checked.
    pub violations: Vec<Violation>,
}

impl ElementError {
    /// True if any violation concerns the given field.
    pub fn names_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| match v {
            Violation::Value(e) => e.field() == field,
            Violation::InvalidChildType { child, .. } => *child == field,
        })
    }
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Collector used inside builders: checks accumulate, `finish` either
/// passes or yields the aggregate error.
#[derive(Debug)]
pub(crate) struct Violations {
    tag: &'static str,
    list: Vec<Violation>,
}

impl Violations {
    pub fn new(tag: &'static str) -> Self {
        Violations {
            tag,
            list: Vec::new(),
        }
    }

    /// Record the error of a failed check, passing the value through
    /// otherwise.
    pub fn check<T>(&mut self, result: Result<T, ValueError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.list.push(Violation::Value(e));
                None
            }
        }
    }

    /// Same as [`check`](Self::check) for a field that may be absent.
    pub fn check_opt<T>(&mut self, result: Option<Result<T, ValueError>>) -> Option<T> {
        result.and_then(|r| self.check(r))
    }

    pub fn reject_child(&mut self, parent: &'static str, child: &'static str) {
        self.list.push(Violation::InvalidChildType { parent, child });
    }

    pub fn finish(self) -> Result<(), ElementError> {
        if self.list.is_empty() {
            Ok(())
        } else {
            Err(ElementError {
                tag: self.tag,
                violations: self.list,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_aggregates() {
        let mut v = Violations::new("geom");
        let ok = v.check(Ok::<_, ValueError>(1.0));
        assert_eq!(ok, Some(1.0));
        v.check::<f64>(Err(ValueError::OutOfRange {
            field: "mass",
            value: -1.0,
            bound: "must be >= 0".to_string(),
        }));
        v.reject_child("worldbody", "joint");
        let err = v.finish().unwrap_err();
        assert_eq!(err.tag, "geom");
        assert_eq!(err.violations.len(), 2);
        assert!(err.names_field("mass"));
        assert!(err.names_field("joint"));
        assert!(!err.names_field("pos"));
    }

    #[test]
    fn test_empty_collector_passes() {
        assert!(Violations::new("geom").finish().is_ok());
    }

    #[test]
    fn test_display_lists_every_field() {
        let err = ElementError {
            tag: "material",
            violations: vec![
                Violation::Value(ValueError::OutOfRange {
                    field: "specular",
                    value: 2.0,
                    bound: "must be in [0, 1]".to_string(),
                }),
                Violation::Value(ValueError::ArityMismatch {
                    field: "rgba",
                    expected: 4,
                    actual: 3,
                }),
            ],
        };
        let text = err.to_string();
        assert!(text.contains("specular"));
        assert!(text.contains("rgba"));
    }
}
