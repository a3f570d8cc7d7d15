//! Attribute values and their textual encoding.

use mjcf_types::{Keyword, Name, Orientation};
use nalgebra::SVector;

/// A validated attribute value ready for encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Keyword(&'static str),
    /// Numeric vector, rendered space-separated.
    Vector(Vec<f64>),
    /// Integer vector, rendered space-separated.
    IntVector(Vec<i64>),
}

impl AttrValue {
    /// Locale-independent text form. Floats use Rust's shortest
    /// round-trip decimal representation, so `1.0` renders as `1` and
    /// `0.005` stays `0.005` on every platform.
    pub fn encode(&self) -> String {
        match self {
            AttrValue::Bool(b) => b.to_string(),
            AttrValue::Int(i) => i.to_string(),
            AttrValue::Float(v) => fmt_float(*v),
            AttrValue::Str(s) => s.clone(),
            AttrValue::Keyword(k) => (*k).to_string(),
            AttrValue::Vector(v) => v
                .iter()
                .map(|c| fmt_float(*c))
                .collect::<Vec<_>>()
                .join(" "),
            AttrValue::IntVector(v) => v
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

fn fmt_float(v: f64) -> String {
    format!("{v}")
}

/// One attribute slot of an element: the declared name, the explicitly
/// supplied value (if any) and the declared schema default (if any).
///
/// Explicitness is a stored fact, not recovered by comparing against the
/// default: a caller who explicitly sets a value equal to the default
/// still gets it rendered under `exclude_defaults`.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub name: &'static str,
    pub value: Option<AttrValue>,
    pub default: Option<AttrValue>,
}

impl Attr {
    /// The text to emit for this attribute, or `None` to omit it.
    pub fn resolve(&self, exclude_defaults: bool) -> Option<String> {
        match (&self.value, &self.default) {
            (Some(v), _) => Some(v.encode()),
            (None, Some(d)) if !exclude_defaults => Some(d.encode()),
            _ => None,
        }
    }

    fn new(name: &'static str, value: Option<AttrValue>, default: Option<AttrValue>) -> Attr {
        Attr {
            name,
            value,
            default,
        }
    }

    pub fn string(name: &'static str, value: Option<&str>) -> Attr {
        Attr::new(name, value.map(|s| AttrValue::Str(s.to_string())), None)
    }

    pub fn string_def(name: &'static str, value: Option<&str>, default: &str) -> Attr {
        Attr::new(
            name,
            value.map(|s| AttrValue::Str(s.to_string())),
            Some(AttrValue::Str(default.to_string())),
        )
    }

    pub fn ident(name: &'static str, value: Option<&Name>) -> Attr {
        Attr::string(name, value.map(Name::as_str))
    }

    pub fn float(name: &'static str, value: Option<f64>) -> Attr {
        Attr::new(name, value.map(AttrValue::Float), None)
    }

    pub fn float_def(name: &'static str, value: Option<f64>, default: f64) -> Attr {
        Attr::new(
            name,
            value.map(AttrValue::Float),
            Some(AttrValue::Float(default)),
        )
    }

    pub fn int(name: &'static str, value: Option<i64>) -> Attr {
        Attr::new(name, value.map(AttrValue::Int), None)
    }

    pub fn int_def(name: &'static str, value: Option<i64>, default: i64) -> Attr {
        Attr::new(name, value.map(AttrValue::Int), Some(AttrValue::Int(default)))
    }

    pub fn boolean(name: &'static str, value: Option<bool>) -> Attr {
        Attr::new(name, value.map(AttrValue::Bool), None)
    }

    pub fn boolean_def(name: &'static str, value: Option<bool>, default: bool) -> Attr {
        Attr::new(
            name,
            value.map(AttrValue::Bool),
            Some(AttrValue::Bool(default)),
        )
    }

    pub fn keyword<K: Keyword>(name: &'static str, value: Option<K>) -> Attr {
        Attr::new(name, value.map(|k| AttrValue::Keyword(k.as_str())), None)
    }

    pub fn keyword_def<K: Keyword>(name: &'static str, value: Option<K>, default: K) -> Attr {
        Attr::new(
            name,
            value.map(|k| AttrValue::Keyword(k.as_str())),
            Some(AttrValue::Keyword(default.as_str())),
        )
    }

    pub fn vector<V: VectorAttr>(name: &'static str, value: Option<&V>) -> Attr {
        Attr::new(name, value.map(|v| AttrValue::Vector(v.components())), None)
    }

    pub fn vector_def<V: VectorAttr>(
        name: &'static str,
        value: Option<&V>,
        default: &[f64],
    ) -> Attr {
        Attr::new(
            name,
            value.map(|v| AttrValue::Vector(v.components())),
            Some(AttrValue::Vector(default.to_vec())),
        )
    }

    pub fn int_vector(name: &'static str, value: Option<&[i64]>) -> Attr {
        Attr::new(
            name,
            value.map(|v| AttrValue::IntVector(v.to_vec())),
            None,
        )
    }

    pub fn int_vector_def(
        name: &'static str,
        value: Option<&[i64]>,
        default: &[i64],
    ) -> Attr {
        Attr::new(
            name,
            value.map(|v| AttrValue::IntVector(v.to_vec())),
            Some(AttrValue::IntVector(default.to_vec())),
        )
    }

    /// Orientation renders as whichever alternative attribute was chosen
    /// (`quat`, `axisangle`, ...); absent orientations render nothing.
    pub fn orientation(value: Option<&Orientation>) -> Attr {
        match value {
            Some(o) => Attr::new(o.attr_name(), Some(AttrValue::Vector(o.components())), None),
            None => Attr::new("quat", None, None),
        }
    }

    /// Orientation with the schema default quaternion (the null rotation
    /// unless an element declares otherwise).
    pub fn orientation_def(value: Option<&Orientation>, default: &[f64]) -> Attr {
        match value {
            Some(o) => Attr::new(
                o.attr_name(),
                Some(AttrValue::Vector(o.components())),
                Some(AttrValue::Vector(default.to_vec())),
            ),
            None => Attr::new("quat", None, Some(AttrValue::Vector(default.to_vec()))),
        }
    }
}

/// Anything that can supply its components to a vector attribute.
pub trait VectorAttr {
    fn components(&self) -> Vec<f64>;
}

impl<const N: usize> VectorAttr for SVector<f64, N> {
    fn components(&self) -> Vec<f64> {
        self.as_slice().to_vec()
    }
}

impl VectorAttr for mjcf_types::DVec {
    fn components(&self) -> Vec<f64> {
        self.as_slice().to_vec()
    }
}

impl VectorAttr for Vec<f64> {
    fn components(&self) -> Vec<f64> {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mjcf_types::{Integrator, Vec3};

    #[test]
    fn test_float_encoding() {
        assert_eq!(AttrValue::Float(1.0).encode(), "1");
        assert_eq!(AttrValue::Float(0.005).encode(), "0.005");
        assert_eq!(AttrValue::Float(-9.81).encode(), "-9.81");
    }

    #[test]
    fn test_vector_encoding_space_separated() {
        let v = Vec3::new(0.0, 0.0, -9.81);
        let attr = Attr::vector("gravity", Some(&v));
        assert_eq!(attr.resolve(true).unwrap(), "0 0 -9.81");
    }

    #[test]
    fn test_resolve_explicit_always_wins() {
        let attr = Attr::float_def("fovy", Some(45.0), 45.0);
        // explicitly supplied value equal to the default still renders
        assert_eq!(attr.resolve(true).unwrap(), "45");
        assert_eq!(attr.resolve(false).unwrap(), "45");
    }

    #[test]
    fn test_resolve_default_only_when_included() {
        let attr = Attr::float_def("fovy", None, 45.0);
        assert_eq!(attr.resolve(true), None);
        assert_eq!(attr.resolve(false).unwrap(), "45");
    }

    #[test]
    fn test_resolve_no_default_no_value() {
        let attr = Attr::float("mass", None);
        assert_eq!(attr.resolve(true), None);
        assert_eq!(attr.resolve(false), None);
    }

    #[test]
    fn test_keyword_attr() {
        let attr = Attr::keyword_def("integrator", Some(Integrator::Rk4), Integrator::Euler);
        assert_eq!(attr.resolve(true).unwrap(), "RK4");
        let attr = Attr::keyword_def("integrator", None::<Integrator>, Integrator::Euler);
        assert_eq!(attr.resolve(false).unwrap(), "Euler");
    }
}
