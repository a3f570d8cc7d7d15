//! Frame orientations.
//!
//! MJCF lets a spatial frame be oriented through one of five alternative
//! attributes (`quat`, `axisangle`, `euler`, `xyaxes`, `zaxis`). At most
//! one may be present on an element, so the alternatives form a tagged
//! union; whichever is chosen can be converted to a unit quaternion,
//! which is what the compiler stores internally.
//!
//! Angles are interpreted in radians here; degree/radian handling is a
//! compiler-level concern.

use crate::error::ValueError;
use crate::{Vec3, Vec4, Vec6};
use nalgebra::{Matrix3, Rotation3, Unit, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Euler rotation sequence: exactly three characters from `xyzXYZ`.
///
/// Lowercase letters are extrinsic rotations (fixed axes), uppercase are
/// intrinsic (axes of the rotating frame).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EulerSeq(String);

impl EulerSeq {
    pub fn new(field: &'static str, raw: impl Into<String>) -> Result<Self, ValueError> {
        let raw = raw.into();
        if raw.len() == 3 && raw.chars().all(|c| "xyzXYZ".contains(c)) {
            Ok(EulerSeq(raw))
        } else {
            Err(ValueError::InvalidIdentifier {
                field,
                value: raw,
                reason: "must be three characters from [xyzXYZ]",
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EulerSeq {
    fn default() -> Self {
        EulerSeq("xyz".to_string())
    }
}

impl TryFrom<String> for EulerSeq {
    type Error = ValueError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        EulerSeq::new("eulerseq", raw)
    }
}

impl From<EulerSeq> for String {
    fn from(seq: EulerSeq) -> String {
        seq.0
    }
}

impl std::fmt::Display for EulerSeq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One of the five alternative frame-orientation specifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Orientation {
    /// Unit quaternion in (w, x, y, z) order, MuJoCo's convention.
    Quat { quat: Vec4 },
    /// Rotation axis (x, y, z) followed by the angle.
    AxisAngle { axisangle: Vec4 },
    /// Rotation angles applied along an euler sequence.
    Euler { euler: Vec3 },
    /// X axis then Y axis of the frame; Z is their cross product.
    XYAxes { xyaxes: Vec6 },
    /// Z axis of the frame; the minimal rotation from +Z is used.
    ZAxis { zaxis: Vec3 },
}

impl Orientation {
    /// Quaternion orientation. The value is kept as given but must have
    /// nonzero norm (it is normalized during conversion).
    pub fn quat(raw: impl Into<Vec<f64>>) -> Result<Self, ValueError> {
        let raw = raw.into();
        let quat = crate::vector::vec4("quat", &raw)?;
        if quat.norm() <= 1e-14 {
            return Err(ValueError::OutOfRange {
                field: "quat",
                value: quat.norm(),
                bound: "quaternion norm must be > 0".to_string(),
            });
        }
        Ok(Orientation::Quat { quat })
    }

    /// Axis-angle orientation, `[x, y, z, angle]` with a nonzero axis.
    pub fn axis_angle(raw: impl Into<Vec<f64>>) -> Result<Self, ValueError> {
        let raw = raw.into();
        let axisangle = crate::vector::vec4("axisangle", &raw)?;
        if axisangle.fixed_rows::<3>(0).norm() <= 1e-14 {
            return Err(ValueError::OutOfRange {
                field: "axisangle",
                value: 0.0,
                bound: "rotation axis must have nonzero length".to_string(),
            });
        }
        Ok(Orientation::AxisAngle { axisangle })
    }

    /// Euler-angle orientation.
    pub fn euler(raw: impl Into<Vec<f64>>) -> Result<Self, ValueError> {
        let raw = raw.into();
        Ok(Orientation::Euler {
            euler: crate::vector::vec3("euler", &raw)?,
        })
    }

    /// XY-axes orientation, `[x1 x2 x3 y1 y2 y3]`. The X axis must be
    /// nonzero and Y must not be parallel to it.
    pub fn xyaxes(raw: impl Into<Vec<f64>>) -> Result<Self, ValueError> {
        let raw = raw.into();
        let xyaxes = crate::vector::vec6("xyaxes", &raw)?;
        let x = Vector3::new(xyaxes[0], xyaxes[1], xyaxes[2]);
        let y = Vector3::new(xyaxes[3], xyaxes[4], xyaxes[5]);
        if x.norm() <= 1e-14 {
            return Err(ValueError::OutOfRange {
                field: "xyaxes",
                value: x.norm(),
                bound: "x axis must have nonzero length".to_string(),
            });
        }
        let xn = x / x.norm();
        let y_ortho = y - y.dot(&xn) * xn;
        if y_ortho.norm() <= 1e-14 {
            return Err(ValueError::OutOfRange {
                field: "xyaxes",
                value: y_ortho.norm(),
                bound: "y axis must be independent of the x axis".to_string(),
            });
        }
        Ok(Orientation::XYAxes { xyaxes })
    }

    /// Z-axis orientation with a nonzero direction.
    pub fn zaxis(raw: impl Into<Vec<f64>>) -> Result<Self, ValueError> {
        let raw = raw.into();
        let zaxis = crate::vector::vec3("zaxis", &raw)?;
        if zaxis.norm() <= 1e-14 {
            return Err(ValueError::OutOfRange {
                field: "zaxis",
                value: zaxis.norm(),
                bound: "z axis must have nonzero length".to_string(),
            });
        }
        Ok(Orientation::ZAxis { zaxis })
    }

    /// The MJCF attribute this alternative renders as.
    pub fn attr_name(&self) -> &'static str {
        match self {
            Orientation::Quat { .. } => "quat",
            Orientation::AxisAngle { .. } => "axisangle",
            Orientation::Euler { .. } => "euler",
            Orientation::XYAxes { .. } => "xyaxes",
            Orientation::ZAxis { .. } => "zaxis",
        }
    }

    /// Attribute components in declaration order.
    pub fn components(&self) -> Vec<f64> {
        match self {
            Orientation::Quat { quat } => quat.iter().copied().collect(),
            Orientation::AxisAngle { axisangle } => axisangle.iter().copied().collect(),
            Orientation::Euler { euler } => euler.iter().copied().collect(),
            Orientation::XYAxes { xyaxes } => xyaxes.iter().copied().collect(),
            Orientation::ZAxis { zaxis } => zaxis.iter().copied().collect(),
        }
    }

    /// Convert to a unit quaternion in (w, x, y, z) order.
    pub fn to_quat(&self, eulerseq: &EulerSeq) -> Vec4 {
        let q = match self {
            Orientation::Quat { quat } => {
                let q = nalgebra::Quaternion::new(quat[0], quat[1], quat[2], quat[3]);
                UnitQuaternion::from_quaternion(q)
            }
            Orientation::AxisAngle { axisangle } => {
                let axis = Vector3::new(axisangle[0], axisangle[1], axisangle[2]);
                UnitQuaternion::from_axis_angle(&Unit::new_normalize(axis), axisangle[3])
            }
            Orientation::Euler { euler } => {
                let mut q = UnitQuaternion::identity();
                for (ch, &angle) in eulerseq.as_str().chars().zip(euler.iter()) {
                    let axis = match ch.to_ascii_lowercase() {
                        'x' => Vector3::x_axis(),
                        'y' => Vector3::y_axis(),
                        _ => Vector3::z_axis(),
                    };
                    let r = UnitQuaternion::from_axis_angle(&axis, angle);
                    // lowercase: extrinsic (fixed axes), uppercase: intrinsic
                    q = if ch.is_ascii_lowercase() { r * q } else { q * r };
                }
                q
            }
            Orientation::XYAxes { xyaxes } => {
                let x = Vector3::new(xyaxes[0], xyaxes[1], xyaxes[2]).normalize();
                let y_raw = Vector3::new(xyaxes[3], xyaxes[4], xyaxes[5]);
                let y = (y_raw - y_raw.dot(&x) * x).normalize();
                let z = x.cross(&y);
                let m = Matrix3::from_columns(&[x, y, z]);
                UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(m))
            }
            Orientation::ZAxis { zaxis } => {
                let z = zaxis.normalize();
                match UnitQuaternion::rotation_between(&Vector3::z(), &z) {
                    Some(q) => q,
                    // antiparallel: half turn about X
                    None => UnitQuaternion::from_axis_angle(
                        &Vector3::x_axis(),
                        std::f64::consts::PI,
                    ),
                }
            }
        };
        Vec4::new(q.w, q.i, q.j, q.k)
    }
}

impl Default for Orientation {
    /// The null rotation, matching the schema default `quat="1 0 0 0"`.
    fn default() -> Self {
        Orientation::Quat {
            quat: Vec4::new(1.0, 0.0, 0.0, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn assert_quat_eq(a: &Vec4, b: &Vec4) {
        // q and -q are the same rotation
        let sign = if a.dot(b) < 0.0 { -1.0 } else { 1.0 };
        for i in 0..4 {
            assert_relative_eq!(a[i], sign * b[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_default_is_null_rotation() {
        let q = Orientation::default().to_quat(&EulerSeq::default());
        assert_quat_eq(&q, &Vec4::new(1.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_axis_angle_matches_quat() {
        let aa = Orientation::axis_angle([0.0, 0.0, 1.0, FRAC_PI_2]).unwrap();
        let expected = Vec4::new(
            (FRAC_PI_2 / 2.0).cos(),
            0.0,
            0.0,
            (FRAC_PI_2 / 2.0).sin(),
        );
        assert_quat_eq(&aa.to_quat(&EulerSeq::default()), &expected);
    }

    #[test]
    fn test_euler_single_axis() {
        let e = Orientation::euler([0.0, 0.0, FRAC_PI_2]).unwrap();
        let aa = Orientation::axis_angle([0.0, 0.0, 1.0, FRAC_PI_2]).unwrap();
        let seq = EulerSeq::default();
        assert_quat_eq(&e.to_quat(&seq), &aa.to_quat(&seq));
    }

    #[test]
    fn test_zaxis_rotates_z_to_target() {
        let target = Vector3::new(1.0, 0.0, 1.0).normalize();
        let o = Orientation::zaxis([1.0, 0.0, 1.0]).unwrap();
        let q = o.to_quat(&EulerSeq::default());
        let uq = UnitQuaternion::from_quaternion(nalgebra::Quaternion::new(q[0], q[1], q[2], q[3]));
        let rotated = uq * Vector3::z();
        assert_relative_eq!(rotated.x, target.x, epsilon = 1e-12);
        assert_relative_eq!(rotated.y, target.y, epsilon = 1e-12);
        assert_relative_eq!(rotated.z, target.z, epsilon = 1e-12);
    }

    #[test]
    fn test_xyaxes_orthonormalized() {
        // y deliberately not orthogonal to x
        let o = Orientation::xyaxes([1.0, 0.0, 0.0, 1.0, 1.0, 0.0]).unwrap();
        let q = o.to_quat(&EulerSeq::default());
        // result must still be the identity-free rotation mapping x->x, y->y
        let uq = UnitQuaternion::from_quaternion(nalgebra::Quaternion::new(q[0], q[1], q[2], q[3]));
        let x = uq * Vector3::x();
        assert_relative_eq!(x.x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_inputs_rejected() {
        assert!(Orientation::quat([0.0, 0.0, 0.0, 0.0]).is_err());
        assert!(Orientation::axis_angle([0.0, 0.0, 0.0, 1.0]).is_err());
        assert!(Orientation::zaxis([0.0, 0.0, 0.0]).is_err());
        assert!(Orientation::xyaxes([1.0, 0.0, 0.0, 2.0, 0.0, 0.0]).is_err());
        // wrong arity propagates as ArityMismatch
        assert!(matches!(
            Orientation::quat([1.0, 0.0, 0.0]),
            Err(ValueError::ArityMismatch {
                field: "quat",
                expected: 4,
                actual: 3,
            })
        ));
    }

    #[test]
    fn test_eulerseq_validation() {
        assert!(EulerSeq::new("eulerseq", "xyz").is_ok());
        assert!(EulerSeq::new("eulerseq", "ZXZ").is_ok());
        assert!(EulerSeq::new("eulerseq", "xy").is_err());
        assert!(EulerSeq::new("eulerseq", "abc").is_err());
    }

    #[test]
    fn test_serde_tagged_union() {
        let o = Orientation::quat([1.0, 2.0, 3.0, 4.0]).unwrap();
        let json = serde_json::to_string(&o).unwrap();
        assert!(json.contains("\"type\":\"quat\""), "missing tag: {json}");
        let back: Orientation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, o);
    }
}
