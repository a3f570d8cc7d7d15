//! Validated value types for MJCF model construction.
//!
//! This is the field-constraint layer shared by every element kind:
//! identifiers, bounded scalars, fixed-arity numeric vectors, keyword
//! choices and frame orientations. A value of one of these types has
//! already passed its predicate; invalid values are rejected at
//! construction with a [`ValueError`] naming the offending field.

pub mod error;
pub mod kinds;
pub mod name;
pub mod orientation;
pub mod scalar;
pub mod vector;

mod choice;

pub use choice::Keyword;
pub use error::ValueError;
pub use kinds::{
    Align, Angle, Cone, Coordinate, FluidShape, GeomType, InertiaFromGeom, Integrator, Jacobian,
    JointType, LayerRole, LightType, Limited, LrMode, MeshInertia, SiteType, Solver, Toggle,
    TrackingMode,
};
pub use name::Name;
pub use orientation::{EulerSeq, Orientation};

use nalgebra as na;

/// 2-element numeric vector.
pub type Vec2 = na::Vector2<f64>;
/// 3-element numeric vector, typically a position or direction.
pub type Vec3 = na::Vector3<f64>;
/// 4-element numeric vector, typically an RGBA color or quaternion.
pub type Vec4 = na::Vector4<f64>;
/// 5-element numeric vector (solimp parameters).
pub type Vec5 = na::Vector5<f64>;
/// 6-element numeric vector (fromto segments, full inertia).
pub type Vec6 = na::Vector6<f64>;
/// Numeric vector of arbitrary length.
pub type DVec = na::DVector<f64>;
/// 3x3 matrix.
pub type Mat3 = na::Matrix3<f64>;

pub type Result<T> = std::result::Result<T, ValueError>;

/// Standard gravity (m/s²).
pub const GRAVITY: f64 = 9.81;
