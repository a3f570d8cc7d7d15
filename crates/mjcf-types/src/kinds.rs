//! Keyword sets for every enumerated MJCF attribute used by the model.

use crate::choice::keywords;

keywords! {
    /// Geometric primitive types.
    pub enum GeomType {
        /// Plane, infinite for collision purposes.
        Plane => "plane",
        /// Height field.
        Hfield => "hfield",
        Sphere => "sphere",
        /// Cylinder capped with two half-spheres.
        Capsule => "capsule",
        Ellipsoid => "ellipsoid",
        Cylinder => "cylinder",
        Box => "box",
        Mesh => "mesh",
        /// Signed distance field.
        Sdf => "sdf",
    }
}

keywords! {
    /// Joint types.
    pub enum JointType {
        /// Six DOF: the body floats. Only legal directly under the worldbody.
        Free => "free",
        /// Three rotational DOF around a point.
        Ball => "ball",
        /// One translational DOF along an axis.
        Slide => "slide",
        /// One rotational DOF around an axis. MuJoCo's default.
        Hinge => "hinge",
    }
}

keywords! {
    /// Simulation integrators. Spellings are case-sensitive in MJCF.
    pub enum Integrator {
        Euler => "Euler",
        Rk4 => "RK4",
        Implicit => "implicit",
        ImplicitFast => "implicitfast",
    }
}

keywords! {
    /// Friction cone types.
    pub enum Cone {
        Pyramidal => "pyramidal",
        Elliptic => "elliptic",
    }
}

keywords! {
    /// Jacobian representations.
    pub enum Jacobian {
        Dense => "dense",
        Sparse => "sparse",
        /// Dense up to 60 DOF, sparse beyond.
        Auto => "auto",
    }
}

keywords! {
    /// Constraint solver algorithms.
    pub enum Solver {
        Pgs => "PGS",
        Cg => "CG",
        Newton => "Newton",
    }
}

keywords! {
    /// Enable/disable switch used by the option flags.
    pub enum Toggle {
        Enable => "enable",
        Disable => "disable",
    }
}

keywords! {
    /// Angle units of the model file.
    pub enum Angle {
        Radian => "radian",
        Degree => "degree",
    }
}

keywords! {
    /// Frame coordinate convention. "global" is rejected by modern
    /// compilers but still part of the schema.
    pub enum Coordinate {
        Local => "local",
        Global => "global",
    }
}

keywords! {
    /// Automatic inference of body mass/inertia from geoms.
    pub enum InertiaFromGeom {
        False => "false",
        True => "true",
        /// Infer only where an explicit inertial element is missing.
        Auto => "auto",
    }
}

keywords! {
    /// Joint/actuator limit activation.
    pub enum Limited {
        False => "false",
        True => "true",
        /// Enabled when a range is defined and the compiler has autolimits.
        Auto => "auto",
    }
}

keywords! {
    /// Body-frame/free-joint alignment for free joints.
    pub enum Align {
        False => "false",
        True => "true",
        Auto => "auto",
    }
}

keywords! {
    /// Geom-level fluid interaction model.
    pub enum FluidShape {
        None => "none",
        Ellipsoid => "ellipsoid",
    }
}

keywords! {
    /// How a camera or light follows the body it is defined in.
    pub enum TrackingMode {
        Fixed => "fixed",
        Track => "track",
        TrackCom => "trackcom",
        TargetBody => "targetbody",
        TargetBodyCom => "targetbodycom",
    }
}

keywords! {
    /// Light types. Only spot and directional are supported by the
    /// native renderer.
    pub enum LightType {
        Spot => "spot",
        Directional => "directional",
        Point => "point",
        Image => "image",
    }
}

keywords! {
    /// How mesh volume/inertia are computed when inferred from geometry.
    pub enum MeshInertia {
        Convex => "convex",
        Exact => "exact",
        Legacy => "legacy",
        Shell => "shell",
    }
}

keywords! {
    /// Texture role of a material layer.
    pub enum LayerRole {
        Rgb => "rgb",
        Normal => "normal",
        Occlusion => "occlusion",
        Roughness => "roughness",
        Metallic => "metallic",
        Opacity => "opacity",
        Emissive => "emissive",
    }
}

keywords! {
    /// Actuator classes covered by length-range computation.
    pub enum LrMode {
        None => "none",
        Muscle => "muscle",
        MuscleUser => "muscleuser",
        All => "all",
    }
}

keywords! {
    /// Shapes a site may take (the rendering-only subset of geom types).
    pub enum SiteType {
        Sphere => "sphere",
        Capsule => "capsule",
        Ellipsoid => "ellipsoid",
        Cylinder => "cylinder",
        Box => "box",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::Keyword;
    use crate::error::ValueError;

    #[test]
    fn test_round_trip_spelling() {
        assert_eq!(Integrator::Rk4.as_str(), "RK4");
        assert_eq!(Integrator::parse("integrator", "RK4").unwrap(), Integrator::Rk4);
        assert_eq!(GeomType::Capsule.as_str(), "capsule");
        assert_eq!(JointType::parse("type", "hinge").unwrap(), JointType::Hinge);
    }

    #[test]
    fn test_invalid_choice_names_field() {
        let err = GeomType::parse("type", "trapezoid").unwrap_err();
        match err {
            ValueError::InvalidChoice { field, value, expected } => {
                assert_eq!(field, "type");
                assert_eq!(value, "trapezoid");
                assert!(expected.contains(&"sphere"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_serde_uses_attribute_spelling() {
        let json = serde_json::to_string(&Integrator::ImplicitFast).unwrap();
        assert_eq!(json, "\"implicitfast\"");
        let back: Integrator = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Integrator::ImplicitFast);
    }
}
