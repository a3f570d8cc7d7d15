//! Bodies and the kinematic tree.
//!
//! A body exclusively owns its children; the tree is built leaves-first
//! and every element is validated before it can be attached anywhere.

use crate::attr::Attr;
use crate::camera::Camera;
use crate::element::Element;
use crate::error::{ElementError, Violations};
use crate::geom::Geom;
use crate::joint::{FreeJoint, Joint};
use crate::light::Light;
use crate::site::Site;
use mjcf_types::{scalar, vector, DVec, Mat3, Name, Orientation, ValueError, Vec3, Vec6};
use serde::{Deserialize, Serialize};

/// Anything a body may contain besides its inertial element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BodyChild {
    Joint(Joint),
    FreeJoint(FreeJoint),
    Geom(Geom),
    Site(Site),
    Camera(Camera),
    Light(Light),
    Body(Body),
}

impl BodyChild {
    fn kind(&self) -> &'static str {
        match self {
            BodyChild::Joint(_) => "joint",
            BodyChild::FreeJoint(_) => "freejoint",
            BodyChild::Geom(_) => "geom",
            BodyChild::Site(_) => "site",
            BodyChild::Camera(_) => "camera",
            BodyChild::Light(_) => "light",
            BodyChild::Body(_) => "body",
        }
    }

    fn as_element(&self) -> &dyn Element {
        match self {
            BodyChild::Joint(e) => e,
            BodyChild::FreeJoint(e) => e,
            BodyChild::Geom(e) => e,
            BodyChild::Site(e) => e,
            BodyChild::Camera(e) => e,
            BodyChild::Light(e) => e,
            BodyChild::Body(e) => e,
        }
    }

    fn is_free_joint(&self) -> bool {
        match self {
            BodyChild::FreeJoint(_) => true,
            BodyChild::Joint(j) => j.is_free(),
            _ => false,
        }
    }

    fn is_joint(&self) -> bool {
        matches!(self, BodyChild::Joint(_) | BodyChild::FreeJoint(_))
    }
}

impl From<Joint> for BodyChild {
    fn from(e: Joint) -> Self {
        BodyChild::Joint(e)
    }
}

impl From<FreeJoint> for BodyChild {
    fn from(e: FreeJoint) -> Self {
        BodyChild::FreeJoint(e)
    }
}

impl From<Geom> for BodyChild {
    fn from(e: Geom) -> Self {
        BodyChild::Geom(e)
    }
}

impl From<Site> for BodyChild {
    fn from(e: Site) -> Self {
        BodyChild::Site(e)
    }
}

impl From<Camera> for BodyChild {
    fn from(e: Camera) -> Self {
        BodyChild::Camera(e)
    }
}

impl From<Light> for BodyChild {
    fn from(e: Light) -> Self {
        BodyChild::Light(e)
    }
}

impl From<Body> for BodyChild {
    fn from(e: Body) -> Self {
        BodyChild::Body(e)
    }
}

/// A body in the kinematic tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    name: Option<Name>,
    childclass: Option<Name>,
    pos: Option<Vec3>,
    orientation: Option<Orientation>,
    gravcomp: Option<f64>,
    mocap: Option<bool>,
    user: Option<DVec>,
    inertial: Option<Inertial>,
    children: Vec<BodyChild>,
}

impl Body {
    pub fn builder() -> BodyBuilder {
        BodyBuilder::default()
    }

    pub fn name(&self) -> Option<&Name> {
        self.name.as_ref()
    }

    pub fn inertial(&self) -> Option<&Inertial> {
        self.inertial.as_ref()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// True if any direct child is a free joint.
    pub fn has_free_joint(&self) -> bool {
        self.children.iter().any(BodyChild::is_free_joint)
    }
}

#[derive(Debug, Clone, Default)]
pub struct BodyBuilder {
    name: Option<String>,
    childclass: Option<String>,
    pos: Option<Vec<f64>>,
    orientation: Option<Orientation>,
    gravcomp: Option<f64>,
    mocap: Option<bool>,
    user: Option<Vec<f64>>,
    inertial: Option<Inertial>,
    children: Vec<BodyChild>,
}

impl BodyBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn childclass(mut self, childclass: impl Into<String>) -> Self {
        self.childclass = Some(childclass.into());
        self
    }

    pub fn pos(mut self, pos: impl Into<Vec<f64>>) -> Self {
        self.pos = Some(pos.into());
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn gravcomp(mut self, gravcomp: f64) -> Self {
        self.gravcomp = Some(gravcomp);
        self
    }

    pub fn mocap(mut self, mocap: bool) -> Self {
        self.mocap = Some(mocap);
        self
    }

    pub fn user(mut self, user: impl Into<Vec<f64>>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn inertial(mut self, inertial: Inertial) -> Self {
        self.inertial = Some(inertial);
        self
    }

    /// Append any permitted child, preserving insertion order.
    pub fn child(mut self, child: impl Into<BodyChild>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn joint(self, joint: Joint) -> Self {
        self.child(joint)
    }

    pub fn freejoint(self, freejoint: FreeJoint) -> Self {
        self.child(freejoint)
    }

    pub fn geom(self, geom: Geom) -> Self {
        self.child(geom)
    }

    pub fn site(self, site: Site) -> Self {
        self.child(site)
    }

    pub fn camera(self, camera: Camera) -> Self {
        self.child(camera)
    }

    pub fn light(self, light: Light) -> Self {
        self.child(light)
    }

    pub fn body(self, body: Body) -> Self {
        self.child(body)
    }

    pub fn build(self) -> Result<Body, ElementError> {
        let mut v = Violations::new("body");

        let name = v.check_opt(self.name.map(|s| Name::new("name", s)));
        let childclass = v.check_opt(self.childclass.map(|s| Name::new("childclass", s)));
        let pos = v.check_opt(self.pos.as_deref().map(|r| vector::vec3("pos", r)));
        let gravcomp = v.check_opt(self.gravcomp.map(|x| scalar::non_negative("gravcomp", x)));

        // A free joint excludes every other joint in the same body.
        let free_joints = self
            .children
            .iter()
            .filter(|c| c.is_free_joint())
            .count();
        let joints = self.children.iter().filter(|c| c.is_joint()).count();
        if free_joints >= 1 && joints > 1 {
            v.reject_child("body", "joint");
        }

        // Free joints are only legal in bodies directly under the
        // worldbody, which a nested child body is not.
        for child in &self.children {
            if let BodyChild::Body(b) = child {
                if b.has_free_joint() {
                    v.reject_child("body", "freejoint");
                }
            }
        }

        v.finish()?;
        Ok(Body {
            name,
            childclass,
            pos,
            orientation: self.orientation,
            gravcomp,
            mocap: self.mocap,
            user: self.user.map(DVec::from_vec),
            inertial: self.inertial,
            children: self.children,
        })
    }
}

impl Element for Body {
    fn tag(&self) -> &'static str {
        "body"
    }

    fn attrs(&self) -> Vec<Attr> {
        vec![
            Attr::ident("name", self.name.as_ref()),
            Attr::ident("childclass", self.childclass.as_ref()),
            Attr::vector_def("pos", self.pos.as_ref(), &[0.0, 0.0, 0.0]),
            Attr::orientation_def(self.orientation.as_ref(), &[1.0, 0.0, 0.0, 0.0]),
            Attr::float_def("gravcomp", self.gravcomp, 0.0),
            Attr::boolean_def("mocap", self.mocap, false),
            Attr::vector("user", self.user.as_ref()),
        ]
    }

    fn children(&self) -> Vec<&dyn Element> {
        let inertial = self.inertial.iter().map(|i| i as &dyn Element);
        inertial
            .chain(self.children.iter().map(BodyChild::as_element))
            .collect()
    }
}

/// The root of the kinematic tree. Takes no attributes, no inertial and
/// no joints: the world does not move.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Worldbody {
    children: Vec<BodyChild>,
}

impl Worldbody {
    pub fn builder() -> WorldbodyBuilder {
        WorldbodyBuilder::default()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct WorldbodyBuilder {
    children: Vec<BodyChild>,
}

impl WorldbodyBuilder {
    /// Append any child; joints are rejected at build time.
    pub fn child(mut self, child: impl Into<BodyChild>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn geom(self, geom: Geom) -> Self {
        self.child(geom)
    }

    pub fn site(self, site: Site) -> Self {
        self.child(site)
    }

    pub fn camera(self, camera: Camera) -> Self {
        self.child(camera)
    }

    pub fn light(self, light: Light) -> Self {
        self.child(light)
    }

    pub fn body(self, body: Body) -> Self {
        self.child(body)
    }

    pub fn build(self) -> Result<Worldbody, ElementError> {
        let mut v = Violations::new("worldbody");
        for child in &self.children {
            if child.is_joint() {
                v.reject_child("worldbody", child.kind());
            }
        }
        v.finish()?;
        Ok(Worldbody {
            children: self.children,
        })
    }
}

impl Element for Worldbody {
    fn tag(&self) -> &'static str {
        "worldbody"
    }

    fn attrs(&self) -> Vec<Attr> {
        Vec::new()
    }

    fn children(&self) -> Vec<&dyn Element> {
        self.children.iter().map(BodyChild::as_element).collect()
    }
}

/// Explicit mass and inertia of a body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inertial {
    pos: Vec3,
    orientation: Option<Orientation>,
    mass: f64,
    diaginertia: Option<Vec3>,
    fullinertia: Option<Vec6>,
}

impl Inertial {
    /// Position of the center of mass and total mass are always required.
    pub fn builder(pos: impl Into<Vec<f64>>, mass: f64) -> InertialBuilder {
        InertialBuilder {
            pos: pos.into(),
            mass,
            orientation: None,
            diaginertia: None,
            fullinertia: None,
        }
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn pos(&self) -> &Vec3 {
        &self.pos
    }

    /// The 3x3 inertia matrix in the inertial frame.
    pub fn inertia_matrix(&self) -> Mat3 {
        if let Some(d) = &self.diaginertia {
            return Mat3::from_diagonal(d);
        }
        // validated: exactly one representation is present
        let f = self
            .fullinertia
            .as_ref()
            .expect("inertial holds either diaginertia or fullinertia");
        full_inertia_matrix(f)
    }
}

fn full_inertia_matrix(f: &Vec6) -> Mat3 {
    // ixx iyy izz ixy ixz iyz
    Mat3::new(f[0], f[3], f[4], f[3], f[1], f[5], f[4], f[5], f[2])
}

#[derive(Debug, Clone)]
pub struct InertialBuilder {
    pos: Vec<f64>,
    mass: f64,
    orientation: Option<Orientation>,
    diaginertia: Option<Vec<f64>>,
    fullinertia: Option<Vec<f64>>,
}

impl InertialBuilder {
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    /// Principal moments of inertia, all strictly positive.
    pub fn diaginertia(mut self, diaginertia: impl Into<Vec<f64>>) -> Self {
        self.diaginertia = Some(diaginertia.into());
        self
    }

    /// Full inertia `[ixx iyy izz ixy ixz iyz]`; must be positive
    /// definite.
    pub fn fullinertia(mut self, fullinertia: impl Into<Vec<f64>>) -> Self {
        self.fullinertia = Some(fullinertia.into());
        self
    }

    pub fn build(self) -> Result<Inertial, ElementError> {
        let mut v = Violations::new("inertial");

        let pos = v.check(vector::vec3("pos", &self.pos));
        let mass = v.check(
            scalar::finite("mass", self.mass).and_then(|m| scalar::non_negative("mass", m)),
        );

        if self.diaginertia.is_some() == self.fullinertia.is_some() {
            let value = if self.diaginertia.is_some() {
                "both"
            } else {
                "neither"
            };
            v.check::<()>(Err(ValueError::InvalidChoice {
                field: "inertia",
                value: value.to_string(),
                expected: &["diaginertia", "fullinertia"],
            }));
        }

        let diaginertia = v.check_opt(
            self.diaginertia
                .as_deref()
                .map(|r| vector::positive::<3>("diaginertia", r)),
        );
        let fullinertia = v.check_opt(self.fullinertia.as_deref().map(|r| {
            let f = vector::vec6("fullinertia", r)?;
            let eigenvalues = full_inertia_matrix(&f).symmetric_eigenvalues();
            if let Some(min) = eigenvalues.iter().copied().reduce(f64::min) {
                if min <= 0.0 {
                    return Err(ValueError::OutOfRange {
                        field: "fullinertia",
                        value: min,
                        bound: "inertia matrix must be positive definite".to_string(),
                    });
                }
            }
            Ok(f)
        }));

        v.finish()?;
        Ok(Inertial {
            pos: pos.unwrap_or_else(Vec3::zeros),
            orientation: self.orientation,
            mass: mass.unwrap_or(0.0),
            diaginertia,
            fullinertia,
        })
    }
}

impl Element for Inertial {
    fn tag(&self) -> &'static str {
        "inertial"
    }

    fn attrs(&self) -> Vec<Attr> {
        vec![
            Attr::vector("pos", Some(&self.pos)),
            Attr::orientation(self.orientation.as_ref()),
            Attr::float("mass", Some(self.mass)),
            Attr::vector("diaginertia", self.diaginertia.as_ref()),
            Attr::vector("fullinertia", self.fullinertia.as_ref()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_inertial() -> Inertial {
        Inertial::builder([0.0, 0.0, 0.0], 1.0)
            .diaginertia([0.1, 0.1, 0.1])
            .build()
            .unwrap()
    }

    #[test]
    fn test_worldbody_rejects_joints() {
        let joint = Joint::hinge().build().unwrap();
        let err = Worldbody::builder()
            .child(BodyChild::Joint(joint))
            .build()
            .unwrap_err();
        assert_eq!(err.tag, "worldbody");
        assert!(err.names_field("joint"));
    }

    #[test]
    fn test_worldbody_rejects_freejoint() {
        let err = Worldbody::builder()
            .child(FreeJoint::new().unwrap())
            .build()
            .unwrap_err();
        assert!(err.names_field("freejoint"));
    }

    #[test]
    fn test_children_render_in_insertion_order() {
        let body = Body::builder()
            .name("torso")
            .joint(Joint::hinge().name("j1").build().unwrap())
            .geom(Geom::sphere(0.1).build().unwrap())
            .joint(Joint::slide().name("j2").build().unwrap())
            .build()
            .unwrap();
        let xml = body.render(true);
        let j1 = xml.find("j1").unwrap();
        let sphere = xml.find("sphere").unwrap();
        let j2 = xml.find("j2").unwrap();
        assert!(j1 < sphere && sphere < j2, "{xml}");
    }

    #[test]
    fn test_inertial_renders_before_other_children() {
        let body = Body::builder()
            .geom(Geom::sphere(0.1).build().unwrap())
            .inertial(unit_inertial())
            .build()
            .unwrap();
        let xml = body.render(true);
        assert!(xml.find("<inertial").unwrap() < xml.find("<geom").unwrap(), "{xml}");
    }

    #[test]
    fn test_nested_freejoint_rejected() {
        let inner = Body::builder()
            .name("floating")
            .freejoint(FreeJoint::new().unwrap())
            .build()
            .unwrap();
        let err = Body::builder().body(inner).build().unwrap_err();
        assert!(err.names_field("freejoint"));
    }

    #[test]
    fn test_freejoint_excludes_other_joints() {
        let err = Body::builder()
            .freejoint(FreeJoint::new().unwrap())
            .joint(Joint::hinge().build().unwrap())
            .build()
            .unwrap_err();
        assert!(err.names_field("joint"));
    }

    #[test]
    fn test_inertia_exclusive_representation() {
        let err = Inertial::builder([0.0, 0.0, 0.0], 1.0).build().unwrap_err();
        assert!(err.names_field("inertia"));

        let err = Inertial::builder([0.0, 0.0, 0.0], 1.0)
            .diaginertia([0.1, 0.1, 0.1])
            .fullinertia([0.1, 0.1, 0.1, 0.0, 0.0, 0.0])
            .build()
            .unwrap_err();
        assert!(err.names_field("inertia"));
    }

    #[test]
    fn test_inertia_positive_definite() {
        // negative principal moment
        let err = Inertial::builder([0.0, 0.0, 0.0], 1.0)
            .diaginertia([0.1, -0.1, 0.1])
            .build()
            .unwrap_err();
        assert!(err.names_field("diaginertia"));

        // indefinite full matrix: large off-diagonal terms
        let err = Inertial::builder([0.0, 0.0, 0.0], 1.0)
            .fullinertia([0.1, 0.1, 0.1, 0.5, 0.0, 0.0])
            .build()
            .unwrap_err();
        assert!(err.names_field("fullinertia"));
    }

    #[test]
    fn test_inertia_matrix_from_full() {
        let inertial = Inertial::builder([0.0, 0.0, 0.0], 2.0)
            .fullinertia([0.2, 0.3, 0.4, 0.01, 0.02, 0.03])
            .build()
            .unwrap();
        let m = inertial.inertia_matrix();
        assert_relative_eq!(m[(0, 0)], 0.2);
        assert_relative_eq!(m[(0, 1)], 0.01);
        assert_relative_eq!(m[(2, 1)], 0.03);
        assert_relative_eq!(m[(1, 1)], 0.3);
    }

    #[test]
    fn test_negative_mass_rejected() {
        let err = Inertial::builder([0.0, 0.0, 0.0], -1.0)
            .diaginertia([0.1, 0.1, 0.1])
            .build()
            .unwrap_err();
        assert!(err.names_field("mass"));
    }
}
