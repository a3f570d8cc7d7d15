//! Joints: motion degrees of freedom between a body and its parent.

use crate::attr::Attr;
use crate::defaults::{SOLIMP_DEFAULT, SOLREF_DEFAULT};
use crate::element::Element;
use crate::error::{ElementError, Violations};
use mjcf_types::{
    scalar, vector, Align, DVec, JointType, Limited, Name, ValueError, Vec2, Vec3, Vec5,
};
use serde::{Deserialize, Serialize};

/// A joint of any kind except free (free joints have their own reduced
/// schema, see [`FreeJoint`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    name: Option<Name>,
    class: Option<Name>,
    joint_type: Option<JointType>,
    group: Option<i64>,
    pos: Option<Vec3>,
    axis: Option<Vec3>,
    springdamper: Option<Vec2>,
    solreflimit: Option<Vec2>,
    solimplimit: Option<Vec5>,
    solreffriction: Option<Vec2>,
    solimpfriction: Option<Vec5>,
    stiffness: Option<f64>,
    range: Option<Vec2>,
    limited: Option<Limited>,
    actuatorfrcrange: Option<Vec2>,
    actuatorfrclimited: Option<Limited>,
    actuatorgravcomp: Option<bool>,
    margin: Option<f64>,
    reference: Option<f64>,
    springref: Option<f64>,
    armature: Option<f64>,
    damping: Option<f64>,
    frictionloss: Option<f64>,
    user: Option<DVec>,
}

impl Joint {
    pub fn builder() -> JointBuilder {
        JointBuilder::default()
    }

    /// Hinge joint: one rotational DOF about an axis.
    pub fn hinge() -> JointBuilder {
        JointBuilder::default().joint_type(JointType::Hinge)
    }

    /// Slide joint: one translational DOF along an axis.
    pub fn slide() -> JointBuilder {
        JointBuilder::default().joint_type(JointType::Slide)
    }

    /// Ball joint: three rotational DOF around a point.
    pub fn ball() -> JointBuilder {
        JointBuilder::default().joint_type(JointType::Ball)
    }

    pub fn name(&self) -> Option<&Name> {
        self.name.as_ref()
    }

    pub fn joint_type(&self) -> Option<JointType> {
        self.joint_type
    }

    /// True for an explicitly free-typed joint.
    pub fn is_free(&self) -> bool {
        self.joint_type == Some(JointType::Free)
    }

    pub fn axis(&self) -> Option<&Vec3> {
        self.axis.as_ref()
    }

    pub fn range(&self) -> Option<&Vec2> {
        self.range.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct JointBuilder {
    name: Option<String>,
    class: Option<String>,
    joint_type: Option<JointType>,
    group: Option<i64>,
    pos: Option<Vec<f64>>,
    axis: Option<Vec<f64>>,
    springdamper: Option<Vec<f64>>,
    solreflimit: Option<Vec<f64>>,
    solimplimit: Option<Vec<f64>>,
    solreffriction: Option<Vec<f64>>,
    solimpfriction: Option<Vec<f64>>,
    stiffness: Option<f64>,
    range: Option<Vec<f64>>,
    limited: Option<Limited>,
    actuatorfrcrange: Option<Vec<f64>>,
    actuatorfrclimited: Option<Limited>,
    actuatorgravcomp: Option<bool>,
    margin: Option<f64>,
    reference: Option<f64>,
    springref: Option<f64>,
    armature: Option<f64>,
    damping: Option<f64>,
    frictionloss: Option<f64>,
    user: Option<Vec<f64>>,
}

impl JointBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn joint_type(mut self, joint_type: JointType) -> Self {
        self.joint_type = Some(joint_type);
        self
    }

    pub fn group(mut self, group: i64) -> Self {
        self.group = Some(group);
        self
    }

    pub fn pos(mut self, pos: impl Into<Vec<f64>>) -> Self {
        self.pos = Some(pos.into());
        self
    }

    /// Rotation axis (hinge) or sliding direction (slide). Normalized at
    /// build time; a zero-length axis is rejected.
    pub fn axis(mut self, axis: impl Into<Vec<f64>>) -> Self {
        self.axis = Some(axis.into());
        self
    }

    pub fn springdamper(mut self, springdamper: impl Into<Vec<f64>>) -> Self {
        self.springdamper = Some(springdamper.into());
        self
    }

    pub fn solreflimit(mut self, solreflimit: impl Into<Vec<f64>>) -> Self {
        self.solreflimit = Some(solreflimit.into());
        self
    }

    pub fn solimplimit(mut self, solimplimit: impl Into<Vec<f64>>) -> Self {
        self.solimplimit = Some(solimplimit.into());
        self
    }

    pub fn solreffriction(mut self, solreffriction: impl Into<Vec<f64>>) -> Self {
        self.solreffriction = Some(solreffriction.into());
        self
    }

    pub fn solimpfriction(mut self, solimpfriction: impl Into<Vec<f64>>) -> Self {
        self.solimpfriction = Some(solimpfriction.into());
        self
    }

    pub fn stiffness(mut self, stiffness: f64) -> Self {
        self.stiffness = Some(stiffness);
        self
    }

    /// Joint limits `[lower, upper]`, with `lower <= upper`.
    pub fn range(mut self, range: impl Into<Vec<f64>>) -> Self {
        self.range = Some(range.into());
        self
    }

    pub fn limited(mut self, limited: Limited) -> Self {
        self.limited = Some(limited);
        self
    }

    pub fn actuatorfrcrange(mut self, actuatorfrcrange: impl Into<Vec<f64>>) -> Self {
        self.actuatorfrcrange = Some(actuatorfrcrange.into());
        self
    }

    pub fn actuatorfrclimited(mut self, actuatorfrclimited: Limited) -> Self {
        self.actuatorfrclimited = Some(actuatorfrclimited);
        self
    }

    pub fn actuatorgravcomp(mut self, actuatorgravcomp: bool) -> Self {
        self.actuatorgravcomp = Some(actuatorgravcomp);
        self
    }

    pub fn margin(mut self, margin: f64) -> Self {
        self.margin = Some(margin);
        self
    }

    /// The joint value in the initial model configuration (`ref`).
    pub fn reference(mut self, reference: f64) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn springref(mut self, springref: f64) -> Self {
        self.springref = Some(springref);
        self
    }

    pub fn armature(mut self, armature: f64) -> Self {
        self.armature = Some(armature);
        self
    }

    pub fn damping(mut self, damping: f64) -> Self {
        self.damping = Some(damping);
        self
    }

    pub fn frictionloss(mut self, frictionloss: f64) -> Self {
        self.frictionloss = Some(frictionloss);
        self
    }

    pub fn user(mut self, user: impl Into<Vec<f64>>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn build(self) -> Result<Joint, ElementError> {
        let mut v = Violations::new("joint");

        let name = v.check_opt(self.name.map(|s| Name::new("name", s)));
        let class = v.check_opt(self.class.map(|s| Name::new("class", s)));
        let group = v.check_opt(self.group.map(|x| scalar::group("group", x)));
        let pos = v.check_opt(self.pos.as_deref().map(|r| vector::vec3("pos", r)));
        let axis = v.check_opt(self.axis.as_deref().map(|r| vector::unit::<3>("axis", r)));
        let springdamper = v.check_opt(
            self.springdamper
                .as_deref()
                .map(|r| vector::vec2("springdamper", r)),
        );
        let solreflimit = v.check_opt(
            self.solreflimit
                .as_deref()
                .map(|r| vector::vec2("solreflimit", r)),
        );
        let solimplimit = v.check_opt(
            self.solimplimit
                .as_deref()
                .map(|r| vector::vec5("solimplimit", r)),
        );
        let solreffriction = v.check_opt(
            self.solreffriction
                .as_deref()
                .map(|r| vector::vec2("solreffriction", r)),
        );
        let solimpfriction = v.check_opt(
            self.solimpfriction
                .as_deref()
                .map(|r| vector::vec5("solimpfriction", r)),
        );
        let stiffness = v.check_opt(self.stiffness.map(|x| scalar::non_negative("stiffness", x)));
        let range = v.check_opt(self.range.as_deref().map(|r| ordered_range("range", r)));
        let actuatorfrcrange = v.check_opt(
            self.actuatorfrcrange
                .as_deref()
                .map(|r| ordered_range("actuatorfrcrange", r)),
        );
        let margin = v.check_opt(self.margin.map(|x| scalar::finite("margin", x)));
        let armature = v.check_opt(self.armature.map(|x| scalar::non_negative("armature", x)));
        let damping = v.check_opt(self.damping.map(|x| scalar::non_negative("damping", x)));
        let frictionloss = v.check_opt(
            self.frictionloss
                .map(|x| scalar::non_negative("frictionloss", x)),
        );

        v.finish()?;
        Ok(Joint {
            name,
            class,
            joint_type: self.joint_type,
            group,
            pos,
            axis,
            springdamper,
            solreflimit,
            solimplimit,
            solreffriction,
            solimpfriction,
            stiffness,
            range,
            limited: self.limited,
            actuatorfrcrange,
            actuatorfrclimited: self.actuatorfrclimited,
            actuatorgravcomp: self.actuatorgravcomp,
            margin,
            reference: self.reference,
            springref: self.springref,
            armature,
            damping,
            frictionloss,
            user: self.user.map(DVec::from_vec),
        })
    }
}

/// Two components with the lower bound first.
fn ordered_range(field: &'static str, raw: &[f64]) -> Result<Vec2, ValueError> {
    let r = vector::vec2(field, raw)?;
    if r[0] <= r[1] {
        Ok(r)
    } else {
        Err(ValueError::OutOfRange {
            field,
            value: r[0],
            bound: "lower bound must not exceed upper bound".to_string(),
        })
    }
}

impl Element for Joint {
    fn tag(&self) -> &'static str {
        "joint"
    }

    fn attrs(&self) -> Vec<Attr> {
        vec![
            Attr::ident("name", self.name.as_ref()),
            Attr::ident("class", self.class.as_ref()),
            Attr::keyword_def("type", self.joint_type, JointType::Hinge),
            Attr::int_def("group", self.group, 0),
            Attr::vector_def("pos", self.pos.as_ref(), &[0.0, 0.0, 0.0]),
            Attr::vector_def("axis", self.axis.as_ref(), &[0.0, 0.0, 1.0]),
            Attr::vector_def("springdamper", self.springdamper.as_ref(), &[0.0, 0.0]),
            Attr::vector_def("solreflimit", self.solreflimit.as_ref(), &SOLREF_DEFAULT),
            Attr::vector_def("solimplimit", self.solimplimit.as_ref(), &SOLIMP_DEFAULT),
            Attr::vector_def(
                "solreffriction",
                self.solreffriction.as_ref(),
                &SOLREF_DEFAULT,
            ),
            Attr::vector_def(
                "solimpfriction",
                self.solimpfriction.as_ref(),
                &SOLIMP_DEFAULT,
            ),
            Attr::float_def("stiffness", self.stiffness, 0.0),
            Attr::vector_def("range", self.range.as_ref(), &[0.0, 0.0]),
            Attr::keyword_def("limited", self.limited, Limited::Auto),
            Attr::vector_def(
                "actuatorfrcrange",
                self.actuatorfrcrange.as_ref(),
                &[0.0, 0.0],
            ),
            Attr::keyword_def("actuatorfrclimited", self.actuatorfrclimited, Limited::Auto),
            Attr::boolean_def("actuatorgravcomp", self.actuatorgravcomp, false),
            Attr::float_def("margin", self.margin, 0.0),
            Attr::float_def("ref", self.reference, 0.0),
            Attr::float_def("springref", self.springref, 0.0),
            Attr::float_def("armature", self.armature, 0.0),
            Attr::float_def("damping", self.damping, 0.0),
            Attr::float_def("frictionloss", self.frictionloss, 0.0),
            Attr::vector("user", self.user.as_ref()),
        ]
    }
}

/// `<joint type="free">`: the reduced free-joint schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeJoint {
    name: Option<Name>,
    group: Option<i64>,
    align: Option<Align>,
}

impl FreeJoint {
    pub fn new() -> Result<FreeJoint, ElementError> {
        FreeJointBuilder::default().build()
    }

    pub fn builder() -> FreeJointBuilder {
        FreeJointBuilder::default()
    }

    pub fn name(&self) -> Option<&Name> {
        self.name.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct FreeJointBuilder {
    name: Option<String>,
    group: Option<i64>,
    align: Option<Align>,
}

impl FreeJointBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn group(mut self, group: i64) -> Self {
        self.group = Some(group);
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    pub fn build(self) -> Result<FreeJoint, ElementError> {
        let mut v = Violations::new("freejoint");
        let name = v.check_opt(self.name.map(|s| Name::new("name", s)));
        let group = v.check_opt(self.group.map(|x| scalar::group("group", x)));
        v.finish()?;
        Ok(FreeJoint {
            name,
            group,
            align: self.align,
        })
    }
}

impl Element for FreeJoint {
    fn tag(&self) -> &'static str {
        "joint"
    }

    fn attrs(&self) -> Vec<Attr> {
        vec![
            // the discriminator is part of the element identity, always emitted
            Attr::keyword("type", Some(JointType::Free)),
            Attr::ident("name", self.name.as_ref()),
            Attr::int_def("group", self.group, 0),
            Attr::keyword_def("align", self.align, Align::Auto),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hinge_with_range() {
        let joint = Joint::hinge()
            .name("elbow")
            .axis([0.0, 0.0, 2.0])
            .range([-1.0, 1.0])
            .damping(0.5)
            .build()
            .unwrap();
        let xml = joint.render(true);
        assert_eq!(
            xml,
            r#"<joint name="elbow" type="hinge" axis="0 0 1" range="-1 1" damping="0.5"/>"#
        );
    }

    #[test]
    fn test_axis_is_normalized() {
        let joint = Joint::slide().axis([3.0, 0.0, 4.0]).build().unwrap();
        let axis = joint.axis().unwrap();
        assert!((axis.norm() - 1.0).abs() < 1e-12);
        assert!((axis.x - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_zero_axis_rejected() {
        let err = Joint::hinge().axis([0.0, 0.0, 0.0]).build().unwrap_err();
        assert!(err.names_field("axis"));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = Joint::hinge().range([1.0, -1.0]).build().unwrap_err();
        assert!(err.names_field("range"));
    }

    #[test]
    fn test_free_joint_renders_type() {
        let fj = FreeJoint::new().unwrap();
        assert_eq!(fj.render(true), r#"<joint type="free"/>"#);
    }

    #[test]
    fn test_negative_damping_rejected() {
        let err = Joint::hinge().damping(-0.1).build().unwrap_err();
        assert!(err.names_field("damping"));
    }
}
