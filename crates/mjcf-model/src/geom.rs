//! Geoms: the collision/rendering primitives attached to bodies.

use crate::attr::Attr;
use crate::defaults::{FRICTION_DEFAULT, SOLIMP_DEFAULT, SOLREF_DEFAULT};
use crate::element::Element;
use crate::error::{ElementError, Violations};
use mjcf_types::{
    scalar, vector, DVec, FluidShape, GeomType, Name, Orientation, Vec2, Vec3, Vec4, Vec5, Vec6,
};
use serde::{Deserialize, Serialize};

/// A geom of any [`GeomType`], with the size arity checked against the
/// type at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geom {
    name: Option<Name>,
    class: Option<Name>,
    geom_type: GeomType,
    size: Option<DVec>,
    contype: Option<i64>,
    conaffinity: Option<i64>,
    condim: Option<i64>,
    group: Option<i64>,
    priority: Option<i64>,
    material: Option<Name>,
    friction: Option<Vec3>,
    mass: Option<f64>,
    density: Option<f64>,
    shellinertia: Option<bool>,
    solmix: Option<f64>,
    solref: Option<Vec2>,
    solimp: Option<Vec5>,
    margin: Option<f64>,
    gap: Option<f64>,
    fromto: Option<Vec6>,
    pos: Option<Vec3>,
    orientation: Option<Orientation>,
    hfield: Option<Name>,
    mesh: Option<Name>,
    fitscale: Option<f64>,
    rgba: Option<Vec4>,
    fluidshape: Option<FluidShape>,
    fluidcoef: Option<Vec5>,
    user: Option<DVec>,
}

impl Geom {
    pub fn builder(geom_type: GeomType) -> GeomBuilder {
        GeomBuilder::new(geom_type)
    }

    /// Sphere with the given radius.
    pub fn sphere(radius: f64) -> GeomBuilder {
        GeomBuilder::new(GeomType::Sphere).size([radius])
    }

    /// Capsule with the given radius and half-length of the cylinder part.
    pub fn capsule(radius: f64, half_length: f64) -> GeomBuilder {
        GeomBuilder::new(GeomType::Capsule).size([radius, half_length])
    }

    /// Cylinder with the given radius and half-height.
    pub fn cylinder(radius: f64, half_height: f64) -> GeomBuilder {
        GeomBuilder::new(GeomType::Cylinder).size([radius, half_height])
    }

    /// Box with the given half-extents.
    pub fn box_geom(hx: f64, hy: f64, hz: f64) -> GeomBuilder {
        GeomBuilder::new(GeomType::Box).size([hx, hy, hz])
    }

    /// Ellipsoid with the given radii.
    pub fn ellipsoid(rx: f64, ry: f64, rz: f64) -> GeomBuilder {
        GeomBuilder::new(GeomType::Ellipsoid).size([rx, ry, rz])
    }

    /// Plane with x/y half-sizes (zero means infinite) and grid spacing.
    pub fn plane(half_x: f64, half_y: f64, spacing: f64) -> GeomBuilder {
        GeomBuilder::new(GeomType::Plane).size([half_x, half_y, spacing])
    }

    pub fn name(&self) -> Option<&Name> {
        self.name.as_ref()
    }

    pub fn geom_type(&self) -> GeomType {
        self.geom_type
    }

    pub fn size(&self) -> Option<&DVec> {
        self.size.as_ref()
    }

    pub fn rgba(&self) -> Option<&Vec4> {
        self.rgba.as_ref()
    }

    pub fn pos(&self) -> Option<&Vec3> {
        self.pos.as_ref()
    }
}

/// How many size components each geom type takes. `None` means the type
/// takes no size at all; capsules and cylinders drop to one component
/// when the segment is given via `fromto`.
fn size_arity(geom_type: GeomType, has_fromto: bool) -> Option<usize> {
    match geom_type {
        GeomType::Sphere => Some(1),
        GeomType::Capsule | GeomType::Cylinder => Some(if has_fromto { 1 } else { 2 }),
        GeomType::Plane | GeomType::Box | GeomType::Ellipsoid => Some(3),
        GeomType::Hfield | GeomType::Mesh | GeomType::Sdf => None,
    }
}

#[derive(Debug, Clone, Default)]
pub struct GeomBuilder {
    geom_type: Option<GeomType>,
    name: Option<String>,
    class: Option<String>,
    size: Option<Vec<f64>>,
    contype: Option<i64>,
    conaffinity: Option<i64>,
    condim: Option<i64>,
    group: Option<i64>,
    priority: Option<i64>,
    material: Option<String>,
    friction: Option<Vec<f64>>,
    mass: Option<f64>,
    density: Option<f64>,
    shellinertia: Option<bool>,
    solmix: Option<f64>,
    solref: Option<Vec<f64>>,
    solimp: Option<Vec<f64>>,
    margin: Option<f64>,
    gap: Option<f64>,
    fromto: Option<Vec<f64>>,
    pos: Option<Vec<f64>>,
    orientation: Option<Orientation>,
    hfield: Option<String>,
    mesh: Option<String>,
    fitscale: Option<f64>,
    rgba: Option<Vec<f64>>,
    fluidshape: Option<FluidShape>,
    fluidcoef: Option<Vec<f64>>,
    user: Option<Vec<f64>>,
}

impl GeomBuilder {
    fn new(geom_type: GeomType) -> Self {
        GeomBuilder {
            geom_type: Some(geom_type),
            ..Default::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn size(mut self, size: impl Into<Vec<f64>>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn contype(mut self, contype: i64) -> Self {
        self.contype = Some(contype);
        self
    }

    pub fn conaffinity(mut self, conaffinity: i64) -> Self {
        self.conaffinity = Some(conaffinity);
        self
    }

    pub fn condim(mut self, condim: i64) -> Self {
        self.condim = Some(condim);
        self
    }

    pub fn group(mut self, group: i64) -> Self {
        self.group = Some(group);
        self
    }

    pub fn priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    pub fn friction(mut self, friction: impl Into<Vec<f64>>) -> Self {
        self.friction = Some(friction.into());
        self
    }

    pub fn mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }

    pub fn density(mut self, density: f64) -> Self {
        self.density = Some(density);
        self
    }

    pub fn shellinertia(mut self, shellinertia: bool) -> Self {
        self.shellinertia = Some(shellinertia);
        self
    }

    pub fn solmix(mut self, solmix: f64) -> Self {
        self.solmix = Some(solmix);
        self
    }

    pub fn solref(mut self, solref: impl Into<Vec<f64>>) -> Self {
        self.solref = Some(solref.into());
        self
    }

    pub fn solimp(mut self, solimp: impl Into<Vec<f64>>) -> Self {
        self.solimp = Some(solimp.into());
        self
    }

    pub fn margin(mut self, margin: f64) -> Self {
        self.margin = Some(margin);
        self
    }

    pub fn gap(mut self, gap: f64) -> Self {
        self.gap = Some(gap);
        self
    }

    pub fn fromto(mut self, fromto: impl Into<Vec<f64>>) -> Self {
        self.fromto = Some(fromto.into());
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

    pub fn hfield(mut self, hfield: impl Into<String>) -> Self {
        self.hfield = Some(hfield.into());
        self
    }

    pub fn mesh(mut self, mesh: impl Into<String>) -> Self {
        self.mesh = Some(mesh.into());
        self
    }

    pub fn fitscale(mut self, fitscale: f64) -> Self {
        self.fitscale = Some(fitscale);
        self
    }

    pub fn rgba(mut self, rgba: impl Into<Vec<f64>>) -> Self {
        self.rgba = Some(rgba.into());
        self
    }

    pub fn fluidshape(mut self, fluidshape: FluidShape) -> Self {
        self.fluidshape = Some(fluidshape);
        self
    }

    pub fn fluidcoef(mut self, fluidcoef: impl Into<Vec<f64>>) -> Self {
        self.fluidcoef = Some(fluidcoef.into());
        self
    }

    pub fn user(mut self, user: impl Into<Vec<f64>>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Validate every supplied field and produce the geom, or the full
    /// list of violations.
    pub fn build(self) -> Result<Geom, ElementError> {
        let mut v = Violations::new("geom");
        let geom_type = self.geom_type.unwrap_or(GeomType::Sphere);

        let name = v.check_opt(self.name.map(|s| Name::new("name", s)));
        let class = v.check_opt(self.class.map(|s| Name::new("class", s)));
        let material = v.check_opt(self.material.map(|s| Name::new("material", s)));
        let hfield = v.check_opt(self.hfield.map(|s| Name::new("hfield", s)));
        let mesh = v.check_opt(self.mesh.map(|s| Name::new("mesh", s)));

        let fromto = v.check_opt(self.fromto.as_deref().map(|r| vector::vec6("fromto", r)));

        let size = v.check_opt(self.size.as_deref().map(|raw| {
            match size_arity(geom_type, self.fromto.is_some()) {
                Some(expected) if raw.len() == expected => {
                    vector::check_non_negative("size", raw).map(|_| DVec::from_column_slice(raw))
                }
                Some(expected) => Err(mjcf_types::ValueError::ArityMismatch {
                    field: "size",
                    expected,
                    actual: raw.len(),
                }),
                None => Err(mjcf_types::ValueError::ArityMismatch {
                    field: "size",
                    expected: 0,
                    actual: raw.len(),
                }),
            }
        }));

        let contype = v.check_opt(self.contype.map(|x| scalar::int_at_least("contype", x, 0)));
        let conaffinity = v.check_opt(
            self.conaffinity
                .map(|x| scalar::int_at_least("conaffinity", x, 0)),
        );
        let condim = v.check_opt(self.condim.map(|x| scalar::condim("condim", x)));
        let group = v.check_opt(self.group.map(|x| scalar::group("group", x)));
        let friction = v.check_opt(
            self.friction
                .as_deref()
                .map(|r| vector::non_negative::<3>("friction", r)),
        );
        let mass = v.check_opt(self.mass.map(|x| scalar::non_negative("mass", x)));
        let density = v.check_opt(self.density.map(|x| scalar::non_negative("density", x)));
        let solmix = v.check_opt(self.solmix.map(|x| scalar::non_negative("solmix", x)));
        let solref = v.check_opt(self.solref.as_deref().map(|r| vector::vec2("solref", r)));
        let solimp = v.check_opt(self.solimp.as_deref().map(|r| vector::vec5("solimp", r)));
        let margin = v.check_opt(self.margin.map(|x| scalar::finite("margin", x)));
        let gap = v.check_opt(self.gap.map(|x| scalar::non_negative("gap", x)));
        let pos = v.check_opt(self.pos.as_deref().map(|r| vector::vec3("pos", r)));
        let fitscale = v.check_opt(self.fitscale.map(|x| scalar::positive("fitscale", x)));
        let rgba = v.check_opt(self.rgba.as_deref().map(|r| vector::rgba("rgba", r)));
        let fluidcoef = v.check_opt(
            self.fluidcoef
                .as_deref()
                .map(|r| vector::vec5("fluidcoef", r)),
        );

        v.finish()?;
        Ok(Geom {
            name,
            class,
            geom_type,
            size,
            contype,
            conaffinity,
            condim,
            group,
            priority: self.priority,
            material,
            friction,
            mass,
            density,
            shellinertia: self.shellinertia,
            solmix,
            solref,
            solimp,
            margin,
            gap,
            fromto,
            pos,
            orientation: self.orientation,
            hfield,
            mesh,
            fitscale,
            rgba,
            fluidshape: self.fluidshape,
            fluidcoef,
            user: self.user.map(DVec::from_vec),
        })
    }
}

impl Element for Geom {
    fn tag(&self) -> &'static str {
        "geom"
    }

    fn attrs(&self) -> Vec<Attr> {
        vec![
            Attr::ident("name", self.name.as_ref()),
            Attr::ident("class", self.class.as_ref()),
            Attr::keyword("type", Some(self.geom_type)),
            Attr::int_def("contype", self.contype, 1),
            Attr::int_def("conaffinity", self.conaffinity, 1),
            Attr::int_def("condim", self.condim, 3),
            Attr::int_def("group", self.group, 0),
            Attr::int_def("priority", self.priority, 0),
            Attr::ident("material", self.material.as_ref()),
            Attr::vector_def("friction", self.friction.as_ref(), &FRICTION_DEFAULT),
            Attr::float("mass", self.mass),
            Attr::float_def("density", self.density, 1000.0),
            Attr::boolean_def("shellinertia", self.shellinertia, false),
            Attr::float_def("solmix", self.solmix, 1.0),
            Attr::vector_def("solref", self.solref.as_ref(), &SOLREF_DEFAULT),
            Attr::vector_def("solimp", self.solimp.as_ref(), &SOLIMP_DEFAULT),
            Attr::float_def("margin", self.margin, 0.0),
            Attr::float_def("gap", self.gap, 0.0),
            Attr::vector("fromto", self.fromto.as_ref()),
            Attr::vector_def("pos", self.pos.as_ref(), &[0.0, 0.0, 0.0]),
            Attr::orientation_def(self.orientation.as_ref(), &[1.0, 0.0, 0.0, 0.0]),
            Attr::ident("hfield", self.hfield.as_ref()),
            Attr::ident("mesh", self.mesh.as_ref()),
            Attr::float_def("fitscale", self.fitscale, 1.0),
            Attr::vector_def("rgba", self.rgba.as_ref(), &[0.5, 0.5, 0.5, 1.0]),
            Attr::keyword_def("fluidshape", self.fluidshape, FluidShape::None),
            Attr::vector_def(
                "fluidcoef",
                self.fluidcoef.as_ref(),
                &[0.5, 0.25, 1.5, 1.0, 1.0],
            ),
            Attr::vector("user", self.user.as_ref()),
            Attr::vector("size", self.size.as_ref()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_renders_only_explicit_fields() {
        let geom = Geom::sphere(0.1).name("ball").build().unwrap();
        assert_eq!(
            geom.render(true),
            r#"<geom name="ball" type="sphere" size="0.1"/>"#
        );
    }

    #[test]
    fn test_size_arity_per_type() {
        // sphere wants exactly one component
        let err = Geom::builder(GeomType::Sphere).size([0.1, 0.2]).build();
        assert!(err.unwrap_err().names_field("size"));

        // capsule wants two without fromto...
        assert!(Geom::builder(GeomType::Capsule).size([0.1]).build().is_err());
        // ...but one when fromto gives the segment
        assert!(Geom::builder(GeomType::Capsule)
            .size([0.1])
            .fromto([0.0, 0.0, 0.0, 0.0, 0.0, 1.0])
            .build()
            .is_ok());

        // mesh geoms take no size at all
        let err = Geom::builder(GeomType::Mesh)
            .mesh("bunny")
            .size([1.0, 1.0, 1.0])
            .build()
            .unwrap_err();
        assert!(err.names_field("size"));
    }

    #[test]
    fn test_rgba_arity_failure_names_field() {
        let err = Geom::sphere(0.1).rgba([1.0, 0.0, 0.0]).build().unwrap_err();
        assert_eq!(err.tag, "geom");
        assert!(err.names_field("rgba"));
    }

    #[test]
    fn test_batch_reporting() {
        let err = Geom::sphere(0.1)
            .name("9bad")
            .rgba([2.0, 0.0, 0.0, 1.0])
            .condim(2)
            .build()
            .unwrap_err();
        assert_eq!(err.violations.len(), 3);
        assert!(err.names_field("name"));
        assert!(err.names_field("rgba"));
        assert!(err.names_field("condim"));
    }

    #[test]
    fn test_defaults_rendered_when_included() {
        let geom = Geom::sphere(0.05).build().unwrap();
        let xml = geom.render(false);
        assert!(xml.contains(r#"friction="1 0.005 0.0001""#), "{xml}");
        assert!(xml.contains(r#"solref="0.02 1""#), "{xml}");
        assert!(xml.contains(r#"solimp="0.9 0.95 0.001 0.5 2""#), "{xml}");
        assert!(xml.contains(r#"density="1000""#), "{xml}");
        assert!(xml.contains(r#"rgba="0.5 0.5 0.5 1""#), "{xml}");
    }

    #[test]
    fn test_orientation_attribute_name_follows_variant() {
        let geom = Geom::sphere(0.1)
            .orientation(Orientation::euler([0.0, 0.0, 1.57]).unwrap())
            .build()
            .unwrap();
        let xml = geom.render(true);
        assert!(xml.contains(r#"euler="0 0 1.57""#), "{xml}");
        assert!(!xml.contains("quat"), "{xml}");
    }

    #[test]
    fn test_json_round_trip() {
        let geom = Geom::capsule(0.05, 0.2)
            .name("arm")
            .rgba([1.0, 0.0, 0.0, 1.0])
            .build()
            .unwrap();
        let json = serde_json::to_string(&geom).unwrap();
        let back: Geom = serde_json::from_str(&json).unwrap();
        assert_eq!(back, geom);
    }
}
