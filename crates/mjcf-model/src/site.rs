//! Sites: massless reference locations on bodies.

use crate::attr::Attr;
use crate::element::Element;
use crate::error::{ElementError, Violations};
use mjcf_types::{scalar, vector, DVec, Name, Orientation, SiteType, ValueError, Vec3, Vec4, Vec6};
use serde::{Deserialize, Serialize};

/// A site. Only the rendering-friendly shape subset of the geom types is
/// allowed, and the size arity follows the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    name: Option<Name>,
    class: Option<Name>,
    site_type: Option<SiteType>,
    group: Option<i64>,
    pos: Option<Vec3>,
    orientation: Option<Orientation>,
    material: Option<Name>,
    size: Option<DVec>,
    fromto: Option<Vec6>,
    rgba: Option<Vec4>,
    user: Option<DVec>,
}

fn size_arity(site_type: SiteType, has_fromto: bool) -> usize {
    match site_type {
        SiteType::Sphere => 1,
        SiteType::Capsule | SiteType::Cylinder => {
            if has_fromto {
                1
            } else {
                2
            }
        }
        SiteType::Ellipsoid | SiteType::Box => 3,
    }
}

impl Site {
    pub fn builder(site_type: SiteType) -> SiteBuilder {
        SiteBuilder {
            site_type: Some(site_type),
            ..Default::default()
        }
    }

    /// Spherical site with the given radius.
    pub fn sphere(radius: f64) -> SiteBuilder {
        Site::builder(SiteType::Sphere).size([radius])
    }

    pub fn name(&self) -> Option<&Name> {
        self.name.as_ref()
    }

    pub fn site_type(&self) -> Option<SiteType> {
        self.site_type
    }
}

#[derive(Debug, Clone, Default)]
pub struct SiteBuilder {
    name: Option<String>,
    class: Option<String>,
    site_type: Option<SiteType>,
    group: Option<i64>,
    pos: Option<Vec<f64>>,
    orientation: Option<Orientation>,
    material: Option<String>,
    size: Option<Vec<f64>>,
    fromto: Option<Vec<f64>>,
    rgba: Option<Vec<f64>>,
    user: Option<Vec<f64>>,
}

impl SiteBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
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

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    pub fn size(mut self, size: impl Into<Vec<f64>>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn fromto(mut self, fromto: impl Into<Vec<f64>>) -> Self {
        self.fromto = Some(fromto.into());
        self
    }

    pub fn rgba(mut self, rgba: impl Into<Vec<f64>>) -> Self {
        self.rgba = Some(rgba.into());
        self
    }

    pub fn user(mut self, user: impl Into<Vec<f64>>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn build(self) -> Result<Site, ElementError> {
        let mut v = Violations::new("site");

        let name = v.check_opt(self.name.map(|s| Name::new("name", s)));
        let class = v.check_opt(self.class.map(|s| Name::new("class", s)));
        let material = v.check_opt(self.material.map(|s| Name::new("material", s)));
        let group = v.check_opt(self.group.map(|x| scalar::group("group", x)));
        let pos = v.check_opt(self.pos.as_deref().map(|r| vector::vec3("pos", r)));
        let fromto = v.check_opt(self.fromto.as_deref().map(|r| vector::vec6("fromto", r)));
        let rgba = v.check_opt(self.rgba.as_deref().map(|r| vector::rgba("rgba", r)));

        let site_type = self.site_type.unwrap_or(SiteType::Sphere);
        let size = v.check_opt(self.size.as_deref().map(|raw| {
            let expected = size_arity(site_type, self.fromto.is_some());
            if raw.len() != expected {
                return Err(ValueError::ArityMismatch {
                    field: "size",
                    expected,
                    actual: raw.len(),
                });
            }
            vector::check_non_negative("size", raw).map(|_| DVec::from_column_slice(raw))
        }));

        v.finish()?;
        Ok(Site {
            name,
            class,
            site_type: self.site_type,
            group,
            pos,
            orientation: self.orientation,
            material,
            size,
            fromto,
            rgba,
            user: self.user.map(DVec::from_vec),
        })
    }
}

impl Element for Site {
    fn tag(&self) -> &'static str {
        "site"
    }

    fn attrs(&self) -> Vec<Attr> {
        vec![
            Attr::ident("name", self.name.as_ref()),
            Attr::ident("class", self.class.as_ref()),
            Attr::keyword_def("type", self.site_type, SiteType::Sphere),
            Attr::int_def("group", self.group, 0),
            Attr::vector_def("pos", self.pos.as_ref(), &[0.0, 0.0, 0.0]),
            Attr::orientation_def(self.orientation.as_ref(), &[1.0, 0.0, 0.0, 0.0]),
            Attr::ident("material", self.material.as_ref()),
            Attr::vector("size", self.size.as_ref()),
            Attr::vector("fromto", self.fromto.as_ref()),
            Attr::vector_def("rgba", self.rgba.as_ref(), &[0.5, 0.5, 0.5, 1.0]),
            Attr::vector("user", self.user.as_ref()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_site() {
        let site = Site::sphere(0.01).name("tip").build().unwrap();
        assert_eq!(
            site.render(true),
            r#"<site name="tip" type="sphere" size="0.01"/>"#
        );
    }

    #[test]
    fn test_size_arity_by_shape() {
        assert!(Site::builder(SiteType::Box).size([0.1, 0.1]).build().is_err());
        assert!(Site::builder(SiteType::Box)
            .size([0.1, 0.1, 0.1])
            .build()
            .is_ok());
        assert!(Site::builder(SiteType::Capsule)
            .size([0.05])
            .fromto([0.0, 0.0, 0.0, 0.0, 0.0, 0.2])
            .build()
            .is_ok());
    }
}
