//! Lights.

use crate::attr::Attr;
use crate::element::Element;
use crate::error::{ElementError, Violations};
use mjcf_types::{scalar, vector, LightType, Name, TrackingMode, Vec3};
use serde::{Deserialize, Serialize};

/// A light attached to a body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    name: Option<Name>,
    class: Option<Name>,
    directional: Option<bool>,
    light_type: Option<LightType>,
    castshadow: Option<bool>,
    active: Option<bool>,
    pos: Option<Vec3>,
    dir: Option<Vec3>,
    bulbradius: Option<f64>,
    intensity: Option<f64>,
    range: Option<f64>,
    attenuation: Option<Vec3>,
    cutoff: Option<f64>,
    exponent: Option<f64>,
    ambient: Option<Vec3>,
    diffuse: Option<Vec3>,
    specular: Option<Vec3>,
    mode: Option<TrackingMode>,
    target: Option<Name>,
    texture: Option<Name>,
}

impl Light {
    pub fn builder() -> LightBuilder {
        LightBuilder::default()
    }

    pub fn name(&self) -> Option<&Name> {
        self.name.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LightBuilder {
    name: Option<String>,
    class: Option<String>,
    directional: Option<bool>,
    light_type: Option<LightType>,
    castshadow: Option<bool>,
    active: Option<bool>,
    pos: Option<Vec<f64>>,
    dir: Option<Vec<f64>>,
    bulbradius: Option<f64>,
    intensity: Option<f64>,
    range: Option<f64>,
    attenuation: Option<Vec<f64>>,
    cutoff: Option<f64>,
    exponent: Option<f64>,
    ambient: Option<Vec<f64>>,
    diffuse: Option<Vec<f64>>,
    specular: Option<Vec<f64>>,
    mode: Option<TrackingMode>,
    target: Option<String>,
    texture: Option<String>,
}

impl LightBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn directional(mut self, directional: bool) -> Self {
        self.directional = Some(directional);
        self
    }

    pub fn light_type(mut self, light_type: LightType) -> Self {
        self.light_type = Some(light_type);
        self
    }

    pub fn castshadow(mut self, castshadow: bool) -> Self {
        self.castshadow = Some(castshadow);
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn pos(mut self, pos: impl Into<Vec<f64>>) -> Self {
        self.pos = Some(pos.into());
        self
    }

    /// Direction the light points; normalized at build time.
    pub fn dir(mut self, dir: impl Into<Vec<f64>>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    pub fn bulbradius(mut self, bulbradius: f64) -> Self {
        self.bulbradius = Some(bulbradius);
        self
    }

    pub fn intensity(mut self, intensity: f64) -> Self {
        self.intensity = Some(intensity);
        self
    }

    pub fn range(mut self, range: f64) -> Self {
        self.range = Some(range);
        self
    }

    pub fn attenuation(mut self, attenuation: impl Into<Vec<f64>>) -> Self {
        self.attenuation = Some(attenuation.into());
        self
    }

    /// Spotlight cutoff angle in degrees.
    pub fn cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = Some(cutoff);
        self
    }

    pub fn exponent(mut self, exponent: f64) -> Self {
        self.exponent = Some(exponent);
        self
    }

    pub fn ambient(mut self, ambient: impl Into<Vec<f64>>) -> Self {
        self.ambient = Some(ambient.into());
        self
    }

    pub fn diffuse(mut self, diffuse: impl Into<Vec<f64>>) -> Self {
        self.diffuse = Some(diffuse.into());
        self
    }

    pub fn specular(mut self, specular: impl Into<Vec<f64>>) -> Self {
        self.specular = Some(specular.into());
        self
    }

    pub fn mode(mut self, mode: TrackingMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = Some(texture.into());
        self
    }

    pub fn build(self) -> Result<Light, ElementError> {
        let mut v = Violations::new("light");

        let name = v.check_opt(self.name.map(|s| Name::new("name", s)));
        let class = v.check_opt(self.class.map(|s| Name::new("class", s)));
        let target = v.check_opt(self.target.map(|s| Name::new("target", s)));
        let texture = v.check_opt(self.texture.map(|s| Name::new("texture", s)));
        let pos = v.check_opt(self.pos.as_deref().map(|r| vector::vec3("pos", r)));
        let dir = v.check_opt(self.dir.as_deref().map(|r| vector::unit::<3>("dir", r)));
        let bulbradius = v.check_opt(self.bulbradius.map(|x| scalar::non_negative("bulbradius", x)));
        let intensity = v.check_opt(self.intensity.map(|x| scalar::non_negative("intensity", x)));
        let range = v.check_opt(self.range.map(|x| scalar::positive("range", x)));
        let attenuation = v.check_opt(
            self.attenuation
                .as_deref()
                .map(|r| vector::non_negative::<3>("attenuation", r)),
        );
        let cutoff = v.check_opt(self.cutoff.map(|x| scalar::within("cutoff", x, 0.0, 180.0)));
        let exponent = v.check_opt(self.exponent.map(|x| scalar::non_negative("exponent", x)));
        let ambient = v.check_opt(
            self.ambient
                .as_deref()
                .map(|r| vector::within::<3>("ambient", r, 0.0, 1.0)),
        );
        let diffuse = v.check_opt(
            self.diffuse
                .as_deref()
                .map(|r| vector::within::<3>("diffuse", r, 0.0, 1.0)),
        );
        let specular = v.check_opt(
            self.specular
                .as_deref()
                .map(|r| vector::within::<3>("specular", r, 0.0, 1.0)),
        );

        v.finish()?;
        Ok(Light {
            name,
            class,
            directional: self.directional,
            light_type: self.light_type,
            castshadow: self.castshadow,
            active: self.active,
            pos,
            dir,
            bulbradius,
            intensity,
            range,
            attenuation,
            cutoff,
            exponent,
            ambient,
            diffuse,
            specular,
            mode: self.mode,
            target,
            texture,
        })
    }
}

impl Element for Light {
    fn tag(&self) -> &'static str {
        "light"
    }

    fn attrs(&self) -> Vec<Attr> {
        vec![
            Attr::ident("name", self.name.as_ref()),
            Attr::ident("class", self.class.as_ref()),
            Attr::boolean_def("directional", self.directional, false),
            Attr::keyword_def("type", self.light_type, LightType::Spot),
            Attr::boolean_def("castshadow", self.castshadow, true),
            Attr::boolean_def("active", self.active, true),
            Attr::vector_def("pos", self.pos.as_ref(), &[0.0, 0.0, 0.0]),
            Attr::vector_def("dir", self.dir.as_ref(), &[0.0, 0.0, -1.0]),
            Attr::float_def("bulbradius", self.bulbradius, 0.02),
            Attr::float_def("intensity", self.intensity, 0.0),
            Attr::float_def("range", self.range, 10.0),
            Attr::vector_def("attenuation", self.attenuation.as_ref(), &[1.0, 0.0, 0.0]),
            Attr::float_def("cutoff", self.cutoff, 45.0),
            Attr::float_def("exponent", self.exponent, 10.0),
            Attr::vector_def("ambient", self.ambient.as_ref(), &[0.0, 0.0, 0.0]),
            Attr::vector_def("diffuse", self.diffuse.as_ref(), &[0.7, 0.7, 0.7]),
            Attr::vector_def("specular", self.specular.as_ref(), &[0.3, 0.3, 0.3]),
            Attr::keyword_def("mode", self.mode, TrackingMode::Fixed),
            Attr::ident("target", self.target.as_ref()),
            Attr::ident("texture", self.texture.as_ref()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directional_light() {
        let light = Light::builder()
            .directional(true)
            .pos([0.0, 0.0, 3.0])
            .dir([0.0, 0.0, -2.0])
            .build()
            .unwrap();
        assert_eq!(
            light.render(true),
            r#"<light directional="true" pos="0 0 3" dir="0 0 -1"/>"#
        );
    }

    #[test]
    fn test_color_bounds() {
        let err = Light::builder()
            .diffuse([1.5, 0.0, 0.0])
            .build()
            .unwrap_err();
        assert!(err.names_field("diffuse"));
    }
}
