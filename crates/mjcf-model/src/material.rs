//! Material assets.

use crate::attr::Attr;
use crate::element::Element;
use crate::error::{ElementError, Violations};
use mjcf_types::{scalar, vector, LayerRole, Name, Vec2, Vec4};
use serde::{Deserialize, Serialize};

/// A material asset, referenced by name from geoms, sites and skins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    name: Name,
    class: Option<Name>,
    texture: Option<Name>,
    texrepeat: Option<Vec2>,
    texuniform: Option<bool>,
    emission: Option<f64>,
    specular: Option<f64>,
    shininess: Option<f64>,
    reflectance: Option<f64>,
    metallic: Option<f64>,
    roughness: Option<f64>,
    rgba: Option<Vec4>,
    layers: Vec<Layer>,
}

impl Material {
    /// Materials are always named; everything else is optional.
    pub fn builder(name: impl Into<String>) -> MaterialBuilder {
        MaterialBuilder {
            name: name.into(),
            class: None,
            texture: None,
            texrepeat: None,
            texuniform: None,
            emission: None,
            specular: None,
            shininess: None,
            reflectance: None,
            metallic: None,
            roughness: None,
            rgba: None,
            layers: Vec::new(),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn rgba(&self) -> Option<&Vec4> {
        self.rgba.as_ref()
    }
}

#[derive(Debug, Clone)]
pub struct MaterialBuilder {
    name: String,
    class: Option<String>,
    texture: Option<String>,
    texrepeat: Option<Vec<f64>>,
    texuniform: Option<bool>,
    emission: Option<f64>,
    specular: Option<f64>,
    shininess: Option<f64>,
    reflectance: Option<f64>,
    metallic: Option<f64>,
    roughness: Option<f64>,
    rgba: Option<Vec<f64>>,
    layers: Vec<Layer>,
}

impl MaterialBuilder {
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Name of a texture asset (not a file name).
    pub fn texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = Some(texture.into());
        self
    }

    pub fn texrepeat(mut self, texrepeat: impl Into<Vec<f64>>) -> Self {
        self.texrepeat = Some(texrepeat.into());
        self
    }

    pub fn texuniform(mut self, texuniform: bool) -> Self {
        self.texuniform = Some(texuniform);
        self
    }

    pub fn emission(mut self, emission: f64) -> Self {
        self.emission = Some(emission);
        self
    }

    pub fn specular(mut self, specular: f64) -> Self {
        self.specular = Some(specular);
        self
    }

    pub fn shininess(mut self, shininess: f64) -> Self {
        self.shininess = Some(shininess);
        self
    }

    pub fn reflectance(mut self, reflectance: f64) -> Self {
        self.reflectance = Some(reflectance);
        self
    }

    pub fn metallic(mut self, metallic: f64) -> Self {
        self.metallic = Some(metallic);
        self
    }

    pub fn roughness(mut self, roughness: f64) -> Self {
        self.roughness = Some(roughness);
        self
    }

    pub fn rgba(mut self, rgba: impl Into<Vec<f64>>) -> Self {
        self.rgba = Some(rgba.into());
        self
    }

    /// Append a PBR texture layer.
    pub fn layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn build(self) -> Result<Material, ElementError> {
        let mut v = Violations::new("material");

        let name = v.check(Name::new("name", self.name));
        let class = v.check_opt(self.class.map(|s| Name::new("class", s)));
        let texture = v.check_opt(self.texture.map(|s| Name::new("texture", s)));
        let texrepeat = v.check_opt(
            self.texrepeat
                .as_deref()
                .map(|r| vector::vec2("texrepeat", r)),
        );
        let emission = v.check_opt(self.emission.map(|x| scalar::non_negative("emission", x)));
        let specular = v.check_opt(self.specular.map(|x| scalar::unit("specular", x)));
        let shininess = v.check_opt(self.shininess.map(|x| scalar::unit("shininess", x)));
        let reflectance = v.check_opt(self.reflectance.map(|x| scalar::unit("reflectance", x)));
        let rgba = v.check_opt(self.rgba.as_deref().map(|r| vector::rgba("rgba", r)));

        v.finish()?;
        Ok(Material {
            // finish() passed, so the required name validated
            name: name.expect("name checked above"),
            class,
            texture,
            texrepeat,
            texuniform: self.texuniform,
            emission,
            specular,
            shininess,
            reflectance,
            metallic: self.metallic,
            roughness: self.roughness,
            rgba,
            layers: self.layers,
        })
    }
}

impl Element for Material {
    fn tag(&self) -> &'static str {
        "material"
    }

    fn attrs(&self) -> Vec<Attr> {
        vec![
            Attr::ident("name", Some(&self.name)),
            Attr::ident("class", self.class.as_ref()),
            Attr::ident("texture", self.texture.as_ref()),
            Attr::vector_def("texrepeat", self.texrepeat.as_ref(), &[1.0, 1.0]),
            Attr::boolean_def("texuniform", self.texuniform, false),
            Attr::float_def("emission", self.emission, 0.0),
            Attr::float_def("specular", self.specular, 0.5),
            Attr::float_def("shininess", self.shininess, 0.5),
            Attr::float_def("reflectance", self.reflectance, 0.0),
            Attr::float_def("metallic", self.metallic, -1.0),
            Attr::float_def("roughness", self.roughness, -1.0),
            Attr::vector_def("rgba", self.rgba.as_ref(), &[1.0, 1.0, 1.0, 1.0]),
        ]
    }

    fn children(&self) -> Vec<&dyn Element> {
        self.layers.iter().map(|l| l as &dyn Element).collect()
    }
}

/// One texture layer of a PBR material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    texture: Name,
    role: LayerRole,
}

impl Layer {
    pub fn new(texture: impl Into<String>, role: LayerRole) -> Result<Layer, ElementError> {
        let mut v = Violations::new("layer");
        let texture = v.check(Name::new("texture", texture.into()));
        v.finish()?;
        Ok(Layer {
            texture: texture.expect("texture checked above"),
            role,
        })
    }
}

impl Element for Layer {
    fn tag(&self) -> &'static str {
        "layer"
    }

    fn attrs(&self) -> Vec<Attr> {
        vec![
            Attr::ident("texture", Some(&self.texture)),
            Attr::keyword("role", Some(self.role)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_only_material_renders_single_attribute() {
        let material = Material::builder("steel").build().unwrap();
        assert_eq!(material.render(true), r#"<material name="steel"/>"#);
    }

    #[test]
    fn test_all_defaults_rendered_when_included() {
        let material = Material::builder("steel").build().unwrap();
        let xml = material.render(false);
        assert_eq!(
            xml,
            r#"<material name="steel" texrepeat="1 1" texuniform="false" emission="0" specular="0.5" shininess="0.5" reflectance="0" metallic="-1" roughness="-1" rgba="1 1 1 1"/>"#
        );
    }

    #[test]
    fn test_explicit_default_still_rendered() {
        let material = Material::builder("steel").specular(0.5).build().unwrap();
        assert_eq!(
            material.render(true),
            r#"<material name="steel" specular="0.5"/>"#
        );
    }

    #[test]
    fn test_bad_fields_batch_reported() {
        let err = Material::builder("steel")
            .specular(1.5)
            .rgba([1.0, 0.0, 0.0])
            .build()
            .unwrap_err();
        assert_eq!(err.tag, "material");
        assert_eq!(err.violations.len(), 2);
        assert!(err.names_field("specular"));
        assert!(err.names_field("rgba"));
    }

    #[test]
    fn test_layers_render_as_children() {
        let material = Material::builder("painted")
            .layer(Layer::new("base_color", LayerRole::Rgb).unwrap())
            .layer(Layer::new("bumps", LayerRole::Normal).unwrap())
            .build()
            .unwrap();
        assert_eq!(
            material.render(true),
            r#"<material name="painted"><layer texture="base_color" role="rgb"/><layer texture="bumps" role="normal"/></material>"#
        );
    }

    #[test]
    fn test_invalid_name_rejected() {
        let err = Material::builder("no spaces allowed").build().unwrap_err();
        assert!(err.names_field("name"));
    }
}
