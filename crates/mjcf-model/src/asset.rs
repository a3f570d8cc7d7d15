//! The asset section: meshes, height fields, materials and referenced
//! sub-models.

use crate::attr::Attr;
use crate::element::Element;
use crate::error::{ElementError, Violations};
use crate::material::Material;
use mjcf_types::{scalar, vector, MeshInertia, Name, ValueError, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One entry of the asset section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AssetItem {
    Mesh(Mesh),
    Hfield(Hfield),
    Material(Material),
    Model(ModelAsset),
}

impl AssetItem {
    fn as_element(&self) -> &dyn Element {
        match self {
            AssetItem::Mesh(e) => e,
            AssetItem::Hfield(e) => e,
            AssetItem::Material(e) => e,
            AssetItem::Model(e) => e,
        }
    }
}

impl From<Mesh> for AssetItem {
    fn from(e: Mesh) -> Self {
        AssetItem::Mesh(e)
    }
}

impl From<Hfield> for AssetItem {
    fn from(e: Hfield) -> Self {
        AssetItem::Hfield(e)
    }
}

impl From<Material> for AssetItem {
    fn from(e: Material) -> Self {
        AssetItem::Material(e)
    }
}

impl From<ModelAsset> for AssetItem {
    fn from(e: ModelAsset) -> Self {
        AssetItem::Model(e)
    }
}

/// The `<asset>` grouping element. Carries no attributes of its own;
/// items render in the order they were added.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Asset {
    items: Vec<AssetItem>,
}

impl Asset {
    pub fn builder() -> AssetBuilder {
        AssetBuilder::default()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AssetBuilder {
    items: Vec<AssetItem>,
}

impl AssetBuilder {
    pub fn item(mut self, item: impl Into<AssetItem>) -> Self {
        self.items.push(item.into());
        self
    }

    pub fn mesh(self, mesh: Mesh) -> Self {
        self.item(mesh)
    }

    pub fn hfield(self, hfield: Hfield) -> Self {
        self.item(hfield)
    }

    pub fn material(self, material: Material) -> Self {
        self.item(material)
    }

    pub fn model(self, model: ModelAsset) -> Self {
        self.item(model)
    }

    /// The asset section itself has nothing to validate; its items were
    /// validated when they were built.
    pub fn build(self) -> Asset {
        Asset { items: self.items }
    }
}

impl Element for Asset {
    fn tag(&self) -> &'static str {
        "asset"
    }

    fn attrs(&self) -> Vec<Attr> {
        Vec::new()
    }

    fn children(&self) -> Vec<&dyn Element> {
        self.items.iter().map(AssetItem::as_element).collect()
    }
}

/// A mesh asset, either loaded from a file or given inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    name: Option<Name>,
    class: Option<Name>,
    content_type: Option<String>,
    file: Option<PathBuf>,
    vertex: Option<Vec<[f64; 3]>>,
    normal: Option<Vec<[f64; 3]>>,
    texcoord: Option<Vec<[f64; 2]>>,
    face: Option<Vec<[i64; 3]>>,
    refpos: Option<Vec3>,
    refquat: Option<Vec4>,
    scale: Option<Vec3>,
    smoothnormal: Option<bool>,
    maxhullvert: Option<i64>,
    inertia: Option<MeshInertia>,
    material: Option<Name>,
}

impl Mesh {
    pub fn builder() -> MeshBuilder {
        MeshBuilder::default()
    }

    /// Mesh loaded from a file, named after the asset.
    pub fn from_file(name: impl Into<String>, file: impl Into<PathBuf>) -> MeshBuilder {
        MeshBuilder::default().name(name).file(file)
    }

    pub fn name(&self) -> Option<&Name> {
        self.name.as_ref()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex.as_ref().map_or(0, Vec::len)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MeshBuilder {
    name: Option<String>,
    class: Option<String>,
    content_type: Option<String>,
    file: Option<PathBuf>,
    vertex: Option<Vec<[f64; 3]>>,
    normal: Option<Vec<[f64; 3]>>,
    texcoord: Option<Vec<[f64; 2]>>,
    face: Option<Vec<[i64; 3]>>,
    refpos: Option<Vec<f64>>,
    refquat: Option<Vec<f64>>,
    scale: Option<Vec<f64>>,
    smoothnormal: Option<bool>,
    maxhullvert: Option<i64>,
    inertia: Option<MeshInertia>,
    material: Option<String>,
}

impl MeshBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn vertices(mut self, vertex: impl IntoIterator<Item = [f64; 3]>) -> Self {
        self.vertex = Some(vertex.into_iter().collect());
        self
    }

    pub fn normals(mut self, normal: impl IntoIterator<Item = [f64; 3]>) -> Self {
        self.normal = Some(normal.into_iter().collect());
        self
    }

    pub fn texcoords(mut self, texcoord: impl IntoIterator<Item = [f64; 2]>) -> Self {
        self.texcoord = Some(texcoord.into_iter().collect());
        self
    }

    pub fn faces(mut self, face: impl IntoIterator<Item = [i64; 3]>) -> Self {
        self.face = Some(face.into_iter().collect());
        self
    }

    pub fn refpos(mut self, refpos: impl Into<Vec<f64>>) -> Self {
        self.refpos = Some(refpos.into());
        self
    }

    pub fn refquat(mut self, refquat: impl Into<Vec<f64>>) -> Self {
        self.refquat = Some(refquat.into());
        self
    }

    pub fn scale(mut self, scale: impl Into<Vec<f64>>) -> Self {
        self.scale = Some(scale.into());
        self
    }

    pub fn smoothnormal(mut self, smoothnormal: bool) -> Self {
        self.smoothnormal = Some(smoothnormal);
        self
    }

    pub fn maxhullvert(mut self, maxhullvert: i64) -> Self {
        self.maxhullvert = Some(maxhullvert);
        self
    }

    pub fn inertia(mut self, inertia: MeshInertia) -> Self {
        self.inertia = Some(inertia);
        self
    }

    pub fn material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    pub fn build(self) -> Result<Mesh, ElementError> {
        let mut v = Violations::new("mesh");

        let name = v.check_opt(self.name.map(|s| Name::new("name", s)));
        let class = v.check_opt(self.class.map(|s| Name::new("class", s)));
        let material = v.check_opt(self.material.map(|s| Name::new("material", s)));
        let refpos = v.check_opt(self.refpos.as_deref().map(|r| vector::vec3("refpos", r)));
        let refquat = v.check_opt(self.refquat.as_deref().map(|r| {
            let q = vector::vec4("refquat", r)?;
            if q.norm() <= 1e-14 {
                return Err(ValueError::OutOfRange {
                    field: "refquat",
                    value: q.norm(),
                    bound: "quaternion norm must be > 0".to_string(),
                });
            }
            Ok(q)
        }));
        let scale = v.check_opt(self.scale.as_deref().map(|r| vector::vec3("scale", r)));
        let maxhullvert = v.check_opt(
            self.maxhullvert
                .map(|x| scalar::int_at_least("maxhullvert", x, -1)),
        );
        if let Some(faces) = &self.face {
            for f in faces {
                if let Some(&bad) = f.iter().find(|&&i| i < 0) {
                    v.check::<()>(Err(ValueError::OutOfRange {
                        field: "face",
                        value: bad as f64,
                        bound: "vertex indices must be >= 0".to_string(),
                    }));
                    break;
                }
            }
        }

        v.finish()?;
        Ok(Mesh {
            name,
            class,
            content_type: self.content_type,
            file: self.file,
            vertex: self.vertex,
            normal: self.normal,
            texcoord: self.texcoord,
            face: self.face,
            refpos,
            refquat,
            scale,
            smoothnormal: self.smoothnormal,
            maxhullvert,
            inertia: self.inertia,
            material,
        })
    }
}

fn flatten3(rows: Option<&Vec<[f64; 3]>>) -> Option<Vec<f64>> {
    rows.map(|r| r.iter().flatten().copied().collect())
}

impl Element for Mesh {
    fn tag(&self) -> &'static str {
        "mesh"
    }

    fn attrs(&self) -> Vec<Attr> {
        let texcoord: Option<Vec<f64>> = self
            .texcoord
            .as_ref()
            .map(|r| r.iter().flatten().copied().collect());
        let face: Option<Vec<i64>> = self
            .face
            .as_ref()
            .map(|r| r.iter().flatten().copied().collect());
        vec![
            Attr::ident("name", self.name.as_ref()),
            Attr::ident("class", self.class.as_ref()),
            Attr::string("content_type", self.content_type.as_deref()),
            Attr::string(
                "file",
                self.file.as_ref().map(|p| p.to_str().unwrap_or_default()),
            ),
            Attr::vector("vertex", flatten3(self.vertex.as_ref()).as_ref()),
            Attr::vector("normal", flatten3(self.normal.as_ref()).as_ref()),
            Attr::vector("texcoord", texcoord.as_ref()),
            Attr::int_vector("face", face.as_deref()),
            Attr::vector_def("refpos", self.refpos.as_ref(), &[1.0, 1.0, 1.0]),
            Attr::vector_def("refquat", self.refquat.as_ref(), &[1.0, 0.0, 0.0, 0.0]),
            Attr::vector_def("scale", self.scale.as_ref(), &[1.0, 1.0, 1.0]),
            Attr::boolean_def("smoothnormal", self.smoothnormal, false),
            Attr::int_def("maxhullvert", self.maxhullvert, -1),
            Attr::keyword_def("inertia", self.inertia, MeshInertia::Convex),
            Attr::ident("material", self.material.as_ref()),
        ]
    }
}

/// A height-field asset. The elevation grid is normalized to `[0, 1]`
/// at construction, matching what the compiler expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hfield {
    name: Option<Name>,
    content_type: Option<String>,
    file: Option<PathBuf>,
    nrow: Option<i64>,
    ncol: Option<i64>,
    elevation: Option<Vec<f64>>,
    size: Vec4,
}

impl Hfield {
    /// Size is required: `[radius_x, radius_y, elevation_z, base_z]`.
    pub fn builder(size: impl Into<Vec<f64>>) -> HfieldBuilder {
        HfieldBuilder {
            size: size.into(),
            name: None,
            content_type: None,
            file: None,
            nrow: None,
            ncol: None,
            elevation: None,
        }
    }

    pub fn name(&self) -> Option<&Name> {
        self.name.as_ref()
    }

    pub fn elevation(&self) -> Option<&[f64]> {
        self.elevation.as_deref()
    }
}

#[derive(Debug, Clone)]
pub struct HfieldBuilder {
    size: Vec<f64>,
    name: Option<String>,
    content_type: Option<String>,
    file: Option<PathBuf>,
    nrow: Option<i64>,
    ncol: Option<i64>,
    elevation: Option<Vec<f64>>,
}

impl HfieldBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn grid(mut self, nrow: i64, ncol: i64) -> Self {
        self.nrow = Some(nrow);
        self.ncol = Some(ncol);
        self
    }

    pub fn elevation(mut self, elevation: impl Into<Vec<f64>>) -> Self {
        self.elevation = Some(elevation.into());
        self
    }

    pub fn build(self) -> Result<Hfield, ElementError> {
        let mut v = Violations::new("hfield");

        let name = v.check_opt(self.name.map(|s| Name::new("name", s)));
        let size = v.check(vector::positive::<4>("size", &self.size));
        let nrow = v.check_opt(self.nrow.map(|x| scalar::int_at_least("nrow", x, 0)));
        let ncol = v.check_opt(self.ncol.map(|x| scalar::int_at_least("ncol", x, 0)));

        let elevation = v.check_opt(self.elevation.map(|elev| {
            if let (Some(nrow), Some(ncol)) = (self.nrow, self.ncol) {
                let expected = (nrow * ncol).max(0) as usize;
                if elev.len() != expected {
                    return Err(ValueError::ArityMismatch {
                        field: "elevation",
                        expected,
                        actual: elev.len(),
                    });
                }
            }
            Ok(normalize_elevation(elev))
        }));

        v.finish()?;
        Ok(Hfield {
            name,
            content_type: self.content_type,
            file: self.file,
            nrow,
            ncol,
            elevation,
            size: size.expect("size checked above"),
        })
    }
}

/// Rescale samples to span `[0, 1]`; a flat grid is left untouched.
fn normalize_elevation(mut elev: Vec<f64>) -> Vec<f64> {
    let min = elev.iter().copied().fold(f64::INFINITY, f64::min);
    let max = elev.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max > min {
        for sample in &mut elev {
            *sample = (*sample - min) / (max - min);
        }
    }
    elev
}

impl Element for Hfield {
    fn tag(&self) -> &'static str {
        "hfield"
    }

    fn attrs(&self) -> Vec<Attr> {
        vec![
            Attr::ident("name", self.name.as_ref()),
            Attr::string("content_type", self.content_type.as_deref()),
            Attr::string(
                "file",
                self.file.as_ref().map(|p| p.to_str().unwrap_or_default()),
            ),
            Attr::int("nrow", self.nrow),
            Attr::int("ncol", self.ncol),
            Attr::vector("elevation", self.elevation.as_ref()),
            Attr::vector("size", Some(&self.size)),
        ]
    }
}

/// A referenced sub-model (`<model>` inside the asset section).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelAsset {
    name: Option<Name>,
    file: PathBuf,
    content_type: Option<String>,
}

impl ModelAsset {
    /// The file reference is required.
    pub fn builder(file: impl Into<PathBuf>) -> ModelAssetBuilder {
        ModelAssetBuilder {
            file: file.into(),
            name: None,
            content_type: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ModelAssetBuilder {
    file: PathBuf,
    name: Option<String>,
    content_type: Option<String>,
}

impl ModelAssetBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn build(self) -> Result<ModelAsset, ElementError> {
        let mut v = Violations::new("model");
        let name = v.check_opt(self.name.map(|s| Name::new("name", s)));
        v.finish()?;
        Ok(ModelAsset {
            name,
            file: self.file,
            content_type: self.content_type,
        })
    }
}

impl Element for ModelAsset {
    fn tag(&self) -> &'static str {
        "model"
    }

    fn attrs(&self) -> Vec<Attr> {
        vec![
            Attr::ident("name", self.name.as_ref()),
            Attr::string("file", self.file.to_str()),
            Attr::string("content_type", self.content_type.as_deref()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_items_render_in_order() {
        let asset = Asset::builder()
            .material(Material::builder("steel").build().unwrap())
            .mesh(Mesh::from_file("bunny", "meshes/bunny.obj").build().unwrap())
            .build();
        let xml = asset.render(true);
        assert!(
            xml.find("<material").unwrap() < xml.find("<mesh").unwrap(),
            "{xml}"
        );
        assert!(xml.starts_with("<asset>"), "{xml}");
    }

    #[test]
    fn test_mesh_inline_geometry() {
        let mesh = Mesh::builder()
            .name("tri")
            .vertices([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]])
            .faces([[0, 1, 2]])
            .build()
            .unwrap();
        let xml = mesh.render(true);
        assert!(xml.contains(r#"vertex="0 0 0 1 0 0 0 1 0""#), "{xml}");
        assert!(xml.contains(r#"face="0 1 2""#), "{xml}");
    }

    #[test]
    fn test_mesh_negative_face_index_rejected() {
        let err = Mesh::builder()
            .name("tri")
            .faces([[0, -1, 2]])
            .build()
            .unwrap_err();
        assert!(err.names_field("face"));
    }

    #[test]
    fn test_hfield_elevation_normalized() {
        let hfield = Hfield::builder([5.0, 5.0, 1.0, 0.1])
            .name("terrain")
            .grid(2, 2)
            .elevation([1.0, 3.0, 2.0, 5.0])
            .build()
            .unwrap();
        let elev = hfield.elevation().unwrap();
        assert_eq!(elev[0], 0.0);
        assert_eq!(elev[3], 1.0);
        assert!(elev.iter().all(|&e| (0.0..=1.0).contains(&e)));
    }

    #[test]
    fn test_hfield_elevation_length_checked() {
        let err = Hfield::builder([5.0, 5.0, 1.0, 0.1])
            .grid(2, 3)
            .elevation([1.0, 2.0, 3.0, 4.0])
            .build()
            .unwrap_err();
        assert!(err.names_field("elevation"));
    }

    #[test]
    fn test_hfield_size_must_be_positive() {
        let err = Hfield::builder([5.0, 0.0, 1.0, 0.1]).build().unwrap_err();
        assert!(err.names_field("size"));
    }
}
