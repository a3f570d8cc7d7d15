//! The top-level `<mujoco>` element.

use crate::asset::Asset;
use crate::attr::Attr;
use crate::body::Worldbody;
use crate::compiler::Compiler;
use crate::element::Element;
use crate::option::SimOption;
use crate::size::Size;
use crate::statistic::Statistic;
use serde::{Deserialize, Serialize};

/// The unique root element of an MJCF file.
///
/// Sections render in schema order: options, compilers, sizes,
/// statistics, assets, then the worldbody.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mujoco {
    model: Option<String>,
    options: Vec<SimOption>,
    compilers: Vec<Compiler>,
    sizes: Vec<Size>,
    statistics: Vec<Statistic>,
    assets: Vec<Asset>,
    worldbody: Option<Worldbody>,
}

impl Mujoco {
    pub fn builder() -> MujocoBuilder {
        MujocoBuilder::default()
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn worldbody(&self) -> Option<&Worldbody> {
        self.worldbody.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MujocoBuilder {
    model: Option<String>,
    options: Vec<SimOption>,
    compilers: Vec<Compiler>,
    sizes: Vec<Size>,
    statistics: Vec<Statistic>,
    assets: Vec<Asset>,
    worldbody: Option<Worldbody>,
}

impl MujocoBuilder {
    /// Model name shown in the simulator title bar. May contain spaces;
    /// it is a display string, not an identifier.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn option(mut self, option: SimOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn compiler(mut self, compiler: Compiler) -> Self {
        self.compilers.push(compiler);
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.sizes.push(size);
        self
    }

    pub fn statistic(mut self, statistic: Statistic) -> Self {
        self.statistics.push(statistic);
        self
    }

    pub fn asset(mut self, asset: Asset) -> Self {
        self.assets.push(asset);
        self
    }

    pub fn worldbody(mut self, worldbody: Worldbody) -> Self {
        self.worldbody = Some(worldbody);
        self
    }

    /// Every section was validated on its own construction; the root has
    /// nothing left to check.
    pub fn build(self) -> Mujoco {
        Mujoco {
            model: self.model,
            options: self.options,
            compilers: self.compilers,
            sizes: self.sizes,
            statistics: self.statistics,
            assets: self.assets,
            worldbody: self.worldbody,
        }
    }
}

impl Element for Mujoco {
    fn tag(&self) -> &'static str {
        "mujoco"
    }

    fn attrs(&self) -> Vec<Attr> {
        vec![Attr::string_def(
            "model",
            self.model.as_deref(),
            "MuJoCo Model",
        )]
    }

    fn children(&self) -> Vec<&dyn Element> {
        let mut children: Vec<&dyn Element> = Vec::new();
        children.extend(self.options.iter().map(|e| e as &dyn Element));
        children.extend(self.compilers.iter().map(|e| e as &dyn Element));
        children.extend(self.sizes.iter().map(|e| e as &dyn Element));
        children.extend(self.statistics.iter().map(|e| e as &dyn Element));
        children.extend(self.assets.iter().map(|e| e as &dyn Element));
        children.extend(self.worldbody.iter().map(|e| e as &dyn Element));
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Geom;

    #[test]
    fn test_empty_model() {
        let model = Mujoco::builder().model("empty").build();
        assert_eq!(model.render(true), r#"<mujoco model="empty"/>"#);
        assert_eq!(
            Mujoco::builder().build().render(false),
            r#"<mujoco model="MuJoCo Model"/>"#
        );
    }

    #[test]
    fn test_section_order() {
        let model = Mujoco::builder()
            .model("scene")
            .worldbody(
                Worldbody::builder()
                    .geom(Geom::plane(5.0, 5.0, 0.1).build().unwrap())
                    .build()
                    .unwrap(),
            )
            .option(SimOption::builder().timestep(0.001).build().unwrap())
            .build();
        let xml = model.render(true);
        // options always render before the worldbody, whatever the call order
        assert!(
            xml.find("<option").unwrap() < xml.find("<worldbody").unwrap(),
            "{xml}"
        );
    }
}
