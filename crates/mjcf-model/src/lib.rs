//! Typed MJCF elements and XML generation.
//!
//! One struct per MJCF element kind, each constructed through a fallible
//! builder: every supplied field runs through its constraint, and all
//! violations of one `build()` call come back in a single
//! [`ElementError`]. A constructed element is always valid, so the
//! writer never re-checks anything — it just walks the tree.

pub mod asset;
pub mod attr;
pub mod body;
pub mod camera;
pub mod compiler;
pub mod defaults;
pub mod element;
pub mod error;
pub mod geom;
pub mod joint;
pub mod light;
pub mod material;
pub mod option;
pub mod root;
pub mod site;
pub mod size;
pub mod statistic;
pub mod writer;

pub use asset::{Asset, AssetBuilder, AssetItem, Hfield, Mesh, ModelAsset};
pub use attr::{Attr, AttrValue};
pub use body::{Body, BodyBuilder, BodyChild, Inertial, Worldbody, WorldbodyBuilder};
pub use camera::{Camera, CameraBuilder};
pub use compiler::{Compiler, CompilerBuilder, LengthRange};
pub use defaults::{FRICTION_DEFAULT, SOLIMP_DEFAULT, SOLREF_DEFAULT};
pub use element::Element;
pub use error::{ElementError, Violation};
pub use geom::{Geom, GeomBuilder};
pub use joint::{FreeJoint, Joint, JointBuilder};
pub use light::{Light, LightBuilder};
pub use material::{Layer, Material, MaterialBuilder};
pub use option::{Flag, SimOption, SimOptionBuilder};
pub use root::{Mujoco, MujocoBuilder};
pub use site::{Site, SiteBuilder};
pub use size::Size;
pub use statistic::Statistic;
pub use writer::{to_pretty_xml, to_xml};
