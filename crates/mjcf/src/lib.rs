//! mjcf — typed, validated MJCF scene construction and XML generation.
//!
//! This is the umbrella crate re-exporting the public surface of the
//! sub-crates: build a scene graph out of typed elements, get every
//! malformed value reported at construction, then render conformant
//! MJCF XML from the root.
//!
//! ```
//! use mjcf::{Element, Geom, Mujoco, Worldbody};
//!
//! let model = Mujoco::builder()
//!     .model("minimal")
//!     .worldbody(
//!         Worldbody::builder()
//!             .geom(Geom::plane(5.0, 5.0, 0.1).name("floor").build().unwrap())
//!             .build()
//!             .unwrap(),
//!     )
//!     .build();
//!
//! let xml = model.render(true);
//! assert!(xml.contains("<worldbody>"));
//! ```

pub use mjcf_types::{
    self as types, Align, Angle, Cone, Coordinate, EulerSeq, FluidShape, GeomType,
    InertiaFromGeom, Integrator, Jacobian, JointType, Keyword, LayerRole, LightType, Limited,
    LrMode, MeshInertia, Name, Orientation, SiteType, Solver, Toggle, TrackingMode, ValueError,
    Vec2, Vec3, Vec4, Vec5, Vec6, GRAVITY,
};

pub use mjcf_model::{
    self as model, to_pretty_xml, to_xml, Asset, AssetItem, Attr, AttrValue, Body, BodyChild,
    Camera, Compiler, Element, ElementError, Flag, FreeJoint, Geom, Hfield, Inertial, Joint,
    Layer, LengthRange, Light, Material, Mesh, ModelAsset, Mujoco, SimOption, Site, Size,
    Statistic, Violation, Worldbody, FRICTION_DEFAULT, SOLIMP_DEFAULT, SOLREF_DEFAULT,
};
