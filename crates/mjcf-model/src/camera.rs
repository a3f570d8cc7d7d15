//! Cameras.

use crate::attr::Attr;
use crate::element::Element;
use crate::error::{ElementError, Violations};
use mjcf_types::{scalar, vector, DVec, Name, Orientation, TrackingMode, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// A camera attached to a body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    name: Option<Name>,
    class: Option<Name>,
    orthographic: Option<bool>,
    fovy: Option<f64>,
    ipd: Option<f64>,
    resolution: Option<[i64; 2]>,
    pos: Option<Vec3>,
    orientation: Option<Orientation>,
    mode: Option<TrackingMode>,
    target: Option<Name>,
    focal: Option<Vec2>,
    focalpixel: Option<[i64; 2]>,
    principal: Option<Vec2>,
    principalpixel: Option<Vec2>,
    sensorsize: Option<Vec2>,
    user: Option<DVec>,
}

impl Camera {
    pub fn builder() -> CameraBuilder {
        CameraBuilder::default()
    }

    pub fn name(&self) -> Option<&Name> {
        self.name.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CameraBuilder {
    name: Option<String>,
    class: Option<String>,
    orthographic: Option<bool>,
    fovy: Option<f64>,
    ipd: Option<f64>,
    resolution: Option<[i64; 2]>,
    pos: Option<Vec<f64>>,
    orientation: Option<Orientation>,
    mode: Option<TrackingMode>,
    target: Option<String>,
    focal: Option<Vec<f64>>,
    focalpixel: Option<[i64; 2]>,
    principal: Option<Vec<f64>>,
    principalpixel: Option<Vec<f64>>,
    sensorsize: Option<Vec<f64>>,
    user: Option<Vec<f64>>,
}

impl CameraBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn orthographic(mut self, orthographic: bool) -> Self {
        self.orthographic = Some(orthographic);
        self
    }

    /// Vertical field of view in degrees (or length units when
    /// orthographic).
    pub fn fovy(mut self, fovy: f64) -> Self {
        self.fovy = Some(fovy);
        self
    }

    /// Inter-pupilary distance, used only for stereo rendering.
    pub fn ipd(mut self, ipd: f64) -> Self {
        self.ipd = Some(ipd);
        self
    }

    pub fn resolution(mut self, width: i64, height: i64) -> Self {
        self.resolution = Some([width, height]);
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

    pub fn mode(mut self, mode: TrackingMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Body targeted by the `targetbody`/`targetbodycom` modes.
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn focal(mut self, focal: impl Into<Vec<f64>>) -> Self {
        self.focal = Some(focal.into());
        self
    }

    pub fn focalpixel(mut self, x: i64, y: i64) -> Self {
        self.focalpixel = Some([x, y]);
        self
    }

    pub fn principal(mut self, principal: impl Into<Vec<f64>>) -> Self {
        self.principal = Some(principal.into());
        self
    }

    pub fn principalpixel(mut self, principalpixel: impl Into<Vec<f64>>) -> Self {
        self.principalpixel = Some(principalpixel.into());
        self
    }

    pub fn sensorsize(mut self, sensorsize: impl Into<Vec<f64>>) -> Self {
        self.sensorsize = Some(sensorsize.into());
        self
    }

    pub fn user(mut self, user: impl Into<Vec<f64>>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn build(self) -> Result<Camera, ElementError> {
        let mut v = Violations::new("camera");

        let name = v.check_opt(self.name.map(|s| Name::new("name", s)));
        let class = v.check_opt(self.class.map(|s| Name::new("class", s)));
        let target = v.check_opt(self.target.map(|s| Name::new("target", s)));
        let fovy = v.check_opt(self.fovy.map(|x| scalar::positive("fovy", x)));
        let ipd = v.check_opt(self.ipd.map(|x| scalar::non_negative("ipd", x)));
        let pos = v.check_opt(self.pos.as_deref().map(|r| vector::vec3("pos", r)));
        let focal = v.check_opt(self.focal.as_deref().map(|r| vector::vec2("focal", r)));
        let principal = v.check_opt(
            self.principal
                .as_deref()
                .map(|r| vector::vec2("principal", r)),
        );
        let principalpixel = v.check_opt(
            self.principalpixel
                .as_deref()
                .map(|r| vector::vec2("principalpixel", r)),
        );
        let sensorsize = v.check_opt(
            self.sensorsize
                .as_deref()
                .map(|r| vector::vec2("sensorsize", r)),
        );

        if let Some([w, h]) = self.resolution {
            v.check(scalar::int_at_least("resolution", w, 1));
            v.check(scalar::int_at_least("resolution", h, 1));
        }

        v.finish()?;
        Ok(Camera {
            name,
            class,
            orthographic: self.orthographic,
            fovy,
            ipd,
            resolution: self.resolution,
            pos,
            orientation: self.orientation,
            mode: self.mode,
            target,
            focal,
            focalpixel: self.focalpixel,
            principal,
            principalpixel,
            sensorsize,
            user: self.user.map(DVec::from_vec),
        })
    }
}

impl Element for Camera {
    fn tag(&self) -> &'static str {
        "camera"
    }

    fn attrs(&self) -> Vec<Attr> {
        vec![
            Attr::ident("name", self.name.as_ref()),
            Attr::ident("class", self.class.as_ref()),
            Attr::boolean_def("orthographic", self.orthographic, false),
            Attr::float_def("fovy", self.fovy, 45.0),
            Attr::float_def("ipd", self.ipd, 0.068),
            Attr::int_vector_def(
                "resolution",
                self.resolution.as_ref().map(|r| r.as_slice()),
                &[1, 1],
            ),
            Attr::vector_def("pos", self.pos.as_ref(), &[0.0, 0.0, 0.0]),
            Attr::orientation_def(self.orientation.as_ref(), &[1.0, 0.0, 0.0, 0.0]),
            Attr::keyword_def("mode", self.mode, TrackingMode::Fixed),
            Attr::ident("target", self.target.as_ref()),
            Attr::vector_def("focal", self.focal.as_ref(), &[0.0, 0.0]),
            Attr::int_vector_def(
                "focalpixel",
                self.focalpixel.as_ref().map(|r| r.as_slice()),
                &[1, 1],
            ),
            Attr::vector_def("principal", self.principal.as_ref(), &[0.0, 0.0]),
            Attr::vector_def("principalpixel", self.principalpixel.as_ref(), &[0.0, 0.0]),
            Attr::vector_def("sensorsize", self.sensorsize.as_ref(), &[0.0, 0.0]),
            Attr::vector("user", self.user.as_ref()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracking_camera() {
        let cam = Camera::builder()
            .name("over_shoulder")
            .mode(TrackingMode::TrackCom)
            .pos([0.0, -2.0, 1.0])
            .build()
            .unwrap();
        assert_eq!(
            cam.render(true),
            r#"<camera name="over_shoulder" pos="0 -2 1" mode="trackcom"/>"#
        );
    }

    #[test]
    fn test_defaults_include_fovy_and_ipd() {
        let cam = Camera::builder().build().unwrap();
        let xml = cam.render(false);
        assert!(xml.contains(r#"fovy="45""#), "{xml}");
        assert!(xml.contains(r#"ipd="0.068""#), "{xml}");
        assert!(xml.contains(r#"resolution="1 1""#), "{xml}");
        assert!(xml.contains(r#"mode="fixed""#), "{xml}");
    }

    #[test]
    fn test_bad_resolution_rejected() {
        let err = Camera::builder().resolution(0, 480).build().unwrap_err();
        assert!(err.names_field("resolution"));
    }
}
