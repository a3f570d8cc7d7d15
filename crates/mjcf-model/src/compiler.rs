//! Compiler settings (`<compiler>`) and length-range estimation.

use crate::attr::Attr;
use crate::element::Element;
use crate::error::{ElementError, Violations};
use mjcf_types::{scalar, Angle, Coordinate, EulerSeq, InertiaFromGeom, LrMode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Compile-time model processing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compiler {
    autolimits: Option<bool>,
    boundmass: Option<f64>,
    boundinertia: Option<f64>,
    settotalmass: Option<f64>,
    balanceinertia: Option<bool>,
    strippath: Option<bool>,
    coordinate: Option<Coordinate>,
    angle: Option<Angle>,
    fitaabb: Option<bool>,
    eulerseq: Option<EulerSeq>,
    meshdir: Option<PathBuf>,
    texturedir: Option<PathBuf>,
    discardvisual: Option<bool>,
    usethread: Option<bool>,
    fusestatic: Option<bool>,
    inertiafromgeom: Option<InertiaFromGeom>,
    inertiagrouprange: Option<[i64; 2]>,
    saveinertial: Option<bool>,
    assetdir: Option<PathBuf>,
    alignfree: Option<bool>,
    lengthrange: Option<LengthRange>,
}

impl Compiler {
    pub fn builder() -> CompilerBuilder {
        CompilerBuilder::default()
    }

    pub fn eulerseq(&self) -> Option<&EulerSeq> {
        self.eulerseq.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompilerBuilder {
    autolimits: Option<bool>,
    boundmass: Option<f64>,
    boundinertia: Option<f64>,
    settotalmass: Option<f64>,
    balanceinertia: Option<bool>,
    strippath: Option<bool>,
    coordinate: Option<Coordinate>,
    angle: Option<Angle>,
    fitaabb: Option<bool>,
    eulerseq: Option<String>,
    meshdir: Option<PathBuf>,
    texturedir: Option<PathBuf>,
    discardvisual: Option<bool>,
    usethread: Option<bool>,
    fusestatic: Option<bool>,
    inertiafromgeom: Option<InertiaFromGeom>,
    inertiagrouprange: Option<[i64; 2]>,
    saveinertial: Option<bool>,
    assetdir: Option<PathBuf>,
    alignfree: Option<bool>,
    lengthrange: Option<LengthRange>,
}

impl CompilerBuilder {
    pub fn autolimits(mut self, autolimits: bool) -> Self {
        self.autolimits = Some(autolimits);
        self
    }

    /// Masses below this value are rounded up to it.
    pub fn boundmass(mut self, boundmass: f64) -> Self {
        self.boundmass = Some(boundmass);
        self
    }

    pub fn boundinertia(mut self, boundinertia: f64) -> Self {
        self.boundinertia = Some(boundinertia);
        self
    }

    /// Rescale all masses to this total; non-positive values disable it.
    pub fn settotalmass(mut self, settotalmass: f64) -> Self {
        self.settotalmass = Some(settotalmass);
        self
    }

    pub fn balanceinertia(mut self, balanceinertia: bool) -> Self {
        self.balanceinertia = Some(balanceinertia);
        self
    }

    pub fn strippath(mut self, strippath: bool) -> Self {
        self.strippath = Some(strippath);
        self
    }

    pub fn coordinate(mut self, coordinate: Coordinate) -> Self {
        self.coordinate = Some(coordinate);
        self
    }

    pub fn angle(mut self, angle: Angle) -> Self {
        self.angle = Some(angle);
        self
    }

    pub fn fitaabb(mut self, fitaabb: bool) -> Self {
        self.fitaabb = Some(fitaabb);
        self
    }

    pub fn eulerseq(mut self, eulerseq: impl Into<String>) -> Self {
        self.eulerseq = Some(eulerseq.into());
        self
    }

    pub fn meshdir(mut self, meshdir: impl Into<PathBuf>) -> Self {
        self.meshdir = Some(meshdir.into());
        self
    }

    pub fn texturedir(mut self, texturedir: impl Into<PathBuf>) -> Self {
        self.texturedir = Some(texturedir.into());
        self
    }

    pub fn discardvisual(mut self, discardvisual: bool) -> Self {
        self.discardvisual = Some(discardvisual);
        self
    }

    pub fn usethread(mut self, usethread: bool) -> Self {
        self.usethread = Some(usethread);
        self
    }

    pub fn fusestatic(mut self, fusestatic: bool) -> Self {
        self.fusestatic = Some(fusestatic);
        self
    }

    pub fn inertiafromgeom(mut self, inertiafromgeom: InertiaFromGeom) -> Self {
        self.inertiafromgeom = Some(inertiafromgeom);
        self
    }

    /// Range of geom groups used for inertia inference.
    pub fn inertiagrouprange(mut self, lo: i64, hi: i64) -> Self {
        self.inertiagrouprange = Some([lo, hi]);
        self
    }

    pub fn saveinertial(mut self, saveinertial: bool) -> Self {
        self.saveinertial = Some(saveinertial);
        self
    }

    pub fn assetdir(mut self, assetdir: impl Into<PathBuf>) -> Self {
        self.assetdir = Some(assetdir.into());
        self
    }

    pub fn alignfree(mut self, alignfree: bool) -> Self {
        self.alignfree = Some(alignfree);
        self
    }

    pub fn lengthrange(mut self, lengthrange: LengthRange) -> Self {
        self.lengthrange = Some(lengthrange);
        self
    }

    pub fn build(self) -> Result<Compiler, ElementError> {
        let mut v = Violations::new("compiler");

        let boundmass = v.check_opt(self.boundmass.map(|x| scalar::non_negative("boundmass", x)));
        let boundinertia = v.check_opt(
            self.boundinertia
                .map(|x| scalar::non_negative("boundinertia", x)),
        );
        let eulerseq = v.check_opt(self.eulerseq.map(|s| EulerSeq::new("eulerseq", s)));

        if let Some([lo, hi]) = self.inertiagrouprange {
            v.check(scalar::group("inertiagrouprange", lo));
            v.check(scalar::group("inertiagrouprange", hi));
            if lo > hi {
                v.check::<()>(Err(mjcf_types::ValueError::OutOfRange {
                    field: "inertiagrouprange",
                    value: lo as f64,
                    bound: "lower group must not exceed upper group".to_string(),
                }));
            }
        }

        v.finish()?;
        Ok(Compiler {
            autolimits: self.autolimits,
            boundmass,
            boundinertia,
            settotalmass: self.settotalmass,
            balanceinertia: self.balanceinertia,
            strippath: self.strippath,
            coordinate: self.coordinate,
            angle: self.angle,
            fitaabb: self.fitaabb,
            eulerseq,
            meshdir: self.meshdir,
            texturedir: self.texturedir,
            discardvisual: self.discardvisual,
            usethread: self.usethread,
            fusestatic: self.fusestatic,
            inertiafromgeom: self.inertiafromgeom,
            inertiagrouprange: self.inertiagrouprange,
            saveinertial: self.saveinertial,
            assetdir: self.assetdir,
            alignfree: self.alignfree,
            lengthrange: self.lengthrange,
        })
    }
}

impl Element for Compiler {
    fn tag(&self) -> &'static str {
        "compiler"
    }

    fn attrs(&self) -> Vec<Attr> {
        vec![
            Attr::boolean_def("autolimits", self.autolimits, true),
            Attr::float_def("boundmass", self.boundmass, 0.0),
            Attr::float_def("boundinertia", self.boundinertia, 0.0),
            Attr::float_def("settotalmass", self.settotalmass, -1.0),
            Attr::boolean_def("balanceinertia", self.balanceinertia, false),
            Attr::boolean_def("strippath", self.strippath, false),
            Attr::keyword_def("coordinate", self.coordinate, Coordinate::Local),
            Attr::keyword_def("angle", self.angle, Angle::Degree),
            Attr::boolean_def("fitaabb", self.fitaabb, false),
            Attr::string_def(
                "eulerseq",
                self.eulerseq.as_ref().map(EulerSeq::as_str),
                "xyz",
            ),
            Attr::string(
                "meshdir",
                self.meshdir.as_ref().and_then(|p| p.to_str()),
            ),
            Attr::string(
                "texturedir",
                self.texturedir.as_ref().and_then(|p| p.to_str()),
            ),
            Attr::boolean_def("discardvisual", self.discardvisual, false),
            Attr::boolean_def("usethread", self.usethread, true),
            Attr::boolean_def("fusestatic", self.fusestatic, false),
            Attr::keyword_def(
                "inertiafromgeom",
                self.inertiafromgeom,
                InertiaFromGeom::Auto,
            ),
            Attr::int_vector_def(
                "inertiagrouprange",
                self.inertiagrouprange.as_ref().map(|r| r.as_slice()),
                &[0, 5],
            ),
            Attr::boolean_def("saveinertial", self.saveinertial, false),
            Attr::string(
                "assetdir",
                self.assetdir.as_ref().and_then(|p| p.to_str()),
            ),
            Attr::boolean_def("alignfree", self.alignfree, false),
        ]
    }

    fn children(&self) -> Vec<&dyn Element> {
        self.lengthrange.iter().map(|l| l as &dyn Element).collect()
    }
}

/// Length-range estimation settings (`<lengthrange>` inside
/// `<compiler>`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthRange {
    mode: Option<LrMode>,
    useexisting: Option<bool>,
    uselimit: Option<bool>,
    accel: Option<f64>,
    maxforce: Option<f64>,
    timeconst: Option<f64>,
    timestep: Option<f64>,
    inttotal: Option<f64>,
    interval: Option<f64>,
    tolrange: Option<f64>,
}

impl LengthRange {
    pub fn builder() -> LengthRangeBuilder {
        LengthRangeBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LengthRangeBuilder {
    mode: Option<LrMode>,
    useexisting: Option<bool>,
    uselimit: Option<bool>,
    accel: Option<f64>,
    maxforce: Option<f64>,
    timeconst: Option<f64>,
    timestep: Option<f64>,
    inttotal: Option<f64>,
    interval: Option<f64>,
    tolrange: Option<f64>,
}

impl LengthRangeBuilder {
    pub fn mode(mut self, mode: LrMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn useexisting(mut self, useexisting: bool) -> Self {
        self.useexisting = Some(useexisting);
        self
    }

    pub fn uselimit(mut self, uselimit: bool) -> Self {
        self.uselimit = Some(uselimit);
        self
    }

    pub fn accel(mut self, accel: f64) -> Self {
        self.accel = Some(accel);
        self
    }

    /// Force cap during simulation; zero means no limit.
    pub fn maxforce(mut self, maxforce: f64) -> Self {
        self.maxforce = Some(maxforce);
        self
    }

    pub fn timeconst(mut self, timeconst: f64) -> Self {
        self.timeconst = Some(timeconst);
        self
    }

    pub fn timestep(mut self, timestep: f64) -> Self {
        self.timestep = Some(timestep);
        self
    }

    pub fn inttotal(mut self, inttotal: f64) -> Self {
        self.inttotal = Some(inttotal);
        self
    }

    pub fn interval(mut self, interval: f64) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn tolrange(mut self, tolrange: f64) -> Self {
        self.tolrange = Some(tolrange);
        self
    }

    pub fn build(self) -> Result<LengthRange, ElementError> {
        let mut v = Violations::new("lengthrange");

        let accel = v.check_opt(self.accel.map(|x| scalar::positive("accel", x)));
        let maxforce = v.check_opt(self.maxforce.map(|x| scalar::non_negative("maxforce", x)));
        let timeconst = v.check_opt(self.timeconst.map(|x| scalar::positive("timeconst", x)));
        let timestep = v.check_opt(self.timestep.map(|x| scalar::positive("timestep", x)));
        let inttotal = v.check_opt(self.inttotal.map(|x| scalar::positive("inttotal", x)));
        let interval = v.check_opt(self.interval.map(|x| scalar::positive("interval", x)));
        let tolrange = v.check_opt(self.tolrange.map(|x| scalar::positive("tolrange", x)));

        v.finish()?;
        Ok(LengthRange {
            mode: self.mode,
            useexisting: self.useexisting,
            uselimit: self.uselimit,
            accel,
            maxforce,
            timeconst,
            timestep,
            inttotal,
            interval,
            tolrange,
        })
    }
}

impl Element for LengthRange {
    fn tag(&self) -> &'static str {
        "lengthrange"
    }

    fn attrs(&self) -> Vec<Attr> {
        vec![
            Attr::keyword_def("mode", self.mode, LrMode::Muscle),
            Attr::boolean_def("useexisting", self.useexisting, true),
            Attr::boolean_def("uselimit", self.uselimit, false),
            Attr::float_def("accel", self.accel, 20.0),
            Attr::float_def("maxforce", self.maxforce, 0.0),
            Attr::float_def("timeconst", self.timeconst, 1.0),
            Attr::float_def("timestep", self.timestep, 0.01),
            Attr::float_def("inttotal", self.inttotal, 10.0),
            Attr::float_def("interval", self.interval, 2.0),
            Attr::float_def("tolrange", self.tolrange, 0.05),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiler_round_trip() {
        let compiler = Compiler::builder()
            .angle(Angle::Radian)
            .balanceinertia(true)
            .eulerseq("ZXZ")
            .build()
            .unwrap();
        assert_eq!(
            compiler.render(true),
            r#"<compiler balanceinertia="true" angle="radian" eulerseq="ZXZ"/>"#
        );
    }

    #[test]
    fn test_bad_eulerseq_rejected() {
        let err = Compiler::builder().eulerseq("abc").build().unwrap_err();
        assert!(err.names_field("eulerseq"));
    }

    #[test]
    fn test_inertiagrouprange_checks() {
        let err = Compiler::builder()
            .inertiagrouprange(3, 1)
            .build()
            .unwrap_err();
        assert!(err.names_field("inertiagrouprange"));

        let err = Compiler::builder()
            .inertiagrouprange(0, 31)
            .build()
            .unwrap_err();
        assert!(err.names_field("inertiagrouprange"));
    }

    #[test]
    fn test_lengthrange_child() {
        let compiler = Compiler::builder()
            .lengthrange(LengthRange::builder().mode(LrMode::All).build().unwrap())
            .build()
            .unwrap();
        assert_eq!(
            compiler.render(true),
            r#"<compiler><lengthrange mode="all"/></compiler>"#
        );
    }
}
