//! Physics options (`<option>`) and their algorithm flags.

use crate::attr::Attr;
use crate::defaults::{SOLIMP_DEFAULT, SOLREF_DEFAULT};
use crate::element::Element;
use crate::error::{ElementError, Violations};
use mjcf_types::{
    scalar, vector, Cone, Integrator, Jacobian, Solver, Toggle, ValueError, Vec2, Vec3, Vec5,
    GRAVITY,
};
use serde::{Deserialize, Serialize};

/// Simulation options. Named `SimOption` because `Option` would shadow
/// the prelude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimOption {
    timestep: Option<f64>,
    impratio: Option<f64>,
    tolerance: Option<f64>,
    ls_tolerance: Option<f64>,
    noslip_tolerance: Option<f64>,
    ccd_tolerance: Option<f64>,
    sleep_tolerance: Option<f64>,
    gravity: Option<Vec3>,
    wind: Option<Vec3>,
    magnetic: Option<Vec3>,
    density: Option<f64>,
    viscosity: Option<f64>,
    o_margin: Option<f64>,
    o_solref: Option<Vec2>,
    o_solimp: Option<Vec5>,
    o_friction: Option<Vec5>,
    integrator: Option<Integrator>,
    cone: Option<Cone>,
    jacobian: Option<Jacobian>,
    solver: Option<Solver>,
    iterations: Option<i64>,
    ls_iterations: Option<i64>,
    noslip_iterations: Option<i64>,
    ccd_iterations: Option<i64>,
    sdf_iterations: Option<i64>,
    sdf_initpoints: Option<i64>,
    actuatorgroupdisable: Option<Vec<i64>>,
    flag: Option<Flag>,
}

impl SimOption {
    pub fn builder() -> SimOptionBuilder {
        SimOptionBuilder::default()
    }

    pub fn timestep(&self) -> Option<f64> {
        self.timestep
    }

    pub fn gravity(&self) -> Option<&Vec3> {
        self.gravity.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SimOptionBuilder {
    timestep: Option<f64>,
    impratio: Option<f64>,
    tolerance: Option<f64>,
    ls_tolerance: Option<f64>,
    noslip_tolerance: Option<f64>,
    ccd_tolerance: Option<f64>,
    sleep_tolerance: Option<f64>,
    gravity: Option<Vec<f64>>,
    wind: Option<Vec<f64>>,
    magnetic: Option<Vec<f64>>,
    density: Option<f64>,
    viscosity: Option<f64>,
    o_margin: Option<f64>,
    o_solref: Option<Vec<f64>>,
    o_solimp: Option<Vec<f64>>,
    o_friction: Option<Vec<f64>>,
    integrator: Option<Integrator>,
    cone: Option<Cone>,
    jacobian: Option<Jacobian>,
    solver: Option<Solver>,
    iterations: Option<i64>,
    ls_iterations: Option<i64>,
    noslip_iterations: Option<i64>,
    ccd_iterations: Option<i64>,
    sdf_iterations: Option<i64>,
    sdf_initpoints: Option<i64>,
    actuatorgroupdisable: Option<Vec<i64>>,
    flag: Option<Flag>,
}

impl SimOptionBuilder {
    pub fn timestep(mut self, timestep: f64) -> Self {
        self.timestep = Some(timestep);
        self
    }

    /// Ratio of frictional-to-normal constraint impedance.
    pub fn impratio(mut self, impratio: f64) -> Self {
        self.impratio = Some(impratio);
        self
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub fn ls_tolerance(mut self, ls_tolerance: f64) -> Self {
        self.ls_tolerance = Some(ls_tolerance);
        self
    }

    pub fn noslip_tolerance(mut self, noslip_tolerance: f64) -> Self {
        self.noslip_tolerance = Some(noslip_tolerance);
        self
    }

    pub fn ccd_tolerance(mut self, ccd_tolerance: f64) -> Self {
        self.ccd_tolerance = Some(ccd_tolerance);
        self
    }

    pub fn sleep_tolerance(mut self, sleep_tolerance: f64) -> Self {
        self.sleep_tolerance = Some(sleep_tolerance);
        self
    }

    pub fn gravity(mut self, gravity: impl Into<Vec<f64>>) -> Self {
        self.gravity = Some(gravity.into());
        self
    }

    pub fn wind(mut self, wind: impl Into<Vec<f64>>) -> Self {
        self.wind = Some(wind.into());
        self
    }

    pub fn magnetic(mut self, magnetic: impl Into<Vec<f64>>) -> Self {
        self.magnetic = Some(magnetic.into());
        self
    }

    pub fn density(mut self, density: f64) -> Self {
        self.density = Some(density);
        self
    }

    pub fn viscosity(mut self, viscosity: f64) -> Self {
        self.viscosity = Some(viscosity);
        self
    }

    pub fn o_margin(mut self, o_margin: f64) -> Self {
        self.o_margin = Some(o_margin);
        self
    }

    pub fn o_solref(mut self, o_solref: impl Into<Vec<f64>>) -> Self {
        self.o_solref = Some(o_solref.into());
        self
    }

    pub fn o_solimp(mut self, o_solimp: impl Into<Vec<f64>>) -> Self {
        self.o_solimp = Some(o_solimp.into());
        self
    }

    pub fn o_friction(mut self, o_friction: impl Into<Vec<f64>>) -> Self {
        self.o_friction = Some(o_friction.into());
        self
    }

    pub fn integrator(mut self, integrator: Integrator) -> Self {
        self.integrator = Some(integrator);
        self
    }

    pub fn cone(mut self, cone: Cone) -> Self {
        self.cone = Some(cone);
        self
    }

    pub fn jacobian(mut self, jacobian: Jacobian) -> Self {
        self.jacobian = Some(jacobian);
        self
    }

    pub fn solver(mut self, solver: Solver) -> Self {
        self.solver = Some(solver);
        self
    }

    pub fn iterations(mut self, iterations: i64) -> Self {
        self.iterations = Some(iterations);
        self
    }

    pub fn ls_iterations(mut self, ls_iterations: i64) -> Self {
        self.ls_iterations = Some(ls_iterations);
        self
    }

    pub fn noslip_iterations(mut self, noslip_iterations: i64) -> Self {
        self.noslip_iterations = Some(noslip_iterations);
        self
    }

    pub fn ccd_iterations(mut self, ccd_iterations: i64) -> Self {
        self.ccd_iterations = Some(ccd_iterations);
        self
    }

    pub fn sdf_iterations(mut self, sdf_iterations: i64) -> Self {
        self.sdf_iterations = Some(sdf_iterations);
        self
    }

    pub fn sdf_initpoints(mut self, sdf_initpoints: i64) -> Self {
        self.sdf_initpoints = Some(sdf_initpoints);
        self
    }

    /// Actuator groups whose actuators are disabled. Deduplicated and
    /// kept sorted so output is reproducible.
    pub fn actuatorgroupdisable(mut self, groups: impl Into<Vec<i64>>) -> Self {
        self.actuatorgroupdisable = Some(groups.into());
        self
    }

    pub fn flag(mut self, flag: Flag) -> Self {
        self.flag = Some(flag);
        self
    }

    pub fn build(self) -> Result<SimOption, ElementError> {
        let mut v = Violations::new("option");

        let timestep = v.check_opt(self.timestep.map(|x| scalar::positive("timestep", x)));
        let impratio = v.check_opt(self.impratio.map(|x| scalar::at_least("impratio", x, 1.0)));
        let tolerance = v.check_opt(self.tolerance.map(|x| scalar::non_negative("tolerance", x)));
        let ls_tolerance = v.check_opt(
            self.ls_tolerance
                .map(|x| scalar::non_negative("ls_tolerance", x)),
        );
        let noslip_tolerance = v.check_opt(
            self.noslip_tolerance
                .map(|x| scalar::non_negative("noslip_tolerance", x)),
        );
        let ccd_tolerance = v.check_opt(
            self.ccd_tolerance
                .map(|x| scalar::non_negative("ccd_tolerance", x)),
        );
        let sleep_tolerance = v.check_opt(
            self.sleep_tolerance
                .map(|x| scalar::non_negative("sleep_tolerance", x)),
        );
        let gravity = v.check_opt(self.gravity.as_deref().map(|r| vector::vec3("gravity", r)));
        let wind = v.check_opt(self.wind.as_deref().map(|r| vector::vec3("wind", r)));
        let magnetic = v.check_opt(self.magnetic.as_deref().map(|r| vector::vec3("magnetic", r)));
        let density = v.check_opt(self.density.map(|x| scalar::non_negative("density", x)));
        let viscosity = v.check_opt(self.viscosity.map(|x| scalar::non_negative("viscosity", x)));
        let o_margin = v.check_opt(self.o_margin.map(|x| scalar::non_negative("o_margin", x)));
        let o_solref = v.check_opt(self.o_solref.as_deref().map(|r| vector::vec2("o_solref", r)));
        let o_solimp = v.check_opt(self.o_solimp.as_deref().map(|r| vector::vec5("o_solimp", r)));
        let o_friction = v.check_opt(
            self.o_friction
                .as_deref()
                .map(|r| vector::vec5("o_friction", r)),
        );
        let iterations = v.check_opt(
            self.iterations
                .map(|x| scalar::int_at_least("iterations", x, 1)),
        );
        let ls_iterations = v.check_opt(
            self.ls_iterations
                .map(|x| scalar::int_at_least("ls_iterations", x, 1)),
        );
        let noslip_iterations = v.check_opt(
            self.noslip_iterations
                .map(|x| scalar::int_at_least("noslip_iterations", x, 0)),
        );
        let ccd_iterations = v.check_opt(
            self.ccd_iterations
                .map(|x| scalar::int_at_least("ccd_iterations", x, 0)),
        );
        let sdf_iterations = v.check_opt(
            self.sdf_iterations
                .map(|x| scalar::int_at_least("sdf_iterations", x, 1)),
        );
        let sdf_initpoints = v.check_opt(
            self.sdf_initpoints
                .map(|x| scalar::int_at_least("sdf_initpoints", x, 1)),
        );

        let actuatorgroupdisable = v.check_opt(self.actuatorgroupdisable.map(|groups| {
            for &g in &groups {
                if !(0..=30).contains(&g) {
                    return Err(ValueError::OutOfRange {
                        field: "actuatorgroupdisable",
                        value: g as f64,
                        bound: "group indices must be in [0, 30]".to_string(),
                    });
                }
            }
            let mut groups = groups;
            groups.sort_unstable();
            groups.dedup();
            Ok(groups)
        }));

        v.finish()?;
        Ok(SimOption {
            timestep,
            impratio,
            tolerance,
            ls_tolerance,
            noslip_tolerance,
            ccd_tolerance,
            sleep_tolerance,
            gravity,
            wind,
            magnetic,
            density,
            viscosity,
            o_margin,
            o_solref,
            o_solimp,
            o_friction,
            integrator: self.integrator,
            cone: self.cone,
            jacobian: self.jacobian,
            solver: self.solver,
            iterations,
            ls_iterations,
            noslip_iterations,
            ccd_iterations,
            sdf_iterations,
            sdf_initpoints,
            actuatorgroupdisable,
            flag: self.flag,
        })
    }
}

impl Element for SimOption {
    fn tag(&self) -> &'static str {
        "option"
    }

    fn attrs(&self) -> Vec<Attr> {
        vec![
            Attr::float_def("timestep", self.timestep, 0.002),
            Attr::float_def("impratio", self.impratio, 1.0),
            Attr::float_def("tolerance", self.tolerance, 1e-8),
            Attr::float_def("ls_tolerance", self.ls_tolerance, 0.01),
            Attr::float_def("noslip_tolerance", self.noslip_tolerance, 1e-6),
            Attr::float_def("ccd_tolerance", self.ccd_tolerance, 1e-6),
            Attr::float("sleep_tolerance", self.sleep_tolerance),
            Attr::vector_def("gravity", self.gravity.as_ref(), &[0.0, 0.0, -GRAVITY]),
            Attr::vector_def("wind", self.wind.as_ref(), &[0.0, 0.0, 0.0]),
            Attr::vector_def("magnetic", self.magnetic.as_ref(), &[0.0, -0.5, 0.0]),
            Attr::float_def("density", self.density, 0.0),
            Attr::float_def("viscosity", self.viscosity, 0.0),
            Attr::float_def("o_margin", self.o_margin, 0.0),
            Attr::vector_def("o_solref", self.o_solref.as_ref(), &SOLREF_DEFAULT),
            Attr::vector_def("o_solimp", self.o_solimp.as_ref(), &SOLIMP_DEFAULT),
            Attr::vector_def(
                "o_friction",
                self.o_friction.as_ref(),
                &[1.0, 1.0, 0.005, 0.0001, 0.0001],
            ),
            Attr::keyword_def("integrator", self.integrator, Integrator::Euler),
            Attr::keyword_def("cone", self.cone, Cone::Pyramidal),
            Attr::keyword_def("jacobian", self.jacobian, Jacobian::Auto),
            Attr::keyword_def("solver", self.solver, Solver::Newton),
            Attr::int_def("iterations", self.iterations, 100),
            Attr::int_def("ls_iterations", self.ls_iterations, 50),
            Attr::int_def("noslip_iterations", self.noslip_iterations, 0),
            Attr::int_def("ccd_iterations", self.ccd_iterations, 50),
            Attr::int_def("sdf_iterations", self.sdf_iterations, 10),
            Attr::int_def("sdf_initpoints", self.sdf_initpoints, 40),
            Attr::int_vector(
                "actuatorgroupdisable",
                self.actuatorgroupdisable.as_deref(),
            ),
        ]
    }

    fn children(&self) -> Vec<&dyn Element> {
        self.flag.iter().map(|f| f as &dyn Element).collect()
    }
}

/// Per-feature enable/disable flags (`<flag>` inside `<option>`).
///
/// Every field is statically valid, so this is a plain struct: fill in
/// what you need and leave the rest default.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Flag {
    pub constraint: Option<Toggle>,
    pub equality: Option<Toggle>,
    pub frictionloss: Option<Toggle>,
    pub limit: Option<Toggle>,
    pub contact: Option<Toggle>,
    pub spring: Option<Toggle>,
    pub damping: Option<Toggle>,
    pub gravity: Option<Toggle>,
    pub clampctrl: Option<Toggle>,
    pub warmstart: Option<Toggle>,
    pub filterparent: Option<Toggle>,
    pub actuation: Option<Toggle>,
    pub refsafe: Option<Toggle>,
    pub sensor: Option<Toggle>,
    pub midphase: Option<Toggle>,
    pub eulerdamp: Option<Toggle>,
    pub autoreset: Option<Toggle>,
    pub nativeccd: Option<Toggle>,
    pub island: Option<Toggle>,
    /// The contact parameter override mechanism (`o_margin` and friends).
    pub override_contacts: Option<Toggle>,
    pub energy: Option<Toggle>,
    pub fwdinv: Option<Toggle>,
    pub invdiscrete: Option<Toggle>,
    pub multiccd: Option<Toggle>,
    pub sleep: Option<Toggle>,
}

impl Element for Flag {
    fn tag(&self) -> &'static str {
        "flag"
    }

    fn attrs(&self) -> Vec<Attr> {
        vec![
            Attr::keyword_def("constraint", self.constraint, Toggle::Enable),
            Attr::keyword_def("equality", self.equality, Toggle::Enable),
            Attr::keyword_def("frictionloss", self.frictionloss, Toggle::Enable),
            Attr::keyword_def("limit", self.limit, Toggle::Enable),
            Attr::keyword_def("contact", self.contact, Toggle::Enable),
            Attr::keyword_def("spring", self.spring, Toggle::Enable),
            Attr::keyword_def("damping", self.damping, Toggle::Enable),
            Attr::keyword_def("gravity", self.gravity, Toggle::Enable),
            Attr::keyword_def("clampctrl", self.clampctrl, Toggle::Enable),
            Attr::keyword_def("warmstart", self.warmstart, Toggle::Enable),
            Attr::keyword_def("filterparent", self.filterparent, Toggle::Enable),
            Attr::keyword_def("actuation", self.actuation, Toggle::Enable),
            Attr::keyword_def("refsafe", self.refsafe, Toggle::Enable),
            Attr::keyword_def("sensor", self.sensor, Toggle::Enable),
            Attr::keyword_def("midphase", self.midphase, Toggle::Enable),
            Attr::keyword_def("eulerdamp", self.eulerdamp, Toggle::Enable),
            Attr::keyword_def("autoreset", self.autoreset, Toggle::Enable),
            Attr::keyword_def("nativeccd", self.nativeccd, Toggle::Enable),
            Attr::keyword_def("island", self.island, Toggle::Enable),
            Attr::keyword_def("override", self.override_contacts, Toggle::Disable),
            Attr::keyword_def("energy", self.energy, Toggle::Disable),
            Attr::keyword_def("fwdinv", self.fwdinv, Toggle::Disable),
            Attr::keyword_def("invdiscrete", self.invdiscrete, Toggle::Disable),
            Attr::keyword_def("multiccd", self.multiccd, Toggle::Disable),
            Attr::keyword_def("sleep", self.sleep, Toggle::Disable),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_with_flag_child() {
        let option = SimOption::builder()
            .timestep(0.001)
            .gravity([0.0, 0.0, -9.81])
            .flag(Flag {
                contact: Some(Toggle::Disable),
                ..Flag::default()
            })
            .build()
            .unwrap();
        assert_eq!(
            option.render(true),
            r#"<option timestep="0.001" gravity="0 0 -9.81"><flag contact="disable"/></option>"#
        );
    }

    #[test]
    fn test_negative_timestep_rejected() {
        let err = SimOption::builder().timestep(-0.01).build().unwrap_err();
        assert!(err.names_field("timestep"));
    }

    #[test]
    fn test_group_disable_sorted_and_bounded() {
        let option = SimOption::builder()
            .actuatorgroupdisable([3, 1, 3, 2])
            .build()
            .unwrap();
        assert!(option
            .render(true)
            .contains(r#"actuatorgroupdisable="1 2 3""#));

        let err = SimOption::builder()
            .actuatorgroupdisable([31])
            .build()
            .unwrap_err();
        assert!(err.names_field("actuatorgroupdisable"));
    }

    #[test]
    fn test_flag_defaults_match_schema() {
        let flag = Flag::default();
        let xml = flag.render(false);
        assert!(xml.contains(r#"constraint="enable""#), "{xml}");
        assert!(xml.contains(r#"override="disable""#), "{xml}");
        assert!(xml.contains(r#"sleep="disable""#), "{xml}");
        // nothing explicit: excluding defaults leaves a bare element
        assert_eq!(flag.render(true), "<flag/>");
    }
}
