//! Model statistics overrides (`<statistic>`).

use crate::attr::Attr;
use crate::element::Element;
use crate::error::{ElementError, Violations};
use mjcf_types::{scalar, vector, Vec3};
use serde::{Deserialize, Serialize};

/// Precomputed model statistics. Normally inferred by the compiler;
/// setting them here overrides the inference (used mostly to stabilize
/// visualization scaling).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistic {
    meaninertia: Option<f64>,
    meanmass: Option<f64>,
    meansize: Option<f64>,
    extent: Option<f64>,
    center: Option<Vec3>,
}

impl Statistic {
    pub fn builder() -> StatisticBuilder {
        StatisticBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatisticBuilder {
    meaninertia: Option<f64>,
    meanmass: Option<f64>,
    meansize: Option<f64>,
    extent: Option<f64>,
    center: Option<Vec<f64>>,
}

impl StatisticBuilder {
    pub fn meaninertia(mut self, meaninertia: f64) -> Self {
        self.meaninertia = Some(meaninertia);
        self
    }

    pub fn meanmass(mut self, meanmass: f64) -> Self {
        self.meanmass = Some(meanmass);
        self
    }

    pub fn meansize(mut self, meansize: f64) -> Self {
        self.meansize = Some(meansize);
        self
    }

    /// Spatial extent of the model; must be strictly positive.
    pub fn extent(mut self, extent: f64) -> Self {
        self.extent = Some(extent);
        self
    }

    pub fn center(mut self, center: impl Into<Vec<f64>>) -> Self {
        self.center = Some(center.into());
        self
    }

    pub fn build(self) -> Result<Statistic, ElementError> {
        let mut v = Violations::new("statistic");

        let meaninertia = v.check_opt(
            self.meaninertia
                .map(|x| scalar::non_negative("meaninertia", x)),
        );
        let meanmass = v.check_opt(self.meanmass.map(|x| scalar::non_negative("meanmass", x)));
        let meansize = v.check_opt(self.meansize.map(|x| scalar::positive("meansize", x)));
        let extent = v.check_opt(self.extent.map(|x| scalar::positive("extent", x)));
        let center = v.check_opt(self.center.as_deref().map(|r| vector::vec3("center", r)));

        v.finish()?;
        Ok(Statistic {
            meaninertia,
            meanmass,
            meansize,
            extent,
            center,
        })
    }
}

impl Element for Statistic {
    fn tag(&self) -> &'static str {
        "statistic"
    }

    fn attrs(&self) -> Vec<Attr> {
        vec![
            Attr::float("meaninertia", self.meaninertia),
            Attr::float("meanmass", self.meanmass),
            Attr::float("meansize", self.meansize),
            Attr::float("extent", self.extent),
            Attr::vector("center", self.center.as_ref()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistic_render() {
        let statistic = Statistic::builder()
            .extent(2.0)
            .center([0.0, 0.0, 0.5])
            .build()
            .unwrap();
        assert_eq!(
            statistic.render(true),
            r#"<statistic extent="2" center="0 0 0.5"/>"#
        );
    }

    #[test]
    fn test_zero_extent_rejected() {
        let err = Statistic::builder().extent(0.0).build().unwrap_err();
        assert!(err.names_field("extent"));
    }
}
