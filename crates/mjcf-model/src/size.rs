//! Memory and user-field sizing (`<size>`).

use crate::attr::Attr;
use crate::element::Element;
use serde::{Deserialize, Serialize};

/// Size settings. All fields are statically valid integers (or the
/// textual `memory` spec), so the element is a plain struct.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Arena memory, e.g. `"512M"`; `"-1"` selects the automatic default.
    pub memory: Option<String>,
    pub nuserdata: Option<i64>,
    pub nkey: Option<i64>,
    pub nuser_body: Option<i64>,
    pub nuser_jnt: Option<i64>,
    pub nuser_geom: Option<i64>,
    pub nuser_site: Option<i64>,
    pub nuser_cam: Option<i64>,
    pub nuser_tendon: Option<i64>,
    pub nuser_actuator: Option<i64>,
    pub nuser_sensor: Option<i64>,
}

impl Element for Size {
    fn tag(&self) -> &'static str {
        "size"
    }

    fn attrs(&self) -> Vec<Attr> {
        vec![
            Attr::string_def("memory", self.memory.as_deref(), "-1"),
            Attr::int_def("nuserdata", self.nuserdata, 0),
            Attr::int_def("nkey", self.nkey, 0),
            Attr::int_def("nuser_body", self.nuser_body, -1),
            Attr::int_def("nuser_jnt", self.nuser_jnt, -1),
            Attr::int_def("nuser_geom", self.nuser_geom, -1),
            Attr::int_def("nuser_site", self.nuser_site, -1),
            Attr::int_def("nuser_cam", self.nuser_cam, -1),
            Attr::int_def("nuser_tendon", self.nuser_tendon, -1),
            Attr::int_def("nuser_actuator", self.nuser_actuator, -1),
            Attr::int_def("nuser_sensor", self.nuser_sensor, -1),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_memory_only() {
        let size = Size {
            memory: Some("512M".to_string()),
            ..Size::default()
        };
        assert_eq!(size.render(true), r#"<size memory="512M"/>"#);
    }

    #[test]
    fn test_defaults_when_included() {
        let xml = Size::default().render(false);
        assert!(xml.contains(r#"memory="-1""#), "{xml}");
        assert!(xml.contains(r#"nuser_body="-1""#), "{xml}");
        assert!(xml.contains(r#"nkey="0""#), "{xml}");
    }
}
