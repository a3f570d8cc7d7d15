//! Integration tests: build whole scenes and check the emitted MJCF.

use mjcf::{
    Body, Element, FreeJoint, Geom, Inertial, Joint, Material, Mujoco, Orientation, SimOption,
    Worldbody,
};

/// A floor plane plus a free-floating ball, the smallest scene a
/// simulator will happily load.
fn ball_scene() -> Mujoco {
    let material = Material::builder("checker_gray")
        .rgba([0.5, 0.5, 0.5, 1.0])
        .build()
        .unwrap();

    let floor = Geom::plane(5.0, 5.0, 0.1)
        .name("floor")
        .material(material.name().as_str())
        .build()
        .unwrap();

    let ball = Body::builder()
        .name("ball")
        .pos([0.0, 0.0, 1.0])
        .freejoint(FreeJoint::new().unwrap())
        .inertial(
            Inertial::builder([0.0, 0.0, 0.0], 1.0)
                .diaginertia([0.1, 0.1, 0.1])
                .build()
                .unwrap(),
        )
        .geom(
            Geom::sphere(0.1)
                .rgba([1.0, 0.0, 0.0, 1.0])
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    Mujoco::builder()
        .model("ball_drop")
        .option(
            SimOption::builder()
                .timestep(0.001)
                .gravity([0.0, 0.0, -9.81])
                .build()
                .unwrap(),
        )
        .asset(mjcf::Asset::builder().material(material).build())
        .worldbody(
            Worldbody::builder()
                .geom(floor)
                .body(ball)
                .build()
                .unwrap(),
        )
        .build()
}

#[test]
fn ball_scene_structure() {
    let xml = ball_scene().render(true);
    assert!(xml.starts_with(r#"<mujoco model="ball_drop">"#), "{xml}");
    assert!(xml.ends_with("</mujoco>"), "{xml}");

    // every section present, in schema order
    let option = xml.find("<option").unwrap();
    let asset = xml.find("<asset>").unwrap();
    let world = xml.find("<worldbody>").unwrap();
    assert!(option < asset && asset < world, "{xml}");

    // the ball body encloses its joint, inertial and geom
    assert!(xml.contains(r#"<body name="ball" pos="0 0 1">"#), "{xml}");
    assert!(xml.contains(r#"<joint type="free"/>"#), "{xml}");
    assert!(
        xml.contains(r#"<inertial pos="0 0 0" mass="1" diaginertia="0.1 0.1 0.1"/>"#),
        "{xml}"
    );
}

#[test]
fn rendering_is_idempotent() {
    let scene = ball_scene();
    assert_eq!(scene.render(true), scene.render(true));
    assert_eq!(scene.render(false), scene.render(false));
    assert_eq!(
        mjcf::to_pretty_xml(&scene, true),
        mjcf::to_pretty_xml(&scene, true)
    );
}

#[test]
fn exclude_defaults_law() {
    let scene = ball_scene();
    let lean = scene.render(true);
    let full = scene.render(false);

    // everything explicit survives in both renderings
    for needle in [
        r#"timestep="0.001""#,
        r#"gravity="0 0 -9.81""#,
        r#"name="floor""#,
        r#"rgba="1 0 0 1""#,
    ] {
        assert!(lean.contains(needle), "lean output lost {needle}: {lean}");
        assert!(full.contains(needle), "full output lost {needle}: {full}");
    }

    // defaults appear only in the full rendering
    for needle in [
        r#"iterations="100""#,
        r#"integrator="Euler""#,
        r#"friction="1 0.005 0.0001""#,
        r#"specular="0.5""#,
    ] {
        assert!(!lean.contains(needle), "lean output has default {needle}");
        assert!(full.contains(needle), "full output missing {needle}: {full}");
    }
}

#[test]
fn material_name_only_scenario() {
    // the canonical check: only the explicit attribute when excluding
    // defaults, every declared default otherwise
    let material = Material::builder("steel").build().unwrap();
    assert_eq!(material.render(true), r#"<material name="steel"/>"#);

    let full = material.render(false);
    for field in [
        "texrepeat", "texuniform", "emission", "specular", "shininess", "reflectance",
        "metallic", "roughness", "rgba",
    ] {
        assert!(full.contains(field), "missing declared default {field}: {full}");
    }
}

#[test]
fn arity_mismatch_produces_no_element() {
    let result = Geom::sphere(0.1).rgba([1.0, 0.0, 0.0]).build();
    let err = result.unwrap_err();
    assert!(err.names_field("rgba"));
    assert!(err.to_string().contains("rgba"), "{err}");
}

#[test]
fn multi_link_arm_renders_nested() {
    let forearm = Body::builder()
        .name("forearm")
        .pos([0.0, 0.0, 0.3])
        .joint(
            Joint::hinge()
                .name("elbow")
                .axis([0.0, 1.0, 0.0])
                .range([-2.0, 2.0])
                .build()
                .unwrap(),
        )
        .geom(Geom::capsule(0.04, 0.12).build().unwrap())
        .build()
        .unwrap();

    let upper_arm = Body::builder()
        .name("upper_arm")
        .joint(
            Joint::hinge()
                .name("shoulder")
                .axis([0.0, 1.0, 0.0])
                .build()
                .unwrap(),
        )
        .geom(Geom::capsule(0.05, 0.15).build().unwrap())
        .body(forearm)
        .build()
        .unwrap();

    let scene = Mujoco::builder()
        .model("arm")
        .worldbody(Worldbody::builder().body(upper_arm).build().unwrap())
        .build();

    let xml = mjcf::to_pretty_xml(&scene, true);
    let shoulder = xml.find("shoulder").unwrap();
    let forearm_at = xml.find(r#"<body name="forearm""#).unwrap();
    let elbow = xml.find("elbow").unwrap();
    assert!(shoulder < forearm_at && forearm_at < elbow, "{xml}");
    // the outer body closes after the nested one
    assert_eq!(xml.matches("</body>").count(), 2, "{xml}");
}

#[test]
fn orientation_alternatives_render_distinct_attributes() {
    let euler_geom = Geom::box_geom(0.1, 0.1, 0.1)
        .orientation(Orientation::euler([0.0, 0.0, 0.7]).unwrap())
        .build()
        .unwrap();
    assert!(euler_geom.render(true).contains(r#"euler="0 0 0.7""#));

    let quat_geom = Geom::box_geom(0.1, 0.1, 0.1)
        .orientation(Orientation::quat([1.0, 0.0, 0.0, 0.0]).unwrap())
        .build()
        .unwrap();
    // explicitly chosen null rotation still renders under exclude_defaults
    assert!(quat_geom.render(true).contains(r#"quat="1 0 0 0""#));
}

#[test]
fn scene_json_round_trip() {
    let scene = ball_scene();
    let json = serde_json::to_string(&scene).unwrap();
    let back: Mujoco = serde_json::from_str(&json).unwrap();
    assert_eq!(back, scene);
    assert_eq!(back.render(true), scene.render(true));
}

#[test]
fn geom_json_round_trip() {
    let geom = Geom::sphere(0.2)
        .rgba([1.0, 0.0, 0.0, 1.0])
        .build()
        .unwrap();
    let json = serde_json::to_string(&geom).unwrap();
    assert!(json.contains("\"sphere\""), "{json}");
    let back: mjcf::Geom = serde_json::from_str(&json).unwrap();
    assert_eq!(back, geom);
}

#[test]
fn pretty_output_shape() {
    let scene = ball_scene();
    let xml = mjcf::to_pretty_xml(&scene, true);
    assert!(xml.starts_with("<mujoco"), "{xml}");
    assert!(xml.contains("\n  <worldbody>"), "{xml}");
    assert!(xml.contains("\n    <body"), "{xml}");
    assert!(xml.ends_with("</mujoco>\n"), "{xml}");
}
