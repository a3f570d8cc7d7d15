//! Build the classic ball-drop scene and print it as MJCF.

use mjcf::{Body, FreeJoint, Geom, Inertial, Material, Mujoco, SimOption, Worldbody};

fn main() {
    let gray = Material::builder("gray")
        .rgba([0.5, 0.5, 0.5, 1.0])
        .build()
        .expect("valid material");

    let floor = Geom::plane(5.0, 5.0, 0.1)
        .name("floor")
        .material("gray")
        .build()
        .expect("valid floor geom");

    let ball = Body::builder()
        .name("ball")
        .pos([0.0, 0.0, 1.0])
        .freejoint(FreeJoint::new().expect("valid free joint"))
        .inertial(
            Inertial::builder([0.0, 0.0, 0.0], 1.0)
                .diaginertia([0.004, 0.004, 0.004])
                .build()
                .expect("valid inertial"),
        )
        .geom(
            Geom::sphere(0.1)
                .rgba([1.0, 0.2, 0.2, 1.0])
                .build()
                .expect("valid ball geom"),
        )
        .build()
        .expect("valid ball body");

    let scene = Mujoco::builder()
        .model("ball_drop")
        .option(
            SimOption::builder()
                .timestep(0.002)
                .gravity([0.0, 0.0, -9.81])
                .build()
                .expect("valid option"),
        )
        .asset(mjcf::Asset::builder().material(gray).build())
        .worldbody(
            Worldbody::builder()
                .geom(floor)
                .body(ball)
                .build()
                .expect("valid worldbody"),
        )
        .build();

    println!("{}", mjcf::to_pretty_xml(&scene, true));
}
