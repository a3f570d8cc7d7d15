//! Two-link pendulum scene, hinging about the world Y axis.

use mjcf::{Body, Geom, GeomType, Inertial, Joint, Mujoco, Worldbody};

fn link(name: &str, length: f64, pos: [f64; 3], child: Option<Body>) -> Body {
    let mass = 1.0;
    let inertia = mass * length * length / 12.0;

    let mut builder = Body::builder()
        .name(name)
        .pos(pos)
        .joint(
            Joint::hinge()
                .name(format!("{name}_hinge"))
                .axis([0.0, 1.0, 0.0])
                .damping(0.05)
                .build()
                .expect("valid joint"),
        )
        .inertial(
            Inertial::builder([0.0, 0.0, -length / 2.0], mass)
                .diaginertia([inertia, inertia, 1e-4])
                .build()
                .expect("valid inertial"),
        )
        .geom(
            Geom::builder(GeomType::Capsule)
                .fromto([0.0, 0.0, 0.0, 0.0, 0.0, -length])
                .size([0.02])
                .build()
                .expect("valid geom"),
        );

    if let Some(child) = child {
        builder = builder.body(child);
    }
    builder.build().expect("valid body")
}

fn main() {
    let lower = link("lower", 1.0, [0.0, 0.0, -1.0], None);
    let upper = link("upper", 1.0, [0.0, 0.0, 0.0], Some(lower));
    let mount = Body::builder()
        .name("mount")
        .pos([0.0, 0.0, 2.0])
        .body(upper)
        .build()
        .expect("valid mount body");

    let scene = Mujoco::builder()
        .model("double_pendulum")
        .worldbody(
            Worldbody::builder()
                .body(mount)
                .build()
                .expect("valid worldbody"),
        )
        .build();

    println!("{}", mjcf::to_pretty_xml(&scene, true));
}
