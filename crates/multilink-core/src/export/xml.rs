//! URDF text generation from a [`RobotDescription`]

use crate::material::MaterialPalette;
use crate::robot::{
    CollisionElement, InertialProperties, Joint, Link, MeshGeometry, Pose, RobotDescription,
    VisualElement,
};

/// Serialize a robot description to URDF XML
pub fn generate_urdf_string(robot: &RobotDescription) -> String {
    let mut urdf = String::new();
    urdf.push_str(&format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<robot name=\"{}\">\n\n",
        xml_escape(&robot.name)
    ));

    write_link(&mut urdf, &robot.base);
    write_materials(&mut urdf, &robot.materials);
    for link in &robot.links {
        write_link(&mut urdf, link);
    }
    for joint in &robot.joints {
        write_joint(&mut urdf, joint);
    }

    urdf.push_str("</robot>\n");
    urdf
}

pub fn write_materials(urdf: &mut String, palette: &MaterialPalette) {
    for material in &palette.materials {
        let c = material.color;
        urdf.push_str(&format!(
            "  <material name=\"{}\">\n    <color rgba=\"{} {} {} {}\"/>\n  </material>\n\n",
            xml_escape(&material.name()),
            c[0],
            c[1],
            c[2],
            c[3]
        ));
    }
}

pub fn write_link(urdf: &mut String, link: &Link) {
    urdf.push_str(&format!("  <link name=\"{}\">\n", xml_escape(&link.name)));
    write_inertial(urdf, &link.inertial);
    if let Some(ref visual) = link.visual {
        write_visual(urdf, visual);
    }
    if let Some(ref collision) = link.collision {
        write_collision(urdf, collision);
    }
    urdf.push_str("  </link>\n\n");
}

fn write_inertial(urdf: &mut String, inertial: &InertialProperties) {
    urdf.push_str("    <inertial>\n");
    write_origin(urdf, &inertial.origin, 6);
    urdf.push_str(&format!("      <mass value=\"{}\"/>\n", inertial.mass));
    let i = &inertial.inertia;
    urdf.push_str(&format!(
        "      <inertia ixx=\"{}\" ixy=\"{}\" ixz=\"{}\" iyy=\"{}\" iyz=\"{}\" izz=\"{}\"/>\n",
        i.ixx, i.ixy, i.ixz, i.iyy, i.iyz, i.izz
    ));
    urdf.push_str("    </inertial>\n");
}

fn write_visual(urdf: &mut String, visual: &VisualElement) {
    urdf.push_str("    <visual>\n");
    write_origin(urdf, &visual.origin, 6);
    write_geometry(urdf, &visual.geometry);
    if let Some(ref name) = visual.material_name {
        urdf.push_str(&format!("      <material name=\"{}\"/>\n", xml_escape(name)));
    }
    urdf.push_str("    </visual>\n");
}

fn write_collision(urdf: &mut String, collision: &CollisionElement) {
    urdf.push_str("    <collision>\n");
    write_origin(urdf, &collision.origin, 6);
    write_geometry(urdf, &collision.geometry);
    urdf.push_str("    </collision>\n");
}

fn write_geometry(urdf: &mut String, mesh: &MeshGeometry) {
    urdf.push_str(&format!(
        "      <geometry>\n        <mesh filename=\"{}\" scale=\"{} {} {}\"/>\n      </geometry>\n",
        xml_escape(&mesh.filename),
        mesh.scale[0],
        mesh.scale[1],
        mesh.scale[2]
    ));
}

pub fn write_origin(urdf: &mut String, origin: &Pose, indent: usize) {
    let indent_str = " ".repeat(indent);
    urdf.push_str(&format!(
        "{}<origin xyz=\"{} {} {}\" rpy=\"{} {} {}\"/>\n",
        indent_str,
        origin.xyz[0],
        origin.xyz[1],
        origin.xyz[2],
        origin.rpy[0],
        origin.rpy[1],
        origin.rpy[2]
    ));
}

pub fn write_joint(urdf: &mut String, joint: &Joint) {
    urdf.push_str(&format!(
        "  <joint name=\"{}\" type=\"{}\">\n",
        xml_escape(&joint.name),
        joint.joint_type.as_str()
    ));
    urdf.push_str(&format!(
        "    <parent link=\"{}\"/>\n",
        xml_escape(&joint.parent)
    ));
    urdf.push_str(&format!(
        "    <child link=\"{}\"/>\n",
        xml_escape(&joint.child)
    ));
    write_origin(urdf, &joint.origin, 4);

    if joint.joint_type.has_axis()
        && let Some(axis) = joint.axis
    {
        urdf.push_str(&format!(
            "    <axis xyz=\"{} {} {}\"/>\n",
            axis[0], axis[1], axis[2]
        ));
    }

    if let Some(ref limits) = joint.limits {
        urdf.push_str(&format!(
            "    <limit lower=\"{}\" upper=\"{}\" effort=\"{}\" velocity=\"{}\"/>\n",
            limits.lower, limits.upper, limits.effort, limits.velocity
        ));
    }

    urdf.push_str("  </joint>\n\n");
}

pub fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
