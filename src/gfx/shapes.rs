//! # Shape Factory
//!
//! Ready-made objects for every shape the playground can spawn. Each call
//! builds fresh geometry and a fresh material; nothing is attached to a scene.
//!
//! Dimensions are not validated. Zero or negative sizes go straight to the
//! geometry generators, which produce degenerate but well-formed meshes.

use cgmath::Vector3;

use crate::palette::{random_color, Color};

use super::{
    geometry::{generate_box, generate_cone, generate_cylinder, generate_plane, generate_torus},
    resources::material::{Material, Side},
    scene::object::Object,
};

const PLANE_COLOR: u32 = 0xFFFF00;
const SHAPE_OPACITY: f32 = 0.3;

/// Translucent Phong material in a random palette color
pub fn create_material() -> Material {
    Material::phong(random_color()).with_opacity(SHAPE_OPACITY)
}

/// 1×1 yellow plane, unlit and visible from both sides
pub fn create_plane() -> Object {
    let material = Material::basic(Color::from_hex(PLANE_COLOR)).with_side(Side::Double);
    Object::with_mesh("plane", generate_plane(1.0, 1.0, 1, 1), material)
}

pub fn create_box(x: f32, y: f32, z: f32) -> Object {
    Object::with_mesh("box", generate_box(x, y, z), create_material())
}

pub fn create_cylinder() -> Object {
    Object::with_mesh(
        "cylinder",
        generate_cylinder(0.5, 0.5, 1.0, 32),
        create_material(),
    )
}

pub fn create_cone() -> Object {
    Object::with_mesh("cone", generate_cone(0.5, 1.0, 32), create_material())
}

pub fn create_torus() -> Object {
    Object::with_mesh("torus", generate_torus(0.5, 0.2, 12, 45), create_material())
}

/// Six boxes enclosing a `x` wide, `y` deep and `z` tall space
///
/// Children in order: floor, front, back, right, left, roof. Every wall is
/// `t` thick. The side walls sit at ±(y/2 + t/2) along X, which only lines
/// up with the front and back walls when `x == y`.
pub fn create_room(x: f32, y: f32, z: f32, t: f32) -> Object {
    let mut room = Object::group("room");

    let slab = |name: &str, size: (f32, f32, f32), position: Vector3<f32>| {
        let mut part = create_box(size.0, size.1, size.2);
        part.name = name.to_string();
        part.set_position(position);
        part
    };

    let vertical = z / 2.0 + t / 2.0;
    let depth = y / 2.0 + t / 2.0;

    room.add_child(slab(
        "floor",
        (x + 2.0 * t, t, y + 2.0 * t),
        Vector3::new(0.0, -vertical, 0.0),
    ));
    room.add_child(slab("front", (x + 2.0 * t, z, t), Vector3::new(0.0, 0.0, -depth)));
    room.add_child(slab("back", (x + 2.0 * t, z, t), Vector3::new(0.0, 0.0, depth)));
    room.add_child(slab("right", (t, z, y), Vector3::new(depth, 0.0, 0.0)));
    room.add_child(slab("left", (t, z, y), Vector3::new(-depth, 0.0, 0.0)));
    room.add_child(slab(
        "roof",
        (x + 2.0 * t, t, y + 2.0 * t),
        Vector3::new(0.0, vertical, 0.0),
    ));

    room
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::resources::material::Shading;
    use crate::palette::NamedColor;

    fn material_of(object: &Object) -> &Material {
        &object.mesh.as_ref().expect("shape has a mesh").material
    }

    #[test]
    fn test_plane_material() {
        let plane = create_plane();
        let material = material_of(&plane);
        assert_eq!(material.shading, Shading::Basic);
        assert_eq!(material.color, NamedColor::Yellow.color());
        assert!(material.is_double_sided());
        assert!(!material.transparent);
        assert_eq!(plane.triangle_count(), 2);
    }

    #[test]
    fn test_shape_material_is_random_translucent_phong() {
        for shape in [create_box(1.0, 1.0, 1.0), create_cylinder(), create_cone(), create_torus()] {
            let material = material_of(&shape);
            assert_eq!(material.shading, Shading::Phong);
            assert!(material.transparent);
            assert_eq!(material.opacity, 0.3);
            assert!(NamedColor::RANDOM_SUBSET
                .iter()
                .any(|named| named.color() == material.color));
        }
    }

    #[test]
    fn test_fixed_shape_sizes() {
        assert_eq!(create_cylinder().vertex_count(), 134);
        assert_eq!(create_cone().triangle_count(), 96);
        assert_eq!(create_torus().triangle_count(), 1080);

        let bounds = create_box(2.0, 3.0, 4.0).local_bounds().unwrap();
        assert_eq!(bounds.max, Vector3::new(1.0, 1.5, 2.0));
    }

    #[test]
    fn test_room_layout() {
        let room = create_room(10.0, 10.0, 10.0, 0.5);
        assert!(room.is_group());

        let names: Vec<&str> = room.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["floor", "front", "back", "right", "left", "roof"]);

        let positions: Vec<Vector3<f32>> = room.children.iter().map(|c| c.position).collect();
        assert_eq!(positions[0], Vector3::new(0.0, -5.25, 0.0));
        assert_eq!(positions[1], Vector3::new(0.0, 0.0, -5.25));
        assert_eq!(positions[2], Vector3::new(0.0, 0.0, 5.25));
        assert_eq!(positions[3], Vector3::new(5.25, 0.0, 0.0));
        assert_eq!(positions[4], Vector3::new(-5.25, 0.0, 0.0));
        assert_eq!(positions[5], Vector3::new(0.0, 5.25, 0.0));

        let floor = room.children[0].local_bounds().unwrap();
        assert_eq!(floor.max, Vector3::new(5.5, 0.25, 5.5));
        let side = room.children[3].local_bounds().unwrap();
        assert_eq!(side.max, Vector3::new(0.25, 5.0, 5.0));
    }

    #[test]
    fn test_room_side_walls_follow_depth() {
        let room = create_room(4.0, 8.0, 2.0, 1.0);
        assert_eq!(room.children[3].position.x, 4.5);
        assert_eq!(room.children[1].position.z, -4.5);
        assert_eq!(room.children[0].position.y, -1.5);
    }

    #[test]
    fn test_degenerate_sizes_are_accepted() {
        let flat = create_box(0.0, -1.0, 1.0);
        assert_eq!(flat.triangle_count(), 12);
        assert_eq!(create_room(0.0, 0.0, 0.0, 0.0).mesh_count(), 6);
    }
}
