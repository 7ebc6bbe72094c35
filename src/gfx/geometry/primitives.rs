//! # Primitive Shape Generation
//!
//! Parameters follow the usual web-3D conventions: planes face +Z, cylinders
//! and cones stand along Y, tori lie in the XY plane.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a plane in the XY plane facing +Z
///
/// # Arguments
/// * `width` - Extent along X
/// * `height` - Extent along Y
/// * `width_segments` - Number of subdivisions along width
/// * `height_segments` - Number of subdivisions along height
pub fn generate_plane(
    width: f32,
    height: f32,
    width_segments: u32,
    height_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let h_segs = height_segments.max(1);

    for y in 0..=h_segs {
        let v = y as f32 / h_segs as f32;
        let pos_y = (v - 0.5) * height;

        for x in 0..=w_segs {
            let u = x as f32 / w_segs as f32;
            let pos_x = (u - 0.5) * width;

            data.vertices.push([pos_x, pos_y, 0.0]);
            data.normals.push([0.0, 0.0, 1.0]);
            data.tex_coords.push([u, v]);
        }
    }

    for y in 0..h_segs {
        for x in 0..w_segs {
            let i = y * (w_segs + 1) + x;
            let next_row = i + w_segs + 1;

            data.indices.extend_from_slice(&[i, i + 1, next_row]);
            data.indices.extend_from_slice(&[i + 1, next_row + 1, next_row]);
        }
    }

    data
}

/// Generate an axis-aligned box centered at the origin
///
/// Each face has its own four vertices so normals stay flat.
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let mut data = GeometryData::new();

    let (hw, hh, hd) = (width * 0.5, height * 0.5, depth * 0.5);

    #[rustfmt::skip]
    let positions = [
        // Front face
        [-hw, -hh,  hd], [ hw, -hh,  hd], [ hw,  hh,  hd], [-hw,  hh,  hd],
        // Back face
        [-hw, -hh, -hd], [-hw,  hh, -hd], [ hw,  hh, -hd], [ hw, -hh, -hd],
        // Left face
        [-hw, -hh, -hd], [-hw, -hh,  hd], [-hw,  hh,  hd], [-hw,  hh, -hd],
        // Right face
        [ hw, -hh,  hd], [ hw, -hh, -hd], [ hw,  hh, -hd], [ hw,  hh,  hd],
        // Top face
        [-hw,  hh,  hd], [ hw,  hh,  hd], [ hw,  hh, -hd], [-hw,  hh, -hd],
        // Bottom face
        [-hw, -hh, -hd], [ hw, -hh, -hd], [ hw, -hh,  hd], [-hw, -hh,  hd],
    ];

    #[rustfmt::skip]
    let tex_coords = [
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
        [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0],
        [1.0, 0.0], [0.0, 0.0], [0.0, 1.0], [1.0, 1.0],
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
        [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
    ];

    let face_normals: [[f32; 3]; 6] = [
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
    ];

    data.vertices = positions.to_vec();
    data.tex_coords = tex_coords.to_vec();
    data.normals = face_normals
        .iter()
        .flat_map(|normal| std::iter::repeat(*normal).take(4))
        .collect();

    for face in 0..6u32 {
        let base = face * 4;
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a Y-aligned cylinder, or a cone when one radius is zero
///
/// # Arguments
/// * `radius_top` - Radius of the cap at +height/2
/// * `radius_bottom` - Radius of the cap at -height/2
/// * `height` - Extent along Y
/// * `radial_segments` - Number of segments around the circumference
///
/// Caps are only generated for non-zero radii.
pub fn generate_cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = radial_segments.max(3);
    let half_height = height * 0.5;
    let slope = if height != 0.0 {
        (radius_bottom - radius_top) / height
    } else {
        0.0
    };

    // Side: top ring followed by bottom ring
    for (row, (y, radius)) in [(half_height, radius_top), (-half_height, radius_bottom)]
        .into_iter()
        .enumerate()
    {
        for i in 0..=segs {
            let u = i as f32 / segs as f32;
            let theta = u * 2.0 * PI;
            let (sin_t, cos_t) = theta.sin_cos();

            data.vertices.push([radius * sin_t, y, radius * cos_t]);
            data.normals.push(normalize([sin_t, slope, cos_t]));
            data.tex_coords.push([u, 1.0 - row as f32]);
        }
    }

    for i in 0..segs {
        let a = i;
        let b = i + segs + 1;
        let c = i + segs + 2;
        let d = i + 1;

        data.indices.extend_from_slice(&[a, b, d]);
        data.indices.extend_from_slice(&[b, c, d]);
    }

    if radius_top != 0.0 {
        generate_cap(&mut data, radius_top, half_height, segs, true);
    }
    if radius_bottom != 0.0 {
        generate_cap(&mut data, radius_bottom, -half_height, segs, false);
    }

    data
}

/// Generate a Y-aligned cone with its apex at +height/2
pub fn generate_cone(radius: f32, height: f32, radial_segments: u32) -> GeometryData {
    generate_cylinder(0.0, radius, height, radial_segments)
}

fn generate_cap(data: &mut GeometryData, radius: f32, y: f32, segs: u32, top: bool) {
    let sign = if top { 1.0 } else { -1.0 };

    let center = data.vertices.len() as u32;
    data.vertices.push([0.0, y, 0.0]);
    data.normals.push([0.0, sign, 0.0]);
    data.tex_coords.push([0.5, 0.5]);

    let ring = data.vertices.len() as u32;
    for i in 0..=segs {
        let theta = i as f32 / segs as f32 * 2.0 * PI;
        let (sin_t, cos_t) = theta.sin_cos();

        data.vertices.push([radius * sin_t, y, radius * cos_t]);
        data.normals.push([0.0, sign, 0.0]);
        data.tex_coords.push([cos_t * 0.5 + 0.5, sin_t * 0.5 * sign + 0.5]);
    }

    for i in 0..segs {
        let current = ring + i;
        let next = ring + i + 1;
        if top {
            data.indices.extend_from_slice(&[center, current, next]);
        } else {
            data.indices.extend_from_slice(&[center, next, current]);
        }
    }
}

/// Generate a torus lying in the XY plane
///
/// # Arguments
/// * `radius` - Distance from the torus center to the tube center
/// * `tube` - Tube radius
/// * `radial_segments` - Segments around the tube cross-section
/// * `tubular_segments` - Segments around the ring
pub fn generate_torus(
    radius: f32,
    tube: f32,
    radial_segments: u32,
    tubular_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let radial = radial_segments.max(2);
    let tubular = tubular_segments.max(3);

    for j in 0..=radial {
        let v = j as f32 / radial as f32 * 2.0 * PI;

        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * 2.0 * PI;

            let ring = radius + tube * v.cos();
            let position = [ring * u.cos(), ring * u.sin(), tube * v.sin()];
            let center = [radius * u.cos(), radius * u.sin(), 0.0];

            data.vertices.push(position);
            data.normals.push(normalize([
                position[0] - center[0],
                position[1] - center[1],
                position[2] - center[2],
            ]));
            data.tex_coords
                .push([i as f32 / tubular as f32, j as f32 / radial as f32]);
        }
    }

    let stride = tubular + 1;
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = stride * j + i - 1;
            let b = stride * (j - 1) + i - 1;
            let c = stride * (j - 1) + i;
            let d = stride * j + i;

            data.indices.extend_from_slice(&[a, b, d]);
            data.indices.extend_from_slice(&[b, c, d]);
        }
    }

    data
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let length = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if length > 0.0 {
        [v[0] / length, v[1] / length, v[2] / length]
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face_normal(data: &GeometryData, triangle: usize) -> [f32; 3] {
        let idx = &data.indices[triangle * 3..triangle * 3 + 3];
        let [a, b, c] = [
            data.vertices[idx[0] as usize],
            data.vertices[idx[1] as usize],
            data.vertices[idx[2] as usize],
        ];
        let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
        let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
        [
            e1[1] * e2[2] - e1[2] * e2[1],
            e1[2] * e2[0] - e1[0] * e2[2],
            e1[0] * e2[1] - e1[1] * e2[0],
        ]
    }

    fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    #[test]
    fn test_box_generation() {
        let cube = generate_box(2.0, 4.0, 6.0);
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.indices.len(), 36);
        assert_eq!(cube.triangle_count(), 12);

        let max_y = cube.vertices.iter().map(|v| v[1]).fold(f32::MIN, f32::max);
        let min_z = cube.vertices.iter().map(|v| v[2]).fold(f32::MAX, f32::min);
        assert_eq!(max_y, 2.0);
        assert_eq!(min_z, -3.0);
    }

    #[test]
    fn test_box_faces_point_outward() {
        let cube = generate_box(1.0, 1.0, 1.0);
        for triangle in 0..cube.triangle_count() {
            let first_vertex = cube.indices[triangle * 3] as usize;
            let normal = cube.normals[first_vertex];
            assert!(dot(face_normal(&cube, triangle), normal) > 0.0);
        }
    }

    #[test]
    fn test_plane_generation() {
        let plane = generate_plane(1.0, 1.0, 1, 1);
        assert_eq!(plane.vertex_count(), 4);
        assert_eq!(plane.indices.len(), 6);

        let grid = generate_plane(2.0, 2.0, 2, 2);
        assert_eq!(grid.vertex_count(), 9);
        assert_eq!(grid.indices.len(), 24);
        for triangle in 0..grid.triangle_count() {
            assert!(face_normal(&grid, triangle)[2] > 0.0);
        }
    }

    #[test]
    fn test_cylinder_generation() {
        let cylinder = generate_cylinder(0.5, 0.5, 1.0, 32);
        // Two side rings plus two caps (center + ring each)
        assert_eq!(cylinder.vertex_count(), 33 * 2 + 34 * 2);
        assert_eq!(cylinder.indices.len(), 32 * 6 + 32 * 3 * 2);
        assert_eq!(cylinder.vertices.len(), cylinder.normals.len());
        assert_eq!(cylinder.vertices.len(), cylinder.tex_coords.len());

        for triangle in 0..cylinder.triangle_count() {
            let first_vertex = cylinder.indices[triangle * 3] as usize;
            let normal = cylinder.normals[first_vertex];
            assert!(dot(face_normal(&cylinder, triangle), normal) > 0.0);
        }
    }

    #[test]
    fn test_cone_skips_apex_cap() {
        let cone = generate_cone(0.5, 1.0, 32);
        assert_eq!(cone.vertex_count(), 33 * 2 + 34);
        assert_eq!(cone.indices.len(), 32 * 6 + 32 * 3);

        let apex = cone.vertices[0];
        assert_eq!(apex[1], 0.5);
        assert!(apex[0].abs() < 1e-6 && apex[2].abs() < 1e-6);
    }

    #[test]
    fn test_torus_generation() {
        let torus = generate_torus(0.5, 0.2, 12, 45);
        assert_eq!(torus.vertex_count(), 13 * 46);
        assert_eq!(torus.indices.len(), 12 * 45 * 6);

        let outer = torus
            .vertices
            .iter()
            .map(|v| (v[0] * v[0] + v[1] * v[1]).sqrt())
            .fold(0.0f32, f32::max);
        assert!((outer - 0.7).abs() < 1e-4);
    }

    #[test]
    fn test_zero_dimensions_pass_through() {
        let flat = generate_box(0.0, 1.0, 1.0);
        assert_eq!(flat.vertex_count(), 24);
        assert!(flat.vertices.iter().all(|v| v[0] == 0.0));

        let inverted = generate_box(-1.0, 1.0, 1.0);
        assert_eq!(inverted.vertex_count(), 24);
    }
}
