//! # Object Picking and Pointer Interaction
//!
//! Ray-casting from the pointer into the scene, and the interaction manager
//! that turns pick results into hover / unhover / click events.
//!
//! ## How it works
//!
//! 1. **Pointer to Ray**: Convert window coordinates to a world-space ray
//! 2. **Broad Phase**: Skip objects whose bounds the ray misses
//! 3. **Narrow Phase**: Test the ray against the triangles of every mesh in the object
//! 4. **Transitions**: Compare the closest hit with last frame's and emit events
//!
//! Only objects registered with [`InteractionManager::add`] take part.

use std::collections::HashMap;

use cgmath::{ElementWise, InnerSpace, Matrix4, SquareMatrix, Vector3, Vector4, Zero};

use crate::gfx::{
    camera::orbit_camera::OrbitCamera,
    scene::{Object, ObjectId, Scene},
};

/// Barycentric slack so rays through shared edges hit one of the two triangles
const TRIANGLE_EPSILON: f32 = 1e-6;

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }

    /// Möller–Trumbore test against a triangle, both faces count
    ///
    /// Returns the distance along the ray to the hit point.
    pub fn intersect_triangle(
        &self,
        a: Vector3<f32>,
        b: Vector3<f32>,
        c: Vector3<f32>,
    ) -> Option<f32> {
        let edge1 = b - a;
        let edge2 = c - a;
        let p = self.direction.cross(edge2);
        let det = edge1.dot(p);
        if det.abs() < f32::EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = self.origin - a;
        let u = s.dot(p) * inv_det;
        if !(-TRIANGLE_EPSILON..=1.0 + TRIANGLE_EPSILON).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = self.direction.dot(q) * inv_det;
        if v < -TRIANGLE_EPSILON || u + v > 1.0 + TRIANGLE_EPSILON {
            return None;
        }

        let t = edge2.dot(q) * inv_det;
        (t >= 0.0).then_some(t)
    }
}

/// Distance to the nearest triangle of any mesh in the object's subtree
pub fn intersect_object(ray: &Ray, object: &Object) -> Option<f32> {
    let mut nearest: Option<f32> = None;

    object.visit_meshes(Matrix4::identity(), &mut |mesh, world| {
        let positions: Vec<Vector3<f32>> = mesh
            .positions()
            .iter()
            .map(|&[x, y, z]| (world * Vector4::new(x, y, z, 1.0)).truncate())
            .collect();

        for triangle in mesh.indices().chunks_exact(3) {
            let (Some(&a), Some(&b), Some(&c)) = (
                positions.get(triangle[0] as usize),
                positions.get(triangle[1] as usize),
                positions.get(triangle[2] as usize),
            ) else {
                continue;
            };

            if let Some(distance) = ray.intersect_triangle(a, b, c) {
                if nearest.map_or(true, |best| distance < best) {
                    nearest = Some(distance);
                }
            }
        }
    });

    nearest
}

/// Axis-aligned bounding box for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl AABB {
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Create AABB from a set of vertices
    pub fn from_vertices(vertices: &[[f32; 3]]) -> Self {
        let Some(first) = vertices.first() else {
            return Self::new(Vector3::zero(), Vector3::zero());
        };

        let mut min = Vector3::new(first[0], first[1], first[2]);
        let mut max = min;

        for vertex in vertices.iter().skip(1) {
            min.x = min.x.min(vertex[0]);
            min.y = min.y.min(vertex[1]);
            min.z = min.z.min(vertex[2]);
            max.x = max.x.max(vertex[0]);
            max.y = max.y.max(vertex[1]);
            max.z = max.z.max(vertex[2]);
        }

        Self::new(min, max)
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &AABB) -> Self {
        Self::new(
            Vector3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            Vector3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        )
    }

    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }

    /// Distance along the ray to the box, or None if the ray misses it
    ///
    /// A ray starting inside the box reports the exit distance.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let t_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        let t1 = Vector3::new(
            t_min.x.min(t_max.x),
            t_min.y.min(t_max.y),
            t_min.z.min(t_max.z),
        );
        let t2 = Vector3::new(
            t_min.x.max(t_max.x),
            t_min.y.max(t_max.y),
            t_min.z.max(t_max.z),
        );

        let t_near = t1.x.max(t1.y.max(t1.z));
        let t_far = t2.x.min(t2.y.min(t2.z));

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }

    /// Bounds of this box after transforming all 8 corners
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        let corners = [
            Vector3::new(self.min.x, self.min.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.min.z),
            Vector3::new(self.min.x, self.max.y, self.min.z),
            Vector3::new(self.min.x, self.min.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.max.z),
            Vector3::new(self.min.x, self.max.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.max.z),
        ];

        let transformed: Vec<[f32; 3]> = corners
            .iter()
            .map(|corner| {
                let p = matrix * Vector4::new(corner.x, corner.y, corner.z, 1.0);
                [p.x / p.w, p.y / p.w, p.z / p.w]
            })
            .collect();

        Self::from_vertices(&transformed)
    }
}

/// Result of an object picking operation
#[derive(Debug, Clone, Copy)]
pub struct PickResult {
    pub object: ObjectId,
    /// Distance from the ray origin to the intersection point
    pub distance: f32,
    pub intersection_point: Vector3<f32>,
}

/// Convert window coordinates to a world-space ray through the camera
pub fn screen_to_ray(screen_pos: (f32, f32), screen_size: (f32, f32), camera: &OrbitCamera) -> Ray {
    let (mouse_x, mouse_y) = screen_pos;
    let (screen_width, screen_height) = screen_size;

    // Normalized device coordinates, Y flipped
    let ndc_x = (2.0 * mouse_x) / screen_width - 1.0;
    let ndc_y = 1.0 - (2.0 * mouse_y) / screen_height;

    let view_proj = camera.projection_matrix() * camera.view_matrix();
    let inv_view_proj = view_proj.invert().unwrap_or(Matrix4::identity());

    let world_near = inv_view_proj * Vector4::new(ndc_x, ndc_y, -1.0, 1.0);
    let world_far = inv_view_proj * Vector4::new(ndc_x, ndc_y, 1.0, 1.0);

    let near_3d = world_near.truncate() / world_near.w;
    let far_3d = world_far.truncate() / world_far.w;

    Ray::new(near_3d, far_3d - near_3d)
}

/// Pointer event delivered to a registered object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionEvent {
    Hover(ObjectId),
    Unhover(ObjectId),
    Click(ObjectId),
}

/// Tracks which objects react to the pointer and which one is under it
pub struct InteractionManager {
    registered: Vec<ObjectId>,
    /// Local-frame bounds, cached per object; geometry never changes after creation
    cached_bounds: HashMap<ObjectId, Option<AABB>>,
    hovered: Option<ObjectId>,
    /// Hovered objects removed since the last update, still owed an unhover
    released: Vec<ObjectId>,
    pointer: Option<(f32, f32)>,
    screen_size: (f32, f32),
    pending_click: bool,
}

impl InteractionManager {
    pub fn new() -> Self {
        Self {
            registered: Vec::new(),
            cached_bounds: HashMap::new(),
            hovered: None,
            released: Vec::new(),
            pointer: None,
            screen_size: (1.0, 1.0),
            pending_click: false,
        }
    }

    /// Registers an object for picking
    pub fn add(&mut self, id: ObjectId) {
        self.registered.push(id);
    }

    /// Stops picking an object
    ///
    /// A hovered object still gets its unhover on the next [`update`](Self::update).
    pub fn remove(&mut self, id: ObjectId) {
        self.registered.retain(|registered| *registered != id);
        self.cached_bounds.remove(&id);
        if self.hovered == Some(id) {
            self.hovered = None;
            self.released.push(id);
        }
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.registered.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    pub fn hovered(&self) -> Option<ObjectId> {
        self.hovered
    }

    /// Pointer position in physical pixels, None when it left the window
    pub fn set_pointer(&mut self, position: Option<(f32, f32)>) {
        self.pointer = position;
    }

    pub fn set_screen_size(&mut self, width: u32, height: u32) {
        self.screen_size = (width.max(1) as f32, height.max(1) as f32);
    }

    /// Queues a primary-button press for the next [`update`](Self::update)
    pub fn press_primary(&mut self) {
        self.pending_click = true;
    }

    /// Closest registered object whose geometry the ray hits
    pub fn pick(&mut self, ray: &Ray, scene: &Scene) -> Option<PickResult> {
        let mut closest: Option<PickResult> = None;

        for &id in &self.registered {
            let Some(object) = scene.get(id) else {
                continue;
            };

            let local = *self
                .cached_bounds
                .entry(id)
                .or_insert_with(|| object.local_bounds());
            let Some(local) = local else {
                continue;
            };

            let world = local.transform(&object.local_transform());
            if world.intersect_ray(ray).is_none() {
                continue;
            }

            if let Some(distance) = intersect_object(ray, object) {
                if closest.map_or(true, |best| distance < best.distance) {
                    closest = Some(PickResult {
                        object: id,
                        distance,
                        intersection_point: ray.point_at(distance),
                    });
                }
            }
        }

        closest
    }

    /// Picks under the pointer and reports hover transitions and clicks
    pub fn update(&mut self, camera: &OrbitCamera, scene: &Scene) -> Vec<InteractionEvent> {
        let target = match self.pointer {
            Some(position) => {
                let ray = screen_to_ray(position, self.screen_size, camera);
                self.pick(&ray, scene).map(|hit| hit.object)
            }
            None => None,
        };

        let mut events: Vec<InteractionEvent> = self
            .released
            .drain(..)
            .map(InteractionEvent::Unhover)
            .collect();

        if target != self.hovered {
            if let Some(previous) = self.hovered {
                events.push(InteractionEvent::Unhover(previous));
            }
            if let Some(next) = target {
                events.push(InteractionEvent::Hover(next));
            }
            self.hovered = target;
        }

        if std::mem::take(&mut self.pending_click) {
            if let Some(clicked) = target {
                events.push(InteractionEvent::Click(clicked));
            }
        }

        events
    }
}

impl Default for InteractionManager {
    fn default() -> Self {
        Self::new()
    }
}
