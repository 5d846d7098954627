//! # Geometry Module
//!
//! Shared axis-aligned-box and ray math used by both the selection path
//! (ray picking) and the placement path (overlap and containment checks).
//! Nothing in here knows about blocks or chunks, which keeps the tests
//! free of game state.

use cgmath::{Point3, Vector3};

/// An axis-aligned bounding box described by its center and half-extents.
///
/// Half-extents are per axis, so non-cubic boxes (the player's body volume,
/// future non-uniform blocks) are representable even though level blocks are
/// currently uniform cubes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    /// Center of the box in world space
    pub center: Point3<f32>,
    /// Half the box extent along each axis
    pub half_extents: Vector3<f32>,
}

impl Aabb {
    /// Creates a box from its center and per-axis half-extents.
    pub fn new(center: Point3<f32>, half_extents: Vector3<f32>) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Creates a cube from its center and edge length.
    ///
    /// # Arguments
    /// * `center` - Center of the cube in world space
    /// * `width` - Full edge length (half-extent is `width / 2` on every axis)
    pub fn cube(center: Point3<f32>, width: f32) -> Self {
        let half = width / 2.0;
        Self {
            center,
            half_extents: Vector3::new(half, half, half),
        }
    }

    /// The minimum corner of the box.
    pub fn min(&self) -> Point3<f32> {
        self.center - self.half_extents
    }

    /// The maximum corner of the box.
    pub fn max(&self) -> Point3<f32> {
        self.center + self.half_extents
    }

    /// Tests whether a ray starting at `origin` and travelling along `dir`
    /// hits this box.
    ///
    /// Slab test: the ray's parametric entry/exit interval is intersected
    /// axis by axis. The hit is rejected when the interval is empty or lies
    /// entirely behind the origin, so boxes behind the viewer never select.
    ///
    /// # Arguments
    /// * `origin` - Ray origin (the camera position in the selection path)
    /// * `dir` - Ray direction; expected normalized but any non-zero vector works
    ///
    /// # Returns
    /// `true` if the ray enters the box at a parameter `t >= 0`.
    pub fn ray_intersects(&self, origin: Point3<f32>, dir: Vector3<f32>) -> bool {
        let min = self.min();
        let max = self.max();

        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;

        for axis in 0..3 {
            let o = origin[axis];
            let d = dir[axis];
            if d.abs() < f32::EPSILON {
                // Ray parallel to this slab: misses unless the origin sits inside it.
                if o < min[axis] || o > max[axis] {
                    return false;
                }
                continue;
            }
            let inv = 1.0 / d;
            let mut t0 = (min[axis] - o) * inv;
            let mut t1 = (max[axis] - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far {
                return false;
            }
        }

        t_far >= 0.0
    }

    /// Tests whether this box overlaps another box.
    ///
    /// The comparison is strict, so boxes that only share a face (e.g. two
    /// blocks placed flush against each other) do not count as intersecting.
    pub fn intersects(&self, other: &Aabb) -> bool {
        let delta = self.center - other.center;
        let reach = self.half_extents + other.half_extents;
        delta.x.abs() < reach.x && delta.y.abs() < reach.y && delta.z.abs() < reach.z
    }

    /// Tests whether a point lies inside or on the boundary of this box.
    pub fn contains_point(&self, point: Point3<f32>) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x
            && point.x <= max.x
            && point.y >= min.y
            && point.y <= max.y
            && point.z >= min.z
            && point.z <= max.z
    }

    /// Tests whether `other` lies entirely inside this box.
    ///
    /// Touching the boundary from the inside still counts as contained;
    /// extending past it by any amount does not.
    pub fn contains(&self, other: &Aabb) -> bool {
        self.contains_point(other.min()) && self.contains_point(other.max())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cube_at(x: f32, y: f32, z: f32) -> Aabb {
        Aabb::cube(Point3::new(x, y, z), 2.0)
    }

    #[test]
    fn ray_hits_box_straight_ahead() {
        let cube = unit_cube_at(0.0, 0.0, 8.0);
        let hit = cube.ray_intersects(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(hit);
    }

    #[test]
    fn ray_misses_box_behind_origin() {
        let cube = unit_cube_at(0.0, 0.0, -8.0);
        let hit = cube.ray_intersects(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(!hit);
    }

    #[test]
    fn ray_from_inside_box_hits() {
        let cube = unit_cube_at(0.0, 0.0, 0.0);
        let hit = cube.ray_intersects(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        assert!(hit);
    }

    #[test]
    fn parallel_ray_outside_slab_misses() {
        let cube = unit_cube_at(0.0, 0.0, 8.0);
        let hit = cube.ray_intersects(Point3::new(5.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(!hit);
    }

    #[test]
    fn ray_glances_off_corner() {
        let cube = unit_cube_at(0.0, 0.0, 8.0);
        let hit = cube.ray_intersects(Point3::new(0.0, 10.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(!hit);
    }

    #[test]
    fn overlapping_boxes_intersect() {
        let a = unit_cube_at(0.0, 0.0, 0.0);
        let b = unit_cube_at(1.0, 1.0, 1.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn face_touching_boxes_do_not_intersect() {
        // Flush placement against a face must not register as overlap.
        let a = unit_cube_at(0.0, 0.0, 0.0);
        let b = unit_cube_at(2.0, 0.0, 0.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn containment_is_strict_about_protrusion() {
        let outer = Aabb::cube(Point3::new(0.0, 0.0, 0.0), 10.0);
        let inner = unit_cube_at(0.0, 0.0, 0.0);
        let protruding = unit_cube_at(4.5, 0.0, 0.0);
        assert!(outer.contains(&inner));
        assert!(!outer.contains(&protruding));
        // Still overlaps, just not contained.
        assert!(outer.intersects(&protruding));
    }

    #[test]
    fn boundary_point_is_contained() {
        let cube = unit_cube_at(0.0, 0.0, 0.0);
        assert!(cube.contains_point(Point3::new(1.0, 1.0, 1.0)));
        assert!(!cube.contains_point(Point3::new(1.0, 1.0, 1.01)));
    }
}
