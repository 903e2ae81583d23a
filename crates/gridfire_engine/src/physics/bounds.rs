//! Axis-aligned bounding volumes and the overlap test
//!
//! Based on Game Engine Architecture 3rd Edition, Section 13.3.4.3:
//! "An AABB is a 3D cuboid whose six rectangular faces are aligned with a
//! mutually orthogonal set of axes."
//!
//! Boxes are rebuilt every frame from an entity's world position and the
//! static local extents of its mesh. Intervals are closed, so touching boxes
//! count as overlapping.

use crate::foundation::math::Vec3;
use std::fmt;
use thiserror::Error;

/// World axis, used for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// X axis
    X,
    /// Y axis
    Y,
    /// Z axis
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

/// Malformed bounding volume
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum BoundsError {
    /// `min` lies above `max` on some axis
    #[error("inverted bounds on {axis} axis: min {min} > max {max}")]
    Inverted {
        /// Offending axis
        axis: Axis,
        /// Minimum component on that axis
        min: f32,
        /// Maximum component on that axis
        max: f32,
    },

    /// A corner component is NaN or infinite
    #[error("non-finite bounds component on {axis} axis")]
    NonFinite {
        /// Offending axis
        axis: Axis,
    },
}

fn check_corners(min: &Vec3, max: &Vec3) -> Result<(), BoundsError> {
    for (axis, lo, hi) in [
        (Axis::X, min.x, max.x),
        (Axis::Y, min.y, max.y),
        (Axis::Z, min.z, max.z),
    ] {
        if !lo.is_finite() || !hi.is_finite() {
            return Err(BoundsError::NonFinite { axis });
        }
        if lo > hi {
            return Err(BoundsError::Inverted { axis, min: lo, max: hi });
        }
    }
    Ok(())
}

/// Axis-Aligned Bounding Box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    ///
    /// The corners are trusted; use [`Aabb::try_new`] for untrusted input.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        debug_assert!(check_corners(&min, &max).is_ok(), "malformed AABB {min:?}..{max:?}");
        Self { min, max }
    }

    /// Create an AABB, rejecting inverted or non-finite corners
    pub fn try_new(min: Vec3, max: Vec3) -> Result<Self, BoundsError> {
        check_corners(&min, &max)?;
        Ok(Self { min, max })
    }

    /// Rebuild the world box for an entity at `position`
    pub fn from_extents(position: &Vec3, local: &LocalExtents) -> Self {
        Self {
            min: position + local.min,
            max: position + local.max,
        }
    }

    /// Check if this AABB intersects another AABB
    ///
    /// Per-axis separating test on closed intervals: the boxes overlap iff
    /// `a.min <= b.max && b.min <= a.max` holds on X, Y and Z.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x && other.min.x <= self.max.x &&
        self.min.y <= other.max.y && other.min.y <= self.max.y &&
        self.min.z <= other.max.z && other.min.z <= self.max.z
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the full size of the AABB along each axis
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: &Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }
}

/// Overlap test between two bounding volumes
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    a.overlaps(b)
}

/// Static mesh-space extents of an entity
///
/// Validated once at construction so the per-frame rebuild never produces a
/// malformed box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalExtents {
    min: Vec3,
    max: Vec3,
}

impl LocalExtents {
    /// Create extents from mesh-space corners
    pub fn try_new(min: Vec3, max: Vec3) -> Result<Self, BoundsError> {
        check_corners(&min, &max)?;
        Ok(Self { min, max })
    }

    /// Extents of a box centred on the origin
    pub fn centered(half_size: Vec3) -> Result<Self, BoundsError> {
        Self::try_new(-half_size, half_size)
    }

    /// Extents of a box standing on the ground plane
    ///
    /// `half_width` applies to X and Z, the box spans `0..height` in Y.
    pub fn grounded(half_width: f32, height: f32) -> Result<Self, BoundsError> {
        Self::try_new(
            Vec3::new(-half_width, 0.0, -half_width),
            Vec3::new(half_width, height, half_width),
        )
    }

    /// Mesh-space minimum corner
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Mesh-space maximum corner
    pub fn max(&self) -> Vec3 {
        self.max
    }
}

/// Bounding volume kept in step with its owner's position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    local: LocalExtents,
    bounds: Aabb,
}

impl Collider {
    /// Create a collider for an entity currently at `position`
    pub fn new(local: LocalExtents, position: &Vec3) -> Self {
        Self {
            local,
            bounds: Aabb::from_extents(position, &local),
        }
    }

    /// Recompute the world box after the owner moved
    pub fn sync(&mut self, position: &Vec3) {
        self.bounds = Aabb::from_extents(position, &self.local);
    }

    /// Current world-space box
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Static local extents
    pub fn local(&self) -> &LocalExtents {
        &self.local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_box_at(x: f32, y: f32, z: f32) -> Aabb {
        Aabb::new(Vec3::new(x, y, z), Vec3::new(x + 1.0, y + 1.0, z + 1.0))
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let cases = [
            (unit_box_at(0.0, 0.0, 0.0), unit_box_at(0.5, 0.0, 0.5)),
            (unit_box_at(0.0, 0.0, 0.0), unit_box_at(2.0, 0.0, 0.0)),
            (unit_box_at(0.0, 0.0, 0.0), unit_box_at(1.0, 1.0, 1.0)),
            (unit_box_at(-3.0, 0.0, 0.0), unit_box_at(0.0, 0.0, -0.5)),
        ];

        for (a, b) in cases {
            assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }
    }

    #[test]
    fn test_touching_corners_overlap() {
        let a = unit_box_at(0.0, 0.0, 0.0);
        let b = unit_box_at(1.0, 1.0, 1.0);
        assert_eq!(a.max, b.min);
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_separated_on_one_axis_is_enough() {
        let a = unit_box_at(0.0, 0.0, 0.0);
        assert!(!a.overlaps(&unit_box_at(1.01, 0.0, 0.0)));
        assert!(!a.overlaps(&unit_box_at(0.0, -1.01, 0.0)));
        assert!(!a.overlaps(&unit_box_at(0.5, 0.5, 1.5)));
    }

    #[test]
    fn test_zero_extent_boxes() {
        let point = Aabb::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.0, 1.0, 1.0));
        assert!(point.overlaps(&point));
        assert!(point.overlaps(&unit_box_at(0.0, 0.0, 0.0)));
        assert!(!point.overlaps(&unit_box_at(1.5, 0.0, 0.0)));
    }

    #[test]
    fn test_try_new_rejects_inverted_axis() {
        let result = Aabb::try_new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(
            result,
            Err(BoundsError::Inverted { axis: Axis::Y, min: 2.0, max: 1.0 })
        );
    }

    #[test]
    fn test_try_new_rejects_nan() {
        let result = LocalExtents::try_new(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        assert!(matches!(result, Err(BoundsError::NonFinite { axis: Axis::X })));
    }

    #[test]
    fn test_from_extents_translates_local_box() {
        let local = LocalExtents::grounded(0.5, 2.0).unwrap();
        let aabb = Aabb::from_extents(&Vec3::new(10.0, 0.0, -4.0), &local);
        assert_relative_eq!(aabb.min, Vec3::new(9.5, 0.0, -4.5));
        assert_relative_eq!(aabb.max, Vec3::new(10.5, 2.0, -3.5));
        assert_relative_eq!(aabb.center(), Vec3::new(10.0, 1.0, -4.0));
        assert_relative_eq!(aabb.size(), Vec3::new(1.0, 2.0, 1.0));
    }

    #[test]
    fn test_collider_follows_position() {
        let local = LocalExtents::centered(Vec3::new(0.1, 0.1, 0.1)).unwrap();
        let mut collider = Collider::new(local, &Vec3::zeros());
        assert!(collider.bounds().contains_point(&Vec3::zeros()));

        collider.sync(&Vec3::new(5.0, 0.0, 0.0));
        assert!(!collider.bounds().contains_point(&Vec3::zeros()));
        assert!(collider.bounds().contains_point(&Vec3::new(5.0, 0.05, 0.0)));
    }
}
