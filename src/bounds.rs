//! Build-volume checks for composed mesh groups
//!
//! The envelope is centred on the origin in X and Z and rests on the floor
//! at `y = 0`. Width and depth fail either when the extent is too large or
//! when an off-centre placement pushes one side past the half-envelope.
//! Height has no centring rule since objects rest on the floor.

use nalgebra::{Point3, Vector3};

use crate::mesh_ops::{Aabb, compute_group_aabb};
use crate::model::MeshGroup;
use crate::profile::BuildEnvelope;

/// Outcome of checking a mesh group against a build envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsReport {
    /// World-space bounding box, `None` for a group without triangles
    pub aabb: Option<Aabb>,
    /// Extent along Y exceeds the envelope height
    pub exceeds_height: bool,
    /// X extent too large or pushed past the side
    pub exceeds_width: bool,
    /// Z extent too large or pushed past the side
    pub exceeds_depth: bool,
}

impl BoundsReport {
    /// True when any axis fails
    pub fn is_out_of_bounds(&self) -> bool {
        self.exceeds_height || self.exceeds_width || self.exceeds_depth
    }

    /// Bounding-box extents, zero for an empty group
    pub fn size(&self) -> Vector3<f64> {
        self.aabb.map(|b| b.size()).unwrap_or_else(Vector3::zeros)
    }

    /// Bounding-box centre, the origin for an empty group
    pub fn center(&self) -> Point3<f64> {
        self.aabb.map(|b| b.center()).unwrap_or_else(Point3::origin)
    }
}

fn exceeds_centered(size: f64, center: f64, limit: f64) -> bool {
    size > limit || center.abs() + size / 2.0 > limit / 2.0
}

/// Classify a bounding box against an envelope
pub fn classify_aabb(aabb: &Aabb, envelope: &BuildEnvelope) -> BoundsReport {
    let size = aabb.size();
    let center = aabb.center();
    BoundsReport {
        aabb: Some(*aabb),
        exceeds_height: size.y > envelope.height,
        exceeds_width: exceeds_centered(size.x, center.x, envelope.width),
        exceeds_depth: exceeds_centered(size.z, center.z, envelope.depth),
    }
}

/// Check a mesh group against an envelope
///
/// An empty group is always in bounds.
pub fn check_bounds(group: &MeshGroup, envelope: &BuildEnvelope) -> BoundsReport {
    match compute_group_aabb(group) {
        Some(aabb) => classify_aabb(&aabb, envelope),
        None => BoundsReport {
            aabb: None,
            exceeds_height: false,
            exceeds_width: false,
            exceeds_depth: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Color, Part, Transform};
    use crate::primitives::cuboid;

    fn boxed(size: [f64; 3], center: [f64; 3]) -> Aabb {
        Aabb::from_center_size(
            Point3::new(center[0], center[1], center[2]),
            Vector3::new(size[0], size[1], size[2]),
        )
    }

    #[test]
    fn test_exact_fit_is_in_bounds() {
        let env = BuildEnvelope::default();
        let report = classify_aabb(&boxed([25.6, 25.6, 25.6], [0.0, 12.8, 0.0]), &env);
        assert!(!report.is_out_of_bounds());
    }

    #[test]
    fn test_each_axis_flips() {
        let env = BuildEnvelope::default();
        let eps = 1e-6;

        let r = classify_aabb(&boxed([25.6 + eps, 25.6, 25.6], [0.0, 12.8, 0.0]), &env);
        assert!(r.exceeds_width && !r.exceeds_height && !r.exceeds_depth);

        let r = classify_aabb(&boxed([25.6, 25.6 + eps, 25.6], [0.0, 12.8, 0.0]), &env);
        assert!(r.exceeds_height && !r.exceeds_width);

        let r = classify_aabb(&boxed([25.6, 25.6, 25.6 + eps], [0.0, 12.8, 0.0]), &env);
        assert!(r.exceeds_depth && !r.exceeds_width);
    }

    #[test]
    fn test_off_center_flips() {
        let env = BuildEnvelope::default();
        let r = classify_aabb(&boxed([25.6, 10.0, 25.6], [1e-6, 5.0, 0.0]), &env);
        assert!(r.exceeds_width && !r.exceeds_depth);

        let r = classify_aabb(&boxed([10.0, 10.0, 10.0], [0.0, 5.0, -7.9]), &env);
        assert!(r.exceeds_depth);

        // height ignores vertical placement
        let r = classify_aabb(&boxed([10.0, 10.0, 10.0], [0.0, 100.0, 0.0]), &env);
        assert!(!r.is_out_of_bounds());
    }

    #[test]
    fn test_wide_box_group() {
        let mut group = MeshGroup::new();
        group.push(
            Part::new("box", cuboid(26.0, 10.0, 10.0).unwrap(), Color::WHITE)
                .with_transform(Transform::translation(0.0, 5.0, 0.0)),
        );
        let report = check_bounds(&group, &BuildEnvelope::default());
        assert!(report.is_out_of_bounds());
        assert!(report.exceeds_width);
        assert!(!report.exceeds_height);
        assert_eq!(report.size(), Vector3::new(26.0, 10.0, 10.0));
    }

    #[test]
    fn test_empty_group_in_bounds() {
        let report = check_bounds(&MeshGroup::new(), &BuildEnvelope::default());
        assert!(!report.is_out_of_bounds());
        assert!(report.aabb.is_none());
        assert_eq!(report.size(), Vector3::zeros());
    }
}
