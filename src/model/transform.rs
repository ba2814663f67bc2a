//! Affine local-to-world transforms

use std::ops::Mul;

use nalgebra::{Matrix4, Point3, Rotation3, Vector3};

/// A 4x4 affine transform
///
/// Composition follows matrix order: `parent * child` applies `child` first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform(Matrix4<f64>);

impl Transform {
    /// The identity transform
    pub fn identity() -> Self {
        Self(Matrix4::identity())
    }

    /// Wrap a raw matrix
    pub fn from_matrix(matrix: Matrix4<f64>) -> Self {
        Self(matrix)
    }

    /// Translation by (x, y, z)
    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        Self(Matrix4::new_translation(&Vector3::new(x, y, z)))
    }

    /// Rotation about the X axis (radians, right-handed)
    pub fn rotation_x(angle: f64) -> Self {
        Self(Rotation3::from_axis_angle(&Vector3::x_axis(), angle).to_homogeneous())
    }

    /// Rotation about the Y axis (radians, right-handed)
    pub fn rotation_y(angle: f64) -> Self {
        Self(Rotation3::from_axis_angle(&Vector3::y_axis(), angle).to_homogeneous())
    }

    /// Rotation about the Z axis (radians, right-handed)
    pub fn rotation_z(angle: f64) -> Self {
        Self(Rotation3::from_axis_angle(&Vector3::z_axis(), angle).to_homogeneous())
    }

    /// Per-axis scale; a negative factor mirrors
    pub fn scaling(x: f64, y: f64, z: f64) -> Self {
        Self(Matrix4::new_nonuniform_scaling(&Vector3::new(x, y, z)))
    }

    /// Scene-node style transform: translate, then XYZ Euler rotation, then scale
    ///
    /// Equivalent to `T * Rx * Ry * Rz * S`.
    pub fn from_parts(position: [f64; 3], rotation: [f64; 3], scale: [f64; 3]) -> Self {
        Self::translation(position[0], position[1], position[2])
            * Self::rotation_x(rotation[0])
            * Self::rotation_y(rotation[1])
            * Self::rotation_z(rotation[2])
            * Self::scaling(scale[0], scale[1], scale[2])
    }

    /// The underlying matrix
    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.0
    }

    /// Map a point into the target frame
    pub fn apply_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.0.transform_point(point)
    }

    /// Determinant of the linear (3x3) part
    pub fn linear_determinant(&self) -> f64 {
        self.0.fixed_view::<3, 3>(0, 0).determinant()
    }

    /// True when the transform reverses handedness
    pub fn is_mirroring(&self) -> bool {
        self.linear_determinant() < 0.0
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        Transform(self.0 * rhs.0)
    }
}

impl Mul<&Transform> for &Transform {
    type Output = Transform;

    fn mul(self, rhs: &Transform) -> Transform {
        Transform(self.0 * rhs.0)
    }
}
