//! Orientation of the active viewport.

use glam::{DMat3, DQuat, DVec3};

/// Rotation from the view-local frame to world space.
///
/// The columns of the matrix are the view's right, up and towards-viewer
/// axes expressed in world coordinates. Only the rotational part of the
/// host's view matrix is used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOrientation {
    rotation: DMat3,
}

impl Default for ViewOrientation {
    fn default() -> Self {
        Self::top()
    }
}

impl ViewOrientation {
    /// Looking down the -Z axis: view-local frame equals world.
    pub fn top() -> Self {
        Self {
            rotation: DMat3::IDENTITY,
        }
    }

    /// Looking along +Y: view right is +X, view up is +Z.
    pub fn front() -> Self {
        Self {
            rotation: DMat3::from_cols(DVec3::X, DVec3::Z, DVec3::NEG_Y),
        }
    }

    /// Creates an orientation from a rotation matrix.
    ///
    /// Columns are normalized first so that uniformly scaled view matrices
    /// can be passed straight through.
    pub fn from_mat3(matrix: DMat3) -> Self {
        let unit = DMat3::from_cols(
            matrix.x_axis.normalize(),
            matrix.y_axis.normalize(),
            matrix.z_axis.normalize(),
        );
        Self::from_quat(DQuat::from_mat3(&unit))
    }

    /// Creates an orientation from a view rotation quaternion.
    pub fn from_quat(rotation: DQuat) -> Self {
        Self {
            rotation: DMat3::from_quat(rotation.normalize()),
        }
    }

    /// Returns the view-to-world rotation matrix.
    pub fn matrix(&self) -> DMat3 {
        self.rotation
    }

    /// Maps a view-local vector to world space.
    pub fn to_world(&self, local: DVec3) -> DVec3 {
        self.rotation * local
    }

    /// Maps a world-space vector into the view-local frame.
    pub fn to_local(&self, world: DVec3) -> DVec3 {
        // Orthonormal, so the transpose is the inverse.
        self.rotation.transpose() * world
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_view() {
        let view = ViewOrientation::front();
        assert!((view.to_world(DVec3::X) - DVec3::X).length() < 1e-12);
        assert!((view.to_world(DVec3::Y) - DVec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_round_trip() {
        let view =
            ViewOrientation::from_quat(DQuat::from_euler(glam::EulerRot::XYZ, 0.3, -1.1, 2.0));
        let v = DVec3::new(1.5, -2.0, 0.25);
        assert!((view.to_world(view.to_local(v)) - v).length() < 1e-12);
    }

    #[test]
    fn test_from_scaled_matrix() {
        let m = DMat3::from_cols(DVec3::X * 2.0, DVec3::Z * 2.0, DVec3::NEG_Y * 2.0);
        let view = ViewOrientation::from_mat3(m);
        assert!((view.to_world(DVec3::Y) - DVec3::Z).length() < 1e-9);
    }
}
