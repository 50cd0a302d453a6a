//! Viewer head pose

use glam::{Mat4, Quat};

/// Head pose supplied by the host every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadTransform {
    /// Head orientation in world space
    pub orientation: Quat,
    /// World-to-head view matrix
    pub view: Mat4,
}

impl Default for HeadTransform {
    fn default() -> Self {
        Self {
            orientation: Quat::IDENTITY,
            view: Mat4::IDENTITY,
        }
    }
}

impl HeadTransform {
    /// Pose with the view matrix derived from the orientation.
    /// The head stays at the origin.
    pub fn from_orientation(orientation: Quat) -> Self {
        Self {
            orientation,
            view: Mat4::from_quat(orientation.inverse()),
        }
    }

    /// Pose from host-provided parts
    pub fn from_parts(orientation: Quat, view: Mat4) -> Self {
        Self { orientation, view }
    }

    /// Pose turned by `yaw` radians about +Y (positive turns left)
    pub fn from_yaw(yaw: f32) -> Self {
        Self::from_orientation(Quat::from_rotation_y(yaw))
    }

    /// Whether every component is finite
    pub fn is_finite(&self) -> bool {
        self.orientation.is_finite() && self.view.is_finite()
    }

    /// Orientation as `[x, y, z, w]` for the audio listener
    pub fn orientation_array(&self) -> [f32; 4] {
        self.orientation.to_array()
    }
}
