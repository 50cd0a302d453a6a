//! Forward-cone gaze test

use crate::head::HeadTransform;
use glam::{Mat4, Vec4};

/// Narrow horizontal cone in front of the viewer.
///
/// Only yaw is tested: no pitch limit, no range, no occlusion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazeCone {
    /// Half-width in radians
    pub yaw_limit: f32,
}

impl Default for GazeCone {
    fn default() -> Self {
        Self::new(crate::config::YAW_LIMIT)
    }
}

impl GazeCone {
    pub fn new(yaw_limit: f32) -> Self {
        Self { yaw_limit }
    }

    /// Yaw of a model's origin in head space, 0 when straight ahead
    pub fn yaw_to(head: &HeadTransform, model: &Mat4) -> f32 {
        let p = (head.view * *model) * Vec4::W;
        p.x.atan2(-p.z)
    }

    /// Whether the model's origin lies strictly inside the cone
    pub fn contains(&self, head: &HeadTransform, model: &Mat4) -> bool {
        Self::yaw_to(head, model).abs() < self.yaw_limit
    }
}
