//! Listener orientation

/// Orientation of the listener's head.
///
/// The listener sits at the world origin; only the head rotation changes.
/// Default forward is -Z, right is +X.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListenerPose {
    /// Quaternion as `[x, y, z, w]`
    pub rotation: [f32; 4],
}

impl Default for ListenerPose {
    fn default() -> Self {
        Self {
            rotation: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl ListenerPose {
    /// Create a pose from a quaternion, normalizing it.
    /// Degenerate or non-finite input falls back to identity.
    pub fn new(rotation: [f32; 4]) -> Self {
        let [x, y, z, w] = rotation;
        let len = (x * x + y * y + z * z + w * w).sqrt();
        if !len.is_finite() || len <= f32::EPSILON {
            return Self::default();
        }
        Self {
            rotation: [x / len, y / len, z / len, w / len],
        }
    }

    /// Rotate a vector by the head orientation
    pub fn rotate(&self, v: [f32; 3]) -> [f32; 3] {
        let [qx, qy, qz, qw] = self.rotation;
        let uv = cross([qx, qy, qz], v);
        let uuv = cross([qx, qy, qz], uv);
        [
            v[0] + (uv[0] * qw + uuv[0]) * 2.0,
            v[1] + (uv[1] * qw + uuv[1]) * 2.0,
            v[2] + (uv[2] * qw + uuv[2]) * 2.0,
        ]
    }

    /// Unit vector pointing out of the right ear
    pub fn right(&self) -> [f32; 3] {
        self.rotate([1.0, 0.0, 0.0])
    }

    /// Unit vector the listener is facing
    pub fn forward(&self) -> [f32; 3] {
        self.rotate([0.0, 0.0, -1.0])
    }

    /// Left and right ear positions for a given ear spacing
    pub fn ear_positions(&self, spacing: f32) -> ([f32; 3], [f32; 3]) {
        let half = spacing * 0.5;
        let [rx, ry, rz] = self.right();
        (
            [-rx * half, -ry * half, -rz * half],
            [rx * half, ry * half, rz * half],
        )
    }
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}
