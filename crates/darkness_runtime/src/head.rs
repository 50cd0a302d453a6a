//! Scripted head motion standing in for HMD tracking

use darkness_game::HeadTransform;
use std::f32::consts::TAU;

/// Sinusoidal left-right head sweep around the -Z axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadSweep {
    /// Half-width of the sweep in radians
    pub amplitude: f32,
    /// Frames per full left-right-left cycle
    pub period_frames: u32,
}

impl HeadSweep {
    pub fn new(amplitude: f32, period_frames: u32) -> Self {
        Self {
            amplitude,
            period_frames: period_frames.max(1),
        }
    }

    /// Sweep from degrees and seconds at a given frame rate
    pub fn from_degrees(degrees: f32, seconds: f32, frame_rate: u32) -> Self {
        let frames = (seconds.max(0.0) * frame_rate as f32).round() as u32;
        Self::new(degrees.to_radians(), frames)
    }

    /// Yaw at a frame
    pub fn yaw(&self, frame: u64) -> f32 {
        let phase = (frame % self.period_frames as u64) as f32 / self.period_frames as f32;
        self.amplitude * (phase * TAU).sin()
    }

    /// Head pose at a frame
    pub fn pose(&self, frame: u64) -> HeadTransform {
        HeadTransform::from_yaw(self.yaw(frame))
    }
}
