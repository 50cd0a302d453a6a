//! Console stand-in for the stereo renderer and vibrator

use darkness_game::Host;
use glam::{Mat4, Vec3};
use std::time::Duration;

/// Logs what a headset would show and feel
#[derive(Debug, Default)]
pub struct ConsoleHost {
    draws: u64,
    vibrations: u32,
    looked_at: bool,
}

impl ConsoleHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames drawn so far
    #[cfg(test)]
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Haptic pulses so far
    #[cfg(test)]
    pub fn vibrations(&self) -> u32 {
        self.vibrations
    }
}

impl Host for ConsoleHost {
    fn draw_entity(&mut self, model: &Mat4, looked_at: bool) {
        self.draws += 1;

        let position = model.transform_point3(Vec3::ZERO);
        log::trace!("Draw zombie at {:?} (looked at: {})", position, looked_at);

        if looked_at != self.looked_at {
            let distance = (position.x * position.x + position.z * position.z).sqrt();
            if looked_at {
                log::info!("The zombie is right in front of you ({:.1} m)", distance);
            } else {
                log::info!("You lost sight of the zombie");
            }
            self.looked_at = looked_at;
        }
    }

    fn vibrate(&mut self, duration: Duration) {
        self.vibrations += 1;
        log::info!("*bzzt* ({} ms)", duration.as_millis());
    }
}
