//! Ambient water drops
//!
//! A frame counter fires a one-shot drop at a random spot in the room, then
//! re-arms itself with a fresh random interval. Nothing is remembered between
//! drops, so files and spots may repeat.

use crate::config::GameConfig;
use crate::cue;
use crate::task::TaskSpawner;
use darkness_audio::{CueSet, SpatialAudio};
use rand::Rng;
use std::sync::Arc;

/// A drop that was just queued
#[derive(Debug, Clone, PartialEq)]
pub struct AmbientCue {
    pub file: String,
    pub position: [f32; 3],
}

/// Frame-counting scheduler for ambient one-shots
#[derive(Debug, Clone)]
pub struct AmbientScheduler {
    ticks_until_next: u32,
    ticks_since_last: u32,
    max_ticks: u32,
    max_distance: f32,
    files: CueSet,
}

impl AmbientScheduler {
    /// Create a scheduler armed with a first random interval.
    ///
    /// `max_ticks` is the exclusive bound of every interval (at least 1).
    pub fn new<R: Rng + ?Sized>(
        files: CueSet,
        max_ticks: u32,
        max_distance: f32,
        rng: &mut R,
    ) -> Self {
        let mut scheduler = Self {
            ticks_until_next: 0,
            ticks_since_last: 0,
            max_ticks: max_ticks.max(1),
            max_distance,
            files,
        };
        scheduler.arm(rng);
        scheduler
    }

    /// Water drops as configured
    pub fn from_config<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Self {
        Self::new(
            config.sounds.water_drops.clone(),
            config.ambient_max_ticks(),
            config.max_model_distance,
            rng,
        )
    }

    /// Draw the next interval and reset the counter
    pub fn arm<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.ticks_until_next = rng.gen_range(0..self.max_ticks);
        self.ticks_since_last = 0;
    }

    /// Count one frame; fire and re-arm once the interval has elapsed
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        audio: &Arc<dyn SpatialAudio>,
        spawner: &dyn TaskSpawner,
        rng: &mut R,
    ) -> Option<AmbientCue> {
        self.ticks_since_last = self.ticks_since_last.saturating_add(1);
        if self.ticks_since_last < self.ticks_until_next {
            return None;
        }

        self.arm(rng);

        let file = match self.files.pick(rng) {
            Some(file) => file.to_string(),
            None => {
                log::warn!("No ambient sounds configured");
                return None;
            }
        };
        let position = [self.random_coordinate(rng), 0.0, self.random_coordinate(rng)];

        cue::fire(audio, spawner, "ambient-cue", file.clone(), position);
        Some(AmbientCue { file, position })
    }

    fn random_coordinate<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max_distance > 0.0 {
            rng.gen_range(0.0..self.max_distance)
        } else {
            0.0
        }
    }

    /// Frames until the next drop is due
    pub fn ticks_until_next(&self) -> u32 {
        self.ticks_until_next
    }

    /// Frames since the last drop
    pub fn ticks_since_last(&self) -> u32 {
        self.ticks_since_last
    }

    /// Exclusive bound of the interval
    pub fn max_ticks(&self) -> u32 {
        self.max_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::InlineSpawner;
    use darkness_audio::{HeadlessAudio, SoundLibrary};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scheduler(rng: &mut StdRng) -> AmbientScheduler {
        AmbientScheduler::new(SoundLibrary::default().water_drops, 420, 7.0, rng)
    }

    #[test]
    fn test_initial_interval_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let s = scheduler(&mut rng);
            assert!(s.ticks_until_next() < 420);
            assert_eq!(s.ticks_since_last(), 0);
        }
    }

    #[test]
    fn test_fires_and_rearms() {
        let headless = Arc::new(HeadlessAudio::new());
        let audio: Arc<dyn SpatialAudio> = headless.clone();
        let mut rng = StdRng::seed_from_u64(2);
        let mut s = scheduler(&mut rng);

        let mut fired = 0;
        for _ in 0..5000 {
            if let Some(cue) = s.tick(&audio, &InlineSpawner, &mut rng) {
                fired += 1;
                assert_eq!(s.ticks_since_last(), 0);
                assert!(s.ticks_until_next() < 420);
                assert!(SoundLibrary::default().water_drops.contains(&cue.file));
                assert!(cue.position[0] >= 0.0 && cue.position[0] < 7.0);
                assert_eq!(cue.position[1], 0.0);
                assert!(cue.position[2] >= 0.0 && cue.position[2] < 7.0);
            }
        }
        assert!(fired >= 5000 / 420);
        assert_eq!(headless.created_count(), fired as u64);
    }

    #[test]
    fn test_fires_at_equality() {
        let audio: Arc<dyn SpatialAudio> = Arc::new(HeadlessAudio::new());
        let mut rng = StdRng::seed_from_u64(3);
        let mut s = scheduler(&mut rng);
        s.ticks_until_next = 3;
        s.ticks_since_last = 2;

        // The third frame brings the counter level with the interval
        assert!(s.tick(&audio, &InlineSpawner, &mut rng).is_some());
        assert_eq!(s.ticks_since_last(), 0);
    }

    #[test]
    fn test_waits_for_interval() {
        let audio: Arc<dyn SpatialAudio> = Arc::new(HeadlessAudio::new());
        let mut rng = StdRng::seed_from_u64(4);
        let mut s = scheduler(&mut rng);
        s.ticks_until_next = 10;

        for n in 1..10 {
            assert!(s.tick(&audio, &InlineSpawner, &mut rng).is_none());
            assert_eq!(s.ticks_since_last(), n);
        }
        assert!(s.tick(&audio, &InlineSpawner, &mut rng).is_some());
    }

    #[test]
    fn test_zero_interval_fires_every_frame() {
        let audio: Arc<dyn SpatialAudio> = Arc::new(HeadlessAudio::new());
        let mut rng = StdRng::seed_from_u64(5);
        let mut s = AmbientScheduler::new(SoundLibrary::default().water_drops, 1, 7.0, &mut rng);

        for _ in 0..10 {
            assert!(s.tick(&audio, &InlineSpawner, &mut rng).is_some());
        }
    }
}
