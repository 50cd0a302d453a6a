//! Frame loop
//!
//! Paces the controller at the configured frame rate, feeds it the scripted
//! head pose, forwards trigger pulls and decides when the round is over.

use crate::head::HeadSweep;
use crate::input::InputEvent;
use crossbeam_channel::Receiver;
use darkness_game::{EngagementController, EngagementEvent, FrameStatus, Host, TriggerOutcome};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Loop limits
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    /// Target frame duration; zero runs unpaced
    pub frame_period: Duration,
    /// Stop after this many frames
    pub max_frames: Option<u64>,
    /// Frames to keep going after the player died
    pub death_grace_frames: u32,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            frame_period: Duration::from_secs_f64(1.0 / 60.0),
            max_frames: None,
            death_grace_frames: 120,
        }
    }
}

/// What happened during a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub frames: u64,
    pub hits: u32,
    pub misses: u32,
    pub ambient_cues: u32,
    pub died: bool,
}

/// One round driven by the console
pub struct Session<H: Host> {
    game: EngagementController,
    host: H,
    sweep: HeadSweep,
    input: Receiver<InputEvent>,
    running: Arc<AtomicBool>,
    options: SessionOptions,
    summary: SessionSummary,
    frames_since_death: Option<u32>,
}

impl<H: Host> Session<H> {
    pub fn new(
        game: EngagementController,
        host: H,
        sweep: HeadSweep,
        input: Receiver<InputEvent>,
        running: Arc<AtomicBool>,
        options: SessionOptions,
    ) -> Self {
        Self {
            game,
            host,
            sweep,
            input,
            running,
            options,
            summary: SessionSummary::default(),
            frames_since_death: None,
        }
    }

    /// Run one frame. Returns whether the loop should go on.
    pub fn step(&mut self) -> bool {
        let frame = self.summary.frames;
        self.summary.frames += 1;

        match self.game.on_frame(&self.sweep.pose(frame)) {
            FrameStatus::PlayerDied => {
                self.summary.died = true;
                self.frames_since_death = Some(0);
                println!("The zombie got you.");
            }
            FrameStatus::Dead => {
                if let Some(count) = self.frames_since_death.as_mut() {
                    *count += 1;
                }
            }
            FrameStatus::Alive => {}
        }

        let mut quit = false;
        for event in self.input.try_iter() {
            match event {
                InputEvent::Quit => {
                    quit = true;
                    break;
                }
                InputEvent::Trigger => match self.game.on_trigger(&mut self.host) {
                    TriggerOutcome::Hit => self.summary.hits += 1,
                    TriggerOutcome::Miss => self.summary.misses += 1,
                    TriggerOutcome::Ignored => {}
                },
            }
        }

        self.game.draw(&mut self.host);

        for event in self.game.drain_events() {
            match event {
                EngagementEvent::Ambient(_) => self.summary.ambient_cues += 1,
                EngagementEvent::Hit { position } => {
                    println!("Hit! ({:.1}, {:.1})", position.x, position.z);
                }
                _ => {}
            }
        }

        if quit {
            log::info!("Quit requested");
            return false;
        }
        if let Some(count) = self.frames_since_death {
            if count >= self.options.death_grace_frames {
                return false;
            }
        }
        if let Some(max) = self.options.max_frames {
            if self.summary.frames >= max {
                log::info!("Reached {} frames", max);
                return false;
            }
        }
        true
    }

    /// Run until the round ends, the viewer quits or Ctrl+C
    pub fn run(mut self) -> SessionSummary {
        while self.running.load(Ordering::SeqCst) {
            let started = Instant::now();
            if !self.step() {
                break;
            }

            let elapsed = started.elapsed();
            if elapsed < self.options.frame_period {
                std::thread::sleep(self.options.frame_period - elapsed);
            }
        }
        self.summary
    }

    #[cfg(test)]
    pub fn game_mut(&mut self) -> &mut EngagementController {
        &mut self.game
    }

    #[cfg(test)]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[cfg(test)]
    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ConsoleHost;
    use crossbeam_channel::{unbounded, Sender};
    use darkness_audio::HeadlessAudio;
    use darkness_game::{GameConfig, InlineSpawner};
    use glam::Vec3;

    fn session(options: SessionOptions) -> (Sender<InputEvent>, Session<ConsoleHost>) {
        let game = EngagementController::new(
            GameConfig::default().with_seed(5),
            Arc::new(HeadlessAudio::new()),
            Arc::new(InlineSpawner),
        )
        .unwrap();
        let (tx, rx) = unbounded();
        let session = Session::new(
            game,
            ConsoleHost::new(),
            HeadSweep::from_degrees(120.0, 12.0, 60),
            rx,
            Arc::new(AtomicBool::new(true)),
            options,
        );
        (tx, session)
    }

    fn unpaced() -> SessionOptions {
        SessionOptions {
            frame_period: Duration::ZERO,
            max_frames: Some(50),
            death_grace_frames: 3,
        }
    }

    #[test]
    fn test_max_frames() {
        let (_tx, session) = session(unpaced());
        let summary = session.run();

        assert_eq!(summary.frames, 50);
        assert!(!summary.died);
    }

    #[test]
    fn test_quit_event() {
        let (tx, mut session) = session(unpaced());
        assert!(session.step());

        tx.send(InputEvent::Quit).unwrap();
        assert!(!session.step());
        assert_eq!(session.summary().frames, 2);
    }

    #[test]
    fn test_trigger_hits_zombie_ahead() {
        let (tx, mut session) = session(unpaced());

        // The sweep starts facing the scene-start zombie
        tx.send(InputEvent::Trigger).unwrap();
        assert!(session.step());

        assert_eq!(session.summary().hits, 1);
        assert_eq!(session.host().vibrations(), 1);
        assert!(session.host().draws() >= 1);
    }

    #[test]
    fn test_grace_period_after_death() {
        let (_tx, mut session) = session(unpaced());
        session
            .game_mut()
            .spawn_zombie_at(Vec3::new(2.5, 0.0, 0.0), 1.0);

        assert!(session.step());
        assert!(session.summary().died);
        assert!(session.step());
        assert!(session.step());
        assert!(!session.step());
        assert_eq!(session.summary().frames, 4);
    }

    #[test]
    fn test_ctrl_c_stops_run() {
        let (_tx, session) = session(SessionOptions {
            max_frames: None,
            ..unpaced()
        });
        session.running.store(false, Ordering::SeqCst);

        assert_eq!(session.run().frames, 0);
    }
}
