//! Engagement Controller Integration Tests
//!
//! Drives whole rounds against the headless audio engine with inline task
//! execution, so every queued cue has run by the time a call returns.

use approx::assert_relative_eq;
use darkness_audio::{HeadlessAudio, SoundLibrary, SpatialAudio};
use darkness_game::prelude::*;
use glam::{Mat4, Vec3};
use std::f32::consts::PI;
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Test Host
// ============================================================================

#[derive(Default)]
struct RecordingHost {
    draws: Vec<(Mat4, bool)>,
    vibrations: Vec<Duration>,
}

impl Host for RecordingHost {
    fn draw_entity(&mut self, model: &Mat4, looked_at: bool) {
        self.draws.push((*model, looked_at));
    }

    fn vibrate(&mut self, duration: Duration) {
        self.vibrations.push(duration);
    }
}

fn setup_with(headless: HeadlessAudio) -> (Arc<HeadlessAudio>, EngagementController) {
    let headless = Arc::new(headless);
    let audio: Arc<dyn SpatialAudio> = headless.clone();
    let game = EngagementController::new(
        GameConfig::default().with_seed(42),
        audio,
        Arc::new(InlineSpawner),
    )
    .expect("default config is valid");
    (headless, game)
}

fn setup() -> (Arc<HeadlessAudio>, EngagementController) {
    setup_with(HeadlessAudio::new())
}

/// Head pose looking straight at a point on the floor plane
fn facing(target: Vec3) -> HeadTransform {
    HeadTransform::from_yaw((-target.x).atan2(-target.z))
}

fn behind() -> HeadTransform {
    HeadTransform::from_yaw(PI)
}

// ============================================================================
// Round Start
// ============================================================================

#[test]
fn test_round_start() {
    let (headless, game) = setup();
    let sounds = SoundLibrary::default();

    assert!(game.is_player_alive());
    assert_eq!(game.frame_count(), 0);
    assert_relative_eq!(game.zombie().position().z, -3.5);
    assert_eq!(game.zombie().speed(), 0.0);
    assert!(game.is_looking_at());

    // Background bed and the zombie's first breath
    let voices = headless.playing_voices();
    assert!(voices.iter().any(|v| Some(&v.file) == sounds.background.as_ref() && v.looped));
    assert!(voices.iter().any(|v| sounds.breathing.contains(&v.file)));
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = GameConfig::default();
    config.frame_rate = 0;

    let result = EngagementController::new(
        config,
        Arc::new(HeadlessAudio::new()),
        Arc::new(InlineSpawner),
    );
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

// ============================================================================
// Approach
// ============================================================================

#[test]
fn test_monotonic_closing_distance() {
    let (_, mut game) = setup();
    game.spawn_zombie_at(Vec3::new(7.0, 0.0, 0.0), 0.5);

    let mut previous = game.zombie().distance();
    for _ in 0..10 {
        assert_eq!(game.on_frame(&behind()), FrameStatus::Alive);
        let distance = game.zombie().distance();
        assert_relative_eq!(distance, previous - 0.5, epsilon = 1e-5);
        previous = distance;
    }
}

#[test]
fn test_terminal_threshold_boundary() {
    let (_, mut game) = setup();
    game.spawn_zombie_at(Vec3::new(3.0, 0.0, 0.0), 1.0);

    // 3.0 - 1.0 is exactly the engage distance: still alive
    assert_eq!(game.on_frame(&behind()), FrameStatus::Alive);
    assert_relative_eq!(game.zombie().distance(), 2.0);

    assert_eq!(game.on_frame(&behind()), FrameStatus::PlayerDied);
    assert!(!game.is_player_alive());
}

#[test]
fn test_end_to_end_death_scenario() {
    let (headless, mut game) = setup();
    let sounds = SoundLibrary::default();
    game.spawn_zombie_at(Vec3::new(7.0, 0.0, 0.0), 1.0);

    for _ in 0..5 {
        assert_eq!(game.on_frame(&behind()), FrameStatus::Alive);
    }
    assert_relative_eq!(game.zombie().distance(), 2.0, epsilon = 1e-5);

    assert_eq!(game.on_frame(&behind()), FrameStatus::PlayerDied);
    assert!(!game.is_player_alive());
    let final_position = game.zombie().position();

    let events = game.drain_events();
    assert!(events.iter().any(|e| matches!(
        e,
        EngagementEvent::PlayerDied { frame: 6, .. }
    )));

    // Death cue at the zombie, zombie and background silenced
    let voices = headless.playing_voices();
    let death: Vec<_> = voices
        .iter()
        .filter(|v| sounds.player_death.contains(&v.file))
        .collect();
    assert_eq!(death.len(), 1);
    assert_eq!(death[0].position, final_position.to_array());
    assert!(!voices
        .iter()
        .any(|v| sounds.footsteps.contains(&v.file) || sounds.breathing.contains(&v.file)));
    assert_eq!(game.background().state(), SlotState::Stopped);

    // Terminal state absorbs every later frame
    let updates = headless.update_count();
    for _ in 0..20 {
        assert_eq!(game.on_frame(&behind()), FrameStatus::Dead);
    }
    assert_eq!(game.zombie().position(), final_position);
    assert_eq!(game.frame_count(), 6);
    assert_eq!(headless.update_count(), updates);
}

// ============================================================================
// Gaze
// ============================================================================

#[test]
fn test_gaze_ahead_and_behind() {
    let (_, mut game) = setup();

    game.spawn_zombie_at(Vec3::new(0.0, 0.0, -5.0), 0.0);
    assert!(game.is_looking_at());

    game.spawn_zombie_at(Vec3::new(0.0, 0.0, 5.0), 0.0);
    assert!(!game.is_looking_at());

    game.on_frame(&behind());
    assert!(game.is_looking_at());
    assert!(game.looked_at());
}

#[test]
fn test_draw_reports_gaze() {
    let (_, mut game) = setup();
    let mut host = RecordingHost::default();

    game.on_frame(&HeadTransform::default());
    game.draw(&mut host);
    game.on_frame(&behind());
    game.draw(&mut host);

    assert_eq!(host.draws.len(), 2);
    assert!(host.draws[0].1);
    assert!(!host.draws[1].1);
    assert_eq!(host.draws[1].0, *game.zombie().model());
}

// ============================================================================
// Trigger
// ============================================================================

#[test]
fn test_trigger_miss_fires_weapon_only() {
    let (headless, mut game) = setup();
    let mut host = RecordingHost::default();
    game.on_frame(&behind());
    game.drain_events();

    let before = headless.created_count();
    let position = game.zombie().position();

    assert_eq!(game.on_trigger(&mut host), TriggerOutcome::Miss);

    assert_eq!(headless.created_count(), before + 1);
    let weapon: Vec<_> = headless
        .playing_voices()
        .into_iter()
        .filter(|v| v.file == "handgun_shot.wav")
        .collect();
    assert_eq!(weapon.len(), 1);
    assert_eq!(weapon[0].position, [0.0, -10.0, 0.0]);
    assert!(!weapon[0].looped);

    assert_eq!(game.zombie().position(), position);
    assert!(host.vibrations.is_empty());
    assert!(game.drain_events().is_empty());
}

#[test]
fn test_trigger_hit_respawns() {
    let (headless, mut game) = setup();
    let mut host = RecordingHost::default();
    let sounds = SoundLibrary::default();

    game.on_frame(&HeadTransform::default());
    game.drain_events();
    let old_position = game.zombie().position();

    assert_eq!(game.on_trigger(&mut host), TriggerOutcome::Hit);

    assert_eq!(host.vibrations, vec![Duration::from_millis(250)]);
    assert_relative_eq!(game.zombie().distance(), 7.0, epsilon = 1e-5);
    assert_relative_eq!(game.zombie().speed(), 0.007);

    let death: Vec<_> = headless
        .playing_voices()
        .into_iter()
        .filter(|v| sounds.zombie_death.contains(&v.file))
        .collect();
    assert_eq!(death.len(), 1);
    assert_eq!(death[0].position, old_position.to_array());

    let events = game.drain_events();
    assert!(matches!(events[0], EngagementEvent::Hit { .. }));
    assert!(matches!(events[1], EngagementEvent::Respawned { speed, .. } if speed == 0.007));
}

#[test]
fn test_rapid_triggers_each_reevaluate() {
    let (_, mut game) = setup();
    let mut host = RecordingHost::default();

    let mut hits = 0;
    for _ in 0..10 {
        let head = facing(game.zombie().position());
        game.on_frame(&head);
        if game.on_trigger(&mut host) == TriggerOutcome::Hit {
            hits += 1;
        }
        // Immediately again: the replacement is somewhere else entirely
        let outcome = game.on_trigger(&mut host);
        if outcome == TriggerOutcome::Hit {
            hits += 1;
        }
    }
    assert!(hits >= 10);
    assert_eq!(host.vibrations.len(), hits);
}

#[test]
fn test_trigger_after_death_ignored() {
    let (headless, mut game) = setup();
    let mut host = RecordingHost::default();
    game.spawn_zombie_at(Vec3::new(0.0, 0.0, -2.5), 1.0);
    assert_eq!(game.on_frame(&HeadTransform::default()), FrameStatus::PlayerDied);

    let before = headless.created_count();
    let position = game.zombie().position();

    assert_eq!(game.on_trigger(&mut host), TriggerOutcome::Ignored);
    assert_eq!(headless.created_count(), before + 1);
    assert_eq!(game.zombie().position(), position);
    assert!(host.vibrations.is_empty());
}

// ============================================================================
// Audio
// ============================================================================

#[test]
fn test_cue_exclusivity_over_a_round() {
    let (headless, mut game) = setup_with(HeadlessAudio::new().with_one_shot_updates(4));
    let mut host = RecordingHost::default();
    let sounds = SoundLibrary::default();
    game.spawn_zombie_at(Vec3::new(7.0, 0.0, 0.0), 0.005);

    for frame in 0..600 {
        let head = facing(game.zombie().position());
        assert_ne!(game.on_frame(&head), FrameStatus::Dead);
        if frame % 97 == 0 {
            game.on_trigger(&mut host);
        }

        assert!(headless.playing_count_where(|f| sounds.breathing.contains(f)) <= 1);
        assert!(headless.playing_count_where(|f| sounds.footsteps.contains(f)) <= 1);
    }
}

#[test]
fn test_voices_follow_zombie() {
    let (headless, mut game) = setup();
    game.spawn_zombie_at(Vec3::new(0.0, 0.0, -6.0), 0.1);

    for _ in 0..5 {
        game.on_frame(&HeadTransform::default());
    }

    let expected = game.zombie().position();
    for category in CueCategory::ALL {
        let SlotState::Playing(handle) = game.zombie().audio().state(category) else {
            panic!("{:?} should be playing", category);
        };
        let voice = headless.voice(handle).unwrap();
        assert_relative_eq!(voice.position[2], expected.z, epsilon = 1e-5);
    }
}

#[test]
fn test_listener_follows_head() {
    let (headless, mut game) = setup();
    let head = HeadTransform::from_yaw(0.5);

    game.on_frame(&head);

    let rotation = headless.listener().rotation;
    let expected = head.orientation_array();
    for (a, b) in rotation.iter().zip(expected.iter()) {
        assert_relative_eq!(a, b, epsilon = 1e-6);
    }
    assert_eq!(headless.update_count(), 1);
}

#[test]
fn test_ambient_cues_within_room() {
    let (headless, mut game) = setup();
    let sounds = SoundLibrary::default();

    let mut cues = Vec::new();
    for _ in 0..2000 {
        game.on_frame(&behind());
        for event in game.drain_events() {
            if let EngagementEvent::Ambient(cue) = event {
                cues.push(cue);
            }
        }
    }

    assert!(cues.len() >= 2000 / 420);
    for cue in &cues {
        assert!(sounds.water_drops.contains(&cue.file));
        assert!((0.0..7.0).contains(&cue.position[0]));
        assert_eq!(cue.position[1], 0.0);
        assert!((0.0..7.0).contains(&cue.position[2]));
    }
    assert!(headless.created_count() as usize > cues.len());
}

#[test]
fn test_failed_voice_creation_recovers() {
    let (headless, mut game) = setup();
    game.spawn_zombie_at(Vec3::new(0.0, 0.0, -6.0), 0.0);
    headless.fail_next_creates(1);

    // Footsteps fail once, then come back on the next frame
    game.on_frame(&behind());
    assert_eq!(game.zombie().audio().state(CueCategory::Footsteps), SlotState::Idle);
    game.on_frame(&behind());
    assert!(matches!(
        game.zombie().audio().state(CueCategory::Footsteps),
        SlotState::Playing(_)
    ));
}

// ============================================================================
// Head Pose
// ============================================================================

#[test]
fn test_non_finite_pose_ignored() {
    let (_, mut game) = setup();
    let turned = HeadTransform::from_yaw(1.0);
    game.on_frame(&turned);
    game.drain_events();

    let broken = HeadTransform::from_parts(glam::Quat::from_xyzw(f32::NAN, 0.0, 0.0, 1.0), Mat4::IDENTITY);
    assert_eq!(game.on_frame(&broken), FrameStatus::Alive);

    assert_eq!(*game.head(), turned);
    assert_eq!(game.frame_count(), 2);
    assert!(matches!(
        game.drain_events().as_slice(),
        [EngagementEvent::PoseRejected { frame: 2 }, ..]
    ));
}

// ============================================================================
// Worker Pool
// ============================================================================

#[test]
fn test_round_on_worker_pool() {
    let headless = Arc::new(HeadlessAudio::new());
    let audio: Arc<dyn SpatialAudio> = headless.clone();
    let pool = Arc::new(WorkerPool::new(2).unwrap());
    let mut game =
        EngagementController::new(GameConfig::default().with_seed(3), audio, pool).unwrap();

    // The spawn-time breathing cue arrives asynchronously
    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    while game.zombie().audio().state(CueCategory::Breathing) == SlotState::Requesting {
        assert!(std::time::Instant::now() < deadline, "initial cue never arrived");
        std::thread::sleep(Duration::from_millis(5));
    }
    assert!(matches!(
        game.zombie().audio().state(CueCategory::Breathing),
        SlotState::Playing(_)
    ));

    for _ in 0..10 {
        assert_eq!(game.on_frame(&HeadTransform::default()), FrameStatus::Alive);
    }
}
