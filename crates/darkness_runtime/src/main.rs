//! Darkness Runtime
//!
//! Runs the jump scare without a headset: the head sweeps left and right on
//! its own, Enter pulls the trigger, and the zombie, its footsteps and the
//! water drops play through the configured audio engine.
//!
//! Run with: cargo run -p darkness_runtime
//!       or: cargo run --bin darkness --features audio

mod config;
mod error;
mod head;
mod host;
mod input;
mod session;

use config::{AudioBackend, RuntimeConfig};
use error::RuntimeError;
use head::HeadSweep;
use host::ConsoleHost;
use session::{Session, SessionOptions};

use darkness_audio::{HeadlessAudio, SpatialAudio};
use darkness_game::{EngagementController, TaskSpawner, WorkerPool};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Keeps the output device open for the lifetime of the round
#[cfg(feature = "audio")]
type AudioOutput = darkness_audio::RodioOutput;
#[cfg(not(feature = "audio"))]
type AudioOutput = ();

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!();
    println!("  D A R K N E S S");
    println!();
    println!("  Something is walking toward you. Look at it and press Enter.");
    println!("  Type 'q' and Enter to leave.");
    println!();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), RuntimeError> {
    let config = RuntimeConfig::load()?;
    config.print_summary();

    // Install signal handler for graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        log::info!("Received Ctrl+C, shutting down...");
        r.store(false, Ordering::SeqCst);
    }) {
        log::warn!("Failed to set Ctrl+C handler: {}", e);
    }

    let spawner: Arc<dyn TaskSpawner> = Arc::new(WorkerPool::new(config.workers)?);
    let (audio, _output) = open_audio(&config);

    let game = EngagementController::new(config.game.clone(), audio, spawner)?;
    let input = input::spawn_stdin_reader()?;

    let options = SessionOptions {
        frame_period: Duration::from_secs_f64(1.0 / config.game.frame_rate as f64),
        max_frames: config.max_frames,
        death_grace_frames: config.death_grace_frames,
    };
    let sweep = HeadSweep::from_degrees(
        config.sweep_degrees,
        config.sweep_seconds,
        config.game.frame_rate,
    );

    let summary = Session::new(game, ConsoleHost::new(), sweep, input, running, options).run();

    println!();
    println!(
        "{} after {:.1} s: {} hits, {} misses, {} water drops",
        if summary.died { "Dead" } else { "Survived" },
        summary.frames as f64 / config.game.frame_rate as f64,
        summary.hits,
        summary.misses,
        summary.ambient_cues
    );
    Ok(())
}

fn headless(config: &RuntimeConfig) -> Arc<dyn SpatialAudio> {
    Arc::new(HeadlessAudio::new().with_one_shot_updates(config.audio.headless_one_shot_updates))
}

/// Open the configured audio engine, falling back to headless
#[cfg(feature = "audio")]
fn open_audio(config: &RuntimeConfig) -> (Arc<dyn SpatialAudio>, Option<AudioOutput>) {
    if config.audio_backend == AudioBackend::Rodio {
        match darkness_audio::RodioAudio::open_default(config.audio.clone()) {
            Ok((output, audio)) => return (Arc::new(audio), Some(output)),
            Err(e) => log::warn!("Audio backend rodio failed: {}; falling back to headless", e),
        }
    }
    (headless(config), None)
}

/// Open the configured audio engine, falling back to headless
#[cfg(not(feature = "audio"))]
fn open_audio(config: &RuntimeConfig) -> (Arc<dyn SpatialAudio>, Option<AudioOutput>) {
    if config.audio_backend == AudioBackend::Rodio {
        log::warn!("Audio backend rodio not compiled in. Enable the 'audio' feature.");
    }
    (headless(config), None)
}
