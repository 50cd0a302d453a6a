//! Console input
//!
//! A reader thread turns stdin lines into events on a channel the frame loop
//! polls without blocking.

use crossbeam_channel::{unbounded, Receiver};
use std::io::BufRead;
use std::thread;

/// Input from the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Trigger pull
    Trigger,
    /// Leave the round
    Quit,
}

/// Map a console line to an event. Any line that is not a quit command
/// fires, so a bare Enter is a trigger pull.
pub fn parse_line(line: &str) -> InputEvent {
    match line.trim().to_lowercase().as_str() {
        "q" | "quit" | "exit" => InputEvent::Quit,
        _ => InputEvent::Trigger,
    }
}

/// Start the stdin reader thread
pub fn spawn_stdin_reader() -> std::io::Result<Receiver<InputEvent>> {
    let (sender, receiver) = unbounded();

    thread::Builder::new()
        .name("darkness-input".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        log::warn!("Failed to read stdin: {}", e);
                        break;
                    }
                };
                if sender.send(parse_line(&line)).is_err() {
                    break;
                }
            }
            log::debug!("Input reader finished");
        })?;

    Ok(receiver)
}
