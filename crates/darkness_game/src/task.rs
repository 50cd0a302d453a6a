//! Fire-and-forget task execution
//!
//! Every preload/create/play sequence runs through a [`TaskSpawner`] so the
//! frame callback never waits on decoding or I/O. Submissions return as soon
//! as the task is queued; nothing observes completion.

use crossbeam_channel::{unbounded, Sender};
use std::panic::{self, AssertUnwindSafe};
use std::thread;
use thiserror::Error;

/// Unit of background work
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Task submission errors
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task queue is closed")]
    QueueClosed,

    #[error("Failed to spawn worker thread: {0}")]
    WorkerSpawn(#[from] std::io::Error),
}

/// Executor abstraction: submit, don't await
pub trait TaskSpawner: Send + Sync {
    /// Queue a task. `label` is only used for logging.
    fn spawn(&self, label: &'static str, task: Task) -> Result<(), TaskError>;
}

/// Submit a closure, logging instead of failing.
///
/// Returns whether the task was accepted.
pub fn submit<F>(spawner: &dyn TaskSpawner, label: &'static str, f: F) -> bool
where
    F: FnOnce() + Send + 'static,
{
    match spawner.spawn(label, Box::new(f)) {
        Ok(()) => {
            log::trace!("Submitted task '{}'", label);
            true
        }
        Err(e) => {
            log::warn!("Dropped task '{}': {}", label, e);
            false
        }
    }
}

/// Runs every task immediately on the calling thread
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineSpawner;

impl TaskSpawner for InlineSpawner {
    fn spawn(&self, label: &'static str, task: Task) -> Result<(), TaskError> {
        run_guarded(label, task);
        Ok(())
    }
}

struct Job {
    label: &'static str,
    task: Task,
}

/// Fixed set of worker threads fed from an unbounded queue.
///
/// Dropping the pool closes the queue; workers finish what is queued and
/// exit on their own. Nothing joins them.
pub struct WorkerPool {
    sender: Sender<Job>,
    workers: usize,
}

impl WorkerPool {
    /// Start `workers` threads (at least one)
    pub fn new(workers: usize) -> Result<Self, TaskError> {
        let workers = workers.max(1);
        let (sender, receiver) = unbounded::<Job>();

        for index in 0..workers {
            let receiver = receiver.clone();
            thread::Builder::new()
                .name(format!("darkness-cue-{}", index))
                .spawn(move || {
                    for job in receiver.iter() {
                        run_guarded(job.label, job.task);
                    }
                    log::trace!("Cue worker {} exiting", index);
                })?;
        }

        log::debug!("Started {} cue workers", workers);
        Ok(Self { sender, workers })
    }

    /// Number of worker threads
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Tasks waiting for a worker
    pub fn pending(&self) -> usize {
        self.sender.len()
    }
}

impl TaskSpawner for WorkerPool {
    fn spawn(&self, label: &'static str, task: Task) -> Result<(), TaskError> {
        self.sender
            .send(Job { label, task })
            .map_err(|_| TaskError::QueueClosed)
    }
}

/// A panicking task must not take its worker down
fn run_guarded(label: &'static str, task: Task) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(task)) {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        log::warn!("Task '{}' panicked: {}", label, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_inline_runs_immediately() {
        let counter = Arc::new(AtomicUsize::new(0));
        let c = counter.clone();

        assert!(submit(&InlineSpawner, "count", move || {
            c.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_inline_survives_panic() {
        assert!(submit(&InlineSpawner, "boom", || panic!("boom")));
    }

    #[test]
    fn test_worker_pool_runs_tasks() {
        let pool = WorkerPool::new(2).unwrap();
        let (tx, rx) = bounded(8);

        for i in 0..4 {
            let tx = tx.clone();
            assert!(submit(&pool, "send", move || {
                tx.send(i).unwrap();
            }));
        }

        let mut received: Vec<i32> = (0..4)
            .map(|_| rx.recv_timeout(Duration::from_secs(5)).unwrap())
            .collect();
        received.sort();
        assert_eq!(received, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_worker_survives_panic() {
        let pool = WorkerPool::new(1).unwrap();
        let (tx, rx) = bounded(1);

        submit(&pool, "boom", || panic!("boom"));
        submit(&pool, "after", move || {
            tx.send(()).unwrap();
        });

        assert!(rx.recv_timeout(Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn test_zero_workers_clamped() {
        let pool = WorkerPool::new(0).unwrap();
        assert_eq!(pool.workers(), 1);
    }
}
