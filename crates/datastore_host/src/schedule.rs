//! Scheduling contracts for fire-and-forget tasks and coalescing delays.

use std::{future::Future, pin::Pin};

/// Boxed future handed to [`TaskSpawner::spawn_local`].
pub type LocalTask = Pin<Box<dyn Future<Output = ()> + 'static>>;

/// Spawns fire-and-forget continuations on the single-threaded runtime.
///
/// The file manager core uses this for event-driven refreshes and debounced
/// permission fetches; the embedder supplies the concrete executor hook.
pub trait TaskSpawner {
    /// Queues `task` to run to completion on the current-thread executor.
    fn spawn_local(&self, task: LocalTask);
}

#[derive(Debug, Clone, Copy, Default)]
/// Spawner that drops every task, for targets with no executor.
pub struct NoopTaskSpawner;

impl TaskSpawner for NoopTaskSpawner {
    fn spawn_local(&self, _task: LocalTask) {}
}

/// Object-safe boxed future used by [`DelayTimer`].
pub type TimerFuture<'a> = Pin<Box<dyn Future<Output = ()> + 'a>>;

/// Async delay source used to coalesce rapid state changes.
pub trait DelayTimer {
    /// Resolves after roughly `ms` milliseconds.
    fn delay<'a>(&'a self, ms: u32) -> TimerFuture<'a>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Timer whose delays resolve immediately, for tests and headless targets.
pub struct ImmediateDelay;

impl DelayTimer for ImmediateDelay {
    fn delay<'a>(&'a self, _ms: u32) -> TimerFuture<'a> {
        Box::pin(async {})
    }
}
