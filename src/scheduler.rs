//! Clocks and fire-and-forget timers
//!
//! The widget runs on a single cooperative UI loop. Cosmetic work that must
//! happen later (removing a ripple) is queued here as plain data and executed
//! by the host when it runs due timers; nothing ever waits on a timer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::component::{ComponentError, NodeId};

/// Source of wall-clock time in milliseconds since the Unix epoch
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> u64;
}

/// Clock backed by the platform's real time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[cfg(target_arch = "wasm32")]
    fn now_ms(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now_ms(&self) -> u64 {
        use std::time::{SystemTime, UNIX_EPOCH};

        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or_default()
    }
}

/// Manually driven clock for deterministic hosts
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    /// Move time forward by `ms` milliseconds
    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn set(&self, now_ms: u64) {
        self.now.store(now_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Identifier of a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Deferred work a widget asks its host to run later
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerTask {
    /// Remove a ripple node from a widget's clickable element
    RemoveRipple { widget: NodeId, ripple: NodeId },
}

impl TimerTask {
    /// Widget the task belongs to
    pub fn widget(&self) -> NodeId {
        match self {
            Self::RemoveRipple { widget, .. } => *widget,
        }
    }
}

#[derive(Debug)]
struct ScheduledTimer {
    id: TimerId,
    due_at: u64,
    task: TimerTask,
}

/// Shared queue of pending timers
///
/// Cloning yields another handle to the same queue.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    timers: Arc<Mutex<Vec<ScheduledTimer>>>,
    next_id: Arc<AtomicU64>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` to run once the clock reaches `due_at`
    pub fn schedule(&self, due_at: u64, task: TimerTask) -> Result<TimerId, ComponentError> {
        let id = TimerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut timers = self
            .timers
            .lock()
            .map_err(|e| ComponentError::LockError(format!("Failed to lock timer queue: {e}")))?;
        timers.push(ScheduledTimer { id, due_at, task });
        Ok(id)
    }

    /// Drop a pending timer; returns `false` if it already ran or never existed
    pub fn cancel(&self, id: TimerId) -> Result<bool, ComponentError> {
        let mut timers = self
            .timers
            .lock()
            .map_err(|e| ComponentError::LockError(format!("Failed to lock timer queue: {e}")))?;
        let before = timers.len();
        timers.retain(|timer| timer.id != id);
        Ok(timers.len() != before)
    }

    /// Remove and return every timer due at `now`, oldest deadline first
    pub fn take_due(&self, now: u64) -> Result<Vec<(TimerId, TimerTask)>, ComponentError> {
        let mut timers = self
            .timers
            .lock()
            .map_err(|e| ComponentError::LockError(format!("Failed to lock timer queue: {e}")))?;

        let (mut due, pending): (Vec<_>, Vec<_>) =
            timers.drain(..).partition(|timer| timer.due_at <= now);
        *timers = pending;

        due.sort_by_key(|timer| (timer.due_at, timer.id));
        Ok(due.into_iter().map(|timer| (timer.id, timer.task)).collect())
    }

    /// Number of timers still waiting
    pub fn pending(&self) -> usize {
        self.timers.lock().map(|timers| timers.len()).unwrap_or(0)
    }
}
