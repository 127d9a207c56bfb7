//! Frame scheduler - per-frame callbacks driven by the host refresh cycle.
//!
//! The host (the egui update loop) calls `tick()` once per display refresh.
//! Every live loop runs exactly once per tick with the current wall-clock
//! time, then stays armed for the next tick.
//!
//! Loops are owned through `FrameHandle`. Cancelling or dropping the handle
//! removes the callback; no callback of that loop runs afterwards. This
//! replaces the "callback that re-schedules itself" pattern with an explicit
//! scoped resource.

use log::trace;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::{SystemTime, UNIX_EPOCH};

/// Callback invoked once per tick while its loop is live.
pub type FrameCallback = Box<dyn FnMut(FrameTime) + Send>;

/// Timing info handed to every frame callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTime {
    /// Wall-clock seconds since the Unix epoch
    pub now: f64,
    /// Scheduler tick counter (1-based)
    pub tick: u64,
}

struct LoopSlot {
    callback: Arc<Mutex<FrameCallback>>,
    runs: Arc<AtomicU64>,
}

#[derive(Default)]
struct SchedulerInner {
    loops: BTreeMap<u64, LoopSlot>,
    next_id: u64,
    ticks: u64,
}

/// Registry of frame loops. Cheap to clone, all clones share the registry.
#[derive(Clone, Default)]
pub struct FrameScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl std::fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        f.debug_struct("FrameScheduler")
            .field("active_loops", &inner.loops.len())
            .field("ticks", &inner.ticks)
            .finish()
    }
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a loop. It runs on every following `tick()` until the
    /// returned handle is cancelled or dropped.
    #[must_use = "dropping the handle cancels the loop immediately"]
    pub fn start_loop<F>(&self, callback: F) -> FrameHandle
    where
        F: FnMut(FrameTime) + Send + 'static,
    {
        let runs = Arc::new(AtomicU64::new(0));
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.next_id += 1;
        let id = inner.next_id;
        inner.loops.insert(
            id,
            LoopSlot {
                callback: Arc::new(Mutex::new(Box::new(callback))),
                runs: Arc::clone(&runs),
            },
        );
        trace!("FrameScheduler: loop {} started ({} active)", id, inner.loops.len());

        FrameHandle {
            id,
            scheduler: Arc::downgrade(&self.inner),
            runs,
            cancelled: false,
        }
    }

    /// Run every live loop once. Returns the number of callbacks invoked.
    ///
    /// Callbacks run without the registry lock held, so a callback may start
    /// or cancel loops. A loop cancelled mid-tick is skipped.
    pub fn tick(&self, now: f64) -> usize {
        let (tick, due) = {
            let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            inner.ticks += 1;
            let due: Vec<_> = inner
                .loops
                .iter()
                .map(|(id, slot)| (*id, Arc::clone(&slot.callback), Arc::clone(&slot.runs)))
                .collect();
            (inner.ticks, due)
        };

        let mut invoked = 0;
        for (id, callback, runs) in due {
            if !self.is_live(id) {
                continue;
            }
            let mut callback = callback.lock().unwrap_or_else(|e| e.into_inner());
            (callback)(FrameTime { now, tick });
            runs.fetch_add(1, Ordering::Relaxed);
            invoked += 1;
        }
        invoked
    }

    /// Number of loops currently armed
    pub fn active_loops(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).loops.len()
    }

    /// Total ticks since creation
    pub fn ticks(&self) -> u64 {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).ticks
    }

    fn is_live(&self, id: u64) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .loops
            .contains_key(&id)
    }
}

/// Owning token for one frame loop.
///
/// Holds only a weak reference to the scheduler: a handle outliving its
/// scheduler cancels as a no-op.
pub struct FrameHandle {
    id: u64,
    scheduler: Weak<Mutex<SchedulerInner>>,
    runs: Arc<AtomicU64>,
    cancelled: bool,
}

impl std::fmt::Debug for FrameHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameHandle")
            .field("id", &self.id)
            .field("runs", &self.runs())
            .field("cancelled", &self.cancelled)
            .finish()
    }
}

impl FrameHandle {
    /// Cancel the loop. Returns true only for the call that actually removed
    /// it; later calls (and the drop that follows) are no-ops.
    pub fn cancel(&mut self) -> bool {
        if self.cancelled {
            return false;
        }
        self.cancelled = true;

        let Some(inner) = self.scheduler.upgrade() else {
            return false;
        };
        let mut inner = inner.lock().unwrap_or_else(|e| e.into_inner());
        let removed = inner.loops.remove(&self.id).is_some();
        trace!("FrameScheduler: loop {} cancelled ({} active)", self.id, inner.loops.len());
        removed
    }

    pub fn is_active(&self) -> bool {
        !self.cancelled && self.scheduler.strong_count() > 0
    }

    /// How many times the callback has run
    pub fn runs(&self) -> u64 {
        self.runs.load(Ordering::Relaxed)
    }
}

impl Drop for FrameHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Wall-clock seconds since the Unix epoch.
pub fn wall_clock_seconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
