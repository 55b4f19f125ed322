//! Frame scheduling
//!
//! Scroll and resize events arrive in bursts. [`FrameGate`] collapses a burst
//! into a single pending frame; [`FrameScheduler`] is whatever delivers that
//! frame (`requestAnimationFrame` in a page, [`ManualScheduler`] in tests).

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

/// A deferred unit of work run on the next frame
pub type FrameTask = Box<dyn FnOnce()>;

/// Delivers a task on the next display frame
pub trait FrameScheduler {
    fn schedule(&self, task: FrameTask);
}

// =============================================================================
// FrameGate
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    Idle,
    Pending,
}

/// Idle/Pending coalescing gate
#[derive(Debug)]
pub struct FrameGate {
    state: Cell<FrameState>,
    requests: Cell<u64>,
    frames: Cell<u64>,
}

impl Default for FrameGate {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameGate {
    pub fn new() -> Self {
        Self {
            state: Cell::new(FrameState::Idle),
            requests: Cell::new(0),
            frames: Cell::new(0),
        }
    }

    /// Returns true if the caller must schedule a frame (Idle -> Pending).
    /// While already pending the request is absorbed.
    pub fn request(&self) -> bool {
        self.requests.set(self.requests.get() + 1);
        match self.state.get() {
            FrameState::Idle => {
                self.state.set(FrameState::Pending);
                true
            }
            FrameState::Pending => false,
        }
    }

    /// Frame delivered (Pending -> Idle)
    pub fn complete(&self) {
        self.state.set(FrameState::Idle);
        self.frames.set(self.frames.get() + 1);
    }

    pub fn state(&self) -> FrameState {
        self.state.get()
    }

    pub fn is_pending(&self) -> bool {
        self.state.get() == FrameState::Pending
    }

    /// Total requests seen, including absorbed ones
    pub fn request_count(&self) -> u64 {
        self.requests.get()
    }

    /// Frames delivered
    pub fn frame_count(&self) -> u64 {
        self.frames.get()
    }
}

// =============================================================================
// ManualScheduler
// =============================================================================

/// Queues tasks until [`ManualScheduler::flush`] is called.
///
/// Lets tests and non-browser hosts decide exactly when a "frame" happens.
#[derive(Default)]
pub struct ManualScheduler {
    queue: RefCell<VecDeque<FrameTask>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Run the tasks queued before this call. Tasks scheduled while flushing
    /// wait for the next flush, like a real frame boundary.
    pub fn flush(&self) -> usize {
        let tasks: Vec<FrameTask> = self.queue.borrow_mut().drain(..).collect();
        let count = tasks.len();
        for task in tasks {
            task();
        }
        count
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule(&self, task: FrameTask) {
        self.queue.borrow_mut().push_back(task);
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("pending", &self.pending())
            .finish()
    }
}
