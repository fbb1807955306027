//! Frame scheduler - the single per-frame entry point
//!
//! The host calls [`FrameScheduler::tick`] exactly once per rendered frame.
//! One tick does two things, in this order:
//!
//! 1. Drains the coroutines scheduled for "next frame". The pending set is
//!    swapped out before draining, so anything scheduled (or re-queued by a
//!    yielding coroutine) during the drain lands in the fresh set and runs on
//!    the following tick at the earliest.
//! 2. Runs a snapshot of the per-frame callback list. Callbacks may add or
//!    remove entries while the snapshot is iterated; additions first run on
//!    the next tick and removed entries are skipped for the rest of this one.
//!
//! Timers ([`FrameTimer`]) are per-frame callbacks that poll their own due
//! time.
//!
//! The scheduler is a cheap cloneable handle over shared state so callbacks
//! can capture it and reenter it. No borrow of that state is held while user
//! code runs.

mod timer;

pub use timer::{FrameTimer, TimerAction, TimerDelay};

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Identifies one entry in the per-frame callback list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackId(u64);

/// Information about the tick currently being run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    /// Zero-based tick counter
    pub index: u64,
    /// Host clock for this tick
    pub time: Duration,
}

/// Result of resuming a coroutine once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// More work remains; resume again on a later tick
    Yield,
    /// Finished; drop the coroutine
    Done,
}

/// A per-frame callback
pub type Callback<C> = Box<dyn FnMut(&mut C, &FrameInfo)>;

/// A cooperative generator resumed at most once per tick
pub type Coroutine<C> = Box<dyn FnMut(&mut C, &FrameInfo) -> Step>;

struct CallbackEntry<C> {
    id: CallbackId,
    alive: Cell<bool>,
    callback: RefCell<Callback<C>>,
}

struct SchedulerState<C> {
    callbacks: Vec<Rc<CallbackEntry<C>>>,
    next_frame: Vec<Coroutine<C>>,
    next_callback_id: u64,
    last_frame: Option<FrameInfo>,
    ticking: bool,
}

/// Cooperative per-frame scheduler, generic over the context handed to callbacks
pub struct FrameScheduler<C> {
    inner: Rc<RefCell<SchedulerState<C>>>,
}

impl<C> Clone for FrameScheduler<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<C> fmt::Debug for FrameScheduler<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("FrameScheduler")
            .field("callbacks", &state.callbacks.len())
            .field("pending_coroutines", &state.next_frame.len())
            .field("last_frame", &state.last_frame)
            .finish()
    }
}

impl<C: 'static> Default for FrameScheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: 'static> FrameScheduler<C> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SchedulerState {
                callbacks: Vec::new(),
                next_frame: Vec::new(),
                next_callback_id: 0,
                last_frame: None,
                ticking: false,
            })),
        }
    }

    /// Run one frame: drain coroutines, then the per-frame callbacks.
    ///
    /// A nested call from inside a callback is ignored.
    pub fn tick(&self, time: Duration, ctx: &mut C) {
        let frame = {
            let mut state = self.inner.borrow_mut();
            if state.ticking {
                tracing::warn!("Nested FrameScheduler::tick ignored");
                return;
            }
            state.ticking = true;
            let index = state.last_frame.map_or(0, |f| f.index + 1);
            let frame = FrameInfo { index, time };
            state.last_frame = Some(frame);
            frame
        };

        let draining = std::mem::take(&mut self.inner.borrow_mut().next_frame);
        for mut coroutine in draining {
            if coroutine(ctx, &frame) == Step::Yield {
                self.inner.borrow_mut().next_frame.push(coroutine);
            }
        }

        let snapshot: Vec<Rc<CallbackEntry<C>>> = self.inner.borrow().callbacks.clone();
        for entry in snapshot {
            if !entry.alive.get() {
                continue;
            }
            // Already borrowed means the callback is on the stack; never reenter it
            if let Ok(mut callback) = entry.callback.try_borrow_mut() {
                (*callback)(ctx, &frame);
            }
        }

        self.inner.borrow_mut().ticking = false;
    }

    /// Append a per-frame callback
    pub fn add(&self, callback: impl FnMut(&mut C, &FrameInfo) + 'static) -> CallbackId {
        let mut state = self.inner.borrow_mut();
        let id = CallbackId(state.next_callback_id);
        state.next_callback_id += 1;
        state.callbacks.push(Rc::new(CallbackEntry {
            id,
            alive: Cell::new(true),
            callback: RefCell::new(Box::new(callback)),
        }));
        id
    }

    /// Remove a per-frame callback. Returns false if it was not registered.
    pub fn remove(&self, id: CallbackId) -> bool {
        let mut state = self.inner.borrow_mut();
        let Some(index) = state.callbacks.iter().position(|entry| entry.id == id) else {
            return false;
        };
        let entry = state.callbacks.remove(index);
        entry.alive.set(false);
        true
    }

    pub fn contains(&self, id: CallbackId) -> bool {
        self.inner
            .borrow()
            .callbacks
            .iter()
            .any(|entry| entry.id == id)
    }

    /// Enqueue a coroutine for the next tick
    pub fn schedule(&self, coroutine: impl FnMut(&mut C, &FrameInfo) -> Step + 'static) {
        self.inner.borrow_mut().next_frame.push(Box::new(coroutine));
    }

    /// Run `task` once on the next tick
    pub fn defer(&self, task: impl FnOnce(&mut C) + 'static) {
        let mut task = Some(task);
        self.schedule(move |ctx, _| {
            if let Some(task) = task.take() {
                task(ctx);
            }
            Step::Done
        });
    }

    /// Number of coroutines waiting for the next tick
    pub fn pending_coroutines(&self) -> usize {
        self.inner.borrow().next_frame.len()
    }

    pub fn callback_count(&self) -> usize {
        self.inner.borrow().callbacks.len()
    }

    /// Host time of the most recent tick, if any tick has run
    pub fn now(&self) -> Option<Duration> {
        self.inner.borrow().last_frame.map(|f| f.time)
    }

    /// Index of the most recent tick, if any tick has run
    pub fn frame_index(&self) -> Option<u64> {
        self.inner.borrow().last_frame.map(|f| f.index)
    }

    pub(crate) fn downgrade(&self) -> WeakScheduler<C> {
        WeakScheduler {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

/// Non-owning scheduler reference held by timers and their callbacks
pub(crate) struct WeakScheduler<C> {
    inner: Weak<RefCell<SchedulerState<C>>>,
}

impl<C> Clone for WeakScheduler<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<C> WeakScheduler<C> {
    pub(crate) fn upgrade(&self) -> Option<FrameScheduler<C>> {
        self.inner.upgrade().map(|inner| FrameScheduler { inner })
    }
}
