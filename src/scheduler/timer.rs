//! Polling timers driven by the frame scheduler
//!
//! A timer is a per-frame callback that checks whether its due time has
//! passed. The delay is a minimum, not a guarantee: the action fires on the
//! first tick that observes the timer past due.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use super::{CallbackId, FrameInfo, FrameScheduler, WeakScheduler};

/// Work done when a timer fires. An `Err` stops the timer for good.
pub type TimerAction<C> = Box<dyn FnMut(&mut C) -> anyhow::Result<()>>;

/// How long to wait between firings
pub enum TimerDelay {
    Fixed(Duration),
    /// Regenerated after every firing (jittered or variable intervals)
    Generated(Box<dyn FnMut() -> Duration>),
}

impl TimerDelay {
    pub fn generated(generator: impl FnMut() -> Duration + 'static) -> Self {
        TimerDelay::Generated(Box::new(generator))
    }

    fn next(&mut self) -> Duration {
        match self {
            TimerDelay::Fixed(delay) => *delay,
            TimerDelay::Generated(generator) => generator(),
        }
    }
}

impl fmt::Debug for TimerDelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerDelay::Fixed(delay) => f.debug_tuple("Fixed").field(delay).finish(),
            TimerDelay::Generated(_) => f.write_str("Generated(..)"),
        }
    }
}

impl From<Duration> for TimerDelay {
    fn from(delay: Duration) -> Self {
        TimerDelay::Fixed(delay)
    }
}

struct TimerState<C> {
    name: String,
    /// `None` while the action is executing
    action: Option<TimerAction<C>>,
    delay: TimerDelay,
    current_delay: Duration,
    run_once: bool,
    callback: Option<CallbackId>,
    next_due: Option<Duration>,
    last_execution: Option<Duration>,
    executions: u64,
    last_error: Option<String>,
}

/// Handle to a one-shot or repeating timer.
///
/// Cloning the handle shares the same timer. A started timer keeps running
/// after every handle is dropped; it only stops through [`FrameTimer::stop`],
/// after a run-once firing, or after its action fails.
pub struct FrameTimer<C> {
    state: Rc<RefCell<TimerState<C>>>,
    scheduler: WeakScheduler<C>,
}

impl<C> Clone for FrameTimer<C> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
            scheduler: self.scheduler.clone(),
        }
    }
}

impl<C> fmt::Debug for FrameTimer<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("FrameTimer")
            .field("name", &state.name)
            .field("delay", &state.delay)
            .field("run_once", &state.run_once)
            .field("running", &state.callback.is_some())
            .field("executions", &state.executions)
            .finish()
    }
}

impl<C: 'static> FrameTimer<C> {
    /// Create a stopped timer bound to `scheduler`
    pub fn new(
        scheduler: &FrameScheduler<C>,
        name: impl Into<String>,
        delay: impl Into<TimerDelay>,
        run_once: bool,
        action: impl FnMut(&mut C) -> anyhow::Result<()> + 'static,
    ) -> Self {
        let mut delay = delay.into();
        let current_delay = delay.next();
        Self {
            state: Rc::new(RefCell::new(TimerState {
                name: name.into(),
                action: Some(Box::new(action)),
                delay,
                current_delay,
                run_once,
                callback: None,
                next_due: None,
                last_execution: None,
                executions: 0,
                last_error: None,
            })),
            scheduler: scheduler.downgrade(),
        }
    }

    /// Register with the scheduler. No-op if already running.
    ///
    /// The first due time is measured from the most recent tick, or from the
    /// first tick observed after this call when no tick has run yet.
    pub fn start(&self) {
        let Some(scheduler) = self.scheduler.upgrade() else {
            tracing::warn!("Timer '{}' started after its scheduler was dropped", self.name());
            return;
        };

        let mut state = self.state.borrow_mut();
        if state.callback.is_some() {
            return;
        }
        let delay = state.current_delay;
        state.next_due = scheduler.now().map(|now| due_after(now, delay));

        let timer = Rc::clone(&self.state);
        let weak = self.scheduler.clone();
        let id = scheduler.add(move |ctx, frame| poll(&timer, &weak, ctx, frame));
        state.callback = Some(id);
        tracing::debug!(timer = %state.name, delay = ?state.current_delay, "Timer started");
    }

    /// Unregister from the scheduler. No-op if already stopped.
    pub fn stop(&self) {
        let mut state = self.state.borrow_mut();
        stop_locked(&mut state, &self.scheduler);
    }

    /// Stop, regenerate the delay and start again
    pub fn restart(&self) {
        {
            let mut state = self.state.borrow_mut();
            stop_locked(&mut state, &self.scheduler);
            state.current_delay = state.delay.next();
        }
        self.start();
    }

    pub fn name(&self) -> String {
        self.state.borrow().name.clone()
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().callback.is_some()
    }

    /// True while the action is on the stack
    pub fn is_executing(&self) -> bool {
        self.state.borrow().action.is_none()
    }

    pub fn is_run_once(&self) -> bool {
        self.state.borrow().run_once
    }

    pub fn execution_count(&self) -> u64 {
        self.state.borrow().executions
    }

    /// Host time of the most recent firing
    pub fn last_execution(&self) -> Option<Duration> {
        self.state.borrow().last_execution
    }

    /// Host time of the next firing, once anchored to a tick.
    /// `Duration::MAX` means the timer will never fire.
    pub fn next_due(&self) -> Option<Duration> {
        self.state.borrow().next_due
    }

    /// Message of the error that stopped this timer, if any
    pub fn last_error(&self) -> Option<String> {
        self.state.borrow().last_error.clone()
    }
}

/// Due time `delay` after `now`. A sum past the clock's range means never.
fn due_after(now: Duration, delay: Duration) -> Duration {
    now.checked_add(delay).unwrap_or(Duration::MAX)
}

fn stop_locked<C: 'static>(state: &mut TimerState<C>, scheduler: &WeakScheduler<C>) {
    let Some(id) = state.callback.take() else {
        return;
    };
    if let Some(scheduler) = scheduler.upgrade() {
        scheduler.remove(id);
    }
    state.next_due = None;
    tracing::debug!(timer = %state.name, "Timer stopped");
}

fn poll<C: 'static>(
    timer: &Rc<RefCell<TimerState<C>>>,
    scheduler: &WeakScheduler<C>,
    ctx: &mut C,
    frame: &FrameInfo,
) {
    let (mut action, armed) = {
        let mut state = timer.borrow_mut();
        let delay = state.current_delay;
        let due = *state.next_due.get_or_insert_with(|| due_after(frame.time, delay));
        if due == Duration::MAX || frame.time < due {
            return;
        }
        match state.action.take() {
            Some(action) => (action, state.callback),
            None => return,
        }
    };

    let result = action(ctx);

    let mut state = timer.borrow_mut();
    state.action = Some(action);
    state.last_execution = Some(frame.time);
    state.executions += 1;

    match result {
        Ok(()) if state.run_once => stop_locked(&mut state, scheduler),
        Ok(()) => {
            // Stopped or restarted from inside its own action: keep that
            if state.callback.is_some() && state.callback == armed {
                state.current_delay = state.delay.next();
                state.next_due = Some(due_after(frame.time, state.current_delay));
            }
        }
        Err(err) => {
            tracing::error!(timer = %state.name, "Timer action failed, stopping timer: {:#}", err);
            state.last_error = Some(format!("{:#}", err));
            state.run_once = true;
            stop_locked(&mut state, scheduler);
        }
    }
}
