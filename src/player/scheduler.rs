// SPDX-License-Identifier: MPL-2.0
//! Repeating tick scheduler port.
//!
//! A controller only needs "call this every `interval` until cancelled". Two
//! implementations ship with the crate:
//!
//! - [`LocalScheduler`]: a Tokio interval on the current `LocalSet`
//! - [`ManualScheduler`]: ticks fire when the host calls [`ManualScheduler::fire`],
//!   for hosts that already own a frame loop (and for tests)

use std::cell::{Cell, RefCell};
use std::fmt;
use std::ops::ControlFlow;
use std::rc::Rc;
use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Callback run on every tick. Returning [`ControlFlow::Break`] ends the
/// registration.
pub type TickCallback = Box<dyn FnMut() -> ControlFlow<()>>;

/// Port for registering repeating ticks.
pub trait Scheduler {
    /// Calls `callback` every `interval`, first after one interval.
    fn schedule_repeating(&self, interval: Duration, callback: TickCallback) -> TickHandle;
}

// =============================================================================
// Tick Handle
// =============================================================================

/// Registration returned by [`Scheduler::schedule_repeating`].
///
/// Cancelling is idempotent, and dropping the handle cancels. Once
/// [`cancel`](Self::cancel) returns the callback will not run again.
#[must_use = "dropping a TickHandle cancels the registration"]
pub struct TickHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TickHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_none()
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickHandle")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

// =============================================================================
// Tokio Scheduler
// =============================================================================

/// Runs ticks as a local Tokio task.
///
/// Must be used from inside a [`tokio::task::LocalSet`]; the callback is not
/// required to be `Send`. A late tick is delayed rather than bursted, so a
/// busy thread slows playback down instead of skipping frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalScheduler;

impl Scheduler for LocalScheduler {
    fn schedule_repeating(&self, interval: Duration, mut callback: TickCallback) -> TickHandle {
        let task = tokio::task::spawn_local(async move {
            let mut ticker = time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if callback().is_break() {
                    break;
                }
            }
        });
        TickHandle::new(move || task.abort())
    }
}

// =============================================================================
// Manual Scheduler
// =============================================================================

struct Slot {
    id: u64,
    interval: Duration,
    /// `None` while the callback is running.
    callback: Option<TickCallback>,
    cancelled: Rc<Cell<bool>>,
}

/// Scheduler driven by explicit [`fire`](Self::fire) calls.
///
/// Clones share their registrations, so a host can keep one clone and hand
/// another to a controller.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    slots: Rc<RefCell<Vec<Slot>>>,
    next_id: Rc<Cell<u64>>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every live callback once, in registration order.
    ///
    /// Callbacks registered during the call wait for the next one. A callback
    /// may call `fire` again; it is not re-entered itself.
    ///
    /// Returns how many callbacks ran.
    pub fn fire(&self) -> usize {
        let ids: Vec<u64> = self.slots.borrow().iter().map(|slot| slot.id).collect();
        let mut fired = 0;

        for id in ids {
            // The callback is taken out so it may touch this scheduler.
            let taken = {
                let mut slots = self.slots.borrow_mut();
                slots
                    .iter_mut()
                    .find(|slot| slot.id == id && !slot.cancelled.get())
                    .and_then(|slot| slot.callback.take())
            };
            let Some(mut callback) = taken else {
                continue;
            };

            fired += 1;
            let flow = callback();

            let mut slots = self.slots.borrow_mut();
            if let Some(slot) = slots.iter_mut().find(|slot| slot.id == id) {
                if flow.is_continue() && !slot.cancelled.get() {
                    slot.callback = Some(callback);
                } else {
                    slot.cancelled.set(true);
                }
            }
        }

        self.slots.borrow_mut().retain(|slot| !slot.cancelled.get());
        fired
    }

    /// Calls [`fire`](Self::fire) `times` times; returns the total count.
    pub fn fire_n(&self, times: usize) -> usize {
        (0..times).map(|_| self.fire()).sum()
    }

    /// Number of registrations that have not been cancelled.
    #[must_use]
    pub fn active(&self) -> usize {
        self.slots
            .borrow()
            .iter()
            .filter(|slot| !slot.cancelled.get())
            .count()
    }

    /// Intervals of the live registrations.
    #[must_use]
    pub fn intervals(&self) -> Vec<Duration> {
        self.slots
            .borrow()
            .iter()
            .filter(|slot| !slot.cancelled.get())
            .map(|slot| slot.interval)
            .collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&self, interval: Duration, callback: TickCallback) -> TickHandle {
        let cancelled = Rc::new(Cell::new(false));
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.slots.borrow_mut().push(Slot {
            id,
            interval,
            callback: Some(callback),
            cancelled: Rc::clone(&cancelled),
        });
        TickHandle::new(move || cancelled.set(true))
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("active", &self.active())
            .finish()
    }
}
