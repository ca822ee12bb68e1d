use std::fmt;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};

/// Identifier of a repeating timer registration.
///
/// Ids are cheap to copy and are what the event loop hands back when a
/// registration comes due. Ownership of the registration itself lives in the
/// matching [`TimerHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Owned token for an active registration.
///
/// Not `Clone`: the only way to release a registration is to pass the handle
/// to [`Scheduler::cancel`], which consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct TimerHandle {
    id: TimerId,
}

impl TimerHandle {
    /// Mint a handle for a scheduler-assigned id.
    pub fn new(id: u64) -> Self {
        Self { id: TimerId(id) }
    }

    pub fn id(&self) -> TimerId {
        self.id
    }
}

/// Minimal timer-registration facility of a host event loop.
pub trait Scheduler {
    /// Register a callback slot that fires every `period`.
    fn register(&mut self, period: Duration) -> Result<TimerHandle>;

    /// Remove a registration. Unknown handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

struct Registration {
    id: TimerId,
    period: Duration,
    next_due: Instant,
}

/// A polled scheduler driven by the application loop.
///
/// The loop calls [`due`](IntervalScheduler::due) once per iteration and
/// dispatches a tick for every returned id. A registration that fell behind by
/// several periods fires once and then realigns past `now`.
pub struct IntervalScheduler {
    registrations: Vec<Registration>,
    next_id: u64,
    clock: Box<dyn Fn() -> Instant>,
}

impl Default for IntervalScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl IntervalScheduler {
    /// Create a scheduler that timestamps registrations with `Instant::now`.
    pub fn new() -> Self {
        Self::with_clock(Instant::now)
    }

    /// Create a scheduler with an injected monotonic clock.
    pub fn with_clock(clock: impl Fn() -> Instant + 'static) -> Self {
        Self {
            registrations: Vec::new(),
            next_id: 1,
            clock: Box::new(clock),
        }
    }

    /// Return ids whose deadline is at or before `now`, in registration order.
    pub fn due(&mut self, now: Instant) -> Vec<TimerId> {
        let mut fired = Vec::new();
        for reg in &mut self.registrations {
            if reg.next_due > now {
                continue;
            }
            fired.push(reg.id);
            while reg.next_due <= now {
                reg.next_due += reg.period;
            }
        }
        fired
    }

    /// Earliest pending deadline, if anything is registered.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.registrations.iter().map(|r| r.next_due).min()
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl Scheduler for IntervalScheduler {
    fn register(&mut self, period: Duration) -> Result<TimerHandle> {
        if period.is_zero() {
            bail!("timer period must be greater than zero");
        }
        let handle = TimerHandle::new(self.next_id);
        self.next_id += 1;
        self.registrations.push(Registration {
            id: handle.id(),
            period,
            next_due: (self.clock)() + period,
        });
        tracing::debug!(timer = %handle.id(), period_ms = period.as_millis() as u64, "timer registered");
        Ok(handle)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        let id = handle.id();
        let before = self.registrations.len();
        self.registrations.retain(|r| r.id != id);
        if self.registrations.len() < before {
            tracing::debug!(timer = %id, "timer cancelled");
        }
    }
}
