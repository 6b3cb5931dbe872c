//! Timer seam between carousels and the host event loop
//!
//! Carousels never sleep. They ask a [`Scheduler`] for a callback and keep
//! the returned [`TimerHandle`]; the host later hands fired handles back
//! through `on_timer`. [`TimerQueue`] is a deterministic scheduler on a
//! virtual monotonic clock, pumped by tick loops, async drivers and tests.

use std::time::Duration;

/// Opaque identity of a scheduled callback. Never reused within a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// What a scheduled callback is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Move the carousel forward by one step
    Advance,
    /// Finish a transition that ended on a cloned boundary
    BoundarySnap,
}

/// Host-provided timer facility
pub trait Scheduler {
    /// Schedule a callback `delay` from now
    fn schedule(&mut self, delay: Duration, kind: TimerKind) -> TimerHandle;

    /// Cancel a pending callback. Returns false if it already fired or was cancelled.
    fn cancel(&mut self, handle: TimerHandle) -> bool;

    /// Number of callbacks still pending
    fn pending(&self) -> usize;
}

#[derive(Debug, Clone)]
struct PendingTimer {
    handle: TimerHandle,
    deadline: Duration,
    kind: TimerKind,
}

/// Deterministic timer queue on a virtual clock measured from zero
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    timers: Vec<PendingTimer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    #[inline]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.iter().map(|t| t.deadline).min()
    }

    /// Pop the earliest timer due at or before `limit`, moving the clock to its deadline.
    ///
    /// Timers sharing a deadline come out in scheduling order.
    pub fn pop_due(&mut self, limit: Duration) -> Option<(TimerHandle, TimerKind)> {
        let pos = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= limit)
            .min_by_key(|(_, t)| (t.deadline, t.handle))
            .map(|(pos, _)| pos)?;

        let timer = self.timers.swap_remove(pos);
        self.now = self.now.max(timer.deadline);
        Some((timer.handle, timer.kind))
    }

    /// Move the clock forward without firing anything. The clock never goes back.
    pub fn advance_to(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, delay: Duration, kind: TimerKind) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.push(PendingTimer {
            handle,
            deadline: self.now + delay,
            kind,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.timers.iter().position(|t| t.handle == handle) {
            Some(pos) => {
                self.timers.swap_remove(pos);
                true
            }
            None => false,
        }
    }

    fn pending(&self) -> usize {
        self.timers.len()
    }
}

/// A single owned timer. Arming replaces whatever was pending.
#[derive(Debug, Default)]
pub(crate) struct TimerSlot {
    handle: Option<TimerHandle>,
}

impl TimerSlot {
    pub(crate) fn arm<S: Scheduler>(&mut self, scheduler: &mut S, delay: Duration, kind: TimerKind) {
        self.disarm(scheduler);
        self.handle = Some(scheduler.schedule(delay, kind));
    }

    pub(crate) fn disarm<S: Scheduler>(&mut self, scheduler: &mut S) -> bool {
        match self.handle.take() {
            Some(handle) => scheduler.cancel(handle),
            None => false,
        }
    }

    #[inline]
    pub(crate) fn is_armed(&self) -> bool {
        self.handle.is_some()
    }

    /// Take ownership of a fired handle if it is the one this slot is waiting for
    pub(crate) fn claim(&mut self, handle: TimerHandle) -> bool {
        if self.handle == Some(handle) {
            self.handle = None;
            true
        } else {
            false
        }
    }
}

/// Anything whose timers live in a [`TimerQueue`] and can be pumped by a host loop
pub trait QueueDriven {
    fn queue(&self) -> &TimerQueue;

    fn queue_mut(&mut self) -> &mut TimerQueue;

    /// Dispatch a fired handle. Returns false for stale or unknown handles.
    fn dispatch(&mut self, handle: TimerHandle) -> bool;

    /// Fire the next timer due at or before `limit`, returning the virtual time it fired at
    fn fire_next(&mut self, limit: Duration) -> Option<Duration> {
        let (handle, _) = self.queue_mut().pop_due(limit)?;
        let fired_at = self.queue().now();
        self.dispatch(handle);
        Some(fired_at)
    }

    /// Fire everything due up to `limit` (including timers scheduled along the way)
    fn run_until(&mut self, limit: Duration) -> usize {
        let mut fired = 0;
        while self.fire_next(limit).is_some() {
            fired += 1;
        }
        self.queue_mut().advance_to(limit);
        fired
    }

    /// Let `elapsed` pass on the virtual clock
    fn run_for(&mut self, elapsed: Duration) -> usize {
        let limit = self.queue().now() + elapsed;
        self.run_until(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_pop_due_in_deadline_order() {
        let mut queue = TimerQueue::new();
        let late = queue.schedule(ms(300), TimerKind::Advance);
        let early = queue.schedule(ms(100), TimerKind::BoundarySnap);

        assert_eq!(queue.next_deadline(), Some(ms(100)));
        assert_eq!(queue.pop_due(ms(50)), None);
        assert_eq!(queue.pop_due(ms(1000)), Some((early, TimerKind::BoundarySnap)));
        assert_eq!(queue.now(), ms(100));
        assert_eq!(queue.pop_due(ms(1000)), Some((late, TimerKind::Advance)));
        assert_eq!(queue.now(), ms(300));
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_equal_deadlines_fire_in_schedule_order() {
        let mut queue = TimerQueue::new();
        let first = queue.schedule(ms(10), TimerKind::Advance);
        let second = queue.schedule(ms(10), TimerKind::Advance);

        assert_eq!(queue.pop_due(ms(10)).map(|(h, _)| h), Some(first));
        assert_eq!(queue.pop_due(ms(10)).map(|(h, _)| h), Some(second));
    }

    #[test]
    fn test_cancel_and_handles_not_reused() {
        let mut queue = TimerQueue::new();
        let a = queue.schedule(ms(10), TimerKind::Advance);
        assert!(queue.cancel(a));
        assert!(!queue.cancel(a));

        let b = queue.schedule(ms(10), TimerKind::Advance);
        assert_ne!(a, b);
        assert_eq!(queue.pending(), 1);
        assert!(!queue.cancel(a));
        assert_eq!(queue.pop_due(ms(10)), Some((b, TimerKind::Advance)));
    }

    #[test]
    fn test_clock_is_monotonic() {
        let mut queue = TimerQueue::new();
        queue.advance_to(ms(500));
        queue.advance_to(ms(100));
        assert_eq!(queue.now(), ms(500));

        queue.schedule(ms(10), TimerKind::Advance);
        assert_eq!(queue.next_deadline(), Some(ms(510)));
    }

    #[test]
    fn test_slot_keeps_single_timer() {
        let mut queue = TimerQueue::new();
        let mut slot = TimerSlot::default();

        slot.arm(&mut queue, ms(100), TimerKind::Advance);
        slot.arm(&mut queue, ms(200), TimerKind::Advance);
        assert_eq!(queue.pending(), 1);
        assert_eq!(queue.next_deadline(), Some(ms(200)));

        assert!(slot.disarm(&mut queue));
        assert!(!slot.disarm(&mut queue));
        assert_eq!(queue.pending(), 0);
        assert!(!slot.is_armed());
    }

    #[test]
    fn test_slot_claim_rejects_foreign_handle() {
        let mut queue = TimerQueue::new();
        let mut slot = TimerSlot::default();
        let foreign = queue.schedule(ms(5), TimerKind::Advance);

        slot.arm(&mut queue, ms(100), TimerKind::Advance);
        assert!(!slot.claim(foreign));
        assert!(slot.is_armed());
    }
}
