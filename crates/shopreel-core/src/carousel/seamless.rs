//! Seamless looping carousel
//!
//! Slides a window of `visible_count` items over a list that behaves as if it
//! were circular. The list is padded with clones at both ends; when the
//! cursor lands on a clone region the carousel waits for the slide
//! transition to finish and then jumps by exactly `len` positions with
//! animation switched off, which shows the very same items.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::CarouselConfig;
use crate::Result;

use super::timer::{QueueDriven, Scheduler, TimerHandle, TimerKind, TimerQueue, TimerSlot};
use super::window::{clamp_index, extend_circular, loops, offset_percent, snap_target};

/// Lifecycle of a carousel instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CarouselState {
    /// Nothing to scroll into (empty, or no more items than visible slots)
    Static,
    /// An advance is scheduled
    Running,
    /// Looping applies but no advance is scheduled
    Paused,
    /// Unmounted; every call is ignored
    TornDown,
}

/// What the renderer reads after each state change
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    /// Negative horizontal translation to apply to the item strip, in percent of the viewport
    pub offset_percent: f64,
    /// Whether the translation should be transitioned or applied instantly
    pub is_animating: bool,
    /// Where the last manual or timed step started. Differs from the previous
    /// frame when a pending boundary snap was applied just before stepping,
    /// in which case the renderer has to jump here before animating.
    pub from_percent: Option<f64>,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            offset_percent: 0.0,
            is_animating: true,
            from_percent: None,
        }
    }
}

/// Timer-driven seamless carousel over items of type `T`
#[derive(Debug)]
pub struct SeamlessCarousel<T, S = TimerQueue> {
    config: CarouselConfig,
    scheduler: S,
    items: Vec<T>,
    extended: Vec<T>,
    index: usize,
    is_animating: bool,
    /// Cursor position the current step started from
    step_origin: Option<usize>,
    state: CarouselState,
    advance_timer: TimerSlot,
    snap_timer: TimerSlot,
    /// Cursor position the scheduled boundary snap will jump to
    pending_snap: Option<usize>,
}

impl<T: Clone> SeamlessCarousel<T, TimerQueue> {
    /// Create a carousel backed by its own [`TimerQueue`]
    pub fn with_timer_queue(config: CarouselConfig) -> Result<Self> {
        Self::new(config, TimerQueue::new())
    }
}

impl<T: Clone, S: Scheduler> SeamlessCarousel<T, S> {
    /// Create an empty carousel. Items usually arrive later through [`initialize`](Self::initialize).
    pub fn new(config: CarouselConfig, scheduler: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            scheduler,
            items: Vec::new(),
            extended: Vec::new(),
            index: 0,
            is_animating: true,
            step_origin: None,
            state: CarouselState::Static,
            advance_timer: TimerSlot::default(),
            snap_timer: TimerSlot::default(),
            pending_snap: None,
        })
    }

    /// Mount the carousel on a fresh item list.
    ///
    /// Any pending callback is cancelled first. The cursor starts at the first
    /// real item and, if the list loops, the first advance is scheduled.
    pub fn initialize(&mut self, items: Vec<T>) {
        if self.state == CarouselState::TornDown {
            warn!("Ignoring initialize on a torn down carousel");
            return;
        }

        self.cancel_timers();
        self.rebuild(items);
        self.index = if self.loops() { self.visible_count() } else { 0 };

        if self.loops() {
            self.state = CarouselState::Running;
            self.schedule_advance();
        } else {
            self.state = CarouselState::Static;
        }

        info!(
            items = self.items.len(),
            visible = self.visible_count(),
            state = ?self.state,
            "Carousel initialized"
        );
    }

    /// Swap in a refetched item list without restarting from scratch.
    ///
    /// In-flight timers are discarded, the cursor is clamped into the new
    /// list's real region, and a paused carousel stays paused.
    pub fn replace_items(&mut self, items: Vec<T>) {
        if self.state == CarouselState::TornDown {
            warn!("Ignoring item replacement on a torn down carousel");
            return;
        }

        let was_paused = self.state == CarouselState::Paused;
        let shown = self.index;
        let previous = self.pending_snap.unwrap_or(self.index);

        self.cancel_timers();
        self.rebuild(items);
        self.index = clamp_index(previous, self.items.len(), self.visible_count());
        // A cursor that had to move is placed, not slid
        self.is_animating = self.index == shown;

        self.state = match (self.loops(), was_paused) {
            (false, _) => CarouselState::Static,
            (true, true) => CarouselState::Paused,
            (true, false) => {
                self.schedule_advance();
                CarouselState::Running
            }
        };

        debug!(
            items = self.items.len(),
            index = self.index,
            state = ?self.state,
            "Carousel items replaced"
        );
    }

    /// Step forward by one item. Invoked by the advance timer, or manually.
    ///
    /// A boundary snap still waiting to land is applied first so the cursor
    /// never runs past the head clone region.
    pub fn advance(&mut self) {
        if !self.is_looping_state() {
            return;
        }

        self.flush_snap();
        self.is_animating = true;
        self.step_origin = Some(self.index);
        self.index += 1;

        if self.state == CarouselState::Running {
            self.schedule_advance();
        }

        debug!(index = self.index, "Carousel advanced");
        self.reconcile_boundary();
    }

    /// Step back by one item. Only this path reaches the lower boundary.
    pub fn retreat(&mut self) {
        if !self.is_looping_state() {
            return;
        }

        self.flush_snap();
        self.is_animating = true;
        self.step_origin = Some(self.index);
        self.index = self.index.saturating_sub(1);

        if self.state == CarouselState::Running {
            self.schedule_advance();
        }

        debug!(index = self.index, "Carousel retreated");
        self.reconcile_boundary();
    }

    /// Schedule the jump out of a clone region once the transition has had time to finish
    pub fn reconcile_boundary(&mut self) {
        if !self.is_looping_state() {
            return;
        }

        match snap_target(self.index, self.items.len(), self.visible_count()) {
            Some(target) if self.pending_snap == Some(target) => {}
            Some(target) => {
                self.pending_snap = Some(target);
                let transition = self.config.transition();
                self.snap_timer
                    .arm(&mut self.scheduler, transition, TimerKind::BoundarySnap);
                debug!(from = self.index, to = target, "Boundary snap scheduled");
            }
            None => {
                self.snap_timer.disarm(&mut self.scheduler);
                self.pending_snap = None;
            }
        }
    }

    /// Stop advancing. Idempotent; leaves no timer behind.
    pub fn pause(&mut self) {
        if !self.is_looping_state() {
            return;
        }

        self.advance_timer.disarm(&mut self.scheduler);
        self.flush_snap();
        if self.state != CarouselState::Paused {
            debug!(index = self.index, "Carousel paused");
        }
        self.state = CarouselState::Paused;
    }

    /// Start advancing again. A no-op unless paused.
    pub fn resume(&mut self) {
        if self.state != CarouselState::Paused {
            return;
        }

        self.state = CarouselState::Running;
        self.schedule_advance();
        debug!(index = self.index, "Carousel resumed");
    }

    /// Unmount: cancel everything and ignore all later calls and callbacks
    pub fn teardown(&mut self) {
        if self.state == CarouselState::TornDown {
            return;
        }
        self.cancel_timers();
        self.state = CarouselState::TornDown;
        info!("Carousel torn down");
    }

    /// Entry point for fired timers. Stale, foreign, or post-teardown handles are ignored.
    pub fn on_timer(&mut self, handle: TimerHandle) -> bool {
        if self.state == CarouselState::TornDown {
            debug!(timer = handle.id(), "Ignoring timer after teardown");
            return false;
        }

        if self.advance_timer.claim(handle) {
            self.advance();
            true
        } else if self.snap_timer.claim(handle) {
            self.finish_snap();
            true
        } else {
            warn!(timer = handle.id(), "Ignoring stale carousel timer");
            false
        }
    }

    #[inline]
    pub fn offset_percent(&self) -> f64 {
        offset_percent(self.index, self.visible_count())
    }

    /// Snapshot for the renderer
    pub fn frame(&self) -> Frame {
        Frame {
            offset_percent: self.offset_percent(),
            is_animating: self.is_animating,
            from_percent: self
                .step_origin
                .map(|origin| offset_percent(origin, self.visible_count())),
        }
    }

    /// Items currently inside the window
    pub fn visible_items(&self) -> &[T] {
        let end = (self.index + self.visible_count()).min(self.extended.len());
        let start = self.index.min(end);
        &self.extended[start..end]
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn extended_items(&self) -> &[T] {
        &self.extended
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    #[inline]
    pub fn state(&self) -> CarouselState {
        self.state
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn visible_count(&self) -> usize {
        self.config.visible_count
    }

    #[inline]
    pub fn loops(&self) -> bool {
        loops(self.items.len(), self.visible_count())
    }

    pub fn transition(&self) -> Duration {
        self.config.transition()
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Number of callbacks this carousel is waiting on (advance plus boundary snap)
    pub fn pending_timers(&self) -> usize {
        usize::from(self.advance_timer.is_armed()) + usize::from(self.snap_timer.is_armed())
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn is_looping_state(&self) -> bool {
        matches!(self.state, CarouselState::Running | CarouselState::Paused)
    }

    fn rebuild(&mut self, items: Vec<T>) {
        self.extended = extend_circular(&items, self.visible_count());
        self.items = items;
        self.is_animating = true;
        self.step_origin = None;
    }

    fn schedule_advance(&mut self) {
        let interval = self.config.interval();
        self.advance_timer
            .arm(&mut self.scheduler, interval, TimerKind::Advance);
    }

    fn finish_snap(&mut self) {
        if let Some(target) = self.pending_snap.take() {
            debug!(from = self.index, to = target, "Boundary snap");
            self.is_animating = false;
            self.step_origin = None;
            self.index = target;
        }
    }

    fn flush_snap(&mut self) {
        if self.pending_snap.is_some() {
            self.snap_timer.disarm(&mut self.scheduler);
            self.finish_snap();
        }
    }

    fn cancel_timers(&mut self) {
        self.advance_timer.disarm(&mut self.scheduler);
        self.snap_timer.disarm(&mut self.scheduler);
        self.pending_snap = None;
    }
}

impl<T: Clone> QueueDriven for SeamlessCarousel<T, TimerQueue> {
    fn queue(&self) -> &TimerQueue {
        &self.scheduler
    }

    fn queue_mut(&mut self) -> &mut TimerQueue {
        &mut self.scheduler
    }

    fn dispatch(&mut self, handle: TimerHandle) -> bool {
        self.on_timer(handle)
    }
}
