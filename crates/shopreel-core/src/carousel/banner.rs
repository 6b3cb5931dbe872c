//! Whole-slide banner rotation
//!
//! Banners swap a full slide at a time, so a plain modular wrap from the last
//! slide back to the first is acceptable and no clone padding is needed.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::BannerConfig;
use crate::Result;

use super::seamless::CarouselState;
use super::timer::{QueueDriven, Scheduler, TimerHandle, TimerKind, TimerQueue, TimerSlot};

/// Timer-driven rotator over whole slides
#[derive(Debug)]
pub struct BannerRotator<T, S = TimerQueue> {
    config: BannerConfig,
    scheduler: S,
    items: Vec<T>,
    current: usize,
    state: CarouselState,
    timer: TimerSlot,
}

impl<T> BannerRotator<T, TimerQueue> {
    pub fn with_timer_queue(config: BannerConfig) -> Result<Self> {
        Self::new(config, TimerQueue::new())
    }
}

impl<T, S: Scheduler> BannerRotator<T, S> {
    pub fn new(config: BannerConfig, scheduler: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            scheduler,
            items: Vec::new(),
            current: 0,
            state: CarouselState::Static,
            timer: TimerSlot::default(),
        })
    }

    /// Load a new slide set, starting over at the first slide.
    ///
    /// A paused rotator stays paused; a single slide never rotates.
    pub fn set_items(&mut self, items: Vec<T>) {
        if self.state == CarouselState::TornDown {
            warn!("Ignoring banner update on a torn down rotator");
            return;
        }

        let was_paused = self.state == CarouselState::Paused;
        self.timer.disarm(&mut self.scheduler);
        self.items = items;
        self.current = 0;

        self.state = match (self.items.len() > 1, was_paused) {
            (false, _) => CarouselState::Static,
            (true, true) => CarouselState::Paused,
            (true, false) => {
                self.schedule_next();
                CarouselState::Running
            }
        };

        info!(slides = self.items.len(), state = ?self.state, "Banner slides loaded");
    }

    /// Show the following slide, wrapping to the first after the last
    pub fn next(&mut self) {
        if !self.is_rotating_state() {
            return;
        }
        self.current = (self.current + 1) % self.items.len();
        self.restart_interval();
        debug!(current = self.current, "Banner advanced");
    }

    /// Show the preceding slide, wrapping to the last before the first
    pub fn previous(&mut self) {
        if !self.is_rotating_state() {
            return;
        }
        let len = self.items.len();
        self.current = (self.current + len - 1) % len;
        self.restart_interval();
        debug!(current = self.current, "Banner went back");
    }

    /// Jump straight to a slide, clamped to the last one
    pub fn go_to(&mut self, index: usize) {
        if self.state == CarouselState::TornDown || self.items.is_empty() {
            return;
        }
        self.current = index.min(self.items.len() - 1);
        self.restart_interval();
        debug!(current = self.current, "Banner selected");
    }

    pub fn pause(&mut self) {
        if !self.is_rotating_state() {
            return;
        }
        self.timer.disarm(&mut self.scheduler);
        self.state = CarouselState::Paused;
    }

    pub fn resume(&mut self) {
        if self.state != CarouselState::Paused {
            return;
        }
        self.state = CarouselState::Running;
        self.schedule_next();
    }

    pub fn teardown(&mut self) {
        if self.state == CarouselState::TornDown {
            return;
        }
        self.timer.disarm(&mut self.scheduler);
        self.state = CarouselState::TornDown;
        info!("Banner rotator torn down");
    }

    pub fn on_timer(&mut self, handle: TimerHandle) -> bool {
        if self.state == CarouselState::TornDown {
            debug!(timer = handle.id(), "Ignoring banner timer after teardown");
            return false;
        }

        if self.timer.claim(handle) {
            self.next();
            true
        } else {
            warn!(timer = handle.id(), "Ignoring stale banner timer");
            false
        }
    }

    #[inline]
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_item(&self) -> Option<&T> {
        self.items.get(self.current)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[inline]
    pub fn state(&self) -> CarouselState {
        self.state
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Crossfade length for renderers
    pub fn transition(&self) -> Duration {
        self.config.transition()
    }

    pub fn pending_timers(&self) -> usize {
        usize::from(self.timer.is_armed())
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn is_rotating_state(&self) -> bool {
        matches!(self.state, CarouselState::Running | CarouselState::Paused)
    }

    fn restart_interval(&mut self) {
        if self.state == CarouselState::Running {
            self.schedule_next();
        }
    }

    fn schedule_next(&mut self) {
        let interval = self.config.interval();
        self.timer.arm(&mut self.scheduler, interval, TimerKind::Advance);
    }
}

impl<T> QueueDriven for BannerRotator<T, TimerQueue> {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn rotator(slides: usize) -> BannerRotator<usize> {
        let mut rotator = BannerRotator::with_timer_queue(BannerConfig {
            interval_ms: 1000,
            transition_ms: 300,
        })
        .unwrap();
        rotator.set_items((0..slides).collect());
        rotator
    }

    #[test]
    fn test_rotation_wraps() {
        let mut rotator = rotator(3);
        let mut seen = vec![rotator.current()];
        for _ in 0..4 {
            rotator.run_for(ms(1000));
            seen.push(rotator.current());
        }
        assert_eq!(seen, vec![0, 1, 2, 0, 1]);
        assert_eq!(rotator.scheduler().pending(), 1);
    }

    #[test]
    fn test_previous_wraps_to_last() {
        let mut rotator = rotator(3);
        rotator.previous();
        assert_eq!(rotator.current(), 2);
        assert_eq!(rotator.current_item(), Some(&2));
    }

    #[test]
    fn test_go_to_clamps_and_restarts_interval() {
        let mut rotator = rotator(4);
        rotator.run_for(ms(600));

        rotator.go_to(10);
        assert_eq!(rotator.current(), 3);

        rotator.run_for(ms(999));
        assert_eq!(rotator.current(), 3);
        rotator.run_for(ms(1));
        assert_eq!(rotator.current(), 0);
    }

    #[test]
    fn test_go_to_on_empty_is_noop() {
        let mut rotator = rotator(0);
        rotator.go_to(2);
        assert_eq!(rotator.current(), 0);
        assert!(rotator.current_item().is_none());
    }

    #[test]
    fn test_single_slide_is_static() {
        let mut rotator = rotator(1);
        assert_eq!(rotator.state(), CarouselState::Static);
        assert_eq!(rotator.scheduler().pending(), 0);

        rotator.next();
        rotator.resume();
        rotator.run_for(ms(5000));
        assert_eq!(rotator.current(), 0);
        assert_eq!(rotator.scheduler().pending(), 0);
    }

    #[test]
    fn test_pause_resume_single_timer() {
        let mut rotator = rotator(3);
        rotator.pause();
        rotator.pause();
        assert_eq!(rotator.scheduler().pending(), 0);

        rotator.run_for(ms(5000));
        assert_eq!(rotator.current(), 0);

        rotator.resume();
        rotator.resume();
        assert_eq!(rotator.scheduler().pending(), 1);
        assert_eq!(rotator.pending_timers(), 1);
    }

    #[test]
    fn test_manual_navigation_while_paused() {
        let mut rotator = rotator(3);
        rotator.pause();
        rotator.next();
        rotator.go_to(0);
        rotator.previous();
        assert_eq!(rotator.current(), 2);
        assert_eq!(rotator.scheduler().pending(), 0);
    }

    #[test]
    fn test_set_items_resets_and_keeps_pause() {
        let mut rotator = rotator(3);
        rotator.next();
        rotator.pause();

        rotator.set_items(vec![7, 8]);
        assert_eq!(rotator.current(), 0);
        assert_eq!(rotator.state(), CarouselState::Paused);
        assert_eq!(rotator.scheduler().pending(), 0);
    }

    #[test]
    fn test_teardown_ignores_late_timer() {
        let mut rotator = rotator(3);
        let (late, _) = {
            let queue = rotator.scheduler_mut();
            let deadline = queue.next_deadline().unwrap();
            queue.pop_due(deadline).unwrap()
        };

        rotator.teardown();
        assert!(!rotator.on_timer(late));
        assert_eq!(rotator.current(), 0);
        assert_eq!(rotator.state(), CarouselState::TornDown);
    }
}
