//! Follows carousel frames and eases the strip between them

use std::time::{Duration, Instant};

use shopreel_core::carousel::Frame;

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp, progress};

#[derive(Debug, Clone)]
struct ActiveSlide {
    start: Instant,
    from: f64,
    to: f64,
}

/// Interpolates the strip offset between successive carousel frames.
///
/// Feed every new [`Frame`] to [`apply_frame`](Self::apply_frame), then call
/// [`update`](Self::update) once per rendered frame. Frames with
/// `is_animating == false` are boundary snaps and are applied instantly so
/// the jump between clone and real item is never visible. A frame whose
/// step began somewhere other than the current target carries a snap that
/// was applied in the same call, so the strip is placed there first.
#[derive(Debug, Clone)]
pub struct SlideAnimator {
    animation: Option<ActiveSlide>,
    current: f64,
    duration: Duration,
    easing: EasingType,
}

impl SlideAnimator {
    pub fn new(duration: Duration, easing: EasingType) -> Self {
        Self {
            animation: None,
            current: 0.0,
            duration,
            easing,
        }
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Offset as of the last [`update`](Self::update)
    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Offset the strip is heading for
    pub fn target(&self) -> f64 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current)
    }

    /// Place the strip without animating
    pub fn jump_to(&mut self, offset: f64) {
        self.animation = None;
        self.current = offset;
    }

    pub fn apply_frame(&mut self, frame: Frame, now: Instant) {
        let instant = !frame.is_animating
            || self.duration.is_zero()
            || self.easing == EasingType::None;

        if instant {
            self.jump_to(frame.offset_percent);
            return;
        }

        if let Some(origin) = frame.from_percent {
            if (origin - self.target()).abs() > 1e-9 {
                self.jump_to(origin);
            }
        }

        if (frame.offset_percent - self.target()).abs() < f64::EPSILON {
            return;
        }

        self.animation = Some(ActiveSlide {
            start: now,
            from: self.current,
            to: frame.offset_percent,
        });
    }

    /// Advance the animation to `now` and return the offset to draw
    pub fn update(&mut self, now: Instant) -> f64 {
        if let Some(ref slide) = self.animation {
            if is_complete(slide.start, self.duration, now) {
                self.current = slide.to;
                self.animation = None;
            } else {
                let t = self.easing.apply(progress(slide.start, self.duration, now));
                self.current = lerp(slide.from, slide.to, t);
            }
        }
        self.current
    }
}
