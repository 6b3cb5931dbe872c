//! Eased rendering of carousel movement
//!
//! The carousel state machine only reports where the strip should be and
//! whether the move is animated. This module turns those jumps into smooth
//! per-frame offsets for the terminal renderer.
//!
//! - `easing` maps progress in [0, 1] onto an acceleration curve
//! - `timing` computes progress and interpolation
//! - `slide` follows carousel frames and interpolates between them

pub mod easing;
pub mod slide;
pub mod timing;

pub use easing::{EasingType, EasingTypeExt};
pub use slide::SlideAnimator;
