//! Looping carousels for storefront surfaces
//!
//! # Layers
//!
//! - `window` - pure index arithmetic (clone padding, offsets, clamping)
//! - `timer` - the scheduler seam and the deterministic [`TimerQueue`]
//! - `seamless` / `banner` - the two state machines
//! - `driver` - tokio host for a seamless carousel
//!
//! # Usage
//!
//! ```ignore
//! use shopreel_core::carousel::{QueueDriven, SeamlessCarousel};
//!
//! let mut ticker = SeamlessCarousel::with_timer_queue(config.carousel.clone())?;
//! ticker.initialize(catalog.latest_items(12));
//!
//! // In the host loop, let time pass and hand the frame to the renderer
//! ticker.run_for(elapsed);
//! let frame = ticker.frame();
//! ```

pub mod window;
pub mod timer;

pub mod seamless;
pub mod banner;
pub mod driver;

pub use banner::BannerRotator;
pub use driver::{CarouselCommand, CarouselDriver};
pub use seamless::{CarouselState, Frame, SeamlessCarousel};
pub use timer::{QueueDriven, Scheduler, TimerHandle, TimerKind, TimerQueue};
