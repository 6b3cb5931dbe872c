pub mod config;
pub mod error;
pub mod carousel;
pub mod catalog;

pub use config::{AppConfig, BannerConfig, CarouselConfig, EasingType};
pub use error::{Error, Result};
