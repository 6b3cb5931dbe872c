use std::sync::Arc;
use std::time::{Duration, Instant};

use ratatui::layout::{Position, Rect};
use shopreel_core::carousel::{BannerRotator, CarouselState, Frame, QueueDriven, SeamlessCarousel};
use shopreel_core::catalog::{Banner, Catalog, CatalogItem};
use shopreel_core::AppConfig;
use tracing::{debug, info, warn};

use crate::input::Action;
use crate::theme::Theme;
use crate::transition::{timing, SlideAnimator};

/// Newest items fed into the ticker
pub const TICKER_ITEM_LIMIT: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Help,
}

/// Which carousel the mouse pointer is over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hover {
    pub banner: bool,
    pub ticker: bool,
}

pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub catalog: Catalog,
    pub banner: BannerRotator<Banner>,
    pub ticker: SeamlessCarousel<CatalogItem>,
    pub slide: SlideAnimator,
    pub mode: Mode,
    pub should_quit: bool,
    pub status_message: Option<String>,
    /// Pause requested from the keyboard; wins over hover
    pub user_paused: bool,
    pub hover: Hover,
    /// Screen regions from the last draw, used for hover hit-testing
    pub banner_area: Rect,
    pub ticker_area: Rect,
    last_frame: Frame,
    shown_banner: usize,
    banner_changed_at: Option<Instant>,
}

impl App {
    pub fn new(config: Arc<AppConfig>, catalog: Catalog) -> shopreel_core::Result<Self> {
        let mut banner = BannerRotator::with_timer_queue(config.banner.clone())?;
        banner.set_items(catalog.banners.clone());

        let mut ticker = SeamlessCarousel::with_timer_queue(config.carousel.clone())?;
        ticker.initialize(catalog.latest_items(TICKER_ITEM_LIMIT));

        let mut slide = SlideAnimator::new(config.carousel.transition(), config.ui.easing);
        slide.jump_to(ticker.offset_percent());
        let last_frame = ticker.frame();

        info!(
            banners = catalog.banners.len(),
            items = catalog.items.len(),
            "Storefront preview ready"
        );

        Ok(Self {
            config,
            theme: Theme::default(),
            catalog,
            banner,
            ticker,
            slide,
            mode: Mode::Normal,
            should_quit: false,
            status_message: None,
            user_paused: false,
            hover: Hover::default(),
            banner_area: Rect::default(),
            ticker_area: Rect::default(),
            last_frame,
            shown_banner: 0,
            banner_changed_at: None,
        })
    }

    /// Let `elapsed` pass on both carousels' clocks and bring the animators up to `now`
    pub fn tick(&mut self, elapsed: Duration, now: Instant) {
        self.banner.run_for(elapsed);
        self.ticker.run_for(elapsed);
        self.sync(now);
        self.slide.update(now);
    }

    /// Feed state changes to the animators
    fn sync(&mut self, now: Instant) {
        let frame = self.ticker.frame();
        if frame != self.last_frame {
            self.slide.apply_frame(frame, now);
            self.last_frame = frame;
        }

        if self.banner.current() != self.shown_banner {
            self.shown_banner = self.banner.current();
            self.banner_changed_at = Some(now);
        }
    }

    /// Crossfade progress of the current banner, 1.0 once settled
    pub fn banner_fade(&self, now: Instant) -> f64 {
        match self.banner_changed_at {
            Some(start) => timing::progress(start, self.banner.transition(), now),
            None => 1.0,
        }
    }

    /// Whether the next frame should be drawn at animation rate
    pub fn needs_fast_update(&self, now: Instant) -> bool {
        self.slide.is_animating() || self.banner_fade(now) < 1.0
    }

    pub fn apply_action(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::TogglePause => self.toggle_pause(),
            Action::NextItem => self.ticker.advance(),
            Action::PrevItem => self.ticker.retreat(),
            Action::NextBanner => self.banner.next(),
            Action::PrevBanner => self.banner.previous(),
            Action::GoToBanner(index) => self.banner.go_to(index),
            Action::Reload => self.reload(now),
            Action::ToggleHelp => {
                self.mode = match self.mode {
                    Mode::Normal => Mode::Help,
                    Mode::Help => Mode::Normal,
                };
            }
            Action::ExitMode => self.mode = Mode::Normal,
            Action::None => {}
        }
        self.sync(now);
    }

    pub fn toggle_pause(&mut self) {
        self.user_paused = !self.user_paused;
        self.apply_pause();
        self.set_status(if self.user_paused { "Paused" } else { "Resumed" });
    }

    /// Update hover state from a pointer position
    pub fn on_mouse_move(&mut self, column: u16, row: u16) {
        let position = Position::new(column, row);
        let hover = Hover {
            banner: self.banner_area.contains(position),
            ticker: self.ticker_area.contains(position),
        };
        if hover != self.hover {
            debug!(banner = hover.banner, ticker = hover.ticker, "Hover changed");
            self.hover = hover;
            self.apply_pause();
        }
    }

    fn apply_pause(&mut self) {
        if self.user_paused || self.hover.ticker {
            self.ticker.pause();
        } else {
            self.ticker.resume();
        }

        if self.user_paused || self.hover.banner {
            self.banner.pause();
        } else {
            self.banner.resume();
        }
    }

    /// Re-read the catalog from disk
    pub fn reload(&mut self, now: Instant) {
        let path = self.config.catalog_path();
        match Catalog::load_or_sample(path.as_deref()) {
            Ok(catalog) => {
                self.set_status(format!(
                    "Reloaded {} banners, {} items",
                    catalog.banners.len(),
                    catalog.items.len()
                ));
                self.apply_catalog(catalog, now);
            }
            Err(e) => {
                warn!(error = %e, "Catalog reload failed");
                self.set_status(format!("Reload failed: {}", e));
            }
        }
    }

    /// Swap in new catalog contents, keeping cursor and pause state where possible
    pub fn apply_catalog(&mut self, catalog: Catalog, now: Instant) {
        self.banner.set_items(catalog.banners.clone());
        self.ticker.replace_items(catalog.latest_items(TICKER_ITEM_LIMIT));
        self.catalog = catalog;
        self.shown_banner = self.banner.current();
        self.banner_changed_at = None;
        self.apply_pause();
        self.sync(now);
    }

    /// Stop both carousels. Called once when leaving the UI.
    pub fn teardown(&mut self) {
        self.ticker.teardown();
        self.banner.teardown();
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

/// Short label for status displays
pub fn state_label(state: CarouselState) -> &'static str {
    match state {
        CarouselState::Static => "static",
        CarouselState::Running => "running",
        CarouselState::Paused => "paused",
        CarouselState::TornDown => "stopped",
    }
}
