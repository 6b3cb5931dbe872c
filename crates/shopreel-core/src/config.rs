use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub banner: BannerConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// JSON catalog to load instead of the built-in sample storefront
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            catalog_path: None,
        }
    }
}

/// Timing and layout of the seamless "latest items" ticker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Number of items shown side by side
    #[serde(default = "default_visible_count")]
    pub visible_count: usize,
    /// Delay between two advances
    #[serde(default = "default_carousel_interval")]
    pub interval_ms: u64,
    /// Length of the slide transition; the boundary snap waits this long
    #[serde(default = "default_carousel_transition")]
    pub transition_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            visible_count: default_visible_count(),
            interval_ms: default_carousel_interval(),
            transition_ms: default_carousel_transition(),
        }
    }
}

impl CarouselConfig {
    #[inline]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    #[inline]
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// Reject layouts and timings the carousel cannot loop with.
    ///
    /// The snap back into the real region has to land before the next
    /// advance, so the transition must be strictly shorter than the interval.
    pub fn validate(&self) -> crate::Result<()> {
        if self.visible_count == 0 {
            return Err(crate::Error::InvalidVisibleCount(self.visible_count));
        }
        validate_timing(self.interval_ms, self.transition_ms)
    }
}

/// Timing of the whole-slide hero banner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerConfig {
    #[serde(default = "default_banner_interval")]
    pub interval_ms: u64,
    /// Crossfade length used by renderers
    #[serde(default = "default_banner_transition")]
    pub transition_ms: u64,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_banner_interval(),
            transition_ms: default_banner_transition(),
        }
    }
}

impl BannerConfig {
    #[inline]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    #[inline]
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn validate(&self) -> crate::Result<()> {
        validate_timing(self.interval_ms, self.transition_ms)
    }
}

fn validate_timing(interval_ms: u64, transition_ms: u64) -> crate::Result<()> {
    if interval_ms == 0 || transition_ms >= interval_ms {
        return Err(crate::Error::InvalidTiming {
            interval_ms,
            transition_ms,
        });
    }
    Ok(())
}

/// Easing curve for slide transitions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump at the end of the transition
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while a slide transition is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Easing curve of the ticker slide
    #[serde(default)]
    pub easing: EasingType,
    /// Show item prices on ticker cards
    #[serde(default = "default_true")]
    pub show_prices: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            easing: EasingType::default(),
            show_prices: default_true(),
        }
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "<C-j>" (Ctrl+j), "<S-Tab>" (Shift+Tab), "<Space>", "<Left>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Pause or resume both carousels
    #[serde(default = "default_key_toggle_pause")]
    pub toggle_pause: String,
    /// Slide the ticker forward by one item
    #[serde(default = "default_key_next_item")]
    pub next_item: String,
    /// Slide the ticker back by one item
    #[serde(default = "default_key_prev_item")]
    pub prev_item: String,
    /// Show the next hero banner
    #[serde(default = "default_key_next_banner")]
    pub next_banner: String,
    /// Show the previous hero banner
    #[serde(default = "default_key_prev_banner")]
    pub prev_banner: String,
    /// Reload the catalog from disk
    #[serde(default = "default_key_reload")]
    pub reload: String,
    /// Toggle the help overlay
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            toggle_pause: default_key_toggle_pause(),
            next_item: default_key_next_item(),
            prev_item: default_key_prev_item(),
            next_banner: default_key_next_banner(),
            prev_banner: default_key_prev_banner(),
            reload: default_key_reload(),
            help: default_key_help(),
        }
    }
}

// Default keymap values (Vim-style notation)
fn default_key_quit() -> String { "q".to_string() }
fn default_key_toggle_pause() -> String { "<Space>".to_string() }
fn default_key_next_item() -> String { "l".to_string() }
fn default_key_prev_item() -> String { "h".to_string() }
fn default_key_next_banner() -> String { "j".to_string() }
fn default_key_prev_banner() -> String { "k".to_string() }
fn default_key_reload() -> String { "r".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_visible_count() -> usize {
    4
}

fn default_carousel_interval() -> u64 {
    3000
}

fn default_carousel_transition() -> u64 {
    500
}

fn default_banner_interval() -> u64 {
    5000
}

fn default_banner_transition() -> u64 {
    700
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load and validate configuration from a specific file
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.carousel.validate()?;
        config.banner.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content)?;

        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/shopreel/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("shopreel")
            .join("config.toml")
    }

    /// Get the catalog path (with tilde expansion), if one is configured
    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.general.catalog_path.as_deref().map(expand_tilde)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.carousel.visible_count, 4);
        assert_eq!(config.carousel.interval(), Duration::from_millis(3000));
        assert_eq!(config.carousel.transition(), Duration::from_millis(500));
        assert_eq!(config.banner.interval_ms, 5000);
        assert_eq!(config.ui.easing, EasingType::Cubic);
        assert!(config.carousel.validate().is_ok());
        assert!(config.banner.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [carousel]
            visible_count = 3
            interval_ms = 4000

            [ui]
            easing = "ease_out"
            "#,
        )
        .unwrap();

        assert_eq!(config.carousel.visible_count, 3);
        assert_eq!(config.carousel.interval_ms, 4000);
        assert_eq!(config.carousel.transition_ms, 500);
        assert_eq!(config.ui.easing, EasingType::EaseOut);
        assert_eq!(config.keymap.quit, "q");
    }

    #[test]
    fn test_validate_rejects_zero_visible_count() {
        let config = CarouselConfig {
            visible_count: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(crate::Error::InvalidVisibleCount(0))
        ));
    }

    #[test]
    fn test_validate_rejects_slow_transition() {
        let config = CarouselConfig {
            interval_ms: 500,
            transition_ms: 500,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(crate::Error::InvalidTiming { .. })
        ));

        let banner = BannerConfig {
            interval_ms: 0,
            transition_ms: 0,
        };
        assert!(banner.validate().is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.carousel.visible_count = 3;
        config.general.catalog_path = Some(PathBuf::from("/srv/catalog.json"));
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.carousel, config.carousel);
        assert_eq!(loaded.catalog_path(), Some(PathBuf::from("/srv/catalog.json")));
    }

    #[test]
    fn test_load_rejects_invalid_timing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[carousel]\ninterval_ms = 100\ntransition_ms = 200\n").unwrap();

        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_expand_tilde_passthrough() {
        let path = Path::new("/tmp/catalog.json");
        assert_eq!(expand_tilde(path), PathBuf::from("/tmp/catalog.json"));
    }
}
