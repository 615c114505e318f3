use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub snap: SnapConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Page transition parameters
///
/// Speeds are milliseconds per 1000 units of scrolled distance, the same
/// unit the animated-scroll primitive takes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapConfig {
    /// Speed for backward (upward) transitions
    #[serde(default = "default_speed_up")]
    pub speed_up: f64,
    /// Speed for forward (downward) transitions
    #[serde(default = "default_speed_down")]
    pub speed_down: f64,
    /// Pass-through options for the animated-scroll primitive
    #[serde(default)]
    pub scroll_options: ScrollOptions,
}

impl SnapConfig {
    pub fn new(speed_up: f64, speed_down: f64) -> Self {
        Self {
            speed_up,
            speed_down,
            scroll_options: ScrollOptions::default(),
        }
    }

    pub fn with_scroll_options(mut self, scroll_options: ScrollOptions) -> Self {
        self.scroll_options = scroll_options;
        self
    }
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self::new(default_speed_up(), default_speed_down())
    }
}

/// Animation options a caller may tune.
///
/// Speed, cancel-on-user-action, vertical offset and the element to scroll
/// belong to the controller and have no field here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollOptions {
    /// Lower bound on animation duration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_duration_ms: Option<u64>,
    /// Upper bound on animation duration (0 = instant jump)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_duration_ms: Option<u64>,
    /// Easing curve
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<EasingType>,
}

/// Easing function type for scroll animations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    Linear,
    /// Decelerates into the target; the animated-scroll-to default
    #[default]
    EaseOutCubic,
    EaseInOutCubic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while a transition is animating
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Number of demo panels
    #[serde(default = "default_page_count")]
    pub page_count: usize,
    /// Show the status bar under the pages
    #[serde(default = "default_true")]
    pub show_status_bar: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            page_count: default_page_count(),
            show_status_bar: default_true(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fullsnap")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_speed_up() -> f64 {
    500.0
}

fn default_speed_down() -> f64 {
    1000.0
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_page_count() -> usize {
    5
}

fn default_true() -> bool {
    true
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
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
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Render configuration as pretty TOML
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/fullsnap/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("fullsnap")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Get the log file path used by the terminal UI
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("fullsnap.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.snap.speed_up, 500.0);
        assert_eq!(config.snap.speed_down, 1000.0);
        assert_eq!(config.snap.scroll_options, ScrollOptions::default());
        assert_eq!(config.ui.page_count, 5);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_partial_snap_section() {
        let config = AppConfig::from_toml(
            r#"
            [snap]
            speed_down = 250.0

            [snap.scroll_options]
            max_duration_ms = 800
            easing = "ease_in_out_cubic"
            "#,
        )
        .unwrap();
        assert_eq!(config.snap.speed_up, 500.0);
        assert_eq!(config.snap.speed_down, 250.0);
        assert_eq!(config.snap.scroll_options.max_duration_ms, Some(800));
        assert_eq!(config.snap.scroll_options.min_duration_ms, None);
        assert_eq!(config.snap.scroll_options.easing, Some(EasingType::EaseInOutCubic));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[snap\nspeed_up = ").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_round_trip_keeps_speeds() {
        let mut config = AppConfig::default();
        config.snap.speed_up = 120.0;
        let text = config.to_toml().unwrap();
        let parsed = AppConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.snap, config.snap);
    }

    #[test]
    fn test_log_path_in_data_dir() {
        let mut config = AppConfig::default();
        config.general.data_dir = PathBuf::from("/tmp/fullsnap-data");
        assert_eq!(config.log_path(), PathBuf::from("/tmp/fullsnap-data/fullsnap.log"));
    }
}
