use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use config::ConfigError;
use serde::Deserialize;

use crate::{
    domain::chart::{BarStyle, Rgba},
    utils,
};

const CONFIG: &str = include_str!("../../.config/config.json5");

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000/search";

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub _data_dir: PathBuf,
    #[serde(default)]
    pub _config_dir: PathBuf,
}

/// Colours of the similarity chart
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct Styles {
    pub bar_fill: Rgba,
    pub bar_border: Rgba,
}

impl Default for Styles {
    fn default() -> Self {
        let style = BarStyle::default();
        Self {
            bar_fill: style.fill,
            bar_border: style.border,
        }
    }
}

impl Styles {
    pub fn bar_style(&self) -> BarStyle {
        BarStyle {
            fill: self.bar_fill,
            border: self.bar_border,
            ..BarStyle::default()
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_discard_stale")]
    pub discard_stale_responses: bool,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub styles: Styles,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_discard_stale() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            endpoint: default_endpoint(),
            discard_stale_responses: default_discard_stale(),
            request_timeout_secs: None,
            styles: Styles::default(),
        }
    }
}

impl Config {
    /// Load the embedded defaults overlaid with any config file in the config directory
    pub fn new() -> Result<Self, ConfigError> {
        Self::load_from(&utils::get_config_dir(), &utils::get_data_dir())
    }

    pub fn load_from(config_dir: &Path, data_dir: &Path) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("_data_dir", data_dir.to_string_lossy().as_ref())?
            .set_default("_config_dir", config_dir.to_string_lossy().as_ref())?
            .add_source(config::File::from_str(CONFIG, config::FileFormat::Json5));

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.json", config::FileFormat::Json),
            ("config.yaml", config::FileFormat::Yaml),
            ("config.toml", config::FileFormat::Toml),
            ("config.ini", config::FileFormat::Ini),
        ];
        let mut found_config = false;
        for (file, format) in &config_files {
            let path = config_dir.join(file);
            if path.exists() {
                found_config = true;
            }
            builder = builder.add_source(config::File::from(path).format(*format).required(false));
        }
        if !found_config {
            log::info!(
                "No configuration file found in {}, using defaults",
                config_dir.display()
            );
        }

        let cfg: Self = builder.build()?.try_deserialize()?;

        if cfg.endpoint.trim().is_empty() {
            return Err(ConfigError::NotFound(String::from("endpoint")));
        }

        Ok(cfg)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "{}-config-test-{name}-{}",
            env!("CARGO_PKG_NAME"),
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    #[test]
    fn test_embedded_defaults() {
        let default_config: Config = json5::from_str(CONFIG).expect("embedded config parses");
        assert_eq!(default_config.endpoint, DEFAULT_ENDPOINT);
        assert!(default_config.discard_stale_responses);
        assert_eq!(default_config.request_timeout_secs, None);
        assert_eq!(default_config.styles, Styles::default());
    }

    #[test]
    fn test_load_without_user_file_uses_defaults() {
        let dir = scratch_dir("defaults");
        let cfg = Config::load_from(&dir, &dir).expect("defaults load");

        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert!(cfg.discard_stale_responses);
        assert_eq!(cfg.request_timeout(), None);
        assert_eq!(cfg.config._config_dir, dir);
        assert_eq!(cfg.styles.bar_style(), BarStyle::default());
    }

    #[test]
    fn test_user_file_overrides_defaults() {
        let dir = scratch_dir("override");
        std::fs::write(
            dir.join("config.toml"),
            r##"
endpoint = "http://search.internal:8080/search"
discard_stale_responses = false
request_timeout_secs = 15

[styles]
bar_fill = "#ff0000"
"##,
        )
        .expect("write config");

        let cfg = Config::load_from(&dir, &dir).expect("config loads");

        assert_eq!(cfg.endpoint, "http://search.internal:8080/search");
        assert!(!cfg.discard_stale_responses);
        assert_eq!(cfg.request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(cfg.styles.bar_fill, Rgba::new(255, 0, 0, 1.0));
        // Unset keys keep the embedded defaults
        assert_eq!(cfg.styles.bar_border, Rgba::new(0, 123, 255, 1.0));
    }

    #[test]
    fn test_invalid_colour_is_rejected() {
        let dir = scratch_dir("bad-colour");
        std::fs::write(
            dir.join("config.json5"),
            r#"{ styles: { bar_fill: "blue-ish" } }"#,
        )
        .expect("write config");

        assert!(Config::load_from(&dir, &dir).is_err());
    }

    #[test]
    fn test_blank_endpoint_is_rejected() {
        let dir = scratch_dir("blank-endpoint");
        std::fs::write(dir.join("config.json"), r#"{ "endpoint": " " }"#).expect("write config");

        let err = Config::load_from(&dir, &dir).unwrap_err();
        assert!(format!("{err:?}").contains("endpoint"));
    }
}
