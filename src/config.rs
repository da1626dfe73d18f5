use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::animation::RevealTiming;
use crate::error::ConfigError;
use crate::export::DEFAULT_EXPORT_FILE_NAME;
use crate::palette::{self, DEFAULT_PALETTE, Palette};
use crate::panels::toolbar::ToolbarConfig;
use crate::state::DisplayMode;

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "SPLASH_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "splash.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub file_name: String,
    /// Directory native builds write the PNG into
    pub download_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_EXPORT_FILE_NAME.to_owned(),
            download_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to their defaults
pub struct SplashConfig {
    /// Id of the canvas element the web build mounts into
    pub mount_id: String,
    /// Directory holding `brush.png` and `rubber-icon.png`
    pub asset_path: PathBuf,
    pub initial_mode: DisplayMode,
    /// Brush colors as `#RRGGBB`
    pub palette: Vec<String>,
    /// Outline color revealed after each stroke, `None` for no outline
    pub outline: Option<String>,
    pub toolbar: ToolbarConfig,
    pub export: ExportConfig,
    pub reveal: RevealTiming,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            mount_id: "the_canvas_id".to_owned(),
            asset_path: PathBuf::from("./assets/images"),
            initial_mode: DisplayMode::Dark,
            palette: DEFAULT_PALETTE.iter().map(|hex| (*hex).to_owned()).collect(),
            outline: None,
            toolbar: ToolbarConfig::default(),
            export: ExportConfig::default(),
            reveal: RevealTiming::default(),
        }
    }
}

impl SplashConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_owned(),
                source,
            }),
        }
    }

    /// Like [`Self::load`], but logs a failure and falls back to the defaults
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("Ignoring config {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.palette()?;
        self.outline_color()?;
        Ok(())
    }

    pub fn palette(&self) -> Result<Palette, ConfigError> {
        Palette::from_hex(&self.palette)
    }

    pub fn outline_color(&self) -> Result<Option<egui::Color32>, ConfigError> {
        self.outline.as_deref().map(palette::parse_hex_color).transpose()
    }
}

/// `$SPLASH_CONFIG` if set, else `splash.json` in the working directory
pub fn default_config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}
