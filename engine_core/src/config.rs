use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{fs, io, path::Path};

use crate::error::{EngineError, EngineResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    /// Frame pacing. The host draws nothing, so this only bounds input sampling.
    #[serde(default = "default_target_fps")]
    pub target_fps: f32,

    /// Upper bound for a single frame's dt (sec).
    #[serde(default = "default_max_dt_sec")]
    pub max_dt_sec: f32,

    /// env_logger filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub modules: Vec<ModuleConfig>,
}

/// Conversion from raw device units to the axis units modules see.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Per raw mouse count.
    pub mouse_delta_scale: f32,
    /// Per wheel notch.
    pub scroll_line_scale: f32,
    /// Per pixel of touchpad scroll.
    pub scroll_pixel_scale: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mouse_delta_scale: 0.1,
            scroll_line_scale: 0.1,
            scroll_pixel_scale: 0.005,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleConfig {
    pub id: String,

    /// Module specific settings, decoded by the module itself.
    /// toml::Value has no Default, hence the helper.
    #[serde(default = "default_module_data")]
    pub data: toml::Value,
}

fn default_title() -> String {
    "editcam".to_string()
}
fn default_width() -> u32 {
    1280
}
fn default_height() -> u32 {
    720
}
fn default_target_fps() -> f32 {
    60.0
}
fn default_max_dt_sec() -> f32 {
    0.25
}
fn default_log_level() -> String {
    "info".to_string()
}

fn default_module_data() -> toml::Value {
    toml::Value::Table(toml::map::Map::new())
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
            target_fps: default_target_fps(),
            max_dt_sec: default_max_dt_sec(),
            log_level: default_log_level(),
            input: InputConfig::default(),
            modules: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Reads `path`; a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(s) => Self::from_toml_str(&s)
                .map_err(|e| EngineError::Config(format!("parse {}: {}", path.display(), e))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(EngineError::Config(format!("read {}: {}", path.display(), e))),
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Decodes the `data` table of module `id`. `Ok(None)` if the module has no entry.
    pub fn module_data<T: DeserializeOwned>(&self, id: &str) -> EngineResult<Option<T>> {
        let Some(module) = self.modules.iter().find(|m| m.id == id) else {
            return Ok(None);
        };

        module
            .data
            .clone()
            .try_into::<T>()
            .map(Some)
            .map_err(|e| EngineError::Config(format!("module {}: {}", id, e)))
    }

    /// Minimum time between frames.
    pub fn frame_interval(&self) -> std::time::Duration {
        let fps = if self.target_fps.is_finite() && self.target_fps > 0.0 {
            self.target_fps
        } else {
            default_target_fps()
        };
        std::time::Duration::from_secs_f32(1.0 / fps)
    }
}
