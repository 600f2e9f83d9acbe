//! Shared configuration for Vitrine
//!
//! This crate provides the single source of truth for window dimensions,
//! asset locations, and interaction tuning shared across all build modes
//! (native Bevy, browser/WASM).

use serde::{Deserialize, Serialize};

#[cfg(feature = "bevy")]
use bevy::prelude::Resource;

/// Default window width in pixels
pub const DEFAULT_WIDTH: u32 = 1920;

/// Default window height in pixels
pub const DEFAULT_HEIGHT: u32 = 1080;

/// Default scale factor (1.0 = no scaling)
pub const DEFAULT_SCALE: f32 = 1.0;

/// Default rotation applied to a grabbed model per pixel of pointer travel
pub const DEFAULT_ROTATE_DEG_PER_PX: f32 = 1.0;

/// Errors raised while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Display configuration for window and rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
#[serde(default)]
pub struct DisplayConfig {
    /// Window width in logical pixels
    pub width: u32,
    /// Window height in logical pixels
    pub height: u32,
    /// Scale factor for DPI scaling
    pub scale: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            scale: DEFAULT_SCALE,
        }
    }
}

impl DisplayConfig {
    /// Create a new display config with the given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            scale: DEFAULT_SCALE,
        }
    }

    /// Width over height, or `None` for a degenerate window
    pub fn aspect_ratio(&self) -> Option<f32> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        Some(self.width as f32 / self.height as f32)
    }
}

/// Asset locations relative to the Bevy asset root
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
#[serde(default)]
pub struct AssetPaths {
    /// Texture mapped onto the wall plane
    pub wall_texture: String,
    /// glTF file holding the interactive model (scene 0 is spawned)
    pub model: String,
    /// Prefiltered diffuse environment cubemap (KTX2)
    pub environment_diffuse: String,
    /// Prefiltered specular environment cubemap (KTX2)
    pub environment_specular: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            wall_texture: "textures/wall.png".to_string(),
            model: "models/model.glb".to_string(),
            environment_diffuse: "environment/diffuse_rgb9e5_zstd.ktx2".to_string(),
            environment_specular: "environment/specular_rgb9e5_zstd.ktx2".to_string(),
        }
    }
}

/// Tuning for grab-and-rotate interaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
#[serde(default)]
pub struct InteractionSettings {
    /// Degrees of model rotation per pixel of pointer travel
    pub rotate_degrees_per_pixel: f32,
    /// Whether a mouse grab disables orbit camera control.
    /// Controller grabs always do.
    pub lock_camera_on_mouse_grab: bool,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            rotate_degrees_per_pixel: DEFAULT_ROTATE_DEG_PER_PX,
            lock_camera_on_mouse_grab: true,
        }
    }
}

impl InteractionSettings {
    /// Rotation in radians per pixel of pointer travel
    pub fn radians_per_pixel(&self) -> f32 {
        self.rotate_degrees_per_pixel.to_radians()
    }
}

/// Orbit camera sensitivities and limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
#[serde(default)]
pub struct OrbitSettings {
    /// Orbit sensitivity (radians per pixel)
    pub orbit_sensitivity: f32,
    /// Pan sensitivity (units per pixel, scaled by distance)
    pub pan_sensitivity: f32,
    /// Zoom sensitivity (distance units per scroll line)
    pub zoom_sensitivity: f32,
    /// Minimum distance from target
    pub min_distance: f32,
    /// Maximum distance from target
    pub max_distance: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            orbit_sensitivity: 0.005,
            pan_sensitivity: 0.002,
            zoom_sensitivity: 1.0,
            min_distance: 1.0,
            max_distance: 50.0,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
#[serde(default)]
pub struct VitrineConfig {
    pub display: DisplayConfig,
    pub assets: AssetPaths,
    pub interaction: InteractionSettings,
    pub orbit: OrbitSettings,
}

impl VitrineConfig {
    /// Defaults with `VITRINE_*` environment overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Parse a host-supplied JSON document; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        let rate = config.interaction.rotate_degrees_per_pixel;
        if !rate.is_finite() || rate < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "interaction.rotate_degrees_per_pixel",
                value: rate.to_string(),
            });
        }
        Ok(config)
    }

    /// Apply overrides from a key lookup. Bad values are logged and skipped.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("VITRINE_MODEL") {
            self.assets.model = path;
        }
        if let Some(path) = lookup("VITRINE_WALL_TEXTURE") {
            self.assets.wall_texture = path;
        }
        if let Some(path) = lookup("VITRINE_ENV_DIFFUSE") {
            self.assets.environment_diffuse = path;
        }
        if let Some(path) = lookup("VITRINE_ENV_SPECULAR") {
            self.assets.environment_specular = path;
        }

        if let Some(raw) = lookup("VITRINE_MOUSE_LOCKS_CAMERA") {
            match parse_flag(&raw) {
                Ok(flag) => self.interaction.lock_camera_on_mouse_grab = flag,
                Err(e) => tracing::warn!("Ignoring override: {e}"),
            }
        }

        if let Some(raw) = lookup("VITRINE_ROTATE_DEG_PER_PX") {
            match raw.trim().parse::<f32>() {
                Ok(value) if value.is_finite() && value >= 0.0 => {
                    self.interaction.rotate_degrees_per_pixel = value;
                }
                _ => tracing::warn!(
                    "Ignoring override: {}",
                    ConfigError::InvalidValue {
                        key: "VITRINE_ROTATE_DEG_PER_PX",
                        value: raw.clone(),
                    }
                ),
            }
        }
    }
}

fn parse_flag(raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: "VITRINE_MOUSE_LOCKS_CAMERA",
            value: raw.to_string(),
        }),
    }
}
