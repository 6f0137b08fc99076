//! Demo settings, read from an optional TOML file and then overridden from the command line.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SCREEN_WIDTH: u32 = 800;
pub const DEFAULT_SCREEN_HEIGHT: u32 = 600;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub gl: GlConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

/// The context version to request. Shader `#version` directives have to agree with it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlConfig {
    pub major: u8,
    pub minor: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub clear_color: [f32; 4],
    /// Start with polygons drawn as lines. `P` toggles it at runtime.
    pub wireframe: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: String::from("uwu"),
            width: DEFAULT_SCREEN_WIDTH,
            height: DEFAULT_SCREEN_HEIGHT,
        }
    }
}

impl Default for GlConfig {
    fn default() -> Self {
        Self { major: 3, minor: 3 }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.0, 1.0],
            wireframe: false,
        }
    }
}

impl DemoConfig {
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config = toml::from_str(contents)?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Error reading config file {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Error parsing config file {}", path.display()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = DemoConfig::from_toml("").unwrap();

        assert_eq!(config, DemoConfig::default());
        assert_eq!(config.window.title, "uwu");
        assert_eq!((config.window.width, config.window.height), (800, 600));
        assert_eq!((config.gl.major, config.gl.minor), (3, 3));
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config = DemoConfig::from_toml(r#"
            [window]
            width = 1024

            [render]
            clear_color = [0.2, 0.3, 0.3, 1.0]
        "#).unwrap();

        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, DEFAULT_SCREEN_HEIGHT);
        assert_eq!(config.render.clear_color, [0.2, 0.3, 0.3, 1.0]);
        assert!(!config.render.wireframe);
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(DemoConfig::from_toml("[window]\nwidth = \"wide\"").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = DemoConfig::load_from_file(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.toml"));
    }
}
