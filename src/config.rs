//! Startup settings, read from an optional TOML file.
//!
//! Every section uses `#[serde(default)]`, so a file only needs the values it
//! overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_ENV: &str = "SPHERE_VIS_CONFIG";
pub const CONFIG_FILE: &str = "sphere-vis.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid config {path}: {reason}")]
    Invalid {
        path: PathBuf,
        reason: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub sphere: SphereConfig,
    pub camera: CameraConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 800,
            height: 600,
            title: String::from("sphere"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    pub radius: f32,
    /// Number of latitude rings between the poles.
    pub rings: u32,
    pub vertices_per_ring: u32,
}

impl Default for SphereConfig {
    fn default() -> Self {
        SphereConfig {
            radius: 1.,
            rings: 100,
            vertices_per_ring: 500,
        }
    }
}

/// Initial camera state. Angles are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub yaw: f32,
    pub pitch: f32,
    pub speed: f32,
    pub sensitivity: f32,
    pub zoom: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            position: [0., 0., 3.],
            yaw: crate::camera::YAW,
            pitch: crate::camera::PITCH,
            speed: crate::camera::SPEED,
            sensitivity: crate::camera::SENSITIVITY,
            zoom: crate::camera::ZOOM,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub clear_color: [f32; 4],
    pub shininess: f32,
    pub near: f32,
    pub far: f32,
    pub vsync: bool,
    pub wireframe: bool,
    pub shader_dir: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            clear_color: [0.1, 0.1, 0.1, 1.],
            shininess: 32.,
            near: 0.1,
            far: 100.,
            vsync: true,
            wireframe: false,
            shader_dir: PathBuf::from("shaders"),
        }
    }
}

impl RenderConfig {
    /// Clip planes must describe a non-empty range in front of the camera.
    pub fn validate(&self) -> Result<(), String> {
        let (near, far) = (self.near, self.far);
        if !near.is_finite() || near <= 0. {
            return Err(format!("render.near must be positive, got {}", near));
        }
        if !far.is_finite() || far <= near {
            return Err(format!("render.far ({}) must be greater than render.near ({})", far, near));
        }
        Ok(())
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;

        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;

        config.render.validate().map_err(|reason| ConfigError::Invalid {
            path: path.to_owned(),
            reason,
        })?;
        Ok(config)
    }

    /// Picks the config file named by `SPHERE_VIS_CONFIG`, then
    /// `sphere-vis.toml` in the working directory. Returns the defaults and
    /// `None` when neither exists.
    pub fn discover() -> Result<(Config, Option<PathBuf>), ConfigError> {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Config::discover_from(explicit, Path::new(CONFIG_FILE))
    }

    fn discover_from(
        explicit: Option<PathBuf>,
        fallback: &Path
    ) -> Result<(Config, Option<PathBuf>), ConfigError> {
        let path = match explicit {
            Some(path) => path,
            None if fallback.is_file() => fallback.to_owned(),
            None => return Ok((Config::default(), None)),
        };

        let config = Config::load(&path)?;
        Ok((config, Some(path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    #[test]
    fn default_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();

        assert_eq!(config, parsed);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
[sphere]
rings = 12

[render]
wireframe = true
"#,
        )
        .unwrap();

        assert_eq!(config.sphere.rings, 12);
        assert_eq!(config.sphere.vertices_per_ring, 500);
        assert!(config.render.wireframe);
        assert_eq!(config.render.shininess, 32.);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[camera]\nposition = [1.0, 2.0, 3.0]\nzoom = 30.0").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.camera.position, [1., 2., 3.]);
        assert_eq!(config.camera.zoom, 30.);
    }

    #[test]
    fn load_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[sphere]\nrings = \"many\"").unwrap();

        assert!(matches!(Config::load(file.path()), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn load_rejects_bad_clip_planes() {
        for planes in &["near = 1.0\nfar = 1.0", "near = 0.0", "near = -0.5", "near = 50.0\nfar = 10.0"] {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "[render]\n{}", planes).unwrap();

            assert!(
                matches!(Config::load(file.path()), Err(ConfigError::Invalid { .. })),
                "{}",
                planes
            );
        }
    }

    #[test]
    fn default_clip_planes_are_valid() {
        assert_eq!(RenderConfig::default().validate(), Ok(()));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let result = Config::discover_from(Some(missing), Path::new(CONFIG_FILE));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn falls_back_to_defaults_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let (config, source) =
            Config::discover_from(None, &dir.path().join(CONFIG_FILE)).unwrap();

        assert_eq!(config, Config::default());
        assert!(source.is_none());
    }

    #[test]
    fn fallback_file_is_used_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[window]\ntitle = \"globe\"\n").unwrap();

        let (config, source) = Config::discover_from(None, &path).unwrap();
        assert_eq!(config.window.title, "globe");
        assert_eq!(source, Some(path));
    }
}
