use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::engine::{HEIGHT, WIDTH};

/// File read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "dvd-bounce.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

/// Demo settings. Every field is optional in the TOML file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BounceConfig {
    pub title: String,
    pub debug: bool,
    /// TTF/OTF used for the overlay. Falls back to common system fonts.
    pub font_path: Option<PathBuf>,
    /// Directory of `<name>.wgsl` overrides for the built-in shaders.
    pub shader_dir: Option<PathBuf>,
    pub dvd_size: [f32; 2],
    /// Initial velocity in logical pixels per second.
    pub dvd_speed: [f32; 2],
    pub dvd_color: [u8; 3],
    pub confetti_size: f32,
    /// Upper bound of a confetti piece's speed on each axis.
    pub confetti_speed: f32,
    pub max_confetti: usize,
    /// Fixed RNG seed; random when unset.
    pub seed: Option<u64>,
    pub log_filter: Option<String>,
}

impl Default for BounceConfig {
    fn default() -> Self {
        Self {
            title: "DVD Bounce".to_string(),
            debug: false,
            font_path: None,
            shader_dir: None,
            dvd_size: [120.0, 60.0],
            dvd_speed: [180.0, 140.0],
            dvd_color: [80, 160, 255],
            confetti_size: 10.0,
            confetti_speed: 220.0,
            max_confetti: 512,
            seed: None,
            log_filter: None,
        }
    }
}

impl BounceConfig {
    /// Reads `path`; a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate().map_err(|reason| ConfigError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(config)
    }

    /// Checks the values the simulation relies on: the dvd fits inside the
    /// window, speeds and sizes are finite, and at least one confetti piece
    /// may exist.
    pub fn validate(&self) -> Result<(), String> {
        let [w, h] = self.dvd_size;
        if !(w > 0.0 && h > 0.0) {
            return Err(format!("dvd_size must be positive, got [{w}, {h}]"));
        }
        if !(w < WIDTH && h < HEIGHT) {
            return Err(format!("dvd_size [{w}, {h}] does not fit in {WIDTH}x{HEIGHT}"));
        }
        if !self.dvd_speed.iter().all(|v| v.is_finite()) {
            return Err(format!("dvd_speed must be finite, got {:?}", self.dvd_speed));
        }
        if !(self.confetti_speed.is_finite() && self.confetti_speed >= 0.0) {
            return Err(format!("confetti_speed must be finite and >= 0, got {}", self.confetti_speed));
        }
        if !(self.confetti_size.is_finite() && self.confetti_size > 0.0) {
            return Err(format!("confetti_size must be finite and > 0, got {}", self.confetti_size));
        }
        if self.max_confetti == 0 {
            return Err("max_confetti must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("dvd-bounce-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg: BounceConfig = toml::from_str("dvd_speed = [10.0, 20.0]\nseed = 3\n").unwrap();
        assert_eq!(cfg.dvd_speed, [10.0, 20.0]);
        assert_eq!(cfg.seed, Some(3));
        assert_eq!(cfg.max_confetti, 512);
        assert_eq!(cfg.title, "DVD Bounce");
    }

    #[test]
    fn missing_file_is_default() {
        let cfg = BounceConfig::load_or_default("/nonexistent/dvd-bounce.toml").unwrap();
        assert_eq!(cfg, BounceConfig::default());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let path = temp_file("broken.toml", "dvd_size = \"big\"\n");
        let err = BounceConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(toml::from_str::<BounceConfig>("speed = 1.0\n").is_err());
    }

    #[test]
    fn defaults_are_valid() {
        assert_eq!(BounceConfig::default().validate(), Ok(()));
    }

    fn rejects(cfg: BounceConfig, needle: &str) {
        let reason = cfg.validate().unwrap_err();
        assert!(reason.contains(needle), "{reason}");
    }

    #[test]
    fn non_positive_dvd_size_is_rejected() {
        rejects(BounceConfig { dvd_size: [-120.0, 60.0], ..Default::default() }, "positive");
        rejects(BounceConfig { dvd_size: [120.0, 0.0], ..Default::default() }, "positive");
        rejects(BounceConfig { dvd_size: [f32::NAN, 60.0], ..Default::default() }, "positive");
    }

    #[test]
    fn dvd_larger_than_window_is_rejected() {
        rejects(BounceConfig { dvd_size: [1000.0, 700.0], ..Default::default() }, "does not fit");
        rejects(BounceConfig { dvd_size: [800.0, 60.0], ..Default::default() }, "does not fit");
        rejects(BounceConfig { dvd_size: [f32::INFINITY, 60.0], ..Default::default() }, "does not fit");
    }

    #[test]
    fn non_finite_speeds_and_sizes_are_rejected() {
        rejects(BounceConfig { dvd_speed: [f32::INFINITY, 1.0], ..Default::default() }, "dvd_speed");
        rejects(BounceConfig { dvd_speed: [1.0, f32::NAN], ..Default::default() }, "dvd_speed");
        rejects(BounceConfig { confetti_speed: f32::NAN, ..Default::default() }, "confetti_speed");
        rejects(BounceConfig { confetti_size: f32::INFINITY, ..Default::default() }, "confetti_size");
    }

    #[test]
    fn zero_max_confetti_is_rejected() {
        rejects(BounceConfig { max_confetti: 0, ..Default::default() }, "max_confetti");
    }

    #[test]
    fn invalid_values_in_file_are_reported() {
        let path = temp_file("negative.toml", "dvd_size = [-120.0, 60.0]\n");
        let err = BounceConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));

        let err = BounceConfig::load_or_default(&path).unwrap_err();
        assert!(err.to_string().contains("dvd_size"));
    }

    #[test]
    fn explicit_missing_file_is_an_io_error() {
        let err = BounceConfig::from_file("/nonexistent/dvd-bounce.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
