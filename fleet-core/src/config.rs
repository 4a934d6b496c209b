//! fleet-core/src/config.rs
//! ============================================================================
//! # Config: dashboard query defaults, view preference and logging
//!
//! Loads and saves settings as TOML from the platform config directory
//! located with [`directories`](https://docs.rs/directories). Missing files
//! and missing sections fall back to defaults.
//!
//! ## Example
//! ```rust,ignore
//! let config = Config::load()?;
//! let state = FilterState::from_config(&config.query);
//! ```

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use compact_str::CompactString;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::{FleetError, FleetResult},
    model::filter_state::{SortKey, SortOrder},
};

/// How the host lays out the visible list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,

    List,

    Table,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'_ str = match self {
            Self::Grid => "grid",
            Self::List => "list",
            Self::Table => "table",
        };

        write!(f, "{s}")
    }
}

impl FromStr for ViewMode {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(Self::Grid),
            "list" => Ok(Self::List),
            "table" => Ok(Self::Table),
            other => Err(FleetError::UnknownViewMode(CompactString::new(other))),
        }
    }
}

/// Initial sort for a fresh `FilterState`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub default_sort_by: SortKey,

    pub default_sort_order: SortOrder,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub mode: ViewMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub level: CompactString,

    pub log_dir: PathBuf,

    pub file_prefix: CompactString,

    /// Mirror log lines to stderr
    pub stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: CompactString::const_new("info"),
            log_dir: PathBuf::from("./logs"),
            file_prefix: CompactString::const_new("fleet"),
            stderr: true,
        }
    }
}

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub query: QueryConfig,

    #[serde(default)]
    pub view: ViewConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Loads config from the platform config dir, or returns defaults when
    /// no file exists yet.
    pub fn load() -> FleetResult<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            Self::load_from_path(&path)
        } else {
            info!(
                "No config file found at {}, using default configuration",
                path.display()
            );
            Ok(Self::default())
        }
    }

    pub fn load_from_path(path: &Path) -> FleetResult<Self> {
        info!("Loading config from {}", path.display());

        let text = std::fs::read_to_string(path).map_err(|e| FleetError::config_io(path, e))?;
        let cfg: Self = toml::from_str(&text)?;

        Ok(cfg)
    }

    /// Writes config as pretty TOML, creating parent directories.
    pub fn save_to_path(&self, path: &Path) -> FleetResult<()> {
        info!("Saving config to {}", path.display());

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| FleetError::config_io(parent, e))?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_str).map_err(|e| FleetError::config_io(path, e))?;

        Ok(())
    }

    pub fn save(&self) -> FleetResult<()> {
        self.save_to_path(&Self::config_path()?)
    }

    /// Returns the canonical config file path using `directories::ProjectDirs`.
    pub fn config_path() -> FleetResult<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn config_dir() -> FleetResult<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("org", "fleet", "FleetDashboard").ok_or(FleetError::ConfigDirUnavailable)?;
        Ok(proj_dirs.config_dir().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [query]
            default_sort_by = "year"
            default_sort_order = "desc"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.query.default_sort_by, SortKey::Year);
        assert_eq!(cfg.query.default_sort_order, SortOrder::Descending);
        assert_eq!(cfg.view.mode, ViewMode::Grid);
        assert_eq!(cfg.logging, LoggingConfig::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.view.mode = ViewMode::List;
        cfg.query.default_sort_by = SortKey::Manufacturer;

        cfg.save_to_path(&path).unwrap();
        let loaded = Config::load_from_path(&path).unwrap();

        assert_eq!(loaded, cfg);
    }

    #[test]
    fn missing_file_is_a_config_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from_path(&dir.path().join("absent.toml")).unwrap_err();

        assert_eq!(err.operation_type(), "configuration");
    }

    #[test]
    fn bad_view_mode_is_rejected() {
        assert!("carousel".parse::<ViewMode>().is_err());
        assert_eq!("table".parse::<ViewMode>().unwrap(), ViewMode::Table);
    }
}
