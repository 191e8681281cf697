//! sheetd - character sheet editor core
//!
//! Derived-stat rules, dice rolling and JSON character files for a tabletop
//! role-playing game sheet.

pub mod character;
pub mod dice;
pub mod error;
pub mod rules;
pub mod sheet;
pub mod storage;

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

pub use character::Character;
pub use error::{Result, SheetError};
pub use sheet::SheetSession;

/// Config file read from the working directory when no path is given
pub const CONFIG_FILE: &str = "sheetd.toml";

/// Prefix of environment overrides (`SHEETD_SHEET_DIR`, ...)
pub const ENV_PREFIX: &str = "SHEETD_";

/// Front-end configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory new character files are exported to
    pub sheet_dir: PathBuf,
    /// File stem used when a character has no name
    pub default_name: String,
    /// Tracing filter used when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet_dir: PathBuf::from("."),
            default_name: storage::DEFAULT_FILE_STEM.to_string(),
            log_filter: "sheetd=info".to_string(),
        }
    }
}

impl Config {
    /// Layered config: defaults, then the TOML file (if present), then environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = path.unwrap_or_else(|| Path::new(CONFIG_FILE));
        Self::figment(file)
            .extract()
            .map_err(|e| SheetError::Config(Box::new(e)))
    }

    fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::figment(&dir.path().join("missing.toml"))
            .extract::<Config>()
            .unwrap();
        assert_eq!(config.default_name, "personagem");
        assert_eq!(config.sheet_dir, PathBuf::from("."));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheetd.toml");
        std::fs::write(&path, "default_name = \"heroi\"\nsheet_dir = \"fichas\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.default_name, "heroi");
        assert_eq!(config.sheet_dir, PathBuf::from("fichas"));
        assert_eq!(config.log_filter, "sheetd=info");
    }

    #[test]
    fn test_bad_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheetd.toml");
        std::fs::write(&path, "default_name = [").unwrap();

        assert!(matches!(Config::load(Some(&path)), Err(SheetError::Config(_))));
    }
}
