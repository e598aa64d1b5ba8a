use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ConfigError, Result};

pub const DEFAULT_ARCHITECTURES: &[&str] = &["x86_64", "aarch64"];
pub const DEFAULT_STATUS_HOST: &str = "apk.cgr.dev";
pub const DEFAULT_STATUS_REPOSITORY: &str = "__";

/// Application's configuration
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Authoritative list of supported package architectures.
    /// Default: ["x86_64", "aarch64"]
    pub architectures: Vec<String>,

    /// Placeholder registry host used when deriving status digests.
    /// Default: apk.cgr.dev
    pub status_host: Option<String>,

    /// Placeholder repository used when deriving status digests.
    /// Default: __
    pub status_repository: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

/// Returns the path of the configuration file.
///
/// `APKRECON_CONFIG` takes precedence, then `$XDG_CONFIG_HOME/apkrecon/config.toml`,
/// then `$HOME/.config/apkrecon/config.toml`.
pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("APKRECON_CONFIG") {
        return PathBuf::from(path);
    }
    xdg_config_home().join("apkrecon").join("config.toml")
}

fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            std::env::var("HOME")
                .map(PathBuf::from)
                .unwrap_or_default()
                .join(".config")
        })
}

impl Config {
    pub fn default_config() -> Self {
        Self {
            architectures: DEFAULT_ARCHITECTURES.iter().map(|a| a.to_string()).collect(),
            status_host: Some(DEFAULT_STATUS_HOST.to_string()),
            status_repository: Some(DEFAULT_STATUS_REPOSITORY.to_string()),
        }
    }

    /// Loads the configuration from [`config_path`].
    /// If the configuration file is not found, it uses the default configuration.
    pub fn new() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Loads the configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut config = match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                Self::default_config()
            }
            Err(err) => return Err(ConfigError::IoError(err)),
        };

        config.resolve()?;

        Ok(config)
    }

    pub fn resolve(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var("APKRECON_ARCHITECTURES") {
            self.architectures = value.split(',').map(|a| a.trim().to_string()).collect();
        }

        if self.architectures.is_empty() {
            return Err(ConfigError::NoArchitectures);
        }

        let mut seen = HashSet::new();
        for arch in &self.architectures {
            if arch.trim().is_empty() {
                return Err(ConfigError::BlankArchitecture);
            }
            if !seen.insert(arch.as_str()) {
                return Err(ConfigError::DuplicateArchitecture(arch.clone()));
            }
        }

        self.status_host
            .get_or_insert_with(|| DEFAULT_STATUS_HOST.to_string());
        self.status_repository
            .get_or_insert_with(|| DEFAULT_STATUS_REPOSITORY.to_string());

        Ok(())
    }

    pub fn status_host(&self) -> &str {
        self.status_host.as_deref().unwrap_or(DEFAULT_STATUS_HOST)
    }

    pub fn status_repository(&self) -> &str {
        self.status_repository
            .as_deref()
            .unwrap_or(DEFAULT_STATUS_REPOSITORY)
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let serialized = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serialized)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// Writes the default configuration to `path`, refusing to overwrite an
/// existing file.
pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if path.exists() {
        return Err(ConfigError::ConfigAlreadyExists);
    }

    Config::default_config().save_to(path)
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;
    use crate::test_utils::with_env;

    #[test]
    fn test_default_config_creation() {
        let config = Config::default_config();

        assert_eq!(config.architectures, vec!["x86_64", "aarch64"]);
        assert_eq!(config.status_host(), "apk.cgr.dev");
        assert_eq!(config.status_repository(), "__");
    }

    #[test]
    #[serial]
    fn test_config_resolve_empty_architectures() {
        with_env(vec![("APKRECON_ARCHITECTURES", None)], || {
            let mut config = Config::default_config();
            config.architectures.clear();

            let result = config.resolve();
            assert!(matches!(result, Err(ConfigError::NoArchitectures)));
        });
    }

    #[test]
    #[serial]
    fn test_config_resolve_blank_architecture() {
        with_env(vec![("APKRECON_ARCHITECTURES", None)], || {
            let mut config = Config::default_config();
            config.architectures.push("  ".to_string());

            let result = config.resolve();
            assert!(matches!(result, Err(ConfigError::BlankArchitecture)));
        });
    }

    #[test]
    #[serial]
    fn test_config_resolve_duplicate_architecture() {
        with_env(vec![("APKRECON_ARCHITECTURES", None)], || {
            let mut config = Config::default_config();
            config.architectures.push("x86_64".to_string());

            let result = config.resolve();
            assert!(
                matches!(result, Err(ConfigError::DuplicateArchitecture(ref a)) if a == "x86_64")
            );
        });
    }

    #[test]
    #[serial]
    fn test_config_resolve_sets_defaults() {
        with_env(vec![("APKRECON_ARCHITECTURES", None)], || {
            let mut config = Config::default_config();
            config.status_host = None;
            config.status_repository = None;

            config.resolve().unwrap();

            assert_eq!(config.status_host.as_deref(), Some("apk.cgr.dev"));
            assert_eq!(config.status_repository.as_deref(), Some("__"));
        });
    }

    #[test]
    #[serial]
    fn test_architectures_env_override() {
        with_env(vec![("APKRECON_ARCHITECTURES", Some("riscv64, x86_64"))], || {
            let mut config = Config::default_config();
            config.resolve().unwrap();
            assert_eq!(config.architectures, vec!["riscv64", "x86_64"]);
        });
    }

    #[test]
    #[serial]
    fn test_load_missing_file_uses_defaults() {
        with_env(vec![("APKRECON_ARCHITECTURES", None)], || {
            let dir = tempfile::tempdir().unwrap();
            let config = Config::load_from(dir.path().join("config.toml")).unwrap();
            assert_eq!(config, Config::default_config());
        });
    }

    #[test]
    #[serial]
    fn test_load_from_file() {
        with_env(vec![("APKRECON_ARCHITECTURES", None)], || {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("config.toml");
            fs::write(&path, "architectures = [\"x86_64\"]\n").unwrap();

            let config = Config::load_from(&path).unwrap();
            assert_eq!(config.architectures, vec!["x86_64"]);
            assert_eq!(config.status_host(), "apk.cgr.dev");
        });
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "architectures = x86_64").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::TomlDeError(_))));
    }

    #[test]
    #[serial]
    fn test_generate_default_config() {
        with_env(vec![("APKRECON_ARCHITECTURES", None)], || {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("nested").join("config.toml");

            generate_default_config(&path).unwrap();
            assert_eq!(
                Config::load_from(&path).unwrap(),
                Config::default_config()
            );

            let again = generate_default_config(&path);
            assert!(matches!(again, Err(ConfigError::ConfigAlreadyExists)));
        });
    }

    #[test]
    #[serial]
    fn test_config_path_env_override() {
        with_env(vec![("APKRECON_CONFIG", Some("/custom/apkrecon.toml"))], || {
            assert_eq!(config_path(), PathBuf::from("/custom/apkrecon.toml"));
        });
    }

    #[test]
    #[serial]
    fn test_config_path_xdg() {
        with_env(
            vec![
                ("APKRECON_CONFIG", None),
                ("XDG_CONFIG_HOME", Some("/tmp/xdg")),
            ],
            || {
                assert_eq!(
                    config_path(),
                    PathBuf::from("/tmp/xdg/apkrecon/config.toml")
                );
            },
        );
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default_config();
        let serialized = toml::to_string(&config).unwrap();

        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized, config);
    }
}
