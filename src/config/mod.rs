use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const ENV_DATABASE: &str = "POPPY_DATABASE";
pub const ENV_BIND: &str = "POPPY_BIND";
pub const ENV_LOG: &str = "POPPY_LOG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            bind: default_bind(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory (`~/.poppy`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".poppy")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("poppy.conf")
    }

    /// Return the default path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("poppy.sqlite")
    }

    /// Load the configuration once at process start: the config file (or
    /// defaults when it is missing), then environment overrides.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file(), |key| env::var(key).ok())
    }

    pub fn load_from<F>(path: &Path, env_lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = if path.exists() {
            let content = fs::read_to_string(path)?;
            serde_yaml::from_str(&content)?
        } else {
            Config::default()
        };

        cfg.apply_env(env_lookup);
        Ok(cfg)
    }

    fn apply_env<F>(&mut self, env_lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| env_lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(db) = non_empty(ENV_DATABASE) {
            self.database = db;
        }
        if let Some(bind) = non_empty(ENV_BIND) {
            self.bind = bind;
        }
        if let Some(level) = non_empty(ENV_LOG) {
            self.log_level = level;
        }
    }

    /// Database location with `~/` expanded.
    pub fn database_path(&self) -> String {
        expand_tilde(&self.database).to_string_lossy().to_string()
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Initialize configuration and database files.
    /// Returns the configuration that was written (or would be, in test mode).
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => {
                let p = PathBuf::from(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(config.to_yaml()?.as_bytes())?;
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::Config(format!("{}: {}", parent.display(), e)))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.conf"), no_env).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.bind, "127.0.0.1:8000");
        assert_eq!(cfg.log_level, "warn");
    }

    #[test]
    fn file_values_are_read_and_optional_fields_defaulted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("poppy.conf");
        fs::write(&path, "database: /tmp/events.sqlite\n").unwrap();

        let cfg = Config::load_from(&path, no_env).unwrap();
        assert_eq!(cfg.database, "/tmp/events.sqlite");
        assert_eq!(cfg.bind, default_bind());
    }

    #[test]
    fn env_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("poppy.conf");
        fs::write(&path, "database: /tmp/a.sqlite\nbind: 0.0.0.0:1\nlog_level: info\n").unwrap();

        let env: HashMap<&str, &str> = [
            (ENV_DATABASE, "/tmp/b.sqlite"),
            (ENV_LOG, "debug"),
            (ENV_BIND, "  "),
        ]
        .into_iter()
        .collect();

        let cfg = Config::load_from(&path, |k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(cfg.database, "/tmp/b.sqlite");
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.bind, "0.0.0.0:1");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("poppy.conf");
        fs::write(&path, "database: [unclosed\n").unwrap();
        assert!(matches!(
            Config::load_from(&path, no_env),
            Err(AppError::ConfigParse(_))
        ));
    }

    #[test]
    fn yaml_round_trip() {
        let cfg = Config::default();
        let back: Config = serde_yaml::from_str(&cfg.to_yaml().unwrap()).unwrap();
        assert_eq!(back, cfg);
    }
}
