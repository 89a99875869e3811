use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Environment variable naming the data directory
pub const DATA_DIR_ENV: &str = "TICKOFF_DIR";

/// Error type for configuration I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("no data directory: pass -C <dir>, set TICKOFF_DIR, or set HOME")]
    NoDataDir,
}

/// Pick the data directory: explicit flag, then `$TICKOFF_DIR`, then
/// `$HOME/.tickoff`.
pub fn resolve_data_dir(explicit: Option<&str>) -> Result<PathBuf, ConfigError> {
    resolve_data_dir_from(
        explicit,
        std::env::var_os(DATA_DIR_ENV).map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

fn resolve_data_dir_from(
    explicit: Option<&str>,
    env_dir: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = explicit {
        return Ok(PathBuf::from(dir));
    }
    if let Some(dir) = env_dir.filter(|d| !d.as_os_str().is_empty()) {
        return Ok(dir);
    }
    home.filter(|h| !h.as_os_str().is_empty())
        .map(|h| h.join(".tickoff"))
        .ok_or(ConfigError::NoDataDir)
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// Read `config.toml` from the data directory. A missing file means defaults.
pub fn read_config(data_dir: &Path) -> Result<Config, ConfigError> {
    let path = config_path(data_dir);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => return Err(ConfigError::ReadError { path, source: e }),
    };
    Ok(toml::from_str(&text)?)
}

/// Render the effective configuration as TOML
pub fn config_to_toml(config: &Config) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_is_default() {
        let tmp = TempDir::new().unwrap();
        let config = read_config(tmp.path()).unwrap();
        assert_eq!(config.storage.key, "todos");
        assert_eq!(config.ui.notice_secs, 3);
    }

    #[test]
    fn reads_config_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            config_path(tmp.path()),
            "[storage]\nkey = \"work\"\n\n[ui]\nshow_key_hints = false\n",
        )
        .unwrap();
        let config = read_config(tmp.path()).unwrap();
        assert_eq!(config.storage.key, "work");
        assert!(!config.ui.show_key_hints);
        assert_eq!(config.ui.notice_secs, 3);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(config_path(tmp.path()), "[storage\nkey = ").unwrap();
        assert!(matches!(
            read_config(tmp.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn effective_config_round_trips_through_toml() {
        let mut config = Config::default();
        config.ui.colors.insert("highlight".into(), "#00FF00".into());
        let text = config_to_toml(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.storage.key, "todos");
        assert_eq!(back.ui.colors.get("highlight").unwrap(), "#00FF00");
    }

    #[test]
    fn data_dir_precedence() {
        let env = Some(PathBuf::from("/env/dir"));
        let home = Some(PathBuf::from("/home/me"));
        assert_eq!(
            resolve_data_dir_from(Some("/flag"), env.clone(), home.clone()).unwrap(),
            PathBuf::from("/flag")
        );
        assert_eq!(
            resolve_data_dir_from(None, env, home.clone()).unwrap(),
            PathBuf::from("/env/dir")
        );
        assert_eq!(
            resolve_data_dir_from(None, None, home).unwrap(),
            PathBuf::from("/home/me/.tickoff")
        );
        assert!(matches!(
            resolve_data_dir_from(None, Some(PathBuf::new()), None),
            Err(ConfigError::NoDataDir)
        ));
    }
}
