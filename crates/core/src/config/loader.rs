//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::path::{Path, PathBuf};

/// Loaded configuration and where it came from
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed settings
    pub schema: ConfigSchema,
    /// File the settings were read from, if any
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `path`, or from the first standard location
    /// that exists, or fall back to defaults.
    ///
    /// An explicit path that does not exist is an error; a missing file in
    /// the standard locations is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let schema = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };
        schema.validate()?;

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let schema: ConfigSchema = toml::from_str(content)?;
        schema.validate()?;
        Ok(Self { schema, path: None })
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    ["sportspot.toml", ".sportspot.toml", ".config/sportspot.toml"]
        .into_iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .context(format!("reading config file {}", path.display()))?;

    toml::from_str(&content).context(format!("parsing config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.search.list_limit, 30);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[search]\nnearby_radius_km = 2.5\n\n[location]\nlatitude = 13.75\nlongitude = 100.5"
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.schema.search.nearby_radius_km, 2.5);
        assert_eq!(config.schema.search.suggestion_limit, 5);
        assert_eq!(config.schema.location.latitude, Some(13.75));
        assert_eq!(config.path.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_parse_error_carries_context() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[search\nbroken").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
        assert!(err.context.unwrap().contains("parsing config file"));
    }

    #[test]
    fn test_validation_runs_on_load() {
        let err = Config::from_toml("[search]\nlist_limit = 0").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfigValue);
    }
}
