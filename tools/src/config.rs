use anyhow::{Context, Result};
use raphson::SolveParams;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings read from `raphson.toml`, every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub x0: f64,
    pub tolerance: f64,
    pub max_iter: usize,
    pub sample_divisions: usize,
    pub sample_from: f64,
    pub sample_to: f64,
    pub history_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let params = SolveParams::default();
        Self {
            x0: params.x0(),
            tolerance: params.tolerance(),
            max_iter: params.max_iter(),
            sample_divisions: 1500,
            sample_from: -10.0,
            sample_to: 10.0,
            history_file: None,
        }
    }
}

impl Config {
    /// A missing file means defaults, a broken one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;
        fs::write(path, content).with_context(|| format!("writing {}", path.display()))
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn params(&self) -> Result<SolveParams> {
        Ok(SolveParams::new(self.x0, self.tolerance, self.max_iter)?)
    }

    pub fn history_path(&self) -> Option<PathBuf> {
        self.history_file
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join(".raphson_history")))
    }
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::parse("x0 = -2.0\nmax_iter = 50\n").unwrap();
        assert_eq!(config.x0, -2.0);
        assert_eq!(config.max_iter, 50);
        assert_eq!(config.tolerance, 0.0001);
        assert_eq!(config.sample_divisions, 1500);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::parse("max_iter = \"many\"").is_err());
        let config = Config::parse("tolerance = -1.0").unwrap();
        assert!(config.params().is_err());
    }

    #[test]
    fn toml_round_trip() {
        let config = Config {
            history_file: Some(PathBuf::from("/tmp/history")),
            ..Config::default()
        };
        assert_eq!(Config::parse(&config.to_toml().unwrap()).unwrap(), config);
    }

    #[test]
    fn missing_file_is_default() {
        let config = Config::load(Path::new("/nonexistent/raphson.toml")).unwrap();
        assert_eq!(config, Config::default());
    }
}
