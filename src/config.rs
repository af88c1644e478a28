use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::smart::ControllerId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub arcconf: ArcconfConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcconfConfig {
    /// Executable name (looked up on PATH) or absolute path to arcconf
    pub path: String,
    /// Audit only these controllers instead of asking GETVERSION. Empty = all.
    pub controllers: Vec<ControllerId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub format: ReportFormat,
    /// Print the hex attribute code next to its name
    pub show_codes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Text,
    Json,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for ArcconfConfig {
    fn default() -> Self {
        Self { path: "arcconf".into(), controllers: Vec::new() }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { format: ReportFormat::Text, show_codes: true }
    }
}

// ── Load ──────────────────────────────────────────────────────────────

impl Config {
    /// Load from the default location. A missing file means defaults; an
    /// unreadable or invalid one is logged and also falls back to defaults.
    pub fn load() -> Self {
        let path = match Self::config_path() {
            Some(p) => p,
            None    => return Config::default(),
        };
        if !path.exists() {
            return Config::default();
        }
        match Self::load_from(&path) {
            Ok(c)  => c,
            Err(e) => {
                log::warn!("ignoring config: {:#}", e);
                Config::default()
            }
        }
    }

    /// Load from an explicit path; any failure is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("arcsmart").join("arcsmart.toml"))
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let cfg = Config::parse("[arcconf]\npath = \"/opt/arcconf/arcconf\"\n").unwrap();
        assert_eq!(cfg.arcconf.path, "/opt/arcconf/arcconf");
        assert!(cfg.arcconf.controllers.is_empty());
        assert_eq!(cfg.report, ReportConfig::default());
    }

    #[test]
    fn full_file() {
        let cfg = Config::parse(
            "[arcconf]\ncontrollers = [1, 3]\n\n[report]\nformat = \"json\"\nshow_codes = false\n",
        ).unwrap();
        assert_eq!(cfg.arcconf.controllers, vec![1, 3]);
        assert_eq!(cfg.report.format, ReportFormat::Json);
        assert!(!cfg.report.show_codes);
    }

    #[test]
    fn bad_format_is_rejected() {
        assert!(Config::parse("[report]\nformat = \"yaml\"\n").is_err());
    }

    #[test]
    fn load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "[arcconf]\npath = \"arcconf.exe\"").unwrap();
        let cfg = Config::load_from(f.path()).unwrap();
        assert_eq!(cfg.arcconf.path, "arcconf.exe");
    }

    #[test]
    fn load_from_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(format!("{:#}", err).contains("reading"));
    }

    #[test]
    fn serialized_defaults_parse_back() {
        let text = Config::default().to_toml().unwrap();
        assert_eq!(Config::parse(&text).unwrap(), Config::default());
    }
}
