//! TOML configuration: default loop variables, collection, logging and field map.
//!
//! Precedence: CLI > env > config files > defaults. Config files are searched in
//! order (explicit path, `AQLFILTER_CONFIG`, `<config dir>/aqlfilter.toml`,
//! `./aqlfilter.toml`); for each key the first file that sets it wins.

use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::FilterError;
use crate::query::FieldMap;

pub const DEFAULT_DOC_VAR: &str = "doc";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub doc_var: Option<String>,
    pub vert_var: Option<String>,
    pub collection: Option<String>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
    #[serde(default)]
    pub fields: FieldMap,
}

impl FilterConfig {
    /// # Errors
    /// Returns `FilterError::Config` if `s` is not a valid config document.
    pub fn from_toml_str(s: &str) -> Result<Self, FilterError> {
        toml::from_str(s).map_err(|e| FilterError::Config(e.to_string()))
    }

    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, FilterError> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| FilterError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&s)
    }

    /// Fill keys still unset from `other`.
    pub fn merge_missing(&mut self, other: Self) {
        if self.doc_var.is_none() {
            self.doc_var = other.doc_var;
        }
        if self.vert_var.is_none() {
            self.vert_var = other.vert_var;
        }
        if self.collection.is_none() {
            self.collection = other.collection;
        }
        if self.log_level.is_none() {
            self.log_level = other.log_level;
        }
        if self.log_dir.is_none() {
            self.log_dir = other.log_dir;
        }
        self.fields.merge_missing(&other.fields);
    }

    /// Environment values override whatever the files set.
    pub fn apply_env<F: Fn(&str) -> Option<String>>(&mut self, env: F) {
        if let Some(v) = env("AQLFILTER_DOC_VAR") {
            self.doc_var = Some(v);
        }
        if let Some(v) = env("AQLFILTER_VERT_VAR") {
            self.vert_var = Some(v);
        }
        if let Some(v) = env("AQLFILTER_COLLECTION") {
            self.collection = Some(v);
        }
        if let Some(v) = env("AQLFILTER_LOG_LEVEL") {
            self.log_level = Some(v);
        }
        if let Some(v) = env("AQLFILTER_LOG_DIR") {
            self.log_dir = Some(PathBuf::from(v));
        }
    }

    #[must_use]
    pub fn doc_var(&self) -> &str {
        self.doc_var.as_deref().unwrap_or(DEFAULT_DOC_VAR)
    }
}

fn discovered_paths<F: Fn(&str) -> Option<String>>(env: &F) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(p) = env("AQLFILTER_CONFIG") {
        paths.push(PathBuf::from(p));
    }
    if let Some(dir) = dirs_next::config_dir() {
        paths.push(dir.join("aqlfilter.toml"));
    }
    if let Ok(cur) = std::env::current_dir() {
        paths.push(cur.join("aqlfilter.toml"));
    }
    paths
}

/// Loads configuration with an explicit environment lookup.
///
/// # Errors
/// Returns an error if `explicit` is given and cannot be read or parsed.
pub fn load_config_with<F: Fn(&str) -> Option<String>>(
    explicit: Option<&Path>,
    search: &[PathBuf],
    env: F,
) -> Result<FilterConfig, FilterError> {
    let mut cfg = match explicit {
        Some(p) => FilterConfig::from_file(p)?,
        None => FilterConfig::default(),
    };
    for p in search.iter().filter(|p| p.exists()) {
        match FilterConfig::from_file(p) {
            Ok(file_cfg) => cfg.merge_missing(file_cfg),
            Err(e) => warn!("skipping config {}: {e}", p.display()),
        }
    }
    cfg.apply_env(env);
    Ok(cfg)
}

/// Loads configuration from the standard locations and the process environment.
///
/// # Errors
/// Returns an error if `explicit` is given and cannot be read or parsed.
pub fn load_config(explicit: Option<&Path>) -> Result<FilterConfig, FilterError> {
    let env = |k: &str| std::env::var(k).ok();
    let search = discovered_paths(&env);
    load_config_with(explicit, &search, env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_field_table() {
        let cfg = FilterConfig::from_toml_str(
            "doc_var = \"d\"\n[fields]\nsport = \"sports\"\nemail = \"email\"\n",
        )
        .unwrap();
        assert_eq!(cfg.doc_var(), "d");
        assert_eq!(cfg.fields.get("sport"), Some("sports"));
        assert_eq!(cfg.fields.len(), 2);
    }

    #[test]
    fn defaults_to_doc() {
        assert_eq!(FilterConfig::default().doc_var(), DEFAULT_DOC_VAR);
    }

    #[test]
    fn env_beats_files() {
        let mut cfg = FilterConfig { doc_var: Some("file".into()), ..Default::default() };
        cfg.apply_env(|k| (k == "AQLFILTER_DOC_VAR").then(|| "env".to_string()));
        assert_eq!(cfg.doc_var(), "env");
        assert!(cfg.vert_var.is_none());
    }

    #[test]
    fn malformed_toml_is_config_error() {
        assert!(matches!(FilterConfig::from_toml_str("doc_var = "), Err(FilterError::Config(_))));
    }
}
