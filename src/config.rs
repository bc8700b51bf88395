use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::git::SyncOptions;

pub const LOCAL_CONFIG_NAME: &str = "boardedit.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config file found (looked for {})", display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("`{field}` is not set in {}", path.display())]
    MissingSetting { field: &'static str, path: PathBuf },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Where the restore tool re-clones the site repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RestoreSettings {
    pub folder: PathBuf,
    pub repo_url: String,
}

/// Settings for all tools, read from a JSON file.
///
/// The upper-case keys of the older `config_form.json` are accepted as
/// aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    #[serde(alias = "LEADERBOARD_FILE")]
    pub leaderboard_file: PathBuf,
    #[serde(alias = "CONSTANTS_FILE")]
    pub constants_file: PathBuf,
    #[serde(alias = "GIT_REPO_PATH")]
    pub git_repo_path: PathBuf,
    #[serde(alias = "DATE_CONFIG")]
    pub date_file: PathBuf,
    #[serde(default, alias = "SLIDESHOW_FILE")]
    pub slideshow_file: Option<PathBuf>,
    #[serde(default)]
    pub restore: Option<RestoreSettings>,
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
    #[serde(default = "default_remote")]
    pub remote: String,
    #[serde(default = "default_true")]
    pub pull_before_push: bool,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    /// The file these settings were read from.
    #[serde(skip)]
    pub source: PathBuf,
}

fn default_commit_message() -> String {
    "Update leaderboard data".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

const fn default_true() -> bool {
    true
}

impl Settings {
    /// Read settings from `path`, resolving relative paths against the
    /// file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, is not valid JSON,
    /// or lacks a required key.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings: Self =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let base = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        settings.resolve_relative_to(&base);
        settings.source = path.to_path_buf();
        Ok(settings)
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.leaderboard_file);
        resolve(&mut self.constants_file);
        resolve(&mut self.git_repo_path);
        resolve(&mut self.date_file);
        if let Some(p) = self.slideshow_file.as_mut() {
            resolve(p);
        }
        if let Some(r) = self.restore.as_mut() {
            resolve(&mut r.folder);
        }
        if let Some(p) = self.log_file.as_mut() {
            resolve(p);
        }
    }

    /// The slideshow file, required by the slideshow tool only.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSetting`] when it is not configured.
    pub fn slideshow_file(&self) -> Result<&Path, ConfigError> {
        self.slideshow_file
            .as_deref()
            .ok_or_else(|| ConfigError::MissingSetting {
                field: "slideshow_file",
                path: self.source.clone(),
            })
    }

    /// Restore settings, required by the restore tool only.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSetting`] when they are not configured.
    pub fn restore(&self) -> Result<&RestoreSettings, ConfigError> {
        self.restore
            .as_ref()
            .ok_or_else(|| ConfigError::MissingSetting {
                field: "restore",
                path: self.source.clone(),
            })
    }

    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            remote: self.remote.clone(),
            message: self.commit_message.clone(),
            pull_first: self.pull_before_push,
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("boardedit").join("config.json");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("boardedit")
                .join("config.json");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("boardedit").join("config.json");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("boardedit")
                .join("config.json");
        }
    }

    PathBuf::from(LOCAL_CONFIG_NAME)
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(LOCAL_CONFIG_NAME)
}

/// Pick the settings file: an explicit path wins, then the local file,
/// then the global one.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if none of the candidates exist.
pub fn resolve_config_path(
    explicit: Option<&Path>,
    local: &Path,
    global: &Path,
) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    [local, global]
        .into_iter()
        .find(|p| p.exists())
        .map(Path::to_path_buf)
        .ok_or_else(|| ConfigError::NotFound {
            searched: vec![local.to_path_buf(), global.to_path_buf()],
        })
}
