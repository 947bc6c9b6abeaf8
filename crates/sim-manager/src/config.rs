//! Process-wide configuration, resolved once at start-up.

use std::path::{Path, PathBuf};

/// Directory the crate was built from; the default base for data and assets
pub const INSTALL_DIR: &str = env!("CARGO_MANIFEST_DIR");

/// Immutable paths shared by every component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding one sub-directory per simulation
    pub store_root: PathBuf,
    /// CSV templates copied into each new simulation's stats folder
    pub stats_templates: PathBuf,
    /// Stylesheets and other assets served under `/static`
    pub static_dir: PathBuf,
}

impl AppConfig {
    /// Standard layout below `root`: `sims/`, `templates/Stats_Templates/`, `static/`.
    pub fn from_root(root: &Path) -> Self {
        Self {
            store_root: root.join("sims"),
            stats_templates: root.join("templates").join("Stats_Templates"),
            static_dir: root.join("static"),
        }
    }

    /// Replaces the store root when an override is given.
    pub fn with_store_root(mut self, store_root: Option<PathBuf>) -> Self {
        if let Some(path) = store_root {
            self.store_root = path;
        }
        self
    }

    /// Replaces the stats template directory when an override is given.
    pub fn with_stats_templates(mut self, stats_templates: Option<PathBuf>) -> Self {
        if let Some(path) = stats_templates {
            self.stats_templates = path;
        }
        self
    }

    /// Replaces the static asset directory when an override is given.
    pub fn with_static_dir(mut self, static_dir: Option<PathBuf>) -> Self {
        if let Some(path) = static_dir {
            self.static_dir = path;
        }
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_root(Path::new(INSTALL_DIR))
    }
}
