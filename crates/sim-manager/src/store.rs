//! Filesystem-backed simulation store.
//!
//! Every simulation is a directory directly under the store root:
//!
//! ```text
//! <root>/<name>/date.txt     single-line display date, e.g. "January 1, 2024"
//! <root>/<name>/stats/*.csv  seeded from the stats templates at creation
//! ```
//!
//! Names are confined to a single path segment (see [`SimName`]) before any
//! filesystem call, so no operation can reach outside the root.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Datelike;
use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};
use crate::seeder::seed_stats;

/// Name of the date marker file inside a simulation directory
pub const DATE_FILE: &str = "date.txt";

/// Name of the stats sub-directory inside a simulation directory
pub const STATS_DIR: &str = "stats";

/// Returned by [`SimulationStore::date`] when no marker can be read
pub const DATE_NOT_FOUND: &str = "Date not found";

const MAX_NAME_LEN: usize = 64;

/// A simulation name that is safe to use as one path segment.
///
/// Accepts ASCII letters, digits, `-` and `_`, up to 64 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimName(String);

impl SimName {
    /// Validates `raw`, returning [`StoreError::InvalidName`] when it could
    /// name anything other than one entry directly under the root.
    pub fn parse(raw: &str) -> Result<Self> {
        let valid = !raw.is_empty()
            && raw.len() <= MAX_NAME_LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');

        if valid {
            Ok(SimName(raw.to_string()))
        } else {
            Err(StoreError::InvalidName(raw.to_string()))
        }
    }

    /// The validated name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SimName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The initial in-simulation date for a simulation created in `year`
pub fn initial_date(year: i32) -> String {
    format!("January 1, {year}")
}

/// Owns the directory tree under a single store root.
#[derive(Debug, Clone)]
pub struct SimulationStore {
    root: PathBuf,
    stats_templates: PathBuf,
}

impl SimulationStore {
    /// Opens the store, creating `root` if it does not exist yet.
    ///
    /// `stats_templates` may point at a missing directory; new simulations
    /// then start with an empty stats folder.
    pub fn open(root: impl Into<PathBuf>, stats_templates: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| StoreError::io(&root, e))?;

        Ok(Self {
            root,
            stats_templates: stats_templates.into(),
        })
    }

    /// Directory holding one sub-directory per simulation
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory the stats folder of each new simulation is seeded from
    pub fn stats_templates(&self) -> &Path {
        &self.stats_templates
    }

    fn sim_path(&self, name: &SimName) -> PathBuf {
        self.root.join(name.as_str())
    }

    /// Names of every immediate sub-directory of the root, sorted.
    ///
    /// Directory contents are not inspected; entries whose names are not
    /// valid UTF-8 are skipped.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.root).map_err(|e| StoreError::io(&self.root, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&self.root, e))?;
            if !entry.path().is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => debug!("Skipping non UTF-8 entry {raw:?}"),
            }
        }

        names.sort();
        Ok(names)
    }

    /// True if `name` is a valid name with a directory under the root.
    pub fn exists(&self, name: &str) -> bool {
        SimName::parse(name)
            .map(|name| self.sim_path(&name).is_dir())
            .unwrap_or(false)
    }

    /// Creates a simulation dated January 1 of the current local year.
    pub fn create(&self, name: &str) -> Result<SimName> {
        self.create_in_year(name, chrono::Local::now().year())
    }

    /// Creates a simulation whose marker reads January 1 of `year`.
    ///
    /// The directory is created with a single call that fails when the
    /// entry already exists, so two concurrent creates of one name cannot
    /// both succeed. Nothing is rolled back if writing the marker or seeding
    /// the stats folder fails afterwards.
    pub fn create_in_year(&self, name: &str, year: i32) -> Result<SimName> {
        let name = SimName::parse(name)?;
        let sim_path = self.sim_path(&name);

        match fs::create_dir(&sim_path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(StoreError::AlreadyExists(name.to_string()));
            }
            Err(e) => return Err(StoreError::io(&sim_path, e)),
        }

        if let Err(err) = self.populate(&sim_path, year) {
            warn!("Simulation {name} left partially created: {err}");
            return Err(err);
        }

        info!("Created simulation {name}");
        Ok(name)
    }

    fn populate(&self, sim_path: &Path, year: i32) -> Result<()> {
        let date_path = sim_path.join(DATE_FILE);
        fs::write(&date_path, initial_date(year)).map_err(|e| StoreError::io(&date_path, e))?;

        let stats_path = sim_path.join(STATS_DIR);
        fs::create_dir(&stats_path).map_err(|e| StoreError::io(&stats_path, e))?;

        seed_stats(&self.stats_templates, &stats_path)?;
        Ok(())
    }

    /// Recursively removes a simulation.
    ///
    /// Returns `Ok(false)` when there was nothing to delete, including for
    /// names that could never exist under the root.
    pub fn delete(&self, name: &str) -> Result<bool> {
        let Ok(name) = SimName::parse(name) else {
            warn!("Ignoring delete of invalid simulation name {name:?}");
            return Ok(false);
        };

        let sim_path = self.sim_path(&name);
        if !sim_path.is_dir() {
            return Ok(false);
        }

        match fs::remove_dir_all(&sim_path) {
            Ok(()) => {
                info!("Deleted simulation {name}");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io(&sim_path, e)),
        }
    }

    /// The current in-simulation date, or [`DATE_NOT_FOUND`].
    pub fn date(&self, name: &str) -> String {
        let Ok(name) = SimName::parse(name) else {
            return DATE_NOT_FOUND.to_string();
        };

        let date_path = self.sim_path(&name).join(DATE_FILE);
        match fs::read_to_string(&date_path) {
            Ok(date) => date.trim().to_string(),
            Err(err) => {
                debug!("No date marker at {}: {err}", date_path.display());
                DATE_NOT_FOUND.to_string()
            }
        }
    }
}
