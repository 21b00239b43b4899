//! Runtime settings.
//!
//! Resolution order, highest first: command-line flag, environment variable
//! (handled by clap's `env`), TOML file, built-in default.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PERSON_FILE: &str = "data/person.txt";
pub const DEFAULT_RELATIONSHIP_FILE: &str = "data/relationship.txt";
pub const DEFAULT_MAX_MEMORY_MB: u32 = 4096;
const MIN_MEMORY_MB: u32 = 64;
const MAX_MEMORY_MB: u32 = 131_072; // 128 GB

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Person dataset: `<id>\t<name>` per line.
    pub person_file: PathBuf,

    /// Relationship dataset: `<id>:<id>,<id>,...` per line.
    pub relationship_file: PathBuf,

    /// Load fails if the store's approximate footprint exceeds this.
    pub max_memory_mb: u32,

    /// Worker threads for the min/max fan-out. `None` leaves rayon's default.
    pub workers: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            person_file: PathBuf::from(DEFAULT_PERSON_FILE),
            relationship_file: PathBuf::from(DEFAULT_RELATIONSHIP_FILE),
            max_memory_mb: DEFAULT_MAX_MEMORY_MB,
            workers: None,
        }
    }
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub person_file: Option<PathBuf>,
    pub relationship_file: Option<PathBuf>,
    pub max_memory_mb: Option<u32>,
    pub workers: Option<usize>,
}

impl Settings {
    /// Defaults, then the TOML file (if given), then overrides.
    pub fn resolve(config_path: Option<&Path>, overrides: &Overrides) -> anyhow::Result<Self> {
        let mut settings = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply(overrides);
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    fn apply(&mut self, overrides: &Overrides) {
        if let Some(p) = &overrides.person_file {
            self.person_file = p.clone();
        }
        if let Some(p) = &overrides.relationship_file {
            self.relationship_file = p.clone();
        }
        if let Some(mb) = overrides.max_memory_mb {
            self.max_memory_mb = mb;
        }
        if overrides.workers.is_some() {
            self.workers = overrides.workers;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(MIN_MEMORY_MB..=MAX_MEMORY_MB).contains(&self.max_memory_mb) {
            bail!(
                "max_memory_mb must be between {} and {}, got {}",
                MIN_MEMORY_MB,
                MAX_MEMORY_MB,
                self.max_memory_mb
            );
        }
        if self.workers == Some(0) {
            bail!("workers must be at least 1");
        }
        Ok(())
    }
}
