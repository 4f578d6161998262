use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Root directory for theater snapshots, one subdirectory per event
    pub data_dir: PathBuf,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool { true }

const DEFAULT_DATA_DIR: &str = "data";

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            enabled: default_enabled(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// `tracing` filter directives, used when `RUST_LOG` is unset
    pub filter: Option<String>,
}

impl Config {
    /// Load configuration with `base` as the directory holding `config/`.
    pub fn load_from(base: &Path) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let file = |name: &str| {
            let path = base.join("config").join(name);
            config::File::with_name(&path.to_string_lossy()).required(false)
        };

        let s = config::Config::builder()
            .set_default("storage.data_dir", DEFAULT_DATA_DIR)?
            .set_default("storage.enabled", default_enabled())?
            // Every file is optional; the defaults above are enough to run
            .add_source(file("default"))
            .add_source(file(&run_mode))
            // Local overrides, not checked in
            .add_source(file("local"))
            // Eg. `BOXOFFICE__STORAGE__DATA_DIR=/var/lib/boxoffice`
            .add_source(config::Environment::with_prefix("BOXOFFICE").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Load from the working directory. A bad source falls back to the built-in defaults.
    /// The error is handed back so it can be logged once tracing is up.
    pub fn load_or_default() -> (Self, Option<config::ConfigError>) {
        Self::load_from_or_default(Path::new("."))
    }

    pub fn load_from_or_default(base: &Path) -> (Self, Option<config::ConfigError>) {
        match Self::load_from(base) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
}
