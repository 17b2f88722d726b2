use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::correlator::StatusMatcher;

/// Config file name searched for in the working directory (walking up) and
/// in ~/.config/rendez/.
const CONFIG_FILE: &str = "rendez.toml";

static SHARED: Lazy<HarnessConfig> = Lazy::new(|| HarnessConfig::find_and_load().unwrap_or_default());

/// Harness-wide defaults plus named environments.
///
/// ```toml
/// [correlator]
/// timeout_secs = 30
/// accepted_statuses = [200]
///
/// [environments.staging]
/// base_url = "https://staging.health.example.com"
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct HarnessConfig {
    #[serde(default)]
    pub correlator: CorrelatorConfig,

    #[serde(default)]
    pub environments: HashMap<String, Environment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorrelatorConfig {
    /// Default capture timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Default set of acceptable status codes; empty means "any"
    #[serde(default = "default_statuses")]
    pub accepted_statuses: Vec<u16>,
}

impl Default for CorrelatorConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            accepted_statuses: default_statuses(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_statuses() -> Vec<u16> {
    vec![200]
}

/// One named environment the suite can run against.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Environment {
    pub base_url: String,

    /// Free-form variables (API keys, seeded account emails, ...)
    #[serde(flatten)]
    pub variables: HashMap<String, String>,
}

impl HarnessConfig {
    /// Process-wide configuration, loaded once on first use. Falls back to
    /// defaults when no config file is found.
    pub fn shared() -> &'static HarnessConfig {
        &SHARED
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Search order:
    /// 1. current directory, then parent directories
    /// 2. ~/.config/rendez/
    pub fn find_and_load() -> Option<Self> {
        if let Some(config) = Self::try_load_from_current_dir() {
            return Some(config);
        }

        Self::try_load_from_user_dir()
    }

    fn try_load_from_current_dir() -> Option<Self> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let config_path = current.join(CONFIG_FILE);
            if config_path.exists() {
                return Self::load_from_path(&config_path).ok();
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    fn try_load_from_user_dir() -> Option<Self> {
        let home = dirs::home_dir()?;
        let config_path = home.join(".config").join("rendez").join(CONFIG_FILE);

        if config_path.exists() {
            Self::load_from_path(&config_path).ok()
        } else {
            None
        }
    }

    pub fn default_timeout(&self) -> Duration {
        Duration::from_secs(self.correlator.timeout_secs)
    }

    pub fn default_status_matcher(&self) -> StatusMatcher {
        if self.correlator.accepted_statuses.is_empty() {
            StatusMatcher::any()
        } else {
            StatusMatcher::of(self.correlator.accepted_statuses.iter().copied())
        }
    }

    pub fn environment(&self, name: &str) -> Option<&Environment> {
        self.environments.get(name)
    }
}
