//! Environment configuration loading

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use self::constants::{DEFAULT_CONFIG_PATH, DEFAULT_CULTURE, DEFAULT_LISTEN_ADDRESS, DEFAULT_SHELL};

/// Environment configuration
#[derive(Clone, Debug)]
pub struct EnvConfig {
    /// Address/port to listen on
    pub listen_address: String,
    /// Path of the JSON config file
    pub config_path: String,
    /// Interpreter used to run deploy scripts
    pub shell: String,
    /// Directory for transient scripts (system temp dir when unset)
    pub script_dir: Option<PathBuf>,
    /// Wall-clock limit for one script run (unbounded when unset)
    pub script_timeout: Option<Duration>,
    /// Culture every localization falls back to
    pub default_culture: String,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        // Legacy ALEXAOPS_* names are still honoured
        let listen_address = load_with_fallback("VOICEOPS_LISTEN_ADDRESS", "ALEXAOPS_LISTEN_ADDRESS")
            .map(|v| normalize_address(&v))
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDRESS.to_string());

        let config_path = load_with_fallback("VOICEOPS_CONFIG", "ALEXAOPS_CONFIG")
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        if env::var("ALEXAOPS_LISTEN_ADDRESS").is_ok() || env::var("ALEXAOPS_CONFIG").is_ok() {
            warn!("Deprecated environment variables detected. Please use VOICEOPS_LISTEN_ADDRESS and VOICEOPS_CONFIG");
        }

        let shell = env::var("VOICEOPS_SHELL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SHELL.to_string());

        let script_dir = env::var("VOICEOPS_SCRIPT_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let script_timeout = env::var("VOICEOPS_SCRIPT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let default_culture = env::var("VOICEOPS_DEFAULT_CULTURE")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_CULTURE.to_string());

        Self {
            listen_address,
            config_path,
            shell,
            script_dir,
            script_timeout,
            default_culture,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            listen_address: DEFAULT_LISTEN_ADDRESS.to_string(),
            config_path: DEFAULT_CONFIG_PATH.to_string(),
            shell: DEFAULT_SHELL.to_string(),
            script_dir: None,
            script_timeout: None,
            default_culture: DEFAULT_CULTURE.to_string(),
        }
    }
}

/// ":33011" means all interfaces
pub fn normalize_address(address: &str) -> String {
    if address.starts_with(':') {
        format!("0.0.0.0{}", address)
    } else {
        address.to_string()
    }
}

/// Load an environment variable, falling back to a second name
fn load_with_fallback(primary: &str, fallback: &str) -> Option<String> {
    env::var(primary).ok().or_else(|| env::var(fallback).ok())
}

/// Constants
pub mod constants {
    pub const SERVICE_NAME: &str = "voiceops-gateway";

    pub const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0:33011";

    pub const DEFAULT_CONFIG_PATH: &str = "alexaops.conf";

    pub const DEFAULT_SHELL: &str = "sh";

    pub const CULTURE_ENGLISH: &str = "en";

    pub const CULTURE_GERMAN: &str = "de";

    pub const DEFAULT_CULTURE: &str = CULTURE_ENGLISH;

    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}
