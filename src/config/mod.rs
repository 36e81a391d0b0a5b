//! Configuration management for Confluence.
//!
//! Configuration is read from `--config <path>` when given, otherwise from
//! `~/.config/confluence/config.toml`. If the default file doesn't exist, a
//! default configuration with comments is created.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub fetch: FetchConfig,
    pub output: OutputConfig,
    pub normalize: NormalizeConfig,
}

/// Every file the stages read or write.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Subscription URLs, one per line
    pub subscribe: PathBuf,
    /// Curated list that wins over everything else
    pub user_result: PathBuf,
    pub local_source: PathBuf,
    /// Capture stage input
    pub capture_input: PathBuf,
    /// Capture stage output, read back by combine
    pub own_source: PathBuf,
    pub net_source: PathBuf,
    pub all_source: PathBuf,
    pub blacklist: PathBuf,
    pub all_source_cleaned: PathBuf,
    /// Alias dictionary (`[channel]:alt1,alt2`)
    pub aliases: PathBuf,
    pub channels_dir: PathBuf,
    pub whitelist: PathBuf,
    pub user_template: PathBuf,
    pub final_result: PathBuf,
}

impl PathsConfig {
    /// Standard `config/` + `output/` layout below `root`.
    pub fn under(root: &Path) -> Self {
        let config = root.join("config");
        let output = root.join("output");
        Self {
            subscribe: config.join("subscribe.txt"),
            user_result: config.join("user_result.txt"),
            local_source: config.join("localsource.txt"),
            capture_input: config.join("channels.txt"),
            own_source: output.join("ownsource.txt"),
            net_source: output.join("netsource.txt"),
            all_source: output.join("allsource.txt"),
            blacklist: config.join("blacklist.txt"),
            all_source_cleaned: output.join("allsourcecleaned.txt"),
            aliases: config.join("othernames.txt"),
            channels_dir: output.join("channels"),
            whitelist: config.join("whitelist.txt"),
            user_template: config.join("user_demo.txt"),
            final_result: output.join("new_result.txt"),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self::under(Path::new(""))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-subscription timeout in seconds (default: 10)
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: format!("confluence/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Records serialized per write (default: 50000)
    pub chunk_size: usize,
    /// Encoding label for regular output (default: utf-8)
    pub encoding: String,
    /// Encoding label for the `_log.txt` dump written after a failure
    pub fallback_encoding: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            chunk_size: 50_000,
            encoding: "utf-8".to_string(),
            fallback_encoding: "gbk".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Substrings removed from channel names, in order
    pub cosmetic_tokens: Vec<String>,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            cosmetic_tokens: DEFAULT_COSMETIC_TOKENS
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

/// Longer and bracketed forms come before the bare tokens they contain.
pub const DEFAULT_COSMETIC_TOKENS: &[&str] = &[
    "「IPV6」", "[IPV6]", "(IPV6)", "IPV6", "IPv6",
    "[超高清]", "[超清]", "[高清]", "[标清]", "(超清)", "(高清)", "(标清)",
    "超高清", "超清", "高清", "标清", "蓝光",
    "[HD]", "(HD)", "HD",
    "[1080P]", "1080P", "1080p", "[720P]", "720P", "720p",
    "「", "」", "★", "☆", "◆", "●",
];

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default path is used
    /// and created with commented defaults if missing. Missing fields use
    /// default values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default_path = Self::default_config_path()?;
                if !default_path.exists() {
                    Self::create_default_config(&default_path)?;
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/confluence/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("confluence").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# Confluence Configuration
#
# Relative paths are resolved against the working directory the
# pipeline is started from.

[paths]
subscribe = "config/subscribe.txt"
user_result = "config/user_result.txt"
local_source = "config/localsource.txt"
capture_input = "config/channels.txt"
own_source = "output/ownsource.txt"
net_source = "output/netsource.txt"
all_source = "output/allsource.txt"
blacklist = "config/blacklist.txt"
all_source_cleaned = "output/allsourcecleaned.txt"
aliases = "config/othernames.txt"
channels_dir = "output/channels"
whitelist = "config/whitelist.txt"
user_template = "config/user_demo.txt"
final_result = "output/new_result.txt"

[fetch]
# Per-subscription timeout in seconds
timeout_secs = 10

[output]
# Records written per chunk
chunk_size = 50000

# WHATWG encoding labels (utf-8, gbk, gb18030, big5, ...)
encoding = "utf-8"

# Used for the *_log.txt dump when a regular write fails.
# Characters it cannot represent are replaced.
fallback_encoding = "gbk"

[normalize]
# Removed from channel names in this order, so list longer tokens
# before the shorter ones they contain.
cosmetic_tokens = [
    "「IPV6」", "[IPV6]", "(IPV6)", "IPV6", "IPv6",
    "[超高清]", "[超清]", "[高清]", "[标清]", "(超清)", "(高清)", "(标清)",
    "超高清", "超清", "高清", "标清", "蓝光",
    "[HD]", "(HD)", "HD",
    "[1080P]", "1080P", "1080p", "[720P]", "720P", "720p",
    "「", "」", "★", "☆", "◆", "●",
]
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Unknown encoding label: {0}")]
    UnknownEncoding(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config.paths, PathsConfig::default());
        assert_eq!(config.fetch.timeout_secs, 10);
        assert_eq!(config.output.chunk_size, 50_000);
        assert_eq!(config.output.encoding, "utf-8");
        assert_eq!(
            config.normalize.cosmetic_tokens,
            NormalizeConfig::default().cosmetic_tokens
        );
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[output]
chunk_size = 10

[paths]
subscribe = "elsewhere/subs.txt"
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.output.chunk_size, 10);
        assert_eq!(config.output.fallback_encoding, "gbk");
        assert_eq!(config.paths.subscribe, PathBuf::from("elsewhere/subs.txt"));
        assert_eq!(
            config.paths.all_source,
            PathBuf::from("output").join("allsource.txt")
        );
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");

        assert_eq!(config.fetch.timeout(), Duration::from_secs(10));
        assert!(config.fetch.user_agent.starts_with("confluence/"));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("confluence.toml");
        fs::write(&path, "[fetch]\ntimeout_secs = 3\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.fetch.timeout_secs, 3);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_paths_under_root() {
        let paths = PathsConfig::under(Path::new("/srv/iptv"));
        assert_eq!(paths.net_source, PathBuf::from("/srv/iptv/output/netsource.txt"));
        assert_eq!(paths.aliases, PathBuf::from("/srv/iptv/config/othernames.txt"));
    }
}
