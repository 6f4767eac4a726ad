//! Application configuration for ScriptForge.
//!
//! User config lives at `~/.scriptforge/scriptforge.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, ScriptForgeError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "scriptforge.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".scriptforge";

// ---------------------------------------------------------------------------
// Config structs (matching scriptforge.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Content fetch service settings.
    #[serde(default)]
    pub content: ContentConfig,

    /// Keyword extraction service settings.
    #[serde(default)]
    pub keywords: KeywordsConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Path of the state file holding the content record.
    #[serde(default = "default_state_file")]
    pub state_file: String,

    /// Sentence cap written into new records.
    #[serde(default = "default_maximum_sentences")]
    pub maximum_sentences: i64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            maximum_sentences: default_maximum_sentences(),
        }
    }
}

fn default_state_file() -> String {
    "content.json".into()
}
fn default_maximum_sentences() -> i64 {
    7
}

/// Which service supplies the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentProvider {
    /// MediaWiki Action API plain-text extracts.
    #[default]
    Wikipedia,
    /// Algorithmia `web/WikipediaParser` algorithm.
    Algorithmia,
}

/// `[content]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    #[serde(default)]
    pub provider: ContentProvider,

    /// MediaWiki API endpoint.
    #[serde(default = "default_wikipedia_url")]
    pub wikipedia_url: Url,

    /// Algorithmia API root.
    #[serde(default = "default_algorithmia_url")]
    pub algorithmia_url: Url,

    /// Name of the env var holding the Algorithmia key (never store the key itself).
    #[serde(default = "default_content_api_key_env")]
    pub api_key_env: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            provider: ContentProvider::default(),
            wikipedia_url: default_wikipedia_url(),
            algorithmia_url: default_algorithmia_url(),
            api_key_env: default_content_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_wikipedia_url() -> Url {
    Url::parse("https://en.wikipedia.org/w/api.php").expect("valid default URL")
}
fn default_algorithmia_url() -> Url {
    Url::parse("https://api.algorithmia.com").expect("valid default URL")
}
fn default_content_api_key_env() -> String {
    "ALGORITHMIA_API_KEY".into()
}
fn default_timeout_secs() -> u64 {
    30
}

/// `[keywords]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordsConfig {
    /// Natural Language Understanding service URL.
    #[serde(default = "default_keywords_url")]
    pub url: Url,

    /// Name of the env var holding the NLU API key.
    #[serde(default = "default_keywords_api_key_env")]
    pub api_key_env: String,

    /// API version date sent with every request.
    #[serde(default = "default_keywords_version")]
    pub version: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for KeywordsConfig {
    fn default() -> Self {
        Self {
            url: default_keywords_url(),
            api_key_env: default_keywords_api_key_env(),
            version: default_keywords_version(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_keywords_url() -> Url {
    Url::parse("https://gateway.watsonplatform.net/natural-language-understanding/api")
        .expect("valid default URL")
}
fn default_keywords_api_key_env() -> String {
    "WATSON_NLU_API_KEY".into()
}
fn default_keywords_version() -> String {
    "2018-04-05".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.scriptforge/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ScriptForgeError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.scriptforge/scriptforge.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ScriptForgeError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        ScriptForgeError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| ScriptForgeError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| ScriptForgeError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ScriptForgeError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Read an API key from the named env var. Empty values count as missing.
pub fn read_api_key(var_name: &str, service: &str) -> Result<String> {
    match std::env::var(var_name) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => Err(ScriptForgeError::config(format!(
            "{service} API key not found. Set the {var_name} environment variable."
        ))),
    }
}
