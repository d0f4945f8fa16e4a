//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.moment/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::Provider;
use crate::core::prompt::SYSTEM_PROMPT;
use crate::core::theme::Theme;
use crate::inference::providers::groq::DEFAULT_GROQ_BASE_URL;
use crate::inference::providers::lmstudio::DEFAULT_LMSTUDIO_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MomentConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub groq: GroqConfig,
    #[serde(default)]
    pub lmstudio: LmStudioConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_provider: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub request_timeout_secs: Option<u64>,
    pub system_prompt: Option<String>,
    pub system_prompt_file: Option<String>,
    pub theme: Option<Theme>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GroqConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LmStudioConfig {
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_TEMPERATURE: f32 = 0.5;
pub const DEFAULT_MAX_TOKENS: u32 = 350;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub provider: Provider,
    pub model_name: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub request_timeout: Duration,
    pub system_prompt: String,
    pub theme: Theme,
    pub groq_api_key: Option<String>,
    pub groq_base_url: String,
    pub lmstudio_base_url: String,
}

/// Overrides taken from the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub provider: Option<Provider>,
    pub model: Option<String>,
    pub theme: Option<Theme>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// A provider that needs a secret was selected but none was found.
    MissingApiKey { provider: &'static str, env_var: &'static str },
    UnknownProvider(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::MissingApiKey { provider, env_var } => write!(
                f,
                "no API key for {provider}: set {env_var} or api_key in the config file"
            ),
            ConfigError::UnknownProvider(name) => {
                write!(f, "unknown provider {name:?} (expected \"groq\" or \"lmstudio\")")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.moment/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".moment"))
}

/// Returns the path to `~/.moment/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.moment/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `MomentConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<MomentConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(MomentConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<MomentConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(MomentConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: MomentConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!(
        "Config: provider={:?}, model={:?}, groq key set={}",
        config.general.default_provider,
        config.general.model,
        config.groq.api_key.is_some()
    );
    Ok(config)
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# Moment Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_provider = "groq"          # "groq" or "lmstudio"
# model = "llama-3.1-8b-instant"
# temperature = 0.5
# max_tokens = 350
# request_timeout_secs = 60
# system_prompt = "You are Moment AI..."
# system_prompt_file = "system.md"   # Path relative to ~/.moment/
# theme = "dark"                     # "dark" or "light"

# [groq]
# api_key = "gsk_..."                # Or set GROQ_API_KEY env var
# base_url = "https://api.groq.com/openai/v1"

# [lmstudio]
# base_url = "http://localhost:1234/v1"
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_CONTENT) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Where environment lookups come from.
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads the real process environment. Empty values count as unset.
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }
}

/// Resolve the final config from the process environment.
pub fn resolve(config: &MomentConfig, cli: &CliOverrides) -> Result<ResolvedConfig, ConfigError> {
    resolve_with_env(config, cli, &ProcessEnv)
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// Fails if the selected provider needs an API key and none is found.
pub fn resolve_with_env(
    config: &MomentConfig,
    cli: &CliOverrides,
    env: &dyn EnvSource,
) -> Result<ResolvedConfig, ConfigError> {
    // Provider: CLI → env → config → default
    let provider = match cli.provider.clone() {
        Some(p) => p,
        None => match env
            .get("MOMENT_PROVIDER")
            .or_else(|| config.general.default_provider.clone())
        {
            Some(name) => parse_provider(&name)?,
            None => Provider::default(),
        },
    };

    // Model: CLI → env → config → default
    let model_name = cli
        .model
        .clone()
        .or_else(|| env.get("MOMENT_MODEL"))
        .or_else(|| config.general.model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    // Groq API key: env → config
    let groq_api_key = env
        .get("GROQ_API_KEY")
        .or_else(|| config.groq.api_key.clone())
        .filter(|k| !k.trim().is_empty());

    if matches!(provider, Provider::Groq) && groq_api_key.is_none() {
        return Err(ConfigError::MissingApiKey {
            provider: "Groq",
            env_var: "GROQ_API_KEY",
        });
    }

    let groq_base_url = env
        .get("GROQ_BASE_URL")
        .or_else(|| config.groq.base_url.clone())
        .unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.to_string());

    let lmstudio_base_url = env
        .get("LM_STUDIO_BASE_URL")
        .or_else(|| config.lmstudio.base_url.clone())
        .unwrap_or_else(|| DEFAULT_LMSTUDIO_BASE_URL.to_string());

    let theme = cli
        .theme
        .or(config.general.theme)
        .unwrap_or_default();

    Ok(ResolvedConfig {
        provider,
        model_name,
        temperature: config.general.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        max_tokens: config.general.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        request_timeout: Duration::from_secs(
            config
                .general
                .request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        ),
        system_prompt: resolve_system_prompt(config, config_dir().as_deref()),
        theme,
        groq_api_key,
        groq_base_url,
        lmstudio_base_url,
    })
}

fn parse_provider(name: &str) -> Result<Provider, ConfigError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "groq" => Ok(Provider::Groq),
        "lmstudio" | "lm-studio" => Ok(Provider::LmStudio),
        _ => Err(ConfigError::UnknownProvider(name.to_string())),
    }
}

/// Resolves the system prompt: inline wins over file, both win over default.
fn resolve_system_prompt(config: &MomentConfig, base_dir: Option<&Path>) -> String {
    // Inline system_prompt takes priority
    if let Some(ref prompt) = config.general.system_prompt {
        return prompt.clone();
    }

    // Try loading from system_prompt_file (relative to ~/.moment/)
    if let (Some(file), Some(base)) = (config.general.system_prompt_file.as_ref(), base_dir) {
        let prompt_path = base.join(file);
        match fs::read_to_string(&prompt_path) {
            Ok(contents) => {
                let trimmed = contents.trim().to_string();
                if !trimmed.is_empty() {
                    info!("Loaded system prompt from {}", prompt_path.display());
                    return trimmed;
                }
                warn!("System prompt file is empty: {}", prompt_path.display());
            }
            Err(e) => {
                warn!(
                    "Failed to read system prompt file {}: {}",
                    prompt_path.display(),
                    e
                );
            }
        }
    }

    SYSTEM_PROMPT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapEnv(HashMap<String, String>);

    impl EnvSource for MapEnv {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }
    }

    fn env_of(pairs: &[(&str, &str)]) -> MapEnv {
        MapEnv(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn with_key() -> MapEnv {
        env_of(&[("GROQ_API_KEY", "gsk_env")])
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved =
            resolve_with_env(&MomentConfig::default(), &CliOverrides::default(), &with_key())
                .unwrap();
        assert!(matches!(resolved.provider, Provider::Groq));
        assert_eq!(resolved.model_name, DEFAULT_MODEL);
        assert_eq!(resolved.temperature, 0.5);
        assert_eq!(resolved.max_tokens, 350);
        assert_eq!(resolved.request_timeout, Duration::from_secs(60));
        assert_eq!(resolved.theme, Theme::Dark);
        assert_eq!(resolved.system_prompt, SYSTEM_PROMPT);
        assert_eq!(resolved.groq_base_url, DEFAULT_GROQ_BASE_URL);
        assert_eq!(resolved.groq_api_key.as_deref(), Some("gsk_env"));
    }

    #[test]
    fn test_missing_groq_key_is_startup_error() {
        let result =
            resolve_with_env(&MomentConfig::default(), &CliOverrides::default(), &env_of(&[]));
        assert!(matches!(
            result,
            Err(ConfigError::MissingApiKey { env_var: "GROQ_API_KEY", .. })
        ));
    }

    #[test]
    fn test_lmstudio_needs_no_key() {
        let cli = CliOverrides {
            provider: Some(Provider::LmStudio),
            ..Default::default()
        };
        let resolved = resolve_with_env(&MomentConfig::default(), &cli, &env_of(&[])).unwrap();
        assert!(matches!(resolved.provider, Provider::LmStudio));
        assert_eq!(resolved.lmstudio_base_url, DEFAULT_LMSTUDIO_BASE_URL);
    }

    #[test]
    fn test_env_key_wins_over_config_key() {
        let config = MomentConfig {
            groq: GroqConfig {
                api_key: Some("gsk_config".to_string()),
                base_url: None,
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), &with_key()).unwrap();
        assert_eq!(resolved.groq_api_key.as_deref(), Some("gsk_env"));

        let resolved =
            resolve_with_env(&config, &CliOverrides::default(), &env_of(&[])).unwrap();
        assert_eq!(resolved.groq_api_key.as_deref(), Some("gsk_config"));
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = MomentConfig {
            general: GeneralConfig {
                default_provider: Some("lmstudio".to_string()),
                model: Some("my-model".to_string()),
                temperature: Some(0.2),
                max_tokens: Some(512),
                request_timeout_secs: Some(5),
                system_prompt: Some("Custom prompt.".to_string()),
                system_prompt_file: None,
                theme: Some(Theme::Light),
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), &env_of(&[])).unwrap();
        assert!(matches!(resolved.provider, Provider::LmStudio));
        assert_eq!(resolved.model_name, "my-model");
        assert_eq!(resolved.temperature, 0.2);
        assert_eq!(resolved.max_tokens, 512);
        assert_eq!(resolved.request_timeout, Duration::from_secs(5));
        assert_eq!(resolved.system_prompt, "Custom prompt.");
        assert_eq!(resolved.theme, Theme::Light);
    }

    #[test]
    fn test_cli_wins_over_env_and_config() {
        let config = MomentConfig {
            general: GeneralConfig {
                model: Some("config-model".to_string()),
                theme: Some(Theme::Dark),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = env_of(&[("GROQ_API_KEY", "k"), ("MOMENT_MODEL", "env-model")]);
        let resolved = resolve_with_env(&config, &CliOverrides::default(), &env).unwrap();
        assert_eq!(resolved.model_name, "env-model");

        let cli = CliOverrides {
            model: Some("cli-model".to_string()),
            theme: Some(Theme::Light),
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &cli, &env).unwrap();
        assert_eq!(resolved.model_name, "cli-model");
        assert_eq!(resolved.theme, Theme::Light);
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let env = env_of(&[("MOMENT_PROVIDER", "openai")]);
        let result = resolve_with_env(&MomentConfig::default(), &CliOverrides::default(), &env);
        assert!(matches!(result, Err(ConfigError::UnknownProvider(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
default_provider = "groq"
model = "llama-3.1-8b-instant"
temperature = 0.7
max_tokens = 200
theme = "light"

[groq]
api_key = "gsk-test-123"

[lmstudio]
base_url = "http://192.168.1.100:1234/v1"
"#;
        let config: MomentConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.default_provider.as_deref(), Some("groq"));
        assert_eq!(config.general.max_tokens, Some(200));
        assert_eq!(config.general.theme, Some(Theme::Light));
        assert_eq!(config.groq.api_key.as_deref(), Some("gsk-test-123"));
        assert_eq!(
            config.lmstudio.base_url.as_deref(),
            Some("http://192.168.1.100:1234/v1")
        );
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[general]
model = "my-model"
"#;
        let config: MomentConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.model.as_deref(), Some("my-model"));
        assert!(config.general.default_provider.is_none());
        assert!(config.groq.api_key.is_none());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("moment-cfg-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[general\nmodel = ").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_file_generates_commented_default() {
        let dir = std::env::temp_dir().join(format!("moment-cfg-{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.toml");
        let config = load_config_from(&path).unwrap();
        assert!(config.general.model.is_none());
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# Moment Configuration"));
        // The generated file is all comments, so it parses to defaults
        let reparsed: MomentConfig = toml::from_str(&written).unwrap();
        assert!(reparsed.general.default_provider.is_none());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_system_prompt_file_is_loaded() {
        let dir = std::env::temp_dir().join(format!("moment-cfg-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("system.md"), "  From file.  \n").unwrap();
        let config = MomentConfig {
            general: GeneralConfig {
                system_prompt_file: Some("system.md".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(resolve_system_prompt(&config, Some(&dir)), "From file.");
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_inline_system_prompt_wins_over_file() {
        let config = MomentConfig {
            general: GeneralConfig {
                system_prompt: Some("Inline wins.".to_string()),
                system_prompt_file: Some("should-not-load.md".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(resolve_system_prompt(&config, None), "Inline wins.");
    }
}
