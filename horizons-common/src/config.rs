//! Configuration loading and root folder resolution
//!
//! Every setting resolves in the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

/// Directory name used under the platform config/data directories
pub const APP_DIR: &str = "healing-horizons";

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_SECRET_KEY: &str = "breakup-recovery-2026-secret-key";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 6;
pub const DEFAULT_RATE_LIMIT_COOLDOWN_SECS: u64 = 60 * 60;
pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 16 * 1024 * 1024;

/// Localization shown in page footers and prompts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    pub country: String,
    pub currency: String,
    pub timezone: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            country: "India".to_string(),
            currency: "INR".to_string(),
            timezone: "Asia/Kolkata".to_string(),
        }
    }
}

/// Feature switches; a disabled feature drops its routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    pub enable_journal: bool,
    pub enable_community: bool,
    pub enable_progress_tracking: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enable_journal: true,
            enable_community: true,
            enable_progress_tracking: true,
        }
    }
}

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    pub bind: Option<String>,
    pub database_url: Option<String>,
    pub secret_key: Option<String>,
    pub groq_api_key: Option<String>,
    pub groq_model: Option<String>,
    pub groq_base_url: Option<String>,
    pub ai_timeout_secs: Option<u64>,
    pub rate_limit_cooldown_secs: Option<u64>,
    pub session_cookie_secure: Option<bool>,
    pub max_content_length: Option<usize>,
    pub locale: Option<LocaleConfig>,
    pub features: Option<FeatureFlags>,
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_file: Option<PathBuf>,
    pub root_folder: Option<PathBuf>,
    pub bind: Option<String>,
    pub database_url: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub root_folder: PathBuf,
    pub bind: String,
    pub database_url: String,
    pub secret_key: String,
    pub groq_api_key: Option<String>,
    pub groq_model: String,
    pub groq_base_url: String,
    pub ai_timeout_secs: u64,
    pub rate_limit_cooldown_secs: u64,
    pub session_cookie_secure: bool,
    pub max_content_length: usize,
    pub locale: LocaleConfig,
    pub features: FeatureFlags,
}

impl Default for AppConfig {
    fn default() -> Self {
        let root_folder = get_default_root_folder();
        Self {
            database_url: default_database_url(&root_folder),
            root_folder,
            bind: DEFAULT_BIND.to_string(),
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            groq_api_key: None,
            groq_model: DEFAULT_GROQ_MODEL.to_string(),
            groq_base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            ai_timeout_secs: DEFAULT_AI_TIMEOUT_SECS,
            rate_limit_cooldown_secs: DEFAULT_RATE_LIMIT_COOLDOWN_SECS,
            session_cookie_secure: true,
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            locale: LocaleConfig::default(),
            features: FeatureFlags::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from CLI values, the process environment and the
    /// TOML file (`--config`, else the platform config path when present)
    pub fn load(cli: &CliOverrides) -> Result<Self> {
        let toml_path = match &cli.config_file {
            Some(path) => Some(path.clone()),
            None => default_config_path().filter(|p| p.exists()),
        };

        let toml_config = match toml_path {
            Some(path) => {
                info!("Loading config file: {}", path.display());
                TomlConfig::from_file(&path)?
            }
            None => TomlConfig::default(),
        };

        Self::resolve(cli, &toml_config, |name| std::env::var(name).ok())
    }

    /// Merge the three sources; `env` looks up an environment variable
    pub fn resolve<F>(cli: &CliOverrides, toml: &TomlConfig, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty variables count as unset
        let env = |name: &str| env(name).filter(|v| !v.trim().is_empty());

        let root_folder = cli
            .root_folder
            .clone()
            .or_else(|| env("HORIZONS_ROOT_FOLDER").map(PathBuf::from))
            .or_else(|| toml.root_folder.clone())
            .unwrap_or_else(get_default_root_folder);

        let bind = cli
            .bind
            .clone()
            .or_else(|| env("HORIZONS_BIND"))
            .or_else(|| toml.bind.clone())
            .unwrap_or_else(|| DEFAULT_BIND.to_string());

        let database_url = cli
            .database_url
            .clone()
            .or_else(|| env("DATABASE_URL"))
            .or_else(|| toml.database_url.clone())
            .map(|url| normalize_database_url(&url, &root_folder))
            .unwrap_or_else(|| default_database_url(&root_folder));

        let secret_key = match env("SECRET_KEY").or_else(|| toml.secret_key.clone()) {
            Some(key) => key,
            None => {
                warn!("SECRET_KEY not set; using the built-in development key");
                DEFAULT_SECRET_KEY.to_string()
            }
        };

        let groq_api_key = env("GROQ_API_KEY")
            .or_else(|| toml.groq_api_key.clone())
            .filter(|k| !k.trim().is_empty());

        let groq_model = env("HORIZONS_GROQ_MODEL")
            .or_else(|| toml.groq_model.clone())
            .unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string());

        let groq_base_url = env("HORIZONS_GROQ_BASE_URL")
            .or_else(|| toml.groq_base_url.clone())
            .unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.to_string());

        let ai_timeout_secs = parse_env(&env, "HORIZONS_AI_TIMEOUT_SECS")?
            .or(toml.ai_timeout_secs)
            .unwrap_or(DEFAULT_AI_TIMEOUT_SECS);
        if ai_timeout_secs == 0 {
            return Err(Error::Config("ai_timeout_secs must be at least 1".to_string()));
        }

        let rate_limit_cooldown_secs = parse_env(&env, "HORIZONS_RATE_LIMIT_COOLDOWN_SECS")?
            .or(toml.rate_limit_cooldown_secs)
            .unwrap_or(DEFAULT_RATE_LIMIT_COOLDOWN_SECS);

        let session_cookie_secure = parse_env_bool(&env, "HORIZONS_SESSION_COOKIE_SECURE")?
            .or(toml.session_cookie_secure)
            .unwrap_or(true);

        let max_content_length = parse_env(&env, "HORIZONS_MAX_CONTENT_LENGTH")?
            .or(toml.max_content_length)
            .unwrap_or(DEFAULT_MAX_CONTENT_LENGTH);

        let locale = toml.locale.clone().unwrap_or_default();

        let mut features = toml.features.unwrap_or_default();
        if let Some(v) = parse_env_bool(&env, "HORIZONS_ENABLE_JOURNAL")? {
            features.enable_journal = v;
        }
        if let Some(v) = parse_env_bool(&env, "HORIZONS_ENABLE_COMMUNITY")? {
            features.enable_community = v;
        }
        if let Some(v) = parse_env_bool(&env, "HORIZONS_ENABLE_PROGRESS_TRACKING")? {
            features.enable_progress_tracking = v;
        }

        Ok(Self {
            root_folder,
            bind,
            database_url,
            secret_key,
            groq_api_key,
            groq_model,
            groq_base_url,
            ai_timeout_secs,
            rate_limit_cooldown_secs,
            session_cookie_secure,
            max_content_length,
            locale,
            features,
        })
    }
}

fn parse_env<T, F>(env: &F, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    env(name)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| Error::Config(format!("{}={:?}: {}", name, raw, e)))
        })
        .transpose()
}

fn parse_env_bool<F>(env: &F, name: &str) -> Result<Option<bool>>
where
    F: Fn(&str) -> Option<String>,
{
    env(name)
        .map(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(Error::Config(format!("{}={:?} is not a boolean", name, other))),
        })
        .transpose()
}

/// sqlx URL of `recovery.db` inside the root folder
pub fn default_database_url(root_folder: &Path) -> String {
    format!("sqlite://{}", root_folder.join("recovery.db").display())
}

/// Rewrite a SQLAlchemy-style relative URL into an sqlx one
///
/// `database_url` is an sqlx URL: `sqlite://relative.db` or
/// `sqlite:///absolute/path.db`. SQLAlchemy spells a relative file
/// `sqlite:///recovery.db`, which sqlx would open at the filesystem root, so
/// a bare file name after `sqlite:///` is placed in the root folder instead.
/// Any other URL is returned unchanged.
pub fn normalize_database_url(url: &str, root_folder: &Path) -> String {
    let url = url.trim();
    match url.strip_prefix("sqlite:///") {
        Some(file) if !file.is_empty() && !file.contains('/') && !file.starts_with(':') => {
            let normalized = format!("sqlite://{}", root_folder.join(file).display());
            warn!(
                from = %url,
                to = %normalized,
                "DATABASE_URL names a file at the filesystem root; using the root folder"
            );
            normalized
        }
        _ => url.to_string(),
    }
}

/// Platform config file path, e.g. `~/.config/healing-horizons/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

/// Get OS-dependent default root folder path
pub fn get_default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/healing-horizons (or /var/lib for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("/var/lib").join(APP_DIR))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/healing-horizons
        dirs::data_dir()
            .map(|d| d.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support").join(APP_DIR))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\healing-horizons
        dirs::data_local_dir()
            .map(|d| d.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData").join(APP_DIR))
    } else {
        PathBuf::from("./healing_horizons_data")
    }
}

/// Create the root folder if it does not exist yet
pub fn ensure_root_folder(root_folder: &Path) -> Result<()> {
    if !root_folder.exists() {
        std::fs::create_dir_all(root_folder)?;
        info!("Created root folder: {}", root_folder.display());
    }
    Ok(())
}
