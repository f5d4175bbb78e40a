//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{
    Environment, JsonlConfig, LogStoreTarget, StorylogConfig, SupabaseConfig,
};
use super::secret_string;
use crate::domain::errors::StorylogError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into StorylogConfig
/// 4. Applies environment variable overrides (STORYLOG_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use storylog::config::loader::load_config;
///
/// let config = load_config("storylog.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<StorylogConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(StorylogError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        StorylogError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses, overrides and validates configuration from TOML text
///
/// # Errors
///
/// Same as [`load_config`], minus the file access errors.
pub fn parse_config(contents: &str) -> Result<StorylogConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: StorylogConfig = toml::from_str(&contents)
        .map_err(|e| StorylogError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        StorylogError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| StorylogError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(StorylogError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using STORYLOG_* prefix
///
/// Environment variables follow the pattern: STORYLOG_<SECTION>_<KEY>
/// For example: STORYLOG_LOG_STORE_TARGET, STORYLOG_SUPABASE_URL
fn apply_env_overrides(config: &mut StorylogConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("STORYLOG_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("STORYLOG_APPLICATION_ENGINE_VERSION") {
        config.application.engine_version = val;
    }
    if let Ok(val) = std::env::var("STORYLOG_ENVIRONMENT") {
        config.environment = parse_value::<Environment>("STORYLOG_ENVIRONMENT", &val)?;
    }

    config
        .anonymization
        .apply_env_overrides()
        .map_err(|e| StorylogError::Configuration(format!("{e:#}")))?;

    // Log store overrides
    if let Ok(val) = std::env::var("STORYLOG_LOG_STORE_TARGET") {
        config.log_store.target = parse_value::<LogStoreTarget>("STORYLOG_LOG_STORE_TARGET", &val)?;
    }

    // Supabase: both URL and key present is enough to create the section
    let supabase_url = std::env::var("STORYLOG_SUPABASE_URL").ok();
    let supabase_key = std::env::var("STORYLOG_SUPABASE_API_KEY").ok();
    match config.log_store.supabase {
        Some(ref mut supabase) => {
            if let Some(url) = supabase_url {
                supabase.url = url;
            }
            if let Some(key) = supabase_key {
                supabase.api_key = secret_string(key);
            }
        }
        None => {
            if let (Some(url), Some(key)) = (supabase_url, supabase_key) {
                config.log_store.supabase = Some(SupabaseConfig {
                    url,
                    api_key: secret_string(key),
                    table: "gunapad_logs".to_string(),
                    timeout_seconds: 10,
                });
            }
        }
    }
    if let Some(ref mut supabase) = config.log_store.supabase {
        if let Ok(val) = std::env::var("STORYLOG_SUPABASE_TABLE") {
            supabase.table = val;
        }
    }

    if let Some(ref mut pg) = config.log_store.postgresql {
        if let Ok(val) = std::env::var("STORYLOG_POSTGRESQL_CONNECTION_STRING") {
            pg.connection_string = secret_string(val);
        }
        if let Ok(val) = std::env::var("STORYLOG_POSTGRESQL_MAX_CONNECTIONS") {
            if let Ok(max) = val.parse() {
                pg.max_connections = max;
            }
        }
    }

    if let Ok(val) = std::env::var("STORYLOG_JSONL_PATH") {
        match config.log_store.jsonl {
            Some(ref mut jsonl) => jsonl.path = val,
            None => config.log_store.jsonl = Some(JsonlConfig { path: val }),
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("STORYLOG_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("STORYLOG_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

fn parse_value<T: serde::de::DeserializeOwned>(var: &str, val: &str) -> Result<T> {
    serde_json::from_value(serde_json::Value::String(val.to_lowercase()))
        .map_err(|_| StorylogError::Configuration(format!("Invalid value '{val}' for {var}")))
}
