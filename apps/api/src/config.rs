use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Local secrets file consulted when the API key is not in the environment.
pub const SECRETS_FILE: &str = "secrets.toml";

const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Application configuration loaded from environment variables and the local secrets file.
/// Startup fails if the generation API key cannot be found in either.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub port: u16,
    pub rust_log: String,
}

#[derive(Debug, Deserialize)]
struct SecretsFile {
    #[serde(rename = "GEMINI_API_KEY")]
    gemini_api_key: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::load_with_secrets(Path::new(SECRETS_FILE))
    }

    pub fn load_with_secrets(secrets_path: &Path) -> Result<Self> {
        Ok(Config {
            gemini_api_key: resolve_api_key(secrets_path)?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Environment wins over the secrets file. Blank values count as missing.
fn resolve_api_key(secrets_path: &Path) -> Result<String> {
    if let Some(key) = std::env::var(API_KEY_VAR)
        .ok()
        .filter(|k| !k.trim().is_empty())
    {
        return Ok(key);
    }

    read_secrets_key(secrets_path)?.with_context(|| {
        format!(
            "Required secret '{API_KEY_VAR}' is not set in the environment or in {}",
            secrets_path.display()
        )
    })
}

fn read_secrets_key(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read secrets file {}", path.display()))?;
    let secrets: SecretsFile = toml::from_str(&raw)
        .with_context(|| format!("Secrets file {} is not valid TOML", path.display()))?;
    Ok(secrets.gemini_api_key.filter(|k| !k.trim().is_empty()))
}
