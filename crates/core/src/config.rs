use crate::error::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Default chat-completions endpoint base.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Default model used for image analysis.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Default filename for the overwritten debug snapshot of the last capture.
pub const DEFAULT_DEBUG_CAPTURE: &str = "debug_capture.png";

#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: String,
    pub model_name: String,
    pub api_base: String,
    /// Where to save a copy of each capture; `None` disables the snapshot.
    pub debug_capture_path: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env file if it exists, ignore if it doesn't
        let _ = dotenv();

        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| AppError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;

        let model_name = env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let api_base =
            env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        url::Url::parse(&api_base).map_err(|e| {
            AppError::config(format!("Invalid OPENAI_BASE_URL '{}': {}", api_base, e))
        })?;

        // Empty value disables the snapshot entirely
        let debug_capture_path = match env::var("SNIP_DEBUG_CAPTURE") {
            Ok(path) if path.is_empty() => None,
            Ok(path) => Some(PathBuf::from(path)),
            Err(_) => Some(PathBuf::from(DEFAULT_DEBUG_CAPTURE)),
        };

        Ok(Self {
            api_key,
            model_name,
            api_base,
            debug_capture_path,
        })
    }
}
