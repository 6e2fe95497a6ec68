//! Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Configuration for vox
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default model to use
    pub model: Option<String>,
    /// Default provider (google, openai)
    pub provider: Option<String>,
    /// Skip the input-mode prompt and always read typed commands
    pub text_only: Option<bool>,
    /// API keys (alternative to environment variables)
    #[serde(default)]
    pub api_keys: ApiKeys,
    /// Gmail access settings
    #[serde(default)]
    pub gmail: GmailSettings,
    /// Speech boundary settings
    #[serde(default)]
    pub speech: SpeechSettings,
}

/// API key configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKeys {
    pub google: Option<String>,
    pub openai: Option<String>,
}

/// Gmail access configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GmailSettings {
    /// OAuth access token with mail scope (or set GMAIL_ACCESS_TOKEN)
    pub access_token: Option<String>,
}

/// External speech commands. Stdout of the transcribe command is the
/// transcribed text; the speak command receives the response on stdin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechSettings {
    pub transcribe_command: Option<String>,
    pub speak_command: Option<String>,
}

impl Config {
    /// Get the config directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vox")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        // Check for VOX_CONFIG_PATH env var first
        if let Ok(path) = std::env::var("VOX_CONFIG_PATH") {
            return PathBuf::from(path);
        }
        Self::config_dir().join("config.toml")
    }

    /// Load config from file
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse config file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Save config to file
    pub fn save(&self) -> std::io::Result<()> {
        let path = Self::config_path();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, content)
    }

    /// Create a default config file if it doesn't exist
    pub fn init() -> std::io::Result<PathBuf> {
        let path = Self::config_path();
        if path.exists() {
            return Ok(path);
        }

        let default_config = Config {
            model: Some("gemini-1.5-flash".to_string()),
            provider: Some("google".to_string()),
            text_only: Some(false),
            api_keys: ApiKeys::default(),
            gmail: GmailSettings::default(),
            speech: SpeechSettings::default(),
        };

        default_config.save()?;
        Ok(path)
    }

    /// Get API key for a provider, checking config then env
    pub fn get_api_key(&self, provider: &str) -> Option<String> {
        let from_config = match provider {
            "google" => self.api_keys.google.clone(),
            "openai" => self.api_keys.openai.clone(),
            _ => None,
        };

        if from_config.is_some() {
            return from_config;
        }

        match provider {
            "google" => std::env::var("GOOGLE_API_KEY")
                .or_else(|_| std::env::var("GEMINI_API_KEY"))
                .ok(),
            "openai" => std::env::var("OPENAI_API_KEY").ok(),
            _ => None,
        }
    }

    /// Get the Gmail access token, checking config then env
    pub fn gmail_access_token(&self) -> Option<String> {
        self.gmail
            .access_token
            .clone()
            .or_else(|| std::env::var("GMAIL_ACCESS_TOKEN").ok())
    }
}

/// Generate example config content
pub fn example_config() -> &'static str {
    r#"# vox configuration file
# Place at ~/.config/vox/config.toml (Linux/Mac) or %APPDATA%\vox\config.toml (Windows)

# Default model to use
model = "gemini-1.5-flash"

# Default provider (google, openai)
provider = "google"

# Skip the input-mode prompt and always read typed commands
text_only = false

# API keys (optional - can also use environment variables)
# It's recommended to use environment variables instead for security
[api_keys]
# google = "..."
# openai = "sk-..."

[gmail]
# OAuth access token with mail scope (or set GMAIL_ACCESS_TOKEN)
# access_token = "ya29...."

[speech]
# External commands for the audio boundary. Stdout of the transcribe
# command is used as the transcribed text; the speak command receives
# the response text on stdin.
# transcribe_command = "whisper-capture --once"
# speak_command = "espeak --stdin"
"#
}
