use serde::{Deserialize, Serialize};

pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_cors() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Upstream model identifier, e.g. "gemini-2.0-flash".
    #[serde(default = "default_model")]
    pub model: String,
    /// Set CORS response headers (allow any origin, POST/OPTIONS).
    #[serde(default = "default_cors")]
    pub cors: bool,
    // Never read from the config file; overlaid from the environment.
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base: default_api_base(),
            model: default_model(),
            cors: default_cors(),
            api_key: None,
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load from an optional YAML file, then overlay the credential from the
    /// process environment.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(p) => Config::from_file(p)?,
            None => Config::default(),
        };
        config.api_key = std::env::var(GEMINI_API_KEY_ENV).ok().filter(|k| !k.is_empty());
        Ok(config)
    }
}
