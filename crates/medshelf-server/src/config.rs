//! Server configuration from environment variables.

/// Runtime configuration for the service.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database path.
    pub db_path: String,
    /// Listen address.
    pub addr: String,
    /// Tavily search API key.
    pub tavily_api_key: String,
    /// Google Gemini API key.
    pub google_api_key: String,
    /// Gemini model name.
    pub gemini_model: String,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup, so tests can supply
    /// values without touching the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            db_path: lookup("MEDSHELF_DB").unwrap_or_else(|| "medicines.db".to_string()),
            addr: lookup("MEDSHELF_ADDR").unwrap_or_else(|| "0.0.0.0:8000".to_string()),
            tavily_api_key: lookup("TAVILY_API_KEY").unwrap_or_default(),
            google_api_key: lookup("GOOGLE_API_KEY").unwrap_or_default(),
            gemini_model: lookup("GEMINI_MODEL").unwrap_or_else(|| "gemini-2.5-flash".to_string()),
        }
    }
}
