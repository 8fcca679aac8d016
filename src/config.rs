use std::env;

const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Runtime configuration, read once at process start.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
}

impl Config {
    /// Reads `API_URL`, falling back to the local development default.
    pub fn from_env() -> Self {
        Self::new(env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into()))
    }

    pub fn new(api_url: impl Into<String>) -> Self {
        let mut api_url = api_url.into();
        while api_url.ends_with('/') {
            api_url.pop();
        }
        Self { api_url }
    }
}
