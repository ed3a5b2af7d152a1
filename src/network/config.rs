/// API route configuration
pub struct ApiConfig {
    // When empty, the editor assumes same-origin and builds relative REST
    // URLs ("/api/...").
    base_url: String,
}

impl ApiConfig {
    /// Create a config from the optional compile-time `API_BASE_URL`
    /// environment variable.
    pub fn new() -> Result<Self, &'static str> {
        let base = option_env!("API_BASE_URL").unwrap_or("");
        Ok(Self {
            base_url: base.trim_end_matches('/').to_string(),
        })
    }

    /// Create a config from a URL string supplied at runtime.
    pub fn from_url(url: &str) -> Self {
        Self {
            base_url: url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full API URL for a given path.
    #[allow(dead_code)]
    pub fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_url_strips_trailing_slash() {
        let cfg = ApiConfig::from_url("https://api.example.com/");
        assert_eq!(cfg.base_url(), "https://api.example.com");
        assert_eq!(
            cfg.url("/projects/1/model-configs"),
            "https://api.example.com/api/projects/1/model-configs"
        );
    }
}
