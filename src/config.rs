use anyhow::{bail, Context};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8084/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub token: Option<String>,
}

impl Config {
    pub fn new(api_url: &str, token: Option<&str>) -> anyhow::Result<Self> {
        let api_url = api_url.trim().trim_end_matches('/').to_string();
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            bail!("API url must start with http:// or https://, got `{api_url}`");
        }

        let token = token
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        Ok(Self { api_url, token })
    }
}

/// Loads `.env` when present; a missing file is fine.
pub fn load_dotenv() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(err).context("failed to read .env file"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_slashes() {
        let config = Config::new("http://localhost:8084/api//", None).unwrap();
        assert_eq!(config.api_url, "http://localhost:8084/api");
    }

    #[test]
    fn blank_token_is_absent() {
        let config = Config::new(DEFAULT_API_URL, Some("   ")).unwrap();
        assert_eq!(config.token, None);

        let config = Config::new(DEFAULT_API_URL, Some(" abc ")).unwrap();
        assert_eq!(config.token.as_deref(), Some("abc"));
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(Config::new("ftp://example.com", None).is_err());
        assert!(Config::new("localhost:8084", None).is_err());
    }
}
