use anyhow::{Context, Result};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; a malformed value fails start-up.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Upload ceiling, checked by the upload handler and applied as the body limit.
    pub max_upload_bytes: usize,
    /// When false, PDF uploads yield the maintenance advisory instead of extracted text.
    pub enable_pdf_extraction: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            enable_pdf_extraction: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: optional_env("MAX_UPLOAD_BYTES")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            enable_pdf_extraction: optional_env("ENABLE_PDF_EXTRACTION")?.unwrap_or(false),
        })
    }

    /// Upload ceiling in whole megabytes, as shown to users.
    pub fn max_upload_megabytes(&self) -> usize {
        self.max_upload_bytes / (1024 * 1024)
    }
}

fn optional_env<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw:?}")),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ceiling_is_five_megabytes() {
        let config = Config::default();
        assert_eq!(config.max_upload_bytes, 5_242_880);
        assert_eq!(config.max_upload_megabytes(), 5);
        assert!(!config.enable_pdf_extraction);
    }

    #[test]
    fn test_optional_env_parses_and_rejects() {
        std::env::set_var("ATS_API_TEST_FLAG", "true");
        assert_eq!(optional_env::<bool>("ATS_API_TEST_FLAG").unwrap(), Some(true));

        std::env::set_var("ATS_API_TEST_FLAG", "maybe");
        assert!(optional_env::<bool>("ATS_API_TEST_FLAG").is_err());

        std::env::remove_var("ATS_API_TEST_FLAG");
        assert_eq!(optional_env::<bool>("ATS_API_TEST_FLAG").unwrap(), None);
    }
}
