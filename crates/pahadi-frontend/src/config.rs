//! Build-time configuration.

/// Backend used when `PAHADI_API_URL` is not set at build time.
pub const DEFAULT_API_URL: &str = "https://api.dev.pahadimatch.com/v1";

pub struct Config {
    pub api_url: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            api_url: api_url(option_env!("PAHADI_API_URL")),
        }
    }
}

fn api_url(configured: Option<&str>) -> String {
    configured
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_API_URL)
        .trim_end_matches('/')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_defaults() {
        assert_eq!(api_url(None), DEFAULT_API_URL);
        assert_eq!(api_url(Some("   ")), DEFAULT_API_URL);
    }

    #[test]
    fn test_api_url_trims_trailing_slash() {
        assert_eq!(
            api_url(Some("http://localhost:8000/api/")),
            "http://localhost:8000/api"
        );
    }
}
