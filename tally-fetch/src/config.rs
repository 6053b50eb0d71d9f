use std::time::Duration;

use crate::error::FetchError;

pub const DEFAULT_URL_TEMPLATE: &str = "http://resttest.bench.co/transactions/{page}.json";
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// How pages are located and how hard we try to get them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// URL with a `{page}` placeholder
    pub url_template: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Total tries for a page on timeout/connection failure (1 = no retry)
    pub max_attempts: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            timeout: Duration::from_secs(5),
            max_attempts: 2,
        }
    }
}

impl FetchConfig {
    pub fn validate(&self) -> Result<(), FetchError> {
        if !self.url_template.contains(PAGE_PLACEHOLDER) {
            return Err(FetchError::Config(format!(
                "url template `{}` has no {PAGE_PLACEHOLDER} placeholder",
                self.url_template
            )));
        }
        if self.max_attempts == 0 {
            return Err(FetchError::Config("max_attempts must be at least 1".into()));
        }
        if self.timeout.is_zero() {
            return Err(FetchError::Config("timeout must be non-zero".into()));
        }
        Ok(())
    }

    /// URL for a single page.
    pub fn page_url(&self, page_number: u64) -> String {
        self.url_template
            .replace(PAGE_PLACEHOLDER, &page_number.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url() {
        let cfg = FetchConfig::default();
        assert_eq!(
            cfg.page_url(4),
            "http://resttest.bench.co/transactions/4.json"
        );
    }

    #[test]
    fn test_default_is_valid() {
        assert!(FetchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_template_without_placeholder() {
        let cfg = FetchConfig {
            url_template: "http://localhost/transactions.json".to_string(),
            ..FetchConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(FetchError::Config(_))));
    }

    #[test]
    fn test_rejects_zero_attempts() {
        let cfg = FetchConfig {
            max_attempts: 0,
            ..FetchConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(FetchError::Config(_))));
    }
}
