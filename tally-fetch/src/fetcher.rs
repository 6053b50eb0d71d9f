//! Single-page fetch with bounded retries.

use tally_ingest::{Page, parse_page};

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::transport::{HttpTransport, RawResponse, Transport};

/// Fetches one page at a time from the configured endpoint.
pub struct PageFetcher<T = HttpTransport> {
    config: FetchConfig,
    transport: T,
}

impl PageFetcher<HttpTransport> {
    /// Fetcher backed by a real HTTP client.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        config.validate()?;
        let transport =
            HttpTransport::new(config.timeout).map_err(|source| FetchError::Transport {
                url: config.url_template.clone(),
                source,
            })?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> PageFetcher<T> {
    pub fn with_transport(config: FetchConfig, transport: T) -> Result<Self, FetchError> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch and decode `page_number`.
    ///
    /// Timeouts and connection failures are retried up to
    /// `max_attempts` in total. A non-2xx status, an undecodable body,
    /// a missing field or a page number the server did not echo back
    /// fail immediately.
    pub async fn fetch_page(&self, page_number: u64) -> Result<Page, FetchError> {
        let url = self.config.page_url(page_number);
        let response = self.get_with_retry(&url).await?;

        if !response.is_success() {
            return Err(FetchError::Status {
                url,
                status: response.status,
            });
        }

        let page = parse_page(&response.body).map_err(|e| FetchError::from_page_error(&url, e))?;

        if page.page_number != page_number {
            return Err(FetchError::PageMismatch {
                requested: page_number,
                received: page.page_number,
            });
        }

        Ok(page)
    }

    async fn get_with_retry(&self, url: &str) -> Result<RawResponse, FetchError> {
        let max_attempts = self.config.max_attempts;
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.transport.get(url).await {
                Ok(response) => return Ok(response),
                Err(err) if err.is_retryable() => {
                    if attempt >= max_attempts {
                        return Err(FetchError::RetriesExhausted {
                            url: url.to_string(),
                            attempts: attempt,
                            last: err,
                        });
                    }
                    tracing::warn!("GET {url} failed ({err}), attempt {attempt}/{max_attempts}. Retrying");
                }
                Err(source) => {
                    return Err(FetchError::Transport {
                        url: url.to_string(),
                        source,
                    });
                }
            }
        }
    }
}
