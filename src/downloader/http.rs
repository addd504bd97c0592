//! Blocking HTTP transport.
//!
//! Features:
//! - TLS 1.3 via rustls
//! - Brotli, Zstd, Gzip compression (auto-negotiated)
//! - Connection pooling with keep-alive
//! - Cookie store shared across requests

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use tracing::{debug, info, instrument};

use super::{DownloadError, Downloader, Headers, Request, Response};

/// Firefox ESR on Linux; most platforms serve their regular HTML to it.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Transport settings for [`HttpDownloader`].
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub max_redirects: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(30),
            max_redirects: 10,
        }
    }
}

/// [`Downloader`] backed by a blocking `reqwest` client.
///
/// HTTP 429 is reported as [`DownloadError::ReCaptcha`]; every other status
/// is returned as a [`Response`] so extractors can interpret it.
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    pub fn new() -> Result<Self, DownloadError> {
        Self::with_config(&HttpConfig::default())
    }

    pub fn with_config(config: &HttpConfig) -> Result<Self, DownloadError> {
        let mut headers = HeaderMap::new();
        let agent = HeaderValue::from_str(&config.user_agent)
            .unwrap_or(HeaderValue::from_static(DEFAULT_USER_AGENT));
        headers.insert(USER_AGENT, agent);

        let client = Client::builder()
            // Keep connections alive for reuse
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .brotli(true)
            .zstd(true)
            .gzip(true)
            .deflate(true)
            .default_headers(headers)
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .cookie_store(true)
            .build()
            .map_err(|e| DownloadError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Get the underlying reqwest client
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

impl Downloader for HttpDownloader {
    #[instrument(skip(self, request), fields(url = %request.url(), method = %request.method()))]
    fn execute(&self, request: &Request) -> Result<Response, DownloadError> {
        debug!("Executing request");
        let url = request.url();

        let mut builder = self.client.request(request.method().clone(), url);
        for (name, values) in request.headers() {
            let Ok(name) = HeaderName::from_bytes(name.as_bytes()) else {
                return Err(DownloadError::Other(format!("invalid header name: {name}")));
            };
            for value in values {
                let value = HeaderValue::from_str(value).map_err(|_| {
                    DownloadError::Other(format!("invalid value for header {name}"))
                })?;
                builder = builder.header(name.clone(), value);
            }
        }
        if let Some(body) = request.body() {
            builder = builder.body(body.to_vec());
        }

        let response = builder.send().map_err(|e| map_reqwest_error(url, &e))?;
        let status = response.status();

        info!(
            status = %status,
            version = ?response.version(),
            "Response received"
        );

        if status.as_u16() == 429 {
            return Err(DownloadError::ReCaptcha {
                url: url.to_string(),
            });
        }

        let latest_url = response.url().to_string();
        let mut headers = Headers::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers
                    .entry(name.as_str().to_string())
                    .or_default()
                    .push(value.to_string());
            }
        }

        let body = response.bytes().map_err(|e| map_reqwest_error(url, &e))?;

        Ok(Response::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            headers,
            body.to_vec(),
            latest_url,
        ))
    }
}

fn map_reqwest_error(url: &str, err: &reqwest::Error) -> DownloadError {
    if err.is_timeout() {
        DownloadError::Timeout {
            url: url.to_string(),
        }
    } else if err.is_connect() {
        DownloadError::Connection {
            url: url.to_string(),
            message: err.to_string(),
        }
    } else if let Some(status) = err.status() {
        DownloadError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        }
    } else {
        DownloadError::Other(err.to_string())
    }
}
