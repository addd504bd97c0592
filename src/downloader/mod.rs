//! Network access contract.
//!
//! The core never talks to the network itself. A host application supplies
//! a [`Downloader`] that turns a [`Request`] into a [`Response`]; retries,
//! caching, rate limiting and timeouts are the implementation's business.
//!
//! # Implementations
//!
//! - [`HttpDownloader`]: blocking `reqwest` transport with rustls and compression
//! - [`MockDownloader`]: canned responses keyed by URL, records every request

pub mod http;
pub mod mock;

use std::collections::BTreeMap;

use thiserror::Error;

use crate::localization::{ContentCountry, Localization};

pub use self::http::HttpDownloader;
pub use self::mock::MockDownloader;
pub use ::http::Method;

/// Header map keyed by header name; a name may carry several values.
pub type Headers = BTreeMap<String, Vec<String>>;

/// Transport-level failure raised by a [`Downloader`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DownloadError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("connection to {url} failed: {message}")]
    Connection { url: String, message: String },

    #[error("{url} answered with HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("{url} demands a captcha (rate limited or bot wall)")]
    ReCaptcha { url: String },

    #[error("download failed: {0}")]
    Other(String),
}

/// An immutable outgoing HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    url: String,
    headers: Headers,
    body: Option<Vec<u8>>,
    localization: Option<Localization>,
    content_country: Option<ContentCountry>,
}

impl Request {
    pub fn builder(method: Method, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder {
            method,
            url: url.into(),
            headers: Headers::new(),
            body: None,
            localization: None,
            content_country: None,
            automatic_localization_header: true,
        }
    }

    pub fn get(url: impl Into<String>) -> RequestBuilder {
        Self::builder(Method::GET, url)
    }

    pub fn head(url: impl Into<String>) -> RequestBuilder {
        Self::builder(Method::HEAD, url)
    }

    pub fn post(url: impl Into<String>) -> RequestBuilder {
        Self::builder(Method::POST, url)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// First value of a header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        first_header(&self.headers, name)
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub fn localization(&self) -> Option<&Localization> {
        self.localization.as_ref()
    }

    /// Content country the caller asked for. Carried for the downloader and
    /// for services that encode it into the URL or body; no header is derived.
    pub fn content_country(&self) -> Option<&ContentCountry> {
        self.content_country.as_ref()
    }
}

/// Builder for [`Request`].
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: String,
    headers: Headers,
    body: Option<Vec<u8>>,
    localization: Option<Localization>,
    content_country: Option<ContentCountry>,
    automatic_localization_header: bool,
}

impl RequestBuilder {
    /// Append a header value, keeping earlier values of the same name.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }

    #[must_use]
    pub fn headers(mut self, headers: Headers) -> Self {
        for (name, values) in headers {
            self.headers.entry(name).or_default().extend(values);
        }
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub fn localization(mut self, localization: Localization) -> Self {
        self.localization = Some(localization);
        self
    }

    #[must_use]
    pub fn content_country(mut self, country: ContentCountry) -> Self {
        self.content_country = Some(country);
        self
    }

    /// Whether `build` derives `Accept-Language` from the localization.
    #[must_use]
    pub fn automatic_localization_header(mut self, enabled: bool) -> Self {
        self.automatic_localization_header = enabled;
        self
    }

    pub fn build(mut self) -> Request {
        if self.automatic_localization_header {
            if let Some(loc) = &self.localization {
                if first_header(&self.headers, "accept-language").is_none() {
                    self.headers
                        .insert("Accept-Language".to_string(), vec![loc.accept_language()]);
                }
            }
        }

        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
            localization: self.localization,
            content_country: self.content_country,
        }
    }
}

/// A response handed back by a [`Downloader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    status_message: String,
    headers: Headers,
    body: Vec<u8>,
    latest_url: String,
}

impl Response {
    pub fn new(
        status: u16,
        status_message: impl Into<String>,
        headers: Headers,
        body: impl Into<Vec<u8>>,
        latest_url: impl Into<String>,
    ) -> Self {
        Self {
            status,
            status_message: status_message.into(),
            headers,
            body: body.into(),
            latest_url: latest_url.into(),
        }
    }

    /// `200 OK` with the given body, as served from `url`.
    pub fn ok(url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, "OK", Headers::new(), body, url)
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// First value of a header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        first_header(&self.headers, name)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// URL after redirects.
    pub fn latest_url(&self) -> &str {
        &self.latest_url
    }
}

fn first_header<'a>(headers: &'a Headers, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .and_then(|(_, values)| values.first())
        .map(String::as_str)
}

/// Performs the actual network call for the core.
///
/// Implementations must be safe to share between threads. Anything the
/// implementation considers a transport failure (timeouts, refused
/// connections, statuses it does not want to pass on) is reported as a
/// [`DownloadError`]; the core propagates it unchanged.
pub trait Downloader: Send + Sync {
    fn execute(&self, request: &Request) -> Result<Response, DownloadError>;

    fn get(
        &self,
        url: &str,
        localization: Option<&Localization>,
    ) -> Result<Response, DownloadError> {
        let mut builder = Request::get(url);
        if let Some(loc) = localization {
            builder = builder.localization(loc.clone());
        }
        self.execute(&builder.build())
    }

    fn head(&self, url: &str) -> Result<Response, DownloadError> {
        self.execute(&Request::head(url).build())
    }

    fn post(&self, url: &str, headers: Headers, body: Vec<u8>) -> Result<Response, DownloadError> {
        self.execute(&Request::post(url).headers(headers).body(body).build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_adds_accept_language_from_localization() {
        let req = Request::get("https://example.com")
            .localization(Localization::new("de", Some("DE".into())))
            .build();
        assert_eq!(req.header("accept-language"), Some("de-DE, de;q=0.9"));
        assert_eq!(req.method(), &Method::GET);
    }

    #[test]
    fn explicit_accept_language_wins() {
        let req = Request::get("https://example.com")
            .header("Accept-Language", "fr")
            .localization(Localization::default())
            .build();
        assert_eq!(req.headers()["Accept-Language"], vec!["fr".to_string()]);
    }

    #[test]
    fn automatic_header_can_be_disabled() {
        let req = Request::get("https://example.com")
            .localization(Localization::default())
            .automatic_localization_header(false)
            .build();
        assert!(req.header("Accept-Language").is_none());
        assert!(req.localization().is_some());
    }

    #[test]
    fn content_country_is_carried_without_a_header() {
        let req = Request::get("https://example.com")
            .localization(Localization::default())
            .content_country(ContentCountry::new("jp"))
            .build();
        assert_eq!(req.content_country(), Some(&ContentCountry::new("JP")));
        assert_eq!(req.headers().len(), 1);

        let bare = Request::get("https://example.com").build();
        assert!(bare.content_country().is_none());
    }

    #[test]
    fn repeated_headers_keep_all_values() {
        let req = Request::post("https://example.com")
            .header("Cookie", "a=1")
            .header("Cookie", "b=2")
            .body("payload")
            .build();
        assert_eq!(req.headers()["Cookie"].len(), 2);
        assert_eq!(req.body(), Some(&b"payload"[..]));
    }

    #[test]
    fn response_accessors() {
        let mut headers = Headers::new();
        headers.insert("Content-Type".into(), vec!["text/html".into()]);
        let resp = Response::new(404, "Not Found", headers, "gone", "https://example.com/x");
        assert!(!resp.is_success());
        assert_eq!(resp.header("content-type"), Some("text/html"));
        assert_eq!(resp.text(), "gone");
        assert_eq!(resp.latest_url(), "https://example.com/x");
    }
}
