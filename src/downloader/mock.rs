//! In-memory [`Downloader`] serving canned responses.
//!
//! Useful for offline tests and for hosts that replay recorded traffic.
//! Every executed request is recorded so callers can assert how many
//! round trips an operation cost.

use std::collections::HashMap;

use parking_lot::Mutex;

use super::{DownloadError, Downloader, Request, Response};

#[derive(Debug, Clone)]
enum Fixture {
    Respond(Response),
    Fail(DownloadError),
}

/// Canned responses keyed by exact request URL.
///
/// Unknown URLs answer with [`DownloadError::HttpStatus`] 404.
#[derive(Debug, Default)]
pub struct MockDownloader {
    fixtures: HashMap<String, Fixture>,
    log: Mutex<Vec<Request>>,
}

impl MockDownloader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with status 200 for `url`.
    #[must_use]
    pub fn with_page(self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.with_response(url, Response::ok(url, body))
    }

    #[must_use]
    pub fn with_response(mut self, url: &str, response: Response) -> Self {
        self.fixtures
            .insert(url.to_string(), Fixture::Respond(response));
        self
    }

    /// Fail every request for `url` with `error`.
    #[must_use]
    pub fn with_error(mut self, url: &str, error: DownloadError) -> Self {
        self.fixtures.insert(url.to_string(), Fixture::Fail(error));
        self
    }

    /// Number of requests executed so far.
    pub fn request_count(&self) -> usize {
        self.log.lock().len()
    }

    /// Snapshot of executed requests, oldest first.
    pub fn requests(&self) -> Vec<Request> {
        self.log.lock().clone()
    }
}

impl Downloader for MockDownloader {
    fn execute(&self, request: &Request) -> Result<Response, DownloadError> {
        self.log.lock().push(request.clone());
        tracing::debug!("Mock request: {} {}", request.method(), request.url());

        match self.fixtures.get(request.url()) {
            Some(Fixture::Respond(response)) => Ok(response.clone()),
            Some(Fixture::Fail(error)) => Err(error.clone()),
            None => Err(DownloadError::HttpStatus {
                url: request.url().to_string(),
                status: 404,
            }),
        }
    }
}
