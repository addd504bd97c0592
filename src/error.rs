//! Extraction failure taxonomy.
//!
//! Three tiers share one enum:
//!
//! - **Extraction** – the generic failure (also used for registry lookups)
//! - **Parsing** – the response did not have the expected shape
//! - **Content not available** – the platform deliberately withholds the content
//!
//! Transport failures raised by a [`Downloader`](crate::downloader::Downloader)
//! are carried as-is in [`Error::Transport`] and never reinterpreted as one
//! of the tiers above.

use std::fmt;

use thiserror::Error;

use crate::downloader::DownloadError;
use crate::extractor::PageStatus;

/// Why a platform refused to serve content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnavailableReason {
    /// Content was taken down or never existed.
    Removed,
    /// Only visible to the uploader or invited accounts.
    Private,
    /// Requires a logged-in account.
    LoginRequired,
    /// Requires the viewer to confirm their age.
    AgeRestricted,
    /// Not served in the requesting country.
    GeoRestricted,
    /// Requires a purchase or subscription.
    Paid,
    /// The uploader's account was terminated.
    AccountTerminated,
    /// Anything the platform did not classify further.
    Other,
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Removed => "removed",
            Self::Private => "private",
            Self::LoginRequired => "login required",
            Self::AgeRestricted => "age restricted",
            Self::GeoRestricted => "geo restricted",
            Self::Paid => "paid content",
            Self::AccountTerminated => "account terminated",
            Self::Other => "unavailable",
        };
        f.write_str(s)
    }
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Generic extraction failure, including registry lookups.
    Extraction,
    /// Upstream response shape did not match expectations.
    Parsing,
    /// Platform intentionally withholds the content.
    ContentNotAvailable,
    /// An accessor was used before a successful fetch.
    Precondition,
    /// The downloader never produced a usable response.
    Transport,
}

/// Errors produced by extraction.
#[derive(Error, Debug)]
pub enum Error {
    #[error("extraction failed: {0}")]
    Extraction(String),

    #[error("parsing failed: {0}")]
    Parsing(String),

    #[error("content not available ({reason}): {message}")]
    ContentNotAvailable {
        reason: UnavailableReason,
        message: String,
    },

    #[error("service not found: {0}")]
    ServiceNotFound(String),

    #[error("no service can handle the url \"{0}\"")]
    UnsupportedUrl(String),

    #[error("page is not fetched (status: {status})")]
    PageNotFetched { status: PageStatus },

    #[error(transparent)]
    Transport(#[from] DownloadError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for [`Error::Parsing`].
    pub fn parsing(msg: impl Into<String>) -> Self {
        Self::Parsing(msg.into())
    }

    /// Shorthand for [`Error::Extraction`].
    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::Extraction(msg.into())
    }

    /// Shorthand for [`Error::ContentNotAvailable`].
    pub fn unavailable(reason: UnavailableReason, msg: impl Into<String>) -> Self {
        Self::ContentNotAvailable {
            reason,
            message: msg.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Extraction(_) | Self::ServiceNotFound(_) | Self::UnsupportedUrl(_) => {
                ErrorKind::Extraction
            }
            Self::Parsing(_) => ErrorKind::Parsing,
            Self::ContentNotAvailable { .. } => ErrorKind::ContentNotAvailable,
            Self::PageNotFetched { .. } => ErrorKind::Precondition,
            Self::Transport(_) => ErrorKind::Transport,
        }
    }

    /// True for every extraction-tier failure, parsing and unavailable included.
    pub fn is_extraction(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Extraction | ErrorKind::Parsing | ErrorKind::ContentNotAvailable
        )
    }

    pub fn is_parsing(&self) -> bool {
        self.kind() == ErrorKind::Parsing
    }

    pub fn is_content_not_available(&self) -> bool {
        self.kind() == ErrorKind::ContentNotAvailable
    }

    pub fn is_transport(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }

    /// The restriction reason, when this is a content-unavailable failure.
    pub fn unavailable_reason(&self) -> Option<UnavailableReason> {
        match self {
            Self::ContentNotAvailable { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Parsing(format!("invalid JSON: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_and_unavailable_are_extraction_failures() {
        assert!(Error::parsing("missing title").is_extraction());
        assert!(Error::unavailable(UnavailableReason::Paid, "buy it").is_extraction());
        assert!(Error::ServiceNotFound("id = 9".into()).is_extraction());
    }

    #[test]
    fn transport_and_precondition_are_not_extraction_failures() {
        let transport = Error::from(DownloadError::Timeout {
            url: "https://example.com".into(),
        });
        assert!(transport.is_transport());
        assert!(!transport.is_extraction());

        let early = Error::PageNotFetched {
            status: PageStatus::Unfetched,
        };
        assert_eq!(early.kind(), ErrorKind::Precondition);
        assert!(!early.is_extraction());
    }

    #[test]
    fn transport_message_is_not_rewrapped() {
        let inner = DownloadError::ReCaptcha {
            url: "https://example.com/x".into(),
        };
        let expected = inner.to_string();
        assert_eq!(Error::from(inner).to_string(), expected);
    }

    #[test]
    fn unavailable_reason_is_exposed() {
        let err = Error::unavailable(UnavailableReason::GeoRestricted, "not in your country");
        assert_eq!(err.unavailable_reason(), Some(UnavailableReason::GeoRestricted));
        assert!(err.to_string().contains("geo restricted"));
        assert_eq!(Error::parsing("x").unavailable_reason(), None);
    }
}
