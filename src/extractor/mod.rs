//! The lazy fetch-then-read extractor protocol.
//!
//! Every extractor is bound to one URL and one service at construction and
//! does no I/O until [`Extractor::fetch_page`] is called. That single call
//! moves it from [`PageStatus::Unfetched`] to either
//! [`PageStatus::Fetched`] or [`PageStatus::Failed`]; content accessors
//! only answer in the `Fetched` state and return
//! [`Error::PageNotFetched`](crate::Error::PageNotFetched) otherwise.
//!
//! # Architecture
//!
//! - [`ExtractorState`]: the state machine platforms embed (composition,
//!   no base class)
//! - [`Extractor`]: capabilities shared by all extractors
//! - [`ListExtractor`]: the paginated-listing protocol
//! - [`PlaylistExtractor`] / [`StreamExtractor`]: content-specific accessors
//!
//! # Concurrency
//!
//! Extraction is blocking: `fetch_page` and `page` hold the calling thread
//! for the round trip plus parsing. Calling `fetch_page` again re-fetches
//! and overwrites the previous result. Fetching the same instance from two
//! threads at once is the caller's responsibility to avoid; `&mut self`
//! makes it impossible without external locking.

mod state;

use std::fmt;

pub use state::ExtractorState;

use crate::error::Result;
use crate::items::{StreamInfoItem, StreamType};
use crate::linkhandler::LinkHandler;
use crate::listing::{InfoItemsPage, Page};
use crate::localization::{ContentCountry, DateWrapper, Localization};

/// Lifecycle of an extractor's page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageStatus {
    #[default]
    Unfetched,
    Fetched,
    Failed,
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unfetched => f.write_str("unfetched"),
            Self::Fetched => f.write_str("fetched"),
            Self::Failed => f.write_str("failed"),
        }
    }
}

/// Capabilities every extractor has.
pub trait Extractor: Send {
    fn service_id(&self) -> u32;

    fn link_handler(&self) -> &LinkHandler;

    fn status(&self) -> PageStatus;

    /// Perform the one request this extractor needs, then parse it.
    ///
    /// Fails with [`Error::ContentNotAvailable`](crate::Error::ContentNotAvailable)
    /// when the platform withholds the content,
    /// [`Error::Parsing`](crate::Error::Parsing) when the response has an
    /// unexpected shape, and passes [`Error::Transport`](crate::Error::Transport)
    /// through untouched.
    fn fetch_page(&mut self) -> Result<()>;

    fn name(&self) -> Result<String>;

    /// Use `localization` instead of the context preference for later fetches.
    fn force_localization(&mut self, localization: Localization);

    /// Use `country` instead of the context preference for later fetches.
    fn force_content_country(&mut self, country: ContentCountry);

    fn is_page_fetched(&self) -> bool {
        self.status() == PageStatus::Fetched
    }

    fn url(&self) -> &str {
        &self.link_handler().url
    }

    fn original_url(&self) -> &str {
        &self.link_handler().original_url
    }

    fn id(&self) -> &str {
        &self.link_handler().id
    }
}

/// The paginated-listing protocol.
pub trait ListExtractor<I>: Extractor {
    /// First page, built from the already fetched response.
    fn initial_page(&self) -> Result<InfoItemsPage<I>>;

    /// Request the page behind `page`.
    ///
    /// Callers check [`InfoItemsPage::has_next_page`] first; the token is
    /// only meaningful to the platform that produced it.
    fn page(&self, page: &Page) -> Result<InfoItemsPage<I>>;
}

/// Albums, playlists and other ordered stream collections.
///
/// Every accessor here reads the fetched page only and never triggers a
/// further request.
pub trait PlaylistExtractor: ListExtractor<StreamInfoItem> {
    fn thumbnail_url(&self) -> Result<Option<String>>;

    fn banner_url(&self) -> Result<Option<String>>;

    fn uploader_url(&self) -> Result<Option<String>>;

    fn uploader_name(&self) -> Result<Option<String>>;

    fn uploader_avatar_url(&self) -> Result<Option<String>>;

    fn is_uploader_verified(&self) -> Result<bool> {
        Ok(false)
    }

    fn stream_count(&self) -> Result<u64>;
}

/// An uploader's page: profile metadata plus their streams, newest first.
pub trait ChannelExtractor: ListExtractor<StreamInfoItem> {
    fn avatar_url(&self) -> Result<Option<String>>;

    fn banner_url(&self) -> Result<Option<String>>;

    fn description(&self) -> Result<Option<String>>;

    fn subscriber_count(&self) -> Result<Option<u64>> {
        Ok(None)
    }

    fn is_verified(&self) -> Result<bool> {
        Ok(false)
    }
}

/// A playable audio rendition.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AudioStream {
    pub url: String,
    /// Container or codec label, e.g. `"mp3"`.
    pub format: String,
    /// Average bitrate in kbit/s, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitrate_kbps: Option<u32>,
}

/// A single stream page (track, video, episode).
pub trait StreamExtractor: Extractor {
    fn stream_type(&self) -> Result<StreamType>;

    fn thumbnail_url(&self) -> Result<Option<String>>;

    fn uploader_name(&self) -> Result<Option<String>>;

    fn uploader_url(&self) -> Result<Option<String>>;

    fn duration_secs(&self) -> Result<Option<u64>>;

    fn view_count(&self) -> Result<Option<u64>> {
        Ok(None)
    }

    fn upload_date(&self) -> Result<Option<DateWrapper>>;

    fn description(&self) -> Result<Option<String>>;

    fn audio_streams(&self) -> Result<Vec<AudioStream>>;
}
