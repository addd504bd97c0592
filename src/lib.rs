//! `pipex` - Platform-agnostic content extraction
//!
//! # Features
//!
//! - **Service registry**: URL dispatch to the first platform whose link patterns match
//! - **Pluggable transport**: every request goes through a [`Downloader`] the host supplies
//! - **Lazy extractors**: one fetch per extractor, then cheap reads; listings paginate on demand
//! - **Localization**: language and country sent with every request, overridable per extractor
//!
//! # Example
//!
//! ```rust,no_run
//! use pipex::{Context, Extractor, HttpDownloader, ListExtractor, PlaylistExtractor};
//!
//! fn main() -> anyhow::Result<()> {
//!     let ctx = Context::init(HttpDownloader::new()?);
//!     let mut album = ctx.playlist_extractor("https://macbenson.bandcamp.com/album/coming-of-age")?;
//!     album.fetch_page()?;
//!
//!     println!("{} ({} tracks)", album.name()?, album.stream_count()?);
//!     for track in album.initial_page()?.items {
//!         println!("  {}", track.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod context;
pub mod downloader;
pub mod error;
pub mod extractor;
pub mod items;
pub mod linkhandler;
pub mod listing;
pub mod localization;
pub mod service;
pub mod services;

pub use context::Context;
pub use downloader::{DownloadError, Downloader, HttpDownloader, MockDownloader, Request, Response};
pub use error::{Error, ErrorKind, Result, UnavailableReason};
pub use extractor::{
    AudioStream, ChannelExtractor, Extractor, ExtractorState, ListExtractor, PageStatus,
    PlaylistExtractor, StreamExtractor,
};
pub use items::{InfoType, StreamInfoItem, StreamType};
pub use linkhandler::{LinkHandler, LinkHandlerFactory};
pub use listing::{InfoItemsCollector, InfoItemsPage, Page, PageWalker};
pub use localization::{ContentCountry, DateWrapper, Localization};
pub use service::{LinkType, MediaCapability, ServiceInfo, ServiceRegistry, StreamingService};
pub use services::BandcampService;

/// Version of pipex
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
