//! Bandcamp.
//!
//! Albums and tracks are scraped from their public pages; no API key or
//! account is needed. Artist pages are classified but have no extractor.
//!
//! # Example
//!
//! ```rust,no_run
//! use pipex::{Context, Extractor, HttpDownloader, StreamExtractor};
//!
//! # fn example() -> anyhow::Result<()> {
//! let ctx = Context::init(HttpDownloader::new()?);
//! let mut track = ctx.stream_extractor("https://macbenson.bandcamp.com/track/thunder")?;
//! track.fetch_page()?;
//!
//! for stream in track.audio_streams()? {
//!     println!("{} {}", stream.format, stream.url);
//! }
//! # Ok(())
//! # }
//! ```

mod links;
mod page;
mod playlist;
mod stream;

pub use links::{BandcampChannelLinks, BandcampPlaylistLinks, BandcampStreamLinks};
pub use playlist::BandcampPlaylistExtractor;
pub use stream::BandcampStreamExtractor;

use crate::context::Context;
use crate::error::Result;
use crate::extractor::{PlaylistExtractor, StreamExtractor};
use crate::linkhandler::{normalize_url, LinkHandlerFactory};
use crate::service::{MediaCapability, ServiceInfo, StreamingService};

pub const SERVICE_ID: u32 = 4;

/// `https://<artist>.bandcamp.com` for any URL on an artist host.
pub(crate) fn artist_base_url(url: &str) -> String {
    normalize_url(url)
        .and_then(|u| u.host_str().map(|host| format!("{}://{host}", u.scheme())))
        .unwrap_or_default()
}

pub struct BandcampService {
    info: ServiceInfo,
    streams: BandcampStreamLinks,
    channels: BandcampChannelLinks,
    playlists: BandcampPlaylistLinks,
}

impl BandcampService {
    pub fn new() -> Self {
        Self {
            info: ServiceInfo::new("Bandcamp", vec![MediaCapability::Audio]),
            streams: BandcampStreamLinks,
            channels: BandcampChannelLinks,
            playlists: BandcampPlaylistLinks,
        }
    }
}

impl Default for BandcampService {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamingService for BandcampService {
    fn id(&self) -> u32 {
        SERVICE_ID
    }

    fn info(&self) -> &ServiceInfo {
        &self.info
    }

    fn stream_links(&self) -> Option<&dyn LinkHandlerFactory> {
        Some(&self.streams)
    }

    fn channel_links(&self) -> Option<&dyn LinkHandlerFactory> {
        Some(&self.channels)
    }

    fn playlist_links(&self) -> Option<&dyn LinkHandlerFactory> {
        Some(&self.playlists)
    }

    fn stream_extractor(&self, ctx: &Context, url: &str) -> Result<Box<dyn StreamExtractor>> {
        let link = self.streams.from_url(url)?;
        Ok(Box::new(BandcampStreamExtractor::new(ctx, link)))
    }

    fn playlist_extractor(
        &self,
        ctx: &Context,
        url: &str,
    ) -> Result<Box<dyn PlaylistExtractor>> {
        let link = self.playlists.from_url(url)?;
        Ok(Box::new(BandcampPlaylistExtractor::new(ctx, link)))
    }
}
