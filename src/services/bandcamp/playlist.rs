//! Bandcamp albums.

use tracing::debug;

use super::page::{self, TralbumPage};
use super::{artist_base_url, SERVICE_ID};
use crate::context::Context;
use crate::error::{Error, Result, UnavailableReason};
use crate::extractor::{Extractor, ExtractorState, ListExtractor, PageStatus, PlaylistExtractor};
use crate::items::{StreamInfoItem, StreamType};
use crate::linkhandler::LinkHandler;
use crate::listing::{InfoItemsCollector, InfoItemsPage, Page};
use crate::localization::{ContentCountry, Localization};

/// An album page: every track is in the first response, so the listing
/// is a single page without continuation.
pub struct BandcampPlaylistExtractor {
    state: ExtractorState<TralbumPage>,
    artist_url: String,
}

impl BandcampPlaylistExtractor {
    pub fn new(ctx: &Context, link: LinkHandler) -> Self {
        let artist_url = artist_base_url(&link.url);
        Self {
            state: ExtractorState::new(ctx, SERVICE_ID, link),
            artist_url,
        }
    }

    fn album(&self) -> Result<&TralbumPage> {
        self.state.document()
    }
}

/// An album without tracks is one the visitor has to buy first.
fn parse_album(response: &crate::downloader::Response) -> Result<TralbumPage> {
    let album = page::parse_response(response)?;
    if album.tralbum.tracks().is_empty() {
        return Err(Error::unavailable(
            UnavailableReason::Paid,
            "album needs to be purchased",
        ));
    }
    Ok(album)
}

impl Extractor for BandcampPlaylistExtractor {
    fn service_id(&self) -> u32 {
        self.state.service_id()
    }

    fn link_handler(&self) -> &LinkHandler {
        self.state.link_handler()
    }

    fn status(&self) -> PageStatus {
        self.state.status()
    }

    fn fetch_page(&mut self) -> Result<()> {
        let request = self.state.request(self.url()).build();
        self.state.fetch(&request, parse_album)
    }

    fn name(&self) -> Result<String> {
        self.album()?
            .tralbum
            .current
            .title
            .clone()
            .ok_or_else(|| Error::parsing("album has no title"))
    }

    fn force_localization(&mut self, localization: Localization) {
        self.state.force_localization(localization);
    }

    fn force_content_country(&mut self, country: ContentCountry) {
        self.state.force_content_country(country);
    }
}

impl ListExtractor<StreamInfoItem> for BandcampPlaylistExtractor {
    fn initial_page(&self) -> Result<InfoItemsPage<StreamInfoItem>> {
        let album = self.album()?;
        let cover = album.tralbum.thumbnail_url();

        let mut collector = InfoItemsCollector::new();
        for track in album.tralbum.tracks() {
            collector.commit(track_item(track, album, &self.artist_url, cover.as_deref()));
        }
        debug!("Album lists {} tracks", collector.len());

        Ok(collector.into_page(None))
    }

    /// Albums never hand out continuation tokens, so there is nothing
    /// behind any token.
    fn page(&self, _page: &Page) -> Result<InfoItemsPage<StreamInfoItem>> {
        Ok(InfoItemsPage::empty())
    }
}

fn track_item(
    track: &page::TrackInfo,
    album: &TralbumPage,
    artist_url: &str,
    cover: Option<&str>,
) -> Result<StreamInfoItem> {
    let name = track
        .title
        .clone()
        .ok_or_else(|| Error::parsing("track has no title"))?;
    let link = track
        .title_link
        .as_deref()
        .ok_or_else(|| Error::parsing(format!("track \"{name}\" has no link")))?;

    let mut item = StreamInfoItem::new(
        SERVICE_ID,
        format!("{artist_url}{link}"),
        name,
        StreamType::AudioStream,
    );
    item.thumbnail_url = track
        .art_id
        .map(page::art_url)
        .or_else(|| cover.map(str::to_string));
    item.uploader_name.clone_from(&album.tralbum.artist);
    item.uploader_url = Some(artist_url.to_string());
    item.duration_secs = track.duration_secs();
    Ok(item)
}

impl PlaylistExtractor for BandcampPlaylistExtractor {
    fn thumbnail_url(&self) -> Result<Option<String>> {
        Ok(self.album()?.tralbum.thumbnail_url())
    }

    /// Album pages have no banner.
    fn banner_url(&self) -> Result<Option<String>> {
        self.album()?;
        Ok(None)
    }

    fn uploader_url(&self) -> Result<Option<String>> {
        self.album()?;
        Ok(Some(self.artist_url.clone()))
    }

    fn uploader_name(&self) -> Result<Option<String>> {
        Ok(self.album()?.tralbum.artist.clone())
    }

    fn uploader_avatar_url(&self) -> Result<Option<String>> {
        Ok(self.album()?.band_photo_url.clone())
    }

    fn stream_count(&self) -> Result<u64> {
        Ok(self.album()?.tralbum.tracks().len() as u64)
    }
}
