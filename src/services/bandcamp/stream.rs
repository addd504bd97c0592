//! Bandcamp tracks.

use super::page::{self, TrackInfo, TralbumPage};
use super::{artist_base_url, SERVICE_ID};
use crate::context::Context;
use crate::downloader::Response;
use crate::error::{Error, Result, UnavailableReason};
use crate::extractor::{AudioStream, Extractor, ExtractorState, PageStatus, StreamExtractor};
use crate::items::StreamType;
use crate::linkhandler::LinkHandler;
use crate::localization::{ContentCountry, DateWrapper, Localization};

pub struct BandcampStreamExtractor {
    state: ExtractorState<TralbumPage>,
    artist_url: String,
}

impl BandcampStreamExtractor {
    pub fn new(ctx: &Context, link: LinkHandler) -> Self {
        let artist_url = artist_base_url(&link.url);
        Self {
            state: ExtractorState::new(ctx, SERVICE_ID, link),
            artist_url,
        }
    }

    fn track_page(&self) -> Result<&TralbumPage> {
        self.state.document()
    }

    fn track(&self) -> Result<&TrackInfo> {
        self.track_page()?
            .tralbum
            .tracks()
            .first()
            .ok_or_else(|| Error::parsing("track page lists no track"))
    }
}

/// A track page lists exactly its own track; without a streamable file
/// the track is only available to buyers.
fn parse_track(response: &Response) -> Result<TralbumPage> {
    let track = page::parse_response(response)?;
    let streamable = track
        .tralbum
        .tracks()
        .first()
        .is_some_and(|t| t.file.as_ref().is_some_and(|f| !f.is_empty()));
    if !streamable {
        return Err(Error::unavailable(
            UnavailableReason::Paid,
            "track is not available for free streaming",
        ));
    }
    Ok(track)
}

impl Extractor for BandcampStreamExtractor {
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
        self.state.fetch(&request, parse_track)
    }

    fn name(&self) -> Result<String> {
        let page = self.track_page()?;
        page.tralbum
            .current
            .title
            .clone()
            .or_else(|| self.track().ok().and_then(|t| t.title.clone()))
            .ok_or_else(|| Error::parsing("track has no title"))
    }

    fn force_localization(&mut self, localization: Localization) {
        self.state.force_localization(localization);
    }

    fn force_content_country(&mut self, country: ContentCountry) {
        self.state.force_content_country(country);
    }
}

impl StreamExtractor for BandcampStreamExtractor {
    fn stream_type(&self) -> Result<StreamType> {
        self.track_page()?;
        Ok(StreamType::AudioStream)
    }

    fn thumbnail_url(&self) -> Result<Option<String>> {
        Ok(self.track_page()?.tralbum.thumbnail_url())
    }

    fn uploader_name(&self) -> Result<Option<String>> {
        Ok(self.track_page()?.tralbum.artist.clone())
    }

    fn uploader_url(&self) -> Result<Option<String>> {
        self.track_page()?;
        Ok(Some(self.artist_url.clone()))
    }

    fn duration_secs(&self) -> Result<Option<u64>> {
        Ok(self.track()?.duration_secs())
    }

    fn upload_date(&self) -> Result<Option<DateWrapper>> {
        self.track_page()?
            .tralbum
            .current
            .publish_date
            .as_deref()
            .map(page::parse_publish_date)
            .transpose()
    }

    /// `about` and `credits` joined by a blank line.
    fn description(&self) -> Result<Option<String>> {
        let current = &self.track_page()?.tralbum.current;
        let parts: Vec<&str> = [current.about.as_deref(), current.credits.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .collect();
        Ok((!parts.is_empty()).then(|| parts.join("\n\n")))
    }

    fn audio_streams(&self) -> Result<Vec<AudioStream>> {
        let Some(files) = &self.track()?.file else {
            return Ok(Vec::new());
        };
        let mut streams: Vec<AudioStream> = files
            .iter()
            .map(|(key, url)| {
                // Keys look like "mp3-128" / "mp3-v0"
                let (format, quality) = key.split_once('-').unwrap_or((key.as_str(), ""));
                AudioStream {
                    url: url.clone(),
                    format: format.to_string(),
                    bitrate_kbps: quality.parse().ok(),
                }
            })
            .collect();
        streams.sort_by(|a, b| b.bitrate_kbps.cmp(&a.bitrate_kbps).then(a.url.cmp(&b.url)));
        Ok(streams)
    }
}
