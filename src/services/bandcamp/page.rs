//! Album and track page parsing.
//!
//! Bandcamp embeds everything the player needs as JSON in the
//! `data-tralbum` attribute of a script tag. The artist picture is only
//! in the HTML (`img.band-photo`).

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use scraper::{Html, Selector};
use serde::Deserialize;

use crate::downloader::Response;
use crate::error::{Error, Result, UnavailableReason};
use crate::localization::DateWrapper;

static TRALBUM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[data-tralbum]").expect("valid selector"));
static BAND_PHOTO: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img.band-photo").expect("valid selector"));

const IMAGE_BASE: &str = "https://f4.bcbits.com/img";

/// Cover art URL for an `art_id`.
pub(crate) fn art_url(art_id: u64) -> String {
    format!("{IMAGE_BASE}/a{art_id}_10.jpg")
}

/// The parsed `data-tralbum` document plus the bits taken from HTML.
#[derive(Debug, Clone)]
pub(crate) struct TralbumPage {
    pub tralbum: Tralbum,
    pub band_photo_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Tralbum {
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub art_id: Option<u64>,
    pub current: TralbumCurrent,
    #[serde(default)]
    trackinfo: Option<Vec<TrackInfo>>,
}

impl Tralbum {
    pub fn tracks(&self) -> &[TrackInfo] {
        self.trackinfo.as_deref().unwrap_or_default()
    }

    pub fn thumbnail_url(&self) -> Option<String> {
        self.art_id.map(art_url)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TralbumCurrent {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub publish_date: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub credits: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TrackInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_link: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub art_id: Option<u64>,
    #[serde(default)]
    pub file: Option<HashMap<String, String>>,
}

impl TrackInfo {
    /// Whole seconds; zero or missing durations are unknown.
    pub fn duration_secs(&self) -> Option<u64> {
        self.duration
            .filter(|d| d.is_finite() && *d > 0.0)
            .map(|d| d.round() as u64)
    }
}

/// Parse an album or track page response.
///
/// A 404 means the release was taken down; any other non-success status
/// is an extraction failure.
pub(crate) fn parse_response(response: &Response) -> Result<TralbumPage> {
    match response.status() {
        404 => {
            return Err(Error::unavailable(
                UnavailableReason::Removed,
                format!("{} does not exist", response.latest_url()),
            ))
        }
        status if !(200..300).contains(&status) => {
            return Err(Error::extraction(format!(
                "unexpected HTTP {status} from {}",
                response.latest_url()
            )))
        }
        _ => {}
    }
    parse_html(&response.text())
}

pub(crate) fn parse_html(html: &str) -> Result<TralbumPage> {
    let document = Html::parse_document(html);

    let raw = document
        .select(&TRALBUM)
        .find_map(|el| el.value().attr("data-tralbum"))
        .ok_or_else(|| Error::parsing("page has no data-tralbum attribute"))?;
    let tralbum: Tralbum = serde_json::from_str(raw)?;

    let band_photo_url = document
        .select(&BAND_PHOTO)
        .find_map(|el| el.value().attr("src"))
        .filter(|src| !src.is_empty())
        .map(str::to_string);

    Ok(TralbumPage {
        tralbum,
        band_photo_url,
    })
}

/// `"01 Jan 2020 00:00:00 GMT"` as used in `current.publish_date`.
pub(crate) fn parse_publish_date(raw: &str) -> Result<DateWrapper> {
    NaiveDateTime::parse_from_str(raw.trim(), "%d %b %Y %H:%M:%S GMT")
        .map(|naive| DateWrapper::exact(naive.and_utc()))
        .map_err(|e| Error::parsing(format!("bad publish date \"{raw}\": {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    const PAGE: &str = r#"<html><body>
        <img class="band-photo" src="https://f4.bcbits.com/img/0012_21.jpg">
        <script data-tralbum="{&quot;artist&quot;:&quot;mac benson&quot;,&quot;art_id&quot;:123,&quot;current&quot;:{&quot;title&quot;:&quot;Coming of Age&quot;},&quot;trackinfo&quot;:[{&quot;title&quot;:&quot;One&quot;,&quot;title_link&quot;:&quot;/track/one&quot;,&quot;duration&quot;:61.4}]}"></script>
    </body></html>"#;

    #[test]
    fn parses_embedded_tralbum() {
        let page = parse_html(PAGE).unwrap();
        assert_eq!(page.tralbum.artist.as_deref(), Some("mac benson"));
        assert_eq!(page.tralbum.current.title.as_deref(), Some("Coming of Age"));
        assert_eq!(page.tralbum.tracks().len(), 1);
        assert_eq!(page.tralbum.tracks()[0].duration_secs(), Some(61));
        assert_eq!(
            page.tralbum.thumbnail_url().as_deref(),
            Some("https://f4.bcbits.com/img/a123_10.jpg")
        );
        assert_eq!(
            page.band_photo_url.as_deref(),
            Some("https://f4.bcbits.com/img/0012_21.jpg")
        );
    }

    #[test]
    fn missing_tralbum_is_a_parsing_error() {
        let err = parse_html("<html><body><p>maintenance</p></body></html>").unwrap_err();
        assert!(err.is_parsing());
    }

    #[test]
    fn malformed_tralbum_json_is_a_parsing_error() {
        let err = parse_html(r#"<div data-tralbum="{not json"></div>"#).unwrap_err();
        assert!(err.is_parsing());

        // `current` is required
        let err = parse_html(r#"<div data-tralbum="{&quot;artist&quot;:&quot;x&quot;}"></div>"#)
            .unwrap_err();
        assert!(err.is_parsing());
    }

    #[test]
    fn null_trackinfo_means_no_tracks() {
        let page = parse_html(
            r#"<div data-tralbum="{&quot;current&quot;:{},&quot;trackinfo&quot;:null}"></div>"#,
        )
        .unwrap();
        assert!(page.tralbum.tracks().is_empty());
        assert!(page.band_photo_url.is_none());
    }

    #[test]
    fn removed_release_is_unavailable() {
        let resp = Response::new(
            404,
            "Not Found",
            Default::default(),
            "",
            "https://x.bandcamp.com/album/gone",
        );
        let err = parse_response(&resp).unwrap_err();
        assert_eq!(err.unavailable_reason(), Some(UnavailableReason::Removed));
    }

    #[test]
    fn server_errors_are_extraction_errors() {
        let resp = Response::new(503, "Unavailable", Default::default(), "", "https://x.test/");
        let err = parse_response(&resp).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Extraction);
    }

    #[test]
    fn parses_publish_dates() {
        let date = parse_publish_date("07 Mar 2019 14:05:09 GMT").unwrap();
        assert!(!date.approximation);
        assert_eq!(date.date.year(), 2019);
        assert_eq!(date.date.month(), 3);
        assert_eq!(date.date.hour(), 14);
        assert!(parse_publish_date("yesterday").unwrap_err().is_parsing());
    }

    #[test]
    fn zero_duration_is_unknown() {
        let track = TrackInfo {
            title: None,
            title_link: None,
            duration: Some(0.0),
            art_id: None,
            file: None,
        };
        assert_eq!(track.duration_secs(), None);
    }
}
