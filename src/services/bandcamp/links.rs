//! Bandcamp URL families.
//!
//! Only `<artist>.bandcamp.com` hosts are recognized; artists on custom
//! domains cannot be told apart from any other site without a request.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::linkhandler::{normalize_url, LinkHandlerFactory};

static ARTIST_HOST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z0-9][a-z0-9-]*)\.bandcamp\.com$").expect("valid regex"));

/// Subdomains that belong to Bandcamp itself, not to an artist.
const RESERVED_SUBDOMAINS: &[&str] = &["www", "daily", "blog", "get", "f4", "t4", "s4"];

/// Artist subdomain and path segments of a Bandcamp URL.
fn split_artist_url(url: &str) -> Option<(String, Vec<String>)> {
    let parsed = normalize_url(url)?;
    let host = parsed.host_str()?;
    let artist = ARTIST_HOST.captures(host)?.get(1)?.as_str();
    if RESERVED_SUBDOMAINS.contains(&artist) {
        return None;
    }
    let segments = parsed
        .path_segments()
        .map(|segs| segs.filter(|s| !s.is_empty()).map(str::to_string).collect())
        .unwrap_or_default();
    Some((artist.to_string(), segments))
}

/// `<artist>/<slug>` ids for `https://<artist>.bandcamp.com/<kind>/<slug>`.
fn slug_id(url: &str, kind: &str) -> Option<String> {
    let (artist, segments) = split_artist_url(url)?;
    match segments.as_slice() {
        [k, slug] if k == kind => Some(format!("{artist}/{slug}")),
        _ => None,
    }
}

fn slug_url(id: &str, kind: &str) -> Result<String> {
    let (artist, slug) = id
        .split_once('/')
        .filter(|(a, s)| !a.is_empty() && !s.is_empty() && !s.contains('/'))
        .ok_or_else(|| Error::parsing(format!("malformed bandcamp {kind} id: {id}")))?;
    Ok(format!("https://{artist}.bandcamp.com/{kind}/{slug}"))
}

/// `https://<artist>.bandcamp.com/track/<slug>`
pub struct BandcampStreamLinks;

impl LinkHandlerFactory for BandcampStreamLinks {
    fn id_from_url(&self, url: &str) -> Result<String> {
        slug_id(url, "track").ok_or_else(|| Error::parsing(format!("not a bandcamp track: {url}")))
    }

    fn url_from_id(&self, id: &str) -> Result<String> {
        slug_url(id, "track")
    }

    fn accepts(&self, url: &str) -> bool {
        slug_id(url, "track").is_some()
    }
}

/// `https://<artist>.bandcamp.com/album/<slug>`
pub struct BandcampPlaylistLinks;

impl LinkHandlerFactory for BandcampPlaylistLinks {
    fn id_from_url(&self, url: &str) -> Result<String> {
        slug_id(url, "album").ok_or_else(|| Error::parsing(format!("not a bandcamp album: {url}")))
    }

    fn url_from_id(&self, id: &str) -> Result<String> {
        slug_url(id, "album")
    }

    fn accepts(&self, url: &str) -> bool {
        slug_id(url, "album").is_some()
    }
}

/// `https://<artist>.bandcamp.com`, optionally `/music` or `/releases`.
pub struct BandcampChannelLinks;

impl BandcampChannelLinks {
    fn artist(url: &str) -> Option<String> {
        let (artist, segments) = split_artist_url(url)?;
        match segments.as_slice() {
            [] => Some(artist),
            [page] if page == "music" || page == "releases" => Some(artist),
            _ => None,
        }
    }
}

impl LinkHandlerFactory for BandcampChannelLinks {
    fn id_from_url(&self, url: &str) -> Result<String> {
        Self::artist(url).ok_or_else(|| Error::parsing(format!("not a bandcamp artist: {url}")))
    }

    fn url_from_id(&self, id: &str) -> Result<String> {
        if !ARTIST_HOST.is_match(&format!("{id}.bandcamp.com")) {
            return Err(Error::parsing(format!("malformed bandcamp artist id: {id}")));
        }
        Ok(format!("https://{id}.bandcamp.com"))
    }

    fn accepts(&self, url: &str) -> bool {
        Self::artist(url).is_some()
    }
}
