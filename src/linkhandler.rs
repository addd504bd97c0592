//! URL normalization and id extraction.
//!
//! A [`LinkHandlerFactory`] knows one URL family of one platform (its
//! tracks, its albums, ...). It decides whether a URL belongs to that
//! family and turns it into a [`LinkHandler`]: the URL as given, its
//! canonical form, and the platform id inside it.

use crate::error::{Error, Result};

/// A URL resolved against one link family.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkHandler {
    /// The URL exactly as the caller supplied it.
    pub original_url: String,
    /// Canonical URL rebuilt from the id.
    pub url: String,
    pub id: String,
}

impl LinkHandler {
    pub fn new(
        original_url: impl Into<String>,
        url: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            original_url: original_url.into(),
            url: url.into(),
            id: id.into(),
        }
    }
}

/// Recognizes one URL family of one platform.
pub trait LinkHandlerFactory: Send + Sync {
    /// Platform id contained in `url`.
    fn id_from_url(&self, url: &str) -> Result<String>;

    /// Canonical URL for `id`.
    fn url_from_id(&self, id: &str) -> Result<String>;

    /// Whether `url` belongs to this family.
    fn accepts(&self, url: &str) -> bool;

    fn from_url(&self, url: &str) -> Result<LinkHandler> {
        if !self.accepts(url) {
            return Err(Error::parsing(format!("url not accepted: {url}")));
        }
        let id = self.id_from_url(url)?;
        let canonical = self.url_from_id(&id)?;
        Ok(LinkHandler::new(url, canonical, id))
    }

    fn from_id(&self, id: &str) -> Result<LinkHandler> {
        let url = self.url_from_id(id)?;
        Ok(LinkHandler::new(url.clone(), url, id))
    }
}

/// Strip fragment and query, lowercase scheme and host.
///
/// Returns `None` for strings that are not absolute http(s) URLs.
pub fn normalize_url(raw: &str) -> Option<url::Url> {
    let mut parsed = url::Url::parse(raw.trim()).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    parsed.set_fragment(None);
    parsed.set_query(None);
    Some(parsed)
}
