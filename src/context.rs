//! Shared extraction context.
//!
//! One [`Context`] is created at startup and handed by reference to every
//! dispatch and extractor construction. It holds the active
//! [`Downloader`], the preferred [`Localization`] and [`ContentCountry`],
//! and the [`ServiceRegistry`].
//!
//! Cloning is cheap and clones share state: a preference changed through
//! one handle is seen by all of them. Extractors read the preferences when
//! they fetch, not when they are constructed. Changing preferences while
//! other threads are extracting is memory-safe, but which fetches observe
//! the change is up to the caller's ordering.
//!
//! # Example
//!
//! ```rust,no_run
//! use pipex::{Context, Extractor, HttpDownloader, Localization, PlaylistExtractor};
//!
//! # fn example() -> anyhow::Result<()> {
//! let ctx = Context::with_localization(
//!     HttpDownloader::new()?,
//!     Localization::new("de", Some("DE".into())),
//! );
//!
//! let mut album = ctx.playlist_extractor("https://macbenson.bandcamp.com/album/coming-of-age")?;
//! album.fetch_page()?;
//! println!("{} tracks", album.stream_count()?);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use parking_lot::RwLock;

use crate::downloader::Downloader;
use crate::error::{Error, Result};
use crate::extractor::{ChannelExtractor, PlaylistExtractor, StreamExtractor};
use crate::localization::{ContentCountry, Localization};
use crate::service::{LinkType, ServiceRegistry, StreamingService};

struct Inner {
    downloader: Arc<dyn Downloader>,
    registry: ServiceRegistry,
    localization: RwLock<Localization>,
    content_country: RwLock<ContentCountry>,
}

/// Downloader, preferences and registry for one extraction session.
#[derive(Clone)]
pub struct Context {
    inner: Arc<Inner>,
}

impl Context {
    /// Default localization and country.
    pub fn init(downloader: impl Downloader + 'static) -> Self {
        Self::with_country(
            downloader,
            Localization::default(),
            ContentCountry::default(),
        )
    }

    /// Country derived from the localization, or the default when it has none.
    pub fn with_localization(
        downloader: impl Downloader + 'static,
        localization: Localization,
    ) -> Self {
        let country = localization.derived_content_country();
        Self::with_country(downloader, localization, country)
    }

    pub fn with_country(
        downloader: impl Downloader + 'static,
        localization: Localization,
        country: ContentCountry,
    ) -> Self {
        Self::from_parts(
            Arc::new(downloader),
            localization,
            country,
            ServiceRegistry::builtin(),
        )
    }

    /// Full control, including a shared downloader and a custom registry.
    pub fn from_parts(
        downloader: Arc<dyn Downloader>,
        localization: Localization,
        country: ContentCountry,
        registry: ServiceRegistry,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                downloader,
                registry,
                localization: RwLock::new(localization),
                content_country: RwLock::new(country),
            }),
        }
    }

    /// The configured downloader.
    ///
    /// A `Context` cannot exist without one, so there is no uninitialized
    /// state to guard against.
    pub fn downloader(&self) -> &dyn Downloader {
        self.inner.downloader.as_ref()
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.inner.registry
    }

    // ─── Localization ──────────────────────────────────────────────────────

    pub fn preferred_localization(&self) -> Localization {
        self.inner.localization.read().clone()
    }

    pub fn preferred_content_country(&self) -> ContentCountry {
        self.inner.content_country.read().clone()
    }

    /// Replace the localization, leaving the country untouched.
    pub fn set_preferred_localization(&self, localization: Localization) {
        *self.inner.localization.write() = localization;
    }

    pub fn set_preferred_content_country(&self, country: ContentCountry) {
        *self.inner.content_country.write() = country;
    }

    /// Replace the localization and the country together.
    ///
    /// With `country` set to `None` the country is derived from the
    /// localization.
    pub fn setup_localization(&self, localization: Localization, country: Option<ContentCountry>) {
        let country = country.unwrap_or_else(|| localization.derived_content_country());
        // Take both locks so readers never see a half-applied update.
        let mut loc_guard = self.inner.localization.write();
        let mut country_guard = self.inner.content_country.write();
        *loc_guard = localization;
        *country_guard = country;
    }

    // ─── Services ──────────────────────────────────────────────────────────

    pub fn services(&self) -> &[Arc<dyn StreamingService>] {
        self.inner.registry.all()
    }

    pub fn service_by_id(&self, id: u32) -> Result<Arc<dyn StreamingService>> {
        self.inner.registry.service_by_id(id)
    }

    pub fn service_by_name(&self, name: &str) -> Result<Arc<dyn StreamingService>> {
        self.inner.registry.service_by_name(name)
    }

    pub fn service_by_url(&self, url: &str) -> Result<Arc<dyn StreamingService>> {
        self.inner.registry.service_by_url(url)
    }

    pub fn id_of_service(&self, name: &str) -> Result<u32> {
        self.inner.registry.id_of_service(name)
    }

    pub fn name_of_service(&self, id: u32) -> Result<String> {
        self.inner.registry.name_of_service(id)
    }

    /// Dispatch `url` and construct a playlist extractor for it.
    pub fn playlist_extractor(&self, url: &str) -> Result<Box<dyn PlaylistExtractor>> {
        let (service, link_type) = self.inner.registry.classify(url)?;
        expect_link_type(url, link_type, LinkType::Playlist)?;
        service.playlist_extractor(self, url)
    }

    /// Dispatch `url` and construct a channel extractor for it.
    pub fn channel_extractor(&self, url: &str) -> Result<Box<dyn ChannelExtractor>> {
        let (service, link_type) = self.inner.registry.classify(url)?;
        expect_link_type(url, link_type, LinkType::Channel)?;
        service.channel_extractor(self, url)
    }

    /// Dispatch `url` and construct a stream extractor for it.
    pub fn stream_extractor(&self, url: &str) -> Result<Box<dyn StreamExtractor>> {
        let (service, link_type) = self.inner.registry.classify(url)?;
        expect_link_type(url, link_type, LinkType::Stream)?;
        service.stream_extractor(self, url)
    }
}

fn expect_link_type(url: &str, actual: LinkType, wanted: LinkType) -> Result<()> {
    if actual == wanted {
        Ok(())
    } else {
        Err(Error::extraction(format!(
            "{url} is a {actual} link, not a {wanted} link"
        )))
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("localization", &self.preferred_localization())
            .field("content_country", &self.preferred_content_country())
            .field("registry", &self.inner.registry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::downloader::MockDownloader;

    #[test]
    fn init_uses_defaults() {
        let ctx = Context::init(MockDownloader::new());
        assert_eq!(ctx.preferred_localization(), Localization::default());
        assert_eq!(ctx.preferred_content_country().country_code(), "GB");
    }

    #[test]
    fn country_is_derived_from_localization() {
        let ctx = Context::with_localization(
            MockDownloader::new(),
            Localization::new("de", Some("DE".into())),
        );
        assert_eq!(ctx.preferred_content_country().country_code(), "DE");

        let ctx = Context::with_localization(MockDownloader::new(), Localization::language("de"));
        assert_eq!(
            ctx.preferred_content_country(),
            ContentCountry::default()
        );
    }

    #[test]
    fn explicit_country_wins() {
        let ctx = Context::with_country(
            MockDownloader::new(),
            Localization::new("de", Some("DE".into())),
            ContentCountry::new("AT"),
        );
        assert_eq!(ctx.preferred_content_country().country_code(), "AT");
    }

    #[test]
    fn setters_are_independent_and_shared_between_clones() {
        let ctx = Context::init(MockDownloader::new());
        let other = ctx.clone();

        ctx.set_preferred_localization(Localization::language("ja"));
        assert_eq!(other.preferred_localization().language_code(), "ja");
        assert_eq!(other.preferred_content_country().country_code(), "GB");

        other.set_preferred_content_country(ContentCountry::new("JP"));
        assert_eq!(ctx.preferred_content_country().country_code(), "JP");
    }

    #[test]
    fn setup_localization_derives_country_when_absent() {
        let ctx = Context::init(MockDownloader::new());
        ctx.setup_localization(Localization::new("fr", Some("CA".into())), None);
        assert_eq!(ctx.preferred_content_country().country_code(), "CA");

        ctx.setup_localization(Localization::language("fr"), Some(ContentCountry::new("BE")));
        assert_eq!(ctx.preferred_content_country().country_code(), "BE");
    }

    #[test]
    fn registry_passthroughs() {
        let ctx = Context::init(MockDownloader::new());
        assert_eq!(ctx.services().len(), 1);
        assert_eq!(ctx.service_by_id(4).unwrap().name(), "Bandcamp");
        assert_eq!(ctx.id_of_service("Bandcamp").unwrap(), 4);
        assert_eq!(ctx.name_of_service(4).unwrap(), "Bandcamp");
        assert!(ctx.service_by_url("https://example.com/").is_err());
    }

    #[test]
    fn extractor_dispatch_checks_link_type() {
        let ctx = Context::init(MockDownloader::new());
        let err = ctx
            .playlist_extractor("https://artist.bandcamp.com/track/song")
            .err()
            .unwrap();
        assert!(err.to_string().contains("stream link"));
        assert!(ctx
            .stream_extractor("https://artist.bandcamp.com/track/song")
            .is_ok());
    }
}
