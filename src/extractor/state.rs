//! Fetch state shared by all extractors.

use tracing::{debug, info, instrument, warn};

use super::PageStatus;
use crate::context::Context;
use crate::downloader::{Request, RequestBuilder, Response};
use crate::error::{Error, Result};
use crate::linkhandler::LinkHandler;
use crate::localization::{ContentCountry, Localization};

/// The fetch-then-read state machine a platform extractor embeds.
///
/// `D` is whatever the platform parsed out of the response. It becomes
/// readable through [`document`](Self::document) once a fetch succeeded.
pub struct ExtractorState<D> {
    context: Context,
    service_id: u32,
    link: LinkHandler,
    forced_localization: Option<Localization>,
    forced_country: Option<ContentCountry>,
    status: PageStatus,
    document: Option<D>,
}

impl<D> ExtractorState<D> {
    pub fn new(context: &Context, service_id: u32, link: LinkHandler) -> Self {
        Self {
            context: context.clone(),
            service_id,
            link,
            forced_localization: None,
            forced_country: None,
            status: PageStatus::Unfetched,
            document: None,
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn service_id(&self) -> u32 {
        self.service_id
    }

    pub fn link_handler(&self) -> &LinkHandler {
        &self.link
    }

    pub fn status(&self) -> PageStatus {
        self.status
    }

    /// Forced localization, else the context preference as of now.
    pub fn localization(&self) -> Localization {
        self.forced_localization
            .clone()
            .unwrap_or_else(|| self.context.preferred_localization())
    }

    /// Forced country, else the context preference as of now.
    pub fn content_country(&self) -> ContentCountry {
        self.forced_country
            .clone()
            .unwrap_or_else(|| self.context.preferred_content_country())
    }

    pub fn force_localization(&mut self, localization: Localization) {
        self.forced_localization = Some(localization);
    }

    pub fn force_content_country(&mut self, country: ContentCountry) {
        self.forced_country = Some(country);
    }

    /// GET for `url` with the current localization and country attached.
    pub fn request(&self, url: &str) -> RequestBuilder {
        Request::get(url)
            .localization(self.localization())
            .content_country(self.content_country())
    }

    /// Run one request through the context's downloader.
    ///
    /// Does not touch the page state; used for pagination requests.
    pub fn execute(&self, request: &Request) -> Result<Response> {
        debug!("Executing {} {}", request.method(), request.url());
        Ok(self.context.downloader().execute(request)?)
    }

    /// Execute `request` and parse the response into the page document.
    ///
    /// Success stores the document and moves to `Fetched`; any failure
    /// drops an earlier document, moves to `Failed` and returns the error
    /// unchanged. Calling this again re-fetches.
    #[instrument(skip_all, fields(url = %request.url(), service = self.service_id))]
    pub fn fetch<F>(&mut self, request: &Request, parse: F) -> Result<()>
    where
        F: FnOnce(&Response) -> Result<D>,
    {
        if self.status != PageStatus::Unfetched {
            debug!("Re-fetching page (was {})", self.status);
        }
        self.document = None;

        match self.execute(request).and_then(|response| parse(&response)) {
            Ok(document) => {
                self.document = Some(document);
                self.status = PageStatus::Fetched;
                info!("Page fetched");
                Ok(())
            }
            Err(err) => {
                self.status = PageStatus::Failed;
                warn!("Page fetch failed: {}", err);
                Err(err)
            }
        }
    }

    /// The parsed page, only after a successful fetch.
    pub fn document(&self) -> Result<&D> {
        match (&self.status, &self.document) {
            (PageStatus::Fetched, Some(document)) => Ok(document),
            _ => Err(Error::PageNotFetched {
                status: self.status,
            }),
        }
    }
}
