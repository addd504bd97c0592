//! Paginated listings.
//!
//! A listing is delivered as a sequence of [`InfoItemsPage`]s. Each page
//! may carry a [`Page`] continuation token that only the producing platform
//! understands; `None` means there are no more pages.
//!
//! [`PageWalker`] drives the protocol from the caller's side and refuses to
//! loop forever on a platform that hands out a token it already returned.

use std::collections::{BTreeMap, HashSet};
use std::marker::PhantomData;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::extractor::ListExtractor;

/// Opaque continuation token.
///
/// The core never looks inside; fields are whatever the producing platform
/// needs to request the next page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Page {
    pub url: Option<String>,
    pub id: Option<String>,
    pub ids: Vec<String>,
    pub cookies: BTreeMap<String, String>,
    pub body: Option<Vec<u8>>,
}

impl Page {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// A token with neither URL nor id nor ids cannot lead anywhere.
    pub fn is_valid(&self) -> bool {
        self.url.as_deref().is_some_and(|u| !u.is_empty())
            || self.id.as_deref().is_some_and(|i| !i.is_empty())
            || !self.ids.is_empty()
    }
}

/// One page of a listing.
#[derive(Debug)]
pub struct InfoItemsPage<I> {
    pub items: Vec<I>,
    /// `None` is the "no more pages" sentinel.
    pub next_page: Option<Page>,
    /// Items that failed to parse and were left out.
    pub errors: Vec<Error>,
}

impl<I> InfoItemsPage<I> {
    pub fn new(items: Vec<I>, next_page: Option<Page>) -> Self {
        Self {
            items,
            next_page,
            errors: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), None)
    }

    pub fn has_next_page(&self) -> bool {
        self.next_page.as_ref().is_some_and(Page::is_valid)
    }
}

impl<I> Default for InfoItemsPage<I> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Gathers items for a page while keeping per-item failures.
///
/// A failed item is dropped and its error kept; it is never replaced by a
/// defaulted placeholder.
#[derive(Debug)]
pub struct InfoItemsCollector<I> {
    items: Vec<I>,
    errors: Vec<Error>,
}

impl<I> InfoItemsCollector<I> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn commit(&mut self, item: Result<I>) {
        match item {
            Ok(item) => self.items.push(item),
            Err(err) => {
                warn!("Dropping item that failed to extract: {}", err);
                self.errors.push(err);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn into_page(self, next_page: Option<Page>) -> InfoItemsPage<I> {
        InfoItemsPage {
            items: self.items,
            next_page,
            errors: self.errors,
        }
    }
}

impl<I> Default for InfoItemsCollector<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// Caller-side driver for the pagination protocol.
///
/// Yields the initial page, then follows continuation tokens. Iteration
/// ends after the page without a next token. A token seen twice (the
/// initial page's URL included), or more
/// pages than `max_pages`, ends iteration with [`Error::Extraction`].
pub struct PageWalker<'a, I, E: ?Sized> {
    extractor: &'a E,
    marker: PhantomData<fn() -> I>,
    next: Option<Page>,
    seen: HashSet<Page>,
    started: bool,
    finished: bool,
    pages: usize,
    max_pages: Option<usize>,
}

impl<'a, I, E> PageWalker<'a, I, E>
where
    E: ListExtractor<I> + ?Sized,
{
    /// The extractor must already be fetched.
    ///
    /// The extractor's own URL counts as seen, so a continuation pointing
    /// back at the first page is caught as a loop.
    pub fn new(extractor: &'a E) -> Self {
        let mut seen = HashSet::new();
        seen.insert(Page::from_url(extractor.url()));
        Self {
            extractor,
            marker: PhantomData,
            next: None,
            seen,
            started: false,
            finished: false,
            pages: 0,
            max_pages: None,
        }
    }

    #[must_use]
    pub fn max_pages(mut self, limit: usize) -> Self {
        self.max_pages = Some(limit);
        self
    }

    /// Drain every page into one item list.
    pub fn collect_items(self) -> Result<Vec<I>> {
        let mut all = Vec::new();
        for page in self {
            all.extend(page?.items);
        }
        Ok(all)
    }

    fn advance(&mut self) -> Result<Option<InfoItemsPage<I>>> {
        let page = if self.started {
            let Some(token) = self.next.take() else {
                return Ok(None);
            };
            if !self.seen.insert(token.clone()) {
                return Err(Error::extraction(format!(
                    "pagination token repeated after {} pages",
                    self.pages
                )));
            }
            if self.max_pages.is_some_and(|max| self.pages >= max) {
                return Err(Error::extraction(format!(
                    "pagination exceeded the limit of {} pages",
                    self.pages
                )));
            }
            self.extractor.page(&token)?
        } else {
            self.started = true;
            self.extractor.initial_page()?
        };

        self.pages += 1;
        debug!(
            "Fetched listing page {} ({} items)",
            self.pages,
            page.items.len()
        );
        self.next = page.next_page.clone().filter(Page::is_valid);
        Ok(Some(page))
    }
}

impl<I, E> Iterator for PageWalker<'_, I, E>
where
    E: ListExtractor<I> + ?Sized,
{
    type Item = Result<InfoItemsPage<I>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.advance() {
            Ok(Some(page)) => Some(Ok(page)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_page_has_no_next() {
        let page: InfoItemsPage<u32> = InfoItemsPage::empty();
        assert!(page.items.is_empty());
        assert!(!page.has_next_page());
    }

    #[test]
    fn invalid_token_does_not_count_as_next_page() {
        let page: InfoItemsPage<u32> = InfoItemsPage::new(vec![1], Some(Page::default()));
        assert!(!page.has_next_page());
        let page: InfoItemsPage<u32> = InfoItemsPage::new(vec![1], Some(Page::from_id("2")));
        assert!(page.has_next_page());
    }

    #[test]
    fn collector_keeps_errors_and_drops_failed_items() {
        let mut collector = InfoItemsCollector::new();
        collector.commit(Ok(1));
        collector.commit(Err(Error::parsing("no title")));
        collector.commit(Ok(3));
        assert_eq!(collector.len(), 2);
        assert_eq!(collector.errors().len(), 1);

        let page = collector.into_page(None);
        assert_eq!(page.items, vec![1, 3]);
        assert!(page.errors[0].is_parsing());
    }
}
