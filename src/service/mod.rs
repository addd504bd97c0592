//! Platform capability and URL classification.
//!
//! # Architecture
//!
//! - [`StreamingService`]: what one platform offers (id, name, link
//!   families, extractor constructors)
//! - [`ServiceRegistry`]: the ordered set of known platforms; dispatches
//!   URLs, first match wins
//! - [`LinkType`]: the content category a URL resolves to

pub mod registry;

use std::fmt;

use serde::Serialize;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::extractor::{ChannelExtractor, PlaylistExtractor, StreamExtractor};
use crate::linkhandler::LinkHandlerFactory;

pub use registry::ServiceRegistry;

/// Content category of a URL under one platform's patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    None,
    Stream,
    Channel,
    Playlist,
    Comments,
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Stream => "stream",
            Self::Channel => "channel",
            Self::Playlist => "playlist",
            Self::Comments => "comments",
        };
        f.write_str(s)
    }
}

/// Kinds of media a platform serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaCapability {
    Audio,
    Video,
    Live,
    Comments,
}

/// Static description of a platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceInfo {
    pub name: String,
    pub media_capabilities: Vec<MediaCapability>,
}

impl ServiceInfo {
    pub fn new(name: impl Into<String>, media_capabilities: Vec<MediaCapability>) -> Self {
        Self {
            name: name.into(),
            media_capabilities,
        }
    }
}

/// One content platform.
///
/// Implementors expose their URL families and construct extractors; every
/// constructor not overridden reports the content type as unsupported.
pub trait StreamingService: Send + Sync {
    /// Numeric id, unique within a registry.
    fn id(&self) -> u32;

    fn info(&self) -> &ServiceInfo;

    fn name(&self) -> &str {
        &self.info().name
    }

    fn stream_links(&self) -> Option<&dyn LinkHandlerFactory> {
        None
    }

    fn channel_links(&self) -> Option<&dyn LinkHandlerFactory> {
        None
    }

    fn playlist_links(&self) -> Option<&dyn LinkHandlerFactory> {
        None
    }

    fn comments_links(&self) -> Option<&dyn LinkHandlerFactory> {
        None
    }

    /// Classify `url`; families are tried stream, channel, playlist, comments.
    fn link_type(&self, url: &str) -> LinkType {
        let families = [
            (self.stream_links(), LinkType::Stream),
            (self.channel_links(), LinkType::Channel),
            (self.playlist_links(), LinkType::Playlist),
            (self.comments_links(), LinkType::Comments),
        ];
        families
            .into_iter()
            .find_map(|(factory, kind)| factory.filter(|f| f.accepts(url)).map(|_| kind))
            .unwrap_or(LinkType::None)
    }

    fn stream_extractor(&self, ctx: &Context, url: &str) -> Result<Box<dyn StreamExtractor>> {
        let _ = (ctx, url);
        Err(unsupported(self.name(), LinkType::Stream))
    }

    fn channel_extractor(&self, ctx: &Context, url: &str) -> Result<Box<dyn ChannelExtractor>> {
        let _ = (ctx, url);
        Err(unsupported(self.name(), LinkType::Channel))
    }

    fn playlist_extractor(
        &self,
        ctx: &Context,
        url: &str,
    ) -> Result<Box<dyn PlaylistExtractor>> {
        let _ = (ctx, url);
        Err(unsupported(self.name(), LinkType::Playlist))
    }
}

impl fmt::Debug for dyn StreamingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamingService")
            .field("id", &self.id())
            .field("name", &self.name())
            .finish()
    }
}

fn unsupported(service: &str, kind: LinkType) -> Error {
    Error::extraction(format!("{service} does not support {kind} extraction"))
}
