//! Ordered, immutable set of known platforms.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use super::{LinkType, StreamingService};
use crate::error::{Error, Result};
use crate::services::bandcamp::BandcampService;

/// Routes URLs to platforms.
///
/// Services are checked in registration order. First match wins: when two
/// platforms would both accept a URL, the one registered earlier handles it.
/// Lookups are linear scans, which is cheap for a few dozen platforms.
#[derive(Clone)]
pub struct ServiceRegistry {
    services: Vec<Arc<dyn StreamingService>>,
}

impl ServiceRegistry {
    /// Build a registry; ids and names must be unique.
    pub fn new(services: Vec<Arc<dyn StreamingService>>) -> Result<Self> {
        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for service in &services {
            if !ids.insert(service.id()) {
                return Err(Error::extraction(format!(
                    "duplicate service id {}",
                    service.id()
                )));
            }
            if !names.insert(service.name().to_string()) {
                return Err(Error::extraction(format!(
                    "duplicate service name \"{}\"",
                    service.name()
                )));
            }
        }
        Ok(Self { services })
    }

    /// Every platform this crate ships.
    pub fn builtin() -> Self {
        Self {
            services: vec![Arc::new(BandcampService::new())],
        }
    }

    /// Registered services in registration order.
    pub fn all(&self) -> &[Arc<dyn StreamingService>] {
        &self.services
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn service_by_id(&self, id: u32) -> Result<Arc<dyn StreamingService>> {
        self.services
            .iter()
            .find(|s| s.id() == id)
            .cloned()
            .ok_or_else(|| Error::ServiceNotFound(format!("there's no service with the id = {id}")))
    }

    pub fn service_by_name(&self, name: &str) -> Result<Arc<dyn StreamingService>> {
        self.services
            .iter()
            .find(|s| s.name() == name)
            .cloned()
            .ok_or_else(|| {
                Error::ServiceNotFound(format!("there's no service with the name = \"{name}\""))
            })
    }

    /// First service whose patterns give `url` a link type other than NONE.
    pub fn service_by_url(&self, url: &str) -> Result<Arc<dyn StreamingService>> {
        self.classify(url).map(|(service, _)| service)
    }

    /// Like [`service_by_url`](Self::service_by_url), also returning the link type.
    pub fn classify(&self, url: &str) -> Result<(Arc<dyn StreamingService>, LinkType)> {
        for service in &self.services {
            let link_type = service.link_type(url);
            if link_type != LinkType::None {
                debug!("Matched service {} ({}) for {}", service.name(), link_type, url);
                return Ok((Arc::clone(service), link_type));
            }
        }
        Err(Error::UnsupportedUrl(url.to_string()))
    }

    pub fn id_of_service(&self, name: &str) -> Result<u32> {
        self.service_by_name(name).map(|s| s.id())
    }

    pub fn name_of_service(&self, id: u32) -> Result<String> {
        self.service_by_id(id).map(|s| s.name().to_string())
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.services.iter()).finish()
    }
}
