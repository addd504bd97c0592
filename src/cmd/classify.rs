use anyhow::Result;

use pipex::{LinkHandlerFactory, LinkType, ServiceRegistry, StreamingService};

/// Classification is pure pattern matching; nothing is downloaded.
pub fn cmd_classify(url: &str) -> Result<()> {
    let registry = ServiceRegistry::builtin();
    let (service, link_type) = registry.classify(url)?;
    println!("service:   {} (id {})", service.name(), service.id());
    println!("link type: {link_type}");

    let factory = match link_type {
        LinkType::Stream => service.stream_links(),
        LinkType::Channel => service.channel_links(),
        LinkType::Playlist => service.playlist_links(),
        LinkType::Comments => service.comments_links(),
        LinkType::None => None,
    };
    if let Some(factory) = factory {
        let link = factory.from_url(url)?;
        println!("id:        {}", link.id);
        println!("url:       {}", link.url);
    }
    Ok(())
}
