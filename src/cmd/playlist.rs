use anyhow::Result;
use serde_json::json;

use pipex::config::Settings;
use pipex::{Extractor, ListExtractor, PageWalker, PlaylistExtractor, StreamInfoItem};

use super::{context, format_duration};

pub fn cmd_playlist(settings: &Settings, url: &str, json: bool, all_pages: bool) -> Result<()> {
    let ctx = context(settings)?;
    let mut playlist = ctx.playlist_extractor(url)?;
    playlist.fetch_page()?;

    let items: Vec<StreamInfoItem> = if all_pages {
        PageWalker::new(playlist.as_ref()).collect_items()?
    } else {
        let page = playlist.initial_page()?;
        for error in &page.errors {
            eprintln!("⚠️  Skipped item: {error}");
        }
        if page.has_next_page() {
            eprintln!("More items available, use --all-pages to fetch them");
        }
        page.items
    };

    if json {
        let out = json!({
            "service_id": playlist.service_id(),
            "url": playlist.url(),
            "id": playlist.id(),
            "name": playlist.name()?,
            "uploader_name": playlist.uploader_name()?,
            "uploader_url": playlist.uploader_url()?,
            "uploader_avatar_url": playlist.uploader_avatar_url()?,
            "thumbnail_url": playlist.thumbnail_url()?,
            "banner_url": playlist.banner_url()?,
            "stream_count": playlist.stream_count()?,
            "items": items,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", playlist.name()?);
    if let Some(uploader) = playlist.uploader_name()? {
        println!("by {uploader}");
    }
    println!("{} streams\n", playlist.stream_count()?);
    for (i, item) in items.iter().enumerate() {
        let duration = item
            .duration_secs
            .map(|d| format!(" ({})", format_duration(d)))
            .unwrap_or_default();
        println!("{:>3}. {}{duration}", i + 1, item.name);
        println!("     {}", item.url);
    }
    Ok(())
}
