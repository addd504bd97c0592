use anyhow::Result;
use serde_json::json;

use pipex::config::Settings;
use pipex::{Extractor, StreamExtractor};

use super::{context, format_duration};

pub fn cmd_stream(settings: &Settings, url: &str, json: bool) -> Result<()> {
    let ctx = context(settings)?;
    let mut stream = ctx.stream_extractor(url)?;
    stream.fetch_page()?;

    let audio = stream.audio_streams()?;

    if json {
        let out = json!({
            "service_id": stream.service_id(),
            "url": stream.url(),
            "id": stream.id(),
            "name": stream.name()?,
            "stream_type": stream.stream_type()?,
            "uploader_name": stream.uploader_name()?,
            "uploader_url": stream.uploader_url()?,
            "thumbnail_url": stream.thumbnail_url()?,
            "duration_secs": stream.duration_secs()?,
            "view_count": stream.view_count()?,
            "upload_date": stream.upload_date()?,
            "description": stream.description()?,
            "audio_streams": audio,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", stream.name()?);
    if let Some(uploader) = stream.uploader_name()? {
        println!("by {uploader}");
    }
    if let Some(secs) = stream.duration_secs()? {
        println!("duration: {}", format_duration(secs));
    }
    if let Some(date) = stream.upload_date()? {
        println!("uploaded: {}", date.date.format("%Y-%m-%d"));
    }
    if let Some(description) = stream.description()? {
        println!("\n{description}");
    }

    println!();
    for audio_stream in &audio {
        let bitrate = audio_stream
            .bitrate_kbps
            .map(|b| format!(" {b} kbps"))
            .unwrap_or_default();
        println!("🎵 {}{bitrate}  {}", audio_stream.format, audio_stream.url);
    }
    Ok(())
}
