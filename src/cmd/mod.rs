mod classify;
mod playlist;
mod services;
mod stream;

pub use classify::cmd_classify;
pub use playlist::cmd_playlist;
pub use services::cmd_services;
pub use stream::cmd_stream;

use anyhow::{Context as _, Result};

use pipex::config::Settings;
use pipex::{Context, HttpDownloader};

/// Networked context built from the loaded settings.
fn context(settings: &Settings) -> Result<Context> {
    let downloader = HttpDownloader::with_config(&settings.http_config())
        .context("failed to build HTTP client")?;
    Ok(Context::with_country(
        downloader,
        settings.localization(),
        settings.content_country(),
    ))
}

/// `m:ss`, or `h:mm:ss` past an hour.
fn format_duration(secs: u64) -> String {
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_use_clock_format() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(61), "1:01");
        assert_eq!(format_duration(3725), "1:02:05");
    }
}
