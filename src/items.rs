//! Result items shared by every platform.

use serde::Serialize;

use crate::localization::DateWrapper;

/// What kind of entity an item describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InfoType {
    Stream,
    Playlist,
    Channel,
    Comment,
}

/// Delivery form of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamType {
    #[default]
    None,
    VideoStream,
    AudioStream,
    LiveStream,
    AudioLiveStream,
    PostLiveStream,
}

/// One stream (track, video, episode) inside a listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamInfoItem {
    pub service_id: u32,
    pub url: String,
    pub name: String,
    pub stream_type: StreamType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploader_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploader_url: Option<String>,
    /// Duration in seconds (`None` when unknown or live).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<DateWrapper>,
}

impl StreamInfoItem {
    pub fn new(
        service_id: u32,
        url: impl Into<String>,
        name: impl Into<String>,
        stream_type: StreamType,
    ) -> Self {
        Self {
            service_id,
            url: url.into(),
            name: name.into(),
            stream_type,
            thumbnail_url: None,
            uploader_name: None,
            uploader_url: None,
            duration_secs: None,
            view_count: None,
            upload_date: None,
        }
    }

    pub fn info_type(&self) -> InfoType {
        InfoType::Stream
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_item_serializes_without_empty_fields() {
        let item = StreamInfoItem::new(4, "https://x.test/track/a", "A", StreamType::AudioStream);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["stream_type"], "audio_stream");
        assert!(json.get("thumbnail_url").is_none());
        assert_eq!(item.info_type(), InfoType::Stream);
    }
}
