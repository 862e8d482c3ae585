//! Website video model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::api::Resource;
use super::de;

/// Maximum length of a video's short description
pub const SHORT_DESCRIPTION_MAX: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: i64,
    #[serde(default, deserialize_with = "de::flexible_string")]
    pub title: String,
    #[serde(default, deserialize_with = "de::flexible_string")]
    pub short_description: String,
    #[serde(default)]
    pub long_description: Option<String>,
    /// Product feature bullets; absent on older records
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub photo_file: Option<String>,
    #[serde(default)]
    pub video_file: Option<String>,
    #[serde(deserialize_with = "de::flexible_i64")]
    pub video_number: i64,
    #[serde(default = "default_active", deserialize_with = "de::flexible_bool")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "de::flexible_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::flexible_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl Resource for Video {
    const NAME: &'static str = "video";
    const PATH: &'static str = "/api/website-videos";
    const LIST_KEYS: &'static [&'static str] = &["videos", "data"];
    const ITEM_KEYS: &'static [&'static str] = &["video", "data"];

    fn id(&self) -> i64 {
        self.id
    }
}

impl Video {
    pub fn status_label(&self) -> &'static str {
        if self.is_active {
            "Active"
        } else {
            "Inactive"
        }
    }

    /// Upper-cased extension of the stored video file, e.g. `MP4`
    pub fn video_format(&self) -> Option<String> {
        self.video_file
            .as_deref()
            .and_then(|path| path.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_uppercase())
    }
}

/// Absolute file URLs resolved by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoUrls {
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
}

/// JSON body toggling a video's visibility
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoStatusRequest {
    pub is_active: bool,
}
