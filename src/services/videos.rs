//! Website video service
//!
//! Wraps the `/api/website-videos` collection: listing, detail with resolved
//! file URLs, multipart create/update and the JSON status toggle.

use tracing::info;
use crate::api::{Acknowledgement, ApiClient, FormData, RequestBody, ResourceClient};
use crate::models::{Video, VideoStatusRequest, VideoUrls};
use crate::utils::errors::Result;
use crate::utils::logging::log_admin_action;

#[derive(Clone, Debug)]
pub struct VideoService {
    videos: ResourceClient<Video>,
}

impl VideoService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            videos: ResourceClient::new(api),
        }
    }

    pub fn api(&self) -> &ApiClient {
        self.videos.api()
    }

    pub async fn list(&self) -> Result<Vec<Video>> {
        self.videos.list().await
    }

    pub async fn get(&self, id: i64) -> Result<Video> {
        self.videos.get(id).await
    }

    /// Absolute photo/video URLs as resolved by the backend
    pub async fn urls(&self, id: i64) -> Result<VideoUrls> {
        self.videos.get_nested(id, "urls", &["urls", "data"]).await
    }

    /// Upload a new video; the form carries the files
    pub async fn create(&self, form: FormData) -> Result<Video> {
        let video = self.videos.create(RequestBody::Form(form)).await?;
        info!(video_id = video.id, title = %video.title, "Video created");
        log_admin_action(None, "create_video", Some(&video.id.to_string()), Some(&video.title));
        Ok(video)
    }

    /// Multipart update; file fields absent from `form` keep their stored file
    pub async fn update(&self, id: i64, form: FormData) -> Result<Acknowledgement> {
        let ack = self.videos.update_ack(id, RequestBody::Form(form)).await?;
        log_admin_action(None, "update_video", Some(&id.to_string()), None);
        Ok(ack)
    }

    pub async fn set_active(&self, id: i64, is_active: bool) -> Result<Acknowledgement> {
        let body = RequestBody::json(&VideoStatusRequest { is_active })?;
        let ack = self.videos.update_ack(id, body).await?;
        log_admin_action(None, "set_video_active", Some(&id.to_string()), Some(&is_active.to_string()));
        Ok(ack)
    }
}
