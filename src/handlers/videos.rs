//! Video library screens
//!
//! The list with its "active only" filter and status toggle, the detail
//! view, and the add/edit form.

use std::collections::BTreeSet;
use std::path::Path;
use chrono::{DateTime, Utc};
use tracing::{debug, info};
use crate::api::{ApiClient, FileAttachment};
use crate::middleware::AccessLevel;
use crate::models::{Video, VideoUrls, SHORT_DESCRIPTION_MAX};
use crate::services::VideoService;
use crate::state::{FieldSpec, FormSchema, FormState, SessionStore, ViewScope};
use crate::utils::errors::{AdminError, Result};
use crate::utils::helpers::format_age;
use super::{admit, Mounted, ResourceScreen, Route, ScreenContext};

const ACTIVE_ONLY: &str = "active_only";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this video? This action cannot be undone.";
pub const DISCARD_PROMPT: &str = "Any unsaved changes will be lost. Continue?";

pub struct VideosScreen {
    screen: ResourceScreen<Video>,
    service: VideoService,
}

impl VideosScreen {
    pub async fn mount(ctx: &ScreenContext, session: &SessionStore) -> Result<Mounted<Self>> {
        if let Err(mounted) = admit(session, AccessLevel::Admin) {
            return Ok(mounted);
        }

        let screen = ResourceScreen::new(ctx);
        let service = VideoService::new(screen.api().clone());
        let mut this = Self { screen, service };
        this.set_active_only(ctx.features.active_only_by_default);
        this.screen.refresh().await?;
        Ok(Mounted::Screen(this))
    }

    pub fn screen(&self) -> &ResourceScreen<Video> {
        &self.screen
    }

    pub fn visible(&self) -> Vec<&Video> {
        self.screen.list().visible()
    }

    pub fn set_search(&mut self, term: &str) {
        self.screen.list_mut().set_search(term);
    }

    pub fn set_active_only(&mut self, enabled: bool) {
        let list = self.screen.list_mut();
        if enabled {
            list.set_filter(ACTIVE_ONLY, |video: &Video| video.is_active);
        } else {
            list.clear_filter(ACTIVE_ONLY);
        }
    }

    pub fn active_only(&self) -> bool {
        self.screen.list().has_filter(ACTIVE_ONLY)
    }

    /// Flip `is_active` on the backend and mirror it locally
    pub async fn toggle_status(&mut self, id: i64) -> Result<bool> {
        let current = self
            .screen
            .list()
            .get(id)
            .map(|video| video.is_active)
            .ok_or_else(|| AdminError::NotFound {
                resource: "video".to_string(),
                id,
            })?;

        match self.service.set_active(id, !current).await {
            Ok(_) => {
                let ids: BTreeSet<i64> = [id].into_iter().collect();
                self.screen.list_mut().update_where(&ids, |video| video.is_active = !current);
                let verb = if current { "deactivated" } else { "activated" };
                self.screen.ctx().notifier.success(format!("Video {}", verb));
                Ok(!current)
            }
            Err(e) => Err(self.screen.report(e, "toggle status")),
        }
    }

    pub async fn delete(&mut self, id: i64) -> Result<bool> {
        self.screen.delete(id, DELETE_PROMPT).await
    }
}

/// Detail of one video with its resolved file URLs
#[derive(Debug, Clone)]
pub struct VideoDetail {
    pub video: Video,
    pub urls: VideoUrls,
    pub age: Option<String>,
}

impl VideoDetail {
    pub async fn mount(ctx: &ScreenContext, session: &SessionStore, id: i64) -> Result<Mounted<Self>> {
        if let Err(mounted) = admit(session, AccessLevel::Admin) {
            return Ok(mounted);
        }

        let scope = ViewScope::new();
        let service = ctx.services.scoped(&scope).video_service;
        let video = match service.get(id).await {
            Ok(video) => video,
            Err(e) => {
                ctx.notifier.error(&e);
                return Err(e);
            }
        };

        // Older backends have no `/urls`; fall back to local resolution
        let urls = match service.urls(id).await {
            Ok(urls) => urls,
            Err(e) => {
                debug!(video_id = id, error = %e, "Resolving file URLs locally");
                Self::local_urls(service.api(), &video)
            }
        };

        Ok(Mounted::Screen(Self::new(video, urls, Utc::now())))
    }

    pub fn new(video: Video, urls: VideoUrls, now: DateTime<Utc>) -> Self {
        let age = video.created_at.map(|created| format_age(created, now));
        Self { video, urls, age }
    }

    fn local_urls(api: &ApiClient, video: &Video) -> VideoUrls {
        VideoUrls {
            photo_url: video.photo_file.as_deref().map(|p| api.resolve_file_url(p)),
            video_url: video.video_file.as_deref().map(|p| api.resolve_file_url(p)),
        }
    }

    pub fn format(&self) -> String {
        self.video.video_format().unwrap_or_else(|| "N/A".to_string())
    }
}

/// Fields of the add/edit video form
pub fn video_schema(editing: bool) -> FormSchema {
    let mut fields = vec![
        FieldSpec::text("title", "Title").required(),
        FieldSpec::text("short_description", "Short description")
            .required()
            .max_len(SHORT_DESCRIPTION_MAX),
        FieldSpec::text("long_description", "Long description"),
        FieldSpec::integer("video_number", "Video number").required(),
    ];
    if editing {
        fields.push(FieldSpec::flag("is_active", "Active"));
    }
    fields.push(FieldSpec::file("photo_file", "Photo"));
    fields.push(FieldSpec::file("video_file", "Video file"));
    FormSchema::new(fields)
}

/// Add or edit form for one video
pub struct VideoEditor {
    id: Option<i64>,
    form: FormState,
    service: VideoService,
    ctx: ScreenContext,
    _scope: ViewScope,
}

impl VideoEditor {
    /// Blank form for a new video
    pub fn create(ctx: &ScreenContext, session: &SessionStore) -> Mounted<Self> {
        if let Err(mounted) = admit(session, AccessLevel::Admin) {
            return mounted;
        }
        let scope = ViewScope::new();
        Mounted::Screen(Self {
            id: None,
            form: FormState::new(video_schema(false)),
            service: ctx.services.scoped(&scope).video_service,
            ctx: ctx.clone(),
            _scope: scope,
        })
    }

    /// Load an existing video into the form
    pub async fn edit(ctx: &ScreenContext, session: &SessionStore, id: i64) -> Result<Mounted<Self>> {
        if let Err(mounted) = admit(session, AccessLevel::Admin) {
            return Ok(mounted);
        }
        let scope = ViewScope::new();
        let mut editor = Self {
            id: Some(id),
            form: FormState::loading(video_schema(true)),
            service: ctx.services.scoped(&scope).video_service,
            ctx: ctx.clone(),
            _scope: scope,
        };

        match editor.service.get(id).await {
            Ok(video) => editor.form.finish_load(&video)?,
            Err(e) => {
                editor.ctx.notifier.error(&e);
                editor.form.fail_load(e.user_message())?;
            }
        }
        Ok(Mounted::Screen(editor))
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    /// Attach a file from disk to `photo_file` or `video_file`
    pub async fn attach_path(&mut self, field: &str, path: &Path) -> Result<()> {
        let file = FileAttachment::from_path(path).await?;
        self.form.attach(field, file)
    }

    /// Submit the form; success navigates back to the list
    pub async fn submit(&mut self) -> Result<Route> {
        if let Err(e) = self.form.begin_submit() {
            self.ctx.notifier.error(&e);
            return Err(e);
        }

        let body = self.form.to_form_data();
        let result = match self.id {
            Some(id) => self.service.update(id, body).await.map(|_| "Video updated successfully!"),
            None => self.service.create(body).await.map(|_| "Video uploaded successfully!"),
        };

        match result {
            Ok(message) => {
                self.form.succeed()?;
                info!(video_id = ?self.id, "Video saved");
                self.ctx.notifier.success(message);
                Ok(Route::Videos)
            }
            Err(e) => {
                self.ctx.notifier.error(&e);
                self.form.fail(&e)?;
                Err(e)
            }
        }
    }

    /// Leave the form after confirming that edits may be lost
    pub fn cancel(&self) -> Option<Route> {
        if self.ctx.confirm(DISCARD_PROMPT) {
            Some(Route::Videos)
        } else {
            None
        }
    }
}
