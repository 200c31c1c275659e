// src/state/composer.rs
use std::path::Path;

use crate::api::{
    GenerateRequest, GenerateResponse, Platform, ScheduleRequest, ScheduleResponse, UploadResponse,
};

/// Alert shown when generation is attempted before any upload succeeded.
/// The check is local; no request leaves the client.
pub const UPLOAD_FIRST_MESSAGE: &str = "Please upload an image first";

/// Progress of the source-image upload, backing the status label next to the
/// picker button.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadStatus {
    #[default]
    None,
    Uploading {
        file_name: String,
    },
    Uploaded,
    Failed {
        message: String,
    },
}

/// Which composer request is in flight. At most one: the triggering controls
/// stay disabled until the result arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingCall {
    Upload,
    Generate,
    Schedule,
}

/// Generated content being previewed. `caption` doubles as the edit buffer;
/// scheduling sends whatever the user left in it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreviewContent {
    pub image_url: String,
    pub caption: String,
}

/// Session state of the upload, generate, preview and schedule flow.
///
/// Transitions are plain methods so the whole sequence can be exercised
/// without a window or a server; the egui layer reads fields and calls these
/// on click.
#[derive(Debug)]
pub struct ComposerState {
    /// Server-assigned storage path of the last successful upload. Empty
    /// until then, and cleared only by [`ComposerState::reset`].
    pub uploaded_path: String,
    pub upload_status: UploadStatus,
    pub platform: Platform,
    pub topic: String,
    pub preview: Option<PreviewContent>,
    pub pending: Option<PendingCall>,
    /// Confirmation message from a successful schedule call, shown in a
    /// dialog until dismissed.
    pub schedule_result: Option<String>,
}

impl Default for ComposerState {
    fn default() -> Self {
        Self {
            uploaded_path: String::new(),
            upload_status: UploadStatus::None,
            platform: Platform::LinkedIn,
            topic: String::new(),
            preview: None,
            pending: None,
            schedule_result: None,
        }
    }
}

impl ComposerState {
    pub fn request_in_flight(&self) -> bool {
        self.pending.is_some()
    }

    /// The user picked a file: show "Uploading: name" and mark the upload
    /// pending. The transfer itself is started by the caller.
    pub fn begin_upload(&mut self, path: &Path) {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.upload_status = UploadStatus::Uploading { file_name };
        self.pending = Some(PendingCall::Upload);
    }

    pub fn apply_upload(&mut self, response: UploadResponse) {
        self.uploaded_path = response.path;
        self.upload_status = UploadStatus::Uploaded;
        self.pending = None;
    }

    /// A failed upload leaves the previous path empty and the picker
    /// enabled, so the user can simply retry.
    pub fn fail_upload(&mut self, message: String) {
        self.upload_status = UploadStatus::Failed { message };
        self.pending = None;
    }

    /// Builds the generation request, or `None` while nothing has been
    /// uploaded. `None` is the cue for [`UPLOAD_FIRST_MESSAGE`].
    pub fn generate_request(&self) -> Option<GenerateRequest> {
        if self.uploaded_path.is_empty() {
            return None;
        }
        Some(GenerateRequest {
            filepath: self.uploaded_path.clone(),
            platform: self.platform,
            topic: self.topic.clone(),
        })
    }

    pub fn begin_generate(&mut self) {
        self.pending = Some(PendingCall::Generate);
    }

    /// Stores generated content, revealing the preview panel. The response
    /// caption seeds the editable buffer.
    pub fn apply_generate(&mut self, response: GenerateResponse) {
        self.preview = Some(PreviewContent {
            image_url: response.image_url,
            caption: response.caption,
        });
        self.pending = None;
    }

    /// Builds the scheduling request from what is on screen right now: the
    /// previewed image and the caption as currently edited.
    pub fn schedule_request(&self) -> Option<ScheduleRequest> {
        self.preview.as_ref().map(|preview| ScheduleRequest {
            image_url: preview.image_url.clone(),
            caption: preview.caption.clone(),
            platform: self.platform,
        })
    }

    pub fn begin_schedule(&mut self) {
        self.pending = Some(PendingCall::Schedule);
    }

    pub fn apply_schedule(&mut self, response: ScheduleResponse) {
        self.schedule_result = Some(response.msg);
        self.pending = None;
    }

    /// Clears the in-flight marker after a failed generate or schedule call
    /// so the buttons become clickable again.
    pub fn request_failed(&mut self) {
        self.pending = None;
    }

    /// Drops the whole session: path, status, topic, preview and any
    /// confirmation. Runs when the user leaves the flow after scheduling.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
