// src/state/mod.rs
pub mod analytics;
pub mod composer;

pub use analytics::{AnalyticsState, FetchStatus};
pub use composer::{ComposerState, PendingCall, PreviewContent, UploadStatus};

use crate::net::RequestManager;

// Screen/tab tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Composer,
    Analytics,
}

// Core application state
#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,

    // Per-screen state
    pub composer: ComposerState,
    pub analytics: AnalyticsState,

    // Shared error dialog
    pub error_message: Option<String>,

    // Background request handling
    pub request_manager: RequestManager,
}

impl AppState {
    pub fn new(request_manager: RequestManager) -> Self {
        Self {
            screen: Screen::Composer,
            composer: ComposerState::default(),
            analytics: AnalyticsState::default(),
            error_message: None,
            request_manager,
        }
    }
}
