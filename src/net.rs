// src/net.rs
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use anyhow::{Context, Result};
use eframe::egui;
use tokio::runtime::Runtime;
use tracing::debug;

use crate::api::{
    AnalyticsData, ApiError, DeskClient, GenerateRequest, GenerateResponse, ScheduleRequest,
    ScheduleResponse, UploadResponse,
};

/// Outcome of one finished background request, handed to the UI thread
/// through the channel. Each variant carries the full `Result` so the frame
/// handler deals with both branches in one place.
#[derive(Debug)]
pub enum ApiEvent {
    UploadFinished(Result<UploadResponse, ApiError>),
    GenerateFinished(Result<GenerateResponse, ApiError>),
    ScheduleFinished(Result<ScheduleResponse, ApiError>),
    AnalyticsFinished(Result<AnalyticsData, ApiError>),
    /// Preview bytes for `url`. The handler drops results whose URL no
    /// longer matches the preview on screen.
    PreviewImageFinished {
        url: String,
        result: Result<Vec<u8>, ApiError>,
    },
}

/// Runs backend calls off the UI thread.
///
/// One tokio task per request; results come back as [`ApiEvent`]s drained
/// once per frame. Every delivery requests a repaint so a finished call
/// shows up without waiting for input.
#[derive(Debug)]
pub struct RequestManager {
    runtime: Runtime,
    client: Arc<DeskClient>,
    tx: Sender<ApiEvent>,
    rx: Receiver<ApiEvent>,
}

impl RequestManager {
    pub fn new(client: DeskClient) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .context("Failed to start background runtime")?;
        let (tx, rx) = mpsc::channel();

        Ok(Self {
            runtime,
            client: Arc::new(client),
            tx,
            rx,
        })
    }

    /// Next finished request, if any. Non-blocking; called from the frame
    /// loop until empty.
    pub fn poll(&self) -> Option<ApiEvent> {
        self.rx.try_recv().ok()
    }

    pub fn start_upload(&self, path: PathBuf, ctx: egui::Context) {
        debug!(path = %path.display(), "starting upload");
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = client.upload_image(&path).await;
            Self::deliver(&tx, ApiEvent::UploadFinished(result), &ctx);
        });
    }

    pub fn start_generate(&self, request: GenerateRequest, ctx: egui::Context) {
        debug!(platform = %request.platform, "starting content generation");
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = client.generate_content(&request).await;
            Self::deliver(&tx, ApiEvent::GenerateFinished(result), &ctx);
        });
    }

    pub fn start_schedule(&self, request: ScheduleRequest, ctx: egui::Context) {
        debug!(platform = %request.platform, "starting schedule request");
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = client.schedule_post(&request).await;
            Self::deliver(&tx, ApiEvent::ScheduleFinished(result), &ctx);
        });
    }

    pub fn start_analytics(&self, ctx: egui::Context) {
        debug!("starting analytics fetch");
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = client.analytics_data().await;
            Self::deliver(&tx, ApiEvent::AnalyticsFinished(result), &ctx);
        });
    }

    pub fn start_preview_fetch(&self, url: String, ctx: egui::Context) {
        debug!(url = %url, "fetching preview image");
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = client.fetch_image(&url).await;
            Self::deliver(&tx, ApiEvent::PreviewImageFinished { url, result }, &ctx);
        });
    }

    fn deliver(tx: &Sender<ApiEvent>, event: ApiEvent, ctx: &egui::Context) {
        // The receiver only disappears during shutdown.
        if tx.send(event).is_ok() {
            ctx.request_repaint();
        }
    }
}
