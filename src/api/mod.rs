// src/api/mod.rs
pub mod client;
pub mod error;
pub mod types;

pub use client::DeskClient;
pub use error::ApiError;
pub use types::{
    AnalyticsData, GenerateRequest, GenerateResponse, Platform, ScheduleRequest, ScheduleResponse,
    UploadResponse,
};
