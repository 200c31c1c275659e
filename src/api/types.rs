// src/api/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Social platform a post is composed for. Serializes as the capitalized
/// variant name, which is the exact string the backend expects.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Platform {
    #[default]
    LinkedIn,
    Instagram,
    Facebook,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::LinkedIn, Platform::Instagram, Platform::Facebook];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::LinkedIn => "LinkedIn",
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /api/upload`. `path` is the server-side storage path and is
/// echoed back verbatim in later generation requests.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UploadResponse {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GenerateRequest {
    pub filepath: String,
    pub platform: Platform,
    pub topic: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GenerateResponse {
    pub image_url: String,
    pub caption: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScheduleRequest {
    pub image_url: String,
    pub caption: String,
    pub platform: Platform,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ScheduleResponse {
    pub msg: String,
}

/// Body of `GET /api/analytics-data`. `engagement_trend` is one value per
/// day, oldest first; `platforms` is one value per platform in
/// LinkedIn/Instagram/Facebook order. Lengths are not guaranteed.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AnalyticsData {
    pub engagement_trend: Vec<f64>,
    pub platforms: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_serializes_as_capitalized_name() {
        let json = serde_json::to_string(&Platform::LinkedIn).expect("platform should serialize");
        assert_eq!(json, "\"LinkedIn\"");

        let parsed: Platform =
            serde_json::from_str("\"Instagram\"").expect("platform should deserialize");
        assert_eq!(parsed, Platform::Instagram);
    }

    #[test]
    fn generate_request_uses_wire_field_names() {
        let request = GenerateRequest {
            filepath: "/tmp/a.jpg".to_string(),
            platform: Platform::Facebook,
            topic: "launch".to_string(),
        };
        let json = serde_json::to_value(&request).expect("request should serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "filepath": "/tmp/a.jpg",
                "platform": "Facebook",
                "topic": "launch"
            })
        );
    }
}
