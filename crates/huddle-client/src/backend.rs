//! HTTP client for the room and captioning backend.
//!
//! The backend is an opaque collaborator: it hands out room credentials and
//! owns the server-side captioning sessions. Wire format:
//!
//! - `GET {base}/api/room/{roomname}` → `{"apiKey","sessionId","token"}`
//! - `POST {base}/api/opentok/start-captions` `{"sessionId","token"}` →
//!   `{"captionsId"}`
//! - `POST {base}/api/opentok/stop-captions` `{"captionId"}` → ignored

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use huddle_core::{CaptionsId, RoomCredentials};

/// Request timeout for backend calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the backend client.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("backend request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },
}

/// Room credential payload from `GET /api/room/{roomname}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoomInfo {
    api_key: String,
    session_id: String,
    token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StartCaptionsRequest<'a> {
    session_id: &'a str,
    token: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartCaptionsResponse {
    captions_id: CaptionsId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StopCaptionsRequest<'a> {
    caption_id: &'a str,
}

/// Client for the room/captioning backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client for the backend at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, BackendError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, base_url: base_url.into() })
    }

    /// Fetch room credentials for `room_name`, joining as `display_name`.
    pub async fn fetch_room(
        &self,
        room_name: &str,
        display_name: &str,
    ) -> Result<RoomCredentials, BackendError> {
        let url = format!("{}/api/room/{room_name}", self.base_url);
        let response = self.http.get(url).send().await?;
        let response = check_status(response)?;
        let info: RoomInfo = response.json().await?;
        Ok(RoomCredentials::new(info.api_key, info.session_id, info.token, display_name))
    }

    /// Start a server-side captioning session for a room session.
    pub async fn start_captions(
        &self,
        session_id: &str,
        token: &str,
    ) -> Result<CaptionsId, BackendError> {
        let url = format!("{}/api/opentok/start-captions", self.base_url);
        let body = StartCaptionsRequest { session_id, token };
        let response = self.http.post(url).json(&body).send().await?;
        let response = check_status(response)?;
        let started: StartCaptionsResponse = response.json().await?;
        Ok(started.captions_id)
    }

    /// Stop the captioning session identified by `caption_id`.
    ///
    /// The response body is ignored; only the status matters.
    pub async fn stop_captions(&self, caption_id: &CaptionsId) -> Result<(), BackendError> {
        let url = format!("{}/api/opentok/stop-captions", self.base_url);
        let body = StopCaptionsRequest { caption_id: caption_id.as_str() };
        let response = self.http.post(url).json(&body).send().await?;
        check_status(response)?;
        Ok(())
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(BackendError::Status { status: status.as_u16() })
    }
}
