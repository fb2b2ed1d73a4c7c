//! Meeting booking request and the HTTP client that sends it.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat};
use chrono_tz::Tz;
use serde::Serialize;

use crate::config::Settings;
use crate::error::{SlotbookError, SlotbookResult};

pub use reqwest::StatusCode;

/// Every demo is booked for the same length.
pub const MEETING_DURATION: &str = "30m";

pub const SUBMIT_FAILED: &str = "Failed to schedule the meeting. Please try again.";

/// Body of `POST /v1/open/meeting`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeetingRequest {
    pub user_email: String,
    /// ISO-8601 with millisecond precision and a numeric offset,
    /// e.g. `2026-10-20T10:00:00.000+05:30`.
    pub date_time: String,
    pub duration: String,
    pub time_zone: String,
}

impl MeetingRequest {
    pub fn new(user_email: impl Into<String>, start: &DateTime<Tz>) -> Self {
        MeetingRequest {
            user_email: user_email.into(),
            date_time: start.to_rfc3339_opts(SecondsFormat::Millis, false),
            duration: MEETING_DURATION.to_string(),
            time_zone: start.timezone().name().to_string(),
        }
    }
}

/// Outcome of the latest submit attempt. Reset whenever a new attempt starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingStatus {
    pub loading: bool,
    pub success: bool,
    pub error: Option<String>,
}

impl BookingStatus {
    /// Forget the previous attempt's result without touching `loading`.
    pub fn clear_result(&mut self) {
        self.success = false;
        self.error = None;
    }

    pub fn start(&mut self) {
        self.loading = true;
        self.success = false;
        self.error = None;
    }

    pub fn succeed(&mut self) {
        self.loading = false;
        self.success = true;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.success = false;
        self.error = Some(message.into());
    }
}

/// Something that can book a meeting.
pub trait MeetingService {
    fn schedule(&self, request: &MeetingRequest) -> impl Future<Output = SlotbookResult<()>> + Send;
}

/// HTTP client for the booking service.
#[derive(Debug, Clone)]
pub struct MeetingClient {
    http: reqwest::Client,
    url: String,
}

impl MeetingClient {
    pub fn new(settings: &Settings) -> SlotbookResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(MeetingClient {
            http: builder.build()?,
            url: settings.meeting_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl MeetingService for MeetingClient {
    /// POST the request once. Any 2xx is a success; the body is ignored.
    async fn schedule(&self, request: &MeetingRequest) -> SlotbookResult<()> {
        tracing::info!(url = %self.url, date_time = %request.date_time, "booking meeting");

        let resp = self.http.post(&self.url).json(request).send().await?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(%status, "booking service rejected the request");
            return Err(SlotbookError::UnexpectedStatus(status));
        }

        tracing::info!(%status, "meeting booked");
        Ok(())
    }
}
