// Availability source and park name lookup, plus the recreation.gov HTTP
// client implementing both.

use crate::dates::{format_iso, is_month_start, DateError};
use crate::recreation::{CampgroundResponse, MonthAvailability, WEB_BASE_URL};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    #[error("API error: {status_code} - {message}")]
    ApiResponseError { status_code: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Availability must be requested from the first of a month, got {0}")]
    NotMonthStart(NaiveDate),

    #[error("Client error: {0}")]
    ClientError(String),
}

impl From<DateError> for FetchError {
    fn from(err: DateError) -> Self {
        FetchError::MalformedResponse(err.to_string())
    }
}

/// Where monthly campsite availability comes from.
#[async_trait]
pub trait AvailabilitySource: Send + Sync {
    /// Availability of every campsite in `park_id` for the month starting at
    /// `month`, which must be the first day of that month.
    async fn fetch_month_availability(
        &self,
        park_id: &str,
        month: NaiveDate,
    ) -> Result<MonthAvailability, FetchError>;
}

#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn resolve_park_name(&self, park_id: &str) -> Result<String, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: WEB_BASE_URL.to_string(),
            user_agent: concat!("campsite-checker/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_ms: 30000,
        }
    }
}

pub struct RecreationClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl RecreationClient {
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::ClientError(e.to_string()))?;

        Ok(Self { config, http })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        debug!("GET {} {:?}", url, query);

        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            return Err(FetchError::ApiResponseError {
                status_code: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(|e| FetchError::MalformedResponse(e.to_string()))
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.config.timeout_ms)
        } else {
            FetchError::NetworkError(err.to_string())
        }
    }
}

#[async_trait]
impl AvailabilitySource for RecreationClient {
    async fn fetch_month_availability(
        &self,
        park_id: &str,
        month: NaiveDate,
    ) -> Result<MonthAvailability, FetchError> {
        if !is_month_start(month) {
            return Err(FetchError::NotMonthStart(month));
        }

        let url = self.url(&format!(
            "/api/camps/availability/campground/{}/month",
            park_id
        ));
        let start_date = format!("{}T00:00:00.000Z", format_iso(month));

        self.get_json(&url, &[("start_date", start_date)]).await
    }
}

#[async_trait]
impl NameResolver for RecreationClient {
    async fn resolve_park_name(&self, park_id: &str) -> Result<String, FetchError> {
        let url = self.url(&format!("/api/camps/campgrounds/{}", park_id));
        let response: CampgroundResponse = self.get_json(&url, &[]).await?;

        response.campground.facility_name.ok_or_else(|| {
            FetchError::MalformedResponse(format!("campground {} has no facility_name", park_id))
        })
    }
}
