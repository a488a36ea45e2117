use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::FileConfig;
use crate::domain::{Course, CourseFilters, Recommendation};
use crate::error::{ApiError, Result};

const USER_AGENT: &str = concat!("windingroad/", env!("CARGO_PKG_VERSION"));

/// Body of `GET /health`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Blocking client for the course catalog REST API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    max_attempts: u32,
    retry_delay: Duration,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|source| ApiError::Request {
                url: base_url.to_string(),
                source,
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_attempts: 3,
            retry_delay: Duration::from_secs(2),
        })
    }

    pub fn from_config(config: &FileConfig) -> Result<Self> {
        Ok(Self::new(&config.api_url, Duration::from_secs(config.timeout_secs))?
            .with_max_attempts(config.max_attempts))
    }

    /// Total attempts per request, the first one included (at least 1)
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Base delay between retries; attempt `n` waits `n * delay`
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// List courses matching the server-side filters
    pub fn get_courses(&self, filters: &CourseFilters) -> Result<Vec<Course>> {
        // Go backends answer an empty result with `null`
        let courses: Option<Vec<Course>> = self.get("/courses", &filters.query_pairs())?;
        Ok(courses.unwrap_or_default())
    }

    pub fn get_course(&self, id: u32) -> Result<Course> {
        self.get(&format!("/courses/{}", id), &[])
            .map_err(|e| not_found(e, "course", id))
    }

    pub fn get_recommendations(&self) -> Result<Vec<Recommendation>> {
        let recs: Option<Vec<Recommendation>> = self.get("/recommendations", &[])?;
        Ok(recs.unwrap_or_default())
    }

    pub fn get_recommendation(&self, id: u32) -> Result<Recommendation> {
        self.get(&format!("/recommendations/{}", id), &[])
            .map_err(|e| not_found(e, "recommendation", id))
    }

    pub fn health(&self) -> Result<HealthStatus> {
        self.get("/health", &[])
    }

    fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = self.url(endpoint);
        tracing::debug!("GET {} {:?}", url, query);

        let response = self.send_with_retry(&url, || {
            self.http
                .get(&url)
                .header(reqwest::header::ACCEPT, "application/json")
                .query(query)
        })?;

        response
            .json()
            .map_err(|source| ApiError::Decode { url, source })
    }

    /// Send a request, retrying rate-limit and gateway errors
    fn send_with_retry<F>(&self, url: &str, build: F) -> Result<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut last_status = None;

        for attempt in 0..self.max_attempts {
            if attempt > 0 {
                let wait = self.retry_delay * attempt;
                tracing::warn!(
                    "{} returned {}, retrying in {:?} (attempt {}/{})",
                    url,
                    last_status.map(|s: StatusCode| s.as_u16()).unwrap_or_default(),
                    wait,
                    attempt + 1,
                    self.max_attempts
                );
                std::thread::sleep(wait);
            }

            let response = build().send().map_err(|source| ApiError::Request {
                url: url.to_string(),
                source,
            })?;

            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }
            if is_retriable(status) {
                last_status = Some(status);
                continue;
            }
            return Err(ApiError::Status {
                url: url.to_string(),
                status,
            });
        }

        Err(ApiError::Status {
            url: url.to_string(),
            status: last_status.unwrap_or(StatusCode::SERVICE_UNAVAILABLE),
        })
    }
}

/// 429 Too Many Requests and the gateway failures
fn is_retriable(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 502 | 503 | 504)
}

fn not_found(err: ApiError, what: &'static str, id: u32) -> ApiError {
    match err {
        ApiError::Status { status, .. } if status == StatusCode::NOT_FOUND => {
            ApiError::NotFound { what, id }
        }
        other => other,
    }
}
