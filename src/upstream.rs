use std::time::Duration;

use reqwest::{header::CONTENT_TYPE, Client, Method, StatusCode};
use thiserror::Error;
use tracing::{debug, instrument, trace};
use url::Url;

use crate::{config::UpstreamConfig, job::Job};

const JOBS_PATH: [&str; 2] = ["v1", "jobs"];

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("invalid upstream base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to encode job: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode upstream response: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// HTTP client for the scheduler's `/v1/jobs` REST API.
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Clone, Debug)]
pub struct UpstreamClient {
    http: Client,
    base_url: Url,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let base_url =
            Url::parse(&config.base_url).map_err(|e| UpstreamError::InvalidBaseUrl {
                url: config.base_url.clone(),
                reason: e.to_string(),
            })?;

        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::InvalidBaseUrl {
                url: config.base_url.clone(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    /// `{base}/v1/jobs`
    pub fn jobs_url(&self) -> Url {
        self.url_for(&JOBS_PATH)
    }

    /// `{base}/v1/jobs/{name}`, with `name` percent-encoded as one segment.
    pub fn job_url(&self, name: &str) -> Url {
        self.url_for(&[JOBS_PATH[0], JOBS_PATH[1], name])
    }

    fn url_for(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    #[instrument(skip(self))]
    pub async fn list_jobs(&self) -> Result<Vec<Job>, UpstreamError> {
        let response = self.http.get(self.jobs_url()).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        trace!(%status, body = %String::from_utf8_lossy(&body), "Raw upstream job list");

        serde_json::from_slice(&body).map_err(UpstreamError::Decode)
    }

    #[instrument(skip(self, job), fields(job_name = job.name.as_deref()))]
    pub async fn create_job(&self, job: &Job) -> Result<StatusCode, UpstreamError> {
        self.send_job(Method::POST, self.jobs_url(), job).await
    }

    #[instrument(skip(self, job))]
    pub async fn update_job(&self, name: &str, job: &Job) -> Result<StatusCode, UpstreamError> {
        self.send_job(Method::PUT, self.job_url(name), job).await
    }

    #[instrument(skip(self))]
    pub async fn delete_job(&self, name: &str) -> Result<StatusCode, UpstreamError> {
        let response = self.http.delete(self.job_url(name)).send().await?;

        debug!(status = %response.status(), "Upstream answered job deletion");
        Ok(response.status())
    }

    async fn send_job(
        &self,
        method: Method,
        url: Url,
        job: &Job,
    ) -> Result<StatusCode, UpstreamError> {
        let payload = serde_json::to_vec(job).map_err(UpstreamError::Encode)?;

        let response = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;

        debug!(status = %response.status(), "Upstream answered job write");
        Ok(response.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> UpstreamClient {
        UpstreamClient::new(&UpstreamConfig {
            base_url: base_url.to_string(),
            timeout_seconds: None,
        })
        .expect("Failed to build upstream client")
    }

    #[test]
    fn test_jobs_url_appends_to_host() {
        let client = client("http://localhost:8080");

        assert_eq!(client.jobs_url().as_str(), "http://localhost:8080/v1/jobs");
        assert_eq!(client.job_url("x").as_str(), "http://localhost:8080/v1/jobs/x");
    }

    #[test]
    fn test_jobs_url_keeps_base_path_prefix() {
        let client = client("http://scheduler.internal/dkron/");

        assert_eq!(
            client.jobs_url().as_str(),
            "http://scheduler.internal/dkron/v1/jobs"
        );
    }

    #[test]
    fn test_job_name_is_encoded_as_single_segment() {
        let client = client("http://localhost:8080");

        assert_eq!(
            client.job_url("nightly/backup now").as_str(),
            "http://localhost:8080/v1/jobs/nightly%2Fbackup%20now"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = UpstreamClient::new(&UpstreamConfig {
            base_url: "not a url".to_string(),
            timeout_seconds: None,
        });

        assert!(matches!(result, Err(UpstreamError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_base_url_without_path_is_rejected() {
        let result = UpstreamClient::new(&UpstreamConfig {
            base_url: "mailto:ops@example.com".to_string(),
            timeout_seconds: None,
        });

        assert!(matches!(result, Err(UpstreamError::InvalidBaseUrl { .. })));
    }
}
