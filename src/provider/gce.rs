//! GCE image client against the compute REST API

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use super::{Image, ImageService};
use crate::util::{CONNECT_TIMEOUT, IMAGE_API_TIMEOUT};

/// Production endpoint for the compute image API
pub const DEFAULT_BASE_URL: &str = "https://compute.googleapis.com/compute/v1";

#[derive(Debug)]
pub struct GceImageClient {
    token: String,
    base_url: String,
    client: Client,
}

impl GceImageClient {
    pub fn new() -> Result<Self> {
        let token = std::env::var("GCP_ACCESS_TOKEN").context("GCP_ACCESS_TOKEN not set")?;
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Build a client against an explicit endpoint. Tests point this at a
    /// local mock server.
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(IMAGE_API_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent("bqshift/0.2")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            token: token.into(),
            base_url: base_url.into(),
            client,
        })
    }

    async fn fetch_image(&self, url: &str) -> Result<Image> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .context("Failed to send request to image API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Image API error {}: {}", status, body);
        }

        response
            .json::<Image>()
            .await
            .context("Invalid response format from image API")
    }
}

#[async_trait]
impl ImageService for GceImageClient {
    async fn image_from_family(&self, project: &str, family: &str) -> Result<Image> {
        let url = format!(
            "{}/projects/{}/global/images/family/{}",
            self.base_url, project, family
        );
        self.fetch_image(&url).await
    }

    async fn image(&self, project: &str, name: &str) -> Result<Image> {
        let url = format!(
            "{}/projects/{}/global/images/{}",
            self.base_url, project, name
        );
        self.fetch_image(&url).await
    }

    fn name(&self) -> &str {
        "gce"
    }
}
