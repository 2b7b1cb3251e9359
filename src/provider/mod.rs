//! Image provider abstraction
//!
//! Two read-only queries against a compute provider's image API: newest
//! image in a named family, and a named image. Both are pass-throughs; no
//! state is kept here and no retry is attempted (the caller's orchestration
//! owns that).

pub mod gce;

pub use gce::GceImageClient;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ShiftError;

/// Image descriptor as returned by the provider.
///
/// Only the commonly-inspected fields are modeled; everything else in the
/// provider payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub self_link: Option<String>,
    #[serde(default)]
    pub creation_timestamp: Option<String>,
    #[serde(default)]
    pub disk_size_gb: Option<String>,
    #[serde(default)]
    pub archive_size_bytes: Option<String>,
}

/// Read-only image lookup abstraction
#[async_trait]
pub trait ImageService: Send + Sync + std::fmt::Debug {
    /// Retrieve the newest image that is part of a given family in a project
    async fn image_from_family(&self, project: &str, family: &str) -> Result<Image>;

    /// Retrieve a single named image from a project
    async fn image(&self, project: &str, name: &str) -> Result<Image>;

    /// Get the service name (e.g., "gce", "mock")
    fn name(&self) -> &str;
}

/// Create an image service by name
pub fn create_image_service(name: &str) -> crate::error::Result<Box<dyn ImageService>> {
    if name.eq_ignore_ascii_case("gce") {
        let client = GceImageClient::new().map_err(|e| ShiftError::ImageApi {
            message: format!("{e:#}"),
        })?;
        Ok(Box::new(client))
    } else if name.eq_ignore_ascii_case("mock") {
        Ok(Box::new(MockImageService))
    } else {
        Err(ShiftError::UnknownProvider {
            name: name.to_string(),
        })
    }
}

/// Mock service for tests and offline smoke runs
#[derive(Debug, Default)]
pub struct MockImageService;

#[async_trait]
impl ImageService for MockImageService {
    async fn image_from_family(&self, project: &str, family: &str) -> Result<Image> {
        Ok(Image {
            name: format!("{family}-v20260101"),
            id: Some("0".to_string()),
            family: Some(family.to_string()),
            status: Some("READY".to_string()),
            self_link: Some(format!(
                "https://mock.local/projects/{project}/global/images/{family}-v20260101"
            )),
            creation_timestamp: None,
            disk_size_gb: Some("10".to_string()),
            archive_size_bytes: None,
        })
    }

    async fn image(&self, project: &str, name: &str) -> Result<Image> {
        Ok(Image {
            name: name.to_string(),
            id: Some("0".to_string()),
            family: None,
            status: Some("READY".to_string()),
            self_link: Some(format!(
                "https://mock.local/projects/{project}/global/images/{name}"
            )),
            creation_timestamp: None,
            disk_size_gb: Some("10".to_string()),
            archive_size_bytes: None,
        })
    }

    fn name(&self) -> &str {
        "mock"
    }
}
