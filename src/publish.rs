use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use spdlog::{info, warn};
use thiserror::Error;

use crate::config::Config;
use crate::error::PublishError;
use crate::file_list::list_markdown_files;
use crate::post::ParsedPost;

pub const CONTENT_FORMAT: &str = "markdown";
pub const STATUS_CREATED: u16 = 201;

const SUCCESS_MESSAGE: &str = "File uploaded and posted successfully. ✅";
const FAILURE_MESSAGE: &str = "An error occurred. ❌";

/// Body posted to the blogging API.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    pub title: String,
    pub content_format: &'static str,
    pub content: String,
    pub tags: Vec<String>,
}

impl PublishRequest {
    pub fn new(post: ParsedPost, tags: Vec<String>) -> Self {
        PublishRequest {
            title: post.title,
            content_format: CONTENT_FORMAT,
            content: post.body,
            tags,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublishResult {
    pub success: bool,
    pub message: String,
}

impl PublishResult {
    pub fn from_response(response: &TransportResponse) -> Self {
        if response.status == STATUS_CREATED {
            return PublishResult {
                success: true,
                message: SUCCESS_MESSAGE.to_string(),
            };
        }

        PublishResult {
            success: false,
            message: format!("{} (status {})\n{}", FAILURE_MESSAGE, response.status, response.body),
        }
    }

    pub fn from_transport_error(err: &TransportError) -> Self {
        PublishResult {
            success: false,
            message: format!("{}\n{}", FAILURE_MESSAGE, err),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request timed out: {0}")]
    Timeout(String),
    #[error("Error sending request: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

/// Outbound side of a publish: one JSON POST authenticated with a bearer token.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, url: &str, token: &str, body: String) -> Result<TransportResponse, TransportError>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(ReqwestTransport { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(&self, url: &str, token: &str, body: String) -> Result<TransportResponse, TransportError> {
        let res = self.client.post(url)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(token)
            .body(body)
            .send()
            .await?;

        let status = res.status().as_u16();
        let body = res.text().await?;
        Ok(TransportResponse { status, body })
    }
}

pub struct Publisher {
    markdown_dir: PathBuf,
    url: String,
    token: String,
    tags: Vec<String>,
    transport: Arc<dyn Transport>,
}

impl Publisher {
    pub fn new(config: &Config, transport: Arc<dyn Transport>) -> Self {
        Publisher {
            markdown_dir: config.paths.markdown_dir.clone(),
            url: config.publish.url.clone(),
            token: config.publish.token.clone(),
            tags: config.publish.tags(),
            transport,
        }
    }

    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        let transport = ReqwestTransport::new(config.publish.timeout())?;
        Ok(Self::new(config, Arc::new(transport)))
    }

    pub fn markdown_dir(&self) -> &Path {
        &self.markdown_dir
    }

    pub fn list_files(&self) -> io::Result<Vec<String>> {
        list_markdown_files(&self.markdown_dir)
    }

    /// Maps a submitted name to its path. Only names present in the current
    /// listing are accepted, so nothing outside the directory can be opened.
    pub fn resolve(&self, file_name: &str) -> Result<PathBuf, PublishError> {
        let files = self.list_files()?;
        if !files.iter().any(|f| f == file_name) {
            return Err(PublishError::InvalidFile(file_name.to_string()));
        }
        Ok(self.markdown_dir.join(file_name))
    }

    pub fn prepare(&self, file_name: &str) -> Result<PublishRequest, PublishError> {
        let path = self.resolve(file_name)?;
        let content = std::fs::read_to_string(path)?;
        let post = ParsedPost::from_string(file_name, content)?;
        Ok(PublishRequest::new(post, self.tags.clone()))
    }

    /// Reads, parses and sends `file_name`. Local problems are errors and
    /// stop before the request goes out; anything the remote side does
    /// ends up in the returned `PublishResult`.
    pub async fn publish(&self, file_name: &str) -> Result<PublishResult, PublishError> {
        let request = self.prepare(file_name)?;
        info!("Publishing {} - title={}", file_name, request.title);

        let body = serde_json::to_string(&request).map_err(io::Error::from)?;
        let result = match self.transport.post_json(&self.url, &self.token, body).await {
            Ok(response) => {
                info!("Publish of {} returned status {}", file_name, response.status);
                if response.status != STATUS_CREATED {
                    warn!("Remote API rejected {}: {}", file_name, response.body);
                }
                PublishResult::from_response(&response)
            }
            Err(err) => {
                warn!("Publish of {} failed: {}", file_name, err);
                PublishResult::from_transport_error(&err)
            }
        };

        Ok(result)
    }
}
