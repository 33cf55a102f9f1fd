use std::{collections::HashSet, time::Duration};

use reqwest::{header::AUTHORIZATION, Client, Response};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{model} {name} not found")]
    ModelNotFound { model: &'static str, name: String },
    #[error("Server error, status code: {status}, error code: {error_code}, message: {description}")]
    Http {
        status: u16,
        error_code: String,
        description: String,
    },
    #[error("Failed to build HTTP client: {0}")]
    Client(reqwest::Error),
    #[error("Pagination loop: {0} was already fetched")]
    PaginationLoop(String),
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Invalid response from API: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One page of a v2 list endpoint.
#[derive(Debug, Deserialize)]
pub struct PaginatedResources<T> {
    #[serde(default)]
    pub next_url: Option<String>,
    pub resources: Vec<Resource<T>>,
}

#[derive(Debug, Deserialize)]
pub struct Resource<T> {
    pub metadata: Metadata,
    pub entity: T,
}

#[derive(Debug, Deserialize)]
pub struct Metadata {
    pub guid: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorBody {
    code: i64,
    description: String,
    error_code: String,
}

pub struct ApiClient {
    inner: Client,
    base_url: String,
    access_token: String,
}

impl ApiClient {
    pub fn new(base_url: &str, access_token: &str, ssl_disabled: bool) -> Result<Self, ApiError> {
        let inner = Client::builder()
            .timeout(Duration::from_secs(30))
            .danger_accept_invalid_certs(ssl_disabled)
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self {
            inner,
            base_url: base_url.trim_end_matches('/').to_owned(),
            access_token: access_token.to_owned(),
        })
    }

    /// Fetches every page of `path`, following `next_url` until the last page.
    /// A `next_url` seen twice is an error.
    pub async fn list_resources<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<Resource<T>>, ApiError> {
        let mut resources = Vec::new();
        let mut visited = HashSet::new();
        let mut page: PaginatedResources<T> = self.get(path, query).await?;
        loop {
            resources.append(&mut page.resources);
            let Some(next_url) = page.next_url.take() else {
                break;
            };
            if !visited.insert(next_url.clone()) {
                return Err(ApiError::PaginationLoop(next_url));
            }
            page = self.get(&next_url, &[]).await?;
        }
        debug!("Fetched {} resources from {path}", resources.len());
        Ok(resources)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {url} {query:?}");
        let mut request = self
            .inner
            .get(&url)
            .header(AUTHORIZATION, &self.access_token);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = Self::check_status(request.send().await?).await?;
        let body = response.text().await?;
        trace!("Response body: {body}");
        Ok(serde_json::from_str(&body)?)
    }

    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!("Request failed with {status}: {body}");
        let error = serde_json::from_str::<ErrorBody>(&body).unwrap_or_else(|_| ErrorBody {
            description: body,
            ..ErrorBody::default()
        });
        Err(ApiError::Http {
            status: status.as_u16(),
            error_code: if error.error_code.is_empty() {
                error.code.to_string()
            } else {
                error.error_code
            },
            description: error.description,
        })
    }
}
