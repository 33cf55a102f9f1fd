use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::api_client::{ApiClient, ApiError, Resource};

const STACKS_PATH: &str = "/v2/stacks";

/// An OS/runtime base image offered by the platform. Read-only on this side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    pub name: String,
    pub description: String,
    pub guid: String,
}

#[derive(Debug, Deserialize)]
struct StackEntity {
    name: String,
    #[serde(default)]
    description: Option<String>,
}

impl From<Resource<StackEntity>> for Stack {
    fn from(resource: Resource<StackEntity>) -> Self {
        Self {
            name: resource.entity.name,
            description: resource.entity.description.unwrap_or_default(),
            guid: resource.metadata.guid,
        }
    }
}

#[async_trait]
pub trait StackFinder: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Stack, ApiError>;
}

#[async_trait]
pub trait StackLister: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Stack>, ApiError>;
}

pub struct CloudControllerStackRepository {
    client: ApiClient,
}

impl CloudControllerStackRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StackFinder for CloudControllerStackRepository {
    async fn find_by_name(&self, name: &str) -> Result<Stack, ApiError> {
        let resources: Vec<Resource<StackEntity>> = self
            .client
            .list_resources(STACKS_PATH, &[("q", format!("name:{name}"))])
            .await?;
        let stack = resources
            .into_iter()
            .next()
            .map(Stack::from)
            .ok_or_else(|| ApiError::ModelNotFound {
                model: "Stack",
                name: name.to_owned(),
            })?;
        debug!("Found stack {stack:?}");
        Ok(stack)
    }
}

#[async_trait]
impl StackLister for CloudControllerStackRepository {
    async fn find_all(&self) -> Result<Vec<Stack>, ApiError> {
        let resources: Vec<Resource<StackEntity>> =
            self.client.list_resources(STACKS_PATH, &[]).await?;
        Ok(resources.into_iter().map(Stack::from).collect())
    }
}
