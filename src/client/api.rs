use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::api::envelope::{Empty, Envelope};
use crate::models::{Property, PropertyInput};
use crate::store::PropertyFilter;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a failure envelope
    #[error("{message} (status {status})")]
    Api { status: u16, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }
}

/// Operations the dashboard needs from the property API
#[async_trait]
pub trait PropertyApi: Send + Sync {
    async fn get_all_properties(&self, filter: &PropertyFilter)
        -> Result<Vec<Property>, ClientError>;

    async fn get_property(&self, id: &str) -> Result<Property, ClientError>;

    async fn create_property(&self, input: &PropertyInput) -> Result<Property, ClientError>;

    async fn update_property(
        &self,
        id: &str,
        input: &PropertyInput,
    ) -> Result<Property, ClientError>;

    async fn delete_property(&self, id: &str) -> Result<(), ClientError>;
}

/// HTTP client for the `/api/properties` endpoints
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub const TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a client rooted at `base_url`, e.g. `http://localhost:5000/api`
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Self::TIMEOUT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/properties{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        let envelope: Envelope<T> = response.json().await?;

        if status.is_success() && envelope.success {
            envelope
                .data
                .ok_or_else(|| ClientError::Malformed("success envelope without data".into()))
        } else {
            Err(ClientError::Api {
                status: status.as_u16(),
                message: envelope.error.unwrap_or_else(|| status.to_string()),
            })
        }
    }
}

#[async_trait]
impl PropertyApi for ApiClient {
    async fn get_all_properties(
        &self,
        filter: &PropertyFilter,
    ) -> Result<Vec<Property>, ClientError> {
        let url = self.url("");
        debug!(%url, ?filter, "Making GET request");
        let response = self.client.get(&url).query(filter).send().await?;
        Self::decode(response).await
    }

    async fn get_property(&self, id: &str) -> Result<Property, ClientError> {
        let url = self.url(&format!("/{id}"));
        debug!(%url, "Making GET request");
        let response = self.client.get(&url).send().await?;
        Self::decode(response).await
    }

    async fn create_property(&self, input: &PropertyInput) -> Result<Property, ClientError> {
        let url = self.url("");
        debug!(%url, "Making POST request");
        let response = self.client.post(&url).json(input).send().await?;
        Self::decode(response).await
    }

    async fn update_property(
        &self,
        id: &str,
        input: &PropertyInput,
    ) -> Result<Property, ClientError> {
        let url = self.url(&format!("/{id}"));
        debug!(%url, "Making PUT request");
        let response = self.client.put(&url).json(input).send().await?;
        Self::decode(response).await
    }

    async fn delete_property(&self, id: &str) -> Result<(), ClientError> {
        let url = self.url(&format!("/{id}"));
        debug!(%url, "Making DELETE request");
        let response = self.client.delete(&url).send().await?;
        Self::decode::<Empty>(response).await.map(|_| ())
    }
}
