//! Blocking HTTP transport wrapped for async callers.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use rodney_config::config::ApiConfig;
use rodney_core::{ColumnDescriptor, MutationRequest, RecordContext};
use rodney_dispatch::{MutationExecutor, RecordFields, RecordSource, RemoteError};

use crate::graphql::{self, GraphqlRequest};

/// Talks to a GraphQL endpoint with a ureq agent.
///
/// Each call runs on tokio's blocking pool, so the client must be used from
/// within a tokio runtime.
#[derive(Clone)]
pub struct GraphqlClient {
    agent: ureq::Agent,
    endpoint: String,
    token: String,
    api_version: Option<String>,
}

impl fmt::Debug for GraphqlClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphqlClient")
            .field("endpoint", &self.endpoint)
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl GraphqlClient {
    /// Build a client from the `api` config section.
    ///
    /// Fails when no token is configured.
    pub fn from_config(api: &ApiConfig) -> Result<Self, RemoteError> {
        let token = api
            .token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                RemoteError::Rejected(
                    "no API token configured (set api.token or RODNEY_API__TOKEN)".into(),
                )
            })?;

        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(api.timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();

        Ok(Self {
            agent,
            endpoint: api.endpoint.clone(),
            token,
            api_version: api.api_version.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST one request and return the parsed JSON body.
    async fn post(&self, request: GraphqlRequest) -> Result<Value, RemoteError> {
        let client = self.clone();
        tokio::task::spawn_blocking(move || client.send(&request))
            .await
            .map_err(|e| RemoteError::Transport(format!("request task failed: {e}")))?
    }

    fn send(&self, request: &GraphqlRequest) -> Result<Value, RemoteError> {
        let mut builder = self
            .agent
            .post(self.endpoint.as_str())
            .header("Authorization", self.token.as_str());
        if let Some(version) = self.api_version.as_deref() {
            builder = builder.header("API-Version", version);
        }

        let mut response = builder
            .send_json(request)
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        let status = response.status();

        match response.body_mut().read_json::<Value>() {
            Ok(body) => {
                if !status.is_success() {
                    warn!(status = status.as_u16(), "remote answered with an error status");
                }
                Ok(body)
            }
            Err(e) if status.is_success() => Err(RemoteError::Decode(e.to_string())),
            Err(_) => Err(RemoteError::Remote(format!("HTTP {}", status.as_u16()))),
        }
    }
}

#[async_trait]
impl MutationExecutor for GraphqlClient {
    async fn execute(&self, request: &MutationRequest) -> Result<(), RemoteError> {
        let gql = GraphqlRequest::from_mutation(request)?;
        debug!(
            operation = %request.operation,
            record = %request.record_id,
            "sending mutation"
        );
        let body = self.post(gql).await?;
        graphql::decode_mutation(body)
    }
}

#[async_trait]
impl RecordSource for GraphqlClient {
    async fn fetch_fields(&self, ctx: &RecordContext) -> Result<RecordFields, RemoteError> {
        debug!(record = %ctx.record_id, "fetching item fields");
        let body = self.post(GraphqlRequest::item_fields(&ctx.record_id)).await?;
        graphql::decode_item_fields(body, &ctx.record_id)
    }

    async fn fetch_columns(
        &self,
        collection_id: &str,
    ) -> Result<Vec<ColumnDescriptor>, RemoteError> {
        debug!(board = collection_id, "fetching board columns");
        let body = self.post(GraphqlRequest::board_columns(collection_id)).await?;
        graphql::decode_board_columns(body, collection_id)
    }
}
