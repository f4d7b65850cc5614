use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::error::{DiscussError, Result};
use crate::pagination::Variables;

const USER_AGENT: &str = concat!("gh-discuss/", env!("CARGO_PKG_VERSION"));

/// Executes GraphQL documents against a remote endpoint.
///
/// Implementations return the `data` member of the response. Transport,
/// authentication and GraphQL-level errors are all reported as errors.
#[async_trait]
pub trait GraphQLExecutor: Send + Sync {
    async fn execute(&self, query: &str, variables: Variables) -> Result<Value>;

    /// Run a mutation whose single argument is bound to `$input`.
    async fn mutate(&self, mutation: &str, input: Variables) -> Result<Value> {
        let variables = Variables::new().with("input", input.into_value());
        self.execute(mutation, variables).await
    }
}

pub struct GitHubClient {
    http: Client,
    endpoint: String,
    token: String,
}

#[derive(Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
    variables: &'a Variables,
}

#[derive(Deserialize)]
struct GraphQLResponse {
    data: Option<Value>,
    errors: Option<Vec<GraphQLError>>,
}

#[derive(Deserialize, Debug)]
struct GraphQLError {
    message: String,
    #[serde(rename = "type")]
    kind: Option<String>,
}

const NOT_FOUND_TYPE: &str = "NOT_FOUND";

impl GraphQLError {
    fn is_not_found(&self) -> bool {
        self.kind.as_deref() == Some(NOT_FOUND_TYPE)
    }
}

/// A response whose errors are all `NOT_FOUND` is a missing record, not a
/// remote failure.
fn graphql_errors(errors: Vec<GraphQLError>) -> DiscussError {
    let not_found = errors.iter().all(GraphQLError::is_not_found);
    let messages = errors.into_iter().map(|e| e.message).collect();
    if not_found {
        DiscussError::NotFound { messages }
    } else {
        DiscussError::GraphQL { messages }
    }
}

impl GitHubClient {
    pub fn new(endpoint: String, token: String) -> Self {
        Self {
            http: Client::new(),
            endpoint,
            token,
        }
    }
}

#[async_trait]
impl GraphQLExecutor for GitHubClient {
    #[instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn execute(&self, query: &str, variables: Variables) -> Result<Value> {
        let request = GraphQLRequest {
            query,
            variables: &variables,
        };
        debug!(variables = ?variables.keys().collect::<Vec<_>>(), "sending GraphQL request");

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .header("User-Agent", USER_AGENT)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DiscussError::ApiError {
                status: response.status().as_u16(),
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<failed to read response body>".to_string()),
            });
        }

        let gql_response: GraphQLResponse = response.json().await?;

        if let Some(errors) = gql_response.errors.filter(|e| !e.is_empty()) {
            return Err(graphql_errors(errors));
        }

        gql_response.data.ok_or(DiscussError::EmptyResponse)
    }
}

/// One logical operation's view of the remote executor.
///
/// Every call checks the cancellation token before it is issued and races
/// it while in flight, so a cancelled operation never starts a later call.
pub struct Session<'a> {
    executor: &'a dyn GraphQLExecutor,
    cancel: CancellationToken,
}

impl<'a> Session<'a> {
    pub fn new(executor: &'a dyn GraphQLExecutor, cancel: CancellationToken) -> Self {
        Self { executor, cancel }
    }

    pub async fn query<T: DeserializeOwned>(
        &self,
        context: &'static str,
        query: &str,
        variables: Variables,
    ) -> Result<T> {
        let data = self.guard(self.executor.execute(query, variables)).await?;
        decode(context, data)
    }

    pub async fn mutate<T: DeserializeOwned>(
        &self,
        context: &'static str,
        mutation: &str,
        input: Variables,
    ) -> Result<T> {
        let data = self.guard(self.executor.mutate(mutation, input)).await?;
        decode(context, data)
    }

    async fn guard<F>(&self, call: F) -> Result<Value>
    where
        F: std::future::Future<Output = Result<Value>>,
    {
        if self.cancel.is_cancelled() {
            return Err(DiscussError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(DiscussError::Cancelled),
            result = call => result,
        }
    }
}

fn decode<T: DeserializeOwned>(context: &'static str, data: Value) -> Result<T> {
    serde_json::from_value(data).map_err(|source| DiscussError::MalformedResponse { context, source })
}
