use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification used for exit codes and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    RemoteFailure,
    EncodingFailure,
    Cancelled,
    Config,
}

#[derive(Error, Debug)]
pub enum DiscussError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("{}", messages.join(", "))]
    GraphQL { messages: Vec<String> },

    #[error("{}", messages.join(", "))]
    NotFound { messages: Vec<String> },

    #[error("Empty response from API")]
    EmptyResponse,

    #[error("Unexpected response shape for {context}: {source}")]
    MalformedResponse {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid {field} in response: {value}")]
    InvalidField { field: &'static str, value: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Repository not found: {owner}/{repo}")]
    RepositoryNotFound { owner: String, repo: String },

    #[error("Discussion #{number} not found in {owner}/{repo}")]
    DiscussionNotFound {
        owner: String,
        repo: String,
        number: u64,
    },

    #[error(
        "Discussion category {0:?} not found; use `gh-discuss categories` to see available categories"
    )]
    CategoryNotFound(String),

    #[error("Failed to encode output: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to encode config: {0}")]
    ConfigEncode(#[source] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error(
        "No GitHub token found. Set GITHUB_TOKEN or add token to ~/.config/gh-discuss/config.toml"
    )]
    MissingToken,

    #[error("Owner not specified and no default_owner in config")]
    NoOwner,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl DiscussError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Http(_)
            | Self::ApiError { .. }
            | Self::GraphQL { .. }
            | Self::EmptyResponse
            | Self::MalformedResponse { .. }
            | Self::InvalidField { .. } => ErrorKind::RemoteFailure,
            Self::InvalidArgument(_) | Self::NoOwner => ErrorKind::InvalidArgument,
            Self::RepositoryNotFound { .. }
            | Self::DiscussionNotFound { .. }
            | Self::CategoryNotFound(_)
            | Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Encoding(_) | Self::ConfigEncode(_) | Self::Io(_) => ErrorKind::EncodingFailure,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::ConfigRead { .. }
            | Self::ConfigParse { .. }
            | Self::NoConfigDir
            | Self::MissingToken
            | Self::InvalidUrl(_) => ErrorKind::Config,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::InvalidArgument => 2,
            ErrorKind::NotFound => 3,
            ErrorKind::RemoteFailure => 4,
            ErrorKind::EncodingFailure => 5,
            ErrorKind::Cancelled => 130,
            ErrorKind::Config => 78,
        }
    }
}

pub type Result<T> = std::result::Result<T, DiscussError>;
