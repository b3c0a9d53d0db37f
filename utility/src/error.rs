use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    ///a required identifier was missing or an argument was malformed
    #[error("{0}")]
    Validation(String),
    ///the local input does not satisfy what the operation needs
    #[error("{0}")]
    Precondition(String),
    ///the dashboard answered with a non success status
    #[error("Server returned unexpected status code {status} and body {body}")]
    Status { status: u16, body: String },
    ///the dashboard reported the function in error state while deploying
    #[error("function creation failed: {0}")]
    CreationFailed(String),
    #[error("function {name} did not become ready after {attempts} attempts")]
    Timeout { name: String, attempts: usize },
    #[error("{0}")]
    Custom(String),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("{0}")]
    Parse(#[from] url::ParseError),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, crate::Error>;
