use std::fmt::{Display, Formatter};
use std::time::Duration;
use thiserror::Error;

/// The three collections the client reads from the control plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Service,
    Function,
    Ingress,
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResourceKind::Service => "service",
            ResourceKind::Function => "function",
            ResourceKind::Ingress => "ingress",
        };
        write!(f, "{}", name)
    }
}

#[derive(Error, Debug)]
pub enum Error {
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
    #[error("Unable to update the function {name}. Received:\n  Code: {code}\n  Message: {message}")]
    Submission {
        name: String,
        code: u16,
        message: String,
    },
    #[error("function {name} was not ready after {timeout:?}")]
    Timeout { name: String, timeout: Duration },
    #[error("no {kind} found for function {name}")]
    NotFound { kind: ResourceKind, name: String },
    #[error("unable to read {kind} after {attempts} attempt(s): {reason}")]
    Fetch {
        kind: ResourceKind,
        attempts: usize,
        reason: String,
    },
    #[error("ingress {ingress} of function {name} has no {field}")]
    MalformedRoutingRecord {
        name: String,
        ingress: String,
        field: &'static str,
    },
    #[error("Server returned unexpected status code {code} and body {message}")]
    Status { code: u16, message: String },
    #[error("stopped waiting for function {name}")]
    Cancelled { name: String },
}

impl Error {
    /// returns true for failures worth another attempt: connection problems and 5xx answers
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Reqwest(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            Error::Status { code, .. } => *code >= 500,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, crate::Error>;
