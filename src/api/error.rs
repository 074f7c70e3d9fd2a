use http::StatusCode;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Request could not be sent or its response not read.
    #[error("error in communication with powerfox API: {0}")]
    Transport(String),
    /// Non-2xx status. The body is kept verbatim and never parsed.
    #[error("powerfox API responded {status}: {body}")]
    Http { status: StatusCode, body: String },
    /// Body of a successful response is not JSON: (body, reason).
    #[error("invalid JSON in API response ({1}): {0}")]
    InvalidResponse(String, String),
    #[error("missing field `{field}` in {entity}")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },
    #[error("field `{field}` in {entity} is not {expected}")]
    InvalidField {
        entity: &'static str,
        field: &'static str,
        expected: &'static str,
    },
    #[error("expected {expected} for {entity}")]
    UnexpectedApiResponse {
        entity: &'static str,
        expected: &'static str,
    },
    /// Base URL given to `api()` is unusable: (url, reason).
    #[error("invalid API URL `{0}`: {1}")]
    InvalidApiUrl(String, String),
    #[error("internal error: {0}")]
    InternalError(String),
}

impl Error {
    /// Server unreachable or request rejected.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Http { .. })
    }

    /// Server answered, but the payload does not match the model.
    pub fn is_mapping(&self) -> bool {
        matches!(
            self,
            Error::InvalidResponse(..)
                | Error::MissingField { .. }
                | Error::InvalidField { .. }
                | Error::UnexpectedApiResponse { .. }
        )
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Error::Transport(error.to_string())
    }
}
