use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("Local attempt store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Remote scoring service unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Unauthorized - no authenticated session")]
    Unauthorized,
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl HistoryError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        match status.as_u16() {
            401 | 403 => HistoryError::Unauthorized,
            _ => HistoryError::RemoteUnavailable(format!(
                "Status {}: {}",
                status,
                Self::truncate_body(body)
            )),
        }
    }
}

impl From<reqwest::Error> for HistoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            HistoryError::MalformedResponse(err.to_string())
        } else {
            HistoryError::RemoteUnavailable(err.to_string())
        }
    }
}
