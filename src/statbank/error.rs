use thiserror::Error;

/// Errors surfaced by the adapter.
///
/// Upstream 4xx/5xx responses keep their status and body; nothing is
/// retried or reinterpreted on the way through.
#[derive(Debug, Error)]
pub enum StatbankError {
    /// Malformed query/path/body, caught before forwarding.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Upstream rejected the request (4xx), e.g. unknown table or invalid
    /// variable code.
    #[error("upstream rejected request with status {status}")]
    UpstreamClient {
        status: u16,
        content_type: Option<String>,
        body: String,
    },

    /// Upstream failed (5xx).
    #[error("upstream failed with status {status}")]
    UpstreamServer {
        status: u16,
        content_type: Option<String>,
        body: String,
    },

    /// Could not reach upstream at all.
    #[error("failed to reach upstream: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered 2xx but the body was not the JSON it promised.
    #[error("failed to decode upstream response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl StatbankError {
    /// The HTTP status to surface to the caller. Upstream codes pass
    /// through unchanged; local failures map per the adapter contract.
    pub fn status_code(&self) -> u16 {
        match self {
            StatbankError::InvalidParameter(_) => 400,
            StatbankError::UpstreamClient { status, .. } => *status,
            StatbankError::UpstreamServer { status, .. } => *status,
            StatbankError::Transport(_) => 500,
            StatbankError::Decode(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_maps_to_400() {
        let err = StatbankError::InvalidParameter("pastdays must be non-negative".into());
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn upstream_statuses_pass_through() {
        let not_found = StatbankError::UpstreamClient {
            status: 404,
            content_type: None,
            body: "no such table".into(),
        };
        assert_eq!(not_found.status_code(), 404);

        let bad_request = StatbankError::UpstreamClient {
            status: 400,
            content_type: None,
            body: "invalid variable code".into(),
        };
        assert_eq!(bad_request.status_code(), 400);

        let unavailable = StatbankError::UpstreamServer {
            status: 503,
            content_type: None,
            body: "maintenance".into(),
        };
        assert_eq!(unavailable.status_code(), 503);
    }
}
