use reqwest::StatusCode;

/// Failures crossing the network boundary.
///
/// Every call site catches these and turns them into renderable UI error
/// state or a blocking alert; nothing escapes as a process-level failure.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found")]
    NotFound,
    #[error("unauthorized")]
    Unauthorized,
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server error ({status}): {}", detail.as_deref().unwrap_or("no detail"))]
    Server {
        status: StatusCode,
        detail: Option<String>,
    },
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ApiError {
    /// Map a non-success HTTP status to the error taxonomy. `detail` is
    /// the backend's `{"detail": …}` message when one was present.
    pub fn from_status(status: StatusCode, detail: Option<String>) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::NOT_FOUND => ApiError::NotFound,
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::Validation(detail.unwrap_or_else(|| "invalid request".to_string()))
            }
            status => ApiError::Server { status, detail },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(StatusCode::NOT_FOUND, "not found")]
    #[case(StatusCode::UNAUTHORIZED, "unauthorized")]
    #[case(StatusCode::BAD_REQUEST, "validation failed: invalid request")]
    #[case(StatusCode::BAD_GATEWAY, "server error (502 Bad Gateway): no detail")]
    #[case(StatusCode::INTERNAL_SERVER_ERROR, "server error (500 Internal Server Error): no detail")]
    fn status_codes_map_to_the_taxonomy(#[case] status: StatusCode, #[case] display: &str) {
        assert_eq!(ApiError::from_status(status, None).to_string(), display);
    }

    #[rstest]
    #[case(StatusCode::BAD_REQUEST)]
    #[case(StatusCode::UNPROCESSABLE_ENTITY)]
    fn validation_statuses_carry_the_backend_detail(#[case] status: StatusCode) {
        match ApiError::from_status(status, Some("missing title".to_string())) {
            ApiError::Validation(detail) => assert_eq!(detail, "missing title"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
