use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("missing url param")]
    MissingUrl,
    #[error("invalid url")]
    InvalidUrl,
    #[error("{0}")]
    RequestBuild(String),
    #[error("{0}")]
    InvalidTarget(String),
    #[error("{0}")]
    Network(String),
    #[error("{0}")]
    Parse(String),
}

impl ScrapeError {
    pub fn status(&self) -> StatusCode {
        match self {
            ScrapeError::MissingUrl | ScrapeError::InvalidUrl => StatusCode::BAD_REQUEST,
            ScrapeError::RequestBuild(_) | ScrapeError::Parse(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ScrapeError::InvalidTarget(_) | ScrapeError::Network(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ScrapeError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_input_errors_are_bad_requests() {
        assert_eq!(ScrapeError::MissingUrl.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ScrapeError::InvalidUrl.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ScrapeError::MissingUrl.to_string(), "missing url param");
        assert_eq!(ScrapeError::InvalidUrl.to_string(), "invalid url");
    }

    #[test]
    fn upstream_failures_are_bad_gateway() {
        let err = ScrapeError::Network("connection refused".into());
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.to_string(), "connection refused");
        assert_eq!(
            ScrapeError::InvalidTarget("x".into()).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn internal_failures_are_server_errors() {
        assert_eq!(
            ScrapeError::RequestBuild("bad".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ScrapeError::Parse("truncated body".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
