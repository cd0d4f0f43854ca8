use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("could not connect to Postgres after {attempts} attempts: {source}")]
    Connect {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },

    #[error("database query failed: {0}")]
    Query(#[from] sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Connect { .. } => {
                tracing::error!(error = %self, "Database unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, "Database unavailable\n")
            }
            AppError::Query(_) => {
                tracing::error!(error = %self, "Database write failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error\n")
            }
        };

        (status, message).into_response()
    }
}
