use join_domain::error::DomainError;

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("domain: {0}")]
    Domain(#[from] DomainError),

    #[error("validation: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("http {status}: {body}")]
    Http { status: u16, body: String },

    #[error("transport: {0}")]
    Transport(String),

    #[error("config: {0}")]
    Config(String),

    #[error("route not found: {0}")]
    RouteNotFound(String),

    #[error("module load failed: route={route}, reason={reason}")]
    ModuleLoad { route: &'static str, reason: String },
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => AppError::Http {
                status: status.as_u16(),
                body: err.to_string(),
            },
            None => AppError::Transport(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Domain(DomainError::from(err))
    }
}
