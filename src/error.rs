use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReminderError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{endpoint} returned {status}: {body}")]
    Retrieval {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("issue search did not finish within {pages} pages")]
    PageLimit { pages: usize },

    #[error("webhook delivery failed with {status}: {body}")]
    Dispatch { status: u16, body: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ReminderError>;

impl ReminderError {
    /// Build a `Retrieval` error from a non-success response, consuming its body.
    pub async fn from_response(endpoint: &str, resp: reqwest::Response) -> Self {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        ReminderError::Retrieval {
            endpoint: endpoint.to_string(),
            status,
            body,
        }
    }
}
