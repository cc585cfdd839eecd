use thiserror::Error;

#[derive(Error, Debug)]
pub enum HopefulError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Preferences error: {0}")]
    Preferences(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl HopefulError {
    /// Text for the retryable error banner.
    pub fn user_message(&self) -> String {
        match self {
            HopefulError::Http(e) if e.is_timeout() => {
                "The news server took too long to answer. Try again.".to_string()
            }
            HopefulError::Http(_) | HopefulError::Io(_) => {
                "Couldn't reach the news server. Check your connection and try again.".to_string()
            }
            HopefulError::Status { status, .. } => {
                format!("The news server returned an error ({}). Try again.", status)
            }
            HopefulError::Decode(_) => {
                "The news server sent something unexpected. Try again.".to_string()
            }
            other => format!("Failed to load articles: {}", other),
        }
    }
}

pub type Result<T> = std::result::Result<T, HopefulError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_mentions_code() {
        let err = HopefulError::Status {
            status: 503,
            url: "http://localhost:8000/articles".into(),
        };
        assert!(err.user_message().contains("503"));
        assert_eq!(
            err.to_string(),
            "Server returned 503 for http://localhost:8000/articles"
        );
    }

    #[test]
    fn test_other_message_includes_detail() {
        let err = HopefulError::Other("boom".into());
        assert_eq!(err.user_message(), "Failed to load articles: boom");
    }
}
