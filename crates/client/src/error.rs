use reqwest::StatusCode;
use serde::Deserialize;

/// Errors from [`ApiClient`](crate::api::ApiClient) calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        /// The server's `message`, or the raw body when it was not JSON.
        message: String,
    },
}

impl ClientError {
    /// Build an [`ClientError::Api`] from a failed response's status and body.
    pub fn from_body(status: StatusCode, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            message: String,
        }

        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.message)
            .unwrap_or_else(|_| body.trim().to_string());

        ClientError::Api {
            status: status.as_u16(),
            message,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Request(e) => e.status().map(|s| s.as_u16()),
        }
    }

    /// True for a 401 from the server, meaning the session has to be
    /// re-established.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED.as_u16())
    }
}
