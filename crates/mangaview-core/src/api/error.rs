use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network unavailable: {0}")]
    Unavailable(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl FetchError {
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

    pub fn from_status(url: &str, status: u16, body: &str) -> Self {
        FetchError::Status {
            url: url.to_string(),
            status,
            body: Self::truncate_body(body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_keeps_short_body() {
        let err = FetchError::from_status("https://example.com/a.json", 404, "missing");
        assert_eq!(
            err.to_string(),
            "Request to https://example.com/a.json failed with status 404: missing"
        );
    }

    #[test]
    fn test_from_status_truncates_long_body() {
        let body = "x".repeat(800);
        match FetchError::from_status("u", 500, &body) {
            FetchError::Status { body, .. } => {
                assert!(body.starts_with(&"x".repeat(500)));
                assert!(body.ends_with("(truncated, 800 total bytes)"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        // 3-byte characters straddle the 500 byte cut
        let body = "漫".repeat(200);
        let truncated = FetchError::truncate_body(&body);
        assert!(truncated.contains("(truncated, 600 total bytes)"));
    }
}
