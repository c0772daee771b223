use thiserror::Error;

/// Failure of a single poll cycle. Never fatal: the loop logs it and sleeps.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("weather API returned status {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },

    #[error("{0}")]
    Parse(String),
}

impl PollError {
    pub fn category(&self) -> &'static str {
        match self {
            PollError::Transport(_) | PollError::Status { .. } => "Network/API error",
            PollError::Parse(_) => "Parse error",
        }
    }
}

impl From<serde_json::Error> for PollError {
    fn from(err: serde_json::Error) -> Self {
        PollError::Parse(format!("invalid JSON body: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_group_transport_and_status() {
        let status = PollError::Status {
            status: reqwest::StatusCode::BAD_GATEWAY,
            body: "oops".into(),
        };
        assert_eq!(status.category(), "Network/API error");
        assert!(status.to_string().contains("502"));

        let parse = PollError::Parse("bad".into());
        assert_eq!(parse.category(), "Parse error");
    }

    #[test]
    fn json_errors_become_parse_errors() {
        let err: PollError = serde_json::from_str::<serde_json::Value>("not json").unwrap_err().into();
        assert_eq!(err.category(), "Parse error");
        assert!(err.to_string().starts_with("invalid JSON body"));
    }
}
