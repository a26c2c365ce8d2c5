use charades_core::SessionError;
use charades_types::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Incorrect game code or password")]
    Auth,
    #[error("Game {game_code} not found")]
    NotFound { game_code: String },
    #[error("Failed to save results: {0}")]
    Submission(String),
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected response: {0}")]
    Decode(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ClientError {
    /// Short message suitable for an inline notice or toast.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Auth => "Incorrect game code or password.".to_string(),
            ClientError::NotFound { .. } => "This game could not be found.".to_string(),
            ClientError::Submission(_) => {
                "Saving results failed. Your turns are kept; try saving again.".to_string()
            }
            ClientError::Server { message, .. } if !message.is_empty() => message.clone(),
            ClientError::Server { .. } | ClientError::Transport(_) | ClientError::Decode(_) => {
                "Something went wrong while talking to the server.".to_string()
            }
            ClientError::Config(err) => format!("This game is misconfigured: {}.", err),
            ClientError::Session(SessionError::PassLimitExceeded { .. }) => {
                "No passes left this turn.".to_string()
            }
            ClientError::Session(err) => {
                let mut message = err.to_string();
                if let Some(first) = message.get_mut(0..1) {
                    first.make_ascii_uppercase();
                }
                message.push('.');
                message
            }
        }
    }

    /// Whether the user can recover by re-entering credentials.
    pub fn is_auth(&self) -> bool {
        matches!(self, ClientError::Auth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(ClientError::Auth.user_message(), "Incorrect game code or password.");
        assert_eq!(
            ClientError::Session(SessionError::PassLimitExceeded { limit: 2 }).user_message(),
            "No passes left this turn."
        );
        assert_eq!(
            ClientError::Session(SessionError::AlreadySaved).user_message(),
            "Results have already been saved."
        );
        assert_eq!(
            ClientError::Server {
                status: 409,
                message: "Game already finalized".to_string()
            }
            .user_message(),
            "Game already finalized"
        );
        assert!(ClientError::Submission("timeout".to_string())
            .user_message()
            .contains("try saving again"));
    }

    #[test]
    fn test_auth_is_recoverable() {
        assert!(ClientError::Auth.is_auth());
        assert!(!ClientError::NotFound {
            game_code: "XK3P".to_string()
        }
        .is_auth());
    }
}
