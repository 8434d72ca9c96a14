use async_trait::async_trait;

use super::message::OutgoingEmail;

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Failed to build message: {0}")]
    Build(String),

    /// The relay refused the message because of its size.
    #[error("Message too large: {0}")]
    MessageTooLarge(String),

    #[error("SMTP transport error: {0}")]
    Transport(String),

    /// The message was too large and the attachment-free retry failed too.
    #[error("Email size too large and fallback also failed: {0}")]
    FallbackFailed(#[source] Box<MailError>),
}

/// Delivers one rendered message.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}
