//! Project inquiry form gating.
//!
//! Field checks run in a fixed order and all of them happen before the file
//! body is read or anything is sent.

use async_trait::async_trait;
use bytes::Bytes;
use liight_core::models::InquiryResponse;

use crate::client::ClientError;
use crate::orchestrator::IntakeOrchestrator;
use crate::validator::validate_email;

/// Sends a completed inquiry somewhere. Implemented by [`crate::StudioClient`].
#[async_trait]
pub trait InquirySubmitter: Send + Sync {
    async fn submit_inquiry(&self, payload: InquiryPayload) -> Result<InquiryResponse, ClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Please enter your name")]
    MissingName,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please upload your project file")]
    MissingFile,

    #[error("Failed to read project file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("There was an error submitting your inquiry. Please try again later.")]
    Request(#[from] ClientError),
}

/// Everything one submission sends. Owned by a single in-flight request.
#[derive(Clone)]
pub struct InquiryPayload {
    pub full_name: String,
    pub email: String,
    pub organization_type: Option<String>,
    pub project_details: String,
    pub file_name: String,
    pub file_type: String,
    pub file_bytes: Bytes,
}

impl std::fmt::Debug for InquiryPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InquiryPayload")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("organization_type", &self.organization_type)
            .field("project_details", &self.project_details)
            .field("file_name", &self.file_name)
            .field("file_type", &self.file_type)
            .field("file_len", &self.file_bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InquiryForm {
    pub full_name: String,
    pub email: String,
    pub organization_type: String,
}

/// Live feedback for the email field while the user types.
pub fn email_feedback(email: &str) -> Option<&'static str> {
    if email.trim().is_empty() {
        Some("Email is required")
    } else if !validate_email(email) {
        Some("Please enter a valid email address")
    } else {
        None
    }
}

pub const SUCCESS_MESSAGE: &str = "Thank you for your inquiry! We've sent you a confirmation email and will get back to you soon with exciting possibilities for your project.";

impl InquiryForm {
    /// Check the text fields in order: name, then email.
    pub fn check_fields(&self) -> Result<(), SubmitError> {
        if self.full_name.trim().is_empty() {
            return Err(SubmitError::MissingName);
        }
        if self.email.trim().is_empty() || !validate_email(&self.email) {
            return Err(SubmitError::InvalidEmail);
        }
        Ok(())
    }

    /// Gate, build and send the inquiry. On success the form and the intake
    /// slot are cleared.
    pub async fn submit(
        &mut self,
        intake: &IntakeOrchestrator,
        submitter: &dyn InquirySubmitter,
    ) -> Result<InquiryResponse, SubmitError> {
        self.check_fields()?;
        let file = intake.accepted_file().await.ok_or(SubmitError::MissingFile)?;

        let file_bytes = Bytes::from(file.read_all().await?);
        let organization_type = match self.organization_type.trim() {
            "" => None,
            value => Some(value.to_string()),
        };
        let payload = InquiryPayload {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            organization_type,
            project_details: format!("Project file: {}", file.name()),
            file_name: file.name().to_string(),
            file_type: file.mime_type().to_string(),
            file_bytes,
        };

        let response = submitter.submit_inquiry(payload).await.map_err(|e| {
            tracing::error!(error = %e, "Project inquiry submission failed");
            SubmitError::from(e)
        })?;

        *self = InquiryForm::default();
        intake.reset().await;
        Ok(response)
    }
}
