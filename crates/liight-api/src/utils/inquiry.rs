//! Inquiry fields shared by the multipart and JSON endpoints.

use bytes::Bytes;
use liight_core::models::InquiryJsonRequest;
use liight_core::validation::{is_blank, is_valid_email};
use liight_core::AppError;
use liight_services::{InquiryNotice, InquirySource, StoredFile};
use liight_storage::StagedUpload;

use crate::error::storage_app_error;

pub const MISSING_FIELDS_MESSAGE: &str = "Name and email are required";
pub const INVALID_EMAIL_MESSAGE: &str = "Please provide a valid email address";

#[derive(Debug, Default, Clone)]
pub struct InquiryFields {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub organization_type: Option<String>,
    pub project_details: Option<String>,
}

impl InquiryFields {
    /// Record a text field by its form name. Unknown names are ignored.
    pub fn set(&mut self, name: &str, value: String) {
        let slot = match name {
            "fullName" => &mut self.full_name,
            "email" => &mut self.email,
            "organizationType" => &mut self.organization_type,
            "projectDetails" => &mut self.project_details,
            _ => return,
        };
        *slot = Some(value);
    }

    /// Required fields present and the email address well-formed.
    pub fn check(&self) -> Result<(), AppError> {
        if is_blank(self.full_name.as_deref()) || is_blank(self.email.as_deref()) {
            return Err(AppError::InvalidInput(MISSING_FIELDS_MESSAGE.to_string()));
        }
        let email = self.email.as_deref().unwrap_or_default().trim();
        if !is_valid_email(email) {
            return Err(AppError::InvalidInput(INVALID_EMAIL_MESSAGE.to_string()));
        }
        Ok(())
    }

    /// Build the notification. Call only after [`InquiryFields::check`] passed.
    pub fn into_notice(self, source: InquirySource, file: Option<StoredFile>) -> InquiryNotice {
        InquiryNotice {
            source,
            full_name: self.full_name.unwrap_or_default().trim().to_string(),
            email: self.email.unwrap_or_default().trim().to_string(),
            organization_type: self.organization_type,
            project_details: self.project_details,
            file,
        }
    }
}

impl From<&InquiryJsonRequest> for InquiryFields {
    fn from(request: &InquiryJsonRequest) -> Self {
        Self {
            full_name: request.full_name.clone(),
            email: request.email.clone(),
            organization_type: request.organization_type.clone(),
            project_details: request.project_details.clone(),
        }
    }
}

/// Describe a staged upload for the notification, reading its bytes back.
pub async fn stored_file(staged: &StagedUpload) -> Result<StoredFile, AppError> {
    let content = staged.read().await.map_err(storage_app_error)?;
    Ok(StoredFile {
        original_name: staged.original_name().to_string(),
        url: staged.public_url(),
        content: Bytes::from(content),
    })
}

/// Delete a staged upload on a failure path. Deletion errors are logged by
/// the storage layer and do not replace the original failure.
pub async fn discard(staged: Option<StagedUpload>) {
    if let Some(staged) = staged {
        let _ = staged.discard().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: Option<&str>, email: Option<&str>) -> InquiryFields {
        InquiryFields {
            full_name: name.map(String::from),
            email: email.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_required_fields() {
        for f in [
            fields(None, Some("ada@example.com")),
            fields(Some("Ada"), None),
            fields(Some("   "), Some("ada@example.com")),
        ] {
            let err = f.check().unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(ref m) if m == MISSING_FIELDS_MESSAGE));
        }
    }

    #[test]
    fn test_invalid_email_rejected() {
        let err = fields(Some("Ada"), Some("not-an-email")).check().unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref m) if m == INVALID_EMAIL_MESSAGE));
    }

    #[test]
    fn test_set_ignores_unknown_fields() {
        let mut f = InquiryFields::default();
        f.set("fullName", "Ada".to_string());
        f.set("email", "ada@example.com".to_string());
        f.set("favoriteColor", "teal".to_string());
        assert!(f.check().is_ok());

        let notice = f.into_notice(InquirySource::Upload, None);
        assert_eq!(notice.full_name, "Ada");
        assert!(notice.organization_type.is_none());
    }
}
