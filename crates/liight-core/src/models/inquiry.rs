use serde::{Deserialize, Serialize};

/// Public reference to a stored upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFileInfo {
    pub original_name: String,
    pub url: String,
}

/// Response of the multipart inquiry endpoint. `file` is serialized as `null`
/// when the submission carried no file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InquiryResponse {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub file: Option<UploadedFileInfo>,
}

/// Generic `{ success, message, error? }` body used by every other endpoint
/// and by all error responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiMessage {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error,
        }
    }
}

/// JSON variant of the inquiry submission, carrying the PDF as a data URL.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryJsonRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub organization_type: Option<String>,
    pub project_details: Option<String>,
    pub pdf_url: Option<String>,
    pub pdf_file_name: Option<String>,
}
