//! Route paths and request limits.

pub const INQUIRY_UPLOAD_PATH: &str = "/api/project-inquiry-with-pdf";
pub const INQUIRY_JSON_PATH: &str = "/api/send-project-inquiry";
pub const DONATION_PATH: &str = "/api/send-donation";
pub const HEALTH_PATH: &str = "/health";
pub const CONNECTIVITY_PATH: &str = "/api/test";

/// Whole-request body cap, above the 30 MiB file limit so the other form
/// fields and base64 encoding of a data URL still fit.
pub const MAX_REQUEST_BODY_BYTES: usize = 40 * 1024 * 1024;
