//! Leading-byte heuristic for executable or script content.
//!
//! This is a cheap pre-filter, not a malware scanner: the extension denylist
//! and three signatures compared at offset zero only.

use liight_core::constants::SNIFF_PREFIX_LEN;

use crate::file::SubmissionFile;

const UNSAFE_MESSAGE: &str = "File contains potentially unsafe content.";
const SAFE_MESSAGE: &str = "File passed security check.";
pub(crate) const READ_ERROR_MESSAGE: &str = "Error checking file security";

const BLOCKED_EXTENSIONS: &[&str] = &[".exe", ".js", ".html", ".php"];

/// (label, leading bytes). Checked in order; first match wins.
const SIGNATURES: &[(&str, &[u8])] = &[
    ("pe-executable", &[0x4D, 0x5A]),
    ("elf-executable", &[0x7F, 0x45, 0x4C, 0x46]),
    ("script-tag", b"<script"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityCheckResult {
    pub is_safe: bool,
    pub message: String,
}

impl SecurityCheckResult {
    fn safe() -> Self {
        Self {
            is_safe: true,
            message: SAFE_MESSAGE.to_string(),
        }
    }

    fn unsafe_content() -> Self {
        Self {
            is_safe: false,
            message: UNSAFE_MESSAGE.to_string(),
        }
    }

    pub(crate) fn read_failure() -> Self {
        Self {
            is_safe: false,
            message: READ_ERROR_MESSAGE.to_string(),
        }
    }
}

fn has_blocked_extension(name: &str) -> bool {
    let lower = name.to_lowercase();
    BLOCKED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

fn matching_signature(prefix: &[u8]) -> Option<&'static str> {
    SIGNATURES
        .iter()
        .find(|(_, sig)| prefix.starts_with(sig))
        .map(|(label, _)| *label)
}

/// Inspect a file's name and leading bytes. Never returns an error: a failed
/// read is reported as unsafe.
pub async fn sniff(file: &SubmissionFile) -> SecurityCheckResult {
    if has_blocked_extension(file.name()) {
        tracing::debug!(file_name = %file.name(), "Rejected by extension denylist");
        return SecurityCheckResult::unsafe_content();
    }

    let prefix = match file.read_prefix(SNIFF_PREFIX_LEN).await {
        Ok(prefix) => prefix,
        Err(e) => {
            tracing::warn!(file_name = %file.name(), error = %e, "Failed to read file for security check");
            return SecurityCheckResult::read_failure();
        }
    };

    if let Some(signature) = matching_signature(&prefix) {
        tracing::debug!(file_name = %file.name(), signature, "Rejected by content signature");
        return SecurityCheckResult::unsafe_content();
    }

    SecurityCheckResult::safe()
}
