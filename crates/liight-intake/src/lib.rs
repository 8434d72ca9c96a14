//! Liight Intake Library
//!
//! The project-file intake pipeline that runs before anything reaches the
//! server: format/size validation, content sniffing, preview generation and the
//! orchestrator that sequences them over a single file slot. Also hosts the
//! inquiry form gating, the donation wizard and the HTTP client that submits
//! both to the studio API.

pub mod client;
pub mod donation;
pub mod file;
pub mod inquiry;
pub mod orchestrator;
pub mod preview;
pub mod sniffer;
pub mod validator;

// Re-export commonly used types
pub use client::{ClientError, StudioClient};
pub use donation::{DonationError, DonationOutcome, DonationSubmitter, DonationWizard};
pub use file::{FileContent, MemoryContent, PathContent, SubmissionFile};
pub use inquiry::{email_feedback, InquiryForm, InquiryPayload, InquirySubmitter, SubmitError};
pub use orchestrator::{
    IntakeOrchestrator, IntakeOutcome, IntakeSnapshot, IntakeState, RejectionKind,
    SecurityCheckStatus,
};
pub use preview::{build_preview, PreviewError};
pub use sniffer::{sniff, SecurityCheckResult};
pub use validator::{validate, validate_email, ValidationError, ValidationResult};
