//! Liight Services Library
//!
//! Outbound notifications: HTML template filling, the `Mailer` abstraction
//! with its SMTP implementation, and the dispatcher that turns inquiries and
//! donations into admin and submitter emails.

pub mod email;
pub mod notifications;

// Re-export commonly used types
pub use email::{
    fill_template, MailAttachment, MailError, Mailer, OutgoingEmail, SmtpMailer, TemplateData,
};
pub use notifications::{
    format_receipt_date, generate_transaction_id, InquiryNotice, InquirySource,
    NotificationDispatcher, StoredFile,
};
