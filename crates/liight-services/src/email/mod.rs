//! Email building and delivery.

pub mod mailer;
pub mod message;
pub mod smtp;
pub mod template;
pub mod templates;

pub use mailer::{MailError, Mailer};
pub use message::{MailAttachment, OutgoingEmail, MAX_EMAIL_SIZE_BYTES};
pub use smtp::SmtpMailer;
pub use template::{fill_template, TemplateData};
