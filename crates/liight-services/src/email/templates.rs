//! Email bodies and subjects.

pub const PROJECT_INQUIRY_TEMPLATE: &str = include_str!("../../templates/project_inquiry.html");
pub const THANK_YOU_TEMPLATE: &str = include_str!("../../templates/thank_you.html");
pub const DONATION_TEMPLATE: &str = include_str!("../../templates/donation.html");
pub const DONATION_RECEIPT_TEMPLATE: &str = include_str!("../../templates/donation_receipt.html");

pub const INQUIRY_WITH_PDF_SUBJECT: &str = "New Project Inquiry with PDF - LIIGHT DESIGN";
pub const INQUIRY_SUBJECT: &str = "New Project Inquiry - LIIGHT DESIGN";
pub const THANK_YOU_SUBJECT: &str = "Thank You for Your Project Inquiry - LIIGHT DESIGN";
pub const DONATION_RECEIPT_SUBJECT: &str = "Thank You for Your Donation - LIIGHT DESIGN";

pub fn donation_subject(formatted_amount: &str) -> String {
    format!("New {} Donation Received - LIIGHT DESIGN", formatted_amount)
}
