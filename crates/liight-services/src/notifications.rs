//! Notification Dispatcher
//!
//! Renders inquiry and donation notifications and hands them to a [`Mailer`].
//! Messages for one request go out sequentially, admin first; the first
//! failure aborts the rest and is returned to the caller.

use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, TimeZone};
use liight_core::constants::PDF_MIME_TYPE;
use liight_core::models::{format_amount, DonationRequest};

use crate::email::templates::{
    donation_subject, DONATION_RECEIPT_SUBJECT, DONATION_RECEIPT_TEMPLATE, DONATION_TEMPLATE,
    INQUIRY_SUBJECT, INQUIRY_WITH_PDF_SUBJECT, PROJECT_INQUIRY_TEMPLATE, THANK_YOU_SUBJECT,
    THANK_YOU_TEMPLATE,
};
use crate::email::{
    fill_template, MailAttachment, MailError, Mailer, OutgoingEmail, TemplateData,
    MAX_EMAIL_SIZE_BYTES,
};

/// Which endpoint the inquiry came through; only the admin subject differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InquirySource {
    Upload,
    DataUrl,
}

impl InquirySource {
    fn admin_subject(&self) -> &'static str {
        match self {
            InquirySource::Upload => INQUIRY_WITH_PDF_SUBJECT,
            InquirySource::DataUrl => INQUIRY_SUBJECT,
        }
    }
}

/// A stored project file to link and attach.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub original_name: String,
    pub url: String,
    pub content: Bytes,
}

#[derive(Debug, Clone)]
pub struct InquiryNotice {
    pub source: InquirySource,
    pub full_name: String,
    pub email: String,
    pub organization_type: Option<String>,
    pub project_details: Option<String>,
    pub file: Option<StoredFile>,
}

impl InquiryNotice {
    fn file_name(&self) -> String {
        match &self.file {
            Some(file) => file.original_name.clone(),
            None => "No file attached".to_string(),
        }
    }

    fn admin_email(&self, admin: &str) -> OutgoingEmail {
        let mut data = TemplateData::new();
        data.insert("from_name", self.full_name.clone());
        data.insert("from_email", self.email.clone());
        data.insert(
            "organization_type",
            non_empty(self.organization_type.as_deref()).unwrap_or("Not specified").to_string(),
        );
        data.insert(
            "project_details",
            non_empty(self.project_details.as_deref())
                .unwrap_or("No details provided")
                .to_string(),
        );
        data.insert("project_file_name", self.file_name());
        data.insert(
            "project_file_url",
            self.file.as_ref().map(|f| f.url.clone()).unwrap_or_else(|| "#".to_string()),
        );

        let html = fill_template(PROJECT_INQUIRY_TEMPLATE, &data);
        let mut email =
            OutgoingEmail::new(admin, self.source.admin_subject(), html).reply_to(self.email.clone());
        if let Some(file) = &self.file {
            email = email.attach(MailAttachment {
                filename: file.original_name.clone(),
                content_type: PDF_MIME_TYPE.to_string(),
                content: file.content.clone(),
            });
        }
        email
    }

    fn thank_you_email(&self) -> OutgoingEmail {
        let mut data = TemplateData::new();
        data.insert("name", self.full_name.clone());
        data.insert("project_file_name", self.file_name());
        OutgoingEmail::new(
            self.email.clone(),
            THANK_YOU_SUBJECT,
            fill_template(THANK_YOU_TEMPLATE, &data),
        )
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// `TXN-<unix millis>-<0..999>`
pub fn generate_transaction_id() -> String {
    let suffix: u16 = rand::random_range(0..1000);
    format!("TXN-{}-{}", chrono::Utc::now().timestamp_millis(), suffix)
}

/// Long US date, e.g. `March 5, 2025`.
pub fn format_receipt_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%B %-d, %Y").to_string()
}

fn donation_admin_email(request: &DonationRequest, admin: &str) -> OutgoingEmail {
    let amount = format_amount(request.amount.unwrap_or(0.0));
    let donor = request.donor_info.clone().unwrap_or_default();

    let mut data = TemplateData::new();
    data.insert("donation_amount", amount.clone());
    data.insert(
        "from_name",
        non_empty(donor.name.as_deref()).unwrap_or("Anonymous").to_string(),
    );
    data.insert(
        "from_email",
        non_empty(donor.email.as_deref()).unwrap_or("Not provided").to_string(),
    );
    data.insert(
        "message",
        non_empty(donor.message.as_deref()).unwrap_or("No message").to_string(),
    );
    let (billing_name, billing_address) = match &request.billing_info {
        Some(billing) => (billing.full_name(), billing.full_address()),
        None => ("Not provided".to_string(), "Not provided".to_string()),
    };
    data.insert("billing_name", billing_name);
    data.insert("billing_address", billing_address);
    data.insert("payment_method", request.payment_method.label().to_string());
    data.insert("payment_details", request.payment_details());
    data.insert("donation_frequency", request.frequency.label().to_string());
    data.insert(
        "discount_eligible",
        request.is_discount_eligible().to_string(),
    );

    OutgoingEmail::new(admin, donation_subject(&amount), fill_template(DONATION_TEMPLATE, &data))
}

fn donation_receipt_email(request: &DonationRequest, to: &str) -> OutgoingEmail {
    let donor = request.donor_info.clone().unwrap_or_default();

    let mut data = TemplateData::new();
    data.insert(
        "name",
        non_empty(donor.name.as_deref()).unwrap_or("Valued Donor").to_string(),
    );
    data.insert("donation_amount", format_amount(request.amount.unwrap_or(0.0)));
    data.insert("transaction_id", generate_transaction_id());
    data.insert("date", format_receipt_date(&chrono::Local::now()));
    data.insert("last_four", request.receipt_last_four());
    data.insert("payment_method", request.payment_method.label().to_string());
    data.insert("donation_frequency", request.frequency.label().to_string());

    OutgoingEmail::new(
        to,
        DONATION_RECEIPT_SUBJECT,
        fill_template(DONATION_RECEIPT_TEMPLATE, &data),
    )
}

pub struct NotificationDispatcher {
    mailer: Arc<dyn Mailer>,
    admin_email: String,
}

impl NotificationDispatcher {
    pub fn new(mailer: Arc<dyn Mailer>, admin_email: impl Into<String>) -> Self {
        Self {
            mailer,
            admin_email: admin_email.into(),
        }
    }

    pub fn admin_email(&self) -> &str {
        &self.admin_email
    }

    /// Send one message, dropping attachments when it is too large for the relay.
    pub async fn deliver(&self, email: OutgoingEmail) -> Result<(), MailError> {
        if email.attachments.is_empty() {
            return self.mailer.send(&email).await;
        }

        let size = email.estimated_size();
        if size > MAX_EMAIL_SIZE_BYTES {
            tracing::warn!(
                size_mb = size as f64 / (1024.0 * 1024.0),
                "Email exceeds the relay size limit, sending without attachments"
            );
            return self.send_fallback(&email).await;
        }

        match self.mailer.send(&email).await {
            Err(MailError::MessageTooLarge(reason)) => {
                tracing::warn!(reason = %reason, "Relay rejected message size, retrying without attachments");
                self.send_fallback(&email).await
            }
            other => other,
        }
    }

    async fn send_fallback(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        self.mailer
            .send(&email.without_attachments())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Fallback email also failed");
                MailError::FallbackFailed(Box::new(e))
            })
    }

    /// Admin notification (reply-to the submitter, file attached), then the
    /// submitter's thank-you.
    pub async fn send_inquiry(&self, notice: &InquiryNotice) -> Result<(), MailError> {
        self.deliver(notice.admin_email(&self.admin_email)).await?;
        tracing::info!(has_file = notice.file.is_some(), "Inquiry admin notification sent");

        self.deliver(notice.thank_you_email()).await?;
        tracing::info!("Inquiry thank-you sent");
        Ok(())
    }

    /// Admin notification, then a receipt when the donor left an email.
    pub async fn send_donation(&self, request: &DonationRequest) -> Result<(), MailError> {
        self.deliver(donation_admin_email(request, &self.admin_email))
            .await?;
        tracing::info!(
            payment_method = request.payment_method.label(),
            "Donation admin notification sent"
        );

        let donor_email = request
            .donor_info
            .as_ref()
            .and_then(|d| non_empty(d.email.as_deref()));
        if let Some(to) = donor_email {
            self.deliver(donation_receipt_email(request, to)).await?;
            tracing::info!("Donation receipt sent");
        }
        Ok(())
    }
}
