use bytes::Bytes;

/// Relay limit for a whole message, attachments included.
pub const MAX_EMAIL_SIZE_BYTES: usize = 15 * 1024 * 1024;

#[derive(Clone)]
pub struct MailAttachment {
    pub filename: String,
    pub content_type: String,
    pub content: Bytes,
}

impl std::fmt::Debug for MailAttachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailAttachment")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("size", &self.content.len())
            .finish()
    }
}

/// A fully rendered message ready for a [`crate::Mailer`].
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
    pub attachments: Vec<MailAttachment>,
}

impl OutgoingEmail {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, html: String) -> Self {
        Self {
            to: to.into(),
            reply_to: None,
            subject: subject.into(),
            html,
            attachments: Vec::new(),
        }
    }

    pub fn reply_to(mut self, address: impl Into<String>) -> Self {
        self.reply_to = Some(address.into());
        self
    }

    pub fn attach(mut self, attachment: MailAttachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Rough wire size: subject, body and raw attachment bytes.
    pub fn estimated_size(&self) -> usize {
        self.subject.len()
            + self.html.len()
            + self
                .attachments
                .iter()
                .map(|a| a.content.len() + a.filename.len())
                .sum::<usize>()
    }

    /// Copy of this message without attachments and with a note naming them.
    pub fn without_attachments(&self) -> OutgoingEmail {
        let names = self
            .attachments
            .iter()
            .map(|a| a.filename.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let note = format!(
            r#"
<div style="margin-top: 20px; padding: 10px; background-color: #fff3cd; border-left: 4px solid #ffc107;">
  <p><strong>Note:</strong> The attachment(s) ({}) could not be included in this email due to size limitations.</p>
  <p>Please access the file(s) through the provided link in this email or contact the sender for alternative access.</p>
</div>
"#,
            super::template::escape_html(&names)
        );
        OutgoingEmail {
            to: self.to.clone(),
            reply_to: self.reply_to.clone(),
            subject: self.subject.clone(),
            html: format!("{}{}", self.html, note),
            attachments: Vec::new(),
        }
    }
}
