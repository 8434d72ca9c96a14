//! In-process `Mailer` doubles.

use async_trait::async_trait;
use liight_services::{MailError, Mailer, OutgoingEmail};
use std::sync::Mutex;

/// Records every message. Optionally fails the n-th send (0-based).
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
    fail_on: Option<usize>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Relay that refuses every message.
    pub fn failing() -> Self {
        Self::failing_on(0)
    }

    pub fn failing_on(index: usize) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_on: Some(index),
        }
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().expect("mailer lock").clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let mut sent = self.sent.lock().expect("mailer lock");
        if self.fail_on == Some(sent.len()) {
            return Err(MailError::Transport(
                "535 Authentication failed".to_string(),
            ));
        }
        sent.push(email.clone());
        Ok(())
    }
}
