//! Intake Orchestrator
//!
//! Sequences validation, sniffing and preview generation over a single file
//! slot. Every selection bumps a generation counter; asynchronous results are
//! applied only while their generation is still current, so a slow check for
//! a file the user already replaced can never overwrite the newer outcome.

use std::sync::Arc;
use std::time::Duration;

use liight_core::constants::PDF_MIME_TYPE;
use liight_core::Config;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::file::SubmissionFile;
use crate::preview::{build_preview, PreviewError};
use crate::sniffer::{sniff, SecurityCheckResult};
use crate::validator::validate;

const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    Format,
    Security,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeState {
    Empty,
    Validating,
    Checking,
    Rejected(RejectionKind),
    Accepted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityCheckStatus {
    Idle,
    Checking,
    Passed,
    Failed,
}

/// Result of one selection as seen by the caller that made it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeOutcome {
    /// No file was selected; the slot is empty.
    Empty,
    Rejected { kind: RejectionKind, message: String },
    Accepted,
    /// A newer selection or a reset replaced this one before it finished.
    Superseded,
}

/// Point-in-time copy of the slot for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeSnapshot {
    pub generation: u64,
    pub state: IntakeState,
    pub security_status: SecurityCheckStatus,
    pub error: Option<String>,
    pub file_name: Option<String>,
    pub preview: Option<String>,
}

struct Slot {
    generation: u64,
    state: IntakeState,
    security_status: SecurityCheckStatus,
    error: Option<String>,
    file: Option<SubmissionFile>,
    preview: Option<String>,
    preview_task: Option<JoinHandle<()>>,
}

impl Slot {
    fn new() -> Self {
        Self {
            generation: 0,
            state: IntakeState::Empty,
            security_status: SecurityCheckStatus::Idle,
            error: None,
            file: None,
            preview: None,
            preview_task: None,
        }
    }

    /// Start a new generation with everything cleared.
    fn advance(&mut self) -> u64 {
        if let Some(task) = self.preview_task.take() {
            task.abort();
        }
        self.generation += 1;
        self.state = IntakeState::Empty;
        self.security_status = SecurityCheckStatus::Idle;
        self.error = None;
        self.file = None;
        self.preview = None;
        self.generation
    }

    fn reject(&mut self, kind: RejectionKind, message: String) -> IntakeOutcome {
        self.state = IntakeState::Rejected(kind);
        if kind == RejectionKind::Security {
            self.security_status = SecurityCheckStatus::Failed;
        }
        self.error = Some(message.clone());
        IntakeOutcome::Rejected { kind, message }
    }
}

/// Owns the single intake slot. Cloning shares the slot.
#[derive(Clone)]
pub struct IntakeOrchestrator {
    slot: Arc<Mutex<Slot>>,
    read_timeout: Duration,
}

impl Default for IntakeOrchestrator {
    fn default() -> Self {
        Self::new(DEFAULT_READ_TIMEOUT)
    }
}

impl IntakeOrchestrator {
    pub fn new(read_timeout: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::new())),
            read_timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Duration::from_secs(config.intake_read_timeout_secs()))
    }

    /// Run a newly selected file (or a cleared selection) through the pipeline.
    pub async fn select(&self, file: Option<SubmissionFile>) -> IntakeOutcome {
        let (generation, file) = {
            let mut slot = self.slot.lock().await;
            let generation = slot.advance();
            let Some(file) = file else {
                return IntakeOutcome::Empty;
            };
            slot.state = IntakeState::Validating;
            (generation, file)
        };

        tracing::debug!(
            generation,
            file_name = %file.name(),
            size_bytes = file.size_bytes(),
            "Validating selected file"
        );

        let validation = validate(Some(&file));
        {
            let mut slot = self.slot.lock().await;
            if slot.generation != generation {
                return IntakeOutcome::Superseded;
            }
            if !validation.is_valid() {
                return slot.reject(RejectionKind::Format, validation.error_message().to_string());
            }
            slot.state = IntakeState::Checking;
            slot.security_status = SecurityCheckStatus::Checking;
        }

        // The sniff runs without the slot lock so a newer selection can proceed.
        let check = match tokio::time::timeout(self.read_timeout, sniff(&file)).await {
            Ok(check) => check,
            Err(_) => {
                tracing::warn!(
                    generation,
                    file_name = %file.name(),
                    timeout_secs = self.read_timeout.as_secs_f64(),
                    "Security check timed out"
                );
                SecurityCheckResult::read_failure()
            }
        };

        let mut slot = self.slot.lock().await;
        if slot.generation != generation {
            tracing::debug!(generation, current = slot.generation, "Discarding stale security check");
            return IntakeOutcome::Superseded;
        }
        if !check.is_safe {
            return slot.reject(RejectionKind::Security, check.message);
        }

        slot.state = IntakeState::Accepted;
        slot.security_status = SecurityCheckStatus::Passed;
        slot.file = Some(file.clone());
        slot.preview_task = Some(self.spawn_preview(generation, file));

        tracing::info!(generation, "File accepted");
        IntakeOutcome::Accepted
    }

    /// Drag-and-drop entry point. Drops whose advertised type is not PDF are
    /// ignored entirely and return `None`.
    pub async fn drop_file(
        &self,
        advertised_type: &str,
        file: SubmissionFile,
    ) -> Option<IntakeOutcome> {
        if advertised_type != PDF_MIME_TYPE {
            tracing::debug!(advertised_type, "Ignoring non-PDF drop");
            return None;
        }
        Some(self.select(Some(file)).await)
    }

    fn spawn_preview(&self, generation: u64, file: SubmissionFile) -> JoinHandle<()> {
        let slot = Arc::clone(&self.slot);
        let read_timeout = self.read_timeout;
        tokio::spawn(async move {
            let preview = match tokio::time::timeout(read_timeout, build_preview(&file)).await {
                Ok(result) => result,
                Err(_) => Err(PreviewError::Timeout),
            };

            let mut slot = slot.lock().await;
            if slot.generation != generation {
                return;
            }
            match preview {
                Ok(data_url) => slot.preview = Some(data_url),
                Err(e) => {
                    tracing::warn!(generation, error = %e, "Preview generation failed");
                }
            }
        })
    }

    /// Wait for the current preview task, if any, and return the preview.
    pub async fn await_preview(&self) -> Option<String> {
        let task = self.slot.lock().await.preview_task.take();
        if let Some(task) = task {
            // An aborted task means the slot moved on; the preview is gone either way.
            let _ = task.await;
        }
        self.slot.lock().await.preview.clone()
    }

    /// The file that passed both checks, if the slot is in `Accepted`.
    pub async fn accepted_file(&self) -> Option<SubmissionFile> {
        let slot = self.slot.lock().await;
        match slot.state {
            IntakeState::Accepted => slot.file.clone(),
            _ => None,
        }
    }

    /// Discard the slot.
    pub async fn reset(&self) {
        let mut slot = self.slot.lock().await;
        let generation = slot.advance();
        tracing::debug!(generation, "Intake slot reset");
    }

    pub async fn snapshot(&self) -> IntakeSnapshot {
        let slot = self.slot.lock().await;
        IntakeSnapshot {
            generation: slot.generation,
            state: slot.state,
            security_status: slot.security_status,
            error: slot.error.clone(),
            file_name: slot.file.as_ref().map(|f| f.name().to_string()),
            preview: slot.preview.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::FileContent;
    use async_trait::async_trait;
    use std::io;
    use tokio::sync::Notify;

    const PDF_BYTES: &[u8] = b"%PDF-1.7\n1 0 obj\n<<>>\nendobj\n";

    /// Content whose prefix read blocks until released.
    struct GatedContent {
        entered: Arc<Notify>,
        release: Arc<Notify>,
        data: Vec<u8>,
    }

    #[async_trait]
    impl FileContent for GatedContent {
        async fn read_prefix(&self, len: usize) -> io::Result<Vec<u8>> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(self.data[..len.min(self.data.len())].to_vec())
        }

        async fn read_all(&self) -> io::Result<Vec<u8>> {
            Ok(self.data.clone())
        }
    }

    struct NeverReady;

    #[async_trait]
    impl FileContent for NeverReady {
        async fn read_prefix(&self, _len: usize) -> io::Result<Vec<u8>> {
            std::future::pending().await
        }

        async fn read_all(&self) -> io::Result<Vec<u8>> {
            std::future::pending().await
        }
    }

    struct PrefixOnly(Vec<u8>);

    #[async_trait]
    impl FileContent for PrefixOnly {
        async fn read_prefix(&self, len: usize) -> io::Result<Vec<u8>> {
            Ok(self.0[..len.min(self.0.len())].to_vec())
        }

        async fn read_all(&self) -> io::Result<Vec<u8>> {
            Err(io::Error::new(io::ErrorKind::Other, "read interrupted"))
        }
    }

    fn pdf(name: &str) -> SubmissionFile {
        SubmissionFile::from_bytes(name, PDF_MIME_TYPE, PDF_BYTES.to_vec())
    }

    #[tokio::test]
    async fn well_formed_pdf_is_accepted_with_preview() {
        let intake = IntakeOrchestrator::default();
        assert_eq!(intake.select(Some(pdf("brief.pdf"))).await, IntakeOutcome::Accepted);

        let snapshot = intake.snapshot().await;
        assert_eq!(snapshot.state, IntakeState::Accepted);
        assert_eq!(snapshot.security_status, SecurityCheckStatus::Passed);
        assert_eq!(snapshot.error, None);
        assert_eq!(snapshot.file_name.as_deref(), Some("brief.pdf"));

        let preview = intake.await_preview().await.expect("preview");
        assert!(preview.starts_with("data:application/pdf;base64,"));
        assert_eq!(
            intake.accepted_file().await.map(|f| f.name().to_string()),
            Some("brief.pdf".to_string())
        );
    }

    #[tokio::test]
    async fn wrong_type_is_a_format_rejection() {
        let intake = IntakeOrchestrator::default();
        let file = SubmissionFile::from_bytes("logo.png", "image/png", vec![0x89, 0x50]);
        let outcome = intake.select(Some(file)).await;
        assert_eq!(
            outcome,
            IntakeOutcome::Rejected {
                kind: RejectionKind::Format,
                message: "Only PDF files are allowed.".to_string()
            }
        );

        let snapshot = intake.snapshot().await;
        assert_eq!(snapshot.state, IntakeState::Rejected(RejectionKind::Format));
        assert_eq!(snapshot.security_status, SecurityCheckStatus::Idle);
        assert!(intake.accepted_file().await.is_none());
    }

    #[tokio::test]
    async fn executable_disguised_as_pdf_is_a_security_rejection() {
        let intake = IntakeOrchestrator::default();
        let file = SubmissionFile::from_bytes("brief.pdf", PDF_MIME_TYPE, b"MZ\x90\x00".to_vec());
        let outcome = intake.select(Some(file)).await;
        assert!(matches!(
            outcome,
            IntakeOutcome::Rejected { kind: RejectionKind::Security, .. }
        ));

        let snapshot = intake.snapshot().await;
        assert_eq!(snapshot.security_status, SecurityCheckStatus::Failed);
        assert_eq!(
            snapshot.error.as_deref(),
            Some("File contains potentially unsafe content.")
        );
        assert!(snapshot.preview.is_none());
        assert!(intake.accepted_file().await.is_none());
    }

    #[tokio::test]
    async fn clearing_the_selection_empties_the_slot() {
        let intake = IntakeOrchestrator::default();
        intake.select(Some(pdf("brief.pdf"))).await;
        assert_eq!(intake.select(None).await, IntakeOutcome::Empty);

        let snapshot = intake.snapshot().await;
        assert_eq!(snapshot.state, IntakeState::Empty);
        assert_eq!(snapshot.file_name, None);
        assert_eq!(snapshot.preview, None);
    }

    #[tokio::test]
    async fn slow_check_for_replaced_file_is_discarded() {
        let intake = IntakeOrchestrator::default();
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let slow = SubmissionFile::new(
            "first.pdf",
            PDF_MIME_TYPE,
            PDF_BYTES.len() as u64,
            Arc::new(GatedContent {
                entered: Arc::clone(&entered),
                release: Arc::clone(&release),
                data: PDF_BYTES.to_vec(),
            }),
        );

        let first = {
            let intake = intake.clone();
            tokio::spawn(async move { intake.select(Some(slow)).await })
        };
        entered.notified().await;
        assert_eq!(intake.snapshot().await.state, IntakeState::Checking);

        assert_eq!(intake.select(Some(pdf("second.pdf"))).await, IntakeOutcome::Accepted);

        release.notify_one();
        let first_outcome = first.await.expect("join");
        assert_eq!(first_outcome, IntakeOutcome::Superseded);

        let snapshot = intake.snapshot().await;
        assert_eq!(snapshot.state, IntakeState::Accepted);
        assert_eq!(snapshot.file_name.as_deref(), Some("second.pdf"));
        assert_eq!(snapshot.generation, 2);
    }

    #[tokio::test]
    async fn stalled_read_fails_closed() {
        let intake = IntakeOrchestrator::new(Duration::from_millis(50));
        let file = SubmissionFile::new("brief.pdf", PDF_MIME_TYPE, 10, Arc::new(NeverReady));
        let outcome = intake.select(Some(file)).await;
        assert_eq!(
            outcome,
            IntakeOutcome::Rejected {
                kind: RejectionKind::Security,
                message: "Error checking file security".to_string()
            }
        );
    }

    #[tokio::test]
    async fn preview_failure_keeps_file_accepted() {
        let intake = IntakeOrchestrator::default();
        let file = SubmissionFile::new(
            "brief.pdf",
            PDF_MIME_TYPE,
            PDF_BYTES.len() as u64,
            Arc::new(PrefixOnly(PDF_BYTES.to_vec())),
        );
        assert_eq!(intake.select(Some(file)).await, IntakeOutcome::Accepted);
        assert_eq!(intake.await_preview().await, None);
        assert!(intake.accepted_file().await.is_some());
    }

    #[tokio::test]
    async fn non_pdf_drop_is_ignored() {
        let intake = IntakeOrchestrator::default();
        intake.select(Some(pdf("brief.pdf"))).await;
        let before = intake.snapshot().await;

        let outcome = intake.drop_file("text/plain", pdf("notes.pdf")).await;
        assert!(outcome.is_none());
        assert_eq!(intake.snapshot().await.generation, before.generation);

        let outcome = intake.drop_file(PDF_MIME_TYPE, pdf("dropped.pdf")).await;
        assert_eq!(outcome, Some(IntakeOutcome::Accepted));
        assert_eq!(
            intake.snapshot().await.file_name.as_deref(),
            Some("dropped.pdf")
        );
    }

    #[tokio::test]
    async fn reset_discards_accepted_file() {
        let intake = IntakeOrchestrator::default();
        intake.select(Some(pdf("brief.pdf"))).await;
        intake.reset().await;

        let snapshot = intake.snapshot().await;
        assert_eq!(snapshot.state, IntakeState::Empty);
        assert_eq!(snapshot.security_status, SecurityCheckStatus::Idle);
        assert!(intake.accepted_file().await.is_none());
        assert_eq!(intake.await_preview().await, None);
    }
}
