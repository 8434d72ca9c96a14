//! Test helpers: build the router over a temporary uploads directory and an
//! in-process mailer.
//!
//! Run from workspace root: `cargo test -p liight-api`.
#![allow(dead_code)]

pub mod fixtures;
pub mod mailer;

use axum_test::TestServer;
use liight_api::setup::build_app;
use liight_core::{BaseConfig, Config, SmtpSettings, StudioConfig};
use liight_storage::LocalStorage;
use mailer::RecordingMailer;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

pub const PUBLIC_BASE_URL: &str = "http://localhost:3002";
pub const ADMIN_EMAIL: &str = "admin@example.com";

pub struct TestApp {
    pub server: TestServer,
    pub mailer: Arc<RecordingMailer>,
    pub uploads: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Names of the files currently in the uploads directory.
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.uploads.path())
            .expect("read uploads dir")
            .map(|entry| {
                entry
                    .expect("dir entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }
}

pub fn test_config(uploads_dir: &Path, donation_sandbox_mode: bool) -> Config {
    Config(Box::new(StudioConfig {
        base: BaseConfig {
            server_port: 3002,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
            request_timeout_secs: 30,
        },
        uploads_dir: uploads_dir.to_path_buf(),
        public_base_url: PUBLIC_BASE_URL.to_string(),
        smtp: SmtpSettings {
            host: "smtp.invalid".to_string(),
            port: 587,
            user: None,
            password: None,
            tls: true,
            from: "Studio <studio@example.com>".to_string(),
            dkim: None,
        },
        admin_email: ADMIN_EMAIL.to_string(),
        donation_sandbox_mode,
        intake_read_timeout_secs: 10,
    }))
}

/// Working mailer, sandbox donations enabled.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(RecordingMailer::new(), true).await
}

pub async fn setup_test_app_with(mailer: RecordingMailer, donation_sandbox_mode: bool) -> TestApp {
    let uploads = TempDir::new().expect("temp dir");
    let config = test_config(uploads.path(), donation_sandbox_mode);

    let storage = LocalStorage::new(
        uploads.path().to_path_buf(),
        format!("{}/uploads", PUBLIC_BASE_URL),
    )
    .await
    .expect("local storage");

    let mailer = Arc::new(mailer);
    let (_state, app) =
        build_app(config, Arc::new(storage), mailer.clone()).expect("build app");

    TestApp {
        server: TestServer::new(app).expect("test server"),
        mailer,
        uploads,
    }
}
