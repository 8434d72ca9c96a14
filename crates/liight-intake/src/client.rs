//! HTTP client for the studio API.
//!
//! Posts inquiries as multipart forms and donations as JSON. Non-2xx replies
//! surface the server's `message` field.

use async_trait::async_trait;
use liight_core::constants::FILE_FIELD_NAME;
use liight_core::models::{ApiMessage, DonationRequest, InquiryResponse};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::donation::DonationSubmitter;
use crate::inquiry::{InquiryPayload, InquirySubmitter};

pub const INQUIRY_PATH: &str = "/api/project-inquiry-with-pdf";
pub const DONATION_PATH: &str = "/api/send-donation";

const DEFAULT_BASE_URL: &str = "http://localhost:3002";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },
}

#[derive(Clone, Debug)]
pub struct StudioClient {
    client: Client,
    base_url: String,
}

impl StudioClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(Duration::from_secs(60)).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL from `LIIGHT_API_URL` (or `API_URL`), defaulting to the local server.
    pub fn from_env() -> Result<Self, ClientError> {
        let base_url = std::env::var("LIIGHT_API_URL")
            .or_else(|_| std::env::var("API_URL"))
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiMessage>(&text)
                .map(|body| body.message)
                .unwrap_or_else(|_| {
                    if text.is_empty() {
                        status.to_string()
                    } else {
                        text
                    }
                });
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }

    fn inquiry_form(payload: InquiryPayload) -> Result<Form, ClientError> {
        let part = Part::bytes(payload.file_bytes.to_vec())
            .file_name(payload.file_name)
            .mime_str(&payload.file_type)?;
        Ok(Form::new()
            .text("fullName", payload.full_name)
            .text("email", payload.email)
            .text("organizationType", payload.organization_type.unwrap_or_default())
            .text("projectDetails", payload.project_details)
            .part(FILE_FIELD_NAME, part))
    }
}

#[async_trait]
impl InquirySubmitter for StudioClient {
    async fn submit_inquiry(&self, payload: InquiryPayload) -> Result<InquiryResponse, ClientError> {
        let form = Self::inquiry_form(payload)?;
        let response = self
            .client
            .post(self.build_url(INQUIRY_PATH))
            .multipart(form)
            .send()
            .await?;
        Self::read_response(response).await
    }
}

#[async_trait]
impl DonationSubmitter for StudioClient {
    async fn submit_donation(&self, request: &DonationRequest) -> Result<ApiMessage, ClientError> {
        let response = self
            .client
            .post(self.build_url(DONATION_PATH))
            .json(request)
            .send()
            .await?;
        Self::read_response(response).await
    }
}
