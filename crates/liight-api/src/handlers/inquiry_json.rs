//! `POST /api/send-project-inquiry`

use crate::error::{storage_app_error, HttpAppError, ValidatedJson};
use crate::state::AppState;
use crate::utils::data_url::decode_pdf_data_url;
use crate::utils::inquiry::{discard, InquiryFields};
use crate::utils::upload::display_name;
use axum::{extract::State, Json};
use bytes::Bytes;
use liight_core::constants::MAX_FILE_SIZE_BYTES;
use liight_core::models::{ApiMessage, InquiryJsonRequest};
use liight_core::AppError;
use liight_services::{InquirySource, StoredFile};
use liight_storage::StagedUpload;
use std::sync::Arc;

use super::inquiry_upload::SUCCESS_MESSAGE;

pub const FAILURE_MESSAGE: &str = "Failed to send project inquiry emails";

/// Inquiry submitted as JSON with the PDF embedded as a data URL.
pub async fn send_project_inquiry(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<InquiryJsonRequest>,
) -> Result<Json<ApiMessage>, HttpAppError> {
    let fields = InquiryFields::from(&request);
    fields.check()?;

    let pdf = match request.pdf_url.as_deref() {
        Some(url) => decode_pdf_data_url(url)?,
        None => None,
    };
    if pdf.is_none() && request.pdf_url.is_some() {
        tracing::warn!("Ignoring project file that is not a PDF data URL");
    }

    let mut staged = None;
    let mut stored = None;
    if let Some(bytes) = pdf {
        let name = display_name(request.pdf_file_name.as_deref());
        let upload =
            StagedUpload::from_bytes(Arc::clone(&state.storage), &name, &bytes, MAX_FILE_SIZE_BYTES)
                .await
                .map_err(storage_app_error)?;
        stored = Some(StoredFile {
            original_name: name,
            url: upload.public_url(),
            content: Bytes::from(bytes),
        });
        staged = Some(upload);
    }

    let notice = fields.into_notice(InquirySource::DataUrl, stored);
    if let Err(e) = state.notifier.send_inquiry(&notice).await {
        discard(staged).await;
        return Err(AppError::Notification {
            context: FAILURE_MESSAGE.to_string(),
            detail: e.to_string(),
        }
        .into());
    }

    if let Some(staged) = staged {
        staged.commit();
    }
    tracing::info!(has_file = notice.file.is_some(), "Project inquiry processed");

    Ok(Json(ApiMessage::ok(SUCCESS_MESSAGE)))
}
