//! `POST /api/project-inquiry-with-pdf`

use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::inquiry::{discard, stored_file};
use crate::utils::upload::InquiryUpload;
use axum::{
    extract::{Multipart, State},
    Json,
};
use liight_core::models::{InquiryResponse, UploadedFileInfo};
use liight_core::AppError;
use liight_services::InquirySource;
use std::sync::Arc;

pub const SUCCESS_MESSAGE: &str = "Project inquiry submitted successfully";
pub const FAILURE_MESSAGE: &str = "Failed to process project inquiry";

/// Accept the inquiry form with an optional PDF.
///
/// The PDF is staged to storage while the body is read. It is kept only when
/// both notifications were sent; every other outcome removes it before the
/// response is written.
pub async fn submit_inquiry_with_pdf(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<InquiryResponse>, HttpAppError> {
    let InquiryUpload { fields, file } =
        InquiryUpload::read(Arc::clone(&state.storage), multipart).await?;

    if let Err(e) = fields.check() {
        discard(file).await;
        return Err(e.into());
    }

    let stored = match &file {
        Some(staged) => match stored_file(staged).await {
            Ok(stored) => Some(stored),
            Err(e) => {
                discard(file).await;
                return Err(e.into());
            }
        },
        None => None,
    };

    let notice = fields.into_notice(InquirySource::Upload, stored);
    if let Err(e) = state.notifier.send_inquiry(&notice).await {
        discard(file).await;
        return Err(AppError::Notification {
            context: FAILURE_MESSAGE.to_string(),
            detail: e.to_string(),
        }
        .into());
    }

    let file_info = file.map(|staged| {
        let info = UploadedFileInfo {
            original_name: staged.original_name().to_string(),
            url: staged.public_url(),
        };
        staged.commit();
        info
    });

    tracing::info!(has_file = file_info.is_some(), "Project inquiry processed");

    Ok(Json(InquiryResponse {
        success: true,
        message: SUCCESS_MESSAGE.to_string(),
        file: file_info,
    }))
}
