//! Multipart intake for the project inquiry form.
//!
//! The `pdfFile` part is streamed straight into a [`StagedUpload`]; text parts
//! are collected into [`InquiryFields`]. Any failure after staging began
//! discards the staged file before the error is returned.

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use liight_core::constants::{FILE_FIELD_NAME, MAX_FILE_SIZE_BYTES, PDF_MIME_TYPE};
use liight_core::AppError;
use liight_storage::{StagedUpload, Storage};
use std::sync::Arc;

use super::inquiry::{discard, InquiryFields};
use crate::error::storage_app_error;

pub const NOT_PDF_MESSAGE: &str = "Only PDF files are allowed";
const DEFAULT_FILE_NAME: &str = "document.pdf";

/// A parsed inquiry form whose file, if any, is already on disk.
#[derive(Debug)]
pub struct InquiryUpload {
    pub fields: InquiryFields,
    pub file: Option<StagedUpload>,
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!(
            "File size exceeds the {}MB limit",
            MAX_FILE_SIZE_BYTES / (1024 * 1024)
        ))
    } else {
        AppError::InvalidInput(format!("Failed to read form data: {}", err.body_text()))
    }
}

/// Last path component of a client-supplied file name.
pub fn display_name(file_name: Option<&str>) -> String {
    file_name
        .and_then(|name| name.rsplit(['/', '\\']).next())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_FILE_NAME)
        .to_string()
}

async fn stage_field(
    storage: Arc<dyn Storage>,
    mut field: Field<'_>,
) -> Result<StagedUpload, AppError> {
    let original_name = display_name(field.file_name());
    let mut staged = StagedUpload::begin(storage, &original_name, MAX_FILE_SIZE_BYTES)
        .await
        .map_err(storage_app_error)?;

    let written = async {
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            staged.write_chunk(&chunk).await.map_err(storage_app_error)?;
        }
        staged.finish().await.map_err(storage_app_error)
    }
    .await;

    match written {
        Ok(()) => Ok(staged),
        Err(e) => {
            discard(Some(staged)).await;
            Err(e)
        }
    }
}

impl InquiryUpload {
    pub async fn read(storage: Arc<dyn Storage>, multipart: Multipart) -> Result<Self, AppError> {
        let mut upload = InquiryUpload {
            fields: InquiryFields::default(),
            file: None,
        };
        match upload.read_fields(storage, multipart).await {
            Ok(()) => Ok(upload),
            Err(e) => {
                discard(upload.file.take()).await;
                Err(e)
            }
        }
    }

    async fn read_fields(
        &mut self,
        storage: Arc<dyn Storage>,
        mut multipart: Multipart,
    ) -> Result<(), AppError> {
        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();

            if name != FILE_FIELD_NAME {
                if field.file_name().is_some() {
                    tracing::debug!(field = %name, "Ignoring unexpected file part");
                    continue;
                }
                let value = field.text().await.map_err(multipart_error)?;
                self.fields.set(&name, value);
                continue;
            }

            // Browsers send an empty, unnamed part when no file was chosen.
            if field.file_name().map(str::is_empty).unwrap_or(true) {
                continue;
            }

            if field.content_type() != Some(PDF_MIME_TYPE) {
                tracing::debug!(
                    content_type = ?field.content_type(),
                    "Rejected non-PDF upload"
                );
                return Err(AppError::InvalidInput(NOT_PDF_MESSAGE.to_string()));
            }

            if self.file.is_some() {
                return Err(AppError::InvalidInput(
                    "Only one project file may be uploaded".to_string(),
                ));
            }

            self.file = Some(stage_field(Arc::clone(&storage), field).await?);
        }
        Ok(())
    }
}
