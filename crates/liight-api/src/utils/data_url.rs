//! PDF data URLs submitted by the JSON inquiry endpoint.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use liight_core::constants::MAX_FILE_SIZE_BYTES;
use liight_core::AppError;

const PDF_DATA_URL_PREFIX: &str = "data:application/pdf;base64,";

/// Decode a `data:application/pdf;base64,` URL.
///
/// Returns `Ok(None)` for anything that is not a PDF data URL; those values are
/// not fetched or stored. Payloads over the upload limit are rejected before
/// decoding.
pub fn decode_pdf_data_url(value: &str) -> Result<Option<Vec<u8>>, AppError> {
    let Some(encoded) = value.strip_prefix(PDF_DATA_URL_PREFIX) else {
        return Ok(None);
    };
    let encoded = encoded.trim();

    let decoded_len = (encoded.len() as u64 / 4) * 3;
    if decoded_len > MAX_FILE_SIZE_BYTES + 3 {
        return Err(too_large());
    }

    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| AppError::InvalidInput(format!("Invalid PDF data URL: {}", e)))?;
    if bytes.len() as u64 > MAX_FILE_SIZE_BYTES {
        return Err(too_large());
    }
    Ok(Some(bytes))
}

fn too_large() -> AppError {
    AppError::PayloadTooLarge(format!(
        "File size exceeds the {}MB limit",
        MAX_FILE_SIZE_BYTES / (1024 * 1024)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_pdf_data_url() {
        let url = format!("{}{}", PDF_DATA_URL_PREFIX, STANDARD.encode(b"%PDF-1.7\n"));
        let bytes = decode_pdf_data_url(&url).unwrap().unwrap();
        assert_eq!(bytes, b"%PDF-1.7\n");
    }

    #[test]
    fn test_other_urls_are_ignored() {
        assert!(decode_pdf_data_url("https://example.com/brief.pdf").unwrap().is_none());
        assert!(decode_pdf_data_url("data:image/png;base64,AAAA").unwrap().is_none());
    }

    #[test]
    fn test_invalid_base64_rejected() {
        let err = decode_pdf_data_url("data:application/pdf;base64,@@@").unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_oversized_payload_rejected_before_decoding() {
        let encoded = "A".repeat(((MAX_FILE_SIZE_BYTES / 3) * 4 + 8) as usize);
        let err = decode_pdf_data_url(&format!("{}{}", PDF_DATA_URL_PREFIX, encoded)).unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge(_)));
    }
}
