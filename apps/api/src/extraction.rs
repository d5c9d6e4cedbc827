//! Uploaded-document text extraction (PDF or plain text).
//!
//! Collaborator boundary: extraction failure is reported as a fixed text
//! payload rather than a request error, so the caller can still show the
//! user something to paste over. Only a malformed upload itself is a 400.

use axum::extract::Multipart;
use axum::Json;
use serde::Serialize;
use tracing::warn;

use crate::errors::AppError;

/// Fixed failure payload; consumers treat it as opaque resume text.
pub const EXTRACTION_FAILED: &str =
    "Failed to extract text from PDF. Please try again or use a different file.";

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
}

/// POST /api/v1/extract
///
/// Accepts a multipart upload with a single `file` field. PDF uploads go
/// through text extraction; anything else is taken as UTF-8 text.
pub async fn handle_extract(mut multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart payload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_lowercase();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;

        let text = if file_name.ends_with(".pdf") {
            extract_pdf_text(&data)
        } else {
            String::from_utf8_lossy(&data).into_owned()
        };

        return Ok(Json(ExtractResponse { text }));
    }

    Err(AppError::Validation(
        "missing 'file' field in upload".to_string(),
    ))
}

fn extract_pdf_text(data: &[u8]) -> String {
    match pdf_extract::extract_text_from_mem(data) {
        Ok(text) => text,
        Err(e) => {
            warn!("PDF extraction failed: {e}");
            EXTRACTION_FAILED.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_yield_fixed_failure_string() {
        let text = extract_pdf_text(b"definitely not a pdf");
        assert_eq!(text, EXTRACTION_FAILED);
    }
}
