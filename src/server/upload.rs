// server/upload.rs
//! Upload ingestion
//!
//! A submission is one multipart form carrying a file part named `file`. The
//! payload is buffered whole, size-checked, and decoded as UTF-8 before
//! anything is echoed back. Every way a submission can go wrong maps to a
//! variant of [`UploadError`], which renders as a JSON error response with a
//! status reflecting the failure.

use axum::{
    Json,
    extract::multipart::{
        Multipart,
        MultipartError,
    },
    http::StatusCode,
    response::{
        IntoResponse,
        Response,
    },
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::{
    debug,
    trace,
    warn,
};

/// Form field a file submission is expected under
pub const FILE_FIELD: &str = "file";

/// # A successfully ingested upload
///
/// Owned by a single handler invocation and dropped once the response is
/// serialized. Nothing is ever written to disk.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Upload {
    pub filename: String,
    pub content:  String,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file part")]
    MissingFilePart,

    #[error("No selected file")]
    NoFileSelected,

    #[error("File is not valid UTF-8 text")]
    DecodeError,

    #[error("File exceeds the maximum upload size of {0} bytes")]
    PayloadTooLarge(u64),

    #[error("Malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),
}

impl UploadError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            | UploadError::MissingFilePart => StatusCode::BAD_REQUEST,
            | UploadError::NoFileSelected => StatusCode::BAD_REQUEST,
            | UploadError::DecodeError => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            | UploadError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            | UploadError::Multipart(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        match &self {
            | UploadError::PayloadTooLarge(_) => warn!("Rejected upload: {self}"),
            | _ => debug!("Rejected upload: {self}"),
        }

        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// # Ingests one upload from a multipart form
///
/// Walks the form looking for a file part named [`FILE_FIELD`]. Parts under
/// that name without a filename header are plain form fields, not file
/// attachments, and are skipped.
///
/// For possible errors, view the branches of the UploadError enum.
pub async fn ingest(mut multipart: Multipart, max_size: u64) -> Result<Upload, UploadError> {
    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            trace!("Skipping form field {:?}", field.name());
            continue;
        }

        // An empty filename means the client submitted an empty file input
        let Some(filename) = field.file_name().map(str::to_owned) else {
            trace!("Skipping non-file form field named {FILE_FIELD:?}");
            continue;
        };
        if filename.is_empty() {
            return Err(UploadError::NoFileSelected);
        }

        let mut raw = Vec::new();
        while let Some(chunk) = field.chunk().await? {
            if (raw.len() + chunk.len()) as u64 > max_size {
                return Err(UploadError::PayloadTooLarge(max_size));
            }
            raw.extend_from_slice(&chunk);
        }

        debug!("Received {filename} ({} bytes)", raw.len());

        let content = String::from_utf8(raw).map_err(|_| UploadError::DecodeError)?;
        return Ok(Upload { filename, content });
    }

    Err(UploadError::MissingFilePart)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn status_codes_reflect_the_failure() {
        assert_eq!(
            UploadError::MissingFilePart.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            UploadError::NoFileSelected.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            UploadError::DecodeError.status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            UploadError::PayloadTooLarge(8).status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn validation_failures_keep_their_wire_messages() {
        assert_eq!(UploadError::MissingFilePart.to_string(), "No file part");
        assert_eq!(UploadError::NoFileSelected.to_string(), "No selected file");
    }
}
