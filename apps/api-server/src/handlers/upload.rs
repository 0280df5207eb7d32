//! Reading an uploaded image out of a `multipart/form-data` body.

use actix_multipart::Multipart;
use actix_web::http::header::{self, ContentDisposition};
use futures_util::TryStreamExt;

use crate::middleware::error::{AppError, AppResult};

/// Form field carrying the file.
pub const IMAGE_FIELD: &str = "image";

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub struct UploadedImage {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Take the first `image` field; other fields are skipped.
pub async fn read_image(mut payload: Multipart) -> AppResult<UploadedImage> {
    while let Some(mut field) = payload.try_next().await.map_err(malformed)? {
        let disposition = field
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| ContentDisposition::from_raw(value).ok());
        let Some(disposition) = disposition else {
            continue;
        };
        if disposition.get_name() != Some(IMAGE_FIELD) {
            continue;
        }

        let filename = disposition
            .get_filename()
            .map(str::to_owned)
            .ok_or_else(|| AppError::BadRequest("The submitted data was not a file.".into()))?;

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(malformed)? {
            if bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
                return Err(AppError::BadRequest(
                    "The submitted file exceeds the 10MB limit.".into(),
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        tracing::debug!(filename = %filename, size = bytes.len(), "Upload received");
        return Ok(UploadedImage { filename, bytes });
    }

    Err(AppError::BadRequest("No file was submitted.".into()))
}

fn malformed(err: actix_multipart::MultipartError) -> AppError {
    AppError::BadRequest(format!("Malformed multipart body: {}", err))
}
