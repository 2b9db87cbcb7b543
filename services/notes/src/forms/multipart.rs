use axum::{
    body::Bytes,
    extract::{Multipart, multipart::MultipartError},
    http::StatusCode,
};
use tracing::warn;

use super::{FormData, MAX_UPLOAD_SIZE, UploadedFile};
use crate::error::{AppError, AppResult};

/// Read a multipart body into memory.
///
/// File parts are consumed chunk by chunk and the whole parse is abandoned
/// with [`AppError::UploadTooLarge`] as soon as one exceeds
/// [`MAX_UPLOAD_SIZE`], so a truncated file never reaches validation. A body
/// cut off by the route's body limit is reported as
/// [`AppError::BodyTooLarge`]. File inputs left empty by the browser (no
/// name, no content) are dropped.
pub async fn parse_multipart(multipart: Multipart) -> AppResult<FormData> {
    parse_multipart_with_limit(multipart, MAX_UPLOAD_SIZE).await
}

async fn parse_multipart_with_limit(
    mut multipart: Multipart,
    max_file_size: usize,
) -> AppResult<FormData> {
    let mut form = FormData::default();

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        let Some(file_name) = field.file_name().map(str::to_owned) else {
            let value = field.text().await.map_err(multipart_error)?;
            form.insert_field(name, value);
            continue;
        };

        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_owned();

        let mut buffer: Vec<u8> = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            if buffer.len() + chunk.len() > max_file_size {
                warn!(field = %name, file_name = %file_name, "Rejecting oversized upload");
                return Err(AppError::UploadTooLarge);
            }
            buffer.extend_from_slice(&chunk);
        }

        if file_name.is_empty() && buffer.is_empty() {
            continue;
        }

        form.insert_file(
            name,
            UploadedFile {
                file_name,
                content_type,
                bytes: Bytes::from(buffer),
            },
        );
    }

    Ok(form)
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::BodyTooLarge
    } else {
        AppError::BadRequest(err.body_text())
    }
}
