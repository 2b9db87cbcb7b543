//! Form submissions: decoding request bodies into [`FormData`] and validating
//! them against the note editor schema.

mod multipart;
mod validation;

use std::collections::{BTreeMap, HashMap};

use axum::{
    Form, async_trait,
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::{StatusCode, header::CONTENT_TYPE},
};

use crate::error::AppError;

pub use multipart::parse_multipart;
pub use validation::{
    ALT_TEXT_MAX_LENGTH, CONTENT_MAX_LENGTH, NoteEditorForm, NoteEditorSubmission,
    SubmissionErrors, SubmissionReply, TITLE_MAX_LENGTH,
};

/// Upload ceiling for a single file part (3 MiB)
pub const MAX_UPLOAD_SIZE: usize = 3 * 1024 * 1024;

/// Allowance for the text fields and multipart framing on top of the upload
/// ceiling when limiting a whole request body: every bounded field at its
/// maximum length in 4-byte characters, plus room for the small fields
/// (`imageId`, `intent`, `csrf`) and part headers.
pub const FORM_FIELDS_ALLOWANCE: usize =
    (TITLE_MAX_LENGTH + CONTENT_MAX_LENGTH + ALT_TEXT_MAX_LENGTH) * 4 + 16 * 1024;

/// File received in a multipart submission, held in memory
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Decoded form body: text values by field name plus uploaded files
#[derive(Debug, Clone, Default)]
pub struct FormData {
    fields: HashMap<String, Vec<String>>,
    files: HashMap<String, UploadedFile>,
}

impl FormData {
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut form = FormData::default();
        for (name, value) in pairs {
            form.insert_field(name, value);
        }
        form
    }

    pub fn insert_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields
            .entry(name.into())
            .or_default()
            .push(value.into());
    }

    /// Keeps the first file posted under `name`
    pub fn insert_file(&mut self, name: impl Into<String>, file: UploadedFile) {
        self.files.entry(name.into()).or_insert(file);
    }

    /// First value of a text field
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn get_all(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name)
    }

    /// Text fields as submitted, for echoing the form state back
    pub fn initial_values(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .filter_map(|(name, values)| values.first().map(|v| (name.clone(), v.clone())))
            .collect()
    }
}

#[async_trait]
impl<S> FromRequest<S> for FormData
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| {
                value
                    .trim_start()
                    .to_ascii_lowercase()
                    .starts_with("multipart/form-data")
            });

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| rejection_error(e.status(), e.body_text()))?;
            parse_multipart(multipart).await
        } else {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| rejection_error(e.status(), e.body_text()))?;
            Ok(FormData::from_pairs(pairs))
        }
    }
}

fn rejection_error(status: StatusCode, body_text: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::BodyTooLarge
    } else {
        AppError::BadRequest(body_text)
    }
}
