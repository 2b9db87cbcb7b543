//! Note editor schema

use std::collections::BTreeMap;

use serde::Serialize;
use uuid::Uuid;

use super::{FormData, MAX_UPLOAD_SIZE, UploadedFile};
use crate::models::{ImageChange, NewImage};

pub const TITLE_MAX_LENGTH: usize = 100;
pub const CONTENT_MAX_LENGTH: usize = 10_000;
pub const ALT_TEXT_MAX_LENGTH: usize = 32_000;

/// Field-level error messages, keyed by form field name
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubmissionErrors(BTreeMap<String, Vec<String>>);

impl SubmissionErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Body returned with a 400 when a submission fails validation: the text
/// fields as they were posted plus the errors per field.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReply {
    pub status: &'static str,
    pub submission: SubmissionState,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionState {
    pub initial_value: BTreeMap<String, String>,
    pub error: SubmissionErrors,
}

impl SubmissionReply {
    pub fn new(form: &FormData, errors: SubmissionErrors) -> Self {
        Self {
            status: "error",
            submission: SubmissionState {
                initial_value: form.initial_values(),
                error: errors,
            },
        }
    }
}

/// Validated note editor submission
#[derive(Debug, Clone)]
pub struct NoteEditorSubmission {
    pub title: String,
    pub content: String,
    pub image_id: Option<Uuid>,
    pub file: Option<UploadedFile>,
    pub alt_text: Option<String>,
}

impl NoteEditorSubmission {
    /// The image transition this submission requests
    pub fn image_change(&self) -> ImageChange {
        match (self.image_id, self.new_image()) {
            (Some(id), Some(image)) => ImageChange::Replace { id, image },
            (None, Some(image)) => ImageChange::Insert(image),
            (Some(id), None) => ImageChange::UpdateAltText {
                id,
                alt_text: self.alt_text.clone(),
            },
            (None, None) => ImageChange::Keep,
        }
    }

    /// The upload as a new image, for note creation
    pub fn new_image(&self) -> Option<NewImage> {
        self.file.as_ref().map(|file| NewImage {
            alt_text: self.alt_text.clone(),
            content_type: file.content_type.clone(),
            blob: file.bytes.clone(),
        })
    }
}

/// Schema shared by the create and edit note forms
pub struct NoteEditorForm;

impl NoteEditorForm {
    /// Validate a decoded form. Every rule is checked so the reply lists all
    /// problems at once; fields not named by the schema are ignored.
    pub fn parse(form: &FormData) -> Result<NoteEditorSubmission, SubmissionErrors> {
        let mut errors = SubmissionErrors::default();

        let title = required(form, "title", &mut errors);
        if let Some(title) = title {
            if let Err(message) = validate_title(title) {
                errors.add("title", message);
            }
        }

        let content = required(form, "content", &mut errors);
        if let Some(content) = content {
            if let Err(message) = validate_content(content) {
                errors.add("content", message);
            }
        }

        let image_id = match optional(form, "imageId").map(Uuid::parse_str) {
            Some(Ok(id)) => Some(id),
            Some(Err(_)) => {
                errors.add("imageId", "Invalid image id");
                None
            }
            None => None,
        };

        let file = form.file("file");
        if let Some(file) = file {
            if let Err(message) = validate_file(file) {
                errors.add("file", message);
            }
        }

        let alt_text = optional(form, "altText");
        if let Some(alt_text) = alt_text {
            if let Err(message) = validate_alt_text(alt_text) {
                errors.add("altText", message);
            }
        }

        match (title, content) {
            (Some(title), Some(content)) if errors.is_empty() => Ok(NoteEditorSubmission {
                title: title.to_string(),
                content: content.to_string(),
                image_id,
                file: file.cloned(),
                alt_text: alt_text.map(str::to_string),
            }),
            _ => Err(errors),
        }
    }
}

fn required<'a>(form: &'a FormData, field: &str, errors: &mut SubmissionErrors) -> Option<&'a str> {
    let value = form.get(field);
    if value.is_none() {
        errors.add(field, "Required");
    }
    value
}

/// Empty strings count as absent
fn optional<'a>(form: &'a FormData, field: &str) -> Option<&'a str> {
    form.get(field).filter(|value| !value.is_empty())
}

/// Validate a note title
pub fn validate_title(title: &str) -> Result<(), String> {
    if title.chars().count() > TITLE_MAX_LENGTH {
        return Err(format!(
            "Title must be at most {TITLE_MAX_LENGTH} characters long"
        ));
    }
    Ok(())
}

/// Validate note content
pub fn validate_content(content: &str) -> Result<(), String> {
    if content.chars().count() > CONTENT_MAX_LENGTH {
        return Err(format!(
            "Content must be at most {CONTENT_MAX_LENGTH} characters long"
        ));
    }
    Ok(())
}

/// Validate an image's alt text
pub fn validate_alt_text(alt_text: &str) -> Result<(), String> {
    if alt_text.chars().count() > ALT_TEXT_MAX_LENGTH {
        return Err(format!(
            "Alt text must be at most {ALT_TEXT_MAX_LENGTH} characters long"
        ));
    }
    Ok(())
}

/// Validate an uploaded image
pub fn validate_file(file: &UploadedFile) -> Result<(), String> {
    if file.size() > MAX_UPLOAD_SIZE {
        return Err("File size must be less than 3MB".to_string());
    }
    Ok(())
}
