//! Honeypot check for public forms
//!
//! Forms render a visually hidden input that people leave empty; bots that
//! fill every field give themselves away.

use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    forms::FormData,
};

/// Name of the hidden input
pub const NAME_FIELD: &str = "name__confirm";

/// Input properties handed to the page so it can render the honeypot
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoneypotInputProps {
    pub name_field_name: &'static str,
}

pub fn input_props() -> HoneypotInputProps {
    HoneypotInputProps {
        name_field_name: NAME_FIELD,
    }
}

/// Reject a submission whose honeypot input is filled in
pub fn check(form: &FormData) -> AppResult<()> {
    if form.get(NAME_FIELD).is_some_and(|value| !value.is_empty()) {
        return Err(AppError::Honeypot);
    }
    Ok(())
}
