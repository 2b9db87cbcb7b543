//! Anti-forgery tokens
//!
//! Every session holds one token. State-changing forms post it back in the
//! `csrf` field and the action compares it with the session's copy.

use rand::{Rng, distributions::Alphanumeric};
use thiserror::Error;

use crate::{forms::FormData, session::Session};

/// Form field carrying the token
pub const CSRF_FIELD: &str = "csrf";

const TOKEN_LENGTH: usize = 43;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CsrfError {
    #[error("Missing CSRF token")]
    MissingToken,

    #[error("Invalid CSRF token")]
    InvalidToken,
}

pub fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Check the token posted with `form` against the session
pub fn validate(form: &FormData, session: &Session) -> Result<(), CsrfError> {
    let submitted = form
        .get(CSRF_FIELD)
        .filter(|token| !token.is_empty())
        .ok_or(CsrfError::MissingToken)?;

    if !constant_time_eq(submitted.as_bytes(), session.csrf_token.as_bytes()) {
        return Err(CsrfError::InvalidToken);
    }

    Ok(())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
