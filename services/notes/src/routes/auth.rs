//! Signup and logout actions

use axum::{
    Extension,
    extract::State,
    response::Redirect,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, warn};

use crate::{
    csrf, error::AppResult, forms::FormData, honeypot, middleware::removal_cookie,
    session::Session, state::AppState,
};

/// POST /signup
///
/// Only the bot checks run here; account creation lives elsewhere.
pub async fn signup(
    Extension(session): Extension<Session>,
    form: FormData,
) -> AppResult<Redirect> {
    csrf::validate(&form, &session).inspect_err(|e| {
        warn!(session_id = %session.id, "Rejected signup: {}", e);
    })?;
    honeypot::check(&form)?;

    Ok(Redirect::to("/"))
}

/// GET /logout
pub async fn logout_redirect() -> Redirect {
    Redirect::to("/")
}

/// POST /logout
pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    jar: CookieJar,
    form: FormData,
) -> AppResult<(CookieJar, Redirect)> {
    csrf::validate(&form, &session)?;

    state.sessions.destroy(session.id).await?;
    info!("Logged out session: {}", session.id);

    Ok((jar.remove(removal_cookie()), Redirect::to("/")))
}
