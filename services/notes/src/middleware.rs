//! Session middleware
//!
//! Resolves the session named by the session cookie, or starts a new one,
//! and makes it available to handlers as an `Extension<Session>`.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{error::AppResult, session::Session, state::AppState};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "en_session";

pub async fn session_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> AppResult<Response> {
    let jar = CookieJar::from_headers(req.headers());

    let existing = match jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
    {
        Some(id) => state.sessions.load(id).await?,
        None => None,
    };

    let (session, created) = match existing {
        Some(session) => (session, false),
        None => {
            let session = Session::new();
            state.sessions.save(&session).await?;
            info!("Started session: {}", session.id);
            (session, true)
        }
    };

    debug!(session_id = %session.id, "Resolved session");
    let cookie = created.then(|| session_cookie(&session, state.config.secure_cookies));
    req.extensions_mut().insert(session);

    let response = next.run(req).await;

    match cookie {
        Some(cookie) => Ok((CookieJar::new().add(cookie), response).into_response()),
        None => Ok(response),
    }
}

fn session_cookie(session: &Session, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session.id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Cookie that clears the session cookie in the browser
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}
