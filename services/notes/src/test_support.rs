//! Router harness for handler tests: in-memory stores and request builders

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, Bytes},
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use crate::{
    config::AppConfig,
    middleware::SESSION_COOKIE,
    repositories::memory::MemoryStore,
    routes::create_router,
    session::{MemorySessionStore, Session, SessionStore},
    state::AppState,
};

const BOUNDARY: &str = "test-form-boundary";

pub struct TestApp {
    router: Router,
    pub store: Arc<MemoryStore>,
    pub sessions: Arc<MemorySessionStore>,
}

/// One part of a multipart body
pub struct Part<'a> {
    name: &'a str,
    file_name: Option<&'a str>,
    data: &'a [u8],
}

impl<'a> Part<'a> {
    pub fn text(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            file_name: None,
            data: value.as_bytes(),
        }
    }

    pub fn file(name: &'a str, file_name: &'a str, data: &'a [u8]) -> Self {
        Self {
            name,
            file_name: Some(file_name),
            data,
        }
    }
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        let sessions = Arc::new(MemorySessionStore::default());

        let state = AppState {
            config: Arc::new(AppConfig::default()),
            users: store.clone(),
            notes: store.clone(),
            sessions: sessions.clone(),
        };

        Self {
            router: create_router(state),
            store,
            sessions,
        }
    }

    /// A stored session without a signed-in user
    pub async fn anonymous_session(&self) -> Session {
        let session = Session::new();
        self.sessions.save(&session).await.unwrap();
        session
    }

    pub async fn signed_in_session(&self, user_id: Uuid) -> Session {
        let session = Session {
            user_id: Some(user_id),
            ..Session::new()
        };
        self.sessions.save(&session).await.unwrap();
        session
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, path: &str) -> Response<Body> {
        self.send(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    pub async fn get_with_session(&self, path: &str, session: &Session) -> Response<Body> {
        self.send(
            Request::get(path)
                .header(header::COOKIE, session_cookie(session))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// POST an `application/x-www-form-urlencoded` body
    pub async fn post_form(
        &self,
        path: &str,
        session: &Session,
        pairs: &[(&str, &str)],
    ) -> Response<Body> {
        let body = serde_urlencoded::to_string(pairs).unwrap();

        self.send(
            Request::post(path)
                .header(header::COOKIE, session_cookie(session))
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    /// POST a `multipart/form-data` body
    pub async fn post_multipart(
        &self,
        path: &str,
        session: &Session,
        parts: &[Part<'_>],
    ) -> Response<Body> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            let disposition = match part.file_name {
                Some(file_name) => format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{file_name}\"\r\n\
                     Content-Type: image/png\r\n\r\n",
                    part.name
                ),
                None => format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    part.name
                ),
            };
            body.extend_from_slice(disposition.as_bytes());
            body.extend_from_slice(part.data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        self.send(
            Request::post(path)
                .header(header::COOKIE, session_cookie(session))
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }
}

fn session_cookie(session: &Session) -> String {
    format!("{SESSION_COOKIE}={}", session.id)
}

pub async fn body_bytes(response: Response<Body>) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Target of a redirect response
pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
