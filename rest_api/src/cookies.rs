// rest_api/src/cookies.rs

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use dashboard_lib::SessionHandle;

pub const SESSION_COOKIE: &str = "dashboard_session";

/// Reads the session id from the `Cookie` headers, ignoring malformed values.
pub fn session_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

pub fn session_cookie(id: Uuid) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id)
}

pub fn expired_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// Attaches `Set-Cookie` when the handle started a new session.
pub fn with_session(handle: &SessionHandle, response: impl IntoResponse) -> Response {
    let mut response = response.into_response();
    if handle.created {
        if let Ok(value) = HeaderValue::from_str(&session_cookie(handle.id)) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }
    response
}
