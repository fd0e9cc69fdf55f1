//! Session cookie extraction and signing.
//!
//! The session id cookie is `sid=<uuid>.<hmac-sha256-hex>`, signed
//! with the configured session secret. Extracting [`SessionToken`]
//! verifies the signature and resolves the bearer token from the
//! store; a missing or tampered cookie rejects with
//! [`AppError::AuthRequired`], which redirects to the login flow.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use crate::http::error::AppError;
use crate::state::AppState;

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE: &str = "sid";

/// An authenticated session: the verified session id and its token.
pub struct SessionToken {
    pub sid: String,
    pub token: SecretString,
}

impl FromRequestParts<AppState> for SessionToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve_session(&parts.headers, state).ok_or(AppError::AuthRequired)
    }
}

/// Resolve a session from request headers, if a valid one exists.
///
/// Shared by the extractor and the handlers (index, logout) that treat
/// an absent session as a normal state rather than a rejection.
pub fn resolve_session(headers: &HeaderMap, state: &AppState) -> Option<SessionToken> {
    let cookie_value = cookie_value(headers, SESSION_COOKIE)?;
    let sid = verify_cookie(&state.config.session_secret, &cookie_value)?;
    let token = state.tokens.get(&sid)?;
    Some(SessionToken { sid, token })
}

/// Build the signed `Set-Cookie` value for a fresh session.
pub fn session_cookie(secret: &SecretString, sid: &str) -> String {
    format!(
        "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
        sign(secret, sid)
    )
}

/// A `Set-Cookie` value that expires the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

fn sign(secret: &SecretString, sid: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes())
        .expect("HMAC accepts keys of any size");
    mac.update(sid.as_bytes());
    let signature = mac.finalize().into_bytes();
    let hex: String = signature.iter().map(|b| format!("{b:02x}")).collect();
    format!("{sid}.{hex}")
}

/// Verify a signed cookie value, returning the session id.
fn verify_cookie(secret: &SecretString, value: &str) -> Option<String> {
    let (sid, signature_hex) = value.rsplit_once('.')?;
    let signature = decode_hex(signature_hex)?;

    let mut mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes())
        .expect("HMAC accepts keys of any size");
    mac.update(sid.as_bytes());
    mac.verify_slice(&signature).ok()?;

    Some(sid.to_string())
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let header = headers.get("cookie")?.to_str().ok()?;
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

fn decode_hex(input: &str) -> Option<Vec<u8>> {
    if input.len() % 2 != 0 {
        return None;
    }
    (0..input.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&input[i..i + 2], 16).ok())
        .collect()
}
