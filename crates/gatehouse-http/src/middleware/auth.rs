//! HTTP Basic authentication middleware.

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use gatehouse_service::{AuthGate, BasicCredentials, Verdict};

use crate::error::ApiError;

const BASIC_PREFIX: &str = "Basic ";

/// Extracts `user:password` from an `Authorization: Basic ...` header.
///
/// The scheme is matched case-insensitively and the password may contain
/// colons. Anything unparseable is treated as no credentials.
pub fn basic_credentials(headers: &HeaderMap) -> Option<BasicCredentials> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, payload) = value.split_at_checked(BASIC_PREFIX.len())?;
    if !scheme.eq_ignore_ascii_case(BASIC_PREFIX) {
        return None;
    }

    let decoded = STANDARD.decode(payload).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some(BasicCredentials::new(username, password))
}

/// Forwards the request only if the gate lets it through.
///
/// The check runs on the blocking pool since a cache miss costs a full
/// bcrypt comparison. The caller's span is re-entered there so the gate's
/// events keep the request ID.
pub async fn basic_auth_middleware(
    State(gate): State<AuthGate>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let credentials = basic_credentials(req.headers());
    let span = tracing::Span::current();

    let verdict =
        tokio::task::spawn_blocking(move || span.in_scope(|| gate.check(credentials.as_ref())))
            .await
            .map_err(|e| ApiError::Internal(format!("auth task failed: {e}")))??;

    match verdict {
        Verdict::Forward => Ok(next.run(req).await),
        Verdict::Reject => Err(ApiError::Unauthorized),
    }
}
