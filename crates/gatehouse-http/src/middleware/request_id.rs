//! Request ID middleware: tags every request and its log lines with an ID.

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;
use uuid::Uuid;

static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Reuses the client's `X-Request-Id` or mints a UUID v4.
///
/// The ID is echoed on the response, including 401 and 500 answers from the
/// auth layer, and recorded on a `request` span.
pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    let existing = req.headers().get(&X_REQUEST_ID).cloned();
    let id = match existing {
        Some(value) => value,
        None => {
            let generated = HeaderValue::from_str(&Uuid::new_v4().to_string())
                .unwrap_or_else(|_| HeaderValue::from_static("unknown"));
            req.headers_mut().insert(X_REQUEST_ID.clone(), generated.clone());
            generated
        }
    };

    let span = tracing::info_span!(
        "request",
        request_id = %id.to_str().unwrap_or("<non-ascii>"),
        method = %req.method(),
        path = %req.uri().path(),
    );
    let mut response = next.run(req).instrument(span).await;

    response.headers_mut().insert(X_REQUEST_ID.clone(), id);
    response
}
