//! Gatehouse HTTP: axum adapter for the Gatehouse Basic-auth gate.
//!
//! Wraps an arbitrary downstream [`Router`] so every request passes through:
//! - request-ID tagging and tracing spans
//! - HTTP Basic authentication against the [`AuthGate`]

pub mod error;
pub mod middleware;

use axum::Router;
use gatehouse_service::AuthGate;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Puts every route of `downstream` behind the gate.
pub fn protect(downstream: Router, gate: AuthGate) -> Router {
    downstream
        .layer(axum::middleware::from_fn_with_state(
            gate,
            middleware::auth::basic_auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(
            middleware::request_id::request_id_middleware,
        ))
}

/// Serve the router on the given listener with graceful shutdown.
pub async fn serve(
    listener: tokio::net::TcpListener,
    app: Router,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::routing::get;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use gatehouse_service::{
        ConfigError, ConfigProvider, CredentialSet, HashError, PasswordHasher,
        StaticConfigProvider,
    };
    use tower::ServiceExt;

    use super::*;

    struct PlainHasher;

    impl PasswordHasher for PlainHasher {
        fn compare(&self, hash: &str, plaintext: &str) -> bool {
            hash == plaintext
        }

        fn cost(&self, _hash: &str) -> Result<u32, HashError> {
            Ok(0)
        }
    }

    struct BrokenProvider;

    impl ConfigProvider for BrokenProvider {
        fn load(&self) -> Result<CredentialSet, ConfigError> {
            Err(ConfigError::Read {
                path: "web.yml".into(),
                source: std::io::Error::other("gone"),
            })
        }
    }

    fn app(provider: Arc<dyn ConfigProvider>) -> Router {
        let gate = AuthGate::new(provider, Arc::new(PlainHasher), 16);
        protect(Router::new().route("/", get(|| async { "downstream" })), gate)
    }

    fn request(auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/");
        if let Some(raw) = auth {
            builder = builder.header(
                header::AUTHORIZATION,
                format!("Basic {}", STANDARD.encode(raw)),
            );
        }
        builder.body(Body::empty()).unwrap()
    }

    fn alice() -> Arc<dyn ConfigProvider> {
        Arc::new(StaticConfigProvider::new(
            CredentialSet::new().with_user("alice", "secret"),
        ))
    }

    #[tokio::test]
    async fn forwards_valid_credentials() {
        let resp = app(alice()).oneshot(request(Some("alice:secret"))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"downstream");
    }

    #[tokio::test]
    async fn rejects_with_basic_challenge() {
        let resp = app(alice()).oneshot(request(Some("alice:nope"))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(resp.headers()[header::WWW_AUTHENTICATE], "Basic");
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Unauthorized");
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let resp = app(alice()).oneshot(request(None)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(resp.headers()[header::WWW_AUTHENTICATE], "Basic");
    }

    #[tokio::test]
    async fn config_failure_is_internal_error() {
        let resp = app(Arc::new(BrokenProvider))
            .oneshot(request(Some("alice:secret")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(resp.headers().get(header::WWW_AUTHENTICATE).is_none());
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Internal Server Error");
    }

    #[tokio::test]
    async fn request_id_echoed_on_rejection() {
        let mut req = request(None);
        req.headers_mut()
            .insert("x-request-id", "trace-me".parse().unwrap());
        let resp = app(alice()).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(resp.headers()["x-request-id"], "trace-me");
    }

    /// Records the name of the span that is current during each compare.
    #[derive(Default)]
    struct SpanRecordingHasher {
        spans: parking_lot::Mutex<Vec<Option<&'static str>>>,
    }

    impl PasswordHasher for SpanRecordingHasher {
        fn compare(&self, hash: &str, plaintext: &str) -> bool {
            let name = tracing::Span::current().metadata().map(|m| m.name());
            self.spans.lock().push(name);
            hash == plaintext
        }

        fn cost(&self, _hash: &str) -> Result<u32, HashError> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn gate_runs_inside_request_span() {
        let _ = tracing::subscriber::set_global_default(tracing_subscriber::registry());

        let hasher = Arc::new(SpanRecordingHasher::default());
        let gate = AuthGate::new(alice(), hasher.clone(), 16);
        let app = protect(Router::new().route("/", get(|| async { "downstream" })), gate);

        let resp = app.oneshot(request(Some("alice:secret"))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(*hasher.spans.lock(), vec![Some("request")]);
    }

    #[tokio::test]
    async fn request_id_generated_when_absent() {
        let resp = app(alice()).oneshot(request(Some("alice:secret"))).await.unwrap();
        let id = resp.headers()["x-request-id"].to_str().unwrap();
        assert_eq!(id.len(), 36);
    }
}
