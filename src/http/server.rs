//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with a catch-all dispatch handler
//! - Wire up middleware (request ID, tracing, timeout)
//! - Convert requests to `RequestContext`, dispatch, buffer replies
//! - Serve until the shutdown signal fires
//!
//! # Design Decisions
//! - Handler chains are synchronous, so each dispatch runs on the blocking
//!   pool; the async task only awaits it and the timeout layer can cut in

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RouterConfig;
use crate::dispatch::BufferedSink;
use crate::http::request::{into_context, request_id, UuidRequestId};
use crate::http::response::{error_response, into_response};
use crate::routing::Router;

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<Router>,
    pub max_body_bytes: usize,
}

/// HTTP front end for a built [`Router`].
pub struct HttpServer {
    app: axum::Router,
    config: RouterConfig,
}

impl HttpServer {
    pub fn new(config: RouterConfig, router: Router) -> Self {
        let state = AppState {
            router: Arc::new(router),
            max_body_bytes: config.listener.max_body_bytes,
        };
        let app = Self::build_app(&config, state);
        Self { app, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_app(config: &RouterConfig, state: AppState) -> axum::Router {
        axum::Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                    .layer(TraceLayer::new_for_http().make_span_with(make_span))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// The Axum service, for driving requests without a socket.
    pub fn app(&self) -> axum::Router {
        self.app.clone()
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

fn make_span(request: &Request<Body>) -> tracing::Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id(request.headers()),
    )
}

async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request_id(request.headers()).to_string();

    let ctx = match into_context(request, state.max_body_bytes).await {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Rejected request");
            return error_response(&e);
        }
    };

    let router = Arc::clone(&state.router);
    let span = tracing::Span::current();
    let dispatched = tokio::task::spawn_blocking(move || {
        let _entered = span.enter();
        let mut sink = BufferedSink::new();
        let outcome = router.listen(&ctx, &mut sink);
        (ctx, outcome, sink)
    })
    .await;

    let (ctx, outcome, sink) = match dispatched {
        Ok(done) => done,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Dispatch task failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Dispatch failed").into_response();
        }
    };

    if !outcome.matched() {
        tracing::warn!(request_id = %request_id, path = %ctx.path, "No route matched");
    }

    into_response(&outcome, sink)
}
