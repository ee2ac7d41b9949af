use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderName, Method, Request, Response},
    middleware, Router,
};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{MakeSpan, OnRequest, OnResponse, TraceLayer},
};
use tracing::{info, Span};

use crate::{
    web::{midware, routes::routes, REQUEST_ID_HEADER},
    App, Result,
};

/// The core async function returning a future that will serve this application.
///
/// Sets up request ids, a TraceLayer that provides console logging, the response mapper and CORS.
/// Resolves once a shutdown signal was received and in-flight requests finished.
pub async fn serve(app: App) -> Result<()> {
    let App {
        app_state,
        listener,
    } = app;

    let app = build_router(app_state);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("{:<20} - Server stopped", "serve");
    Ok(())
}

/// The full application router with every middleware layer applied.
pub fn build_router(app_state: crate::AppState) -> Router {
    let x_request_id: HeaderName = HeaderName::from_static(REQUEST_ID_HEADER);

    let trace_layer = build_trace_layer();

    Router::new().merge(routes(app_state)).layer(
        ServiceBuilder::new()
            // Set UUID per request
            .layer(SetRequestIdLayer::new(
                x_request_id.clone(),
                MakeRequestUuid,
            ))
            // Responses go through the stack from the bottom up. The mapper replaces error responses,
            // so propagation has to sit above it or the header would be lost.
            .layer(PropagateRequestIdLayer::new(x_request_id))
            .layer(trace_layer)
            .layer(build_cors_layer())
            .layer(middleware::map_response(midware::response_mapper)),
    )
}

/// Browsers on other origins may post to the subscribe endpoint.
fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// A helper function that sets up the `tower_http::TraceLayer` - tracing configuration.
fn build_trace_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    impl MakeSpan<Body> + Clone,
    impl OnRequest<Body> + Clone,
    impl OnResponse<Body> + Clone,
> {
    TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            let uuid = req
                .headers()
                .get(REQUEST_ID_HEADER)
                .map(|uuid| uuid.to_str().unwrap_or("").to_string());

            tracing::error_span!(
                "serve",
                id = uuid,
                method = req.method().to_string(),
                path = req.uri().path()
            )
        })
        .on_request(|req: &Request<Body>, _s: &Span| tracing::info!("START @ {}", req.uri()))
        .on_response(|res: &Response<Body>, latency: Duration, _s: &Span| {
            let st_code = res.status().as_u16();

            if (400..=599).contains(&st_code) {
                tracing::error!("END in: {:?} - STATUS: {st_code}", latency)
            } else {
                tracing::info!("END in: {:?} - STATUS: {st_code}", latency)
            }
        })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(er) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {er}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(er) => {
                tracing::error!("failed to install SIGTERM handler: {er}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("{:<20} - Shutdown signal received", "serve");
}
