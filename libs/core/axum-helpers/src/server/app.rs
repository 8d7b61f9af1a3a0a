use super::shutdown::{ShutdownCoordinator, coordinated_shutdown};
use crate::errors::not_found;
use crate::http::{create_cors_layer, security_headers};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::io;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Creates a configured Axum router with common middleware and documentation.
///
/// This function sets up:
/// - Swagger UI at `/swagger-ui`, spec at `/api-docs/openapi.json`
/// - API routes nested under `/api`
/// - Tracing, security headers, CORS and compression layers
/// - 404 fallback handler
///
/// Health endpoints are merged by the app with [`super::health_router`].
///
/// # Errors
/// Returns `InvalidInput` when the configured CORS origins are empty or invalid.
pub fn create_router<T>(apis: Router, server_config: &ServerConfig) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let cors_layer = create_cors_layer(&server_config.cors_allowed_origins)?;
    info!(
        "CORS configured with allowed origins: {}",
        server_config.cors_allowed_origins.join(",")
    );

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .nest("/api", apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer)
        .layer(CompressionLayer::new());

    Ok(router)
}

/// Serves `router` until SIGINT or SIGTERM.
///
/// After the signal, in-flight requests get `server_config.shutdown_timeout`
/// to finish; past that the server is abandoned and the call returns.
///
/// # Errors
/// Returns an error if the listener fails to bind or the server fails while
/// running.
pub async fn create_production_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let (coordinator, mut shutdown_rx) = ShutdownCoordinator::new();
    let shutdown_timeout = server_config.shutdown_timeout;

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let mut server = tokio::spawn(async move {
        axum::serve(listener, router.into_make_service())
            .with_graceful_shutdown(coordinated_shutdown(coordinator))
            .await
            .inspect_err(|e| {
                tracing::error!("Server encountered an error: {:?}", e);
            })
    });

    tokio::select! {
        result = &mut server => return result.map_err(io::Error::other)?,
        _ = shutdown_rx.recv() => {}
    }

    info!("Draining in-flight requests (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, server).await {
        Ok(result) => result.map_err(io::Error::other)?,
        Err(_) => {
            warn!(
                "Shutdown exceeded timeout of {:?}, forcing exit",
                shutdown_timeout
            );
            Ok(())
        }
    }
}
