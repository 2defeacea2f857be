//! HTTP endpoint for the record catalog
//!
//! One route: `GET /api/data` returns the full memoized collection as
//! `{ data, total }`. There are no query parameters and no pagination; the
//! endpoint is idempotent and always serves the same payload. Handler
//! failures surface as a generic `500 { error }` with no partial data.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::catalog::{Catalog, DataProvider, DataResponse, ErrorResponse};
use crate::error::{QuickPickError, Result};

pub struct AppState {
    pub catalog: Catalog,
}

/// Internal failures map to a generic 500 body; the cause goes to the log
struct AppError(QuickPickError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(cause = %self.0, "data handler failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Internal Server Error".to_string(),
            }),
        )
            .into_response()
    }
}

async fn data_handler(
    State(state): State<Arc<AppState>>,
) -> std::result::Result<Json<DataResponse>, AppError> {
    let records = state.catalog.fetch_all().map_err(AppError)?;

    Ok(Json(DataResponse {
        total: records.len(),
        data: records.as_ref().clone(),
    }))
}

/// Build the application router around a shared catalog
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/data", get(data_handler))
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until ctrl-c or SIGTERM
pub async fn serve(port: u16, catalog: Catalog) -> Result<()> {
    let state = Arc::new(AppState { catalog });
    let app = router(Arc::clone(&state));

    let address = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&address).await?;

    info!(
        "Serving /api/data on {address} ({} records)",
        state.catalog.count()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down");
    Ok(())
}

async fn shutdown_signal() {
    let interrupt = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {},
        _ = terminate => {},
    }
}
