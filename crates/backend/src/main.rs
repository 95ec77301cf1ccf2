mod data;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderValue;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing_subscriber::EnvFilter;

use data::Catalog;

/// The data set grows by one file per weekday, so clients may cache for an
/// hour but must revalidate.
const CACHE_1HOUR: &str = "public, max-age=3600, must-revalidate";
const CACHE_IMMUTABLE: &str = "public, max-age=31536000, immutable";

/// Build a cache-controlled static file router.
///
/// Separated so tests can exercise the caching layer with arbitrary
/// directories.
fn cached_static_router(dir: &Path, cache_header: &'static str) -> Router {
    let layer = SetResponseHeaderLayer::overriding(
        axum::http::header::CACHE_CONTROL,
        HeaderValue::from_static(cache_header),
    );
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(layer)
}

async fn list_dates(State(catalog): State<Arc<Catalog>>) -> Json<Vec<String>> {
    Json(catalog.resource_keys())
}

/// Build the full application router.
fn build_app(catalog: Arc<Catalog>, data_dir: &Path, dist_dir: &Path) -> Router {
    // Static file routers are stateless, merge them before adding app state
    let static_files = Router::new()
        .nest("/data", cached_static_router(data_dir, CACHE_1HOUR))
        .nest("/dist", cached_static_router(dist_dir, CACHE_IMMUTABLE))
        .nest(
            "/assets",
            cached_static_router(&dist_dir.join("assets"), CACHE_IMMUTABLE),
        );

    Router::new()
        .route("/api/dates", get(list_dates))
        .route("/", get(serve_index))
        .with_state(catalog)
        .merge(static_files)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}

async fn serve_index() -> Html<String> {
    // Try to serve the built frontend, fall back to a simple message
    match std::fs::read_to_string("dist/index.html") {
        Ok(html) => Html(html),
        Err(_) => Html(
            r#"<!DOCTYPE html>
<html>
<head><title>Tempomap Essen</title></head>
<body>
<h1>Tempomap Essen</h1>
<p>Frontend not built yet. The per-date GeoJSON files are served under <code>/data/</code>.</p>
</body>
</html>"#
                .to_string(),
        ),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_dir =
        PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()));
    let catalog = Arc::new(Catalog::scan(&data_dir));

    let app = build_app(catalog, &data_dir, Path::new("dist"));

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", port);
    tracing::info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
