//! Dev server command implementation with the contact API.

use super::build::build_site_with_content;
use crate::relay::{relay_from_config, send_contact_message};
use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::{rejection::JsonRejection, RawQuery, State},
    http::{header, HeaderValue, Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Datelike;
use folio_core::{Config, ContactMessage, ContactRelay, ContentStore, ResearchView};
use folio_render::{EmailContext, SitePages};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::{mpsc, RwLock};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub(crate) struct AppState {
    output_dir: PathBuf,
    data: Arc<RwLock<SiteData>>,
    relay: Arc<dyn ContactRelay>,
}

pub(crate) struct SiteData {
    config: Config,
    content: ContentStore,
}

/// Start development server with file watching
pub async fn dev_server(config_path: &Path, port: Option<u16>) -> Result<()> {
    // Initial build
    let (config, content) = build_site_with_content(config_path).context("Failed to build site")?;
    let port = port.unwrap_or(config.server.port);
    let output_dir = config.output_dir();
    let targets = watch_targets(&config, config_path);
    let relay = relay_from_config(&config).context("Failed to configure contact relay")?;
    tracing::info!("Contact relay: {}", relay.name());

    let shared_data = Arc::new(RwLock::new(SiteData { config, content }));

    // Set up file watching for live rebuilds
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut _watcher = RecommendedWatcher::new(
        move |res| {
            let _ = tx.send(res);
        },
        notify::Config::default(),
    )
    .context("Failed to initialize file watcher")?;

    for (path, mode) in &targets {
        _watcher
            .watch(path, *mode)
            .with_context(|| format!("Failed to watch {:?}", path))?;
    }

    let config_path_buf = config_path.to_path_buf();
    tokio::spawn({
        let data_handle = shared_data.clone();
        async move {
            while let Some(event) = rx.recv().await {
                match event {
                    Ok(_ev) => {
                        // Debounce a bit by draining pending events
                        while rx.try_recv().is_ok() {}
                        tracing::info!("Change detected, rebuilding site...");
                        let res = tokio::task::spawn_blocking({
                            let config_path = config_path_buf.clone();
                            move || build_site_with_content(&config_path)
                        })
                        .await;

                        match res {
                            Ok(Ok((config, content))) => {
                                let mut data = data_handle.write().await;
                                *data = SiteData { config, content };
                                tracing::info!("Rebuild complete");
                            }
                            Ok(Err(e)) => tracing::error!("Rebuild failed: {:?}", e),
                            Err(e) => tracing::error!("Rebuild task panicked: {}", e),
                        }
                    }
                    Err(err) => tracing::warn!("Watcher error: {}", err),
                }
            }
        }
    });

    let app = {
        let allowed_origin = shared_data.read().await.config.contact.allowed_origin.clone();
        router(
            AppState {
                output_dir,
                data: shared_data.clone(),
                relay,
            },
            &allowed_origin,
        )
    };

    tracing::info!("Starting dev server on http://localhost:{}", port);
    println!("\nServing at http://localhost:{}", port);
    println!("   Press Ctrl+C to stop\n");

    let addr = format!("127.0.0.1:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Paths whose changes trigger a rebuild: the config file, the data
/// directory, and the assets directory when configured.
fn watch_targets(config: &Config, config_path: &Path) -> Vec<(PathBuf, RecursiveMode)> {
    let mut targets = vec![(config_path.to_path_buf(), RecursiveMode::NonRecursive)];

    let data_dir = config.data_dir();
    if data_dir.exists() {
        targets.push((data_dir, RecursiveMode::Recursive));
    } else {
        tracing::warn!("Data directory {:?} does not exist; not watching", data_dir);
    }

    if let Some(assets) = config.assets_dir().filter(|dir| dir.exists()) {
        targets.push((assets, RecursiveMode::Recursive));
    }

    targets
}

pub(crate) fn router(state: AppState, allowed_origin: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin(allowed_origin))
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let api = Router::new()
        .route("/api/contact", post(api_contact))
        .layer(cors);

    Router::new()
        .merge(api)
        .route("/research", get(research_view))
        .route("/", get(serve_index))
        .route("/{*path}", get(serve_with_404))
        .fallback(serve_404)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_origin(allowed: &str) -> AllowOrigin {
    if allowed.trim() == "*" {
        return AllowOrigin::any();
    }
    match HeaderValue::from_str(allowed.trim()) {
        Ok(origin) => AllowOrigin::exact(origin),
        Err(_) => {
            tracing::warn!("Invalid contact.allowed_origin {:?}; allowing any", allowed);
            AllowOrigin::any()
        }
    }
}

/// Serve index.html for root path
async fn serve_index(State(state): State<AppState>) -> Response {
    let index_path = state.output_dir.join("index.html");
    match fs::read_to_string(&index_path).await {
        Ok(content) => Html(content).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Index not found").into_response(),
    }
}

/// Serve files with custom 404 handling; directory paths map to index.html
async fn serve_with_404(State(state): State<AppState>, uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    if path.split('/').any(|segment| segment == "..") {
        return serve_404_inner(&state).await;
    }

    let mut file_path = state.output_dir.join(path);
    let is_dir = fs::metadata(&file_path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);
    if path.is_empty() || path.ends_with('/') || is_dir {
        file_path = file_path.join("index.html");
    }

    match fs::read(&file_path).await {
        Ok(content) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, content_type_for_path(&file_path))],
            content,
        )
            .into_response(),
        Err(_) => serve_404_inner(&state).await,
    }
}

/// Serve custom 404 page
async fn serve_404(State(state): State<AppState>) -> Response {
    serve_404_inner(&state).await
}

async fn serve_404_inner(state: &AppState) -> Response {
    let not_found_path = state.output_dir.join("404.html");

    match fs::read_to_string(&not_found_path).await {
        Ok(content) => (StatusCode::NOT_FOUND, Html(content)).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, Body::from("404 Not Found")).into_response(),
    }
}

/// Render a research view straight from the query string
async fn research_view(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let view = ResearchView::from_query(query.as_deref().unwrap_or_default());
    let data = state.data.read().await;
    let pages = SitePages::new(&data.config, &data.content, chrono::Utc::now().year());

    match pages.research(&view) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render research view {:?}: {}", view, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

async fn api_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactMessage>, JsonRejection>,
) -> Response {
    let Json(message) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::debug!("Rejected contact payload: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid request body" })),
            )
                .into_response();
        }
    };

    let emails = {
        let data = state.data.read().await;
        EmailContext::from_config(&data.config)
    };

    match send_contact_message(state.relay.as_ref(), &emails, &message).await {
        Ok(_) => Json(json!({
            "success": true,
            "message": "Your message has been sent successfully!"
        }))
        .into_response(),
        Err(e) if e.is_client_error() => {
            (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))).into_response()
        }
        Err(e) => {
            tracing::error!("Error processing contact form: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to send message. Please try again later." })),
            )
                .into_response()
        }
    }
}

fn content_type_for_path(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("xml") => "application/xml",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}
