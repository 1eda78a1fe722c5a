use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::charts::{self, DashboardData};
use crate::cli::ServeArgs;
use crate::page;
use crate::pipeline;
use crate::storage::{DatasetPaths, file_present_nonempty};
use crate::transform::RegionFilter;

#[derive(Clone)]
struct AppState {
    paths: Arc<DatasetPaths>,
    region: Arc<RegionFilter>,
}

pub async fn run(opts: ServeArgs) -> anyhow::Result<()> {
    let paths = DatasetPaths::new(&opts.data_dir);
    for path in paths.all() {
        if !file_present_nonempty(path) {
            return Err(anyhow!(
                "Source dataset missing or empty at {}",
                path.display()
            ));
        }
    }

    let state = AppState {
        paths: Arc::new(paths),
        region: Arc::new(RegionFilter::from(opts.region.clone())),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(dashboard_page))
        .route("/api/dashboard", get(api_dashboard))
        .layer(cors)
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", opts.host, opts.port)
        .parse()
        .context("parse host:port")?;

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

// The pipeline reruns on every request; nothing is cached between renders.
fn build(st: &AppState) -> anyhow::Result<DashboardData> {
    let output = pipeline::run(&st.paths, &st.region)?;
    charts::build_dashboard(&output)
}

async fn dashboard_page(State(st): State<AppState>) -> impl IntoResponse {
    match build(&st).and_then(|data| page::render_page(&data)) {
        Ok(html) => Html(html).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")).into_response(),
    }
}

async fn api_dashboard(State(st): State<AppState>) -> impl IntoResponse {
    match build(&st) {
        Ok(data) => Json(data).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")).into_response(),
    }
}
