use axum::{
    extract::{RawQuery, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use url::Url;

mod config;
mod error;
mod extract;
mod fetch;
mod models;

use config::Config;
use error::ScrapeError;
use fetch::Fetcher;

#[derive(Clone)]
struct AppState {
    fetcher: Fetcher,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env()?;
    let state = AppState {
        fetcher: Fetcher::new(config.fetch_timeout)?,
    };

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!("scraper listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/scrape", get(scrape_endpoint))
        .with_state(state)
}

async fn scrape_endpoint(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    match scrape(&state.fetcher, query.as_deref()).await {
        Ok(items) => {
            ([(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")], Json(items)).into_response()
        }
        Err(e) => {
            tracing::warn!(status = %e.status(), error = %e, "scrape failed");
            e.into_response()
        }
    }
}

async fn scrape(fetcher: &Fetcher, query: Option<&str>) -> Result<Vec<models::Item>, ScrapeError> {
    let target = query
        .and_then(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .find(|(key, _)| key == "url")
                .map(|(_, value)| value.into_owned())
        })
        .filter(|t| !t.is_empty())
        .ok_or(ScrapeError::MissingUrl)?;

    let base = Url::parse(&target).map_err(|_| ScrapeError::InvalidUrl)?;
    if !base.has_host() {
        return Err(ScrapeError::InvalidUrl);
    }

    tracing::info!(%target, "fetching target");
    let page = fetcher.fetch(&target).await?;
    if page.is_success() {
        tracing::info!(status = %page.status, "upstream responded");
    } else {
        tracing::warn!(status = %page.status, "upstream responded with error status, parsing anyway");
    }

    let body = page.read_body().await?;
    tracing::info!(bytes = body.len(), "parsing html");
    let items = extract::extract_items(&body, &base);

    tracing::info!(items = items.len(), "scrape succeeded");
    Ok(items)
}
