//! HTTP front end for the mock data store and the weather passthrough.
//!
//! # Design
//! `router` wires the `/data` and `/weather` routes to an `AppState` and
//! wraps them with `with_middleware`: request tracing outermost, panic
//! recovery inside it, so a panicking handler still answers with a JSON
//! 500. `app` builds the same router over a freshly seeded store with no
//! weather credential; the in-process tests use it. `run` serves a router on an already-bound
//! listener and stops when `shutdown` resolves.

use std::future::Future;
use std::sync::Arc;

use axum::{middleware, Router};
use records_core::weather::DEFAULT_BASE_URL;
use records_core::{HttpRequest, HttpResponse, WeatherClient, WeatherError};
use tokio::net::TcpListener;

pub mod config;
pub mod error;
pub mod fetcher;
pub mod logging;
pub mod recover;
pub mod routes;
pub mod state;
pub mod trace;
pub mod weather_service;

pub use config::{LogFormat, ServerConfig};
pub use error::AppError;
pub use fetcher::{ReqwestFetcher, WeatherFetcher};
pub use state::{AppState, Db};
pub use weather_service::WeatherService;

pub fn router(state: AppState) -> Router {
    with_middleware(routes::routes().with_state(state))
}

pub fn with_middleware(router: Router) -> Router {
    router
        .layer(middleware::from_fn(recover::catch_panic))
        .layer(middleware::from_fn(trace::request_tracing))
}

/// Seeded store; weather calls fail with the missing-credential error.
pub fn app() -> Router {
    let client = WeatherClient::new(DEFAULT_BASE_URL, "");
    router(AppState::with_fetcher(client, Arc::new(Unconfigured)))
}

pub async fn run<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Fetcher for a service with no credential; `build_current` fails first, so
/// it is never reached.
struct Unconfigured;

#[async_trait::async_trait]
impl WeatherFetcher for Unconfigured {
    async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, WeatherError> {
        Err(WeatherError::MissingApiKey)
    }
}
