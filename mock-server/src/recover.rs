use std::any::Any;
use std::panic::AssertUnwindSafe;

use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use futures::FutureExt;

use crate::error::AppError;

pub const UNHANDLED_MESSAGE: &str = "Internal server error";

/// Turn a panic anywhere below this layer into a JSON 500.
pub async fn catch_panic(request: Request<Body>, next: Next) -> Response {
    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(payload) => {
            tracing::error!(panic = panic_message(payload.as_ref()), "handler panicked");
            AppError::Unhandled {
                message: UNHANDLED_MESSAGE.to_string(),
            }
            .into_response()
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
