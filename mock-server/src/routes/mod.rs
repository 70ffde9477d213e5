use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub mod data;
pub mod weather;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/data",
            get(data::read_data)
                .post(data::create_data)
                .put(data::update_data)
                .delete(data::delete_data),
        )
        .route(
            "/weather",
            get(weather::current_weather).post(weather::batch_weather),
        )
}
