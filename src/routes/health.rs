use axum::routing::get;
use axum::Router;

use crate::handlers::health;
use crate::AppState;

pub fn health_router() -> Router<AppState> {
    Router::new().route("/health", get(health::check))
}
