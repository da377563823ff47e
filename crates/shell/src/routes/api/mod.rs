//! JSON API.
//!
//! Every endpoint passes the access gate; anonymous requests get `401`.

pub mod notifications;
pub mod preferences;
pub mod snapshot;
pub mod toasts;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(snapshot::router())
        .merge(notifications::router())
        .merge(toasts::router())
        .merge(preferences::router())
}
