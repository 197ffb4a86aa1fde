//! Router configuration.

use axum::routing::{get, post};
use axum::Router;
use sp_cache::AtomicCacheProvider;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Creates the application router.
pub fn create_router<C: AtomicCacheProvider + 'static>(state: AppState<C>) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/saml/login", get(handlers::saml_login::<C>))
        .route("/saml/acs", post(handlers::saml_acs::<C>))
        .route("/saml/slo", get(handlers::saml_slo::<C>))
        .route("/saml/metadata", get(handlers::saml_metadata::<C>))
        .route("/api/session", get(handlers::session_info::<C>))
        .route("/api/protected", get(handlers::protected::<C>))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
