//! Application setup and router configuration.

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::kernel::{Services, Stores};
use crate::server::routes::{
    clans_by_community, create_clan, create_community, create_user, get_clan, get_community,
    get_user, health_handler, invite_to_clan, join_clan, join_community, kick_member, leave_clan,
    pending_invitations, respond_invitation,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub services: Services,
}

/// Build the Axum application router over the given stores.
///
/// The pool is kept on the state for the health check; all domain operations
/// go through the services, which only see the injected store interface.
pub fn build_app(pool: PgPool, stores: Stores) -> Router {
    let state = AppState {
        db_pool: pool,
        services: Services::new(stores),
    };

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/communities", post(create_community))
        .route("/communities/:id", get(get_community))
        .route("/communities/:id/clans", get(clans_by_community))
        .route("/clans", post(create_clan))
        .route("/clans/:id", get(get_clan))
        .route("/clans/:id/kick", post(kick_member))
        .route("/clans/:id/invitations", post(invite_to_clan))
        .route("/clans/:id/invitations/pending", get(pending_invitations))
        .route("/users", post(create_user))
        .route("/users/:id", get(get_user))
        .route("/users/:id/join-community", post(join_community))
        .route("/users/:id/join-clan", post(join_clan))
        .route("/users/:id/leave-clan", post(leave_clan))
        .route("/invitations/:id/respond", post(respond_invitation))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
