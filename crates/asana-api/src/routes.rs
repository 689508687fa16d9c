//! API route definitions

use crate::auth::middleware::require_auth;
use crate::handlers::{auth, sessions, teachers, users};
use crate::state::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register_handler,
        auth::login_handler,
        auth::me_handler,
        sessions::list_sessions,
        sessions::get_session,
        sessions::create_session,
        sessions::update_session,
        sessions::delete_session,
        sessions::participate,
        sessions::no_longer_participate,
        users::delete_user,
    ),
    components(schemas(
        crate::auth::RegisterRequest,
        crate::auth::LoginRequest,
        crate::auth::TokenResponse,
        crate::handlers::auth::RegisterResponse,
        crate::handlers::sessions::SessionRequest,
        crate::error::ApiError,
    )),
    tags(
        (name = "auth", description = "Registration, login, and profile"),
        (name = "session", description = "Class sessions and rosters"),
        (name = "user", description = "User accounts"),
    )
)]
pub struct ApiDoc;

/// Create API routes
///
/// Public routes carry no identity; everything else sits behind the
/// authentication gate, which attaches `CurrentUser` to the request.
pub fn api_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register_handler))
        .route("/auth/login", post(auth::login_handler));

    // Protected routes (authentication required)
    let protected_routes = Router::new()
        .route("/auth/me", get(auth::me_handler))
        // Session endpoints
        .route(
            "/session",
            get(sessions::list_sessions).post(sessions::create_session),
        )
        .route(
            "/session/:id",
            get(sessions::get_session)
                .put(sessions::update_session)
                .delete(sessions::delete_session),
        )
        .route(
            "/session/:id/participate/:user_id",
            post(sessions::participate).delete(sessions::no_longer_participate),
        )
        // Teacher endpoints
        .route("/teacher", get(teachers::list_teachers))
        .route("/teacher/:id", get(teachers::get_teacher))
        // User endpoints
        .route(
            "/user/:id",
            get(users::get_user).delete(users::delete_user),
        )
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    // Combine routes
    Router::new().merge(public_routes).merge(protected_routes)
}
