/**
 * API Routes
 *
 * This module defines the authenticated API surface.
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /api/auth/logout` - Revoke the presented token
 * - `GET /api/auth/user` - Get current user info
 * - `GET /api/auth/users` - Find users (`?username=`)
 *
 * ## Projects
 * - `GET|POST /api/projects`
 * - `GET|PUT|PATCH|DELETE /api/projects/{id}`
 * - `GET /api/projects/{id}/users`
 * - `POST /api/projects/{id}/add-user`
 * - `DELETE /api/projects/{id}/remove-user/{user_id}`
 * - `PATCH /api/projects/{id}/update-role/{user_id}`
 * - `GET /api/projects/{id}/comments`
 * - `POST /api/projects/{id}/add-comment`
 *
 * Every route added here expects the auth middleware to have run; see
 * `router::create_router`.
 */

use axum::routing::{delete, get, patch, post};
use axum::Router;

use crate::backend::auth::{get_me, logout, search_users};
use crate::backend::projects::handlers as projects;
use crate::backend::server::state::AppState;

/// Configure authenticated account routes
pub fn configure_auth_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/user", get(get_me))
        .route("/api/auth/users", get(search_users))
}

/// Configure project routes
pub fn configure_project_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/api/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/api/projects/{id}",
            get(projects::get_project)
                .put(projects::replace_project)
                .patch(projects::patch_project)
                .delete(projects::delete_project),
        )
        .route("/api/projects/{id}/users", get(projects::list_members))
        .route("/api/projects/{id}/add-user", post(projects::add_member))
        .route(
            "/api/projects/{id}/remove-user/{user_id}",
            delete(projects::remove_member),
        )
        .route(
            "/api/projects/{id}/update-role/{user_id}",
            patch(projects::update_member_role),
        )
        .route("/api/projects/{id}/comments", get(projects::list_comments))
        .route("/api/projects/{id}/add-comment", post(projects::add_comment))
}

/// Configure every authenticated API route
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    configure_project_routes(configure_auth_routes(router))
}
