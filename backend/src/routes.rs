//! Router assembly
//!
//! Public routes (health, register, login, refresh, logout) and protected
//! routes are built separately; only the protected router carries the access
//! token middleware.

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{auth, boards, health, members, tasks, workspaces},
    middleware::jwt_auth_middleware,
    state::AppState,
};

/// Builds the `/api/v1` routes without the outer service layers
pub fn api_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health::health_check))
        .route("/users/create", post(auth::register))
        .route("/users/login", post(auth::login))
        .route("/users/refresh", get(auth::refresh))
        .route("/users/logout", post(auth::logout));

    let protected = Router::new()
        .route("/users/me", get(auth::get_me).patch(auth::update_me))
        .route("/users/delete", delete(auth::delete_me))
        .route("/workspaces", get(workspaces::list_workspaces))
        .route("/workspaces/create", post(workspaces::create_workspace))
        .route(
            "/workspaces/invite/accept/{join_token}",
            post(members::accept_invite),
        )
        .route(
            "/workspaces/{workspace_id}",
            get(workspaces::get_workspace)
                .patch(workspaces::update_workspace)
                .delete(workspaces::delete_workspace),
        )
        .route("/workspaces/{workspace_id}/invite", post(members::create_invite))
        .route("/workspaces/{workspace_id}/members", get(members::list_members))
        .route("/workspaces/{workspace_id}/kick", post(members::kick_member))
        .route("/workspaces/{workspace_id}/promote", post(members::promote_member))
        .route("/workspaces/{workspace_id}/leave", post(members::leave_workspace))
        .route("/workspaces/{workspace_id}/assign", post(members::assign_task))
        // Personal boards and tasks
        .route("/boards", get(boards::list_boards).post(boards::create_board))
        .route(
            "/boards/{board_id}",
            patch(boards::update_board).delete(boards::delete_board),
        )
        .route("/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/tasks/{task_id}",
            patch(tasks::update_task).delete(tasks::delete_task),
        )
        // Workspace boards and tasks
        .route(
            "/workspaces/{workspace_id}/boards",
            get(boards::list_workspace_boards).post(boards::create_workspace_board),
        )
        .route(
            "/workspaces/{workspace_id}/boards/{board_id}",
            patch(boards::update_workspace_board).delete(boards::delete_workspace_board),
        )
        .route(
            "/workspaces/{workspace_id}/tasks",
            get(tasks::list_workspace_tasks).post(tasks::create_workspace_task),
        )
        .route(
            "/workspaces/{workspace_id}/tasks/{task_id}",
            patch(tasks::update_workspace_task).delete(tasks::delete_workspace_task),
        )
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware));

    public.merge(protected)
}

/// Builds the complete application router
///
/// Requests get an `x-request-id` (generated unless the client sent one),
/// which is traced and echoed back in the response.
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}
