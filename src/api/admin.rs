// Admin backend routes - /api/admin/v1/...
// Nothing here is wired to the database yet.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{
    api::{envelope::pending, health},
    config::ServiceKind,
    infrastructure::middleware::{rate_limit_middleware, RateLimiter},
};

pub const API_PREFIX: &str = "/api/admin/v1";

fn auth_routes() -> Router {
    Router::new()
        .route("/login", post(pending("Admin login")))
        .route("/logout", post(pending("Admin logout")))
        .route("/refresh", post(pending("Refresh admin session")))
        .route("/me", get(pending("Get current admin")))
}

/// CRUD placeholders for a people collection (professors, students).
fn people_routes(plural: &'static str, create: &'static str, single: [&'static str; 3]) -> Router {
    let [get_one, update, delete] = single;
    Router::new()
        .route("/", get(pending(plural)).post(pending(create)))
        .route(
            "/{id}",
            get(pending(get_one)).put(pending(update)).delete(pending(delete)),
        )
}

fn academic_routes() -> Router {
    Router::new()
        .route("/classes", get(pending("List classes")).post(pending("Create class")))
        .route("/classes/{id}/students", post(pending("Assign students to class")))
        .route("/branches", get(pending("List branches")).post(pending("Create branch")))
        .route("/batches", get(pending("List batches")).post(pending("Create batch")))
        .route(
            "/semesters",
            get(pending("List semesters")).post(pending("Create semester")),
        )
}

/// Full admin backend router: health and the rate-limited API.
pub fn admin_router(limiter: Arc<RateLimiter>) -> Router {
    let api = Router::new()
        .nest("/auth", auth_routes())
        .nest(
            "/professors",
            people_routes(
                "List professors",
                "Create professor",
                ["Get professor", "Update professor", "Delete professor"],
            ),
        )
        .nest(
            "/students",
            people_routes(
                "List students",
                "Create student",
                ["Get student", "Update student", "Delete student"],
            ),
        )
        .nest("/academic", academic_routes())
        .layer(middleware::from_fn_with_state(limiter, rate_limit_middleware));

    Router::new()
        .merge(health::health_routes(ServiceKind::Admin.name()))
        .nest(API_PREFIX, api)
}
