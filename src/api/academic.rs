// Academic backend routes - /api/academic/v1/...

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    middleware,
    routing::{get, patch, post},
    Json, Router,
};
use std::sync::Arc;

use crate::{
    api::{envelope::pending, health, ApiResponse},
    app_state::AppState,
    error::{AppError, AppResult},
    infrastructure::middleware::{rate_limit_middleware, RateLimiter},
    services::{user_id_from_query, ProfessorProfileDto, StudentProfileDto},
};

pub const API_PREFIX: &str = "/api/academic/v1";

/// Raw query pairs. Malformed query strings become a validation error in the
/// JSON envelope rather than axum's plain-text rejection.
type ProfileQuery = Result<Query<Vec<(String, String)>>, QueryRejection>;

fn profile_user_id(query: ProfileQuery) -> AppResult<uuid::Uuid> {
    let Query(pairs) = query.map_err(|e| AppError::Validation(format!("Invalid query string: {}", e)))?;
    user_id_from_query(&pairs)
}

pub async fn student_profile_handler(
    State(state): State<AppState>,
    query: ProfileQuery,
) -> AppResult<Json<ApiResponse<StudentProfileDto>>> {
    let user_id = profile_user_id(query)?;
    let profile = state.profiles.resolve_student(user_id).await?;
    Ok(Json(ApiResponse::ok(profile)))
}

pub async fn professor_profile_handler(
    State(state): State<AppState>,
    query: ProfileQuery,
) -> AppResult<Json<ApiResponse<ProfessorProfileDto>>> {
    let user_id = profile_user_id(query)?;
    let profile = state.profiles.resolve_professor(user_id).await?;
    Ok(Json(ApiResponse::ok(profile)))
}

fn timetable_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(pending("Get timetable")).post(pending("Create timetable entry")),
        )
        .route("/class/{class_id}", get(pending("Get class timetable")))
        .route("/professor/{professor_id}", get(pending("Get professor timetable")))
}

fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/sessions",
            get(pending("List attendance sessions")).post(pending("Create attendance session")),
        )
        .route("/sessions/{id}/mark", post(pending("Mark attendance")))
        .route("/student/{student_id}", get(pending("Get student attendance")))
}

fn marks_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pending("Get marks")).post(pending("Record marks")))
        .route("/student/{student_id}", get(pending("Get student marks")))
}

fn group_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pending("List groups")).post(pending("Create group")))
        .route("/{id}", get(pending("Get group")))
}

fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(pending("List notifications")).post(pending("Send notification")),
        )
        .route("/{id}/read", patch(pending("Mark notification as read")))
}

fn professor_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(professor_profile_handler))
        .route("/classes", get(pending("Get professor classes")))
}

fn student_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(student_profile_handler))
        .route("/attendance", get(pending("Get student attendance summary")))
        .route("/marks", get(pending("Get student marks summary")))
        .route("/timetable", get(pending("Get student timetable")))
}

/// Full academic backend router: health, readiness, and the rate-limited API.
pub fn academic_router(state: AppState, limiter: Arc<RateLimiter>) -> Router {
    let api = Router::new()
        .nest("/timetable", timetable_routes())
        .nest("/attendance", attendance_routes())
        .nest("/marks", marks_routes())
        .nest("/groups", group_routes())
        .nest("/notifications", notification_routes())
        .nest("/professor", professor_routes())
        .nest("/student", student_routes())
        .layer(middleware::from_fn_with_state(limiter, rate_limit_middleware));

    Router::new()
        .merge(health::health_routes(state.config.service.kind.name()))
        .route("/health/ready", get(health::readiness_handler))
        .nest(API_PREFIX, api)
        .with_state(state)
}
