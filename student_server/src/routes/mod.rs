//! Student HTTP routes — the explicit route table and its axum adapters.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;

use crate::error::{ApiError, ApiResult};
use crate::handlers::StudentHandler;
use crate::models::student::Student;

/// Shared state for student route handlers.
#[derive(Clone)]
pub struct StudentRouterState {
    pub handler: StudentHandler,
}

impl StudentRouterState {
    pub fn new(handler: StudentHandler) -> Self {
        Self { handler }
    }
}

/// Build the student API router.
pub fn student_router(state: StudentRouterState) -> Router {
    Router::new()
        .route("/student", get(list_students).post(create_student))
        .route(
            "/student/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .with_state(state)
}

/// Encode the outcome and count it.
fn respond<T: IntoResponse>(operation: &'static str, result: ApiResult<T>) -> Response {
    let response = result.into_response();
    crate::metrics::request_completed(operation, response.status().as_u16());
    response
}

fn decode(payload: Result<Json<Student>, JsonRejection>) -> ApiResult<Student> {
    payload.map(|Json(student)| student).map_err(ApiError::from)
}

async fn list_students(State(state): State<StudentRouterState>) -> Response {
    respond("list", state.handler.list().await.map(Json))
}

async fn get_student(State(state): State<StudentRouterState>, Path(id): Path<i64>) -> Response {
    respond("get", state.handler.get(id).await.map(Json))
}

async fn create_student(
    State(state): State<StudentRouterState>,
    payload: Result<Json<Student>, JsonRejection>,
) -> Response {
    let result = match decode(payload) {
        Ok(student) => state.handler.create(student).await,
        Err(e) => Err(e),
    };

    let result = result.map(|saved| {
        let location = saved
            .id
            .and_then(|id| HeaderValue::from_str(&format!("/student/{id}")).ok());
        let mut response = (StatusCode::CREATED, Json(saved)).into_response();
        if let Some(location) = location {
            response.headers_mut().insert(header::LOCATION, location);
        }
        response
    });
    respond("create", result)
}

async fn update_student(
    State(state): State<StudentRouterState>,
    Path(id): Path<i64>,
    payload: Result<Json<Student>, JsonRejection>,
) -> Response {
    respond(
        "update",
        state.handler.update(id, decode(payload)).await.map(Json),
    )
}

async fn delete_student(
    State(state): State<StudentRouterState>,
    Path(id): Path<i64>,
) -> Response {
    respond("delete", state.handler.delete(id).await.map(|()| StatusCode::OK))
}
