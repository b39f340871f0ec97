// HTTP handlers for task endpoints

use axum::{
    extract::{Query, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    Json,
};

use crate::error::MessageResponse;
use crate::extract::{JsonBody, TaskId};
use crate::tasks::{
    error::TaskError,
    models::{CreateTaskRequest, Task, UpdateTaskRequest},
    query::{TaskFilter, TaskQueryParams},
};
use crate::AppState;

/// Create a task
#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Missing or invalid access token")
    ),
    security(("bearer_auth" = [])),
    tag = "tasks"
)]
pub async fn create_task_handler(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), TaskError> {
    let task = state.tasks.create(request).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// List tasks with pagination, filtering and sorting
///
/// Totals travel in `X-Total-Count`, `X-Total-Pages`, `X-Page` and `X-Limit`.
#[utoipa::path(
    get,
    path = "/api/tasks",
    params(TaskQueryParams),
    responses(
        (status = 200, description = "One page of tasks", body = Vec<Task>),
        (status = 401, description = "Missing or invalid access token")
    ),
    security(("bearer_auth" = [])),
    tag = "tasks"
)]
pub async fn list_tasks_handler(
    State(state): State<AppState>,
    Query(params): Query<TaskQueryParams>,
) -> Result<(HeaderMap, Json<Vec<Task>>), TaskError> {
    let page = state.tasks.list(TaskFilter::from(params)).await?;

    let mut headers = HeaderMap::new();
    for (name, value) in [
        ("x-total-count", page.total.to_string()),
        ("x-total-pages", page.total_pages.to_string()),
        ("x-page", page.page.to_string()),
        ("x-limit", page.limit.to_string()),
    ] {
        if let Ok(value) = HeaderValue::from_str(&value) {
            headers.insert(HeaderName::from_static(name), value);
        }
    }

    Ok((headers, Json(page.items)))
}

/// Get a task by id
#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    params(("id" = i64, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task found", body = Task),
        (status = 400, description = "Invalid ID"),
        (status = 404, description = "Task not found")
    ),
    security(("bearer_auth" = [])),
    tag = "tasks"
)]
pub async fn get_task_handler(
    State(state): State<AppState>,
    TaskId(id): TaskId,
) -> Result<Json<Task>, TaskError> {
    Ok(Json(state.tasks.get(id).await?))
}

/// Partially update a task
#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    params(("id" = i64, Path, description = "Task ID")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated", body = Task),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Task not found")
    ),
    security(("bearer_auth" = [])),
    tag = "tasks"
)]
pub async fn update_task_handler(
    State(state): State<AppState>,
    TaskId(id): TaskId,
    JsonBody(request): JsonBody<UpdateTaskRequest>,
) -> Result<Json<Task>, TaskError> {
    Ok(Json(state.tasks.update(id, request).await?))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    params(("id" = i64, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task deleted", body = MessageResponse),
        (status = 400, description = "Invalid ID"),
        (status = 404, description = "Task not found")
    ),
    security(("bearer_auth" = [])),
    tag = "tasks"
)]
pub async fn delete_task_handler(
    State(state): State<AppState>,
    TaskId(id): TaskId,
) -> Result<Json<MessageResponse>, TaskError> {
    state.tasks.delete(id).await?;
    Ok(Json(MessageResponse::new("task deleted successfully")))
}
