use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A to-do item
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema, PartialEq)]
pub struct Task {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Write release notes")]
    pub title: String,
    #[schema(example = "Cover the token changes")]
    pub description: String,
    #[schema(example = false)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of POST /api/tasks
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "Write release notes")]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: String,
}

/// Body of PUT /api/tasks/{id}; omitted fields keep their value
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl UpdateTaskRequest {
    /// Apply the provided fields onto `task`
    pub fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}

/// One page of tasks plus totals for the pagination headers
#[derive(Debug, Clone)]
pub struct TaskPage {
    pub items: Vec<Task>,
    pub total: i64,
    pub total_pages: i64,
    pub page: u32,
    pub limit: u32,
}
