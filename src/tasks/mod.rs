// Task CRUD behind the auth gate

pub mod error;
pub mod handlers;
pub mod models;
pub mod query;
pub mod repository;
pub mod service;

#[cfg(test)]
pub(crate) mod memory;

pub use error::TaskError;
pub use models::{CreateTaskRequest, Task, TaskPage, UpdateTaskRequest};
pub use query::{SortField, SortOrder, TaskFilter, TaskQueryParams};
pub use repository::{PgTaskRepository, TaskRepository};
pub use service::TaskService;
