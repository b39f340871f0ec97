use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::tasks::{
    error::TaskError,
    models::{CreateTaskRequest, Task, TaskPage, UpdateTaskRequest},
    query::TaskFilter,
    repository::TaskRepository,
};
use crate::validation::format_validation_errors;

/// Service layer for task business logic
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, request: CreateTaskRequest) -> Result<Task, TaskError> {
        request
            .validate()
            .map_err(|e| TaskError::Validation(format_validation_errors(&e)))?;

        let task = self
            .repository
            .create(&request.title, &request.description)
            .await?;

        info!("Created task {}", task.id);
        Ok(task)
    }

    /// List one page; `total` honours the same `completed` filter as the page
    pub async fn list(&self, filter: TaskFilter) -> Result<TaskPage, TaskError> {
        let filter = filter.normalized();
        let items = self.repository.list(&filter).await?;
        let total = self.repository.count(filter.completed).await?;
        let limit = i64::from(filter.limit);

        Ok(TaskPage {
            items,
            total,
            total_pages: (total + limit - 1) / limit,
            page: filter.page,
            limit: filter.limit,
        })
    }

    pub async fn get(&self, id: i64) -> Result<Task, TaskError> {
        check_id(id)?;
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound)
    }

    /// Partial update; returns the stored result
    pub async fn update(&self, id: i64, request: UpdateTaskRequest) -> Result<Task, TaskError> {
        check_id(id)?;
        request
            .validate()
            .map_err(|e| TaskError::Validation(format_validation_errors(&e)))?;

        let mut task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound)?;
        request.apply(&mut task);

        let updated = self
            .repository
            .update(&task)
            .await?
            .ok_or(TaskError::NotFound)?;

        info!("Updated task {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), TaskError> {
        check_id(id)?;
        if !self.repository.delete(id).await? {
            return Err(TaskError::NotFound);
        }

        info!("Deleted task {}", id);
        Ok(())
    }
}

fn check_id(id: i64) -> Result<(), TaskError> {
    if id <= 0 {
        return Err(TaskError::InvalidId);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::memory::InMemoryTaskRepository;
    use crate::tasks::query::{SortField, SortOrder};

    fn service() -> TaskService {
        TaskService::new(Arc::new(InMemoryTaskRepository::new()))
    }

    fn create_req(title: &str) -> CreateTaskRequest {
        CreateTaskRequest {
            title: title.to_string(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = service();
        let task = service.create(create_req("first")).await.unwrap();

        assert!(!task.completed);
        assert_eq!(service.get(task.id).await.unwrap(), task);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_title() {
        let result = service().create(create_req("")).await;
        assert!(matches!(result, Err(TaskError::Validation(msg)) if msg.contains("title")));
    }

    #[tokio::test]
    async fn test_invalid_and_missing_ids() {
        let service = service();
        assert!(matches!(service.get(0).await, Err(TaskError::InvalidId)));
        assert!(matches!(service.get(-5).await, Err(TaskError::InvalidId)));
        assert!(matches!(service.get(42).await, Err(TaskError::NotFound)));
        assert!(matches!(
            service.update(42, UpdateTaskRequest::default()).await,
            Err(TaskError::NotFound)
        ));
        assert!(matches!(service.delete(42).await, Err(TaskError::NotFound)));
    }

    #[tokio::test]
    async fn test_partial_update() {
        let service = service();
        let task = service.create(create_req("draft")).await.unwrap();

        let updated = service
            .update(
                task.id,
                UpdateTaskRequest {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "draft");
        assert!(updated.completed);
        assert!(updated.updated_at >= task.updated_at);
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let service = service();
        let task = service.create(create_req("temp")).await.unwrap();

        service.delete(task.id).await.unwrap();
        assert!(matches!(service.get(task.id).await, Err(TaskError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_paginates_filters_and_sorts() {
        let service = service();
        for title in ["c", "a", "e", "b", "d"] {
            service.create(create_req(title)).await.unwrap();
        }
        service
            .update(
                2,
                UpdateTaskRequest {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let page = service
            .list(TaskFilter {
                sort: SortField::Title,
                order: SortOrder::Desc,
                limit: 2,
                page: 1,
                ..Default::default()
            })
            .await
            .unwrap();
        let titles: Vec<_> = page.items.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["e", "d"]);
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 3);

        let last = service
            .list(TaskFilter {
                limit: 2,
                page: 3,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(last.items.len(), 1);

        let done = service
            .list(TaskFilter {
                completed: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(done.total, 1);
        assert_eq!(done.items[0].title, "a");
    }

    #[tokio::test]
    async fn test_list_with_zero_limit_falls_back_to_default_page() {
        let service = service();
        for title in ["x", "y", "z"] {
            service.create(create_req(title)).await.unwrap();
        }

        let page = service
            .list(TaskFilter {
                page: 0,
                limit: 0,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 10);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.items.len(), 3);
    }
}
