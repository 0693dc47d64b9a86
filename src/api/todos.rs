use actix_web::{delete, get, patch, post, web, HttpResponse};

use crate::api::error::ApiError;
use crate::api::validation;
use crate::models::todo::{JsonObject, NewTodo, SuccessResponse};
use crate::repository::{RepositoryResult, TodoRepository};

type Repository = web::Data<dyn TodoRepository>;

/// Runs one repository call on the blocking pool. `failure` is the message
/// the caller sees if the store fails.
async fn run<T, F>(repository: Repository, failure: &'static str, call: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&dyn TodoRepository) -> RepositoryResult<T> + Send + 'static,
{
    let repository = repository.into_inner();
    web::block(move || call(&*repository))
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "blocking task failed");
            ApiError::Internal(failure)
        })?
        .map_err(|err| ApiError::from_repository(err, failure))
}

#[get("/todos")]
#[tracing::instrument(name = "list_todos", skip_all)]
pub async fn list_todos(repository: Repository) -> Result<HttpResponse, ApiError> {
    let todos = run(repository, "Failed to fetch todos", |repo| repo.list_todos()).await?;
    Ok(HttpResponse::Ok().json(todos))
}

#[post("/todos")]
#[tracing::instrument(name = "create_todo", skip_all)]
pub async fn create_todo(
    repository: Repository,
    body: web::Json<JsonObject>,
) -> Result<HttpResponse, ApiError> {
    let title = validation::title(body.get("title"))?;
    let todo = run(repository, "Failed to create todo", move |repo| {
        repo.create_todo(NewTodo::new(title))
    })
    .await?;
    tracing::info!(todo_id = todo.id, "created todo");
    Ok(HttpResponse::Created().json(todo))
}

#[patch("/todos/{id}")]
#[tracing::instrument(name = "set_completed", skip(repository, body))]
pub async fn set_completed(
    repository: Repository,
    id: web::Path<String>,
    body: web::Json<JsonObject>,
) -> Result<HttpResponse, ApiError> {
    let todo_id = validation::todo_id(&id)?;
    let value = validation::completed(body.get("completed"))?;
    let todo = run(repository, "Failed to update todo", move |repo| {
        repo.set_completed(todo_id, value)
    })
    .await?;
    Ok(HttpResponse::Ok().json(todo))
}

#[delete("/todos/{id}")]
#[tracing::instrument(name = "delete_todo", skip(repository))]
pub async fn delete_todo(
    repository: Repository,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let todo_id = validation::todo_id(&id)?;
    run(repository, "Failed to delete todo", move |repo| {
        repo.delete_todo(todo_id)
    })
    .await?;
    tracing::info!(todo_id, "deleted todo");
    Ok(HttpResponse::Ok().json(SuccessResponse { success: true }))
}
