use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;
use validator::Validate;

use crate::{
    app::AppContext,
    auth::AuthenticatedUserId,
    error::AppError,
    models::{Task, TaskFilter, TaskInput},
};

const TASK_COLUMNS: &str = "id, title, description, status, priority, due_date, \
                            owner_id, assignee_id, created_at, updated_at";

/// Lists the caller's tasks, newest first.
///
/// Optional filters: `status`, `priority`, `assignee_id`, and `search`
/// (case-insensitive match against title and description).
#[get("")]
pub async fn list_tasks(
    ctx: web::Data<AppContext>,
    filter: web::Query<TaskFilter>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let mut query = QueryBuilder::<Postgres>::new(format!(
        "SELECT {} FROM tasks WHERE owner_id = ",
        TASK_COLUMNS
    ));
    query.push_bind(user.0);

    if let Some(status) = filter.status {
        query.push(" AND status = ");
        query.push_bind(status);
    }
    if let Some(priority) = filter.priority {
        query.push(" AND priority = ");
        query.push_bind(priority);
    }
    if let Some(assignee_id) = filter.assignee_id {
        query.push(" AND assignee_id = ");
        query.push_bind(assignee_id);
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search);
        query.push(" AND (title ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR description ILIKE ");
        query.push_bind(pattern);
        query.push(")");
    }
    query.push(" ORDER BY created_at DESC");

    let tasks: Vec<Task> = query.build_query_as().fetch_all(&ctx.pool).await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a task owned by the caller.
#[post("")]
pub async fn create_task(
    ctx: web::Data<AppContext>,
    input: web::Json<TaskInput>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    input.validate()?;

    let task = Task::new(input.into_inner(), user.0);

    let created: Task = sqlx::query_as(&format!(
        "INSERT INTO tasks ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {}",
        TASK_COLUMNS, TASK_COLUMNS
    ))
    .bind(task.id)
    .bind(&task.title)
    .bind(&task.description)
    .bind(task.status)
    .bind(task.priority)
    .bind(task.due_date)
    .bind(task.owner_id)
    .bind(task.assignee_id)
    .bind(task.created_at)
    .bind(task.updated_at)
    .fetch_one(&ctx.pool)
    .await?;

    Ok(HttpResponse::Created().json(created))
}

/// Fetches one of the caller's tasks. Tasks owned by someone else answer
/// 404 rather than 403, so ids cannot be probed.
#[get("/{id}")]
pub async fn get_task(
    ctx: web::Data<AppContext>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let task: Option<Task> = sqlx::query_as(&format!(
        "SELECT {} FROM tasks WHERE id = $1 AND owner_id = $2",
        TASK_COLUMNS
    ))
    .bind(task_id.into_inner())
    .bind(user.0)
    .fetch_optional(&ctx.pool)
    .await?;

    match task {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::not_found("task not found")),
    }
}

/// Replaces the mutable fields of one of the caller's tasks.
#[put("/{id}")]
pub async fn update_task(
    ctx: web::Data<AppContext>,
    task_id: web::Path<Uuid>,
    input: web::Json<TaskInput>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    input.validate()?;

    let updated: Option<Task> = sqlx::query_as(&format!(
        "UPDATE tasks \
         SET title = $1, description = $2, status = $3, priority = $4, due_date = $5, \
             assignee_id = $6, updated_at = now() \
         WHERE id = $7 AND owner_id = $8 \
         RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.status)
    .bind(input.priority)
    .bind(input.due_date)
    .bind(input.assignee_id)
    .bind(task_id.into_inner())
    .bind(user.0)
    .fetch_optional(&ctx.pool)
    .await?;

    match updated {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::not_found("task not found")),
    }
}

/// Deletes one of the caller's tasks.
#[delete("/{id}")]
pub async fn delete_task(
    ctx: web::Data<AppContext>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
        .bind(task_id.into_inner())
        .bind(user.0)
        .execute(&ctx.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("task not found"));
    }

    Ok(HttpResponse::NoContent().finish())
}
