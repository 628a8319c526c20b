use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::Deserialize;
use sqlx::MySqlPool;

use crate::errors::AppError;
use crate::mapper::Projection;
// Import Models User
use crate::models::user::User;
use crate::repositories::user_repository::UserRepository;
use crate::schemas::user_schema::{UserInput, UserInputPayload, UserOutput, ValidationGroup};
use crate::services::password_hasher::PasswordHasher;
use crate::utils::handler::HandlerResult;

pub const DEFAULT_PER_PAGE: u32 = 30;
const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl Pagination {
    /// `(limit, offset)`, with the page starting at 1.
    pub fn limit_offset(&self) -> (i64, i64) {
        let per_page = self
            .per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE) as i64;
        let page = self.page.unwrap_or(1).max(1) as i64;
        (per_page, (page - 1) * per_page)
    }
}

fn output(user: &User) -> Result<UserOutput, AppError> {
    Ok(UserOutput::create_from_entity(Some(user))?)
}

pub async fn index(
    Extension(db): Extension<MySqlPool>,
    Query(pagination): Query<Pagination>,
) -> HandlerResult<Vec<UserOutput>> {
    let (limit, offset) = pagination.limit_offset();
    let users = UserRepository::new(db).find_all(limit, offset).await?;

    let outputs = users.iter().map(output).collect::<Result<Vec<_>, _>>()?;
    Ok((StatusCode::OK, Json(outputs)))
}

pub async fn store(
    Extension(db): Extension<MySqlPool>,
    Extension(hasher): Extension<Arc<dyn PasswordHasher>>,
    Json(payload): Json<UserInputPayload>,
) -> HandlerResult<UserOutput> {
    let repo = UserRepository::new(db);
    let user = write_user(&repo, hasher.as_ref(), None, payload).await?;
    tracing::info!(id = ?user.id, "user created");

    Ok((StatusCode::CREATED, Json(output(&user)?)))
}

pub async fn show(
    Extension(db): Extension<MySqlPool>,
    Path(id): Path<i64>,
) -> HandlerResult<UserOutput> {
    let user = UserRepository::new(db)
        .find(id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok((StatusCode::OK, Json(output(&user)?)))
}

pub async fn update(
    Extension(db): Extension<MySqlPool>,
    Extension(hasher): Extension<Arc<dyn PasswordHasher>>,
    Path(id): Path<i64>,
    Json(payload): Json<UserInputPayload>,
) -> HandlerResult<UserOutput> {
    let repo = UserRepository::new(db);
    let existing = repo.find(id).await?.ok_or(AppError::NotFound)?;
    let user = write_user(&repo, hasher.as_ref(), Some(existing), payload).await?;
    tracing::info!(id, "user updated");

    Ok((StatusCode::OK, Json(output(&user)?)))
}

pub async fn destroy(
    Extension(db): Extension<MySqlPool>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !UserRepository::new(db).delete(id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(id, "user deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Shared create/update path: project the current state, merge the payload,
/// validate, check uniqueness, hash a new password, then persist.
async fn write_user(
    repo: &UserRepository,
    hasher: &dyn PasswordHasher,
    existing: Option<User>,
    payload: UserInputPayload,
) -> Result<User, AppError> {
    let mut input = UserInput::create_from_entity(existing.as_ref())?;
    input.merge(payload);

    let entity = existing.unwrap_or_default();
    let password_changed = input.password_changed(&entity);
    input.validate(&ValidationGroup::resolve(entity.is_new(), password_changed))?;

    let mut user = input.create_or_update_entity(Some(entity))?;

    let conflicts = repo.conflicts(&user).await?;
    if !conflicts.is_empty() {
        return Err(AppError::Conflict(conflicts));
    }

    if password_changed {
        user.password = hasher.hash(&user.password).await?;
    }

    if user.is_new() {
        repo.insert(&mut user).await?;
    } else {
        repo.update(&user).await?;
    }
    Ok(user)
}
