//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use imcredit_core::domain::{
    role_catalog, Author, AuthorFields, Project, ProjectRef, ProjectSummary, RoleInfo,
};
use imcredit_core::{CreditError, Direction, RenderedOutput};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Ids that do not parse cannot name an existing row
fn project_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| CreditError::project_not_found().into())
}

fn author_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| CreditError::author_not_found().into())
}

/// `{"ok": true}`
#[derive(Debug, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    fn ok() -> Json<Self> {
        Json(Self { ok: true })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Request to create a project; the body may be empty
#[derive(Debug, Default, Deserialize)]
pub struct CreateProjectRequest {
    #[serde(default)]
    pub title: Option<String>,
}

/// Request to move an author one place
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub direction: Option<i64>,
}

impl ReorderRequest {
    fn parse(&self) -> ApiResult<(Uuid, Direction)> {
        const MESSAGE: &str = "authorId and direction (-1 or 1) are required";
        let raw_id = self
            .author_id
            .as_deref()
            .ok_or_else(|| CreditError::validation(MESSAGE))?;
        let direction = self
            .direction
            .ok_or_else(|| CreditError::validation(MESSAGE))
            .and_then(Direction::from_offset)?;
        Ok((author_id(raw_id)?, direction))
    }
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// The CRediT taxonomy with definitions
pub async fn list_roles() -> Json<Vec<RoleInfo>> {
    Json(role_catalog())
}

pub async fn create_project(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ProjectRef>)> {
    let request: CreateProjectRequest = if body.iter().all(u8::is_ascii_whitespace) {
        CreateProjectRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?
    };

    let project = state.store.create_project(request.title.as_deref())?;
    Ok((StatusCode::CREATED, Json(ProjectRef::from(&project))))
}

/// All projects, newest first
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ProjectSummary>>> {
    Ok(Json(state.store.list_projects()?))
}

pub async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Project>> {
    Ok(Json(state.store.get_project(project_id(&id)?)?))
}

pub async fn list_authors(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Author>>> {
    Ok(Json(state.store.list_authors(project_id(&id)?)?))
}

pub async fn create_author(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<AuthorFields>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Author>)> {
    let project_id = project_id(&id)?;
    let Json(fields) = payload?;
    let author = state.store.create_author(project_id, fields.validate()?)?;
    Ok((StatusCode::CREATED, Json(author)))
}

pub async fn update_author(
    State(state): State<Arc<AppState>>,
    Path((id, author)): Path<(String, String)>,
    payload: Result<Json<AuthorFields>, JsonRejection>,
) -> ApiResult<Json<Author>> {
    let project_id = project_id(&id)?;
    let author_id = author_id(&author)?;
    let Json(fields) = payload?;
    Ok(Json(state.store.update_author(
        project_id,
        author_id,
        fields.validate()?,
    )?))
}

pub async fn delete_author(
    State(state): State<Arc<AppState>>,
    Path((id, author)): Path<(String, String)>,
) -> ApiResult<Json<OkResponse>> {
    state
        .store
        .delete_author(project_id(&id)?, author_id(&author)?)?;
    Ok(OkResponse::ok())
}

/// Swap an author with its neighbour
pub async fn reorder_author(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<ReorderRequest>, JsonRejection>,
) -> ApiResult<Json<OkResponse>> {
    let project_id = project_id(&id)?;
    let Json(request) = payload?;
    let (author_id, direction) = request.parse()?;
    state
        .store
        .swap_author_order(project_id, author_id, direction)?;
    Ok(OkResponse::ok())
}

/// Author list with footnotes and CRediT statement, rendered server-side
pub async fn get_output(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<RenderedOutput>> {
    let authors = state.store.list_authors(project_id(&id)?)?;
    Ok(Json(RenderedOutput::from_authors(&authors)))
}
