//! In-memory implementation of the `/api/todos/` REST contract.
//!
//! Behaves like the production backend as far as the client can observe:
//! newest-first ordering, page-number pagination, DRF-style error bodies,
//! server-owned ids and timestamps, and the `toggle`/`copy` actions.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::debug;
use uuid::Uuid;

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const TITLE_MAX_CHARS: usize = 255;
const COLLECTION_PATH: &str = "/api/todos/";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of create, full update and partial update. Every field is optional
/// at the JSON level so missing fields can be reported per field.
#[derive(Debug, Default, Deserialize)]
pub struct TodoPayload {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Page {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<Todo>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
}

/// Todos, newest first.
pub type Db = Arc<RwLock<Vec<Todo>>>;

#[derive(Clone)]
pub struct AppState {
    db: Db,
    page_size: usize,
}

#[derive(Debug)]
pub enum ServerError {
    NotFound,
    InvalidPage,
    Parse(String),
    Fields(BTreeMap<&'static str, Vec<String>>),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            ServerError::NotFound => {
                (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found." }))).into_response()
            }
            ServerError::InvalidPage => {
                (StatusCode::NOT_FOUND, Json(json!({ "detail": "Invalid page." }))).into_response()
            }
            ServerError::Parse(msg) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": format!("JSON parse error - {msg}") })),
            )
                .into_response(),
            ServerError::Fields(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
        }
    }
}

pub fn app() -> Router {
    app_with_page_size(DEFAULT_PAGE_SIZE)
}

pub fn app_with_page_size(page_size: usize) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(Vec::new())),
        page_size: page_size.max(1),
    };
    Router::new()
        .route("/api/todos/", get(list_todos).post(create_todo))
        .route(
            "/api/todos/{id}/",
            get(get_todo)
                .put(replace_todo)
                .patch(update_todo)
                .delete(delete_todo),
        )
        .route("/api/todos/{id}/toggle/", post(toggle_todo))
        .route("/api/todos/{id}/copy/", post(copy_todo))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_page_size(listener: TcpListener, page_size: usize) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_page_size(page_size)).await
}

/// Malformed ids are indistinguishable from missing ones.
fn parse_id(raw: &str) -> Result<Uuid, ServerError> {
    Uuid::parse_str(raw).map_err(|_| ServerError::NotFound)
}

fn page_link(page: usize) -> String {
    if page <= 1 {
        COLLECTION_PATH.to_string()
    } else {
        format!("{COLLECTION_PATH}?page={page}")
    }
}

/// Trimmed title, or the field error a DRF `CharField(max_length=255)` gives.
fn clean_title(raw: Option<String>, required: bool) -> Result<Option<String>, String> {
    match raw {
        None if required => Err("This field is required.".to_string()),
        None => Ok(None),
        Some(title) => {
            let title = title.trim().to_string();
            if title.is_empty() {
                Err("This field may not be blank.".to_string())
            } else if title.chars().count() > TITLE_MAX_CHARS {
                Err(format!(
                    "Ensure this field has no more than {TITLE_MAX_CHARS} characters."
                ))
            } else {
                Ok(Some(title))
            }
        }
    }
}

fn validate(
    payload: Result<Json<TodoPayload>, JsonRejection>,
    title_required: bool,
) -> Result<(Option<String>, Option<bool>), ServerError> {
    let Json(input) = payload.map_err(|rejection| ServerError::Parse(rejection.body_text()))?;
    let title = clean_title(input.title, title_required).map_err(|msg| {
        let mut errors = BTreeMap::new();
        errors.insert("title", vec![msg]);
        ServerError::Fields(errors)
    })?;
    Ok((title, input.completed))
}

async fn list_todos(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Page>, ServerError> {
    let page = match params.page.as_deref() {
        None => 1,
        Some(raw) => raw.parse::<usize>().map_err(|_| ServerError::InvalidPage)?,
    };
    let todos = state.db.read().await;
    let count = todos.len();
    let pages = count.div_ceil(state.page_size).max(1);
    if page == 0 || page > pages {
        return Err(ServerError::InvalidPage);
    }
    let results = todos
        .iter()
        .skip((page - 1) * state.page_size)
        .take(state.page_size)
        .cloned()
        .collect();
    Ok(Json(Page {
        count,
        next: (page < pages).then(|| page_link(page + 1)),
        previous: (page > 1).then(|| page_link(page - 1)),
        results,
    }))
}

async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<TodoPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ServerError> {
    let (title, completed) = validate(payload, true)?;
    let now = Utc::now();
    let todo = Todo {
        id: Uuid::new_v4(),
        title: title.unwrap_or_default(),
        completed: completed.unwrap_or(false),
        created_at: now,
        updated_at: now,
    };
    state.db.write().await.insert(0, todo.clone());
    debug!(id = %todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Todo>, ServerError> {
    let id = parse_id(&id)?;
    let todos = state.db.read().await;
    todos
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .map(Json)
        .ok_or(ServerError::NotFound)
}

async fn apply_update(
    state: &AppState,
    id: &str,
    payload: Result<Json<TodoPayload>, JsonRejection>,
    partial: bool,
) -> Result<Json<Todo>, ServerError> {
    let id = parse_id(id)?;
    let mut todos = state.db.write().await;
    let todo = todos.iter_mut().find(|t| t.id == id).ok_or(ServerError::NotFound)?;
    let (title, completed) = validate(payload, !partial)?;
    if let Some(title) = title {
        todo.title = title;
    }
    // `completed` has a model default, so a full update may omit it too.
    if let Some(completed) = completed {
        todo.completed = completed;
    }
    todo.updated_at = Utc::now();
    Ok(Json(todo.clone()))
}

async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TodoPayload>, JsonRejection>,
) -> Result<Json<Todo>, ServerError> {
    apply_update(&state, &id, payload, true).await
}

async fn replace_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TodoPayload>, JsonRejection>,
) -> Result<Json<Todo>, ServerError> {
    apply_update(&state, &id, payload, false).await
}

async fn delete_todo(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, ServerError> {
    let id = parse_id(&id)?;
    let mut todos = state.db.write().await;
    let index = todos.iter().position(|t| t.id == id).ok_or(ServerError::NotFound)?;
    todos.remove(index);
    debug!(%id, "todo deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn toggle_todo(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Todo>, ServerError> {
    let id = parse_id(&id)?;
    let mut todos = state.db.write().await;
    let todo = todos.iter_mut().find(|t| t.id == id).ok_or(ServerError::NotFound)?;
    todo.completed = !todo.completed;
    todo.updated_at = Utc::now();
    Ok(Json(todo.clone()))
}

async fn copy_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<Todo>), ServerError> {
    let id = parse_id(&id)?;
    let mut todos = state.db.write().await;
    let original = todos.iter().find(|t| t.id == id).ok_or(ServerError::NotFound)?;
    let now = Utc::now();
    let copy = Todo {
        id: Uuid::new_v4(),
        title: original.title.clone(),
        completed: original.completed,
        created_at: now,
        updated_at: now,
    };
    todos.insert(0, copy.clone());
    debug!(original = %id, copy = %copy.id, "todo copied");
    Ok((StatusCode::CREATED, Json(copy)))
}
