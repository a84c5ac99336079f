//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.

use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, Paginated, Todo, UpdateTodo};

const TODOS_PATH: &str = "/api/todos/";

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{TODOS_PATH}", self.base_url)
    }

    fn item_url(&self, id: Uuid) -> String {
        format!("{}{TODOS_PATH}{id}/", self.base_url)
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        get(self.collection_url())
    }

    /// `None` asks for the first page without a query string.
    pub fn build_list_todos_page(&self, page: Option<u32>) -> HttpRequest {
        match page {
            Some(page) => get(format!("{}?page={page}", self.collection_url())),
            None => self.build_list_todos(),
        }
    }

    pub fn build_get_todo(&self, id: Uuid) -> HttpRequest {
        get(self.item_url(id))
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, self.collection_url(), input)
    }

    pub fn build_update_todo(&self, id: Uuid, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Patch, self.item_url(id), input)
    }

    pub fn build_delete_todo(&self, id: Uuid) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_toggle_todo(&self, id: Uuid) -> HttpRequest {
        post_empty(format!("{}toggle/", self.item_url(id)))
    }

    pub fn build_copy_todo(&self, id: Uuid) -> HttpRequest {
        post_empty(format!("{}copy/", self.item_url(id)))
    }

    /// Results of the first page only.
    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        self.parse_list_todos_page(response).map(|page| page.results)
    }

    pub fn parse_list_todos_page(&self, response: HttpResponse) -> Result<Paginated<Todo>, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 201)?;
        decode(&response.body)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)?;
        Ok(())
    }

    pub fn parse_toggle_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_copy_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 201)?;
        decode(&response.body)
    }
}

fn get(path: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn post_empty(path: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Post,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn json_request<T: serde::Serialize>(
    method: HttpMethod,
    path: String,
    input: &T,
) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    let body = response.body.clone();
    match response.status {
        404 => Err(ApiError::NotFound { body }),
        400 => Err(ApiError::Validation { body }),
        status => Err(ApiError::HttpError { status, body }),
    }
}
