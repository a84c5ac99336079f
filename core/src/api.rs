//! Blocking resource client: `TodoClient` plus a `Transport`.
//!
//! Each method builds the request, hands it to the transport and parses the
//! response. Nothing is retried or cached.

use tracing::debug;
use uuid::Uuid;

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{CreateTodo, Paginated, Todo, UpdateTodo};

pub struct TodosApi<T> {
    client: TodoClient,
    transport: T,
}

impl<T: Transport> TodosApi<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.execute(request)?;
        debug!(status = response.status, "received response");
        Ok(response)
    }

    pub fn list(&self) -> Result<Vec<Todo>, ApiError> {
        let response = self.send(self.client.build_list_todos())?;
        self.client.parse_list_todos(response)
    }

    pub fn list_paginated(&self, page: Option<u32>) -> Result<Paginated<Todo>, ApiError> {
        let response = self.send(self.client.build_list_todos_page(page))?;
        self.client.parse_list_todos_page(response)
    }

    pub fn get(&self, id: Uuid) -> Result<Todo, ApiError> {
        let response = self.send(self.client.build_get_todo(id))?;
        self.client.parse_get_todo(response)
    }

    pub fn create(&self, input: &CreateTodo) -> Result<Todo, ApiError> {
        let response = self.send(self.client.build_create_todo(input)?)?;
        self.client.parse_create_todo(response)
    }

    pub fn update(&self, id: Uuid, input: &UpdateTodo) -> Result<Todo, ApiError> {
        let response = self.send(self.client.build_update_todo(id, input)?)?;
        self.client.parse_update_todo(response)
    }

    pub fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete_todo(id))?;
        self.client.parse_delete_todo(response)
    }

    pub fn toggle_complete(&self, id: Uuid) -> Result<Todo, ApiError> {
        let response = self.send(self.client.build_toggle_todo(id))?;
        self.client.parse_toggle_todo(response)
    }

    pub fn copy(&self, id: Uuid) -> Result<Todo, ApiError> {
        let response = self.send(self.client.build_copy_todo(id))?;
        self.client.parse_copy_todo(response)
    }
}
