//! Client core for the todo list application.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), keeps the list state the UI
//! renders from, and renders that state to HTML.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`. Each operation is
//!   split into `build_*` and `parse_*`, so the I/O boundary is explicit.
//! - `TodosApi` and `TodoPage` execute requests through a `Transport`
//!   supplied by the host.
//! - `ListController` is the only owner of the todo collection. Requests are
//!   tracked by `Ticket`, so completions that arrive after unmount are
//!   dropped instead of applied.
//! - `view` is a pure function of controller state; its `data-testid`
//!   attributes are a stable contract for automated tests.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod controller;
pub mod error;
pub mod form;
pub mod http;
pub mod page;
pub mod types;
pub mod view;

pub use api::TodosApi;
pub use client::TodoClient;
pub use controller::{ListController, Mutation, Pending, Settled, Snapshot, Ticket};
pub use error::{ApiError, ErrorClass};
pub use form::AddForm;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use page::TodoPage;
pub use types::{CreateTodo, Paginated, Title, TitleError, Todo, UpdateTodo};
pub use view::PageOptions;
