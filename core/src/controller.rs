//! In-memory list state and the request lifecycle around it.
//!
//! # Design
//! `ListController` owns the todo collection plus the transient UI state
//! (loading, adding, active item, error). It never performs I/O: every
//! operation is split into a `begin_*` call that records the operation and
//! returns a `Pending` (ticket + request), and a `complete` call that applies
//! the host's outcome for that ticket.
//!
//! Tickets carry the controller generation. `unmount` bumps the generation,
//! and a newer fetch retires the older fetch ticket, so a late completion is
//! reported as `Settled::Stale` and leaves the state alone. Different items
//! may have requests in flight at the same time; each completion patches the
//! collection by id and the last response to arrive wins.

use std::collections::HashMap;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{CreateTodo, Title, Todo};

/// Handle for one in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    seq: u64,
    generation: u64,
}

/// A request the host must execute and report back through `complete`.
#[derive(Debug, Clone)]
pub struct Pending {
    pub ticket: Ticket,
    pub request: HttpRequest,
}

/// Per-item operations tracked by the active marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Toggle,
    Delete,
    Copy,
}

impl Mutation {
    pub fn as_str(self) -> &'static str {
        match self {
            Mutation::Toggle => "toggle",
            Mutation::Delete => "delete",
            Mutation::Copy => "copy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    FetchAll,
    Add,
    Mutate(Mutation, Uuid),
}

/// What `complete` did with an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled {
    Loaded { count: usize },
    LoadFailed { message: String },
    Added(Todo),
    /// Returned to the caller; the collection is untouched.
    AddFailed(ApiError),
    Toggled(Todo),
    Deleted(Uuid),
    Copied(Todo),
    /// Logged and otherwise swallowed; the collection is untouched.
    MutationFailed {
        mutation: Mutation,
        id: Uuid,
        error: ApiError,
    },
    /// The ticket was retired (unmount or superseded fetch) or unknown.
    Stale,
}

/// Read-only view of controller state for rendering.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub todos: &'a [Todo],
    pub loading: bool,
    pub adding: bool,
    pub error: Option<&'a str>,
    pub active_id: Option<Uuid>,
}

#[derive(Debug)]
pub struct ListController {
    client: TodoClient,
    todos: Vec<Todo>,
    loading: bool,
    adds_in_flight: usize,
    active_id: Option<Uuid>,
    error: Option<String>,
    mounted: bool,
    generation: u64,
    next_seq: u64,
    in_flight: HashMap<u64, Operation>,
    current_fetch: Option<u64>,
}

impl ListController {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            todos: Vec::new(),
            loading: true,
            adds_in_flight: 0,
            active_id: None,
            error: None,
            mounted: false,
            generation: 0,
            next_seq: 0,
            in_flight: HashMap::new(),
            current_fetch: None,
        }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_adding(&self) -> bool {
        self.adds_in_flight > 0
    }

    pub fn active_id(&self) -> Option<Uuid> {
        self.active_id
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            todos: &self.todos,
            loading: self.loading,
            adding: self.is_adding(),
            error: self.error.as_deref(),
            active_id: self.active_id,
        }
    }

    /// Start the initial fetch.
    pub fn mount(&mut self) -> Pending {
        self.mounted = true;
        self.begin_fetch()
    }

    /// Re-run the fetch, e.g. after a load error. Any earlier fetch still in
    /// flight becomes stale.
    pub fn refresh(&mut self) -> Pending {
        self.begin_fetch()
    }

    /// Retire every in-flight ticket and drop all view state.
    pub fn unmount(&mut self) {
        debug!(dropped = self.in_flight.len(), "unmounting list controller");
        self.mounted = false;
        self.generation += 1;
        self.in_flight.clear();
        self.current_fetch = None;
        self.todos.clear();
        self.loading = true;
        self.adds_in_flight = 0;
        self.active_id = None;
        self.error = None;
    }

    fn begin_fetch(&mut self) -> Pending {
        self.loading = true;
        self.error = None;
        let pending = self.issue(Operation::FetchAll, self.client.build_list_todos());
        self.current_fetch = Some(pending.ticket.seq);
        pending
    }

    /// Fails only when the payload cannot be encoded; nothing is recorded in
    /// that case.
    pub fn begin_add(&mut self, title: Title) -> Result<Pending, ApiError> {
        let request = self.client.build_create_todo(&CreateTodo::from_title(title))?;
        self.adds_in_flight += 1;
        Ok(self.issue(Operation::Add, request))
    }

    pub fn begin_toggle(&mut self, id: Uuid) -> Pending {
        self.begin_mutation(Mutation::Toggle, id, self.client.build_toggle_todo(id))
    }

    pub fn begin_delete(&mut self, id: Uuid) -> Pending {
        self.begin_mutation(Mutation::Delete, id, self.client.build_delete_todo(id))
    }

    /// The original item is the one marked active.
    pub fn begin_copy(&mut self, id: Uuid) -> Pending {
        self.begin_mutation(Mutation::Copy, id, self.client.build_copy_todo(id))
    }

    fn begin_mutation(&mut self, mutation: Mutation, id: Uuid, request: HttpRequest) -> Pending {
        self.active_id = Some(id);
        self.issue(Operation::Mutate(mutation, id), request)
    }

    fn issue(&mut self, op: Operation, request: HttpRequest) -> Pending {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.in_flight.insert(seq, op);
        debug!(seq, ?op, method = %request.method, path = %request.path, "request issued");
        Pending {
            ticket: Ticket {
                seq,
                generation: self.generation,
            },
            request,
        }
    }

    /// Apply the host's outcome for `ticket`.
    ///
    /// `outcome` is the raw response, or the transport error when no
    /// response arrived.
    pub fn complete(&mut self, ticket: Ticket, outcome: Result<HttpResponse, ApiError>) -> Settled {
        if ticket.generation != self.generation {
            debug!(seq = ticket.seq, "dropping completion from a retired generation");
            return Settled::Stale;
        }
        let Some(op) = self.in_flight.remove(&ticket.seq) else {
            debug!(seq = ticket.seq, "dropping completion for unknown ticket");
            return Settled::Stale;
        };

        match op {
            Operation::FetchAll => self.finish_fetch(ticket.seq, outcome),
            Operation::Add => self.finish_add(outcome),
            Operation::Mutate(mutation, id) => self.finish_mutation(mutation, id, outcome),
        }
    }

    fn finish_fetch(&mut self, seq: u64, outcome: Result<HttpResponse, ApiError>) -> Settled {
        if self.current_fetch != Some(seq) {
            debug!(seq, "dropping superseded fetch");
            return Settled::Stale;
        }
        self.current_fetch = None;
        self.loading = false;
        match outcome.and_then(|response| self.client.parse_list_todos(response)) {
            Ok(todos) => {
                let count = todos.len();
                self.todos = todos;
                debug!(count, "todos loaded");
                Settled::Loaded { count }
            }
            Err(err) => {
                let message = err.message();
                warn!(class = ?err.class(), %message, "failed to load todos");
                self.error = Some(message.clone());
                Settled::LoadFailed { message }
            }
        }
    }

    fn finish_add(&mut self, outcome: Result<HttpResponse, ApiError>) -> Settled {
        self.adds_in_flight = self.adds_in_flight.saturating_sub(1);
        match outcome.and_then(|response| self.client.parse_create_todo(response)) {
            Ok(todo) => {
                self.todos.insert(0, todo.clone());
                Settled::Added(todo)
            }
            Err(err) => Settled::AddFailed(err),
        }
    }

    fn finish_mutation(
        &mut self,
        mutation: Mutation,
        id: Uuid,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Settled {
        // A newer mutation on another item owns the marker now.
        if self.active_id == Some(id) {
            self.active_id = None;
        }

        let applied = outcome.and_then(|response| match mutation {
            Mutation::Toggle => {
                let todo = self.client.parse_toggle_todo(response)?;
                if let Some(slot) = self.todos.iter_mut().find(|t| t.id == id) {
                    *slot = todo.clone();
                }
                Ok(Settled::Toggled(todo))
            }
            Mutation::Delete => {
                self.client.parse_delete_todo(response)?;
                self.todos.retain(|t| t.id != id);
                Ok(Settled::Deleted(id))
            }
            Mutation::Copy => {
                let todo = self.client.parse_copy_todo(response)?;
                self.todos.insert(0, todo.clone());
                Ok(Settled::Copied(todo))
            }
        });

        applied.unwrap_or_else(|error| {
            warn!(
                mutation = mutation.as_str(),
                %id,
                message = %error.message(),
                "failed to {} todo",
                mutation.as_str()
            );
            Settled::MutationFailed { mutation, id, error }
        })
    }
}
