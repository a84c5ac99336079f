//! Full resource-client lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every `TodosApi`
//! operation over real HTTP using ureq. Validates that request building and
//! response parsing agree with the actual server.

use todo_core::{
    ApiError, CreateTodo, ErrorClass, HttpMethod, HttpRequest, HttpResponse, TodoClient, TodosApi,
    Transport, UpdateTodo,
};

/// Executes requests with ureq.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
struct Ureq(ureq::Agent);

impl Ureq {
    fn new() -> Self {
        Self(
            ureq::Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent(),
        )
    }
}

impl Transport for Ureq {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let agent = &self.0;
        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => agent.get(&req.path).call(),
            (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
            (HttpMethod::Post, Some(body)) => agent
                .post(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
            (HttpMethod::Put, Some(body)) => agent
                .put(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
            (HttpMethod::Patch, Some(body)) => agent
                .patch(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Patch, None) => agent.patch(&req.path).send_empty(),
        };
        let mut response = result.map_err(ApiError::network)?;
        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().unwrap_or_default();
        Ok(HttpResponse::new(status, body))
    }
}

fn start_server(page_size: usize) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with_page_size(listener, page_size).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn crud_lifecycle() {
    let api = TodosApi::new(TodoClient::new(&start_server(20)), Ureq::new());

    // list: should be empty.
    assert!(api.list().unwrap().is_empty(), "expected empty list");

    // create a todo.
    let created = api
        .create(&CreateTodo {
            title: "Integration test".to_string(),
            completed: None,
        })
        .unwrap();
    assert_eq!(created.title, "Integration test");
    assert!(!created.completed);
    let id = created.id;

    // get the created todo.
    assert_eq!(api.get(id).unwrap(), created);

    // update title.
    let updated = api
        .update(
            id,
            &UpdateTodo {
                title: Some("Updated title".to_string()),
                completed: None,
            },
        )
        .unwrap();
    assert_eq!(updated.title, "Updated title");
    assert!(!updated.completed);

    // toggle twice returns to the original state.
    assert!(api.toggle_complete(id).unwrap().completed);
    assert!(!api.toggle_complete(id).unwrap().completed);

    // copy keeps title and state under a new id.
    let copy = api.copy(id).unwrap();
    assert_ne!(copy.id, id);
    assert_eq!(copy.title, "Updated title");
    let todos = api.list().unwrap();
    assert_eq!(todos.len(), 2);
    assert_eq!(todos[0].id, copy.id);

    // delete.
    api.delete(id).unwrap();

    // get and delete after delete: NotFound.
    assert!(matches!(api.get(id), Err(ApiError::NotFound { .. })));
    let err = api.delete(id).unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
    assert_eq!(err.message(), "Not found.");

    assert_eq!(api.list().unwrap().len(), 1);
}

#[test]
fn blank_title_is_a_validation_error() {
    let api = TodosApi::new(TodoClient::new(&start_server(20)), Ureq::new());
    let err = api
        .create(&CreateTodo {
            title: "   ".to_string(),
            completed: None,
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation { .. }));
    assert_eq!(err.message(), "title: This field may not be blank.");
}

#[test]
fn list_paginated_walks_pages() {
    let api = TodosApi::new(TodoClient::new(&start_server(2)), Ureq::new());
    for title in ["one", "two", "three"] {
        api.create(&CreateTodo {
            title: title.to_string(),
            completed: None,
        })
        .unwrap();
    }

    let first = api.list_paginated(None).unwrap();
    assert_eq!(first.count, 3);
    assert_eq!(first.results.len(), 2);
    assert!(first.next.is_some());
    // `list` only ever shows the first page.
    assert_eq!(api.list().unwrap(), first.results);

    let second = api.list_paginated(Some(2)).unwrap();
    assert_eq!(second.results.len(), 1);
    assert_eq!(second.results[0].title, "one");
    assert!(second.next.is_none());

    let err = api.list_paginated(Some(9)).unwrap_err();
    assert_eq!(err.message(), "Invalid page.");
}

#[test]
fn unreachable_server_is_a_network_failure() {
    // Bind then drop to get a port nobody listens on.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let api = TodosApi::new(TodoClient::new(&format!("http://127.0.0.1:{port}")), Ureq::new());
    let err = api.list().unwrap_err();
    assert_eq!(err.class(), ErrorClass::NetworkFailure);
    assert!(!err.message().is_empty());
}
