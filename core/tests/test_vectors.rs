//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results or errors. Comparing parsed JSON (not raw
//! strings) avoids false negatives from field-ordering differences.

use serde_json::Value;
use todo_core::{
    ApiError, CreateTodo, HttpMethod, HttpRequest, HttpResponse, Paginated, Todo, TodoClient,
    UpdateTodo,
};
use uuid::Uuid;

const BASE_URL: &str = "http://localhost:3000";

fn client() -> TodoClient {
    TodoClient::new(BASE_URL)
}

fn load(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn input_id(case: &Value) -> Uuid {
    case["input_id"].as_str().unwrap().parse().unwrap()
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

/// Method, path, and (when the vector has them) headers and JSON body.
fn assert_request(name: &str, req: &HttpRequest, case: &Value) {
    let expected = &case["expected_request"];
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.path, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");

    if let Some(headers) = expected.get("headers") {
        let expected_headers: Vec<(String, String)> = headers
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");
    }

    match expected.get("body") {
        Some(body) => {
            let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&req_body, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

/// Check a parse result against either `expected_result` or `expected_error`.
fn assert_outcome<T>(name: &str, case: &Value, result: Result<T, ApiError>)
where
    T: PartialEq + std::fmt::Debug + serde::de::DeserializeOwned,
{
    if let Some(expected_error) = case.get("expected_error") {
        let err = result.unwrap_err();
        let matched = match expected_error.as_str().unwrap() {
            "NotFound" => matches!(err, ApiError::NotFound { .. }),
            "Validation" => matches!(err, ApiError::Validation { .. }),
            "HttpError" => matches!(err, ApiError::HttpError { .. }),
            other => panic!("{name}: unknown expected_error: {other}"),
        };
        assert!(matched, "{name}: expected {expected_error}, got {err:?}");
        if let Some(message) = case.get("expected_message") {
            assert_eq!(err.message(), message.as_str().unwrap(), "{name}: message");
        }
    } else {
        let expected: T = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(result.unwrap(), expected, "{name}: parsed result");
    }
}

#[test]
fn list_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();
        let page = case["page"].as_u64().map(|p| p as u32);

        let req = c.build_list_todos_page(page);
        assert_request(name, &req, &case);

        let result: Result<Paginated<Todo>, _> = c.parse_list_todos_page(simulated(&case));
        assert_outcome(name, &case, result);
    }
}

#[test]
fn get_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/get.json")) {
        let name = case["name"].as_str().unwrap();
        let req = c.build_get_todo(input_id(&case));
        assert_request(name, &req, &case);
        assert_outcome(name, &case, c.parse_get_todo(simulated(&case)));
    }
}

#[test]
fn create_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let input: CreateTodo = serde_json::from_value(case["input"].clone()).unwrap();
        let req = c.build_create_todo(&input).unwrap();
        assert_request(name, &req, &case);
        assert_outcome(name, &case, c.parse_create_todo(simulated(&case)));
    }
}

#[test]
fn update_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/update.json")) {
        let name = case["name"].as_str().unwrap();
        let input: UpdateTodo = serde_json::from_value(case["input"].clone()).unwrap();
        let req = c.build_update_todo(input_id(&case), &input).unwrap();
        assert_request(name, &req, &case);
        assert_outcome(name, &case, c.parse_update_todo(simulated(&case)));
    }
}

#[test]
fn delete_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();
        let req = c.build_delete_todo(input_id(&case));
        assert_request(name, &req, &case);

        let result = c.parse_delete_todo(simulated(&case));
        if case.get("expected_error").is_some() {
            assert_outcome::<Value>(name, &case, result.map(|()| Value::Null));
        } else {
            assert!(result.is_ok(), "{name}: expected success");
        }
    }
}

#[test]
fn toggle_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/toggle.json")) {
        let name = case["name"].as_str().unwrap();
        let req = c.build_toggle_todo(input_id(&case));
        assert_request(name, &req, &case);
        assert_outcome(name, &case, c.parse_toggle_todo(simulated(&case)));
    }
}

#[test]
fn copy_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/copy.json")) {
        let name = case["name"].as_str().unwrap();
        let req = c.build_copy_todo(input_id(&case));
        assert_request(name, &req, &case);
        assert_outcome(name, &case, c.parse_copy_todo(simulated(&case)));
    }
}
