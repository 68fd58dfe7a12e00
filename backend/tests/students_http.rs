//! End-to-end behaviour of the assembled HTTP application.

#[path = "support/students.rs"]
mod support;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{Method, StatusCode, header};
use actix_web::test::{self, TestRequest};
use rstest::rstest;
use serde_json::{Value, json};
use student_records::server::build_app;
use support::{ada, in_memory_data};

async fn send<S, B>(app: &S, request: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(app, request).await;
    let status = response.status();
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, body)
}

fn json_request(method: Method, uri: &str, body: &Value) -> Request {
    TestRequest::default()
        .method(method)
        .uri(uri)
        .set_json(body)
        .to_request()
}

#[actix_web::test]
async fn student_lifecycle() {
    let (api, repository) = in_memory_data();
    let app = test::init_service(build_app(api, "/api".to_owned())).await;

    let (status, created) = send(&app, json_request(Method::POST, "/api/students", &ada())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["success"], json!(true));
    assert_eq!(created["message"], json!("Student created successfully"));
    let student = &created["data"];
    for field in ["name", "email", "age", "course"] {
        assert_eq!(student[field], ada()[field], "{field} echoed");
    }
    let id = student["id"].as_str().expect("id").to_owned();
    let item = format!("/api/students/{id}");

    let (status, fetched) = send(&app, TestRequest::get().uri(&item).to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&fetched["data"], student);

    let (_, listed) = send(&app, TestRequest::get().uri("/api/students").to_request()).await;
    let ids: Vec<&str> = listed["data"]
        .as_array()
        .expect("list")
        .iter()
        .filter_map(|entry| entry["id"].as_str())
        .collect();
    assert_eq!(ids, vec![id.as_str()]);

    let (status, updated) = send(&app, json_request(Method::PUT, &item, &json!({"age": 31}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["age"], json!(31));
    assert_eq!(updated["data"]["name"], json!("Ada Lovelace"));
    assert_eq!(updated["data"]["createdAt"], student["createdAt"]);

    let (status, deleted) = send(&app, TestRequest::delete().uri(&item).to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], json!("Student deleted successfully"));
    assert!(repository.is_empty());

    let (status, missing) = send(&app, TestRequest::get().uri(&item).to_request()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        missing,
        json!({"success": false, "message": "Student not found"})
    );
}

#[actix_web::test]
async fn duplicate_email_keeps_one_record() {
    let (api, repository) = in_memory_data();
    let app = test::init_service(build_app(api, "/api".to_owned())).await;

    let (first, _) = send(&app, json_request(Method::POST, "/api/students", &ada())).await;
    let mut again = ada();
    again["name"] = json!("Augusta King");
    let (second, body) = send(&app, json_request(Method::POST, "/api/students", &again)).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Email already exists"));
    assert_eq!(repository.count_with_email("ada@example.com"), 1);
}

#[rstest]
#[case(json!({"name": ""}), "name", json!("Ada Lovelace"))]
#[case(json!({"age": 0}), "age", json!(30))]
#[case(json!({"course": null}), "course", json!("Math"))]
#[actix_web::test]
async fn falsy_update_fields_leave_values(
    #[case] change: Value,
    #[case] field: &str,
    #[case] expected: Value,
) {
    let (api, _) = in_memory_data();
    let app = test::init_service(build_app(api, "/api".to_owned())).await;
    let (_, created) = send(&app, json_request(Method::POST, "/api/students", &ada())).await;
    let item = format!("/api/students/{}", created["data"]["id"].as_str().expect("id"));

    let (status, updated) = send(&app, json_request(Method::PUT, &item, &change)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"][field], expected);
}

#[actix_web::test]
async fn deleting_unknown_id_changes_nothing() {
    let (api, repository) = in_memory_data();
    let app = test::init_service(build_app(api, "/api".to_owned())).await;
    send(&app, json_request(Method::POST, "/api/students", &ada())).await;

    let (status, body) = send(
        &app,
        TestRequest::delete()
            .uri("/api/students/00000000-0000-0000-0000-000000000000")
            .to_request(),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Student not found"));
    assert_eq!(repository.len(), 1);
}

#[actix_web::test]
async fn preflight_and_responses_carry_cors_headers() {
    let (api, _) = in_memory_data();
    let app = test::init_service(build_app(api, "/api".to_owned())).await;

    let preflight = test::call_service(
        &app,
        TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/api/students")
            .to_request(),
    )
    .await;
    assert_eq!(preflight.status(), StatusCode::OK);
    assert_eq!(
        preflight
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );
    assert!(preflight.headers().contains_key("trace-id"));
    assert!(test::read_body(preflight).await.is_empty());

    let listed =
        test::call_service(&app, TestRequest::get().uri("/api/students").to_request()).await;
    assert_eq!(
        listed
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .and_then(|value| value.to_str().ok()),
        Some("GET, POST, PUT, DELETE, OPTIONS")
    );
}

#[actix_web::test]
async fn health_is_not_cached() {
    let (api, repository) = in_memory_data();
    let app = test::init_service(build_app(api, "/api".to_owned())).await;

    let response =
        test::call_service(&app, TestRequest::get().uri("/api/health").to_request()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|value| value.to_str().ok()),
        Some("no-store")
    );
    let body: Value = test::read_body_json(response).await;
    assert_eq!(
        body,
        json!({"success": true, "message": "Server is running"})
    );
    assert!(repository.is_empty());
}
