//! Handler tests running the real service over the in-memory store.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::StudentService;
use crate::inbound::api::StudentsApi;
use crate::inbound::http::configure;
use crate::outbound::memory::InMemoryStudentRepository;

fn students_api(repository: InMemoryStudentRepository) -> StudentsApi {
    let service = StudentService::new(Arc::new(repository), Arc::new(mockable::DefaultClock));
    StudentsApi::from_service(Arc::new(service))
}

fn test_app(
    repository: InMemoryStudentRepository,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(students_api(repository)))
        .configure(|cfg| configure(cfg, "/api"))
}

fn ada_body() -> Value {
    json!({"name": "Ada Lovelace", "email": "ada@example.com", "age": 30, "course": "Math"})
}

async fn read_json(response: actix_web::dev::ServiceResponse) -> Value {
    let body = actix_test::read_body(response).await;
    serde_json::from_slice(&body).expect("JSON body")
}

#[rstest]
#[actix_web::test]
async fn create_then_fetch_returns_the_same_record() {
    let app = actix_test::init_service(test_app(InMemoryStudentRepository::default())).await;

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/students")
            .set_json(ada_body())
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    assert_eq!(
        created
            .headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok()),
        Some("application/json")
    );
    let created = read_json(created).await;
    let id = created["data"]["id"].as_str().expect("id").to_owned();

    let fetched = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/students/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(fetched.status(), StatusCode::OK);
    let fetched = read_json(fetched).await;
    assert_eq!(fetched["data"], created["data"]);
    assert_eq!(fetched["message"], json!("Student retrieved successfully"));
}

#[rstest]
#[actix_web::test]
async fn create_echoes_text_fields_as_submitted() {
    let app = actix_test::init_service(test_app(InMemoryStudentRepository::default())).await;
    let submitted = json!({
        "name": "Ada Lovelace ",
        "email": "ada@example.com",
        "age": 30,
        "course": " Math"
    });

    let created = read_json(
        actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/students")
                .set_json(&submitted)
                .to_request(),
        )
        .await,
    )
    .await;

    for field in ["name", "email", "age", "course"] {
        assert_eq!(created["data"][field], submitted[field], "{field}");
    }
}

#[rstest]
#[actix_web::test]
async fn duplicate_email_answers_400_and_keeps_one_record() {
    let repository = InMemoryStudentRepository::default();
    let app = actix_test::init_service(test_app(repository.clone())).await;

    for expected in [StatusCode::CREATED, StatusCode::BAD_REQUEST] {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/students")
                .set_json(ada_body())
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), expected);
    }
    assert_eq!(repository.count_with_email("ada@example.com"), 1);
}

#[rstest]
#[actix_web::test]
async fn update_ignores_empty_strings() {
    let app = actix_test::init_service(test_app(InMemoryStudentRepository::default())).await;
    let created = read_json(
        actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/students")
                .set_json(ada_body())
                .to_request(),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_str().expect("id").to_owned();

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/students/{id}"))
            .set_json(json!({"name": "", "course": "Physics"}))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = read_json(response).await;
    assert_eq!(updated["data"]["name"], json!("Ada Lovelace"));
    assert_eq!(updated["data"]["course"], json!("Physics"));
}

#[rstest]
#[case(actix_test::TestRequest::get())]
#[case(actix_test::TestRequest::put().set_payload("{}"))]
#[case(actix_test::TestRequest::put().set_payload(r#"{"email":"nope"}"#))]
#[case(actix_test::TestRequest::put().set_payload(r#"{"age":0.5,"course":[]}"#))]
#[case(actix_test::TestRequest::delete())]
#[actix_web::test]
async fn unknown_ids_answer_404(#[case] request: actix_test::TestRequest) {
    let app = actix_test::init_service(test_app(InMemoryStudentRepository::default())).await;

    let response = actix_test::call_service(
        &app,
        request
            .uri("/api/students/3fa85f64-5717-4562-b3fc-2c963f66afa6")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        read_json(response).await,
        json!({"success": false, "message": "Student not found"})
    );
}

#[rstest]
#[actix_web::test]
async fn malformed_json_answers_400() {
    let app = actix_test::init_service(test_app(InMemoryStudentRepository::default())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/students")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"name\":")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await["message"],
        json!("Request body must be valid JSON")
    );
}

#[rstest]
#[actix_web::test]
async fn health_reports_running_with_no_store() {
    let app = actix_test::init_service(test_app(InMemoryStudentRepository::default())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/health").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("cache-control")
            .and_then(|value| value.to_str().ok()),
        Some("no-store")
    );
    assert_eq!(
        read_json(response).await,
        json!({"success": true, "message": "Server is running"})
    );
}

#[rstest]
#[actix_web::test]
async fn routes_follow_the_configured_prefix() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(students_api(
                InMemoryStudentRepository::default(),
            )))
            .configure(|cfg| configure(cfg, "/v2")),
    )
    .await;

    let moved = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/v2/students").to_request(),
    )
    .await;
    assert_eq!(moved.status(), StatusCode::OK);

    let old = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/students").to_request(),
    )
    .await;
    assert_eq!(old.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn trailing_slash_lists_students() {
    let app = actix_test::init_service(test_app(InMemoryStudentRepository::default())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/students/")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let listed = read_json(response).await;
    assert_eq!(listed["data"], json!([]));
    assert_eq!(listed["success"], json!(true));
}

#[rstest]
#[case(actix_test::TestRequest::patch().uri("/api/students"))]
#[case(actix_test::TestRequest::post().uri("/api/students/3fa85f64-5717-4562-b3fc-2c963f66afa6"))]
#[case(actix_test::TestRequest::put().uri("/api/students"))]
#[case(actix_test::TestRequest::delete().uri("/api/students/"))]
#[actix_web::test]
async fn unsupported_verbs_answer_405(#[case] request: actix_test::TestRequest) {
    let app = actix_test::init_service(test_app(InMemoryStudentRepository::default())).await;

    let response = actix_test::call_service(&app, request.to_request()).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        read_json(response).await,
        json!({"success": false, "message": "Method not allowed"})
    );
}

#[rstest]
#[actix_web::test]
async fn paths_outside_the_collection_stay_404() {
    let app = actix_test::init_service(test_app(InMemoryStudentRepository::default())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/studentsx")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
