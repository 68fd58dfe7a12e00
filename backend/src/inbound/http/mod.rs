//! HTTP inbound adapter exposing the student REST endpoints.
//!
//! ```text
//! GET    {prefix}/students
//! GET    {prefix}/students/{id}
//! POST   {prefix}/students
//! PUT    {prefix}/students/{id}
//! DELETE {prefix}/students/{id}
//! GET    {prefix}/health
//! ```
//!
//! Handlers delegate to [`StudentsApi`] and render its [`ApiReply`] verbatim.

use actix_web::http::header::{CONTENT_TYPE, HeaderValue};
use actix_web::{HttpRequest, HttpResponse, web};

use super::api::StudentsApi;
use super::envelope::ApiReply;

pub mod health;
pub mod students;

/// Render an API reply as an actix response.
pub fn into_response(reply: ApiReply) -> HttpResponse {
    HttpResponse::build(reply.status)
        .insert_header((CONTENT_TYPE, HeaderValue::from_static("application/json")))
        .body(reply.body())
}

/// Mount the student routes and the health probe under `prefix`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use student_records::inbound::http::configure;
///
/// let app = App::new().configure(|cfg| configure(cfg, "/api"));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig, prefix: &str) {
    let collection = format!("{prefix}/students");
    cfg.service(
        web::scope(prefix)
            .service(students::list_students)
            .service(students::create_student)
            .service(students::get_student)
            .service(students::update_student)
            .service(students::delete_student)
            .service(health::health)
            .default_service(web::to(
                move |req: HttpRequest, body: web::Bytes, api: ApiState| {
                    let collection = collection.clone();
                    async move { unmatched(&collection, &req, &body, &api).await }
                },
            )),
    );
}

/// Requests under the collection that no handler claimed, such as a trailing
/// slash or an unsupported verb, go through [`StudentsApi::dispatch`] so the
/// answer matches the function adapter. Anything else is a bare 404.
async fn unmatched(
    collection: &str,
    req: &HttpRequest,
    body: &[u8],
    api: &StudentsApi,
) -> HttpResponse {
    match req.path().strip_prefix(collection) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => {
            let id = rest.trim_matches('/');
            let id = (!id.is_empty()).then_some(id);
            into_response(api.dispatch(req.method().as_str(), id, body).await)
        }
        _ => HttpResponse::NotFound().finish(),
    }
}

/// Shared handler state.
pub type ApiState = web::Data<StudentsApi>;
