//! Student records service.
//!
//! Layout follows a ports-and-adapters split:
//! - [`domain`]: validated student model, service, and ports.
//! - [`inbound`]: transport-neutral API plus HTTP and serverless adapters.
//! - [`outbound`]: PostgreSQL (and, for tests, in-memory) record stores.
//! - [`server`]: settings, bootstrap, and Actix server wiring.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
