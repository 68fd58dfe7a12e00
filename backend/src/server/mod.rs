//! Server construction and middleware wiring.
//!
//! [`bootstrap`] turns [`ServerSettings`] into a ready [`ServerConfig`]: it
//! opens the connection pool, applies migrations, and assembles the student
//! service. [`create_server`] then binds the listener. The pool lives exactly
//! as long as the server's app factories hold it.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod settings;

pub use config::ServerConfig;
#[cfg(feature = "metrics")]
pub use metrics::make_metrics;
pub use settings::{ServerSettings, SettingsError};

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::StudentService;
use crate::inbound::api::StudentsApi;
use crate::inbound::http::configure;
use crate::middleware::{Cors, Trace};
use crate::outbound::persistence::{
    DbPool, DieselStudentRepository, MigrationError, PoolError, run_migrations,
};
#[cfg(feature = "metrics")]
use metrics::MetricsLayer;

/// Fatal startup failures.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error(transparent)]
    Migration(#[from] MigrationError),
}

/// Assemble the application: CORS, tracing, student routes, and docs.
///
/// `Trace` is the outermost layer so preflight responses also carry a
/// trace id.
pub fn build_app(
    api: web::Data<StudentsApi>,
    prefix: String,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(api)
        .wrap(Cors)
        .wrap(Trace)
        .configure(|cfg| configure(cfg, &prefix));

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Open the store and build the server configuration.
///
/// # Errors
///
/// Returns [`StartupError`] when settings are invalid, the database is
/// unreachable, or migrations fail.
pub async fn bootstrap(settings: &ServerSettings) -> Result<ServerConfig, StartupError> {
    let bind_addr = settings.bind_addr()?;
    let database_url = settings.database_url()?;

    run_migrations(database_url).await?;
    let pool = DbPool::new(settings.pool_config()?).await?;
    info!(%bind_addr, prefix = %settings.api_prefix(), "student store ready");

    let service = StudentService::new(
        Arc::new(DieselStudentRepository::new(pool)),
        Arc::new(DefaultClock),
    );
    let api = StudentsApi::from_service(Arc::new(service));
    Ok(ServerConfig::new(api, bind_addr).with_api_prefix(settings.api_prefix()))
}

/// Bind an Actix server for `config`.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when the socket cannot be bound.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig {
        api,
        bind_addr,
        api_prefix,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;
    let api = web::Data::new(api);

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(api.clone(), api_prefix.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "listening");
    Ok(server)
}
