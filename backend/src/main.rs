//! Student records server entry point.

use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use student_records::server::{ServerSettings, bootstrap, create_server};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .wrap_err("failed to load server settings")?;
    let config = bootstrap(&settings)
        .await
        .wrap_err("failed to prepare the student store")?;

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(student_records::server::make_metrics()?));

    create_server(config)
        .wrap_err("failed to bind the HTTP server")?
        .await
        .wrap_err("server terminated abnormally")
}
