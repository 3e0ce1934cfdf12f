//! orvio control plane server.

mod app;
mod bootstrap;
mod config;
mod logging;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Configuration error: {err}");
            std::process::exit(1);
        }
    };

    logging::init(config.environment);

    if let Err(err) = run(config).await {
        tracing::error!(error = %err, "Server exited with error");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let app = app::build(&config)?;

    if let (Some(email), Some(password)) = (
        &config.bootstrap_admin_email,
        &config.bootstrap_admin_password,
    ) {
        let hasher = orvio_auth::PasswordHasher::with_params(
            config.hash_memory_kib,
            config.hash_iterations,
            1,
        )?;
        bootstrap::bootstrap_admin(&app.auth_state.principals, &hasher, email, password).await?;
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        environment = ?config.environment,
        "orvio API listening"
    );

    axum::serve(listener, app.router)
        .with_graceful_shutdown(app::shutdown_signal())
        .await?;

    Ok(())
}
