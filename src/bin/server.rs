//! Resume gate server.
//!
//! ```bash
//! export SESSION_SECRET=$(openssl rand -hex 32)
//! export ADMIN_PASSWORD_HASH=$(server hash-password 'my password')
//! export RESUME_PATH=/srv/resume.pdf
//! server
//! ```

use resume_gate::{
    auth::secret_hash::generate_secret_hash,
    config::ServerConfig,
    prelude::*,
    web::{ApiState, api::router},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    if let Some(command) = args.next() {
        return match (command.as_str(), args.next()) {
            ("hash-password", Some(password)) => {
                println!("{}", generate_secret_hash(&password)?);
                Ok(())
            }
            _ => Err(Error::Generic(String::from(
                "usage: server [hash-password <password>]",
            ))),
        };
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "resume_gate=debug,server=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().inspect_err(|err| {
        tracing::error!("Refusing to start: {err}");
    })?;
    let state = ApiState::new(&config).inspect_err(|err| {
        tracing::error!("Refusing to start: {err}");
    })?;
    tracing::info!("Starting with {config}");

    let app = router(state, config.cors_origin.clone());

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::debug!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutting down");
            }
        })
        .await?;

    Ok(())
}
