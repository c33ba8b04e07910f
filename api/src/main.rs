use actix_web::HttpServer;
use anyhow::Context;
use log::info;

use ft_api::app::{create_app, create_app_state};
use ft_api::config;
use ft_infra::mail::create_mail_transport;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = config::load().context("failed to load configuration")?;

    // Initialize logger
    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(config.environment.default_log_filter()),
    );

    info!("Starting FinTrack API Server ({})", config.environment);
    info!("Mail configuration: {:?}", config.mail);

    let transport = create_mail_transport(&config.mail, config.environment)
        .context("failed to create mail transport")?;
    let app_state = create_app_state(transport, &config);

    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    info!("Server will bind to: {}", bind_address);

    let server_config = config.clone();
    let mut server = HttpServer::new(move || create_app(app_state.clone(), &server_config));
    if workers > 0 {
        server = server.workers(workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}
