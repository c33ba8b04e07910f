//! Application state and factory
//!
//! Builds the Actix-web application around an [`OtpEmailDispatcher`].

use actix_web::{middleware::Logger, web, App};
use std::sync::Arc;

use ft_core::services::dispatch::{DispatcherConfig, MailTransport, OtpEmailDispatcher};
use ft_shared::config::AppConfig;

use crate::handlers::error::{json_error_handler, not_found};
use crate::middleware::cors::create_cors;
use crate::routes::health::health_check;
use crate::routes::otp::{send_otp, AppState};

/// Build the shared state for a mail transport
pub fn create_app_state<T>(transport: Arc<T>, config: &AppConfig) -> web::Data<AppState<T>>
where
    T: MailTransport + ?Sized,
{
    let dispatcher = OtpEmailDispatcher::new(
        transport,
        DispatcherConfig::from_otp_config(&config.otp),
    );
    web::Data::new(AppState::new(dispatcher))
}

/// Create and configure the application with all dependencies
pub fn create_app<T>(
    app_state: web::Data<AppState<T>>,
    config: &AppConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    T: MailTransport + ?Sized + 'static,
{
    let json_config = web::JsonConfig::default()
        .limit(config.server.max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        .wrap(create_cors(&config.cors, config.environment))
        .wrap(Logger::default())
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1").service(
                web::scope("/otp").route("/send", web::post().to(send_otp::<T>)),
            ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}
