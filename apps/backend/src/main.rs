use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use orders_backend::config::env::{parse_var, var_or};
use orders_backend::config::{db_url, security_from_env, SmsConfig};
use orders_backend::infra::state::build_state;
use orders_backend::middleware::{cors_middleware, RequestTrace, StructuredLogger, TraceSpan};
use orders_backend::services::notifications::SmsNotifier;
use orders_backend::{routes, telemetry};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let host = var_or("BACKEND_HOST", "0.0.0.0");
    let port = parse_var::<u16>("BACKEND_PORT", 3001).unwrap_or_else(|e| fail(e));

    let security_config = security_from_env().unwrap_or_else(|e| fail(e));
    let sms_config = SmsConfig::from_env();
    info!(sms = ?sms_config, security = ?security_config, "configuration loaded");
    let notifier = SmsNotifier::new(sms_config).unwrap_or_else(|e| fail(e));

    let app_state = build_state()
        .with_db(db_url())
        .with_security(security_config)
        .with_notifier(Arc::new(notifier))
        .build()
        .await
        .unwrap_or_else(|e| fail(e));

    info!(%host, port, "starting Savannah Orders API");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(TraceSpan)
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .wrap(cors_middleware())
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}

fn fail(err: impl std::fmt::Display) -> ! {
    error!(error = %err, "startup failed");
    eprintln!("startup failed: {err}");
    std::process::exit(1);
}
