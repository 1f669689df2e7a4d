use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryPassportRepository};
use crate::routes::with_passport_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use garment_passport::config::AppConfig;
use garment_passport::error::AppError;
use garment_passport::telemetry;
use garment_passport::workflows::passport::PassportService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryPassportRepository::default());
    let passport_service = Arc::new(PassportService::new(repository));

    let app = with_passport_routes(passport_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "garment passport service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
