use crate::cli::ServeArgs;
use crate::infra::{build_locator, AppState};
use crate::routes::with_locator_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use rescue_locator::config::AppConfig;
use rescue_locator::error::AppError;
use rescue_locator::telemetry;
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

    let locator = build_locator(&config.directory)?;
    let shelters = locator.directory().len();

    let app = with_locator_routes(locator)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, shelters, "rescue locator ready");

    axum::serve(listener, app).await?;
    Ok(())
}
