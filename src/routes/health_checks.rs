use crate::configuration::Settings;
use crate::health::{CheckContext, HealthService};
use actix_web::{get, web, HttpResponse};
use std::sync::Arc;

#[tracing::instrument(name = "Liveness health check.", skip(health_service))]
#[get("/liveness")]
pub async fn liveness_handler(health_service: web::Data<Arc<HealthService>>) -> HttpResponse {
    let status = health_service.liveness(&CheckContext::new()).await;
    HttpResponse::Ok().json(status)
}

/// 200 when every component is healthy, 503 otherwise. The body is the same either way.
/// Dropping this future on client disconnect cancels the in-flight checks.
#[tracing::instrument(name = "Readiness health check.", skip(health_service, settings))]
#[get("/readiness")]
pub async fn readiness_handler(
    health_service: web::Data<Arc<HealthService>>,
    settings: web::Data<Settings>,
) -> HttpResponse {
    let ctx = CheckContext::new().with_timeout(settings.health.readiness_timeout());
    let status = health_service.readiness(&ctx).await;

    if status.healthy {
        HttpResponse::Ok().json(status)
    } else {
        HttpResponse::ServiceUnavailable().json(status)
    }
}
