use crate::configuration::Settings;
use crate::connectors::{YunikornClient, YunikornConnector};
use crate::health::{Component, DatabaseComponent, HealthService, SchedulerComponent};
use crate::routes;
use actix_cors::Cors;
use actix_web::{dev::Server, web, App, HttpServer};
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};
use std::io::{Error, ErrorKind};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

/// Components probed by readiness: the scheduler API and the history database.
pub fn build_health_service(
    pg_pool: &Pool<Postgres>,
    yunikorn_client: Arc<dyn YunikornConnector>,
    started_at: DateTime<Utc>,
) -> Result<HealthService, Error> {
    let components: Vec<Arc<dyn Component>> = vec![
        Arc::new(SchedulerComponent::new(yunikorn_client)),
        Arc::new(DatabaseComponent::new(pg_pool.clone())),
    ];

    HealthService::new(started_at, env!("CARGO_PKG_VERSION"), components)
        .map_err(|err| Error::new(ErrorKind::Other, err))
}

pub async fn run(
    listener: TcpListener,
    pg_pool: Pool<Postgres>,
    settings: Settings,
) -> Result<Server, Error> {
    let yunikorn_client = YunikornClient::new(&settings.yunikorn)
        .map_err(|err| Error::new(ErrorKind::Other, err))?;
    tracing::info!(base_url = %yunikorn_client.base_url(), "Using YuniKorn scheduler");

    let health_service = build_health_service(&pg_pool, Arc::new(yunikorn_client), Utc::now())?;
    let health_service = web::Data::new(Arc::new(health_service));

    let settings = web::Data::new(settings);
    let pg_pool = web::Data::new(pg_pool);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .service(
                web::scope("/ws/v1/health")
                    .service(routes::liveness_handler)
                    .service(routes::readiness_handler),
            )
            .service(
                web::scope("/ws/v1/history")
                    .service(routes::apps_handler)
                    .service(routes::containers_handler),
            )
            .app_data(health_service.clone())
            .app_data(pg_pool.clone())
            .app_data(settings.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
