#![allow(dead_code)]

use serde_json::json;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use unicorn_history_server::configuration::{get_configuration, DatabaseSettings, Settings};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const HEALTHCHECK_PATH: &str = "/ws/v1/scheduler/healthcheck";

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub yunikorn_server: MockServer,
}

pub fn scheduler_health_body() -> serde_json::Value {
    json!({
        "Healthy": true,
        "HealthChecks": [
            {
                "Name": "Scheduling errors",
                "Succeeded": true,
                "Description": "Check for scheduling error entries in metrics",
                "DiagnosisMessage": "There were 0 scheduling errors logged in the metrics"
            }
        ]
    })
}

pub async fn mount_scheduler_health(server: &MockServer, status: u16) {
    let template = if status == 200 {
        ResponseTemplate::new(200).set_body_json(scheduler_health_body())
    } else {
        ResponseTemplate::new(status).set_body_string("scheduler unavailable")
    };

    Mock::given(method("GET"))
        .and(path(HEALTHCHECK_PATH))
        .respond_with(template)
        .mount(server)
        .await;
}

pub async fn configure_database(config: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let mut connection = PgConnection::connect(&config.connection_string_without_db()).await?;

    connection
        .execute(format!(r#"CREATE DATABASE "{}""#, config.database_name).as_str())
        .await?;

    let connection_pool = PgPool::connect(&config.connection_string()).await?;

    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .map_err(|err| sqlx::Error::Migrate(Box::new(err)))?;

    Ok(connection_pool)
}

/// Fresh database per call. `None` when no Postgres is reachable, tests then skip.
pub async fn test_database() -> Option<(Settings, PgPool)> {
    let mut configuration = get_configuration().expect("Failed to get configuration");
    configuration.database.database_name = uuid::Uuid::new_v4().to_string();

    match configure_database(&configuration.database).await {
        Ok(pool) => Some((configuration, pool)),
        Err(err) => {
            eprintln!("Skipping tests: failed to connect to postgres: {}", err);
            None
        }
    }
}

pub async fn spawn_app() -> Option<TestApp> {
    let yunikorn_server = MockServer::start().await;
    let (mut configuration, connection_pool) = test_database().await?;

    let scheduler_address = yunikorn_server.address();
    configuration.yunikorn.host = scheduler_address.ip().to_string();
    configuration.yunikorn.port = scheduler_address.port();
    configuration.yunikorn.secure = false;
    configuration.health.readiness_timeout_secs = 2;

    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let server =
        unicorn_history_server::startup::run(listener, connection_pool.clone(), configuration)
            .await
            .expect("Failed to bind address.");

    let _ = tokio::spawn(server);
    println!("Used Port: {}", port);

    Some(TestApp {
        address,
        db_pool: connection_pool,
        yunikorn_server,
    })
}
