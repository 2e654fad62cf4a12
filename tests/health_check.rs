mod common;

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use unicorn_history_server::connectors::{ConnectorError, YunikornClient, YunikornConnector};
use unicorn_history_server::health::{
    CheckContext, Component, ComponentStatus, DatabaseComponent, HealthService, SchedulerComponent,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const UNREACHABLE_SCHEDULER: &str = "http://127.0.0.1:1";

/// Stands in for a dependency that is always up.
struct AlwaysHealthy(&'static str);

#[async_trait]
impl Component for AlwaysHealthy {
    fn identifier(&self) -> &str {
        self.0
    }

    async fn health_check(&self, _ctx: &CheckContext) -> ComponentStatus {
        ComponentStatus::healthy(self.0)
    }
}

fn scheduler_client(base_url: &str) -> Arc<dyn YunikornConnector> {
    Arc::new(YunikornClient::with_client(base_url, reqwest::Client::new()))
}

fn assert_status(status: &ComponentStatus, healthy: bool, error_fragment: &str) {
    assert_eq!(status.healthy, healthy, "unexpected verdict for {}", status.identifier);
    if healthy {
        assert!(status.error.is_none());
    } else {
        let error = status.error.as_deref().unwrap_or_default();
        assert!(
            error.contains(error_fragment),
            "error {:?} does not contain {:?}",
            error,
            error_fragment
        );
    }
}

#[tokio::test]
async fn yunikorn_client_decodes_health_report() {
    let server = MockServer::start().await;
    common::mount_scheduler_health(&server, 200).await;

    let info = scheduler_client(&server.uri()).check_health().await.unwrap();

    assert!(info.healthy);
    assert_eq!(info.health_checks.len(), 1);
    assert_eq!(info.health_checks[0].name, "Scheduling errors");
}

#[tokio::test]
async fn yunikorn_client_reports_server_errors() {
    let server = MockServer::start().await;
    common::mount_scheduler_health(&server, 500).await;

    let err = scheduler_client(&server.uri()).check_health().await.unwrap_err();

    match &err {
        ConnectorError::Status { status, body, .. } => {
            assert_eq!(*status, 500);
            assert_eq!(body, "scheduler unavailable");
        }
        other => panic!("expected a status error, got {:?}", other),
    }
    assert!(err.to_string().contains("/ws/v1/scheduler/healthcheck"));
}

#[tokio::test]
async fn yunikorn_client_reports_transport_errors_with_url() {
    let err = scheduler_client(UNREACHABLE_SCHEDULER)
        .check_health()
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert!(err
        .to_string()
        .contains("http://127.0.0.1:1/ws/v1/scheduler/healthcheck"));
}

#[tokio::test]
async fn scheduler_component_is_healthy_against_a_live_scheduler() {
    let server = MockServer::start().await;
    common::mount_scheduler_health(&server, 200).await;

    let component = SchedulerComponent::new(scheduler_client(&server.uri()));
    let status = component.health_check(&CheckContext::new()).await;

    assert_eq!(status.identifier, "yunikorn");
    assert_status(&status, true, "");
}

#[tokio::test]
async fn scheduler_component_is_unhealthy_on_non_2xx() {
    let server = MockServer::start().await;
    common::mount_scheduler_health(&server, 503).await;

    let component = SchedulerComponent::new(scheduler_client(&server.uri()));
    let status = component.health_check(&CheckContext::new()).await;

    assert_status(&status, false, "503");
}

#[tokio::test]
async fn scheduler_component_respects_the_deadline() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(common::HEALTHCHECK_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(common::scheduler_health_body())
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let component = SchedulerComponent::new(scheduler_client(&server.uri()));
    let ctx = CheckContext::new().with_timeout(Duration::from_millis(200));

    let status = tokio::time::timeout(Duration::from_secs(10), component.health_check(&ctx))
        .await
        .expect("scheduler check ignored the deadline");

    assert_status(&status, false, "context deadline exceeded");
}

#[tokio::test]
async fn readiness_pinpoints_an_unreachable_scheduler() {
    let service = HealthService::new(
        Utc::now(),
        "1.0.0",
        vec![
            Arc::new(SchedulerComponent::new(scheduler_client(UNREACHABLE_SCHEDULER))) as Arc<dyn Component>,
            Arc::new(AlwaysHealthy("postgres")) as Arc<dyn Component>,
        ],
    )
    .unwrap();

    let status = service.readiness(&CheckContext::new()).await;

    assert!(!status.healthy);
    assert_eq!(status.component_statuses.len(), 2);
    assert_status(
        status.component("yunikorn").unwrap(),
        false,
        "error sending request for url (http://127.0.0.1:1/ws/v1/scheduler/healthcheck)",
    );
    assert_status(status.component("postgres").unwrap(), true, "");
    assert_eq!(status.version, "1.0.0");
    assert_eq!(status.started_at, service.started_at());
}

#[tokio::test]
async fn readiness_with_cancelled_context_reports_every_component() {
    let server = MockServer::start().await;
    common::mount_scheduler_health(&server, 200).await;

    let service = HealthService::new(
        Utc::now(),
        "1.0.0",
        vec![Arc::new(SchedulerComponent::new(scheduler_client(&server.uri()))) as Arc<dyn Component>],
    )
    .unwrap();
    let ctx = CheckContext::new();
    ctx.cancel();

    let status = tokio::time::timeout(Duration::from_secs(5), service.readiness(&ctx))
        .await
        .expect("readiness hung on a cancelled context");

    assert!(!status.healthy);
    assert_status(status.component("yunikorn").unwrap(), false, "context canceled");
}

#[tokio::test]
async fn readiness_with_real_components() {
    let Some((_, pool)) = common::test_database().await else {
        return;
    };
    let started_at = Utc::now();

    let broken = HealthService::new(
        started_at,
        "1.0.0",
        vec![
            Arc::new(SchedulerComponent::new(scheduler_client(UNREACHABLE_SCHEDULER))) as Arc<dyn Component>,
            Arc::new(DatabaseComponent::new(pool.clone())) as Arc<dyn Component>,
        ],
    )
    .unwrap();
    let status = broken.readiness(&CheckContext::new()).await;
    assert!(!status.healthy);
    assert_eq!(status.component_statuses.len(), 2);
    assert_status(status.component("yunikorn").unwrap(), false, "127.0.0.1:1");
    assert_status(status.component("postgres").unwrap(), true, "");
    assert_eq!(status.started_at, started_at);

    let server = MockServer::start().await;
    common::mount_scheduler_health(&server, 200).await;
    let healthy = HealthService::new(
        started_at,
        "1.0.0",
        vec![
            Arc::new(SchedulerComponent::new(scheduler_client(&server.uri()))) as Arc<dyn Component>,
            Arc::new(DatabaseComponent::new(pool)) as Arc<dyn Component>,
        ],
    )
    .unwrap();
    let status = healthy.readiness(&CheckContext::new()).await;
    assert!(status.healthy);
    assert!(status
        .component_statuses
        .iter()
        .all(|s| s.healthy && s.error.is_none()));
}

#[tokio::test]
async fn liveness_endpoint_works() {
    let Some(app) = common::spawn_app().await else {
        return;
    };

    let response = reqwest::Client::new()
        .get(&format!("{}/ws/v1/health/liveness", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["healthy"], true);
    assert_eq!(body["componentStatuses"], serde_json::json!([]));
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["startedAt"].is_string());
}

#[tokio::test]
async fn readiness_endpoint_reflects_dependencies() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();
    let url = format!("{}/ws/v1/health/readiness", &app.address);

    common::mount_scheduler_health(&app.yunikorn_server, 200).await;
    let response = client.get(&url).send().await.expect("Failed to execute request.");
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["healthy"], true);
    assert_eq!(body["componentStatuses"].as_array().unwrap().len(), 2);

    app.yunikorn_server.reset().await;
    common::mount_scheduler_health(&app.yunikorn_server, 500).await;
    let response = client.get(&url).send().await.expect("Failed to execute request.");
    assert_eq!(response.status().as_u16(), 503);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["healthy"], false);
    let yunikorn = body["componentStatuses"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["identifier"] == "yunikorn")
        .unwrap();
    assert_eq!(yunikorn["healthy"], false);
    assert!(yunikorn["error"].as_str().unwrap().contains("500"));
}
