use super::{SchedulerHealthInfo, YunikornConnector, ROUTE_SCHEDULER_HEALTHCHECK};
use crate::configuration::YunikornSettings;
use crate::connectors::errors::ConnectorError;
use async_trait::async_trait;
use reqwest::Method;
use std::time::Duration;
use tracing::Instrument;

/// reqwest-backed scheduler client. Cheap to clone, shares one connection pool.
#[derive(Debug, Clone)]
pub struct YunikornClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl YunikornClient {
    pub fn new(settings: &YunikornSettings) -> Result<Self, ConnectorError> {
        let http_client = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self::with_client(settings.base_url(), http_client))
    }

    pub fn with_client(base_url: impl Into<String>, http_client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http_client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, route: &str) -> String {
        format!("{}{}", self.base_url, route)
    }
}

#[async_trait]
impl YunikornConnector for YunikornClient {
    async fn check_health(&self) -> Result<SchedulerHealthInfo, ConnectorError> {
        let url = self.url(ROUTE_SCHEDULER_HEALTHCHECK);
        let span = tracing::info_span!("yunikorn_check_health", url = %url);

        async {
            let response = self
                .http_client
                .request(Method::GET, &url)
                .send()
                .await
                .map_err(|err| {
                    tracing::warn!("Scheduler healthcheck request failed: {:?}", err);
                    ConnectorError::from(err)
                })?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ConnectorError::Status {
                    method: Method::GET.to_string(),
                    url,
                    status: status.as_u16(),
                    body,
                });
            }

            response
                .json::<SchedulerHealthInfo>()
                .await
                .map_err(|err| ConnectorError::InvalidResponse {
                    url: url.clone(),
                    message: err.to_string(),
                })
        }
        .instrument(span)
        .await
    }
}
