use anyhow::Context;
use async_trait::async_trait;
use shared_kernel::http_client::HttpClient;
use url::Url;

use crate::config::OutageApiConfig;
use crate::contracts::OutageScheduleApi;
use crate::entities::{Queue, QueueType, Schedule, TimeSlot};

const TIME_SLOTS_PATH: &str = "/api/schedule/time-series";
const ACTIVE_SCHEDULES_PATH: &str = "/api/v2/schedule/active";

/// [`OutageScheduleApi`] backed by the oblenergo JSON endpoints.
#[derive(Clone)]
pub struct HttpOutageScheduleApi {
    host: Url,
    client: HttpClient,
}

impl HttpOutageScheduleApi {
    pub fn new(host: Url, client: HttpClient) -> Self {
        Self { host, client }
    }

    pub fn from_config(config: &OutageApiConfig) -> anyhow::Result<Self> {
        let host = Url::parse(&config.host)
            .with_context(|| format!("Invalid outage api host {}", config.host))?;
        let client = HttpClient::new(config.http_client_config())?;
        Ok(Self::new(host, client))
    }

    fn endpoint(&self, path: &str) -> anyhow::Result<Url> {
        self.host
            .join(path)
            .with_context(|| format!("Failed to build url for {path}"))
    }
}

#[async_trait]
impl OutageScheduleApi for HttpOutageScheduleApi {
    #[tracing::instrument(err, skip(self), level = "debug")]
    async fn fetch_queues(&self, queue_type: QueueType) -> anyhow::Result<Vec<Queue>> {
        let url = self.endpoint(&format!("/api/outage-queue/by-type/{}", queue_type.id()))?;
        self.client
            .get_json::<Vec<Queue>>(url)
            .await
            .with_context(|| format!("Failed to fetch {queue_type:?} queues"))
    }

    #[tracing::instrument(err, skip(self), level = "debug")]
    async fn fetch_time_slots(&self) -> anyhow::Result<Vec<TimeSlot>> {
        let url = self.endpoint(TIME_SLOTS_PATH)?;
        self.client
            .get_json::<Vec<TimeSlot>>(url)
            .await
            .context("Failed to fetch time slots")
    }

    #[tracing::instrument(err, skip(self), level = "debug")]
    async fn fetch_active_schedules(&self) -> anyhow::Result<Vec<Schedule>> {
        let url = self.endpoint(ACTIVE_SCHEDULES_PATH)?;
        self.client
            .get_json::<Vec<Schedule>>(url)
            .await
            .context("Failed to fetch active schedules")
    }
}
