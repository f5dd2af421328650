use async_trait::async_trait;

use crate::entities::{Queue, QueueType, Schedule, TimeSlot};

#[cfg(test)]
use mockall::automock;

/// Remote outage-schedule service. Each call returns a complete, decoded
/// collection or fails; retries and timeouts are the implementation's concern.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait OutageScheduleApi: Send + Sync {
    async fn fetch_queues(&self, queue_type: QueueType) -> anyhow::Result<Vec<Queue>>;

    async fn fetch_time_slots(&self) -> anyhow::Result<Vec<TimeSlot>>;

    async fn fetch_active_schedules(&self) -> anyhow::Result<Vec<Schedule>>;
}

#[async_trait]
pub trait QueueCatalogs {
    async fn city_queues(&self) -> anyhow::Result<Vec<Queue>>;
    async fn district_queues(&self) -> anyhow::Result<Vec<Queue>>;
    async fn sub_queues(&self) -> anyhow::Result<Vec<Queue>>;
}

#[async_trait]
impl<T> QueueCatalogs for T
where
    T: OutageScheduleApi + ?Sized,
{
    async fn city_queues(&self) -> anyhow::Result<Vec<Queue>> {
        self.fetch_queues(QueueType::City).await
    }

    async fn district_queues(&self) -> anyhow::Result<Vec<Queue>> {
        self.fetch_queues(QueueType::District).await
    }

    async fn sub_queues(&self) -> anyhow::Result<Vec<Queue>> {
        self.fetch_queues(QueueType::Sub).await
    }
}
