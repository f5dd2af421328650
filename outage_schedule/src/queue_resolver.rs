use crate::contracts::OutageScheduleApi;
use crate::entities::{Queue, QueueName, QueueType};
use crate::errors::OutageInfoError;

/// Looks `name` up in the city, district and sub-queue catalogs, in that order.
/// Catalogs are fetched on every call.
#[tracing::instrument(err, skip(api), level = "debug")]
pub async fn find_queue(
    api: &dyn OutageScheduleApi,
    name: &QueueName,
) -> Result<Queue, OutageInfoError> {
    for queue_type in QueueType::SEARCH_ORDER {
        let queues = api.fetch_queues(queue_type).await?;
        if let Some(queue) = queues.into_iter().find(|queue| &queue.name == name) {
            return Ok(queue);
        }
        tracing::debug!(?queue_type, "queue is not in this catalog");
    }
    Err(OutageInfoError::QueueNotFound(name.clone()))
}
