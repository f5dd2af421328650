use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use itertools::Itertools;

use crate::classifier::classify;
use crate::clock::Clock;
use crate::contracts::OutageScheduleApi;
use crate::entities::{
    CurrentInfo, DailyInfo, DailySlot, OutageEvent, PowerStatus, Queue, QueueName, RemainingTime,
    Schedule, TimeSlot,
};
use crate::errors::OutageInfoError;
use crate::queue_resolver::find_queue;
use crate::selector::{active_schedule_for_now, schedule_for_tomorrow};
use crate::slotting::{ordinal_slot, CivilTimeSlotting, SLOTS_PER_DAY};

#[async_trait]
pub trait OutageInfoInteractor: Send + Sync {
    /// Power state of the queue in the slot that contains "now".
    async fn current_info(&self, name: &QueueName) -> Result<CurrentInfo, OutageInfoError>;

    /// One row per slot of today's schedule.
    async fn daily_info(&self, name: &QueueName) -> Result<DailyInfo, OutageInfoError>;

    /// Countdown to the next outage later today.
    async fn remaining_time(&self, name: &QueueName) -> Result<RemainingTime, OutageInfoError>;

    /// One row per slot of tomorrow's schedule.
    async fn tomorrow_daily_info(&self, name: &QueueName) -> Result<DailyInfo, OutageInfoError>;
}

pub struct OutageInfoInteractorImpl {
    api: Arc<dyn OutageScheduleApi>,
    slotting: CivilTimeSlotting,
    clock: Arc<dyn Clock>,
}

/// Everything one query reads from the service, plus the instant it treats as now.
struct Snapshot {
    queue: Queue,
    time_slots: Vec<TimeSlot>,
    schedules: Vec<Schedule>,
    now: DateTime<Utc>,
}

impl OutageInfoInteractorImpl {
    pub fn new(
        api: Arc<dyn OutageScheduleApi>,
        slotting: CivilTimeSlotting,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            api,
            slotting,
            clock,
        }
    }

    async fn snapshot(&self, name: &QueueName) -> Result<Snapshot, OutageInfoError> {
        let queue = find_queue(self.api.as_ref(), name).await?;
        let time_slots = self.api.fetch_time_slots().await?;
        let schedules = self.api.fetch_active_schedules().await?;
        Ok(Snapshot {
            queue,
            time_slots,
            schedules,
            now: self.clock.now(),
        })
    }
}

/// The queue's events in `schedule`, keyed by slot id. A later event for the same
/// slot replaces an earlier one.
fn events_by_slot(schedule: Option<&Schedule>, queue_id: i64) -> HashMap<u32, &OutageEvent> {
    schedule
        .into_iter()
        .flat_map(|schedule| schedule.events_for_queue(queue_id))
        .map(|event| (event.time_series_id, event))
        .collect()
}

fn state_of(event: Option<&&OutageEvent>) -> (PowerStatus, bool) {
    event.map_or((PowerStatus::On, false), |event| classify(&event.outage_type))
}

fn daily_table(
    queue: Queue,
    time_slots: Vec<TimeSlot>,
    schedule: Option<&Schedule>,
) -> DailyInfo {
    let events = events_by_slot(schedule, queue.id);
    let mut grid: HashMap<u32, TimeSlot> = time_slots
        .into_iter()
        .map(|slot| (slot.id, slot))
        .collect();
    let slots = (1..=SLOTS_PER_DAY)
        .map(|slot_id| {
            let time_slot = grid.remove(&slot_id).unwrap_or_else(|| {
                tracing::warn!(slot_id, "slot grid has no record, using the ordinal's half hour");
                ordinal_slot(slot_id)
            });
            let (status, probably) = state_of(events.get(&slot_id));
            DailySlot {
                time_slot,
                status,
                probably,
            }
        })
        .collect_vec();

    DailyInfo { queue, slots }
}

#[async_trait]
impl OutageInfoInteractor for OutageInfoInteractorImpl {
    #[tracing::instrument(err, skip(self), level = "info")]
    async fn current_info(&self, name: &QueueName) -> Result<CurrentInfo, OutageInfoError> {
        let Snapshot {
            queue,
            time_slots,
            schedules,
            now,
        } = self.snapshot(name).await?;

        let slot_id = self.slotting.slot_index_for(&now);
        let schedule = active_schedule_for_now(&schedules, &now);
        let events = events_by_slot(schedule, queue.id);
        let (status, probably) = state_of(events.get(&slot_id));

        let time_slot = time_slots.into_iter().find(|slot| slot.id == slot_id);
        if time_slot.is_none() {
            tracing::warn!(slot_id, "slot grid has no record for the current slot");
        }
        tracing::info!(slot_id, %status, probably, "resolved current state");

        Ok(CurrentInfo {
            queue,
            status,
            probably,
            time_slot,
        })
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn daily_info(&self, name: &QueueName) -> Result<DailyInfo, OutageInfoError> {
        let snapshot = self.snapshot(name).await?;
        let schedule = active_schedule_for_now(&snapshot.schedules, &snapshot.now);
        Ok(daily_table(snapshot.queue, snapshot.time_slots, schedule))
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn remaining_time(&self, name: &QueueName) -> Result<RemainingTime, OutageInfoError> {
        let Snapshot {
            queue,
            time_slots,
            schedules,
            now,
        } = self.snapshot(name).await?;

        let current_slot = self.slotting.slot_index_for(&now);
        let schedule = active_schedule_for_now(&schedules, &now);
        let events = events_by_slot(schedule, queue.id);

        if let Some(event) = events.get(&current_slot) {
            let (status, probably) = classify(&event.outage_type);
            return Ok(RemainingTime {
                queue,
                status,
                probably,
                remaining: Duration::zero(),
                shutoff_at: None,
                shutoff_slot: None,
            });
        }

        let next_shutoff =
            (current_slot + 1..=SLOTS_PER_DAY).find(|slot_id| events.contains_key(slot_id));
        let Some(slot_id) = next_shutoff else {
            tracing::info!(current_slot, "no shutoff scheduled for the rest of the day");
            return Ok(RemainingTime {
                queue,
                status: PowerStatus::On,
                probably: false,
                remaining: Duration::zero(),
                shutoff_at: None,
                shutoff_slot: None,
            });
        };

        let shutoff_slot = time_slots.into_iter().find(|slot| slot.id == slot_id);
        let shutoff_at = match &shutoff_slot {
            Some(slot) => self.slotting.instant_for_slot_today(slot, &now),
            None => {
                tracing::warn!(slot_id, "slot grid has no record for the shutoff slot");
                self.slotting.instant_for_ordinal_today(slot_id, &now)
            }
        };
        // A malformed slot start parses to midnight, which is already behind us.
        let remaining = (shutoff_at.with_timezone(&Utc) - now).max(Duration::zero());
        tracing::info!(slot_id, %shutoff_at, minutes = remaining.num_minutes(), "next shutoff");

        Ok(RemainingTime {
            queue,
            status: PowerStatus::On,
            probably: false,
            remaining,
            shutoff_at: Some(shutoff_at),
            shutoff_slot,
        })
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn tomorrow_daily_info(&self, name: &QueueName) -> Result<DailyInfo, OutageInfoError> {
        let snapshot = self.snapshot(name).await?;
        let schedule = schedule_for_tomorrow(&snapshot.schedules, &snapshot.now);
        Ok(daily_table(snapshot.queue, snapshot.time_slots, schedule))
    }
}
