use chrono::{DateTime, Utc};
use shared_kernel::date_time::time_frame::TimeFrame;

use crate::entities::{OutageEvent, OutageType, Queue, Schedule, TimeSlot};
use crate::slotting::{ordinal_slot, SLOTS_PER_DAY};

pub fn time_slot(id: u32) -> TimeSlot {
    ordinal_slot(id)
}

pub fn time_slots() -> Vec<TimeSlot> {
    (1..=SLOTS_PER_DAY).map(time_slot).collect()
}

pub fn queue(id: i64, name: &str, type_id: i64) -> Queue {
    Queue {
        id,
        name: name.into(),
        type_id,
        enabled: 1,
        created_at: None,
        updated_at: None,
        deleted: 0,
    }
}

pub fn event(queue_id: i64, slot: u32, outage_type: OutageType) -> OutageEvent {
    OutageEvent {
        id: 0,
        outage_schedule_id: 0,
        time_series_id: slot,
        outage_queue_id: queue_id,
        outage_type,
        created_at: None,
        updated_at: None,
    }
}

pub fn schedule(
    id: i64,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    series: Vec<OutageEvent>,
) -> Schedule {
    let series = series
        .into_iter()
        .map(|event| OutageEvent {
            outage_schedule_id: id,
            ..event
        })
        .collect();
    Schedule {
        id,
        validity: TimeFrame { from, to },
        series,
    }
}
