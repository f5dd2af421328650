use chrono::{DateTime, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;
use shared_kernel::date_time::civil_date_time::CivilTimeZone;

use crate::entities::TimeSlot;

pub const SLOTS_PER_DAY: u32 = 48;
const SLOT_MINUTES: u32 = 30;
const SLOT_TIME_FORMAT: &str = "%H:%M:%S";

/// Maps instants onto the 48 half-hour slots of the civil day and back.
#[derive(Debug, Clone, Copy)]
pub struct CivilTimeSlotting {
    zone: CivilTimeZone,
}

impl CivilTimeSlotting {
    pub fn new(zone: CivilTimeZone) -> Self {
        Self { zone }
    }

    /// Ordinal (1..=48) of the slot the local wall-clock time of `instant` falls in.
    pub fn slot_index_for(&self, instant: &DateTime<Utc>) -> u32 {
        let local = self.zone.to_local(instant);
        let slot = local.hour() * 2 + 1;
        if local.minute() >= SLOT_MINUTES {
            slot + 1
        } else {
            slot
        }
    }

    /// Start of `slot` on the civil date of `reference`. When the clocks go back
    /// and the start is a repeated wall time, the instant not before `reference`
    /// is used.
    pub fn instant_for_slot_today(
        &self,
        slot: &TimeSlot,
        reference: &DateTime<Utc>,
    ) -> DateTime<Tz> {
        self.instant_today(parse_slot_time(&slot.start), reference)
    }

    /// Start of the slot with the given ordinal on the civil date of `reference`,
    /// for when the slot grid has no record for it.
    pub fn instant_for_ordinal_today(
        &self,
        ordinal: u32,
        reference: &DateTime<Utc>,
    ) -> DateTime<Tz> {
        self.instant_today(ordinal_start(ordinal), reference)
    }

    fn instant_today(&self, time: NaiveTime, reference: &DateTime<Utc>) -> DateTime<Tz> {
        self.zone
            .at_local_not_before(self.zone.local_date(reference), time, reference)
    }
}

/// Reads the hour and minute of an `HH:MM:SS` slot boundary.
///
/// Parsing stops at the first component that is not a number; unread components are
/// zero, so malformed text yields midnight rather than an error.
pub fn parse_slot_time(text: &str) -> NaiveTime {
    let mut parts = text
        .trim()
        .split(':')
        .map(|part| part.trim().parse::<u32>().ok());
    let hour = parts.next().flatten();
    let minute = hour.and(parts.next().flatten());

    let hour = hour.unwrap_or(0);
    NaiveTime::from_hms_opt(hour, minute.unwrap_or(0), 0)
        .or_else(|| NaiveTime::from_hms_opt(hour, 0, 0))
        .unwrap_or(NaiveTime::MIN)
}

pub fn ordinal_start(ordinal: u32) -> NaiveTime {
    let minutes = ordinal.saturating_sub(1) * SLOT_MINUTES;
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap_or(NaiveTime::MIN)
}

/// Slot record for `ordinal` built from its half hour, used where the slot grid
/// has none. The last slot ends at `24:00:00`.
pub fn ordinal_slot(ordinal: u32) -> TimeSlot {
    let end = if ordinal >= SLOTS_PER_DAY {
        "24:00:00".to_string()
    } else {
        ordinal_start(ordinal + 1).format(SLOT_TIME_FORMAT).to_string()
    };
    TimeSlot {
        id: ordinal,
        start: ordinal_start(ordinal).format(SLOT_TIME_FORMAT).to_string(),
        end,
        created_at: None,
        updated_at: None,
    }
}
