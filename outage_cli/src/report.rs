use std::iter;

use chrono::Duration;
use chrono_tz::Tz;
use itertools::Itertools;
use outage_schedule::entities::{
    CurrentInfo, DailyInfo, PowerStatus, Queue, RemainingTime, TimeSlot,
};

fn header(queue: &Queue) -> String {
    format!("  Queue: {} (id={})", queue.name, queue.id)
}

fn status_line(status: PowerStatus, probably: bool) -> String {
    format!("  Status: {status} (probably={probably})")
}

fn slot_range(slot: &TimeSlot) -> String {
    format!("{} - {}", slot.start, slot.end)
}

pub fn current(info: &CurrentInfo) -> String {
    let mut lines = vec![header(&info.queue), status_line(info.status, info.probably)];
    if let Some(slot) = &info.time_slot {
        lines.push(format!("  Time slot: {}", slot_range(slot)));
    }
    lines.join("\n")
}

pub fn daily(info: &DailyInfo) -> String {
    let rows = info.slots.iter().map(|slot| {
        let marker = match (slot.status, slot.probably) {
            (PowerStatus::Off, true) => "?",
            (PowerStatus::Off, false) => "X",
            (PowerStatus::On, _) => " ",
        };
        format!("  {marker} {}  {}", slot_range(&slot.time_slot), slot.status)
    });
    iter::once(header(&info.queue)).chain(rows).join("\n")
}

pub fn remaining(info: &RemainingTime, zone: Tz) -> String {
    let mut lines = vec![header(&info.queue), status_line(info.status, info.probably)];
    match (info.status, &info.shutoff_at) {
        (PowerStatus::On, Some(shutoff_at)) => {
            lines.push(format!(
                "  Shutoff in: {} (at {})",
                human_duration(info.remaining),
                shutoff_at.with_timezone(&zone).format("%H:%M")
            ));
            if let Some(slot) = &info.shutoff_slot {
                lines.push(format!("  Shutoff slot: {}", slot_range(slot)));
            }
        }
        (PowerStatus::Off, _) => lines.push("  Power is OFF right now".to_string()),
        (PowerStatus::On, None) => lines.push("  No shutdown scheduled for today".to_string()),
    }
    lines.join("\n")
}

fn human_duration(duration: Duration) -> String {
    let minutes = duration.num_minutes();
    match (minutes / 60, minutes % 60) {
        (0, minutes) => format!("{minutes}m"),
        (hours, minutes) => format!("{hours}h {minutes}m"),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use chrono_tz::Europe::Kyiv;
    use outage_schedule::entities::{
        CurrentInfo, DailyInfo, DailySlot, PowerStatus, Queue, RemainingTime, TimeSlot,
    };

    use super::{current, daily, human_duration, remaining};

    fn queue() -> Queue {
        Queue {
            id: 61,
            name: "6.1".into(),
            type_id: 1,
            enabled: 1,
            created_at: None,
            updated_at: None,
            deleted: 0,
        }
    }

    fn slot(id: u32, start: &str, end: &str) -> TimeSlot {
        TimeSlot {
            id,
            start: start.to_string(),
            end: end.to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_that_the_current_slot_is_shown_when_known() {
        let info = CurrentInfo {
            queue: queue(),
            status: PowerStatus::Off,
            probably: true,
            time_slot: Some(slot(17, "08:00:00", "08:30:00")),
        };
        assert_eq!(
            current(&info),
            "  Queue: 6.1 (id=61)\n  Status: OFF (probably=true)\n  Time slot: 08:00:00 - 08:30:00"
        );

        let without_slot = CurrentInfo {
            time_slot: None,
            ..info
        };
        assert_eq!(
            current(&without_slot),
            "  Queue: 6.1 (id=61)\n  Status: OFF (probably=true)"
        );
    }

    #[test]
    fn test_that_daily_rows_are_marked_by_state() {
        let info = DailyInfo {
            queue: queue(),
            slots: vec![
                DailySlot {
                    time_slot: slot(1, "00:00:00", "00:30:00"),
                    status: PowerStatus::On,
                    probably: false,
                },
                DailySlot {
                    time_slot: slot(2, "00:30:00", "01:00:00"),
                    status: PowerStatus::Off,
                    probably: false,
                },
                DailySlot {
                    time_slot: slot(3, "01:00:00", "01:30:00"),
                    status: PowerStatus::Off,
                    probably: true,
                },
            ],
        };

        let lines = daily(&info).lines().map(str::to_string).collect::<Vec<_>>();
        assert_eq!(lines[0], "  Queue: 6.1 (id=61)");
        assert_eq!(lines[1], "    00:00:00 - 00:30:00  ON");
        assert_eq!(lines[2], "  X 00:30:00 - 01:00:00  OFF");
        assert_eq!(lines[3], "  ? 01:00:00 - 01:30:00  OFF");
    }

    #[test]
    fn test_the_three_countdown_outcomes() {
        let upcoming = RemainingTime {
            queue: queue(),
            status: PowerStatus::On,
            probably: false,
            remaining: Duration::minutes(75),
            shutoff_at: Some(Kyiv.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap()),
            shutoff_slot: Some(slot(19, "09:00:00", "09:30:00")),
        };
        let text = remaining(&upcoming, Kyiv);
        assert!(text.contains("Shutoff in: 1h 15m (at 09:00)"));
        assert!(text.contains("Shutoff slot: 09:00:00 - 09:30:00"));

        let off = RemainingTime {
            status: PowerStatus::Off,
            remaining: Duration::zero(),
            shutoff_at: None,
            shutoff_slot: None,
            ..upcoming.clone()
        };
        assert!(remaining(&off, Kyiv).contains("Power is OFF right now"));

        let clear = RemainingTime {
            status: PowerStatus::On,
            ..off
        };
        assert!(remaining(&clear, Kyiv).contains("No shutdown scheduled for today"));
    }

    #[test]
    fn test_human_duration() {
        assert_eq!(human_duration(Duration::minutes(15)), "15m");
        assert_eq!(human_duration(Duration::minutes(120)), "2h 0m");
        assert_eq!(human_duration(Duration::seconds(59)), "0m");
    }
}
