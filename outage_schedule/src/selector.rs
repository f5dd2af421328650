//! Picks the published schedule that governs a query.
//!
//! Both selectors work on the schedules in the order the remote service returned
//! them: "first match" and "last schedule" refer to that order.

use chrono::{DateTime, Utc};

use crate::entities::Schedule;

/// The schedule whose validity contains `now`, falling back to the last schedule
/// when none does.
pub fn active_schedule_for_now<'a>(
    schedules: &'a [Schedule],
    now: &DateTime<Utc>,
) -> Option<&'a Schedule> {
    schedules
        .iter()
        .find(|schedule| schedule.is_active_at(now))
        .or_else(|| schedules.last())
}

/// The first schedule other than the current one that starts at or after `now`.
///
/// Without such a schedule this falls back to the last schedule that is not the
/// current one, and to the current schedule only when nothing else was published.
/// That fallback can be a schedule that has already ended: with only yesterday's
/// and today's schedules published, "tomorrow" is yesterday's.
pub fn schedule_for_tomorrow<'a>(
    schedules: &'a [Schedule],
    now: &DateTime<Utc>,
) -> Option<&'a Schedule> {
    let current_id = active_schedule_for_now(schedules, now).map(|schedule| schedule.id);
    let mut others = schedules
        .iter()
        .filter(|schedule| Some(schedule.id) != current_id);

    others
        .clone()
        .find(|schedule| schedule.validity.starts_at_or_after(now))
        .or_else(|| others.next_back())
        .or_else(|| schedules.last())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::{active_schedule_for_now, schedule_for_tomorrow};
    use crate::entities::Schedule;
    use crate::fixtures::schedule;

    fn day(id: i64, day: u32) -> Schedule {
        let from = Utc.with_ymd_and_hms(2024, 6, day, 0, 0, 0).unwrap();
        schedule(id, from, from + Duration::days(1), vec![])
    }

    fn ids(schedule: Option<&Schedule>) -> Option<i64> {
        schedule.map(|schedule| schedule.id)
    }

    #[test]
    fn test_that_the_schedule_containing_now_is_active() {
        let schedules = vec![day(1, 14), day(2, 15), day(3, 16)];
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(ids(active_schedule_for_now(&schedules, &now)), Some(2));
    }

    #[test]
    fn test_that_validity_includes_from_and_excludes_to() {
        let schedules = vec![day(1, 14), day(2, 15)];
        let midnight = Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap();
        assert_eq!(ids(active_schedule_for_now(&schedules, &midnight)), Some(2));

        let just_before = midnight - Duration::seconds(1);
        assert_eq!(ids(active_schedule_for_now(&schedules, &just_before)), Some(1));
    }

    #[test]
    fn test_that_the_last_schedule_is_used_when_none_is_active() {
        let schedules = vec![day(1, 14), day(2, 15)];
        let now = Utc.with_ymd_and_hms(2024, 6, 20, 12, 0, 0).unwrap();
        assert_eq!(ids(active_schedule_for_now(&schedules, &now)), Some(2));
    }

    #[test]
    fn test_that_nothing_is_selected_without_schedules() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(ids(active_schedule_for_now(&[], &now)), None);
        assert_eq!(ids(schedule_for_tomorrow(&[], &now)), None);
    }

    #[test]
    fn test_that_tomorrow_is_the_next_schedule_starting_after_now() {
        let schedules = vec![day(1, 15), day(2, 16), day(3, 17)];
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(ids(schedule_for_tomorrow(&schedules, &now)), Some(2));
    }

    #[test]
    fn test_that_a_schedule_starting_exactly_now_counts_as_upcoming() {
        let now = Utc.with_ymd_and_hms(2024, 6, 16, 0, 0, 0).unwrap();
        // Schedule 1 ends at `now` and never starts after it, so it is only a fallback.
        let schedules = vec![day(1, 15), day(2, 16)];
        assert_eq!(ids(active_schedule_for_now(&schedules, &now)), Some(2));
        assert_eq!(ids(schedule_for_tomorrow(&schedules, &now)), Some(1));

        let upcoming = vec![day(1, 15), day(2, 16)]
            .into_iter()
            .map(|mut schedule| {
                schedule.validity.to = schedule.validity.to + Duration::seconds(1);
                schedule
            })
            .collect::<Vec<_>>();
        assert_eq!(ids(active_schedule_for_now(&upcoming, &now)), Some(1));
        assert_eq!(ids(schedule_for_tomorrow(&upcoming, &now)), Some(2));
    }

    #[test]
    fn test_that_tomorrow_falls_back_to_an_ended_schedule() {
        let schedules = vec![day(1, 14), day(2, 15)];
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(ids(active_schedule_for_now(&schedules, &now)), Some(2));
        assert_eq!(ids(schedule_for_tomorrow(&schedules, &now)), Some(1));
    }

    #[test]
    fn test_that_a_lone_schedule_is_both_current_and_tomorrow() {
        let schedules = vec![day(7, 16)];
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 20, 0, 0).unwrap();
        assert_eq!(ids(active_schedule_for_now(&schedules, &now)), Some(7));
        assert_eq!(ids(schedule_for_tomorrow(&schedules, &now)), Some(7));
    }

    #[test]
    fn test_that_tomorrow_never_repeats_the_current_schedule_when_others_exist() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let inputs = vec![
            vec![day(1, 14), day(2, 15)],
            vec![day(2, 15), day(1, 14)],
            vec![day(1, 10), day(2, 11)],
            vec![day(1, 15), day(2, 16)],
            vec![day(3, 16), day(1, 15), day(2, 14)],
        ];
        for schedules in inputs {
            let current = ids(active_schedule_for_now(&schedules, &now));
            let tomorrow = ids(schedule_for_tomorrow(&schedules, &now));
            assert!(tomorrow.is_some());
            assert_ne!(current, tomorrow, "schedules {schedules:?}");
        }
    }
}
