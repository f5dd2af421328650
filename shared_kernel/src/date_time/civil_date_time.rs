use anyhow::anyhow;
use chrono::{
    DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
};
use chrono_tz::Tz;

/// The fixed civil timezone every wall-clock computation is done in.
///
/// Instants are always carried around as `DateTime<Utc>`; this type is the only
/// place where they are turned into local wall-clock values and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilTimeZone(Tz);

impl CivilTimeZone {
    pub fn new(tz: Tz) -> Self {
        CivilTimeZone(tz)
    }

    pub fn from_name(name: &str) -> anyhow::Result<Self> {
        name.parse::<Tz>()
            .map(CivilTimeZone)
            .map_err(|err| anyhow!("Unknown time zone {name}: {err}"))
    }

    pub fn tz(&self) -> Tz {
        self.0
    }

    pub fn to_local(&self, instant: &DateTime<Utc>) -> DateTime<Tz> {
        instant.with_timezone(&self.0)
    }

    pub fn local_date(&self, instant: &DateTime<Utc>) -> NaiveDate {
        self.to_local(instant).date_naive()
    }

    /// Resolves a wall-clock date and time to an instant.
    ///
    /// Ambiguous times (clocks going back) resolve to the earliest instant. Times
    /// skipped by a forward jump are read with the offset in effect before the
    /// jump, so they land just after it.
    pub fn at_local(&self, date: NaiveDate, time: NaiveTime) -> DateTime<Tz> {
        let naive = NaiveDateTime::new(date, time);
        match self.0.from_local_datetime(&naive) {
            LocalResult::Single(date_time) => date_time,
            LocalResult::Ambiguous(earliest, _) => earliest,
            LocalResult::None => {
                let offset_before = self
                    .0
                    .offset_from_utc_datetime(&(naive - Duration::days(1)))
                    .fix();
                let utc = naive - Duration::seconds(i64::from(offset_before.local_minus_utc()));
                self.0.from_utc_datetime(&utc)
            }
        }
    }

    /// Like [`CivilTimeZone::at_local`], but a repeated wall time resolves to the
    /// first of its instants that is not before `not_before`.
    pub fn at_local_not_before(
        &self,
        date: NaiveDate,
        time: NaiveTime,
        not_before: &DateTime<Utc>,
    ) -> DateTime<Tz> {
        match self.0.from_local_datetime(&NaiveDateTime::new(date, time)) {
            LocalResult::Ambiguous(earliest, latest)
                if earliest.with_timezone(&Utc) < *not_before =>
            {
                latest
            }
            _ => self.at_local(date, time),
        }
    }
}
