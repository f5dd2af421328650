use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize, Serializer};
use shared_kernel::date_time::time_frame::TimeFrame;
use shared_kernel::string_key;

string_key!(QueueName);

/// Queue catalogs, in the order they are searched when resolving a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueType {
    City = 1,
    District = 2,
    Sub = 3,
}

impl QueueType {
    pub const SEARCH_ORDER: [QueueType; 3] = [QueueType::City, QueueType::District, QueueType::Sub];

    pub fn id(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Queue {
    pub id: i64,
    pub name: QueueName,
    pub type_id: i64,
    pub enabled: i64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted: i64,
}

impl Queue {
    pub fn is_enabled(&self) -> bool {
        self.enabled == 1
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted == 1
    }
}

/// One of the 48 half-hour slots of a day. `start` and `end` are `HH:MM:SS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: u32,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutageType {
    #[serde(rename = "OFF")]
    Off,
    #[serde(rename = "PROBABLY_OFF")]
    ProbablyOff,
    #[serde(rename = "SURE_OFF")]
    SureOff,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutageEvent {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub outage_schedule_id: i64,
    pub time_series_id: u32,
    pub outage_queue_id: i64,
    #[serde(rename = "type")]
    pub outage_type: OutageType,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: i64,
    #[serde(flatten)]
    pub validity: TimeFrame<DateTime<Utc>>,
    #[serde(default)]
    pub series: Vec<OutageEvent>,
}

impl Schedule {
    pub fn is_active_at(&self, now: &DateTime<Utc>) -> bool {
        self.validity.contains(now)
    }

    pub fn events_for_queue(&self, queue_id: i64) -> impl Iterator<Item = &OutageEvent> {
        self.series
            .iter()
            .filter(move |event| event.outage_queue_id == queue_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerStatus {
    #[serde(rename = "ON")]
    On,
    #[serde(rename = "OFF")]
    Off,
}

impl std::fmt::Display for PowerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PowerStatus::On => write!(f, "ON"),
            PowerStatus::Off => write!(f, "OFF"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentInfo {
    pub queue: Queue,
    pub status: PowerStatus,
    pub probably: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<TimeSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySlot {
    pub time_slot: TimeSlot,
    pub status: PowerStatus,
    pub probably: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyInfo {
    pub queue: Queue,
    pub slots: Vec<DailySlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemainingTime {
    pub queue: Queue,
    pub status: PowerStatus,
    pub probably: bool,
    #[serde(serialize_with = "serialize_whole_seconds")]
    pub remaining: Duration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shutoff_at: Option<DateTime<Tz>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shutoff_slot: Option<TimeSlot>,
}

fn serialize_whole_seconds<S: Serializer>(
    duration: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(duration.num_seconds())
}
