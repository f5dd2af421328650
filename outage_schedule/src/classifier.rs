use crate::entities::{OutageType, PowerStatus};

/// Power state and "probably" flag for an outage event category.
///
/// Every category, including ones this crate does not know about, asserts an outage.
pub fn classify(outage_type: &OutageType) -> (PowerStatus, bool) {
    match outage_type {
        OutageType::ProbablyOff => (PowerStatus::Off, true),
        OutageType::Off | OutageType::SureOff => (PowerStatus::Off, false),
        OutageType::Unknown => (PowerStatus::Off, false),
    }
}
