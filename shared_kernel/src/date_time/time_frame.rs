use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeFrame<T> {
    pub from: T,
    pub to: T,
}

impl<T: PartialOrd> TimeFrame<T> {
    /// Half-open: `from` is inside the frame, `to` is not.
    pub fn contains(&self, value: &T) -> bool {
        &self.from <= value && value < &self.to
    }

    pub fn starts_at_or_after(&self, value: &T) -> bool {
        &self.from >= value
    }
}
